//! Core data model and trait seams shared across the engine.

pub mod catalog;
pub mod descriptor;
pub mod identifier;
pub mod plan;
pub mod schema;
pub mod traits;
