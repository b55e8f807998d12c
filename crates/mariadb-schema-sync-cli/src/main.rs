//! mariadb-schema-sync CLI - declarative schema synchronization for MariaDB.

use clap::{Parser, Subcommand};
use mariadb_schema_sync::{ddl, Config, MariaDb, Orchestrator, SchemaSource, SyncError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser)]
#[command(name = "mariadb-schema-sync")]
#[command(about = "Declarative schema synchronization for MariaDB")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Path to YAML schema declaration file
    #[arg(short, long, default_value = "schema.yaml")]
    schema: PathBuf,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile the database with the declared schema
    Sync {
        /// Dry run: print the DDL that would execute without running it
        #[arg(long)]
        dry_run: bool,
    },

    /// Test the database connection
    HealthCheck,

    /// Write starter configuration and schema files
    Init {
        /// Force overwrite existing files
        #[arg(long, short)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), SyncError> {
    let cli = Cli::parse();

    // Handle init separately (doesn't need an existing config)
    if let Commands::Init { force } = cli.command {
        return write_templates(&cli.config, &cli.schema, force);
    }

    setup_logging(&cli.verbosity, &cli.log_format).map_err(SyncError::Config)?;

    let config = Config::load(&cli.config)?;
    info!("Loaded configuration from {:?}", cli.config);

    match cli.command {
        Commands::Init { .. } => unreachable!(), // Handled above
        Commands::Sync { dry_run } => {
            let schema = SchemaSource::load(&cli.schema)?;
            info!(
                "Loaded schema from {:?} ({} records)",
                cli.schema,
                schema.records().len()
            );

            let db = MariaDb::connect(&config).await?;
            let mut orchestrator = Orchestrator::new(db, config.sync.clone());

            if dry_run {
                let plans = orchestrator.plan(&schema).await?;
                orchestrator.into_inner().close().await?;

                let mut statements = 0;
                for plan in &plans {
                    println!("-- {}", plan.table);
                    for statement in ddl::statements(plan) {
                        println!("{};", statement);
                        statements += 1;
                    }
                }

                println!("\nDry run completed!");
                println!("  Tables to change: {}", plans.len());
                println!("  Statements: {}", statements);
            } else {
                let report = orchestrator.run(&schema).await?;
                orchestrator.into_inner().close().await?;

                if cli.output_json {
                    println!("{}", report.to_json()?);
                } else {
                    println!("\nSync completed!");
                    println!("  Run ID: {}", report.run_id);
                    println!("  Duration: {:.2}s", report.duration_seconds);
                    println!("  Tables declared: {}", report.tables_declared);
                    println!(
                        "  Created: {}, altered: {}, unchanged: {}, dropped: {}",
                        report.tables_created,
                        report.tables_altered,
                        report.tables_unchanged,
                        report.tables_dropped
                    );
                    println!("  Statements executed: {}", report.statements_executed);
                }
            }
        }

        Commands::HealthCheck => {
            let db = MariaDb::connect(&config).await?;
            db.close().await?;
            println!(
                "Connection OK: {}:{}/{}",
                config.database.host, config.database.port, config.database.database
            );
        }
    }

    Ok(())
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(())
}

const CONFIG_TEMPLATE: &str = r#"# mariadb-schema-sync configuration
database:
  host: 127.0.0.1
  port: 3306
  database: app
  user: sync
  password: ""

sync:
  # Fold character lengths into reported varchar types, e.g. varchar(255).
  combine_varchar_length: true
  # Commit checkpoint granularity: per-table or per-run.
  commit: per-table
"#;

const SCHEMA_TEMPLATE: &str = r#"# Declared schema: one record per table.
# Records without `table: true` are ignored by the sync.
records:
  - name: User
    table: true
    fields:
      - name: id
        type: int
        primary_key: true
        auto_increment: true
        not_null: true
      - name: name
        type: varchar(255)
        not_null: true
      - name: created_at
        type: timestamp
        default: CURRENT_TIMESTAMP
"#;

fn write_templates(config_path: &Path, schema_path: &Path, force: bool) -> Result<(), SyncError> {
    for (path, contents) in [(config_path, CONFIG_TEMPLATE), (schema_path, SCHEMA_TEMPLATE)] {
        if path.exists() && !force {
            return Err(SyncError::Config(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }
        std::fs::write(path, contents)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}
