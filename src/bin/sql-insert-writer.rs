//! sql-insert-writer: template INSERT statements from live table metadata
//!
//! # Usage
//!
//! ```bash
//! # INSERT ... VALUES with three placeholder tuples
//! sql-insert-writer tab1 --tuples 3 --db postgresql://localhost/app
//!
//! # INSERT ... SELECT from two sources, casting mismatched types
//! DATABASE_URL=sqlite:///app.db sql-insert-writer tab1 tab2 tab3 --cast
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use colored::*;
use sql_insert_writer::config::DefaultsConfig;
use sql_insert_writer::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sql-insert-writer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Writes readable template SQL INSERT statements", long_about = None)]
#[command(after_help = "EXAMPLES:
    sql-insert-writer tab1 --db postgresql://localhost/app
    sql-insert-writer tab1 --tuples 3
    sql-insert-writer tab1 tab2 tab3 --cast --join-on id")]
struct Cli {
    /// Table to INSERT into
    destination: String,

    /// Source tables to SELECT from, in order of preference
    sources: Vec<String>,

    /// Database URL (postgresql://, mysql://, sqlite:///)
    #[arg(long, env = "DATABASE_URL")]
    db: Option<String>,

    /// Number of VALUES tuples
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    tuples: u32,

    /// Include source table name even if only one source
    #[arg(long, overrides_with = "no_qualify")]
    qualify: bool,

    /// Leave column names unqualified when there is only one source
    #[arg(long, overrides_with = "qualify")]
    no_qualify: bool,

    /// CAST values as destination data type
    #[arg(long, overrides_with = "no_cast")]
    cast: bool,

    /// Do not CAST values
    #[arg(long, overrides_with = "cast")]
    no_cast: bool,

    /// Columns joining each later source to the first one
    #[arg(long, value_delimiter = ',')]
    join_on: Vec<String>,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Explicit `--flag`/`--no-flag` wins; otherwise the configured default.
    fn resolve(on: bool, off: bool, default: bool) -> bool {
        if on {
            true
        } else if off {
            false
        } else {
            default
        }
    }

    /// Several VALUES tuples make no sense next to a SELECT source.
    fn check_conflicts(&self) -> Result<(), clap::Error> {
        if self.tuples > 1 && self.sources.iter().any(|s| !s.trim().is_empty()) {
            return Err(Cli::command().error(
                ErrorKind::ArgumentConflict,
                "--tuples cannot be used together with source tables",
            ));
        }
        Ok(())
    }

    fn request(&self, defaults: &DefaultsConfig) -> GenerationRequest {
        GenerationRequest::new(&self.destination)
            .sources(&self.sources)
            .qualify(Self::resolve(self.qualify, self.no_qualify, defaults.qualify))
            .cast(Self::resolve(self.cast, self.no_cast, defaults.cast))
            .tuples(self.tuples as usize)
            .join_on(&self.join_on)
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = cli.check_conflicts() {
        e.exit();
    }

    match run(&cli).await {
        Ok(sql) => println!("{}", sql),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: &Cli) -> Result<String> {
    let config = Config::load(cli.config.as_deref())?;
    let url = config.database_url(cli.db.as_deref())?;

    let request = cli.request(&config.defaults);

    let db = Database::connect_with(&url, config.database.max_connections)
        .await
        .context("could not open database")?;
    let sql = generate(&db, &request)
        .await
        .map_err(|e| generation_error(e, &cli.destination))?;
    db.close().await;

    Ok(sql)
}

/// Attach a command line hint where the library error has one.
fn generation_error(e: InsertWriterError, destination: &str) -> anyhow::Error {
    match e {
        InsertWriterError::MissingJoinKey { .. } => {
            anyhow::Error::new(e).context("choose the join columns with --join-on")
        }
        e => anyhow::Error::new(e).context(format!("could not generate INSERT for {}", destination)),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("sql_insert_writer=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("sql-insert-writer").chain(args.iter().copied()))
    }

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_tuples_conflict_with_sources() {
        let cli = parse(&["tab1", "tab2", "--tuples", "2"]).unwrap();
        let err = cli.check_conflicts().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);

        assert!(parse(&["tab1", "--tuples", "3"]).unwrap().check_conflicts().is_ok());
        assert!(parse(&["tab1", "", "--tuples", "3"]).unwrap().check_conflicts().is_ok());
    }

    #[test]
    fn test_zero_tuples_rejected_by_parser() {
        let err = parse(&["tab1", "--tuples", "0"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_last_flag_wins() {
        let cli = parse(&["tab1", "tab2", "--qualify", "--no-qualify"]).unwrap();
        assert!(!cli.request(&DefaultsConfig::default()).qualify);

        let cli = parse(&["tab1", "tab2", "--no-cast", "--cast"]).unwrap();
        assert!(cli.request(&DefaultsConfig::default()).cast);
    }

    #[test]
    fn test_config_defaults_apply_without_flags() {
        let defaults = DefaultsConfig {
            qualify: true,
            cast: true,
        };
        let request = parse(&["tab1", "tab2"]).unwrap().request(&defaults);
        assert!(request.qualify);
        assert!(request.cast);

        let request = parse(&["tab1", "tab2", "--no-cast"]).unwrap().request(&defaults);
        assert!(request.qualify);
        assert!(!request.cast);
    }

    #[test]
    fn test_request_from_arguments() {
        let request = parse(&["tab1", "tab2", "tab3", "--join-on", "id,kind"])
            .unwrap()
            .request(&DefaultsConfig::default());
        assert_eq!(request.destination, "tab1");
        assert_eq!(request.sources, vec!["tab2", "tab3"]);
        assert_eq!(request.join_on, vec!["id", "kind"]);
        assert_eq!(request.tuples, 1);
    }

    #[test]
    fn test_missing_join_key_suggests_flag() {
        let err = generation_error(InsertWriterError::missing_join_key("tab2", "tab5"), "tab1");
        assert_eq!(
            format!("{:#}", err),
            "choose the join columns with --join-on: No join column shared by tab2 and tab5"
        );

        let err = generation_error(InsertWriterError::UnknownTable("nope".into()), "tab1");
        assert_eq!(
            format!("{:#}", err),
            "could not generate INSERT for tab1: No table nope in database"
        );
    }

    #[test]
    fn test_help_lists_sources() {
        let err = parse(&["--help"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("[SOURCES]..."));
    }
}
