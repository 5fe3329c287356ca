use anyhow::Result;
use clap::{Parser, Subcommand};
use satchel_core::DigPolicy;
use std::path::PathBuf;
use tracing_subscriber::filter::EnvFilter;

mod commands;
mod document;
mod output;

use output::Output;

/// Query JSON and TOML documents as ordered maps.
///
/// EXAMPLES:
///     satchel get profile.json email            Value of a top-level key
///     satchel fetch profile.json city -d '"?"'  Value or a fallback
///     satchel dig data.json user roles 0 name   Nested lookup
///     satchel keys Cargo.toml                   Top-level keys in order
///
/// SEGMENTS:
///     42      number key / array index (negative counts from the end)
///     :name   symbol key
///     other   string key
///
/// ENVIRONMENT VARIABLES:
///     SATCHEL_LOG         Log filter (default: warn)
///     SATCHEL_DIG_POLICY  strict or lenient
///     SATCHEL_PRETTY      Set to '0' for compact output
#[derive(Parser)]
#[command(name = "satchel")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Use this configuration file instead of discovering satchel.toml
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value of a key (null when absent)
    Get {
        /// JSON or TOML document
        file: PathBuf,
        key: String,
    },

    /// Print the value of a key, failing when it is absent
    ///
    /// EXAMPLES:
    ///     satchel fetch profile.json email
    ///     satchel fetch profile.json location --default '"Unknown"'
    Fetch {
        file: PathBuf,
        key: String,
        /// Fallback value (parsed as JSON, else taken as a string)
        #[arg(long, short = 'd')]
        default: Option<String>,
    },

    /// Walk nested maps and arrays (null when any segment is absent)
    Dig {
        file: PathBuf,
        #[arg(required = true, allow_negative_numbers = true)]
        segments: Vec<String>,
        /// Behavior when a segment lands on a scalar
        #[arg(long, value_parser = parse_policy)]
        policy: Option<DigPolicy>,
    },

    /// Print top-level keys in document order
    Keys { file: PathBuf },

    /// Print top-level values in document order
    Values { file: PathBuf },

    /// Print top-level [key, value] pairs in document order
    Pairs { file: PathBuf },

    /// Check whether a key (or, with --value, a value) is present
    Has {
        file: PathBuf,
        needle: String,
        /// Search values instead of keys
        #[arg(long)]
        value: bool,
    },
}

fn parse_policy(raw: &str) -> Result<DigPolicy, String> {
    raw.parse()
}

fn init_logging() {
    let env_filter =
        EnvFilter::try_from_env("SATCHEL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when embedded; keep the existing one
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(explicit: Option<&PathBuf>) -> Result<satchel_config::Config> {
    let mut loader = satchel_config::ConfigLoader::new();
    let config = match explicit {
        Some(path) => loader.load_from_file(path)?,
        None => loader.load_from_directory(&std::env::current_dir()?)?,
    };
    Ok(config)
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    let out = Output::from_config(&config, cli.compact);

    match cli.command {
        Commands::Get { file, key } => commands::lookup::get(&file, &key, &out)?,
        Commands::Fetch { file, key, default } => {
            commands::lookup::fetch(&file, &key, default.as_deref(), &out)?
        }
        Commands::Dig {
            file,
            segments,
            policy,
        } => {
            // Command-line flag overrides config
            let policy = policy.unwrap_or_else(|| config.dig_policy());
            commands::dig::run(&file, &segments, policy, &out)?
        }
        Commands::Keys { file } => commands::list::keys(&file, &out)?,
        Commands::Values { file } => commands::list::values(&file, &out)?,
        Commands::Pairs { file } => commands::list::pairs(&file, &out)?,
        Commands::Has {
            file,
            needle,
            value,
        } => commands::lookup::has(&file, &needle, value, &out)?,
    }

    Ok(())
}
