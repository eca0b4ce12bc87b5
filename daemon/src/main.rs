//! The `wlt` binary: run a whitelist token in-process from a config file.

mod script;

use clap::Parser;
use std::path::PathBuf;

use wlt_token::{TokenConfig, TokenService};
use wlt_utils::LogFormat;

use crate::script::Script;

#[derive(Parser)]
#[command(name = "wlt", about = "Permissioned whitelist token ledger")]
struct Cli {
    /// Path to a TOML token configuration. Defaults apply when omitted.
    #[arg(long, env = "WLT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    /// Overrides the config file.
    #[arg(long, env = "WLT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json". Overrides the config file.
    #[arg(long, env = "WLT_LOG_FORMAT")]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Build the token from config, replay a script and print the final snapshot as JSON.
    Replay {
        /// TOML file with `[[step]]` entries.
        script: PathBuf,

        /// Stop at the first step that does not behave as expected.
        #[arg(long)]
        fail_fast: bool,

        /// Also print every emitted event as JSON lines.
        #[arg(long)]
        events: bool,
    },
    /// Print the effective configuration as TOML.
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => TokenConfig::from_toml_file(path)?,
        None => TokenConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }

    let format: LogFormat = config.log_format.parse()?;
    wlt_utils::init_logging(format, &config.log_level)?;
    if let Some(ref path) = cli.config {
        tracing::info!("loaded config from {}", path.display());
    }

    match cli.command {
        Command::Config => {
            print!("{}", config.to_toml_string()?);
        }
        Command::Replay {
            script,
            fail_fast,
            events,
        } => {
            let steps = Script::from_toml_file(&script)?;
            let mut token = TokenService::from_config(&config)?;
            tracing::info!(
                steps = steps.step.len(),
                symbol = %config.symbol,
                "replaying script {}",
                script.display()
            );

            let report = script::replay(&mut token, &steps, fail_fast)?;
            if events {
                for event in &report.events {
                    println!("{}", serde_json::to_string(event)?);
                }
            }
            println!("{}", serde_json::to_string_pretty(&token.snapshot())?);

            tracing::info!(
                applied = report.applied,
                rejected = report.rejected,
                mismatches = report.mismatches.len(),
                "replay finished"
            );
            if !report.is_clean() {
                anyhow::bail!(
                    "{} step(s) did not behave as expected:\n{}",
                    report.mismatches.len(),
                    report.mismatches.join("\n")
                );
            }
        }
    }

    Ok(())
}
