mod cli;

use std::process;

use clap::Parser;
use rslacker::config::{self, CONFIG_ENV_VAR};
use rslacker::error::Result;
use tracing::{debug, error};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use crate::cli::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    if let Err(e) = run(args).await {
        error!("Application error: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let env_override = std::env::var(CONFIG_ENV_VAR).ok();
    let config = config::resolve(&args.config_file(), env_override.as_deref())?;

    let report = rslacker::run(&config, args.dry_run).await?;
    debug!(?report, "Run complete");

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(verbose, quiet, rust_log.as_deref());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(verbose),
        )
        .init();
}

/// `-q`/`-v` win over `RUST_LOG`; without either, `RUST_LOG` is used as is and
/// only an unset or unparsable value falls back to `warn`.
fn log_filter(verbose: bool, quiet: bool, rust_log: Option<&str>) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }
    if verbose {
        return EnvFilter::new("debug");
    }

    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_defaults_to_warn() {
        assert_eq!(log_filter(false, false, None).to_string(), "warn");
        assert_eq!(log_filter(false, false, Some("")).to_string(), "warn");
    }

    #[test]
    fn test_log_filter_keeps_rust_log_global_level() {
        assert_eq!(log_filter(false, false, Some("debug")).to_string(), "debug");
        assert_eq!(
            log_filter(false, false, Some("rslacker=debug")).to_string(),
            "rslacker=debug"
        );
    }

    #[test]
    fn test_log_filter_flags_override_rust_log() {
        assert_eq!(log_filter(false, true, Some("debug")).to_string(), "error");
        assert_eq!(log_filter(true, false, Some("error")).to_string(), "debug");
    }
}
