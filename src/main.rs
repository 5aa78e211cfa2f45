//! CLI entry point for amc-export.
//!
//! Usage: `amc-export [CONFIG_PATH] [OUTPUT_PATH]`
//!
//! Exit codes:
//! - 0: success
//! - 1: configuration, API or file-system error (`[API ERROR]` / `[IO ERROR]`)
//! - 2: network failure (`[NETWORK ERROR]`), or invalid arguments (clap)

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use amc_export::client::Endpoints;
use amc_export::config::DEFAULT_CONFIG_PATH;
use amc_export::export::{ExportOptions, run};
use amc_export::report::DEFAULT_OUTPUT_PATH;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON file holding `app_key` and `app_secret`.
    #[arg(default_value = DEFAULT_CONFIG_PATH)]
    config_path: PathBuf,

    /// Destination of the JSON report. Overwritten on success.
    #[arg(default_value = DEFAULT_OUTPUT_PATH)]
    output_path: PathBuf,
}

/// Logs go to stderr. `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Cli::parse();
    init_tracing();

    let options = ExportOptions {
        config_path: args.config_path,
        output_path: args.output_path,
        endpoints: Endpoints::default(),
    };

    match run(&options).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", e.category());
            ExitCode::from(e.exit_code())
        }
    }
}
