mod cli;
mod error;
mod reporter;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use stockcrawl_core::{crawl, ReqwestHttpClient};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::CliError;
use crate::reporter::{describe_pacing, ConsoleReporter};

fn init_tracing() {
    let json_format = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stockcrawl=info"));

    // Logs go to stderr so stdout stays clean for `--json`.
    if json_format {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    let config = cli.to_config();
    debug!(?config, "resolved configuration");

    // With `--json` the progress lines move to stderr.
    let reporter = if cli.json {
        ConsoleReporter::stderr(describe_pacing(&config))
    } else {
        println!(
            "stockcrawl {} - Alpha Vantage daily series crawler",
            env!("CARGO_PKG_VERSION")
        );
        ConsoleReporter::stdout(describe_pacing(&config))
    };

    let summary = crawl(
        &config,
        Arc::new(ReqwestHttpClient::new()),
        Arc::new(reporter),
    )
    .await?;

    if cli.json {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!("Data saved to {}", config.output_dir.display());
    }

    Ok(ExitCode::SUCCESS)
}
