mod cli;
mod commands;
mod config;
mod error;

use std::process::ExitCode;

use clap::Parser;
use client::ApiClient;

use crate::error::Result;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: cli::Args) -> Result<()> {
    let settings = config::load(&args)?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(format!(
            "expense_cli={level},client={level}",
            level = settings.log_level
        ))
        .init();

    let api = ApiClient::builder()
        .base_url(&settings.base_url)
        .api_prefix(&settings.api_prefix)
        .build()?;
    tracing::debug!("using {}{}", settings.base_url, settings.api_prefix);

    commands::run(&api, args.command).await
}
