use anyhow::Result;
use clap::Parser;
use mindleaf_cli::{App, Cli, init_logging};
use mindleaf_core::Config;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("mindleaf: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let app = App::new(&cli, config)?;
    app.run(cli.command).await
}
