mod commands;
mod config;
mod main_lib;

use clap::Parser;
use commands::Command;
use config::Config;
use main_lib::{build_state, init_tracing};

/// Answer one chat command for the configured token and print the reply.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Command to answer: start, price, ca, chart, buy or links
    #[arg(default_value = "start")]
    command: String,

    /// Append resolver diagnostics to price replies
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing();
    let state = build_state(config);

    let command = Command::parse(&cli.command);
    let reply = commands::respond(&state, &command, cli.debug).await;
    println!("{}", reply);
    Ok(())
}
