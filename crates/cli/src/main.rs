//! Drone fleet command-translation and dispatch MCP server.

use anyhow::Result;
use clap::Parser;
use dronecmd_cli::{run, Args};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Err(err) = run(args).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
    Ok(())
}
