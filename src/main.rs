mod cli;
mod commands;
mod context;

use anyhow::Result;

fn main() -> Result<()> {
    cli::run_from_env()
}
