use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::commands::{
    admin::{self, AdminCommand},
    color::{self, ColorCommand},
    projects::{self, ProjectCommand},
    storage::{self, StorageCommand},
    themes::{self, ThemeCommand},
};
use crate::context::Context;
use folio_logger::LogLevel;

#[derive(Debug, Parser)]
#[command(
    name = "folio",
    about = "Portfolio themes and project catalog from the command line",
    version
)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Store file to use instead of `storage.file_path`
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,

    /// Also write debug messages to the log
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Browse, select, create and share themes.
    #[command(subcommand)]
    Themes(ThemeCommand),

    /// Search and filter projects.
    #[command(subcommand)]
    Projects(ProjectCommand),

    /// Color conversion and contrast helpers.
    #[command(subcommand)]
    Color(ColorCommand),

    /// Admin login, route guard and project editing.
    #[command(subcommand)]
    Admin(AdminCommand),

    /// Inspect or reset stored state.
    #[command(subcommand)]
    Storage(StorageCommand),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Color helpers need no config or store
    if let Commands::Color(command) = cli.command {
        return color::run(command, &mut out);
    }

    let ctx = Context::load(cli.config.as_deref(), cli.storage)?;
    if cli.verbose {
        folio_logger::set_min_level(LogLevel::Debug);
    }
    let result = match cli.command {
        Commands::Themes(command) => themes::run(&ctx, command, &mut out),
        Commands::Projects(command) => projects::run(&ctx, command, &mut out),
        Commands::Admin(command) => admin::run(&ctx, command, &mut out),
        Commands::Storage(command) => storage::run(&ctx, command, &mut out),
        Commands::Color(command) => color::run(command, &mut out),
    };
    out.flush()?;

    if let Err(e) = &result {
        folio_logger::error(format!("{:#}", e));
    }
    result
}
