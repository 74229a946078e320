use anyhow::Result;
use clap::Subcommand;
use std::io::Write;

use crate::context::Context;

#[derive(Debug, Subcommand)]
pub enum StorageCommand {
    /// Bytes used by theme records.
    Usage,

    /// Remove all stored theme state and the search history.
    Clear,
}

pub fn run(ctx: &Context, command: StorageCommand, out: &mut dyn Write) -> Result<()> {
    let storage = ctx.theme_storage();

    match command {
        StorageCommand::Usage => {
            let limit = ctx.storage_limit();
            let size = storage.get_storage_size();
            writeln!(out, "{} of {} bytes", size, limit)?;
            if storage.is_storage_near_limit(limit) {
                writeln!(out, "Warning: storage is above 90% of its limit")?;
            }
        }

        StorageCommand::Clear => {
            storage.clear_all_theme_storage();
            ctx.search_history().clear();
            writeln!(out, "Storage cleared")?;
        }
    }

    Ok(())
}
