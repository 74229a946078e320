use anyhow::{anyhow, bail, Context as _, Result};
use clap::Subcommand;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use folio_state::{BaseMode, ThemeCustomization};
use folio_storage::PageLocation;
use folio_theme::{
    apply_theme, get_theme_by_id, load_theme, merge_themes, prepare_custom_theme, validate_theme,
    RootStyle, ThemeConfig, ThemeFormat, ThemeOverride, COLOR_ROLES,
};

use crate::context::Context;

#[derive(Debug, Subcommand)]
pub enum ThemeCommand {
    /// List built-in and custom themes.
    List {
        /// Only themes whose name, description or tags match
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Print a theme's metadata and colors.
    Show { id: String },

    /// Select a theme.
    Use { id: String },

    /// Print the CSS variables of a theme (the active one by default).
    Css { id: Option<String> },

    /// Print a theme as JSON.
    Export {
        id: String,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Save a `.toml` or `.json` theme file as a custom theme.
    Import { file: PathBuf },

    /// Print a share link for a theme.
    Share { id: String },

    /// Apply the theme carried by a page URL.
    Open { url: String },

    /// Delete a custom theme.
    Delete { id: String },

    /// Show recently selected themes.
    History {
        #[arg(long)]
        clear: bool,
    },

    /// Check a theme file without saving it.
    Validate { file: PathBuf },

    /// Follow a light/dark mode switch.
    Mode { mode: BaseMode },

    /// Derive a custom theme from an existing one.
    Create {
        name: String,
        /// Theme to start from
        #[arg(long)]
        from: String,
        #[arg(long)]
        description: Option<String>,
        /// Color override as `role=value`, e.g. `primary=#ff8800`
        #[arg(long = "color", value_parser = parse_color_assignment)]
        colors: Vec<(String, String)>,
        #[arg(long)]
        radius: Option<String>,
    },
}

fn parse_color_assignment(arg: &str) -> std::result::Result<(String, String), String> {
    let (role, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected role=value, got '{}'", arg))?;
    let role = role.trim();
    if !COLOR_ROLES.contains(&role) {
        return Err(format!("unknown color role '{}'", role));
    }
    Ok((role.to_string(), value.trim().to_string()))
}

fn find<'a>(session: &'a ThemeCustomization, id: &str) -> Result<&'a ThemeConfig> {
    session
        .find_theme(id)
        .ok_or_else(|| anyhow!("Unknown theme: {}", id))
}

fn rejected(session: &ThemeCustomization, id: &str) -> anyhow::Error {
    anyhow!(
        "Theme '{}' was not saved: it is invalid, uses a built-in id, or the limit of {} custom themes is reached",
        id,
        session.storage().limits().max_custom_themes
    )
}

pub fn run(ctx: &Context, command: ThemeCommand, out: &mut dyn Write) -> Result<()> {
    let mut session = ctx.theme_session();

    match command {
        ThemeCommand::List { search } => {
            for theme in session.all_themes() {
                if let Some(query) = &search {
                    if !theme.matches_query(query) {
                        continue;
                    }
                }
                let marker = if theme.id == session.current_theme() { '*' } else { ' ' };
                let kind = if session.is_custom_theme(&theme.id) { " (custom)" } else { "" };
                writeln!(out, "{} {:<24} {}{}", marker, theme.id, theme.name, kind)?;
            }
        }

        ThemeCommand::Show { id } => {
            let theme = find(&session, &id)?;
            let meta = theme.metadata();
            writeln!(out, "{} ({})", meta.name, meta.id)?;
            writeln!(out, "{}", meta.description)?;
            if let Some(author) = &meta.author {
                writeln!(out, "author: {}", author)?;
            }
            if let Some(tags) = &meta.tags {
                writeln!(out, "tags: {}", tags.join(", "))?;
            }
            if let Some(radius) = &theme.radius {
                writeln!(out, "radius: {}", radius)?;
            }
            writeln!(out)?;
            for (role, value) in theme.colors.entries() {
                writeln!(out, "  {:<26} {}", role, value)?;
            }
        }

        ThemeCommand::Use { id } => {
            find(&session, &id)?;
            session.set_theme(&id);
            writeln!(out, "Current theme: {}", id)?;
        }

        ThemeCommand::Css { id } => {
            let mut root = RootStyle::new();
            let applied = match &id {
                Some(id) => apply_theme(find(&session, id)?, &mut root),
                None => session.apply_active(&mut root),
            };
            if !applied {
                bail!(
                    "Theme '{}' is invalid",
                    id.as_deref().unwrap_or(session.current_theme())
                );
            }
            writeln!(out, "{}", root.render())?;
        }

        ThemeCommand::Export { id, output } => {
            let json = session
                .export_theme_as_json(&id)
                .ok_or_else(|| anyhow!("Unknown theme: {}", id))?;
            match output {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    writeln!(out, "Exported '{}' to {}", id, path.display())?;
                }
                None => writeln!(out, "{}", json)?,
            }
        }

        ThemeCommand::Import { file } => {
            let saved = match ThemeFormat::from_path(&file) {
                Some(ThemeFormat::Json) => {
                    let json = fs::read_to_string(&file)
                        .with_context(|| format!("Failed to read {}", file.display()))?;
                    session.import_theme_from_json(&json)
                }
                _ => {
                    let theme = load_theme(&file)?;
                    session.create_custom_theme(&theme)
                }
            };
            if !saved {
                return Err(rejected(&session, &file.display().to_string()));
            }
            writeln!(out, "Imported {}", file.display())?;
        }

        ThemeCommand::Share { id } => {
            let location = ctx.page_location()?;
            let url = session
                .get_share_url(&id, &location)
                .ok_or_else(|| anyhow!("Unknown theme: {}", id))?;
            writeln!(out, "{}", url)?;
        }

        ThemeCommand::Open { url } => {
            let location =
                PageLocation::parse(&url).ok_or_else(|| anyhow!("Invalid URL: {}", url))?;
            match session.bootstrap(Some(&location)) {
                Some(id) => writeln!(out, "Current theme: {}", id)?,
                None => writeln!(
                    out,
                    "No usable theme in URL; current theme is {}",
                    session.current_theme()
                )?,
            }
        }

        ThemeCommand::Delete { id } => {
            if get_theme_by_id(&id).is_some() {
                bail!("Built-in theme '{}' cannot be deleted", id);
            }
            if !session.is_custom_theme(&id) {
                bail!("Unknown custom theme: {}", id);
            }
            if !session.remove_custom_theme(&id) {
                bail!("Failed to delete '{}'", id);
            }
            writeln!(out, "Deleted {}", id)?;
        }

        ThemeCommand::History { clear } => {
            if clear {
                session.storage().clear_theme_history();
                session.load_theme_history();
                writeln!(out, "Theme history cleared")?;
            } else {
                for (i, id) in session.theme_history().iter().enumerate() {
                    writeln!(out, "{:>2}. {}", i + 1, id)?;
                }
            }
        }

        ThemeCommand::Validate { file } => {
            let theme = load_theme(&file)?;
            let report = validate_theme(&theme);
            if !report.valid {
                for error in &report.errors {
                    writeln!(out, "  - {}", error)?;
                }
                bail!("Theme '{}' has {} problem(s)", theme.id, report.errors.len());
            }
            writeln!(out, "Theme '{}' is valid", theme.id)?;
        }

        ThemeCommand::Mode { mode } => {
            if session.sync_base_mode(mode) {
                writeln!(out, "Current theme: {}", mode.theme_id())?;
            } else {
                writeln!(
                    out,
                    "Current theme '{}' kept",
                    session.current_theme()
                )?;
            }
        }

        ThemeCommand::Create {
            name,
            from,
            description,
            colors,
            radius,
        } => {
            let base = find(&session, &from)?.clone();
            let over = ThemeOverride {
                name: Some(name),
                description,
                radius,
                colors: colors.into_iter().collect(),
                ..Default::default()
            };
            let theme = prepare_custom_theme(merge_themes(&base, &over), &base.id);
            if !session.create_custom_theme(&theme) {
                return Err(rejected(&session, &theme.id));
            }
            writeln!(out, "Created {}", theme.id)?;
        }
    }

    Ok(())
}
