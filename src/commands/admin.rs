use anyhow::{bail, Result};
use clap::Subcommand;
use std::io::Write;
use std::path::PathBuf;

use folio_admin::{FileProjects, LoginOutcome, ProjectsApi};
use folio_project_filter::ProjectDraft;

use crate::context::Context;

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Check a token and print the session cookie it would receive.
    Login { token: String },

    /// Show what the admin middleware does with a request.
    Guard {
        path: String,
        /// Value of the `auth_token` cookie
        #[arg(long)]
        cookie: Option<String>,
    },

    /// Add a project to a projects file.
    Add {
        #[arg(long)]
        projects: PathBuf,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value = "")]
        image: String,
        #[arg(long, default_value = "")]
        github_url: String,
        #[arg(long, default_value = "")]
        live_url: String,
    },

    /// Remove a project from a projects file.
    Remove {
        #[arg(long)]
        projects: PathBuf,
        id: u64,
    },
}

pub fn run(ctx: &Context, command: AdminCommand, out: &mut dyn Write) -> Result<()> {
    match command {
        AdminCommand::Login { token } => match ctx.admin_auth().login(&token) {
            LoginOutcome::Accepted(cookie) => {
                writeln!(out, "Set-Cookie: {}", cookie.header_value())?;
            }
            LoginOutcome::Rejected => bail!("Invalid token (401)"),
            LoginOutcome::NotConfigured => bail!("Admin token is not configured (500)"),
        },

        AdminCommand::Guard { path, cookie } => {
            let decision = ctx.admin_auth().guard(&path, cookie.as_deref());
            writeln!(out, "{}", decision)?;
        }

        AdminCommand::Add {
            projects,
            title,
            description,
            tags,
            category,
            image,
            github_url,
            live_url,
        } => {
            let mut api = FileProjects::open(projects)?;
            let project = api.create(ProjectDraft {
                title,
                description,
                image,
                tags,
                category,
                github_url,
                live_url,
            })?;
            writeln!(out, "Created project {}", project.id)?;
        }

        AdminCommand::Remove { projects, id } => {
            let mut api = FileProjects::open(projects)?;
            api.delete(id)?;
            writeln!(out, "Deleted project {}", id)?;
        }
    }

    Ok(())
}
