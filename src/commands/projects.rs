use anyhow::Result;
use clap::Subcommand;
use std::io::Write;
use std::path::{Path, PathBuf};

use folio_admin::load_projects;
use folio_project_filter::{categories, category_by_id, Difficulty, Project, ProjectFilter};

use crate::context::Context;

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// Filter published and coming-soon projects.
    Search {
        /// Fuzzy search text; recorded in the search history
        query: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        /// Keep projects with any of these tags
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        /// Keep coming-soon projects with any of these difficulties
        #[arg(short, long = "difficulty")]
        difficulties: Vec<Difficulty>,
        /// JSON array of published projects
        #[arg(long)]
        projects: Option<PathBuf>,
    },

    /// Project count per category.
    Counts {
        #[arg(long)]
        projects: Option<PathBuf>,
    },

    /// Every project tag and coming-soon technology.
    Tags {
        #[arg(long)]
        projects: Option<PathBuf>,
    },

    /// List category tabs.
    Categories,

    /// Show or clear recent searches.
    History {
        #[arg(long)]
        clear: bool,
    },
}

fn read_projects(path: Option<&Path>) -> Result<Vec<Project>> {
    match path {
        Some(path) => Ok(load_projects(path)?),
        None => Ok(Vec::new()),
    }
}

pub fn run(ctx: &Context, command: ProjectCommand, out: &mut dyn Write) -> Result<()> {
    match command {
        ProjectCommand::Search {
            query,
            category,
            tags,
            difficulties,
            projects,
        } => {
            let projects = read_projects(projects.as_deref())?;
            let mut filter = ProjectFilter::with_catalog(projects, ctx.search_history());

            if let Some(category) = category {
                filter.handle_category_change(&category);
            }
            for tag in &tags {
                filter.handle_tag_toggle(tag);
            }
            for difficulty in difficulties {
                filter.toggle_difficulty(difficulty);
            }
            if let Some(query) = query {
                filter.handle_search(&query);
            }

            let found = filter.filtered_projects();
            writeln!(out, "Projects ({}):", found.len())?;
            for project in found {
                writeln!(out, "  #{:<4} {}", project.id, project.title)?;
            }

            let upcoming = filter.filtered_coming_soon();
            writeln!(out, "Coming soon ({}):", upcoming.len())?;
            for project in upcoming {
                writeln!(
                    out,
                    "  {:<28} {:<12} {}",
                    project.id,
                    project.difficulty.as_str(),
                    project.estimated_time
                )?;
            }

            let active = filter.active_filters_count();
            if active > 0 {
                writeln!(out, "{} active filter(s)", active)?;
            }
        }

        ProjectCommand::Counts { projects } => {
            let projects = read_projects(projects.as_deref())?;
            let filter = ProjectFilter::with_catalog(projects, ctx.search_history());
            for (category_id, count) in filter.project_counts() {
                let name = category_by_id(&category_id)
                    .map(|c| c.name.as_str())
                    .unwrap_or(category_id.as_str());
                writeln!(out, "{:<24} {}", name, count)?;
            }
        }

        ProjectCommand::Tags { projects } => {
            let projects = read_projects(projects.as_deref())?;
            let filter = ProjectFilter::with_catalog(projects, ctx.search_history());
            for tag in filter.all_tags() {
                writeln!(out, "{}", tag)?;
            }
        }

        ProjectCommand::Categories => {
            for category in categories() {
                writeln!(out, "{:<20} {:<24} {}", category.id, category.name, category.description)?;
            }
        }

        ProjectCommand::History { clear } => {
            let mut filter = ProjectFilter::with_catalog(Vec::new(), ctx.search_history());
            if clear {
                filter.clear_search_history();
                writeln!(out, "Search history cleared")?;
            } else {
                for query in filter.recent_searches() {
                    writeln!(out, "{}", query)?;
                }
            }
        }
    }

    Ok(())
}
