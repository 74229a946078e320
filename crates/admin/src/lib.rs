//! Admin side of folio: token login, the dashboard route guard and the
//! projects repository edited from the dashboard.

mod auth;
mod error;
mod projects;

pub use auth::{
    AdminAuth, AuthCookie, LoginOutcome, RouteDecision, AUTH_COOKIE_NAME, DASHBOARD_PATH,
    LOGIN_PATH,
};
pub use error::{ApiError, Result};
pub use projects::{load_projects, validate_draft, FileProjects, MemoryProjects, ProjectsApi};
