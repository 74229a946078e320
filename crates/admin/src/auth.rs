//! Token login and admin route guard.

use std::fmt;

pub const AUTH_COOKIE_NAME: &str = "auth_token";
pub const LOGIN_PATH: &str = "/admin/login";
pub const DASHBOARD_PATH: &str = "/admin/dashboard";

/// One day.
const COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24;

/// Session cookie issued on a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCookie {
    pub value: String,
    pub max_age_secs: u64,
    /// Only sent over HTTPS
    pub secure: bool,
}

impl AuthCookie {
    /// `Set-Cookie` header value.
    pub fn header_value(&self) -> String {
        let mut header = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly",
            AUTH_COOKIE_NAME, self.value, self.max_age_secs
        );
        if self.secure {
            header.push_str("; Secure");
        }
        header
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// 200 with the cookie set
    Accepted(AuthCookie),
    /// 401
    Rejected,
    /// 500: no admin token is configured
    NotConfigured,
}

impl LoginOutcome {
    pub fn status_code(&self) -> u16 {
        match self {
            LoginOutcome::Accepted(_) => 200,
            LoginOutcome::Rejected => 401,
            LoginOutcome::NotConfigured => 500,
        }
    }
}

/// What the middleware does with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Continue,
    Redirect(String),
}

impl fmt::Display for RouteDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteDecision::Continue => f.write_str("continue"),
            RouteDecision::Redirect(path) => write!(f, "redirect to {}", path),
        }
    }
}

/// Shared-secret admin authentication.
#[derive(Clone)]
pub struct AdminAuth {
    token: Option<String>,
    production: bool,
}

impl fmt::Debug for AdminAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminAuth")
            .field("configured", &self.is_configured())
            .field("production", &self.production)
            .finish()
    }
}

impl AdminAuth {
    /// An empty token counts as unconfigured.
    pub fn new(token: Option<String>, production: bool) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
            production,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    fn is_valid(&self, candidate: Option<&str>) -> bool {
        match (&self.token, candidate) {
            (Some(token), Some(candidate)) => token == candidate,
            _ => false,
        }
    }

    pub fn login(&self, token: &str) -> LoginOutcome {
        let Some(expected) = &self.token else {
            folio_logger::error("Admin token is not configured");
            return LoginOutcome::NotConfigured;
        };

        if token != expected {
            folio_logger::warn("Rejected admin login attempt");
            return LoginOutcome::Rejected;
        }

        folio_logger::info("Admin login successful");
        LoginOutcome::Accepted(AuthCookie {
            value: token.to_string(),
            max_age_secs: COOKIE_MAX_AGE_SECS,
            secure: self.production,
        })
    }

    /// Redirect anonymous dashboard requests to the login page and
    /// signed-in login requests to the dashboard.
    pub fn guard(&self, path: &str, cookie: Option<&str>) -> RouteDecision {
        let authenticated = self.is_valid(cookie);

        if path.starts_with(DASHBOARD_PATH) && !authenticated {
            return RouteDecision::Redirect(LOGIN_PATH.to_string());
        }
        if path.starts_with(LOGIN_PATH) && authenticated {
            return RouteDecision::Redirect(DASHBOARD_PATH.to_string());
        }
        RouteDecision::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> AdminAuth {
        AdminAuth::new(Some("s3cret".into()), false)
    }

    #[test]
    fn test_login() {
        let auth = auth();
        let outcome = auth.login("s3cret");
        assert_eq!(outcome.status_code(), 200);
        let LoginOutcome::Accepted(cookie) = outcome else {
            panic!("expected a cookie");
        };
        assert_eq!(
            cookie.header_value(),
            "auth_token=s3cret; Path=/; Max-Age=86400; HttpOnly"
        );

        assert_eq!(auth.login("wrong"), LoginOutcome::Rejected);
        assert_eq!(auth.login("wrong").status_code(), 401);
    }

    #[test]
    fn test_production_cookie_is_secure() {
        let auth = AdminAuth::new(Some("s3cret".into()), true);
        match auth.login("s3cret") {
            LoginOutcome::Accepted(cookie) => assert!(cookie.header_value().ends_with("; Secure")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unconfigured() {
        for auth in [AdminAuth::new(None, false), AdminAuth::new(Some(String::new()), false)] {
            assert!(!auth.is_configured());
            assert_eq!(auth.login(""), LoginOutcome::NotConfigured);
            assert_eq!(auth.login("").status_code(), 500);
            assert_eq!(
                auth.guard("/admin/dashboard", Some("")),
                RouteDecision::Redirect(LOGIN_PATH.into())
            );
        }
    }

    #[test]
    fn test_guard() {
        let auth = auth();
        assert_eq!(
            auth.guard("/admin/dashboard/projects", None),
            RouteDecision::Redirect("/admin/login".into())
        );
        assert_eq!(
            auth.guard("/admin/dashboard", Some("nope")),
            RouteDecision::Redirect("/admin/login".into())
        );
        assert_eq!(auth.guard("/admin/dashboard", Some("s3cret")), RouteDecision::Continue);
        assert_eq!(
            auth.guard("/admin/login", Some("s3cret")),
            RouteDecision::Redirect("/admin/dashboard".into())
        );
        assert_eq!(auth.guard("/admin/login", None), RouteDecision::Continue);
        assert_eq!(auth.guard("/projects", None), RouteDecision::Continue);
    }

    #[test]
    fn test_debug_hides_token() {
        assert!(!format!("{:?}", auth()).contains("s3cret"));
    }
}
