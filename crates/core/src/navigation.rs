//! Client-side routes

use std::fmt;

/// Views the host application can navigate between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Signup,
    Meetings,
    Meeting(i64),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Signup => "/signup".to_string(),
            Self::Meetings => "/".to_string(),
            Self::Meeting(id) => format!("/meeting/{id}"),
        }
    }

    /// Parse a path produced by [`Route::path`]. Unknown paths yield `None`.
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        match path {
            "/" | "" => Some(Self::Meetings),
            "/login" => Some(Self::Login),
            "/signup" => Some(Self::Signup),
            other => other
                .strip_prefix("/meeting/")
                .and_then(|id| id.parse().ok())
                .map(Self::Meeting),
        }
    }

    /// Views that require an authenticated session
    pub const fn is_protected(&self) -> bool {
        matches!(self, Self::Meetings | Self::Meeting(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
