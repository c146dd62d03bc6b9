//! Route table of the dashboard

use std::fmt;

use serde::Serialize;

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Dashboard,
    Resorts,
    Equipment,
    Roi,
    Profile,
    Settings,
}

impl View {
    pub const ALL: [View; 6] = [
        View::Dashboard,
        View::Resorts,
        View::Equipment,
        View::Roi,
        View::Profile,
        View::Settings,
    ];

    /// Screen everything unknown redirects to
    pub const DEFAULT: View = View::Dashboard;

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            View::Dashboard => "/",
            View::Resorts => "/resorts",
            View::Equipment => "/equipment",
            View::Roi => "/roi",
            View::Profile => "/profile",
            View::Settings => "/settings",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Resorts => "Resort Finder",
            View::Equipment => "Equipment Finder",
            View::Roi => "ROI Planner",
            View::Profile => "Profile",
            View::Settings => "Settings",
        }
    }

    /// Exact lookup, `None` for unknown paths. A trailing slash is ignored.
    #[must_use]
    pub fn from_path(path: &str) -> Option<View> {
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|view| view.path() == path)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Where a requested path ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Render(View),
    Redirect(View),
}

/// Resolves a path against the route table; unknown paths redirect to the
/// dashboard.
#[must_use]
pub fn resolve(path: &str) -> Resolution {
    View::from_path(path).map_or(Resolution::Redirect(View::DEFAULT), Resolution::Render)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/", Resolution::Render(View::Dashboard))]
    #[case("/resorts", Resolution::Render(View::Resorts))]
    #[case("/equipment/", Resolution::Render(View::Equipment))]
    #[case("/roi", Resolution::Render(View::Roi))]
    #[case("/profile", Resolution::Render(View::Profile))]
    #[case("/settings", Resolution::Render(View::Settings))]
    #[case("/nope", Resolution::Redirect(View::Dashboard))]
    #[case("/resorts/alta", Resolution::Redirect(View::Dashboard))]
    #[case("", Resolution::Render(View::Dashboard))]
    fn test_resolve(#[case] path: &str, #[case] expected: Resolution) {
        assert_eq!(resolve(path), expected);
    }

    #[test]
    fn test_paths_round_trip() {
        for view in View::ALL {
            assert_eq!(View::from_path(view.path()), Some(view));
        }
    }
}
