//! Path access table.
//!
//! One ordered list of `(prefix, Access)` rules, evaluated first match wins.
//! A prefix matches the path itself and anything below it (`/admin` matches
//! `/admin` and `/admin/packages`, not `/administrator`).

use wayfarer_core::Role;

/// What a request needs before it may reach a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Always allowed. No session or activation checks.
    Public,
    /// Regular site page. Subject to maintenance mode only.
    Open,
    /// Any signed-in user.
    Authenticated,
    /// A signed-in user holding one of these roles.
    Roles(&'static [Role]),
}

const ADMIN_ONLY: Access = Access::Roles(&[Role::Admin]);
const STAFF: Access = Access::Roles(&[Role::Admin, Role::Editor]);

/// Ordered access rules.
pub const ACCESS_RULES: &[(&str, Access)] = &[
    // Public allowlist
    ("/static", Access::Public),
    ("/favicon.ico", Access::Public),
    ("/robots.txt", Access::Public),
    ("/sitemap.xml", Access::Public),
    ("/health", Access::Public),
    ("/auth", Access::Public),
    ("/api/auth", Access::Public),
    ("/api/public", Access::Public),
    ("/maintenance", Access::Public),
    ("/api/contact", Access::Public),
    ("/api/site-config", Access::Public),
    // Admin only
    ("/admin/users", ADMIN_ONLY),
    ("/admin/package-types", ADMIN_ONLY),
    ("/admin/categories", ADMIN_ONLY),
    ("/admin/settings", ADMIN_ONLY),
    ("/api/users", ADMIN_ONLY),
    ("/api/package-types", ADMIN_ONLY),
    ("/api/categories", ADMIN_ONLY),
    ("/api/settings", ADMIN_ONLY),
    // Admin or editor
    ("/admin/packages", STAFF),
    ("/admin/articles", STAFF),
    ("/admin/slides", STAFF),
    ("/api", STAFF),
    // Rest of the back office
    ("/admin", Access::Authenticated),
];

/// Whether `path` is `prefix` or lies below it.
#[must_use]
pub fn matches_prefix(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Classify a request path against [`ACCESS_RULES`].
#[must_use]
pub fn classify(path: &str) -> Access {
    ACCESS_RULES
        .iter()
        .find(|(prefix, _)| matches_prefix(path, prefix))
        .map_or(Access::Open, |(_, access)| *access)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_match_on_segment_boundaries() {
        assert!(matches_prefix("/admin", "/admin"));
        assert!(matches_prefix("/admin/packages/3", "/admin"));
        assert!(!matches_prefix("/administrator", "/admin"));
        assert!(!matches_prefix("/ad", "/admin"));
    }

    #[test]
    fn allowlist_wins_over_api_rule() {
        assert_eq!(classify("/api/auth/session"), Access::Public);
        assert_eq!(classify("/api/public/packages"), Access::Public);
        assert_eq!(classify("/api/contact"), Access::Public);
        assert_eq!(classify("/static/css/main.css"), Access::Public);
    }

    #[test]
    fn admin_only_sections() {
        for path in ["/admin/users", "/admin/settings/smtp", "/api/package-types/4"] {
            assert_eq!(classify(path), ADMIN_ONLY, "{path}");
        }
    }

    #[test]
    fn staff_sections_include_remaining_api() {
        for path in ["/admin/packages", "/admin/slides/2", "/api/packages", "/api/articles"] {
            assert_eq!(classify(path), STAFF, "{path}");
        }
    }

    #[test]
    fn back_office_root_needs_only_a_session() {
        assert_eq!(classify("/admin"), Access::Authenticated);
        assert_eq!(classify("/admin/profile"), Access::Authenticated);
    }

    #[test]
    fn site_pages_are_open() {
        for path in ["/", "/packages", "/packages/cruises/caribbean", "/blog/tips"] {
            assert_eq!(classify(path), Access::Open, "{path}");
        }
    }

    #[test]
    fn more_specific_rules_come_first() {
        // A broader prefix listed before a narrower one would shadow it.
        for (i, (narrow, _)) in ACCESS_RULES.iter().enumerate() {
            for (broad, _) in ACCESS_RULES.iter().take(i) {
                assert!(
                    !(matches_prefix(narrow, broad) && narrow != broad),
                    "{broad} shadows {narrow}"
                );
            }
        }
    }
}
