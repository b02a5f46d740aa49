//! Page kinds recognised by the structured data generator.

use std::sync::LazyLock;

use regex::Regex;

static PACKAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/packages/([^/]+)/([^/]+)/?$").expect("Invalid regex"));

static PACKAGE_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/packages/([^/]+)/?$").expect("Invalid regex"));

/// A request path classified by page kind. Matchers are tried in declaration
/// order and the first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRoute<'a> {
    /// `/`
    Home,
    /// `/packages/<type>/<slug>`
    Package { type_slug: &'a str, slug: &'a str },
    /// `/packages/<type>`
    PackageType { type_slug: &'a str },
    /// Anything else, with trailing slashes removed.
    Page(&'a str),
}

impl<'a> PageRoute<'a> {
    /// Classify `path` (no query string).
    #[must_use]
    pub fn parse(path: &'a str) -> Self {
        if path.is_empty() || path == "/" {
            return Self::Home;
        }

        if let Some(caps) = PACKAGE_RE.captures(path)
            && let (Some(type_slug), Some(slug)) = (caps.get(1), caps.get(2))
        {
            return Self::Package {
                type_slug: type_slug.as_str(),
                slug: slug.as_str(),
            };
        }

        if let Some(type_slug) = PACKAGE_TYPE_RE.captures(path).and_then(|caps| caps.get(1)) {
            return Self::PackageType {
                type_slug: type_slug.as_str(),
            };
        }

        let trimmed = path.trim_end_matches('/');
        Self::Page(if trimmed.is_empty() { "/" } else { trimmed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_home() {
        assert_eq!(PageRoute::parse("/"), PageRoute::Home);
        assert_eq!(PageRoute::parse(""), PageRoute::Home);
    }

    #[test]
    fn two_segments_under_packages_is_a_package() {
        assert_eq!(
            PageRoute::parse("/packages/cruises/caribbean-7-nights"),
            PageRoute::Package {
                type_slug: "cruises",
                slug: "caribbean-7-nights"
            }
        );
        assert_eq!(
            PageRoute::parse("/packages/cruises/caribbean/"),
            PageRoute::Package {
                type_slug: "cruises",
                slug: "caribbean"
            }
        );
    }

    #[test]
    fn one_segment_under_packages_is_a_type() {
        assert_eq!(
            PageRoute::parse("/packages/national"),
            PageRoute::PackageType {
                type_slug: "national"
            }
        );
    }

    #[test]
    fn everything_else_is_a_page() {
        assert_eq!(PageRoute::parse("/packages"), PageRoute::Page("/packages"));
        assert_eq!(PageRoute::parse("/packages/"), PageRoute::Page("/packages"));
        assert_eq!(PageRoute::parse("/about/"), PageRoute::Page("/about"));
        assert_eq!(
            PageRoute::parse("/packages/a/b/c"),
            PageRoute::Page("/packages/a/b/c")
        );
        assert_eq!(PageRoute::parse("/blog/tips"), PageRoute::Page("/blog/tips"));
    }
}
