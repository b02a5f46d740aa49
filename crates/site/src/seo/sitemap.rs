//! `sitemap.xml` generation.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::db::{ArticleRepository, PackageRepository, PackageTypeRepository, RepositoryError};
use crate::models::PackageType;

/// Pages that are always listed.
const STATIC_PAGES: &[&str] = &["/", "/packages", "/about", "/blog"];

/// One `<url>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    /// Site-relative path.
    pub path: String,
    pub last_modified: Option<DateTime<Utc>>,
}

impl SitemapEntry {
    fn new(path: impl Into<String>, last_modified: Option<DateTime<Utc>>) -> Self {
        Self {
            path: path.into(),
            last_modified,
        }
    }
}

/// Collect every public URL: static pages, package types, active packages and
/// published articles.
///
/// # Errors
///
/// Returns `RepositoryError` if any listing query fails.
pub async fn collect_entries(pool: &PgPool) -> Result<Vec<SitemapEntry>, RepositoryError> {
    let type_repo = PackageTypeRepository::new(pool);
    let package_repo = PackageRepository::new(pool);
    let article_repo = ArticleRepository::new(pool);

    let (types, packages, articles) = tokio::try_join!(
        type_repo.list(),
        package_repo.sitemap_entries(),
        article_repo.sitemap_entries(),
    )?;

    Ok(entries(&types, packages, articles))
}

/// Assemble the URL list: static pages, then package types, then the dated
/// package and article paths in the order given.
#[must_use]
pub fn entries(
    types: &[PackageType],
    packages: Vec<(String, DateTime<Utc>)>,
    articles: Vec<(String, DateTime<Utc>)>,
) -> Vec<SitemapEntry> {
    STATIC_PAGES
        .iter()
        .map(|path| SitemapEntry::new(*path, None))
        .chain(types.iter().map(|t| SitemapEntry::new(t.path(), None)))
        .chain(
            packages
                .into_iter()
                .chain(articles)
                .map(|(path, updated_at)| SitemapEntry::new(path, Some(updated_at))),
        )
        .collect()
}

/// Render entries as a sitemap document with absolute URLs.
#[must_use]
pub fn render(base_url: &str, entries: &[SitemapEntry]) -> String {
    let base_url = base_url.trim_end_matches('/');
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for entry in entries {
        xml.push_str("  <url>\n");
        let _ = writeln!(
            xml,
            "    <loc>{}</loc>",
            escape_xml(&format!("{base_url}{}", entry.path))
        );
        if let Some(modified) = entry.last_modified {
            let _ = writeln!(xml, "    <lastmod>{}</lastmod>", modified.format("%Y-%m-%d"));
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Render `robots.txt`, keeping crawlers out of the back office and API.
#[must_use]
pub fn robots_txt(base_url: &str) -> String {
    format!(
        "User-agent: *\nAllow: /\nDisallow: /admin\nDisallow: /api\n\nSitemap: {}/sitemap.xml\n",
        base_url.trim_end_matches('/')
    )
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use wayfarer_core::PackageTypeId;

    use super::*;

    fn package_type(id: i32, slug: &str) -> PackageType {
        PackageType {
            id: PackageTypeId::new(id),
            slug: slug.to_owned(),
            name: slug.to_owned(),
            description: None,
        }
    }

    #[test]
    fn lists_every_public_url() {
        let updated = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();
        let published = Utc.with_ymd_and_hms(2026, 4, 9, 8, 0, 0).unwrap();
        let types = [package_type(1, "cruises"), package_type(2, "national")];
        let packages = vec![
            ("/packages/cruises/caribbean".to_owned(), updated),
            ("/packages/national/serra-gaucha".to_owned(), updated),
        ];
        let articles = vec![("/blog/packing-for-patagonia".to_owned(), published)];

        let entries = entries(&types, packages, articles);
        let dated = |path: &str| {
            entries
                .iter()
                .find(|e| e.path == path)
                .map(|e| e.last_modified)
        };

        for page in STATIC_PAGES.iter().copied() {
            assert_eq!(dated(page), Some(None), "{page}");
        }
        assert_eq!(dated("/packages/cruises"), Some(None));
        assert_eq!(dated("/packages/national"), Some(None));
        assert_eq!(dated("/packages/cruises/caribbean"), Some(Some(updated)));
        assert_eq!(dated("/packages/national/serra-gaucha"), Some(Some(updated)));
        assert_eq!(dated("/blog/packing-for-patagonia"), Some(Some(published)));
        assert_eq!(entries.len(), STATIC_PAGES.len() + 5);
    }

    #[test]
    fn renders_absolute_urls_with_lastmod() {
        let entries = vec![
            SitemapEntry::new("/", None),
            SitemapEntry::new(
                "/packages/cruises/caribbean",
                Some(Utc.with_ymd_and_hms(2026, 5, 17, 9, 30, 0).unwrap()),
            ),
        ];

        let xml = render("https://wayfarer.travel/", &entries);

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<loc>https://wayfarer.travel/</loc>"));
        assert!(xml.contains("<loc>https://wayfarer.travel/packages/cruises/caribbean</loc>"));
        assert!(xml.contains("<lastmod>2026-05-17</lastmod>"));
        assert_eq!(xml.matches("<url>").count(), 2);
    }

    #[test]
    fn escapes_reserved_characters() {
        let xml = render(
            "https://wayfarer.travel",
            &[SitemapEntry::new("/blog/a&b", None)],
        );
        assert!(xml.contains("/blog/a&amp;b"));
    }

    #[test]
    fn robots_blocks_back_office() {
        let robots = robots_txt("https://wayfarer.travel");
        assert!(robots.contains("Disallow: /admin\n"));
        assert!(robots.contains("Disallow: /api\n"));
        assert!(robots.ends_with("Sitemap: https://wayfarer.travel/sitemap.xml\n"));
    }
}
