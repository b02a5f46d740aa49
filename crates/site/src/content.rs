//! Markdown rendering for package descriptions and blog articles.
//!
//! Bodies are authored in the admin area and stored as markdown. Raw HTML in
//! the source is escaped, never passed through.

use std::sync::LazyLock;

use comrak::{Options, markdown_to_html};
use regex::Regex;

/// Average reading speed used for the "N min read" label.
const WORDS_PER_MINUTE: usize = 200;

/// Render markdown to HTML with GitHub Flavored Markdown extensions.
#[must_use]
pub fn render_markdown(content: &str) -> String {
    let mut options = Options::default();

    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.header_ids = Some(String::new());

    options.render.escape = true;

    markdown_to_html(content, &options)
}

/// Estimated reading time, at least one minute.
#[must_use]
pub fn reading_time_minutes(content: &str) -> usize {
    content
        .split_whitespace()
        .count()
        .div_ceil(WORDS_PER_MINUTE)
        .max(1)
}

/// Markdown punctuation and link targets stripped from plain-text excerpts.
static MARKUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[|\]\([^)]*\)|[#*_`>\[\]]").expect("Invalid regex"));

/// Plain-text excerpt of at most `max_chars` characters, cut at a word
/// boundary with a trailing ellipsis when shortened.
#[must_use]
pub fn excerpt(content: &str, max_chars: usize) -> String {
    let plain = MARKUP_RE.replace_all(content, "");
    let words: Vec<&str> = plain.split_whitespace().collect();

    let mut out = String::new();
    for word in words {
        let extra = if out.is_empty() { 0 } else { 1 };
        if out.chars().count() + extra + word.chars().count() > max_chars {
            out.push('…');
            return out;
        }
        if extra == 1 {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_gfm_tables_and_strikethrough() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~old price~~");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>old price</del>"));
    }

    #[test]
    fn raw_html_is_escaped() {
        let html = render_markdown("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn reading_time_rounds_up() {
        assert_eq!(reading_time_minutes(""), 1);
        assert_eq!(reading_time_minutes(&"word ".repeat(200)), 1);
        assert_eq!(reading_time_minutes(&"word ".repeat(201)), 2);
    }

    #[test]
    fn excerpt_strips_markup_and_cuts_on_words() {
        assert_eq!(excerpt("## Lisbon **by night**", 100), "Lisbon by night");
        assert_eq!(excerpt("Seven days in Lisbon", 12), "Seven days…");
        assert_eq!(
            excerpt("See [the route](https://maps.test/r) first", 100),
            "See the route first"
        );
    }
}
