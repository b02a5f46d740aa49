//! Slug generation and legacy slug normalization.
//!
//! Package and article slugs are ASCII, lowercase and hyphen separated.
//! Links from the previous site used underscores, mixed case, accents and
//! `.html` suffixes; [`search_terms`] turns those into plain words that can be
//! matched against current slugs.

/// Fold a Latin letter with a diacritic to its ASCII base.
///
/// Characters outside the table are returned unchanged.
#[must_use]
pub const fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        _ => c,
    }
}

/// Build a URL slug from free text.
///
/// ```
/// use wayfarer_core::slug::slugify;
///
/// assert_eq!(slugify("Férias em Gramado!"), "ferias-em-gramado");
/// assert_eq!(slugify("  --Rio  de   Janeiro-- "), "rio-de-janeiro");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars().map(fold_diacritic) {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Normalize a legacy slug into lowercase search words.
///
/// The last path segment is used, a trailing file extension is dropped and
/// tokens made only of digits (old numeric ids, years) are discarded.
///
/// ```
/// use wayfarer_core::slug::search_terms;
///
/// assert_eq!(
///     search_terms("Pacote_Férias-Gramado-2019.html"),
///     vec!["pacote", "ferias", "gramado"]
/// );
/// ```
#[must_use]
pub fn search_terms(legacy: &str) -> Vec<String> {
    let last_segment = legacy
        .trim()
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    let stem = strip_extension(last_segment);

    stem.split(|c: char| matches!(c, '-' | '_' | '+' | '.' | '%') || c.is_whitespace())
        .map(slugify)
        .flat_map(|token| {
            token
                .split('-')
                .map(str::to_owned)
                .collect::<Vec<_>>()
        })
        .filter(|token| !token.is_empty() && !token.chars().all(|c| c.is_ascii_digit()))
        .collect()
}

/// Drop a short alphabetic extension such as `.html` or `.php`.
fn strip_extension(segment: &str) -> &str {
    match segment.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && (1..=4).contains(&ext.len())
                && ext.chars().all(|c| c.is_ascii_alphabetic()) =>
        {
            stem
        }
        _ => segment,
    }
}

/// Whether `slug` contains every search term. An empty term list matches
/// nothing.
#[must_use]
pub fn matches_terms(slug: &str, terms: &[String]) -> bool {
    !terms.is_empty() && terms.iter().all(|term| slug.contains(term.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_folds_accents_and_collapses_separators() {
        assert_eq!(slugify("São Paulo & Ilhabela"), "sao-paulo-ilhabela");
        assert_eq!(slugify("Ação___Total"), "acao-total");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn slugify_is_stable_on_existing_slugs() {
        assert_eq!(slugify("cruzeiro-caribe-7-noites"), "cruzeiro-caribe-7-noites");
    }

    #[test]
    fn search_terms_uses_last_segment_only() {
        assert_eq!(
            search_terms("/pacotes/nacionais/Porto_Seguro/"),
            vec!["porto", "seguro"]
        );
    }

    #[test]
    fn search_terms_keeps_alphanumeric_mixes() {
        assert_eq!(
            search_terms("Tour-4x4-Jalapão"),
            vec!["tour", "4x4", "jalapao"]
        );
    }

    #[test]
    fn search_terms_of_numeric_slug_is_empty() {
        assert!(search_terms("12345").is_empty());
        assert!(search_terms("").is_empty());
    }

    #[test]
    fn strip_extension_ignores_non_extensions() {
        assert_eq!(strip_extension("index.html"), "index");
        assert_eq!(strip_extension("v1.2"), "v1.2");
        assert_eq!(strip_extension(".hidden"), ".hidden");
    }

    #[test]
    fn matches_terms_requires_every_term() {
        let terms = vec!["porto".to_owned(), "seguro".to_owned()];
        assert!(matches_terms("porto-seguro-5-dias", &terms));
        assert!(!matches_terms("porto-de-galinhas", &terms));
        assert!(!matches_terms("porto-seguro", &[]));
    }

    #[test]
    fn matches_terms_accepts_terms_inside_words() {
        let terms = search_terms("Pacote_Férias-2019");
        assert!(matches_terms("superpacote-ferias-bahia", &terms));
        assert!(matches_terms("pacoteferias", &terms));
        assert!(!matches_terms("pacote-verao", &terms));
    }
}
