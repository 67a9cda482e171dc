//! Shared helper functions for SQLite repositories.

use crate::db::{Page, SortField, SortOrder};

/// Build the stored search key for a user: name, email and application ID,
/// lowercased with full Unicode case folding.
///
/// SQLite's own `LOWER()` only folds ASCII, so case-insensitive matching is
/// done against this precomputed key instead.
pub fn search_key(name: &str, email: &str, application_id: &str) -> String {
    format!("{}\n{}\n{}", name, email, application_id).to_lowercase()
}

/// Build ORDER BY clause from whitelisted sort values.
pub fn build_order_clause(field: SortField, order: SortOrder) -> String {
    format!("ORDER BY {} {}", field.column(), order.keyword())
}

/// Build LIMIT/OFFSET clause from a normalized page.
pub fn build_limit_offset_clause(page: &Page) -> String {
    format!(" LIMIT {} OFFSET {}", page.limit, page.offset())
}

/// Escape LIKE wildcards so the search text matches literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build the search WHERE condition and its bind pattern.
///
/// Returns None for empty/whitespace-only search text. The pattern is
/// lowercased the same way as [`search_key`] and bound once.
pub fn build_search_condition(search: Option<&str>) -> Option<(&'static str, String)> {
    let term = search.filter(|s| !s.trim().is_empty())?;
    Some((
        "WHERE search_key LIKE ? ESCAPE '\\'",
        format!("%{}%", escape_like(&term.to_lowercase())),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_order_clause() {
        assert_eq!(
            build_order_clause(SortField::Name, SortOrder::Asc),
            "ORDER BY name ASC"
        );
        assert_eq!(
            build_order_clause(SortField::ApplicationId, SortOrder::Desc),
            "ORDER BY aadhaar_application_id DESC"
        );
    }

    #[test]
    fn test_build_order_clause_from_hostile_input() {
        let field = SortField::resolve(Some("created_at; DELETE FROM users"));
        let order = SortOrder::resolve(Some("ASC; --"));
        assert_eq!(build_order_clause(field, order), "ORDER BY created_at DESC");
    }

    #[test]
    fn test_build_limit_offset_clause() {
        assert_eq!(
            build_limit_offset_clause(&Page { number: 1, limit: 10 }),
            " LIMIT 10 OFFSET 0"
        );
        assert_eq!(
            build_limit_offset_clause(&Page { number: 4, limit: 20 }),
            " LIMIT 20 OFFSET 60"
        );
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("jane"), "jane");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }

    #[test]
    fn test_build_search_condition_empty() {
        assert_eq!(build_search_condition(None), None);
        assert_eq!(build_search_condition(Some("")), None);
        assert_eq!(build_search_condition(Some("  \t")), None);
    }

    #[test]
    fn test_build_search_condition_matches_search_key() {
        let (condition, pattern) = build_search_condition(Some("Jane")).unwrap();
        assert_eq!(condition, "WHERE search_key LIKE ? ESCAPE '\\'");
        assert_eq!(pattern, "%jane%");
    }

    #[test]
    fn test_search_folds_non_ascii() {
        let (_, pattern) = build_search_condition(Some("ÉLISE")).unwrap();
        assert_eq!(pattern, "%élise%");
        assert!(search_key("ÉLISE Dupont", "e@x.com", "12345678901234").contains("élise"));
    }

    #[test]
    fn test_search_key_keeps_fields_apart() {
        assert_eq!(
            search_key("Jane Doe", "JANE@X.com", "1234567890123A"),
            "jane doe\njane@x.com\n1234567890123a"
        );
    }
}
