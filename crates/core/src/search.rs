//! Pagination defaults and substring-search helpers.

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default page size for job listing.
pub const DEFAULT_JOB_LIMIT: i64 = 20;

/// Default page size for entry listing.
pub const DEFAULT_ENTRY_LIMIT: i64 = 20;

/// Default number of entry search results.
pub const DEFAULT_SEARCH_LIMIT: i64 = 10;

/// Smallest accepted `limit`.
pub const MIN_LIMIT: i64 = 1;

/// Largest accepted `limit`.
pub const MAX_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Substring matching
// ---------------------------------------------------------------------------

/// Escape character used in generated `LIKE` patterns.
pub const LIKE_ESCAPE: char = '\\';

/// Build an `ILIKE` pattern matching `query` as a literal substring.
///
/// `%`, `_` and the escape character itself are escaped so user input can
/// never act as a wildcard. Pair with `ESCAPE '\'` in SQL.
///
/// Returns `None` for an empty query, which matches nothing.
///
/// # Examples
///
/// ```
/// use jobdiary_core::search::substring_pattern;
/// assert_eq!(substring_pattern("leak"), Some("%leak%".to_string()));
/// assert_eq!(substring_pattern("50%"), Some("%50\\%%".to_string()));
/// assert_eq!(substring_pattern(""), None);
/// ```
pub fn substring_pattern(query: &str) -> Option<String> {
    if query.is_empty() {
        return None;
    }

    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
