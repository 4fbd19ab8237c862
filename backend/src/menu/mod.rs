//! Decoding of the `Menu/Screen` field.
//!
//! A field holds comma-separated assignments, each a `/`-separated path:
//!
//! ```text
//! Lunch/Burgers,NYE 12\\/31\\/2025/Specials
//!   │                  │
//!   │                  └─ root "NYE 12/31/2025"
//!   └─ root "Lunch"
//! ```
//!
//! A delimiter preceded by two literal backslashes (`\\,` or `\\/`) is part
//! of the name. Malformed escapes are left as they are.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

use crate::parser::Table;
use crate::models::COL_MENU;

/// Separates assignments within one field.
pub const ASSIGNMENT_DELIMITER: char = ',';

/// Separates hierarchy levels within one assignment.
pub const LEVEL_DELIMITER: char = '/';

const ESCAPE: char = '\\';

static UNESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\\\([,/])").expect("unescape pattern is valid"));

/// Split `raw` on `delimiter` unless the delimiter directly follows two
/// backslashes. Escape markers are kept in the output.
///
/// # Example
/// ```
/// use menucheck::split_escaped;
///
/// assert_eq!(split_escaped(r"A/B\\/C", '/'), vec!["A", r"B\\/C"]);
/// ```
pub fn split_escaped(raw: &str, delimiter: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    // The two characters before the current one, in the raw input.
    let mut prev = [None, None];

    for ch in raw.chars() {
        let escaped = prev == [Some(ESCAPE), Some(ESCAPE)];
        if ch == delimiter && !escaped {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
        prev = [prev[1], Some(ch)];
    }
    parts.push(current);

    parts
}

/// Replace every `\\,` and `\\/` with the bare delimiter.
pub fn unescape(segment: &str) -> String {
    UNESCAPE.replace_all(segment, "$1").into_owned()
}

/// Root menu of one assignment: first level, trimmed, unescaped.
pub fn extract_root_menu(segment: &str) -> String {
    let levels = split_escaped(segment, LEVEL_DELIMITER);
    let first = levels.first().map(String::as_str).unwrap_or("");
    unescape(first.trim())
}

/// Non-empty root menus of one field value, in field order.
pub fn menu_roots(raw: &str) -> Vec<String> {
    split_escaped(raw, ASSIGNMENT_DELIMITER)
        .iter()
        .map(|segment| extract_root_menu(segment))
        .filter(|root| !root.trim().is_empty())
        .collect()
}

/// Whether any assignment of `raw` has `root` as its root menu.
pub fn has_root(raw: &str, root: &str) -> bool {
    !raw.is_empty() && menu_roots(raw).iter().any(|r| r == root)
}

/// Distinct root menus across the table, sorted.
///
/// Recomputed from the table on every call. Empty when the menu column is
/// absent.
pub fn root_menus(table: &Table) -> Vec<String> {
    let Some(idx) = table.column_index(COL_MENU) else {
        return Vec::new();
    };

    let roots: BTreeSet<String> = table
        .rows
        .iter()
        .map(|row| row.get(idx))
        .filter(|raw| !raw.is_empty())
        .flat_map(menu_roots)
        .collect();

    roots.into_iter().collect()
}
