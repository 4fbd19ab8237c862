//! Item name policy checks.
//!
//! Every rule runs on its own and all failures are reported together:
//!
//! 1. Length between [`MIN_NAME_LEN`] and [`MAX_NAME_LEN`] UTF-16 code units
//! 2. No leading or trailing whitespace
//! 3. Only allowlisted characters (see [`is_allowed_char`])
//!
//! # Example
//!
//! ```rust
//! use menucheck::{validate_name, Violation};
//!
//! assert!(validate_name("Valid Näme").is_empty());
//!
//! let violations = validate_name("Bad™Name");
//! assert_eq!(violations, vec![Violation::InvalidCharacters { chars: vec!['™'] }]);
//! ```

use crate::models::Violation;

pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 128;

/// Punctuation accepted in names.
const ALLOWED_PUNCTUATION: &str = "@:!#$%&'()*+,-.=?_|~/";

/// Whether `c` may appear in an item name.
///
/// ASCII letters and digits, [`ALLOWED_PUNCTUATION`], Latin-1 letters
/// `À`..=`ÿ`, space, no-break space and U+2000..=U+200B.
pub fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || ALLOWED_PUNCTUATION.contains(c)
        || matches!(c, 'À'..='ÿ' | ' ' | '\u{00A0}' | '\u{2000}'..='\u{200B}')
}

/// Whitespace as matched by an ECMAScript `\s` (no U+0085).
fn is_edge_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{000B}'
            | '\u{000C}'
            | '\r'
            | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Check `name` exactly as given. An empty result means the name is valid.
///
/// The whitespace rule looks at the string passed in; callers that trim
/// first only trip it when trimming leaves padding behind (e.g. inside
/// stripped quotes).
pub fn validate_name(name: &str) -> Vec<Violation> {
    let mut violations = Vec::new();

    // UTF-16 code units, so astral characters count twice.
    let len = name.encode_utf16().count();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        violations.push(Violation::Length {
            min: MIN_NAME_LEN,
            max: MAX_NAME_LEN,
        });
    }

    let starts = name.chars().next().is_some_and(is_edge_whitespace);
    let ends = name.chars().next_back().is_some_and(is_edge_whitespace);
    if starts || ends {
        violations.push(Violation::WhitespaceEdge);
    }

    let mut invalid: Vec<char> = Vec::new();
    for c in name.chars().filter(|c| !is_allowed_char(*c)) {
        if !invalid.contains(&c) {
            invalid.push(c);
        }
    }
    if !invalid.is_empty() {
        violations.push(Violation::InvalidCharacters { chars: invalid });
    }

    violations
}

/// Quick check: no violations.
pub fn is_valid_name(name: &str) -> bool {
    validate_name(name).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_chars_valid() {
        assert!(validate_name("AB").is_empty());
    }

    #[test]
    fn test_too_short() {
        assert!(validate_name("A").contains(&Violation::Length { min: 2, max: 128 }));
        assert!(!is_valid_name(""));
    }

    #[test]
    fn test_length_bounds() {
        assert!(is_valid_name(&"a".repeat(128)));
        assert!(!is_valid_name(&"a".repeat(129)));
    }

    #[test]
    fn test_length_counts_utf16_units() {
        // Two characters, four bytes.
        assert!(is_valid_name("éé"));

        // One character, two UTF-16 units: long enough, but not allowlisted.
        assert_eq!(
            validate_name("😀"),
            vec![Violation::InvalidCharacters { chars: vec!['😀'] }]
        );
        assert!(!is_valid_name(&"😀".repeat(65)));
        assert!(validate_name(&"😀".repeat(64))
            .iter()
            .all(|v| !matches!(v, Violation::Length { .. })));
    }

    #[test]
    fn test_latin1_and_space_allowed() {
        assert!(validate_name("Valid Näme").is_empty());
        assert!(is_valid_name("Crème brûlée"));
    }

    #[test]
    fn test_punctuation_allowed() {
        assert!(is_valid_name("Mac & Cheese (L) #2, 50% off!"));
        assert!(is_valid_name("a@b:c=d?e_f|g~h/i'j*k+l-m.n$"));
    }

    #[test]
    fn test_unicode_spaces_allowed() {
        assert!(is_valid_name("No\u{00A0}Break"));
        assert!(is_valid_name("Thin\u{2009}Space"));
        assert!(is_valid_name("Zero\u{200B}Width"));
    }

    #[test]
    fn test_trademark_rejected() {
        let violations = validate_name("Bad™Name");
        assert_eq!(violations, vec![Violation::InvalidCharacters { chars: vec!['™'] }]);
        assert_eq!(violations[0].to_string(), "Invalid characters: ™");
    }

    #[test]
    fn test_invalid_chars_deduplicated_in_order() {
        let violations = validate_name("<b>Burger</b>;");
        assert_eq!(
            violations,
            vec![Violation::InvalidCharacters { chars: vec!['<', '>', ';'] }]
        );
    }

    #[test]
    fn test_whitespace_edge() {
        assert_eq!(validate_name(" Fries"), vec![Violation::WhitespaceEdge]);
        assert_eq!(validate_name("Fries\u{00A0}"), vec![Violation::WhitespaceEdge]);
    }

    #[test]
    fn test_next_line_is_not_edge_whitespace() {
        let violations = validate_name("Fries\u{0085}");
        assert_eq!(violations, vec![Violation::InvalidCharacters { chars: vec!['\u{0085}'] }]);
    }

    #[test]
    fn test_ideographic_space_is_edge_whitespace() {
        let violations = validate_name("\u{3000}Fries");
        assert_eq!(violations[0], Violation::WhitespaceEdge);
    }

    #[test]
    fn test_tab_is_edge_and_invalid() {
        let violations = validate_name("\tX");
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0], Violation::WhitespaceEdge);
        assert_eq!(violations[1], Violation::InvalidCharacters { chars: vec!['\t'] });
    }

    #[test]
    fn test_all_rules_reported_together() {
        let violations = validate_name(" ");
        assert_eq!(
            violations,
            vec![Violation::Length { min: 2, max: 128 }, Violation::WhitespaceEdge]
        );

        let violations = validate_name("\u{2122}");
        assert_eq!(violations.len(), 2);
    }
}
