//! Rules for the characters that carry structure in a command line.
//!
//! Four characters are reserved: the escape marker `\`, the two vector
//! brackets `[` and `]`, and the quote `"`. Any of them can be written
//! literally by prefixing it with the escape marker.

/// The escape marker.
pub const ESCAPE_CHAR: char = '\\';

/// Every character with structural meaning, the escape marker included.
pub const RESERVED_CHARS: [char; 4] = ['\\', '[', ']', '"'];

/// Message used whenever a reserved character shows up unescaped.
pub const RESERVED_MSG: &str = "Reserved chars '\\, [, ], \"' must be escaped with \\";

/// Returns true if `c` is the escape marker.
#[inline]
pub fn is_escape_char(c: char) -> bool {
    c == ESCAPE_CHAR
}

/// Returns true if `c` is one of the [`RESERVED_CHARS`].
#[inline]
pub fn is_reserved_char(c: char) -> bool {
    RESERVED_CHARS.contains(&c)
}

/// Returns true if the char at `pos` is an escape marker that escapes the char after it.
pub fn is_escaping(input: &[char], pos: usize) -> bool {
    pos + 1 < input.len() && is_escape_char(input[pos]) && is_reserved_char(input[pos + 1])
}

/// Returns true if the char at `pos` is escaped.
///
/// Walks backwards over the run of escape markers in front of `pos`, toggling
/// on every reserved char preceded by a marker, so `\\"` leaves the quote
/// unescaped while `\"` escapes it.
pub fn is_escaped(input: &[char], pos: usize) -> bool {
    let mut result = false;
    if pos >= input.len() {
        return result;
    }

    for i in (1..=pos).rev() {
        if is_reserved_char(input[i]) && is_escape_char(input[i - 1]) {
            result = !result;
        } else {
            break;
        }
    }
    result
}

/// Escapes every reserved char in `text` so it reads back literally.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if is_reserved_char(c) {
            out.push(ESCAPE_CHAR);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_reserved_set() {
        for c in ['\\', '[', ']', '"'] {
            assert!(is_reserved_char(c));
        }
        assert!(!is_reserved_char('a'));
        assert!(!is_reserved_char(' '));
        assert!(is_escape_char('\\'));
        assert!(!is_escape_char('/'));
    }

    #[test]
    fn test_is_escaping_needs_reserved_successor() {
        let input = chars(r#"\[\a\"#);
        assert!(is_escaping(&input, 0));
        assert!(!is_escaping(&input, 2));
        // Trailing marker has nothing to escape.
        assert!(!is_escaping(&input, 4));
        assert!(!is_escaping(&[], 0));
    }

    #[test]
    fn test_is_escaped_toggles_over_marker_runs() {
        let single = chars(r#"a\"b"#);
        assert!(is_escaped(&single, 2));

        let double = chars(r#"a\\"b"#);
        assert!(!is_escaped(&double, 3));

        let triple = chars(r#"a\\\"b"#);
        assert!(is_escaped(&triple, 4));

        let plain = chars(r#""abc""#);
        assert!(!is_escaped(&plain, 0));
        assert!(!is_escaped(&plain, 4));
    }

    #[test]
    fn test_escape_marks_every_reserved_char() {
        assert_eq!(escape(r#"a"b"#), r#"a\"b"#);
        assert_eq!(escape(r"[x]"), r"\[x\]");
        assert_eq!(escape(r"a\b"), r"a\\b");
        assert_eq!(escape("plain"), "plain");
    }
}
