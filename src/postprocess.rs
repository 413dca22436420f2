//! Whole-buffer substitution passes
//!
//! Line-local rewrites applied after the structural passes:
//! - Lexical substitution (`self` -> `this`, `snake_case` -> `camelCase`,
//!   `None/True/False`, strict equality)
//! - Indentation renormalization
//! - Line-comment markers

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::helpers::{camel_case_identifier, leading_spaces};
use crate::lowering::LineBuffer;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*").expect("valid identifier pattern"));

/// Identifier tokens replaced wholesale
const IDENTIFIER_TABLE: &[(&str, &str)] = &[
    ("self", "this"),
    ("None", "null"),
    ("True", "true"),
    ("False", "false"),
];

//=============================================================================
// LEXICAL SUBSTITUTION
//=============================================================================

/// Rewrite identifier-shaped tokens in one line
pub fn substitute_identifiers(line: &str) -> String {
    IDENTIFIER
        .replace_all(line, |caps: &Captures| {
            let token = &caps[0];
            IDENTIFIER_TABLE
                .iter()
                .find(|(source, _)| *source == token)
                .map(|(_, target)| target.to_string())
                .unwrap_or_else(|| camel_case_identifier(token))
        })
        .into_owned()
}

/// `==` -> `===` and `!=` -> `!==`, leaving `===`, `!==`, `<=`, `>=` alone
pub fn strict_equality(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut result = String::with_capacity(line.len() + 4);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();
        let after = chars.get(i + 2).copied();
        let prev = if i > 0 { Some(chars[i - 1]) } else { None };

        let is_loose = next == Some('=')
            && after != Some('=')
            && match c {
                '=' => !matches!(prev, Some('=' | '!' | '<' | '>')),
                '!' => true,
                _ => false,
            };

        if is_loose {
            result.push(c);
            result.push_str("==");
            i += 2;
            continue;
        }

        result.push(c);
        i += 1;
    }

    result
}

/// Lexical substitution over the whole buffer
pub fn substitute_lexical(buffer: &mut LineBuffer) {
    buffer.map_lines(|line| strict_equality(&substitute_identifiers(line)));
}

//=============================================================================
// INDENTATION
//=============================================================================

/// Rescale leading indentation from `source_unit` to `target_unit` spaces
/// per level. Leftover spaces below one unit are kept as-is.
pub fn renormalize_indent(line: &str, source_unit: usize, target_unit: usize) -> String {
    if source_unit == 0 {
        return line.to_string();
    }
    let levels = leading_spaces(line) / source_unit;
    if levels == 0 {
        return line.to_string();
    }
    format!("{}{}", " ".repeat(levels * target_unit), &line[levels * source_unit..])
}

pub fn renormalize_indentation(buffer: &mut LineBuffer, source_unit: usize, target_unit: usize) {
    buffer.map_lines(|line| renormalize_indent(line, source_unit, target_unit));
}

//=============================================================================
// COMMENTS
//=============================================================================

/// `#` -> `//` outside string literals. A run of `#` only gets one marker.
pub fn convert_comment_markers(line: &str) -> String {
    let mut result = String::with_capacity(line.len() + 2);
    let mut quote: Option<char> = None;
    let mut escape_next = false;
    let mut prev: Option<char> = None;

    for c in line.chars() {
        if let Some(q) = quote {
            if escape_next {
                escape_next = false;
            } else if c == '\\' {
                escape_next = true;
            } else if c == q {
                quote = None;
            }
            result.push(c);
        } else if c == '#' && prev != Some('#') {
            result.push_str("//");
        } else {
            if c == '"' || c == '\'' {
                quote = Some(c);
            }
            result.push(c);
        }
        prev = Some(c);
    }

    result
}

pub fn convert_comments(buffer: &mut LineBuffer) {
    buffer.map_lines(convert_comment_markers);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_substitution() {
        assert_eq!(
            substitute_identifiers("self.max_depth = None if is_done else True"),
            "this.maxDepth = null if isDone else true"
        );
        assert_eq!(substitute_identifiers("selfish = self_check"), "selfish = selfCheck");
        assert_eq!(substitute_identifiers("x = 10_000"), "x = 10_000");
        assert_eq!(substitute_identifiers("__init__"), "__init__");
    }

    #[test]
    fn test_strict_equality() {
        assert_eq!(strict_equality("a == b and c != d"), "a === b and c !== d");
        assert_eq!(strict_equality("a === b"), "a === b");
        assert_eq!(strict_equality("a <= b >= c"), "a <= b >= c");
        assert_eq!(strict_equality("x = 1"), "x = 1");
    }

    #[test]
    fn test_renormalize_indent() {
        assert_eq!(renormalize_indent("        x", 4, 2), "    x");
        assert_eq!(renormalize_indent("     * doc", 4, 2), "   * doc");
        assert_eq!(renormalize_indent("  x", 4, 2), "  x");
        assert_eq!(renormalize_indent("x", 4, 2), "x");
    }

    #[test]
    fn test_comment_markers() {
        assert_eq!(convert_comment_markers("x = 1  # note"), "x = 1  // note");
        assert_eq!(convert_comment_markers("## heading"), "//# heading");
        assert_eq!(convert_comment_markers("color = '#fff'  # hex"), "color = '#fff'  // hex");
    }
}
