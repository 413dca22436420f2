//! Structural scanner and text helpers for the pyts rewriter
//!
//! Contains the bracket-aware primitives every other module builds on:
//! - Bracket matching and first-span lookup
//! - Delimiter splitting outside brackets
//! - Top-level separator search (header colons, default `=`)
//! - Indentation measurement and identifier casing

use crate::error_msg::{Result, TranspileError};

//=============================================================================
// BRACKETS
//=============================================================================

/// A single open/close bracket character pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketPair {
    pub open: char,
    pub close: char,
}

impl BracketPair {
    pub const SQUARE: BracketPair = BracketPair { open: '[', close: ']' };
    pub const PAREN: BracketPair = BracketPair { open: '(', close: ')' };
    pub const CURLY: BracketPair = BracketPair { open: '{', close: '}' };

    /// The pair whose opening character is `c`
    pub fn for_opener(c: char) -> Option<BracketPair> {
        [Self::SQUARE, Self::PAREN, Self::CURLY]
            .into_iter()
            .find(|pair| pair.open == c)
    }
}

impl Default for BracketPair {
    fn default() -> Self {
        BracketPair::SQUARE
    }
}

/// Byte positions of a matched bracket pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketSpan {
    pub open: usize,
    pub close: usize,
}

impl BracketSpan {
    /// Text strictly between the brackets
    pub fn inner<'a>(&self, text: &'a str) -> &'a str {
        &text[self.open + 1..self.close]
    }
}

/// Find the byte index of the bracket closing the one at `open_index`.
///
/// The bracket kind is taken from the character at `open_index`. Depth is
/// counted for that kind only.
pub fn find_matching_bracket(text: &str, open_index: usize) -> Result<usize> {
    let pair = text
        .get(open_index..)
        .and_then(|rest| rest.chars().next())
        .and_then(BracketPair::for_opener)
        .ok_or_else(|| TranspileError::NoBracketFound { text: text.to_string() })?;

    let mut depth = 0usize;
    for (offset, c) in text[open_index..].char_indices() {
        if c == pair.open {
            depth += 1;
        } else if c == pair.close {
            depth -= 1;
            if depth == 0 {
                return Ok(open_index + offset);
            }
        }
    }

    Err(TranspileError::UnmatchedBracket {
        text: text.to_string(),
        index: open_index,
    })
}

/// Span of the first `[`...`]` pair in `text`.
///
/// With `require_close_at_end`, the closing bracket must be the last
/// character of `text`.
pub fn first_bracket_span(text: &str, require_close_at_end: bool) -> Result<BracketSpan> {
    let open = text
        .find('[')
        .ok_or_else(|| TranspileError::NoBracketFound { text: text.to_string() })?;
    let close = find_matching_bracket(text, open)?;

    if require_close_at_end && close != text.len() - 1 {
        return Err(TranspileError::TrailingContent { text: text.to_string() });
    }

    Ok(BracketSpan { open, close })
}

/// Split `text` on `delimiter` wherever `pair` depth is zero.
///
/// Quoted string literals are skipped, so delimiters and brackets inside
/// them never count. A trailing empty segment is not produced, so `""`
/// splits into nothing.
pub fn split_outside_brackets(
    text: &str,
    delimiter: &str,
    pair: BracketPair,
    trim_each: bool,
) -> Vec<String> {
    let finish = |segment: &str| {
        if trim_each {
            segment.trim().to_string()
        } else {
            segment.to_string()
        }
    };

    let mut segments = Vec::new();
    let mut depth: i32 = 0;
    let mut quote: Option<char> = None;
    let mut escape_next = false;
    let mut segment_start = 0;
    let mut i = 0;

    while i < text.len() {
        let rest = &text[i..];
        let c = match rest.chars().next() {
            Some(c) => c,
            None => break,
        };

        if let Some(q) = quote {
            if escape_next {
                escape_next = false;
            } else if c == '\\' {
                escape_next = true;
            } else if c == q {
                quote = None;
            }
        } else if c == '\'' || c == '"' {
            quote = Some(c);
        } else if c == pair.open {
            depth += 1;
        } else if c == pair.close {
            depth -= 1;
        } else if depth == 0 && !delimiter.is_empty() && rest.starts_with(delimiter) {
            segments.push(finish(&text[segment_start..i]));
            i += delimiter.len();
            segment_start = i;
            continue;
        }

        i += c.len_utf8();
    }

    let tail = &text[segment_start..];
    if !tail.trim().is_empty() {
        segments.push(finish(tail));
    }

    segments
}

//=============================================================================
// TOP-LEVEL SEPARATORS
//=============================================================================

/// Walk `text` yielding `(byte_index, char)` for characters at bracket depth
/// zero (all three bracket kinds) that are outside string literals.
fn top_level_chars(text: &str) -> Vec<(usize, char)> {
    let mut result = Vec::new();
    let mut depth: i32 = 0;
    let mut quote: Option<char> = None;
    let mut escape_next = false;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escape_next {
                escape_next = false;
            } else if c == '\\' {
                escape_next = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '\'' | '"' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            _ if depth == 0 => result.push((i, c)),
            _ => {}
        }
    }

    result
}

/// Split on `delimiter` at depth zero across all bracket kinds, trimming
/// each segment. Used for parameter and base lists, where defaults may hold
/// tuples, calls or dict literals.
pub fn split_top_level(text: &str, delimiter: char) -> Vec<String> {
    let mut segments = Vec::new();
    let mut start = 0;

    for (i, c) in top_level_chars(text) {
        if c == delimiter {
            segments.push(text[start..i].trim().to_string());
            start = i + c.len_utf8();
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        segments.push(tail.to_string());
    }
    segments
}

/// First `:` at bracket depth zero outside strings, i.e. the colon that
/// terminates a block header.
pub fn find_header_colon(text: &str) -> Option<usize> {
    top_level_chars(text)
        .into_iter()
        .find(|&(_, c)| c == ':')
        .map(|(i, _)| i)
}

/// First standalone `=` at bracket depth zero, skipping the comparison
/// operators `==`, `!=`, `<=` and `>=`.
pub fn find_default_separator(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    top_level_chars(text)
        .into_iter()
        .filter(|&(_, c)| c == '=')
        .map(|(i, _)| i)
        .find(|&i| {
            let prev = if i > 0 { bytes[i - 1] } else { b' ' };
            let next = bytes.get(i + 1).copied().unwrap_or(b' ');
            !matches!(prev, b'=' | b'!' | b'<' | b'>') && next != b'='
        })
}

//=============================================================================
// LINES AND IDENTIFIERS
//=============================================================================

/// Number of leading space characters
pub fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// Empty or whitespace-only line
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Convert `snake_case` to `camelCase`.
///
/// An underscore is dropped only when it sits between a lowercase letter or
/// digit and another lowercase letter or digit, which is then uppercased.
/// Leading underscores and dunder names survive untouched.
pub fn camel_case_identifier(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let is_lower_or_digit = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();

    let mut result = String::with_capacity(name.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '_'
            && i > 0
            && is_lower_or_digit(chars[i - 1])
            && i + 1 < chars.len()
            && is_lower_or_digit(chars[i + 1])
        {
            result.push(chars[i + 1].to_ascii_uppercase());
            i += 2;
            continue;
        }
        result.push(c);
        i += 1;
    }

    result
}
