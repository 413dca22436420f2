//! Control Flow Block Rewriting
//!
//! Converts indentation-delimited `if/elif/else/while/for/try/except/finally`
//! blocks into brace-delimited ones.
//!
//! ```text
//! if x == 1:
//!     a()
//! elif y:
//!     b()
//! else:
//!     c()
//! ```
//!
//! Transforms to:
//! ```text
//! if (x == 1) {
//!     a()
//! } else if (y) {
//!     b()
//! } else {
//!     c()
//! }
//! ```
//!
//! ## Chaining
//!
//! Blocks are rewritten top-down, so by the time `elif`/`else`/`except`/
//! `finally` is reached, the previous clause already ends in a lone `}` on
//! the line directly above at the same indentation. That line is removed
//! and the new header starts with `} `. A closing brace separated from the
//! clause by anything else is left alone.
//!
//! `else` after a loop or an exception handler has no target form and
//! aborts the rewrite.
//!
//! ## Loops
//!
//! `for x in items:` becomes `for (const x of items) {`. A tuple target
//! `for k, v in pairs:` becomes a destructuring binding `const [k, v]`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error_msg::{Result, TranspileError};
use crate::helpers::{find_header_colon, split_outside_brackets, BracketPair};
use crate::lowering::{block_end, LineBuffer};

static BLOCK_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^( *)(if|elif|while|for|except|else|try|finally)\b(.*)$").expect("valid block header pattern")
});

const MEMBERSHIP_OPERATOR: &str = " in ";

/// Rendered clause keywords an `else` cannot follow, with source spelling
const NO_ELSE_AFTER: &[(&str, &str)] = &[("for", "for"), ("while", "while"), ("catch", "except")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKeyword {
    If,
    Elif,
    While,
    For,
    Except,
    Else,
    Try,
    Finally,
}

impl BlockKeyword {
    fn parse(word: &str) -> Option<BlockKeyword> {
        Some(match word {
            "if" => BlockKeyword::If,
            "elif" => BlockKeyword::Elif,
            "while" => BlockKeyword::While,
            "for" => BlockKeyword::For,
            "except" => BlockKeyword::Except,
            "else" => BlockKeyword::Else,
            "try" => BlockKeyword::Try,
            "finally" => BlockKeyword::Finally,
            _ => return None,
        })
    }

    /// Keyword spelling in the target
    pub fn target(&self) -> &'static str {
        match self {
            BlockKeyword::If => "if",
            BlockKeyword::Elif => "else if",
            BlockKeyword::While => "while",
            BlockKeyword::For => "for",
            BlockKeyword::Except => "catch",
            BlockKeyword::Else => "else",
            BlockKeyword::Try => "try",
            BlockKeyword::Finally => "finally",
        }
    }

    /// Clause that continues a preceding block
    pub fn is_chaining(&self) -> bool {
        matches!(
            self,
            BlockKeyword::Elif | BlockKeyword::Except | BlockKeyword::Else | BlockKeyword::Finally
        )
    }

    fn requires_condition(&self) -> bool {
        matches!(
            self,
            BlockKeyword::If | BlockKeyword::Elif | BlockKeyword::While | BlockKeyword::For
        )
    }

    fn accepts_condition(&self) -> bool {
        self.requires_condition() || *self == BlockKeyword::Except
    }
}

/// A line matched against the block-opening grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMatch {
    pub indent: usize,
    pub keyword: BlockKeyword,
    pub condition: Option<String>,
    /// Everything after the header colon
    pub trailing: String,
}

/// Match a block-opening header. The condition ends at the first colon at
/// bracket depth zero.
pub fn parse_block_header(line: &str) -> Option<BlockMatch> {
    let caps = BLOCK_HEADER.captures(line)?;
    let keyword = BlockKeyword::parse(&caps[2])?;
    let rest = &caps[3];

    let colon = find_header_colon(rest)?;
    let condition = rest[..colon].trim();
    let condition = (!condition.is_empty()).then(|| condition.to_string());

    match (&condition, keyword.accepts_condition(), keyword.requires_condition()) {
        (Some(_), false, _) | (None, _, true) => return None,
        _ => {}
    }

    Some(BlockMatch {
        indent: caps[1].len(),
        keyword,
        condition,
        trailing: rest[colon + 1..].to_string(),
    })
}

/// `x in items` -> `const x of items`
pub fn translate_membership(condition: &str) -> Result<String> {
    let parts = split_outside_brackets(condition, MEMBERSHIP_OPERATOR, BracketPair::SQUARE, false);
    if parts.len() != 2 {
        return Err(TranspileError::MalformedMembership {
            condition: condition.to_string(),
            parts: parts.len(),
        });
    }

    let target = parts[0].trim();
    let target = target
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .unwrap_or(target);
    let names = split_outside_brackets(target, ",", BracketPair::PAREN, true);
    let binding = if names.len() > 1 {
        format!("[{}]", names.join(", "))
    } else {
        target.to_string()
    };

    Ok(format!("const {} of {}", binding, parts[1].trim()))
}

impl BlockMatch {
    /// Header line, with `leading` inserted before the keyword
    pub fn render(&self, leading: &str) -> Result<String> {
        let condition = match (&self.condition, self.keyword) {
            (Some(cond), BlockKeyword::For) => format!(" ({})", translate_membership(cond)?),
            (Some(cond), _) => format!(" ({})", cond),
            (None, _) => String::new(),
        };

        Ok(format!(
            "{}{}{}{} {{{}",
            " ".repeat(self.indent),
            leading,
            self.keyword.target(),
            condition,
            self.trailing
        ))
    }
}

/// Source keyword of the already-rendered clause closed by the `}` at
/// `closing`, if `else` may not follow it
fn else_blocker(buffer: &LineBuffer, closing: usize, indent: usize) -> Option<&'static str> {
    let header = (0..closing)
        .rev()
        .find(|&j| !buffer.is_blank_at(j) && buffer.indent_of(j) <= indent)?;
    let text = buffer.line(header).trim_start();
    let text = text.strip_prefix("} ").unwrap_or(text);
    let word = text.split([' ', '(']).next().unwrap_or("");

    NO_ELSE_AFTER
        .iter()
        .find(|(target, _)| *target == word)
        .map(|(_, source)| *source)
}

/// Rewrite every control-flow block in the buffer
pub fn rewrite_control_flow(buffer: &mut LineBuffer) -> Result<()> {
    let mut i = 0;
    while i < buffer.len() {
        let Some(block) = parse_block_header(buffer.line(i)) else {
            i += 1;
            continue;
        };

        let mut start = i;
        let mut end = block_end(buffer, start);
        let closing = format!("{}}}", " ".repeat(block.indent));

        let mut leading = "";
        if block.keyword.is_chaining() && start > 0 && buffer.line(start - 1) == closing {
            if block.keyword == BlockKeyword::Else {
                if let Some(after) = else_blocker(buffer, start - 1, block.indent) {
                    return Err(TranspileError::UnsupportedElse { after: after.to_string() });
                }
            }
            buffer.remove(start - 1);
            start -= 1;
            end -= 1;
            leading = "} ";
        }

        let header = block.render(leading)?;
        log::debug!("block `{}` (lines {}..={})", header.trim(), start, end);

        let mut replacement = Vec::with_capacity(end - start + 2);
        replacement.push(header);
        replacement.extend((start + 1..=end).map(|j| buffer.line(j).to_string()));
        replacement.push(closing);

        buffer.splice(start..=end, replacement);

        // Continue with the first body line so nested blocks are reached
        i = start + 1;
    }
    Ok(())
}
