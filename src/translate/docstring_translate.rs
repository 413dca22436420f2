//! Docstring Translation
//!
//! Turns a triple-quoted block comment into a documentation comment:
//!
//! ```text
//!     """
//!     Split on commas.
//!
//!     Brackets are respected.
//!     """
//! ```
//!
//! becomes
//!
//! ```text
//!     /**
//!      * Split on commas.
//!      *
//!      * Brackets are respected.
//!      */
//! ```

use crate::helpers::{is_blank, leading_spaces};
use crate::lowering::LineBuffer;

const DOC_DELIMITERS: [&str; 2] = ["\"\"\"", "'''"];

/// Reformat raw docstring lines (delimiters included) as a doc comment
/// indented by `indent` columns. An empty docstring yields no lines.
pub fn translate_docstring(raw: &[String], indent: usize) -> Vec<String> {
    let stripped: Vec<String> = raw
        .iter()
        .map(|line| {
            DOC_DELIMITERS
                .iter()
                .fold(line.clone(), |acc, delim| acc.replace(delim, ""))
        })
        .collect();

    let min_indent = stripped
        .iter()
        .filter(|line| !is_blank(line))
        .map(|line| leading_spaces(line))
        .min()
        .unwrap_or(0);

    let dedented: Vec<String> = stripped
        .iter()
        .map(|line| line.chars().skip(min_indent).collect())
        .collect();

    let first = dedented.iter().position(|line| !is_blank(line));
    let last = dedented.iter().rposition(|line| !is_blank(line));
    let content = match (first, last) {
        (Some(first), Some(last)) => &dedented[first..=last],
        _ => return Vec::new(),
    };

    let pad = " ".repeat(indent);
    let mut block = Vec::with_capacity(content.len() + 2);
    block.push(format!("{}/**", pad));
    for line in content {
        if is_blank(line) {
            block.push(format!("{} *", pad));
        } else {
            block.push(format!("{} * {}", pad, line.trim_end()));
        }
    }
    block.push(format!("{} */", pad));
    block
}

/// A block split around its header: translated leading docstring (if any)
/// and the remaining body lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockParts {
    pub doc: Vec<String>,
    pub body: Vec<String>,
}

/// Split the block `open..=end` into its docstring and body, dropping the
/// header line. The docstring must be the first non-blank body line; blank
/// lines directly after it are dropped with it.
pub fn take_block_body(buffer: &LineBuffer, open: usize, end: usize, doc_indent: usize) -> BlockParts {
    let all_body = || (open + 1..=end).map(|i| buffer.line(i).to_string()).collect();

    let Some(doc_start) = (open + 1..=end).find(|&i| !buffer.is_blank_at(i)) else {
        return BlockParts { doc: Vec::new(), body: all_body() };
    };

    let first = buffer.line(doc_start).trim_start();
    let Some(delim) = DOC_DELIMITERS.iter().find(|d| first.starts_with(**d)) else {
        return BlockParts { doc: Vec::new(), body: all_body() };
    };

    let doc_end = if first[delim.len()..].contains(delim) {
        Some(doc_start)
    } else {
        (doc_start + 1..=end).find(|&i| buffer.line(i).contains(delim))
    };
    let Some(doc_end) = doc_end else {
        return BlockParts { doc: Vec::new(), body: all_body() };
    };

    let mut body_start = doc_end + 1;
    while body_start <= end && buffer.is_blank_at(body_start) {
        body_start += 1;
    }

    let raw: Vec<String> = (doc_start..=doc_end).map(|i| buffer.line(i).to_string()).collect();
    BlockParts {
        doc: translate_docstring(&raw, doc_indent),
        body: (body_start..=end).map(|i| buffer.line(i).to_string()).collect(),
    }
}
