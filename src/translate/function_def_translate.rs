//! Function Definition Translation
//!
//! Rewrites `def` headers and wraps their bodies in braces.
//!
//! Source method syntax:
//! ```text
//!     def __init__(self, node: Optional[Node] = None, *, strict: bool) -> None:
//!         """Build the walker."""
//!         self.node = node
//! ```
//!
//! Target method syntax:
//! ```text
//!     /**
//!      * Build the walker.
//!      */
//!     constructor(node: Node | null = null, { strict }: { strict: boolean } = {}) {
//!         self.node = node
//!     }
//! ```
//!
//! Bodies are copied verbatim; control flow and identifiers are handled by
//! later passes.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error_msg::Result;
use crate::function::translate_param_list;
use crate::helpers::{camel_case_identifier, split_top_level};
use crate::lowering::{block_end, LineBuffer};
use crate::translate::docstring_translate::take_block_body;
use crate::type_resolution::{translate_type, TypePosition};

static DEF_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^( *)def ([A-Za-z0-9_]+)\((.*)\)(?: -> (.*?))?:(.*)$").expect("valid def header pattern")
});

/// Owner parameter names that are implicit in the target
const OWNER_PARAMS: &[&str] = &["self", "cls"];

/// Lifecycle and equality method names with a fixed target spelling
const SPECIAL_METHOD_TABLE: &[(&str, &str)] = &[
    ("__init__", "constructor"),
    ("__str__", "toString"),
    ("__repr__", "toRepr"),
    ("__eq__", "equals"),
];

const CONSTRUCTOR: &str = "constructor";

/// Target method name for a source method name
pub fn translate_method_name(name: &str) -> String {
    SPECIAL_METHOD_TABLE
        .iter()
        .find(|(source, _)| *source == name)
        .map(|(_, target)| target.to_string())
        .unwrap_or_else(|| camel_case_identifier(name))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefKind {
    /// Indented, first parameter is the owner
    Method,
    /// Column zero, no owner parameter
    Function,
}

/// A matched `def` header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefHeader {
    pub indent: usize,
    pub kind: DefKind,
    pub name: String,
    /// Parameter text with the owner parameter removed
    pub params: String,
    pub return_type: Option<String>,
    /// Everything after the header colon
    pub trailing: String,
}

fn is_owner_param(segment: &str) -> bool {
    let name = segment.split(':').next().unwrap_or("").trim();
    OWNER_PARAMS.contains(&name)
}

/// Match a function or method header. Indented defs without an owner
/// parameter (nested helpers, static methods) are not matched.
pub fn parse_def_header(line: &str) -> Option<DefHeader> {
    let caps = DEF_HEADER.captures(line)?;
    let indent = caps[1].len();
    let segments = split_top_level(&caps[3], ',');

    let (kind, params) = match segments.first() {
        Some(first) if indent > 0 && is_owner_param(first) => {
            (DefKind::Method, segments[1..].join(", "))
        }
        _ if indent == 0 => (DefKind::Function, segments.join(", ")),
        _ => return None,
    };

    Some(DefHeader {
        indent,
        kind,
        name: caps[2].to_string(),
        params,
        return_type: caps.get(4).map(|m| m.as_str().trim().to_string()),
        trailing: caps[5].to_string(),
    })
}

impl DefHeader {
    /// Render the target header line (without docstring)
    pub fn render(&self) -> Result<String> {
        let name = translate_method_name(&self.name);
        let params = translate_param_list(&self.params)?;

        let return_annotation = match &self.return_type {
            Some(_) if name == CONSTRUCTOR => String::new(),
            Some(ret) => format!(": {}", translate_type(ret, TypePosition::Return)?),
            None => String::new(),
        };

        let prefix = match self.kind {
            DefKind::Method => " ".repeat(self.indent),
            DefKind::Function => "function ".to_string(),
        };

        Ok(format!(
            "{}{}({}){} {{{}",
            prefix, name, params, return_annotation, self.trailing
        ))
    }
}

/// Rewrite every function and method in the buffer
pub fn rewrite_functions(buffer: &mut LineBuffer) -> Result<()> {
    let mut i = 0;
    while i < buffer.len() {
        let Some(header) = parse_def_header(buffer.line(i)) else {
            i += 1;
            continue;
        };

        let end = block_end(buffer, i);
        let parts = take_block_body(buffer, i, end, header.indent);
        let header_line = header.render()?;
        log::debug!("def `{}` (lines {}..={}) -> {}", header.name, i, end, header_line.trim());

        let doc_len = parts.doc.len();
        let mut replacement = parts.doc;
        replacement.push(header_line);
        replacement.extend(parts.body);
        replacement.push(format!("{}}}", " ".repeat(header.indent)));

        buffer.splice(i..=end, replacement);

        // Resume right below the new header
        i += doc_len + 1;
    }
    Ok(())
}
