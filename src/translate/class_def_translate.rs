//! Class Definition Translation
//!
//! Source class syntax:
//! ```text
//! class Walker(Base, Generic[T]):
//!     """Walks a tree."""
//!     depth = 0
//! ```
//!
//! Target class syntax:
//! ```text
//! /**
//!  * Walks a tree.
//!  */
//! class Walker<T> extends Base {
//!     depth = 0
//! }
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error_msg::{Result, TranspileError};
use crate::helpers::{first_bracket_span, split_outside_brackets, split_top_level, BracketPair};
use crate::lowering::{block_end, LineBuffer};
use crate::translate::docstring_translate::take_block_body;
use crate::type_resolution::{translate_type, TypePosition};

static CLASS_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^( *)class ([A-Za-z0-9_]+)(?:\((.*?)\))?:(.*)$").expect("valid class header pattern")
});

/// Base names with a fixed target meaning; `None` drops the base
const BASE_CLASS_TABLE: &[(&str, Option<&str>)] = &[
    ("object", None),
    ("ABC", None),
    ("Exception", Some("Error")),
    ("BaseException", Some("Error")),
];

const GENERIC_BASE: &str = "Generic";

/// A matched `class` header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassHeader {
    pub indent: usize,
    pub name: String,
    pub bases: Vec<String>,
    pub trailing: String,
}

pub fn parse_class_header(line: &str) -> Option<ClassHeader> {
    let caps = CLASS_HEADER.captures(line)?;
    let bases = caps
        .get(3)
        .map(|m| split_top_level(m.as_str(), ','))
        .unwrap_or_default()
        .into_iter()
        .filter(|base| !base.is_empty())
        .collect();

    Some(ClassHeader {
        indent: caps[1].len(),
        name: caps[2].to_string(),
        bases,
        trailing: caps[4].to_string(),
    })
}

impl ClassHeader {
    pub fn render(&self) -> Result<String> {
        let mut type_params: Vec<String> = Vec::new();
        let mut extends: Vec<String> = Vec::new();

        for base in &self.bases {
            if let Some(eq) = base.find('=') {
                return Err(TranspileError::UnsupportedClassArgument {
                    class: self.name.clone(),
                    argument: base[..eq].trim().to_string(),
                });
            }

            if base.starts_with(GENERIC_BASE) && base[GENERIC_BASE.len()..].starts_with('[') {
                let span = first_bracket_span(base, true)?;
                type_params.extend(split_outside_brackets(span.inner(base), ",", BracketPair::SQUARE, true));
                continue;
            }

            match BASE_CLASS_TABLE.iter().find(|(source, _)| *source == base.as_str()) {
                Some((_, Some(target))) => extends.push(target.to_string()),
                Some((_, None)) => {}
                None => extends.push(translate_type(base, TypePosition::Value)?),
            }
        }

        if extends.len() > 1 {
            return Err(TranspileError::MultipleInheritance {
                class: self.name.clone(),
                bases: extends.join(", "),
            });
        }

        let generics = if type_params.is_empty() {
            String::new()
        } else {
            format!("<{}>", type_params.join(", "))
        };
        let extends = extends
            .first()
            .map(|base| format!(" extends {}", base))
            .unwrap_or_default();

        Ok(format!(
            "{}class {}{}{} {{{}",
            " ".repeat(self.indent),
            self.name,
            generics,
            extends,
            self.trailing
        ))
    }
}

/// Rewrite every class header in the buffer and brace its body
pub fn rewrite_classes(buffer: &mut LineBuffer) -> Result<()> {
    let mut i = 0;
    while i < buffer.len() {
        let Some(header) = parse_class_header(buffer.line(i)) else {
            i += 1;
            continue;
        };

        let end = block_end(buffer, i);
        let parts = take_block_body(buffer, i, end, header.indent);
        let header_line = header.render()?;
        log::debug!("class `{}` (lines {}..={})", header.name, i, end);

        let doc_len = parts.doc.len();
        let mut replacement = parts.doc;
        replacement.push(header_line);
        replacement.extend(parts.body);
        replacement.push(format!("{}}}", " ".repeat(header.indent)));

        buffer.splice(i..=end, replacement);
        i += doc_len + 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(line: &str) -> Result<String> {
        parse_class_header(line).expect("class header").render()
    }

    #[test]
    fn test_plain_and_single_base() {
        assert_eq!(render("class Node:").unwrap(), "class Node {");
        assert_eq!(render("class Leaf(Node):  # x").unwrap(), "class Leaf extends Node {  # x");
        assert_eq!(render("class Leaf(object):").unwrap(), "class Leaf {");
    }

    #[test]
    fn test_base_remapping() {
        assert_eq!(render("class ParseError(Exception):").unwrap(), "class ParseError extends Error {");
        assert_eq!(render("class Shape(ABC):").unwrap(), "class Shape {");
        assert_eq!(
            render("class Visitor(BaseVisitor[int]):").unwrap(),
            "class Visitor extends BaseVisitor<number> {"
        );
    }

    #[test]
    fn test_generic_base_becomes_type_parameters() {
        assert_eq!(
            render("class Pair(Base, Generic[K, V]):").unwrap(),
            "class Pair<K, V> extends Base {"
        );
    }

    #[test]
    fn test_multiple_bases_rejected() {
        assert_eq!(
            render("class Both(Left, Right):"),
            Err(TranspileError::MultipleInheritance {
                class: "Both".into(),
                bases: "Left, Right".into(),
            })
        );
    }

    #[test]
    fn test_keyword_argument_rejected() {
        assert!(matches!(
            render("class Meta(Base, metaclass=ABCMeta):"),
            Err(TranspileError::UnsupportedClassArgument { .. })
        ));
    }

    #[test]
    fn test_bases_split_only_at_top_level() {
        let header = parse_class_header("class Row(Base, metaclass=pick(a, b)):").unwrap();
        assert_eq!(header.bases, vec!["Base", "metaclass=pick(a, b)"]);
        assert_eq!(
            header.render(),
            Err(TranspileError::UnsupportedClassArgument {
                class: "Row".into(),
                argument: "metaclass".into(),
            })
        );
    }

    #[test]
    fn test_rewrite_nested_classes() {
        let mut buffer = LineBuffer::from_lines([
            "class Outer:",
            "    \"\"\"Outer doc.\"\"\"",
            "    class Inner:",
            "        x = 1",
            "    y = 2",
            "z = 3",
        ]);
        rewrite_classes(&mut buffer).unwrap();
        assert_eq!(
            buffer.lines(),
            [
                "/**",
                " * Outer doc.",
                " */",
                "class Outer {",
                "    class Inner {",
                "        x = 1",
                "    }",
                "    y = 2",
                "}",
                "z = 3",
            ]
        );
    }
}
