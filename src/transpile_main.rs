//! Main Transpilation Pipeline
//!
//! Runs the rewrite passes over one line buffer in a fixed order:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  1. Classes      class headers + docstrings, braces          │
//! │  2. Functions    def headers, parameters, return types       │
//! │  3. Lexical      self/this, camelCase, literals, ===         │
//! │  4. ControlFlow  if/elif/else/while/for/try/except/finally   │
//! │  5. Indentation  source unit -> target unit                  │
//! │  6. Comments     # -> //                                     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Functions run after Classes so method bodies already sit inside the
//! class braces. ControlFlow runs after Lexical: the lexical pass only
//! touches identifier tokens, and the keywords it would never rename must
//! still be in source spelling when block headers are matched.

use crate::config::TranspileConfig;
use crate::control_flow::rewrite_control_flow;
use crate::error_msg::Result;
use crate::lowering::LineBuffer;
use crate::postprocess::{convert_comments, renormalize_indentation, substitute_lexical};
use crate::translate::{rewrite_classes, rewrite_functions};

/// One rewrite pass over the whole buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Classes,
    Functions,
    Lexical,
    ControlFlow,
    Indentation,
    Comments,
}

impl Pass {
    /// The only order passes are ever run in
    pub const ORDER: [Pass; 6] = [
        Pass::Classes,
        Pass::Functions,
        Pass::Lexical,
        Pass::ControlFlow,
        Pass::Indentation,
        Pass::Comments,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Pass::Classes => "classes",
            Pass::Functions => "functions",
            Pass::Lexical => "lexical",
            Pass::ControlFlow => "control-flow",
            Pass::Indentation => "indentation",
            Pass::Comments => "comments",
        }
    }

    fn run(self, buffer: &mut LineBuffer, config: &TranspileConfig) -> Result<()> {
        match self {
            Pass::Classes => rewrite_classes(buffer),
            Pass::Functions => rewrite_functions(buffer),
            Pass::Lexical => {
                substitute_lexical(buffer);
                Ok(())
            }
            Pass::ControlFlow => rewrite_control_flow(buffer),
            Pass::Indentation => {
                renormalize_indentation(buffer, config.source_indent, config.target_indent);
                Ok(())
            }
            Pass::Comments => {
                convert_comments(buffer);
                Ok(())
            }
        }
    }
}

/// Ordered pass pipeline
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: TranspileConfig,
}

impl Pipeline {
    pub fn new(config: TranspileConfig) -> Self {
        Pipeline { config }
    }

    pub fn passes(&self) -> &'static [Pass] {
        &Pass::ORDER
    }

    /// Run every pass; the first failure aborts the whole transformation
    pub fn run(&self, source: &str) -> Result<String> {
        let mut buffer = LineBuffer::from_source(source);
        for pass in Pass::ORDER {
            log::debug!("pass `{}` over {} line(s)", pass.name(), buffer.len());
            pass.run(&mut buffer, &self.config)?;
        }
        Ok(buffer.into_source())
    }
}

/// Rewrite `source` with the default configuration
pub fn transpile(source: &str) -> Result<String> {
    Pipeline::default().run(source)
}

pub fn transpile_with_config(source: &str, config: &TranspileConfig) -> Result<String> {
    Pipeline::new(*config).run(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_order_is_fixed() {
        let names: Vec<&str> = Pipeline::default().passes().iter().map(Pass::name).collect();
        assert_eq!(
            names,
            ["classes", "functions", "lexical", "control-flow", "indentation", "comments"]
        );
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(transpile("").unwrap(), "");
    }

    #[test]
    fn test_custom_indent_widths() {
        let config = TranspileConfig::with_indent(2, 4);
        assert_eq!(
            transpile_with_config("if a:\n  b = 1\n", &config).unwrap(),
            "if (a) {\n    b = 1\n}\n"
        );
    }
}
