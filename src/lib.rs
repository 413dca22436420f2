//! pyts: structural, rule-based rewriting of indentation-delimited Python
//! source into brace-delimited TypeScript.
//!
//! The rewriter works on raw lines, not a parse tree. Brackets and
//! indentation blocks are resolved from the text right before each splice.
//! Coverage of the input grammar is best effort; anything that cannot be
//! translated with confidence aborts with a `TranspileError`.

// Core modules
pub mod config;
pub mod error_msg;
pub mod helpers;
pub mod type_resolution;
pub mod function;
pub mod control_flow;
pub mod postprocess;

// Modularized transpiler components
pub mod lowering;
pub mod translate;
pub mod transpile_main;


pub use config::TranspileConfig;
pub use error_msg::{ErrorCategory, ErrorCode, Result, TranspileError};
pub use transpile_main::{transpile, transpile_with_config, Pass, Pipeline};
