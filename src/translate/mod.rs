//! Translation Module
//!
//! Header-level rewriters. Each one matches a block header, resolves the
//! block extent, lifts a leading docstring into a doc comment and splices
//! the braced block back into the buffer.

// Definition translations
pub mod class_def_translate;
pub mod function_def_translate;

// Documentation
pub mod docstring_translate;

// Re-exports for convenience
pub use class_def_translate::{parse_class_header, rewrite_classes, ClassHeader};
pub use function_def_translate::{
    parse_def_header, rewrite_functions, translate_method_name, DefHeader, DefKind,
};
pub use docstring_translate::{take_block_body, translate_docstring, BlockParts};
