//! Transpiler configuration

/// Options shared by every pass. Only indentation renormalization reads
/// them today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranspileConfig {
    /// Spaces per indentation level in the input
    pub source_indent: usize,
    /// Spaces per indentation level in the output
    pub target_indent: usize,
}

impl Default for TranspileConfig {
    fn default() -> Self {
        TranspileConfig {
            source_indent: 4,
            target_indent: 2,
        }
    }
}

impl TranspileConfig {
    pub fn with_indent(source_indent: usize, target_indent: usize) -> Self {
        TranspileConfig {
            source_indent,
            target_indent,
        }
    }

    /// Reject widths that would collapse or divide by zero
    pub fn validate(&self) -> Result<(), String> {
        if self.source_indent == 0 {
            return Err("source indentation width must be at least 1".to_string());
        }
        if self.target_indent == 0 {
            return Err("target indentation width must be at least 1".to_string());
        }
        Ok(())
    }
}
