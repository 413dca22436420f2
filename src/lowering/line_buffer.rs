//! Line Buffer
//!
//! The mutable program representation every pass works on. Rewrites
//! replace a contiguous line range with a replacement of any length, so an
//! index held across a splice is stale and must be recomputed from the
//! splice result.

use std::ops::RangeInclusive;

use crate::helpers::{is_blank, leading_spaces};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
    trailing_newline: bool,
}

impl LineBuffer {
    pub fn from_source(source: &str) -> Self {
        LineBuffer {
            lines: source.lines().map(str::to_string).collect(),
            trailing_newline: source.ends_with('\n'),
        }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LineBuffer {
            lines: lines.into_iter().map(Into::into).collect(),
            trailing_newline: false,
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> &str {
        &self.lines[index]
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn indent_of(&self, index: usize) -> usize {
        leading_spaces(&self.lines[index])
    }

    pub fn is_blank_at(&self, index: usize) -> bool {
        is_blank(&self.lines[index])
    }

    /// Replace `range` with `replacement`, returning the index one past the
    /// last inserted line.
    pub fn splice(&mut self, range: RangeInclusive<usize>, replacement: Vec<String>) -> usize {
        let start = *range.start();
        let inserted = replacement.len();
        log::trace!(
            "splice lines {}..={} -> {} line(s)",
            start,
            range.end(),
            inserted
        );
        let _removed: Vec<String> = self.lines.splice(range, replacement).collect();
        start + inserted
    }

    pub fn remove(&mut self, index: usize) -> String {
        self.lines.remove(index)
    }

    /// Apply `f` to every line in place
    pub fn map_lines<F>(&mut self, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        for line in self.lines.iter_mut() {
            *line = f(line);
        }
    }

    pub fn into_source(self) -> String {
        let mut source = self.lines.join("\n");
        if self.trailing_newline {
            source.push('\n');
        }
        source
    }
}
