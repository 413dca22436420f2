//! Block Extent Lowering
//!
//! Resolves the line range an indentation-delimited block occupies. A
//! header's block is the maximal run of following lines indented deeper
//! than the header, blank lines skipped when testing for closure.

use crate::lowering::line_buffer::LineBuffer;

/// Index of the last line of the block opened at `open`.
///
/// Returns `open` itself when the line is blank or the next non-blank line
/// is not indented deeper. The returned line is never blank.
pub fn block_end(buffer: &LineBuffer, open: usize) -> usize {
    if buffer.is_blank_at(open) {
        return open;
    }

    let header_indent = buffer.indent_of(open);

    let first_content = (open + 1..buffer.len()).find(|&i| !buffer.is_blank_at(i));
    match first_content {
        Some(i) if buffer.indent_of(i) > header_indent => {}
        _ => return open,
    }

    // First line at or below the header indent (one past the block)
    let mut next = open + 1;
    while next < buffer.len() {
        if !buffer.is_blank_at(next) && buffer.indent_of(next) <= header_indent {
            break;
        }
        next += 1;
    }

    let mut end = next - 1;
    while buffer.is_blank_at(end) {
        end -= 1;
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_stops_before_dedent() {
        let buffer = LineBuffer::from_lines(["if x:", "    a", "    b", "c"]);
        assert_eq!(block_end(&buffer, 0), 2);
    }

    #[test]
    fn test_block_skips_inner_blank_and_rolls_back_trailing_blank() {
        let buffer = LineBuffer::from_lines(["def f():", "    a", "", "    b", "", "  ", "g()"]);
        assert_eq!(block_end(&buffer, 0), 3);
    }

    #[test]
    fn test_block_runs_to_end_of_buffer() {
        let buffer = LineBuffer::from_lines(["    while y:", "        step()", ""]);
        assert_eq!(block_end(&buffer, 0), 1);
    }

    #[test]
    fn test_non_block_lines_resolve_to_themselves() {
        let buffer = LineBuffer::from_lines(["x = 1", "y = 2", "   ", "if z: pass"]);
        assert_eq!(block_end(&buffer, 0), 0);
        assert_eq!(block_end(&buffer, 2), 2);
        assert_eq!(block_end(&buffer, 3), 3);
    }
}
