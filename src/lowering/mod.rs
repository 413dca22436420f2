//! Lowering Module
//!
//! Line-buffer bookkeeping shared by every rewrite pass: the buffer with
//! its splice operation and the indentation-based block extent resolver.

pub mod line_buffer;
pub mod block_extent_lowering;

pub use line_buffer::LineBuffer;
pub use block_extent_lowering::block_end;
