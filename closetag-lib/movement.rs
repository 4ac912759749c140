//! Caret movement direction.
//!
//! ```ignore
//! use closetag_lib::{edit::EditOp, movement::Direction};
//!
//! // Step back over a freshly inserted `</div>` minus its final `>`.
//! let op = EditOp::Move(Direction::Backward, 5);
//! ```

/// The direction of caret movement.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
  /// Toward the end of the document (increasing positions).
  Forward,
  /// Toward the start of the document (decreasing positions).
  Backward,
}
