//! Primitive edit operations produced by tag-closing decisions.
//!
//! A decision never touches the buffer itself. It returns an [`EditPlan`]: an
//! ordered list of [`EditOp`]s that mirror what a user could do with the
//! keyboard (type text, backspace, delete, move the caret, open a line above).
//! The host replays the plan through [`EditTarget`], which keeps decisions
//! testable without a live buffer:
//!
//! ```ignore
//! let plan = auto_close::hook(&doc, &config, Some("html"), &event)?;
//! assert_eq!(plan.ops(), &[
//!   EditOp::Insert("</div>".into()),
//!   EditOp::Move(Direction::Backward, 6),
//! ]);
//! plan.execute(&mut doc);
//! ```
//!
//! Ops apply relative to the caret at the time they run, so their order
//! matters: `[Move(Backward, 1), DeleteBackward, Move(Forward, 1)]` removes
//! the char two positions left of the caret and leaves the caret after the
//! char it started behind.

use std::fmt;

use smallvec::SmallVec;

use crate::{
  Tendril,
  host::EditTarget,
  movement::Direction,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
  /// Insert text at the caret; the caret ends up after it.
  Insert(Tendril),
  /// Remove the char before the caret.
  DeleteBackward,
  /// Remove the char after the caret.
  DeleteForward,
  /// Move the caret by a number of chars.
  Move(Direction, usize),
  /// Open an empty line above the caret's line and put the caret on it.
  InsertLineAbove,
}

impl fmt::Display for EditOp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Insert(text) => write!(f, "insert {:?}", text.as_str()),
      Self::DeleteBackward => write!(f, "backspace"),
      Self::DeleteForward => write!(f, "delete"),
      Self::Move(Direction::Backward, n) => write!(f, "left {n}"),
      Self::Move(Direction::Forward, n) => write!(f, "right {n}"),
      Self::InsertLineAbove => write!(f, "line above"),
    }
  }
}

/// Ordered edits for one keystroke. Empty means the keystroke is left alone.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EditPlan {
  ops: SmallVec<[EditOp; 4]>,
}

impl EditPlan {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn ops(&self) -> &[EditOp] {
    &self.ops
  }

  pub fn is_empty(&self) -> bool {
    self.ops.is_empty()
  }

  pub fn push(&mut self, op: EditOp) -> &mut Self {
    self.ops.push(op);
    self
  }

  pub fn insert(&mut self, text: &str) -> &mut Self {
    self.push(EditOp::Insert(Tendril::from(text)))
  }

  pub fn delete_backward(&mut self) -> &mut Self {
    self.push(EditOp::DeleteBackward)
  }

  pub fn move_left(&mut self, count: usize) -> &mut Self {
    self.push(EditOp::Move(Direction::Backward, count))
  }

  pub fn move_right(&mut self, count: usize) -> &mut Self {
    self.push(EditOp::Move(Direction::Forward, count))
  }

  pub fn insert_line_above(&mut self) -> &mut Self {
    self.push(EditOp::InsertLineAbove)
  }

  /// Replays every op, in order, against the host.
  pub fn execute<T: EditTarget + ?Sized>(&self, target: &mut T) {
    for op in &self.ops {
      match op {
        EditOp::Insert(text) => target.insert_text(text),
        EditOp::DeleteBackward => target.delete_backward(),
        EditOp::DeleteForward => target.delete_forward(),
        EditOp::Move(Direction::Backward, count) => target.move_left(*count),
        EditOp::Move(Direction::Forward, count) => target.move_right(*count),
        EditOp::InsertLineAbove => target.insert_line_above(),
      }
    }
  }
}

impl fmt::Display for EditPlan {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.ops.is_empty() {
      return write!(f, "noop");
    }
    for (idx, op) in self.ops.iter().enumerate() {
      if idx > 0 {
        write!(f, ", ")?;
      }
      write!(f, "{op}")?;
    }
    Ok(())
  }
}

impl FromIterator<EditOp> for EditPlan {
  fn from_iter<I: IntoIterator<Item = EditOp>>(iter: I) -> Self {
    Self {
      ops: iter.into_iter().collect(),
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[derive(Default)]
  struct Recorder(Vec<String>);

  impl EditTarget for Recorder {
    fn insert_text(&mut self, text: &str) {
      self.0.push(format!("+{text}"));
    }

    fn delete_backward(&mut self) {
      self.0.push("bs".into());
    }

    fn delete_forward(&mut self) {
      self.0.push("del".into());
    }

    fn move_left(&mut self, count: usize) {
      self.0.push(format!("<{count}"));
    }

    fn move_right(&mut self, count: usize) {
      self.0.push(format!(">{count}"));
    }

    fn insert_line_above(&mut self) {
      self.0.push("above".into());
    }
  }

  #[test]
  fn execute_preserves_order() {
    let mut plan = EditPlan::new();
    plan
      .move_left(1)
      .delete_backward()
      .move_right(1)
      .insert("/>")
      .insert_line_above()
      .push(EditOp::DeleteForward);

    let mut recorder = Recorder::default();
    plan.execute(&mut recorder);
    assert_eq!(recorder.0, ["<1", "bs", ">1", "+/>", "above", "del"]);
  }

  #[test]
  fn display() {
    let plan: EditPlan = [
      EditOp::Insert("</p>".into()),
      EditOp::Move(Direction::Backward, 4),
    ]
    .into_iter()
    .collect();
    assert_eq!(plan.to_string(), "insert \"</p>\", left 4");
    assert_eq!(EditPlan::new().to_string(), "noop");
  }
}
