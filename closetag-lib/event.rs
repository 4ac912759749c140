use crate::{
  Tendril,
  position::{
    CaretRange,
    Position,
  },
};

/// One text insertion reported by the host, after it has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditEvent {
  /// The inserted text; a single typed char or a line break.
  pub text:  Tendril,
  /// Where the inserted text now sits. `range.end` is the caret.
  pub range: CaretRange,
}

impl EditEvent {
  pub fn new(text: &str, range: CaretRange) -> Self {
    Self {
      text: Tendril::from(text),
      range,
    }
  }

  /// Event for `ch` typed with the caret at `at` (before insertion).
  pub fn typed(ch: char, at: Position) -> Self {
    let mut text = Tendril::new();
    text.push(ch);
    let range = CaretRange::of_insertion(at, &text);
    Self { text, range }
  }

  /// The inserted char, if exactly one was inserted.
  pub fn single_char(&self) -> Option<char> {
    let mut chars = self.text.chars();
    match (chars.next(), chars.next()) {
      (Some(ch), None) => Some(ch),
      _ => None,
    }
  }
}
