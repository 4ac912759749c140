use closetag_core::{
  chars::char_is_line_ending,
  line_ending::line_end_char_index,
};
use ropey::RopeSlice;

/// This is a single point in a text buffer.
/// 0-indexed as all things should be. Columns count chars.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
  pub row: usize,
  pub col: usize,
}

impl Position {
  pub fn new(row: usize, col: usize) -> Self {
    Self { row, col }
  }

  pub const fn zero() -> Self {
    Self { row: 0, col: 0 }
  }

  /// The position reached after writing `text` starting at `self`.
  pub fn traverse(self, text: impl AsRef<str>) -> Self {
    let Self { mut row, mut col } = self;
    let mut chars = text.as_ref().chars().peekable();

    while let Some(ch) = chars.next() {
      if char_is_line_ending(ch) && !(ch == '\r' && chars.peek() == Some(&'\n')) {
        row += 1;
        col = 0;
      } else {
        col += 1;
      }
    }

    Self { row, col }
  }
}

impl From<(usize, usize)> for Position {
  fn from(value: (usize, usize)) -> Self {
    Position::new(value.0, value.1)
  }
}

/// The span a freshly inserted piece of text occupies. `end` is where the
/// caret sits after the insertion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CaretRange {
  pub start: Position,
  pub end:   Position,
}

impl CaretRange {
  pub fn new(start: Position, end: Position) -> Self {
    Self { start, end }
  }

  /// Range covered by `text` when inserted at `start`.
  pub fn of_insertion(start: Position, text: &str) -> Self {
    Self {
      start,
      end: start.traverse(text),
    }
  }
}

/// Converts a character index into a `Position`.
pub fn coords_at_pos(text: RopeSlice, pos: usize) -> Position {
  let pos = pos.min(text.len_chars());
  let line = text.char_to_line(pos);
  let line_start = text.line_to_char(line);

  Position::new(line, pos - line_start)
}

/// Convert a `(row, column)` to a character index.
///
/// If `row` exceeds the number of lines, the last line is used.
/// If `col` exceeds the length of the line, the line end is used.
pub fn char_idx_at_coords(text: RopeSlice, coords: Position) -> usize {
  let line = coords.row.min(text.len_lines().saturating_sub(1));
  let line_start = text.line_to_char(line);
  let line_end = line_end_char_index(&text, line);

  (line_start + coords.col).min(line_end)
}
