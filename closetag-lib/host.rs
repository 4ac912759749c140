//! Capabilities the tag-closing engine needs from the editor hosting it.
//!
//! The engine reads lines, scope stacks and indentation settings through
//! these traits and writes back only through [`EditTarget`]. Nothing here
//! assumes a particular buffer representation; [`crate::document::Document`]
//! is a rope-backed implementation used by tests and the command line tool.

use std::borrow::Cow;

use thiserror::Error;

use crate::position::Position;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostError {
  #[error("row {row} is not available from the host")]
  LineOutOfBounds { row: usize },
}

/// Lazy, row-indexed access to the buffer text.
pub trait TextSource {
  /// Text of `row` without its line ending, or `None` past the last row.
  fn line(&self, row: usize) -> Option<Cow<'_, str>>;

  /// Like [`TextSource::line`], for rows an event says must exist.
  fn require_line(&self, row: usize) -> Result<Cow<'_, str>, HostError> {
    self.line(row).ok_or(HostError::LineOutOfBounds { row })
  }
}

/// Syntax classification of buffer positions.
pub trait ScopeQuery {
  /// Scope names at `pos`, ordered from the outermost scope to the
  /// innermost one.
  fn scopes_at(&self, pos: Position) -> Vec<String>;

  /// Identifier of the grammar the document is highlighted with, e.g.
  /// `text.html.basic` or `source.tsx`.
  fn grammar_scope_name(&self) -> &str;
}

/// Indentation preferences of the host.
pub trait IndentSettings {
  fn indent_width(&self) -> usize;

  fn indent_uses_tabs(&self) -> bool;
}

/// Everything the engine reads from a document.
pub trait Host: TextSource + ScopeQuery + IndentSettings {
  /// Name the document is shown under (usually its file name).
  fn display_name(&self) -> Option<&str>;
}

/// Primitive edits the host performs at the caret.
pub trait EditTarget {
  fn insert_text(&mut self, text: &str);

  fn delete_backward(&mut self);

  fn delete_forward(&mut self);

  fn move_left(&mut self, count: usize);

  fn move_right(&mut self, count: usize);

  /// Open an empty line above the caret's line and move the caret onto it.
  fn insert_line_above(&mut self);
}
