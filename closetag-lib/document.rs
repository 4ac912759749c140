//! A self-contained, rope-backed document that implements every host
//! capability the engine needs.
//!
//! Real editors plug their own buffers in through [`crate::host`]; this type
//! stands in for one in tests and in the `closetag` tool. It has a single
//! caret and reports the same scope stack for every position.
//!
//! Caret positions can be written inline with `|` for readable fixtures:
//!
//! ```
//! use closetag_lib::document::Document;
//!
//! let mut doc = Document::from_marked("<ul>|</ul>");
//! doc.type_text("\n");
//! assert_eq!(doc.to_marked(), "<ul>\n|</ul>");
//! ```

use std::borrow::Cow;

use closetag_core::line_ending::{
  LineEnding,
  NATIVE_LINE_ENDING,
  get_line_ending,
  line_without_line_ending,
};
use ropey::Rope;

use crate::{
  event::EditEvent,
  host::{
    EditTarget,
    Host,
    IndentSettings,
    ScopeQuery,
    TextSource,
  },
  position::{
    CaretRange,
    Position,
    char_idx_at_coords,
    coords_at_pos,
  },
};

pub const DEFAULT_GRAMMAR: &str = "text.html.basic";
pub const CARET_MARKER: char = '|';

#[derive(Debug, Clone)]
pub struct Document {
  text:         Rope,
  /// Char index of the caret.
  caret:        usize,
  line_ending:  LineEnding,
  display_name: Option<String>,
  grammar:      String,
  scopes:       Vec<String>,
  indent_width: usize,
  indent_tabs:  bool,
}

impl Default for Document {
  fn default() -> Self {
    Self::from_rope(Rope::new())
  }
}

impl Document {
  /// Caret at the end of `text`.
  pub fn new(text: &str) -> Self {
    Self::from_rope(Rope::from(text))
  }

  pub fn from_rope(text: Rope) -> Self {
    let line_ending = detect_line_ending(&text);
    Self {
      caret: text.len_chars(),
      text,
      line_ending,
      display_name: None,
      grammar: DEFAULT_GRAMMAR.to_string(),
      scopes: Vec::new(),
      indent_width: 2,
      indent_tabs: false,
    }
  }

  /// Caret at the first [`CARET_MARKER`], which is removed. Without a marker
  /// the caret goes to the end.
  pub fn from_marked(marked: &str) -> Self {
    match marked.split_once(CARET_MARKER) {
      Some((before, after)) => {
        let mut doc = Self::new(&format!("{before}{after}"));
        doc.caret = before.chars().count();
        doc
      },
      None => Self::new(marked),
    }
  }

  pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
    self.display_name = Some(name.into());
    self
  }

  pub fn with_grammar(mut self, grammar: impl Into<String>) -> Self {
    self.grammar = grammar.into();
    self
  }

  /// Scope stack reported at every position, outermost first.
  pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.scopes = scopes.into_iter().map(Into::into).collect();
    self
  }

  pub fn with_indent(mut self, width: usize, tabs: bool) -> Self {
    self.indent_width = width;
    self.indent_tabs = tabs;
    self
  }

  pub fn text(&self) -> &Rope {
    &self.text
  }

  pub fn line_ending(&self) -> LineEnding {
    self.line_ending
  }

  pub fn caret(&self) -> Position {
    coords_at_pos(self.text.slice(..), self.caret)
  }

  pub fn set_caret(&mut self, pos: Position) {
    self.caret = char_idx_at_coords(self.text.slice(..), pos);
  }

  /// Inserts `text` at the caret the way a user typing it would, and
  /// returns the event a host would report for it.
  pub fn type_text(&mut self, text: &str) -> EditEvent {
    let start = self.caret();
    self.insert_text(text);
    EditEvent::new(text, CaretRange::new(start, self.caret()))
  }

  /// The text with [`CARET_MARKER`] at the caret.
  pub fn to_marked(&self) -> String {
    let mut marked = self.text.slice(..self.caret).to_string();
    marked.push(CARET_MARKER);
    marked.push_str(&self.text.slice(self.caret..).to_string());
    marked
  }
}

fn detect_line_ending(text: &Rope) -> LineEnding {
  text
    .lines()
    .take(100)
    .find_map(|line| get_line_ending(&line))
    .unwrap_or(NATIVE_LINE_ENDING)
}

impl TextSource for Document {
  fn line(&self, row: usize) -> Option<Cow<'_, str>> {
    if row >= self.text.len_lines() {
      return None;
    }
    let line = line_without_line_ending(self.text.slice(..), row);
    Some(Cow::from(line))
  }
}

impl ScopeQuery for Document {
  fn scopes_at(&self, _pos: Position) -> Vec<String> {
    self.scopes.clone()
  }

  fn grammar_scope_name(&self) -> &str {
    &self.grammar
  }
}

impl IndentSettings for Document {
  fn indent_width(&self) -> usize {
    self.indent_width
  }

  fn indent_uses_tabs(&self) -> bool {
    self.indent_tabs
  }
}

impl Host for Document {
  fn display_name(&self) -> Option<&str> {
    self.display_name.as_deref()
  }
}

impl EditTarget for Document {
  fn insert_text(&mut self, text: &str) {
    self.text.insert(self.caret, text);
    self.caret += text.chars().count();
  }

  fn delete_backward(&mut self) {
    if self.caret == 0 {
      return;
    }
    let from = if self.caret >= 2 && self.text.slice(self.caret - 2..self.caret) == "\r\n" {
      self.caret - 2
    } else {
      self.caret - 1
    };
    self.text.remove(from..self.caret);
    self.caret = from;
  }

  fn delete_forward(&mut self) {
    let len = self.text.len_chars();
    if self.caret >= len {
      return;
    }
    let to = if self.caret + 2 <= len && self.text.slice(self.caret..self.caret + 2) == "\r\n" {
      self.caret + 2
    } else {
      self.caret + 1
    };
    self.text.remove(self.caret..to);
  }

  fn move_left(&mut self, count: usize) {
    self.caret = self.caret.saturating_sub(count);
  }

  fn move_right(&mut self, count: usize) {
    self.caret = (self.caret + count).min(self.text.len_chars());
  }

  /// The new line copies the indentation of the caret's line.
  fn insert_line_above(&mut self) {
    let row = self.text.char_to_line(self.caret);
    let line_start = self.text.line_to_char(row);
    let indent: String = self
      .text
      .line(row)
      .chars()
      .take_while(|&ch| ch == ' ' || ch == '\t')
      .collect();

    let inserted = format!("{indent}{}", self.line_ending.as_str());
    self.text.insert(line_start, &inserted);
    self.caret = line_start + indent.chars().count();
  }
}
