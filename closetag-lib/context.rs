//! Recovers the text of the tag being typed, even when its attributes were
//! spread over several lines.
//!
//! Starting from the part of the current line left of the typed char, whole
//! preceding lines are prepended until the text holds an odd number of `<`
//! (the opening of the current tag has been reached) or the first row has
//! been consumed. Lines are joined as-is, without separators.

use closetag_core::scan;

use crate::host::{
  HostError,
  TextSource,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextContext {
  /// Text before the typed char, back to the start of the current tag.
  pub text_before:          String,
  /// True if at least one preceding line was pulled in.
  pub spans_multiple_lines: bool,
  /// Leading whitespace of `text_before`, only counted when
  /// `spans_multiple_lines`.
  pub leading_indent_size:  usize,
}

pub fn accumulate_text_before<T: TextSource + ?Sized>(
  source: &T,
  line_left: &str,
  mut row: usize,
) -> Result<TextContext, HostError> {
  // Parity of the joined text is the xor of each piece's parity.
  let mut odd = scan::has_odd_open_brackets(line_left);
  let mut preceding = Vec::new();

  while !odd && row > 0 {
    row -= 1;
    let line = source.require_line(row)?;
    odd ^= scan::has_odd_open_brackets(&line);
    preceding.push(line);
  }

  let spans_multiple_lines = !preceding.is_empty();
  let mut text_before = String::new();
  for line in preceding.iter().rev() {
    text_before.push_str(line);
  }
  text_before.push_str(line_left);

  let leading_indent_size = if spans_multiple_lines {
    scan::leading_whitespace_len(&text_before)
  } else {
    0
  };

  tracing::trace!(
    "text before caret: {:?} (multi-line: {}, indent: {})",
    text_before,
    spans_multiple_lines,
    leading_indent_size
  );

  Ok(TextContext {
    text_before,
    spans_multiple_lines,
    leading_indent_size,
  })
}
