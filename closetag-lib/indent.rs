//! Indentation after a line break typed inside markup.
//!
//! Two situations are recognised by looking at the line the break was typed
//! on (from its last `<`) and the line after it:
//!
//! ```text
//! <div>|</div>    ->   <div>          <img src="a"|   ->   <img src="a"
//!                        |                                   |alt="b">
//!                      </div>
//! ```
//!
//! An empty element pair gets a fresh line between the tags; a tag whose
//! attribute list continues past the break gets its continuation line
//! indented. The step inserted here is relative: how far the tag line itself
//! is indented stays up to the host.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
  edit::EditPlan,
  host::{
    HostError,
    IndentSettings,
    TextSource,
  },
  position::CaretRange,
};

/// `<tag ...>` followed, after whitespace only, by `</tag>`. The regex crate
/// has no backreferences, so the two names are compared after matching.
static EMPTY_PAIR: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^.*<([a-zA-Z0-9_-]+)(\s.+)?>\n\s*</([a-zA-Z0-9_-]+)>")
    .expect("empty pair pattern is valid")
});

/// `<tag` with attributes running past the break and no `>` yet.
static DANGLING_ATTRS: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^.*<([a-zA-Z0-9_-]+)[^>]*\n\s*[^>]*$").expect("attribute pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewlineShape {
  /// Break typed between `<tag>` and `</tag>`.
  EmptyPair,
  /// Break typed inside an unterminated opening tag.
  DanglingAttributes,
}

/// One indentation step: a tab per configured column with hard tabs,
/// nothing with soft tabs.
pub fn indent_string<S: IndentSettings + ?Sized>(settings: &S) -> String {
  let unit = if settings.indent_uses_tabs() { "\t" } else { "" };
  unit.repeat(settings.indent_width())
}

/// Classifies the text around a break. `before` is the line the break was
/// typed on, `after` the line the caret moved to.
pub fn classify(before: &str, after: &str) -> Option<NewlineShape> {
  let start = before.rfind('<')?;
  let probe = format!("{}\n{}", &before[start..], after);

  if let Some(caps) = EMPTY_PAIR.captures(&probe)
    && caps.get(1).map(|m| m.as_str()) == caps.get(3).map(|m| m.as_str())
  {
    return Some(NewlineShape::EmptyPair);
  }

  if DANGLING_ATTRS.is_match(&probe) {
    return Some(NewlineShape::DanglingAttributes);
  }

  None
}

/// Edits for a line break covering `range`.
pub fn plan_newline<H>(host: &H, range: CaretRange) -> Result<EditPlan, HostError>
where
  H: TextSource + IndentSettings + ?Sized,
{
  let before = host.require_line(range.start.row)?;
  let after = host.require_line(range.end.row)?;
  let mut plan = EditPlan::new();

  let Some(shape) = classify(&before, &after) else {
    return Ok(plan);
  };

  if shape == NewlineShape::EmptyPair {
    plan.insert_line_above();
  }
  let indent = indent_string(host);
  if !indent.is_empty() {
    plan.insert(&indent);
  }

  tracing::trace!("newline in {:?}: {}", shape, plan);
  Ok(plan)
}

#[cfg(test)]
mod test {
  use std::borrow::Cow;

  use super::*;
  use crate::{
    edit::EditOp,
    position::Position,
  };

  struct Buffer {
    lines: Vec<&'static str>,
    tabs:  bool,
    width: usize,
  }

  impl TextSource for Buffer {
    fn line(&self, row: usize) -> Option<Cow<'_, str>> {
      self.lines.get(row).map(|line| Cow::Borrowed(*line))
    }
  }

  impl IndentSettings for Buffer {
    fn indent_width(&self) -> usize {
      self.width
    }

    fn indent_uses_tabs(&self) -> bool {
      self.tabs
    }
  }

  fn break_after_row(row: usize, col: usize) -> CaretRange {
    CaretRange::new(Position::new(row, col), Position::new(row + 1, 0))
  }

  #[test]
  fn classify_shapes() {
    assert_eq!(classify("<div>", "</div>"), Some(NewlineShape::EmptyPair));
    assert_eq!(
      classify("  <ul class=\"nav\">", "  </ul>"),
      Some(NewlineShape::EmptyPair)
    );
    assert_eq!(
      classify("<p><span>", "</span></p>"),
      Some(NewlineShape::EmptyPair)
    );
    assert_eq!(
      classify("<img src=\"a\"", ""),
      Some(NewlineShape::DanglingAttributes)
    );
    assert_eq!(
      classify("<input type=\"text\"", "  name=\"q\" />"),
      None
    );
    assert_eq!(classify("<div>", "</span>"), None);
    assert_eq!(classify("<div>text", "</div>"), None);
    assert_eq!(classify("plain", "text"), None);
  }

  #[test]
  fn indent_string_follows_tab_settings() {
    let hard = Buffer {
      lines: vec![],
      tabs:  true,
      width: 2,
    };
    assert_eq!(indent_string(&hard), "\t\t");

    let soft = Buffer {
      lines: vec![],
      tabs:  false,
      width: 4,
    };
    assert_eq!(indent_string(&soft), "");
  }

  #[test]
  fn empty_pair_opens_a_line() {
    let buffer = Buffer {
      lines: vec!["<div>", "</div>"],
      tabs:  true,
      width: 1,
    };
    let plan = plan_newline(&buffer, break_after_row(0, 5)).unwrap();
    assert_eq!(
      plan.ops(),
      &[EditOp::InsertLineAbove, EditOp::Insert("\t".into())]
    );

    let buffer = Buffer {
      tabs: false,
      ..buffer
    };
    let plan = plan_newline(&buffer, break_after_row(0, 5)).unwrap();
    assert_eq!(plan.ops(), &[EditOp::InsertLineAbove]);
  }

  #[test]
  fn dangling_attributes_indent_current_line() {
    let buffer = Buffer {
      lines: vec!["<img src=\"a.png\"", ""],
      tabs:  true,
      width: 2,
    };
    let plan = plan_newline(&buffer, break_after_row(0, 16)).unwrap();
    assert_eq!(plan.ops(), &[EditOp::Insert("\t\t".into())]);
  }

  #[test]
  fn unrelated_breaks_do_nothing() {
    let buffer = Buffer {
      lines: vec!["<p>hello</p>", ""],
      tabs:  true,
      width: 2,
    };
    assert!(
      plan_newline(&buffer, break_after_row(0, 12))
        .unwrap()
        .is_empty()
    );
    assert_eq!(
      plan_newline(&buffer, break_after_row(3, 0)),
      Err(HostError::LineOutOfBounds { row: 3 })
    );
  }
}
