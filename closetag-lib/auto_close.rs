//! Tag auto-closing.
//!
//! [`hook`] is called once per text insertion, after the host has applied
//! it. It looks at the text left of the inserted char (pulling in preceding
//! lines while the tag being typed is still open) and returns the edits that
//! complete what the user started:
//!
//! | typed | before            | after              |
//! |-------|-------------------|--------------------|
//! | `>`   | `<div\|`          | `<div>\|</div>`    |
//! | `>`   | `<br\|`           | `<br />\|`         |
//! | `/`   | `<input x="1" \|` | `<input x="1" />\|`|
//! | `!`   | `<\|`             | `<!-- \| -->`      |
//! | `\n`  | `<ul>\|</ul>`     | blank line between |
//!
//! Nothing happens outside markup (see [`crate::scope`]), in documents whose
//! file type is disabled, or when the typed char sits inside an unclosed `{`
//! expression.
//!
//! # Indentation of wrapped tags
//!
//! When a tag's attributes were broken over several lines, the closing `>`
//! or `/` usually lands on a line indented one step deeper than the tag
//! itself. If the line ends with exactly the tag's indentation worth of
//! spaces, one of them is removed so the delimiter ends up one column left:
//!
//! ```text
//!   <img            <img
//!     src="a"         src="a"
//!     |          ->  />|
//! ```

use closetag_core::{
  line_ending::str_is_line_ending,
  scan,
};
use thiserror::Error;

use crate::{
  config::Config,
  context::{
    TextContext,
    accumulate_text_before,
  },
  edit::EditPlan,
  event::EditEvent,
  host::{
    Host,
    HostError,
  },
  indent,
  position::Position,
  scope::is_within_markup,
};

/// Inserted after `<!`. The caret is left between the two spaces.
pub const COMMENT_COMPLETION: &str = "--  -->";
const COMMENT_TAIL_LEN: usize = 4;

pub type Result<T> = std::result::Result<T, AutoCloseError>;

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum AutoCloseError {
  #[error(transparent)]
  Host(#[from] HostError),
}

/// Chars that can complete something on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
  /// `>` closing an opening tag.
  CloseAngle,
  /// `/` typed inside an opening tag.
  Slash,
  /// `!` right after `<`.
  Bang,
}

impl Trigger {
  pub fn from_char(ch: char) -> Option<Self> {
    match ch {
      '>' => Some(Self::CloseAngle),
      '/' => Some(Self::Slash),
      '!' => Some(Self::Bang),
      _ => None,
    }
  }
}

/// Decides what to do about `event`. `extension` is the active document's
/// file extension, if it has one.
pub fn hook<H: Host + ?Sized>(
  host: &H,
  config: &Config,
  extension: Option<&str>,
  event: &EditEvent,
) -> Result<EditPlan> {
  let range = event.range;

  if !is_within_markup(host, range.start) {
    tracing::trace!("{:?} is outside markup", range.start);
    return Ok(EditPlan::new());
  }
  if !config.is_file_type_enabled(extension) {
    tracing::trace!("file type {:?} is disabled", extension);
    return Ok(EditPlan::new());
  }

  if str_is_line_ending(&event.text) {
    let plan = indent::plan_newline(host, range)?;
    tracing::debug!("newline at {:?}: {}", range.end, plan);
    return Ok(plan);
  }

  let Some(trigger) = event.single_char().and_then(Trigger::from_char) else {
    return Ok(EditPlan::new());
  };

  let caret = range.end;
  let line = host.require_line(caret.row)?;
  let line_left = scan::slice_to_col(&line, caret.col.saturating_sub(1));
  let cx = accumulate_text_before(host, line_left, caret.row)?;

  let plan = match trigger {
    Trigger::Bang => complete_comment(&cx, caret),
    Trigger::CloseAngle => close_angle(config, &cx, caret),
    Trigger::Slash => close_slash(config, &cx, &line, caret),
  };

  tracing::debug!("{:?} at {:?}: {}", trigger, caret, plan);
  Ok(plan)
}

fn complete_comment(cx: &TextContext, caret: Position) -> EditPlan {
  let mut plan = EditPlan::new();
  // A `<!` on the first row is most likely a doctype.
  if caret.row == 0 {
    return plan;
  }
  if cx.text_before.ends_with('<') {
    plan
      .insert(COMMENT_COMPLETION)
      .move_left(COMMENT_TAIL_LEN);
  }
  plan
}

/// Tag name of the opening tag being typed, unless the caret is inside an
/// unclosed `{` expression.
fn open_tag_name(cx: &TextContext) -> Option<&str> {
  let name = scan::extract_tag_name(&cx.text_before)?;
  if scan::is_inside_expression_brace(&cx.text_before) {
    return None;
  }
  Some(name)
}

fn close_angle(config: &Config, cx: &TextContext, caret: Position) -> EditPlan {
  let mut plan = EditPlan::new();
  let Some(name) = open_tag_name(cx) else {
    return plan;
  };
  // `<br/>` typed by hand.
  if cx.text_before.trim_end().ends_with('/') {
    return plan;
  }

  correct_indent(&mut plan, cx, caret);

  if config.is_self_close_tag(&cx.text_before) {
    plan.delete_backward();
    close_self_tag(&mut plan, config, cx);
    return plan;
  }

  let closing = format!("</{name}>");
  plan
    .insert(&closing)
    .move_left(name.chars().count() + 3);
  plan
}

fn close_slash(config: &Config, cx: &TextContext, line: &str, caret: Position) -> EditPlan {
  let mut plan = EditPlan::new();
  if !config.slash_trigger_auto_close || open_tag_name(cx).is_none() {
    return plan;
  }

  correct_indent(&mut plan, cx, caret);

  if scan::char_at_col(line, caret.col) == Some('>') || scan::has_odd_quotes(&cx.text_before) {
    return plan;
  }

  plan.delete_backward();
  close_self_tag(&mut plan, config, cx);
  plan
}

/// Writes the self-closing delimiter; the typed char has already been
/// removed.
fn close_self_tag(plan: &mut EditPlan, config: &Config, cx: &TextContext) {
  let close_part = config.close_part();

  if cx.text_before.ends_with(' ') {
    plan.insert(close_part);
  } else if config.insert_whitespace_on_close {
    plan.insert(&format!(" {close_part}"));
  } else {
    plan.insert(&format!("{close_part} ")).delete_backward();
  }
}

fn correct_indent(plan: &mut EditPlan, cx: &TextContext, caret: Position) {
  let indent = cx.leading_indent_size;
  if indent == 0 || !scan::ends_with_spaces(&cx.text_before, indent) {
    return;
  }
  // Already one column left of the tag's indentation.
  if caret.col == indent + 1 {
    return;
  }
  // At column 1 the backward delete would join the line onto the previous one.
  if caret.col == 1 {
    return;
  }

  plan
    .move_left(1)
    .delete_backward()
    .move_right(1);
}
