//! Lexical scanners over the text that precedes the caret.
//!
//! None of these functions parse markup. They count, split and look back
//! from the end of a string, which is all the tag-closing decisions need and
//! keeps them cheap enough to run on every keystroke. Every scanner answers
//! `None`/`false` when nothing matches; none of them can fail.
//!
//! ```
//! use closetag_core::scan::{extract_tag_name, has_odd_open_brackets};
//!
//! assert!(has_odd_open_brackets("<a><b"));
//! assert_eq!(extract_tag_name("<section class=\"x\""), Some("section"));
//! assert_eq!(extract_tag_name("<p>plain text"), None);
//! ```

use crate::chars::{
  char_is_quote,
  char_is_tag_name,
  char_is_whitespace,
};

/// True when `text` holds an odd number of `<`, i.e. the latest tag opening
/// in `text` has not been paired up yet.
pub fn has_odd_open_brackets(text: &str) -> bool {
  text.chars().filter(|&ch| ch == '<').count() % 2 == 1
}

/// True when `text` holds an odd number of quote characters (`'` and `"`
/// together), meaning an attribute value string is still open.
pub fn has_odd_quotes(text: &str) -> bool {
  text.chars().filter(|&ch| char_is_quote(ch)).count() % 2 == 1
}

/// Name of the tag being opened at the end of `text`, case preserved.
///
/// A tag opens at a `<` directly followed by tag name characters and closes
/// at the next `>` outside attribute strings and `{}` expressions, so
/// `<div v-if="a > b"` and `<a onClick={() => go()}` are still open.
/// `</div`, `<p>text` and `< x` all yield `None`.
pub fn extract_tag_name(text: &str) -> Option<&str> {
  let mut name = None;
  let mut quote: Option<char> = None;
  let mut depth = 0usize;

  for (idx, ch) in text.char_indices() {
    if name.is_none() {
      if ch == '<' {
        name = leading_tag_name(&text[idx + 1..]);
      }
      continue;
    }
    if let Some(open) = quote {
      if ch == open {
        quote = None;
      }
      continue;
    }

    match ch {
      c if char_is_quote(c) => quote = Some(c),
      '{' => depth += 1,
      '}' => depth = depth.saturating_sub(1),
      '<' if depth == 0 => {
        if let Some(next) = leading_tag_name(&text[idx + 1..]) {
          name = Some(next);
        }
      },
      '>' if depth == 0 => name = None,
      _ => {},
    }
  }

  name
}

fn leading_tag_name(text: &str) -> Option<&str> {
  let end = text
    .find(|ch: char| !char_is_tag_name(ch))
    .unwrap_or(text.len());
  if end == 0 { None } else { Some(&text[..end]) }
}

/// Lowercased first word after the last `<` in `text`.
///
/// Unlike [`extract_tag_name`] this does not validate the characters; it only
/// splits, which is what the self-closing membership test needs.
pub fn find_tag_name(text: &str) -> Option<String> {
  let current = text.rsplit('<').next()?;
  let name = current.split(char_is_whitespace).next()?;
  if name.is_empty() {
    None
  } else {
    Some(name.to_lowercase())
  }
}

/// True when the tag opened at the end of `text` is one of `tags`, compared
/// case-insensitively.
pub fn is_self_closing_tag<S: AsRef<str>>(text: &str, tags: &[S]) -> bool {
  let Some(name) = find_tag_name(text) else {
    return false;
  };

  tags
    .iter()
    .any(|tag| tag.as_ref().to_lowercase() == name)
}

/// True when a `{` appears with no `}` after it, e.g. inside `{cond && <`.
pub fn is_inside_expression_brace(text: &str) -> bool {
  match text.rfind('{') {
    Some(open) => !text[open..].contains('}'),
    None => false,
  }
}

/// True when the last `n` chars of `text` are all spaces. Texts shorter than
/// `n` never match.
pub fn ends_with_spaces(text: &str, n: usize) -> bool {
  text.chars().rev().take(n).filter(|&ch| ch == ' ').count() == n
}

/// Number of leading whitespace chars.
pub fn leading_whitespace_len(text: &str) -> usize {
  text.chars().take_while(|ch| ch.is_whitespace()).count()
}

/// The first `col` chars of `line`, clamped to the line length.
pub fn slice_to_col(line: &str, col: usize) -> &str {
  match line.char_indices().nth(col) {
    Some((idx, _)) => &line[..idx],
    None => line,
  }
}

/// The char at column `col` of `line`.
pub fn char_at_col(line: &str, col: usize) -> Option<char> {
  line.chars().nth(col)
}

#[cfg(test)]
mod test {
  use super::*;

  quickcheck::quickcheck! {
      fn appending_bracket_flips_parity(text: String) -> bool {
          has_odd_open_brackets(&format!("{text}<")) != has_odd_open_brackets(&text)
      }

      fn appending_quote_flips_parity(text: String) -> bool {
          has_odd_quotes(&format!("{text}'")) != has_odd_quotes(&text)
              && has_odd_quotes(&format!("{text}\"")) != has_odd_quotes(&text)
      }
  }

  #[test]
  fn test_odd_open_brackets() {
    assert!(has_odd_open_brackets("<div"));
    assert!(!has_odd_open_brackets("<div>"));
    assert!(has_odd_open_brackets("<a><b"));
    assert!(!has_odd_open_brackets(""));
    assert!(!has_odd_open_brackets("  class=\"x\""));
  }

  #[test]
  fn test_odd_quotes() {
    assert!(has_odd_quotes("<a href=\"http:"));
    assert!(has_odd_quotes("<a title='it"));
    assert!(!has_odd_quotes("<a href=\"x\" "));
    // Mixed quotes are counted together.
    assert!(!has_odd_quotes("<a title=\"it's\" '"));
  }

  #[test]
  fn test_extract_tag_name() {
    assert_eq!(extract_tag_name("<div"), Some("div"));
    assert_eq!(extract_tag_name("text <Span class=\"a\""), Some("Span"));
    assert_eq!(extract_tag_name("<a><my-widget"), Some("my-widget"));
    assert_eq!(extract_tag_name("<h1"), Some("h1"));
    assert_eq!(extract_tag_name("<Foo.Bar"), Some("Foo.Bar"));
    assert_eq!(extract_tag_name("<#if"), Some("#if"));
    assert_eq!(extract_tag_name("plain"), None);
    assert_eq!(extract_tag_name("<"), None);
    assert_eq!(extract_tag_name("<div></div"), None);
    assert_eq!(extract_tag_name("<p>a "), None);
    assert_eq!(extract_tag_name("< x"), None);
  }

  #[test]
  fn test_tag_name_past_attribute_angles() {
    assert_eq!(
      extract_tag_name("<button onClick={() => go()}"),
      Some("button")
    );
    assert_eq!(extract_tag_name("<div v-if=\"a > b\""), Some("div"));
    assert_eq!(extract_tag_name("<span title='x>y' "), Some("span"));
    assert_eq!(extract_tag_name("<p class={a > b ? 1 : 2}"), Some("p"));
    assert_eq!(extract_tag_name("<Foo render={<Bar />} "), Some("Foo"));
    assert_eq!(extract_tag_name("<a href=\"x\">it's <b"), Some("b"));
    assert_eq!(extract_tag_name("<button onClick={() => go()}>x"), None);
    assert_eq!(extract_tag_name("<p title=\"a<b\">text"), None);
  }

  #[test]
  fn test_self_closing_membership() {
    let tags = ["br", "img", "hr"];
    assert!(is_self_closing_tag("<br", &tags));
    assert!(is_self_closing_tag("<IMG", &tags));
    assert!(is_self_closing_tag("<img src=\"a.png\" ", &tags));
    assert!(is_self_closing_tag("<p>text<Hr", &tags));
    assert!(!is_self_closing_tag("<div", &tags));
    assert!(!is_self_closing_tag("<", &tags));

    let upper = ["IMG"];
    assert!(is_self_closing_tag("<img", &upper));
  }

  #[test]
  fn test_find_tag_name() {
    assert_eq!(find_tag_name("<Img\tsrc").as_deref(), Some("img"));
    assert_eq!(find_tag_name("<br/").as_deref(), Some("br/"));
    assert_eq!(find_tag_name("< br"), None);
  }

  #[test]
  fn test_expression_brace() {
    assert!(is_inside_expression_brace("{items.map(x => <li"));
    assert!(is_inside_expression_brace("<a b={c"));
    assert!(!is_inside_expression_brace("<a b={c} "));
    assert!(!is_inside_expression_brace("<div"));
  }

  #[test]
  fn test_spaces_and_indent() {
    assert!(ends_with_spaces("<img    ", 4));
    assert!(!ends_with_spaces("<img  x ", 2));
    assert!(!ends_with_spaces("  ", 3));
    assert!(ends_with_spaces("x", 0));
    assert_eq!(leading_whitespace_len("  \t<div"), 3);
    assert_eq!(leading_whitespace_len("<div"), 0);
  }

  #[test]
  fn test_columns() {
    assert_eq!(slice_to_col("<dív>", 3), "<dí");
    assert_eq!(slice_to_col("<a", 10), "<a");
    assert_eq!(char_at_col("<a>", 2), Some('>'));
    assert_eq!(char_at_col("<a", 2), None);
  }
}
