use crate::line_ending::LineEnding;

#[inline]
pub fn char_is_line_ending(ch: char) -> bool {
  LineEnding::from_char(ch).is_some()
}

/// Horizontal whitespace, as it appears in indentation and between
/// attributes. Line endings are not included.
#[inline]
pub fn char_is_whitespace(ch: char) -> bool {
  match ch {
      '\u{0009}' | // Character Tabulation
      '\u{0020}' | // Space
      '\u{00A0}' | // No-break Space
      '\u{180E}' | // Mongolian Vowel Separator
      '\u{202F}' | // Narrow No-break Space
      '\u{205F}' | // Medium Mathematical Space
      '\u{3000}' | // Ideographic Space
      '\u{FEFF}'   // Zero Width No-break Space
      => true,

      // En Quad through Zero Width Space.
      ch if ('\u{2000}' ..= '\u{200B}').contains(&ch) => true,

      _ => false,
    }
}

/// Characters allowed in a tag name: letters, digits and `-_.#@`.
///
/// The punctuation covers custom elements (`my-button`), namespaced or
/// dotted components (`Foo.Bar`), and template directives (`#if`, `@click`).
#[inline]
pub fn char_is_tag_name(ch: char) -> bool {
  ch.is_alphanumeric() || matches!(ch, '-' | '_' | '.' | '#' | '@')
}

/// Attribute value delimiters.
#[inline]
pub fn char_is_quote(ch: char) -> bool {
  matches!(ch, '\'' | '"')
}
