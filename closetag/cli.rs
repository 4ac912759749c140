use std::path::PathBuf;

use anyhow::{
  Context,
  Result,
  anyhow,
};
use clap::{
  ArgAction,
  Parser,
  Subcommand,
};
use closetag_lib::position::Position;
use serde_json::Value;

#[derive(Clone, Debug)]
pub struct CliOptions {
  pub verbosity:   u8,
  pub log_file:    Option<PathBuf>,
  pub config_file: Option<PathBuf>,
  pub overrides:   Vec<(String, Value)>,
  pub command:     Command,
}

#[derive(Clone, Debug)]
pub enum Command {
  Type(TypeOptions),
  Schema,
}

#[derive(Clone, Debug)]
pub struct TypeOptions {
  pub file:         PathBuf,
  pub keys:         String,
  /// Caret before typing; end of file when absent.
  pub at:           Option<Position>,
  pub display_name: Option<String>,
  pub grammar:      Option<String>,
  pub scopes:       Vec<String>,
  pub indent_width: usize,
  pub hard_tabs:    bool,
  pub in_place:     bool,
  pub show_caret:   bool,
}

impl CliOptions {
  pub fn parse() -> Result<Self> {
    let raw = RawCli::parse();
    raw.try_into()
  }
}

#[derive(Parser, Debug)]
#[command(name = "closetag", about, version, long_about = None)]
struct RawCli {
  /// Increase logging verbosity (repeat for more detail)
  #[arg(short = 'v', action = ArgAction::Count, global = true)]
  verbosity: u8,

  /// Save logs to a specific file
  #[arg(long = "log", value_name = "FILE", global = true)]
  log_file: Option<PathBuf>,

  /// Load configuration from a specific file
  #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
  config_file: Option<PathBuf>,

  /// Override a setting, e.g. `--set selfCloseTags='["br","input"]'`
  #[arg(long = "set", value_name = "KEY=JSON", global = true)]
  overrides: Vec<String>,

  #[command(subcommand)]
  command: RawCommand,
}

#[derive(Subcommand, Debug)]
enum RawCommand {
  /// Type keys into a file and print the result
  Type {
    /// File to edit
    file: PathBuf,

    /// Keys to type, one insertion per char (`\n` and `\t` are unescaped)
    keys: String,

    /// Caret position before typing, as row[:col] (1-based)
    #[arg(short = 'a', long = "at", value_name = "ROW[:COL]")]
    at: Option<String>,

    /// Name the document is shown under; defaults to the file name
    #[arg(long = "name", value_name = "NAME")]
    display_name: Option<String>,

    /// Grammar scope name, e.g. `source.tsx`
    #[arg(short = 'g', long = "grammar", value_name = "SCOPE")]
    grammar: Option<String>,

    /// Scope reported at the caret, outermost first (repeatable)
    #[arg(short = 's', long = "scope", value_name = "SCOPE")]
    scopes: Vec<String>,

    /// Indentation width
    #[arg(long = "indent-width", value_name = "N", default_value_t = 2)]
    indent_width: usize,

    /// Indent with hard tabs
    #[arg(long = "hard-tabs")]
    hard_tabs: bool,

    /// Write the result back to the file instead of printing it
    #[arg(short = 'i', long = "in-place")]
    in_place: bool,

    /// Mark the final caret position with `|`
    #[arg(long = "show-caret", conflicts_with = "in_place")]
    show_caret: bool,
  },
  /// Print the settings schema as JSON
  Schema,
}

impl TryFrom<RawCli> for CliOptions {
  type Error = anyhow::Error;

  fn try_from(raw: RawCli) -> Result<Self> {
    let overrides = raw
      .overrides
      .iter()
      .map(|entry| parse_override(entry))
      .collect::<Result<Vec<_>>>()?;

    let command = match raw.command {
      RawCommand::Schema => Command::Schema,
      RawCommand::Type {
        file,
        keys,
        at,
        display_name,
        grammar,
        scopes,
        indent_width,
        hard_tabs,
        in_place,
        show_caret,
      } => {
        let at = at
          .as_deref()
          .map(|at| parse_position(at).ok_or_else(|| anyhow!("invalid position '{at}'")))
          .transpose()?;
        Command::Type(TypeOptions {
          file,
          keys: unescape_keys(&keys),
          at,
          display_name,
          grammar,
          scopes,
          indent_width,
          hard_tabs,
          in_place,
          show_caret,
        })
      },
    };

    Ok(Self {
      verbosity: raw.verbosity,
      log_file: raw.log_file,
      config_file: raw.config_file,
      overrides,
      command,
    })
  }
}

/// `key=json`. A value that is not valid JSON is taken as a plain string.
fn parse_override(entry: &str) -> Result<(String, Value)> {
  let (key, value) = entry
    .split_once('=')
    .with_context(|| format!("expected KEY=VALUE, got '{entry}'"))?;
  let value =
    serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
  Ok((key.trim().to_string(), value))
}

/// `row[:col]`, 1-based.
fn parse_position(value: &str) -> Option<Position> {
  let mut parts = value.trim_end_matches(':').splitn(2, ':');
  let row: usize = parts.next()?.parse().ok()?;
  let col: usize = match parts.next() {
    Some(col) => col.parse().ok()?,
    None => 1,
  };
  Some(Position::new(row.saturating_sub(1), col.saturating_sub(1)))
}

fn unescape_keys(keys: &str) -> String {
  let mut out = String::with_capacity(keys.len());
  let mut chars = keys.chars();
  while let Some(ch) = chars.next() {
    if ch != '\\' {
      out.push(ch);
      continue;
    }
    match chars.next() {
      Some('n') => out.push('\n'),
      Some('t') => out.push('\t'),
      Some(other) => out.push(other),
      None => out.push('\\'),
    }
  }
  out
}

#[cfg(test)]
mod test {
  use super::*;

  fn parse(args: &[&str]) -> CliOptions {
    RawCli::try_parse_from(args).unwrap().try_into().unwrap()
  }

  #[test]
  fn type_command() {
    let options = parse(&[
      "closetag",
      "-vv",
      "type",
      "index.html",
      "<p>",
      "--at",
      "3:5",
      "--scope",
      "text.html.basic",
    ]);
    assert_eq!(options.verbosity, 2);
    let Command::Type(typed) = options.command else {
      panic!("expected a type command");
    };
    assert_eq!(typed.file, PathBuf::from("index.html"));
    assert_eq!(typed.keys, "<p>");
    assert_eq!(typed.at, Some(Position::new(2, 4)));
    assert_eq!(typed.scopes, ["text.html.basic"]);
    assert_eq!(typed.indent_width, 2);
    assert!(!typed.hard_tabs);
  }

  #[test]
  fn overrides_are_json() {
    let options = parse(&[
      "closetag",
      "--set",
      "selfCloseTags=[\"br\",\"input\"]",
      "--set",
      "insertWhitespaceOnClose=false",
      "schema",
    ]);
    assert!(matches!(options.command, Command::Schema));
    assert_eq!(
      options.overrides,
      [
        (
          "selfCloseTags".to_string(),
          serde_json::json!(["br", "input"])
        ),
        ("insertWhitespaceOnClose".to_string(), Value::Bool(false)),
      ]
    );
  }

  #[test]
  fn bad_input_is_rejected() {
    assert!(parse_override("selfCloseTags").is_err());
    assert_eq!(
      parse_override("enabledFileTypes=html").unwrap().1,
      Value::String("html".into())
    );
    assert!(
      RawCli::try_parse_from(["closetag", "type", "a.html", ">", "--at", "x:1"])
        .map_err(anyhow::Error::from)
        .and_then(CliOptions::try_from)
        .is_err()
    );
  }

  #[test]
  fn positions_and_keys() {
    assert_eq!(parse_position("1"), Some(Position::new(0, 0)));
    assert_eq!(parse_position("2:1:"), Some(Position::new(1, 0)));
    assert_eq!(parse_position("a"), None);
    assert_eq!(unescape_keys("<div>\\n"), "<div>\n");
    assert_eq!(unescape_keys("a\\\\b\\"), "a\\b\\");
  }
}
