//! Tag-closing settings.
//!
//! [`Config`] is a plain value owned by whoever drives the engine (normally a
//! [`crate::session::Session`]). It is read on every keystroke and changed only
//! through [`Config::set`], which checks the shape of the incoming value so a
//! bad settings notification can never leave a half-typed field behind.
//!
//! Files use kebab-case keys:
//!
//! ```toml
//! enabled-file-types = ["html", "vue"]
//! self-close-tags = ["br", "img", "hr", "input"]
//! insert-whitespace-on-close = false
//! ```
//!
//! Live updates from a host use the camelCase setting names
//! (`selfCloseTags`, `slashTriggerAutoClose`, ...) with JSON values.

use std::{
  fmt,
  str::FromStr,
};

use closetag_core::scan;
use serde::{
  Deserialize,
  Serialize,
};
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_FILE_TYPES: &[&str] = &["html", "xml", "jsx", "tsx", "vue"];
pub const DEFAULT_SELF_CLOSE_TAGS: &[&str] = &["br", "img", "hr"];

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("unknown setting `{0}`")]
  UnknownKey(String),
  #[error("invalid value for `{key}`: expected {expected}, got {found}")]
  InvalidValue {
    key:      ConfigKey,
    expected: &'static str,
    found:    &'static str,
  },
  #[error("failed to parse configuration: {0}")]
  Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
  /// File extensions the engine runs in.
  pub enabled_file_types:          Vec<String>,
  /// Void elements closed in place instead of getting a closing tag.
  pub self_close_tags:             Vec<String>,
  /// Close void elements with `/>` rather than `>`.
  pub add_slash_to_self_close_tag: bool,
  /// Typing `/` inside an open tag closes it in place.
  pub slash_trigger_auto_close:    bool,
  /// Put a space before the self-closing delimiter.
  pub insert_whitespace_on_close:  bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      enabled_file_types:          to_owned_list(DEFAULT_FILE_TYPES),
      self_close_tags:             to_owned_list(DEFAULT_SELF_CLOSE_TAGS),
      add_slash_to_self_close_tag: true,
      slash_trigger_auto_close:    true,
      insert_whitespace_on_close:  true,
    }
  }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
  items.iter().map(|item| item.to_string()).collect()
}

/// The shape a setting's value must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
  /// Array of strings.
  List,
  Boolean,
}

impl ValueKind {
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::List => "array",
      Self::Boolean => "boolean",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
  EnabledFileTypes,
  SelfCloseTags,
  AddSlashToSelfCloseTag,
  SlashTriggerAutoClose,
  InsertWhitespaceOnClose,
}

impl ConfigKey {
  pub const ALL: [ConfigKey; 5] = [
    ConfigKey::EnabledFileTypes,
    ConfigKey::SelfCloseTags,
    ConfigKey::AddSlashToSelfCloseTag,
    ConfigKey::SlashTriggerAutoClose,
    ConfigKey::InsertWhitespaceOnClose,
  ];

  /// Setting name as hosts send it.
  pub const fn name(&self) -> &'static str {
    match self {
      Self::EnabledFileTypes => "enabledFileTypes",
      Self::SelfCloseTags => "selfCloseTags",
      Self::AddSlashToSelfCloseTag => "addSlashToSelfCloseTag",
      Self::SlashTriggerAutoClose => "slashTriggerAutoClose",
      Self::InsertWhitespaceOnClose => "insertWhitespaceOnClose",
    }
  }

  /// Setting name as written in configuration files.
  pub const fn file_name(&self) -> &'static str {
    match self {
      Self::EnabledFileTypes => "enabled-file-types",
      Self::SelfCloseTags => "self-close-tags",
      Self::AddSlashToSelfCloseTag => "add-slash-to-self-close-tag",
      Self::SlashTriggerAutoClose => "slash-trigger-auto-close",
      Self::InsertWhitespaceOnClose => "insert-whitespace-on-close",
    }
  }

  pub const fn kind(&self) -> ValueKind {
    match self {
      Self::EnabledFileTypes | Self::SelfCloseTags => ValueKind::List,
      _ => ValueKind::Boolean,
    }
  }

  pub fn description(&self) -> String {
    match self {
      Self::EnabledFileTypes => {
        format!(
          "Enable autoclose in these file types, default file types are {}. (comma split)",
          quoted_list(DEFAULT_FILE_TYPES)
        )
      },
      Self::SelfCloseTags => {
        "Self-close tags, will not add the right part when type `>`. (comma split)".to_string()
      },
      Self::AddSlashToSelfCloseTag => {
        "Automatically add a `/` when close the self-close tag".to_string()
      },
      Self::SlashTriggerAutoClose => "Trigger auto close when type a `/`".to_string(),
      Self::InsertWhitespaceOnClose => {
        "Add a whitespace before `>` when close the self-close tag".to_string()
      },
    }
  }
}

impl fmt::Display for ConfigKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for ConfigKey {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self> {
    ConfigKey::ALL
      .into_iter()
      .find(|key| key.name() == s || key.file_name() == s)
      .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
  }
}

/// `` `a`, `b` and `c` ``
fn quoted_list(items: &[&str]) -> String {
  match items {
    [] => String::new(),
    [only] => format!("`{only}`"),
    [head @ .., last] => {
      let head = head
        .iter()
        .map(|item| format!("`{item}`"))
        .collect::<Vec<_>>()
        .join(", ");
      format!("{head} and `{last}`")
    },
  }
}

/// One entry of the settings schema a host can render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingSchema {
  pub key:         &'static str,
  #[serde(rename = "type")]
  pub kind:        &'static str,
  pub default:     Value,
  pub description: String,
}

/// The settings schema, in declaration order.
pub fn schema() -> Vec<SettingSchema> {
  let defaults = Config::default();
  ConfigKey::ALL
    .into_iter()
    .map(|key| {
      SettingSchema {
        key:         key.name(),
        kind:        key.kind().as_str(),
        default:     defaults.get(key),
        description: key.description(),
      }
    })
    .collect()
}

fn json_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(items) if items.iter().all(Value::is_string) => "array",
    Value::Array(_) => "array with non-string items",
    Value::Object(_) => "object",
  }
}

impl Config {
  pub fn from_toml(source: &str) -> Result<Self> {
    Ok(toml::from_str(source)?)
  }

  pub fn get(&self, key: ConfigKey) -> Value {
    match key {
      ConfigKey::EnabledFileTypes => Value::from(self.enabled_file_types.clone()),
      ConfigKey::SelfCloseTags => Value::from(self.self_close_tags.clone()),
      ConfigKey::AddSlashToSelfCloseTag => Value::Bool(self.add_slash_to_self_close_tag),
      ConfigKey::SlashTriggerAutoClose => Value::Bool(self.slash_trigger_auto_close),
      ConfigKey::InsertWhitespaceOnClose => Value::Bool(self.insert_whitespace_on_close),
    }
  }

  /// Replace one setting. Values of the wrong shape are rejected and the
  /// previous value stays in place.
  pub fn set(&mut self, key: ConfigKey, value: Value) -> Result<()> {
    let invalid = |value: &Value| {
      ConfigError::InvalidValue {
        key,
        expected: key.kind().as_str(),
        found: json_kind(value),
      }
    };

    match key.kind() {
      ValueKind::List => {
        let items = match &value {
          Value::Array(items) => {
            items
              .iter()
              .map(|item| item.as_str().map(str::to_string))
              .collect::<Option<Vec<_>>>()
          },
          _ => None,
        };
        let Some(items) = items else {
          tracing::warn!("rejected `{key}` update: {value}");
          return Err(invalid(&value));
        };
        match key {
          ConfigKey::EnabledFileTypes => self.enabled_file_types = items,
          _ => self.self_close_tags = items,
        }
      },
      ValueKind::Boolean => {
        let Some(flag) = value.as_bool() else {
          tracing::warn!("rejected `{key}` update: {value}");
          return Err(invalid(&value));
        };
        match key {
          ConfigKey::AddSlashToSelfCloseTag => self.add_slash_to_self_close_tag = flag,
          ConfigKey::SlashTriggerAutoClose => self.slash_trigger_auto_close = flag,
          _ => self.insert_whitespace_on_close = flag,
        }
      },
    }

    tracing::debug!("setting `{key}` updated");
    Ok(())
  }

  /// [`Config::set`] keyed by setting name.
  pub fn set_value(&mut self, key: &str, value: Value) -> Result<()> {
    self.set(key.parse()?, value)
  }

  /// Whether the engine runs for a document with this extension. Documents
  /// whose extension cannot be determined are not filtered.
  pub fn is_file_type_enabled(&self, extension: Option<&str>) -> bool {
    match extension {
      Some(ext) => self.enabled_file_types.iter().any(|ty| ty == ext),
      None => true,
    }
  }

  pub fn is_self_close_tag(&self, text_before: &str) -> bool {
    scan::is_self_closing_tag(text_before, &self.self_close_tags)
  }

  /// Delimiter written when a void element is closed.
  pub fn close_part(&self) -> &'static str {
    if self.add_slash_to_self_close_tag {
      "/>"
    } else {
      ">"
    }
  }
}
