//! The owning context that ties configuration, the active document and the
//! decision engine together.
//!
//! A [`Session`] holds at most one [`Subscription`]: the document whose
//! insertions are being watched, plus the file extension derived from its
//! display name. Switching documents releases the previous subscription
//! before the new one is installed, so insertions are never routed to a stale
//! document and never handled twice.
//!
//! ```
//! use closetag_lib::{document::Document, session::Session};
//!
//! let doc = Document::from_marked("<p|").with_display_name("index.html");
//! let mut session = Session::activate(Default::default(), Some(doc));
//! session.type_text(">").unwrap();
//! assert_eq!(session.document().unwrap().to_marked(), "<p>|</p>");
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::{
  auto_close::{
    self,
    AutoCloseError,
  },
  config::{
    Config,
    ConfigError,
  },
  document::Document,
  edit::EditPlan,
  event::EditEvent,
  host::Host,
};

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
  #[error("no active document")]
  NoActiveDocument,
  #[error(transparent)]
  AutoClose(#[from] AutoCloseError),
  #[error(transparent)]
  Config(#[from] ConfigError),
}

/// Text after the last `.` of a display name. Names without a `.`, or ending
/// in one, have no extension.
pub fn file_extension(display_name: Option<&str>) -> Option<String> {
  let (_, ext) = display_name?.rsplit_once('.')?;
  if ext.is_empty() {
    return None;
  }
  Some(ext.to_string())
}

/// A watched document.
#[derive(Debug)]
pub struct Subscription<D> {
  document:  D,
  extension: Option<String>,
}

impl<D: Host> Subscription<D> {
  fn subscribe(document: D) -> Self {
    let extension = file_extension(document.display_name());
    tracing::debug!(
      "subscribed to {:?} (extension {:?})",
      document.display_name(),
      extension
    );
    Self {
      document,
      extension,
    }
  }

  fn release(self) -> D {
    tracing::debug!("released {:?}", self.document.display_name());
    self.document
  }

  pub fn document(&self) -> &D {
    &self.document
  }

  pub fn extension(&self) -> Option<&str> {
    self.extension.as_deref()
  }
}

#[derive(Debug)]
pub struct Session<D> {
  config:       Config,
  subscription: Option<Subscription<D>>,
}

impl<D: Host> Default for Session<D> {
  fn default() -> Self {
    Self::new(Config::default())
  }
}

impl<D: Host> Session<D> {
  /// A session with no active document.
  pub fn new(config: Config) -> Self {
    Self {
      config,
      subscription: None,
    }
  }

  /// A session watching `document`, if there is one.
  pub fn activate(config: Config, document: Option<D>) -> Self {
    let mut session = Self::new(config);
    if let Some(document) = document {
      session.switch_document(document);
    }
    session
  }

  /// Makes `document` the active one and returns the previously active
  /// document.
  pub fn switch_document(&mut self, document: D) -> Option<D> {
    let previous = self.deactivate();
    self.subscription = Some(Subscription::subscribe(document));
    previous
  }

  /// Stops watching the active document and hands it back.
  pub fn deactivate(&mut self) -> Option<D> {
    self.subscription.take().map(Subscription::release)
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  /// Applies a settings notification. A value of the wrong shape is
  /// rejected and the previous value stays in place.
  pub fn set_config_value(&mut self, key: &str, value: Value) -> Result<()> {
    self.config.set_value(key, value)?;
    Ok(())
  }

  pub fn subscription(&self) -> Option<&Subscription<D>> {
    self.subscription.as_ref()
  }

  pub fn document(&self) -> Option<&D> {
    self.subscription.as_ref().map(Subscription::document)
  }

  pub fn document_mut(&mut self) -> Option<&mut D> {
    self
      .subscription
      .as_mut()
      .map(|subscription| &mut subscription.document)
  }

  pub fn extension(&self) -> Option<&str> {
    self.subscription.as_ref().and_then(Subscription::extension)
  }

  /// Handles an insertion the host has already applied to the active
  /// document and returns the edits to perform next.
  pub fn on_text_inserted(&self, event: &EditEvent) -> Result<EditPlan> {
    let subscription = self
      .subscription
      .as_ref()
      .ok_or(SessionError::NoActiveDocument)?;

    let plan = auto_close::hook(
      &subscription.document,
      &self.config,
      subscription.extension(),
      event,
    )?;
    Ok(plan)
  }
}

impl Session<Document> {
  /// Types `text` into the active document as one insertion, then applies
  /// whatever the engine decides.
  pub fn type_text(&mut self, text: &str) -> Result<EditPlan> {
    let document = self.document_mut().ok_or(SessionError::NoActiveDocument)?;
    let event = document.type_text(text);
    let plan = self.on_text_inserted(&event)?;

    if let Some(document) = self.document_mut() {
      plan.execute(document);
    }
    Ok(plan)
  }

  /// Types `keys` one char at a time.
  pub fn type_keys(&mut self, keys: &str) -> Result<()> {
    let mut buf = [0; 4];
    for ch in keys.chars() {
      self.type_text(ch.encode_utf8(&mut buf))?;
    }
    Ok(())
  }
}
