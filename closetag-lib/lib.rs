use smartstring::{
  LazyCompact,
  SmartString,
};

pub mod auto_close;
pub mod config;
pub mod context;
pub mod document;
pub mod edit;
pub mod event;
pub mod host;
pub mod indent;
pub mod movement;
pub mod position;
pub mod scope;
pub mod session;

pub type Tendril = SmartString<LazyCompact>;
