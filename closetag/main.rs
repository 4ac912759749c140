use std::{
  fs,
  io::{
    self,
    Write,
  },
  path::Path,
};

use anyhow::{
  Context,
  Result,
};
use closetag_lib::{
  config::{
    Config,
    schema,
  },
  document::Document,
  session::Session,
};

use crate::cli::{
  CliOptions,
  Command,
  TypeOptions,
};

mod cli;
mod loader;

fn setup_logging(verbosity: u8, log_file: &Path) -> Result<()> {
  let level = match verbosity {
    0 => log::LevelFilter::Warn,
    1 => log::LevelFilter::Info,
    2 => log::LevelFilter::Debug,
    _ => log::LevelFilter::Trace,
  };

  loader::ensure_parent_dir(log_file)?;
  let file = fern::log_file(log_file)
    .with_context(|| format!("failed to open log file {}", log_file.display()))?;

  fern::Dispatch::new()
    .format(|out, message, record| {
      out.finish(format_args!(
        "{} [{}] {}",
        record.target(),
        record.level(),
        message
      ))
    })
    .level(level)
    .chain(file)
    .apply()
    .context("failed to install logger")?;
  Ok(())
}

fn main() -> Result<()> {
  let options = CliOptions::parse()?;

  let log_file = match &options.log_file {
    Some(path) => path.clone(),
    None => loader::default_log_file()?,
  };
  setup_logging(options.verbosity, &log_file)?;

  match options.command {
    Command::Schema => print_schema(),
    Command::Type(typed) => {
      let config = loader::load_config(options.config_file.as_deref())?;
      run_type(typed, config, options.overrides)
    },
  }
}

fn print_schema() -> Result<()> {
  let json = serde_json::to_string_pretty(&schema()).context("failed to render schema")?;
  println!("{json}");
  Ok(())
}

fn run_type(
  options: TypeOptions,
  config: Config,
  overrides: Vec<(String, serde_json::Value)>,
) -> Result<()> {
  let text = fs::read_to_string(&options.file)
    .with_context(|| format!("failed to read {}", options.file.display()))?;

  let display_name = options.display_name.clone().or_else(|| {
    options
      .file
      .file_name()
      .map(|name| name.to_string_lossy().into_owned())
  });

  let mut document = Document::new(&text).with_indent(options.indent_width, options.hard_tabs);
  if let Some(name) = display_name {
    document = document.with_display_name(name);
  }
  if let Some(grammar) = &options.grammar {
    document = document.with_grammar(grammar.as_str());
  }
  if !options.scopes.is_empty() {
    document = document.with_scopes(options.scopes.iter().cloned());
  }
  if let Some(at) = options.at {
    document.set_caret(at);
  }

  let mut session = Session::activate(config, Some(document));
  for (key, value) in overrides {
    session
      .set_config_value(&key, value)
      .with_context(|| format!("invalid value for --set {key}"))?;
  }

  session
    .type_keys(&options.keys)
    .with_context(|| format!("failed to type into {}", options.file.display()))?;

  let document = session
    .deactivate()
    .context("no document left after typing")?;

  if options.in_place {
    fs::write(&options.file, document.text().to_string())
      .with_context(|| format!("failed to write {}", options.file.display()))?;
    log::info!("wrote {}", options.file.display());
    return Ok(());
  }

  let mut stdout = io::stdout().lock();
  if options.show_caret {
    stdout.write_all(document.to_marked().as_bytes())?;
  } else {
    document.text().write_to(&mut stdout)?;
  }
  stdout.flush()?;
  Ok(())
}
