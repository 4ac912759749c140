use std::{
  fs,
  io,
  path::{
    Path,
    PathBuf,
  },
};

use anyhow::{
  Context,
  Result,
};
use closetag_lib::config::Config;
use etcetera::base_strategy::{
  BaseStrategy,
  choose_base_strategy,
};

pub fn config_dir() -> Result<PathBuf> {
  if let Ok(dir) = std::env::var("CLOSETAG_CONFIG_DIR") {
    return Ok(PathBuf::from(dir));
  }
  let strategy = choose_base_strategy().context("unable to find the config directory")?;
  Ok(strategy.config_dir().join("closetag"))
}

pub fn cache_dir() -> Result<PathBuf> {
  if let Ok(dir) = std::env::var("CLOSETAG_CACHE_DIR") {
    return Ok(PathBuf::from(dir));
  }
  let strategy = choose_base_strategy().context("unable to find the cache directory")?;
  Ok(strategy.cache_dir().join("closetag"))
}

pub fn default_config_file() -> Result<PathBuf> {
  Ok(config_dir()?.join("config.toml"))
}

pub fn default_log_file() -> Result<PathBuf> {
  Ok(cache_dir()?.join("closetag.log"))
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
    && !parent.exists()
  {
    fs::create_dir_all(parent)
      .with_context(|| format!("failed to create directory {}", parent.display()))?;
  }
  Ok(())
}

/// Loads `specified` if given, which must exist. Otherwise the default
/// config file is used when present and the built-in defaults when not.
pub fn load_config(specified: Option<&Path>) -> Result<Config> {
  let (path, required) = match specified {
    Some(path) => (path.to_path_buf(), true),
    None => (default_config_file()?, false),
  };

  let source = match fs::read_to_string(&path) {
    Ok(source) => source,
    Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
      log::debug!("no config at {}, using defaults", path.display());
      return Ok(Config::default());
    },
    Err(err) => {
      return Err(err).with_context(|| format!("failed to read {}", path.display()));
    },
  };

  let config = Config::from_toml(&source)
    .with_context(|| format!("invalid configuration in {}", path.display()))?;
  log::info!("loaded config from {}", path.display());
  Ok(config)
}
