//! Portal configuration.
//!
//! Read from an optional TOML file, then overridden by `MENTORLY_*`
//! environment variables (`__` separates nested keys, e.g.
//! `MENTORLY_LATENCY__LOOKUP_MS=0`). Every field has a default, so an empty
//! configuration is valid.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use mentorly_api::Latency;
use serde::Deserialize;

use crate::Result;

/// `store_path` value selecting an in-memory SQLite database.
pub const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
  /// SQLite file holding the record store. `~/` is expanded.
  pub store_path:     PathBuf,
  pub latency:        LatencyConfig,
  /// Seed the demo people, meetings and notes on first run.
  pub seed_demo_data: bool,
}

impl Default for PortalConfig {
  fn default() -> Self {
    Self {
      store_path:     PathBuf::from("mentorly.sqlite3"),
      latency:        LatencyConfig::default(),
      seed_demo_data: false,
    }
  }
}

/// Artificial delays, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
  pub lookup_ms: u64,
  pub list_ms:   u64,
  pub write_ms:  u64,
  /// Applied to sign-in and registration.
  pub auth_ms:   u64,
}

impl Default for LatencyConfig {
  fn default() -> Self {
    Self { lookup_ms: 300, list_ms: 500, write_ms: 700, auth_ms: 1000 }
  }
}

impl LatencyConfig {
  pub const fn none() -> Self {
    Self { lookup_ms: 0, list_ms: 0, write_ms: 0, auth_ms: 0 }
  }

  pub fn api(&self) -> Latency {
    Latency::from_millis(self.lookup_ms, self.list_ms, self.write_ms)
  }

  pub fn auth(&self) -> Duration { Duration::from_millis(self.auth_ms) }
}

impl PortalConfig {
  /// Load from `path` (if given and present) and the environment.
  pub fn load(path: Option<&Path>) -> Result<Self> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
      builder = builder.add_source(config::File::from(path).required(false));
    }
    let settings = builder
      .add_source(
        config::Environment::with_prefix("MENTORLY")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    let mut cfg: PortalConfig = settings.try_deserialize()?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    Ok(cfg)
  }

  /// An ephemeral configuration: in-memory store, no artificial latency.
  pub fn in_memory() -> Self {
    Self {
      store_path:     PathBuf::from(IN_MEMORY),
      latency:        LatencyConfig::none(),
      seed_demo_data: false,
    }
  }

  pub fn is_in_memory(&self) -> bool { self.store_path == Path::new(IN_MEMORY) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
