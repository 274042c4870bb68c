//! Runtime configuration, read from an optional TOML file layered under
//! `HELPDESK_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use helpdesk_rag::EmbeddingConfig;
use helpdesk_workflow::RoutingPolicy;
use serde::Deserialize;

/// Deserialised server configuration. Every key has a default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub app_name:                 String,
  pub host:                     String,
  pub port:                     u16,
  pub store_path:               PathBuf,
  /// HS256 signing secret. A random one is generated when unset.
  pub jwt_secret:               Option<String>,
  pub access_token_minutes:     i64,
  /// JSON file replacing the compiled-in knowledge base.
  pub knowledge_base_path:      Option<PathBuf>,
  pub auto_resolve_threshold:   f64,
  pub classification_threshold: f64,
  pub low_confidence_threshold: f64,
  /// Seconds between refreshes of today's rollup; `0` disables them.
  pub rollup_interval_secs:     u64,
  pub embedding:                EmbeddingConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    let policy = RoutingPolicy::default();
    Self {
      app_name:                 "IT Helpdesk".into(),
      host:                     "127.0.0.1".into(),
      port:                     8000,
      store_path:               PathBuf::from("~/.local/share/helpdesk/helpdesk.db"),
      jwt_secret:               None,
      access_token_minutes:     30,
      knowledge_base_path:      None,
      auto_resolve_threshold:   policy.auto_resolve_threshold,
      classification_threshold: policy.classification_threshold,
      low_confidence_threshold: policy.low_confidence_threshold,
      rollup_interval_secs:     3600,
      embedding:                EmbeddingConfig::default(),
    }
  }
}

impl ServerConfig {
  /// Read `path` (if it exists) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("HELPDESK")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()
      .context("failed to read configuration")?;

    let mut cfg: ServerConfig = settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    cfg.validate()?;
    Ok(cfg)
  }

  fn validate(&self) -> anyhow::Result<()> {
    for (name, value) in [
      ("auto_resolve_threshold", self.auto_resolve_threshold),
      ("classification_threshold", self.classification_threshold),
      ("low_confidence_threshold", self.low_confidence_threshold),
    ] {
      anyhow::ensure!(
        (0.0..=1.0).contains(&value),
        "{name} must be between 0 and 1, got {value}"
      );
    }
    anyhow::ensure!(
      self.access_token_minutes > 0,
      "access_token_minutes must be positive"
    );
    Ok(())
  }

  pub fn policy(&self) -> RoutingPolicy {
    RoutingPolicy {
      auto_resolve_threshold:   self.auto_resolve_threshold,
      classification_threshold: self.classification_threshold,
      low_confidence_threshold: self.low_confidence_threshold,
    }
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
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

#[cfg(test)]
mod tests {
  use std::io::Write as _;

  use helpdesk_rag::ProviderKind;

  use super::*;

  #[test]
  fn missing_file_yields_defaults() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/helpdesk.toml")).unwrap();
    assert_eq!(cfg.port, 8000);
    assert_eq!(cfg.policy(), RoutingPolicy::default());
    assert_eq!(cfg.embedding.provider, ProviderKind::Hashing);
    assert_eq!(cfg.rollup_interval_secs, 3600);
  }

  #[test]
  fn file_values_override_defaults() {
    let path = std::env::temp_dir().join(format!("helpdesk-cfg-{}.toml", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
      file,
      "port = 9100\nauto_resolve_threshold = 0.8\n\n[embedding]\ndimensions = 256"
    )
    .unwrap();

    let cfg = ServerConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(cfg.port, 9100);
    assert_eq!(cfg.policy().auto_resolve_threshold, 0.8);
    assert_eq!(cfg.policy().low_confidence_threshold, 0.5);
    assert_eq!(cfg.embedding.dimensions, 256);
    assert_eq!(cfg.access_token_minutes, 30);
  }

  #[test]
  fn out_of_range_threshold_is_rejected() {
    let cfg = ServerConfig {
      auto_resolve_threshold: 1.5,
      ..ServerConfig::default()
    };
    assert!(cfg.validate().is_err());
  }

  #[test]
  fn tilde_expands_to_home() {
    let Ok(home) = std::env::var("HOME") else {
      return;
    };
    assert_eq!(
      expand_tilde(Path::new("~/x.db")),
      PathBuf::from(home).join("x.db")
    );
    assert_eq!(expand_tilde(Path::new("/tmp/x.db")), PathBuf::from("/tmp/x.db"));
  }
}
