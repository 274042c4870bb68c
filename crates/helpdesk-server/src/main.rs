//! Helpdesk server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) plus `HELPDESK_*`
//! environment variables, opens the SQLite store, seeds and indexes the
//! knowledge base, and serves the JSON API over HTTP.
//!
//! # Bootstrapping an administrator
//!
//! ```text
//! helpdesk --create-admin root --email root@example.com
//! ```

mod settings;

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context as _;
use chrono::Utc;
use clap::Parser;
use helpdesk_api::{AppInfo, AppState, AuthConfig, auth::hash_password};
use helpdesk_core::{
  store::HelpdeskStore,
  user::{NewUser, Registration, Role},
};
use helpdesk_rag::{EmbeddingProvider, KnowledgeIndex, knowledge::load_seeds};
use helpdesk_store_sqlite::SqliteStore;
use rand_core::{OsRng, RngCore as _};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "IT helpdesk server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Create an admin account with a password read from stdin, then exit.
  #[arg(long, value_name = "USERNAME", requires = "email")]
  create_admin: Option<String>,

  /// Email address for `--create-admin`.
  #[arg(long)]
  email: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = ServerConfig::load(&cli.config)?;

  let store = open_store(&cfg).await?;

  if let Some(username) = cli.create_admin {
    let email = cli.email.unwrap_or_default();
    return create_admin(&store, username, email).await;
  }

  // Seed entries the store does not have yet, then index whatever it holds.
  // Stored entries win over the seed file so admin edits survive restarts.
  let seeds = load_seeds(cfg.knowledge_base_path.as_deref())
    .await
    .context("failed to load knowledge base")?;
  let mut seeded = 0;
  for seed in seeds {
    if store
      .seed_knowledge(seed)
      .await
      .context("failed to seed knowledge base")?
      .is_some()
    {
      seeded += 1;
    }
  }
  tracing::info!(seeded, "knowledge base seeded");
  let entries = store
    .list_knowledge()
    .await
    .context("failed to list knowledge base")?;
  let embedder = EmbeddingProvider::from_config(&cfg.embedding)
    .context("invalid embedding configuration")?;
  let index = KnowledgeIndex::build(embedder, entries)
    .await
    .context("failed to build knowledge index")?;

  let jwt_secret = cfg.jwt_secret.clone().unwrap_or_else(|| {
    tracing::warn!("jwt_secret is not set; issued tokens will not survive a restart");
    random_secret()
  });

  let state = AppState::new(
    store.clone(),
    Arc::new(index),
    cfg.policy(),
    AuthConfig::new(jwt_secret, cfg.access_token_minutes),
    AppInfo {
      app_name: cfg.app_name.clone(),
      version:  env!("CARGO_PKG_VERSION").into(),
    },
  );

  if cfg.rollup_interval_secs > 0 {
    tokio::spawn(rollup_loop(
      store,
      Duration::from_secs(cfg.rollup_interval_secs),
    ));
  }

  let app = helpdesk_api::app(state);
  let address = cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

async fn open_store(cfg: &ServerConfig) -> anyhow::Result<SqliteStore> {
  if let Some(parent) = cfg.store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    tokio::fs::create_dir_all(parent)
      .await
      .with_context(|| format!("failed to create {parent:?}"))?;
  }
  SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))
}

async fn create_admin(
  store: &SqliteStore,
  username: String,
  email: String,
) -> anyhow::Result<()> {
  let password = rpassword_or_stdin()?;
  let registration = Registration {
    username,
    email,
    full_name: None,
    password,
    role: Some(Role::Admin),
  };
  registration.validate()?;

  let user = store
    .create_user(NewUser {
      password_hash: hash_password(&registration.password)?,
      username: registration.username,
      email: registration.email,
      full_name: None,
      role: Role::Admin,
    })
    .await
    .context("failed to create admin account")?;
  println!("created admin {} (id {})", user.username, user.id);
  Ok(())
}

/// Refresh today's daily rollup on a fixed interval.
async fn rollup_loop(store: SqliteStore, every: Duration) {
  let mut ticker = tokio::time::interval(every);
  loop {
    ticker.tick().await;
    let today = Utc::now().date_naive();
    match store.rollup_daily(today).await {
      Ok(m) => tracing::debug!(%today, total = m.total_tickets, "daily rollup refreshed"),
      Err(e) => tracing::warn!(error = %e, "daily rollup failed"),
    }
  }
}

/// 32 random bytes, hex-encoded.
fn random_secret() -> String {
  let mut bytes = [0u8; 32];
  OsRng.fill_bytes(&mut bytes);
  hex::encode(bytes)
}

/// Read one line from stdin as the password.
fn rpassword_or_stdin() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  let stdin = io::stdin();
  print!("Password: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  stdin.lock().read_line(&mut line)?;
  Ok(
    line
      .trim_end_matches('\n')
      .trim_end_matches('\r')
      .to_string(),
  )
}
