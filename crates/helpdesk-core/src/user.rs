//! User accounts and roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{Error, Result};

/// Username of the reserved account that owns tickets submitted without
/// credentials. It is inactive and has no usable password.
pub const ANONYMOUS_USERNAME: &str = "anonymous";

/// Authorisation level of an account.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
  #[default]
  User,
  Admin,
  ItStaff,
}

impl Role {
  /// Admins and IT staff see every ticket and may update them.
  pub fn is_staff(self) -> bool { matches!(self, Self::Admin | Self::ItStaff) }
}

/// A persisted account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id:            i64,
  pub username:      String,
  pub email:         String,
  pub full_name:     Option<String>,
  pub role:          Role,
  pub is_active:     bool,
  pub created_at:    DateTime<Utc>,
  /// Argon2 PHC string. Never leaves the server.
  #[serde(skip)]
  pub password_hash: String,
}

/// Input to [`crate::store::HelpdeskStore::create_user`]. The password must
/// already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub username:      String,
  pub email:         String,
  pub full_name:     Option<String>,
  pub password_hash: String,
  pub role:          Role,
}

/// A registration request as submitted by a client.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
  pub username:  String,
  pub email:     String,
  pub full_name: Option<String>,
  pub password:  String,
  pub role:      Option<Role>,
}

impl Registration {
  /// Check field constraints. Returns the first violation found.
  pub fn validate(&self) -> Result<()> {
    let name_len = self.username.chars().count();
    if !(3..=50).contains(&name_len) {
      return Err(Error::validation(
        "username",
        "must be between 3 and 50 characters",
      ));
    }
    if !is_plausible_email(&self.email) {
      return Err(Error::validation("email", "not a valid address"));
    }
    if self.password.chars().count() < 6 {
      return Err(Error::validation(
        "password",
        "must be at least 6 characters",
      ));
    }
    Ok(())
  }
}

fn is_plausible_email(email: &str) -> bool {
  if email.len() > 100 || email.chars().any(char::is_whitespace) {
    return false;
  }
  match email.split_once('@') {
    Some((local, domain)) => {
      !local.is_empty()
        && !domain.contains('@')
        && domain
          .split_once('.')
          .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
    }
    None => false,
  }
}
