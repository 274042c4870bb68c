//! Bearer-token authentication: password hashing, JWT issue and
//! verification, request extractors, and the `/auth` handlers.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/auth/register` | Elevated roles need an admin token |
//! | `POST` | `/auth/login` | Returns a bearer token |
//! | `GET`  | `/auth/me` | The authenticated account |

use std::sync::LazyLock;

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::{
  Json,
  extract::{FromRequestParts, State},
  http::{HeaderMap, StatusCode, header, request::Parts},
  response::IntoResponse,
};
use chrono::{Duration, Utc};
use helpdesk_core::{
  store::HelpdeskStore,
  user::{NewUser, Registration, Role, User},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

// ─── Passwords ───────────────────────────────────────────────────────────────

/// Hash `password` into an argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| ApiError::Internal(format!("argon2 error: {e}")))
}

/// Verified against when the username is unknown, so that login takes
/// about as long whether or not the account exists.
static DUMMY_HASH: LazyLock<String> =
  LazyLock::new(|| hash_password("no account has this password").unwrap_or_default());

/// Check `password` against a stored PHC string. Unparseable hashes never
/// match.
pub fn verify_password(password: &str, phc: &str) -> bool {
  PasswordHash::new(phc).is_ok_and(|parsed| {
    Argon2::default()
      .verify_password(password.as_bytes(), &parsed)
      .is_ok()
  })
}

// ─── Tokens ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
  /// User id.
  pub sub:      String,
  pub username: String,
  pub role:     Role,
  pub iat:      i64,
  pub exp:      i64,
}

/// Token signing configuration.
#[derive(Clone)]
pub struct AuthConfig {
  pub jwt_secret:           String,
  pub access_token_minutes: i64,
}

impl AuthConfig {
  pub fn new(jwt_secret: impl Into<String>, access_token_minutes: i64) -> Self {
    Self {
      jwt_secret: jwt_secret.into(),
      access_token_minutes,
    }
  }

  fn encoding_key(&self) -> EncodingKey {
    EncodingKey::from_secret(self.jwt_secret.as_bytes())
  }

  fn decoding_key(&self) -> DecodingKey {
    DecodingKey::from_secret(self.jwt_secret.as_bytes())
  }

  /// Sign an HS256 access token for `user`.
  pub fn issue(&self, user: &User) -> Result<String, ApiError> {
    let now = Utc::now();
    let claims = Claims {
      sub:      user.id.to_string(),
      username: user.username.clone(),
      role:     user.role,
      iat:      now.timestamp(),
      exp:      (now + Duration::minutes(self.access_token_minutes)).timestamp(),
    };
    encode(&Header::default(), &claims, &self.encoding_key())
      .map_err(|e| ApiError::Internal(format!("token signing failed: {e}")))
  }

  /// Check signature and expiry.
  pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
    decode::<Claims>(token, &self.decoding_key(), &Validation::default())
      .map(|data| data.claims)
      .map_err(|_| ApiError::Unauthorized("invalid or expired token".into()))
  }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
  let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
  let (scheme, token) = value.split_once(' ')?;
  let token = token.trim();
  (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty())
    .then(|| token.to_owned())
}

/// Resolve a token to a live, active account.
async fn authenticate<S: HelpdeskStore>(
  state: &AppState<S>,
  token: &str,
) -> Result<User, ApiError> {
  let claims = state.auth.verify(token)?;
  let id: i64 = claims
    .sub
    .parse()
    .map_err(|_| ApiError::Unauthorized("malformed token subject".into()))?;
  state
    .store
    .get_user(id)
    .await
    .map_err(ApiError::store)?
    .filter(|u| u.is_active)
    .ok_or_else(|| ApiError::Unauthorized("unknown or inactive user".into()))
}

// ─── Extractors ──────────────────────────────────────────────────────────────

/// The authenticated caller. Rejects with 401 when the token is missing,
/// invalid, or belongs to an unknown or inactive account.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<AppState<S>> for CurrentUser
where
  S: HelpdeskStore + Clone + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let token = bearer_token(&parts.headers)
      .ok_or_else(|| ApiError::Unauthorized("missing bearer token".into()))?;
    Ok(CurrentUser(authenticate(state, &token).await?))
  }
}

/// The caller if a bearer token was sent. A token that is present but
/// invalid is still rejected.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<User>);

impl<S> FromRequestParts<AppState<S>> for MaybeUser
where
  S: HelpdeskStore + Clone + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    match bearer_token(&parts.headers) {
      Some(token) => Ok(MaybeUser(Some(authenticate(state, &token).await?))),
      None => Ok(MaybeUser(None)),
    }
  }
}

pub fn require_staff(user: &User) -> Result<(), ApiError> {
  if user.role.is_staff() {
    Ok(())
  } else {
    Err(ApiError::Forbidden("IT staff access required".into()))
  }
}

pub fn require_admin(user: &User) -> Result<(), ApiError> {
  if user.role == Role::Admin {
    Ok(())
  } else {
    Err(ApiError::Forbidden("admin access required".into()))
  }
}

// ─── Handlers ────────────────────────────────────────────────────────────────

/// `POST /auth/register`
pub async fn register<S>(
  State(state): State<AppState<S>>,
  MaybeUser(caller): MaybeUser,
  Json(body): Json<Registration>,
) -> Result<impl IntoResponse, ApiError>
where
  S: HelpdeskStore + Clone + 'static,
{
  body.validate()?;

  let role = body.role.unwrap_or_default();
  if role != Role::User {
    match &caller {
      Some(admin) => require_admin(admin)?,
      None => {
        return Err(ApiError::Forbidden(
          "only admins may assign elevated roles".into(),
        ));
      }
    }
  }

  let user = state
    .store
    .create_user(NewUser {
      username: body.username,
      email: body.email,
      full_name: body.full_name,
      password_hash: hash_password(&body.password)?,
      role,
    })
    .await
    .map_err(ApiError::store)?;

  tracing::info!(user_id = user.id, role = %user.role, "user registered");
  Ok((StatusCode::CREATED, Json(user)))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
  pub username: String,
  pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
  pub access_token: String,
  pub token_type:   String,
  /// Lifetime in seconds.
  pub expires_in:   i64,
}

/// `POST /auth/login`
pub async fn login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError>
where
  S: HelpdeskStore + Clone + 'static,
{
  let rejected = || ApiError::Unauthorized("incorrect username or password".into());

  let user = state
    .store
    .find_user(body.username)
    .await
    .map_err(ApiError::store)?;
  let phc = user
    .as_ref()
    .map_or(DUMMY_HASH.as_str(), |u| u.password_hash.as_str());
  let password_ok = verify_password(&body.password, phc);
  let user = user
    .filter(|u| u.is_active && password_ok)
    .ok_or_else(rejected)?;

  let access_token = state.auth.issue(&user)?;
  tracing::debug!(user_id = user.id, "issued access token");
  Ok(Json(TokenResponse {
    access_token,
    token_type: "bearer".into(),
    expires_in: state.auth.access_token_minutes * 60,
  }))
}

/// `GET /auth/me`
pub async fn me(CurrentUser(user): CurrentUser) -> Json<User> { Json(user) }

#[cfg(test)]
mod tests {
  use axum::http::HeaderValue;

  use super::*;

  #[test]
  fn password_round_trip() {
    let hash = hash_password("hunter22").unwrap();
    assert!(hash.starts_with("$argon2"));
    assert!(verify_password("hunter22", &hash));
    assert!(!verify_password("hunter23", &hash));
    assert!(!verify_password("anything", "!"));
  }

  #[test]
  fn unknown_users_are_checked_against_a_real_hash() {
    assert!(DUMMY_HASH.starts_with("$argon2"));
    assert!(PasswordHash::new(&DUMMY_HASH).is_ok());
    assert!(!verify_password("password1", &DUMMY_HASH));
  }

  #[test]
  fn bearer_scheme_is_case_insensitive() {
    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("bearer abc.def"));
    assert_eq!(bearer_token(&headers).as_deref(), Some("abc.def"));

    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
    assert_eq!(bearer_token(&headers), None);

    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
    assert_eq!(bearer_token(&headers), None);
  }

  #[test]
  fn tokens_from_another_secret_are_rejected() {
    let user = User {
      id:            7,
      username:      "alice".into(),
      email:         "alice@example.com".into(),
      full_name:     None,
      role:          Role::ItStaff,
      is_active:     true,
      created_at:    Utc::now(),
      password_hash: String::new(),
    };
    let token = AuthConfig::new("one", 30).issue(&user).unwrap();

    let claims = AuthConfig::new("one", 30).verify(&token).unwrap();
    assert_eq!(claims.sub, "7");
    assert_eq!(claims.role, Role::ItStaff);
    assert!(matches!(
      AuthConfig::new("two", 30).verify(&token),
      Err(ApiError::Unauthorized(_))
    ));
  }

  #[test]
  fn expired_tokens_are_rejected() {
    let user = User {
      id:            1,
      username:      "bob".into(),
      email:         "bob@example.com".into(),
      full_name:     None,
      role:          Role::User,
      is_active:     true,
      created_at:    Utc::now(),
      password_hash: String::new(),
    };
    let auth = AuthConfig::new("secret", -10);
    let token = auth.issue(&user).unwrap();
    assert!(auth.verify(&token).is_err());
  }
}
