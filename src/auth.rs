//! Identity provider integration (email/password accounts)
//!
//! Thin client for the hosted identity REST API the web client delegated
//! sign-in to. The engine only ever consumes the stable user id and display
//! name from a session to seed a profile; tokens are bookkept here so the
//! caller knows when to re-authenticate.

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

use crate::models::UserProfile;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const DEFAULT_AUTH_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const TOKEN_EXPIRY_BUFFER_MINUTES: i64 = 5;
const FALLBACK_DISPLAY_NAME: &str = "Anime Hero";

/// ---------------------------------------------------------------------------
/// Configuration
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AuthConfig {
  pub api_key: String,
  pub base_url: String,
}

impl AuthConfig {
  pub fn from_env() -> Result<Self, AuthError> {
    dotenvy::dotenv().ok();
    Ok(Self {
      api_key: env::var("ANIMEFIT_AUTH_API_KEY")
        .map_err(|_| AuthError::MissingConfig("ANIMEFIT_AUTH_API_KEY".into()))?,
      base_url: env::var("ANIMEFIT_AUTH_BASE_URL")
        .unwrap_or_else(|_| DEFAULT_AUTH_BASE_URL.to_string()),
    })
  }
}

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
  #[error("Missing configuration: {0}")]
  MissingConfig(String),

  #[error("HTTP request failed: {0}")]
  Request(String),

  #[error("Identity provider rejected the request: {0}")]
  Api(String),

  #[error("Unexpected identity provider response: {0}")]
  InvalidResponse(String),
}

impl From<reqwest::Error> for AuthError {
  fn from(e: reqwest::Error) -> Self {
    AuthError::Request(e.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Wire Types
/// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsRequest<'a> {
  email: &'a str,
  password: &'a str,
  return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProfileRequest<'a> {
  id_token: &'a str,
  display_name: &'a str,
  return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
  local_id: String,
  id_token: String,
  refresh_token: String,
  /// Lifetime in seconds, sent as a decimal string
  expires_in: String,
  #[serde(default)]
  display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
  error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
  message: String,
}

/// ---------------------------------------------------------------------------
/// Sessions
/// ---------------------------------------------------------------------------

/// An authenticated session. `user_id` is the provider's stable identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
  pub user_id: String,
  pub display_name: Option<String>,
  pub id_token: String,
  pub refresh_token: String,
  pub expires_at: DateTime<Utc>,
}

impl AuthSession {
  fn from_response(resp: TokenResponse) -> Result<Self, AuthError> {
    let lifetime_seconds: i64 = resp
      .expires_in
      .parse()
      .map_err(|_| AuthError::InvalidResponse(format!("expiresIn: {}", resp.expires_in)))?;

    Ok(Self {
      user_id: resp.local_id,
      display_name: resp.display_name.filter(|n| !n.is_empty()),
      id_token: resp.id_token,
      refresh_token: resp.refresh_token,
      expires_at: Utc::now() + Duration::seconds(lifetime_seconds),
    })
  }

  pub fn needs_refresh(&self) -> bool {
    let buffer = Duration::minutes(TOKEN_EXPIRY_BUFFER_MINUTES);
    Utc::now() + buffer >= self.expires_at
  }

  /// Seed a fresh profile for this user, as the web client did on first
  /// sign-in
  pub fn initial_profile(&self) -> UserProfile {
    let name = self
      .display_name
      .clone()
      .unwrap_or_else(|| FALLBACK_DISPLAY_NAME.to_string());
    UserProfile::new(self.user_id.clone(), name)
  }
}

/// ---------------------------------------------------------------------------
/// Account Operations
/// ---------------------------------------------------------------------------

fn endpoint(config: &AuthConfig, action: &str) -> Result<Url, AuthError> {
  let mut url = Url::parse(&format!("{}/accounts:{}", config.base_url, action))
    .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;
  url.query_pairs_mut().append_pair("key", &config.api_key);
  Ok(url)
}

async fn parse_token_response(resp: reqwest::Response) -> Result<TokenResponse, AuthError> {
  if resp.status().is_success() {
    return Ok(resp.json().await?);
  }

  let status = resp.status();
  match resp.json::<ApiErrorBody>().await {
    Ok(body) => Err(AuthError::Api(body.error.message)),
    Err(_) => Err(AuthError::Api(format!("HTTP {}", status))),
  }
}

/// Create an account and set its display name
pub async fn sign_up_with_email(
  client: &Client,
  config: &AuthConfig,
  email: &str,
  password: &str,
  display_name: &str,
) -> Result<AuthSession, AuthError> {
  let resp = client
    .post(endpoint(config, "signUp")?)
    .json(&CredentialsRequest { email, password, return_secure_token: true })
    .send()
    .await?;

  let token = parse_token_response(resp).await?;
  let mut session = AuthSession::from_response(token)?;

  if !display_name.is_empty() {
    let update = client
      .post(endpoint(config, "update")?)
      .json(&UpdateProfileRequest {
        id_token: &session.id_token,
        display_name,
        return_secure_token: false,
      })
      .send()
      .await?;

    if !update.status().is_success() {
      return Err(AuthError::Api(format!(
        "Failed to set display name: HTTP {}",
        update.status()
      )));
    }
    session.display_name = Some(display_name.to_string());
  }

  Ok(session)
}

/// Sign in to an existing account
pub async fn sign_in_with_email(
  client: &Client,
  config: &AuthConfig,
  email: &str,
  password: &str,
) -> Result<AuthSession, AuthError> {
  let resp = client
    .post(endpoint(config, "signInWithPassword")?)
    .json(&CredentialsRequest { email, password, return_secure_token: true })
    .send()
    .await?;

  let token = parse_token_response(resp).await?;
  AuthSession::from_response(token)
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  fn make_config(base_url: String) -> AuthConfig {
    AuthConfig { api_key: "test-key".to_string(), base_url }
  }

  fn make_session(display_name: Option<&str>) -> AuthSession {
    AuthSession {
      user_id: "uid-1".to_string(),
      display_name: display_name.map(str::to_string),
      id_token: "token".to_string(),
      refresh_token: "refresh".to_string(),
      expires_at: Utc::now() + Duration::hours(1),
    }
  }

  #[test]
  #[serial]
  fn test_from_env_requires_api_key() {
    temp_env::with_vars(
      [
        ("ANIMEFIT_AUTH_API_KEY", None::<&str>),
        ("ANIMEFIT_AUTH_BASE_URL", None),
      ],
      || {
        let err = AuthConfig::from_env().unwrap_err();
        assert!(matches!(err, AuthError::MissingConfig(_)));
      },
    );
  }

  #[test]
  #[serial]
  fn test_from_env_defaults_base_url() {
    temp_env::with_vars(
      [
        ("ANIMEFIT_AUTH_API_KEY", Some("abc123")),
        ("ANIMEFIT_AUTH_BASE_URL", None),
      ],
      || {
        let config = AuthConfig::from_env().unwrap();
        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.base_url, DEFAULT_AUTH_BASE_URL);
      },
    );
  }

  #[test]
  fn test_needs_refresh_near_expiry() {
    let mut session = make_session(None);
    assert!(!session.needs_refresh());

    session.expires_at = Utc::now() + Duration::minutes(2);
    assert!(session.needs_refresh());
  }

  #[test]
  fn test_initial_profile_seeds_from_session() {
    let profile = make_session(Some("Rock Lee")).initial_profile();
    assert_eq!(profile.id, "uid-1");
    assert_eq!(profile.name, "Rock Lee");
    assert_eq!(profile.level, 1);

    let fallback = make_session(None).initial_profile();
    assert_eq!(fallback.name, "Anime Hero");
  }

  #[tokio::test]
  async fn test_sign_in_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
      .mock("POST", "/accounts:signInWithPassword")
      .match_query(mockito::Matcher::UrlEncoded("key".into(), "test-key".into()))
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(
        r#"{
          "localId": "uid-42",
          "email": "hero@example.com",
          "displayName": "Anime Athlete",
          "idToken": "id-token",
          "refreshToken": "refresh-token",
          "expiresIn": "3600"
        }"#,
      )
      .create_async()
      .await;

    let client = Client::new();
    let config = make_config(server.url());
    let session = sign_in_with_email(&client, &config, "hero@example.com", "hunter2")
      .await
      .expect("Sign-in should succeed");

    assert_eq!(session.user_id, "uid-42");
    assert_eq!(session.display_name.as_deref(), Some("Anime Athlete"));
    assert!(!session.needs_refresh());
    mock.assert_async().await;
  }

  #[tokio::test]
  async fn test_sign_in_bad_credentials() {
    let mut server = mockito::Server::new_async().await;
    server
      .mock("POST", "/accounts:signInWithPassword")
      .match_query(mockito::Matcher::UrlEncoded("key".into(), "test-key".into()))
      .with_status(400)
      .with_header("content-type", "application/json")
      .with_body(r#"{"error": {"code": 400, "message": "INVALID_PASSWORD"}}"#)
      .create_async()
      .await;

    let client = Client::new();
    let config = make_config(server.url());
    let err = sign_in_with_email(&client, &config, "hero@example.com", "wrong")
      .await
      .unwrap_err();

    match err {
      AuthError::Api(message) => assert_eq!(message, "INVALID_PASSWORD"),
      other => panic!("Expected Api error, got: {:?}", other),
    }
  }

  #[tokio::test]
  async fn test_sign_up_sets_display_name() {
    let mut server = mockito::Server::new_async().await;
    let sign_up = server
      .mock("POST", "/accounts:signUp")
      .match_query(mockito::Matcher::UrlEncoded("key".into(), "test-key".into()))
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(
        r#"{
          "localId": "uid-new",
          "idToken": "id-token",
          "refreshToken": "refresh-token",
          "expiresIn": "3600"
        }"#,
      )
      .create_async()
      .await;
    let update = server
      .mock("POST", "/accounts:update")
      .match_query(mockito::Matcher::UrlEncoded("key".into(), "test-key".into()))
      .with_status(200)
      .with_header("content-type", "application/json")
      .with_body(r#"{"localId": "uid-new", "displayName": "Tanjiro"}"#)
      .create_async()
      .await;

    let client = Client::new();
    let config = make_config(server.url());
    let session =
      sign_up_with_email(&client, &config, "new@example.com", "hunter2", "Tanjiro")
        .await
        .expect("Sign-up should succeed");

    assert_eq!(session.user_id, "uid-new");
    assert_eq!(session.display_name.as_deref(), Some("Tanjiro"));
    sign_up.assert_async().await;
    update.assert_async().await;
  }

  #[tokio::test]
  async fn test_sign_up_existing_email() {
    let mut server = mockito::Server::new_async().await;
    server
      .mock("POST", "/accounts:signUp")
      .match_query(mockito::Matcher::UrlEncoded("key".into(), "test-key".into()))
      .with_status(400)
      .with_header("content-type", "application/json")
      .with_body(r#"{"error": {"code": 400, "message": "EMAIL_EXISTS"}}"#)
      .create_async()
      .await;

    let client = Client::new();
    let config = make_config(server.url());
    let err = sign_up_with_email(&client, &config, "taken@example.com", "hunter2", "Hero")
      .await
      .unwrap_err();

    match err {
      AuthError::Api(message) => assert_eq!(message, "EMAIL_EXISTS"),
      other => panic!("Expected Api error, got: {:?}", other),
    }
  }
}
