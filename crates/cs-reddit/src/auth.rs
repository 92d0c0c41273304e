//! OAuth password grant

use crate::endpoints::Endpoints;
use cs_core::config::Credentials;
use cs_core::error::{Result, ScrubError};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use tracing::{debug, info};

/// Short-lived bearer token
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        AccessToken(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(********)")
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    error_description: Option<String>,
}

impl TokenResponse {
    /// Error reported by the token endpoint, if any
    fn error_message(&self) -> Option<String> {
        let code = match &self.error {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }?;
        Some(
            self.error_description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or(code),
        )
    }
}

/// Exchanges account credentials for a bearer token
pub struct Authenticator {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl Authenticator {
    pub fn new(http: reqwest::Client, endpoints: Endpoints) -> Self {
        Self { http, endpoints }
    }

    /// Perform the password grant; any failure is fatal for the run
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<AccessToken> {
        debug!(username = %credentials.username, "Requesting access token");

        let response = self
            .http
            .post(self.endpoints.access_token())
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[
                ("grant_type", "password"),
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ScrubError::Auth(format!("token request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ScrubError::Auth(format!("failed to read token response: {}", e)))?;

        let token: TokenResponse = serde_json::from_slice(&body).map_err(|e| {
            ScrubError::Auth(format!(
                "undecodable token response (HTTP {}): {}",
                status.as_u16(),
                e
            ))
        })?;

        if let Some(message) = token.error_message() {
            return Err(ScrubError::Auth(message));
        }
        if !status.is_success() {
            return Err(ScrubError::Auth(format!("token endpoint returned HTTP {}", status.as_u16())));
        }

        let access_token = token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ScrubError::Auth("token response carried no access_token".to_string()))?;

        info!(
            expires_in = token.expires_in.unwrap_or_default(),
            scope = token.scope.as_deref().unwrap_or(""),
            "Obtained access token"
        );
        Ok(AccessToken::new(access_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_core::config::CredentialsConfig;
    use wiremock::matchers::{basic_auth, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> Credentials {
        CredentialsConfig {
            username: Some("throwaway".into()),
            password: Some("hunter2".into()),
            client_id: Some("app-id".into()),
            client_secret: Some("app-secret".into()),
            user_agent: Some("comment-scrubber-tests/0.1".into()),
        }
        .resolve()
        .unwrap()
    }

    async fn authenticator(server: &MockServer) -> Authenticator {
        let endpoints = Endpoints::new(&server.uri(), &server.uri()).unwrap();
        let http = crate::build_http_client("comment-scrubber-tests/0.1").unwrap();
        Authenticator::new(http, endpoints)
    }

    #[tokio::test]
    async fn test_password_grant() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/access_token"))
            .and(basic_auth("app-id", "app-secret"))
            .and(header("user-agent", "comment-scrubber-tests/0.1"))
            .and(body_string_contains("grant_type=password"))
            .and(body_string_contains("username=throwaway"))
            .and(body_string_contains("password=hunter2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "tok-123",
                "token_type": "bearer",
                "expires_in": 86400,
                "scope": "*"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let token = authenticator(&server)
            .await
            .authenticate(&credentials())
            .await
            .unwrap();
        assert_eq!(token.secret(), "tok-123");
    }

    #[tokio::test]
    async fn test_error_field_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/access_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "wrong password"
            })))
            .mount(&server)
            .await;

        let err = authenticator(&server)
            .await
            .authenticate(&credentials())
            .await
            .unwrap_err();
        assert!(matches!(err, ScrubError::Auth(ref msg) if msg == "wrong password"));
    }

    #[tokio::test]
    async fn test_numeric_error_on_bad_client_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/access_token"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "message": "Unauthorized",
                "error": 401
            })))
            .mount(&server)
            .await;

        let err = authenticator(&server)
            .await
            .authenticate(&credentials())
            .await
            .unwrap_err();
        assert!(matches!(err, ScrubError::Auth(ref msg) if msg == "401"));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/access_token"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = authenticator(&server)
            .await
            .authenticate(&credentials())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("HTTP 502"));
    }

    #[tokio::test]
    async fn test_missing_token_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/access_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "error": ""
            })))
            .mount(&server)
            .await;

        let err = authenticator(&server)
            .await
            .authenticate(&credentials())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no access_token"));
    }

    #[test]
    fn test_token_debug_is_masked() {
        assert_eq!(format!("{:?}", AccessToken::new("tok")), "AccessToken(********)");
    }
}
