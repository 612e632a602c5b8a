//! Google ID-token verification

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Identity asserted by a verified Google ID token
#[derive(Debug, Clone, PartialEq)]
pub struct GoogleIdentity {
    pub email: String,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub picture: Option<String>,
}

/// Trait for verifying third-party ID tokens
#[async_trait]
pub trait IdTokenVerifier: Send + Sync + Debug {
    /// Verify an ID token and return the identity it asserts
    async fn verify(&self, id_token: &str) -> Result<GoogleIdentity, DomainError>;
}

/// Response shape of Google's tokeninfo endpoint
#[derive(Debug, Deserialize)]
struct TokenInfoResponse {
    aud: String,
    email: String,
    // Google returns this as the string "true"/"false"
    email_verified: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
    picture: Option<String>,
}

/// Configuration for the Google token verifier
#[derive(Debug, Clone)]
pub struct GoogleAuthConfig {
    /// OAuth2 client ID the token audience must match
    pub client_id: String,
    /// Tokeninfo endpoint, overridable for tests
    pub tokeninfo_url: String,
}

impl GoogleAuthConfig {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            tokeninfo_url: "https://oauth2.googleapis.com/tokeninfo".to_string(),
        }
    }

    pub fn with_tokeninfo_url(mut self, url: impl Into<String>) -> Self {
        self.tokeninfo_url = url.into();
        self
    }
}

/// Verifier calling Google's tokeninfo endpoint over HTTPS
#[derive(Debug, Clone)]
pub struct GoogleTokenVerifier {
    config: GoogleAuthConfig,
    client: reqwest::Client,
}

impl GoogleTokenVerifier {
    pub fn new(config: GoogleAuthConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl IdTokenVerifier for GoogleTokenVerifier {
    async fn verify(&self, id_token: &str) -> Result<GoogleIdentity, DomainError> {
        let response = self
            .client
            .get(&self.config.tokeninfo_url)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| DomainError::internal(format!("Token verification request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(DomainError::invalid_token(format!(
                "Token rejected by verifier: {}",
                response.status()
            )));
        }

        let info: TokenInfoResponse = response
            .json()
            .await
            .map_err(|e| DomainError::invalid_token(format!("Malformed tokeninfo response: {}", e)))?;

        if info.aud != self.config.client_id {
            return Err(DomainError::invalid_token("Token audience mismatch"));
        }

        if info.email_verified.as_deref() != Some("true") {
            return Err(DomainError::invalid_token("Email not verified"));
        }

        Ok(GoogleIdentity {
            email: info.email,
            given_name: info.given_name,
            family_name: info.family_name,
            picture: info.picture,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn verifier_for(server: &MockServer) -> GoogleTokenVerifier {
        GoogleTokenVerifier::new(
            GoogleAuthConfig::new("client-123")
                .with_tokeninfo_url(format!("{}/tokeninfo", server.uri())),
        )
    }

    #[tokio::test]
    async fn test_verify_valid_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tokeninfo"))
            .and(query_param("id_token", "good-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "aud": "client-123",
                "email": "ada@example.com",
                "email_verified": "true",
                "given_name": "Ada",
                "family_name": "Lovelace",
                "picture": "https://example.com/pic.jpg"
            })))
            .mount(&server)
            .await;

        let identity = verifier_for(&server).verify("good-token").await.unwrap();

        assert_eq!(identity.email, "ada@example.com");
        assert_eq!(identity.given_name.as_deref(), Some("Ada"));
        assert_eq!(identity.picture.as_deref(), Some("https://example.com/pic.jpg"));
    }

    #[tokio::test]
    async fn test_verify_rejected_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tokeninfo"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_token"
            })))
            .mount(&server)
            .await;

        let result = verifier_for(&server).verify("bad-token").await;
        assert!(matches!(result, Err(DomainError::InvalidToken { .. })));
    }

    #[tokio::test]
    async fn test_verify_audience_mismatch() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tokeninfo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "aud": "some-other-client",
                "email": "ada@example.com",
                "email_verified": "true"
            })))
            .mount(&server)
            .await;

        let result = verifier_for(&server).verify("good-token").await;
        assert!(matches!(result, Err(DomainError::InvalidToken { .. })));
    }

    #[tokio::test]
    async fn test_verify_unverified_email() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tokeninfo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "aud": "client-123",
                "email": "ada@example.com",
                "email_verified": "false"
            })))
            .mount(&server)
            .await;

        let result = verifier_for(&server).verify("good-token").await;
        assert!(matches!(result, Err(DomainError::InvalidToken { .. })));
    }
}
