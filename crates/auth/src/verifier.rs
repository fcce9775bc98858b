//! Credential verification: bearer parsing and signed-token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::OnceCell;

use gatehouse_core::UserId;
use gatehouse_store::SecretStore;

/// Why a credential was rejected. Detail is logged server-side only; callers
/// surface a generic unauthorized outcome.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("no auth token was provided")]
    MissingCredential,

    #[error("the provided auth token is not a bearer token")]
    MalformedCredential,

    #[error("unable to validate auth token because a signature is not configured")]
    SignatureUnavailable,

    #[error("auth token signature verification failed")]
    InvalidSignature,

    #[error("auth token has expired")]
    Expired,
}

/// Registered claims plus the custom payload carrying the caller identity.
///
/// The user id travels in the nested `data.sub` field, not the registered
/// subject claim.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    exp: i64,
    data: TokenPayload,
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenPayload {
    sub: String,
}

/// Validates bearer credentials against an HS256 signing key fetched lazily
/// from the secret store.
///
/// The key is fetched on first use and cached for the life of the verifier
/// (one per process). A fetch failure fails the current request and is not
/// retried within the call; the next request triggers a fresh fetch.
pub struct CredentialVerifier {
    secrets: std::sync::Arc<dyn SecretStore>,
    secret_id: String,
    key: OnceCell<DecodingKey>,
}

impl CredentialVerifier {
    pub fn new(secrets: std::sync::Arc<dyn SecretStore>, secret_id: impl Into<String>) -> Self {
        Self {
            secrets,
            secret_id: secret_id.into(),
            key: OnceCell::new(),
        }
    }

    /// Verify a raw `Authorization` header value and extract the caller's
    /// user id from the token payload.
    pub async fn verify(&self, raw_header: Option<&str>) -> Result<UserId, CredentialError> {
        let raw = raw_header
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or(CredentialError::MissingCredential)?;

        let (scheme, token) = raw
            .split_once(' ')
            .ok_or(CredentialError::MalformedCredential)?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(CredentialError::MalformedCredential);
        }
        let token = token.trim();
        if token.is_empty() {
            return Err(CredentialError::MalformedCredential);
        }

        let key = self.signing_key().await?;
        let decoded =
            jsonwebtoken::decode::<Claims>(token, key, &Validation::new(Algorithm::HS256))
                .map_err(|err| match err.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => CredentialError::Expired,
                    _ => CredentialError::InvalidSignature,
                })?;

        Ok(UserId::new(decoded.claims.data.sub))
    }

    async fn signing_key(&self) -> Result<&DecodingKey, CredentialError> {
        self.key
            .get_or_try_init(|| async {
                let secret = self
                    .secrets
                    .get_secret(&self.secret_id)
                    .await
                    .map_err(|err| {
                        tracing::error!(error = %err, "failed to fetch the token signing secret");
                        CredentialError::SignatureUnavailable
                    })?
                    .ok_or(CredentialError::SignatureUnavailable)?;
                Ok(DecodingKey::from_secret(secret.as_bytes()))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header};

    use gatehouse_store::InMemorySecrets;

    use super::*;

    const SECRET_ID: &str = "jwt-signature";

    fn verifier(secret: &str) -> CredentialVerifier {
        let secrets = Arc::new(InMemorySecrets::new().with_secret(SECRET_ID, secret));
        CredentialVerifier::new(secrets, SECRET_ID)
    }

    fn mint(secret: &str, sub: &str, expires_in: Duration) -> String {
        let claims = Claims {
            exp: (Utc::now() + expires_in).timestamp(),
            data: TokenPayload {
                sub: sub.to_string(),
            },
        };
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn valid_bearer_token_yields_payload_sub() {
        let token = mint("s3cret", "u1", Duration::minutes(10));
        let header = format!("Bearer {token}");

        let user_id = verifier("s3cret").verify(Some(&header)).await.unwrap();
        assert_eq!(user_id, UserId::new("u1"));
    }

    #[tokio::test]
    async fn scheme_is_case_insensitive() {
        let token = mint("s3cret", "u1", Duration::minutes(10));
        let header = format!("bEaReR {token}");

        assert!(verifier("s3cret").verify(Some(&header)).await.is_ok());
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        let err = verifier("s3cret").verify(None).await.unwrap_err();
        assert_eq!(err, CredentialError::MissingCredential);

        let err = verifier("s3cret").verify(Some("   ")).await.unwrap_err();
        assert_eq!(err, CredentialError::MissingCredential);
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_rejected() {
        let err = verifier("s3cret")
            .verify(Some("Basic dXNlcjpwYXNz"))
            .await
            .unwrap_err();
        assert_eq!(err, CredentialError::MalformedCredential);

        let err = verifier("s3cret")
            .verify(Some("just-a-token"))
            .await
            .unwrap_err();
        assert_eq!(err, CredentialError::MalformedCredential);
    }

    #[tokio::test]
    async fn wrong_signing_secret_is_rejected() {
        let token = mint("other-secret", "u1", Duration::minutes(10));
        let header = format!("Bearer {token}");

        let err = verifier("s3cret").verify(Some(&header)).await.unwrap_err();
        assert_eq!(err, CredentialError::InvalidSignature);
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let token = mint("s3cret", "u1", Duration::hours(-2));
        let header = format!("Bearer {token}");

        let err = verifier("s3cret").verify(Some(&header)).await.unwrap_err();
        assert_eq!(err, CredentialError::Expired);
    }

    #[tokio::test]
    async fn unconfigured_secret_fails_the_request() {
        let secrets = Arc::new(InMemorySecrets::new());
        let verifier = CredentialVerifier::new(secrets, SECRET_ID);
        let token = mint("s3cret", "u1", Duration::minutes(10));
        let header = format!("Bearer {token}");

        let err = verifier.verify(Some(&header)).await.unwrap_err();
        assert_eq!(err, CredentialError::SignatureUnavailable);
    }
}
