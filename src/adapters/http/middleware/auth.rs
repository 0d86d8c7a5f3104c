//! Shared-token authentication for the webhook and operator routes.
//!
//! The token travels as the `auth` query parameter (or, for the inbound
//! webhook, an `auth` body field). Comparison is constant-time. With no
//! token configured every request is rejected.
//!
//! ```ignore
//! async fn list(_auth: RequireOperator, State(state): State<AppState>) -> ... { }
//! ```

use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum::http::Uri;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use subtle::ConstantTimeEq;

use super::super::error::ApiError;
use super::super::state::AppState;

/// The configured shared secret.
#[derive(Clone, Default)]
pub struct OperatorToken(Option<Arc<Secret<String>>>);

impl OperatorToken {
    /// Empty tokens count as unset.
    pub fn new(token: Option<String>) -> Self {
        Self(token.filter(|t| !t.is_empty()).map(|t| Arc::new(Secret::new(t))))
    }

    pub fn is_configured(&self) -> bool {
        self.0.is_some()
    }

    /// Constant-time comparison against the presented token.
    pub fn verify(&self, presented: Option<&str>) -> bool {
        match (&self.0, presented) {
            (Some(expected), Some(presented)) => {
                let expected = expected.expose_secret().as_bytes();
                expected.ct_eq(presented.as_bytes()).unwrap_u8() == 1
            }
            _ => false,
        }
    }
}

impl std::fmt::Debug for OperatorToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("OperatorToken")
            .field(&self.0.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// `?auth=` query parameter.
#[derive(Debug, Default, Deserialize)]
pub struct AuthQuery {
    pub auth: Option<String>,
}

impl AuthQuery {
    /// Parses the query string, treating a malformed one as absent.
    pub fn from_uri(uri: &Uri) -> Self {
        Query::<AuthQuery>::try_from_uri(uri)
            .map(|Query(q)| q)
            .unwrap_or_default()
    }
}

/// Extractor that requires the operator token in the query string.
#[derive(Debug, Clone, Copy)]
pub struct RequireOperator;

#[async_trait]
impl FromRequestParts<AppState> for RequireOperator {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let query = AuthQuery::from_uri(&parts.uri);
        if state.operator_token().verify(query.auth.as_deref()) {
            Ok(RequireOperator)
        } else {
            tracing::warn!(path = %parts.uri.path(), "Rejected request with bad operator token");
            Err(ApiError::Unauthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_token_verifies() {
        let token = OperatorToken::new(Some("s3cret".to_string()));
        assert!(token.verify(Some("s3cret")));
        assert!(!token.verify(Some("s3cre")));
        assert!(!token.verify(Some("wrong!")));
        assert!(!token.verify(None));
    }

    #[test]
    fn unset_token_rejects_everything() {
        for token in [OperatorToken::new(None), OperatorToken::new(Some(String::new()))] {
            assert!(!token.is_configured());
            assert!(!token.verify(None));
            assert!(!token.verify(Some("")));
        }
    }

    #[test]
    fn debug_redacts_token() {
        let token = OperatorToken::new(Some("s3cret".to_string()));
        assert!(!format!("{:?}", token).contains("s3cret"));
    }

    #[test]
    fn auth_query_parses_from_uri() {
        let uri: Uri = "/api/conversations?auth=abc&x=1".parse().unwrap();
        assert_eq!(AuthQuery::from_uri(&uri).auth.as_deref(), Some("abc"));

        let bare: Uri = "/api/conversations".parse().unwrap();
        assert_eq!(AuthQuery::from_uri(&bare).auth, None);
    }
}
