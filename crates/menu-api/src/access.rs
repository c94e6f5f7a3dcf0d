//! Permission checks backed by an optional bearer-token session

use axum::http::{header, HeaderMap};
use menu_core::AccessDecision;
use menu_security::{JwtService, Session};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct SessionAccess {
    session: Option<Session>,
}

impl SessionAccess {
    pub fn new(session: Option<Session>) -> Self {
        Self { session }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Session from an `Authorization: Bearer` header. A missing or invalid
    /// token yields an anonymous request.
    pub fn from_headers(headers: &HeaderMap, jwt: Option<&JwtService>) -> Self {
        let Some(jwt) = jwt else {
            return Self::anonymous();
        };

        let Some(token) = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
        else {
            return Self::anonymous();
        };

        match jwt.validate_token(token.trim()) {
            Ok(claims) => {
                debug!("Menu request authenticated as {}", claims.sub);
                Self::new(Some(Session::from_claims(claims)))
            }
            Err(e) => {
                warn!("Ignoring invalid bearer token: {}", e);
                Self::anonymous()
            }
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }
}

impl AccessDecision for SessionAccess {
    fn is_granted(&self, role: &str) -> bool {
        self.session
            .as_ref()
            .map_or(false, |session| session.has_role(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_no_session_grants_nothing() {
        assert!(!SessionAccess::anonymous().is_granted("ROLE_USER"));
    }

    #[test]
    fn test_bearer_token_roles() {
        let jwt = JwtService::new("menu-secret".to_string(), 900);
        let token = jwt
            .generate_access_token("alice", &["ROLE_ADMIN".to_string()])
            .unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );

        let access = SessionAccess::from_headers(&headers, Some(&jwt));
        assert!(access.is_granted("ROLE_ADMIN"));
        assert!(!access.is_granted("ROLE_EDITOR"));
        assert_eq!(access.session().map(|s| s.subject.as_str()), Some("alice"));
    }

    #[test]
    fn test_invalid_token_is_anonymous() {
        let jwt = JwtService::new("menu-secret".to_string(), 900);
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer not-a-token"));

        let access = SessionAccess::from_headers(&headers, Some(&jwt));
        assert!(access.session().is_none());
        assert!(!access.is_granted("ROLE_ADMIN"));
    }
}
