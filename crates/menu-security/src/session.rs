//! Authenticated session carrying granted roles

use chrono::Utc;
use uuid::Uuid;

use crate::jwt::Claims;

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub subject: String,
    pub roles: Vec<String>,
    pub expires_at: i64,
}

impl Session {
    pub fn new(subject: impl Into<String>, roles: Vec<String>, ttl_seconds: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject: subject.into(),
            roles,
            expires_at: Utc::now().timestamp() + ttl_seconds,
        }
    }

    pub fn from_claims(claims: Claims) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject: claims.sub,
            roles: claims.roles,
            expires_at: claims.exp,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now().timestamp()
    }

    /// Expired sessions grant nothing.
    pub fn has_role(&self, role: &str) -> bool {
        !self.is_expired() && self.roles.iter().any(|granted| granted == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_role() {
        let session = Session::new("alice", vec!["ROLE_EDITOR".to_string()], 60);
        assert!(session.has_role("ROLE_EDITOR"));
        assert!(!session.has_role("ROLE_ADMIN"));
    }

    #[test]
    fn test_expired_session_grants_nothing() {
        let session = Session::new("alice", vec!["ROLE_EDITOR".to_string()], -1);
        assert!(session.is_expired());
        assert!(!session.has_role("ROLE_EDITOR"));
    }
}
