//! JWT claims structure.

use chrono::{DateTime, Utc};
use rolodex_core::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: String,

    /// User's email.
    pub email: String,

    /// Issued at timestamp.
    pub iat: i64,

    /// Expiration timestamp.
    pub exp: i64,

    /// Issuer.
    pub iss: String,

    /// Audience.
    pub aud: String,

    /// JWT ID (unique identifier for this token).
    pub jti: String,
}

impl Claims {
    /// Creates new access token claims.
    #[must_use]
    pub fn new(
        user_id: UserId,
        email: String,
        issuer: String,
        audience: String,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: user_id.to_string(),
            email,
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
            iss: issuer,
            aud: audience,
            jti: Uuid::now_v7().to_string(),
        }
    }

    /// Returns the user ID when the subject parses as one.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        UserId::parse(&self.sub).ok()
    }

    /// Checks if the token is expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Returns the expiration time.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_claims_carry_subject() {
        let user_id = UserId::new();
        let claims = Claims::new(
            user_id,
            "test@example.com".to_string(),
            "issuer".to_string(),
            "audience".to_string(),
            Utc::now() + Duration::hours(1),
        );

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.user_id(), Some(user_id));
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_expired_claims() {
        let claims = Claims::new(
            UserId::new(),
            "test@example.com".to_string(),
            "issuer".to_string(),
            "audience".to_string(),
            Utc::now() - Duration::hours(1),
        );

        assert!(claims.is_expired());
    }

    #[test]
    fn test_malformed_subject() {
        let mut claims = Claims::new(
            UserId::new(),
            "test@example.com".to_string(),
            "issuer".to_string(),
            "audience".to_string(),
            Utc::now() + Duration::hours(1),
        );
        claims.sub = "not-a-uuid".to_string();
        assert!(claims.user_id().is_none());
    }
}
