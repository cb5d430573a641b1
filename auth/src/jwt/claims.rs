use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Bearer token payload.
///
/// Carries only the subject and its validity window. Nothing about the
/// subject is looked up again when the token is presented.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject, valid from now for `ttl`.
    pub fn for_subject(subject: impl ToString, ttl: Duration) -> Self {
        Self::issued_at(subject, Utc::now(), ttl)
    }

    /// Create claims for a subject with an explicit issue instant.
    pub fn issued_at(subject: impl ToString, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_subject() {
        let claims = Claims::for_subject("user123", Duration::hours(24));

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_issued_at() {
        let issued = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let claims = Claims::issued_at("user123", issued, Duration::minutes(5));

        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp, 1_700_000_300);
    }

    #[test]
    fn test_serialized_shape() {
        let issued = DateTime::from_timestamp(10, 0).unwrap();
        let claims = Claims::issued_at("user123", issued, Duration::seconds(5));

        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "sub": "user123", "iat": 10, "exp": 15 })
        );
    }
}
