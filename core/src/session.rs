//! Server-side sessions.

use crate::ids::{SessionId, UserId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How long a session lives without activity.
pub const SESSION_TTL_HOURS: i64 = 24;

/// A server-side session. The id is the cookie token; nothing else is stored
/// client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Session id (the cookie token).
    pub id: SessionId,
    /// Authenticated user.
    pub user_id: UserId,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// Hard expiry; sessions past this are treated as absent.
    pub expires_at: DateTime<Utc>,
    /// Last request seen on this session.
    pub last_active: DateTime<Utc>,
}

impl Session {
    /// Start a fresh session for a user with the standard TTL.
    #[must_use]
    pub fn start(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: SessionId::new(),
            user_id,
            created_at: now,
            expires_at: now + Duration::hours(SESSION_TTL_HOURS),
            last_active: now,
        }
    }

    /// Whether the session is past its expiry.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_live_for_a_day() {
        let now = Utc::now();
        let session = Session::start(UserId::new(), now);
        assert!(!session.is_expired(now));
        assert!(!session.is_expired(now + Duration::hours(23)));
        assert!(session.is_expired(now + Duration::hours(24)));
    }
}
