//! Session store trait.

use crate::ids::{SessionId, UserId};
use crate::session::Session;
use crate::Result;
use std::future::Future;

/// Server-side session storage, keyed by the cookie token.
///
/// Expired sessions are treated as absent: `get_session` reports them as
/// [`crate::Error::SessionExpired`] and implementations may delete them
/// lazily on read.
pub trait SessionStore: Send + Sync {
    /// Persist a new session.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Database`] on storage failure.
    fn create_session(&self, session: &Session) -> impl Future<Output = Result<()>> + Send;

    /// Look up a live session and slide its `last_active` forward.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SessionNotFound`] for unknown tokens and
    /// [`crate::Error::SessionExpired`] for expired ones.
    fn get_session(
        &self,
        session_id: SessionId,
    ) -> impl Future<Output = Result<Session>> + Send;

    /// Destroy a session (logout). Destroying an unknown session is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Database`] on storage failure.
    fn delete_session(&self, session_id: SessionId) -> impl Future<Output = Result<()>> + Send;

    /// Destroy all of a user's sessions. Used when a session points at a
    /// deleted account.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Database`] on storage failure.
    fn delete_user_sessions(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<usize>> + Send;
}
