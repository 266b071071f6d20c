//! HTTP handlers, one module per surface.

pub mod agent;
pub mod auth;
pub mod bookings;
pub mod favorites;
pub mod health;
pub mod owner;
pub mod properties;
pub mod traveler;

use crate::error::AppError;
use crate::extractors::SessionToken;
use hostly_core::{Error, SessionStore, User, UserRepository};

/// Resolve the session cookie to a live user, or 401.
///
/// A session pointing at a deleted account is stale: all of that user's
/// sessions are destroyed and the request is rejected.
pub(crate) async fn require_user<U, S>(
    users: &U,
    sessions: &S,
    token: SessionToken,
) -> Result<User, AppError>
where
    U: UserRepository,
    S: SessionStore,
{
    let token = token
        .0
        .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

    let session = sessions
        .get_session(token)
        .await
        .map_err(|_| AppError::unauthorized("Authentication required"))?;

    match users.get_user_by_id(session.user_id).await {
        Ok(user) => Ok(user),
        Err(Error::NotFound { .. }) => {
            if let Err(e) = sessions.delete_user_sessions(session.user_id).await {
                tracing::warn!(error = %e, "Failed to clean up stale sessions");
            }
            Err(AppError::unauthorized("Authentication required"))
        }
        Err(e) => Err(e.into()),
    }
}
