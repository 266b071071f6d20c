//! User repository trait.

use crate::ids::UserId;
use crate::user::{NewUser, ProfileUpdate, User};
use crate::Result;
use std::future::Future;

/// Storage for user accounts.
pub trait UserRepository: Send + Sync {
    /// Create a user.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Conflict`] if the email is already taken, or
    /// [`crate::Error::Database`] on storage failure.
    fn create_user(&self, user: NewUser) -> impl Future<Output = Result<User>> + Send;

    /// Fetch a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if no such user exists.
    fn get_user_by_id(&self, user_id: UserId) -> impl Future<Output = Result<User>> + Send;

    /// Fetch a user by email (lowercased before lookup).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if no such user exists.
    fn get_user_by_email(&self, email: &str) -> impl Future<Output = Result<User>> + Send;

    /// Whether an account exists for this email.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Database`] on storage failure.
    fn email_exists(&self, email: &str) -> impl Future<Output = Result<bool>> + Send;

    /// Apply a partial profile update and return the fresh user.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if the user no longer exists.
    fn update_profile(
        &self,
        user_id: UserId,
        update: ProfileUpdate,
    ) -> impl Future<Output = Result<User>> + Send;
}
