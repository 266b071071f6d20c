//! User accounts and profiles.

use crate::ids::UserId;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a user is allowed to do on the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Searches and books properties.
    Traveler,
    /// Lists and manages properties.
    Owner,
    /// Acts as both traveler and owner.
    Both,
}

impl Role {
    /// String form used in the database and API payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Traveler => "traveler",
            Self::Owner => "owner",
            Self::Both => "both",
        }
    }

    /// Parse a role, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for anything other than
    /// `traveler`/`owner`/`both`.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "traveler" => Ok(Self::Traveler),
            "owner" => Ok(Self::Owner),
            "both" => Ok(Self::Both),
            _ => Err(Error::Validation("Invalid role".to_string())),
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Traveler
    }
}

/// A registered user.
///
/// The password hash never leaves the persistence boundary: it is skipped on
/// serialization, mirroring the original schema's `select: false`.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// User id.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email (unique, stored lowercased).
    pub email: String,
    /// Argon2 PHC password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Marketplace role.
    pub role: Role,
    /// Profile details, all optional.
    #[serde(flatten)]
    pub profile: Profile,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Optional profile fields shown on the user's page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    /// Contact phone number.
    pub phone_number: Option<String>,
    /// Free-form bio.
    pub about_me: Option<String>,
    /// Home city.
    pub city: Option<String>,
    /// Home state.
    pub state: Option<String>,
    /// Home country.
    pub country: Option<String>,
    /// Spoken languages, comma-joined.
    pub languages: Option<String>,
    /// Self-described gender.
    pub gender: Option<String>,
    /// Avatar URL.
    pub profile_image_url: Option<String>,
}

/// Input for registering a user. The password arrives in the clear and is
/// hashed before this struct is handed to the repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Argon2 PHC password hash.
    pub password_hash: String,
    /// Marketplace role.
    pub role: Role,
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New phone number.
    pub phone_number: Option<String>,
    /// New bio.
    pub about_me: Option<String>,
    /// New city.
    pub city: Option<String>,
    /// New state.
    pub state: Option<String>,
    /// New country.
    pub country: Option<String>,
    /// New languages.
    pub languages: Option<String>,
    /// New gender.
    pub gender: Option<String>,
}

/// Validate an email shape the way the original model did: something before
/// an `@`, something between `@` and `.`, something after.
///
/// # Errors
///
/// Returns [`Error::Validation`] for malformed addresses.
pub fn validate_email(email: &str) -> Result<()> {
    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !local.contains(char::is_whitespace)
            && domain.split_once('.').is_some_and(|(host, tld)| {
                !host.is_empty()
                    && !tld.is_empty()
                    && !domain.contains(char::is_whitespace)
            })
    });
    if valid {
        Ok(())
    } else {
        Err(Error::Validation(
            "Please enter a valid email address".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_is_case_insensitive() {
        assert_eq!(Role::parse("Owner").unwrap(), Role::Owner);
        assert_eq!(Role::parse("BOTH").unwrap(), Role::Both);
        assert!(Role::parse("admin").is_err());
    }

    #[test]
    fn role_round_trips_through_str() {
        for role in [Role::Traveler, Role::Owner, Role::Both] {
            assert_eq!(Role::parse(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn email_validation() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("spa ce@example.com").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn password_hash_is_not_serialized() {
        let user = User {
            id: UserId::new(),
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password_hash: "$argon2id$secret".into(),
            role: Role::Traveler,
            profile: Profile::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password"));
    }
}
