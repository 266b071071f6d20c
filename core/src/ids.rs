//! Identifier newtypes.
//!
//! Every entity gets its own UUID-backed id type so a booking id can never be
//! passed where a property id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub uuid::Uuid);

        impl $name {
            /// Generate a new random id.
            #[must_use]
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Parse an id from its string form.
            ///
            /// # Errors
            ///
            /// Returns [`crate::Error::Validation`] if the string is not a
            /// valid UUID.
            pub fn parse(s: &str) -> crate::Result<Self> {
                uuid::Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|_| crate::Error::Validation(format!("Invalid id: {s}")))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

entity_id! {
    /// Unique identifier for a user (traveler or owner).
    UserId
}

entity_id! {
    /// Unique identifier for a property listing.
    PropertyId
}

entity_id! {
    /// Unique identifier for a booking.
    BookingId
}

entity_id! {
    /// Unique identifier for a favorite entry.
    FavoriteId
}

entity_id! {
    /// Server-side session identifier. Doubles as the cookie token, so it is
    /// never logged in full outside debug builds.
    SessionId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        fn takes_user_id(_: UserId) {}
        takes_user_id(UserId::new());
    }

    #[test]
    fn parse_round_trips() {
        let id = PropertyId::new();
        let parsed = PropertyId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(BookingId::parse("not-a-uuid").is_err());
    }
}
