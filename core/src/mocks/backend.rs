//! Shared in-memory backend implementing all repository traits.

use crate::booking::{Booking, BookingStatus, BookingWithProperty, NewBooking};
use crate::favorite::{Favorite, FavoriteProperty};
use crate::ids::{BookingId, FavoriteId, PropertyId, SessionId, UserId};
use crate::property::{NewProperty, Property, PropertySearch};
use crate::repository::{
    BookingRepository, FavoriteRepository, PropertyRepository, SessionStore, UserRepository,
};
use crate::session::Session;
use crate::user::{NewUser, Profile, ProfileUpdate, User};
use crate::{Error, Result};
use chrono::Utc;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct Inner {
    users: HashMap<UserId, User>,
    properties: HashMap<PropertyId, Property>,
    bookings: HashMap<BookingId, Booking>,
    favorites: HashMap<FavoriteId, Favorite>,
    sessions: HashMap<SessionId, Session>,
}

/// In-memory store implementing every repository trait.
///
/// Clones share the same state, so one backend can be handed to the web
/// state as user repo, property repo, booking repo, favorite repo and
/// session store at once.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| Error::Internal("mock backend mutex poisoned".to_string()))
    }

    /// Number of live sessions, for logout assertions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] if the backing mutex is poisoned.
    pub fn session_count(&self) -> Result<usize> {
        Ok(self.lock()?.sessions.len())
    }

    /// Remove a user directly, bypassing the repository surface. Used to
    /// test the stale-session path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] if the backing mutex is poisoned.
    pub fn delete_user(&self, user_id: UserId) -> Result<()> {
        self.lock()?.users.remove(&user_id);
        Ok(())
    }
}

impl UserRepository for MemoryBackend {
    fn create_user(&self, user: NewUser) -> impl Future<Output = Result<User>> + Send {
        let backend = self.clone();
        async move {
            let mut inner = backend.lock()?;
            let email = user.email.to_lowercase();
            if inner
                .users
                .values()
                .any(|u| u.email.eq_ignore_ascii_case(&email))
            {
                return Err(Error::Conflict("Email already exists".to_string()));
            }
            let now = Utc::now();
            let created = User {
                id: UserId::new(),
                name: user.name,
                email,
                password_hash: user.password_hash,
                role: user.role,
                profile: Profile::default(),
                created_at: now,
                updated_at: now,
            };
            inner.users.insert(created.id, created.clone());
            Ok(created)
        }
    }

    fn get_user_by_id(&self, user_id: UserId) -> impl Future<Output = Result<User>> + Send {
        let backend = self.clone();
        async move {
            backend
                .lock()?
                .users
                .get(&user_id)
                .cloned()
                .ok_or(Error::not_found("User"))
        }
    }

    fn get_user_by_email(&self, email: &str) -> impl Future<Output = Result<User>> + Send {
        let backend = self.clone();
        let email = email.to_lowercase();
        async move {
            backend
                .lock()?
                .users
                .values()
                .find(|u| u.email == email)
                .cloned()
                .ok_or(Error::not_found("User"))
        }
    }

    fn email_exists(&self, email: &str) -> impl Future<Output = Result<bool>> + Send {
        let backend = self.clone();
        let email = email.to_lowercase();
        async move { Ok(backend.lock()?.users.values().any(|u| u.email == email)) }
    }

    fn update_profile(
        &self,
        user_id: UserId,
        update: ProfileUpdate,
    ) -> impl Future<Output = Result<User>> + Send {
        let backend = self.clone();
        async move {
            let mut inner = backend.lock()?;
            let user = inner
                .users
                .get_mut(&user_id)
                .ok_or(Error::not_found("User"))?;
            if let Some(name) = update.name {
                user.name = name;
            }
            if let Some(email) = update.email {
                user.email = email.to_lowercase();
            }
            if let Some(v) = update.phone_number {
                user.profile.phone_number = Some(v);
            }
            if let Some(v) = update.about_me {
                user.profile.about_me = Some(v);
            }
            if let Some(v) = update.city {
                user.profile.city = Some(v);
            }
            if let Some(v) = update.state {
                user.profile.state = Some(v);
            }
            if let Some(v) = update.country {
                user.profile.country = Some(v);
            }
            if let Some(v) = update.languages {
                user.profile.languages = Some(v);
            }
            if let Some(v) = update.gender {
                user.profile.gender = Some(v);
            }
            user.updated_at = Utc::now();
            Ok(user.clone())
        }
    }
}

impl PropertyRepository for MemoryBackend {
    fn create_property(
        &self,
        property: NewProperty,
    ) -> impl Future<Output = Result<Property>> + Send {
        let backend = self.clone();
        async move {
            let now = Utc::now();
            let created = Property {
                id: PropertyId::new(),
                owner_id: property.owner_id,
                name: property.name,
                description: property.description,
                city: property.city,
                state: property.state,
                country: property.country,
                property_type: property.property_type,
                price_per_night: property.price_per_night,
                bedrooms: property.bedrooms,
                bathrooms: property.bathrooms,
                max_guests: property.max_guests,
                amenities: property.amenities,
                main_image: property.main_image,
                tax_rate: property.tax_rate,
                created_at: now,
                updated_at: now,
            };
            backend
                .lock()?
                .properties
                .insert(created.id, created.clone());
            Ok(created)
        }
    }

    fn get_property(
        &self,
        property_id: PropertyId,
    ) -> impl Future<Output = Result<Property>> + Send {
        let backend = self.clone();
        async move {
            backend
                .lock()?
                .properties
                .get(&property_id)
                .cloned()
                .ok_or(Error::not_found("Property"))
        }
    }

    fn search(
        &self,
        search: &PropertySearch,
    ) -> impl Future<Output = Result<Vec<Property>>> + Send {
        let backend = self.clone();
        let location = search.location.clone().map(|l| l.to_lowercase());
        let guests = search.guests;
        async move {
            let inner = backend.lock()?;
            let mut results: Vec<Property> = inner
                .properties
                .values()
                .filter(|p| {
                    location.as_deref().is_none_or(|needle| {
                        p.city.to_lowercase().contains(needle)
                            || p.state.to_lowercase().contains(needle)
                            || p.country.to_lowercase().contains(needle)
                    })
                })
                .filter(|p| guests.is_none_or(|g| p.max_guests >= g))
                .cloned()
                .collect();
            results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(results)
        }
    }

    fn list_by_owner(
        &self,
        owner_id: UserId,
    ) -> impl Future<Output = Result<Vec<Property>>> + Send {
        let backend = self.clone();
        async move {
            let inner = backend.lock()?;
            let mut results: Vec<Property> = inner
                .properties
                .values()
                .filter(|p| p.owner_id == owner_id)
                .cloned()
                .collect();
            results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(results)
        }
    }

    fn accepted_booking_counts(
        &self,
        owner_id: UserId,
    ) -> impl Future<Output = Result<HashMap<PropertyId, i64>>> + Send {
        let backend = self.clone();
        async move {
            let inner = backend.lock()?;
            let mut counts = HashMap::new();
            for booking in inner.bookings.values() {
                if booking.status != BookingStatus::Accepted {
                    continue;
                }
                let owned = inner
                    .properties
                    .get(&booking.property_id)
                    .is_some_and(|p| p.owner_id == owner_id);
                if owned {
                    *counts.entry(booking.property_id).or_insert(0) += 1;
                }
            }
            Ok(counts)
        }
    }
}

impl BookingRepository for MemoryBackend {
    fn create_booking(
        &self,
        booking: NewBooking,
    ) -> impl Future<Output = Result<Booking>> + Send {
        let backend = self.clone();
        async move {
            let now = Utc::now();
            let created = Booking {
                id: BookingId::new(),
                property_id: booking.property_id,
                traveler_id: booking.traveler_id,
                start_date: booking.start_date,
                end_date: booking.end_date,
                num_guests: booking.num_guests,
                status: BookingStatus::Pending,
                total_price: booking.total_price,
                created_at: now,
                updated_at: now,
            };
            backend.lock()?.bookings.insert(created.id, created.clone());
            Ok(created)
        }
    }

    fn get_booking(
        &self,
        booking_id: BookingId,
    ) -> impl Future<Output = Result<Booking>> + Send {
        let backend = self.clone();
        async move {
            backend
                .lock()?
                .bookings
                .get(&booking_id)
                .cloned()
                .ok_or(Error::not_found("Booking"))
        }
    }

    fn list_for_traveler(
        &self,
        traveler_id: UserId,
    ) -> impl Future<Output = Result<Vec<BookingWithProperty>>> + Send {
        let backend = self.clone();
        async move {
            let inner = backend.lock()?;
            let mut results: Vec<BookingWithProperty> = inner
                .bookings
                .values()
                .filter(|b| b.traveler_id == traveler_id)
                .map(|b| join_property(b, &inner))
                .collect();
            results.sort_by(|a, b| b.booking.created_at.cmp(&a.booking.created_at));
            Ok(results)
        }
    }

    fn list_for_owner(
        &self,
        owner_id: UserId,
    ) -> impl Future<Output = Result<Vec<BookingWithProperty>>> + Send {
        let backend = self.clone();
        async move {
            let inner = backend.lock()?;
            let mut results: Vec<BookingWithProperty> = inner
                .bookings
                .values()
                .filter(|b| {
                    inner
                        .properties
                        .get(&b.property_id)
                        .is_some_and(|p| p.owner_id == owner_id)
                })
                .map(|b| join_property(b, &inner))
                .collect();
            results.sort_by(|a, b| b.booking.created_at.cmp(&a.booking.created_at));
            Ok(results)
        }
    }

    fn update_status(
        &self,
        booking_id: BookingId,
        status: BookingStatus,
    ) -> impl Future<Output = Result<Booking>> + Send {
        let backend = self.clone();
        async move {
            let mut inner = backend.lock()?;
            let booking = inner
                .bookings
                .get_mut(&booking_id)
                .ok_or(Error::not_found("Booking"))?;
            booking.status = status;
            booking.updated_at = Utc::now();
            Ok(booking.clone())
        }
    }
}

fn join_property(booking: &Booking, inner: &Inner) -> BookingWithProperty {
    let (name, city, state) = inner.properties.get(&booking.property_id).map_or_else(
        || ("Unknown".to_string(), String::new(), String::new()),
        |p| (p.name.clone(), p.city.clone(), p.state.clone()),
    );
    BookingWithProperty {
        booking: booking.clone(),
        property_name: name,
        city,
        state,
    }
}

impl FavoriteRepository for MemoryBackend {
    fn add_favorite(
        &self,
        traveler_id: UserId,
        property_id: PropertyId,
    ) -> impl Future<Output = Result<Favorite>> + Send {
        let backend = self.clone();
        async move {
            let mut inner = backend.lock()?;
            let duplicate = inner
                .favorites
                .values()
                .any(|f| f.traveler_id == traveler_id && f.property_id == property_id);
            if duplicate {
                return Err(Error::Conflict(
                    "Property already in favorites".to_string(),
                ));
            }
            let created = Favorite {
                id: FavoriteId::new(),
                traveler_id,
                property_id,
                created_at: Utc::now(),
            };
            inner.favorites.insert(created.id, created.clone());
            Ok(created)
        }
    }

    fn remove_favorite(
        &self,
        traveler_id: UserId,
        property_id: PropertyId,
    ) -> impl Future<Output = Result<()>> + Send {
        let backend = self.clone();
        async move {
            let mut inner = backend.lock()?;
            let id = inner
                .favorites
                .values()
                .find(|f| f.traveler_id == traveler_id && f.property_id == property_id)
                .map(|f| f.id)
                .ok_or(Error::not_found("Favorite"))?;
            inner.favorites.remove(&id);
            Ok(())
        }
    }

    fn list_favorites(
        &self,
        traveler_id: UserId,
    ) -> impl Future<Output = Result<Vec<FavoriteProperty>>> + Send {
        let backend = self.clone();
        async move {
            let inner = backend.lock()?;
            let mut results: Vec<FavoriteProperty> = inner
                .favorites
                .values()
                .filter(|f| f.traveler_id == traveler_id)
                .filter_map(|f| {
                    inner.properties.get(&f.property_id).map(|p| FavoriteProperty {
                        property_id: p.id,
                        name: p.name.clone(),
                        city: p.city.clone(),
                        state: p.state.clone(),
                        property_type: p.property_type.clone(),
                        price_per_night: p.price_per_night,
                        bedrooms: p.bedrooms,
                        bathrooms: p.bathrooms,
                        max_guests: p.max_guests,
                        main_image: p.main_image.clone(),
                        favorited_at: f.created_at,
                    })
                })
                .collect();
            results.sort_by(|a, b| b.favorited_at.cmp(&a.favorited_at));
            Ok(results)
        }
    }
}

impl SessionStore for MemoryBackend {
    fn create_session(&self, session: &Session) -> impl Future<Output = Result<()>> + Send {
        let backend = self.clone();
        let session = session.clone();
        async move {
            backend.lock()?.sessions.insert(session.id, session);
            Ok(())
        }
    }

    fn get_session(
        &self,
        session_id: SessionId,
    ) -> impl Future<Output = Result<Session>> + Send {
        let backend = self.clone();
        async move {
            let mut inner = backend.lock()?;
            let now = Utc::now();
            let Some(session) = inner.sessions.get_mut(&session_id) else {
                return Err(Error::SessionNotFound);
            };
            if session.is_expired(now) {
                inner.sessions.remove(&session_id);
                return Err(Error::SessionExpired);
            }
            session.last_active = now;
            Ok(session.clone())
        }
    }

    fn delete_session(&self, session_id: SessionId) -> impl Future<Output = Result<()>> + Send {
        let backend = self.clone();
        async move {
            backend.lock()?.sessions.remove(&session_id);
            Ok(())
        }
    }

    fn delete_user_sessions(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<usize>> + Send {
        let backend = self.clone();
        async move {
            let mut inner = backend.lock()?;
            let before = inner.sessions.len();
            inner.sessions.retain(|_, s| s.user_id != user_id);
            Ok(before - inner.sessions.len())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::user::Role;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Test".into(),
            email: email.into(),
            password_hash: "$argon2id$test".into(),
            role: Role::Both,
        }
    }

    fn new_property(owner_id: UserId, max_guests: i32) -> NewProperty {
        NewProperty {
            owner_id,
            name: "Loft".into(),
            description: None,
            city: "San Jose".into(),
            state: "CA".into(),
            country: "USA".into(),
            property_type: "apartment".into(),
            price_per_night: 100.0,
            bedrooms: 1,
            bathrooms: 1,
            max_guests,
            amenities: None,
            main_image: None,
            tax_rate: 0.0,
        }
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let backend = MemoryBackend::new();
        backend.create_user(new_user("a@example.com")).await.unwrap();
        let err = backend
            .create_user(new_user("A@Example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn duplicate_favorite_conflicts() {
        let backend = MemoryBackend::new();
        let owner = backend.create_user(new_user("o@example.com")).await.unwrap();
        let property = backend
            .create_property(new_property(owner.id, 4))
            .await
            .unwrap();
        let traveler = backend.create_user(new_user("t@example.com")).await.unwrap();

        backend.add_favorite(traveler.id, property.id).await.unwrap();
        let err = backend
            .add_favorite(traveler.id, property.id)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[tokio::test]
    async fn search_filters_location_and_guests() {
        let backend = MemoryBackend::new();
        let owner = backend.create_user(new_user("o@example.com")).await.unwrap();
        backend.create_property(new_property(owner.id, 2)).await.unwrap();
        backend.create_property(new_property(owner.id, 6)).await.unwrap();

        let hits = backend
            .search(&PropertySearch {
                location: Some("san jose".into()),
                guests: Some(4),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].max_guests, 6);

        let misses = backend
            .search(&PropertySearch {
                location: Some("denver".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(misses.is_empty());
    }

    #[tokio::test]
    async fn expired_session_reports_expired_then_missing() {
        let backend = MemoryBackend::new();
        let user = backend.create_user(new_user("s@example.com")).await.unwrap();
        let mut session = Session::start(user.id, Utc::now());
        session.expires_at = Utc::now() - chrono::Duration::minutes(1);
        backend.create_session(&session).await.unwrap();

        let first = backend.get_session(session.id).await.unwrap_err();
        assert_eq!(first, Error::SessionExpired);
        let second = backend.get_session(session.id).await.unwrap_err();
        assert_eq!(second, Error::SessionNotFound);
    }

    #[tokio::test]
    async fn owner_booking_counts_only_accepted() {
        let backend = MemoryBackend::new();
        let owner = backend.create_user(new_user("o@example.com")).await.unwrap();
        let traveler = backend.create_user(new_user("t@example.com")).await.unwrap();
        let property = backend
            .create_property(new_property(owner.id, 4))
            .await
            .unwrap();

        let booking = backend
            .create_booking(NewBooking {
                property_id: property.id,
                traveler_id: traveler.id,
                start_date: "2030-06-01".parse().unwrap(),
                end_date: "2030-06-04".parse().unwrap(),
                num_guests: 2,
                total_price: 300.0,
            })
            .await
            .unwrap();

        assert!(backend
            .accepted_booking_counts(owner.id)
            .await
            .unwrap()
            .is_empty());

        backend
            .update_status(booking.id, BookingStatus::Accepted)
            .await
            .unwrap();
        let counts = backend.accepted_booking_counts(owner.id).await.unwrap();
        assert_eq!(counts.get(&property.id), Some(&1));
    }
}
