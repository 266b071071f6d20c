//! Row structs bridging SQL results to domain types.
//!
//! Enum-ish columns (`role`, `status`) travel as text; parsing them back can
//! only fail if the database was edited outside the application, and that
//! surfaces as a validation error from the parse helpers.

use chrono::{DateTime, NaiveDate, Utc};
use hostly_core::{
    Booking, BookingId, BookingStatus, BookingWithProperty, Favorite, FavoriteId,
    FavoriteProperty, Profile, Property, PropertyId, Result, Role, Session, SessionId, User,
    UserId,
};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(FromRow)]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub phone_number: Option<String>,
    pub about_me: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub languages: Option<String>,
    pub gender: Option<String>,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn into_user(self) -> Result<User> {
        Ok(User {
            id: UserId(self.id),
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            role: Role::parse(&self.role)?,
            profile: Profile {
                phone_number: self.phone_number,
                about_me: self.about_me,
                city: self.city,
                state: self.state,
                country: self.country,
                languages: self.languages,
                gender: self.gender,
                profile_image_url: self.profile_image_url,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(FromRow)]
pub(crate) struct PropertyRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub city: String,
    pub state: String,
    pub country: String,
    pub property_type: String,
    pub price_per_night: f64,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub max_guests: i32,
    pub amenities: Option<String>,
    pub main_image: Option<String>,
    pub tax_rate: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PropertyRow {
    pub(crate) fn into_property(self) -> Property {
        Property {
            id: PropertyId(self.id),
            owner_id: UserId(self.owner_id),
            name: self.name,
            description: self.description,
            city: self.city,
            state: self.state,
            country: self.country,
            property_type: self.property_type,
            price_per_night: self.price_per_night,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            max_guests: self.max_guests,
            amenities: self.amenities,
            main_image: self.main_image,
            tax_rate: self.tax_rate,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(FromRow)]
pub(crate) struct BookingRow {
    pub id: Uuid,
    pub property_id: Uuid,
    pub traveler_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub num_guests: i32,
    pub status: String,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookingRow {
    pub(crate) fn into_booking(self) -> Result<Booking> {
        Ok(Booking {
            id: BookingId(self.id),
            property_id: PropertyId(self.property_id),
            traveler_id: UserId(self.traveler_id),
            start_date: self.start_date,
            end_date: self.end_date,
            num_guests: self.num_guests,
            status: BookingStatus::parse(&self.status)?,
            total_price: self.total_price,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(FromRow)]
pub(crate) struct BookingWithPropertyRow {
    #[sqlx(flatten)]
    pub booking: BookingRow,
    pub property_name: String,
    pub property_city: String,
    pub property_state: String,
}

impl BookingWithPropertyRow {
    pub(crate) fn into_listing(self) -> Result<BookingWithProperty> {
        Ok(BookingWithProperty {
            booking: self.booking.into_booking()?,
            property_name: self.property_name,
            city: self.property_city,
            state: self.property_state,
        })
    }
}

#[derive(FromRow)]
pub(crate) struct FavoriteRow {
    pub id: Uuid,
    pub traveler_id: Uuid,
    pub property_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl FavoriteRow {
    pub(crate) fn into_favorite(self) -> Favorite {
        Favorite {
            id: FavoriteId(self.id),
            traveler_id: UserId(self.traveler_id),
            property_id: PropertyId(self.property_id),
            created_at: self.created_at,
        }
    }
}

#[derive(FromRow)]
pub(crate) struct FavoritePropertyRow {
    pub property_id: Uuid,
    pub name: String,
    pub city: String,
    pub state: String,
    pub property_type: String,
    pub price_per_night: f64,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub max_guests: i32,
    pub main_image: Option<String>,
    pub favorited_at: DateTime<Utc>,
}

impl FavoritePropertyRow {
    pub(crate) fn into_listing(self) -> FavoriteProperty {
        FavoriteProperty {
            property_id: PropertyId(self.property_id),
            name: self.name,
            city: self.city,
            state: self.state,
            property_type: self.property_type,
            price_per_night: self.price_per_night,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            max_guests: self.max_guests,
            main_image: self.main_image,
            favorited_at: self.favorited_at,
        }
    }
}

#[derive(FromRow)]
pub(crate) struct SessionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl SessionRow {
    pub(crate) fn into_session(self) -> Session {
        Session {
            id: SessionId(self.id),
            user_id: UserId(self.user_id),
            created_at: self.created_at,
            expires_at: self.expires_at,
            last_active: self.last_active,
        }
    }
}
