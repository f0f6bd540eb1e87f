use chrono::NaiveDate;
use serde::Serialize;

use crate::repository::{Field, Payload, Table};

/// A hotel row.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Hotel {
    /// Primary key, assigned by the storage engine.
    pub id: i32,
    /// Hotel name, bounded to 100 characters at the schema level.
    pub title: String,
    /// Free-text address.
    pub location: String,
}

impl Table for Hotel {
    const TABLE: &'static str = "hotels";
    const COLUMNS: &'static [&'static str] = &["id", "title", "location"];
}

/// Full hotel payload for inserts and whole-row updates.
#[derive(Debug, Clone)]
pub struct HotelData {
    /// Hotel name.
    pub title: String,
    /// Free-text address.
    pub location: String,
}

impl Payload for HotelData {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::set("title", self.title.clone()),
            Field::set("location", self.location.clone()),
        ]
    }
}

/// Sparse hotel patch; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct HotelPatch {
    /// New hotel name, if provided.
    pub title: Option<String>,
    /// New address, if provided.
    pub location: Option<String>,
}

impl Payload for HotelPatch {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::opt("title", self.title.clone()),
            Field::opt("location", self.location.clone()),
        ]
    }
}

/// A room row. Every room belongs to exactly one hotel.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Room {
    /// Primary key, assigned by the storage engine.
    pub id: i32,
    /// Owning hotel.
    pub hotel_id: i32,
    /// Room name.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Price per night.
    pub price: i32,
    /// Number of available units of this room type.
    pub quantity: i32,
}

impl Table for Room {
    const TABLE: &'static str = "rooms";
    const COLUMNS: &'static [&'static str] =
        &["id", "hotel_id", "title", "description", "price", "quantity"];
}

/// Full room payload for inserts and whole-row updates.
#[derive(Debug, Clone)]
pub struct RoomData {
    /// Owning hotel.
    pub hotel_id: i32,
    /// Room name.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Price per night.
    pub price: i32,
    /// Number of available units.
    pub quantity: i32,
}

impl Payload for RoomData {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::set("hotel_id", self.hotel_id),
            Field::set("title", self.title.clone()),
            Field::set("description", self.description.clone()),
            Field::set("price", self.price),
            Field::set("quantity", self.quantity),
        ]
    }
}

/// Sparse room patch; `None` fields are left untouched. A description can
/// only be cleared through a full update, not a patch.
#[derive(Debug, Clone, Default)]
pub struct RoomPatch {
    /// New room name, if provided.
    pub title: Option<String>,
    /// New description, if provided.
    pub description: Option<String>,
    /// New per-night price, if provided.
    pub price: Option<i32>,
    /// New unit count, if provided.
    pub quantity: Option<i32>,
}

impl Payload for RoomPatch {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::opt("title", self.title.clone()),
            Field::opt("description", self.description.clone()),
            Field::opt("price", self.price),
            Field::opt("quantity", self.quantity),
        ]
    }
}

/// A user row. The password hash is opaque and never serialized to clients;
/// handlers expose a dedicated response type instead.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    /// Primary key, assigned by the storage engine.
    pub id: i32,
    /// Login email, globally unique.
    pub email: String,
    /// Salted one-way password hash.
    pub hashed_password: String,
}

impl Table for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &["id", "email", "hashed_password"];
}

/// User payload for registration.
#[derive(Debug, Clone)]
pub struct UserData {
    /// Login email.
    pub email: String,
    /// Already-hashed password; plaintext never reaches the storage layer.
    pub hashed_password: String,
}

impl Payload for UserData {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::set("email", self.email.clone()),
            Field::set("hashed_password", self.hashed_password.clone()),
        ]
    }
}

/// A booking row tying a user to a room for a date range.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Booking {
    /// Primary key, assigned by the storage engine.
    pub id: i32,
    /// Booking owner.
    pub user_id: i32,
    /// Booked room.
    pub room_id: i32,
    /// First night of the stay.
    pub date_from: NaiveDate,
    /// Check-out date; always after `date_from`.
    pub date_to: NaiveDate,
    /// Per-night rate snapshotted from the room at booking time.
    pub price: i32,
}

impl Booking {
    /// Total cost of the stay: the per-night snapshot times the number of
    /// nights.
    pub fn total_cost(&self) -> i32 {
        self.price * (self.date_to - self.date_from).num_days() as i32
    }
}

impl Table for Booking {
    const TABLE: &'static str = "bookings";
    const COLUMNS: &'static [&'static str] =
        &["id", "user_id", "room_id", "date_from", "date_to", "price"];
}

/// Booking payload for inserts.
#[derive(Debug, Clone)]
pub struct BookingData {
    /// Booking owner.
    pub user_id: i32,
    /// Booked room.
    pub room_id: i32,
    /// First night of the stay.
    pub date_from: NaiveDate,
    /// Check-out date.
    pub date_to: NaiveDate,
    /// Per-night rate snapshot.
    pub price: i32,
}

impl Payload for BookingData {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::set("user_id", self.user_id),
            Field::set("room_id", self.room_id),
            Field::set("date_from", self.date_from),
            Field::set("date_to", self.date_to),
            Field::set("price", self.price),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_cost_multiplies_price_by_nights() {
        let booking = Booking {
            id: 1,
            user_id: 1,
            room_id: 1,
            date_from: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            date_to: NaiveDate::from_ymd_opt(2026, 8, 13).unwrap(),
            price: 100,
        };
        assert_eq!(booking.total_cost(), 300);
    }

    #[test]
    fn room_patch_provides_only_set_fields() {
        let patch = RoomPatch {
            price: Some(150),
            ..RoomPatch::default()
        };
        let provided: Vec<&str> = patch
            .fields()
            .into_iter()
            .filter(|field| field.value.is_some())
            .map(|field| field.column)
            .collect();
        assert_eq!(provided, vec!["price"]);
    }

    #[test]
    fn full_payloads_provide_every_field() {
        let data = RoomData {
            hotel_id: 1,
            title: "Suite".to_string(),
            description: None,
            price: 100,
            quantity: 2,
        };
        assert!(data.fields().iter().all(|field| field.value.is_some()));
    }
}
