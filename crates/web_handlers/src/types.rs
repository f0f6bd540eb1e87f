use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use auth_services::types::AuthError;
use postgres::StoreError;
use postgres::types::{Booking, HotelData, HotelPatch, RoomData, RoomPatch, User};

/// Largest page size a caller may request; larger values are clamped.
pub const MAX_PER_PAGE: i64 = 30;

pub(crate) fn default_page() -> i64 {
    1
}

pub(crate) fn default_per_page() -> i64 {
    5
}

/// Pagination parameters taken from the query string. The handler computes
/// the bounds and supplies them to the repository explicitly; filters never
/// paginate on their own.
#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of rows per page.
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

impl Pagination {
    /// Row limit, clamped to `1..=MAX_PER_PAGE`.
    pub fn limit(&self) -> i64 {
        self.per_page.clamp(1, MAX_PER_PAGE)
    }

    /// Row offset of the requested page.
    pub fn offset(&self) -> i64 {
        self.limit() * (self.page.max(1) - 1)
    }
}

/// Request structure for user registration.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address of the user
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,

    /// Password for the user account
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Request structure for user login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address of the user
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,

    /// Password for the user account
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// User information returned to clients; never carries the password hash.
#[derive(Debug, Serialize)]
pub struct UserOut {
    /// Unique identifier for the user
    pub id: i32,
    /// Email address of the user
    pub email: String,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Query parameters for the hotel listing.
#[derive(Debug, Deserialize)]
pub struct HotelListQuery {
    /// Case-insensitive substring of the hotel title.
    pub sub_title: Option<String>,
    /// Case-insensitive substring of the hotel location.
    pub sub_location: Option<String>,
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of rows per page.
    #[serde(default = "default_per_page")]
    pub per_page: i64,
}

impl HotelListQuery {
    /// The pagination part of the query.
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// Request structure for creating or fully replacing a hotel.
#[derive(Debug, Deserialize, Validate)]
pub struct HotelCreate {
    /// Hotel name
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    /// Free-text address
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
}

impl From<HotelCreate> for HotelData {
    fn from(request: HotelCreate) -> Self {
        Self {
            title: request.title,
            location: request.location,
        }
    }
}

/// Request structure for partially updating a hotel.
#[derive(Debug, Deserialize, Validate)]
pub struct HotelPatchRequest {
    /// New hotel name, if provided
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: Option<String>,

    /// New address, if provided
    #[validate(length(min = 1, message = "Location must not be empty"))]
    pub location: Option<String>,
}

impl From<HotelPatchRequest> for HotelPatch {
    fn from(request: HotelPatchRequest) -> Self {
        Self {
            title: request.title,
            location: request.location,
        }
    }
}

/// Query parameters for the room listing of one hotel.
#[derive(Debug, Deserialize)]
pub struct RoomListQuery {
    /// Case-insensitive substring of the room title.
    pub sub_title: Option<String>,
}

/// Request structure for creating or fully replacing a room. The owning
/// hotel comes from the path, never from the body.
#[derive(Debug, Deserialize, Validate)]
pub struct RoomCreate {
    /// Room name
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    /// Optional free-text description
    pub description: Option<String>,

    /// Price per night
    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price: i32,

    /// Number of available units
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: i32,
}

impl RoomCreate {
    /// Attaches the owning hotel taken from the request path.
    pub fn into_data(self, hotel_id: i32) -> RoomData {
        RoomData {
            hotel_id,
            title: self.title,
            description: self.description,
            price: self.price,
            quantity: self.quantity,
        }
    }
}

/// Request structure for partially updating a room.
#[derive(Debug, Deserialize, Validate)]
pub struct RoomPatchRequest {
    /// New room name, if provided
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,

    /// New description, if provided
    pub description: Option<String>,

    /// New per-night price, if provided
    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price: Option<i32>,

    /// New unit count, if provided
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: Option<i32>,
}

impl From<RoomPatchRequest> for RoomPatch {
    fn from(request: RoomPatchRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            price: request.price,
            quantity: request.quantity,
        }
    }
}

/// Request structure for creating a booking. The owner is the authenticated
/// user and the per-night price is snapshotted from the room server-side.
#[derive(Debug, Deserialize)]
pub struct BookingCreate {
    /// Room to book
    pub room_id: i32,
    /// First night of the stay
    pub date_from: NaiveDate,
    /// Check-out date; must be after `date_from`
    pub date_to: NaiveDate,
}

/// Booking returned to clients, with the derived total cost.
#[derive(Debug, Serialize)]
pub struct BookingOut {
    /// Unique identifier for the booking
    pub id: i32,
    /// Booking owner
    pub user_id: i32,
    /// Booked room
    pub room_id: i32,
    /// First night of the stay
    pub date_from: NaiveDate,
    /// Check-out date
    pub date_to: NaiveDate,
    /// Per-night rate snapshotted at booking time
    pub price: i32,
    /// Price times the number of nights
    pub total_cost: i32,
}

impl From<Booking> for BookingOut {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            user_id: booking.user_id,
            room_id: booking.room_id,
            date_from: booking.date_from,
            date_to: booking.date_to,
            price: booking.price,
            total_cost: booking.total_cost(),
        }
    }
}

/// API-level error taxonomy. Storage and auth failures are translated into
/// these variants at the handler boundary; lower layers never pick HTTP
/// statuses themselves.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Zero rows matched a required lookup
    #[error("Resource not found")]
    NotFound,

    /// A unique constraint was breached (e.g. a duplicate email)
    #[error("Conflict with an existing resource")]
    Conflict,

    /// Missing, invalid, or expired credentials
    #[error("Unauthorized")]
    Unauthorized,

    /// The request shape was malformed
    #[error("Validation error: {0}")]
    Validation(String),

    /// A storage or internal failure; detail is logged, not leaked
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation => ApiError::Conflict,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::MissingToken | AuthError::InvalidToken => {
                ApiError::Unauthorized
            }
            AuthError::PasswordHash(err) => ApiError::Internal(err.to_string()),
        }
    }
}

impl actix_web::ResponseError for ApiError {
    fn error_response(&self) -> actix_web::HttpResponse {
        use actix_web::HttpResponse;

        match self {
            ApiError::NotFound => HttpResponse::NotFound().json(serde_json::json!({
                "error": "not_found",
                "message": "Resource not found"
            })),
            ApiError::Conflict => HttpResponse::Conflict().json(serde_json::json!({
                "error": "conflict",
                "message": "A resource with these unique fields already exists"
            })),
            ApiError::Unauthorized => HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "unauthorized",
                "message": "Invalid or missing credentials"
            })),
            ApiError::Validation(msg) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": "validation_error",
                "message": msg
            })),
            ApiError::Internal(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "internal_error",
                    "message": "An internal error occurred"
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_starts_at_offset_zero() {
        let pagination = Pagination {
            page: 1,
            per_page: 5,
        };
        assert_eq!(pagination.limit(), 5);
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn offset_grows_with_the_page_number() {
        let pagination = Pagination {
            page: 3,
            per_page: 5,
        };
        assert_eq!(pagination.offset(), 10);
    }

    #[test]
    fn oversized_and_non_positive_inputs_are_clamped() {
        let oversized = Pagination {
            page: 0,
            per_page: 1000,
        };
        assert_eq!(oversized.limit(), MAX_PER_PAGE);
        assert_eq!(oversized.offset(), 0);

        let non_positive = Pagination {
            page: 2,
            per_page: 0,
        };
        assert_eq!(non_positive.limit(), 1);
        assert_eq!(non_positive.offset(), 1);
    }

    #[test]
    fn unique_violation_maps_to_conflict() {
        assert!(matches!(
            ApiError::from(StoreError::UniqueViolation),
            ApiError::Conflict
        ));
    }

    #[test]
    fn auth_failures_map_to_unauthorized() {
        assert!(matches!(
            ApiError::from(AuthError::InvalidToken),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from(AuthError::InvalidCredentials),
            ApiError::Unauthorized
        ));
    }
}
