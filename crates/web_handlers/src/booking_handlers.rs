use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use sqlx::PgPool;

use auth_services::middleware::AuthenticatedUser;
use postgres::types::BookingData;
use postgres::{Filter, UnitOfWork};

use crate::types::{ApiError, BookingCreate, BookingOut};

fn check_date_range(date_from: NaiveDate, date_to: NaiveDate) -> Result<(), ApiError> {
    if date_to <= date_from {
        return Err(ApiError::Validation(
            "date_to must be after date_from".to_string(),
        ));
    }
    Ok(())
}

/// Books a room for the authenticated user. The per-night price is
/// snapshotted from the room inside the same transaction, so a concurrent
/// price change cannot produce a booking with a rate the room never had.
pub async fn create_booking(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    request: web::Json<BookingCreate>,
) -> Result<HttpResponse, ApiError> {
    check_date_range(request.date_from, request.date_to)?;

    let mut uow = UnitOfWork::begin(pool.get_ref()).await?;
    let room = uow
        .rooms()
        .get_one_or_none(&Filter::new().eq("id", request.room_id))
        .await?
        .ok_or(ApiError::NotFound)?;

    let data = BookingData {
        user_id: user.0,
        room_id: room.id,
        date_from: request.date_from,
        date_to: request.date_to,
        price: room.price,
    };
    let booking = uow.bookings().add(&data).await?;
    uow.commit().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "OK",
        "data": BookingOut::from(booking)
    })))
}

/// Returns every booking of the authenticated user.
pub async fn list_bookings(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let mut uow = UnitOfWork::begin(pool.get_ref()).await?;
    let bookings = uow
        .bookings()
        .get_all(&Filter::new().eq("user_id", user.0))
        .await?;

    let bookings: Vec<BookingOut> = bookings.into_iter().map(BookingOut::from).collect();
    Ok(HttpResponse::Ok().json(bookings))
}

/// Returns one booking of the authenticated user; other users' bookings are
/// indistinguishable from missing ones.
pub async fn get_booking(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let booking_id = path.into_inner();

    let mut uow = UnitOfWork::begin(pool.get_ref()).await?;
    let booking = uow
        .bookings()
        .get_one_or_none(&Filter::new().eq("id", booking_id).eq("user_id", user.0))
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(HttpResponse::Ok().json(BookingOut::from(booking)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_must_come_after_checkin() {
        let from = NaiveDate::from_ymd_opt(2026, 8, 10).unwrap();
        let to = NaiveDate::from_ymd_opt(2026, 8, 13).unwrap();

        assert!(check_date_range(from, to).is_ok());
        assert!(check_date_range(to, from).is_err());
        assert!(check_date_range(from, from).is_err());
    }
}
