use actix_web::{HttpResponse, web};
use sqlx::PgPool;
use validator::Validate;

use postgres::types::RoomPatch;
use postgres::{Filter, UnitOfWork};

use crate::types::{ApiError, RoomCreate, RoomListQuery, RoomPatchRequest};

/// Returns the rooms of one hotel, optionally filtered by a
/// case-insensitive title substring.
pub async fn list_rooms(
    pool: web::Data<PgPool>,
    path: web::Path<i32>,
    query: web::Query<RoomListQuery>,
) -> Result<HttpResponse, ApiError> {
    let hotel_id = path.into_inner();

    let mut filter = Filter::new().eq("hotel_id", hotel_id);
    if let Some(sub) = query.sub_title.as_deref().filter(|s| !s.trim().is_empty()) {
        filter = filter.contains_lower("title", sub);
    }

    let mut uow = UnitOfWork::begin(pool.get_ref()).await?;
    let rooms = uow.rooms().get_all(&filter).await?;

    Ok(HttpResponse::Ok().json(rooms))
}

/// Returns one room, addressed through its hotel so a room can never be
/// fetched via the wrong hotel.
pub async fn get_room(
    pool: web::Data<PgPool>,
    path: web::Path<(i32, i32)>,
) -> Result<HttpResponse, ApiError> {
    let (hotel_id, room_id) = path.into_inner();

    let mut uow = UnitOfWork::begin(pool.get_ref()).await?;
    let room = uow
        .rooms()
        .get_one_or_none(&Filter::new().eq("id", room_id).eq("hotel_id", hotel_id))
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(HttpResponse::Ok().json(room))
}

/// Creates a room in the given hotel. The hotel is looked up first so an
/// unknown hotel yields a 404 instead of a foreign-key failure, and both
/// steps share one transaction.
pub async fn create_room(
    pool: web::Data<PgPool>,
    path: web::Path<i32>,
    request: web::Json<RoomCreate>,
) -> Result<HttpResponse, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(format!("Validation error: {}", e)))?;

    let hotel_id = path.into_inner();

    let mut uow = UnitOfWork::begin(pool.get_ref()).await?;
    uow.hotels()
        .get_one_or_none(&Filter::new().eq("id", hotel_id))
        .await?
        .ok_or(ApiError::NotFound)?;

    let data = request.into_inner().into_data(hotel_id);
    let room = uow.rooms().add(&data).await?;
    uow.commit().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "OK", "data": room})))
}

/// Replaces every field of a room.
pub async fn replace_room(
    pool: web::Data<PgPool>,
    path: web::Path<(i32, i32)>,
    request: web::Json<RoomCreate>,
) -> Result<HttpResponse, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(format!("Validation error: {}", e)))?;

    let (hotel_id, room_id) = path.into_inner();
    let data = request.into_inner().into_data(hotel_id);

    let mut uow = UnitOfWork::begin(pool.get_ref()).await?;
    let updated = uow
        .rooms()
        .edit(
            &data,
            false,
            &Filter::new().eq("id", room_id).eq("hotel_id", hotel_id),
        )
        .await?;
    if updated == 0 {
        return Err(ApiError::NotFound);
    }
    uow.commit().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "OK"})))
}

/// Applies a sparse patch to a room: only provided fields are overwritten.
pub async fn update_room(
    pool: web::Data<PgPool>,
    path: web::Path<(i32, i32)>,
    request: web::Json<RoomPatchRequest>,
) -> Result<HttpResponse, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(format!("Validation error: {}", e)))?;

    let (hotel_id, room_id) = path.into_inner();
    let patch = RoomPatch::from(request.into_inner());
    let filter = Filter::new().eq("id", room_id).eq("hotel_id", hotel_id);

    let mut uow = UnitOfWork::begin(pool.get_ref()).await?;
    // Existence is checked first so an empty patch still 404s correctly.
    uow.rooms()
        .get_one_or_none(&filter)
        .await?
        .ok_or(ApiError::NotFound)?;
    uow.rooms().edit(&patch, true, &filter).await?;
    uow.commit().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "OK"})))
}

/// Deletes a room from the given hotel.
pub async fn delete_room(
    pool: web::Data<PgPool>,
    path: web::Path<(i32, i32)>,
) -> Result<HttpResponse, ApiError> {
    let (hotel_id, room_id) = path.into_inner();

    let mut uow = UnitOfWork::begin(pool.get_ref()).await?;
    let removed = uow
        .rooms()
        .delete(&Filter::new().eq("id", room_id).eq("hotel_id", hotel_id))
        .await?;
    if removed == 0 {
        return Err(ApiError::NotFound);
    }
    uow.commit().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "OK"})))
}
