use actix_web::{HttpResponse, web};
use sqlx::PgPool;
use validator::Validate;

use postgres::types::{HotelData, HotelPatch};
use postgres::{Filter, UnitOfWork};

use crate::types::{ApiError, HotelCreate, HotelListQuery, HotelPatchRequest};

/// Returns hotels filtered by optional case-insensitive title and location
/// substrings, paginated with caller-supplied bounds.
pub async fn list_hotels(
    pool: web::Data<PgPool>,
    query: web::Query<HotelListQuery>,
) -> Result<HttpResponse, ApiError> {
    let pagination = query.pagination();

    let mut filter = Filter::new();
    if let Some(sub) = query.sub_title.as_deref().filter(|s| !s.trim().is_empty()) {
        filter = filter.contains_lower("title", sub);
    }
    if let Some(sub) = query.sub_location.as_deref().filter(|s| !s.trim().is_empty()) {
        filter = filter.contains_lower("location", sub);
    }

    let mut uow = UnitOfWork::begin(pool.get_ref()).await?;
    let hotels = uow
        .hotels()
        .get_page(&filter, pagination.limit(), pagination.offset())
        .await?;

    Ok(HttpResponse::Ok().json(hotels))
}

/// Returns one hotel by id.
pub async fn get_hotel(
    pool: web::Data<PgPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let hotel_id = path.into_inner();

    let mut uow = UnitOfWork::begin(pool.get_ref()).await?;
    let hotel = uow
        .hotels()
        .get_one_or_none(&Filter::new().eq("id", hotel_id))
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(HttpResponse::Ok().json(hotel))
}

/// Creates a hotel and returns it with the id the storage engine assigned.
pub async fn create_hotel(
    pool: web::Data<PgPool>,
    request: web::Json<HotelCreate>,
) -> Result<HttpResponse, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(format!("Validation error: {}", e)))?;

    let data = HotelData::from(request.into_inner());

    let mut uow = UnitOfWork::begin(pool.get_ref()).await?;
    let hotel = uow.hotels().add(&data).await?;
    uow.commit().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "OK", "data": hotel})))
}

/// Replaces every field of a hotel.
pub async fn replace_hotel(
    pool: web::Data<PgPool>,
    path: web::Path<i32>,
    request: web::Json<HotelCreate>,
) -> Result<HttpResponse, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(format!("Validation error: {}", e)))?;

    let hotel_id = path.into_inner();
    let data = HotelData::from(request.into_inner());

    let mut uow = UnitOfWork::begin(pool.get_ref()).await?;
    let updated = uow
        .hotels()
        .edit(&data, false, &Filter::new().eq("id", hotel_id))
        .await?;
    if updated == 0 {
        return Err(ApiError::NotFound);
    }
    uow.commit().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "OK"})))
}

/// Applies a sparse patch to a hotel: only provided fields are overwritten.
pub async fn update_hotel(
    pool: web::Data<PgPool>,
    path: web::Path<i32>,
    request: web::Json<HotelPatchRequest>,
) -> Result<HttpResponse, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(format!("Validation error: {}", e)))?;

    let hotel_id = path.into_inner();
    let patch = HotelPatch::from(request.into_inner());

    let mut uow = UnitOfWork::begin(pool.get_ref()).await?;
    // Existence is checked first so an empty patch still 404s correctly.
    uow.hotels()
        .get_one_or_none(&Filter::new().eq("id", hotel_id))
        .await?
        .ok_or(ApiError::NotFound)?;
    uow.hotels()
        .edit(&patch, true, &Filter::new().eq("id", hotel_id))
        .await?;
    uow.commit().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "OK"})))
}

/// Deletes a hotel.
pub async fn delete_hotel(
    pool: web::Data<PgPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let hotel_id = path.into_inner();

    let mut uow = UnitOfWork::begin(pool.get_ref()).await?;
    let removed = uow
        .hotels()
        .delete(&Filter::new().eq("id", hotel_id))
        .await?;
    if removed == 0 {
        return Err(ApiError::NotFound);
    }
    uow.commit().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "OK"})))
}
