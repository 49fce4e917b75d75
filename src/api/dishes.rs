//! Dish endpoints, nested under their owning category.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{routing::get, routing::patch, Json, Router};
use serde::Deserialize;

use super::error::ApiError;
use super::state::AppState;
use crate::core::menu::{Dish, DishUpdate};

/// PATCH /api/categories/{id}/dishes/{dish_id}/price request body.
///
/// Signed on purpose: a negative price must be rejected here with a clear
/// message instead of bouncing off deserialization.
#[derive(Debug, Deserialize)]
pub struct PriceBody {
    pub price: i64,
}

/// GET /api/dishes
async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Dish>>, ApiError> {
    let service = state.service.clone();
    let dishes = super::blocking(move || service.all_dishes()).await?;
    Ok(Json(dishes))
}

/// GET /api/categories/{id}/dishes
async fn list(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<Json<Vec<Dish>>, ApiError> {
    let category_id = super::parse_id(&category_id)?;
    let service = state.service.clone();
    let dishes = super::blocking(move || service.dishes(&category_id)).await?;
    Ok(Json(dishes))
}

/// POST /api/categories/{id}/dishes
async fn create(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
    Json(dish): Json<Dish>,
) -> Result<(StatusCode, Json<Dish>), ApiError> {
    let category_id = super::parse_id(&category_id)?;
    let service = state.service.clone();
    let created = super::blocking(move || service.create_dish(&category_id, dish)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/categories/{id}/dishes/{dish_id}
async fn get_one(
    State(state): State<AppState>,
    Path((category_id, dish_id)): Path<(String, String)>,
) -> Result<Json<Dish>, ApiError> {
    let category_id = super::parse_id(&category_id)?;
    let dish_id = super::parse_id(&dish_id)?;
    let service = state.service.clone();
    let dish = super::blocking(move || service.dish(&category_id, &dish_id)).await?;
    Ok(Json(dish))
}

/// PUT /api/categories/{id}/dishes/{dish_id}
async fn update(
    State(state): State<AppState>,
    Path((category_id, dish_id)): Path<(String, String)>,
    Json(body): Json<DishUpdate>,
) -> Result<Json<Dish>, ApiError> {
    let category_id = super::parse_id(&category_id)?;
    let dish_id = super::parse_id(&dish_id)?;
    let service = state.service.clone();
    let updated = super::blocking(move || service.update_dish(&category_id, &dish_id, body)).await?;
    Ok(Json(updated))
}

/// DELETE /api/categories/{id}/dishes/{dish_id}
async fn remove(
    State(state): State<AppState>,
    Path((category_id, dish_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let category_id = super::parse_id(&category_id)?;
    let dish_id = super::parse_id(&dish_id)?;
    let service = state.service.clone();
    super::blocking(move || service.delete_dish(&category_id, &dish_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/categories/{id}/dishes/{dish_id}/availability
async fn toggle_availability(
    State(state): State<AppState>,
    Path((category_id, dish_id)): Path<(String, String)>,
) -> Result<Json<Dish>, ApiError> {
    let category_id = super::parse_id(&category_id)?;
    let dish_id = super::parse_id(&dish_id)?;
    let service = state.service.clone();
    let dish =
        super::blocking(move || service.toggle_dish_availability(&category_id, &dish_id)).await?;
    Ok(Json(dish))
}

/// PATCH /api/categories/{id}/dishes/{dish_id}/price
async fn update_price(
    State(state): State<AppState>,
    Path((category_id, dish_id)): Path<(String, String)>,
    Json(body): Json<PriceBody>,
) -> Result<Json<Dish>, ApiError> {
    let category_id = super::parse_id(&category_id)?;
    let dish_id = super::parse_id(&dish_id)?;
    let price = u32::try_from(body.price)
        .map_err(|_| ApiError::BadRequest(format!("invalid price: {}", body.price)))?;

    let service = state.service.clone();
    let dish =
        super::blocking(move || service.update_dish_price(&category_id, &dish_id, price)).await?;
    Ok(Json(dish))
}

/// Returns the dish router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/dishes", get(list_all))
        .route("/api/categories/{id}/dishes", get(list).post(create))
        .route(
            "/api/categories/{id}/dishes/{dish_id}",
            get(get_one).put(update).delete(remove),
        )
        .route(
            "/api/categories/{id}/dishes/{dish_id}/availability",
            patch(toggle_availability),
        )
        .route(
            "/api/categories/{id}/dishes/{dish_id}/price",
            patch(update_price),
        )
}
