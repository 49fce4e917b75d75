//! Category CRUD endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};

use super::error::ApiError;
use super::state::AppState;
use crate::core::menu::{Category, CategoryUpdate};

/// GET /api/categories
async fn list(State(state): State<AppState>) -> Result<Json<Vec<Category>>, ApiError> {
    let service = state.service.clone();
    let categories = super::blocking(move || service.categories()).await?;
    Ok(Json(categories))
}

/// POST /api/categories
async fn create(
    State(state): State<AppState>,
    Json(category): Json<Category>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let service = state.service.clone();
    let created = super::blocking(move || service.create_category(category)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/categories/{id}
async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Category>, ApiError> {
    let id = super::parse_id(&id)?;
    let service = state.service.clone();
    let category = super::blocking(move || service.category(&id)).await?;
    Ok(Json(category))
}

/// PUT /api/categories/{id}
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<CategoryUpdate>,
) -> Result<Json<Category>, ApiError> {
    let id = super::parse_id(&id)?;
    let service = state.service.clone();
    let updated = super::blocking(move || service.update_category(&id, body)).await?;
    Ok(Json(updated))
}

/// DELETE /api/categories/{id}
async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = super::parse_id(&id)?;
    let service = state.service.clone();
    super::blocking(move || service.delete_category(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Returns the category router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(list).post(create))
        .route(
            "/api/categories/{id}",
            get(get_one).put(update).delete(remove),
        )
}
