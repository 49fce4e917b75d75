//! The public menu document and repository sync endpoints.

use axum::extract::State;
use axum::{routing::get, routing::post, Json, Router};
use serde::Serialize;

use super::error::ApiError;
use super::state::AppState;
use crate::core::menu::{MenuDocument, RepoStatus};
use crate::git::ReconcileOutcome;

/// POST /api/sync response body.
#[derive(Debug, Serialize)]
pub struct SyncResponse {
    /// `in_sync`, `fast_forwarded`, or `pushed`.
    pub status: &'static str,
    /// How many stranded commits were pushed, when `status` is `pushed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commits: Option<usize>,
}

impl From<ReconcileOutcome> for SyncResponse {
    fn from(outcome: ReconcileOutcome) -> Self {
        match outcome {
            ReconcileOutcome::InSync => SyncResponse {
                status: "in_sync",
                commits: None,
            },
            ReconcileOutcome::FastForwarded => SyncResponse {
                status: "fast_forwarded",
                commits: None,
            },
            ReconcileOutcome::Pushed { commits } => SyncResponse {
                status: "pushed",
                commits: Some(commits),
            },
        }
    }
}

/// GET /api/menu
async fn get_menu(State(state): State<AppState>) -> Result<Json<MenuDocument>, ApiError> {
    let service = state.service.clone();
    let document = super::blocking(move || service.menu()).await?;
    Ok(Json(document))
}

/// POST /api/sync
async fn sync(State(state): State<AppState>) -> Result<Json<SyncResponse>, ApiError> {
    let service = state.service.clone();
    let outcome = super::blocking(move || service.sync_repository()).await?;
    Ok(Json(outcome.into()))
}

/// GET /api/sync/status
async fn sync_status(State(state): State<AppState>) -> Result<Json<RepoStatus>, ApiError> {
    let service = state.service.clone();
    let status = super::blocking(move || service.repository_status()).await?;
    Ok(Json(status))
}

/// Returns the menu and sync router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/menu", get(get_menu))
        .route("/api/sync", post(sync))
        .route("/api/sync/status", get(sync_status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_response_omits_commits_unless_pushed() {
        let in_sync = serde_json::to_value(SyncResponse::from(ReconcileOutcome::InSync)).unwrap();
        assert_eq!(in_sync["status"], "in_sync");
        assert!(in_sync.get("commits").is_none());

        let pushed =
            serde_json::to_value(SyncResponse::from(ReconcileOutcome::Pushed { commits: 2 }))
                .unwrap();
        assert_eq!(pushed["status"], "pushed");
        assert_eq!(pushed["commits"], 2);
    }
}
