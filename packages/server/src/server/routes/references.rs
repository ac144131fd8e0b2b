use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::error;

use crate::common::ReferenceId;
use crate::domains::references::activities;
use crate::domains::references::{PendingReference, ReferenceError};
use crate::server::app::AxumAppState;
use crate::server::middleware::Caller;

#[derive(Debug, Deserialize)]
pub struct CreateReferenceRequest {
    pub source_url: String,
    pub title: Option<String>,
    pub notes: Option<String>,
}

fn status_for(err: ReferenceError) -> StatusCode {
    match err {
        ReferenceError::NotFound(_) => StatusCode::NOT_FOUND,
        ReferenceError::NotPending { .. } => StatusCode::CONFLICT,
        ReferenceError::EmptySourceUrl => StatusCode::UNPROCESSABLE_ENTITY,
        ReferenceError::Store(e) => {
            error!(error = %e, "reference store failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn require(caller: Option<Extension<Caller>>) -> Result<Caller, StatusCode> {
    caller.map(|Extension(c)| c).ok_or(StatusCode::UNAUTHORIZED)
}

/// GET /api/references
pub async fn list_references_handler(
    Extension(state): Extension<AxumAppState>,
    caller: Option<Extension<Caller>>,
) -> Result<Json<Vec<PendingReference>>, StatusCode> {
    let caller = require(caller)?;
    activities::list_pending(caller.member_id, &state.deps)
        .await
        .map(Json)
        .map_err(status_for)
}

/// POST /api/references
pub async fn create_reference_handler(
    Extension(state): Extension<AxumAppState>,
    caller: Option<Extension<Caller>>,
    Json(body): Json<CreateReferenceRequest>,
) -> Result<(StatusCode, Json<PendingReference>), StatusCode> {
    let caller = require(caller)?;
    let reference = activities::create_reference(
        caller.member_id,
        body.source_url,
        body.title,
        body.notes,
        &state.deps,
    )
    .await
    .map_err(status_for)?;

    Ok((StatusCode::CREATED, Json(reference)))
}

/// POST /api/references/:id/cancel
pub async fn cancel_reference_handler(
    Extension(state): Extension<AxumAppState>,
    caller: Option<Extension<Caller>>,
    Path(id): Path<ReferenceId>,
) -> Result<Json<PendingReference>, StatusCode> {
    let caller = require(caller)?;
    activities::cancel_reference(id, caller.member_id, &state.deps)
        .await
        .map(Json)
        .map_err(status_for)
}

/// DELETE /api/references/:id
pub async fn delete_reference_handler(
    Extension(state): Extension<AxumAppState>,
    caller: Option<Extension<Caller>>,
    Path(id): Path<ReferenceId>,
) -> Result<StatusCode, StatusCode> {
    let caller = require(caller)?;
    activities::delete_reference(id, caller.member_id, &state.deps)
        .await
        .map(|()| StatusCode::NO_CONTENT)
        .map_err(status_for)
}
