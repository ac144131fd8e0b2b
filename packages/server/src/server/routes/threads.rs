use axum::{extract::Extension, http::StatusCode, Json};
use serde::Deserialize;
use tracing::error;

use crate::domains::threads::activities::create_thread;
use crate::domains::threads::models::{NewThread, SubmittedThread};
use crate::server::app::AxumAppState;
use crate::server::middleware::Caller;

#[derive(Debug, Deserialize)]
pub struct CreateThreadRequest {
    pub title: Option<String>,
    pub content: String,
    pub source: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// POST /api/threads
pub async fn create_thread_handler(
    Extension(state): Extension<AxumAppState>,
    caller: Option<Extension<Caller>>,
    Json(body): Json<CreateThreadRequest>,
) -> Result<(StatusCode, Json<SubmittedThread>), StatusCode> {
    let Extension(caller) = caller.ok_or(StatusCode::UNAUTHORIZED)?;
    if body.content.trim().is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let new = NewThread {
        title: body.title.filter(|t| !t.trim().is_empty()),
        content: body.content,
        source: body.source,
        tags: body.tags,
        author_id: caller.member_id,
    };

    let thread = create_thread(new, &state.deps).await.map_err(|e| {
        error!(error = %e, "thread creation failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((StatusCode::CREATED, Json(thread)))
}
