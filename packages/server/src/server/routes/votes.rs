use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::error;

use crate::common::{SegmentId, ThreadId};
use crate::domains::votes::{SegmentReaction, ThreadVote, VoteKind, VoteLedger, VoteSummary};
use crate::server::app::AxumAppState;
use crate::server::middleware::Caller;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct ToggleRequest<K: VoteKind> {
    pub target_id: K::Target,
    pub kind: K,
}

async fn toggle<K>(
    state: AxumAppState,
    caller: Option<Extension<Caller>>,
    body: ToggleRequest<K>,
) -> Result<Json<VoteSummary<K>>, StatusCode>
where
    K: VoteKind,
{
    let Extension(caller) = caller.ok_or(StatusCode::UNAUTHORIZED)?;
    VoteLedger::<K>::new(state.deps.votes.clone())
        .toggle(caller.member_id, body.target_id, body.kind)
        .await
        .map(Json)
        .map_err(|e| {
            error!(error = %e, scope = ?K::SCOPE, "vote toggle failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

async fn summary<K>(
    state: AxumAppState,
    caller: Option<Extension<Caller>>,
    target: K::Target,
) -> Result<Json<VoteSummary<K>>, StatusCode>
where
    K: VoteKind,
{
    let user_id = caller.map(|Extension(c)| c.member_id);
    VoteLedger::<K>::new(state.deps.votes.clone())
        .summary(user_id, target)
        .await
        .map(Json)
        .map_err(|e| {
            error!(error = %e, scope = ?K::SCOPE, "vote summary failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// POST /api/votes/threads
pub async fn toggle_thread_vote_handler(
    Extension(state): Extension<AxumAppState>,
    caller: Option<Extension<Caller>>,
    Json(body): Json<ToggleRequest<ThreadVote>>,
) -> Result<Json<VoteSummary<ThreadVote>>, StatusCode> {
    toggle(state, caller, body).await
}

/// POST /api/votes/segments
pub async fn toggle_segment_reaction_handler(
    Extension(state): Extension<AxumAppState>,
    caller: Option<Extension<Caller>>,
    Json(body): Json<ToggleRequest<SegmentReaction>>,
) -> Result<Json<VoteSummary<SegmentReaction>>, StatusCode> {
    toggle(state, caller, body).await
}

/// GET /api/votes/threads/:id
pub async fn thread_votes_handler(
    Extension(state): Extension<AxumAppState>,
    caller: Option<Extension<Caller>>,
    Path(target): Path<ThreadId>,
) -> Result<Json<VoteSummary<ThreadVote>>, StatusCode> {
    summary(state, caller, target).await
}

/// GET /api/votes/segments/:id
pub async fn segment_reactions_handler(
    Extension(state): Extension<AxumAppState>,
    caller: Option<Extension<Caller>>,
    Path(target): Path<SegmentId>,
) -> Result<Json<VoteSummary<SegmentReaction>>, StatusCode> {
    summary(state, caller, target).await
}
