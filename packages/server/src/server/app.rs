//! Application setup and router.

use axum::{
    extract::Extension,
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::middleware::caller_identity_middleware;
use crate::server::routes::{
    cancel_reference_handler, create_reference_handler, create_thread_handler,
    delete_reference_handler, health_handler, list_references_handler,
    segment_reactions_handler, thread_votes_handler, toggle_segment_reaction_handler,
    toggle_thread_vote_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub deps: ServerDeps,
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps) -> Router {
    let app_state = AxumAppState { deps };

    // CORS configuration - allow any origin, identity comes from the proxy header
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    let api = Router::new()
        .route("/threads", post(create_thread_handler))
        .route(
            "/references",
            get(list_references_handler).post(create_reference_handler),
        )
        .route("/references/:id", delete(delete_reference_handler))
        .route("/references/:id/cancel", post(cancel_reference_handler))
        .route("/votes/threads", post(toggle_thread_vote_handler))
        .route("/votes/threads/:id", get(thread_votes_handler))
        .route("/votes/segments", post(toggle_segment_reaction_handler))
        .route("/votes/segments/:id", get(segment_reactions_handler));

    Router::new()
        .nest("/api", api)
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(caller_identity_middleware))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
