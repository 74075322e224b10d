pub mod error;
pub mod params;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use state::AppState;

pub use error::ApiError;

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/number_of_subfeddits", get(routes::number_of_subfeddits))
        .route("/subfeddit_comments", get(routes::subfeddit_comments));

    let prefix = normalize_prefix(&state.config.web.route_prefix);
    let router = match prefix {
        Some(prefix) => Router::new().nest(&prefix, api),
        None => api,
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// `"api/v1/"` -> `Some("/api/v1")`; an empty or root prefix means no nesting.
fn normalize_prefix(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{}", trimmed))
    }
}
