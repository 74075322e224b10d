use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use tracing::info;

use crate::analysis::CommentView;
use crate::pipeline::CommentPipeline;
use super::error::ApiError;
use super::params::{check_subfeddit, CommentsParams};
use super::state::AppState;

/// Number of subfeddits known to the backend, as a bare JSON integer.
pub async fn number_of_subfeddits(State(state): State<AppState>) -> Result<Json<usize>, ApiError> {
    let count = state.client.subfeddit_count().await?;
    Ok(Json(count))
}

pub async fn subfeddit_comments(
    State(state): State<AppState>,
    params: Result<Query<CommentsParams>, QueryRejection>,
) -> Result<Json<Vec<CommentView>>, ApiError> {
    let Query(params) = params?;
    let now = Utc::now();
    let query = params.validate(now.date_naive(), state.config.filter.default_lookback_days)?;

    let count = state.client.subfeddit_count().await?;
    check_subfeddit(query.subfeddit_id, count)?;

    let rows = CommentPipeline::new(&state.client).run(&query, now).await?;
    info!(
        "subfeddit {}: {} comments (window {:?}, sorted {}, limit {})",
        query.subfeddit_id,
        rows.len(),
        query.window,
        query.sorted,
        query.limit
    );

    Ok(Json(rows))
}
