//! Request pipeline for the comments endpoint.
//!
//! fetch -> filter by time window -> score and classify -> sort -> project -> limit.
//! Everything but the fetch is a pure function over a `Vec` so it can be
//! exercised without a backend.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use crate::analysis::{ClassifiedComment, CommentView};
use crate::feddit::{Comment, FedditClient, FedditError};

/// Which comments survive the time filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    All,
    /// Strictly newer than `now - minutes`.
    LastMinutes(u32),
    /// Inclusive on both ends, compared on the UTC date of `created_at`.
    Dates { start: NaiveDate, end: NaiveDate },
}

#[derive(Debug, Clone, Copy)]
pub struct CommentQuery {
    pub subfeddit_id: i64,
    pub window: TimeWindow,
    pub sorted: bool,
    pub limit: u32,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to fetch comments: {0}")]
    Upstream(#[from] FedditError),
}

pub struct CommentPipeline<'a> {
    client: &'a FedditClient,
}

impl<'a> CommentPipeline<'a> {
    pub fn new(client: &'a FedditClient) -> Self {
        Self { client }
    }

    pub async fn run(
        &self,
        query: &CommentQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<CommentView>, PipelineError> {
        if query.limit == 0 {
            return Ok(Vec::new());
        }

        let fetched = self
            .client
            .comments(query.subfeddit_id, 0, query.limit)
            .await?;
        debug!(
            "Fetched {} comments for subfeddit {}",
            fetched.len(),
            query.subfeddit_id
        );

        Ok(process(fetched, query, now))
    }
}

/// All pure steps of the pipeline, applied to an already fetched batch.
pub fn process(comments: Vec<Comment>, query: &CommentQuery, now: DateTime<Utc>) -> Vec<CommentView> {
    let kept = filter_window(comments, query.window, now);
    let mut enriched = enrich(kept);
    if query.sorted {
        sort_by_polarity(&mut enriched);
    }
    let mut rows = project(enriched);
    rows.truncate(query.limit as usize);
    rows
}

pub fn filter_window(comments: Vec<Comment>, window: TimeWindow, now: DateTime<Utc>) -> Vec<Comment> {
    match window {
        TimeWindow::All => comments,
        TimeWindow::LastMinutes(0) => comments,
        TimeWindow::LastMinutes(minutes) => {
            let cutoff = (now - Duration::minutes(i64::from(minutes))).timestamp();
            comments
                .into_iter()
                .filter(|c| c.created_at > cutoff)
                .collect()
        }
        TimeWindow::Dates { start, end } => comments
            .into_iter()
            .filter(|c| match DateTime::from_timestamp(c.created_at, 0) {
                Some(created) => {
                    let date = created.date_naive();
                    start <= date && date <= end
                }
                None => {
                    warn!(
                        "Dropping comment {} with out-of-range timestamp {}",
                        c.id, c.created_at
                    );
                    false
                }
            })
            .collect(),
    }
}

pub fn enrich(comments: Vec<Comment>) -> Vec<ClassifiedComment> {
    comments
        .into_iter()
        .map(ClassifiedComment::from_comment)
        .collect()
}

/// Descending by polarity. Stable, so ties keep fetch order.
pub fn sort_by_polarity(comments: &mut [ClassifiedComment]) {
    comments.sort_by(|a, b| b.polarity_score.total_cmp(&a.polarity_score));
}

pub fn project(comments: Vec<ClassifiedComment>) -> Vec<CommentView> {
    comments.into_iter().map(CommentView::from).collect()
}
