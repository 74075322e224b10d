use serde::Deserialize;

/// A comment as served by the Feddit backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Comment {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    pub text: String,
    /// Unix seconds.
    pub created_at: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentsResponse {
    pub comments: Vec<Comment>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubfedditsResponse {
    /// Entries are passed through untyped; only their number is used.
    pub subfeddits: Vec<serde_json::Value>,
}
