use serde::Serialize;

use crate::feddit::Comment;
use super::classification::Classification;
use super::polarity;

/// A Feddit comment with its sentiment attached. Lives for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedComment {
    pub id: i64,
    pub text: String,
    pub created_at: i64,
    pub polarity_score: f64,
    pub classification: Classification,
}

impl ClassifiedComment {
    pub fn from_comment(comment: Comment) -> Self {
        let polarity_score = polarity::score(&comment.text);
        Self {
            id: comment.id,
            text: comment.text,
            created_at: comment.created_at,
            polarity_score,
            classification: Classification::from_score(polarity_score),
        }
    }
}

/// Row returned by the comments endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentView {
    pub id: i64,
    pub text: String,
    pub polarity_score: f64,
    pub classification: Classification,
}

impl From<ClassifiedComment> for CommentView {
    fn from(c: ClassifiedComment) -> Self {
        Self {
            id: c.id,
            text: c.text,
            polarity_score: c.polarity_score,
            classification: c.classification,
        }
    }
}
