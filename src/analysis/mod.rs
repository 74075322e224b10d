pub mod classification;
pub mod polarity;
pub mod types;

pub use classification::Classification;
pub use types::{ClassifiedComment, CommentView};
