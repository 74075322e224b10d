pub mod client;
pub mod types;

pub use client::{FedditClient, FedditError};
pub use types::Comment;
