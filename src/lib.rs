//! Sentiment API over the Feddit comments backend.
//!
//! Fetches the comments of a subfeddit, scores each one with a lexicon based
//! polarity in `[-1, 1]`, labels it Positive/Negative/Neutral and serves the
//! result filtered by time window, optionally sorted and limited.

pub mod analysis;
pub mod config;
pub mod feddit;
pub mod pipeline;
pub mod web;
