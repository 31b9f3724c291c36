//! GitHub integration for publishing reports on pull requests.

mod client;

pub use client::CommentClient;
