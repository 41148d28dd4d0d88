#![allow(clippy::result_large_err)]

pub mod analysis;
pub mod annotate;
pub mod cli;
pub mod config;
pub mod error;
pub mod prompt;
pub mod provider;

pub use annotate::{CommentaryResult, CommentaryService};
pub use config::CommentaryConfig;
