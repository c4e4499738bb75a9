//! Multi-account profile persisted across invocations.

pub mod storage;
mod types;

pub use types::{Account, Profile, ProfileBook, RepoCache, DEFAULT_ENDPOINT, DEFAULT_RANGE_MINUTES};
