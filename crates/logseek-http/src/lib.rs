//! logseek-http - HTTP-backed log store implementation.

mod client;
mod endpoints;
mod store;

pub use client::HttpClient;
pub use store::HttpStore;
