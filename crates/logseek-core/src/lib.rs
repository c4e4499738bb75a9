//! logseek-core - Core types and traits for the logseek client.

pub mod credentials;
pub mod error;
pub mod pager;
pub mod query;
pub mod reqid;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use error::{Error, ServiceError};
pub use pager::{Pager, PagingMode};
pub use traits::LogStore;
pub use types::{
    FieldValue, HistogramBucket, HistogramRequest, HistogramResult, QueryRequest, QueryResult,
    Record, RepoDescriptor, RepoSummary, Retention, SchemaField, ServiceUrl,
};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
