//! Core data model types.

mod endpoint;
mod query;
mod repo;
mod value;

pub use endpoint::ServiceUrl;
pub use query::{
    HistogramBucket, HistogramRequest, HistogramResult, QueryRequest, QueryResult,
};
pub use repo::{RepoDescriptor, RepoSummary, Retention, SchemaField};
pub use value::{FieldValue, Record};
