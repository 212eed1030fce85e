//! HTTP client facade for the catalog backend: shared client, error
//! normalization and per-resource services.

pub mod client;
pub mod error;
pub mod service;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use service::{CatalogService, ResourceService};
