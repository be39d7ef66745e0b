//! service-core: Shared infrastructure for the invoicing workspace.
pub mod error;
pub mod observability;

pub use axum;
pub use serde;
pub use serde_json;
pub use tracing;
pub use validator;
