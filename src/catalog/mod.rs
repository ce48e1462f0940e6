//! Catalog core - query service, submission handler, and bulk loader
//!
//! All catalog logic goes through the [`CatalogStore`] capability rather
//! than a process-wide database handle, so the core runs unchanged
//! against MongoDB or the in-memory fake used in tests.

pub mod query;
pub mod seed;
pub mod store;
pub mod submission;

pub use query::CatalogQuery;
pub use seed::{SeedLoader, SeedReport};
pub use store::{CatalogStore, MongoCatalogStore};
pub use submission::{SubmissionHandler, SubmissionInput, SUBMISSION_RECEIVED};
