//! Shared types for Storefront

mod error;

pub use error::{Result, StorefrontError};
