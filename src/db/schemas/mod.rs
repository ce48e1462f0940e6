//! Database schemas for Storefront
//!
//! Defines the MongoDB document structure for catalog entries.

mod product;

pub use product::{ProductDoc, PRODUCT_COLLECTION, STATUS_PENDING, STATUS_PUBLISHED};
