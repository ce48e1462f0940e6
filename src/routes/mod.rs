//! HTTP routes for Storefront

pub mod catalog;
pub mod health;

pub use catalog::{handle_detail, handle_list, handle_search, handle_submit};
pub use health::{health_check, readiness_check, version_info};
