//! Submission handler
//!
//! Validates untrusted submission input and persists it as a new
//! pending entry. Callers cannot influence the stored status: whatever
//! the payload carried, the entry enters the catalog as `pending` and
//! stays invisible until moderated out-of-band.

use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use super::store::CatalogStore;
use crate::db::schemas::{ProductDoc, STATUS_PENDING};
use crate::types::{Result, StorefrontError};

/// Confirmation message returned to the submitter
pub const SUBMISSION_RECEIVED: &str = "Product added successfully and is under review.";

/// Submission payload. Exactly the recognized fields; anything else in
/// the request body (including a caller-supplied `status`) is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionInput {
    pub name: Option<String>,

    #[serde(rename = "productDescription")]
    pub product_description: Option<String>,

    /// Raw comma-separated category string
    pub categories: Option<String>,

    #[serde(rename = "proofLink")]
    pub proof_link: Option<String>,

    #[serde(rename = "explanationText")]
    pub explanation_text: Option<String>,

    pub alternatives: Option<String>,
}

/// Split a raw category string on commas, trimming whitespace.
///
/// Empty pieces from malformed input (trailing or doubled commas) are
/// kept as-is.
pub(crate) fn split_categories(raw: &str) -> Vec<String> {
    raw.split(',').map(|cat| cat.trim().to_string()).collect()
}

fn required(value: Option<String>, field: &'static str) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(StorefrontError::MissingField(field.to_string())),
    }
}

/// Write-side catalog service
#[derive(Clone)]
pub struct SubmissionHandler {
    store: Arc<dyn CatalogStore>,
}

impl SubmissionHandler {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Validate and persist a new pending entry.
    ///
    /// The assigned id is deliberately not returned: submitters are
    /// redirected to the listing, where the entry will not appear until
    /// it has been reviewed.
    pub async fn submit(&self, input: SubmissionInput) -> Result<()> {
        let name = required(input.name, "name")?;
        let product_description = required(input.product_description, "productDescription")?;
        let categories = required(input.categories, "categories")?;
        let proof_link = required(input.proof_link, "proofLink")?;

        let entry = ProductDoc {
            _id: None,
            name: name.clone(),
            product_name: None,
            product_description,
            categories: split_categories(&categories),
            proof_link,
            explanation_text: input.explanation_text.filter(|s| !s.is_empty()),
            alternatives: input.alternatives.filter(|s| !s.is_empty()),
            status: STATUS_PENDING.to_string(),
            logo: None,
            why_link: None,
        };

        let _ = self.store.insert(entry).await?;
        info!(name = %name, "New submission queued for review");
        Ok(())
    }
}
