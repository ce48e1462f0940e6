//! Catalog query service
//!
//! Answers the three public read patterns: listing, detail-by-id, and
//! free-text search. Listing and search only ever return visible
//! entries; the detail path honors the `detail_includes_pending` policy
//! (see [`crate::config::Args`]).

use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::debug;

use super::store::CatalogStore;
use crate::db::schemas::ProductDoc;
use crate::types::{Result, StorefrontError};

/// Read-side catalog service
#[derive(Clone)]
pub struct CatalogQuery {
    store: Arc<dyn CatalogStore>,
    detail_includes_pending: bool,
}

impl CatalogQuery {
    pub fn new(store: Arc<dyn CatalogStore>, detail_includes_pending: bool) -> Self {
        Self {
            store,
            detail_includes_pending,
        }
    }

    /// All visible entries, in store-native order. No pagination.
    pub async fn list_visible(&self) -> Result<Vec<ProductDoc>> {
        self.store.list_visible().await
    }

    /// Single entry by its opaque id token.
    ///
    /// Fails with `InvalidId` when the token is not a well-formed
    /// ObjectId and `NotFound` when no entry matches.
    pub async fn get_by_id(&self, raw_id: &str) -> Result<ProductDoc> {
        let id = ObjectId::parse_str(raw_id)
            .map_err(|e| StorefrontError::InvalidId(format!("'{}': {}", raw_id, e)))?;

        self.store
            .find_by_id(id, self.detail_includes_pending)
            .await?
            .ok_or_else(|| StorefrontError::NotFound(format!("No entry with id '{}'", raw_id)))
    }

    /// Visible entries matching `query` as a case-insensitive substring
    /// of name, productName, or productDescription. An empty query
    /// matches every visible entry.
    pub async fn search(&self, query: &str) -> Result<Vec<ProductDoc>> {
        debug!(query = %query, "Searching catalog");
        self.store.search_visible(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::testing::MemoryCatalogStore;
    use crate::db::schemas::{STATUS_PENDING, STATUS_PUBLISHED};

    fn entry(name: &str, description: &str, status: &str) -> ProductDoc {
        ProductDoc {
            _id: None,
            name: name.to_string(),
            product_name: None,
            product_description: description.to_string(),
            categories: vec!["FOOD".to_string()],
            proof_link: "https://example.org/proof".to_string(),
            explanation_text: None,
            alternatives: None,
            status: status.to_string(),
            logo: None,
            why_link: None,
        }
    }

    fn seeded_query(entries: Vec<ProductDoc>, detail_includes_pending: bool) -> CatalogQuery {
        let store = Arc::new(MemoryCatalogStore::with_entries(entries));
        CatalogQuery::new(store, detail_includes_pending)
    }

    #[tokio::test]
    async fn listing_never_includes_pending_entries() {
        let query = seeded_query(
            vec![
                entry("7up", "7up", STATUS_PUBLISHED),
                entry("Pending Co", "x", STATUS_PENDING),
            ],
            true,
        );

        let visible = query.list_visible().await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "7up");
    }

    #[tokio::test]
    async fn search_never_includes_pending_entries() {
        let query = seeded_query(
            vec![
                entry("Coca Cola", "soda", STATUS_PUBLISHED),
                entry("Coca Pending", "soda", STATUS_PENDING),
            ],
            true,
        );

        let results = query.search("coca").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Coca Cola");

        // Even the empty query, which matches everything visible
        let results = query.search("").await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let query = seeded_query(vec![entry("Coca Cola", "soda", STATUS_PUBLISHED)], true);

        let lower = query.search("coca").await.unwrap();
        let upper = query.search("COCA").await.unwrap();
        assert_eq!(lower.len(), 1);
        assert_eq!(
            lower.iter().map(|e| e._id).collect::<Vec<_>>(),
            upper.iter().map(|e| e._id).collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn search_matches_any_of_the_three_fields() {
        let mut by_product_name = entry("BrandX", "plain", STATUS_PUBLISHED);
        by_product_name.product_name = Some("Sparkle Water".to_string());

        let query = seeded_query(
            vec![
                entry("Sparkle Cola", "plain", STATUS_PUBLISHED),
                by_product_name,
                entry("BrandY", "a sparkle of flavor", STATUS_PUBLISHED),
                entry("BrandZ", "plain", STATUS_PUBLISHED),
            ],
            true,
        );

        let results = query.search("sparkle").await.unwrap();
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|e| e.name != "BrandZ"));
    }

    #[tokio::test]
    async fn search_scenario_exact_and_missing() {
        let query = seeded_query(
            vec![
                entry("7up", "7up", STATUS_PUBLISHED),
                entry("Pending Co", "x", STATUS_PENDING),
            ],
            true,
        );

        let hits = query.search("7up").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "7up");

        let misses = query.search("nonexistent").await.unwrap();
        assert!(misses.is_empty());
    }

    #[tokio::test]
    async fn detail_returns_pending_entry_by_default() {
        let store = Arc::new(MemoryCatalogStore::with_entries(vec![entry(
            "Pending Co",
            "x",
            STATUS_PENDING,
        )]));
        let id = store.all()[0]._id.unwrap().to_hex();

        let query = CatalogQuery::new(store, true);
        let found = query.get_by_id(&id).await.unwrap();
        assert_eq!(found.name, "Pending Co");
        assert!(found.is_pending());
    }

    #[tokio::test]
    async fn detail_visibility_policy_can_hide_pending() {
        let store = Arc::new(MemoryCatalogStore::with_entries(vec![entry(
            "Pending Co",
            "x",
            STATUS_PENDING,
        )]));
        let id = store.all()[0]._id.unwrap().to_hex();

        let query = CatalogQuery::new(store, false);
        let err = query.get_by_id(&id).await.unwrap_err();
        assert!(matches!(err, StorefrontError::NotFound(_)));
    }

    #[tokio::test]
    async fn detail_distinguishes_malformed_and_missing_ids() {
        let query = seeded_query(vec![entry("7up", "7up", STATUS_PUBLISHED)], true);

        let err = query.get_by_id("not-a-hex-id").await.unwrap_err();
        assert!(matches!(err, StorefrontError::InvalidId(_)));

        let absent = ObjectId::new().to_hex();
        let err = query.get_by_id(&absent).await.unwrap_err();
        assert!(matches!(err, StorefrontError::NotFound(_)));
    }
}
