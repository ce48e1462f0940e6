//! Administrative bulk loader
//!
//! Inserts pre-formed entry records verbatim: no validation, no forced
//! status, `logo`/`whyLink` kept as given. Per-record failures are
//! logged and do not stop or roll back the batch. Only reachable
//! through the `storefront-seed` binary, never from the public surface.

use std::sync::Arc;
use tracing::{debug, error, info};

use super::store::CatalogStore;
use crate::db::schemas::ProductDoc;

/// Outcome of a bulk load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub failed: usize,
}

/// Verbatim bulk loader over a [`CatalogStore`]
pub struct SeedLoader {
    store: Arc<dyn CatalogStore>,
}

impl SeedLoader {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Insert each record as-is, continuing past failures
    pub async fn load(&self, entries: Vec<ProductDoc>) -> SeedReport {
        let mut report = SeedReport::default();

        for entry in entries {
            let name = entry.name.clone();
            match self.store.insert(entry).await {
                Ok(id) => {
                    debug!(name = %name, id = %id, "Seeded entry");
                    report.inserted += 1;
                }
                Err(e) => {
                    error!(name = %name, error = %e, "Failed to seed entry, continuing");
                    report.failed += 1;
                }
            }
        }

        info!(
            inserted = report.inserted,
            failed = report.failed,
            "Seed batch complete"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::testing::MemoryCatalogStore;
    use crate::db::schemas::STATUS_PUBLISHED;

    fn seed_entry(name: &str) -> ProductDoc {
        ProductDoc {
            _id: None,
            name: name.to_string(),
            product_name: Some(name.to_string()),
            product_description: name.to_string(),
            categories: vec!["DRINKS".to_string()],
            proof_link: "https://example.org/proof".to_string(),
            explanation_text: None,
            alternatives: None,
            status: STATUS_PUBLISHED.to_string(),
            logo: Some("https://cdn.example.org/logo.png".to_string()),
            why_link: Some("https://example.org/target".to_string()),
        }
    }

    #[tokio::test]
    async fn records_are_inserted_verbatim() {
        let store = Arc::new(MemoryCatalogStore::new());
        let loader = SeedLoader::new(store.clone());

        let report = loader.load(vec![seed_entry("7up")]).await;
        assert_eq!(report, SeedReport { inserted: 1, failed: 0 });

        let stored = &store.all()[0];
        // Status, logo, and whyLink pass through untouched
        assert_eq!(stored.status, STATUS_PUBLISHED);
        assert!(stored.logo.is_some());
        assert!(stored.why_link.is_some());
        assert_eq!(stored.product_name.as_deref(), Some("7up"));
    }

    #[tokio::test]
    async fn a_failing_record_does_not_stop_the_batch() {
        let mut store = MemoryCatalogStore::new();
        store.fail_inserts_named = Some("Broken Co".to_string());
        let store = Arc::new(store);
        let loader = SeedLoader::new(store.clone());

        let report = loader
            .load(vec![
                seed_entry("7up"),
                seed_entry("Broken Co"),
                seed_entry("Acqua Panna"),
            ])
            .await;

        assert_eq!(report, SeedReport { inserted: 2, failed: 1 });
        assert_eq!(store.len(), 2);
    }
}
