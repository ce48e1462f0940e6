//! Entry store capability and its MongoDB implementation
//!
//! Visibility filtering lives in the store query predicates, not in
//! post-filtering: `status != "pending"` is part of the filter document
//! handed to MongoDB, so pending entries never leave the store on the
//! public read paths.

use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};

use crate::db::schemas::{ProductDoc, PRODUCT_COLLECTION, STATUS_PENDING};
use crate::db::{MongoClient, MongoCollection};
use crate::types::Result;

/// Capability trait over the persisted catalog collection
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All entries with `status != "pending"`, in store-native order
    async fn list_visible(&self) -> Result<Vec<ProductDoc>>;

    /// Single entry by id. `include_pending` controls whether the
    /// visibility filter applies to this lookup.
    async fn find_by_id(&self, id: ObjectId, include_pending: bool)
        -> Result<Option<ProductDoc>>;

    /// Visible entries whose name, productName, or productDescription
    /// contains `query` case-insensitively
    async fn search_visible(&self, query: &str) -> Result<Vec<ProductDoc>>;

    /// Insert an entry exactly as given, returning the assigned id
    async fn insert(&self, entry: ProductDoc) -> Result<ObjectId>;
}

/// Filter matching every publicly visible entry
pub(crate) fn visible_filter() -> Document {
    doc! { "status": { "$ne": STATUS_PENDING } }
}

/// Filter for a substring search across the three searchable fields.
///
/// The pattern is regex-escaped so user input matches literally; an
/// empty query therefore matches every visible entry.
pub(crate) fn search_filter(query: &str) -> Document {
    let pattern = regex::escape(query);
    doc! {
        "status": { "$ne": STATUS_PENDING },
        "$or": [
            { "name": { "$regex": pattern.as_str(), "$options": "i" } },
            { "productName": { "$regex": pattern.as_str(), "$options": "i" } },
            { "productDescription": { "$regex": pattern.as_str(), "$options": "i" } },
        ],
    }
}

/// Filter for a detail lookup, optionally re-applying the visibility filter
pub(crate) fn id_filter(id: ObjectId, include_pending: bool) -> Document {
    if include_pending {
        doc! { "_id": id }
    } else {
        doc! { "_id": id, "status": { "$ne": STATUS_PENDING } }
    }
}

/// MongoDB-backed catalog store
#[derive(Clone)]
pub struct MongoCatalogStore {
    products: MongoCollection<ProductDoc>,
}

impl MongoCatalogStore {
    /// Open the products collection, applying its indexes
    pub async fn new(client: &MongoClient) -> Result<Self> {
        let products = client.collection::<ProductDoc>(PRODUCT_COLLECTION).await?;
        Ok(Self { products })
    }
}

#[async_trait]
impl CatalogStore for MongoCatalogStore {
    async fn list_visible(&self) -> Result<Vec<ProductDoc>> {
        self.products.find_many(visible_filter()).await
    }

    async fn find_by_id(
        &self,
        id: ObjectId,
        include_pending: bool,
    ) -> Result<Option<ProductDoc>> {
        self.products.find_one(id_filter(id, include_pending)).await
    }

    async fn search_visible(&self, query: &str) -> Result<Vec<ProductDoc>> {
        self.products.find_many(search_filter(query)).await
    }

    async fn insert(&self, entry: ProductDoc) -> Result<ObjectId> {
        self.products.insert_one(entry).await
    }
}
