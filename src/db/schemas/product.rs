//! Catalog entry document schema
//!
//! One document per boycotted product/brand. Public submissions carry a
//! subset of the fields; `logo` and `whyLink` are populated only by the
//! administrative bulk loader.

use bson::{doc, oid::ObjectId, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::IntoIndexes;

/// Collection name for catalog entries
pub const PRODUCT_COLLECTION: &str = "products";

/// Status of an entry awaiting review; excluded from every public listing
pub const STATUS_PENDING: &str = "pending";

/// Status of a reviewed, publicly visible entry
pub const STATUS_PUBLISHED: &str = "published";

/// Catalog entry stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ProductDoc {
    /// MongoDB document ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,

    /// Display name of the brand/product
    pub name: String,

    /// Product name, searched alongside `name`; absent on submissions
    #[serde(rename = "productName", skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,

    /// Free-text description
    #[serde(rename = "productDescription")]
    pub product_description: String,

    /// Category tags, split from the submitted comma-separated string
    pub categories: Vec<String>,

    /// URL-like string citing evidence
    #[serde(rename = "proofLink")]
    pub proof_link: String,

    /// Optional explanation; stored as an explicit null when absent
    #[serde(rename = "explanationText")]
    pub explanation_text: Option<String>,

    /// Optional alternative products; stored as an explicit null when absent
    pub alternatives: Option<String>,

    /// Moderation status. Submissions always start as `pending`; the
    /// query layer only distinguishes `pending` from everything else.
    /// Bulk-load records that omit the field land as `published`, which
    /// keeps them publicly visible.
    #[serde(default = "default_status")]
    pub status: String,

    /// Logo URL; bulk-load only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,

    /// External "why is this boycotted" link; bulk-load only
    #[serde(rename = "whyLink", skip_serializing_if = "Option::is_none")]
    pub why_link: Option<String>,
}

fn default_status() -> String {
    STATUS_PUBLISHED.to_string()
}

impl ProductDoc {
    /// Whether this entry is still awaiting review
    pub fn is_pending(&self) -> bool {
        self.status == STATUS_PENDING
    }
}

impl IntoIndexes for ProductDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![
            // Every public read filters on status
            (
                doc! { "status": 1 },
                Some(
                    IndexOptions::builder()
                        .name("status_index".to_string())
                        .build(),
                ),
            ),
            (
                doc! { "name": 1 },
                Some(
                    IndexOptions::builder()
                        .name("name_index".to_string())
                        .build(),
                ),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submitted_doc() -> ProductDoc {
        ProductDoc {
            _id: None,
            name: "7up".to_string(),
            product_name: None,
            product_description: "7up".to_string(),
            categories: vec!["DRINKS".to_string()],
            proof_link: "https://example.org/proof".to_string(),
            explanation_text: None,
            alternatives: None,
            status: STATUS_PENDING.to_string(),
            logo: None,
            why_link: None,
        }
    }

    #[test]
    fn optional_text_fields_serialize_as_explicit_nulls() {
        let doc = bson::to_document(&submitted_doc()).unwrap();
        assert_eq!(doc.get("explanationText"), Some(&bson::Bson::Null));
        assert_eq!(doc.get("alternatives"), Some(&bson::Bson::Null));
    }

    #[test]
    fn bulk_only_fields_are_omitted_when_absent() {
        let doc = bson::to_document(&submitted_doc()).unwrap();
        assert!(!doc.contains_key("logo"));
        assert!(!doc.contains_key("whyLink"));
        assert!(!doc.contains_key("productName"));
        assert!(!doc.contains_key("_id"));
    }

    #[test]
    fn wire_field_names_are_camel_case() {
        let doc = bson::to_document(&submitted_doc()).unwrap();
        assert!(doc.contains_key("productDescription"));
        assert!(doc.contains_key("proofLink"));
        assert_eq!(doc.get_str("status").unwrap(), STATUS_PENDING);
    }

    #[test]
    fn statusless_records_deserialize_as_published() {
        // The historical seed corpus carried no status field; those
        // records were publicly visible
        let raw = doc! {
            "name": "Wix",
            "productName": "Wix",
            "productDescription": "Wix",
            "categories": ["TECHNOLOGY"],
            "explanationText": bson::Bson::Null,
            "alternatives": bson::Bson::Null,
            "proofLink": "https://example.org/proof",
        };
        let entry: ProductDoc = bson::from_document(raw).unwrap();
        assert_eq!(entry.status, STATUS_PUBLISHED);
        assert!(!entry.is_pending());
    }

    #[test]
    fn deserializes_bulk_loaded_shape() {
        let raw = doc! {
            "_id": ObjectId::new(),
            "logo": "https://cdn.example.org/7up.png",
            "name": "7up",
            "whyLink": "https://example.org/target/7up",
            "productName": "7up",
            "productDescription": "7up",
            "categories": ["DRINKS"],
            "explanationText": bson::Bson::Null,
            "alternatives": bson::Bson::Null,
            "proofLink": "https://example.org/proof",
            "status": STATUS_PUBLISHED,
        };
        let entry: ProductDoc = bson::from_document(raw).unwrap();
        assert!(!entry.is_pending());
        assert_eq!(entry.product_name.as_deref(), Some("7up"));
        assert_eq!(entry.why_link.as_deref(), Some("https://example.org/target/7up"));
    }
}
