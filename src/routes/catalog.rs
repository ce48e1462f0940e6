//! Catalog routes
//!
//! ## Routes
//!
//! - `GET /` - list visible entries
//! - `GET /product/{id}` - entry detail by id
//! - `GET /search?query=...` - substring search over visible entries
//! - `POST /add-product` - submit a new entry for review
//!
//! The handlers only parse requests and shape responses; catalog
//! semantics live in [`crate::catalog`].

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::catalog::{SubmissionInput, SUBMISSION_RECEIVED};
use crate::db::schemas::ProductDoc;
use crate::server::AppState;
use crate::types::{Result, StorefrontError};

// =============================================================================
// Types
// =============================================================================

/// Entry as rendered to clients; the ObjectId becomes its hex form
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "productName", skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(rename = "productDescription")]
    pub product_description: String,
    pub categories: Vec<String>,
    #[serde(rename = "proofLink")]
    pub proof_link: String,
    #[serde(rename = "explanationText")]
    pub explanation_text: Option<String>,
    pub alternatives: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(rename = "whyLink", skip_serializing_if = "Option::is_none")]
    pub why_link: Option<String>,
}

impl From<ProductDoc> for ProductResponse {
    fn from(doc: ProductDoc) -> Self {
        Self {
            id: doc._id.map(|id| id.to_hex()).unwrap_or_default(),
            name: doc.name,
            product_name: doc.product_name,
            product_description: doc.product_description,
            categories: doc.categories,
            proof_link: doc.proof_link,
            explanation_text: doc.explanation_text,
            alternatives: doc.alternatives,
            status: doc.status,
            logo: doc.logo,
            why_link: doc.why_link,
        }
    }
}

/// Listing/search response envelope
#[derive(Serialize)]
struct ProductListResponse {
    products: Vec<ProductResponse>,
}

/// Submission outcome envelope
#[derive(Serialize)]
struct SubmitResponse {
    success: bool,
    message: &'static str,
}

#[derive(Debug, Default, Deserialize)]
struct SearchParams {
    #[serde(default)]
    query: String,
}

// =============================================================================
// Route handlers
// =============================================================================

/// Handle GET /
pub async fn handle_list(state: Arc<AppState>) -> Response<Full<Bytes>> {
    match state.catalog.list_visible().await {
        Ok(products) => products_response(products),
        Err(e) => error_response(e),
    }
}

/// Handle GET /product/{id}
pub async fn handle_detail(state: Arc<AppState>, raw_id: &str) -> Response<Full<Bytes>> {
    match state.catalog.get_by_id(raw_id).await {
        Ok(product) => json_response(StatusCode::OK, &ProductResponse::from(product)),
        Err(e) => error_response(e),
    }
}

/// Handle GET /search?query=...
pub async fn handle_search(state: Arc<AppState>, raw_query: Option<&str>) -> Response<Full<Bytes>> {
    let params: SearchParams = match serde_urlencoded::from_str(raw_query.unwrap_or("")) {
        Ok(p) => p,
        Err(e) => {
            return error_response(StorefrontError::BadRequest(format!(
                "Malformed query string: {}",
                e
            )))
        }
    };

    debug!(query = %params.query, "Search request");

    match state.catalog.search(&params.query).await {
        Ok(products) => products_response(products),
        Err(e) => error_response(e),
    }
}

/// Handle POST /add-product
///
/// Accepts `application/x-www-form-urlencoded` (the browser form) or
/// `application/json` bodies. On success the submitter is pointed back
/// at the listing; the new entry stays out of it until reviewed.
pub async fn handle_submit(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Response<Full<Bytes>> {
    let content_type = req
        .headers()
        .get("Content-Type")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("application/x-www-form-urlencoded")
        .to_string();

    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!(error = %e, "Failed to read submission body");
            return error_response(StorefrontError::BadRequest(
                "Failed to read request body".to_string(),
            ));
        }
    };

    let input = match parse_submission(&content_type, &body) {
        Ok(input) => input,
        Err(e) => return error_response(e),
    };

    match state.submissions.submit(input).await {
        Ok(()) => {
            let body = SubmitResponse {
                success: true,
                message: SUBMISSION_RECEIVED,
            };
            let payload = serde_json::to_string(&body)
                .unwrap_or_else(|_| r#"{"success":true}"#.to_string());

            Response::builder()
                .status(StatusCode::CREATED)
                .header("Content-Type", "application/json")
                .header("Location", "/")
                .header("Access-Control-Allow-Origin", "*")
                .body(Full::new(Bytes::from(payload)))
                .unwrap()
        }
        Err(e) => error_response(e),
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Parse a submission body according to its content type
fn parse_submission(content_type: &str, body: &[u8]) -> Result<SubmissionInput> {
    if content_type.contains("application/json") {
        serde_json::from_slice(body)
            .map_err(|e| StorefrontError::BadRequest(format!("Malformed JSON body: {}", e)))
    } else {
        serde_urlencoded::from_bytes(body)
            .map_err(|e| StorefrontError::BadRequest(format!("Malformed form body: {}", e)))
    }
}

/// Build the `{"products": [...]}` envelope for listing and search
fn products_response(products: Vec<ProductDoc>) -> Response<Full<Bytes>> {
    let body = ProductListResponse {
        products: products.into_iter().map(ProductResponse::from).collect(),
    };
    json_response(StatusCode::OK, &body)
}

/// Create a JSON response
fn json_response<T: Serialize>(status: StatusCode, data: &T) -> Response<Full<Bytes>> {
    let body = serde_json::to_string(data)
        .unwrap_or_else(|_| r#"{"error":"Serialization failed"}"#.to_string());

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(body)))
        .unwrap()
}

/// Map an error to its status code and JSON body
fn error_response(err: StorefrontError) -> Response<Full<Bytes>> {
    let (status, message) = err.into_status_code_and_body();
    let body = serde_json::json!({
        "success": false,
        "error": message,
    });

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}
