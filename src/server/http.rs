//! HTTP server implementation
//!
//! Uses hyper http1 with TokioIo, one task per accepted connection.
//! Routing is a single `match (method, path)`; every public read and
//! write goes through the injected catalog services, never a global
//! store handle.

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::catalog::{CatalogQuery, MongoCatalogStore, SubmissionHandler};
use crate::config::Args;
use crate::db::MongoClient;
use crate::routes;
use crate::types::StorefrontError;

/// Shared application state
pub struct AppState {
    pub args: Args,
    pub mongo: MongoClient,
    /// Read side of the catalog
    pub catalog: CatalogQuery,
    /// Write side of the catalog
    pub submissions: SubmissionHandler,
}

impl AppState {
    /// Wire the catalog services to the MongoDB-backed store
    pub async fn new(args: Args, mongo: MongoClient) -> Result<Self, StorefrontError> {
        let store = Arc::new(MongoCatalogStore::new(&mongo).await?);
        let catalog = CatalogQuery::new(store.clone(), args.detail_includes_pending);
        let submissions = SubmissionHandler::new(store);

        Ok(Self {
            args,
            mongo,
            catalog,
            submissions,
        })
    }
}

/// Run the HTTP server
pub async fn run(state: Arc<AppState>) -> Result<(), StorefrontError> {
    let listener = TcpListener::bind(state.args.listen).await?;

    info!(
        "Storefront listening on {} as node {}",
        state.args.listen, state.args.node_id
    );

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);

                    let service = service_fn(move |req| {
                        let state = Arc::clone(&state);
                        async move { handle_request(state, addr, req).await }
                    });

                    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                        error!("Error serving connection from {}: {:?}", addr, err);
                    }
                });
            }
            Err(e) => {
                error!("Error accepting connection: {:?}", e);
            }
        }
    }
}

/// Route incoming HTTP requests
async fn handle_request(
    state: Arc<AppState>,
    addr: SocketAddr,
    req: Request<Incoming>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    info!("[{}] {} {}", addr, method, path);

    let response = match (method, path.as_str()) {
        // Liveness probe
        (Method::GET, "/health") | (Method::GET, "/healthz") => {
            routes::health_check(Arc::clone(&state)).await
        }

        // Readiness probe - 503 until MongoDB answers
        (Method::GET, "/ready") | (Method::GET, "/readyz") => {
            routes::readiness_check(Arc::clone(&state)).await
        }

        // Build info
        (Method::GET, "/version") => routes::version_info(),

        // Catalog listing
        (Method::GET, "/") => routes::handle_list(Arc::clone(&state)).await,

        // Substring search over visible entries
        (Method::GET, "/search") => {
            let query = req.uri().query().map(|q| q.to_string());
            routes::handle_search(Arc::clone(&state), query.as_deref()).await
        }

        // Entry detail
        (Method::GET, p) if p.starts_with("/product/") => {
            let raw_id = p.trim_start_matches("/product/");
            routes::handle_detail(Arc::clone(&state), raw_id).await
        }

        // Public submission
        (Method::POST, "/add-product") => {
            routes::handle_submit(req, Arc::clone(&state)).await
        }

        _ => not_found_response(&path),
    };

    Ok(response)
}

/// 404 response
fn not_found_response(path: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "success": false,
        "error": format!("No route for {}", path),
    });

    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}
