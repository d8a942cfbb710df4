use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::extract::{self, ProductData};
use crate::fetch::{FetchClient, FetchError};
use crate::urls;
use crate::verdict::{self, Verdict};

/// Wire sentinel for text fields the extractors could not locate.
const NOT_FOUND: &str = "Not found";

#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct VerdictResponse {
    pub product_title: String,
    pub price: String,
    pub reviews_count: u32,
    pub bsr: u32,
    pub verdict: Verdict,
}

impl VerdictResponse {
    /// Classify and render an extraction record for the wire: absent title
    /// and price become the "Not found" sentinel, absent rank becomes 0.
    pub fn from_extraction(data: ProductData) -> Self {
        let verdict = verdict::classify(data.reviews_count, data.sales_rank);
        VerdictResponse {
            product_title: data.title.unwrap_or_else(|| NOT_FOUND.to_string()),
            price: data.price.unwrap_or_else(|| NOT_FOUND.to_string()),
            reviews_count: data.reviews_count,
            bsr: data.sales_rank.unwrap_or(0),
            verdict,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Fetch(FetchError),
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        ApiError::Fetch(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Fetch(err) => (fetch_status(err), err.to_string()),
        };
        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

/// Map each upstream failure category to its own status code so callers can
/// tell a slow proxy from a blocked page.
fn fetch_status(err: &FetchError) -> StatusCode {
    match err {
        FetchError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        FetchError::Connect => StatusCode::SERVICE_UNAVAILABLE,
        FetchError::Upstream(code) => {
            StatusCode::from_u16(*code).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        FetchError::MissingApiKey
        | FetchError::Blocked
        | FetchError::EmptyBody
        | FetchError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Build the axum router with all endpoints.
pub fn router(client: Arc<FetchClient>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/verdict", post(post_verdict))
        .with_state(client)
}

/// Run the verdict API on the given port until the task is dropped.
pub async fn serve(port: u16, client: Arc<FetchClient>) -> anyhow::Result<()> {
    let app = router(client);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Verdict API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "API is Running", "docs": "/verdict" }))
}

async fn post_verdict(
    State(client): State<Arc<FetchClient>>,
    Json(request): Json<ProductRequest>,
) -> Result<Json<VerdictResponse>, ApiError> {
    let url = request.url.trim();
    if url.is_empty() {
        return Err(ApiError::BadRequest("URL cannot be empty".to_string()));
    }
    if !urls::is_product_url(url) {
        return Err(ApiError::BadRequest(
            "URL must be a valid Amazon product page (e.g. https://www.amazon.com/dp/PRODUCT_ID)"
                .to_string(),
        ));
    }

    let html = client.fetch_rendered(url).await?;
    let data = extract::extract_product(&html);
    info!(
        "Extracted: title={} reviews={} rank={:?}",
        data.title.is_some(),
        data.reviews_count,
        data.sales_rank
    );
    Ok(Json(VerdictResponse::from_extraction(data)))
}
