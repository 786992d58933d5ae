//! HTTP server for the railcat import API.
//!
//! # API Endpoints
//!
//! | Method | Path                              | Description                        |
//! |--------|-----------------------------------|------------------------------------|
//! | GET    | `/health`                         | Health check                       |
//! | POST   | `/api/import/jmri`                | JSON array of roster XML documents |
//! | POST   | `/api/import/jmri/upload`         | Multipart roster files (`files`)   |
//! | POST   | `/api/import/csv/locomotives`     | CSV body, locomotives              |
//! | POST   | `/api/import/csv/rolling-stock`   | CSV body, rolling stock            |
//! | GET    | `/api/import/csv/template/{kind}` | CSV template download              |
//! | GET    | `/api/backup/history`             | Import audit events                |
//! | GET    | `/api/logs`                       | SSE stream for real-time logs      |
//!
//! Import endpoints answer 200 with a report even when every item was
//! skipped. Only store failures produce a 500.

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{sse::Event, IntoResponse, Json, Response, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::logs::{log_error, log_info, LOG_BROADCASTER};
use super::types::{error_response, CsvImportResponse, HistoryResponse, RosterImportResponse};
use crate::config::AppConfig;
use crate::error::{ServerError, ServerResult};
use crate::import::{csv_template, import_csv_batch, import_roster_batch, CsvTarget};
use crate::parser::decode_upload;
use crate::store::Store;

/// Maximum number of audit events returned by the history endpoint.
pub const HISTORY_LIMIT: usize = 50;

/// Uploads of whole rosters can be large.
const BODY_LIMIT: usize = 32 * 1024 * 1024;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        log_error(self.to_string());
        (status, Json(error_response(&self.to_string()))).into_response()
    }
}

/// Build the router with all routes and the CORS layer.
pub fn router(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/import/jmri", post(import_jmri))
        .route("/api/import/jmri/upload", post(import_jmri_upload))
        .route("/api/import/csv/locomotives", post(import_csv_locomotives))
        .route("/api/import/csv/rolling-stock", post(import_csv_rolling_stock))
        .route("/api/import/csv/template/{kind}", get(download_template))
        .route("/api/backup/history", get(history))
        .route("/api/logs", get(sse_logs))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(cors_layer(config))
        .with_state(state)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_DISPOSITION])
}

/// Start the HTTP server
pub async fn start_server(config: AppConfig, store: Arc<dyn Store>) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(AppState::new(store), &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    println!("🚂 Railcat server running on http://localhost:{}", config.port);
    println!("   POST /api/import/jmri              - Import roster XML documents");
    println!("   POST /api/import/jmri/upload       - Upload roster files");
    println!("   POST /api/import/csv/{{kind}}        - Import CSV");
    println!("   GET  /api/import/csv/template/{{kind}}");
    println!("   GET  /api/backup/history           - Import history");
    println!("   GET  /api/logs                     - SSE log stream");
    println!();

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "railcat",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn import_jmri(
    State(state): State<AppState>,
    Json(documents): Json<Vec<String>>,
) -> ServerResult<Json<RosterImportResponse>> {
    let report = import_roster_batch(state.store.as_ref(), &documents).await?;
    Ok(Json(report.into()))
}

async fn import_jmri_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ServerResult<Json<RosterImportResponse>> {
    let mut documents = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Multipart error: {}", e)))?
    {
        if !matches!(field.name(), Some("files") | Some("file")) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("unknown").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ServerError::BadRequest(format!("Read error: {}", e)))?;
        log_info(format!("📄 {} ({} bytes)", file_name, bytes.len()));
        documents.push(decode_upload(&bytes));
    }

    if documents.is_empty() {
        return Err(ServerError::BadRequest("No files provided".to_string()));
    }

    let report = import_roster_batch(state.store.as_ref(), &documents).await?;
    Ok(Json(report.into()))
}

async fn import_csv_locomotives(
    State(state): State<AppState>,
    body: Bytes,
) -> ServerResult<Json<CsvImportResponse>> {
    import_csv(state, CsvTarget::Locomotives, &body).await
}

async fn import_csv_rolling_stock(
    State(state): State<AppState>,
    body: Bytes,
) -> ServerResult<Json<CsvImportResponse>> {
    import_csv(state, CsvTarget::RollingStock, &body).await
}

async fn import_csv(state: AppState, target: CsvTarget, body: &[u8]) -> ServerResult<Json<CsvImportResponse>> {
    let content = decode_upload(body);
    let report = import_csv_batch(state.store.as_ref(), target, &content).await?;
    Ok(Json(report.into()))
}

async fn download_template(Path(kind): Path<String>) -> ServerResult<Response> {
    let target = CsvTarget::from_slug(&kind)
        .ok_or_else(|| ServerError::BadRequest(format!("Unknown template: {}", kind)))?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"plantilla_{}.csv\"", kind),
        ),
    ];
    Ok((headers, csv_template(target)).into_response())
}

async fn history(State(state): State<AppState>) -> ServerResult<Json<HistoryResponse>> {
    let events = state.store.audit_history(HISTORY_LIMIT).await?;
    Ok(Json(events.into()))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| {
        let entry = result.ok()?;
        let json = serde_json::to_string(&entry).ok()?;
        Some(Ok(Event::default().data(json)))
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
