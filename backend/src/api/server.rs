//! HTTP Server for the menucheck API.
//!
//! # API Endpoints
//!
//! | Method | Path              | Description                          |
//! |--------|-------------------|--------------------------------------|
//! | GET    | `/health`         | Health check                         |
//! | POST   | `/api/analyze`    | Upload CSV, get output rows as JSON  |
//! | POST   | `/api/export`     | Upload CSV, get output rows as CSV   |
//! | GET    | `/api/logs`       | SSE stream for real-time logs        |

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, IntoResponse, Json, Response, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::logs::{log_error, log_info, log_warning, LOG_BROADCASTER};
use super::types::{error_response, AnalyzeForm, AnalyzeResponse};
use crate::config::{Config, MAX_UPLOAD_SIZE};
use crate::error::{CsvError, PipelineError, ServerError, ServerResult};
use crate::query::export::{export_csv, EXPORT_FILE_NAME};
use crate::query::pipeline::{analyze_bytes, AnalysisReport};

type ApiError = (StatusCode, Json<Value>);

impl From<ServerError> for ApiError {
    fn from(err: ServerError) -> Self {
        let status = match err {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        log_error(err.to_string());
        (status, Json(error_response(&err.to_string())))
    }
}

/// Build the router. Split out so tests can drive it without a socket.
pub fn router(config: Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_DISPOSITION]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/analyze", post(analyze))
        .route("/api/export", post(export))
        .route("/api/logs", get(sse_logs))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE))
        .layer(cors)
        .with_state(config)
}

/// Start the HTTP server
pub async fn start_server(config: Config) -> ServerResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    eprintln!("🚀 Menucheck server running on http://localhost:{}", config.port);
    eprintln!("   POST /api/analyze - Analyze CSV file (JSON rows)");
    eprintln!("   POST /api/export  - Analyze CSV file (CSV download)");
    eprintln!("   GET  /api/logs    - SSE log stream");
    eprintln!("   GET  /health      - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(config)).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "menucheck",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "analyze": "POST /api/analyze",
            "export": "POST /api/export",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Read the `file` part and option fields, then run the analysis.
///
/// An upload with no content gives an empty report rather than an error.
async fn run_upload(config: &Config, mut multipart: Multipart) -> ServerResult<AnalysisReport> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut form = AnalyzeForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            file_name = field.file_name().map(|s| s.to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ServerError::BadRequest(format!("Read error: {}", e)))?;
            file_data = Some(bytes.to_vec());
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| ServerError::BadRequest(format!("Read error: {}", e)))?;
            form.set(&name, value);
        }
    }

    let bytes = file_data.ok_or_else(|| ServerError::BadRequest("No file provided".into()))?;
    log_info(format!(
        "Upload: {} ({} bytes)",
        file_name.as_deref().unwrap_or("unknown"),
        bytes.len()
    ));

    let options = form.into_options(config.hide_empty_combos)?;
    match analyze_bytes(&bytes, &options) {
        Err(PipelineError::Csv(CsvError::EmptyFile)) => {
            log_warning("Uploaded file is empty");
            Ok(AnalysisReport::empty(options.mode))
        }
        result => Ok(result?),
    }
}

/// Analyze endpoint: JSON rows
async fn analyze(
    State(config): State<Config>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let report = run_upload(&config, multipart).await?;
    Ok(Json(AnalyzeResponse::from(report)))
}

/// Export endpoint: CSV attachment
async fn export(State(config): State<Config>, multipart: Multipart) -> Result<Response, ApiError> {
    let report = run_upload(&config, multipart).await?;
    let csv = export_csv(&report.output).map_err(|e| ServerError::Pipeline(e.into()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        csv,
    )
        .into_response())
}
