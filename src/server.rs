//! HTTP host for the search state store and the debug panel.
//!
//! Plays the part of the rendering front-end: a browser (or `curl`) reads
//! and writes the shared state and drives the debug panel through a small
//! JSON API.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (returns version) |
//! | `GET`  | `/api/state` | Store snapshot plus the current route |
//! | `PUT`  | `/api/state/search-term` | Replace the search term |
//! | `PUT`  | `/api/state/query-result` | Replace the query results |
//! | `PUT`  | `/api/state/source` | Select a search source |
//! | `GET`  | `/api/debug-panel` | Panel render model |
//! | `PUT`  | `/api/debug-panel/visible` | Show or hide the panel |
//! | `POST` | `/api/debug-panel/filenames/select` | Use a filename as the search term |
//! | `GET`  | `/api/toasts` | Drain pending acknowledgements |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "Invalid search source: \"bing\"..." } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_initialized` (503), `internal` (500).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so a front-end served
//! from another port can call the API.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use search_console_core::{ConsoleError, DataContext, QueryResult, SearchSource, SearchState};

use crate::api::HttpFilenameLister;
use crate::config::Config;
use crate::debug_panel::PanelView;
use crate::notify::Toast;
use crate::session::Session;

/// Shared application state passed to all route handlers via Axum's `State` extractor.
type AppState = Arc<Session>;

/// Starts the HTTP host.
///
/// Mounts the store from `SCON_SEARCH_SOURCE` (an invalid value aborts
/// startup), binds to `[server].bind`, and serves until the process is
/// terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let lister = Arc::new(HttpFilenameLister::new(&config.api)?);
    let session = Arc::new(Session::from_env(config, lister)?);
    serve(session, &config.server.bind).await
}

/// Serves an existing session on `bind_addr`.
pub async fn serve(session: Arc<Session>, bind_addr: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "search console listening");
    println!("Search console listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(session)).await?;
    Ok(())
}

/// Builds the router for a session.
pub fn router(session: Arc<Session>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/api/state", get(handle_get_state))
        .route("/api/state/search-term", put(handle_set_search_term))
        .route("/api/state/query-result", put(handle_set_query_result))
        .route("/api/state/source", put(handle_set_source))
        .route("/api/debug-panel", get(handle_get_panel))
        .route("/api/debug-panel/visible", put(handle_set_panel_visible))
        .route(
            "/api/debug-panel/filenames/select",
            post(handle_select_filename),
        )
        .route("/api/toasts", get(handle_drain_toasts))
        .layer(cors)
        .with_state(session)
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (e.g., `"bad_request"`).
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

impl From<ConsoleError> for AppError {
    fn from(err: ConsoleError) -> Self {
        match err {
            ConsoleError::InvalidConfiguration { .. } => bad_request(err.to_string()),
            ConsoleError::StoreNotInitialized => AppError {
                status: StatusCode::SERVICE_UNAVAILABLE,
                code: "not_initialized".to_string(),
                message: err.to_string(),
            },
            other => AppError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "internal".to_string(),
                message: other.to_string(),
            },
        }
    }
}

fn data(session: &Session) -> Result<Arc<DataContext>, AppError> {
    session.data().map_err(AppError::from)
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ /api/state ============

/// Store snapshot as returned by every `/api/state` route.
#[derive(Debug, Serialize, Deserialize)]
pub struct StateResponse {
    #[serde(flatten)]
    pub state: SearchState,
    pub route: String,
}

fn state_response(session: &Session, data: &DataContext) -> Json<StateResponse> {
    Json(StateResponse {
        state: data.snapshot(),
        route: session.routes.current_route(),
    })
}

async fn handle_get_state(
    State(session): State<AppState>,
) -> Result<Json<StateResponse>, AppError> {
    let data = data(&session)?;
    Ok(state_response(&session, &data))
}

#[derive(Deserialize)]
struct SearchTermBody {
    search_term: Option<String>,
}

async fn handle_set_search_term(
    State(session): State<AppState>,
    Json(body): Json<SearchTermBody>,
) -> Result<Json<StateResponse>, AppError> {
    let data = data(&session)?;
    data.search_term().set(body.search_term);
    Ok(state_response(&session, &data))
}

#[derive(Deserialize)]
struct QueryResultBody {
    query_result: Vec<QueryResult>,
}

async fn handle_set_query_result(
    State(session): State<AppState>,
    Json(body): Json<QueryResultBody>,
) -> Result<Json<StateResponse>, AppError> {
    let data = data(&session)?;
    data.query_result().set(body.query_result);
    Ok(state_response(&session, &data))
}

#[derive(Deserialize)]
struct SourceBody {
    source: String,
}

/// Handler for `PUT /api/state/source`.
///
/// Unknown names are rejected with `400` and leave the store untouched.
async fn handle_set_source(
    State(session): State<AppState>,
    Json(body): Json<SourceBody>,
) -> Result<Json<StateResponse>, AppError> {
    let data = data(&session)?;
    let source: SearchSource = body.source.parse()?;
    session.panel.select_source(source)?;
    Ok(state_response(&session, &data))
}

// ============ /api/debug-panel ============

/// Panel response. Hidden panels carry only `"visible": false`.
#[derive(Debug, Serialize)]
pub struct PanelResponse {
    pub visible: bool,
    #[serde(flatten)]
    pub view: Option<PanelView>,
}

fn panel_response(session: &Session) -> Result<Json<PanelResponse>, AppError> {
    let view = session.panel.view()?;
    Ok(Json(PanelResponse {
        visible: view.is_some(),
        view,
    }))
}

async fn handle_get_panel(
    State(session): State<AppState>,
) -> Result<Json<PanelResponse>, AppError> {
    panel_response(&session)
}

#[derive(Deserialize)]
struct VisibleBody {
    visible: bool,
}

async fn handle_set_panel_visible(
    State(session): State<AppState>,
    Json(body): Json<VisibleBody>,
) -> Result<Json<PanelResponse>, AppError> {
    data(&session)?;
    session.layout.set_debug_panel_visible(body.visible);
    panel_response(&session)
}

#[derive(Deserialize)]
struct SelectFilenameBody {
    filename: String,
}

/// Handler for `POST /api/debug-panel/filenames/select`.
///
/// Returns `400` when the panel is hidden, the source is not `static`, or
/// the filename is not listed, and `503` once the store is unmounted.
async fn handle_select_filename(
    State(session): State<AppState>,
    Json(body): Json<SelectFilenameBody>,
) -> Result<Json<StateResponse>, AppError> {
    session
        .panel
        .click_filename(&body.filename)
        .map_err(|e| match e.downcast::<ConsoleError>() {
            Ok(err) => AppError::from(err),
            Err(other) => bad_request(other.to_string()),
        })?;
    let data = data(&session)?;
    Ok(state_response(&session, &data))
}

// ============ GET /api/toasts ============

#[derive(Serialize)]
struct ToastListResponse {
    toasts: Vec<Toast>,
}

async fn handle_drain_toasts(State(session): State<AppState>) -> Json<ToastListResponse> {
    Json(ToastListResponse {
        toasts: session.toasts.drain(),
    })
}
