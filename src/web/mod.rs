//! HTML form served by `scholarsift serve`.
//!
//! Routes:
//! - `GET /` - the search form, plus the cached results if there are any
//! - `POST /search` - run a search and show the report
//! - `POST /export` - export the cached results and link the file
//! - `GET /files/{name}` - download an exported file

mod page;

pub use page::{escape_html, PageView};

use axum::extract::{Form, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::export::{export_results, ExportWriter};
use crate::feed::PaperFeed;
use crate::models::ExportFormat;
use crate::search::{render_report, search_papers};
use crate::session::SessionHandle;

/// Smallest result count the form accepts
pub const MIN_RESULTS: usize = 1;
/// Largest result count the form accepts
pub const MAX_RESULTS: usize = 10;

/// Shared state of the web form
#[derive(Clone)]
pub struct AppState {
    pub session: SessionHandle,
    pub feed: Arc<dyn PaperFeed>,
    pub exporter: Arc<ExportWriter>,
}

impl AppState {
    /// Create state with an empty session
    pub fn new(feed: Arc<dyn PaperFeed>, exporter: ExportWriter) -> Self {
        Self {
            session: SessionHandle::new(),
            feed,
            exporter: Arc::new(exporter),
        }
    }

    /// Page showing whatever the session currently holds
    fn current_view(&self) -> PageView {
        let session = self.session.snapshot();
        match session.query_info() {
            Some(info) if !session.is_empty() => PageView {
                query: info.query.clone(),
                max_results: info.max_results,
                results: Some(render_report(&info.query, session.papers())),
                show_export: true,
                ..PageView::default()
            },
            _ => PageView::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub query: String,
    pub max_results: usize,
}

#[derive(Debug, Deserialize)]
pub struct ExportForm {
    pub format: String,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/search", post(search))
        .route("/export", post(export))
        .route("/files/{name}", get(download))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve the form until Ctrl-C
pub async fn serve(state: AppState, addr: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "Web form listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down web form");
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.current_view().render())
}

async fn search(State(state): State<AppState>, Form(form): Form<SearchForm>) -> Html<String> {
    let max_results = form.max_results.clamp(MIN_RESULTS, MAX_RESULTS);
    let outcome = search_papers(state.feed.as_ref(), &state.session, &form.query, max_results).await;

    // earlier results stay exportable after a failed or empty search
    let view = PageView {
        query: form.query,
        max_results,
        results: Some(outcome.message().to_string()),
        show_export: outcome.reveal_export() || !state.session.is_empty(),
        ..PageView::default()
    };
    Html(view.render())
}

async fn export(State(state): State<AppState>, Form(form): Form<ExportForm>) -> Response {
    let mut view = state.current_view();

    let format = match form.format.parse::<ExportFormat>() {
        Ok(format) => format,
        Err(e) => {
            view.notice = Some(e.to_string());
            return (StatusCode::BAD_REQUEST, Html(view.render())).into_response();
        }
    };
    view.format = format;

    let exporter = Arc::clone(&state.exporter);
    let session = state.session.clone();
    let written =
        tokio::task::spawn_blocking(move || export_results(&exporter, &session, format)).await;

    match written {
        Ok(Some(path)) => {
            view.download = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned());
        }
        Ok(None) => {
            view.notice = Some(format!("Nothing was exported as {}.", format));
        }
        Err(e) => {
            tracing::error!(error = %e, "Export task failed");
            view.notice = Some(format!("Nothing was exported as {}.", format));
        }
    }

    Html(view.render()).into_response()
}

/// Serve an exported file, restricted to the names the exporter writes
async fn download(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let Some(format) = ExportFormat::ALL.into_iter().find(|format| {
        state
            .exporter
            .output_path(*format)
            .file_name()
            .is_some_and(|file| file.to_string_lossy() == name)
    }) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match tokio::fs::read(state.exporter.output_path(format)).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, content_type(format).to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", name),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(file = %name, error = %e, "Export file not available");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

fn content_type(format: ExportFormat) -> &'static str {
    match format {
        ExportFormat::Text => "text/plain; charset=utf-8",
        ExportFormat::Word => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        ExportFormat::Pdf => "application/pdf",
        ExportFormat::Excel => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    }
}
