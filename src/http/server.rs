//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Parse each request's URI and assemble its page
//! - Answer stale links with a redirect

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use arc_swap::ArcSwap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::assembly::AssemblyHooks;
use crate::config::KillboardConfig;
use crate::http::request::{request_id, RequestTarget, X_REQUEST_ID};
use crate::http::response;
use crate::observability::metrics;
use crate::site::{assembly_for, default_hooks, BoardPage};
use crate::uri::{StaticKey, UriContext, UriError, UriSettings};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ArcSwap<KillboardConfig>>,
    pub hooks: Arc<AssemblyHooks<BoardPage>>,
}

impl AppState {
    pub fn new(config: KillboardConfig) -> Self {
        Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
            hooks: Arc::new(default_hooks()),
        }
    }
}

/// HTTP server for the killboard.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: KillboardConfig) -> Self {
        Self::with_state(AppState::new(config))
    }

    /// Create a server around existing state, e.g. one a config watcher
    /// also updates.
    pub fn with_state(state: AppState) -> Self {
        let timeout = state.config.load().listener.request_timeout_secs;
        let router = Self::build_router(state.clone(), timeout);
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState, timeout_secs: u64) -> Router {
        let x_request_id = axum::http::HeaderName::from_static(X_REQUEST_ID);
        Router::new()
            .route("/healthz", get(health_handler))
            .route("/", get(page_handler))
            .route("/{*path}", get(page_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(timeout_secs)))
            .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
    }

    /// The router, for serving or for driving directly in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Main page handler.
/// Parses the URI, redirects stale links, assembles the page otherwise.
async fn page_handler(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    let start_time = Instant::now();
    let config = state.config.load_full();
    let request_id = request_id(&headers).to_string();

    let target = RequestTarget::from_parts(&uri, &headers, &config.site.script_name);
    let key = target
        .session_key
        .clone()
        .map(StaticKey::new)
        .unwrap_or_else(StaticKey::random);

    let settings = UriSettings {
        path_style: config.site.path_info,
        script: config.site.script_name.clone(),
        hosts: Arc::new(config.site.clone()),
        keys: Arc::new(key),
    };

    tracing::debug!(
        request_id = %request_id,
        path_info = ?target.path_info,
        query = %target.query,
        "Handling page request"
    );

    let context = match UriContext::from_request(
        &settings,
        target.origin,
        target.path_info.as_deref(),
        &target.query,
    ) {
        Ok(context) => context,
        Err(UriError::RedirectRequired { location }) => {
            tracing::info!(request_id = %request_id, location = %location, "Redirecting stale link");
            metrics::record_redirect();
            metrics::record_request("redirect", StatusCode::FOUND.as_u16(), start_time);
            return response::redirect(&location);
        }
    };

    let page_name = context.current_page().to_string();
    let assembly = assembly_for(BoardPage::new(config.site.title.clone(), context));
    let html = assembly.assemble(&state.hooks);

    metrics::record_request(&page_name, StatusCode::OK.as_u16(), start_time);
    tracing::info!(
        request_id = %request_id,
        page = %page_name,
        bytes = html.len(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Page served"
    );
    response::page(html)
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
