//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all edge handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Run the decision engine for every non-excluded request
//! - Answer redirects directly; forward everything else to the origin
//! - Stamp edge headers on every non-redirect response
//!
//! # Design Decisions
//! - Excluded prefixes (API, assets, image optimization) bypass the engine
//!   and are forwarded verbatim
//! - An unbuildable redirect Location degrades to pass-through; this layer
//!   never turns a routing decision into a client-visible error
//! - Origin failures map to 502; the origin's Host is its own, the
//!   original host travels in X-Forwarded-Host

use axum::{
    body::Body,
    extract::State,
    http::uri::Scheme,
    http::{header, HeaderValue, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::EdgeConfig;
use crate::http::headers::apply_edge_headers;
use crate::observability::metrics;
use crate::routing::{DecisionEngine, RouteAction};
use crate::store::{ExistenceResolver, RestStore};

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<DecisionEngine>,
    pub client: Client<HttpConnector, Body>,
    pub upstream: Arc<str>,
    pub excluded_prefixes: Arc<[String]>,
}

/// HTTP server for the edge router.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: EdgeConfig) -> Self {
        let store = Arc::new(RestStore::new(&config.content_api));
        let resolver = Arc::new(ExistenceResolver::new(
            store,
            Duration::from_secs(config.cache.ttl_secs),
        ));
        let engine = Arc::new(DecisionEngine::new(
            config.environment,
            config.routing.local_root.clone(),
            resolver,
        ));

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState {
            engine,
            client,
            upstream: config.upstream.origin.clone().into(),
            excluded_prefixes: config.routing.excluded_prefixes.clone().into(),
        };

        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &EdgeConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(edge_handler))
            .route("/", any(edge_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener, until
    /// Ctrl-C or the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Edge router listening");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = shutdown.recv() => {}
                }
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("Edge router stopped");
        Ok(())
    }
}

/// Catch-all handler: classify, decide, then redirect or forward.
async fn edge_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_string);

    // Excluded prefixes never reach the decision engine.
    if state
        .excluded_prefixes
        .iter()
        .any(|prefix| path.starts_with(prefix.as_str()))
    {
        return forward(&state, request, None).await;
    }

    let action = state.engine.decide(&host, &path, query.as_deref()).await;
    metrics::record_decision(action.label());
    tracing::debug!(host = %host, path = %path, action = action.label(), "Edge decision");

    match action {
        RouteAction::Redirect { location } => match HeaderValue::from_str(&location) {
            Ok(value) => {
                let mut response = StatusCode::MOVED_PERMANENTLY.into_response();
                response.headers_mut().insert(header::LOCATION, value);
                response
            }
            Err(_) => {
                // Unusual host bytes; degrade to pass-through rather than
                // failing the request.
                tracing::warn!(location = %location, "Redirect target not header-safe");
                let mut response = forward(&state, request, None).await;
                apply_edge_headers(response.headers_mut());
                response
            }
        },
        RouteAction::Forward => {
            let mut response = forward(&state, request, None).await;
            apply_edge_headers(response.headers_mut());
            response
        }
        RouteAction::Rewrite { path } => {
            let mut response = forward(&state, request, Some(path)).await;
            apply_edge_headers(response.headers_mut());
            response
        }
    }
}

/// Forward a request to the origin, optionally replacing its path.
async fn forward(state: &AppState, request: Request<Body>, rewrite_path: Option<String>) -> Response {
    let start = Instant::now();
    let (mut parts, body) = request.into_parts();

    let path_and_query = {
        let path = rewrite_path.as_deref().unwrap_or_else(|| parts.uri.path());
        match parts.uri.query() {
            Some(q) => format!("{path}?{q}"),
            None => path.to_string(),
        }
    };

    let uri = Uri::builder()
        .scheme(Scheme::HTTP)
        .authority(state.upstream.as_ref())
        .path_and_query(path_and_query)
        .build();
    let uri = match uri {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build origin URI");
            return (StatusCode::BAD_GATEWAY, "Origin request failed").into_response();
        }
    };

    // Origin sees its own authority; the public host travels alongside.
    if let Some(original_host) = parts.headers.remove(header::HOST) {
        parts.headers.insert("x-forwarded-host", original_host);
    }
    parts.uri = uri;

    let request = Request::from_parts(parts, body);
    match state.client.request(request).await {
        Ok(response) => {
            metrics::record_upstream(response.status().as_u16(), start);
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(error = %e, "Origin request failed");
            metrics::record_upstream(502, start);
            (StatusCode::BAD_GATEWAY, "Origin request failed").into_response()
        }
    }
}
