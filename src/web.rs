//! HTTP surface: the GraphQL routes, a health check and response headers.
use crate::graphql::{self, CarnetSchema};
use crate::settings::Settings;
use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use miette::IntoDiagnostic;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;

// Security headers middleware
async fn security_headers(request: Request<Body>, next: Next) -> impl IntoResponse {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    // X-Frame-Options: Prevent clickjacking
    headers.insert(
        HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );

    // X-Content-Type-Options: Prevent MIME sniffing
    headers.insert(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    );

    headers.insert(
        HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    response
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Full application router
pub fn app(settings: &Settings, schema: CarnetSchema) -> Router {
    graphql::router(schema, settings.server.graphiql)
        .route("/healthz", get(health))
        .layer(middleware::from_fn(security_headers))
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(settings: Settings, schema: CarnetSchema) -> miette::Result<()> {
    let addr: SocketAddr = settings
        .listen_addr()
        .parse()
        .map_err(|e| miette::miette!("bad listen addr: {e}"))?;

    if settings.server.graphiql {
        tracing::info!("GraphiQL available at http://{}/graphiql", addr);
    }

    let router = app(&settings, schema);

    tracing::info!(%addr, "GraphQL API listening");
    tracing::warn!("Rate limiting should be configured at the reverse proxy level for production");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .into_diagnostic()?;
    axum::serve(listener, router).await.into_diagnostic()?;
    Ok(())
}
