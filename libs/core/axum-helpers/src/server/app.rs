use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::request_logger;
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::{Future, IntoFuture};
use std::io;
use std::time::Duration;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;

/// Creates a configured Axum router with common middleware and documentation.
///
/// This function sets up:
/// - OpenAPI documentation (Swagger UI, ReDoc, RapiDoc, Scalar)
/// - API routes nested under `/api`
/// - Request logging with correlation ids, plus tower-http tracing
/// - Envelope-shaped 404 fallback
///
/// Health endpoints are merged by the app with
/// [`health_router`](super::health_router) and its own readiness handler.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::create_router;
///
/// #[derive(OpenApi)]
/// #[openapi(paths(/* your paths */))]
/// struct ApiDoc;
///
/// let api_routes = Router::new().nest("/v1/products", products_router);
/// let router = create_router::<ApiDoc>(api_routes);
/// ```
pub fn create_router<T>(apis: Router) -> Router
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
}

/// Wrap a fully assembled router with the request logging and tracing
/// layers.
///
/// Applied after health routes are merged so every endpoint is logged.
pub fn with_request_logging(router: Router) -> Router {
    router
        .layer(middleware::from_fn(request_logger))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
}

/// Serve `router` until SIGINT/SIGTERM, then shut down gracefully.
///
/// After the signal the listener stops accepting connections and in-flight
/// requests are given `shutdown_timeout` to finish; whatever is still open
/// then is dropped. `cleanup` runs afterwards, bounded by the same timeout.
///
/// # Example
/// ```ignore
/// use std::time::Duration;
/// use axum_helpers::server::create_production_app;
///
/// create_production_app(router, &config, Duration::from_secs(10), async move {
///     client.shutdown().await;
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (coordinator, mut shutdown_rx) = ShutdownCoordinator::new();
    let signal_handle = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!(address = %listener.local_addr()?, "Server starting");

    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { signal_handle.wait_for_signal().await })
        .into_future();
    tokio::pin!(server);

    let drain_deadline = async {
        let _ = shutdown_rx.recv().await;
        tokio::time::sleep(shutdown_timeout).await;
    };

    let serve_result = tokio::select! {
        result = &mut server => result.inspect_err(|e| {
            tracing::error!(error = ?e, "Server encountered an error");
        }),
        _ = drain_deadline => {
            warn!(
                timeout = ?shutdown_timeout,
                "Open connections did not drain in time, forcing shutdown"
            );
            Ok(())
        }
    };

    info!(timeout = ?shutdown_timeout, "Starting cleanup tasks");
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => warn!(
            timeout = ?shutdown_timeout,
            "Cleanup exceeded timeout, forcing shutdown"
        ),
    }

    serve_result
}
