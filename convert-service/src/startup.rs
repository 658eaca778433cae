use crate::config::ServiceConfig;
use crate::converter::{Converter, RtfConverter};
use crate::handlers;
use crate::middleware::require_allowed_origin;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Headroom on top of the attachment limit for multipart framing and any
/// extra fields in the same body. Attachments past the limit but within the
/// envelope still reach the explicit size gate and get a clean 413.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: ServiceConfig,
    pub converter: Arc<dyn Converter>,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: ServiceConfig) -> Result<Self, AppError> {
        let converter: Arc<dyn Converter> = Arc::new(RtfConverter::new());

        let state = AppState {
            config: config.clone(),
            converter,
        };

        let body_limit = config
            .upload
            .max_attachment_bytes
            .saturating_mul(2)
            .saturating_add(MULTIPART_OVERHEAD_BYTES);

        // The origin gate is layered on the method router, not the route:
        // a non-POST on /convert answers 405 before the gate can turn it
        // into a 403.
        let convert_routes = Router::new()
            .route(
                "/convert",
                post(handlers::convert_document).route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_allowed_origin,
                )),
            )
            .layer(DefaultBodyLimit::max(body_limit));

        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route("/ready", get(handlers::readiness_check))
            .route("/metrics", get(handlers::metrics_endpoint))
            .merge(convert_routes)
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
