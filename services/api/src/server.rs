use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::app_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use talent_desk::auth::AuthService;
use talent_desk::config::AppConfig;
use talent_desk::directory::DirectoryService;
use talent_desk::error::AppError;
use talent_desk::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let auth = Arc::new(AuthService::new(&config.session));
    let directory = Arc::new(DirectoryService::in_memory());

    let app = app_routes(auth, directory)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        latency_ms = config.session.simulated_latency.as_millis() as u64,
        "talent desk directory ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
