use crate::cli::ServeArgs;
use crate::infra::{file_service, AppState};
use crate::routes::with_performance_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fleet_payout::config::AppConfig;
use fleet_payout::error::AppError;
use fleet_payout::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(rules) = args.rules.take() {
        config.performance.rules_path = rules;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = file_service(config.performance.rules_path.clone()).await;

    let app = with_performance_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "fleet payout service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
