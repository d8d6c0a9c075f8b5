use crate::cli::ServeArgs;
use crate::infra::{advisory_service, market_service, AppState};
use crate::routes::with_application_routes;
use agropulse::config::AppConfig;
use agropulse::error::AppError;
use agropulse::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
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

    let advisory = advisory_service(&config);
    let upstream_enabled = advisory.has_generator();
    let app = with_application_routes(advisory, market_service(&config))
        .layer(Extension(app_state))
        .layer(prometheus_layer)
        .layer(CorsLayer::permissive());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        upstream_enabled,
        distance_weight = config.market.distance_weight,
        "agropulse advisory service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
