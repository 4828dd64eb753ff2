use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use clinic_booking::config::AppConfig;
use clinic_booking::error::AppError;
use clinic_booking::telemetry;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{AppState, BookingStack};
use crate::routes::with_booking_routes;

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

    let stack = BookingStack::with_rules(config.booking.rules, None);
    let app = with_booking_routes(&stack, config.booking.locale)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        locale = config.booking.locale.tag(),
        "clinic booking service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
