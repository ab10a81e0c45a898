use crate::cli::ServeArgs;
use crate::infra::{resolve_csv_path, AppState, PaceState};
use crate::routes::router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use booking_pace::config::AppConfig;
use booking_pace::error::AppError;
use booking_pace::telemetry;
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

    telemetry::init(&config.telemetry)?;

    let csv_path = resolve_csv_path(args.reservations_csv.take(), config.pace.reservations_csv.clone())?;
    let pace = Arc::new(PaceState::load(&csv_path, config.pace.window_days)?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = router()
        .layer(Extension(app_state))
        .layer(Extension(pace.clone()))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        transactions = pace.log.len(),
        total_rooms = pace.total_rooms,
        window_days = pace.window_days,
        "booking pace service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
