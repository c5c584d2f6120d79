use crate::cli::ServeArgs;
use crate::infra::{AppState, DatasetState};
use crate::routes::router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use ticket_insights::config::AppConfig;
use ticket_insights::error::AppError;
use ticket_insights::reporting::dataset::ensure_dataset;
use ticket_insights::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(data) = args.data.take() {
        config.dataset.path = data;
    }

    telemetry::init(&config.telemetry)?;

    // One read per process lifetime; requests only ever filter this table.
    let today = Local::now().date_naive();
    let (table, source) = ensure_dataset(&config.dataset.path, today)?;
    let dataset_state = DatasetState {
        table: Arc::new(table),
        source,
    };

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = router()
        .layer(Extension(app_state))
        .layer(Extension(dataset_state.clone()))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        rows = dataset_state.table.len(),
        source = dataset_state.source.label(),
        "ticket reporting service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
