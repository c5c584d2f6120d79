use crate::infra::{deserialize_optional_date, AppState, DatasetState};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use ticket_insights::error::AppError;
use ticket_insights::reporting::dataset::tickets_to_csv;
use ticket_insights::reporting::report::views::{
    MonthlyCountEntry, SectorCountEntry, SectorResolutionEntry, StatusCountEntry,
};
use ticket_insights::reporting::{
    DatasetSource, DateRange, Ticket, TicketMetrics, TicketReport,
};

const EXPORT_FILENAME: &str = "filtered_tickets.csv";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TicketFilterRequest {
    /// Inclusive period start; defaults to the earliest opening date on file.
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) start: Option<NaiveDate>,
    /// Inclusive period end; defaults to the latest opening date on file.
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) end: Option<NaiveDate>,
    /// Absent means every sector present in the dataset.
    #[serde(default)]
    pub(crate) sectors: Option<Vec<String>>,
    /// Absent means every status present in the dataset.
    #[serde(default)]
    pub(crate) statuses: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TicketReportRequest {
    #[serde(flatten)]
    pub(crate) filter: TicketFilterRequest,
    #[serde(default)]
    pub(crate) include_tickets: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct TicketReportResponse {
    pub(crate) period: DateRange,
    pub(crate) sectors: Vec<String>,
    pub(crate) statuses: Vec<String>,
    pub(crate) data_source: DatasetSource,
    pub(crate) metrics: TicketMetrics,
    pub(crate) sector_counts: Vec<SectorCountEntry>,
    pub(crate) status_counts: Vec<StatusCountEntry>,
    pub(crate) resolution_by_sector: Vec<SectorResolutionEntry>,
    pub(crate) monthly_counts: Vec<MonthlyCountEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) tickets: Option<Vec<Ticket>>,
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/tickets/report", post(ticket_report_endpoint))
        .route("/api/v1/tickets/export", post(ticket_export_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn ticket_report_endpoint(
    Extension(dataset): Extension<DatasetState>,
    Json(payload): Json<TicketReportRequest>,
) -> Result<Json<TicketReportResponse>, AppError> {
    let TicketReportRequest {
        filter,
        include_tickets,
    } = payload;

    let selection = crate::infra::resolve_selection(
        &dataset.table,
        filter.start,
        filter.end,
        filter.sectors,
        filter.statuses,
    );

    let subset = dataset.table.filter(&selection);
    let metrics = TicketMetrics::compute(&subset);
    let summary = TicketReport::build(&subset).summary();
    let tickets = include_tickets.then(|| subset.tickets().to_vec());

    Ok(Json(TicketReportResponse {
        period: selection.period,
        sectors: selection.sectors,
        statuses: selection.statuses,
        data_source: dataset.source,
        metrics,
        sector_counts: summary.sector_counts,
        status_counts: summary.status_counts,
        resolution_by_sector: summary.resolution_by_sector,
        monthly_counts: summary.monthly_counts,
        tickets,
    }))
}

pub(crate) async fn ticket_export_endpoint(
    Extension(dataset): Extension<DatasetState>,
    Json(payload): Json<TicketFilterRequest>,
) -> Result<Response, AppError> {
    let selection = crate::infra::resolve_selection(
        &dataset.table,
        payload.start,
        payload.end,
        payload.sectors,
        payload.statuses,
    );

    let subset = dataset.table.filter(&selection);
    let csv_text = tickets_to_csv(&subset)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        csv_text,
    )
        .into_response())
}
