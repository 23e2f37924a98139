use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::rules::RulesSource;
use super::service::{DrillDownRequest, PayoutReportService, PerformanceReportRequest};

/// Router builder exposing the payout report endpoints.
pub fn performance_router<S>(service: Arc<PayoutReportService<S>>) -> Router
where
    S: RulesSource + 'static,
{
    Router::new()
        .route("/api/v1/performance/rules", get(rules_handler::<S>))
        .route("/api/v1/performance/report", post(report_handler::<S>))
        .route(
            "/api/v1/performance/drill-down",
            post(drill_down_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn rules_handler<S>(State(service): State<Arc<PayoutReportService<S>>>) -> Response
where
    S: RulesSource + 'static,
{
    let rules = service.rules().await;
    (StatusCode::OK, Json(rules.as_ref().clone())).into_response()
}

pub(crate) async fn report_handler<S>(
    State(service): State<Arc<PayoutReportService<S>>>,
    Json(request): Json<PerformanceReportRequest>,
) -> Response
where
    S: RulesSource + 'static,
{
    let report = service.report(request).await;
    (StatusCode::OK, Json(report)).into_response()
}

pub(crate) async fn drill_down_handler<S>(
    State(service): State<Arc<PayoutReportService<S>>>,
    Json(request): Json<DrillDownRequest>,
) -> Response
where
    S: RulesSource + 'static,
{
    let driver_name = request.driver_name.clone();
    match service.drill_down(request).await {
        Some(view) => (StatusCode::OK, Json(view)).into_response(),
        None => {
            let payload = json!({
                "error": "driver has no performance records",
                "driver_name": driver_name,
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}
