use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use fleet_payout::workflows::performance::{performance_router, PayoutReportService, RulesSource};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_performance_routes<S>(service: Arc<PayoutReportService<S>>) -> axum::Router
where
    S: RulesSource + 'static,
{
    performance_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::warm_service;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use fleet_payout::workflows::performance::{RulesConfig, StaticRulesSource};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn app_state(ready: bool) -> AppState {
        let recorder = PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
        }
    }

    async fn app(state: AppState) -> axum::Router {
        let service = warm_service(StaticRulesSource::new(RulesConfig::builtin())).await;
        with_performance_routes(service).layer(Extension(state))
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let state = app_state(false);
        let flag = state.readiness.clone();

        let response = readiness_endpoint(Extension(state.clone()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        flag.store(true, Ordering::Release);
        let response = readiness_endpoint(Extension(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn health_and_report_share_one_router() {
        let router = app(app_state(true)).await;

        let health = router
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).expect("request builds"))
            .await
            .expect("route executes");
        assert_eq!(health.status(), StatusCode::OK);

        let payload = json!({
            "records": [
                { "driver_full_name": "Asha Rao", "total_earings": 4000, "hours_online": 12, "confirmation_rate": 98 }
            ]
        });
        let report = router
            .oneshot(
                Request::post("/api/v1/performance/report")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        assert_eq!(report.status(), StatusCode::OK);

        let body = to_bytes(report.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        let body: serde_json::Value = serde_json::from_slice(&body).expect("json payload");
        assert_eq!(body["fleet"][0]["P"], 600.0);
        assert_eq!(body["fleet"][0]["S"], 750.0);
    }

    #[tokio::test]
    async fn metrics_endpoint_serves_prometheus_text() {
        let response = metrics_endpoint(Extension(app_state(true)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }
}
