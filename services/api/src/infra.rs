use fleet_payout::workflows::performance::{
    FileRulesSource, PayoutReportService, RulesSource, RulesStore,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type FilePayoutService = PayoutReportService<FileRulesSource>;

/// Builds the report service and loads its rules before anything is served from it.
pub(crate) async fn warm_service<S>(source: S) -> Arc<PayoutReportService<S>>
where
    S: RulesSource + 'static,
{
    let store = Arc::new(RulesStore::new(source));
    store.load().await;
    debug!(loaded = store.is_loaded(), "rules store warmed");
    Arc::new(PayoutReportService::new(store))
}

pub(crate) async fn file_service(path: PathBuf) -> Arc<FilePayoutService> {
    warm_service(FileRulesSource::new(path)).await
}
