use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::domain::RawPerformanceRecord;
use super::engine::{DriverFleetRow, PayoutEngine};
use super::report::{DrillDownView, FigureFormatter, FleetReportSummary, FleetRowView};
use super::rules::{RulesConfig, RulesSource, RulesStore};
use super::validation::ValidationReport;

/// Request for a fleet payout report over an already range-scoped record list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceReportRequest {
    pub records: Vec<RawPerformanceRecord>,
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules_version: Option<String>,
    pub fleet: Vec<DriverFleetRow>,
    pub formatted: Vec<FleetRowView>,
    pub summary: FleetReportSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillDownRequest {
    pub driver_name: String,
    pub records: Vec<RawPerformanceRecord>,
}

/// Composes the rules store and payout engine for report consumers.
pub struct PayoutReportService<S> {
    rules: Arc<RulesStore<S>>,
}

impl<S> PayoutReportService<S>
where
    S: RulesSource + 'static,
{
    pub fn new(rules: Arc<RulesStore<S>>) -> Self {
        Self { rules }
    }

    pub async fn rules(&self) -> Arc<RulesConfig> {
        self.rules.load().await
    }

    pub async fn engine(&self) -> PayoutEngine {
        PayoutEngine::new(self.rules.load().await)
    }

    pub async fn report(&self, request: PerformanceReportRequest) -> PerformanceReport {
        let engine = self.engine().await;
        let formatter = FigureFormatter::new(&engine.rules().display);

        let fleet = engine.compute(&request.records);
        let formatted = fleet.iter().map(|row| row.to_view(&formatter)).collect();
        let summary = FleetReportSummary::from_rows(&fleet, &formatter);
        let validation = request
            .strict
            .then(|| engine.validate(&request.records, &fleet));

        PerformanceReport {
            rules_version: engine.rules().version.clone(),
            fleet,
            formatted,
            summary,
            validation,
        }
    }

    /// Per-day breakdown for one driver; `None` when the driver has no records.
    pub async fn drill_down(&self, request: DrillDownRequest) -> Option<DrillDownView> {
        let engine = self.engine().await;
        let formatter = FigureFormatter::new(&engine.rules().display);

        engine
            .drill_down_for(&request.records, &request.driver_name)
            .map(|drill| drill.to_view(&formatter))
    }
}
