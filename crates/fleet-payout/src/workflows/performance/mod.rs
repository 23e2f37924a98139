//! Driver performance payout: rules, calculation engine, drill-down, and report views.

pub mod domain;
pub mod engine;
pub mod import;
pub mod report;
pub mod router;
pub mod rules;
pub mod service;
pub mod tiers;
pub mod validation;

pub use domain::{Metric, RawPerformanceRecord};
pub use engine::{
    calc_daily_mbg, group_by_driver, DailyBreakdown, DailyMbg, DriverDrillDown, DriverFleetRow,
    DriverGroup, MbgBasis, MbgGate, PayoutEngine, PayoutFigures,
};
pub use import::{load_records, records_from_csv, records_from_json, RecordImportError};
pub use report::{
    DailyBreakdownView, DrillDownView, FigureFormatter, FleetReportSummary, FleetRowView,
};
pub use router::performance_router;
pub use rules::{
    FileRulesSource, RulesConfig, RulesSource, RulesSourceError, RulesStore, StaticRulesSource,
};
pub use service::{
    DrillDownRequest, PayoutReportService, PerformanceReport, PerformanceReportRequest,
};
pub use tiers::{Bounds, TierPayout, TieredLookup};
pub use validation::{validate_records, IssueKind, PolicyGap, RecordIssue, ValidationReport};
