//! Optional strict checks over performance inputs.
//!
//! The payout engine silently coerces bad values to zero and treats unmatched slabs as a zero
//! incentive. These checks report those cases without changing any computed figure.

use super::domain::RawPerformanceRecord;
use super::engine::{DriverFleetRow, PayoutEngine};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    Missing,
    Unparsable { raw: String },
    Negative { value: f64 },
    OutOfRange { value: f64 },
}

impl IssueKind {
    pub fn summary(&self) -> String {
        match self {
            IssueKind::Missing => "missing, counted as 0".to_string(),
            IssueKind::Unparsable { raw } => format!("unparsable value '{raw}', counted as 0"),
            IssueKind::Negative { value } => format!("negative value {value}"),
            IssueKind::OutOfRange { value } => format!("value {value} outside 0-100"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordIssue {
    /// Position in the input list.
    pub index: usize,
    pub driver_name: String,
    pub field: &'static str,
    pub issue: IssueKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyGapKind {
    RevenueIncentive,
    AdditionalIncentive,
}

/// A driver whose figure fell between the configured slabs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyGap {
    pub driver_name: String,
    pub kind: PolicyGapKind,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<RecordIssue>,
    pub policy_gaps: Vec<PolicyGap>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.policy_gaps.is_empty()
    }
}

/// Field-level problems in the raw records.
pub fn validate_records(records: &[RawPerformanceRecord]) -> Vec<RecordIssue> {
    let mut issues = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let driver_name = record.driver_full_name.clone();
        if driver_name.trim().is_empty() {
            issues.push(RecordIssue {
                index,
                driver_name: driver_name.clone(),
                field: "driver_full_name",
                issue: IssueKind::Missing,
            });
        }

        for (field, metric) in record.metrics() {
            let issue = if metric.is_missing() {
                Some(IssueKind::Missing)
            } else if metric.is_unparsable() {
                Some(IssueKind::Unparsable { raw: metric.raw() })
            } else {
                let value = metric.value();
                if value < 0.0 {
                    Some(IssueKind::Negative { value })
                } else if field == "confirmation_rate" && value > 100.0 {
                    Some(IssueKind::OutOfRange { value })
                } else {
                    None
                }
            };

            if let Some(issue) = issue {
                issues.push(RecordIssue {
                    index,
                    driver_name: driver_name.clone(),
                    field,
                    issue,
                });
            }
        }
    }

    issues
}

impl PayoutEngine {
    /// Drivers whose total earning or weekly acceptance matched no slab.
    pub fn policy_gaps(&self, rows: &[DriverFleetRow]) -> Vec<PolicyGap> {
        let mut gaps = Vec::new();
        for row in rows {
            let figures = &row.figures;
            if self.revenue_tiers().first_match(figures.total_earning).is_none() {
                gaps.push(PolicyGap {
                    driver_name: row.driver_name.clone(),
                    kind: PolicyGapKind::RevenueIncentive,
                    value: figures.total_earning,
                });
            }
            if self
                .additional_tiers()
                .first_match(figures.weekly_acceptance)
                .is_none()
            {
                gaps.push(PolicyGap {
                    driver_name: row.driver_name.clone(),
                    kind: PolicyGapKind::AdditionalIncentive,
                    value: figures.weekly_acceptance,
                });
            }
        }
        gaps
    }

    pub fn validate(
        &self,
        records: &[RawPerformanceRecord],
        rows: &[DriverFleetRow],
    ) -> ValidationReport {
        let report = ValidationReport {
            issues: validate_records(records),
            policy_gaps: self.policy_gaps(rows),
        };
        if !report.is_clean() {
            warn!(
                issues = report.issues.len(),
                policy_gaps = report.policy_gaps.len(),
                "performance records failed strict validation"
            );
        }
        report
    }
}
