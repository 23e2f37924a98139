mod chain;
mod drill_down;
mod grouping;
mod mbg;

pub use chain::PayoutFigures;
pub use drill_down::{DailyBreakdown, DriverDrillDown};
pub use grouping::{group_by_driver, DriverGroup};
pub use mbg::{calc_daily_mbg, DailyMbg, MbgBasis, MbgGate};

use super::domain::RawPerformanceRecord;
use super::rules::RulesConfig;
use super::tiers::{TierPayout, TieredLookup};
use chain::{derive_figures, ChainInputs};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Stateless payout calculator bound to one rules snapshot.
#[derive(Debug, Clone)]
pub struct PayoutEngine {
    rules: Arc<RulesConfig>,
    revenue: TieredLookup<TierPayout>,
    additional: TieredLookup<TierPayout>,
}

impl PayoutEngine {
    pub fn new(rules: Arc<RulesConfig>) -> Self {
        let revenue = TieredLookup::new(
            rules
                .revenue_incentive
                .slabs
                .iter()
                .map(|slab| (slab.bounds(), slab.payout())),
        );
        let additional = TieredLookup::new(
            rules
                .additional_incentive
                .slabs
                .iter()
                .map(|slab| (slab.bounds(), slab.payout())),
        );

        if revenue.is_empty() || additional.is_empty() {
            warn!(
                revenue_slabs = revenue.len(),
                additional_slabs = additional.len(),
                "incentive slab table is empty, every driver resolves to 0"
            );
        }

        Self {
            rules,
            revenue,
            additional,
        }
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub(crate) fn revenue_tiers(&self) -> &TieredLookup<TierPayout> {
        &self.revenue
    }

    pub(crate) fn additional_tiers(&self) -> &TieredLookup<TierPayout> {
        &self.additional
    }

    /// One fleet row per distinct driver, in order of first appearance.
    pub fn compute(&self, records: &[RawPerformanceRecord]) -> Vec<DriverFleetRow> {
        let rows: Vec<DriverFleetRow> = group_by_driver(records)
            .into_iter()
            .map(|group| self.compute_group(group))
            .collect();

        debug!(
            records = records.len(),
            drivers = rows.len(),
            revenue_slabs = self.revenue.len(),
            additional_slabs = self.additional.len(),
            "computed driver fleet rows"
        );
        rows
    }

    pub fn compute_group(&self, group: DriverGroup) -> DriverFleetRow {
        let inputs = ChainInputs {
            mbg: &self.rules.mbg,
            revenue: &self.revenue,
            additional: &self.additional,
            columns: &self.rules.columns,
        };
        let figures = derive_figures(&group.rows, &inputs);

        DriverFleetRow {
            driver_name: group.driver_name,
            rows: group.rows,
            figures,
        }
    }

    pub fn daily_mbg(&self, record: &RawPerformanceRecord) -> DailyMbg {
        calc_daily_mbg(record, &self.rules.mbg)
    }

    /// Re-derive the daily guarantee decisions behind a fleet row.
    pub fn drill_down(&self, row: &DriverFleetRow) -> DriverDrillDown {
        let days: Vec<DailyBreakdown> = row
            .rows
            .iter()
            .enumerate()
            .map(|(index, record)| DailyBreakdown {
                index,
                performance_date: record.performance_date,
                total_earning: record.total_earning(),
                hours_online: record.hours_online(),
                confirmation_rate: record.confirmation_rate(),
                mbg: self.daily_mbg(record),
            })
            .collect();
        let total_mbg = days.iter().fold(0.0, |acc, day| acc + day.mbg.amount);

        DriverDrillDown {
            driver_name: row.driver_name.clone(),
            days,
            total_mbg,
        }
    }

    /// Drill-down for the named driver, computed straight from the raw records.
    pub fn drill_down_for(
        &self,
        records: &[RawPerformanceRecord],
        driver_name: &str,
    ) -> Option<DriverDrillDown> {
        let rows: Vec<RawPerformanceRecord> = records
            .iter()
            .filter(|record| record.driver_full_name == driver_name)
            .cloned()
            .collect();
        if rows.is_empty() {
            return None;
        }

        let row = self.compute_group(DriverGroup {
            driver_name: driver_name.to_string(),
            rows,
        });
        Some(self.drill_down(&row))
    }
}

/// Per-driver aggregate row: the contributing records plus the derived payout columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverFleetRow {
    #[serde(rename = "driverName")]
    pub driver_name: String,
    pub rows: Vec<RawPerformanceRecord>,
    #[serde(flatten)]
    pub figures: PayoutFigures,
}

impl DriverFleetRow {
    pub fn record_count(&self) -> usize {
        self.rows.len()
    }

    pub fn owes_fleet(&self) -> bool {
        self.figures.final_payout < 0.0
    }
}
