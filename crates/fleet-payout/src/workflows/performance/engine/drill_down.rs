use super::mbg::DailyMbg;
use chrono::NaiveDate;
use serde::Serialize;

/// Per-day explanation of how a driver's guarantee was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverDrillDown {
    pub driver_name: String,
    pub days: Vec<DailyBreakdown>,
    pub total_mbg: f64,
}

impl DriverDrillDown {
    pub fn full_guarantee_days(&self) -> usize {
        self.days
            .iter()
            .filter(|day| day.mbg.failed_gates.is_empty())
            .count()
    }

    pub fn fallback_days(&self) -> usize {
        self.days.len() - self.full_guarantee_days()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyBreakdown {
    /// Position of the record within the driver's rows.
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_date: Option<NaiveDate>,
    pub total_earning: f64,
    pub hours_online: f64,
    pub confirmation_rate: f64,
    pub mbg: DailyMbg,
}
