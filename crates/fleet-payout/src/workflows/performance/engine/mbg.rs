use super::super::domain::RawPerformanceRecord;
use super::super::rules::MbgRules;
use serde::{Deserialize, Serialize};

/// Gate conditions for the full daily guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MbgGate {
    Earning,
    HoursOnline,
    ConfirmationRate,
}

impl MbgGate {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Earning => "Daily earning",
            Self::HoursOnline => "Hours online",
            Self::ConfirmationRate => "Confirmation rate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MbgBasis {
    FullGuarantee,
    HourlyFallback,
}

impl MbgBasis {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullGuarantee => "Full MBG",
            Self::HourlyFallback => "Hourly fallback",
        }
    }
}

/// One day's guarantee along with the decision that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMbg {
    pub amount: f64,
    pub basis: MbgBasis,
    /// Empty when the full guarantee was paid.
    pub failed_gates: Vec<MbgGate>,
}

/// Full guarantee when earning, hours, and confirmation all reach their thresholds; otherwise
/// capped hours at the hourly rate.
pub fn calc_daily_mbg(record: &RawPerformanceRecord, rules: &MbgRules) -> DailyMbg {
    let earning = record.total_earning();
    let hours = record.hours_online();
    let confirmation = record.confirmation_rate();

    let mut failed_gates = Vec::new();
    if earning < rules.daily_earning_threshold {
        failed_gates.push(MbgGate::Earning);
    }
    if hours < rules.hours_online_threshold {
        failed_gates.push(MbgGate::HoursOnline);
    }
    if confirmation < rules.confirmation_rate_threshold {
        failed_gates.push(MbgGate::ConfirmationRate);
    }

    if failed_gates.is_empty() {
        DailyMbg {
            amount: rules.full_mbg_amount,
            basis: MbgBasis::FullGuarantee,
            failed_gates,
        }
    } else {
        DailyMbg {
            amount: hours.min(rules.max_hours) * rules.hourly_rate,
            basis: MbgBasis::HourlyFallback,
            failed_gates,
        }
    }
}
