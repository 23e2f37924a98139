use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FleetRowView {
    pub driver_name: String,
    pub record_count: usize,
    pub weekly_acceptance: String,
    pub total_mbg: String,
    pub total_earning: String,
    pub revenue_incentive: String,
    pub additional_incentive: String,
    pub total_cash_collection: String,
    pub total_deposit: String,
    pub cash_balance: String,
    pub total_payout: String,
    pub payout_after_adjustment: String,
    pub credit: String,
    pub debit: String,
    pub customer_trip_tips: String,
    pub final_payout: String,
    pub is_negative_payout: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyBreakdownView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_date: Option<NaiveDate>,
    pub total_earning: String,
    pub hours_online: String,
    pub confirmation_rate: String,
    pub daily_mbg: String,
    pub basis_label: &'static str,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_gates: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DrillDownView {
    pub driver_name: String,
    pub days: Vec<DailyBreakdownView>,
    pub full_guarantee_days: usize,
    pub fallback_days: usize,
    pub total_mbg: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FleetReportSummary {
    pub driver_count: usize,
    pub record_count: usize,
    pub total_final_payout: f64,
    pub total_final_payout_label: String,
    pub negative_payouts: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drivers_owing: Vec<String>,
}
