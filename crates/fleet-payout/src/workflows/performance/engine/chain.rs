use super::super::domain::RawPerformanceRecord;
use super::super::rules::{ColumnAdjustments, MbgRules};
use super::super::tiers::{TierPayout, TieredLookup};
use super::mbg::calc_daily_mbg;
use serde::{Deserialize, Serialize};

/// Derived columns of a fleet row, keyed by their report column letters on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PayoutFigures {
    /// Mean confirmation rate across the period, 0-100.
    #[serde(rename = "O")]
    pub weekly_acceptance: f64,
    #[serde(rename = "P")]
    pub total_mbg: f64,
    #[serde(rename = "Q")]
    pub total_earning: f64,
    #[serde(rename = "R")]
    pub revenue_incentive: f64,
    #[serde(rename = "S")]
    pub additional_incentive: f64,
    #[serde(rename = "T")]
    pub total_cash_collection: f64,
    #[serde(rename = "U")]
    pub total_deposit: f64,
    #[serde(rename = "V")]
    pub cash_balance: f64,
    #[serde(rename = "W")]
    pub total_payout: f64,
    #[serde(rename = "X")]
    pub payout_after_adjustment: f64,
    #[serde(rename = "Y")]
    pub credit: f64,
    #[serde(rename = "Z")]
    pub debit: f64,
    #[serde(rename = "AA")]
    pub customer_trip_tips: f64,
    /// Negative when the driver owes the fleet.
    #[serde(rename = "AB")]
    pub final_payout: f64,
}

pub(crate) struct ChainInputs<'a> {
    pub mbg: &'a MbgRules,
    pub revenue: &'a TieredLookup<TierPayout>,
    pub additional: &'a TieredLookup<TierPayout>,
    pub columns: &'a ColumnAdjustments,
}

// Each step only reads values computed above it.
pub(crate) fn derive_figures(rows: &[RawPerformanceRecord], inputs: &ChainInputs<'_>) -> PayoutFigures {
    let weekly_acceptance = mean(rows, RawPerformanceRecord::confirmation_rate);
    let total_mbg = total(rows, |record| calc_daily_mbg(record, inputs.mbg).amount);
    let total_earning = total(rows, RawPerformanceRecord::total_earning);
    let revenue_incentive = inputs.revenue.resolve(total_earning);
    let additional_incentive = inputs.additional.resolve(weekly_acceptance);
    let total_cash_collection = total(rows, RawPerformanceRecord::cash_collected);
    let total_deposit = inputs.columns.total_deposit.amount;
    let cash_balance = total_cash_collection + total_deposit;
    let total_payout = total_mbg + revenue_incentive + additional_incentive;
    let payout_after_adjustment = total_payout - cash_balance;
    let credit = inputs.columns.credit.amount;
    let debit = inputs.columns.debit.amount;
    let customer_trip_tips = total(rows, RawPerformanceRecord::customer_tip);
    let final_payout = payout_after_adjustment + credit + customer_trip_tips - debit;

    PayoutFigures {
        weekly_acceptance,
        total_mbg,
        total_earning,
        revenue_incentive,
        additional_incentive,
        total_cash_collection,
        total_deposit,
        cash_balance,
        total_payout,
        payout_after_adjustment,
        credit,
        debit,
        customer_trip_tips,
        final_payout,
    }
}

/// Left-to-right sum in record order.
fn total<F>(rows: &[RawPerformanceRecord], value: F) -> f64
where
    F: Fn(&RawPerformanceRecord) -> f64,
{
    rows.iter().fold(0.0, |acc, record| acc + value(record))
}

fn mean<F>(rows: &[RawPerformanceRecord], value: F) -> f64
where
    F: Fn(&RawPerformanceRecord) -> f64,
{
    if rows.is_empty() {
        return 0.0;
    }
    total(rows, value) / rows.len() as f64
}
