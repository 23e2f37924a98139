mod format;
pub mod views;

pub use format::FigureFormatter;
pub use views::{DailyBreakdownView, DrillDownView, FleetReportSummary, FleetRowView};

use super::engine::{DailyBreakdown, DriverDrillDown, DriverFleetRow};

impl DriverFleetRow {
    pub fn to_view(&self, formatter: &FigureFormatter) -> FleetRowView {
        let figures = &self.figures;
        FleetRowView {
            driver_name: self.driver_name.clone(),
            record_count: self.record_count(),
            // Acceptance is held as 0-100; the formatter expects a fraction.
            weekly_acceptance: formatter.percentage(figures.weekly_acceptance / 100.0),
            total_mbg: formatter.currency(figures.total_mbg),
            total_earning: formatter.currency(figures.total_earning),
            revenue_incentive: formatter.currency(figures.revenue_incentive),
            additional_incentive: formatter.currency(figures.additional_incentive),
            total_cash_collection: formatter.currency(figures.total_cash_collection),
            total_deposit: formatter.currency(figures.total_deposit),
            cash_balance: formatter.currency(figures.cash_balance),
            total_payout: formatter.currency(figures.total_payout),
            payout_after_adjustment: formatter.currency(figures.payout_after_adjustment),
            credit: formatter.currency(figures.credit),
            debit: formatter.currency(figures.debit),
            customer_trip_tips: formatter.currency(figures.customer_trip_tips),
            final_payout: formatter.currency(figures.final_payout),
            is_negative_payout: self.owes_fleet(),
        }
    }
}

impl DailyBreakdown {
    pub fn to_view(&self, formatter: &FigureFormatter) -> DailyBreakdownView {
        DailyBreakdownView {
            performance_date: self.performance_date,
            total_earning: formatter.currency(self.total_earning),
            hours_online: formatter.number(self.hours_online, 2),
            confirmation_rate: formatter.percentage(self.confirmation_rate / 100.0),
            daily_mbg: formatter.currency(self.mbg.amount),
            basis_label: self.mbg.basis.label(),
            failed_gates: self
                .mbg
                .failed_gates
                .iter()
                .map(|gate| gate.label())
                .collect(),
        }
    }
}

impl DriverDrillDown {
    pub fn to_view(&self, formatter: &FigureFormatter) -> DrillDownView {
        DrillDownView {
            driver_name: self.driver_name.clone(),
            days: self.days.iter().map(|day| day.to_view(formatter)).collect(),
            full_guarantee_days: self.full_guarantee_days(),
            fallback_days: self.fallback_days(),
            total_mbg: formatter.currency(self.total_mbg),
        }
    }
}

impl FleetReportSummary {
    pub fn from_rows(rows: &[DriverFleetRow], formatter: &FigureFormatter) -> Self {
        let total_final_payout = rows
            .iter()
            .fold(0.0, |acc, row| acc + row.figures.final_payout);
        let drivers_owing: Vec<String> = rows
            .iter()
            .filter(|row| row.owes_fleet())
            .map(|row| row.driver_name.clone())
            .collect();

        Self {
            driver_count: rows.len(),
            record_count: rows.iter().map(DriverFleetRow::record_count).sum(),
            total_final_payout,
            total_final_payout_label: formatter.currency(total_final_payout),
            negative_payouts: drivers_owing.len(),
            drivers_owing,
        }
    }
}
