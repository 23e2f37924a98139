use crate::infra::file_service;
use clap::Args;
use fleet_payout::config::AppConfig;
use fleet_payout::error::AppError;
use fleet_payout::telemetry;
use fleet_payout::workflows::performance::{
    load_records, DailyBreakdownView, DrillDownRequest, DrillDownView, FleetRowView,
    PerformanceReport, PerformanceReportRequest, ValidationReport,
};
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Performance records for the reporting range (.json array or .csv)
    pub(crate) records: PathBuf,
    /// Rules document to use instead of PERFORMANCE_RULES_PATH
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
    /// Show the per-day MBG breakdown for one driver instead of the fleet table
    #[arg(long)]
    pub(crate) driver: Option<String>,
    /// Report missing or unparsable inputs and slab gaps
    #[arg(long)]
    pub(crate) strict: bool,
    /// Print JSON instead of tables
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Clone, Tabled)]
struct FleetTableRow {
    #[tabled(rename = "Driver")]
    driver: String,
    #[tabled(rename = "Days")]
    days: usize,
    #[tabled(rename = "O Acceptance")]
    acceptance: String,
    #[tabled(rename = "P MBG")]
    mbg: String,
    #[tabled(rename = "Q Earning")]
    earning: String,
    #[tabled(rename = "R Revenue")]
    revenue: String,
    #[tabled(rename = "S Additional")]
    additional: String,
    #[tabled(rename = "T Cash")]
    cash: String,
    #[tabled(rename = "W Payout")]
    payout: String,
    #[tabled(rename = "AA Tips")]
    tips: String,
    #[tabled(rename = "AB Final")]
    final_payout: String,
}

impl From<&FleetRowView> for FleetTableRow {
    fn from(view: &FleetRowView) -> Self {
        let final_payout = if view.is_negative_payout {
            format!("{} (owes)", view.final_payout)
        } else {
            view.final_payout.clone()
        };

        Self {
            driver: view.driver_name.clone(),
            days: view.record_count,
            acceptance: view.weekly_acceptance.clone(),
            mbg: view.total_mbg.clone(),
            earning: view.total_earning.clone(),
            revenue: view.revenue_incentive.clone(),
            additional: view.additional_incentive.clone(),
            cash: view.total_cash_collection.clone(),
            payout: view.total_payout.clone(),
            tips: view.customer_trip_tips.clone(),
            final_payout,
        }
    }
}

#[derive(Debug, Clone, Tabled)]
struct DailyTableRow {
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Earning")]
    earning: String,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Confirmation")]
    confirmation: String,
    #[tabled(rename = "MBG")]
    mbg: String,
    #[tabled(rename = "Basis")]
    basis: String,
}

impl DailyTableRow {
    fn new(position: usize, view: &DailyBreakdownView) -> Self {
        let day = match view.performance_date {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => format!("#{}", position + 1),
        };
        let basis = if view.failed_gates.is_empty() {
            view.basis_label.to_string()
        } else {
            format!("{} ({})", view.basis_label, view.failed_gates.join(", "))
        };

        Self {
            day,
            earning: view.total_earning.clone(),
            hours: view.hours_online.clone(),
            confirmation: view.confirmation_rate.clone(),
            mbg: view.daily_mbg.clone(),
            basis,
        }
    }
}

pub(crate) async fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        records,
        rules,
        driver,
        strict,
        json,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let rules_path = rules.unwrap_or(config.performance.rules_path);
    let service = file_service(rules_path).await;
    let records = load_records(&records)?;
    info!(records = records.len(), "performance records loaded");

    if let Some(driver_name) = driver {
        let drill = service
            .drill_down(DrillDownRequest {
                driver_name: driver_name.clone(),
                records,
            })
            .await;

        match drill {
            Some(view) if json => println!("{}", serde_json::to_string_pretty(&view)?),
            Some(view) => render_drill_down(&view),
            None => println!("No performance records for {driver_name}"),
        }
        return Ok(());
    }

    let report = service
        .report(PerformanceReportRequest { records, strict })
        .await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_fleet_report(&report);
    }

    Ok(())
}

fn render_fleet_report(report: &PerformanceReport) {
    println!(
        "Fleet payout report (rules {})",
        report.rules_version.as_deref().unwrap_or("unversioned")
    );

    let rows: Vec<FleetTableRow> = report.formatted.iter().map(FleetTableRow::from).collect();
    if rows.is_empty() {
        println!("(no rows)");
    } else {
        println!("{}", Table::new(rows).with(Style::markdown()));
    }

    let summary = &report.summary;
    println!(
        "\n{} drivers | {} daily records | fleet final payout {}",
        summary.driver_count, summary.record_count, summary.total_final_payout_label
    );
    if !summary.drivers_owing.is_empty() {
        println!(
            "Drivers owing the fleet: {}",
            summary.drivers_owing.join(", ")
        );
    }

    if let Some(validation) = &report.validation {
        render_validation(validation);
    }
}

fn render_drill_down(view: &DrillDownView) {
    println!("MBG drill-down for {}", view.driver_name);

    let rows: Vec<DailyTableRow> = view
        .days
        .iter()
        .enumerate()
        .map(|(position, day)| DailyTableRow::new(position, day))
        .collect();
    println!("{}", Table::new(rows).with(Style::markdown()));

    println!(
        "\nFull guarantee days: {} | Hourly fallback days: {} | Total MBG {}",
        view.full_guarantee_days, view.fallback_days, view.total_mbg
    );
}

fn render_validation(validation: &ValidationReport) {
    if validation.is_clean() {
        println!("\nValidation: no issues");
        return;
    }

    if !validation.issues.is_empty() {
        println!("\nInput issues");
        for issue in &validation.issues {
            println!(
                "- record {} ({}): {} {}",
                issue.index + 1,
                issue.driver_name,
                issue.field,
                issue.issue.summary()
            );
        }
    }

    if !validation.policy_gaps.is_empty() {
        println!("\nSlab gaps (incentive counted as 0)");
        for gap in &validation.policy_gaps {
            println!("- {}: {:?} at {}", gap.driver_name, gap.kind, gap.value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fleet_view(final_payout: &str, negative: bool) -> FleetRowView {
        FleetRowView {
            driver_name: "Rohit Das".to_string(),
            record_count: 2,
            weekly_acceptance: "88.00%".to_string(),
            total_mbg: "\u{20b9}920.00".to_string(),
            total_earning: "\u{20b9}5,600.00".to_string(),
            revenue_incentive: "\u{20b9}560.00".to_string(),
            additional_incentive: "-".to_string(),
            total_cash_collection: "-".to_string(),
            total_deposit: "-".to_string(),
            cash_balance: "-".to_string(),
            total_payout: "\u{20b9}1,480.00".to_string(),
            payout_after_adjustment: "\u{20b9}1,480.00".to_string(),
            credit: "-".to_string(),
            debit: "-".to_string(),
            customer_trip_tips: "-".to_string(),
            final_payout: final_payout.to_string(),
            is_negative_payout: negative,
        }
    }

    #[test]
    fn negative_payouts_are_flagged_in_the_table() {
        let row = FleetTableRow::from(&fleet_view("-\u{20b9}200.00", true));
        assert_eq!(row.final_payout, "-\u{20b9}200.00 (owes)");

        let row = FleetTableRow::from(&fleet_view("\u{20b9}1,480.00", false));
        assert_eq!(row.final_payout, "\u{20b9}1,480.00");
    }

    #[test]
    fn undated_days_use_their_position() {
        let view = DailyBreakdownView {
            performance_date: None,
            total_earning: "\u{20b9}2,000.00".to_string(),
            hours_online: "8.00".to_string(),
            confirmation_rate: "80.00%".to_string(),
            daily_mbg: "\u{20b9}320.00".to_string(),
            basis_label: "Hourly fallback",
            failed_gates: vec!["earning", "hours online"],
        };

        let row = DailyTableRow::new(1, &view);
        assert_eq!(row.day, "#2");
        assert_eq!(row.basis, "Hourly fallback (earning, hours online)");
    }

    #[test]
    fn rendered_table_uses_letter_headers() {
        let rows = vec![FleetTableRow::from(&fleet_view("\u{20b9}1,480.00", false))];
        let rendered = Table::new(rows).with(Style::markdown()).to_string();
        assert!(rendered.contains("P MBG"));
        assert!(rendered.contains("Rohit Das"));
    }
}
