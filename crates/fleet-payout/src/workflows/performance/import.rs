use super::domain::RawPerformanceRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum RecordImportError {
    #[error("failed to read performance records: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid performance CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid performance JSON data: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON array of records as returned by the performance report endpoint.
pub fn records_from_json<R: Read>(reader: R) -> Result<Vec<RawPerformanceRecord>, RecordImportError> {
    Ok(serde_json::from_reader(reader)?)
}

/// CSV export whose header row uses the record field names.
pub fn records_from_csv<R: Read>(reader: R) -> Result<Vec<RawPerformanceRecord>, RecordImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<RawPerformanceRecord>() {
        records.push(row?);
    }

    Ok(records)
}

/// Load records from disk, choosing the parser by file extension (`.csv`, otherwise JSON).
pub fn load_records(path: &Path) -> Result<Vec<RawPerformanceRecord>, RecordImportError> {
    let file = File::open(path)?;
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        records_from_csv(file)
    } else {
        records_from_json(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn csv_rows_coerce_blank_and_text_cells() {
        let csv = "driver_full_name,performance_date,hours_online,confirmation_rate,total_earings,cash_collected,paid_to_you_your_earings_tip\n\
Asha Rao,2025-03-03,12.5,96,\"3,600\",1200,45\n\
Asha Rao,2025-03-04,,80,2000,oops,\n";

        let records = records_from_csv(csv.as_bytes()).expect("csv parses");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].total_earning(), 3600.0);
        assert_eq!(records[0].customer_tip(), 45.0);
        assert_eq!(
            records[0].performance_date,
            NaiveDate::from_ymd_opt(2025, 3, 3)
        );
        assert!(records[1].hours_online.is_missing());
        assert!(records[1].cash_collected.is_unparsable());
        assert_eq!(records[1].cash_collected(), 0.0);
    }

    #[test]
    fn json_arrays_ignore_unknown_columns() {
        let json = r#"[
            { "driver_full_name": "Asha Rao", "vehicle_no": "KA-01-1234", "total_earings": 1500 }
        ]"#;

        let records = records_from_json(json.as_bytes()).expect("json parses");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].total_earning(), 1500.0);
    }

    #[test]
    fn malformed_json_reports_an_error() {
        let result = records_from_json("{ not json".as_bytes());
        assert!(matches!(result, Err(RecordImportError::Json(_))));
    }
}
