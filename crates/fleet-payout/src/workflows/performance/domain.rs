use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One driver's performance for a single day, as exported by the reporting endpoint.
///
/// Numeric columns arrive as strings or numbers depending on the upstream export, so each one
/// is kept as a [`Metric`] and coerced at the point of use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPerformanceRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub driver_full_name: String,
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub performance_date: Option<NaiveDate>,
    #[serde(default)]
    pub hours_online: Metric,
    #[serde(default)]
    pub confirmation_rate: Metric,
    #[serde(default)]
    pub total_earings: Metric,
    #[serde(default)]
    pub cash_collected: Metric,
    #[serde(default)]
    pub paid_to_you_your_earings_tip: Metric,
}

impl RawPerformanceRecord {
    pub fn new(driver_full_name: impl Into<String>) -> Self {
        Self {
            driver_full_name: driver_full_name.into(),
            ..Self::default()
        }
    }

    pub fn hours_online(&self) -> f64 {
        self.hours_online.value()
    }

    pub fn confirmation_rate(&self) -> f64 {
        self.confirmation_rate.value()
    }

    pub fn total_earning(&self) -> f64 {
        self.total_earings.value()
    }

    pub fn cash_collected(&self) -> f64 {
        self.cash_collected.value()
    }

    pub fn customer_tip(&self) -> f64 {
        self.paid_to_you_your_earings_tip.value()
    }

    /// Field names paired with their raw metric, in export column order.
    pub fn metrics(&self) -> [(&'static str, &Metric); 5] {
        [
            ("hours_online", &self.hours_online),
            ("confirmation_rate", &self.confirmation_rate),
            ("total_earings", &self.total_earings),
            ("cash_collected", &self.cash_collected),
            (
                "paid_to_you_your_earings_tip",
                &self.paid_to_you_your_earings_tip,
            ),
        ]
    }
}

/// A numeric column exactly as it was received.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Metric {
    #[default]
    Missing,
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Metric {
    /// Coerced value; anything that does not parse to a finite number counts as zero.
    pub fn value(&self) -> f64 {
        self.parsed().unwrap_or(0.0)
    }

    pub fn parsed(&self) -> Option<f64> {
        match self {
            Metric::Number(value) if value.is_finite() => Some(*value),
            Metric::Text(raw) => parse_amount(raw),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            Metric::Missing => true,
            Metric::Text(raw) => raw.trim().is_empty(),
            _ => false,
        }
    }

    /// Present but not coercible to a number.
    pub fn is_unparsable(&self) -> bool {
        !self.is_missing() && self.parsed().is_none()
    }

    pub fn raw(&self) -> String {
        match self {
            Metric::Missing => String::new(),
            Metric::Number(value) => value.to_string(),
            Metric::Text(raw) => raw.clone(),
            Metric::Other(value) => value.to_string(),
        }
    }
}

impl From<f64> for Metric {
    fn from(value: f64) -> Self {
        Metric::Number(value)
    }
}

impl From<&str> for Metric {
    fn from(value: &str) -> Self {
        Metric::Text(value.to_string())
    }
}

impl Serialize for Metric {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Metric::Missing => serializer.serialize_none(),
            Metric::Number(value) => serializer.serialize_f64(*value),
            Metric::Text(raw) => serializer.serialize_str(raw),
            Metric::Other(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Metric {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum MetricInput {
            Number(f64),
            Text(String),
            Other(serde_json::Value),
        }

        let input = Option::<MetricInput>::deserialize(deserializer)?;
        Ok(match input {
            None => Metric::Missing,
            Some(MetricInput::Number(value)) => Metric::Number(value),
            Some(MetricInput::Text(raw)) if raw.trim().is_empty() => Metric::Missing,
            Some(MetricInput::Text(raw)) => Metric::Text(raw),
            Some(MetricInput::Other(value)) => Metric::Other(value),
        })
    }
}

/// Parse an exported amount such as `" 3,600.50 "` or `"1,23,456"`; returns `None` for text that
/// is not a finite number. Commas are accepted only as digit-group separators in the integer part.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let cleaned = if trimmed.contains(',') {
        strip_group_separators(trimmed)?
    } else {
        trimmed.to_string()
    };
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

// Western (1,234,567) and Indian (12,34,567) grouping: a leading group of 1-3 digits, middle
// groups of 2 or 3 digits, and a final group of exactly 3.
fn strip_group_separators(amount: &str) -> Option<String> {
    let (sign, unsigned) = match amount.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", amount),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };
    if fraction.is_some_and(|fraction| fraction.contains(',')) {
        return None;
    }

    let groups: Vec<&str> = integer.split(',').collect();
    let last = groups.len() - 1;
    let well_formed = groups.iter().enumerate().all(|(index, group)| {
        let digits = group.chars().all(|c| c.is_ascii_digit());
        let width_ok = match index {
            0 => (1..=3).contains(&group.len()),
            i if i == last => group.len() == 3,
            _ => group.len() == 2 || group.len() == 3,
        };
        digits && width_ok
    });
    if !well_formed {
        return None;
    }

    let mut cleaned = format!("{sign}{}", groups.concat());
    if let Some(fraction) = fraction {
        cleaned.push('.');
        cleaned.push_str(fraction);
    }
    Some(cleaned)
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(opt.as_ref().and_then(|value| value.as_str()).and_then(parse_date))
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_accept_strings_and_numbers() {
        let record: RawPerformanceRecord = serde_json::from_str(
            r#"{
                "driver_full_name": "Asha Rao",
                "performance_date": "2025-03-04",
                "hours_online": "12.5",
                "confirmation_rate": 96,
                "total_earings": "3,600",
                "cash_collected": null
            }"#,
        )
        .expect("record parses");

        assert_eq!(record.hours_online(), 12.5);
        assert_eq!(record.confirmation_rate(), 96.0);
        assert_eq!(record.total_earning(), 3600.0);
        assert!(record.cash_collected.is_missing());
        assert!(record.paid_to_you_your_earings_tip.is_missing());
        assert_eq!(
            record.performance_date,
            NaiveDate::from_ymd_opt(2025, 3, 4)
        );
    }

    #[test]
    fn unparsable_values_coerce_to_zero() {
        let record: RawPerformanceRecord = serde_json::from_str(
            r#"{
                "driver_full_name": "Asha Rao",
                "performance_date": "last tuesday",
                "hours_online": "n/a",
                "confirmation_rate": true,
                "total_earings": "NaN"
            }"#,
        )
        .expect("record parses");

        assert_eq!(record.hours_online(), 0.0);
        assert!(record.hours_online.is_unparsable());
        assert_eq!(record.confirmation_rate(), 0.0);
        assert!(record.confirmation_rate.is_unparsable());
        assert_eq!(record.total_earning(), 0.0);
        assert!(record.performance_date.is_none());
    }

    #[test]
    fn amounts_accept_only_digit_grouping_commas() {
        assert_eq!(parse_amount(" 3,600.50 "), Some(3600.5));
        assert_eq!(parse_amount("1,234,567"), Some(1234567.0));
        assert_eq!(parse_amount("12,34,567.25"), Some(1234567.25));
        assert_eq!(parse_amount("-1,500"), Some(-1500.0));

        assert_eq!(parse_amount("1,2,3"), None);
        assert_eq!(parse_amount("3600,"), None);
        assert_eq!(parse_amount(",600"), None);
        assert_eq!(parse_amount("1,0000"), None);
        assert_eq!(parse_amount("12.5 hrs"), None);
    }

    #[test]
    fn misplaced_commas_are_reported_as_unparsable() {
        let metric = Metric::from("1,2,3");
        assert_eq!(metric.value(), 0.0);
        assert!(metric.is_unparsable());
        assert_eq!(metric.raw(), "1,2,3");
    }

    #[test]
    fn rfc3339_dates_are_reduced_to_calendar_days() {
        assert_eq!(
            parse_date("2025-03-04T18:30:00+05:30"),
            NaiveDate::from_ymd_opt(2025, 3, 4)
        );
    }

    #[test]
    fn null_driver_name_becomes_empty() {
        let record: RawPerformanceRecord =
            serde_json::from_str(r#"{ "driver_full_name": null }"#).expect("record parses");
        assert_eq!(record.driver_full_name, "");
    }
}
