use super::super::rules::{CurrencyDisplay, DisplayConfig, PercentageDisplay};
use num_format::{Locale, ToFormattedString};

/// Renders payout figures according to the rules' display hints.
#[derive(Debug, Clone)]
pub struct FigureFormatter {
    currency: CurrencyDisplay,
    percentage: PercentageDisplay,
    locale: Locale,
}

impl FigureFormatter {
    pub fn new(display: &DisplayConfig) -> Self {
        let locale = Locale::from_name(display.currency.locale.as_str()).unwrap_or(Locale::en);
        Self {
            currency: display.currency.clone(),
            percentage: display.percentage.clone(),
            locale,
        }
    }

    /// Grouped amount with the currency symbol; zero renders as the placeholder.
    pub fn currency(&self, value: f64) -> String {
        if is_blank(value) {
            return self.currency.placeholder.clone();
        }
        let grouped = group_digits(value.abs(), self.currency.decimals, &self.locale);
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{sign}{}{grouped}", self.currency.symbol)
    }

    /// Fraction rendered as a percentage (`0.88` becomes `88.00%`); zero renders as the
    /// placeholder.
    pub fn percentage(&self, fraction: f64) -> String {
        if is_blank(fraction) {
            return self.percentage.placeholder.clone();
        }
        format!("{:.*}%", self.percentage.decimals, fraction * 100.0)
    }

    /// Plain grouped number without symbol, used for hours and rates.
    pub fn number(&self, value: f64, decimals: usize) -> String {
        let grouped = group_digits(value.abs(), decimals, &self.locale);
        if value < 0.0 {
            format!("-{grouped}")
        } else {
            grouped
        }
    }
}

fn is_blank(value: f64) -> bool {
    value == 0.0 || !value.is_finite()
}

fn group_digits(value: f64, decimals: usize, locale: &Locale) -> String {
    let fixed = format!("{:.*}", decimals, value);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };
    // Beyond u128 the digits are printed ungrouped rather than misreported.
    let mut rendered = match int_part.parse::<u128>() {
        Ok(int_value) => int_value.to_formatted_string(locale),
        Err(_) => int_part.to_string(),
    };
    if let Some(frac) = frac_part {
        rendered.push_str(locale.decimal());
        rendered.push_str(frac);
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter(locale: &str) -> FigureFormatter {
        let mut display = DisplayConfig::default();
        display.currency.locale = locale.to_string();
        display.currency.symbol = "$".to_string();
        FigureFormatter::new(&display)
    }

    #[test]
    fn zero_and_non_finite_render_as_placeholder() {
        let formatter = formatter("en");
        assert_eq!(formatter.currency(0.0), "-");
        assert_eq!(formatter.currency(-0.0), "-");
        assert_eq!(formatter.currency(f64::NAN), "-");
        assert_eq!(formatter.percentage(0.0), "-");
        assert_eq!(formatter.percentage(f64::INFINITY), "-");
    }

    #[test]
    fn currency_groups_thousands_and_keeps_sign() {
        let formatter = formatter("en");
        assert_eq!(formatter.currency(1234567.891), "$1,234,567.89");
        assert_eq!(formatter.currency(-270.0), "-$270.00");
        assert_eq!(formatter.currency(560.0), "$560.00");
    }

    #[test]
    fn percentage_multiplies_the_fraction() {
        let formatter = formatter("en");
        assert_eq!(formatter.percentage(0.88), "88.00%");
        assert_eq!(formatter.percentage(0.125), "12.50%");
    }

    #[test]
    fn unknown_locale_falls_back_to_english_grouping() {
        let formatter = formatter("xx-NOPE");
        assert_eq!(formatter.currency(12500.0), "$12,500.00");
    }

    #[test]
    fn amounts_past_u64_keep_their_digits() {
        let formatter = formatter("en");
        assert_eq!(
            formatter.currency(1.0e20),
            "$100,000,000,000,000,000,000.00"
        );
        assert_eq!(formatter.number(-2.5e19, 0), "-25,000,000,000,000,000,000");

        let huge = formatter.currency(1.0e40);
        assert!(huge.starts_with("$1000000000"));
        assert!(huge.ends_with(".00"));
    }

    #[test]
    fn builtin_display_uses_indian_grouping() {
        let formatter = FigureFormatter::new(&DisplayConfig::default());
        assert_eq!(formatter.currency(12345678.5), "\u{20b9}1,23,45,678.50");
    }

    #[test]
    fn builtin_display_uses_rupee_symbol() {
        let formatter = FigureFormatter::new(&DisplayConfig::default());
        assert_eq!(formatter.currency(920.0), "\u{20b9}920.00");
    }
}
