use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Currency every money figure is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayCurrency {
    #[default]
    Jpy,
    Usd,
}

impl FromStr for DisplayCurrency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpy" | "yen" => Ok(DisplayCurrency::Jpy),
            "usd" | "dollar" => Ok(DisplayCurrency::Usd),
            other => Err(format!("unknown currency '{other}'")),
        }
    }
}

/// Half-up rounding to the nearest whole unit (-2.5 rounds to -2).
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let rounded = round_half_up(value);
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_jpy(value: f64) -> String {
    format!("¥{}", group_thousands(value))
}

pub fn format_usd(value: f64, jpy_per_usd: f64) -> String {
    let converted = if jpy_per_usd > 0.0 {
        value / jpy_per_usd
    } else {
        f64::NAN
    };
    format!("${}", group_thousands(converted))
}

pub fn format_currency(value: f64, currency: DisplayCurrency, jpy_per_usd: f64) -> String {
    match currency {
        DisplayCurrency::Jpy => format_jpy(value),
        DisplayCurrency::Usd => format_usd(value, jpy_per_usd),
    }
}

/// One decimal place, or `N/A` for non-finite values.
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    format!("{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jpy_groups_thousands() {
        assert_eq!(format_jpy(0.0), "¥0");
        assert_eq!(format_jpy(999.4), "¥999");
        assert_eq!(format_jpy(1_165_500.0), "¥1,165,500");
        assert_eq!(format_jpy(-834_500.0), "¥-834,500");
    }

    #[test]
    fn usd_divides_by_rate_and_rounds() {
        assert_eq!(format_usd(2_000_000.0, 150.0), "$13,333");
        assert_eq!(format_usd(225.0, 150.0), "$2");
        assert_eq!(format_usd(1_000.0, 0.0), "$N/A");
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(format_jpy(2.5), "¥3");
        assert_eq!(format_jpy(-2.5), "¥-2");
    }

    #[test]
    fn percent_handles_non_finite() {
        assert_eq!(format_percent(41.725), "41.7%");
        assert_eq!(format_percent(f64::NAN), "N/A");
        assert_eq!(format_percent(f64::INFINITY), "N/A");
    }
}
