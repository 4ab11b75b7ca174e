//! Locale-aware money and date formatting for the product page.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::config::ConfigError;

/// Display locale. Controls digit grouping and date layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    /// `1,23,456.00`, `23/05/2024`
    EnIn,
    /// `123,456.00`, `5/23/2024`
    EnUs,
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "en-in" => Ok(Locale::EnIn),
            "en-us" => Ok(Locale::EnUs),
            _ => Err(ConfigError::UnknownLocale(s.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Locale::EnIn => "en-IN",
            Locale::EnUs => "en-US",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Inr,
    Usd,
    Eur,
}

impl Currency {
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
            Currency::Eur => "€",
        }
    }
}

impl FromStr for Currency {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INR" => Ok(Currency::Inr),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            _ => Err(ConfigError::UnknownCurrency(s.to_string())),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        })
    }
}

/// Converts catalogue prices into the display currency and formats them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoneyFormat {
    pub locale: Locale,
    pub currency: Currency,
    /// Display-currency units per catalogue-currency unit.
    pub rate: f64,
}

impl MoneyFormat {
    pub fn new(locale: Locale, currency: Currency, rate: f64) -> Self {
        Self {
            locale,
            currency,
            rate,
        }
    }

    pub fn convert(&self, price: f64) -> f64 {
        price * self.rate
    }

    /// The pre-discount price shown struck through next to the current one.
    pub fn original_price(&self, price: f64, discount_percentage: f64) -> f64 {
        self.convert(price) * (1.0 + discount_percentage / 100.0)
    }

    /// Format an amount already in the display currency.
    pub fn format(&self, amount: f64) -> String {
        let cents = (amount.abs() * 100.0).round() as u64;
        let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
        let units = group_digits(cents / 100, self.locale);
        format!("{sign}{}{units}.{:02}", self.currency.symbol(), cents % 100)
    }

    /// Convert a catalogue price and format it.
    pub fn format_price(&self, price: f64) -> String {
        self.format(self.convert(price))
    }

    pub fn format_date(&self, timestamp: &str) -> String {
        self.format_timestamp(timestamp, false)
    }

    pub fn format_datetime(&self, timestamp: &str) -> String {
        self.format_timestamp(timestamp, true)
    }

    /// Unparseable timestamps are shown as received.
    fn format_timestamp(&self, timestamp: &str, with_time: bool) -> String {
        let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) else {
            return timestamp.to_string();
        };
        let utc = parsed.with_timezone(&Utc);
        let pattern = match (self.locale, with_time) {
            (Locale::EnIn, false) => "%d/%m/%Y",
            (Locale::EnIn, true) => "%d/%m/%Y, %-I:%M:%S %P",
            (Locale::EnUs, false) => "%-m/%-d/%Y",
            (Locale::EnUs, true) => "%-m/%-d/%Y, %-I:%M:%S %p",
        };
        utc.format(pattern).to_string()
    }
}

/// Insert group separators: Indian grouping keeps the last three digits
/// together and groups the rest in pairs.
fn group_digits(value: u64, locale: Locale) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let size = match locale {
        Locale::EnIn => 2,
        Locale::EnUs => 3,
    };
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(size);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}
