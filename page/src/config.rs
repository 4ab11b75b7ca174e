//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::format::{Currency, Locale, MoneyFormat};

pub const DEFAULT_URL: &str = "https://dummyjson.com/products/115";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown locale '{0}' (expected en-IN or en-US)")]
    UnknownLocale(String),

    #[error("unknown currency '{0}' (expected INR, USD or EUR)")]
    UnknownCurrency(String),
}

/// Render a product page from a remote product record.
#[derive(Debug, Clone, Parser)]
#[command(name = "product-page", version)]
pub struct Settings {
    /// Product resource to fetch.
    #[arg(long, env = "PRODUCT_URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// Display-currency units per catalogue-currency unit.
    #[arg(long, env = "PRODUCT_CONVERSION_RATE", default_value_t = 82.0)]
    pub rate: f64,

    #[arg(long, env = "PRODUCT_LOCALE", default_value = "en-IN")]
    pub locale: Locale,

    #[arg(long, env = "PRODUCT_CURRENCY", default_value = "INR")]
    pub currency: Currency,

    /// Give up on the request after this many seconds.
    #[arg(
        long,
        env = "PRODUCT_TIMEOUT_SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: Option<u64>,

    /// Write the page here instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl Settings {
    pub fn money_format(&self) -> MoneyFormat {
        MoneyFormat::new(self.locale, self.currency, self.rate)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
