use std::env;
use std::path::PathBuf;
use std::time::Duration;

use chrono_tz::Tz;
use color_eyre::eyre::{bail, eyre, Result};

pub const DEFAULT_SYMBOLS: &[&str] = &["BTC", "ETH", "SOL", "ENS"];

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Tickers shown as table columns, in order.
    pub symbols: Vec<String>,

    /// Where the HTML page is written every cycle. The parent directory must exist.
    pub output_html_file: PathBuf,

    /// Base URL of the spot-price API, without the `/prices/...` suffix.
    pub api_url: String,

    /// Quote side of every trading pair, e.g. `USD` in `BTC-USD`.
    pub quote_currency: String,

    pub refresh_interval: Duration,
    pub request_timeout: Duration,

    /// Zone that decides which calendar day is "today".
    pub timezone: Tz,

    /// Emit JSON logs instead of the pretty format.
    pub json_logs: bool,
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_secs(name: &str, default: u64) -> Result<Duration> {
    let raw = env_str(name, &default.to_string());
    let secs: u64 = raw
        .parse()
        .map_err(|_| eyre!("{name} must be a whole number of seconds, got {raw:?}"))?;
    if secs == 0 {
        bail!("{name} must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}

/// Splits a comma-separated ticker list, upper-casing and dropping blanks and repeats.
pub fn parse_symbols(raw: &str) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();
    for symbol in raw.split(',').map(|s| s.trim().to_uppercase()) {
        if !symbol.is_empty() && !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }
    symbols
}

impl MonitorConfig {
    pub fn from_env() -> Result<Self> {
        let symbols = parse_symbols(&env_str("CRYPTO_SYMBOLS", &DEFAULT_SYMBOLS.join(",")));
        if symbols.is_empty() {
            bail!("CRYPTO_SYMBOLS does not name any symbol");
        }

        let tz_name = env_str("PRICE_MONITOR_TZ", "UTC");
        let timezone: Tz = tz_name
            .parse()
            .map_err(|e| eyre!("unknown time zone {tz_name:?}: {e}"))?;

        Ok(Self {
            symbols,
            output_html_file: PathBuf::from(env_str("OUTPUT_HTML_FILE", "crypto.prices.html")),
            api_url: env_str("PRICE_API_URL", "https://api.coinbase.com/v2"),
            quote_currency: env_str("QUOTE_CURRENCY", "USD").to_uppercase(),
            refresh_interval: env_secs("REFRESH_INTERVAL_SECS", 60)?,
            request_timeout: env_secs("REQUEST_TIMEOUT_SECS", 10)?,
            timezone,
            json_logs: env_str("APP_ENV", "") == "production",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_list_is_normalised() {
        assert_eq!(parse_symbols(" btc, ETH ,,sol,BTC "), ["BTC", "ETH", "SOL"]);
        assert!(parse_symbols(" , ").is_empty());
    }

    // Single test so the process environment is not mutated concurrently.
    #[test]
    fn reads_environment_with_defaults_and_validation() {
        for key in [
            "CRYPTO_SYMBOLS",
            "OUTPUT_HTML_FILE",
            "PRICE_API_URL",
            "QUOTE_CURRENCY",
            "REFRESH_INTERVAL_SECS",
            "REQUEST_TIMEOUT_SECS",
            "PRICE_MONITOR_TZ",
            "APP_ENV",
        ] {
            env::remove_var(key);
        }

        let cfg = MonitorConfig::from_env().unwrap();
        assert_eq!(cfg.symbols, DEFAULT_SYMBOLS);
        assert_eq!(cfg.output_html_file, PathBuf::from("crypto.prices.html"));
        assert_eq!(cfg.api_url, "https://api.coinbase.com/v2");
        assert_eq!(cfg.refresh_interval, Duration::from_secs(60));
        assert_eq!(cfg.request_timeout, Duration::from_secs(10));
        assert_eq!(cfg.timezone, Tz::UTC);
        assert!(!cfg.json_logs);

        env::set_var("CRYPTO_SYMBOLS", "doge");
        env::set_var("PRICE_MONITOR_TZ", "Europe/Amsterdam");
        env::set_var("REFRESH_INTERVAL_SECS", "15");
        let cfg = MonitorConfig::from_env().unwrap();
        assert_eq!(cfg.symbols, ["DOGE"]);
        assert_eq!(cfg.timezone, chrono_tz::Europe::Amsterdam);
        assert_eq!(cfg.refresh_interval, Duration::from_secs(15));

        env::set_var("REFRESH_INTERVAL_SECS", "0");
        assert!(MonitorConfig::from_env().is_err());
        env::set_var("REFRESH_INTERVAL_SECS", "soon");
        assert!(MonitorConfig::from_env().is_err());
        env::remove_var("REFRESH_INTERVAL_SECS");

        env::set_var("PRICE_MONITOR_TZ", "Mars/Olympus");
        assert!(MonitorConfig::from_env().is_err());
        env::remove_var("PRICE_MONITOR_TZ");

        env::set_var("CRYPTO_SYMBOLS", ",,");
        assert!(MonitorConfig::from_env().is_err());
        env::remove_var("CRYPTO_SYMBOLS");
    }
}
