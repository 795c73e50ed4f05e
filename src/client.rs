use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::errors::FetchError;

/// Anything that can quote a spot price, live or as of a past date.
#[async_trait]
pub trait SpotPriceSource {
    async fn spot_price(&self, symbol: &str, date: Option<NaiveDate>) -> Result<f64, FetchError>;
}

#[derive(Debug, Deserialize)]
struct SpotEnvelope {
    data: Option<SpotData>,
}

#[derive(Debug, Deserialize)]
struct SpotData {
    amount: Option<String>,
}

/// Extracts `data.amount` from a spot-price response body.
pub fn parse_spot_body(body: &str) -> Result<f64, FetchError> {
    let envelope: SpotEnvelope = serde_json::from_str(body)?;
    let amount = envelope
        .data
        .and_then(|d| d.amount)
        .ok_or(FetchError::MissingAmount)?;

    match amount.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FetchError::InvalidAmount(amount)),
    }
}

#[derive(Clone)]
pub struct PriceClient {
    http: Client,
    url: String,
    quote: String,
}

impl PriceClient {
    pub fn new(url: String, quote: String, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            url: url.trim_end_matches('/').to_string(),
            quote,
        })
    }

    pub fn spot_url(&self, symbol: &str) -> String {
        format!("{}/prices/{}-{}/spot", self.url, symbol, self.quote)
    }
}

#[async_trait]
impl SpotPriceSource for PriceClient {
    #[instrument(skip(self), level = "debug")]
    async fn spot_price(&self, symbol: &str, date: Option<NaiveDate>) -> Result<f64, FetchError> {
        let mut req = self.http.get(self.spot_url(symbol));
        if let Some(date) = date {
            req = req.query(&[("date", date.to_string())]);
        }

        let resp = req.send().await?.error_for_status()?;
        let body = resp.text().await?;
        let amount = parse_spot_body(&body)?;

        debug!(amount, "spot price fetched");

        Ok(amount)
    }
}
