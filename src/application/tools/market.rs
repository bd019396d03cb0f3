//! Live market data: the gold spot-price tool and its upstream feed.

use super::{Tool, ToolReply};
use crate::types::ToolDefinition;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

const TROY_OUNCE_GRAMS: f64 = 31.1035;
const DEFAULT_FEED_BASE: &str = "https://api.metalpriceapi.com/v1";

/// Cities quoted by the price tool with their local market premium over the
/// international spot price.
const CITY_PREMIUMS: [(&str, f64); 6] = [
    ("Delhi", 0.02),
    ("Mumbai", 0.025),
    ("Chennai", 0.015),
    ("Kolkata", 0.02),
    ("Bangalore", 0.03),
    ("Hyderabad", 0.025),
];

#[derive(Debug, Clone)]
pub struct SpotPrice {
    pub inr_per_gram: f64,
    pub as_of: String,
}

#[derive(Debug, Error)]
pub enum PriceFeedError {
    #[error("market data credential is not configured")]
    MissingCredential,
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("market data provider returned an error: {0}")]
    Provider(String),
}

/// Upstream source for the international gold spot price in INR.
#[async_trait]
pub trait SpotPriceSource: Send + Sync {
    async fn gold_inr_per_gram(&self) -> Result<SpotPrice, PriceFeedError>;
}

/// metalpriceapi.com client. The credential is optional: without it every
/// fetch reports `MissingCredential` and the price tool degrades to a
/// failure reply instead of crashing the run.
#[derive(Clone)]
pub struct MetalPriceApi {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl MetalPriceApi {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_client(DEFAULT_FEED_BASE, api_key, Client::new())
    }

    pub fn with_client(
        base_url: impl Into<String>,
        api_key: Option<String>,
        client: Client,
    ) -> Self {
        Self {
            http: client,
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl SpotPriceSource for MetalPriceApi {
    async fn gold_inr_per_gram(&self) -> Result<SpotPrice, PriceFeedError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(PriceFeedError::MissingCredential)?;
        let url = format!(
            "{}/latest?api_key={}&base=XAU&currencies=INR",
            self.base_url.trim_end_matches('/'),
            api_key
        );
        debug!("Fetching gold spot price from market data provider");
        let response: MetalPriceResponse = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !response.success {
            let info = response
                .error
                .and_then(|error| error.info)
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(PriceFeedError::Provider(info));
        }
        let inr_per_ounce = response
            .rates
            .and_then(|rates| rates.inr)
            .ok_or_else(|| PriceFeedError::Provider("missing INR rate".to_string()))?;

        let as_of = response
            .timestamp
            .and_then(|seconds| DateTime::<Utc>::from_timestamp(seconds, 0))
            .unwrap_or_else(Utc::now)
            .to_rfc3339();

        Ok(SpotPrice {
            inr_per_gram: inr_per_ounce / TROY_OUNCE_GRAMS,
            as_of,
        })
    }
}

#[derive(Debug, Deserialize)]
struct MetalPriceResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    rates: Option<MetalPriceRates>,
    #[serde(default)]
    timestamp: Option<i64>,
    #[serde(default)]
    error: Option<MetalPriceErrorBody>,
}

#[derive(Debug, Deserialize)]
struct MetalPriceRates {
    #[serde(rename = "INR")]
    inr: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct MetalPriceErrorBody {
    info: Option<String>,
}

#[derive(Debug, Serialize)]
struct CityGoldPrice {
    city: String,
    gold_24k: i64,
    gold_22k: i64,
    gold_18k: i64,
    silver: i64,
    last_updated: String,
}

/// `get_indian_gold_price`: city-wise 24k/22k/18k gold and silver rates in
/// INR per gram, derived from the spot feed with per-city premiums.
pub struct GoldPriceTool {
    definition: ToolDefinition,
    source: Arc<dyn SpotPriceSource>,
}

impl GoldPriceTool {
    pub fn new(source: Arc<dyn SpotPriceSource>) -> Self {
        Self {
            definition: ToolDefinition {
                name: "get_indian_gold_price".into(),
                description: "Get the current gold prices in major Indian cities in INR".into(),
                parameters: json!({
                    "type": "object",
                    "properties": {},
                    "required": []
                }),
            },
            source,
        }
    }

    fn city_table(spot: &SpotPrice) -> Vec<CityGoldPrice> {
        CITY_PREMIUMS
            .iter()
            .map(|(city, premium)| {
                let base = spot.inr_per_gram * (1.0 + premium);
                CityGoldPrice {
                    city: (*city).to_string(),
                    gold_24k: base.round() as i64,
                    gold_22k: (base * 0.916).round() as i64,
                    gold_18k: (base * 0.75).round() as i64,
                    silver: (spot.inr_per_gram / 80.0).round() as i64,
                    last_updated: spot.as_of.clone(),
                }
            })
            .collect()
    }
}

#[async_trait]
impl Tool for GoldPriceTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    async fn call(&self, _arguments: Value) -> ToolReply {
        match self.source.gold_inr_per_gram().await {
            Ok(spot) => {
                let table = Self::city_table(&spot);
                let data = serde_json::to_value(&table).unwrap_or(Value::Null);
                ToolReply::ok(data, "Current gold prices across major Indian cities")
            }
            Err(error) => {
                warn!(%error, "Gold price fetch failed");
                ToolReply::failure("Failed to fetch current gold prices. Please try again later.")
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests_support {
    use super::*;

    pub(crate) struct FixedPriceSource {
        price: f64,
    }

    impl FixedPriceSource {
        pub(crate) fn new(price: f64) -> Self {
            Self { price }
        }
    }

    #[async_trait]
    impl SpotPriceSource for FixedPriceSource {
        async fn gold_inr_per_gram(&self) -> Result<SpotPrice, PriceFeedError> {
            Ok(SpotPrice {
                inr_per_gram: self.price,
                as_of: "2026-01-05T00:00:00+00:00".to_string(),
            })
        }
    }

    pub(crate) struct FailingPriceSource;

    #[async_trait]
    impl SpotPriceSource for FailingPriceSource {
        async fn gold_inr_per_gram(&self) -> Result<SpotPrice, PriceFeedError> {
            Err(PriceFeedError::MissingCredential)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::tests_support::{FailingPriceSource, FixedPriceSource};
    use super::*;

    #[tokio::test]
    async fn builds_city_table_with_premiums() {
        let tool = GoldPriceTool::new(Arc::new(FixedPriceSource::new(10_000.0)));
        let reply = tool.call(json!({})).await;
        assert!(reply.success);

        let rows = reply.data.as_array().expect("array of cities");
        assert_eq!(rows.len(), 6);

        let delhi = &rows[0];
        assert_eq!(delhi["city"], "Delhi");
        assert_eq!(delhi["gold_24k"], 10_200);
        assert_eq!(delhi["gold_22k"], (10_200.0_f64 * 0.916).round() as i64);
        assert_eq!(delhi["silver"], 125);

        let bangalore = rows
            .iter()
            .find(|row| row["city"] == "Bangalore")
            .expect("bangalore row");
        assert_eq!(bangalore["gold_24k"], 10_300);
    }

    #[tokio::test]
    async fn missing_credential_degrades_to_failure_reply() {
        let tool = GoldPriceTool::new(Arc::new(FailingPriceSource));
        let reply = tool.call(json!({})).await;
        assert!(!reply.success);
        assert!(
            reply
                .message
                .expect("message")
                .contains("Failed to fetch current gold prices")
        );
    }

    #[test]
    fn feed_without_key_reports_missing_credential() {
        let feed = MetalPriceApi::new(None);
        let error = futures::executor::block_on(feed.gold_inr_per_gram())
            .expect_err("missing key fails");
        assert!(matches!(error, PriceFeedError::MissingCredential));
    }

    #[test]
    fn provider_error_body_is_surfaced() {
        let raw = r#"{ "success": false, "error": { "info": "quota exhausted" } }"#;
        let parsed: MetalPriceResponse = serde_json::from_str(raw).expect("deserialize");
        assert!(!parsed.success);
        assert_eq!(
            parsed.error.and_then(|e| e.info).as_deref(),
            Some("quota exhausted")
        );
    }
}
