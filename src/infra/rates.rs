//! Thin asynchronous client for the freight rates provider.
//!
//! - Posts one lane query per call and maps the response into typed
//!   [`RawQuote`]s through schema-validated DTOs.
//! - `fetch_rates` is the fail-soft surface: any transport or shape problem
//!   collapses to an empty batch so the UI can show "no rates found".

use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::domain::{RateRequest, RawQuote};

const DEFAULT_BASE_URL: &str = "https://rates.freightlane.app/v1/";
const USER_AGENT: &str = "freight-rate-desk/0.1.0";

#[derive(Debug, Error)]
pub enum RatesClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider error: {0}")]
    Api(String),
}

#[derive(Clone)]
pub struct RatesClient {
    http: Client,
    base_url: Url,
}

impl RatesClient {
    pub fn new() -> Result<Self, RatesClientError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base: &str) -> Result<Self, RatesClientError> {
        let base_url = Url::parse(base)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, base_url })
    }

    /// Fetches carrier quotes for a lane.
    ///
    /// Fail-soft: network errors, non-2xx statuses, a false success flag and
    /// malformed payloads all resolve to an empty batch after logging. No
    /// retries, no caching; each call is independent.
    pub async fn fetch_rates(&self, request: &RateRequest) -> Vec<RawQuote> {
        match self.try_fetch(request).await {
            Ok(quotes) => quotes,
            Err(error) => {
                println!(
                    "Rate search failed for {} -> {} ({}): {error}",
                    request.origin, request.destination, request.container_type
                );
                Vec::new()
            }
        }
    }

    /// Fallible inner call behind [`fetch_rates`].
    pub(crate) async fn try_fetch(
        &self,
        request: &RateRequest,
    ) -> Result<Vec<RawQuote>, RatesClientError> {
        let url = self.base_url.join("rates/search")?;
        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await?
            .error_for_status()?;
        let payload: serde_json::Value = response.json().await?;
        parse_envelope(payload)
    }
}

#[derive(Debug, Deserialize)]
struct RatesEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    quotes: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

fn parse_envelope(value: serde_json::Value) -> Result<Vec<RawQuote>, RatesClientError> {
    let envelope: RatesEnvelope = serde_json::from_value(value)
        .map_err(|error| RatesClientError::Api(format!("unexpected response shape: {error}")))?;

    if !envelope.success {
        return Err(RatesClientError::Api(
            envelope
                .message
                .unwrap_or_else(|| "provider flagged failure".to_string()),
        ));
    }

    let Some(serde_json::Value::Array(entries)) = envelope.quotes else {
        return Err(RatesClientError::Api(
            "response missing quotes array".to_string(),
        ));
    };

    Ok(entries.into_iter().filter_map(parse_quote_entry).collect())
}

/// Maps one provider element; entries that fail the schema are skipped
/// individually instead of poisoning the batch.
fn parse_quote_entry(entry: serde_json::Value) -> Option<RawQuote> {
    serde_json::from_value::<RateQuoteDto>(entry)
        .ok()
        .and_then(RateQuoteDto::into_quote)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RateQuoteDto {
    #[serde(deserialize_with = "string_from_json")]
    id: String,
    #[serde(alias = "carrier_name")]
    carrier: String,
    #[serde(default, alias = "carrier_logo", alias = "logoUrl")]
    carrier_logo: Option<String>,
    #[serde(alias = "base_price", alias = "price")]
    base_price: f64,
    #[serde(default = "default_currency")]
    currency: String,
    #[serde(alias = "transit_days", alias = "transitTime")]
    transit_days: u32,
    #[serde(default, alias = "valid_until")]
    valid_until: Option<String>,
    #[serde(default = "default_true", alias = "is_real")]
    is_real: bool,
    #[serde(default, alias = "co2_emissions")]
    co2_emissions: Option<f64>,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_true() -> bool {
    true
}

impl RateQuoteDto {
    fn into_quote(self) -> Option<RawQuote> {
        // The pricing engine assumes non-negative input; bad offers are
        // rejected here, on the acquisition side.
        if !self.base_price.is_finite() || self.base_price < 0.0 {
            return None;
        }
        Some(RawQuote {
            id: self.id,
            carrier: self.carrier,
            carrier_logo: self.carrier_logo,
            base_price: self.base_price,
            currency: self.currency,
            transit_days: self.transit_days,
            valid_until: parse_valid_until(self.valid_until.as_deref()),
            is_real: self.is_real,
            co2_kg: self.co2_emissions.filter(|kg| kg.is_finite() && *kg >= 0.0),
        })
    }
}

fn parse_valid_until(raw: Option<&str>) -> OffsetDateTime {
    raw.and_then(|value| OffsetDateTime::parse(value, &Rfc3339).ok())
        .unwrap_or_else(OffsetDateTime::now_utc)
}

/// Providers have been seen sending ids as both strings and numbers.
fn string_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Text(String),
        Number(i64),
    }

    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Text(text) => text,
        IdRepr::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{pricing, ServiceSelection};
    use serde_json::json;

    fn lane_payload() -> serde_json::Value {
        json!({
            "success": true,
            "quotes": [
                {
                    "id": "mq-1",
                    "carrier": "Maersk",
                    "logoUrl": "https://cdn.example.com/maersk.svg",
                    "basePrice": 2000.0,
                    "currency": "USD",
                    "transitDays": 24,
                    "validUntil": "2026-09-30T00:00:00Z",
                    "isReal": true,
                    "co2Emissions": 812.5
                },
                {
                    "id": 42,
                    "carrier": "OtherLine",
                    "basePrice": 1800.0,
                    "transitDays": 31
                }
            ]
        })
    }

    #[test]
    fn maps_provider_batch_field_by_field() {
        let quotes = parse_envelope(lane_payload()).unwrap();
        assert_eq!(quotes.len(), 2);

        let maersk = &quotes[0];
        assert_eq!(maersk.id, "mq-1");
        assert_eq!(maersk.carrier, "Maersk");
        assert_eq!(maersk.base_price, 2000.0);
        assert_eq!(maersk.transit_days, 24);
        assert_eq!(maersk.co2_kg, Some(812.5));
        assert!(maersk.is_real);

        // Sparse entry: numeric id, defaulted currency and live flag.
        let other = &quotes[1];
        assert_eq!(other.id, "42");
        assert_eq!(other.currency, "USD");
        assert!(other.is_real);
        assert!(other.carrier_logo.is_none());
    }

    #[test]
    fn failure_flag_is_an_error() {
        let result = parse_envelope(json!({ "success": false, "message": "lane not served" }));
        assert!(matches!(result, Err(RatesClientError::Api(msg)) if msg == "lane not served"));
    }

    #[test]
    fn absent_success_flag_is_an_error() {
        // A payload that never states success is treated like a failure.
        let result = parse_envelope(json!({ "quotes": [] }));
        assert!(matches!(result, Err(RatesClientError::Api(msg)) if msg.contains("failure")));
    }

    #[test]
    fn missing_quotes_array_is_an_error() {
        assert!(parse_envelope(json!({ "success": true })).is_err());
        assert!(parse_envelope(json!({ "success": true, "quotes": "soon" })).is_err());
        assert!(parse_envelope(json!("not even an object")).is_err());
    }

    #[test]
    fn malformed_entries_are_skipped_not_fatal() {
        let quotes = parse_envelope(json!({
            "success": true,
            "quotes": [
                { "id": "ok", "carrier": "OtherLine", "basePrice": 1800.0, "transitDays": 31 },
                { "carrier": "NoPriceLine" },
                "garbage"
            ]
        }))
        .unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].id, "ok");
    }

    #[test]
    fn negative_base_price_is_dropped() {
        let quotes = parse_envelope(json!({
            "success": true,
            "quotes": [
                { "id": "bad", "carrier": "RefundLine", "basePrice": -50.0, "transitDays": 10 }
            ]
        }))
        .unwrap();
        assert!(quotes.is_empty());
    }

    #[test]
    fn parsed_batch_prices_end_to_end() {
        let quotes = parse_envelope(lane_payload()).unwrap();
        let priced = pricing::price_quotes(
            &quotes,
            &ServiceSelection {
                include_customs: true,
                ..Default::default()
            },
        );
        assert_eq!(priced[0].final_price, 3940.0);
        assert_eq!(priced[1].final_price, 3660.0);
    }

    #[tokio::test]
    async fn fetch_rates_is_fail_soft_on_connection_errors() {
        // Discard port: nothing listens there, the connect fails fast.
        let client = RatesClient::with_base_url("http://127.0.0.1:9/").unwrap();
        let request = RateRequest {
            origin: "CNSHA".to_string(),
            destination: "SARKD".to_string(),
            container_type: "40HC".to_string(),
        };
        assert!(client.try_fetch(&request).await.is_err());
        assert!(client.fetch_rates(&request).await.is_empty());
    }

    #[test]
    fn rejects_unparseable_base_url() {
        assert!(matches!(
            RatesClient::with_base_url("not a url"),
            Err(RatesClientError::InvalidUrl(_))
        ));
    }
}
