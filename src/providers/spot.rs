//! Spot price and sentiment provider
//!
//! CoinGecko simple-price and global endpoints for price/market data plus
//! the alternative.me fear & greed index for sentiment. The three requests
//! succeed or fail as one provider.

use std::collections::HashMap;

use serde::Deserialize;

use super::{get_json, round2};
use crate::config::Config;
use crate::error::{DashboardError, Result};
use crate::types::{MarketSnapshot, ProviderKind};

const PROVIDER: ProviderKind = ProviderKind::Market;

/// Raw simple-price entry from CoinGecko
#[derive(Debug, Deserialize)]
pub struct SimplePriceEntry {
    pub usd: Option<f64>,
    pub usd_market_cap: Option<f64>,
    pub usd_24h_vol: Option<f64>,
    pub usd_24h_change: Option<f64>,
}

/// Raw global market data from CoinGecko
#[derive(Debug, Deserialize)]
pub struct GlobalResponse {
    pub data: GlobalData,
}

#[derive(Debug, Deserialize, Default)]
pub struct GlobalData {
    #[serde(default)]
    pub total_market_cap: HashMap<String, f64>,
}

/// Raw fear & greed payload from alternative.me
#[derive(Debug, Deserialize)]
pub struct FearGreedResponse {
    pub data: Vec<FearGreedEntry>,
}

#[derive(Debug, Deserialize)]
pub struct FearGreedEntry {
    /// Index value 0-100, serialized as a string by the API
    pub value: String,
    pub value_classification: String,
}

/// Spot/sentiment API client
pub struct SpotClient {
    spot_base: String,
    sentiment_base: String,
    coin_id: String,
}

impl SpotClient {
    pub fn new(config: &Config) -> Self {
        Self {
            spot_base: config.spot_api_base.clone(),
            sentiment_base: config.sentiment_api_base.clone(),
            coin_id: config.coin_id.clone(),
        }
    }

    /// Fetch and normalize the spot/sentiment snapshot
    pub async fn fetch(&self) -> Result<MarketSnapshot> {
        let price_url = format!(
            "{}/api/v3/simple/price?ids={}&vs_currencies=usd&include_market_cap=true&include_24hr_vol=true&include_24hr_change=true",
            self.spot_base, self.coin_id
        );
        let prices: HashMap<String, SimplePriceEntry> = get_json(&price_url, PROVIDER).await?;

        let global_url = format!("{}/api/v3/global", self.spot_base);
        let global: GlobalResponse = get_json(&global_url, PROVIDER).await?;

        let sentiment_url = format!("{}/fng/?limit=1", self.sentiment_base);
        let sentiment: FearGreedResponse = get_json(&sentiment_url, PROVIDER).await?;

        let entry = prices.get(&self.coin_id).ok_or_else(|| {
            DashboardError::provider(PROVIDER, format!("{} missing from price response", self.coin_id))
        })?;
        let fng = sentiment
            .data
            .first()
            .ok_or_else(|| DashboardError::provider(PROVIDER, "empty fear & greed payload"))?;

        normalize(entry, &global.data, fng)
    }

    /// Hardcoded demo record substituted before the first successful fetch
    pub fn fallback() -> MarketSnapshot {
        MarketSnapshot {
            price_usd: 108_250.0,
            change_24h: 1.25,
            market_cap_usd: 2.15e12,
            total_market_cap_usd: 3.9e12,
            volume_24h_usd: 42e9,
            fear_greed: 50,
            fear_greed_label: "Neutral".to_string(),
        }
    }
}

/// Map raw payloads into the normalized snapshot
pub fn normalize(
    entry: &SimplePriceEntry,
    global: &GlobalData,
    fng: &FearGreedEntry,
) -> Result<MarketSnapshot> {
    let price = entry
        .usd
        .ok_or_else(|| DashboardError::provider(PROVIDER, "missing usd price"))?;

    let fear_greed = fng.value.parse::<i64>().unwrap_or(50).clamp(0, 100) as u8;
    let fear_greed_label = if fng.value_classification.is_empty() {
        classify_sentiment(fear_greed).to_string()
    } else {
        fng.value_classification.clone()
    };

    Ok(MarketSnapshot {
        price_usd: price.round(),
        change_24h: round2(entry.usd_24h_change.unwrap_or(0.0)),
        market_cap_usd: entry.usd_market_cap.unwrap_or(0.0),
        total_market_cap_usd: global.total_market_cap.get("usd").copied().unwrap_or(0.0),
        volume_24h_usd: entry.usd_24h_vol.unwrap_or(0.0),
        fear_greed,
        fear_greed_label,
    })
}

/// Classification bands used when the provider omits the label
fn classify_sentiment(value: u8) -> &'static str {
    match value {
        0..=24 => "Extreme Fear",
        25..=44 => "Fear",
        45..=55 => "Neutral",
        56..=75 => "Greed",
        _ => "Extreme Greed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRICE_FIXTURE: &str = r#"{
        "bitcoin": {
            "usd": 108437.23,
            "usd_market_cap": 2152340000000.0,
            "usd_24h_vol": 48211000000.0,
            "usd_24h_change": 2.3456
        }
    }"#;

    const GLOBAL_FIXTURE: &str = r#"{
        "data": {
            "total_market_cap": { "usd": 3910000000000.0, "eur": 3350000000000.0 }
        }
    }"#;

    const FNG_FIXTURE: &str = r#"{
        "name": "Fear and Greed Index",
        "data": [
            { "value": "34", "value_classification": "Fear", "timestamp": "1754000000" }
        ]
    }"#;

    fn parse_fixtures() -> (SimplePriceEntry, GlobalData, FearGreedEntry) {
        let prices: HashMap<String, SimplePriceEntry> =
            serde_json::from_str(PRICE_FIXTURE).expect("price fixture should parse");
        let global: GlobalResponse =
            serde_json::from_str(GLOBAL_FIXTURE).expect("global fixture should parse");
        let fng: FearGreedResponse =
            serde_json::from_str(FNG_FIXTURE).expect("fng fixture should parse");
        (
            prices.into_iter().next().expect("one entry").1,
            global.data,
            fng.data.into_iter().next().expect("one entry"),
        )
    }

    #[test]
    fn test_normalize_round_trip() {
        let (entry, global, fng) = parse_fixtures();
        let snapshot = normalize(&entry, &global, &fng).expect("normalize should succeed");

        // Values survive normalization within the stated rounding precision
        assert_eq!(snapshot.price_usd, 108_437.0);
        assert_eq!(snapshot.change_24h, 2.35);
        assert_eq!(snapshot.market_cap_usd, 2.152_34e12);
        assert_eq!(snapshot.total_market_cap_usd, 3.91e12);
        assert_eq!(snapshot.volume_24h_usd, 4.8211e10);
        assert_eq!(snapshot.fear_greed, 34);
        assert_eq!(snapshot.fear_greed_label, "Fear");
    }

    #[test]
    fn test_normalize_requires_price() {
        let (_, global, fng) = parse_fixtures();
        let entry = SimplePriceEntry {
            usd: None,
            usd_market_cap: None,
            usd_24h_vol: None,
            usd_24h_change: None,
        };
        assert!(normalize(&entry, &global, &fng).is_err());
    }

    #[test]
    fn test_missing_label_is_classified() {
        let (entry, global, _) = parse_fixtures();
        let fng = FearGreedEntry {
            value: "12".to_string(),
            value_classification: String::new(),
        };
        let snapshot = normalize(&entry, &global, &fng).expect("normalize should succeed");
        assert_eq!(snapshot.fear_greed_label, "Extreme Fear");
    }

    #[test]
    fn test_unparsable_sentiment_defaults_to_neutral() {
        let (entry, global, _) = parse_fixtures();
        let fng = FearGreedEntry {
            value: "n/a".to_string(),
            value_classification: String::new(),
        };
        let snapshot = normalize(&entry, &global, &fng).expect("normalize should succeed");
        assert_eq!(snapshot.fear_greed, 50);
        assert_eq!(snapshot.fear_greed_label, "Neutral");
    }

    #[test]
    fn test_sentiment_classification_bands() {
        assert_eq!(classify_sentiment(0), "Extreme Fear");
        assert_eq!(classify_sentiment(25), "Fear");
        assert_eq!(classify_sentiment(50), "Neutral");
        assert_eq!(classify_sentiment(56), "Greed");
        assert_eq!(classify_sentiment(90), "Extreme Greed");
    }
}
