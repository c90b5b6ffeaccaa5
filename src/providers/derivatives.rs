//! Derivatives market provider
//!
//! Binance USD-M futures public endpoints: premium index (current funding
//! rate), open interest, global long/short account ratio, and funding-rate
//! history for the 24-period average.

use serde::Deserialize;

use super::{get_json, round2, round4};
use crate::config::Config;
use crate::error::{DashboardError, Result};
use crate::types::{BiasSignal, DerivativesSnapshot, FundingSignal, ProviderKind};

const PROVIDER: ProviderKind = ProviderKind::Derivatives;

/// Raw premium index payload
#[allow(dead_code)] // Fields available for future use
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumIndex {
    /// Funding rate as a decimal fraction, serialized as a string
    pub last_funding_rate: String,
    pub mark_price: String,
}

/// Raw open interest payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenInterest {
    pub open_interest: String,
}

/// One entry of the global long/short account ratio history
#[allow(dead_code)] // Fields available for future use
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LongShortEntry {
    /// Fraction of accounts positioned long, e.g. "0.5562"
    pub long_account: String,
    pub short_account: String,
}

/// One entry of the funding-rate history
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingRateEntry {
    pub funding_rate: String,
}

/// Derivatives API client
pub struct DerivativesClient {
    base: String,
    symbol: String,
}

impl DerivativesClient {
    pub fn new(config: &Config) -> Self {
        Self {
            base: config.derivatives_api_base.clone(),
            symbol: config.symbol.clone(),
        }
    }

    /// Fetch and normalize the derivatives snapshot
    pub async fn fetch(&self) -> Result<DerivativesSnapshot> {
        let premium: PremiumIndex = get_json(
            &format!("{}/fapi/v1/premiumIndex?symbol={}", self.base, self.symbol),
            PROVIDER,
        )
        .await?;
        let open_interest: OpenInterest = get_json(
            &format!("{}/fapi/v1/openInterest?symbol={}", self.base, self.symbol),
            PROVIDER,
        )
        .await?;
        let ratio: Vec<LongShortEntry> = get_json(
            &format!(
                "{}/futures/data/globalLongShortAccountRatio?symbol={}&period=1h&limit=1",
                self.base, self.symbol
            ),
            PROVIDER,
        )
        .await?;
        let history: Vec<FundingRateEntry> = get_json(
            &format!("{}/fapi/v1/fundingRate?symbol={}&limit=24", self.base, self.symbol),
            PROVIDER,
        )
        .await?;

        normalize(&premium, &open_interest, ratio.first(), &history)
    }

    /// Hardcoded demo record substituted before the first successful fetch
    pub fn fallback() -> DerivativesSnapshot {
        DerivativesSnapshot {
            funding_rate_pct: 0.01,
            funding_signal: FundingSignal::Neutral,
            funding_avg_pct: 0.0085,
            open_interest: 88_400.0,
            long_ratio_pct: 52.0,
            positioning: BiasSignal::Neutral,
        }
    }
}

/// Map raw payloads into the normalized snapshot
///
/// The funding rate is the load-bearing field; a malformed value fails the
/// whole provider. Secondary fields degrade to neutral defaults.
pub fn normalize(
    premium: &PremiumIndex,
    open_interest: &OpenInterest,
    ratio: Option<&LongShortEntry>,
    history: &[FundingRateEntry],
) -> Result<DerivativesSnapshot> {
    let rate: f64 = premium
        .last_funding_rate
        .parse()
        .map_err(|_| DashboardError::provider(PROVIDER, "invalid funding rate"))?;
    let funding_rate_pct = round4(rate * 100.0);

    let funding_avg_pct = if history.is_empty() {
        funding_rate_pct
    } else {
        let sum: f64 = history
            .iter()
            .filter_map(|e| e.funding_rate.parse::<f64>().ok())
            .sum();
        round4(sum / history.len() as f64 * 100.0)
    };

    let long_ratio_pct = ratio
        .and_then(|e| e.long_account.parse::<f64>().ok())
        .map_or(50.0, |v| round2(v * 100.0));

    Ok(DerivativesSnapshot {
        funding_rate_pct,
        funding_signal: FundingSignal::from_rate_pct(funding_rate_pct),
        funding_avg_pct,
        open_interest: open_interest.open_interest.parse().unwrap_or(0.0),
        long_ratio_pct,
        positioning: BiasSignal::from_long_ratio_pct(long_ratio_pct),
    })
}
