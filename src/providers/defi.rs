//! DeFi analytics provider
//!
//! DeFiLlama public endpoints: historical chain TVL (level + 30-day change),
//! the stablecoins listing (aggregate supply + 30-day change), and the
//! protocols listing for the top-N table.

use serde::Deserialize;

use super::{get_json, round2};
use crate::config::Config;
use crate::error::{DashboardError, Result};
use crate::types::{DefiSnapshot, ProtocolTvl, ProviderKind};

const PROVIDER: ProviderKind = ProviderKind::Defi;

/// One daily point of the historical chain TVL series
#[allow(dead_code)] // Fields available for future use
#[derive(Debug, Clone, Deserialize)]
pub struct TvlPoint {
    pub date: i64,
    pub tvl: f64,
}

/// Raw stablecoins listing
#[derive(Debug, Deserialize)]
pub struct StablecoinsResponse {
    #[serde(rename = "peggedAssets")]
    pub pegged_assets: Vec<StablecoinAsset>,
}

#[allow(dead_code)] // Fields available for future use
#[derive(Debug, Deserialize)]
pub struct StablecoinAsset {
    pub name: String,
    pub circulating: Option<PeggedAmount>,
    #[serde(rename = "circulatingPrevMonth")]
    pub circulating_prev_month: Option<PeggedAmount>,
}

#[derive(Debug, Deserialize)]
pub struct PeggedAmount {
    #[serde(rename = "peggedUSD")]
    pub pegged_usd: Option<f64>,
}

/// One protocol from the listing; TVL may be null for deprecated entries
#[derive(Debug, Deserialize)]
pub struct ProtocolEntry {
    pub name: String,
    pub tvl: Option<f64>,
}

/// DeFi analytics API client
pub struct DefiClient {
    base: String,
    stablecoins_base: String,
    top_count: usize,
}

impl DefiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            base: config.defi_api_base.clone(),
            stablecoins_base: config.stablecoins_api_base.clone(),
            top_count: config.top_protocol_count,
        }
    }

    /// Fetch and normalize the DeFi snapshot
    pub async fn fetch(&self) -> Result<DefiSnapshot> {
        let tvl_url = format!("{}/v2/historicalChainTvl", self.base);
        let history: Vec<TvlPoint> = get_json(&tvl_url, PROVIDER).await?;

        let stablecoins_url = format!("{}/stablecoins?includePrices=false", self.stablecoins_base);
        let stablecoins: StablecoinsResponse = get_json(&stablecoins_url, PROVIDER).await?;

        let protocols_url = format!("{}/protocols", self.base);
        let protocols: Vec<ProtocolEntry> = get_json(&protocols_url, PROVIDER).await?;

        normalize(&history, &stablecoins, protocols, self.top_count)
    }

    /// Hardcoded demo record substituted before the first successful fetch
    pub fn fallback() -> DefiSnapshot {
        DefiSnapshot {
            tvl_usd: 118e9,
            tvl_change_30d_pct: 2.4,
            stablecoin_supply_usd: 252e9,
            stablecoin_change_30d_pct: 1.1,
            top_protocols: vec![
                ProtocolTvl { name: "AAVE".to_string(), tvl_usd: 25.3e9 },
                ProtocolTvl { name: "Lido".to_string(), tvl_usd: 22.8e9 },
                ProtocolTvl { name: "EigenLayer".to_string(), tvl_usd: 12.1e9 },
                ProtocolTvl { name: "Sky".to_string(), tvl_usd: 8.6e9 },
                ProtocolTvl { name: "ether.fi".to_string(), tvl_usd: 8.2e9 },
            ],
        }
    }
}

/// Map raw payloads into the normalized snapshot
pub fn normalize(
    history: &[TvlPoint],
    stablecoins: &StablecoinsResponse,
    mut protocols: Vec<ProtocolEntry>,
    top_count: usize,
) -> Result<DefiSnapshot> {
    let latest = history
        .last()
        .ok_or_else(|| DashboardError::provider(PROVIDER, "empty TVL history"))?;
    // Daily series; the point 30 entries back approximates 30 days ago
    let prior = if history.len() > 30 {
        &history[history.len() - 31]
    } else {
        &history[0]
    };

    let supply_now: f64 = stablecoins
        .pegged_assets
        .iter()
        .filter_map(|a| a.circulating.as_ref().and_then(|c| c.pegged_usd))
        .sum();
    let supply_prev: f64 = stablecoins
        .pegged_assets
        .iter()
        .filter_map(|a| a.circulating_prev_month.as_ref().and_then(|c| c.pegged_usd))
        .sum();

    protocols.sort_by(|a, b| {
        b.tvl
            .unwrap_or(0.0)
            .total_cmp(&a.tvl.unwrap_or(0.0))
    });
    let top_protocols = protocols
        .into_iter()
        .take(top_count)
        .map(|p| ProtocolTvl {
            name: p.name,
            tvl_usd: p.tvl.unwrap_or(0.0),
        })
        .collect();

    Ok(DefiSnapshot {
        tvl_usd: latest.tvl,
        tvl_change_30d_pct: round2(percent_change(prior.tvl, latest.tvl)),
        stablecoin_supply_usd: supply_now,
        stablecoin_change_30d_pct: round2(percent_change(supply_prev, supply_now)),
        top_protocols,
    })
}

fn percent_change(prior: f64, current: f64) -> f64 {
    if prior > 0.0 {
        (current - prior) / prior * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STABLECOINS_FIXTURE: &str = r#"{
        "peggedAssets": [
            {
                "name": "Tether",
                "circulating": { "peggedUSD": 160000000000.0 },
                "circulatingPrevMonth": { "peggedUSD": 155000000000.0 }
            },
            {
                "name": "USDC",
                "circulating": { "peggedUSD": 64000000000.0 },
                "circulatingPrevMonth": { "peggedUSD": 62000000000.0 }
            },
            {
                "name": "Delisted",
                "circulating": null,
                "circulatingPrevMonth": null
            }
        ]
    }"#;

    const PROTOCOLS_FIXTURE: &str = r#"[
        { "name": "Lido", "tvl": 22800000000.0 },
        { "name": "AAVE", "tvl": 25300000000.0 },
        { "name": "Ghost", "tvl": null },
        { "name": "EigenLayer", "tvl": 12100000000.0 }
    ]"#;

    fn tvl_series(days: usize, start: f64, step: f64) -> Vec<TvlPoint> {
        (0..days)
            .map(|i| TvlPoint {
                date: 1_700_000_000 + i as i64 * 86_400,
                tvl: start + step * i as f64,
            })
            .collect()
    }

    fn parse_fixtures() -> (StablecoinsResponse, Vec<ProtocolEntry>) {
        (
            serde_json::from_str(STABLECOINS_FIXTURE).expect("stablecoins fixture should parse"),
            serde_json::from_str(PROTOCOLS_FIXTURE).expect("protocols fixture should parse"),
        )
    }

    #[test]
    fn test_normalize_round_trip() {
        let (stablecoins, protocols) = parse_fixtures();
        // 40 daily points ending at 100e9 + 39e9*step; prior point is 30 days back
        let history = tvl_series(40, 100e9, 0.5e9);
        let snapshot =
            normalize(&history, &stablecoins, protocols, 5).expect("normalize should succeed");

        assert_eq!(snapshot.tvl_usd, 100e9 + 39.0 * 0.5e9);
        // (119.5 - 104.5) / 104.5 = 14.35%
        assert_eq!(snapshot.tvl_change_30d_pct, 14.35);
        assert_eq!(snapshot.stablecoin_supply_usd, 224e9);
        // (224 - 217) / 217 = 3.23%
        assert_eq!(snapshot.stablecoin_change_30d_pct, 3.23);
    }

    #[test]
    fn test_top_protocols_sorted_and_capped() {
        let (stablecoins, protocols) = parse_fixtures();
        let history = tvl_series(5, 100e9, 0.0);
        let snapshot =
            normalize(&history, &stablecoins, protocols, 2).expect("normalize should succeed");

        assert_eq!(snapshot.top_protocols.len(), 2);
        assert_eq!(snapshot.top_protocols[0].name, "AAVE");
        assert_eq!(snapshot.top_protocols[1].name, "Lido");
    }

    #[test]
    fn test_short_history_uses_first_point() {
        let (stablecoins, protocols) = parse_fixtures();
        let history = tvl_series(10, 100e9, 1e9);
        let snapshot =
            normalize(&history, &stablecoins, protocols, 5).expect("normalize should succeed");
        // (109 - 100) / 100 = 9%
        assert_eq!(snapshot.tvl_change_30d_pct, 9.0);
    }

    #[test]
    fn test_empty_history_fails_provider() {
        let (stablecoins, protocols) = parse_fixtures();
        assert!(normalize(&[], &stablecoins, protocols, 5).is_err());
    }

    #[test]
    fn test_missing_prev_month_supply_gives_zero_change() {
        let stablecoins: StablecoinsResponse = serde_json::from_str(
            r#"{ "peggedAssets": [ { "name": "Tether", "circulating": { "peggedUSD": 1000.0 } } ] }"#,
        )
        .expect("fixture should parse");
        let history = tvl_series(5, 100e9, 0.0);
        let snapshot = normalize(&history, &stablecoins, vec![], 5).expect("normalize should succeed");
        assert_eq!(snapshot.stablecoin_change_30d_pct, 0.0);
    }
}
