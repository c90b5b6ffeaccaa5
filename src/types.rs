//! Common types for the aggregation pipeline
//!
//! All shared data structures used across modules. Snapshots are plain
//! value records, fully replaced on each successful fetch; none are merged.

use serde::{Deserialize, Serialize};

/// Identity of an upstream market-data provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Market,
    Derivatives,
    Defi,
    Macro,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Market => write!(f, "market"),
            ProviderKind::Derivatives => write!(f, "derivatives"),
            ProviderKind::Defi => write!(f, "defi"),
            ProviderKind::Macro => write!(f, "macro"),
        }
    }
}

/// Freshness of one provider's snapshot
///
/// `Live` - the most recent fetch succeeded.
/// `Stale` - the last fetch failed, a prior snapshot is retained.
/// `Fallback` - no fetch has ever succeeded, hardcoded demo data substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    Live,
    Stale,
    Fallback,
}

impl SourceStatus {
    /// Whether the snapshot carries real (possibly stale) provider data
    pub fn has_real_data(self) -> bool {
        !matches!(self, SourceStatus::Fallback)
    }
}

/// Spot price and sentiment snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Spot price in USD, rounded to the nearest unit
    pub price_usd: f64,
    /// 24h change in percent, 2 decimals
    pub change_24h: f64,
    pub market_cap_usd: f64,
    pub total_market_cap_usd: f64,
    pub volume_24h_usd: f64,
    /// Fear & greed index, 0-100
    pub fear_greed: u8,
    pub fear_greed_label: String,
}

/// Funding-rate signal at the +-0.05% thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingSignal {
    Overbought,
    Oversold,
    Neutral,
}

impl FundingSignal {
    pub fn from_rate_pct(rate_pct: f64) -> Self {
        if rate_pct > 0.05 {
            FundingSignal::Overbought
        } else if rate_pct < -0.05 {
            FundingSignal::Oversold
        } else {
            FundingSignal::Neutral
        }
    }
}

/// Crowd-positioning signal from the long-account ratio (55%/45% thresholds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasSignal {
    Bullish,
    Bearish,
    Neutral,
}

impl BiasSignal {
    pub fn from_long_ratio_pct(long_pct: f64) -> Self {
        if long_pct > 55.0 {
            BiasSignal::Bullish
        } else if long_pct < 45.0 {
            BiasSignal::Bearish
        } else {
            BiasSignal::Neutral
        }
    }
}

/// Derivatives market snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivativesSnapshot {
    /// Current funding rate in percent, 4 decimals
    pub funding_rate_pct: f64,
    pub funding_signal: FundingSignal,
    /// Average over the last 24 funding periods, percent
    pub funding_avg_pct: f64,
    /// Open interest in base units
    pub open_interest: f64,
    /// Share of accounts positioned long, percent
    pub long_ratio_pct: f64,
    pub positioning: BiasSignal,
}

/// One protocol entry in the top-by-TVL listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolTvl {
    pub name: String,
    pub tvl_usd: f64,
}

/// DeFi analytics snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefiSnapshot {
    pub tvl_usd: f64,
    pub tvl_change_30d_pct: f64,
    pub stablecoin_supply_usd: f64,
    pub stablecoin_change_30d_pct: f64,
    /// Top protocols by locked value, largest first
    pub top_protocols: Vec<ProtocolTvl>,
}

/// Binary money-supply trend label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacroTrend {
    Expanding,
    Contracting,
}

/// Macro money-supply snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroSnapshot {
    pub m2_supply_usd: f64,
    pub m2_yoy_change_pct: f64,
    pub trend: MacroTrend,
}

/// Per-provider freshness flags for one aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Liveness {
    pub market: SourceStatus,
    pub derivatives: SourceStatus,
    pub defi: SourceStatus,
    pub macro_feed: SourceStatus,
}

impl Liveness {
    pub fn all_fallback() -> Self {
        Self {
            market: SourceStatus::Fallback,
            derivatives: SourceStatus::Fallback,
            defi: SourceStatus::Fallback,
            macro_feed: SourceStatus::Fallback,
        }
    }
}

/// Union of the four latest provider snapshots
///
/// Recreated on every refresh cycle. No cross-provider invariant is
/// enforced; each snapshot stands alone. The accessor methods expose
/// scoring inputs as `Option<f64>`: `None` while the backing provider is
/// still on fallback data, so score functions degrade to their neutral
/// term instead of scoring demo values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateState {
    pub market: MarketSnapshot,
    pub derivatives: DerivativesSnapshot,
    pub defi: DefiSnapshot,
    pub macro_feed: MacroSnapshot,
    pub liveness: Liveness,
}

impl AggregateState {
    pub fn sentiment_index(&self) -> Option<f64> {
        self.liveness
            .market
            .has_real_data()
            .then_some(f64::from(self.market.fear_greed))
    }

    pub fn price_change_24h(&self) -> Option<f64> {
        self.liveness
            .market
            .has_real_data()
            .then_some(self.market.change_24h)
    }

    pub fn volume_24h_usd(&self) -> Option<f64> {
        self.liveness
            .market
            .has_real_data()
            .then_some(self.market.volume_24h_usd)
    }

    pub fn funding_rate_pct(&self) -> Option<f64> {
        self.liveness
            .derivatives
            .has_real_data()
            .then_some(self.derivatives.funding_rate_pct)
    }

    pub fn long_ratio_pct(&self) -> Option<f64> {
        self.liveness
            .derivatives
            .has_real_data()
            .then_some(self.derivatives.long_ratio_pct)
    }

    pub fn tvl_change_30d_pct(&self) -> Option<f64> {
        self.liveness
            .defi
            .has_real_data()
            .then_some(self.defi.tvl_change_30d_pct)
    }

    pub fn stablecoin_change_30d_pct(&self) -> Option<f64> {
        self.liveness
            .defi
            .has_real_data()
            .then_some(self.defi.stablecoin_change_30d_pct)
    }

    pub fn m2_yoy_change_pct(&self) -> Option<f64> {
        self.liveness
            .macro_feed
            .has_real_data()
            .then_some(self.macro_feed.m2_yoy_change_pct)
    }
}

/// Per-cycle outcome for one provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderOutcome {
    pub provider: ProviderKind,
    pub status: SourceStatus,
    /// Failure detail when the fetch did not succeed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Result of one refresh cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshSummary {
    pub cycle_id: String,
    pub started_at: String,
    pub elapsed_ms: u64,
    pub outcomes: Vec<ProviderOutcome>,
}

impl RefreshSummary {
    /// Number of providers that fetched live this cycle
    pub fn live_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == SourceStatus::Live)
            .count()
    }
}

/// Persistent dashboard state stored in KV
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardStateData {
    /// Latest aggregate, if any cycle has run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<AggregateState>,

    /// Last refresh cycle timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_refresh: Option<String>,

    /// Total refresh cycles executed
    pub total_refreshes: u64,

    /// Consecutive cycles in which no provider fetched live
    pub consecutive_failures: u32,
}

impl DashboardStateData {
    /// Record a finished cycle, resetting or bumping the failure counter
    pub fn record_cycle(&mut self, summary: &RefreshSummary) {
        self.total_refreshes += 1;
        self.last_refresh = Some(summary.started_at.clone());
        if summary.live_count() > 0 {
            self.consecutive_failures = 0;
        } else {
            self.consecutive_failures += 1;
        }
    }
}
