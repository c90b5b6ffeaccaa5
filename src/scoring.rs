//! Decision scoring
//!
//! Pure functions mapping the latest aggregate into one bounded score per
//! trading horizon. Each starts from the neutral 50 baseline, applies
//! ordered band adjustments per indicator, clamps to [0,100], and maps the
//! result to a categorical signal through per-horizon bands.
//!
//! Indicator inputs arrive as `Option<f64>`; a missing input (provider on
//! fallback data) contributes the neutral 0 adjustment.

use serde::{Deserialize, Serialize};

use crate::types::AggregateState;

/// Neutral starting point for every horizon
const NEUTRAL_BASELINE: i32 = 50;

/// Trading timeframe a score targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Horizon {
    Day,
    Swing,
    Hodl,
}

impl Horizon {
    /// Signal bands, highest score floor first
    fn signal_bands(self) -> [(u8, Signal); 5] {
        match self {
            Horizon::Day => [
                (75, Signal::Akumuluj),
                (60, Signal::HoldPlus),
                (45, Signal::Hold),
                (30, Signal::Ostroznie),
                (0, Signal::Redukuj),
            ],
            Horizon::Swing => [
                (72, Signal::Akumuluj),
                (58, Signal::HoldPlus),
                (42, Signal::Hold),
                (28, Signal::Ostroznie),
                (0, Signal::Redukuj),
            ],
            Horizon::Hodl => [
                (70, Signal::Akumuluj),
                (55, Signal::HoldPlus),
                (40, Signal::Hold),
                (25, Signal::Ostroznie),
                (0, Signal::Redukuj),
            ],
        }
    }
}

impl std::fmt::Display for Horizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Horizon::Day => write!(f, "day"),
            Horizon::Swing => write!(f, "swing"),
            Horizon::Hodl => write!(f, "hodl"),
        }
    }
}

/// Categorical decision signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    #[serde(rename = "AKUMULUJ")]
    Akumuluj,
    #[serde(rename = "HOLD+")]
    HoldPlus,
    #[serde(rename = "HOLD")]
    Hold,
    #[serde(rename = "OSTROŻNIE")]
    Ostroznie,
    #[serde(rename = "REDUKUJ")]
    Redukuj,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::Akumuluj => write!(f, "AKUMULUJ"),
            Signal::HoldPlus => write!(f, "HOLD+"),
            Signal::Hold => write!(f, "HOLD"),
            Signal::Ostroznie => write!(f, "OSTROŻNIE"),
            Signal::Redukuj => write!(f, "REDUKUJ"),
        }
    }
}

/// Bounded score with its derived signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Integer in [0,100]
    pub value: u8,
    pub signal: Signal,
}

impl Score {
    fn new(horizon: Horizon, raw: i32) -> Self {
        let value = raw.clamp(0, 100) as u8;
        let signal = horizon
            .signal_bands()
            .iter()
            .find(|(floor, _)| value >= *floor)
            .map_or(Signal::Redukuj, |(_, signal)| *signal);
        Score { value, signal }
    }
}

/// One adjustment band; applies to values at or above `lower`, until the
/// next band's floor takes over
struct Band {
    lower: f64,
    adjustment: i32,
}

const fn band(lower: f64, adjustment: i32) -> Band {
    Band { lower, adjustment }
}

/// Ordered lookup-and-sum: the last band whose floor the value reaches wins
fn band_adjustment(bands: &[Band], value: Option<f64>) -> i32 {
    let Some(v) = value else { return 0 };
    let mut adjustment = 0;
    for b in bands {
        if v >= b.lower {
            adjustment = b.adjustment;
        } else {
            break;
        }
    }
    adjustment
}

const NEG: f64 = f64::NEG_INFINITY;

// Day horizon (hours-days): sentiment is contrarian, funding and momentum
// dominate, volume confirms.
const DAY_SENTIMENT: &[Band] = &[
    band(NEG, 10),
    band(20.0, 5),
    band(35.0, 0),
    band(65.0, -5),
    band(80.0, -10),
];
const DAY_FUNDING: &[Band] = &[
    band(NEG, 8),
    band(-0.05, 4),
    band(-0.01, 0),
    band(0.02, -4),
    band(0.05, -8),
];
const DAY_MOMENTUM: &[Band] = &[
    band(NEG, -10),
    band(-5.0, -5),
    band(-2.0, 0),
    band(2.0, 5),
    band(5.0, 10),
];
const DAY_VOLUME: &[Band] = &[band(NEG, 0), band(100e9, 5)];

// Swing horizon (weeks): DeFi flows carry more weight, positioning is
// contrarian.
const SWING_SENTIMENT: &[Band] = &[
    band(NEG, 12),
    band(25.0, 6),
    band(45.0, 0),
    band(65.0, -6),
    band(80.0, -12),
];
const SWING_TVL: &[Band] = &[
    band(NEG, -8),
    band(-5.0, -4),
    band(-1.0, 0),
    band(2.0, 4),
    band(5.0, 8),
    band(10.0, 12),
];
const SWING_MOMENTUM: &[Band] = &[
    band(NEG, -6),
    band(-5.0, -3),
    band(-2.0, 0),
    band(3.0, 3),
    band(6.0, 6),
];
const SWING_FUNDING: &[Band] = &[
    band(NEG, 5),
    band(-0.05, 2),
    band(-0.01, 0),
    band(0.05, -5),
];
const SWING_POSITIONING: &[Band] = &[band(NEG, 5), band(45.0, 0), band(55.0, -5)];

// Hodl horizon (months-years): liquidity conditions dominate, sentiment is
// a mild contrarian tilt.
const HODL_SENTIMENT: &[Band] = &[
    band(NEG, 8),
    band(25.0, 4),
    band(45.0, 0),
    band(70.0, -4),
    band(85.0, -8),
];
const HODL_STABLECOIN: &[Band] = &[
    band(NEG, -6),
    band(-2.0, 0),
    band(2.0, 6),
    band(5.0, 12),
];
const HODL_TVL: &[Band] = &[
    band(NEG, -5),
    band(-2.0, 0),
    band(2.0, 5),
    band(5.0, 10),
];
const HODL_M2: &[Band] = &[
    band(NEG, -10),
    band(0.0, 0),
    band(2.0, 6),
    band(5.0, 15),
];

/// Day-trading score: sentiment, funding rate, 24h momentum, 24h volume
pub fn day_trading_score(state: &AggregateState) -> Score {
    let raw = NEUTRAL_BASELINE
        + band_adjustment(DAY_SENTIMENT, state.sentiment_index())
        + band_adjustment(DAY_FUNDING, state.funding_rate_pct())
        + band_adjustment(DAY_MOMENTUM, state.price_change_24h())
        + band_adjustment(DAY_VOLUME, state.volume_24h_usd());
    Score::new(Horizon::Day, raw)
}

/// Swing score: sentiment, TVL flows, momentum, funding, crowd positioning
pub fn swing_score(state: &AggregateState) -> Score {
    let raw = NEUTRAL_BASELINE
        + band_adjustment(SWING_SENTIMENT, state.sentiment_index())
        + band_adjustment(SWING_TVL, state.tvl_change_30d_pct())
        + band_adjustment(SWING_MOMENTUM, state.price_change_24h())
        + band_adjustment(SWING_FUNDING, state.funding_rate_pct())
        + band_adjustment(SWING_POSITIONING, state.long_ratio_pct());
    Score::new(Horizon::Swing, raw)
}

/// Hodl score: sentiment, stablecoin supply, TVL flows, money-supply growth
pub fn hodl_score(state: &AggregateState) -> Score {
    let raw = NEUTRAL_BASELINE
        + band_adjustment(HODL_SENTIMENT, state.sentiment_index())
        + band_adjustment(HODL_STABLECOIN, state.stablecoin_change_30d_pct())
        + band_adjustment(HODL_TVL, state.tvl_change_30d_pct())
        + band_adjustment(HODL_M2, state.m2_yoy_change_pct());
    Score::new(Horizon::Hodl, raw)
}

/// All three horizon scores for one aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub day: Score,
    pub swing: Score,
    pub hodl: Score,
}

pub fn all_scores(state: &AggregateState) -> ScoreSet {
    ScoreSet {
        day: day_trading_score(state),
        swing: swing_score(state),
        hodl: hodl_score(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        AggregateState, BiasSignal, DefiSnapshot, DerivativesSnapshot, FundingSignal, Liveness,
        MacroSnapshot, MacroTrend, MarketSnapshot, SourceStatus,
    };

    /// All providers live, every indicator inside its neutral band
    fn neutral_state() -> AggregateState {
        AggregateState {
            market: MarketSnapshot {
                price_usd: 108_000.0,
                change_24h: 0.0,
                market_cap_usd: 2.15e12,
                total_market_cap_usd: 3.9e12,
                volume_24h_usd: 50e9,
                fear_greed: 50,
                fear_greed_label: "Neutral".to_string(),
            },
            derivatives: DerivativesSnapshot {
                funding_rate_pct: 0.0,
                funding_signal: FundingSignal::Neutral,
                funding_avg_pct: 0.0,
                open_interest: 88_000.0,
                long_ratio_pct: 50.0,
                positioning: BiasSignal::Neutral,
            },
            defi: DefiSnapshot {
                tvl_usd: 118e9,
                tvl_change_30d_pct: 0.0,
                stablecoin_supply_usd: 252e9,
                stablecoin_change_30d_pct: 0.0,
                top_protocols: vec![],
            },
            macro_feed: MacroSnapshot {
                m2_supply_usd: 21.9e12,
                m2_yoy_change_pct: 1.0,
                trend: MacroTrend::Expanding,
            },
            liveness: Liveness {
                market: SourceStatus::Live,
                derivatives: SourceStatus::Live,
                defi: SourceStatus::Live,
                macro_feed: SourceStatus::Live,
            },
        }
    }

    #[test]
    fn test_neutral_state_scores_fifty_everywhere() {
        let state = neutral_state();
        assert_eq!(day_trading_score(&state).value, 50);
        assert_eq!(swing_score(&state).value, 50);
        assert_eq!(hodl_score(&state).value, 50);
    }

    #[test]
    fn test_day_score_mixed_session() {
        // Mild greed cancels against positive momentum; volume below the
        // $100B confirmation floor adds nothing.
        let mut state = neutral_state();
        state.market.fear_greed = 65;
        state.derivatives.funding_rate_pct = 0.012;
        state.market.change_24h = 2.3;
        state.market.volume_24h_usd = 85e9;

        let score = day_trading_score(&state);
        assert_eq!(score.value, 50);
        assert_eq!(score.signal, Signal::Hold);
    }

    #[test]
    fn test_day_score_volume_confirmation() {
        let mut state = neutral_state();
        state.market.fear_greed = 65;
        state.derivatives.funding_rate_pct = 0.012;
        state.market.change_24h = 2.3;
        state.market.volume_24h_usd = 120e9;

        assert_eq!(day_trading_score(&state).value, 55);
    }

    #[test]
    fn test_hodl_score_accumulation_regime() {
        // Extreme fear with expanding liquidity on every front
        let mut state = neutral_state();
        state.market.fear_greed = 20;
        state.defi.tvl_change_30d_pct = 6.0;
        state.defi.stablecoin_change_30d_pct = 6.0;
        state.macro_feed.m2_yoy_change_pct = 6.0;

        let score = hodl_score(&state);
        // 50 +8 +12 +10 +15
        assert_eq!(score.value, 95);
        assert_eq!(score.signal, Signal::Akumuluj);
    }

    #[test]
    fn test_scores_clamped_to_bounds() {
        let mut euphoric = neutral_state();
        euphoric.market.fear_greed = 95;
        euphoric.derivatives.funding_rate_pct = 0.3;
        euphoric.market.change_24h = -8.0;
        euphoric.defi.tvl_change_30d_pct = -12.0;
        euphoric.defi.stablecoin_change_30d_pct = -9.0;
        euphoric.macro_feed.m2_yoy_change_pct = -3.0;
        euphoric.derivatives.long_ratio_pct = 70.0;

        for score in [
            day_trading_score(&euphoric),
            swing_score(&euphoric),
            hodl_score(&euphoric),
        ] {
            assert!(score.value <= 100);
        }
        // Hodl bottoms out: 50 -8 -6 -5 -10 = 21
        assert_eq!(hodl_score(&euphoric).value, 21);
        assert_eq!(hodl_score(&euphoric).signal, Signal::Redukuj);

        let mut capitulation = neutral_state();
        capitulation.market.fear_greed = 5;
        capitulation.derivatives.funding_rate_pct = -0.2;
        capitulation.market.change_24h = 9.0;
        capitulation.market.volume_24h_usd = 150e9;
        capitulation.defi.tvl_change_30d_pct = 15.0;
        capitulation.defi.stablecoin_change_30d_pct = 8.0;
        capitulation.macro_feed.m2_yoy_change_pct = 7.0;
        capitulation.derivatives.long_ratio_pct = 30.0;

        // Swing: 50 +12 +12 +6 +5 +5 = 90; hodl reaches its table maximum
        assert_eq!(swing_score(&capitulation).value, 90);
        assert_eq!(hodl_score(&capitulation).value, 95);
        assert!(day_trading_score(&capitulation).value <= 100);
    }

    #[test]
    fn test_idempotence() {
        let mut state = neutral_state();
        state.market.fear_greed = 72;
        state.defi.tvl_change_30d_pct = 3.5;

        let first = all_scores(&state);
        let second = all_scores(&state);
        assert_eq!(first, second);
    }

    #[test]
    fn test_swing_monotone_in_tvl_change() {
        let mut previous = 0;
        for tenths in -200..=200 {
            let mut state = neutral_state();
            state.defi.tvl_change_30d_pct = f64::from(tenths) / 10.0;
            let value = swing_score(&state).value;
            if tenths > -200 {
                assert!(
                    value >= previous,
                    "swing score dropped at tvl change {}",
                    f64::from(tenths) / 10.0
                );
            }
            previous = value;
        }
    }

    #[test]
    fn test_missing_derivatives_term_is_neutral() {
        // Funding would subtract heavily if it were scored
        let mut state = neutral_state();
        state.derivatives.funding_rate_pct = 0.4;
        state.liveness.derivatives = SourceStatus::Fallback;

        assert_eq!(day_trading_score(&state).value, 50);
        assert_eq!(swing_score(&state).value, 50);
    }

    #[test]
    fn test_signal_bands_differ_per_horizon() {
        let mut state = neutral_state();
        state.market.fear_greed = 10;
        state.defi.tvl_change_30d_pct = 4.0;
        state.market.change_24h = 3.5;

        // Swing: 50 +12 +4 +3 = 69 -> HOLD+
        let swing = swing_score(&state);
        assert_eq!(swing.value, 69);
        assert_eq!(swing.signal, Signal::HoldPlus);

        // Day: 50 +10 +5 = 65 -> HOLD+
        let day = day_trading_score(&state);
        assert_eq!(day.value, 65);
        assert_eq!(day.signal, Signal::HoldPlus);

        // Hodl: 50 +8 +5 = 63 -> HOLD+
        let hodl = hodl_score(&state);
        assert_eq!(hodl.value, 63);
        assert_eq!(hodl.signal, Signal::HoldPlus);
    }

    #[test]
    fn test_signal_serialization_uses_display_labels() {
        let json = serde_json::to_string(&Signal::Ostroznie).expect("signal should serialize");
        assert_eq!(json, "\"OSTROŻNIE\"");
        let back: Signal = serde_json::from_str(&json).expect("signal should deserialize");
        assert_eq!(back, Signal::Ostroznie);
    }
}
