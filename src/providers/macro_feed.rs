//! Macro money-supply feed
//!
//! No unauthenticated live M2 endpoint is integrated; this source serves a
//! cached data point, refreshed manually with releases. It always resolves
//! as live.

use crate::types::{MacroSnapshot, MacroTrend};

/// Cached US M2 level in USD
const M2_SUPPLY_USD: f64 = 21.94e12;
/// Cached year-over-year M2 change in percent
const M2_YOY_CHANGE_PCT: f64 = 4.3;

/// Static macro data source
pub struct MacroSource;

impl MacroSource {
    /// Latest cached data point
    pub fn latest() -> MacroSnapshot {
        snapshot_from(M2_SUPPLY_USD, M2_YOY_CHANGE_PCT)
    }
}

/// Build a snapshot with the trend label derived from the YoY change
pub fn snapshot_from(m2_supply_usd: f64, m2_yoy_change_pct: f64) -> MacroSnapshot {
    MacroSnapshot {
        m2_supply_usd,
        m2_yoy_change_pct,
        trend: if m2_yoy_change_pct >= 0.0 {
            MacroTrend::Expanding
        } else {
            MacroTrend::Contracting
        },
    }
}
