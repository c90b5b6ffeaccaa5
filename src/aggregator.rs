//! Refresh orchestration
//!
//! Coordinates the four provider clients into one refresh cycle: fetches
//! run concurrently, each independently isolated, and the results are
//! merged with the prior aggregate in a pure assembly step.

use chrono::Utc;

use crate::config::Config;
use crate::error::Result;
use crate::providers::{DefiClient, DerivativesClient, MacroSource, SpotClient};
use crate::types::{
    AggregateState, DefiSnapshot, DerivativesSnapshot, Liveness, MacroSnapshot, MarketSnapshot,
    ProviderKind, ProviderOutcome, RefreshSummary, SourceStatus,
};

/// Aggregation pipeline owning the provider clients
pub struct Aggregator {
    spot: SpotClient,
    derivatives: DerivativesClient,
    defi: DefiClient,
}

impl Aggregator {
    pub fn new(config: &Config) -> Self {
        Self {
            spot: SpotClient::new(config),
            derivatives: DerivativesClient::new(config),
            defi: DefiClient::new(config),
        }
    }

    /// Run one refresh cycle
    ///
    /// A failing or malformed response for one provider never prevents the
    /// others' results from being used and never propagates out of here:
    /// failures degrade that provider to its stale or fallback snapshot.
    pub async fn refresh(&self, prior: Option<&AggregateState>) -> (AggregateState, RefreshSummary) {
        let started = Utc::now();
        let cycle_id = uuid::Uuid::new_v4().to_string();

        let (market, derivatives, defi) = futures::join!(
            self.spot.fetch(),
            self.derivatives.fetch(),
            self.defi.fetch(),
        );
        // The macro feed serves a cached point and cannot fail
        let macro_feed = Ok(MacroSource::latest());

        let (state, outcomes) = assemble(
            prior,
            FetchResults {
                market,
                derivatives,
                defi,
                macro_feed,
            },
        );

        for outcome in &outcomes {
            if let Some(detail) = &outcome.detail {
                worker::console_warn!(
                    "[{}] {} degraded to {:?}: {}",
                    cycle_id,
                    outcome.provider,
                    outcome.status,
                    detail
                );
            }
        }

        let elapsed_ms = (Utc::now().timestamp_millis() - started.timestamp_millis()).max(0) as u64;
        let summary = RefreshSummary {
            cycle_id,
            started_at: started.to_rfc3339(),
            elapsed_ms,
            outcomes,
        };
        (state, summary)
    }
}

/// Aggregate served before any cycle has run
pub fn fallback_state() -> AggregateState {
    AggregateState {
        market: SpotClient::fallback(),
        derivatives: DerivativesClient::fallback(),
        defi: DefiClient::fallback(),
        macro_feed: MacroSource::latest(),
        liveness: Liveness {
            macro_feed: SourceStatus::Live,
            ..Liveness::all_fallback()
        },
    }
}

/// Raw per-provider results of one fetch phase
pub(crate) struct FetchResults {
    pub market: Result<MarketSnapshot>,
    pub derivatives: Result<DerivativesSnapshot>,
    pub defi: Result<DefiSnapshot>,
    pub macro_feed: Result<MacroSnapshot>,
}

/// Merge fetch results with the prior aggregate
///
/// Resolution per provider: a fresh fetch fully replaces the snapshot; a
/// failure keeps the prior snapshot as stale when one with real data
/// exists; otherwise the hardcoded fallback record is substituted.
pub(crate) fn assemble(
    prior: Option<&AggregateState>,
    results: FetchResults,
) -> (AggregateState, Vec<ProviderOutcome>) {
    let (market, market_status, market_detail) = resolve(
        prior.map(|p| (&p.market, p.liveness.market)),
        results.market,
        SpotClient::fallback,
    );
    let (derivatives, derivatives_status, derivatives_detail) = resolve(
        prior.map(|p| (&p.derivatives, p.liveness.derivatives)),
        results.derivatives,
        DerivativesClient::fallback,
    );
    let (defi, defi_status, defi_detail) = resolve(
        prior.map(|p| (&p.defi, p.liveness.defi)),
        results.defi,
        DefiClient::fallback,
    );
    let (macro_feed, macro_status, macro_detail) = resolve(
        prior.map(|p| (&p.macro_feed, p.liveness.macro_feed)),
        results.macro_feed,
        MacroSource::latest,
    );

    let state = AggregateState {
        market,
        derivatives,
        defi,
        macro_feed,
        liveness: Liveness {
            market: market_status,
            derivatives: derivatives_status,
            defi: defi_status,
            macro_feed: macro_status,
        },
    };
    let outcomes = vec![
        ProviderOutcome {
            provider: ProviderKind::Market,
            status: market_status,
            detail: market_detail,
        },
        ProviderOutcome {
            provider: ProviderKind::Derivatives,
            status: derivatives_status,
            detail: derivatives_detail,
        },
        ProviderOutcome {
            provider: ProviderKind::Defi,
            status: defi_status,
            detail: defi_detail,
        },
        ProviderOutcome {
            provider: ProviderKind::Macro,
            status: macro_status,
            detail: macro_detail,
        },
    ];
    (state, outcomes)
}

fn resolve<T: Clone>(
    prior: Option<(&T, SourceStatus)>,
    fetched: Result<T>,
    fallback: impl FnOnce() -> T,
) -> (T, SourceStatus, Option<String>) {
    match fetched {
        Ok(snapshot) => (snapshot, SourceStatus::Live, None),
        Err(err) => match prior {
            Some((snapshot, status)) if status.has_real_data() => {
                (snapshot.clone(), SourceStatus::Stale, Some(err.to_string()))
            }
            _ => (fallback(), SourceStatus::Fallback, Some(err.to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::scoring::day_trading_score;

    fn live_results() -> FetchResults {
        let mut market = SpotClient::fallback();
        market.fear_greed = 65;
        market.change_24h = 2.3;
        market.volume_24h_usd = 85e9;
        let mut derivatives = DerivativesClient::fallback();
        derivatives.funding_rate_pct = 0.012;
        FetchResults {
            market: Ok(market),
            derivatives: Ok(derivatives),
            defi: Ok(DefiClient::fallback()),
            macro_feed: Ok(MacroSource::latest()),
        }
    }

    fn unavailable(provider: ProviderKind) -> DashboardError {
        DashboardError::provider(provider, "HTTP 502 Bad Gateway")
    }

    #[test]
    fn test_all_live_assembly() {
        let (state, outcomes) = assemble(None, live_results());
        assert_eq!(state.liveness.market, SourceStatus::Live);
        assert_eq!(state.liveness.derivatives, SourceStatus::Live);
        assert_eq!(state.liveness.defi, SourceStatus::Live);
        assert_eq!(state.liveness.macro_feed, SourceStatus::Live);
        assert!(outcomes.iter().all(|o| o.detail.is_none()));
    }

    #[test]
    fn test_provider_failure_is_isolated() {
        let mut results = live_results();
        results.derivatives = Err(unavailable(ProviderKind::Derivatives));

        let (state, outcomes) = assemble(None, results);

        // The other three providers' data is intact
        assert_eq!(state.liveness.market, SourceStatus::Live);
        assert_eq!(state.liveness.defi, SourceStatus::Live);
        assert_eq!(state.liveness.macro_feed, SourceStatus::Live);
        assert_eq!(state.market.fear_greed, 65);

        // Derivatives degrade to the fallback record, flagged as such
        assert_eq!(state.liveness.derivatives, SourceStatus::Fallback);
        let outcome = &outcomes[1];
        assert_eq!(outcome.provider, ProviderKind::Derivatives);
        assert!(outcome.detail.as_deref().unwrap_or("").contains("502"));

        // The day score falls back to a neutral funding term: with
        // sentiment 65 (-5) and momentum 2.3 (+5) it lands back on 50
        assert_eq!(day_trading_score(&state).value, 50);
    }

    #[test]
    fn test_failure_after_success_retains_stale_snapshot() {
        let (first, _) = assemble(None, live_results());

        let mut results = live_results();
        results.market = Err(unavailable(ProviderKind::Market));
        let (second, _) = assemble(Some(&first), results);

        assert_eq!(second.liveness.market, SourceStatus::Stale);
        // Prior values retained unchanged
        assert_eq!(second.market, first.market);
        // Stale data still reaches the scorer
        assert_eq!(second.sentiment_index(), Some(65.0));
    }

    #[test]
    fn test_fallback_prior_does_not_masquerade_as_stale() {
        let mut results = live_results();
        results.defi = Err(unavailable(ProviderKind::Defi));
        let (first, _) = assemble(None, results);
        assert_eq!(first.liveness.defi, SourceStatus::Fallback);

        let mut results = live_results();
        results.defi = Err(unavailable(ProviderKind::Defi));
        let (second, _) = assemble(Some(&first), results);

        // A retained fallback record is still fallback, not stale
        assert_eq!(second.liveness.defi, SourceStatus::Fallback);
        assert_eq!(second.tvl_change_30d_pct(), None);
    }

    #[test]
    fn test_recovery_replaces_snapshot_fully() {
        let mut results = live_results();
        results.market = Err(unavailable(ProviderKind::Market));
        let (first, _) = assemble(None, results);

        let (second, _) = assemble(Some(&first), live_results());
        assert_eq!(second.liveness.market, SourceStatus::Live);
        assert_eq!(second.market.fear_greed, 65);
    }

    #[test]
    fn test_fallback_state_shape() {
        let state = fallback_state();
        assert_eq!(state.liveness.market, SourceStatus::Fallback);
        assert_eq!(state.liveness.macro_feed, SourceStatus::Live);
        // Scoring a fallback-only aggregate stays neutral apart from macro
        assert_eq!(day_trading_score(&state).value, 50);
    }
}
