//! Provider clients
//!
//! One module per upstream provider. Each exposes a client struct with
//! `fetch() -> Result<Snapshot>` built from raw response structs plus a pure
//! `normalize` step, and a hardcoded `fallback()` demo record substituted
//! when a provider has never answered. All endpoints are read-only,
//! unauthenticated GETs.

pub mod defi;
pub mod derivatives;
pub mod macro_feed;
pub mod spot;

pub use defi::DefiClient;
pub use derivatives::DerivativesClient;
pub use macro_feed::MacroSource;
pub use spot::SpotClient;

use serde::de::DeserializeOwned;

use crate::error::{DashboardError, Result};
use crate::types::ProviderKind;

/// Perform a GET and decode the JSON body
///
/// Network errors, non-2xx statuses, and shape mismatches all collapse into
/// the provider-unavailable category; rate limiting keeps its own variant
/// for the Retry-After hint.
pub(crate) async fn get_json<T: DeserializeOwned>(url: &str, provider: ProviderKind) -> Result<T> {
    let response = reqwest::Client::new()
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| DashboardError::provider(provider, e.to_string()))?;

    let status = response.status();

    if status == 429 {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);
        return Err(DashboardError::RateLimit(retry_after));
    }

    if !status.is_success() {
        return Err(DashboardError::provider(provider, format!("HTTP {status}")));
    }

    response
        .json()
        .await
        .map_err(|e| DashboardError::provider(provider, format!("unexpected response shape: {e}")))
}

/// Round to 2 decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 4 decimal places
pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_precision() {
        assert_eq!(round2(2.345_678), 2.35);
        assert_eq!(round2(-1.004_9), -1.0);
        assert_eq!(round4(0.012_345), 0.0123);
        assert_eq!(round4(-0.000_05), -0.0001);
    }
}
