//! Configuration management for the dashboard worker

use crate::error::{DashboardError, Result};
use worker::Env;

/// Dashboard worker configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment (production, staging, development)
    pub environment: String,

    /// Log level
    pub log_level: String,

    /// Refresh cadence in seconds; the cron trigger fires at the same rate
    pub refresh_interval_seconds: u64,

    /// Asset identifiers
    pub coin_id: String,     // CoinGecko id, e.g. "bitcoin"
    pub symbol: String,      // futures symbol, e.g. "BTCUSDT"

    /// Provider base URLs (overridable for staging/tests)
    pub spot_api_base: String,
    pub sentiment_api_base: String,
    pub derivatives_api_base: String,
    pub defi_api_base: String,
    pub stablecoins_api_base: String,

    /// Number of top protocols to keep in the DeFi snapshot
    pub top_protocol_count: usize,
}

impl Config {
    /// Load configuration from Cloudflare environment variables
    pub fn from_env(env: &Env) -> Result<Self> {
        Ok(Self {
            environment: env
                .var("ENVIRONMENT")
                .map_or_else(|_| "production".to_string(), |v| v.to_string()),

            log_level: env
                .var("LOG_LEVEL")
                .map_or_else(|_| "info".to_string(), |v| v.to_string()),

            refresh_interval_seconds: env
                .var("REFRESH_INTERVAL_SECONDS")
                .map(|v| v.to_string().parse().unwrap_or(60))
                .unwrap_or(60),

            coin_id: env
                .var("COIN_ID")
                .map_or_else(|_| "bitcoin".to_string(), |v| v.to_string()),

            symbol: env
                .var("SYMBOL")
                .map_or_else(|_| "BTCUSDT".to_string(), |v| v.to_string()),

            spot_api_base: env
                .var("SPOT_API_BASE")
                .map_or_else(|_| "https://api.coingecko.com".to_string(), |v| v.to_string()),

            sentiment_api_base: env
                .var("SENTIMENT_API_BASE")
                .map_or_else(|_| "https://api.alternative.me".to_string(), |v| v.to_string()),

            derivatives_api_base: env
                .var("DERIVATIVES_API_BASE")
                .map_or_else(|_| "https://fapi.binance.com".to_string(), |v| v.to_string()),

            defi_api_base: env
                .var("DEFI_API_BASE")
                .map_or_else(|_| "https://api.llama.fi".to_string(), |v| v.to_string()),

            stablecoins_api_base: env
                .var("STABLECOINS_API_BASE")
                .map_or_else(|_| "https://stablecoins.llama.fi".to_string(), |v| v.to_string()),

            top_protocol_count: env
                .var("TOP_PROTOCOL_COUNT")
                .map(|v| v.to_string().parse().unwrap_or(5))
                .unwrap_or(5),
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.refresh_interval_seconds < 10 {
            return Err(DashboardError::Config(
                "refresh_interval_seconds must be at least 10".into(),
            ));
        }
        if self.coin_id.is_empty() || self.symbol.is_empty() {
            return Err(DashboardError::Config("coin_id and symbol required".into()));
        }
        if self.top_protocol_count == 0 || self.top_protocol_count > 20 {
            return Err(DashboardError::Config(
                "top_protocol_count must be 1-20".into(),
            ));
        }
        for base in [
            &self.spot_api_base,
            &self.sentiment_api_base,
            &self.derivatives_api_base,
            &self.defi_api_base,
            &self.stablecoins_api_base,
        ] {
            if !base.starts_with("http") {
                return Err(DashboardError::Config(format!("invalid base URL: {base}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        environment: "test".to_string(),
        log_level: "debug".to_string(),
        refresh_interval_seconds: 60,
        coin_id: "bitcoin".to_string(),
        symbol: "BTCUSDT".to_string(),
        spot_api_base: "https://api.coingecko.com".to_string(),
        sentiment_api_base: "https://api.alternative.me".to_string(),
        derivatives_api_base: "https://fapi.binance.com".to_string(),
        defi_api_base: "https://api.llama.fi".to_string(),
        stablecoins_api_base: "https://stablecoins.llama.fi".to_string(),
        top_protocol_count: 5,
    }
}
