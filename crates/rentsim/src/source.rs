//! Market-data sources
//!
//! The orchestrator talks to a [`MarketDataSource`]; the HTTP implementation
//! calls the rentsim market-data service, the local one reads the built-in
//! tables in-process for offline use.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rentsim_core::market_data::{long_term_rate, short_term_rate};
use rentsim_core::model::{AirbnbData, RentData, RoomType};
use serde::de::DeserializeOwned;

use crate::abort::AbortSignal;
use crate::config::ClientConfig;

/// Why a market-data request produced no usable figures
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("market data service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("market data service answered with status {0}")]
    Status(u16),

    #[error("invalid market data payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("request aborted")]
    Aborted,
}

#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Long-term rent figures for `city`, adjusted for `room_type`.
    async fn rent_data(
        &self,
        city: &str,
        room_type: RoomType,
        signal: &AbortSignal,
    ) -> Result<RentData, FetchError>;

    /// Short-term rental figures for `city`.
    async fn airbnb_data(&self, city: &str, signal: &AbortSignal)
    -> Result<AirbnbData, FetchError>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Pick the source described by the client configuration.
pub fn from_config(config: &ClientConfig) -> Arc<dyn MarketDataSource> {
    if config.offline {
        Arc::new(LocalMarketData::new())
    } else {
        Arc::new(HttpMarketData::new(&config.server_url))
    }
}

// ============================================================================
// HTTP
// ============================================================================

/// Client for `GET /api/rent-data` and `GET /api/airbnb-data`
#[derive(Debug, Clone)]
pub struct HttpMarketData {
    base_url: String,
    client: reqwest::Client,
}

impl HttpMarketData {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        signal: &AbortSignal,
    ) -> Result<T, FetchError> {
        if signal.is_aborted() {
            return Err(FetchError::Aborted);
        }

        let url = format!("{}{}", self.base_url, path);
        let request = self.client.get(&url).query(query).send();
        let response = tokio::select! {
            _ = signal.aborted() => return Err(FetchError::Aborted),
            response = request => response?,
        };

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%url, status = status.as_u16(), "market data request rejected");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = tokio::select! {
            _ = signal.aborted() => return Err(FetchError::Aborted),
            body = response.bytes() => body?,
        };
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl MarketDataSource for HttpMarketData {
    async fn rent_data(
        &self,
        city: &str,
        room_type: RoomType,
        signal: &AbortSignal,
    ) -> Result<RentData, FetchError> {
        self.get_json(
            "/api/rent-data",
            &[("city", city), ("roomType", room_type.as_str())],
            signal,
        )
        .await
    }

    async fn airbnb_data(
        &self,
        city: &str,
        signal: &AbortSignal,
    ) -> Result<AirbnbData, FetchError> {
        self.get_json("/api/airbnb-data", &[("city", city)], signal)
            .await
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

// ============================================================================
// Local tables
// ============================================================================

/// Reads the built-in tables without going through the network
#[derive(Debug, Clone, Default)]
pub struct LocalMarketData {
    latency: Duration,
}

impl LocalMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every answer by `latency`, like a remote service would.
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    async fn wait(&self, signal: &AbortSignal) -> Result<(), FetchError> {
        if signal.is_aborted() {
            return Err(FetchError::Aborted);
        }
        if self.latency.is_zero() {
            return Ok(());
        }
        tokio::select! {
            _ = signal.aborted() => Err(FetchError::Aborted),
            _ = tokio::time::sleep(self.latency) => Ok(()),
        }
    }
}

#[async_trait]
impl MarketDataSource for LocalMarketData {
    async fn rent_data(
        &self,
        city: &str,
        room_type: RoomType,
        signal: &AbortSignal,
    ) -> Result<RentData, FetchError> {
        self.wait(signal).await?;
        Ok(long_term_rate(city, room_type).to_wire())
    }

    async fn airbnb_data(
        &self,
        city: &str,
        signal: &AbortSignal,
    ) -> Result<AirbnbData, FetchError> {
        self.wait(signal).await?;
        Ok(short_term_rate(city).to_wire())
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
