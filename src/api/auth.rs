use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::Mutex;

use super::client::PbxClient;
use super::error::ApiError;
use super::models::TokenInfo;

/// Source of wall-clock time for token expiry
pub trait Clock: Send + Sync {
    fn now(&self) -> SystemTime;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Single-slot token cache with a fixed time to live
#[derive(Debug)]
pub struct TokenCache {
    ttl: Duration,
    slot: Option<TokenInfo>,
}

impl TokenCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, slot: None }
    }

    /// Token still valid at `now`, if any
    pub fn get(&self, now: SystemTime) -> Option<&str> {
        self.slot
            .as_ref()
            .filter(|token| token.expires_at.is_none_or(|expires_at| now < expires_at))
            .map(|token| token.access_token.as_str())
    }

    pub fn store(&mut self, access_token: String, now: SystemTime) {
        self.slot = Some(TokenInfo {
            access_token,
            expires_at: now.checked_add(self.ttl),
        });
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

/// Hands out access tokens, authenticating only when the cached one is gone
pub struct AuthManager {
    cache: Mutex<TokenCache>,
    clock: Arc<dyn Clock>,
}

impl AuthManager {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            cache: Mutex::new(TokenCache::new(ttl)),
            clock,
        }
    }

    /// Return the cached token or authenticate against the PBX.
    ///
    /// Failures are not cached, the next call tries again.
    pub async fn access_token(&self, client: &PbxClient) -> Result<String, ApiError> {
        let mut cache = self.cache.lock().await;

        if let Some(token) = cache.get(self.clock.now()) {
            log::debug!("Using cached access token");
            return Ok(token.to_string());
        }

        log::info!("Authenticating to {}", client.base_url());
        let token = client.get_token().await?;

        // Expiry counts from when the token arrived
        cache.store(token.clone(), self.clock.now());
        log::info!("Successfully authenticated, token cached for {}s", cache.ttl().as_secs());

        Ok(token)
    }

    /// Drop the cached token so the next call re-authenticates
    pub async fn invalidate(&self) {
        self.cache.lock().await.clear();
        log::info!("Cleared cached access token");
    }
}
