//! One render cycle: authenticate, fetch system info, fetch extensions.

pub mod html;
pub mod view;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::api::{ApiError, AuthManager, Clock, ExtensionRecord, PbxClient, SystemInfo};

pub use view::PageView;

/// Data gathered by one completed cycle; each section fails on its own
#[derive(Debug)]
pub struct Snapshot {
    pub system_info: Result<SystemInfo, ApiError>,
    pub extensions: Result<Vec<ExtensionRecord>, ApiError>,
}

/// Result of a render cycle
#[derive(Debug)]
pub enum Outcome {
    /// Authentication failed, nothing was fetched
    Halted(ApiError),
    Rendered(Snapshot),
}

pub struct Dashboard {
    client: PbxClient,
    auth: AuthManager,
    // Held for a whole cycle so cycles and refreshes never interleave
    cycle: Mutex<()>,
}

impl Dashboard {
    pub fn new(client: PbxClient, token_ttl: Duration) -> Self {
        Self::with_auth(client, AuthManager::new(token_ttl))
    }

    pub fn with_clock(client: PbxClient, token_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self::with_auth(client, AuthManager::with_clock(token_ttl, clock))
    }

    fn with_auth(client: PbxClient, auth: AuthManager) -> Self {
        Self {
            client,
            auth,
            cycle: Mutex::new(()),
        }
    }

    /// Run authenticate → system info → extensions
    pub async fn run_cycle(&self) -> Outcome {
        let _cycle = self.cycle.lock().await;

        let token = match self.auth.access_token(&self.client).await {
            Ok(token) => token,
            Err(e) => {
                log::warn!("Authentication failed: {}", e);
                return Outcome::Halted(e);
            }
        };

        let system_info = self.client.fetch_system_info(&token).await;
        if let Err(e) = &system_info {
            log::warn!("Failed to fetch system info: {}", e);
        }

        let extensions = self.client.fetch_extensions(&token).await;
        match &extensions {
            Ok(records) => log::debug!("Fetched {} extensions", records.len()),
            Err(e) => log::warn!("Failed to fetch extensions: {}", e),
        }

        Outcome::Rendered(Snapshot {
            system_info,
            extensions,
        })
    }

    /// Run a cycle and map it to the page view
    pub async fn render(&self) -> PageView {
        PageView::from_outcome(&self.run_cycle().await)
    }

    /// Run a cycle and render the full HTML page
    pub async fn render_html(&self) -> String {
        html::render_page(&self.render().await)
    }

    /// Clear every cached result; the next cycle starts from authentication
    pub async fn refresh(&self) {
        let _cycle = self.cycle.lock().await;
        self.auth.invalidate().await;
    }
}
