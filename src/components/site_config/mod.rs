pub mod models;
mod service;

pub use models::{
    HeroSection, LocationInfo, Ministry, PageBanner, PastorInfo, ServiceTime, SiteConfig,
    SocialLinks, StaffMember,
};
pub use service::ConfigService;

use crate::components::store::StoreHandle;
use crate::config::Config;
use crate::error::SiteResult;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Site content component.
///
/// Seeds the shared ConfigService from the stored document and keeps it
/// live through the store's push subscription for the lifetime of the
/// application.
pub struct SiteContent {
    service: Arc<ConfigService>,
    cancel: CancellationToken,
}

impl SiteContent {
    /// Create the component around an existing service instance
    pub fn new(service: Arc<ConfigService>) -> Self {
        Self {
            service,
            cancel: CancellationToken::new(),
        }
    }
}

#[async_trait]
impl super::Component for SiteContent {
    fn name(&self) -> &'static str {
        "site_content"
    }

    async fn init(
        &self,
        _config: Arc<RwLock<Config>>,
        store_handle: StoreHandle,
    ) -> SiteResult<()> {
        // Seed the cache from the stored document, if any
        match store_handle.get_config().await {
            Ok(Some(document)) => self.service.apply_update(document).await,
            Ok(None) => info!("No stored site config, serving compiled-in defaults"),
            Err(e) => warn!("Failed to load site config, serving defaults: {}", e),
        }

        // Exactly one subscription for the lifetime of the application.
        // The cancellation token stops the task before any further cache
        // writes once the component shuts down.
        let mut updates = store_handle.subscribe_config();
        let service = Arc::clone(&self.service);
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    update = updates.recv() => match update {
                        Ok(document) => service.apply_update(document).await,
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!("Site config subscription lagged, skipped {} updates", skipped);
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            warn!("Site config subscription closed, cached content is now stale");
                            break;
                        }
                    }
                }
            }
            info!("Site config subscription task ended");
        });

        Ok(())
    }

    async fn shutdown(&self) -> SiteResult<()> {
        self.cancel.cancel();
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
