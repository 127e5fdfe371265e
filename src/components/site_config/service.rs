use super::models::{merge_update, SiteConfig};
use serde_json::Value;
use tokio::sync::{watch, RwLock};
use tracing::warn;

/// Injectable configuration service.
///
/// Holds the cached site configuration and fans out change notifications.
/// One instance is created at startup and shared through the router state;
/// there is no ambient singleton.
pub struct ConfigService {
    /// Raw merged document as last accepted from the store
    raw: RwLock<Value>,
    /// Validated cache and notification channel
    current_tx: watch::Sender<SiteConfig>,
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigService {
    /// Create a service seeded with the compiled-in defaults
    pub fn new() -> Self {
        let defaults = SiteConfig::default();
        let raw = serde_json::to_value(&defaults).unwrap_or(Value::Null);
        let (current_tx, _) = watch::channel(defaults);

        Self {
            raw: RwLock::new(raw),
            current_tx,
        }
    }

    /// The current site configuration
    pub fn current(&self) -> SiteConfig {
        self.current_tx.borrow().clone()
    }

    /// Subscribe to configuration changes.
    ///
    /// Dropping the receiver is the unsubscribe.
    pub fn subscribe(&self) -> watch::Receiver<SiteConfig> {
        self.current_tx.subscribe()
    }

    /// The raw document as last accepted, used by the admin surface to
    /// build its whole-document overwrite
    pub async fn raw_document(&self) -> Value {
        self.raw.read().await.clone()
    }

    /// Shallow-merge an incoming store document over the cached value.
    ///
    /// The merged candidate is validated before it is published; an
    /// invalid document is rejected with a warning and the previous
    /// value is kept.
    pub async fn apply_update(&self, patch: Value) {
        let mut raw = self.raw.write().await;

        let mut candidate = raw.clone();
        merge_update(&mut candidate, patch);

        match SiteConfig::from_value(&candidate) {
            Ok(config) => {
                *raw = candidate;
                self.current_tx.send_replace(config);
            }
            Err(e) => warn!("Rejecting site config update: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_apply_update_publishes_to_subscribers() {
        let service = ConfigService::new();
        let mut updates = service.subscribe();

        service
            .apply_update(json!({ "hero": { "title": "환영합니다" } }))
            .await;

        assert!(updates.has_changed().unwrap());
        assert_eq!(updates.borrow_and_update().hero.title, "환영합니다");
        assert_eq!(service.current().hero.title, "환영합니다");
    }

    #[tokio::test]
    async fn test_invalid_update_keeps_previous_value() {
        let service = ConfigService::new();
        let before = service.current();

        // "services" must be a list; a scalar fails schema validation
        service.apply_update(json!({ "services": 3 })).await;

        assert_eq!(service.current(), before);
    }

    #[tokio::test]
    async fn test_structured_merge_survives_successive_updates() {
        let service = ConfigService::new();

        service
            .apply_update(json!({ "social": { "instagram": "https://instagram.com/hanbit" } }))
            .await;
        service
            .apply_update(json!({ "social": { "kakao": "https://pf.kakao.com/hanbit" } }))
            .await;

        let social = service.current().social;
        assert_eq!(social.instagram, "https://instagram.com/hanbit");
        assert_eq!(social.kakao, "https://pf.kakao.com/hanbit");
    }
}
