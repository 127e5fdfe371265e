use hanbit_web::calendar::CalendarEvent;
use hanbit_web::error::{store_error, SiteResult};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Mock implementation of the document store for testing
#[derive(Debug, Clone, Default)]
pub struct MockStore {
    data: Arc<Mutex<HashMap<String, String>>>,
}

impl MockStore {
    /// Create a new mock store instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Save the site config document to the mock store
    pub async fn set_config(&self, document: Value) -> SiteResult<()> {
        let mut data = self.data.lock().await;
        data.insert("site:config".to_string(), document.to_string());
        Ok(())
    }

    /// Get the site config document from the mock store
    pub async fn get_config(&self) -> SiteResult<Option<Value>> {
        let data = self.data.lock().await;

        if let Some(document_json) = data.get("site:config") {
            let document: Value = serde_json::from_str(document_json)
                .map_err(|e| store_error(&format!("Failed to deserialize site config: {e}")))?;
            Ok(Some(document))
        } else {
            Ok(None)
        }
    }

    /// Save calendar events to the mock store
    pub async fn save_events(&self, events: Vec<CalendarEvent>) -> SiteResult<()> {
        let events_json = serde_json::to_string(&events)
            .map_err(|e| store_error(&format!("Failed to serialize events: {e}")))?;
        let mut data = self.data.lock().await;
        data.insert("site:collection:calendar".to_string(), events_json);
        Ok(())
    }

    /// Get calendar events from the mock store
    pub async fn get_events(&self) -> SiteResult<Vec<CalendarEvent>> {
        let data = self.data.lock().await;

        if let Some(events_json) = data.get("site:collection:calendar") {
            let events: Vec<CalendarEvent> = serde_json::from_str(events_json)
                .map_err(|e| store_error(&format!("Failed to deserialize events: {e}")))?;
            Ok(events)
        } else {
            Ok(Vec::new())
        }
    }
}

/// Basic test for the store mock
#[tokio::test]
async fn test_store_mock() {
    // Create a new mock store
    let mock_store = MockStore::new();

    // Create some test events
    let events = vec![CalendarEvent {
        id: "event1".to_string(),
        title: "신년 새벽기도회".to_string(),
        title_en: Some("New Year Dawn Prayer".to_string()),
        start_date: "2025-01-01".to_string(),
        end_date: Some("2025-01-07".to_string()),
        note: None,
        note_en: None,
        kind: Default::default(),
    }];

    // Save and read them back
    mock_store.save_events(events.clone()).await.unwrap();
    let loaded = mock_store.get_events().await.unwrap();

    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, "event1");
    assert_eq!(loaded[0].end_date.as_deref(), Some("2025-01-07"));
}

/// The config document round-trips through the mock store
#[tokio::test]
async fn test_store_mock_config_round_trip() {
    use hanbit_web::components::site_config::SiteConfig;

    let mock_store = MockStore::new();

    // Nothing stored yet
    assert!(mock_store.get_config().await.unwrap().is_none());

    let document = serde_json::to_value(SiteConfig::default()).unwrap();
    mock_store.set_config(document.clone()).await.unwrap();

    let loaded = mock_store.get_config().await.unwrap().unwrap();
    assert_eq!(loaded, document);

    // And the loaded document still validates against the schema
    assert!(SiteConfig::from_value(&loaded).is_ok());
}
