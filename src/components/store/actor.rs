use crate::config::Config;
use crate::error::{store_error, SiteResult};
use futures::StreamExt;
use redis::{AsyncCommands, Client as RedisClient};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, RwLock};
use tracing::{info, warn};

// Redis key constants
pub mod keys {
    /// The whole site configuration document
    pub const SITE_CONFIG: &str = "site:config";
    /// Pub/sub channel carrying site configuration updates
    pub const SITE_CONFIG_CHANNEL: &str = "site:config:updates";
    /// Prefix for collection array documents
    pub const COLLECTION_PREFIX: &str = "site:collection:";
}

/// The content collections held by the document store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Sermons,
    Bulletins,
    Notices,
    Gallery,
    CalendarEvents,
    Columns,
    Devotionals,
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::Sermons,
        Collection::Bulletins,
        Collection::Notices,
        Collection::Gallery,
        Collection::CalendarEvents,
        Collection::Columns,
        Collection::Devotionals,
    ];

    /// Stable identifier used in store keys and admin URLs
    pub fn slug(&self) -> &'static str {
        match self {
            Collection::Sermons => "sermons",
            Collection::Bulletins => "bulletins",
            Collection::Notices => "notices",
            Collection::Gallery => "gallery",
            Collection::CalendarEvents => "calendar",
            Collection::Columns => "columns",
            Collection::Devotionals => "devotionals",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Collection> {
        Collection::ALL.iter().copied().find(|c| c.slug() == slug)
    }

    fn key(&self) -> String {
        format!("{}{}", keys::COLLECTION_PREFIX, self.slug())
    }
}

/// Commands that can be sent to the store actor
pub enum StoreCommand {
    GetConfig(mpsc::Sender<SiteResult<Option<Value>>>),
    SetConfig(Value, mpsc::Sender<SiteResult<()>>),
    GetCollection(Collection, mpsc::Sender<SiteResult<Vec<Value>>>),
    PutItem(Collection, String, Value, mpsc::Sender<SiteResult<()>>),
    DeleteItem(Collection, String, mpsc::Sender<SiteResult<()>>),
    ResetCollection(Collection, Vec<Value>, mpsc::Sender<SiteResult<()>>),
    Shutdown,
}

/// Handle for communicating with the store actor
#[derive(Clone)]
pub struct StoreHandle {
    command_tx: mpsc::Sender<StoreCommand>,
    updates_tx: broadcast::Sender<Value>,
}

impl StoreHandle {
    /// Create a new empty handle for initialization and tests
    pub fn empty() -> Self {
        let (command_tx, _) = mpsc::channel(32);
        let (updates_tx, _) = broadcast::channel(16);
        Self {
            command_tx,
            updates_tx,
        }
    }

    /// Subscribe to site configuration push updates
    pub fn subscribe_config(&self) -> broadcast::Receiver<Value> {
        self.updates_tx.subscribe()
    }

    /// Read the site configuration document
    pub async fn get_config(&self) -> SiteResult<Option<Value>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(StoreCommand::GetConfig(response_tx))
            .await
            .map_err(|e| store_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| store_error("Response channel closed"))?
    }

    /// Overwrite the site configuration document (last write wins)
    pub async fn set_config(&self, document: Value) -> SiteResult<()> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(StoreCommand::SetConfig(document, response_tx))
            .await
            .map_err(|e| store_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| store_error("Response channel closed"))?
    }

    /// Read every item of a collection
    pub async fn get_collection(&self, collection: Collection) -> SiteResult<Vec<Value>> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(StoreCommand::GetCollection(collection, response_tx))
            .await
            .map_err(|e| store_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| store_error("Response channel closed"))?
    }

    /// Create or update one collection item by id
    pub async fn put_item(&self, collection: Collection, id: &str, item: Value) -> SiteResult<()> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(StoreCommand::PutItem(
                collection,
                id.to_string(),
                item,
                response_tx,
            ))
            .await
            .map_err(|e| store_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| store_error("Response channel closed"))?
    }

    /// Delete one collection item by id
    pub async fn delete_item(&self, collection: Collection, id: &str) -> SiteResult<()> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(StoreCommand::DeleteItem(
                collection,
                id.to_string(),
                response_tx,
            ))
            .await
            .map_err(|e| store_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| store_error("Response channel closed"))?
    }

    /// Replace a whole collection with the given items
    pub async fn reset_collection(
        &self,
        collection: Collection,
        items: Vec<Value>,
    ) -> SiteResult<()> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(StoreCommand::ResetCollection(collection, items, response_tx))
            .await
            .map_err(|e| store_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| store_error("Response channel closed"))?
    }

    /// Typed read of a whole collection
    pub async fn list<T: DeserializeOwned>(&self, collection: Collection) -> SiteResult<Vec<T>> {
        let raw = self.get_collection(collection).await?;
        raw.into_iter()
            .map(|value| {
                serde_json::from_value(value).map_err(|e| {
                    store_error(&format!(
                        "Failed to deserialize {} item: {}",
                        collection.slug(),
                        e
                    ))
                })
            })
            .collect()
    }

    /// Typed create-or-update of one collection item
    pub async fn put<T: Serialize>(
        &self,
        collection: Collection,
        id: &str,
        item: &T,
    ) -> SiteResult<()> {
        let value = serde_json::to_value(item)
            .map_err(|e| store_error(&format!("Failed to serialize item: {}", e)))?;
        self.put_item(collection, id, value).await
    }

    /// Typed bulk reset of a collection to the given items
    pub async fn reset<T: Serialize>(&self, collection: Collection, items: &[T]) -> SiteResult<()> {
        let values = items
            .iter()
            .map(|item| {
                serde_json::to_value(item)
                    .map_err(|e| store_error(&format!("Failed to serialize item: {}", e)))
            })
            .collect::<SiteResult<Vec<Value>>>()?;
        self.reset_collection(collection, values).await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> SiteResult<()> {
        let _ = self.command_tx.send(StoreCommand::Shutdown).await;
        Ok(())
    }
}

/// The store actor that processes messages
pub struct StoreActor {
    config: Arc<RwLock<Config>>,
    client: Option<RedisClient>,
    command_rx: mpsc::Receiver<StoreCommand>,
    updates_tx: broadcast::Sender<Value>,
}

impl StoreActor {
    /// Create a new actor and return its handle
    pub fn new(config: Arc<RwLock<Config>>) -> (Self, StoreHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);
        let (updates_tx, _) = broadcast::channel(16);

        let actor = Self {
            config,
            client: None,
            command_rx,
            updates_tx: updates_tx.clone(),
        };

        let handle = StoreHandle {
            command_tx,
            updates_tx,
        };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Store actor started");

        self.spawn_subscription_listener().await;

        // Process commands
        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                StoreCommand::GetConfig(response_tx) => {
                    let result = self.get_config_document().await;
                    let _ = response_tx.send(result).await;
                }
                StoreCommand::SetConfig(document, response_tx) => {
                    let result = self.set_config_document(document).await;
                    let _ = response_tx.send(result).await;
                }
                StoreCommand::GetCollection(collection, response_tx) => {
                    let result = self.read_collection(collection).await;
                    let _ = response_tx.send(result).await;
                }
                StoreCommand::PutItem(collection, id, item, response_tx) => {
                    let result = self.put_collection_item(collection, &id, item).await;
                    let _ = response_tx.send(result).await;
                }
                StoreCommand::DeleteItem(collection, id, response_tx) => {
                    let result = self.delete_collection_item(collection, &id).await;
                    let _ = response_tx.send(result).await;
                }
                StoreCommand::ResetCollection(collection, items, response_tx) => {
                    let result = self.write_collection(collection, items).await;
                    let _ = response_tx.send(result).await;
                }
                StoreCommand::Shutdown => {
                    info!("Store actor shutting down");
                    break;
                }
            }
        }

        info!("Store actor shut down");
    }

    /// Forward pub/sub config updates into the broadcast channel.
    ///
    /// A failed subscription is logged and swallowed: the in-process cache
    /// keeps serving its last value without further updates.
    async fn spawn_subscription_listener(&self) {
        let redis_url = {
            let config_guard = self.config.read().await;
            config_guard.redis_url.clone()
        };
        let updates_tx = self.updates_tx.clone();

        tokio::spawn(async move {
            let client = match RedisClient::open(redis_url) {
                Ok(client) => client,
                Err(e) => {
                    warn!("Config subscription unavailable: {}", e);
                    return;
                }
            };

            let mut pubsub = match client.get_async_pubsub().await {
                Ok(pubsub) => pubsub,
                Err(e) => {
                    warn!("Config subscription unavailable: {}", e);
                    return;
                }
            };

            if let Err(e) = pubsub.subscribe(keys::SITE_CONFIG_CHANNEL).await {
                warn!("Config subscription unavailable: {}", e);
                return;
            }

            info!("Subscribed to site config updates");

            let mut messages = pubsub.on_message();
            while let Some(message) = messages.next().await {
                let payload: String = match message.get_payload() {
                    Ok(payload) => payload,
                    Err(e) => {
                        warn!("Ignoring unreadable config update: {}", e);
                        continue;
                    }
                };
                match serde_json::from_str::<Value>(&payload) {
                    Ok(document) => {
                        let _ = updates_tx.send(document);
                    }
                    Err(e) => warn!("Ignoring malformed config update: {}", e),
                }
            }

            warn!("Config subscription ended, cached content is now stale");
        });
    }

    /// Get a redis connection, creating the client on first use
    async fn get_redis_connection(&mut self) -> SiteResult<redis::aio::MultiplexedConnection> {
        if self.client.is_none() {
            let redis_url = {
                let config_guard = self.config.read().await;
                config_guard.redis_url.clone()
            };
            let client = RedisClient::open(redis_url)
                .map_err(|e| store_error(&format!("Failed to create Redis client: {}", e)))?;
            self.client = Some(client);
        }

        match &self.client {
            Some(client) => client
                .get_multiplexed_async_connection()
                .await
                .map_err(|e| store_error(&format!("Failed to connect to Redis: {}", e))),
            None => Err(store_error("Redis client unavailable")),
        }
    }

    /// Read the site config document from Redis
    async fn get_config_document(&mut self) -> SiteResult<Option<Value>> {
        let mut conn = self.get_redis_connection().await?;

        let exists: bool = conn
            .exists(keys::SITE_CONFIG)
            .await
            .map_err(|e| store_error(&format!("Redis error: {}", e)))?;

        if !exists {
            return Ok(None);
        }

        let document_json: String = conn
            .get(keys::SITE_CONFIG)
            .await
            .map_err(|e| store_error(&format!("Failed to read site config: {}", e)))?;

        let document: Value = serde_json::from_str(&document_json)
            .map_err(|e| store_error(&format!("Failed to deserialize site config: {}", e)))?;

        Ok(Some(document))
    }

    /// Overwrite the site config document and publish the update
    async fn set_config_document(&mut self, document: Value) -> SiteResult<()> {
        let mut conn = self.get_redis_connection().await?;

        let document_json = document.to_string();

        () = conn
            .set(keys::SITE_CONFIG, &document_json)
            .await
            .map_err(|e| store_error(&format!("Failed to save site config: {}", e)))?;

        // Notify subscribers (including this process) of the new document
        () = conn
            .publish(keys::SITE_CONFIG_CHANNEL, &document_json)
            .await
            .map_err(|e| store_error(&format!("Failed to publish site config update: {}", e)))?;

        Ok(())
    }

    /// Read a whole collection array document
    async fn read_collection(&mut self, collection: Collection) -> SiteResult<Vec<Value>> {
        let mut conn = self.get_redis_connection().await?;
        let key = collection.key();

        let exists: bool = conn
            .exists(&key)
            .await
            .map_err(|e| store_error(&format!("Redis error: {}", e)))?;

        if !exists {
            return Ok(Vec::new());
        }

        let items_json: String = conn
            .get(&key)
            .await
            .map_err(|e| store_error(&format!("Failed to read {}: {}", collection.slug(), e)))?;

        let items: Vec<Value> = serde_json::from_str(&items_json).map_err(|e| {
            store_error(&format!(
                "Failed to deserialize {}: {}",
                collection.slug(),
                e
            ))
        })?;

        Ok(items)
    }

    /// Overwrite a whole collection array document
    async fn write_collection(
        &mut self,
        collection: Collection,
        items: Vec<Value>,
    ) -> SiteResult<()> {
        let mut conn = self.get_redis_connection().await?;

        let items_json = serde_json::to_string(&items).map_err(|e| {
            store_error(&format!("Failed to serialize {}: {}", collection.slug(), e))
        })?;

        () = conn
            .set(collection.key(), items_json)
            .await
            .map_err(|e| store_error(&format!("Failed to save {}: {}", collection.slug(), e)))?;

        Ok(())
    }

    /// Insert or replace one item, matched by its "id" field
    async fn put_collection_item(
        &mut self,
        collection: Collection,
        id: &str,
        item: Value,
    ) -> SiteResult<()> {
        let mut items = self.read_collection(collection).await?;

        match items
            .iter_mut()
            .find(|existing| existing.get("id").and_then(Value::as_str) == Some(id))
        {
            Some(existing) => *existing = item,
            None => items.push(item),
        }

        self.write_collection(collection, items).await
    }

    /// Remove one item, matched by its "id" field
    async fn delete_collection_item(&mut self, collection: Collection, id: &str) -> SiteResult<()> {
        let items = self.read_collection(collection).await?;

        let remaining: Vec<Value> = items
            .into_iter()
            .filter(|existing| existing.get("id").and_then(Value::as_str) != Some(id))
            .collect();

        self.write_collection(collection, remaining).await
    }
}
