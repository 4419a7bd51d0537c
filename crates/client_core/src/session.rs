//! Bearer token ownership and the client event channel.
//!
//! The token is the only state shared between requests. It is read at request
//! time and cleared when the backend answers 401; the [`Session`] then
//! broadcasts [`ClientEvent::Unauthorized`] so the routing layer can react
//! without the transport knowing anything about routes.

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};
use tracing::{info, warn};

use crate::ClientEvent;

#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> Result<Option<String>>;
    async fn store(&self, token: &str) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<String>> {
        Ok(self.token.read().await.clone())
    }

    async fn store(&self, token: &str) -> Result<()> {
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.token.write().await = None;
        Ok(())
    }
}

/// Persists the token to a single file so consecutive console invocations
/// share a login.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => {
                let token = raw.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| {
                format!("failed to read token file '{}'", self.path.display())
            }),
        }
    }

    async fn store(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("failed to create token directory '{}'", parent.display())
                })?;
            }
        }
        tokio::fs::write(&self.path, token)
            .await
            .with_context(|| format!("failed to write token file '{}'", self.path.display()))
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| {
                format!("failed to remove token file '{}'", self.path.display())
            }),
        }
    }
}

#[derive(Clone)]
pub struct Session {
    tokens: Arc<dyn TokenStore>,
    events: broadcast::Sender<ClientEvent>,
}

impl Session {
    pub fn new(tokens: Arc<dyn TokenStore>) -> Self {
        let (events, _) = broadcast::channel(256);
        Self { tokens, events }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::default()))
    }

    pub async fn token(&self) -> Option<String> {
        match self.tokens.load().await {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "session: failed to load token");
                None
            }
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token().await.is_some()
    }

    pub async fn set_token(&self, token: &str) -> Result<()> {
        self.tokens.store(token).await?;
        info!("session: token stored");
        let _ = self.events.send(ClientEvent::LoggedIn);
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        self.tokens.clear().await?;
        let _ = self.events.send(ClientEvent::LoggedOut);
        Ok(())
    }

    /// Called by the transport on a 401. Clears the token and tells
    /// subscribers, which is all the transport is allowed to do about it.
    pub async fn mark_unauthorized(&self) {
        if let Err(err) = self.tokens.clear().await {
            warn!(error = %err, "session: failed to clear token after 401");
        }
        warn!("session: unauthorized response, token cleared");
        let _ = self.events.send(ClientEvent::Unauthorized);
    }

    pub fn emit(&self, event: ClientEvent) {
        let _ = self.events.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
