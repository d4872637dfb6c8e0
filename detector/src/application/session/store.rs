use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};

use crate::application::ports::{KeyValueStore, StoreError};
use crate::domain::{Account, ValidationError};

/// All registered accounts, as a JSON array
pub const ACCOUNTS_KEY: &str = "laugh_detector_users";
/// The signed-in account, as a JSON object
pub const CURRENT_SESSION_KEY: &str = "laugh_detector_current";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("an account with email {0} already exists")]
    DuplicateEmail(String),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("stored record {key} is not valid: {source}")]
    CorruptRecord {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("record {key} could not be encoded: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl SessionError {
    /// Form-level message, without internal detail
    pub fn user_message(&self) -> &'static str {
        match self {
            SessionError::InvalidInput(_) => {
                "Please enter a valid name, email and password (min 4 chars)."
            }
            SessionError::DuplicateEmail(_) => {
                "An account with that email already exists. Please login or use another email."
            }
            SessionError::Storage(_)
            | SessionError::CorruptRecord { .. }
            | SessionError::Encode { .. } => {
                "Could not access local storage. Please try again."
            }
        }
    }
}

/// Account collection and current-session slot over a key/value store
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn accounts(&self) -> Result<Vec<Account>, SessionError> {
        Ok(self.read(ACCOUNTS_KEY).await?.unwrap_or_default())
    }

    pub async fn current(&self) -> Result<Option<Account>, SessionError> {
        self.read(CURRENT_SESSION_KEY).await
    }

    pub async fn set_current(&self, account: &Account) -> Result<(), SessionError> {
        self.write(CURRENT_SESSION_KEY, account).await
    }

    pub async fn clear_current(&self) -> Result<(), SessionError> {
        self.store.remove(CURRENT_SESSION_KEY).await?;
        Ok(())
    }

    pub(crate) async fn save_accounts(&self, accounts: &[Account]) -> Result<(), SessionError> {
        self.write(ACCOUNTS_KEY, accounts).await
    }

    /// Serialises read-modify-write sequences on the account collection
    pub(crate) async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    async fn read<T: DeserializeOwned>(
        &self,
        key: &'static str,
    ) -> Result<Option<T>, SessionError> {
        match self.store.get(key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| SessionError::CorruptRecord { key, source }),
            None => Ok(None),
        }
    }

    async fn write<T: Serialize + ?Sized>(
        &self,
        key: &'static str,
        value: &T,
    ) -> Result<(), SessionError> {
        let raw = serde_json::to_string(value)
            .map_err(|source| SessionError::Encode { key, source })?;
        self.store.set(key, &raw).await?;
        Ok(())
    }
}
