use tracing::{info, warn};

use crate::application::session::{SessionError, SessionStore};
use crate::domain::Account;

/// Reads the session left by a previous run.
///
/// An unreadable record is treated as signed out; storage failures still
/// propagate.
pub async fn execute(sessions: &SessionStore) -> Result<Option<Account>, SessionError> {
    match sessions.current().await {
        Ok(Some(account)) => {
            info!("Restored session for {}", account.name());
            Ok(Some(account))
        }
        Ok(None) => Ok(None),
        Err(SessionError::CorruptRecord { key, source }) => {
            warn!("Ignoring unreadable session record {}: {}", key, source);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::KeyValueStore;
    use crate::application::session::CURRENT_SESSION_KEY;
    use crate::infrastructure::driven::persistence::InMemoryKeyValueStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_restores_previous_session() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        SessionStore::new(store.clone())
            .set_current(&Account::demo())
            .await
            .unwrap();

        let restored = execute(&SessionStore::new(store)).await.unwrap();
        assert_eq!(restored, Some(Account::demo()));
    }

    #[tokio::test]
    async fn test_garbage_record_reads_as_signed_out() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        store.set(CURRENT_SESSION_KEY, "[1,2").await.unwrap();

        assert_eq!(execute(&SessionStore::new(store)).await.unwrap(), None);
    }
}
