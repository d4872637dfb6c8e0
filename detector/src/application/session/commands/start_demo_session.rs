use tracing::info;

use crate::application::session::{SessionError, SessionStore};
use crate::domain::Account;

/// Signs in the fixed demo identity. The account collection is not touched.
pub async fn execute(sessions: &SessionStore) -> Result<Account, SessionError> {
    let demo = Account::demo();
    sessions.set_current(&demo).await?;
    info!("Started demo session for {}", demo.name());
    Ok(demo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::driven::persistence::InMemoryKeyValueStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_demo_session_not_registered() {
        let sessions = SessionStore::new(Arc::new(InMemoryKeyValueStore::new()));
        let demo = execute(&sessions).await.unwrap();

        assert!(demo.is_demo());
        assert_eq!(sessions.current().await.unwrap(), Some(demo));
        assert!(sessions.accounts().await.unwrap().is_empty());
    }
}
