use tracing::info;

use crate::application::session::{SessionError, SessionStore};
use crate::domain::Account;

/// Creates an account and signs it in.
///
/// Rejects blank or over-long (over 255 bytes) name/email, passwords shorter than four characters, and an
/// email already registered under any letter case. A rejected attempt leaves
/// the account collection untouched.
pub async fn execute(
    sessions: &SessionStore,
    name: &str,
    email: &str,
    password: &str,
) -> Result<Account, SessionError> {
    let account = Account::register(name, email, password)?;

    let _guard = sessions.lock().await;
    let mut accounts = sessions.accounts().await?;
    if accounts.iter().any(|a| a.email().matches(account.email())) {
        return Err(SessionError::DuplicateEmail(account.email().to_string()));
    }

    accounts.push(account.clone());
    sessions.save_accounts(&accounts).await?;
    sessions.set_current(&account).await?;

    info!("Registered account {} ({})", account.id(), account.email());
    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationError;
    use crate::infrastructure::driven::persistence::InMemoryKeyValueStore;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn sessions() -> SessionStore {
        SessionStore::new(Arc::new(InMemoryKeyValueStore::new()))
    }

    #[tokio::test]
    async fn test_register_signs_in() {
        let sessions = sessions();
        let account = execute(&sessions, "Reagan", "demo@example.com", "pass")
            .await
            .unwrap();

        assert_eq!(sessions.accounts().await.unwrap(), vec![account.clone()]);
        assert_eq!(sessions.current().await.unwrap(), Some(account));
    }

    #[tokio::test]
    async fn test_duplicate_email_any_case_rejected() {
        let sessions = sessions();
        execute(&sessions, "Reagan", "demo@example.com", "pass")
            .await
            .unwrap();

        let err = execute(&sessions, "Reagan2", "DEMO@example.com", "pass2")
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::DuplicateEmail(_)));
        assert_eq!(sessions.accounts().await.unwrap().len(), 1);
        assert_eq!(
            sessions.current().await.unwrap().unwrap().name().as_str(),
            "Reagan"
        );
    }

    #[tokio::test]
    async fn test_duplicate_check_ignores_surrounding_whitespace() {
        let sessions = sessions();
        execute(&sessions, "Reagan", "demo@example.com", "pass")
            .await
            .unwrap();

        let err = execute(&sessions, "Other", "  Demo@Example.com ", "pass")
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn test_invalid_input_does_not_touch_store() {
        let sessions = sessions();
        for (name, email, password) in [
            ("", "a@b.c", "pass"),
            ("Reagan", "   ", "pass"),
            ("Reagan", "a@b.c", "abc"),
        ] {
            let err = execute(&sessions, name, email, password)
                .await
                .unwrap_err();
            assert!(matches!(err, SessionError::InvalidInput(_)));
        }
        assert!(sessions.accounts().await.unwrap().is_empty());
        assert!(sessions.current().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_overlong_fields_rejected() {
        let sessions = sessions();
        let long_name = "a".repeat(256);
        let long_email = format!("{}@example.com", "a".repeat(250));

        let err = execute(&sessions, &long_name, "a@b.c", "pass")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidInput(ValidationError::TooLong { field: "name" })
        ));
        let err = execute(&sessions, "Reagan", &long_email, "pass")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidInput(ValidationError::TooLong { field: "email" })
        ));
        assert!(sessions.accounts().await.unwrap().is_empty());

        execute(&sessions, &"a".repeat(255), "a@b.c", "pass")
            .await
            .unwrap();
    }

    proptest! {
        #[test]
        fn prop_password_length_decides(password in "[a-z0-9]{0,12}") {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let result = rt.block_on(execute(&sessions(), "Reagan", "demo@example.com", &password));
            if password.len() < 4 {
                prop_assert!(matches!(result, Err(SessionError::InvalidInput(_))));
            } else {
                prop_assert!(result.is_ok());
            }
        }
    }
}
