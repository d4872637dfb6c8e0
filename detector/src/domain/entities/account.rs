use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;
use crate::domain::value_objects::*;

const DEMO_NAME: &str = "Reagan";
const DEMO_EMAIL: &str = "demo@example.com";

/// A registered account. The same record is stored as the current session;
/// the demo identity carries no password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    name: DisplayName,
    email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password: Option<Password>,
}

impl Account {
    /// Validates raw form input into a new account
    pub fn register(name: &str, email: &str, password: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            id: AccountId::generate(),
            name: DisplayName::new(name)?,
            email: Email::new(email)?,
            password: Some(Password::new(password)?),
        })
    }

    pub fn demo() -> Self {
        Self {
            id: AccountId::demo(),
            name: DisplayName::from_static(DEMO_NAME),
            email: Email::from_static(DEMO_EMAIL),
            password: None,
        }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> Option<&Password> {
        self.password.as_ref()
    }

    pub fn is_demo(&self) -> bool {
        self.id.is_demo()
    }
}
