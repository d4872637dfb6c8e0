use serde::{Deserialize, Serialize};
use std::fmt;

const DEMO_ID: &str = "demo";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn demo() -> Self {
        Self(DEMO_ID.to_string())
    }

    pub fn is_demo(&self) -> bool {
        self.0 == DEMO_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
