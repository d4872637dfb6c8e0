// Session use cases - local sign-up, demo login, restore, logout

pub mod commands;
pub mod store;

pub use store::{SessionError, SessionStore, ACCOUNTS_KEY, CURRENT_SESSION_KEY};
