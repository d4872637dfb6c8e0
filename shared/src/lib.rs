pub mod protocol;

pub use protocol::{UiCommand, UiMessage, UiSnapshot, INITIAL_STATUS};
