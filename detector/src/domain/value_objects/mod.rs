pub mod account_id;
pub mod email;
pub mod display_name;
pub mod password;

pub use account_id::AccountId;
pub use email::Email;
pub use display_name::DisplayName;
pub use password::{Password, MIN_PASSWORD_LEN};
