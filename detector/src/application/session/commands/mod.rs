pub mod end_session;
pub mod register_account;
pub mod restore_session;
pub mod start_demo_session;
