//! Laugh detector core: sessions, model readiness, camera lifecycle and the
//! per-frame expression detection loop.

pub mod application;
pub mod domain;
pub mod infrastructure;
