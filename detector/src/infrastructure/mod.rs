// Infrastructure layer - configuration and driven adapters
// Implements the ports defined in the application layer

pub mod config;
pub mod driven;
