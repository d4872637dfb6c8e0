// Application layer - use cases for sessions and detection
// Orchestrates domain logic through the driven ports

pub mod detection;
pub mod ports;
pub mod session;
