//! Application Layer - Window lifecycle and the ports it depends on
//!
//! This layer orchestrates domain entities and defines the platform port.
//! It contains:
//! - **Ports**: the `Platform` interface the native backend implements
//! - **Services**: registry, pump threads, handshake, diagnostics and the
//!   `Framework` coordinator
//!
//! # Clean Architecture Rules
//! - Depends only on the domain layer
//! - Contains no platform-specific code

pub mod ports;
pub mod services;

// Re-export commonly used types
pub use ports::*;
pub use services::*;
