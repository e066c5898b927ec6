//! Application Services - window lifecycle coordination

pub mod diagnostics;
pub mod framework;
pub mod handshake;
pub mod window_pump;
pub mod window_registry;

pub use diagnostics::{ProcessExit, Reporter, Terminator};
pub use framework::{halt, Framework};
pub use handshake::{Completion, Handshake};
pub use window_pump::WindowPump;
pub use window_registry::WindowRegistry;
