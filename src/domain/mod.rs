//! Domain Layer - Window identities, records and the error taxonomy
//!
//! This layer contains:
//! - **Entities**: `WindowRecord`, the per-window state kept by the registry
//! - **Value Objects**: identifiers, native handles and message box options
//! - **Domain Errors**: error types, numeric codes and their descriptions
//!
//! Nothing here touches the native platform, so it is testable on any host.

pub mod entities;
pub mod errors;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use errors::{describe, ErrorCode, FrameworkError, PlatformError, RegistryError};
pub use value_objects::*;
