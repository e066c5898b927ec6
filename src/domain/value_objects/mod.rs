//! Domain Value Objects - Immutable values that describe characteristics
//!
//! Value objects have no identity and are compared by their values.
//! They are immutable and can be freely shared.

pub mod ids;
pub mod message_box;

pub use ids::{NativeHandle, WindowId};
pub use message_box::{MessageBoxFlags, MessageBoxResult};
