//! Domain Entities - Objects with an identity that persists over time

pub mod window_record;

pub use window_record::{WindowDimensions, WindowPosition, WindowRecord};
