//! WindowRecord entity - the state kept for one native window
//!
//! Records are owned by the registry. A window's pump thread is the only
//! writer of the geometry and visibility fields; everyone else reads
//! snapshots through the registry.

use crate::domain::value_objects::{NativeHandle, WindowId};

/// Window position on screen
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

impl WindowPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Window dimensions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct WindowDimensions {
    pub width: u32,
    pub height: u32,
}

impl WindowDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Complete per-window state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowRecord {
    /// Identifier handed to the application
    pub id: WindowId,
    /// Native handle, unique while the window exists
    pub handle: NativeHandle,
    /// Window title
    pub name: String,
    pub position: WindowPosition,
    pub dimensions: WindowDimensions,
    /// Whether the window is currently shown
    pub visible: bool,
    /// Cleared once the window's pump has left its message loop
    pub valid: bool,
}

impl WindowRecord {
    /// Create a record for a freshly created, not yet shown window
    pub fn new(
        id: WindowId,
        handle: NativeHandle,
        name: impl Into<String>,
        position: WindowPosition,
        dimensions: WindowDimensions,
    ) -> Self {
        Self {
            id,
            handle,
            name: name.into(),
            position,
            dimensions,
            visible: false,
            valid: true,
        }
    }

    /// Mark the record as no longer backed by a live window
    pub fn invalidate(&mut self) {
        self.valid = false;
        self.visible = false;
    }
}
