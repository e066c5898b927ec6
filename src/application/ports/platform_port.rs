//! PlatformPort - interface to the native windowing system
//!
//! The framework core only needs a handful of native capabilities: register
//! a window class, create/destroy/show a window, fetch and dispatch the next
//! message for one window, show a modal dialog and turn a status code into
//! text. Win32 provides the production implementation; tests use an
//! in-memory fake.

use std::sync::Arc;

use crate::domain::value_objects::{MessageBoxFlags, MessageBoxResult, NativeHandle};
use crate::domain::PlatformError;

/// Resources attached to the window class
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClassSpec {
    /// Icon resource id, `None` for the platform default
    pub icon_id: Option<u16>,
    /// Cursor resource id, `None` for the platform default
    pub cursor_id: Option<u16>,
}

/// Outcome of a successful class registration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassRegistration {
    pub icon_loaded: bool,
    pub cursor_loaded: bool,
}

/// Parameters moved into a pump thread to create one window
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateParams {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// 0 lets the platform choose
    pub x: i32,
    /// 0 lets the platform choose
    pub y: i32,
}

/// Native messages the window procedure cares about
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowMessage {
    /// Closing the window was requested
    Close,
    /// The window is being destroyed
    Destroy,
    Moved { x: i32, y: i32 },
    Resized { width: u32, height: u32 },
    VisibilityChanged(bool),
    /// Anything else, passed through untouched
    Other(u32),
}

/// What the window procedure did with a message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// Fully handled, skip default processing
    Handled,
    /// Fall through to the platform's default processing
    Default,
}

/// Result of one message-retrieval step
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PumpStatus {
    /// A message was fetched and dispatched
    Dispatched,
    /// The window no longer exists; the loop must end
    Destroyed,
    /// Retrieving the message failed
    Failed(PlatformError),
}

/// Receiver for messages dispatched to a window
pub trait MessageSink: Send + Sync {
    fn on_message(&self, handle: NativeHandle, message: WindowMessage) -> Disposition;
}

/// Port interface for the native windowing system
pub trait Platform: Send + Sync + 'static {
    /// Register the shared window class
    fn register_class(&self, spec: &ClassSpec) -> Result<ClassRegistration, PlatformError>;

    /// Unregister the shared window class
    fn unregister_class(&self) -> Result<(), PlatformError>;

    /// Create a window on the calling thread.
    ///
    /// Messages for the window are delivered to `sink` while the calling
    /// thread dispatches them.
    fn create(
        &self,
        params: &CreateParams,
        sink: Arc<dyn MessageSink>,
    ) -> Result<NativeHandle, PlatformError>;

    /// Destroy a window. Must be called on the window's own thread.
    fn destroy(&self, handle: NativeHandle) -> Result<(), PlatformError>;

    /// Ask a window to close from any thread
    fn request_close(&self, handle: NativeHandle) -> Result<(), PlatformError>;

    fn set_visible(&self, handle: NativeHandle, visible: bool);

    /// Block until the next message for `handle` arrives, then dispatch it
    fn dispatch_next_message(&self, handle: NativeHandle) -> PumpStatus;

    /// Show a modal dialog, optionally owned by a window
    fn message_box(
        &self,
        owner: Option<NativeHandle>,
        title: &str,
        text: &str,
        flags: MessageBoxFlags,
    ) -> MessageBoxResult;

    /// Human readable text for a platform status code, if the platform has one
    fn describe_status(&self, status: i32) -> Option<String>;
}
