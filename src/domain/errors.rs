//! Domain layer error types
//!
//! Every error a public call can return maps to a stable numeric
//! `ErrorCode`. The code is what `Framework::last_error` hands back and what
//! `describe` turns into text.

use thiserror::Error;

use crate::domain::value_objects::{NativeHandle, WindowId};

/// Text returned by `describe` for codes missing from the table
pub const UNKNOWN_CODE: &str = "Invalid error code!";

/// Stable numeric error codes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    None = 0,
    Internal = 1,
    NotInitialised = 2,
    InvalidArgument = 3,
    WindowNotFound = 4,
    IconLoadFailed = 5,
    CursorLoadFailed = 6,
    AlreadyInitialised = 7,
    ShutDown = 8,
    Platform = 9,
}

impl ErrorCode {
    /// Look up a raw code
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(ErrorCode::None),
            1 => Some(ErrorCode::Internal),
            2 => Some(ErrorCode::NotInitialised),
            3 => Some(ErrorCode::InvalidArgument),
            4 => Some(ErrorCode::WindowNotFound),
            5 => Some(ErrorCode::IconLoadFailed),
            6 => Some(ErrorCode::CursorLoadFailed),
            7 => Some(ErrorCode::AlreadyInitialised),
            8 => Some(ErrorCode::ShutDown),
            9 => Some(ErrorCode::Platform),
            _ => None,
        }
    }

    /// Raw numeric value
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Human readable description
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::None => "No error has occurred",
            ErrorCode::Internal => "An internal error occurred inside the framework",
            ErrorCode::NotInitialised => "The framework has not been initialised",
            ErrorCode::InvalidArgument => "An invalid argument was passed",
            ErrorCode::WindowNotFound => "No window exists with the given identifier",
            ErrorCode::IconLoadFailed => "The icon resource could not be loaded",
            ErrorCode::CursorLoadFailed => "The cursor resource could not be loaded",
            ErrorCode::AlreadyInitialised => "The framework has already been initialised",
            ErrorCode::ShutDown => "The last window has closed, no new windows can be created",
            ErrorCode::Platform => "A native platform call failed",
        }
    }
}

/// Describe any integer code. Never fails.
pub fn describe(code: i32) -> &'static str {
    ErrorCode::from_code(code)
        .map(ErrorCode::description)
        .unwrap_or(UNKNOWN_CODE)
}

/// A failed native call and the status the platform reported
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{call} failed with status {status}")]
pub struct PlatformError {
    /// Name of the native call
    pub call: &'static str,
    /// Platform status code (GetLastError on Win32)
    pub status: i32,
}

impl PlatformError {
    pub fn new(call: &'static str, status: i32) -> Self {
        Self { call, status }
    }
}

/// Registry sequencing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The identifier or the handle is already indexed
    #[error("window {id} (handle {handle}) is already registered")]
    DuplicateKey { id: WindowId, handle: NativeHandle },
}

/// Main framework error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameworkError {
    #[error("the framework has not been initialised")]
    NotInitialised,

    #[error("the framework has already been initialised")]
    AlreadyInitialised,

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("no window exists with identifier {0}")]
    WindowNotFound(WindowId),

    #[error("icon resource {0} could not be loaded")]
    IconLoadFailed(u16),

    #[error("cursor resource {0} could not be loaded")]
    CursorLoadFailed(u16),

    /// The running flag has gone false
    #[error("the last window has closed, no new windows can be created")]
    ShutDown,

    /// The pump thread ended without completing the creation handshake
    #[error("window thread exited before creation finished")]
    PumpAborted,

    #[error("failed to spawn window thread: {0}")]
    Spawn(String),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl FrameworkError {
    /// Numeric code stored as the last error
    pub fn code(&self) -> ErrorCode {
        match self {
            FrameworkError::NotInitialised => ErrorCode::NotInitialised,
            FrameworkError::AlreadyInitialised => ErrorCode::AlreadyInitialised,
            FrameworkError::InvalidArgument(_) => ErrorCode::InvalidArgument,
            FrameworkError::WindowNotFound(_) => ErrorCode::WindowNotFound,
            FrameworkError::IconLoadFailed(_) => ErrorCode::IconLoadFailed,
            FrameworkError::CursorLoadFailed(_) => ErrorCode::CursorLoadFailed,
            FrameworkError::ShutDown => ErrorCode::ShutDown,
            FrameworkError::Platform(_) => ErrorCode::Platform,
            FrameworkError::PumpAborted
            | FrameworkError::Spawn(_)
            | FrameworkError::Registry(_) => ErrorCode::Internal,
        }
    }
}
