//! winframe - native top-level windows with one message-pump thread each
//!
//! `Framework` creates windows on dedicated threads and blocks the caller
//! until the new window exists. Applications poll `running()` to find out
//! when the last window has closed.

// Declared first so the logging macros are in scope everywhere below
#[macro_use]
pub mod log;

pub mod application;
pub mod domain;
pub mod platform;
pub mod shared;

pub use application::services::{halt, Framework, ProcessExit, Terminator};
pub use domain::{
    describe, ErrorCode, FrameworkError, MessageBoxFlags, MessageBoxResult, WindowId,
};
pub use shared::FrameworkConfig;

#[cfg(target_os = "windows")]
pub use platform::Win32Platform;
