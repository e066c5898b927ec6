//! Window identifiers and native handles

use std::fmt;

/// Stable identifier handed to applications for a window.
///
/// Identifiers are assigned from a monotonic counter and are never reused
/// within a process run, even when the platform recycles native handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u32);

impl WindowId {
    /// Wrap a raw identifier value
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw identifier value
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque platform window handle.
///
/// Unique while the window exists; the platform may hand the same value out
/// again once the window has been destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NativeHandle(usize);

impl NativeHandle {
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    pub const fn as_raw(self) -> usize {
        self.0
    }
}

impl fmt::Display for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_id_ordering() {
        assert!(WindowId::new(1) < WindowId::new(2));
        assert_eq!(WindowId::new(7).get(), 7);
        assert_eq!(WindowId::new(12).to_string(), "12");
    }

    #[test]
    fn test_native_handle_display() {
        let handle = NativeHandle::from_raw(0x1A2B);
        assert_eq!(handle.to_string(), "0x1A2B");
        assert_eq!(handle.as_raw(), 0x1A2B);
    }
}
