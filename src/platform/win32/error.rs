//! Win32 status codes

use windows::core::{Error, HRESULT};
use windows::Win32::Foundation::GetLastError;

/// Status of the last failed Win32 call on this thread
pub fn last_status() -> i32 {
    unsafe { GetLastError().0 as i32 }
}

/// Win32 status carried by a `windows::core::Error`.
///
/// Errors built from GetLastError are HRESULTs in the FACILITY_WIN32 range;
/// those are unwrapped back to the plain Win32 code.
pub fn status_of(error: &Error) -> i32 {
    let hr = error.code().0 as u32;
    if hr & 0xFFFF_0000 == 0x8007_0000 {
        (hr & 0xFFFF) as i32
    } else {
        hr as i32
    }
}

/// System text for a status, None if the system has none
pub fn format_status(status: i32) -> Option<String> {
    let hr = if status < 0 {
        HRESULT(status)
    } else {
        HRESULT::from_win32(status as u32)
    };
    let message = Error::from(hr).message();
    let message = message.trim();
    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}
