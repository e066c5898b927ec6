//! Modal dialog options and results
//!
//! The flags form an independent bit-set: one modality flag, one icon flag
//! and one button layout are expected, but no combination is rejected. The
//! platform receives whatever the caller asked for.

use bitflags::bitflags;

bitflags! {
    /// Options for `Framework::show_message`
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct MessageBoxFlags: u32 {
        /// Block every top-level window of the calling thread
        const TASK_MODAL = 1 << 0;

        const ICON_WARNING = 1 << 1;
        const ICON_ERROR = 1 << 2;
        const ICON_INFO = 1 << 3;
        const ICON_QUESTION = 1 << 4;

        const BUTTON_OK = 1 << 5;
        const BUTTON_OK_CANCEL = 1 << 6;
        const BUTTON_YES_NO = 1 << 7;
        const BUTTON_RETRY_CANCEL = 1 << 8;
        const BUTTON_YES_NO_CANCEL = 1 << 9;
        const BUTTON_ABORT_RETRY_IGNORE = 1 << 10;
        const BUTTON_CANCEL_RETRY_CONTINUE = 1 << 11;
    }
}

impl MessageBoxFlags {
    /// Flags used for fatal error dialogs
    pub fn fatal() -> Self {
        Self::TASK_MODAL | Self::ICON_ERROR | Self::BUTTON_OK
    }
}

/// Button the user pressed to dismiss a dialog
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageBoxResult {
    Ok,
    Cancel,
    Yes,
    No,
    Retry,
    TryAgain,
    Abort,
    Continue,
    Ignore,
}
