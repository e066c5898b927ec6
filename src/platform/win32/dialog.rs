//! Modal message boxes

use windows::core::HSTRING;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::*;

use super::window::to_hwnd;
use crate::domain::value_objects::{MessageBoxFlags, MessageBoxResult, NativeHandle};

/// Translate option flags to native style bits. Combinations are not checked.
pub fn native_style(flags: MessageBoxFlags) -> MESSAGEBOX_STYLE {
    const TABLE: [(MessageBoxFlags, MESSAGEBOX_STYLE); 12] = [
        (MessageBoxFlags::TASK_MODAL, MB_TASKMODAL),
        (MessageBoxFlags::ICON_WARNING, MB_ICONWARNING),
        (MessageBoxFlags::ICON_ERROR, MB_ICONERROR),
        (MessageBoxFlags::ICON_INFO, MB_ICONINFORMATION),
        (MessageBoxFlags::ICON_QUESTION, MB_ICONQUESTION),
        (MessageBoxFlags::BUTTON_OK, MB_OK),
        (MessageBoxFlags::BUTTON_OK_CANCEL, MB_OKCANCEL),
        (MessageBoxFlags::BUTTON_YES_NO, MB_YESNO),
        (MessageBoxFlags::BUTTON_RETRY_CANCEL, MB_RETRYCANCEL),
        (MessageBoxFlags::BUTTON_YES_NO_CANCEL, MB_YESNOCANCEL),
        (MessageBoxFlags::BUTTON_ABORT_RETRY_IGNORE, MB_ABORTRETRYIGNORE),
        (MessageBoxFlags::BUTTON_CANCEL_RETRY_CONTINUE, MB_CANCELTRYCONTINUE),
    ];

    TABLE
        .iter()
        .filter(|(flag, _)| flags.contains(*flag))
        .fold(MESSAGEBOX_STYLE(0), |style, (_, native)| style | *native)
}

/// Map a native dialog result; anything unexpected counts as Cancel
pub fn result_from_native(result: MESSAGEBOX_RESULT) -> MessageBoxResult {
    match result {
        IDOK => MessageBoxResult::Ok,
        IDCANCEL => MessageBoxResult::Cancel,
        IDYES => MessageBoxResult::Yes,
        IDNO => MessageBoxResult::No,
        IDRETRY => MessageBoxResult::Retry,
        IDTRYAGAIN => MessageBoxResult::TryAgain,
        IDABORT => MessageBoxResult::Abort,
        IDCONTINUE => MessageBoxResult::Continue,
        IDIGNORE => MessageBoxResult::Ignore,
        _ => MessageBoxResult::Cancel,
    }
}

/// Show a message box and wait for the user
pub fn show_message_box(
    owner: Option<NativeHandle>,
    title: &str,
    text: &str,
    flags: MessageBoxFlags,
) -> MessageBoxResult {
    let owner = owner.map(to_hwnd).unwrap_or(HWND(std::ptr::null_mut()));
    let result = unsafe {
        MessageBoxW(
            owner,
            &HSTRING::from(text),
            &HSTRING::from(title),
            native_style(flags),
        )
    };
    result_from_native(result)
}
