//! Win32 window class, window procedure and per-window message loop

use std::cell::{Cell, RefCell};
use std::ffi::c_void;
use std::sync::Arc;

use windows::core::{Error, HSTRING, PCWSTR};
use windows::Win32::Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::Gdi::HBRUSH;
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::*;

use super::error::{last_status, status_of};
use crate::application::ports::{
    ClassRegistration, ClassSpec, CreateParams, Disposition, MessageSink, PumpStatus,
    WindowMessage,
};
use crate::domain::value_objects::NativeHandle;
use crate::domain::PlatformError;

// Each pump thread owns exactly one window, so the sink can live per thread
thread_local! {
    static WINDOW_SINK: RefCell<Option<Arc<dyn MessageSink>>> = RefCell::new(None);
    /// Set by WM_NCDESTROY; the handle value may be reused right after
    static WINDOW_DESTROYED: Cell<bool> = const { Cell::new(false) };
}

fn window_destroyed() -> bool {
    WINDOW_DESTROYED.with(Cell::get)
}

fn release_sink() {
    WINDOW_SINK.with(|cell| *cell.borrow_mut() = None);
}

pub(crate) fn to_hwnd(handle: NativeHandle) -> HWND {
    HWND(handle.as_raw() as *mut c_void)
}

pub(crate) fn from_hwnd(hwnd: HWND) -> NativeHandle {
    NativeHandle::from_raw(hwnd.0 as usize)
}

fn translate(msg: u32, wparam: WPARAM, lparam: LPARAM) -> WindowMessage {
    let low = (lparam.0 & 0xFFFF) as u16;
    let high = ((lparam.0 >> 16) & 0xFFFF) as u16;
    match msg {
        WM_CLOSE => WindowMessage::Close,
        WM_DESTROY => WindowMessage::Destroy,
        WM_MOVE => WindowMessage::Moved {
            x: low as i16 as i32,
            y: high as i16 as i32,
        },
        WM_SIZE => WindowMessage::Resized {
            width: low as u32,
            height: high as u32,
        },
        WM_SHOWWINDOW => WindowMessage::VisibilityChanged(wparam.0 != 0),
        other => WindowMessage::Other(other),
    }
}

/// Window procedure
unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if msg == WM_NCDESTROY {
        WINDOW_DESTROYED.with(|destroyed| destroyed.set(true));
    }

    // Clone out of the cell: the sink may re-enter (DestroyWindow sends WM_DESTROY)
    let sink = WINDOW_SINK.with(|cell| cell.borrow().clone());

    let disposition = match sink {
        Some(sink) => sink.on_message(from_hwnd(hwnd), translate(msg, wparam, lparam)),
        None => Disposition::Default,
    };

    match disposition {
        Disposition::Handled => LRESULT(0),
        Disposition::Default => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

fn module_instance() -> Result<HINSTANCE, PlatformError> {
    unsafe {
        GetModuleHandleW(None)
            .map(HINSTANCE::from)
            .map_err(|e| PlatformError::new("GetModuleHandleW", status_of(&e)))
    }
}

fn resource(id: u16) -> PCWSTR {
    // MAKEINTRESOURCEW
    PCWSTR(id as usize as *const u16)
}

/// Register the window class (call once at startup)
pub fn register_window_class(
    class_name: &HSTRING,
    spec: &ClassSpec,
) -> Result<ClassRegistration, PlatformError> {
    let hinstance = module_instance()?;

    unsafe {
        let icon = spec
            .icon_id
            .map(|id| LoadIconW(hinstance, resource(id)).ok());
        let cursor = match spec.cursor_id {
            Some(id) => LoadCursorW(hinstance, resource(id)).ok(),
            None => LoadCursorW(None, IDC_ARROW).ok(),
        };
        let icon_handle = icon.flatten().unwrap_or_default();

        let wc = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            style: WNDCLASS_STYLES(0),
            lpfnWndProc: Some(wnd_proc),
            cbClsExtra: 0,
            cbWndExtra: 0,
            hInstance: hinstance,
            hIcon: icon_handle,
            hCursor: cursor.unwrap_or_default(),
            hbrBackground: HBRUSH::default(),
            lpszMenuName: PCWSTR::null(),
            lpszClassName: PCWSTR(class_name.as_ptr()),
            hIconSm: icon_handle,
        };

        let atom = RegisterClassExW(&wc);
        if atom == 0 {
            return Err(PlatformError::new("RegisterClassExW", last_status()));
        }

        Ok(ClassRegistration {
            icon_loaded: icon.map_or(true, |loaded| loaded.is_some()),
            cursor_loaded: spec.cursor_id.is_none() || cursor.is_some(),
        })
    }
}

/// Unregister the window class (call at shutdown)
pub fn unregister_window_class(class_name: &HSTRING) -> Result<(), PlatformError> {
    let hinstance = module_instance()?;
    unsafe {
        UnregisterClassW(PCWSTR(class_name.as_ptr()), hinstance)
            .map_err(|e| PlatformError::new("UnregisterClassW", status_of(&e)))
    }
}

/// Create a window on the calling thread and route its messages to `sink`
pub fn create_window(
    class_name: &HSTRING,
    params: &CreateParams,
    sink: Arc<dyn MessageSink>,
) -> Result<NativeHandle, PlatformError> {
    let hinstance = module_instance()?;
    WINDOW_SINK.with(|cell| *cell.borrow_mut() = Some(sink));
    WINDOW_DESTROYED.with(|destroyed| destroyed.set(false));

    // 0 lets Windows pick the position
    let x = if params.x == 0 { CW_USEDEFAULT } else { params.x };
    let y = if params.y == 0 { CW_USEDEFAULT } else { params.y };

    unsafe {
        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE(0),
            PCWSTR(class_name.as_ptr()),
            &HSTRING::from(params.name.as_str()),
            WS_MINIMIZEBOX | WS_CAPTION | WS_SYSMENU,
            x,
            y,
            params.width as i32,
            params.height as i32,
            None,
            None,
            hinstance,
            None,
        )
        .map_err(|e: Error| {
            release_sink();
            PlatformError::new("CreateWindowExW", status_of(&e))
        })?;

        Ok(from_hwnd(hwnd))
    }
}

/// Destroy the window (sends WM_DESTROY synchronously)
pub fn destroy_window(handle: NativeHandle) -> Result<(), PlatformError> {
    unsafe {
        DestroyWindow(to_hwnd(handle))
            .map_err(|e| PlatformError::new("DestroyWindow", status_of(&e)))
    }
}

/// Post WM_CLOSE; safe from any thread
pub fn post_close(handle: NativeHandle) -> Result<(), PlatformError> {
    unsafe {
        PostMessageW(to_hwnd(handle), WM_CLOSE, WPARAM(0), LPARAM(0))
            .map_err(|e| PlatformError::new("PostMessageW", status_of(&e)))
    }
}

pub fn set_window_visible(handle: NativeHandle, visible: bool) {
    let command = if visible { SW_SHOW } else { SW_HIDE };
    unsafe {
        let _ = ShowWindow(to_hwnd(handle), command);
    }
}

/// Fetch the next message for one window and dispatch it.
///
/// Must run on the thread that created the window. Destruction is read from
/// the WM_NCDESTROY flag, never from the handle, since another thread may
/// already own a window with the same handle value.
pub fn pump_message(handle: NativeHandle) -> PumpStatus {
    if window_destroyed() {
        release_sink();
        return PumpStatus::Destroyed;
    }

    let hwnd = to_hwnd(handle);
    unsafe {
        let mut msg = MSG::default();
        let ret = GetMessageW(&mut msg, hwnd, 0, 0);

        if ret.0 == -1 {
            if window_destroyed() {
                release_sink();
                return PumpStatus::Destroyed;
            }
            return PumpStatus::Failed(PlatformError::new("GetMessageW", last_status()));
        }

        let _ = TranslateMessage(&msg);
        DispatchMessageW(&msg);
    }

    if window_destroyed() {
        release_sink();
        PumpStatus::Destroyed
    } else {
        PumpStatus::Dispatched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PassThrough;

    impl MessageSink for PassThrough {
        fn on_message(&self, _handle: NativeHandle, _message: WindowMessage) -> Disposition {
            Disposition::Default
        }
    }

    #[test]
    fn test_nc_destroy_marks_thread_window_destroyed() {
        WINDOW_DESTROYED.with(|destroyed| destroyed.set(false));
        unsafe {
            wnd_proc(HWND::default(), WM_NCDESTROY, WPARAM(0), LPARAM(0));
        }
        assert!(window_destroyed());
    }

    #[test]
    fn test_destroyed_window_ends_pump_without_touching_handle() {
        let class_name = HSTRING::from("winframeWindowTestClass");
        register_window_class(&class_name, &ClassSpec::default()).unwrap();

        let params = CreateParams {
            name: "pump test".to_string(),
            width: 120,
            height: 80,
            x: 0,
            y: 0,
        };
        let handle = create_window(&class_name, &params, Arc::new(PassThrough)).unwrap();
        assert!(!window_destroyed());

        destroy_window(handle).unwrap();
        assert!(window_destroyed());
        assert_eq!(pump_message(handle), PumpStatus::Destroyed);
        assert!(WINDOW_SINK.with(|cell| cell.borrow().is_none()));

        unregister_window_class(&class_name).unwrap();
    }
}
