//! Win32 platform implementation

pub mod dialog;
pub mod error;
pub mod window;

use std::sync::Arc;

use windows::core::HSTRING;

use crate::application::ports::{
    ClassRegistration, ClassSpec, CreateParams, MessageSink, Platform, PumpStatus,
};
use crate::domain::value_objects::{MessageBoxFlags, MessageBoxResult, NativeHandle};
use crate::domain::PlatformError;

/// Windows backend for `Framework`
pub struct Win32Platform {
    class_name: HSTRING,
}

impl Win32Platform {
    /// Backend whose windows use the given class name
    pub fn new(class_name: &str) -> Self {
        Self {
            class_name: HSTRING::from(class_name),
        }
    }
}

impl Platform for Win32Platform {
    fn register_class(&self, spec: &ClassSpec) -> Result<ClassRegistration, PlatformError> {
        window::register_window_class(&self.class_name, spec)
    }

    fn unregister_class(&self) -> Result<(), PlatformError> {
        window::unregister_window_class(&self.class_name)
    }

    fn create(
        &self,
        params: &CreateParams,
        sink: Arc<dyn MessageSink>,
    ) -> Result<NativeHandle, PlatformError> {
        window::create_window(&self.class_name, params, sink)
    }

    fn destroy(&self, handle: NativeHandle) -> Result<(), PlatformError> {
        window::destroy_window(handle)
    }

    fn request_close(&self, handle: NativeHandle) -> Result<(), PlatformError> {
        window::post_close(handle)
    }

    fn set_visible(&self, handle: NativeHandle, visible: bool) {
        window::set_window_visible(handle, visible);
    }

    fn dispatch_next_message(&self, handle: NativeHandle) -> PumpStatus {
        window::pump_message(handle)
    }

    fn message_box(
        &self,
        owner: Option<NativeHandle>,
        title: &str,
        text: &str,
        flags: MessageBoxFlags,
    ) -> MessageBoxResult {
        dialog::show_message_box(owner, title, text, flags)
    }

    fn describe_status(&self, status: i32) -> Option<String> {
        error::format_status(status)
    }
}
