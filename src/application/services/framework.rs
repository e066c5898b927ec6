//! Framework - lifecycle coordinator and public API
//!
//! Owns the platform, the registry and the lifecycle counters. Each
//! `create_window` call spawns a `WindowPump` and blocks on its own
//! handshake until the pump has created and registered the window.
//!
//! The live-window count and the running flag sit behind one mutex, so
//! "decrement, and clear running if this was the last window" is a single
//! step no matter how many windows close at the same time.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;

use crate::application::ports::{
    ClassSpec, CreateParams, Disposition, MessageSink, Platform, WindowMessage,
};
use crate::application::services::diagnostics::{ProcessExit, Reporter, Terminator};
use crate::application::services::handshake::Handshake;
use crate::application::services::window_pump::WindowPump;
use crate::application::services::window_registry::WindowRegistry;
use crate::domain::entities::{WindowDimensions, WindowPosition, WindowRecord};
use crate::domain::value_objects::{MessageBoxFlags, MessageBoxResult, NativeHandle, WindowId};
use crate::domain::FrameworkError;
use crate::shared::FrameworkConfig;

#[derive(Debug, Default)]
struct Lifecycle {
    initialised: bool,
    /// Class registration in progress
    registering: bool,
    running: bool,
    /// Windows created and not yet destroyed
    live: usize,
    /// Windows ever opened; source of identifiers
    opened: u32,
}

/// State shared between the coordinator and every pump thread
pub struct Shared<P: Platform> {
    pub(crate) platform: P,
    pub(crate) registry: WindowRegistry,
    pub(crate) reporter: Reporter,
    lifecycle: Mutex<Lifecycle>,
}

impl<P: Platform> Shared<P> {
    /// Count a newly created window and hand out its identifier.
    ///
    /// Fails once the last window has closed: `running` never comes back,
    /// so a window admitted now could not be counted.
    pub(crate) fn admit(&self) -> Result<WindowId, FrameworkError> {
        let mut lifecycle = self.lifecycle.lock();
        if !lifecycle.running {
            return Err(FrameworkError::ShutDown);
        }
        lifecycle.opened += 1;
        lifecycle.live += 1;
        Ok(WindowId::new(lifecycle.opened))
    }

    /// Count a window as gone. Returns true if it was the last one.
    pub(crate) fn retire(&self) -> bool {
        let mut lifecycle = self.lifecycle.lock();
        lifecycle.live = lifecycle.live.saturating_sub(1);
        if lifecycle.live == 0 {
            lifecycle.running = false;
            true
        } else {
            false
        }
    }

    /// Shared window procedure for every window
    pub(crate) fn window_procedure(
        &self,
        handle: NativeHandle,
        message: WindowMessage,
    ) -> Disposition {
        match message {
            WindowMessage::Close => {
                if let Err(e) = self.platform.destroy(handle) {
                    log_at!(Error, "Destroying window {} failed: {}", handle, e);
                }
                Disposition::Handled
            }
            WindowMessage::Destroy => {
                let Some(record) = self.registry.erase(handle) else {
                    return Disposition::Default;
                };
                if self.retire() {
                    log!("Last window ({}) closed, shutting down", record.id);
                    return Disposition::Handled;
                }
                Disposition::Default
            }
            WindowMessage::Moved { x, y } => {
                self.registry
                    .update(handle, |r| r.position = WindowPosition::new(x, y));
                Disposition::Default
            }
            WindowMessage::Resized { width, height } => {
                self.registry.update(handle, |r| {
                    r.dimensions = WindowDimensions::new(width, height)
                });
                Disposition::Default
            }
            WindowMessage::VisibilityChanged(visible) => {
                self.registry.update(handle, |r| r.visible = visible);
                Disposition::Default
            }
            WindowMessage::Other(_) => Disposition::Default,
        }
    }
}

impl<P: Platform> MessageSink for Shared<P> {
    fn on_message(&self, handle: NativeHandle, message: WindowMessage) -> Disposition {
        self.window_procedure(handle, message)
    }
}

struct PumpHandle {
    id: Option<WindowId>,
    thread: JoinHandle<()>,
}

/// Windowing framework instance
pub struct Framework<P: Platform> {
    shared: Arc<Shared<P>>,
    pumps: Mutex<Vec<PumpHandle>>,
}

impl<P: Platform> Framework<P> {
    /// Create an uninitialised framework whose fatal path ends the process
    pub fn new(platform: P, config: &FrameworkConfig) -> Self {
        Self::with_terminator(platform, config, Box::new(ProcessExit))
    }

    /// Create an uninitialised framework with a custom fatal-path terminator
    pub fn with_terminator(
        platform: P,
        config: &FrameworkConfig,
        terminator: Box<dyn Terminator>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                platform,
                registry: WindowRegistry::new(),
                reporter: Reporter::new(config, terminator),
                lifecycle: Mutex::new(Lifecycle::default()),
            }),
            pumps: Mutex::new(Vec::new()),
        }
    }

    /// Register the window class. A resource id of 0 means "none".
    ///
    /// Returns false if an icon or cursor could not be loaded (the class is
    /// still registered) or if the framework was already initialised.
    pub fn initialise(&self, icon_id: u16, cursor_id: u16) -> bool {
        {
            let mut lifecycle = self.shared.lifecycle.lock();
            if lifecycle.initialised || lifecycle.registering {
                drop(lifecycle);
                self.fail(FrameworkError::AlreadyInitialised);
                return false;
            }
            lifecycle.registering = true;
        }

        let spec = ClassSpec {
            icon_id: (icon_id != 0).then_some(icon_id),
            cursor_id: (cursor_id != 0).then_some(cursor_id),
        };
        let registration = match self.shared.platform.register_class(&spec) {
            Ok(registration) => registration,
            Err(e) => {
                log_at!(Error, "Window class registration failed: {}", e);
                self.shared.lifecycle.lock().registering = false;
                self.shared
                    .reporter
                    .report_fatal(&self.shared.platform, e.status);
                self.fail(e.into());
                return false;
            }
        };

        let mut success = true;
        if spec.icon_id.is_some() && !registration.icon_loaded {
            self.fail(FrameworkError::IconLoadFailed(icon_id));
            success = false;
        }
        if spec.cursor_id.is_some() && !registration.cursor_loaded {
            self.fail(FrameworkError::CursorLoadFailed(cursor_id));
            success = false;
        }

        let mut lifecycle = self.shared.lifecycle.lock();
        lifecycle.registering = false;
        lifecycle.initialised = true;
        lifecycle.running = true;
        log!("Framework initialised");
        success
    }

    /// Create a window and block until its pump thread has finished creating it
    pub fn create_window(
        &self,
        name: &str,
        width: i32,
        height: i32,
        x: i32,
        y: i32,
    ) -> Result<WindowId, FrameworkError> {
        if let Err(e) = self.check_create(name, width, height) {
            return Err(self.fail(e));
        }

        let params = CreateParams {
            name: name.to_string(),
            width: width as u32,
            height: height as u32,
            x,
            y,
        };
        let (handshake, completion) = Handshake::new();
        let pump = WindowPump::new(Arc::clone(&self.shared), params, completion);

        let thread = match pump.spawn() {
            Ok(thread) => thread,
            Err(e) => {
                log_at!(Error, "Could not spawn window thread: {}", e);
                let status = e.raw_os_error().unwrap_or(0);
                self.shared
                    .reporter
                    .report_fatal(&self.shared.platform, status);
                return Err(self.fail(FrameworkError::Spawn(e.to_string())));
            }
        };

        let outcome = handshake.wait();
        self.pumps.lock().push(PumpHandle {
            id: outcome.as_ref().ok().copied(),
            thread,
        });

        match outcome {
            Ok(id) => {
                log!("Window {} ('{}') created", id, name);
                Ok(id)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn check_create(&self, name: &str, width: i32, height: i32) -> Result<(), FrameworkError> {
        let lifecycle = self.shared.lifecycle.lock();
        if !lifecycle.initialised {
            return Err(FrameworkError::NotInitialised);
        }
        if name.is_empty() {
            return Err(FrameworkError::InvalidArgument("name must not be empty"));
        }
        if width <= 0 || height <= 0 {
            return Err(FrameworkError::InvalidArgument(
                "width and height must be positive",
            ));
        }
        if !lifecycle.running {
            return Err(FrameworkError::ShutDown);
        }
        Ok(())
    }

    /// Request that a window close, as if the user pressed its close button
    pub fn close_window(&self, id: WindowId) -> Result<(), FrameworkError> {
        let record = self.record(id)?;
        self.shared
            .platform
            .request_close(record.handle)
            .map_err(|e| self.fail(e.into()))
    }

    /// Wait for every pump thread, unregister the window class and release
    /// all window records.
    ///
    /// Every window must already be closed: a pump that is still
    /// dispatching never finishes, so this call would never return.
    pub fn uninitialise(self) {
        let pumps = std::mem::take(&mut *self.pumps.lock());
        for pump in pumps {
            if pump.thread.join().is_err() {
                log_at!(Error, "Pump thread for window {:?} panicked", pump.id);
            }
        }

        let was_initialised = {
            let mut lifecycle = self.shared.lifecycle.lock();
            std::mem::replace(&mut lifecycle.initialised, false)
        };
        if was_initialised {
            if let Err(e) = self.shared.platform.unregister_class() {
                log_at!(Error, "Window class unregistration failed: {}", e);
                self.shared
                    .reporter
                    .report_fatal(&self.shared.platform, e.status);
            }
        }

        let released = self.shared.registry.clear();
        log!("Framework uninitialised, {} window records released", released);
    }

    /// True until the last live window has been destroyed
    pub fn running(&self) -> bool {
        self.shared.lifecycle.lock().running
    }

    /// Number of live windows
    pub fn window_count(&self) -> usize {
        self.shared.lifecycle.lock().live
    }

    /// Identifiers of every window created so far, in creation order
    pub fn window_ids(&self) -> Vec<WindowId> {
        self.pumps.lock().iter().filter_map(|p| p.id).collect()
    }

    pub fn window_name(&self, id: WindowId) -> Result<String, FrameworkError> {
        self.record(id).map(|r| r.name)
    }

    pub fn window_width(&self, id: WindowId) -> Result<u32, FrameworkError> {
        self.record(id).map(|r| r.dimensions.width)
    }

    pub fn window_height(&self, id: WindowId) -> Result<u32, FrameworkError> {
        self.record(id).map(|r| r.dimensions.height)
    }

    pub fn window_visibility(&self, id: WindowId) -> Result<bool, FrameworkError> {
        self.record(id).map(|r| r.visible)
    }

    pub fn window_position(&self, id: WindowId) -> Result<(i32, i32), FrameworkError> {
        self.record(id).map(|r| (r.position.x, r.position.y))
    }

    /// Show a modal dialog. An unknown owner yields an unowned dialog.
    pub fn show_message(
        &self,
        owner: Option<WindowId>,
        title: &str,
        message: &str,
        flags: MessageBoxFlags,
    ) -> MessageBoxResult {
        let owner_handle = owner
            .and_then(|id| self.shared.registry.lookup_by_id(id))
            .filter(|r| r.valid)
            .map(|r| r.handle);
        self.shared
            .platform
            .message_box(owner_handle, title, message, flags)
    }

    /// Code of the last recorded error
    pub fn last_error(&self) -> i32 {
        self.shared.reporter.last_error()
    }

    fn record(&self, id: WindowId) -> Result<WindowRecord, FrameworkError> {
        self.shared
            .registry
            .lookup_by_id(id)
            .filter(|r| r.valid)
            .ok_or_else(|| self.fail(FrameworkError::WindowNotFound(id)))
    }

    fn fail(&self, error: FrameworkError) -> FrameworkError {
        self.shared.reporter.report_recoverable(&error);
        error
    }
}

/// Block the calling thread
pub fn halt(milliseconds: u64) {
    thread::sleep(Duration::from_millis(milliseconds));
}
