//! In-memory platform for tests
//!
//! Every window gets a channel standing in for its native message queue.
//! `destroy` delivers the destroy notification synchronously on the calling
//! thread, as Win32 does, and freed handles are handed out again by the next
//! `create`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::application::ports::{
    ClassRegistration, ClassSpec, CreateParams, MessageSink, Platform, PumpStatus, WindowMessage,
};
use crate::application::services::Terminator;
use crate::domain::value_objects::{MessageBoxFlags, MessageBoxResult, NativeHandle};
use crate::domain::PlatformError;

/// Status the fake refuses to describe
pub const UNFORMATTABLE: i32 = -7;

/// ERROR_INVALID_WINDOW_HANDLE
const INVALID_HANDLE_STATUS: i32 = 1400;

/// A recorded `message_box` call
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogCall {
    pub owner: Option<NativeHandle>,
    pub title: String,
    pub text: String,
    pub flags: MessageBoxFlags,
}

#[derive(Default)]
struct GateState {
    arrived: bool,
    released: bool,
}

/// Holds a platform call until the test releases it
#[derive(Default)]
pub struct Gate {
    state: Mutex<GateState>,
    changed: Condvar,
}

impl Gate {
    /// Block until a call has reached the gate
    pub fn wait_arrival(&self) {
        let mut state = self.state.lock();
        while !state.arrived {
            self.changed.wait(&mut state);
        }
    }

    /// Let the held call continue
    pub fn release(&self) {
        self.state.lock().released = true;
        self.changed.notify_all();
    }

    fn pass(&self) {
        let mut state = self.state.lock();
        state.arrived = true;
        self.changed.notify_all();
        while !state.released {
            self.changed.wait(&mut state);
        }
    }
}

struct FakeWindow {
    name: String,
    queue: Sender<WindowMessage>,
    inbox: Arc<Mutex<Receiver<WindowMessage>>>,
    sink: Arc<dyn MessageSink>,
}

struct FakeState {
    next_handle: usize,
    free_handles: Vec<usize>,
    windows: HashMap<NativeHandle, FakeWindow>,
    created: Vec<CreateParams>,
    visibility: HashMap<NativeHandle, bool>,
    dialogs: Vec<DialogCall>,
    dialog_answer: MessageBoxResult,
    class_registered: bool,
    registrations: usize,
    last_class_spec: Option<ClassSpec>,
    missing_icon: bool,
    missing_cursor: bool,
    fail_register: Option<i32>,
    fail_create: Option<i32>,
    fail_dispatch: Option<i32>,
    register_gate: Option<Arc<Gate>>,
    create_gates: HashMap<String, Arc<Gate>>,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            next_handle: 0x100,
            free_handles: Vec::new(),
            windows: HashMap::new(),
            created: Vec::new(),
            visibility: HashMap::new(),
            dialogs: Vec::new(),
            dialog_answer: MessageBoxResult::Ok,
            class_registered: false,
            registrations: 0,
            last_class_spec: None,
            missing_icon: false,
            missing_cursor: false,
            fail_register: None,
            fail_create: None,
            fail_dispatch: None,
            register_gate: None,
            create_gates: HashMap::new(),
        }
    }
}

/// Cloneable handle to one shared fake platform
#[derive(Clone, Default)]
pub struct FakePlatform {
    state: Arc<Mutex<FakeState>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_missing_icon(&self, missing: bool) {
        self.state.lock().missing_icon = missing;
    }

    pub fn set_missing_cursor(&self, missing: bool) {
        self.state.lock().missing_cursor = missing;
    }

    pub fn fail_register(&self, status: i32) {
        self.state.lock().fail_register = Some(status);
    }

    pub fn fail_create(&self, status: i32) {
        self.state.lock().fail_create = Some(status);
    }

    /// Make every later message retrieval fail with `status`
    pub fn fail_dispatch(&self, status: i32) {
        self.state.lock().fail_dispatch = Some(status);
    }

    /// Hold the next `register_class` call at a gate
    pub fn gate_register(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.state.lock().register_gate = Some(Arc::clone(&gate));
        gate
    }

    /// Hold `create` for the window with the given title at a gate
    pub fn gate_create(&self, name: &str) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.state
            .lock()
            .create_gates
            .insert(name.to_string(), Arc::clone(&gate));
        gate
    }

    pub fn set_dialog_answer(&self, answer: MessageBoxResult) {
        self.state.lock().dialog_answer = answer;
    }

    pub fn class_registered(&self) -> bool {
        self.state.lock().class_registered
    }

    pub fn registrations(&self) -> usize {
        self.state.lock().registrations
    }

    pub fn last_class_spec(&self) -> Option<ClassSpec> {
        self.state.lock().last_class_spec
    }

    /// Parameters of every successful `create`
    pub fn created(&self) -> Vec<CreateParams> {
        self.state.lock().created.clone()
    }

    pub fn dialogs(&self) -> Vec<DialogCall> {
        self.state.lock().dialogs.clone()
    }

    /// Number of windows that have not been destroyed
    pub fn live_windows(&self) -> usize {
        self.state.lock().windows.len()
    }

    /// Handle of the live window with the given title
    pub fn handle_of(&self, name: &str) -> Option<NativeHandle> {
        self.state
            .lock()
            .windows
            .iter()
            .find(|(_, w)| w.name == name)
            .map(|(handle, _)| *handle)
    }

    pub fn is_visible(&self, handle: NativeHandle) -> bool {
        self.state
            .lock()
            .visibility
            .get(&handle)
            .copied()
            .unwrap_or(false)
    }

    /// Queue a message for a window's pump
    pub fn post(&self, handle: NativeHandle, message: WindowMessage) -> bool {
        match self.state.lock().windows.get(&handle) {
            Some(window) => window.queue.send(message).is_ok(),
            None => false,
        }
    }
}

impl Platform for FakePlatform {
    fn register_class(&self, spec: &ClassSpec) -> Result<ClassRegistration, PlatformError> {
        let gate = self.state.lock().register_gate.take();
        if let Some(gate) = gate {
            gate.pass();
        }

        let mut state = self.state.lock();
        state.last_class_spec = Some(*spec);
        if let Some(status) = state.fail_register {
            return Err(PlatformError::new("RegisterClassExW", status));
        }
        state.class_registered = true;
        state.registrations += 1;
        Ok(ClassRegistration {
            icon_loaded: !state.missing_icon,
            cursor_loaded: !state.missing_cursor,
        })
    }

    fn unregister_class(&self) -> Result<(), PlatformError> {
        let mut state = self.state.lock();
        if !state.class_registered {
            return Err(PlatformError::new("UnregisterClassW", 1411));
        }
        state.class_registered = false;
        Ok(())
    }

    fn create(
        &self,
        params: &CreateParams,
        sink: Arc<dyn MessageSink>,
    ) -> Result<NativeHandle, PlatformError> {
        let gate = self.state.lock().create_gates.remove(&params.name);
        if let Some(gate) = gate {
            gate.pass();
        }

        let mut state = self.state.lock();
        if let Some(status) = state.fail_create {
            return Err(PlatformError::new("CreateWindowExW", status));
        }

        let raw = match state.free_handles.pop() {
            Some(raw) => raw,
            None => {
                state.next_handle += 0x10;
                state.next_handle
            }
        };
        let handle = NativeHandle::from_raw(raw);
        let (queue, inbox) = mpsc::channel();
        state.windows.insert(
            handle,
            FakeWindow {
                name: params.name.clone(),
                queue,
                inbox: Arc::new(Mutex::new(inbox)),
                sink,
            },
        );
        state.created.push(params.clone());
        Ok(handle)
    }

    fn destroy(&self, handle: NativeHandle) -> Result<(), PlatformError> {
        let sink = match self.state.lock().windows.get(&handle) {
            Some(window) => Arc::clone(&window.sink),
            None => {
                return Err(PlatformError::new(
                    "DestroyWindow",
                    INVALID_HANDLE_STATUS,
                ))
            }
        };

        sink.on_message(handle, WindowMessage::Destroy);

        let mut state = self.state.lock();
        state.windows.remove(&handle);
        state.visibility.remove(&handle);
        state.free_handles.push(handle.as_raw());
        Ok(())
    }

    fn request_close(&self, handle: NativeHandle) -> Result<(), PlatformError> {
        if self.post(handle, WindowMessage::Close) {
            Ok(())
        } else {
            Err(PlatformError::new("PostMessageW", INVALID_HANDLE_STATUS))
        }
    }

    fn set_visible(&self, handle: NativeHandle, visible: bool) {
        let sink = {
            let mut state = self.state.lock();
            state.visibility.insert(handle, visible);
            state.windows.get(&handle).map(|w| Arc::clone(&w.sink))
        };
        if let Some(sink) = sink {
            sink.on_message(handle, WindowMessage::VisibilityChanged(visible));
        }
    }

    fn dispatch_next_message(&self, handle: NativeHandle) -> PumpStatus {
        let (inbox, sink) = {
            let state = self.state.lock();
            if let Some(status) = state.fail_dispatch {
                return PumpStatus::Failed(PlatformError::new("GetMessageW", status));
            }
            match state.windows.get(&handle) {
                Some(window) => (Arc::clone(&window.inbox), Arc::clone(&window.sink)),
                None => return PumpStatus::Destroyed,
            }
        };

        let message = inbox.lock().recv();
        let Ok(message) = message else {
            return PumpStatus::Destroyed;
        };
        sink.on_message(handle, message);

        // The handle may have been destroyed and handed to a newer window
        let still_ours = self
            .state
            .lock()
            .windows
            .get(&handle)
            .is_some_and(|w| Arc::ptr_eq(&w.inbox, &inbox));
        if still_ours {
            PumpStatus::Dispatched
        } else {
            PumpStatus::Destroyed
        }
    }

    fn message_box(
        &self,
        owner: Option<NativeHandle>,
        title: &str,
        text: &str,
        flags: MessageBoxFlags,
    ) -> MessageBoxResult {
        let mut state = self.state.lock();
        state.dialogs.push(DialogCall {
            owner,
            title: title.to_string(),
            text: text.to_string(),
            flags,
        });
        state.dialog_answer
    }

    fn describe_status(&self, status: i32) -> Option<String> {
        if status == UNFORMATTABLE {
            None
        } else {
            Some(format!("fake status {}", status))
        }
    }
}

/// Terminator that only counts how often the fatal path was reached
#[derive(Clone, Default)]
pub struct RecordingTerminator {
    calls: Arc<AtomicUsize>,
    last_exit_code: Arc<AtomicI32>,
}

impl RecordingTerminator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_exit_code(&self) -> Option<i32> {
        (self.calls() > 0).then(|| self.last_exit_code.load(Ordering::SeqCst))
    }
}

impl Terminator for RecordingTerminator {
    fn terminate(&self, exit_code: i32) {
        self.last_exit_code.store(exit_code, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}
