//! WindowPump - the dedicated thread that creates and services one window
//!
//! The pump creates the native window, registers it, releases the waiting
//! caller through the handshake and then dispatches messages until the
//! platform reports the window destroyed.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::application::ports::{CreateParams, MessageSink, Platform, PumpStatus};
use crate::application::services::framework::Shared;
use crate::application::services::handshake::Completion;
use crate::domain::entities::{WindowDimensions, WindowPosition, WindowRecord};
use crate::domain::value_objects::NativeHandle;
use crate::domain::FrameworkError;

static PUMPS_SPAWNED: AtomicUsize = AtomicUsize::new(0);

pub struct WindowPump<P: Platform> {
    shared: Arc<Shared<P>>,
    params: CreateParams,
    completion: Completion,
}

impl<P: Platform> WindowPump<P> {
    pub fn new(shared: Arc<Shared<P>>, params: CreateParams, completion: Completion) -> Self {
        Self {
            shared,
            params,
            completion,
        }
    }

    /// Start the pump on its own thread
    pub fn spawn(self) -> io::Result<JoinHandle<()>> {
        let n = PUMPS_SPAWNED.fetch_add(1, Ordering::Relaxed) + 1;
        thread::Builder::new()
            .name(format!("window-pump-{}", n))
            .spawn(move || self.run())
    }

    fn run(self) {
        let WindowPump {
            shared,
            params,
            completion,
        } = self;
        log_at!(Debug, "Pump starting for window '{}'", params.name);

        let sink: Arc<dyn MessageSink> = shared.clone();
        let handle = match shared.platform.create(&params, sink) {
            Ok(handle) => handle,
            Err(e) => {
                log_at!(Error, "Window creation failed: {}", e);
                shared.reporter.report_fatal(&shared.platform, e.status);
                completion.finish(Err(e.into()));
                return;
            }
        };

        let id = match shared.admit() {
            Ok(id) => id,
            Err(e) => {
                // The last window closed while this one was being created
                log_at!(Warning, "Discarding window '{}': {}", params.name, e);
                if let Err(destroy) = shared.platform.destroy(handle) {
                    log_at!(Error, "Destroying window {} failed: {}", handle, destroy);
                }
                completion.finish(Err(e));
                return;
            }
        };
        let record = WindowRecord::new(
            id,
            handle,
            params.name,
            WindowPosition::new(params.x, params.y),
            WindowDimensions::new(params.width, params.height),
        );
        if let Err(e) = shared.registry.insert(record) {
            log_at!(Error, "Registry rejected window {}: {}", id, e);
            shared.retire();
            shared.reporter.report_fatal(&shared.platform, 0);
            completion.finish(Err(e.into()));
            return;
        }

        shared.platform.set_visible(handle, true);
        shared.registry.update(handle, |record| record.visible = true);

        log_at!(Debug, "Window {} created with handle {}", id, handle);
        completion.finish(Ok(id));

        Self::message_loop(&shared, handle);

        // A record still present here never saw its destroy notification
        if shared.registry.invalidate(id) {
            shared.retire();
        }
        log_at!(Debug, "Pump for window {} exited", id);
    }

    fn message_loop(shared: &Shared<P>, handle: NativeHandle) {
        loop {
            match shared.platform.dispatch_next_message(handle) {
                PumpStatus::Dispatched => {}
                PumpStatus::Destroyed => break,
                PumpStatus::Failed(e) => {
                    log_at!(Error, "Message retrieval for {} failed: {}", handle, e);
                    shared.reporter.report_fatal(&shared.platform, e.status);
                    shared
                        .reporter
                        .report_recoverable(&FrameworkError::Platform(e));
                    break;
                }
            }
        }
    }
}
