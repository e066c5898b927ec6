//! Reporter - recoverable error bookkeeping and the fatal error path
//!
//! Recoverable errors only update the last-error code. Fatal errors show a
//! blocking dialog, write a crash log outside debug mode and then hand over
//! to the `Terminator`, which ends the process in production.

use std::fs::File;
use std::io::Write;
use std::panic::Location;
use std::path::PathBuf;
use std::sync::atomic::{AtomicI32, Ordering};

use chrono::Local;

use crate::application::ports::Platform;
use crate::domain::value_objects::MessageBoxFlags;
use crate::domain::{ErrorCode, FrameworkError};
use crate::shared::FrameworkConfig;

/// Shown when the platform cannot format a status code
pub const UNFORMATTABLE_STATUS: &str = "An error occurred which even the error handler could not \
     handle. This is usually caused by the error message being too long.";

/// Exit code used by the fatal path
pub const FATAL_EXIT_CODE: i32 = -1;

/// Final step of the fatal path
pub trait Terminator: Send + Sync {
    fn terminate(&self, exit_code: i32);
}

/// Ends the process
pub struct ProcessExit;

impl Terminator for ProcessExit {
    fn terminate(&self, exit_code: i32) {
        std::process::exit(exit_code);
    }
}

/// Error reporter shared by the coordinator and every pump thread
pub struct Reporter {
    last_error: AtomicI32,
    debug: bool,
    crash_log: PathBuf,
    terminator: Box<dyn Terminator>,
}

impl Reporter {
    pub fn new(config: &FrameworkConfig, terminator: Box<dyn Terminator>) -> Self {
        Self {
            last_error: AtomicI32::new(ErrorCode::None.code()),
            debug: config.debug,
            crash_log: config.crash_log.clone(),
            terminator,
        }
    }

    /// Last recorded error code
    pub fn last_error(&self) -> i32 {
        self.last_error.load(Ordering::SeqCst)
    }

    /// Store the code of a recoverable error for later retrieval
    pub fn report_recoverable(&self, error: &FrameworkError) {
        self.last_error.store(error.code().code(), Ordering::SeqCst);
        if self.debug {
            log_at!(Warning, "{} (code {})", error, error.code().code());
        }
    }

    /// Present a fatal platform error and terminate.
    ///
    /// Returns only when the injected terminator does not end the process.
    #[track_caller]
    pub fn report_fatal<P: Platform + ?Sized>(&self, platform: &P, status: i32) {
        let location = Location::caller();
        log_at!(
            Error,
            "Fatal platform error {} at {}:{}",
            status,
            location.file(),
            location.line()
        );

        let (title, text) = if self.debug {
            ("Internal Error!", self.debug_text(platform, status, location))
        } else {
            if let Err(e) = self.write_crash_log(status, location) {
                log_at!(Error, "Could not write crash log {:?}: {}", self.crash_log, e);
            }
            (
                "Critical Error!",
                "A critical error occurred, the application must quit now!\n\n\
                 For more information check the log files in the application directory."
                    .to_string(),
            )
        };

        platform.message_box(None, title, &text, MessageBoxFlags::fatal());
        self.terminator.terminate(FATAL_EXIT_CODE);
    }

    fn debug_text<P: Platform + ?Sized>(
        &self,
        platform: &P,
        status: i32,
        location: &Location<'_>,
    ) -> String {
        match platform.describe_status(status) {
            Some(message) => format!(
                "A platform call resulted in fatal error {} at {}:{}.\n\n{}\n\n\
                 This is an internal error, the application must quit now.",
                status,
                location.file(),
                location.line(),
                message.trim_end()
            ),
            None => UNFORMATTABLE_STATUS.to_string(),
        }
    }

    fn write_crash_log(&self, status: i32, location: &Location<'_>) -> std::io::Result<()> {
        let mut file = File::create(&self.crash_log)?;
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

        writeln!(
            file,
            "[ {} ]: Unhandled platform error! {} at {}:{}",
            timestamp,
            status,
            location.file(),
            location.line()
        )?;
        writeln!(file, "[ {} ]: Fatal Error, application must abort!", timestamp)?;
        file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fake::{FakePlatform, RecordingTerminator, UNFORMATTABLE};
    use tempfile::TempDir;

    fn reporter(debug: bool, dir: &TempDir) -> (Reporter, RecordingTerminator) {
        let config = FrameworkConfig {
            debug,
            crash_log: dir.path().join("Last_Log.txt"),
            ..Default::default()
        };
        let terminator = RecordingTerminator::default();
        let reporter = Reporter::new(&config, Box::new(terminator.clone()));
        (reporter, terminator)
    }

    #[test]
    fn test_recoverable_sets_last_error() {
        let dir = TempDir::new().unwrap();
        let (reporter, terminator) = reporter(true, &dir);
        assert_eq!(reporter.last_error(), 0);

        reporter.report_recoverable(&FrameworkError::InvalidArgument("width"));

        assert_eq!(reporter.last_error(), ErrorCode::InvalidArgument.code());
        assert_eq!(terminator.calls(), 0);
    }

    #[test]
    fn test_fatal_release_writes_crash_log() {
        let dir = TempDir::new().unwrap();
        let (reporter, terminator) = reporter(false, &dir);
        let platform = FakePlatform::new();

        reporter.report_fatal(&platform, 1407);

        assert_eq!(terminator.calls(), 1);
        assert_eq!(terminator.last_exit_code(), Some(FATAL_EXIT_CODE));

        let log = std::fs::read_to_string(dir.path().join("Last_Log.txt")).unwrap();
        assert!(log.contains("Unhandled platform error! 1407 at"));
        assert!(log.contains("diagnostics.rs"));
        assert!(log.contains("Fatal Error, application must abort!"));

        let dialogs = platform.dialogs();
        assert_eq!(dialogs.len(), 1);
        assert_eq!(dialogs[0].title, "Critical Error!");
        assert_eq!(dialogs[0].flags, MessageBoxFlags::fatal());
        assert!(dialogs[0].owner.is_none());
    }

    #[test]
    fn test_fatal_debug_shows_details_without_log() {
        let dir = TempDir::new().unwrap();
        let (reporter, terminator) = reporter(true, &dir);
        let platform = FakePlatform::new();

        reporter.report_fatal(&platform, 1400);

        assert_eq!(terminator.calls(), 1);
        assert!(!dir.path().join("Last_Log.txt").exists());

        let dialogs = platform.dialogs();
        assert_eq!(dialogs[0].title, "Internal Error!");
        assert!(dialogs[0].text.contains("fatal error 1400"));
        assert!(dialogs[0].text.contains("fake status 1400"));
    }

    #[test]
    fn test_fatal_falls_back_when_status_unformattable() {
        let dir = TempDir::new().unwrap();
        let (reporter, _terminator) = reporter(true, &dir);
        let platform = FakePlatform::new();

        reporter.report_fatal(&platform, UNFORMATTABLE);

        assert_eq!(platform.dialogs()[0].text, UNFORMATTABLE_STATUS);
    }
}
