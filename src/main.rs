//! winframe demo - opens two windows and waits for both to be closed

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(target_os = "windows")]
fn main() {
    use winframe::{
        describe, halt, log, Framework, FrameworkConfig, MessageBoxFlags, Win32Platform,
    };

    let config = FrameworkConfig::load();
    winframe::log::init(&config);
    log!("main() starting");

    let framework = Framework::new(Win32Platform::new(&config.class_name), &config);
    if !framework.initialise(0, 0) {
        let code = framework.last_error();
        log!("Initialisation incomplete: {} ({})", describe(code), code);
    }

    let windows = [("winframe - first", 640, 480), ("winframe - second", 480, 320)];
    for (name, width, height) in windows {
        match framework.create_window(name, width, height, 0, 0) {
            Ok(id) => log!("Opened window {} '{}'", id, name),
            Err(e) => {
                log!("Could not open '{}': {}", name, e);
                framework.show_message(
                    None,
                    "winframe",
                    &e.to_string(),
                    MessageBoxFlags::TASK_MODAL
                        | MessageBoxFlags::ICON_WARNING
                        | MessageBoxFlags::BUTTON_OK,
                );
            }
        }
    }

    log!("{} windows open, waiting for them to close", framework.window_count());
    while framework.running() && framework.window_count() > 0 {
        halt(16);
    }

    log!("Cleaning up...");
    framework.uninitialise();
    log!("winframe exited normally.");
}

#[cfg(not(target_os = "windows"))]
fn main() {
    eprintln!("winframe only supports Windows");
    std::process::exit(1);
}
