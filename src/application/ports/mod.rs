//! Application Ports - Interfaces implemented by infrastructure

pub mod platform_port;

pub use platform_port::{
    ClassRegistration, ClassSpec, CreateParams, Disposition, MessageSink, Platform, PumpStatus,
    WindowMessage,
};
