//! Shared types, configuration, and wiring for the probe

pub mod config;
pub mod errors;
pub mod logging;
pub mod types;

pub use config::{DEFAULT_TARGET_TITLE, LogFormat, ProbeConfig};
pub use errors::ProbeError;
pub use types::{ProcessId, Rect, ThreadId, WindowId, WindowOwner};
