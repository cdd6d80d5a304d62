//! Window system abstraction
//!
//! This module provides the seam between the probe and the operating
//! system's window-management API, so tests can substitute a
//! deterministic in-memory implementation.

#[cfg(target_os = "windows")]
mod win32;

use std::path::PathBuf;
use std::sync::Arc;

use crate::core::types::{ProcessId, Rect, WindowId, WindowOwner};

/// A window system query that could not be completed.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("{call} failed: {message}")]
    Os { call: &'static str, message: String },

    #[error("process {pid} is not accessible: {message}")]
    ProcessInaccessible { pid: ProcessId, message: String },
}

/// Trait for window system implementations
pub trait WindowSystem: Send + Sync {
    /// Look up a top-level window by exact title, any class.
    ///
    /// Absence of a match is reported as `Ok(None)`, not an error.
    fn find_window(&self, title: &str) -> Result<Option<WindowId>, BackendError>;

    /// Snapshot of all top-level windows, in whatever order the OS
    /// reports them (top-to-bottom z-order on Win32, not guaranteed
    /// stable across versions).
    fn windows(&self) -> Result<Vec<WindowId>, BackendError>;

    /// Process and thread that created the window.
    fn window_owner(&self, window: WindowId) -> Result<WindowOwner, BackendError>;

    /// Executable path backing a running process.
    ///
    /// Opens the process with the minimal query right needed to read
    /// its image path; the handle is released before returning.
    fn process_image_path(&self, pid: ProcessId) -> Result<PathBuf, BackendError>;

    /// Registered class name of the window.
    fn window_class(&self, window: WindowId) -> Result<String, BackendError>;

    /// Outer frame rectangle in screen coordinates.
    fn window_rect(&self, window: WindowId) -> Result<Rect, BackendError>;

    /// Client-area rectangle (origin at 0,0).
    fn client_rect(&self, window: WindowId) -> Result<Rect, BackendError>;
}

/// Create the appropriate window system for the current host
pub fn create_backend() -> anyhow::Result<Arc<dyn WindowSystem>> {
    #[cfg(target_os = "windows")]
    {
        tracing::info!("Using Win32 window system");
        Ok(Arc::new(win32::Win32WindowSystem::new()))
    }

    #[cfg(not(target_os = "windows"))]
    {
        anyhow::bail!("no Win32 desktop detected; winspect only probes Windows window state")
    }
}
