//! Winspect - Window discovery and diagnostics probe for Windows desktops
//!
//! This library locates a running application window by exact title and
//! enumerates every top-level window on the desktop, logging who owns each
//! one.
//!
//! ## Features
//!
//! - Window lookup by exact title, with class and geometry diagnostics
//! - Top-level window enumeration
//! - Per-window owner resolution (process id, thread id, executable path)
//!
//! ## Supported Environments
//!
//! - Win32 desktops (native)
//!
//! The window system sits behind the [`backend::WindowSystem`] trait, so the
//! probe logic and its tests run on any host.

pub mod backend;
pub mod cli;
pub mod core;
pub mod probe;

pub use backend::create_backend;
pub use cli::{build_cli, config_from_matches};
pub use core::logging::init_logging;
