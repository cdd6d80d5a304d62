//! Winspect - Window discovery and diagnostics probe
//!
//! Finds the target window by title, then walks every top-level window on
//! the desktop and logs its owning process, thread, and executable path.

use winspect::{build_cli, config_from_matches, create_backend, init_logging, probe};

fn main() {
    let matches = build_cli().get_matches();

    // Build-time version, bound once here and injected everywhere else.
    let config = config_from_matches(env!("CARGO_PKG_VERSION"), &matches);

    init_logging(&config);

    let backend = match create_backend() {
        Ok(backend) => backend,
        Err(e) => {
            tracing::error!("{:#}", e);
            std::process::exit(1);
        }
    };

    match probe::run(backend.as_ref(), &config) {
        Ok(summary) => {
            if summary.metadata_failures > 0 {
                tracing::info!(
                    "Metadata could not be resolved for {} of {} windows",
                    summary.metadata_failures,
                    summary.windows_visited
                );
            }
        }
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(i32::from(e.exit_code()));
        }
    }
}
