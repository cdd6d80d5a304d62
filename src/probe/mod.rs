//! Window Locator/Enumerator
//!
//! Two one-shot, stateless queries against the window system: find a
//! single top-level window by exact title, and walk every top-level
//! window resolving who owns it. Both log as they go; the walk
//! tolerates per-window metadata failures and keeps moving.

use std::path::PathBuf;

use crate::backend::{BackendError, WindowSystem};
use crate::core::config::ProbeConfig;
use crate::core::errors::ProbeError;
use crate::core::types::{Rect, WindowId, WindowOwner};

/// Result of a title lookup, with best-effort diagnostics for the
/// found window.
#[derive(Debug, Clone)]
pub struct FoundWindow {
    pub window: WindowId,
    pub class: Option<String>,
    pub window_rect: Option<Rect>,
    pub client_rect: Option<Rect>,
}

/// One enumerated window and whatever metadata could be resolved
/// for it.
#[derive(Debug, Clone)]
pub struct WindowReport {
    pub window: WindowId,
    pub owner: Option<WindowOwner>,
    pub image_path: Option<PathBuf>,
}

impl WindowReport {
    /// True when some part of the metadata lookup failed for this
    /// window.
    pub fn is_partial(&self) -> bool {
        self.owner.is_none() || self.image_path.is_none()
    }
}

/// What a full probe run visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub windows_visited: usize,
    pub metadata_failures: usize,
}

/// Look up a top-level window by exact title.
///
/// Absence of a match is `Ok(None)`; the caller decides whether that
/// is fatal. For a found window, class and geometry are resolved
/// best-effort: a failed lookup is logged and leaves the field unset.
pub fn find_by_title(
    ws: &dyn WindowSystem,
    title: &str,
) -> Result<Option<FoundWindow>, BackendError> {
    let Some(window) = ws.find_window(title)? else {
        return Ok(None);
    };

    let class = match ws.window_class(window) {
        Ok(class) => Some(class),
        Err(e) => {
            tracing::warn!("Could not resolve class for window {}: {}", window, e);
            None
        }
    };

    let window_rect = match ws.window_rect(window) {
        Ok(rect) => Some(rect),
        Err(e) => {
            tracing::warn!("Could not resolve rect for window {}: {}", window, e);
            None
        }
    };

    let client_rect = match ws.client_rect(window) {
        Ok(rect) => Some(rect),
        Err(e) => {
            tracing::warn!("Could not resolve client rect for window {}: {}", window, e);
            None
        }
    };

    Ok(Some(FoundWindow {
        window,
        class,
        window_rect,
        client_rect,
    }))
}

/// Walk every top-level window, resolving owner pid/tid and the
/// owning process's executable path for each.
///
/// The visitor is invoked once per window and halts the walk early by
/// returning `false`. Returns the number of windows visited. A
/// metadata failure for one window is logged and does not stop the
/// walk; only a failure of the enumeration itself is an error.
pub fn enumerate_all<F>(ws: &dyn WindowSystem, mut visitor: F) -> Result<usize, ProbeError>
where
    F: FnMut(&WindowReport) -> bool,
{
    let windows = ws.windows()?;

    let mut visited = 0;
    for window in windows {
        let report = resolve_window(ws, window);
        visited += 1;
        if !visitor(&report) {
            break;
        }
    }

    Ok(visited)
}

fn resolve_window(ws: &dyn WindowSystem, window: WindowId) -> WindowReport {
    tracing::info!("Top window {}", window);

    let owner = match ws.window_owner(window) {
        Ok(owner) => {
            tracing::info!("created by {} {}", owner.pid, owner.tid);
            Some(owner)
        }
        Err(e) => {
            tracing::warn!("Could not resolve owner of window {}: {}", window, e);
            None
        }
    };

    let image_path = owner.and_then(|owner| match ws.process_image_path(owner.pid) {
        Ok(path) => {
            tracing::info!("NAME {}: {}", owner.pid, path.display());
            Some(path)
        }
        Err(e) => {
            tracing::warn!("Could not resolve image path for {}: {}", owner.pid, e);
            None
        }
    });

    WindowReport {
        window,
        owner,
        image_path,
    }
}

/// Full probe run: banner, title lookup, enumeration, count.
pub fn run(ws: &dyn WindowSystem, config: &ProbeConfig) -> Result<RunSummary, ProbeError> {
    tracing::info!("winspect {}", config.version);

    let found = find_by_title(ws, &config.target_title)?.ok_or_else(|| {
        ProbeError::WindowNotFound {
            title: config.target_title.clone(),
        }
    })?;

    tracing::info!("Found window {} for '{}'", found.window, config.target_title);
    if let Some(class) = &found.class {
        tracing::info!("Found window class {}", class);
    }
    if let Some(rect) = found.window_rect {
        tracing::info!("Found window rect {}", rect);
    }
    if let Some(rect) = found.client_rect {
        tracing::info!("Found client rect {}", rect);
    }

    let mut metadata_failures = 0;
    let windows_visited = enumerate_all(ws, |report| {
        if report.is_partial() {
            metadata_failures += 1;
        }
        true
    })?;

    tracing::info!("Enumerated {} windows", windows_visited);

    Ok(RunSummary {
        windows_visited,
        metadata_failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ProcessId, ThreadId};

    /// Deterministic in-memory window system.
    struct FakeWindow {
        id: WindowId,
        title: String,
        class: String,
        owner: WindowOwner,
        image_path: PathBuf,
        process_gone: bool,
    }

    struct FakeWindowSystem {
        windows: Vec<FakeWindow>,
    }

    impl FakeWindowSystem {
        fn new(windows: Vec<FakeWindow>) -> Self {
            Self { windows }
        }

        fn window(&self, id: WindowId) -> Result<&FakeWindow, BackendError> {
            self.windows
                .iter()
                .find(|w| w.id == id)
                .ok_or(BackendError::Os {
                    call: "GetWindowThreadProcessId",
                    message: "invalid window handle".to_string(),
                })
        }
    }

    fn fake_window(raw: isize, title: &str) -> FakeWindow {
        FakeWindow {
            id: WindowId::from_raw(raw),
            title: title.to_string(),
            class: "GxWindowClass".to_string(),
            owner: WindowOwner {
                pid: ProcessId::from_raw(1000 + raw as u32),
                tid: ThreadId::from_raw(2000 + raw as u32),
            },
            image_path: PathBuf::from(format!("C:\\Games\\app{raw}.exe")),
            process_gone: false,
        }
    }

    impl WindowSystem for FakeWindowSystem {
        fn find_window(&self, title: &str) -> Result<Option<WindowId>, BackendError> {
            Ok(self
                .windows
                .iter()
                .find(|w| w.title == title)
                .map(|w| w.id))
        }

        fn windows(&self) -> Result<Vec<WindowId>, BackendError> {
            Ok(self.windows.iter().map(|w| w.id).collect())
        }

        fn window_owner(&self, window: WindowId) -> Result<WindowOwner, BackendError> {
            Ok(self.window(window)?.owner)
        }

        fn process_image_path(&self, pid: ProcessId) -> Result<PathBuf, BackendError> {
            let window = self
                .windows
                .iter()
                .find(|w| w.owner.pid == pid)
                .ok_or(BackendError::ProcessInaccessible {
                    pid,
                    message: "no such process".to_string(),
                })?;
            if window.process_gone {
                return Err(BackendError::ProcessInaccessible {
                    pid,
                    message: "process has exited".to_string(),
                });
            }
            Ok(window.image_path.clone())
        }

        fn window_class(&self, window: WindowId) -> Result<String, BackendError> {
            Ok(self.window(window)?.class.clone())
        }

        fn window_rect(&self, _window: WindowId) -> Result<Rect, BackendError> {
            Ok(Rect {
                left: 0,
                top: 0,
                right: 1920,
                bottom: 1080,
            })
        }

        fn client_rect(&self, _window: WindowId) -> Result<Rect, BackendError> {
            Ok(Rect {
                left: 0,
                top: 0,
                right: 1904,
                bottom: 1041,
            })
        }
    }

    fn test_config() -> ProbeConfig {
        ProbeConfig::new("0.1.0")
    }

    #[test]
    fn test_find_by_title_empty_title_matches_nothing() {
        let ws = FakeWindowSystem::new(vec![fake_window(1, "A"), fake_window(2, "B")]);
        let found = find_by_title(&ws, "").unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_find_by_title_exact_match_only() {
        let ws = FakeWindowSystem::new(vec![fake_window(1, "World of Warcraft")]);

        assert!(find_by_title(&ws, "World of").unwrap().is_none());
        assert!(find_by_title(&ws, "world of warcraft").unwrap().is_none());
        assert!(find_by_title(&ws, "World of Warcraft ").unwrap().is_none());

        let found = find_by_title(&ws, "World of Warcraft").unwrap().unwrap();
        assert_eq!(found.window, WindowId::from_raw(1));
    }

    #[test]
    fn test_find_by_title_resolves_diagnostics() {
        let ws = FakeWindowSystem::new(vec![fake_window(1, "World of Warcraft")]);
        let found = find_by_title(&ws, "World of Warcraft").unwrap().unwrap();

        assert_eq!(found.class.as_deref(), Some("GxWindowClass"));
        assert_eq!(found.window_rect.unwrap().width(), 1920);
        assert_eq!(found.client_rect.unwrap().height(), 1041);
    }

    #[test]
    fn test_find_by_title_is_idempotent() {
        let ws = FakeWindowSystem::new(vec![fake_window(1, "A"), fake_window(2, "B")]);

        let first = find_by_title(&ws, "B").unwrap().map(|f| f.window);
        let second = find_by_title(&ws, "B").unwrap().map(|f| f.window);
        assert_eq!(first, Some(WindowId::from_raw(2)));
        assert_eq!(first, second);
    }

    #[test]
    fn test_enumerate_all_resolves_every_window() {
        let ws = FakeWindowSystem::new(vec![
            fake_window(1, "A"),
            fake_window(2, "B"),
            fake_window(3, "C"),
        ]);

        let mut reports = Vec::new();
        let count = enumerate_all(&ws, |report| {
            reports.push(report.clone());
            true
        })
        .unwrap();

        assert_eq!(count, 3);
        assert_eq!(reports.len(), 3);
        assert!(reports.iter().all(|r| !r.is_partial()));
        assert_eq!(
            reports[0].image_path.as_deref(),
            Some(std::path::Path::new("C:\\Games\\app1.exe"))
        );
    }

    #[test]
    fn test_enumerate_all_continues_past_metadata_failure() {
        let mut middle = fake_window(2, "B");
        middle.process_gone = true;
        let ws = FakeWindowSystem::new(vec![fake_window(1, "A"), middle, fake_window(3, "C")]);

        let mut partial = Vec::new();
        let count = enumerate_all(&ws, |report| {
            if report.is_partial() {
                partial.push(report.window);
            }
            true
        })
        .unwrap();

        assert_eq!(count, 3);
        assert_eq!(partial, vec![WindowId::from_raw(2)]);
    }

    #[test]
    fn test_enumerate_all_visitor_stops_early() {
        let ws = FakeWindowSystem::new(vec![
            fake_window(1, "A"),
            fake_window(2, "B"),
            fake_window(3, "C"),
        ]);

        let count = enumerate_all(&ws, |_| false).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_enumerate_all_empty_desktop() {
        let ws = FakeWindowSystem::new(vec![]);
        let count = enumerate_all(&ws, |_| true).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_run_finds_target_and_counts_windows() {
        let ws = FakeWindowSystem::new(vec![fake_window(1, "World of Warcraft")]);
        let summary = run(&ws, &test_config()).unwrap();

        assert_eq!(summary.windows_visited, 1);
        assert_eq!(summary.metadata_failures, 0);
    }

    #[test]
    fn test_run_missing_target_is_not_found() {
        let ws = FakeWindowSystem::new(vec![]);
        let err = run(&ws, &test_config()).unwrap_err();

        match &err {
            ProbeError::WindowNotFound { title } => {
                assert_eq!(title, "World of Warcraft");
            }
            other => panic!("expected WindowNotFound, got {other:?}"),
        }
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_run_counts_metadata_failures() {
        let mut gone = fake_window(2, "B");
        gone.process_gone = true;
        let ws = FakeWindowSystem::new(vec![
            fake_window(1, "World of Warcraft"),
            gone,
            fake_window(3, "C"),
        ]);

        let summary = run(&ws, &test_config()).unwrap();
        assert_eq!(summary.windows_visited, 3);
        assert_eq!(summary.metadata_failures, 1);
    }
}
