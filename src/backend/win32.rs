//! Win32 window system using the windows crate

use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;
use std::path::PathBuf;

use windows::Win32::Foundation::{BOOL, CloseHandle, HANDLE, HWND, LPARAM, RECT};
use windows::Win32::System::Threading::{
    OpenProcess, PROCESS_NAME_WIN32, PROCESS_QUERY_LIMITED_INFORMATION,
    QueryFullProcessImageNameW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, FindWindowW, GetClassNameW, GetClientRect, GetWindowRect,
    GetWindowThreadProcessId,
};
use windows::core::{PCWSTR, PWSTR};

use super::{BackendError, WindowSystem};
use crate::core::types::{ProcessId, Rect, ThreadId, WindowId, WindowOwner};

/// Win32 window system
pub struct Win32WindowSystem;

impl Win32WindowSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Win32WindowSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Process handle opened for a metadata query, closed on drop.
struct ProcessHandle(HANDLE);

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

fn hwnd_of(window: WindowId) -> HWND {
    HWND(window.as_raw() as *mut core::ffi::c_void)
}

fn last_os_error() -> String {
    windows::core::Error::from_win32().message()
}

unsafe extern "system" fn enum_window_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let windows = unsafe { &mut *(lparam.0 as *mut Vec<WindowId>) };
    windows.push(WindowId::from_raw(hwnd.0 as isize));
    BOOL(1)
}

impl WindowSystem for Win32WindowSystem {
    fn find_window(&self, title: &str) -> Result<Option<WindowId>, BackendError> {
        let wide_title = to_wide(title);

        // Null class filter: match on title alone. FindWindowW reports
        // "no such window" as an error, which is not a failure here.
        let hwnd = unsafe { FindWindowW(PCWSTR::null(), PCWSTR(wide_title.as_ptr())) };

        match hwnd {
            Ok(h) if !h.is_invalid() => Ok(Some(WindowId::from_raw(h.0 as isize))),
            _ => Ok(None),
        }
    }

    fn windows(&self) -> Result<Vec<WindowId>, BackendError> {
        let mut windows: Vec<WindowId> = Vec::new();

        unsafe {
            EnumWindows(
                Some(enum_window_callback),
                LPARAM(&mut windows as *mut Vec<WindowId> as isize),
            )
        }
        .map_err(|e| BackendError::Os {
            call: "EnumWindows",
            message: e.message(),
        })?;

        Ok(windows)
    }

    fn window_owner(&self, window: WindowId) -> Result<WindowOwner, BackendError> {
        let mut pid: u32 = 0;
        let tid = unsafe { GetWindowThreadProcessId(hwnd_of(window), Some(&mut pid)) };

        if tid == 0 {
            return Err(BackendError::Os {
                call: "GetWindowThreadProcessId",
                message: last_os_error(),
            });
        }

        Ok(WindowOwner {
            pid: ProcessId::from_raw(pid),
            tid: ThreadId::from_raw(tid),
        })
    }

    fn process_image_path(&self, pid: ProcessId) -> Result<PathBuf, BackendError> {
        let handle = unsafe {
            OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid.as_u32())
        }
        .map_err(|e| BackendError::ProcessInaccessible {
            pid,
            message: e.message(),
        })?;
        let handle = ProcessHandle(handle);

        let mut path_buf = [0u16; 1024];
        let mut len = path_buf.len() as u32;
        unsafe {
            QueryFullProcessImageNameW(
                handle.0,
                PROCESS_NAME_WIN32,
                PWSTR(path_buf.as_mut_ptr()),
                &mut len,
            )
        }
        .map_err(|e| BackendError::Os {
            call: "QueryFullProcessImageNameW",
            message: e.message(),
        })?;

        let path = OsString::from_wide(&path_buf[..len as usize]);
        Ok(PathBuf::from(path))
    }

    fn window_class(&self, window: WindowId) -> Result<String, BackendError> {
        let mut class_buf = [0u16; 256];
        let len = unsafe { GetClassNameW(hwnd_of(window), &mut class_buf) };

        if len == 0 {
            return Err(BackendError::Os {
                call: "GetClassNameW",
                message: last_os_error(),
            });
        }

        Ok(String::from_utf16_lossy(&class_buf[..len as usize]))
    }

    fn window_rect(&self, window: WindowId) -> Result<Rect, BackendError> {
        let mut rect = RECT::default();
        unsafe { GetWindowRect(hwnd_of(window), &mut rect) }.map_err(|e| BackendError::Os {
            call: "GetWindowRect",
            message: e.message(),
        })?;

        Ok(Rect {
            left: rect.left,
            top: rect.top,
            right: rect.right,
            bottom: rect.bottom,
        })
    }

    fn client_rect(&self, window: WindowId) -> Result<Rect, BackendError> {
        let mut rect = RECT::default();
        unsafe { GetClientRect(hwnd_of(window), &mut rect) }.map_err(|e| BackendError::Os {
            call: "GetClientRect",
            message: e.message(),
        })?;

        Ok(Rect {
            left: rect.left,
            top: rect.top,
            right: rect.right,
            bottom: rect.bottom,
        })
    }
}
