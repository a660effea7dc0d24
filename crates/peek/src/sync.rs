//! WinEvent hooks that keep peek windows in step with the host's windows

use crate::focus::{HostWindowState, HostWindows};
use crate::window::{foreground_changed, host_windows_changed, is_peek};
use std::cell::RefCell;
use windows::Win32::Foundation::{BOOL, HMODULE, HWND, LPARAM};
use windows::Win32::System::Threading::GetCurrentProcessId;
use windows::Win32::UI::Accessibility::{SetWinEventHook, UnhookWinEvent, HWINEVENTHOOK};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetAncestor, GetWindow, GetWindowLongW, GetWindowThreadProcessId, IsIconic,
    IsWindow, IsWindowVisible, GA_ROOT, GWL_EXSTYLE, GW_OWNER, WS_EX_TOOLWINDOW,
};

const EVENT_SYSTEM_FOREGROUND: u32 = 0x0003;
const EVENT_SYSTEM_MINIMIZESTART: u32 = 0x0016;
const EVENT_SYSTEM_MINIMIZEEND: u32 = 0x0017;
const EVENT_OBJECT_CREATE: u32 = 0x8000;
const EVENT_OBJECT_HIDE: u32 = 0x8003;
const WINEVENT_OUTOFCONTEXT: u32 = 0x0000;
const OBJID_WINDOW: i32 = 0;

thread_local! {
    static HOOKS: RefCell<Vec<isize>> = RefCell::new(Vec::new());
}

/// Install the hooks unless they are already in place
pub(crate) fn install_hooks() {
    let installed = HOOKS.with(|hooks| !hooks.borrow().is_empty());
    if installed {
        return;
    }

    let pid = unsafe { GetCurrentProcessId() };
    // Foreground changes of every process, window lifecycle of this one
    let ranges = [
        (EVENT_SYSTEM_FOREGROUND, EVENT_SYSTEM_FOREGROUND, 0),
        (EVENT_SYSTEM_MINIMIZESTART, EVENT_SYSTEM_MINIMIZEEND, pid),
        (EVENT_OBJECT_CREATE, EVENT_OBJECT_HIDE, pid),
    ];

    let mut installed = Vec::with_capacity(ranges.len());
    for (min, max, process) in ranges {
        let hook = unsafe {
            SetWinEventHook(
                min,
                max,
                HMODULE::default(),
                Some(win_event_proc),
                process,
                0,
                WINEVENT_OUTOFCONTEXT,
            )
        };
        if hook.is_invalid() {
            log::warn!("WinEvent hook {:#x}..{:#x} unavailable", min, max);
        } else {
            installed.push(hook.0 as isize);
        }
    }

    log::debug!("Installed {} host window hooks", installed.len());
    HOOKS.with(|hooks| *hooks.borrow_mut() = installed);
}

pub(crate) fn remove_hooks() {
    let hooks = HOOKS.with(|hooks| std::mem::take(&mut *hooks.borrow_mut()));
    for raw in &hooks {
        unsafe {
            let _ = UnhookWinEvent(HWINEVENTHOOK(*raw as *mut _));
        }
    }
    if !hooks.is_empty() {
        log::debug!("Removed {} host window hooks", hooks.len());
    }
}

unsafe extern "system" fn win_event_proc(
    _hook: HWINEVENTHOOK,
    event: u32,
    hwnd: HWND,
    id_object: i32,
    _id_child: i32,
    _event_thread: u32,
    _event_time: u32,
) {
    if id_object != OBJID_WINDOW || hwnd.0.is_null() {
        return;
    }

    if event == EVENT_SYSTEM_FOREGROUND {
        foreground_changed(hwnd);
        return;
    }

    // Destroyed windows can no longer be inspected, everything else must be top-level
    if IsWindow(hwnd).as_bool() && GetAncestor(hwnd, GA_ROOT) != hwnd {
        return;
    }
    if is_peek(hwnd) {
        return;
    }
    host_windows_changed();
}

/// Top-level windows of this process that count as host windows
pub(crate) struct ProcessWindows;

impl HostWindows for ProcessWindows {
    fn states(&self) -> Vec<HostWindowState> {
        let mut windows: Vec<isize> = Vec::new();
        unsafe {
            let _ = EnumWindows(
                Some(enum_window_callback),
                LPARAM(&mut windows as *mut Vec<isize> as isize),
            );
        }

        windows
            .into_iter()
            .map(|raw| HWND(raw as *mut _))
            .filter(|hwnd| unsafe { is_host_window(*hwnd) })
            .map(|hwnd| unsafe {
                HostWindowState {
                    visible: IsWindowVisible(hwnd).as_bool(),
                    minimized: IsIconic(hwnd).as_bool(),
                }
            })
            .collect()
    }
}

unsafe extern "system" fn enum_window_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let windows = &mut *(lparam.0 as *mut Vec<isize>);

    let mut pid = 0u32;
    GetWindowThreadProcessId(hwnd, Some(&mut pid));
    if pid == GetCurrentProcessId() {
        windows.push(hwnd.0 as isize);
    }

    BOOL(1) // Continue enumeration
}

unsafe fn is_host_window(hwnd: HWND) -> bool {
    // Peek and overlay windows are tool windows
    let ex_style = GetWindowLongW(hwnd, GWL_EXSTYLE) as u32;
    if ex_style & WS_EX_TOOLWINDOW.0 != 0 {
        return false;
    }

    // Dialogs are owned by a host window
    if let Ok(owner) = GetWindow(hwnd, GW_OWNER) {
        if !owner.is_invalid() {
            return false;
        }
    }

    true
}
