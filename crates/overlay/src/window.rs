//! Overlay window implementation

use crate::{
    cancel::CancelHub,
    layout::OverlayStyle,
    render::OverlayRenderer,
    selection::{OverlayAction, OverlayEvent, SelectionSession},
    OverlayError, OverlayResult, SelectionOutcome,
};
use capture::{capture_virtual_desktop, Point, Rect};
use std::cell::RefCell;
use std::sync::atomic::{AtomicIsize, Ordering};
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::Graphics::Gdi::{InvalidateRect, UpdateWindow};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::{ReleaseCapture, SetCapture, SetFocus, VK_ESCAPE};
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW,
    GetMessageW, IsWindow, LoadCursorW, PostMessageW, PostQuitMessage, RegisterClassExW, SetForegroundWindow,
    SetWindowsHookExW, ShowWindow, TranslateMessage, UnhookWindowsHookEx, CS_HREDRAW,
    CS_VREDRAW, HHOOK, IDC_CROSS, KBDLLHOOKSTRUCT, MSG, SW_SHOW, WH_KEYBOARD_LL, WM_APP,
    WM_CLOSE, WM_DESTROY, WM_ERASEBKGND, WM_KEYDOWN, WM_LBUTTONDOWN, WM_LBUTTONUP,
    WM_MOUSEMOVE, WM_PAINT, WM_SYSKEYDOWN, WNDCLASSEXW, WS_EX_TOOLWINDOW, WS_EX_TOPMOST,
    WS_POPUP,
};

/// Posted by the global Escape observer
const WM_OVERLAY_CANCEL: u32 = WM_APP + 1;

thread_local! {
    static OVERLAY_STATE: RefCell<Option<Box<OverlayState>>> = RefCell::new(None);
}

static KEYBOARD_HOOK: AtomicIsize = AtomicIsize::new(0);

struct OverlayState {
    renderer: OverlayRenderer,
    session: SelectionSession,
    outcome: Option<SelectionOutcome>,
}

/// Clears the thread-local state on every exit path
struct StateGuard;

impl Drop for StateGuard {
    fn drop(&mut self) {
        OVERLAY_STATE.with(|s| {
            *s.borrow_mut() = None;
        });
    }
}

/// Low-level keyboard hook that forwards Escape to the global [`CancelHub`]
struct EscapeHook;

impl EscapeHook {
    fn install() -> OverlayResult<Self> {
        unsafe {
            let hmodule = GetModuleHandleW(None)?;
            let hook = SetWindowsHookExW(
                WH_KEYBOARD_LL,
                Some(escape_hook_proc),
                HINSTANCE(hmodule.0),
                0,
            )?;
            KEYBOARD_HOOK.store(hook.0 as isize, Ordering::SeqCst);
        }
        Ok(Self)
    }
}

impl Drop for EscapeHook {
    fn drop(&mut self) {
        let raw = KEYBOARD_HOOK.swap(0, Ordering::SeqCst);
        if raw != 0 {
            unsafe {
                let _ = UnhookWindowsHookEx(HHOOK(raw as *mut _));
            }
        }
    }
}

unsafe extern "system" fn escape_hook_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    let hook = HHOOK(KEYBOARD_HOOK.load(Ordering::SeqCst) as *mut _);

    let key_down = wparam.0 as u32 == WM_KEYDOWN || wparam.0 as u32 == WM_SYSKEYDOWN;
    if code >= 0 && key_down {
        let kbd = &*(lparam.0 as *const KBDLLHOOKSTRUCT);
        if kbd.vkCode == VK_ESCAPE.0 as u32 && CancelHub::global().notify() {
            // Consume the key
            return LRESULT(1);
        }
    }

    CallNextHookEx(hook, code, wparam, lparam)
}

/// Full-screen region selection overlay
pub struct OverlayWindow;

impl OverlayWindow {
    const CLASS_NAME: PCWSTR = w!("GlassPeekOverlay");

    /// Create and show overlay window, blocking until it closes
    pub fn show() -> OverlayResult<SelectionOutcome> {
        Self::show_with_style(OverlayStyle::default())
    }

    pub fn show_with_style(style: OverlayStyle) -> OverlayResult<SelectionOutcome> {
        let busy = OVERLAY_STATE.with(|s| s.borrow().is_some());
        if busy {
            return Err(OverlayError::AlreadyActive);
        }

        let snapshot = capture_virtual_desktop()?;
        let bounds = snapshot.screen_bounds();

        OVERLAY_STATE.with(|s| {
            *s.borrow_mut() = Some(Box::new(OverlayState {
                session: SelectionSession::new(snapshot.origin()),
                renderer: OverlayRenderer::new(snapshot, style),
                outcome: None,
            }));
        });
        let _state_guard = StateGuard;

        unsafe {
            let hmodule = GetModuleHandleW(None)?;
            let hinstance = HINSTANCE(hmodule.0);

            let wc = WNDCLASSEXW {
                cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
                style: CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: Some(Self::wnd_proc),
                hInstance: hinstance,
                hCursor: LoadCursorW(None, IDC_CROSS)?,
                lpszClassName: Self::CLASS_NAME,
                ..Default::default()
            };

            RegisterClassExW(&wc);

            // Create window covering virtual desktop
            let hwnd = CreateWindowExW(
                WS_EX_TOPMOST | WS_EX_TOOLWINDOW,
                Self::CLASS_NAME,
                w!("GlassPeek Selection"),
                WS_POPUP,
                bounds.x,
                bounds.y,
                bounds.width as i32,
                bounds.height as i32,
                None,
                None,
                hinstance,
                None,
            )?;

            // Escape works even when the overlay does not get keyboard focus
            let _hook = match EscapeHook::install() {
                Ok(hook) => Some(hook),
                Err(e) => {
                    log::warn!("Global Escape hook unavailable: {}", e);
                    None
                }
            };
            let hwnd_raw = hwnd.0 as isize;
            let _registration = CancelHub::global().register(move || {
                let _ = PostMessageW(
                    HWND(hwnd_raw as *mut std::ffi::c_void),
                    WM_OVERLAY_CANCEL,
                    WPARAM(0),
                    LPARAM(0),
                );
            });

            let _ = ShowWindow(hwnd, SW_SHOW);
            let _ = UpdateWindow(hwnd);
            let _ = SetForegroundWindow(hwnd);
            let _ = SetFocus(hwnd);

            log::debug!(
                "Overlay opened over {}x{} at ({}, {})",
                bounds.width,
                bounds.height,
                bounds.x,
                bounds.y
            );

            // Message loop
            let mut msg = MSG::default();
            loop {
                if Self::outcome_ready() {
                    break;
                }
                let ret = GetMessageW(&mut msg, None, 0, 0);
                if !ret.as_bool() {
                    // Leave WM_QUIT for the outer loop
                    PostQuitMessage(msg.wParam.0 as i32);
                    break;
                }
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }

            if IsWindow(hwnd).as_bool() {
                let _ = DestroyWindow(hwnd);
            }
        }

        let outcome = OVERLAY_STATE.with(|s| {
            s.borrow_mut()
                .as_mut()
                .and_then(|state| state.outcome.take())
        });
        let outcome = outcome.unwrap_or(SelectionOutcome::Cancelled);
        log::debug!("Overlay closed: {:?}", outcome);
        Ok(outcome)
    }

    fn outcome_ready() -> bool {
        OVERLAY_STATE.with(|s| {
            s.borrow()
                .as_ref()
                .map(|state| state.outcome.is_some())
                .unwrap_or(true)
        })
    }

    unsafe extern "system" fn wnd_proc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        match msg {
            WM_PAINT => {
                OVERLAY_STATE.with(|s| {
                    if let Some(ref state) = *s.borrow() {
                        state.renderer.render(hwnd, state.session.current_rect());
                    }
                });
                LRESULT(0)
            }

            // Everything is painted in WM_PAINT
            WM_ERASEBKGND => LRESULT(1),

            WM_LBUTTONDOWN => {
                let _ = SetCapture(hwnd);
                Self::dispatch(hwnd, OverlayEvent::Press(point_from_lparam(lparam)));
                LRESULT(0)
            }

            WM_MOUSEMOVE => {
                Self::dispatch(hwnd, OverlayEvent::Drag(point_from_lparam(lparam)));
                LRESULT(0)
            }

            WM_LBUTTONUP => {
                let _ = ReleaseCapture();
                Self::dispatch(hwnd, OverlayEvent::Release(point_from_lparam(lparam)));
                LRESULT(0)
            }

            WM_KEYDOWN if wparam.0 == VK_ESCAPE.0 as usize => {
                Self::dispatch(hwnd, OverlayEvent::Escape);
                LRESULT(0)
            }

            WM_OVERLAY_CANCEL | WM_CLOSE => {
                Self::dispatch(hwnd, OverlayEvent::Escape);
                LRESULT(0)
            }

            WM_DESTROY => LRESULT(0),

            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }

    unsafe fn dispatch(hwnd: HWND, event: OverlayEvent) {
        let action = OVERLAY_STATE.with(|s| {
            let mut state = s.borrow_mut();
            let Some(state) = state.as_mut() else {
                return OverlayAction::None;
            };

            let action = state.session.handle(event);
            match action {
                OverlayAction::Complete(rect) => {
                    state.outcome = Some(SelectionOutcome::Region(rect));
                }
                OverlayAction::Dismiss => {
                    state.outcome = Some(SelectionOutcome::Cancelled);
                }
                OverlayAction::Repaint | OverlayAction::None => {}
            }
            action
        });

        // Window calls happen with the state released; DestroyWindow re-enters wnd_proc
        match action {
            OverlayAction::Repaint => {
                let _ = InvalidateRect(hwnd, None, false);
            }
            OverlayAction::Complete(_) | OverlayAction::Dismiss => {
                let _ = DestroyWindow(hwnd);
            }
            OverlayAction::None => {}
        }
    }
}

fn point_from_lparam(lparam: LPARAM) -> Point {
    let x = (lparam.0 & 0xFFFF) as i16 as i32;
    let y = ((lparam.0 >> 16) & 0xFFFF) as i16 as i32;
    Point::new(x, y)
}

/// Run the overlay and hand a completed selection to `on_selected`.
///
/// Cancellation (Escape, zero-area release) returns `Ok(())` without calling it.
pub fn start<F>(on_selected: F) -> OverlayResult<()>
where
    F: FnOnce(Rect),
{
    match OverlayWindow::show()? {
        SelectionOutcome::Region(rect) => {
            log::info!(
                "Selected region {}x{} at ({}, {})",
                rect.width,
                rect.height,
                rect.x,
                rect.y
            );
            on_selected(rect);
        }
        SelectionOutcome::Cancelled => {
            log::debug!("Selection cancelled");
        }
    }
    Ok(())
}
