//! Win32 peek window
//!
//! The frame is a chrome-less popup owned by the host's main window. It paints its
//! own title bar and hosts the content view as a child below it. The content child is
//! subclassed as the glass layer: over move and resize zones it answers
//! `WM_NCHITTEST` with `HTTRANSPARENT`, so those pointer events reach the frame.

use crate::config::{PeekConfig, Size};
use crate::content::{ContentProbe, ContentView, RawWindow, ViewSlot};
use crate::focus::{ForegroundKind, HostWindows, StackingPolicy, VisibilitySync};
use crate::gesture::{ButtonState, GeometryController, PointerButton, PointerSample};
use crate::hit_test::{classify, CursorShape, Zone};
use crate::host::{display_title, PeekHost};
use crate::plan::PeekPlan;
use crate::sync::{self, ProcessWindows};
use crate::zoom::{handle_wheel, WheelOutcome};
use crate::PeekResult;
use capture::{Point, Rect};
use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::c_void;
use std::rc::Rc;
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{COLORREF, HINSTANCE, HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, ClientToScreen, CreateFontW, CreateSolidBrush, DeleteObject, DrawTextW, EndPaint,
    FillRect, InvalidateRect, ScreenToClient, SelectObject, SetBkMode, SetTextColor, UpdateWindow,
    CLIP_DEFAULT_PRECIS, DEFAULT_CHARSET, DEFAULT_PITCH, DEFAULT_QUALITY, DT_CENTER,
    DT_END_ELLIPSIS, DT_LEFT, DT_NOPREFIX, DT_SINGLELINE, DT_VCENTER, FF_SWISS, FW_NORMAL,
    OUT_DEFAULT_PRECIS, PAINTSTRUCT, TRANSPARENT,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::System::Threading::GetCurrentProcessId;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    ReleaseCapture, SetCapture, SetFocus, TrackMouseEvent, TME_LEAVE, TRACKMOUSEEVENT,
};
use windows::Win32::UI::Shell::{DefSubclassProc, RemoveWindowSubclass, SetWindowSubclass};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, GetAncestor, GetClientRect,
    GetForegroundWindow, GetWindowRect, GetWindowThreadProcessId, IsWindow, LoadCursorW,
    RegisterClassExW, SetCursor, SetWindowPos, ShowWindow, CS_HREDRAW, CS_VREDRAW, GA_ROOT,
    HTCLIENT, HTTRANSPARENT, HWND_NOTOPMOST, HWND_TOPMOST, IDC_ARROW, IDC_HAND, IDC_SIZEALL,
    IDC_SIZENESW, IDC_SIZENS, IDC_SIZENWSE, IDC_SIZEWE, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE,
    SWP_NOZORDER, SW_HIDE, SW_SHOW, SW_SHOWNOACTIVATE, WM_CAPTURECHANGED, WM_CLOSE, WM_COMMAND,
    WM_DESTROY, WM_ERASEBKGND, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MBUTTONDOWN, WM_MBUTTONUP,
    WM_MOUSEMOVE, WM_MOUSEWHEEL, WM_NCDESTROY, WM_NCHITTEST, WM_PAINT, WM_RBUTTONDOWN,
    WM_RBUTTONUP, WM_SETCURSOR, WM_SETFOCUS, WM_SIZE, WNDCLASSEXW, WS_CLIPCHILDREN,
    WS_EX_TOOLWINDOW, WS_POPUP,
};

const GLASS_SUBCLASS_ID: usize = 1;
const WM_MOUSELEAVE: u32 = 0x02A3;
const WHEEL_DELTA: i32 = 120;

// wParam key state flags of mouse messages
const MK_LBUTTON: usize = 0x0001;
const MK_RBUTTON: usize = 0x0002;
const MK_CONTROL: usize = 0x0008;
const MK_MBUTTON: usize = 0x0010;

thread_local! {
    static PEEKS: RefCell<HashMap<isize, Rc<RefCell<PeekState>>>> = RefCell::new(HashMap::new());
}

struct PeekState {
    config: PeekConfig,
    owner: RawWindow,
    title: Vec<u16>,
    controller: GeometryController,
    view: ViewSlot,
    stacking: StackingPolicy,
    visibility: VisibilitySync,
    /// Cursor for the last hover classification
    hover: CursorShape,
    tracking_leave: bool,
    /// Primary button went down on the close control
    close_armed: bool,
}

impl PeekState {
    fn zone_at(&self, point: Point, size: Size) -> Zone {
        let view = self.view.get().map(|view| view as &dyn ContentView);
        let probe = ContentProbe::new(view, Point::new(0, self.config.title_height));
        classify(&self.config, point, size, &probe)
    }
}

fn hwnd_from_raw(raw: isize) -> HWND {
    HWND(raw as *mut c_void)
}

fn state_for(hwnd: HWND) -> Option<Rc<RefCell<PeekState>>> {
    PEEKS.with(|peeks| peeks.borrow().get(&(hwnd.0 as isize)).cloned())
}

/// Run `f` on the window's state unless it is missing or already borrowed
fn with_state<R>(hwnd: HWND, f: impl FnOnce(&mut PeekState) -> R) -> Option<R> {
    let state = state_for(hwnd)?;
    let mut guard = state.try_borrow_mut().ok()?;
    let result = f(&mut guard);
    Some(result)
}

fn all_peeks() -> Vec<(isize, Rc<RefCell<PeekState>>)> {
    PEEKS.with(|peeks| {
        peeks
            .borrow()
            .iter()
            .map(|(raw, state)| (*raw, state.clone()))
            .collect()
    })
}

/// Whether `hwnd` is a peek frame or one of its children
pub(crate) fn is_peek(hwnd: HWND) -> bool {
    let root = unsafe { GetAncestor(hwnd, GA_ROOT) };
    let key = if root.0.is_null() { hwnd.0 as isize } else { root.0 as isize };
    PEEKS.with(|peeks| peeks.borrow().contains_key(&key))
}

/// Handle to an open peek window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatingPeekWindow {
    hwnd: RawWindow,
}

impl FloatingPeekWindow {
    const CLASS_NAME: PCWSTR = w!("GlassPeekFloating");

    /// Open a peek window over `selection`.
    ///
    /// Returns `Ok(None)` for a zero-area selection. A failing content view aborts
    /// the window and is returned as the error.
    pub fn open(selection: Rect, host: &dyn PeekHost, config: PeekConfig) -> PeekResult<Option<Self>> {
        let Some(plan) = PeekPlan::from_selection(selection, &config) else {
            log::debug!("Zero-area selection, no peek window");
            return Ok(None);
        };

        let position = host.resolve_position(plan.anchor);
        let title = display_title(host);
        let title_z: Vec<u16> = title.encode_utf16().chain(std::iter::once(0)).collect();
        let owner = host.owner();
        let bounds = plan.bounds;

        unsafe {
            let hmodule = GetModuleHandleW(None)?;
            let hinstance = HINSTANCE(hmodule.0);

            // No class cursor; WM_SETCURSOR applies the hover cursor
            let wc = WNDCLASSEXW {
                cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
                style: CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: Some(Self::wnd_proc),
                hInstance: hinstance,
                lpszClassName: Self::CLASS_NAME,
                ..Default::default()
            };

            RegisterClassExW(&wc);

            let hwnd = CreateWindowExW(
                WS_EX_TOOLWINDOW,
                Self::CLASS_NAME,
                PCWSTR(title_z.as_ptr()),
                WS_POPUP | WS_CLIPCHILDREN,
                bounds.x,
                bounds.y,
                bounds.width as i32,
                bounds.height as i32,
                hwnd_from_raw(owner),
                None,
                hinstance,
                None,
            )?;
            let raw = hwnd.0 as isize;

            let view = match host.create_view(raw) {
                Ok(view) => view,
                Err(e) => {
                    let _ = DestroyWindow(hwnd);
                    return Err(e);
                }
            };

            let child = hwnd_from_raw(view.handle());
            if !SetWindowSubclass(child, Some(glass_subclass_proc), GLASS_SUBCLASS_ID, raw as usize)
                .as_bool()
            {
                log::warn!("Glass layer unavailable; resize only from the title bar");
            }

            let state = PeekState {
                config,
                owner,
                title: title.encode_utf16().collect(),
                controller: GeometryController::new(&config),
                view: ViewSlot::new(view),
                stacking: StackingPolicy::default(),
                visibility: VisibilitySync::new(true),
                hover: CursorShape::Default,
                tracking_leave: false,
                close_armed: false,
            };
            PEEKS.with(|peeks| {
                peeks.borrow_mut().insert(raw, Rc::new(RefCell::new(state)));
            });
            sync::install_hooks();

            Self::layout_content(hwnd);
            let _ = ShowWindow(hwnd, SW_SHOW);
            let _ = UpdateWindow(hwnd);
            foreground_changed(GetForegroundWindow());

            if let Some(position) = position {
                with_state(hwnd, |state| {
                    if let Some(view) = state.view.get_mut() {
                        view.scroll_to(position);
                    }
                });
            }

            log::info!(
                "Peek window \"{}\" opened at ({}, {}) {}x{}",
                title,
                bounds.x,
                bounds.y,
                bounds.width,
                bounds.height
            );

            Ok(Some(Self { hwnd: raw }))
        }
    }

    /// Close the window; its content view is released during teardown
    pub fn close(&self) {
        let hwnd = hwnd_from_raw(self.hwnd);
        unsafe {
            if IsWindow(hwnd).as_bool() {
                let _ = DestroyWindow(hwnd);
            }
        }
    }

    pub fn close_all() {
        for (raw, _) in all_peeks() {
            Self { hwnd: raw }.close();
        }
    }

    pub fn open_count() -> usize {
        PEEKS.with(|peeks| peeks.borrow().len())
    }

    unsafe fn layout_content(hwnd: HWND) {
        let Some((child, title_height)) = with_state(hwnd, |state| {
            state
                .view
                .get()
                .map(|view| (hwnd_from_raw(view.handle()), state.config.title_height))
        })
        .flatten() else {
            return;
        };

        let size = client_size(hwnd);
        let _ = SetWindowPos(
            child,
            None,
            0,
            title_height,
            size.width as i32,
            (size.height as i32 - title_height).max(0),
            SWP_NOZORDER | SWP_NOACTIVATE,
        );
    }

    unsafe extern "system" fn wnd_proc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        match msg {
            WM_PAINT => {
                Self::on_paint(hwnd);
                LRESULT(0)
            }

            // Title bar is painted in WM_PAINT, the rest is the content view
            WM_ERASEBKGND => LRESULT(1),

            WM_SIZE => {
                Self::layout_content(hwnd);
                let _ = InvalidateRect(hwnd, None, false);
                LRESULT(0)
            }

            WM_SETFOCUS => {
                let child = with_state(hwnd, |state| state.view.get().map(|view| view.handle())).flatten();
                if let Some(child) = child {
                    let _ = SetFocus(hwnd_from_raw(child));
                }
                LRESULT(0)
            }

            WM_SETCURSOR => {
                let hit = (lparam.0 & 0xFFFF) as u32;
                if wparam.0 as isize == hwnd.0 as isize && hit == HTCLIENT {
                    if let Some(shape) = with_state(hwnd, |state| state.hover) {
                        set_cursor(shape);
                        return LRESULT(1);
                    }
                }
                DefWindowProcW(hwnd, msg, wparam, lparam)
            }

            WM_MOUSEMOVE => {
                Self::on_mouse_move(hwnd, wparam, lparam);
                LRESULT(0)
            }

            WM_LBUTTONDOWN => {
                Self::on_button_down(hwnd, PointerButton::Primary, wparam, lparam);
                LRESULT(0)
            }
            WM_MBUTTONDOWN => {
                Self::on_button_down(hwnd, PointerButton::Middle, wparam, lparam);
                LRESULT(0)
            }
            WM_RBUTTONDOWN => {
                Self::on_button_down(hwnd, PointerButton::Secondary, wparam, lparam);
                LRESULT(0)
            }

            WM_LBUTTONUP => {
                Self::on_button_up(hwnd, PointerButton::Primary, lparam);
                LRESULT(0)
            }
            WM_MBUTTONUP => {
                Self::on_button_up(hwnd, PointerButton::Middle, lparam);
                LRESULT(0)
            }
            WM_RBUTTONUP => {
                Self::on_button_up(hwnd, PointerButton::Secondary, lparam);
                LRESULT(0)
            }

            // Losing capture mid-gesture ends the gesture
            WM_CAPTURECHANGED => {
                with_state(hwnd, |state| {
                    state.close_armed = false;
                    if state.controller.is_active() {
                        state.controller.release(PointerButton::Primary);
                    }
                });
                LRESULT(0)
            }

            WM_MOUSELEAVE => {
                let shape = with_state(hwnd, |state| {
                    state.tracking_leave = false;
                    state.hover = state.controller.pointer_left();
                    state.hover
                });
                if let Some(shape) = shape {
                    set_cursor(shape);
                }
                LRESULT(0)
            }

            WM_COMMAND => {
                // Notifications from the content view's child window
                if lparam.0 != 0 {
                    let code = ((wparam.0 >> 16) & 0xFFFF) as u32;
                    with_state(hwnd, |state| {
                        if let Some(view) = state.view.get_mut() {
                            view.child_notification(code);
                        }
                    });
                }
                LRESULT(0)
            }

            WM_CLOSE => {
                let _ = DestroyWindow(hwnd);
                LRESULT(0)
            }

            WM_DESTROY => {
                Self::on_destroy(hwnd);
                LRESULT(0)
            }

            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }

    unsafe fn on_mouse_move(hwnd: HWND, wparam: WPARAM, lparam: LPARAM) {
        let sample = pointer_sample(hwnd, wparam, lparam);
        let size = client_size(hwnd);

        let Some((shape, bounds, start_tracking)) = with_state(hwnd, |state| {
            let zone = state.zone_at(sample.local, size);
            state.hover = state.controller.cursor_for(zone, sample.buttons);
            let start_tracking = !state.tracking_leave;
            state.tracking_leave = true;
            (state.hover, state.controller.drag(&sample), start_tracking)
        }) else {
            return;
        };

        if start_tracking {
            let mut tme = TRACKMOUSEEVENT {
                cbSize: std::mem::size_of::<TRACKMOUSEEVENT>() as u32,
                dwFlags: TME_LEAVE,
                hwndTrack: hwnd,
                dwHoverTime: 0,
            };
            let _ = TrackMouseEvent(&mut tme);
        }

        set_cursor(shape);

        if let Some(bounds) = bounds {
            let _ = SetWindowPos(
                hwnd,
                None,
                bounds.x,
                bounds.y,
                bounds.width as i32,
                bounds.height as i32,
                SWP_NOZORDER | SWP_NOACTIVATE,
            );
        }
    }

    unsafe fn on_button_down(hwnd: HWND, button: PointerButton, wparam: WPARAM, lparam: LPARAM) {
        let sample = pointer_sample(hwnd, wparam, lparam);
        let size = client_size(hwnd);
        let bounds = window_rect(hwnd);

        let capture = with_state(hwnd, |state| {
            let zone = state.zone_at(sample.local, size);
            let pressed = state.controller.press(button, zone, &sample, bounds);
            if button == PointerButton::Primary && zone == Zone::Close && !sample.buttons.other_held() {
                state.close_armed = true;
                return true;
            }
            pressed
        });

        if capture == Some(true) {
            let _ = SetCapture(hwnd);
        }
    }

    unsafe fn on_button_up(hwnd: HWND, button: PointerButton, lparam: LPARAM) {
        let local = point_from_lparam(lparam);
        let size = client_size(hwnd);

        let Some((restored, close)) = with_state(hwnd, |state| {
            let close = button == PointerButton::Primary
                && state.close_armed
                && state.zone_at(local, size) == Zone::Close;
            if button == PointerButton::Primary {
                state.close_armed = false;
            }
            let restored = state.controller.release(button);
            if let Some(shape) = restored {
                state.hover = shape;
            }
            (restored, close)
        }) else {
            return;
        };

        if button == PointerButton::Primary {
            let _ = ReleaseCapture();
        }
        if let Some(shape) = restored {
            set_cursor(shape);
        }
        if close {
            log::debug!("Peek window close control clicked");
            let _ = DestroyWindow(hwnd);
        }
    }

    unsafe fn on_destroy(hwnd: HWND) {
        let removed = PEEKS.with(|peeks| peeks.borrow_mut().remove(&(hwnd.0 as isize)));
        if let Some(state) = removed {
            // A borrowed state is released when its last handle drops
            if let Ok(mut state) = state.try_borrow_mut() {
                state.view.release();
            }
        }

        if Self::open_count() == 0 {
            sync::remove_hooks();
        }
        log::info!("Peek window closed");
    }

    unsafe fn on_paint(hwnd: HWND) {
        let mut ps = PAINTSTRUCT::default();
        let hdc = BeginPaint(hwnd, &mut ps);

        let mut client = RECT::default();
        let _ = GetClientRect(hwnd, &mut client);

        if let Some((config, mut title)) = with_state(hwnd, |state| (state.config, state.title.clone())) {
            let bar = RECT {
                left: 0,
                top: 0,
                right: client.right,
                bottom: config.title_height,
            };
            let brush = CreateSolidBrush(COLORREF(config.title_background));
            FillRect(hdc, &bar, brush);
            let _ = DeleteObject(brush);

            let font = CreateFontW(
                16,
                0,
                0,
                0,
                FW_NORMAL.0 as i32,
                0,
                0,
                0,
                DEFAULT_CHARSET.0 as u32,
                OUT_DEFAULT_PRECIS.0 as u32,
                CLIP_DEFAULT_PRECIS.0 as u32,
                DEFAULT_QUALITY.0 as u32,
                (DEFAULT_PITCH.0 | FF_SWISS.0) as u32,
                w!("Segoe UI"),
            );
            let old_font = SelectObject(hdc, font);
            SetBkMode(hdc, TRANSPARENT);
            SetTextColor(hdc, COLORREF(config.title_text_color));

            let mut title_rect = RECT {
                left: config.border,
                top: 0,
                right: client.right - config.close_width,
                bottom: config.title_height,
            };
            DrawTextW(
                hdc,
                &mut title,
                &mut title_rect,
                DT_SINGLELINE | DT_VCENTER | DT_LEFT | DT_END_ELLIPSIS | DT_NOPREFIX,
            );

            let mut close_rect = RECT {
                left: client.right - config.close_width,
                top: 0,
                right: client.right,
                bottom: config.title_height,
            };
            let mut glyph: Vec<u16> = "×".encode_utf16().collect();
            DrawTextW(
                hdc,
                &mut glyph,
                &mut close_rect,
                DT_SINGLELINE | DT_VCENTER | DT_CENTER | DT_NOPREFIX,
            );

            SelectObject(hdc, old_font);
            let _ = DeleteObject(font);
        }

        let _ = EndPaint(hwnd, &ps);
    }
}

/// Glass layer over the content view
unsafe extern "system" fn glass_subclass_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
    _id: usize,
    frame_raw: usize,
) -> LRESULT {
    let frame = hwnd_from_raw(frame_raw as isize);

    match msg {
        WM_NCHITTEST => {
            let local = screen_to_client(frame, point_from_lparam(lparam));
            let size = client_size(frame);
            let zone = with_state(frame, |state| state.zone_at(local, size));
            if zone.is_some_and(Zone::is_frame_gesture) {
                return LRESULT(HTTRANSPARENT as isize);
            }
            DefSubclassProc(hwnd, msg, wparam, lparam)
        }

        WM_MOUSEWHEEL => {
            let modifier_held = wparam.0 & MK_CONTROL != 0;
            let delta = ((wparam.0 >> 16) & 0xFFFF) as u16 as i16 as i32;
            let outcome = with_state(frame, |state| {
                let range = state.config.font_range;
                state
                    .view
                    .get_mut()
                    .map(|view| handle_wheel(view, modifier_held, delta / WHEEL_DELTA, &range))
            })
            .flatten();

            if outcome.is_some_and(WheelOutcome::is_consumed) {
                return LRESULT(0);
            }
            DefSubclassProc(hwnd, msg, wparam, lparam)
        }

        WM_NCDESTROY => {
            let _ = RemoveWindowSubclass(hwnd, Some(glass_subclass_proc), GLASS_SUBCLASS_ID);
            DefSubclassProc(hwnd, msg, wparam, lparam)
        }

        _ => DefSubclassProc(hwnd, msg, wparam, lparam),
    }
}

/// Apply stacking policy after `foreground` became the foreground window
pub(crate) fn foreground_changed(foreground: HWND) {
    if foreground.0.is_null() {
        return;
    }

    let peek_in_front = is_peek(foreground);
    let same_process = unsafe {
        let mut pid = 0u32;
        GetWindowThreadProcessId(foreground, Some(&mut pid));
        pid == GetCurrentProcessId()
    };

    for (raw, state) in all_peeks() {
        let change = state.try_borrow_mut().ok().and_then(|mut state| {
            let kind = if peek_in_front {
                ForegroundKind::Peek
            } else if foreground.0 as isize == state.owner {
                ForegroundKind::HostMain
            } else if same_process {
                ForegroundKind::HostDialog
            } else {
                ForegroundKind::Foreign
            };
            state.stacking.on_foreground(kind)
        });

        let hwnd = hwnd_from_raw(raw);
        let flags = SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE;
        unsafe {
            match change {
                Some(true) => {
                    let _ = SetWindowPos(hwnd, HWND_TOPMOST, 0, 0, 0, 0, flags);
                }
                Some(false) => {
                    // Drop below the window that took the foreground
                    let _ = SetWindowPos(hwnd, HWND_NOTOPMOST, 0, 0, 0, 0, flags);
                    let _ = SetWindowPos(hwnd, foreground, 0, 0, 0, 0, flags);
                }
                None => {}
            }
        }
        log::trace!("Peek {:#x} stacking change: {:?}", raw, change);
    }
}

/// Show or hide every peek window to match the host windows
pub(crate) fn host_windows_changed() {
    let states = ProcessWindows.states();

    for (raw, state) in all_peeks() {
        let change = state
            .try_borrow_mut()
            .ok()
            .and_then(|mut state| state.visibility.recompute(&states));

        let hwnd = hwnd_from_raw(raw);
        unsafe {
            match change {
                Some(true) => {
                    let _ = ShowWindow(hwnd, SW_SHOWNOACTIVATE);
                    log::debug!("Host window visible again, showing peek {:#x}", raw);
                }
                Some(false) => {
                    let _ = ShowWindow(hwnd, SW_HIDE);
                    log::debug!("No host window visible, hiding peek {:#x}", raw);
                }
                None => {}
            }
        }
    }
}

fn set_cursor(shape: CursorShape) {
    let id = match shape {
        CursorShape::Default => IDC_ARROW,
        CursorShape::Hand => IDC_HAND,
        CursorShape::Move => IDC_SIZEALL,
        CursorShape::ResizeNorthSouth => IDC_SIZENS,
        CursorShape::ResizeEastWest => IDC_SIZEWE,
        CursorShape::ResizeNwSe => IDC_SIZENWSE,
        CursorShape::ResizeNeSw => IDC_SIZENESW,
    };
    unsafe {
        if let Ok(cursor) = LoadCursorW(None, id) {
            SetCursor(cursor);
        }
    }
}

fn point_from_lparam(lparam: LPARAM) -> Point {
    let x = (lparam.0 & 0xFFFF) as i16 as i32;
    let y = ((lparam.0 >> 16) & 0xFFFF) as i16 as i32;
    Point::new(x, y)
}

fn buttons_from_wparam(wparam: WPARAM) -> ButtonState {
    ButtonState {
        primary: wparam.0 & MK_LBUTTON != 0,
        middle: wparam.0 & MK_MBUTTON != 0,
        secondary: wparam.0 & MK_RBUTTON != 0,
    }
}

unsafe fn pointer_sample(hwnd: HWND, wparam: WPARAM, lparam: LPARAM) -> PointerSample {
    let local = point_from_lparam(lparam);
    let mut pt = POINT { x: local.x, y: local.y };
    let _ = ClientToScreen(hwnd, &mut pt);
    PointerSample {
        local,
        screen: Point::new(pt.x, pt.y),
        buttons: buttons_from_wparam(wparam),
    }
}

unsafe fn screen_to_client(hwnd: HWND, screen: Point) -> Point {
    let mut pt = POINT { x: screen.x, y: screen.y };
    let _ = ScreenToClient(hwnd, &mut pt);
    Point::new(pt.x, pt.y)
}

unsafe fn client_size(hwnd: HWND) -> Size {
    let mut rect = RECT::default();
    let _ = GetClientRect(hwnd, &mut rect);
    Size::new(
        (rect.right - rect.left).max(0) as u32,
        (rect.bottom - rect.top).max(0) as u32,
    )
}

unsafe fn window_rect(hwnd: HWND) -> Rect {
    let mut rect = RECT::default();
    let _ = GetWindowRect(hwnd, &mut rect);
    Rect::from_edges(rect.left, rect.top, rect.right, rect.bottom)
}
