//! Edit controls: the host editor and the live views embedded in peek windows

use crate::sync;
use capture::{Point, Rect};
use peek::{ContentView, LogicalPosition, NodeKind, RawWindow, ViewNode};
use std::ffi::c_void;
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{HINSTANCE, HWND, LPARAM, POINT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    CreateFontW, DeleteObject, ScreenToClient, CLIP_DEFAULT_PRECIS, DEFAULT_CHARSET,
    DEFAULT_QUALITY, FF_MODERN, FIXED_PITCH, FW_NORMAL, HFONT, OUT_DEFAULT_PRECIS,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::HiDpi::GetDpiForWindow;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DestroyWindow, GetClientRect, GetScrollBarInfo, GetWindowRect,
    GetWindowTextLengthW, GetWindowTextW, IsWindow, IsWindowVisible, SendMessageW,
    SetWindowTextW, HMENU, OBJID_HSCROLL, OBJID_VSCROLL, SCROLLBARINFO, WINDOW_EX_STYLE,
    WINDOW_STYLE, WM_HSCROLL, WM_SETFONT, WS_CHILD, WS_EX_CLIENTEDGE, WS_HSCROLL, WS_TABSTOP,
    WS_VISIBLE, WS_VSCROLL,
};

const ES_MULTILINE: u32 = 0x0004;
const ES_AUTOVSCROLL: u32 = 0x0040;
const ES_AUTOHSCROLL: u32 = 0x0080;
const ES_NOHIDESEL: u32 = 0x0100;
const ES_WANTRETURN: u32 = 0x1000;

const EM_GETSEL: u32 = 0x00B0;
const EM_SETSEL: u32 = 0x00B1;
const EM_LINESCROLL: u32 = 0x00B6;
const EM_GETLINECOUNT: u32 = 0x00BA;
const EM_LINEINDEX: u32 = 0x00BB;
const EM_LINELENGTH: u32 = 0x00C1;
const EM_SETLIMITTEXT: u32 = 0x00C5;
const EM_GETFIRSTVISIBLELINE: u32 = 0x00CE;
const EM_CHARFROMPOS: u32 = 0x00D7;

pub const EN_CHANGE: u32 = 0x0300;

const SB_LEFT: usize = 6;
const STATE_SYSTEM_INVISIBLE: u32 = 0x0000_8000;
const STATE_SYSTEM_OFFSCREEN: u32 = 0x0001_0000;

/// Font size, in points, of new editors and peek views
pub const DEFAULT_FONT_SIZE: i32 = 11;

pub(crate) fn hwnd_from_raw(raw: isize) -> HWND {
    HWND(raw as *mut c_void)
}

/// Multi-line edit control filling nothing yet; callers position it
unsafe fn create_edit(parent: HWND, id: u16, ex_style: WINDOW_EX_STYLE) -> windows::core::Result<HWND> {
    let hmodule = GetModuleHandleW(None)?;
    let hinstance = HINSTANCE(hmodule.0);

    let style = WS_CHILD
        | WS_VISIBLE
        | WS_TABSTOP
        | WS_VSCROLL
        | WS_HSCROLL
        | WINDOW_STYLE(ES_MULTILINE | ES_AUTOVSCROLL | ES_AUTOHSCROLL | ES_NOHIDESEL | ES_WANTRETURN);

    let hwnd = CreateWindowExW(
        ex_style,
        w!("EDIT"),
        PCWSTR::null(),
        style,
        0,
        0,
        0,
        0,
        parent,
        HMENU(id as _),
        hinstance,
        None,
    )?;

    // Lift the 32K default limit
    SendMessageW(hwnd, EM_SETLIMITTEXT, WPARAM(0), LPARAM(0));
    Ok(hwnd)
}

/// Create the host editor as a child of the main window
pub(crate) unsafe fn create_host_editor(parent: HWND, id: u16) -> windows::core::Result<(HWND, HFONT)> {
    let hwnd = create_edit(parent, id, WS_EX_CLIENTEDGE)?;
    let font = apply_font(hwnd, DEFAULT_FONT_SIZE);
    Ok((hwnd, font))
}

/// Monospace font of `size` points for `hwnd`'s DPI, applied to the control
unsafe fn apply_font(hwnd: HWND, size: i32) -> HFONT {
    let dpi = GetDpiForWindow(hwnd).max(96) as i32;
    let height = -(size * dpi / 72);

    let font = CreateFontW(
        height,
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
        (FIXED_PITCH.0 | FF_MODERN.0) as u32,
        w!("Consolas"),
    );
    SendMessageW(hwnd, WM_SETFONT, WPARAM(font.0 as usize), LPARAM(1));
    font
}

unsafe fn delete_font(font: HFONT) {
    if !font.is_invalid() {
        let _ = DeleteObject(font);
    }
}

/// Full text of an edit control
pub(crate) unsafe fn read_text(hwnd: HWND) -> String {
    let len = GetWindowTextLengthW(hwnd).max(0) as usize;
    let mut buffer = vec![0u16; len + 1];
    let copied = GetWindowTextW(hwnd, &mut buffer).max(0) as usize;
    String::from_utf16_lossy(&buffer[..copied.min(len)])
}

/// Replace the text of an edit control, keeping its selection and first visible line
pub(crate) unsafe fn replace_text(hwnd: HWND, text: &str) {
    let first_visible = SendMessageW(hwnd, EM_GETFIRSTVISIBLELINE, WPARAM(0), LPARAM(0)).0;
    let mut start = 0u32;
    let mut end = 0u32;
    SendMessageW(
        hwnd,
        EM_GETSEL,
        WPARAM(&mut start as *mut u32 as usize),
        LPARAM(&mut end as *mut u32 as isize),
    );

    let wide: Vec<u16> = text.encode_utf16().chain(std::iter::once(0)).collect();
    let _ = SetWindowTextW(hwnd, PCWSTR(wide.as_ptr()));

    SendMessageW(hwnd, EM_SETSEL, WPARAM(start as usize), LPARAM(end as isize));
    let now_visible = SendMessageW(hwnd, EM_GETFIRSTVISIBLELINE, WPARAM(0), LPARAM(0)).0;
    SendMessageW(hwnd, EM_LINESCROLL, WPARAM(0), LPARAM(first_visible - now_visible));
}

/// Widen a 16-bit edit control result known to lie at or after `floor`
fn widen_from(floor: u32, low: u16) -> u32 {
    floor + ((low as u32).wrapping_sub(floor) & 0xFFFF)
}

/// Document position under `screen` in the host editor.
///
/// `None` when the editor is hidden or the point is outside its text area.
pub(crate) unsafe fn position_at(editor: HWND, screen: Point) -> Option<LogicalPosition> {
    if !IsWindowVisible(editor).as_bool() {
        return None;
    }

    let mut pt = POINT { x: screen.x, y: screen.y };
    let _ = ScreenToClient(editor, &mut pt);
    let mut client = RECT::default();
    GetClientRect(editor, &mut client).ok()?;
    if pt.x < client.left || pt.x >= client.right || pt.y < client.top || pt.y >= client.bottom {
        return None;
    }

    let packed = ((pt.y as u32 & 0xFFFF) << 16) | (pt.x as u32 & 0xFFFF);
    let result = SendMessageW(editor, EM_CHARFROMPOS, WPARAM(0), LPARAM(packed as isize)).0 as u32;
    if result == u32::MAX {
        return None;
    }

    // Both halves of the result are truncated to 16 bits
    let first_visible = SendMessageW(editor, EM_GETFIRSTVISIBLELINE, WPARAM(0), LPARAM(0)).0.max(0) as u32;
    let line = widen_from(first_visible, (result >> 16) as u16);
    let line_start = SendMessageW(editor, EM_LINEINDEX, WPARAM(line as usize), LPARAM(0)).0;
    if line_start < 0 {
        return None;
    }
    let line_start = line_start as u32;
    let offset = widen_from(line_start, (result & 0xFFFF) as u16);

    Some(LogicalPosition::new(line, offset - line_start))
}

/// Bounds of a visible scroll bar of `hwnd`, relative to `origin`
unsafe fn scroll_bar(hwnd: HWND, vertical: bool, origin: Point) -> Option<(Rect, SCROLLBARINFO)> {
    let mut info = SCROLLBARINFO {
        cbSize: std::mem::size_of::<SCROLLBARINFO>() as u32,
        ..Default::default()
    };
    let id = if vertical { OBJID_VSCROLL } else { OBJID_HSCROLL };
    GetScrollBarInfo(hwnd, id, &mut info).ok()?;

    if info.rgstate[0] & (STATE_SYSTEM_INVISIBLE | STATE_SYSTEM_OFFSCREEN) != 0 {
        return None;
    }

    let bar = Rect::from_edges(
        info.rcScrollBar.left - origin.x,
        info.rcScrollBar.top - origin.y,
        info.rcScrollBar.right - origin.x,
        info.rcScrollBar.bottom - origin.y,
    );
    Some((bar, info))
}

/// Live, editable view of the document inside a peek window
pub struct EditView {
    hwnd: isize,
    font: HFONT,
    font_size: i32,
}

impl EditView {
    /// Create the view as a child of `parent`, showing `text`
    pub(crate) fn create(parent: RawWindow, text: &str, font_size: i32) -> windows::core::Result<Self> {
        unsafe {
            let hwnd = create_edit(hwnd_from_raw(parent), 1, WINDOW_EX_STYLE::default())?;
            let font = apply_font(hwnd, font_size);
            replace_text(hwnd, text);

            Ok(Self {
                hwnd: hwnd.0 as isize,
                font,
                font_size,
            })
        }
    }

    fn window(&self) -> HWND {
        hwnd_from_raw(self.hwnd)
    }

    /// Window rect's top-left; layouts are relative to it
    unsafe fn origin(&self) -> Option<(Point, RECT)> {
        let mut window = RECT::default();
        GetWindowRect(self.window(), &mut window).ok()?;
        Some((Point::new(window.left, window.top), window))
    }
}

impl ContentView for EditView {
    fn handle(&self) -> RawWindow {
        self.hwnd
    }

    fn layout(&self) -> Option<ViewNode> {
        unsafe {
            let hwnd = self.window();
            let (origin, window) = self.origin()?;
            let mut root = ViewNode::new(
                NodeKind::Container,
                Rect::from_edges(0, 0, window.right - window.left, window.bottom - window.top),
            );

            let mut client = RECT::default();
            GetClientRect(hwnd, &mut client).ok()?;
            root = root.with_child(ViewNode::new(
                NodeKind::Text,
                Rect::from_edges(0, 0, client.right, client.bottom),
            ));

            if let Some((bar, _)) = scroll_bar(hwnd, true, origin) {
                root = root.with_child(ViewNode::new(NodeKind::VerticalScrollBar, bar));
            }
            if let Some((bar, _)) = scroll_bar(hwnd, false, origin) {
                root = root.with_child(ViewNode::new(NodeKind::HorizontalScrollBar, bar));
            }
            Some(root)
        }
    }

    fn scroll_thumb(&self) -> Option<Rect> {
        unsafe {
            let (origin, _) = self.origin()?;
            let (bar, info) = scroll_bar(self.window(), true, origin)?;
            if info.xyThumbBottom <= info.xyThumbTop {
                return None;
            }
            Some(Rect::from_edges(
                bar.x,
                bar.y + info.xyThumbTop,
                bar.right(),
                bar.y + info.xyThumbBottom,
            ))
        }
    }

    fn font_size(&self) -> i32 {
        self.font_size
    }

    fn set_font_size(&mut self, size: i32) {
        if size == self.font_size {
            return;
        }
        unsafe {
            let old = self.font;
            self.font = apply_font(self.window(), size);
            delete_font(old);
        }
        self.font_size = size;
    }

    fn scroll_to(&mut self, position: LogicalPosition) {
        let hwnd = self.window();
        unsafe {
            let lines = SendMessageW(hwnd, EM_GETLINECOUNT, WPARAM(0), LPARAM(0)).0.max(1);
            let line = (position.line as isize).min(lines - 1);
            let line_start = SendMessageW(hwnd, EM_LINEINDEX, WPARAM(line as usize), LPARAM(0)).0;
            if line_start < 0 {
                return;
            }
            let line_len = SendMessageW(hwnd, EM_LINELENGTH, WPARAM(line_start as usize), LPARAM(0)).0;
            let column = (position.column as isize).min(line_len.max(0));

            let caret = line_start + column;
            SendMessageW(hwnd, EM_SETSEL, WPARAM(caret as usize), LPARAM(caret));

            // Line at the top, column at the left edge
            SendMessageW(hwnd, WM_HSCROLL, WPARAM(SB_LEFT), LPARAM(0));
            let first_visible = SendMessageW(hwnd, EM_GETFIRSTVISIBLELINE, WPARAM(0), LPARAM(0)).0;
            SendMessageW(hwnd, EM_LINESCROLL, WPARAM(column as usize), LPARAM(line - first_visible));
        }
        log::debug!("Peek view scrolled to {}:{}", position.line + 1, position.column + 1);
    }

    fn child_notification(&mut self, code: u32) {
        if code == EN_CHANGE {
            sync::publish_from(self.hwnd);
        }
    }

    fn release(&mut self) {
        sync::unregister_view(self.hwnd);
        unsafe {
            let hwnd = self.window();
            if IsWindow(hwnd).as_bool() {
                let _ = DestroyWindow(hwnd);
            }
            delete_font(self.font);
        }
        self.font = HFONT::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widen_keeps_small_values() {
        assert_eq!(widen_from(0, 42), 42);
        assert_eq!(widen_from(40, 42), 42);
    }

    #[test]
    fn widen_recovers_high_bits_past_floor() {
        assert_eq!(widen_from(70_000, (70_010 & 0xFFFF) as u16), 70_010);
        assert_eq!(widen_from(65_530, (65_540 & 0xFFFF) as u16), 65_540);
    }
}
