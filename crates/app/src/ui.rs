//! Host editor window

use crate::document::Document;
use crate::editor::{self, hwnd_from_raw, EN_CHANGE};
use crate::state::StateMachine;
use crate::sync;
use crate::tray::{SystemTray, ID_TRAY_CAPTURE, ID_TRAY_EXIT, ID_TRAY_OPEN, ID_TRAY_SHOW, WM_TRAYICON};
use crate::trigger;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use peek::FloatingPeekWindow;
use std::cell::RefCell;
use std::sync::Arc;
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{COLORREF, HINSTANCE, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{CreateSolidBrush, DeleteObject, UpdateWindow, HFONT};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    RegisterHotKey, SetFocus, UnregisterHotKey, MOD_CONTROL, MOD_NOREPEAT, MOD_SHIFT,
};
use windows::Win32::UI::WindowsAndMessaging::*;

/// Window dimensions
const WINDOW_WIDTH: i32 = 900;
const WINDOW_HEIGHT: i32 = 640;

const ID_EDITOR: u16 = 101;

/// Ctrl+Shift+P
const HOTKEY_CAPTURE: i32 = 1;
const HOTKEY_KEY: u32 = b'P' as u32;

/// Custom messages
pub const WM_APP_UPDATE_STATE: u32 = WM_USER + 100;

static UI_STATE: OnceCell<Arc<Mutex<UiState>>> = OnceCell::new();

thread_local! {
    static TRAY: RefCell<Option<SystemTray>> = RefCell::new(None);
    static EDITOR_FONT: RefCell<HFONT> = RefCell::new(HFONT::default());
}

// Store handles as isize for thread safety
pub struct UiState {
    pub state_machine: StateMachine,
    pub document: Option<Document>,
    pub editor: isize,
    /// Edit controls of open peek views
    pub views: Vec<isize>,
}

impl UiState {
    fn new() -> Self {
        Self {
            state_machine: StateMachine::new(),
            document: None,
            editor: 0,
            views: Vec::new(),
        }
    }

    /// Host editor first, then every peek view
    pub fn edit_controls(&self) -> impl Iterator<Item = isize> + '_ {
        std::iter::once(self.editor)
            .filter(|raw| *raw != 0)
            .chain(self.views.iter().copied())
    }

    /// Whether a capture may start right now
    pub fn can_capture(&self) -> bool {
        self.document.is_some() && self.state_machine.state().can_capture()
    }

    fn window_title(&self) -> String {
        match self.document.as_ref() {
            Some(document) => format!(
                "{} - GlassPeek",
                document.display_name().as_deref().unwrap_or(peek::FALLBACK_TITLE)
            ),
            None => "GlassPeek".to_string(),
        }
    }
}

pub(crate) fn ui_state() -> Option<&'static Arc<Mutex<UiState>>> {
    UI_STATE.get()
}

/// Main window
pub struct MainWindow {
    hwnd: HWND,
}

impl MainWindow {
    const CLASS_NAME: PCWSTR = w!("GlassPeekMain");

    /// Create the main window with its editor, tray icon and capture hotkey
    pub fn create() -> windows::core::Result<Self> {
        let state = Arc::new(Mutex::new(UiState::new()));
        let _ = UI_STATE.set(state.clone());

        unsafe {
            let hmodule = GetModuleHandleW(None)?;
            let hinstance = HINSTANCE(hmodule.0);

            let bg_brush = CreateSolidBrush(COLORREF(0x00FFFFFF));

            let wc = WNDCLASSEXW {
                cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
                style: CS_HREDRAW | CS_VREDRAW,
                lpfnWndProc: Some(Self::wnd_proc),
                hInstance: hinstance,
                hIcon: LoadIconW(None, IDI_APPLICATION)?,
                hCursor: LoadCursorW(None, IDC_ARROW)?,
                hbrBackground: bg_brush,
                lpszClassName: Self::CLASS_NAME,
                ..Default::default()
            };

            RegisterClassExW(&wc);

            // Center on the primary monitor
            let screen_width = GetSystemMetrics(SM_CXSCREEN);
            let screen_height = GetSystemMetrics(SM_CYSCREEN);
            let x = (screen_width - WINDOW_WIDTH) / 2;
            let y = (screen_height - WINDOW_HEIGHT) / 2;

            let hwnd = CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                Self::CLASS_NAME,
                w!("GlassPeek"),
                WS_OVERLAPPEDWINDOW,
                x,
                y,
                WINDOW_WIDTH,
                WINDOW_HEIGHT,
                HWND::default(),
                HMENU::default(),
                hinstance,
                None,
            )?;

            let (editor, font) = editor::create_host_editor(hwnd, ID_EDITOR)?;
            EDITOR_FONT.with(|slot| *slot.borrow_mut() = font);
            state.lock().editor = editor.0 as isize;
            Self::layout_editor(hwnd);

            TRAY.with(|tray| {
                let mut tray = tray.borrow_mut();
                let mut new_tray = SystemTray::new(hwnd);
                if let Err(e) = new_tray.show() {
                    log::warn!("Tray icon unavailable: {}", e);
                }
                *tray = Some(new_tray);
            });

            if let Err(e) = RegisterHotKey(hwnd, HOTKEY_CAPTURE, MOD_CONTROL | MOD_SHIFT | MOD_NOREPEAT, HOTKEY_KEY) {
                log::warn!("Ctrl+Shift+P unavailable, use the tray menu to capture: {}", e);
            }

            Ok(Self { hwnd })
        }
    }

    /// Show the window
    pub fn show(&self) {
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_SHOW);
            let _ = UpdateWindow(self.hwnd);
        }
    }

    /// Get window handle
    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    /// Run message loop
    pub fn run_message_loop() -> i32 {
        unsafe {
            let mut msg = MSG::default();
            while GetMessageW(&mut msg, None, 0, 0).into() {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
            msg.wParam.0 as i32
        }
    }

    /// Refresh title and tray tooltip from the shared state
    pub fn update_state(hwnd: HWND) {
        let Some(state) = ui_state() else {
            return;
        };
        let title = state.lock().window_title();

        let wide: Vec<u16> = title.encode_utf16().chain(std::iter::once(0)).collect();
        unsafe {
            let _ = SetWindowTextW(hwnd, PCWSTR(wide.as_ptr()));
        }
        TRAY.with(|tray| {
            if let Some(tray) = tray.borrow_mut().as_mut() {
                tray.set_tooltip(&title);
            }
        });
    }

    unsafe fn layout_editor(hwnd: HWND) {
        let Some(editor) = ui_state().map(|state| state.lock().editor) else {
            return;
        };
        let mut rc = RECT::default();
        if GetClientRect(hwnd, &mut rc).is_ok() {
            let _ = MoveWindow(hwnd_from_raw(editor), 0, 0, rc.right, rc.bottom, true);
        }
    }

    unsafe fn bring_to_front(hwnd: HWND) {
        let _ = ShowWindow(hwnd, SW_SHOW);
        let _ = SetForegroundWindow(hwnd);
    }

    unsafe extern "system" fn wnd_proc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        match msg {
            WM_SIZE => {
                Self::layout_editor(hwnd);
                LRESULT(0)
            }

            WM_SETFOCUS => {
                if let Some(editor) = ui_state().map(|state| state.lock().editor) {
                    let _ = SetFocus(hwnd_from_raw(editor));
                }
                LRESULT(0)
            }

            WM_COMMAND => {
                let id = (wparam.0 & 0xFFFF) as u16;
                let code = ((wparam.0 >> 16) & 0xFFFF) as u32;

                if id == ID_EDITOR && lparam.0 != 0 {
                    if code == EN_CHANGE {
                        sync::publish_from(lparam.0);
                    }
                    return LRESULT(0);
                }

                // Tray menu commands
                match wparam.0 as u32 {
                    ID_TRAY_CAPTURE => trigger::start_capture(hwnd),
                    ID_TRAY_OPEN => Self::on_open_file(hwnd),
                    ID_TRAY_SHOW => Self::bring_to_front(hwnd),
                    ID_TRAY_EXIT => {
                        let _ = DestroyWindow(hwnd);
                    }
                    _ => {}
                }
                LRESULT(0)
            }

            WM_HOTKEY => {
                if wparam.0 as i32 == HOTKEY_CAPTURE {
                    trigger::start_capture(hwnd);
                }
                LRESULT(0)
            }

            WM_TRAYICON => {
                let event = (lparam.0 & 0xFFFF) as u32;
                if event == WM_RBUTTONUP {
                    let can_capture = ui_state().is_some_and(|state| state.lock().can_capture());
                    TRAY.with(|tray| {
                        if let Some(ref tray) = *tray.borrow() {
                            if let Err(e) = tray.show_context_menu(can_capture) {
                                log::warn!("Tray menu failed: {}", e);
                            }
                        }
                    });
                } else if event == WM_LBUTTONDBLCLK {
                    Self::bring_to_front(hwnd);
                }
                LRESULT(0)
            }

            WM_APP_UPDATE_STATE => {
                Self::update_state(hwnd);
                LRESULT(0)
            }

            WM_CLOSE => {
                // Hide to tray; peek windows follow through visibility sync
                let _ = ShowWindow(hwnd, SW_HIDE);
                LRESULT(0)
            }

            WM_DESTROY => {
                let _ = UnregisterHotKey(hwnd, HOTKEY_CAPTURE);
                FloatingPeekWindow::close_all();
                TRAY.with(|tray| {
                    *tray.borrow_mut() = None;
                });
                EDITOR_FONT.with(|slot| {
                    let font = std::mem::take(&mut *slot.borrow_mut());
                    if !font.is_invalid() {
                        let _ = DeleteObject(font);
                    }
                });
                PostQuitMessage(0);
                LRESULT(0)
            }

            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }

    fn on_open_file(hwnd: HWND) {
        let path = rfd::FileDialog::new()
            .add_filter("Text files", &["txt", "md", "rs", "toml", "json", "log"])
            .add_filter("All files", &["*"])
            .pick_file();

        let Some(path) = path else {
            return;
        };

        match Document::open(&path) {
            Ok(document) => {
                sync::load(document);
                post_update_state(hwnd);
            }
            Err(e) => log::error!("{}", e),
        }
    }
}

/// Post state update message
pub fn post_update_state(hwnd: HWND) {
    unsafe {
        let _ = PostMessageW(hwnd, WM_APP_UPDATE_STATE, WPARAM(0), LPARAM(0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_controls_start_with_the_host_editor() {
        let mut state = UiState::new();
        state.views = vec![30, 40];
        assert_eq!(state.edit_controls().collect::<Vec<_>>(), vec![30, 40]);

        state.editor = 10;
        assert_eq!(state.edit_controls().collect::<Vec<_>>(), vec![10, 30, 40]);
    }

    #[test]
    fn capture_needs_a_document_and_idle_state() {
        let mut state = UiState::new();
        assert!(!state.can_capture());

        state.document = Some(Document::new("text"));
        assert!(state.can_capture());

        state.state_machine.start_selecting();
        assert!(!state.can_capture());
    }

    #[test]
    fn title_names_the_document() {
        let mut state = UiState::new();
        assert_eq!(state.window_title(), "GlassPeek");

        state.document = Some(Document::new(""));
        assert_eq!(state.window_title(), "Untitled - GlassPeek");
    }
}
