//! Capture flow: region selection, then a peek window over the selected region

use crate::editor::{self, hwnd_from_raw, EditView, DEFAULT_FONT_SIZE};
use crate::sync;
use crate::ui::{post_update_state, ui_state};
use capture::Point;
use peek::{ContentView, FloatingPeekWindow, LogicalPosition, PeekConfig, PeekError, PeekHost, PeekResult, RawWindow};
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::UpdateWindow;
use windows::Win32::UI::WindowsAndMessaging::{IsIconic, IsWindowVisible, ShowWindow, SW_RESTORE, SW_SHOW};

/// What peek windows need from the editor window
struct EditorHost {
    main: HWND,
    editor: HWND,
    title: Option<String>,
}

impl PeekHost for EditorHost {
    fn title(&self) -> Option<String> {
        self.title.clone()
    }

    fn resolve_position(&self, screen: Point) -> Option<LogicalPosition> {
        unsafe { editor::position_at(self.editor, screen) }
    }

    fn create_view(&self, parent: RawWindow) -> PeekResult<Box<dyn ContentView>> {
        let text = sync::document_text()
            .ok_or_else(|| PeekError::ViewCreation("no document is open".to_string()))?;
        let view = EditView::create(parent, &text, DEFAULT_FONT_SIZE)?;
        sync::register_view(view.handle());
        Ok(Box::new(view))
    }

    fn owner(&self) -> RawWindow {
        self.main.0 as isize
    }
}

/// Tray command or hotkey: pick a region and open a peek window over it.
///
/// Does nothing without an open document or while a selection is already running.
pub fn start_capture(main: HWND) {
    let Some(shared) = ui_state() else {
        return;
    };

    let host = {
        let mut state = shared.lock();
        let Some(document) = state.document.as_ref() else {
            log::debug!("No document open, capture ignored");
            return;
        };
        let title = document.display_name();
        if !state.state_machine.start_selecting() {
            log::debug!("Selection already in progress");
            return;
        }
        EditorHost {
            main,
            editor: hwnd_from_raw(state.editor),
            title,
        }
    };
    post_update_state(main);

    // The region is resolved against the editor, so it has to be on screen
    unsafe {
        if IsIconic(main).as_bool() {
            let _ = ShowWindow(main, SW_RESTORE);
        } else if !IsWindowVisible(main).as_bool() {
            let _ = ShowWindow(main, SW_SHOW);
        }
        let _ = UpdateWindow(main);
    }

    let mut opened = false;
    let result = overlay::start(|region| {
        match FloatingPeekWindow::open(region, &host, PeekConfig::default()) {
            Ok(peek) => opened = peek.is_some(),
            Err(e) => log::error!("Failed to open peek window: {}", e),
        }
    });
    if let Err(e) = result {
        log::error!("Region selection failed: {}", e);
    }

    {
        let mut state = shared.lock();
        if opened {
            state.state_machine.finish_selecting();
            log::debug!("{} peek windows opened so far", state.state_machine.peeks_opened());
        } else {
            state.state_machine.cancel_selecting();
        }
    }
    post_update_state(main);
}
