//! Keeps the shared document, the host editor and every peek view in step

use crate::document::Document;
use crate::editor::{hwnd_from_raw, read_text, replace_text};
use crate::ui::ui_state;
use std::cell::Cell;

thread_local! {
    /// Set while mirroring, so the resulting change notifications are ignored
    static MIRRORING: Cell<bool> = const { Cell::new(false) };
}

struct MirrorGuard;

impl MirrorGuard {
    fn enter() -> Option<Self> {
        if MIRRORING.with(|flag| flag.replace(true)) {
            None
        } else {
            Some(Self)
        }
    }
}

impl Drop for MirrorGuard {
    fn drop(&mut self) {
        MIRRORING.with(|flag| flag.set(false));
    }
}

/// Edit control `source` changed: store its text and mirror it everywhere else
pub(crate) fn publish_from(source: isize) {
    if MIRRORING.with(Cell::get) {
        return;
    }
    let Some(shared) = ui_state() else {
        return;
    };

    let text = unsafe { read_text(hwnd_from_raw(source)) };
    let (targets, edit_text) = {
        let mut state = shared.lock();
        let Some(document) = state.document.as_mut() else {
            return;
        };
        if !document.set_text(&text) {
            return;
        }
        log::trace!("Document at revision {}", document.revision());
        let edit_text = document.edit_text();
        let targets: Vec<isize> = state.edit_controls().filter(|raw| *raw != source).collect();
        (targets, edit_text)
    };

    mirror(&targets, &edit_text);
}

/// Make `document` the shared document and show it in every edit control
pub(crate) fn load(document: Document) {
    let Some(shared) = ui_state() else {
        return;
    };

    let (targets, edit_text) = {
        let mut state = shared.lock();
        let edit_text = document.edit_text();
        log::info!(
            "Loaded {} ({} lines, {} bytes)",
            document
                .path()
                .map_or_else(|| peek::FALLBACK_TITLE.to_string(), |path| path.display().to_string()),
            document.line_count(),
            document.text().len()
        );
        state.document = Some(document);
        (state.edit_controls().collect::<Vec<_>>(), edit_text)
    };

    mirror(&targets, &edit_text);
}

/// Document text as an edit control shows it, when a document is open
pub(crate) fn document_text() -> Option<String> {
    let shared = ui_state()?;
    let state = shared.lock();
    state.document.as_ref().map(Document::edit_text)
}

/// Mirror future changes into the edit control `raw`
pub(crate) fn register_view(raw: isize) {
    if let Some(shared) = ui_state() {
        shared.lock().views.push(raw);
    }
}

pub(crate) fn unregister_view(raw: isize) {
    if let Some(shared) = ui_state() {
        shared.lock().views.retain(|view| *view != raw);
    }
}

/// Window text is set with the state unlocked; edit controls notify synchronously
fn mirror(targets: &[isize], text: &str) {
    let Some(_guard) = MirrorGuard::enter() else {
        return;
    };
    for raw in targets {
        unsafe { replace_text(hwnd_from_raw(*raw), text) };
    }
    log::debug!("Mirrored document to {} edit controls", targets.len());
}
