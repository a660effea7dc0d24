//! Services the host application provides to peek windows

use crate::content::{ContentView, LogicalPosition, RawWindow};
use crate::PeekResult;
use capture::Point;

/// Title used when the host has no name for its document
pub const FALLBACK_TITLE: &str = "Untitled";

pub trait PeekHost {
    /// Display name of the document, if it has one
    fn title(&self) -> Option<String>;

    /// Document position under `screen`; asked once per peek window
    fn resolve_position(&self, screen: Point) -> Option<LogicalPosition>;

    /// Create a live view of the document as a child of `parent`
    fn create_view(&self, parent: RawWindow) -> PeekResult<Box<dyn ContentView>>;

    /// Host main window, used as the peek window's owner
    fn owner(&self) -> RawWindow;
}

/// Title bar text for `host`
pub fn display_title(host: &dyn PeekHost) -> String {
    host.title()
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PeekError;

    struct NamedHost(Option<&'static str>);

    impl PeekHost for NamedHost {
        fn title(&self) -> Option<String> {
            self.0.map(str::to_string)
        }

        fn resolve_position(&self, _screen: Point) -> Option<LogicalPosition> {
            None
        }

        fn create_view(&self, _parent: RawWindow) -> PeekResult<Box<dyn ContentView>> {
            Err(PeekError::ViewCreation("no views in tests".into()))
        }

        fn owner(&self) -> RawWindow {
            0
        }
    }

    #[test]
    fn title_comes_from_host() {
        assert_eq!(display_title(&NamedHost(Some("main.rs"))), "main.rs");
    }

    #[test]
    fn missing_or_blank_title_falls_back() {
        assert_eq!(display_title(&NamedHost(None)), FALLBACK_TITLE);
        assert_eq!(display_title(&NamedHost(Some("  "))), FALLBACK_TITLE);
    }
}
