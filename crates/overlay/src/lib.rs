//! Overlay module for GlassPeek
//!
//! Provides the frozen-desktop overlay used to drag out a region.

pub mod cancel;
pub mod layout;
#[cfg(windows)]
mod render;
pub mod selection;
#[cfg(windows)]
mod window;

pub use cancel::{CancelHub, CancelRegistration};
pub use layout::OverlayStyle;
pub use selection::{calc_selection_rect, DragState, OverlayAction, OverlayEvent, SelectionSession};
#[cfg(windows)]
pub use window::{start, OverlayWindow};

use capture::{CaptureError, Rect};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverlayError {
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    Windows(#[from] windows::core::Error),

    #[error("Screenshot failed: {0}")]
    Capture(#[from] CaptureError),

    #[error("A selection overlay is already open")]
    AlreadyActive,
}

pub type OverlayResult<T> = Result<T, OverlayError>;

/// Selection outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// User selected a region (screen coordinates)
    Region(Rect),
    /// User cancelled
    Cancelled,
}
