//! Floating peek windows for GlassPeek
//!
//! A peek window is a chrome-less, movable and resizable window showing a live
//! view of the host's document, opened over a region picked with the overlay.

pub mod config;
pub mod content;
pub mod focus;
pub mod gesture;
pub mod hit_test;
pub mod host;
pub mod plan;
#[cfg(windows)]
mod sync;
#[cfg(windows)]
mod window;
pub mod zoom;

pub use config::{FontRange, PeekConfig, Size};
pub use content::{ContentProbe, ContentView, LogicalPosition, NodeKind, RawWindow, ViewNode, ViewSlot};
pub use focus::{ForegroundKind, HostWindowState, HostWindows, StackingPolicy, VisibilitySync};
pub use gesture::{GeometryController, GesturePhase, PointerButton, PointerSample};
pub use hit_test::{classify, CursorShape, ResizeDirection, Zone};
pub use host::{display_title, PeekHost, FALLBACK_TITLE};
pub use plan::PeekPlan;
#[cfg(windows)]
pub use window::FloatingPeekWindow;
pub use zoom::{handle_wheel, WheelOutcome};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PeekError {
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    Windows(#[from] windows::core::Error),

    #[error("Content view creation failed: {0}")]
    ViewCreation(String),
}

pub type PeekResult<T> = Result<T, PeekError>;
