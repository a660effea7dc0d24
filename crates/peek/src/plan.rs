//! Turning a selected region into peek window geometry

use crate::config::PeekConfig;
use capture::{Point, Rect};

/// Where a new peek window goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeekPlan {
    /// Initial window bounds, at least the configured initial size
    pub bounds: Rect,
    /// Screen point handed to the host's position resolver
    pub anchor: Point,
}

impl PeekPlan {
    /// Plan a window for `selection`; `None` when the selection has no area
    pub fn from_selection(selection: Rect, config: &PeekConfig) -> Option<Self> {
        if selection.is_empty() {
            return None;
        }

        let bounds = Rect::new(
            selection.x,
            selection.y,
            selection.width.max(config.initial_size.width),
            selection.height.max(config.initial_size.height),
        );

        Some(Self {
            bounds,
            anchor: selection.origin(),
        })
    }
}
