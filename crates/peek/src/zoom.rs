//! Ctrl+wheel font zoom for content views

use crate::config::FontRange;
use crate::content::ContentView;

/// Font size after `notches` wheel steps (positive = away from the user)
pub fn zoomed_font_size(current: i32, notches: i32, range: &FontRange) -> i32 {
    range.clamp(current.saturating_add(notches))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelOutcome {
    /// Not a zoom gesture; let the view scroll
    PassThrough,
    /// Zoom gesture already at the range limit
    Consumed,
    /// Font size changed to the contained value
    Zoomed(i32),
}

impl WheelOutcome {
    pub fn is_consumed(self) -> bool {
        self != WheelOutcome::PassThrough
    }
}

/// Route one wheel event over the content view
pub fn handle_wheel(
    view: &mut dyn ContentView,
    modifier_held: bool,
    notches: i32,
    range: &FontRange,
) -> WheelOutcome {
    if !modifier_held {
        return WheelOutcome::PassThrough;
    }

    let current = view.font_size();
    let size = zoomed_font_size(current, notches, range);
    if size == current {
        return WheelOutcome::Consumed;
    }

    view.set_font_size(size);
    log::debug!("Peek font size {} -> {}", current, size);
    WheelOutcome::Zoomed(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::tests::MockView;
    use std::cell::Cell;
    use std::rc::Rc;

    fn view_with_font(size: i32) -> MockView {
        let mut view = MockView::new(Rc::new(Cell::new(0)));
        view.font_size = size;
        view
    }

    #[test]
    fn wheel_without_modifier_passes_through() {
        let mut view = view_with_font(12);
        let outcome = handle_wheel(&mut view, false, 3, &FontRange::default());
        assert_eq!(outcome, WheelOutcome::PassThrough);
        assert!(!outcome.is_consumed());
        assert_eq!(view.font_size, 12);
    }

    #[test]
    fn modifier_wheel_changes_font_size() {
        let mut view = view_with_font(12);
        assert_eq!(handle_wheel(&mut view, true, 1, &FontRange::default()), WheelOutcome::Zoomed(13));
        assert_eq!(handle_wheel(&mut view, true, -3, &FontRange::default()), WheelOutcome::Zoomed(10));
        assert_eq!(view.font_size, 10);
    }

    #[test]
    fn zoom_clamps_to_range() {
        let mut view = view_with_font(70);
        assert_eq!(handle_wheel(&mut view, true, 10, &FontRange::default()), WheelOutcome::Zoomed(72));
        assert_eq!(handle_wheel(&mut view, true, 1, &FontRange::default()), WheelOutcome::Consumed);

        let mut view = view_with_font(9);
        assert_eq!(handle_wheel(&mut view, true, -5, &FontRange::default()), WheelOutcome::Zoomed(8));
        assert!(handle_wheel(&mut view, true, -1, &FontRange::default()).is_consumed());
        assert_eq!(view.font_size, 8);
    }

    #[test]
    fn extreme_notches_do_not_overflow() {
        assert_eq!(zoomed_font_size(i32::MAX, i32::MAX, &FontRange::default()), 72);
    }
}
