//! Selection logic for the region overlay

use capture::{Point, Rect};

/// Calculate selection rectangle from drag points
pub fn calc_selection_rect(start: Point, end: Point) -> Rect {
    let x = start.x.min(end.x);
    let y = start.y.min(end.y);
    let width = (start.x - end.x).unsigned_abs();
    let height = (start.y - end.y).unsigned_abs();

    Rect::new(x, y, width, height)
}

/// In-progress drag, in overlay-local coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    start: Option<Point>,
    end: Option<Point>,
}

impl DragState {
    /// Latch both points at the press position, discarding any stale drag
    pub fn press(&mut self, point: Point) {
        self.start = Some(point);
        self.end = Some(point);
    }

    /// Move the free corner; returns false when no press is active
    pub fn drag(&mut self, point: Point) -> bool {
        if self.start.is_none() {
            return false;
        }
        self.end = Some(point);
        true
    }

    /// Finish the drag at `point` and clear the state
    pub fn release(&mut self, point: Point) -> Option<Rect> {
        let start = self.start.take();
        self.end = None;
        start.map(|start| calc_selection_rect(start, point))
    }

    pub fn clear(&mut self) {
        self.start = None;
        self.end = None;
    }

    /// Rectangle currently spanned by the drag
    pub fn rect(&self) -> Option<Rect> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(calc_selection_rect(start, end)),
            _ => None,
        }
    }
}

/// Input delivered to the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    Press(Point),
    Drag(Point),
    Release(Point),
    Escape,
}

/// What the overlay window has to do in response to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    None,
    Repaint,
    /// Selection finished with a non-empty rectangle (screen coordinates); close the overlay
    Complete(Rect),
    /// Close the overlay without a selection
    Dismiss,
}

/// State machine of one overlay lifetime
#[derive(Debug)]
pub struct SelectionSession {
    drag: DragState,
    origin: Point,
    closed: bool,
}

impl SelectionSession {
    /// `origin` is the screen position of the overlay's top-left corner
    pub fn new(origin: Point) -> Self {
        Self {
            drag: DragState::default(),
            origin,
            closed: false,
        }
    }

    pub fn handle(&mut self, event: OverlayEvent) -> OverlayAction {
        if self.closed {
            return OverlayAction::None;
        }

        match event {
            OverlayEvent::Press(point) => {
                self.drag.press(point);
                OverlayAction::Repaint
            }
            OverlayEvent::Drag(point) => {
                if self.drag.drag(point) {
                    OverlayAction::Repaint
                } else {
                    OverlayAction::None
                }
            }
            OverlayEvent::Release(point) => {
                self.closed = true;
                match self.drag.release(point) {
                    Some(rect) if !rect.is_empty() => {
                        OverlayAction::Complete(rect.offset(self.origin.x, self.origin.y))
                    }
                    _ => OverlayAction::Dismiss,
                }
            }
            OverlayEvent::Escape => {
                self.closed = true;
                self.drag.clear();
                OverlayAction::Dismiss
            }
        }
    }

    /// Selection to draw, in overlay-local coordinates
    pub fn current_rect(&self) -> Option<Rect> {
        self.drag.rect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_is_normalized_for_every_drag_direction() {
        let corners = [(10, 20), (110, 20), (10, 70), (110, 70)];
        for &(sx, sy) in &corners {
            for &(ex, ey) in &corners {
                let rect = calc_selection_rect(Point::new(sx, sy), Point::new(ex, ey));
                assert_eq!(rect.x, sx.min(ex));
                assert_eq!(rect.y, sy.min(ey));
                assert_eq!(rect.width, (sx - ex).unsigned_abs());
                assert_eq!(rect.height, (sy - ey).unsigned_abs());
            }
        }
    }

    #[test]
    fn drag_without_press_is_ignored() {
        let mut drag = DragState::default();
        assert!(!drag.drag(Point::new(5, 5)));
        assert_eq!(drag.rect(), None);
    }

    #[test]
    fn new_press_overwrites_stale_drag() {
        let mut drag = DragState::default();
        drag.press(Point::new(0, 0));
        drag.drag(Point::new(50, 50));
        drag.press(Point::new(10, 10));
        assert_eq!(drag.rect(), Some(Rect::new(10, 10, 0, 0)));
    }

    #[test]
    fn session_completes_with_screen_rect() {
        let mut session = SelectionSession::new(Point::new(0, 0));
        assert_eq!(session.handle(OverlayEvent::Press(Point::new(500, 300))), OverlayAction::Repaint);
        assert_eq!(session.handle(OverlayEvent::Drag(Point::new(650, 400))), OverlayAction::Repaint);
        assert_eq!(session.current_rect(), Some(Rect::new(500, 300, 150, 100)));
        assert_eq!(
            session.handle(OverlayEvent::Release(Point::new(700, 450))),
            OverlayAction::Complete(Rect::new(500, 300, 200, 150))
        );
        assert!(session.closed);
    }

    #[test]
    fn session_translates_by_overlay_origin() {
        let mut session = SelectionSession::new(Point::new(-1920, -100));
        session.handle(OverlayEvent::Press(Point::new(40, 30)));
        assert_eq!(
            session.handle(OverlayEvent::Release(Point::new(10, 50))),
            OverlayAction::Complete(Rect::new(-1910, -70, 30, 20))
        );
    }

    #[test]
    fn zero_area_release_dismisses() {
        let mut session = SelectionSession::new(Point::default());
        session.handle(OverlayEvent::Press(Point::new(200, 200)));
        assert_eq!(session.handle(OverlayEvent::Release(Point::new(200, 200))), OverlayAction::Dismiss);

        let mut session = SelectionSession::new(Point::default());
        session.handle(OverlayEvent::Press(Point::new(200, 200)));
        assert_eq!(session.handle(OverlayEvent::Release(Point::new(300, 200))), OverlayAction::Dismiss);
    }

    #[test]
    fn release_without_press_dismisses() {
        let mut session = SelectionSession::new(Point::default());
        assert_eq!(session.handle(OverlayEvent::Release(Point::new(1, 1))), OverlayAction::Dismiss);
    }

    #[test]
    fn escape_mid_drag_dismisses_and_closes() {
        let mut session = SelectionSession::new(Point::default());
        session.handle(OverlayEvent::Press(Point::new(0, 0)));
        session.handle(OverlayEvent::Drag(Point::new(80, 80)));
        assert_eq!(session.handle(OverlayEvent::Escape), OverlayAction::Dismiss);
        assert_eq!(session.current_rect(), None);

        // The global hook and the window both report Escape; the second is a no-op
        assert_eq!(session.handle(OverlayEvent::Escape), OverlayAction::None);
        assert_eq!(session.handle(OverlayEvent::Release(Point::new(80, 80))), OverlayAction::None);
    }
}
