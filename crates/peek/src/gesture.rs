//! Move and resize gestures of a peek window
//!
//! A gesture starts with a primary-button press over a move or resize zone. The
//! window bounds and the pointer's screen position are captured once at press time;
//! every later pointer sample re-derives the bounds from that snapshot plus the total
//! pointer delta, so rounding never accumulates.

use crate::config::{PeekConfig, Size};
use crate::hit_test::{CursorShape, ResizeDirection, Zone};
use capture::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Move,
    Resize(ResizeDirection),
}

/// State captured when a gesture starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureSnapshot {
    /// Window bounds at press time (screen coordinates)
    pub bounds: Rect,
    /// Pointer position at press time (screen coordinates)
    pub press_point: Point,
    pub kind: GestureKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GesturePhase {
    #[default]
    Idle,
    /// Pressed over a move or resize zone, no motion yet
    Pressed(GestureSnapshot),
    Dragging(GestureSnapshot),
    Resizing(GestureSnapshot),
}

impl GesturePhase {
    pub fn snapshot(&self) -> Option<&GestureSnapshot> {
        match self {
            GesturePhase::Idle => None,
            GesturePhase::Pressed(snapshot)
            | GesturePhase::Dragging(snapshot)
            | GesturePhase::Resizing(snapshot) => Some(snapshot),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// Buttons held while a pointer event was generated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub primary: bool,
    pub middle: bool,
    pub secondary: bool,
}

impl ButtonState {
    /// Any non-primary button held
    pub fn other_held(&self) -> bool {
        self.middle || self.secondary
    }
}

/// One pointer event as seen by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerSample {
    /// Window-local position
    pub local: Point,
    /// Screen position
    pub screen: Point,
    pub buttons: ButtonState,
}

/// Bounds after resizing `start` by the pointer delta `(dx, dy)` in `direction`.
///
/// Each dragged edge is clamped against the opposite edge, which never moves, so
/// the result is at least `min` in both dimensions.
pub fn resize_bounds(start: Rect, direction: ResizeDirection, dx: i32, dy: i32, min: Size) -> Rect {
    let min_w = min.width as i32;
    let min_h = min.height as i32;

    let mut left = start.x;
    let mut top = start.y;
    let mut right = start.right();
    let mut bottom = start.bottom();

    if direction.has_west() {
        left = (left + dx).min(right - min_w);
    }
    if direction.has_east() {
        right = (right + dx).max(left + min_w);
    }
    if direction.has_north() {
        top = (top + dy).min(bottom - min_h);
    }
    if direction.has_south() {
        bottom = (bottom + dy).max(top + min_h);
    }

    Rect::from_edges(left, top, right, bottom)
}

/// Gesture state machine of one peek window
#[derive(Debug, Clone)]
pub struct GeometryController {
    min_size: Size,
    phase: GesturePhase,
}

impl GeometryController {
    pub fn new(config: &PeekConfig) -> Self {
        Self {
            min_size: config.min_size,
            phase: GesturePhase::Idle,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase != GesturePhase::Idle
    }

    /// Handle a button press over `zone`; returns true when a gesture started.
    ///
    /// `bounds` is the window's current screen rectangle.
    pub fn press(&mut self, button: PointerButton, zone: Zone, sample: &PointerSample, bounds: Rect) -> bool {
        if button != PointerButton::Primary || sample.buttons.other_held() {
            return false;
        }

        let kind = match zone {
            Zone::Move => GestureKind::Move,
            Zone::Resize(direction) => GestureKind::Resize(direction),
            Zone::Close | Zone::PassThrough | Zone::Interior => {
                self.phase = GesturePhase::Idle;
                return false;
            }
        };

        // A stale gesture (lost release) is simply replaced
        self.phase = GesturePhase::Pressed(GestureSnapshot {
            bounds,
            press_point: sample.screen,
            kind,
        });
        true
    }

    /// Handle pointer motion; returns the new window bounds while a gesture runs
    pub fn drag(&mut self, sample: &PointerSample) -> Option<Rect> {
        if sample.buttons.other_held() || !sample.buttons.primary {
            return None;
        }

        let snapshot = *self.phase.snapshot()?;
        let (dx, dy) = sample.screen.delta_from(snapshot.press_point);

        let bounds = match snapshot.kind {
            GestureKind::Move => {
                self.phase = GesturePhase::Dragging(snapshot);
                snapshot.bounds.offset(dx, dy)
            }
            GestureKind::Resize(direction) => {
                self.phase = GesturePhase::Resizing(snapshot);
                resize_bounds(snapshot.bounds, direction, dx, dy, self.min_size)
            }
        };
        Some(bounds)
    }

    /// Handle a button release; returns the cursor to restore, if any.
    ///
    /// Only the primary button ends a gesture.
    pub fn release(&mut self, button: PointerButton) -> Option<CursorShape> {
        if button != PointerButton::Primary {
            return None;
        }
        self.phase = GesturePhase::Idle;
        Some(CursorShape::Default)
    }

    /// Cursor for hovering over `zone` with `buttons` held
    pub fn cursor_for(&self, zone: Zone, buttons: ButtonState) -> CursorShape {
        if buttons.other_held() {
            return CursorShape::Default;
        }
        zone.cursor()
    }

    /// Cursor to show once the pointer has left the window
    pub fn pointer_left(&self) -> CursorShape {
        CursorShape::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: Rect = Rect::new(100, 100, 300, 200);
    const MIN: Size = Size::new(100, 60);

    fn primary_at(x: i32, y: i32) -> PointerSample {
        PointerSample {
            local: Point::new(0, 0),
            screen: Point::new(x, y),
            buttons: ButtonState {
                primary: true,
                ..Default::default()
            },
        }
    }

    fn controller() -> GeometryController {
        GeometryController::new(&PeekConfig::default())
    }

    #[test]
    fn south_east_resize_follows_delta() {
        let bounds = resize_bounds(START, ResizeDirection::SouthEast, 40, -10, MIN);
        assert_eq!(bounds, Rect::new(100, 100, 340, 190));
    }

    #[test]
    fn single_edge_rules() {
        assert_eq!(resize_bounds(START, ResizeDirection::North, 5, -20, MIN), Rect::new(100, 80, 300, 220));
        assert_eq!(resize_bounds(START, ResizeDirection::South, 5, 20, MIN), Rect::new(100, 100, 300, 220));
        assert_eq!(resize_bounds(START, ResizeDirection::East, -30, 7, MIN), Rect::new(100, 100, 270, 200));
        assert_eq!(resize_bounds(START, ResizeDirection::West, -30, 7, MIN), Rect::new(70, 100, 330, 200));
        assert_eq!(resize_bounds(START, ResizeDirection::NorthWest, 10, 10, MIN), Rect::new(110, 110, 290, 190));
    }

    #[test]
    fn clamp_keeps_the_anchored_edge() {
        let bounds = resize_bounds(START, ResizeDirection::NorthWest, 1000, 1000, MIN);
        assert_eq!((bounds.width, bounds.height), (100, 60));
        assert_eq!(bounds.right(), START.right());
        assert_eq!(bounds.bottom(), START.bottom());

        let bounds = resize_bounds(START, ResizeDirection::SouthEast, -1000, -1000, MIN);
        assert_eq!(bounds, Rect::new(100, 100, 100, 60));
    }

    #[test]
    fn growing_back_after_clamp_tracks_smoothly() {
        let mut controller = controller();
        controller.press(PointerButton::Primary, Zone::Resize(ResizeDirection::West), &primary_at(100, 150), START);

        let clamped = controller.drag(&primary_at(600, 150)).unwrap();
        assert_eq!(clamped, Rect::new(300, 100, 100, 200));

        let back = controller.drag(&primary_at(250, 150)).unwrap();
        assert_eq!(back, Rect::new(250, 100, 150, 200));
    }

    #[test]
    fn move_applies_total_delta_to_press_bounds() {
        let mut controller = controller();
        assert!(controller.press(PointerButton::Primary, Zone::Move, &primary_at(150, 110), START));
        assert!(matches!(controller.phase(), GesturePhase::Pressed(_)));

        controller.drag(&primary_at(160, 115));
        let bounds = controller.drag(&primary_at(170, 130)).unwrap();
        assert_eq!(bounds, Rect::new(120, 120, 300, 200));
        assert!(matches!(controller.phase(), GesturePhase::Dragging(_)));
    }

    #[test]
    fn press_outside_gesture_zones_stays_idle() {
        let mut controller = controller();
        for zone in [Zone::Close, Zone::PassThrough, Zone::Interior] {
            assert!(!controller.press(PointerButton::Primary, zone, &primary_at(0, 0), START));
            assert!(!controller.is_active());
        }
        assert_eq!(controller.drag(&primary_at(10, 10)), None);
    }

    #[test]
    fn other_buttons_never_touch_the_gesture() {
        let mut controller = controller();
        assert!(!controller.press(PointerButton::Middle, Zone::Move, &primary_at(0, 0), START));
        assert!(!controller.is_active());

        controller.press(PointerButton::Primary, Zone::Resize(ResizeDirection::East), &primary_at(400, 150), START);
        let mut with_middle = primary_at(450, 150);
        with_middle.buttons.middle = true;
        assert_eq!(controller.drag(&with_middle), None);
        assert_eq!(controller.release(PointerButton::Middle), None);
        assert!(controller.is_active());

        assert_eq!(
            controller.cursor_for(Zone::Resize(ResizeDirection::East), with_middle.buttons),
            CursorShape::Default
        );
        assert_eq!(controller.drag(&primary_at(450, 150)), Some(Rect::new(100, 100, 350, 200)));
        assert!(matches!(controller.phase(), GesturePhase::Resizing(_)));
    }

    #[test]
    fn release_clears_and_restores_cursor() {
        let mut controller = controller();
        controller.press(PointerButton::Primary, Zone::Move, &primary_at(150, 110), START);
        assert_eq!(controller.release(PointerButton::Primary), Some(CursorShape::Default));
        assert!(!controller.is_active());
        assert_eq!(controller.drag(&primary_at(200, 200)), None);
    }

    #[test]
    fn new_press_replaces_stale_snapshot() {
        let mut controller = controller();
        controller.press(PointerButton::Primary, Zone::Move, &primary_at(150, 110), START);
        let moved = Rect::new(500, 500, 300, 200);
        controller.press(PointerButton::Primary, Zone::Resize(ResizeDirection::South), &primary_at(600, 700), moved);

        let snapshot = *controller.phase().snapshot().unwrap();
        assert_eq!(snapshot.bounds, moved);
        assert_eq!(snapshot.kind, GestureKind::Resize(ResizeDirection::South));
    }

    #[test]
    fn close_press_drops_stale_gesture() {
        let mut controller = controller();
        controller.press(PointerButton::Primary, Zone::Move, &primary_at(150, 110), START);
        controller.drag(&primary_at(170, 120));
        assert!(matches!(controller.phase(), GesturePhase::Dragging(_)));

        assert!(!controller.press(PointerButton::Primary, Zone::Close, &primary_at(390, 105), START));
        assert_eq!(controller.phase(), GesturePhase::Idle);
        assert_eq!(controller.drag(&primary_at(200, 200)), None);
    }

    #[test]
    fn hover_cursor_ignores_gesture_state() {
        let mut controller = controller();
        let buttons = ButtonState::default();
        assert_eq!(controller.cursor_for(Zone::Move, buttons), CursorShape::Move);
        controller.press(PointerButton::Primary, Zone::Move, &primary_at(0, 0), START);
        assert_eq!(
            controller.cursor_for(Zone::Resize(ResizeDirection::North), buttons),
            CursorShape::ResizeNorthSouth
        );
        assert_eq!(controller.pointer_left(), CursorShape::Default);
    }
}
