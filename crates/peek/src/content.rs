//! Content view abstraction
//!
//! The peek window embeds a view supplied by the host. The window only talks to it
//! through [`ContentView`]; the view's own layout is exposed as a tree of
//! [`ViewNode`]s so the glass layer can find children that want the pointer.

use crate::hit_test::PassThroughProbe;
use capture::{Point, Rect};

/// Raw window handle (`HWND` on Windows)
pub type RawWindow = isize;

/// Zero-based line and column in the underlying document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LogicalPosition {
    pub line: u32,
    pub column: u32,
}

impl LogicalPosition {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Container,
    VerticalScrollBar,
    HorizontalScrollBar,
    Text,
}

impl NodeKind {
    /// Whether pointer input over this node must reach it unfiltered
    pub fn wants_exclusive_pointer(self) -> bool {
        matches!(self, NodeKind::VerticalScrollBar | NodeKind::HorizontalScrollBar)
    }
}

/// Layout node; `bounds` is relative to the parent node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewNode {
    pub kind: NodeKind,
    pub bounds: Rect,
    pub children: Vec<ViewNode>,
}

impl ViewNode {
    pub fn new(kind: NodeKind, bounds: Rect) -> Self {
        Self {
            kind,
            bounds,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: ViewNode) -> Self {
        self.children.push(child);
        self
    }

    /// Whether `point` (parent coordinates) lands on a node that wants the pointer.
    ///
    /// Children are clipped by their parent's bounds.
    pub fn wants_exclusive_pointer(&self, point: Point) -> bool {
        if !self.bounds.contains_point(point) {
            return false;
        }
        if self.kind.wants_exclusive_pointer() {
            return true;
        }
        let local = point.offset(-self.bounds.x, -self.bounds.y);
        self.children
            .iter()
            .any(|child| child.wants_exclusive_pointer(local))
    }
}

/// Live view embedded in a peek window
pub trait ContentView {
    /// Child window to embed
    fn handle(&self) -> RawWindow;

    /// Current layout in content-area coordinates, `None` while not laid out
    fn layout(&self) -> Option<ViewNode>;

    /// Scroll thumb bounds in content-area coordinates, when the view can tell
    fn scroll_thumb(&self) -> Option<Rect> {
        None
    }

    fn font_size(&self) -> i32;

    fn set_font_size(&mut self, size: i32);

    /// Make `position` the first visible line and column
    fn scroll_to(&mut self, position: LogicalPosition);

    /// Notification code the view's child window sent to the peek frame
    fn child_notification(&mut self, _code: u32) {}

    /// Free the view's resources; called exactly once
    fn release(&mut self);
}

/// Owner of a content view; releases it exactly once
pub struct ViewSlot {
    view: Option<Box<dyn ContentView>>,
}

impl ViewSlot {
    pub fn new(view: Box<dyn ContentView>) -> Self {
        Self { view: Some(view) }
    }

    pub fn get(&self) -> Option<&(dyn ContentView + 'static)> {
        self.view.as_deref()
    }

    pub fn get_mut(&mut self) -> Option<&mut (dyn ContentView + 'static)> {
        self.view.as_deref_mut()
    }

    /// Release the view; returns false if it was already released
    pub fn release(&mut self) -> bool {
        match self.view.take() {
            Some(mut view) => {
                view.release();
                true
            }
            None => false,
        }
    }

    pub fn is_released(&self) -> bool {
        self.view.is_none()
    }
}

impl Drop for ViewSlot {
    fn drop(&mut self) {
        self.release();
    }
}

/// Pass-through probe backed by a content view's layout
pub struct ContentProbe<'a> {
    view: Option<&'a dyn ContentView>,
    /// Top-left of the content area in window coordinates
    origin: Point,
}

impl<'a> ContentProbe<'a> {
    pub fn new(view: Option<&'a dyn ContentView>, origin: Point) -> Self {
        Self { view, origin }
    }
}

impl PassThroughProbe for ContentProbe<'_> {
    fn is_pass_through(&self, point: Point) -> bool {
        let Some(view) = self.view else {
            return false;
        };
        let Some(layout) = view.layout() else {
            return false;
        };
        let local = point.offset(-self.origin.x, -self.origin.y);
        layout.wants_exclusive_pointer(local)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// In-memory view that counts releases
    pub(crate) struct MockView {
        pub releases: Rc<Cell<u32>>,
        pub font_size: i32,
        pub layout: Option<ViewNode>,
        pub scrolled_to: Option<LogicalPosition>,
    }

    impl MockView {
        pub(crate) fn new(releases: Rc<Cell<u32>>) -> Self {
            Self {
                releases,
                font_size: 12,
                layout: None,
                scrolled_to: None,
            }
        }
    }

    impl ContentView for MockView {
        fn handle(&self) -> RawWindow {
            0
        }

        fn layout(&self) -> Option<ViewNode> {
            self.layout.clone()
        }

        fn font_size(&self) -> i32 {
            self.font_size
        }

        fn set_font_size(&mut self, size: i32) {
            self.font_size = size;
        }

        fn scroll_to(&mut self, position: LogicalPosition) {
            self.scrolled_to = Some(position);
        }

        fn release(&mut self) {
            self.releases.set(self.releases.get() + 1);
        }
    }

    fn edit_layout() -> ViewNode {
        // 300x175 content area with a 17 px vertical scroll bar on the right
        ViewNode::new(NodeKind::Container, Rect::new(0, 0, 300, 175))
            .with_child(ViewNode::new(NodeKind::Text, Rect::new(0, 0, 283, 175)))
            .with_child(ViewNode::new(NodeKind::VerticalScrollBar, Rect::new(283, 0, 17, 175)))
    }

    #[test]
    fn slot_releases_exactly_once() {
        let releases = Rc::new(Cell::new(0));
        let mut slot = ViewSlot::new(Box::new(MockView::new(releases.clone())));

        assert!(slot.release());
        assert!(!slot.release());
        assert!(slot.is_released());
        drop(slot);

        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn dropping_slot_releases_view() {
        let releases = Rc::new(Cell::new(0));
        {
            let _slot = ViewSlot::new(Box::new(MockView::new(releases.clone())));
        }
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn tree_walk_translates_into_children() {
        let nested = ViewNode::new(NodeKind::Container, Rect::new(10, 10, 100, 100))
            .with_child(ViewNode::new(NodeKind::HorizontalScrollBar, Rect::new(0, 90, 100, 10)));

        assert!(nested.wants_exclusive_pointer(Point::new(50, 105)));
        assert!(!nested.wants_exclusive_pointer(Point::new(50, 95)));
    }

    #[test]
    fn children_are_clipped_by_parent() {
        let clipped = ViewNode::new(NodeKind::Container, Rect::new(0, 0, 50, 50))
            .with_child(ViewNode::new(NodeKind::VerticalScrollBar, Rect::new(40, 0, 20, 50)));

        assert!(clipped.wants_exclusive_pointer(Point::new(45, 10)));
        assert!(!clipped.wants_exclusive_pointer(Point::new(55, 10)));
    }

    #[test]
    fn probe_offsets_by_content_origin() {
        let releases = Rc::new(Cell::new(0));
        let mut view = MockView::new(releases);
        view.layout = Some(edit_layout());

        let probe = ContentProbe::new(Some(&view), Point::new(0, 25));
        assert!(probe.is_pass_through(Point::new(290, 30)));
        assert!(probe.is_pass_through(Point::new(299, 199)));
        assert!(!probe.is_pass_through(Point::new(290, 10)));
        assert!(!probe.is_pass_through(Point::new(100, 100)));
    }

    #[test]
    fn probe_without_layout_is_inert() {
        let releases = Rc::new(Cell::new(0));
        let view = MockView::new(releases);

        assert!(!ContentProbe::new(Some(&view), Point::new(0, 25)).is_pass_through(Point::new(290, 30)));
        assert!(!ContentProbe::new(None, Point::new(0, 25)).is_pass_through(Point::new(290, 30)));
    }

    #[test]
    fn scroll_thumb_defaults_to_unknown() {
        let view = MockView::new(Rc::new(Cell::new(0)));
        assert_eq!(view.scroll_thumb(), None);
    }
}
