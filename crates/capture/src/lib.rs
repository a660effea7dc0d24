//! Screen capture primitives for GlassPeek
//!
//! Provides the shared geometry types and the frozen desktop snapshot.

#[cfg(windows)]
pub mod gdi;
pub mod snapshot;

#[cfg(windows)]
pub use gdi::{capture_virtual_desktop, virtual_desktop_rect};
pub use snapshot::{Snapshot, SubImage};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    Windows(#[from] windows::core::Error),

    #[error("Screenshot failed: {0}")]
    Screenshot(String),

    #[error("Pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Virtual desktop has no area")]
    EmptyDesktop,
}

pub type CaptureResult<T> = Result<T, CaptureError>;

/// Point in physical pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Vector from `origin` to `self`
    pub fn delta_from(self, origin: Point) -> (i32, i32) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// Rectangle in physical pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle between the given edges; inverted spans collapse to zero size.
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(
            left,
            top,
            (right - left).max(0) as u32,
            (bottom - top).max(0) as u32,
        )
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn contains_point(&self, point: Point) -> bool {
        self.contains(point.x, point.y)
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right() && self.right() > other.x &&
        self.y < other.bottom() && self.bottom() > other.y
    }

    /// Overlapping part of both rectangles, `None` when they do not overlap
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let overlap = Rect::from_edges(
            self.x.max(other.x),
            self.y.max(other.y),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        );
        (!overlap.is_empty()).then_some(overlap)
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::new(10, 10, 5, 5);
        assert!(rect.contains(10, 10));
        assert!(rect.contains(14, 14));
        assert!(!rect.contains(15, 10));
        assert!(!rect.contains(10, 15));
    }

    #[test]
    fn intersection_clips_to_overlap() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(80, -20, 50, 50);
        assert_eq!(a.intersection(&b), Some(Rect::new(80, 0, 20, 30)));
    }

    #[test]
    fn disjoint_rects_have_no_intersection() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn from_edges_never_goes_negative() {
        let rect = Rect::from_edges(50, 50, 40, 60);
        assert_eq!(rect, Rect::new(50, 50, 0, 10));
        assert!(rect.is_empty());
    }
}
