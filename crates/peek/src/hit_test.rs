//! Glass layer classification of pointer positions
//!
//! Every pointer position over a peek window falls into exactly one [`Zone`].
//! Precedence, highest first: the close control, anything the content view wants
//! for itself (its scroll bar), the title bar, the resize bands, the interior.

use crate::config::{PeekConfig, Size};
use capture::Point;

/// Edge or corner being dragged during a resize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeDirection {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeDirection {
    /// Combine edge-band flags; corners win over single edges
    pub fn from_edges(left: bool, right: bool, top: bool, bottom: bool) -> Option<Self> {
        let direction = match (top, bottom, left, right) {
            (true, _, true, _) => Self::NorthWest,
            (true, _, _, true) => Self::NorthEast,
            (_, true, true, _) => Self::SouthWest,
            (_, true, _, true) => Self::SouthEast,
            (true, _, _, _) => Self::North,
            (_, true, _, _) => Self::South,
            (_, _, true, _) => Self::West,
            (_, _, _, true) => Self::East,
            _ => return None,
        };
        Some(direction)
    }

    pub fn has_north(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    pub fn has_south(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }

    pub fn has_east(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    pub fn has_west(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    pub fn cursor(self) -> CursorShape {
        match self {
            Self::North | Self::South => CursorShape::ResizeNorthSouth,
            Self::East | Self::West => CursorShape::ResizeEastWest,
            Self::NorthWest | Self::SouthEast => CursorShape::ResizeNwSe,
            Self::NorthEast | Self::SouthWest => CursorShape::ResizeNeSw,
        }
    }
}

/// Classification of one pointer position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Close,
    /// Owned by an interactive child of the content view
    PassThrough,
    Move,
    Resize(ResizeDirection),
    Interior,
}

impl Zone {
    /// Whether the frame, rather than the content view, handles the pointer here
    pub fn is_frame_gesture(self) -> bool {
        matches!(self, Zone::Move | Zone::Resize(_))
    }

    pub fn cursor(self) -> CursorShape {
        match self {
            Zone::Close => CursorShape::Hand,
            Zone::Move => CursorShape::Move,
            Zone::Resize(direction) => direction.cursor(),
            Zone::PassThrough | Zone::Interior => CursorShape::Default,
        }
    }
}

/// Pointer shapes used by the frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorShape {
    #[default]
    Default,
    Hand,
    Move,
    ResizeNorthSouth,
    ResizeEastWest,
    ResizeNwSe,
    ResizeNeSw,
}

/// Answers whether a window-local point belongs to a child that wants the pointer
pub trait PassThroughProbe {
    fn is_pass_through(&self, point: Point) -> bool;
}

/// Probe for windows without interactive children
pub struct NoPassThrough;

impl PassThroughProbe for NoPassThrough {
    fn is_pass_through(&self, _point: Point) -> bool {
        false
    }
}

/// Close control rectangle test
pub fn in_close_zone(config: &PeekConfig, point: Point, size: Size) -> bool {
    point.y < config.title_height && point.x >= size.width as i32 - config.close_width
}

/// Classify `point` (window-local) for a window of `size`
pub fn classify(config: &PeekConfig, point: Point, size: Size, probe: &dyn PassThroughProbe) -> Zone {
    let w = size.width as i32;
    let h = size.height as i32;
    let (x, y) = (point.x, point.y);

    if x < 0 || y < 0 || x >= w || y >= h {
        return Zone::Interior;
    }

    if in_close_zone(config, point, size) {
        return Zone::Close;
    }

    if probe.is_pass_through(point) {
        return Zone::PassThrough;
    }

    let b = config.border;
    if y < config.title_height && x >= b && x < w - b {
        return Zone::Move;
    }

    match ResizeDirection::from_edges(x < b, x >= w - b, y < b, y >= h - b) {
        Some(direction) => Zone::Resize(direction),
        None => Zone::Interior,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capture::Rect;

    const SIZE: Size = Size::new(300, 200);

    struct ScrollBarAt(Rect);

    impl PassThroughProbe for ScrollBarAt {
        fn is_pass_through(&self, point: Point) -> bool {
            self.0.contains_point(point)
        }
    }

    fn zone(x: i32, y: i32) -> Zone {
        classify(&PeekConfig::default(), Point::new(x, y), SIZE, &NoPassThrough)
    }

    #[test]
    fn close_zone_beats_everything() {
        assert_eq!(zone(299, 0), Zone::Close);
        assert_eq!(zone(275, 24), Zone::Close);
        assert_eq!(zone(274, 24), Zone::Move);
        assert_eq!(zone(299, 25), Zone::Resize(ResizeDirection::East));
    }

    #[test]
    fn title_band_moves_even_at_top_edge() {
        assert_eq!(zone(8, 0), Zone::Move);
        assert_eq!(zone(150, 3), Zone::Move);
        assert_eq!(zone(150, 24), Zone::Move);
    }

    #[test]
    fn title_side_band_resizes() {
        assert_eq!(zone(0, 0), Zone::Resize(ResizeDirection::NorthWest));
        assert_eq!(zone(7, 20), Zone::Resize(ResizeDirection::West));
    }

    #[test]
    fn border_bands_combine_into_directions() {
        assert_eq!(zone(0, 100), Zone::Resize(ResizeDirection::West));
        assert_eq!(zone(292, 100), Zone::Resize(ResizeDirection::East));
        assert_eq!(zone(150, 192), Zone::Resize(ResizeDirection::South));
        assert_eq!(zone(0, 199), Zone::Resize(ResizeDirection::SouthWest));
        assert_eq!(zone(299, 199), Zone::Resize(ResizeDirection::SouthEast));
        assert_eq!(zone(291, 100), Zone::Interior);
        assert_eq!(zone(150, 191), Zone::Interior);
    }

    #[test]
    fn outside_points_are_interior() {
        assert_eq!(zone(-1, 50), Zone::Interior);
        assert_eq!(zone(300, 50), Zone::Interior);
        assert_eq!(zone(50, 200), Zone::Interior);
    }

    #[test]
    fn scroll_bar_passes_through_inside_border_band() {
        let config = PeekConfig::default();
        let probe = ScrollBarAt(Rect::new(283, 25, 17, 175));

        for point in [Point::new(299, 100), Point::new(299, 199), Point::new(290, 30)] {
            assert_eq!(classify(&config, point, SIZE, &probe), Zone::PassThrough);
        }
        // Close control keeps precedence over the probe
        assert_eq!(classify(&config, Point::new(299, 0), SIZE, &probe), Zone::Close);
        // Outside the bar the normal bands apply
        assert_eq!(
            classify(&config, Point::new(150, 199), SIZE, &probe),
            Zone::Resize(ResizeDirection::South)
        );
    }

    #[test]
    fn corner_flags_map_to_diagonals() {
        assert_eq!(ResizeDirection::from_edges(false, true, true, false), Some(ResizeDirection::NorthEast));
        assert_eq!(ResizeDirection::from_edges(false, false, false, false), None);
        assert!(ResizeDirection::SouthWest.has_south() && ResizeDirection::SouthWest.has_west());
        assert!(!ResizeDirection::North.has_east());
    }

    #[test]
    fn cursor_follows_zone() {
        assert_eq!(Zone::Close.cursor(), CursorShape::Hand);
        assert_eq!(Zone::Move.cursor(), CursorShape::Move);
        assert_eq!(Zone::Resize(ResizeDirection::SouthEast).cursor(), CursorShape::ResizeNwSe);
        assert_eq!(Zone::Resize(ResizeDirection::NorthEast).cursor(), CursorShape::ResizeNeSw);
        assert_eq!(Zone::PassThrough.cursor(), CursorShape::Default);
    }
}
