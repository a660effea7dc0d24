//! Tunables for floating peek windows

/// Width and height in physical pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Inclusive range of font sizes reachable by Ctrl+wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontRange {
    pub min: i32,
    pub max: i32,
}

impl FontRange {
    pub fn clamp(&self, size: i32) -> i32 {
        size.clamp(self.min, self.max)
    }
}

impl Default for FontRange {
    fn default() -> Self {
        Self { min: 8, max: 72 }
    }
}

/// Peek window configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeekConfig {
    /// Thickness of the resize bands along every edge
    pub border: i32,
    /// Height of the custom title bar
    pub title_height: i32,
    /// Width of the close control in the title bar's top-right corner
    pub close_width: i32,
    /// Smallest size a resize gesture can produce
    pub min_size: Size,
    /// Smallest size of a freshly opened window
    pub initial_size: Size,
    pub font_range: FontRange,
    /// Title bar fill, COLORREF (0x00BBGGRR)
    pub title_background: u32,
    pub title_text_color: u32,
}

impl Default for PeekConfig {
    fn default() -> Self {
        Self {
            border: 8,
            title_height: 25,
            close_width: 25,
            min_size: Size::new(100, 60),
            initial_size: Size::new(300, 200),
            font_range: FontRange::default(),
            title_background: 0x00464646,
            title_text_color: 0x00FFFFFF,
        }
    }
}
