//! Paint layout for the overlay: colors, border, size label placement

use capture::{Point, Rect};

/// Visual parameters of the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayStyle {
    /// Alpha of the black mask drawn over the whole snapshot
    pub mask_alpha: u8,
    /// Selection border width in pixels
    pub border_width: i32,
    /// COLORREF (0x00BBGGRR)
    pub border_color: u32,
    /// Space between label text and the edge of its background
    pub label_padding: i32,
    /// Space between the label and the selection's top edge
    pub label_gap: i32,
    pub label_background: u32,
    pub label_text_color: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            mask_alpha: 100,
            border_width: 2,
            border_color: 0x00FF0000, // Blue
            label_padding: 5,
            label_gap: 4,
            label_background: 0x00202020,
            label_text_color: 0x00FFFFFF,
        }
    }
}

/// Text shown next to the selection
pub fn size_label(rect: &Rect) -> String {
    format!("{} × {}", rect.width, rect.height)
}

/// Placement of the size label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelLayout {
    pub background: Rect,
    /// Top-left corner of the text
    pub text_origin: Point,
}

/// Place a label of `text_width` x `text_height` for `selection` on `surface`.
///
/// Preferred spot is just above the selection's top edge, left-aligned with it.
/// When that would leave the surface, the label moves just inside the top edge.
/// The background always covers the text plus `label_padding` on each side.
pub fn label_layout(
    selection: &Rect,
    text_width: i32,
    text_height: i32,
    surface: &Rect,
    style: &OverlayStyle,
) -> LabelLayout {
    let pad = style.label_padding;
    let width = text_width.max(0) + pad * 2;
    let height = text_height.max(0) + pad * 2;

    let mut top = selection.y - style.label_gap - height;
    if top < surface.y {
        top = selection.y + style.label_gap;
    }

    let mut left = selection.x;
    if left + width > surface.right() {
        left = surface.right() - width;
    }
    left = left.max(surface.x);

    let background = Rect::new(left, top, width as u32, height as u32);
    LabelLayout {
        background,
        text_origin: Point::new(left + pad, top + pad),
    }
}
