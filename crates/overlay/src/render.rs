//! GDI rendering for overlay

use crate::layout::{label_layout, size_label, OverlayStyle};
use capture::{Rect, Snapshot};
use std::mem::size_of;
use windows::core::w;
use windows::Win32::Foundation::{COLORREF, HWND, RECT, SIZE};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, CreateFontW, CreatePen,
    CreateSolidBrush, DeleteDC, DeleteObject, EndPaint, FillRect, GetStockObject,
    GetTextExtentPoint32W, Rectangle, SelectObject, SetBkMode, SetDIBitsToDevice,
    SetTextColor, TextOutW, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, CLIP_DEFAULT_PRECIS,
    DEFAULT_CHARSET, DEFAULT_PITCH, DEFAULT_QUALITY, DIB_RGB_COLORS, FF_SWISS, FW_NORMAL,
    HDC, NULL_BRUSH, OUT_DEFAULT_PRECIS, PAINTSTRUCT, PS_SOLID, SRCCOPY, TRANSPARENT,
};

/// Overlay renderer
pub struct OverlayRenderer {
    snapshot: Snapshot,
    /// Snapshot with the mask already composited
    masked: Snapshot,
    style: OverlayStyle,
}

impl OverlayRenderer {
    /// Create a new renderer with screenshot
    pub fn new(snapshot: Snapshot, style: OverlayStyle) -> Self {
        let masked = snapshot.dimmed(style.mask_alpha);
        Self {
            snapshot,
            masked,
            style,
        }
    }


    /// Render to window; `selection` is in overlay-local coordinates
    pub fn render(&self, hwnd: HWND, selection: Option<Rect>) {
        let width = self.snapshot.width() as i32;
        let height = self.snapshot.height() as i32;

        unsafe {
            let mut ps = PAINTSTRUCT::default();
            let hdc = BeginPaint(hwnd, &mut ps);

            // Paint off-screen so dragging does not flicker
            let mem_dc = CreateCompatibleDC(hdc);
            let bitmap = CreateCompatibleBitmap(hdc, width, height);
            let old_bitmap = SelectObject(mem_dc, bitmap);

            draw_bgra(mem_dc, 0, 0, width, height, self.masked.data());

            if let Some(rect) = selection.filter(|rect| !rect.is_empty()) {
                self.draw_clear_window(mem_dc, &rect);
                self.draw_border(mem_dc, &rect);
                self.draw_size_label(mem_dc, &rect);
            }

            let _ = BitBlt(hdc, 0, 0, width, height, mem_dc, 0, 0, SRCCOPY);

            SelectObject(mem_dc, old_bitmap);
            let _ = DeleteObject(bitmap);
            let _ = DeleteDC(mem_dc);

            let _ = EndPaint(hwnd, &ps);
        }
    }

    /// Show the unmasked snapshot inside the selection
    unsafe fn draw_clear_window(&self, hdc: HDC, rect: &Rect) {
        if let Some(image) = self.snapshot.sub_image(*rect) {
            draw_bgra(
                hdc,
                image.rect.x,
                image.rect.y,
                image.rect.width as i32,
                image.rect.height as i32,
                &image.data,
            );
        }
    }

    unsafe fn draw_border(&self, hdc: HDC, rect: &Rect) {
        let pen = CreatePen(PS_SOLID, self.style.border_width, COLORREF(self.style.border_color));
        let old_pen = SelectObject(hdc, pen);
        let old_brush = SelectObject(hdc, GetStockObject(NULL_BRUSH));

        let _ = Rectangle(hdc, rect.x, rect.y, rect.right(), rect.bottom());

        SelectObject(hdc, old_brush);
        SelectObject(hdc, old_pen);
        let _ = DeleteObject(pen);
    }

    unsafe fn draw_size_label(&self, hdc: HDC, rect: &Rect) {
        let font = CreateFontW(
            16,
            0,
            0,
            0,
            FW_NORMAL.0 as i32,
            0,
            0,
            0,
            DEFAULT_CHARSET.0 as u32,
            OUT_DEFAULT_PRECIS.0 as u32,
            CLIP_DEFAULT_PRECIS.0 as u32,
            DEFAULT_QUALITY.0 as u32,
            (DEFAULT_PITCH.0 | FF_SWISS.0) as u32,
            w!("Segoe UI"),
        );
        let old_font = SelectObject(hdc, font);

        let text: Vec<u16> = size_label(rect).encode_utf16().collect();
        let mut extent = SIZE::default();
        let _ = GetTextExtentPoint32W(hdc, &text, &mut extent);

        let layout = label_layout(
            rect,
            extent.cx,
            extent.cy,
            &self.snapshot.local_bounds(),
            &self.style,
        );

        let bg = layout.background;
        let bg_rect = RECT {
            left: bg.x,
            top: bg.y,
            right: bg.right(),
            bottom: bg.bottom(),
        };
        let brush = CreateSolidBrush(COLORREF(self.style.label_background));
        FillRect(hdc, &bg_rect, brush);
        let _ = DeleteObject(brush);

        SetBkMode(hdc, TRANSPARENT);
        SetTextColor(hdc, COLORREF(self.style.label_text_color));
        let _ = TextOutW(hdc, layout.text_origin.x, layout.text_origin.y, &text);

        SelectObject(hdc, old_font);
        let _ = DeleteObject(font);
    }
}

/// Blit a top-down BGRA buffer of `width` x `height` to (`x`, `y`)
unsafe fn draw_bgra(hdc: HDC, x: i32, y: i32, width: i32, height: i32, data: &[u8]) {
    let bmi = BITMAPINFO {
        bmiHeader: BITMAPINFOHEADER {
            biSize: size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: width,
            biHeight: -height, // Top-down
            biPlanes: 1,
            biBitCount: 32,
            biCompression: BI_RGB.0,
            biSizeImage: 0,
            biXPelsPerMeter: 0,
            biYPelsPerMeter: 0,
            biClrUsed: 0,
            biClrImportant: 0,
        },
        bmiColors: [Default::default()],
    };

    SetDIBitsToDevice(
        hdc,
        x,
        y,
        width as u32,
        height as u32,
        0,
        0,
        0,
        height as u32,
        data.as_ptr() as *const _,
        &bmi,
        DIB_RGB_COLORS,
    );
}
