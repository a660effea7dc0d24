//! Virtual desktop capture using GDI

use crate::{CaptureError, CaptureResult, Point, Rect, Snapshot};
use windows::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject,
    GetDC, GetDIBits, ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER,
    BI_RGB, DIB_RGB_COLORS, SRCCOPY,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetSystemMetrics, SM_CXVIRTUALSCREEN, SM_CYVIRTUALSCREEN,
    SM_XVIRTUALSCREEN, SM_YVIRTUALSCREEN,
};

/// Get virtual desktop bounds in screen coordinates
pub fn virtual_desktop_rect() -> Rect {
    unsafe {
        Rect::new(
            GetSystemMetrics(SM_XVIRTUALSCREEN),
            GetSystemMetrics(SM_YVIRTUALSCREEN),
            GetSystemMetrics(SM_CXVIRTUALSCREEN).max(0) as u32,
            GetSystemMetrics(SM_CYVIRTUALSCREEN).max(0) as u32,
        )
    }
}

/// Capture the entire virtual desktop
pub fn capture_virtual_desktop() -> CaptureResult<Snapshot> {
    let bounds = virtual_desktop_rect();
    if bounds.is_empty() {
        return Err(CaptureError::EmptyDesktop);
    }
    let width = bounds.width as i32;
    let height = bounds.height as i32;

    unsafe {
        let screen_dc = GetDC(None);
        if screen_dc.is_invalid() {
            return Err(CaptureError::Screenshot("Failed to get screen DC".into()));
        }

        let mem_dc = CreateCompatibleDC(screen_dc);
        let bitmap = CreateCompatibleBitmap(screen_dc, width, height);
        let old_bitmap = SelectObject(mem_dc, bitmap);

        let copied = BitBlt(
            mem_dc,
            0,
            0,
            width,
            height,
            screen_dc,
            bounds.x,
            bounds.y,
            SRCCOPY,
        );

        let mut data = vec![0u8; bounds.width as usize * bounds.height as usize * 4];
        let lines = if copied.is_ok() {
            let mut bmi = BITMAPINFO {
                bmiHeader: BITMAPINFOHEADER {
                    biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                    biWidth: width,
                    biHeight: -height, // Top-down DIB
                    biPlanes: 1,
                    biBitCount: 32,
                    biCompression: BI_RGB.0,
                    ..Default::default()
                },
                bmiColors: [Default::default()],
            };

            GetDIBits(
                mem_dc,
                bitmap,
                0,
                height as u32,
                Some(data.as_mut_ptr() as *mut _),
                &mut bmi,
                DIB_RGB_COLORS,
            )
        } else {
            0
        };

        // Release GDI objects on every path
        SelectObject(mem_dc, old_bitmap);
        let _ = DeleteObject(bitmap);
        let _ = DeleteDC(mem_dc);
        ReleaseDC(None, screen_dc);

        copied?;
        if lines != height {
            return Err(CaptureError::Screenshot(format!(
                "GetDIBits copied {} of {} scan lines",
                lines, height
            )));
        }

        log::debug!(
            "Captured virtual desktop {}x{} at ({}, {})",
            bounds.width,
            bounds.height,
            bounds.x,
            bounds.y
        );

        Snapshot::from_bgra(
            bounds.width,
            bounds.height,
            Point::new(bounds.x, bounds.y),
            data,
        )
    }
}
