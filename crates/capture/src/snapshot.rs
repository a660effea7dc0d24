//! Frozen desktop snapshot

use crate::{CaptureError, CaptureResult, Point, Rect};

const BYTES_PER_PIXEL: usize = 4;

/// Immutable BGRA pixel buffer of the whole virtual desktop
pub struct Snapshot {
    data: Vec<u8>,
    width: u32,
    height: u32,
    origin: Point,
}

/// Copy of a rectangular part of a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubImage {
    /// Area actually copied, in snapshot-local coordinates
    pub rect: Rect,
    /// Top-down BGRA rows of `rect`
    pub data: Vec<u8>,
}

impl Snapshot {
    /// Wrap a top-down BGRA buffer whose top-left pixel sits at `origin` on screen
    pub fn from_bgra(width: u32, height: u32, origin: Point, data: Vec<u8>) -> CaptureResult<Self> {
        if width == 0 || height == 0 {
            return Err(CaptureError::EmptyDesktop);
        }
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(CaptureError::BufferSize {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            width,
            height,
            origin,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Screen position of the top-left pixel
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Snapshot area in its own coordinates
    pub fn local_bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Snapshot area in screen coordinates
    pub fn screen_bounds(&self) -> Rect {
        Rect::new(self.origin.x, self.origin.y, self.width, self.height)
    }

    /// Copy the part of `rect` (snapshot coordinates) that lies inside the snapshot.
    ///
    /// Never reads outside `[0, width) x [0, height)`; returns `None` when nothing
    /// of `rect` is inside.
    pub fn sub_image(&self, rect: Rect) -> Option<SubImage> {
        let clipped = rect.intersection(&self.local_bounds())?;

        let stride = self.width as usize * BYTES_PER_PIXEL;
        let row_len = clipped.width as usize * BYTES_PER_PIXEL;
        let left = clipped.x as usize * BYTES_PER_PIXEL;

        let mut data = Vec::with_capacity(row_len * clipped.height as usize);
        for row in clipped.y as usize..clipped.bottom() as usize {
            let start = row * stride + left;
            data.extend_from_slice(&self.data[start..start + row_len]);
        }

        Some(SubImage {
            rect: clipped,
            data,
        })
    }

    /// Copy of the snapshot with a black mask of the given alpha composited over it
    pub fn dimmed(&self, alpha: u8) -> Snapshot {
        let keep = 255 - alpha as u32;
        let data = self
            .data
            .chunks_exact(BYTES_PER_PIXEL)
            .flat_map(|px| {
                [
                    (px[0] as u32 * keep / 255) as u8,
                    (px[1] as u32 * keep / 255) as u8,
                    (px[2] as u32 * keep / 255) as u8,
                    px[3],
                ]
            })
            .collect();

        Snapshot {
            data,
            width: self.width,
            height: self.height,
            origin: self.origin,
        }
    }
}
