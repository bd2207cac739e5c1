//! Horizontal band partitioning for parallel rendering.
//!
//! The image is split into contiguous row ranges that render independently;
//! the last band absorbs the rows left over by the integer division.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::raster::color_to_rgba;
use crate::Raytracer;

/// A horizontal strip of the image.
///
/// Rows are counted from the bottom of the image, matching [`crate::ImageBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// Index of this band in dispatch order
    pub index: usize,
    /// First image row covered by the band
    pub y_offset: u32,
    /// Number of rows in the band
    pub height: u32,
}

impl Band {
    pub fn new(index: usize, y_offset: u32, height: u32) -> Self {
        Self {
            index,
            y_offset,
            height,
        }
    }

    /// Rows covered, as global image rows.
    pub fn rows(&self) -> std::ops::Range<u32> {
        self.y_offset..self.y_offset + self.height
    }
}

/// Split `height` rows into `workers` bands.
///
/// Every band gets `height / workers` rows and the last one also takes the
/// remainder. When there are more workers than rows, the leading bands are
/// empty and the last band holds every row.
pub fn partition_bands(height: u32, workers: usize) -> Vec<Band> {
    let workers = workers.max(1) as u32;
    let rows_per_band = height / workers;
    let remainder = height % workers;

    (0..workers)
        .map(|i| {
            let extra = if i == workers - 1 { remainder } else { 0 };
            Band::new(i as usize, i * rows_per_band, rows_per_band + extra)
        })
        .collect()
}

/// Result of rendering a band.
#[derive(Debug, Clone)]
pub struct BandResult {
    /// The band that was rendered
    pub band: Band,
    /// RGBA pixels, row-major, bottom row of the band first
    pub pixels: Vec<[u8; 4]>,
}

/// Trace every pixel of one band.
///
/// `cancel` is checked before each row; a raised flag abandons the band and
/// returns None.
pub fn render_band(
    band: Band,
    width: u32,
    image_height: u32,
    tracer: &Raytracer,
    cancel: &AtomicBool,
) -> Option<BandResult> {
    let mut pixels = Vec::with_capacity(width as usize * band.height as usize);

    for y in band.rows() {
        if cancel.load(Ordering::Relaxed) {
            log::debug!("Band {} cancelled at row {}", band.index, y);
            return None;
        }
        for x in 0..width {
            let color = tracer.trace_pixel(x, y, width, image_height);
            pixels.push(color_to_rgba(color));
        }
    }

    Some(BandResult { band, pixels })
}
