//! Color quantization.
//!
//! Both quantizers reduce an image to a palette of at most `k` colors
//! (`1..=256`) and remap every pixel to its nearest palette entry by
//! squared RGB distance. Alpha passes through unchanged.
//!
//! - [`median_cut`]: recursively splits the color population at the median
//!   of its widest-spread channel. Good general-purpose results.
//! - [`octree`]: inserts colors into an 8-way tree and merges the deepest,
//!   least-significant nodes until at most `k` leaves remain. Faster on
//!   images with many distinct colors.

mod median_cut;
mod octree;

pub use median_cut::median_cut;
pub use octree::octree;

use image::{DynamicImage, Rgba, RgbaImage};

/// Remap every pixel of `img` to the nearest palette color.
///
/// Nearest is by squared distance in RGB; the pixel's alpha is kept.
pub(crate) fn remap(img: &RgbaImage, palette: &[[u8; 3]]) -> RgbaImage {
    debug_assert!(!palette.is_empty());

    RgbaImage::from_fn(img.width(), img.height(), |x, y| {
        let p = img.get_pixel(x, y).0;
        let [r, g, b] = nearest(palette, [p[0], p[1], p[2]]);
        Rgba([r, g, b, p[3]])
    })
}

pub(crate) fn nearest(palette: &[[u8; 3]], color: [u8; 3]) -> [u8; 3] {
    let mut best = palette[0];
    let mut best_dist = u32::MAX;
    for &entry in palette {
        let d = distance_sq(entry, color);
        if d < best_dist {
            best_dist = d;
            best = entry;
        }
    }
    best
}

#[inline]
fn distance_sq(a: [u8; 3], b: [u8; 3]) -> u32 {
    let dr = a[0] as i32 - b[0] as i32;
    let dg = a[1] as i32 - b[1] as i32;
    let db = a[2] as i32 - b[2] as i32;
    (dr * dr + dg * dg + db * db) as u32
}

pub(crate) fn clamp_color_count(colors: u32) -> usize {
    colors.clamp(1, 256) as usize
}

pub(crate) fn finish(img: &DynamicImage, quantized: RgbaImage) -> DynamicImage {
    debug_assert_eq!(quantized.dimensions(), (img.width(), img.height()));
    DynamicImage::ImageRgba8(quantized)
}
