//! Strength-controlled image enhancements.
//!
//! Every enhancement is a linear interpolation between a degenerate image
//! and the original:
//!
//! ```text
//! out = degenerate + factor * (original - degenerate)
//! ```
//!
//! A factor of `1.0` therefore reproduces the input exactly, `0.0` yields
//! the degenerate image, and factors above `1.0` overshoot in the opposite
//! direction (e.g. extra-saturated, extra-bright). The degenerate image
//! defines the enhancement:
//!
//! | enhancement | degenerate image                       |
//! |-------------|----------------------------------------|
//! | brightness  | black                                  |
//! | contrast    | solid gray at the mean luminance       |
//! | color       | grayscale conversion                   |
//! | sharpness   | smoothed copy ([`filter::SMOOTH`])     |

use image::{DynamicImage, Rgba, RgbaImage};

use crate::filter;

/// Adjust brightness. `0.0` gives a black image.
pub fn brightness(img: &DynamicImage, factor: f32) -> DynamicImage {
    let original = img.to_rgba8();
    let black = RgbaImage::from_fn(original.width(), original.height(), |x, y| {
        Rgba([0, 0, 0, original.get_pixel(x, y).0[3]])
    });
    DynamicImage::ImageRgba8(interpolate(&black, &original, factor))
}

/// Adjust contrast. `0.0` gives a solid gray at the image's mean luminance.
pub fn contrast(img: &DynamicImage, factor: f32) -> DynamicImage {
    let original = img.to_rgba8();
    let mean = mean_luminance(img);
    let gray = RgbaImage::from_fn(original.width(), original.height(), |x, y| {
        Rgba([mean, mean, mean, original.get_pixel(x, y).0[3]])
    });
    DynamicImage::ImageRgba8(interpolate(&gray, &original, factor))
}

/// Adjust color saturation. `0.0` gives the grayscale conversion.
pub fn color(img: &DynamicImage, factor: f32) -> DynamicImage {
    let original = img.to_rgba8();
    let luma = img.to_luma8();
    let gray = RgbaImage::from_fn(original.width(), original.height(), |x, y| {
        let l = luma.get_pixel(x, y).0[0];
        Rgba([l, l, l, original.get_pixel(x, y).0[3]])
    });
    DynamicImage::ImageRgba8(interpolate(&gray, &original, factor))
}

/// Adjust sharpness. `0.0` gives a smoothed image, values above `1.0`
/// sharpen.
pub fn sharpness(img: &DynamicImage, factor: f32) -> DynamicImage {
    let original = img.to_rgba8();
    let smoothed = filter::SMOOTH.apply(&original);
    DynamicImage::ImageRgba8(interpolate(&smoothed, &original, factor))
}

/// Blend the color channels of `original` over `degenerate` by `factor`.
/// Alpha is taken from `original` unchanged.
fn interpolate(degenerate: &RgbaImage, original: &RgbaImage, factor: f32) -> RgbaImage {
    debug_assert_eq!(degenerate.dimensions(), original.dimensions());

    RgbaImage::from_fn(original.width(), original.height(), |x, y| {
        let d = degenerate.get_pixel(x, y).0;
        let o = original.get_pixel(x, y).0;
        Rgba([
            lerp_channel(d[0], o[0], factor),
            lerp_channel(d[1], o[1], factor),
            lerp_channel(d[2], o[2], factor),
            o[3],
        ])
    })
}

#[inline]
fn lerp_channel(degenerate: u8, original: u8, factor: f32) -> u8 {
    let d = degenerate as f32;
    let o = original as f32;
    (d + factor * (o - d)).round().clamp(0.0, 255.0) as u8
}

/// Mean of the grayscale conversion, rounded to the nearest integer.
fn mean_luminance(img: &DynamicImage) -> u8 {
    let luma = img.to_luma8();
    let count = luma.as_raw().len() as u64;
    if count == 0 {
        return 0;
    }
    let sum: u64 = luma.as_raw().iter().map(|&v| v as u64).sum();
    ((sum as f64 / count as f64) + 0.5) as u8
}
