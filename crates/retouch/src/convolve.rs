//! Fixed-kernel convolution over RGBA buffers.
//!
//! Filters are defined as integral-weight kernels with a scale divisor and
//! an additive offset, evaluated per color channel. The alpha channel is
//! copied from the source pixel.

use image::{Rgba, RgbaImage};

/// A square convolution kernel.
///
/// The output value for each color channel is
/// `sum(weight * neighbor) / scale + offset`, clamped to `0..=255`.
/// Kernels with negative weights (edge detectors, sharpeners) rely on the
/// offset to re-center the result where needed.
#[derive(Debug, Clone, Copy)]
pub struct ConvKernel {
    /// Kernel edge length; 3 or 5.
    pub size: u32,
    /// Row-major weights, `size * size` entries.
    pub weights: &'static [i32],
    /// Divisor applied to the weighted sum. Never zero.
    pub scale: i32,
    /// Added after scaling, before clamping.
    pub offset: i32,
}

impl ConvKernel {
    /// Apply the kernel to every pixel of `src`.
    ///
    /// Border pixels clamp their neighborhood to the image edge, so the
    /// output always has the same dimensions as the input.
    pub fn apply(&self, src: &RgbaImage) -> RgbaImage {
        debug_assert_eq!(self.weights.len(), (self.size * self.size) as usize);

        let (width, height) = src.dimensions();
        let mut out = RgbaImage::new(width, height);
        if width == 0 || height == 0 {
            return out;
        }

        let radius = (self.size / 2) as i64;

        for y in 0..height {
            for x in 0..width {
                let mut acc = [0i64; 3];
                let mut w_idx = 0;

                for ky in -radius..=radius {
                    let sy = (y as i64 + ky).clamp(0, height as i64 - 1) as u32;
                    for kx in -radius..=radius {
                        let sx = (x as i64 + kx).clamp(0, width as i64 - 1) as u32;
                        let weight = self.weights[w_idx] as i64;
                        w_idx += 1;

                        let p = src.get_pixel(sx, sy);
                        acc[0] += weight * p.0[0] as i64;
                        acc[1] += weight * p.0[1] as i64;
                        acc[2] += weight * p.0[2] as i64;
                    }
                }

                let alpha = src.get_pixel(x, y).0[3];
                let px = Rgba([
                    scale_channel(acc[0], self.scale, self.offset),
                    scale_channel(acc[1], self.scale, self.offset),
                    scale_channel(acc[2], self.scale, self.offset),
                    alpha,
                ]);
                out.put_pixel(x, y, px);
            }
        }

        out
    }
}

#[inline]
fn scale_channel(sum: i64, scale: i32, offset: i32) -> u8 {
    (sum / scale as i64 + offset as i64).clamp(0, 255) as u8
}
