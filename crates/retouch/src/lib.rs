//! retouch: classic raster transformations for in-memory images
//!
//! This library provides the three operation families of a traditional
//! darkroom toolkit, implemented over [`image`] pixel buffers:
//!
//! - **Filters** ([`filter`]): fixed-kernel convolutions (blur, sharpen,
//!   emboss, edge detection, ...). Geometry-preserving, parameterless.
//! - **Enhancements** ([`enhance`]): strength-controlled adjustments
//!   (brightness, contrast, color, sharpness). A factor of `1.0` always
//!   reproduces the input exactly.
//! - **Quantization** ([`quantize`]): palette reduction to at most `k`
//!   colors via median-cut or octree reduction.
//!
//! # Quick Start
//!
//! ```
//! use image::DynamicImage;
//! use retouch::{enhance, filter, quantize};
//!
//! let img = DynamicImage::new_rgba8(4, 4);
//! let blurred = filter::blur(&img);
//! let brighter = enhance::brightness(&img, 1.4);
//! let posterized = quantize::median_cut(&img, 8);
//!
//! assert_eq!(blurred.width(), img.width());
//! assert_eq!(brighter.height(), img.height());
//! assert_eq!(posterized.width(), img.width());
//! ```
//!
//! # Design
//!
//! All operations are pure functions `&DynamicImage -> DynamicImage`; none
//! carries state between calls. Internally every operation works on RGBA
//! buffers: the color channels are transformed and the alpha channel passes
//! through untouched. Convolutions clamp at the image border (edge pixels
//! replicate outward), so every filter preserves pixel dimensions.

pub mod convolve;
pub mod enhance;
pub mod filter;
pub mod quantize;

pub use convolve::ConvKernel;
