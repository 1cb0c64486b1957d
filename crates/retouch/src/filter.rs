//! Named convolution filters.
//!
//! The classic darkroom filter set: each filter is a fixed kernel applied
//! through [`ConvKernel::apply`]. All filters preserve pixel dimensions and
//! take no parameters.

use image::DynamicImage;

use crate::convolve::ConvKernel;

/// Wide 5x5 blur. The hollow center spreads weight onto the surrounding
/// ring for a softer result than a plain box average.
pub const BLUR: ConvKernel = ConvKernel {
    size: 5,
    weights: &[
        1, 1, 1, 1, 1, //
        1, 0, 0, 0, 1, //
        1, 0, 0, 0, 1, //
        1, 0, 0, 0, 1, //
        1, 1, 1, 1, 1,
    ],
    scale: 16,
    offset: 0,
};

/// Laplacian edge detector inverted onto a white background, giving a
/// pencil-sketch outline.
pub const CONTOUR: ConvKernel = ConvKernel {
    size: 3,
    weights: &[-1, -1, -1, -1, 8, -1, -1, -1, -1],
    scale: 1,
    offset: 255,
};

/// Mild detail boost: a light center-weighted sharpen.
pub const DETAIL: ConvKernel = ConvKernel {
    size: 3,
    weights: &[0, -1, 0, -1, 10, -1, 0, -1, 0],
    scale: 6,
    offset: 0,
};

/// Edge enhancement: accentuates transitions while keeping flat areas.
pub const EDGE_ENHANCE: ConvKernel = ConvKernel {
    size: 3,
    weights: &[-1, -1, -1, -1, 10, -1, -1, -1, -1],
    scale: 2,
    offset: 0,
};

/// Stronger variant of [`EDGE_ENHANCE`].
pub const EDGE_ENHANCE_MORE: ConvKernel = ConvKernel {
    size: 3,
    weights: &[-1, -1, -1, -1, 9, -1, -1, -1, -1],
    scale: 1,
    offset: 0,
};

/// Directional difference kernel offset to mid-gray, producing a relief
/// effect lit from the upper left.
pub const EMBOSS: ConvKernel = ConvKernel {
    size: 3,
    weights: &[-1, 0, 0, 0, 1, 0, 0, 0, 0],
    scale: 1,
    offset: 128,
};

/// Laplacian edge detector on a black background.
pub const FIND_EDGES: ConvKernel = ConvKernel {
    size: 3,
    weights: &[-1, -1, -1, -1, 8, -1, -1, -1, -1],
    scale: 1,
    offset: 0,
};

/// Strong center-weighted sharpen.
pub const SHARPEN: ConvKernel = ConvKernel {
    size: 3,
    weights: &[-2, -2, -2, -2, 32, -2, -2, -2, -2],
    scale: 16,
    offset: 0,
};

/// Gentle 3x3 smoothing.
pub const SMOOTH: ConvKernel = ConvKernel {
    size: 3,
    weights: &[1, 1, 1, 1, 5, 1, 1, 1, 1],
    scale: 13,
    offset: 0,
};

/// Heavy 5x5 smoothing.
pub const SMOOTH_MORE: ConvKernel = ConvKernel {
    size: 5,
    weights: &[
        1, 1, 1, 1, 1, //
        1, 5, 5, 5, 1, //
        1, 5, 44, 5, 1, //
        1, 5, 5, 5, 1, //
        1, 1, 1, 1, 1,
    ],
    scale: 100,
    offset: 0,
};

fn run(img: &DynamicImage, kernel: &ConvKernel) -> DynamicImage {
    DynamicImage::ImageRgba8(kernel.apply(&img.to_rgba8()))
}

pub fn blur(img: &DynamicImage) -> DynamicImage {
    run(img, &BLUR)
}

pub fn contour(img: &DynamicImage) -> DynamicImage {
    run(img, &CONTOUR)
}

pub fn detail(img: &DynamicImage) -> DynamicImage {
    run(img, &DETAIL)
}

pub fn edge_enhance(img: &DynamicImage) -> DynamicImage {
    run(img, &EDGE_ENHANCE)
}

pub fn edge_enhance_more(img: &DynamicImage) -> DynamicImage {
    run(img, &EDGE_ENHANCE_MORE)
}

pub fn emboss(img: &DynamicImage) -> DynamicImage {
    run(img, &EMBOSS)
}

pub fn find_edges(img: &DynamicImage) -> DynamicImage {
    run(img, &FIND_EDGES)
}

pub fn sharpen(img: &DynamicImage) -> DynamicImage {
    run(img, &SHARPEN)
}

pub fn smooth(img: &DynamicImage) -> DynamicImage {
    run(img, &SMOOTH)
}

pub fn smooth_more(img: &DynamicImage) -> DynamicImage {
    run(img, &SMOOTH_MORE)
}
