//! Median-cut palette construction.

use image::DynamicImage;
use std::collections::HashMap;

use super::{clamp_color_count, finish, remap};

/// Quantize `img` to at most `colors` colors using median cut.
///
/// The color population is repeatedly partitioned: the box with the widest
/// channel spread is split at the population median of that channel, until
/// `colors` boxes exist (or no box can be split further). Each box
/// contributes its population-weighted average color to the palette.
pub fn median_cut(img: &DynamicImage, colors: u32) -> DynamicImage {
    let k = clamp_color_count(colors);
    let rgba = img.to_rgba8();
    if rgba.is_empty() {
        return finish(img, rgba);
    }

    // Histogram of distinct colors; boxes operate on (color, count) pairs
    // so repeated pixels weigh the median correctly without being stored
    // once per occurrence.
    let mut histogram: HashMap<[u8; 3], u64> = HashMap::new();
    for p in rgba.pixels() {
        *histogram.entry([p.0[0], p.0[1], p.0[2]]).or_insert(0) += 1;
    }

    let palette = build_palette(histogram.into_iter().collect(), k);
    let quantized = remap(&rgba, &palette);
    finish(img, quantized)
}

fn build_palette(colors: Vec<([u8; 3], u64)>, k: usize) -> Vec<[u8; 3]> {
    let mut boxes = vec![colors];

    while boxes.len() < k {
        // Split the box with the widest channel spread; stop when every
        // box is a single color.
        let Some((idx, channel)) = widest_box(&boxes) else {
            break;
        };
        let b = boxes.swap_remove(idx);
        let (lo, hi) = split_at_median(b, channel);
        boxes.push(lo);
        if !hi.is_empty() {
            boxes.push(hi);
        }
    }

    boxes.iter().map(|b| average_color(b)).collect()
}

/// Index and channel of the box with the largest single-channel spread,
/// or `None` if no box contains more than one distinct color.
fn widest_box(boxes: &[Vec<([u8; 3], u64)>]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize, u8)> = None;
    for (idx, b) in boxes.iter().enumerate() {
        for channel in 0..3 {
            let min = b.iter().map(|(c, _)| c[channel]).min()?;
            let max = b.iter().map(|(c, _)| c[channel]).max()?;
            let spread = max - min;
            if spread > 0 && best.map_or(true, |(_, _, s)| spread > s) {
                best = Some((idx, channel, spread));
            }
        }
    }
    best.map(|(idx, channel, _)| (idx, channel))
}

/// Split a box at the population median of `channel`. The lower half is
/// never empty; the upper half may be when all weight sits on one value.
fn split_at_median(
    mut b: Vec<([u8; 3], u64)>,
    channel: usize,
) -> (Vec<([u8; 3], u64)>, Vec<([u8; 3], u64)>) {
    b.sort_by_key(|(c, _)| c[channel]);

    let total: u64 = b.iter().map(|(_, n)| n).sum();
    let mut seen = 0u64;
    let mut cut = b.len();
    for (i, (_, n)) in b.iter().enumerate() {
        seen += n;
        if seen * 2 >= total {
            cut = i + 1;
            break;
        }
    }
    // Keep both halves non-degenerate where possible.
    if cut == b.len() && b.len() > 1 {
        cut = b.len() - 1;
    }

    let hi = b.split_off(cut);
    (b, hi)
}

fn average_color(b: &[([u8; 3], u64)]) -> [u8; 3] {
    let mut sums = [0u64; 3];
    let mut total = 0u64;
    for (c, n) in b {
        for channel in 0..3 {
            sums[channel] += c[channel] as u64 * n;
        }
        total += n;
    }
    if total == 0 {
        return [0, 0, 0];
    }
    [
        ((sums[0] + total / 2) / total) as u8,
        ((sums[1] + total / 2) / total) as u8,
        ((sums[2] + total / 2) / total) as u8,
    ]
}
