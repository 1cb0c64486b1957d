//! Octree palette construction.

use image::DynamicImage;

use super::{clamp_color_count, finish, remap};

/// Tree depth: one level per bit of the color channels.
const MAX_DEPTH: usize = 8;

/// Quantize `img` to at most `colors` colors using octree reduction.
///
/// Colors are inserted into an 8-way tree indexed by the channel bits,
/// most significant first. Whenever the leaf count exceeds the budget, the
/// deepest reducible node folds its children into itself, so the tree
/// never holds more than the budget plus one insertion path. The final
/// palette is the population-weighted average of each leaf.
pub fn octree(img: &DynamicImage, colors: u32) -> DynamicImage {
    let k = clamp_color_count(colors);
    let rgba = img.to_rgba8();
    if rgba.is_empty() {
        return finish(img, rgba);
    }

    let mut tree = Octree::new();
    for p in rgba.pixels() {
        tree.add_color([p.0[0], p.0[1], p.0[2]]);
        while tree.leaf_count > k {
            tree.reduce();
        }
    }

    let palette = tree.palette();
    let quantized = remap(&rgba, &palette);
    finish(img, quantized)
}

const NO_CHILD: usize = usize::MAX;

struct Node {
    children: [usize; 8],
    is_leaf: bool,
    red: u64,
    green: u64,
    blue: u64,
    count: u64,
}

impl Node {
    fn new(is_leaf: bool) -> Self {
        Node {
            children: [NO_CHILD; 8],
            is_leaf,
            red: 0,
            green: 0,
            blue: 0,
            count: 0,
        }
    }
}

struct Octree {
    nodes: Vec<Node>,
    /// Interior nodes per depth, candidates for reduction. Nodes are
    /// reduced deepest-first so a reduced node's children are always
    /// leaves.
    reducible: Vec<Vec<usize>>,
    leaf_count: usize,
}

impl Octree {
    fn new() -> Self {
        Octree {
            nodes: vec![Node::new(false)],
            reducible: (0..MAX_DEPTH).map(|_| Vec::new()).collect(),
            leaf_count: 0,
        }
    }

    fn add_color(&mut self, color: [u8; 3]) {
        let mut idx = 0;
        for depth in 0..MAX_DEPTH {
            if self.nodes[idx].is_leaf {
                break;
            }
            let branch = branch_index(color, depth);
            if self.nodes[idx].children[branch] == NO_CHILD {
                let leaf = depth + 1 == MAX_DEPTH;
                let child = self.nodes.len();
                self.nodes.push(Node::new(leaf));
                if self.nodes[idx].children.iter().all(|&c| c == NO_CHILD) {
                    self.reducible[depth].push(idx);
                }
                self.nodes[idx].children[branch] = child;
                if leaf {
                    self.leaf_count += 1;
                }
            }
            idx = self.nodes[idx].children[branch];
        }

        let node = &mut self.nodes[idx];
        node.red += color[0] as u64;
        node.green += color[1] as u64;
        node.blue += color[2] as u64;
        node.count += 1;
    }

    /// Fold the children of the deepest reducible node into it.
    fn reduce(&mut self) {
        let Some(idx) = self
            .reducible
            .iter_mut()
            .rev()
            .find_map(|level| level.pop())
        else {
            return;
        };

        let mut red = 0;
        let mut green = 0;
        let mut blue = 0;
        let mut count = 0;
        let mut folded = 0;
        for branch in 0..8 {
            let child = self.nodes[idx].children[branch];
            if child == NO_CHILD {
                continue;
            }
            let c = &self.nodes[child];
            red += c.red;
            green += c.green;
            blue += c.blue;
            count += c.count;
            folded += 1;
        }

        let node = &mut self.nodes[idx];
        node.children = [NO_CHILD; 8];
        node.is_leaf = true;
        node.red += red;
        node.green += green;
        node.blue += blue;
        node.count += count;

        self.leaf_count = self.leaf_count - folded + 1;
    }

    fn palette(&self) -> Vec<[u8; 3]> {
        let mut palette = Vec::with_capacity(self.leaf_count);
        self.collect_leaves(0, &mut palette);
        if palette.is_empty() {
            palette.push([0, 0, 0]);
        }
        palette
    }

    fn collect_leaves(&self, idx: usize, palette: &mut Vec<[u8; 3]>) {
        let node = &self.nodes[idx];
        if node.is_leaf {
            if node.count > 0 {
                palette.push([
                    ((node.red + node.count / 2) / node.count) as u8,
                    ((node.green + node.count / 2) / node.count) as u8,
                    ((node.blue + node.count / 2) / node.count) as u8,
                ]);
            }
            return;
        }
        for branch in 0..8 {
            let child = node.children[branch];
            if child != NO_CHILD {
                self.collect_leaves(child, palette);
            }
        }
    }
}

/// Branch for `depth`: one bit from each channel, most significant first.
#[inline]
fn branch_index(color: [u8; 3], depth: usize) -> usize {
    let shift = 7 - depth;
    let r = ((color[0] >> shift) & 1) as usize;
    let g = ((color[1] >> shift) & 1) as usize;
    let b = ((color[2] >> shift) & 1) as usize;
    (r << 2) | (g << 1) | b
}

#[cfg(test)]
mod tests {
    use super::super::test_support::distinct_colors;
    use super::*;
    use image::{Rgba, RgbaImage};

    fn noisy_image() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(16, 16, |x, y| {
            Rgba([
                ((x * 53 + y * 17) % 256) as u8,
                ((x * 3 + y * 67) % 256) as u8,
                ((x * 83 + y * 41) % 256) as u8,
                255,
            ])
        }))
    }

    #[test]
    fn test_two_colors_max() {
        let out = octree(&noisy_image(), 2);
        assert!(distinct_colors(&out) <= 2);
    }

    #[test]
    fn test_single_color_target() {
        let out = octree(&noisy_image(), 1);
        assert_eq!(distinct_colors(&out), 1);
    }

    #[test]
    fn test_respects_larger_budgets() {
        for k in [4, 16, 64] {
            let out = octree(&noisy_image(), k);
            assert!(distinct_colors(&out) <= k as usize, "budget {k} exceeded");
        }
    }

    #[test]
    fn test_few_color_image_survives() {
        // Two distinct colors with a budget of 8: nothing to reduce, the
        // palette holds both exactly.
        let img = DynamicImage::ImageRgba8(RgbaImage::from_fn(8, 8, |x, _| {
            if x < 4 {
                Rgba([10, 20, 30, 255])
            } else {
                Rgba([200, 210, 220, 255])
            }
        }));
        let out = octree(&img, 8);
        assert_eq!(out.to_rgba8(), img.to_rgba8());
    }

    #[test]
    fn test_branch_index_splits_on_high_bits_first() {
        // Depth 0 looks at bit 7 of each channel.
        assert_eq!(branch_index([0x80, 0x00, 0x00], 0), 0b100);
        assert_eq!(branch_index([0x00, 0x80, 0x00], 0), 0b010);
        assert_eq!(branch_index([0x00, 0x00, 0x80], 0), 0b001);
        // Depth 7 looks at bit 0.
        assert_eq!(branch_index([0x01, 0x01, 0x01], 7), 0b111);
    }

    #[test]
    fn test_geometry_preserved() {
        let out = octree(&noisy_image(), 3);
        assert_eq!((out.width(), out.height()), (16, 16));
    }
}
