//! The operation registries.
//!
//! Three flat name-to-function tables, one per operation family, built
//! once at startup and shared read-only across all request handlers.
//! Nothing here is mutated after construction, so the registry lives
//! behind a plain `Arc` with no locking.

use std::collections::HashMap;

use image::DynamicImage;
use retouch::{enhance, filter, quantize};

use crate::error::ApiError;
use crate::models::OperationRequest;

pub type FilterFn = fn(&DynamicImage) -> DynamicImage;
pub type EnhanceFn = fn(&DynamicImage, f32) -> DynamicImage;
pub type QuantizeFn = fn(&DynamicImage, u32) -> DynamicImage;

pub struct OpRegistry {
    filters: HashMap<&'static str, FilterFn>,
    enhancers: HashMap<&'static str, EnhanceFn>,
    quantizers: HashMap<&'static str, QuantizeFn>,
}

impl OpRegistry {
    pub fn new() -> Self {
        let mut filters: HashMap<&'static str, FilterFn> = HashMap::new();
        filters.insert("filter.blur", filter::blur);
        filters.insert("filter.contour", filter::contour);
        filters.insert("filter.detail", filter::detail);
        filters.insert("filter.edge_enhance", filter::edge_enhance);
        filters.insert("filter.edge_enhance_more", filter::edge_enhance_more);
        filters.insert("filter.emboss", filter::emboss);
        filters.insert("filter.find_edges", filter::find_edges);
        filters.insert("filter.sharpen", filter::sharpen);
        filters.insert("filter.smooth", filter::smooth);
        filters.insert("filter.smooth_more", filter::smooth_more);

        let mut enhancers: HashMap<&'static str, EnhanceFn> = HashMap::new();
        enhancers.insert("enhance.brightness", enhance::brightness);
        enhancers.insert("enhance.contrast", enhance::contrast);
        enhancers.insert("enhance.color", enhance::color);
        enhancers.insert("enhance.sharpness", enhance::sharpness);

        let mut quantizers: HashMap<&'static str, QuantizeFn> = HashMap::new();
        quantizers.insert("quantize.median", quantize::median_cut);
        quantizers.insert("quantize.octree", quantize::octree);

        OpRegistry {
            filters,
            enhancers,
            quantizers,
        }
    }

    /// Apply a decoded operation to an image.
    ///
    /// The request's category selects the table; the full name is then
    /// looked up exactly. A name missing from its table is an unknown
    /// operation, never a panic.
    pub fn apply(
        &self,
        request: &OperationRequest,
        img: &DynamicImage,
    ) -> Result<DynamicImage, ApiError> {
        match request {
            OperationRequest::Filter { name } => {
                let f = self.lookup(&self.filters, name)?;
                Ok(f(img))
            }
            OperationRequest::Enhance { name, factor } => {
                let f = self.lookup(&self.enhancers, name)?;
                Ok(f(img, *factor))
            }
            OperationRequest::Quantize { name, colors } => {
                let f = self.lookup(&self.quantizers, name)?;
                Ok(f(img, *colors))
            }
        }
    }

    fn lookup<F: Copy>(
        &self,
        table: &HashMap<&'static str, F>,
        name: &str,
    ) -> Result<F, ApiError> {
        table
            .get(name)
            .copied()
            .ok_or_else(|| ApiError::UnknownOperation(name.to_string()))
    }

    pub fn filter_names(&self) -> Vec<&'static str> {
        Self::sorted_keys(&self.filters)
    }

    pub fn enhance_names(&self) -> Vec<&'static str> {
        Self::sorted_keys(&self.enhancers)
    }

    pub fn quantize_names(&self) -> Vec<&'static str> {
        Self::sorted_keys(&self.quantizers)
    }

    fn sorted_keys<F>(table: &HashMap<&'static str, F>) -> Vec<&'static str> {
        let mut names: Vec<_> = table.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for OpRegistry {
    fn default() -> Self {
        Self::new()
    }
}
