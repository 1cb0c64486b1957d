pub mod pipeline;
pub mod registry;

pub use pipeline::{EncodedImage, TransformPipeline};
pub use registry::OpRegistry;
