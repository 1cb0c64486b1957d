//! The decode -> transform -> encode pipeline.
//!
//! One request owns exactly one decoded image for its whole lifetime; the
//! pipeline takes upload bytes in and hands encoded bytes back, with the
//! operation applied in between. The same pipeline serves the HTTP
//! handlers and the offline `apply` command.

use std::io::Cursor;
use std::sync::Arc;

use image::DynamicImage;

use crate::error::ApiError;
use crate::models::{OperationRequest, OutputFormat};
use crate::services::OpRegistry;

/// An encoded response body plus the format it was encoded in.
#[derive(Debug)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
}

pub struct TransformPipeline {
    registry: Arc<OpRegistry>,
}

impl TransformPipeline {
    pub fn new(registry: Arc<OpRegistry>) -> Self {
        TransformPipeline { registry }
    }

    /// Decode, apply the requested operation, and re-encode.
    pub fn transform(
        &self,
        bytes: &[u8],
        request: &OperationRequest,
        format: OutputFormat,
    ) -> Result<EncodedImage, ApiError> {
        let img = self.decode(bytes)?;

        tracing::debug!(
            op = request.name(),
            width = img.width(),
            height = img.height(),
            "Applying operation"
        );

        let out = self.registry.apply(request, &img)?;
        self.encode(&out, format)
    }

    /// Decode and re-encode as a grayscale conversion (the multi-upload
    /// endpoint's single hardcoded operation).
    pub fn grayscale(&self, bytes: &[u8], format: OutputFormat) -> Result<EncodedImage, ApiError> {
        let img = self.decode(bytes)?;

        tracing::debug!(
            width = img.width(),
            height = img.height(),
            "Converting to grayscale"
        );

        let out = img.grayscale();
        self.encode(&out, format)
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, ApiError> {
        image::load_from_memory(bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub fn encode(&self, img: &DynamicImage, format: OutputFormat) -> Result<EncodedImage, ApiError> {
        let normalized = normalize_for(img, format);
        let mut cursor = Cursor::new(Vec::new());
        normalized
            .write_to(&mut cursor, format.image_format())
            .map_err(|e| ApiError::Encode(e.to_string()))?;

        Ok(EncodedImage {
            bytes: cursor.into_inner(),
            format,
        })
    }
}

/// Convert to a color model the target codec accepts.
///
/// JPEG has no alpha channel, and the GIF/BMP/WebP encoders only take
/// 8-bit RGB(A) buffers. PNG and TIFF keep whatever the transform
/// produced, including 8-bit grayscale.
fn normalize_for(img: &DynamicImage, format: OutputFormat) -> DynamicImage {
    match format {
        OutputFormat::Png | OutputFormat::Tiff => img.clone(),
        OutputFormat::Jpeg => match img {
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => img.clone(),
            _ => DynamicImage::ImageRgb8(img.to_rgb8()),
        },
        OutputFormat::Gif | OutputFormat::Bmp | OutputFormat::WebP => match img {
            DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => img.clone(),
            _ => DynamicImage::ImageRgba8(img.to_rgba8()),
        },
    }
}
