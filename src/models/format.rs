//! Output encoding selection.
//!
//! The response format is chosen from the uploaded file's extension, so a
//! `photo.jpg` upload comes back as JPEG regardless of what the transform
//! did to the pixel data.

use image::ImageFormat;

use crate::error::ApiError;

/// Supported response encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
    WebP,
}

impl OutputFormat {
    /// Derive the format from a filename's extension.
    ///
    /// A missing or unrecognized extension is an unsupported-format error;
    /// the codec never sees it.
    pub fn from_filename(filename: &str) -> Result<Self, ApiError> {
        let ext = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .ok_or_else(|| ApiError::UnsupportedFormat(filename.to_string()))?;

        match ext.as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "gif" => Ok(OutputFormat::Gif),
            "bmp" => Ok(OutputFormat::Bmp),
            "tif" | "tiff" => Ok(OutputFormat::Tiff),
            "webp" => Ok(OutputFormat::WebP),
            _ => Err(ApiError::UnsupportedFormat(filename.to_string())),
        }
    }

    /// The response `Content-Type`.
    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Gif => "image/gif",
            OutputFormat::Bmp => "image/bmp",
            OutputFormat::Tiff => "image/tiff",
            OutputFormat::WebP => "image/webp",
        }
    }

    /// The codec format to encode with.
    pub fn image_format(&self) -> ImageFormat {
        match self {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Gif => ImageFormat::Gif,
            OutputFormat::Bmp => ImageFormat::Bmp,
            OutputFormat::Tiff => ImageFormat::Tiff,
            OutputFormat::WebP => ImageFormat::WebP,
        }
    }
}
