//! Typed decoding of the operation form fields.
//!
//! The `op` and `mag` strings are decoded exactly once, at the request
//! boundary, into an [`OperationRequest`]. Everything past this point works
//! with validated, typed values; there is no string dispatch downstream.

use crate::error::ApiError;

/// Operation family, taken from the segment before the first `.` of the
/// operation name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCategory {
    Filter,
    Enhance,
    Quantize,
}

impl OpCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpCategory::Filter => "filter",
            OpCategory::Enhance => "enhance",
            OpCategory::Quantize => "quantize",
        }
    }
}

/// A validated single-upload operation: category, full name, and the
/// magnitude decoded to the type the category requires.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationRequest {
    /// Convolution filter; any supplied magnitude is ignored.
    Filter { name: String },
    /// Enhancement with a floating-point strength factor.
    Enhance { name: String, factor: f32 },
    /// Quantization to a target color count (the magnitude truncated to an
    /// integer).
    Quantize { name: String, colors: u32 },
}

impl OperationRequest {
    /// Decode the raw `op` and `mag` form values.
    ///
    /// The category must be one of the three known prefixes; enhancement
    /// and quantization require a numeric magnitude, filters ignore it.
    pub fn parse(op: &str, mag: Option<&str>) -> Result<Self, ApiError> {
        let category = match op.split('.').next() {
            Some("filter") => OpCategory::Filter,
            Some("enhance") => OpCategory::Enhance,
            Some("quantize") => OpCategory::Quantize,
            _ => return Err(ApiError::UnknownOperation(op.to_string())),
        };

        let name = op.to_string();
        match category {
            OpCategory::Filter => Ok(OperationRequest::Filter { name }),
            OpCategory::Enhance => Ok(OperationRequest::Enhance {
                name,
                factor: parse_factor(mag)?,
            }),
            OpCategory::Quantize => Ok(OperationRequest::Quantize {
                name,
                colors: parse_colors(mag)?,
            }),
        }
    }

    /// The full operation name as sent by the client.
    pub fn name(&self) -> &str {
        match self {
            OperationRequest::Filter { name }
            | OperationRequest::Enhance { name, .. }
            | OperationRequest::Quantize { name, .. } => name,
        }
    }

    pub fn category(&self) -> OpCategory {
        match self {
            OperationRequest::Filter { .. } => OpCategory::Filter,
            OperationRequest::Enhance { .. } => OpCategory::Enhance,
            OperationRequest::Quantize { .. } => OpCategory::Quantize,
        }
    }
}

fn require_numeric(mag: Option<&str>) -> Result<(f64, String), ApiError> {
    let raw = mag
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::MissingField("mag"))?;
    let value: f64 = raw.parse().map_err(|_| ApiError::InvalidMagnitude {
        value: raw.to_string(),
        reason: "not a number",
    })?;
    if !value.is_finite() {
        return Err(ApiError::InvalidMagnitude {
            value: raw.to_string(),
            reason: "not finite",
        });
    }
    Ok((value, raw.to_string()))
}

fn parse_factor(mag: Option<&str>) -> Result<f32, ApiError> {
    let (value, raw) = require_numeric(mag)?;
    if value < 0.0 {
        return Err(ApiError::InvalidMagnitude {
            value: raw,
            reason: "enhancement factor must be non-negative",
        });
    }
    Ok(value as f32)
}

fn parse_colors(mag: Option<&str>) -> Result<u32, ApiError> {
    let (value, raw) = require_numeric(mag)?;
    let colors = value.trunc();
    if !(1.0..=256.0).contains(&colors) {
        return Err(ApiError::InvalidMagnitude {
            value: raw,
            reason: "color count must be between 1 and 256",
        });
    }
    Ok(colors as u32)
}

/// Decode the comma-separated upload ordering into file indices.
///
/// Every token must parse as an index into the uploaded file list. The
/// result is the requested permutation; callers consume it front-first.
pub fn parse_order(order: &str, file_count: usize) -> Result<Vec<usize>, ApiError> {
    let mut indices = Vec::new();
    for token in order.split(',') {
        let token = token.trim();
        let index: usize = token.parse().map_err(|_| ApiError::InvalidOrderToken {
            token: token.to_string(),
        })?;
        if index >= file_count {
            return Err(ApiError::OrderIndexOutOfRange { index, file_count });
        }
        indices.push(index);
    }
    Ok(indices)
}
