use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{parse_order, OperationRequest, OutputFormat};
use crate::server::AppState;
use crate::services::EncodedImage;

/// Multipart form for the single-upload endpoint (OpenAPI documentation).
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct SingleUploadForm {
    /// The image file to transform
    #[schema(value_type = String, format = Binary)]
    pub file: String,
    /// Operation name, e.g. "filter.blur", "enhance.brightness" or
    /// "quantize.median"
    pub op: String,
    /// Operation strength: a float factor for enhancements, a color count
    /// for quantization; ignored by filters
    pub mag: Option<f64>,
}

/// Multipart form for the multi-upload endpoint (OpenAPI documentation).
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct MultiUploadForm {
    /// The image files, field repeated once per file
    #[schema(value_type = String, format = Binary)]
    pub file: String,
    /// Comma-separated file indices; the first index selects the file to
    /// process
    pub order: String,
}

/// One uploaded file: original filename plus raw bytes.
struct Upload {
    filename: String,
    bytes: Bytes,
}

#[derive(Default)]
struct UploadFields {
    files: Vec<Upload>,
    op: Option<String>,
    mag: Option<String>,
    order: Option<String>,
}

/// Transform a single uploaded image
///
/// Decodes the upload, applies the named operation, and returns the result
/// encoded in the upload's original format.
#[utoipa::path(
    post,
    path = "/api/v1/uploadsingle",
    request_body(content = SingleUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Transformed image in the upload's original format"),
        (status = 400, description = "Missing or malformed form field"),
        (status = 415, description = "Unsupported output format"),
        (status = 422, description = "Unknown operation or undecodable image"),
    ),
    tag = "Upload"
)]
pub async fn upload_single(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let fields = collect_fields(multipart).await?;

    let upload = fields
        .files
        .into_iter()
        .next()
        .ok_or(ApiError::MissingField("file"))?;
    let op = fields.op.ok_or(ApiError::MissingField("op"))?;

    // Decode the operation selector and the output format up front; the
    // image is only touched once the whole request is known to be valid.
    let request = OperationRequest::parse(&op, fields.mag.as_deref())?;
    let format = OutputFormat::from_filename(&upload.filename)?;

    tracing::info!(
        file = %upload.filename,
        op = %request.name(),
        bytes = upload.bytes.len(),
        "Single upload received"
    );

    let encoded = state.pipeline.transform(&upload.bytes, &request, format)?;
    Ok(image_response(encoded))
}

/// Grayscale the first of several uploaded images
///
/// Reorders the uploads by the given permutation, decodes the first file of
/// the reordered list, converts it to grayscale, and returns it encoded in
/// that file's original format. The remaining files are ignored.
#[utoipa::path(
    post,
    path = "/api/v1/uploadmultiple",
    request_body(content = MultiUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Grayscale image in the selected upload's original format"),
        (status = 400, description = "Missing files or malformed order"),
        (status = 415, description = "Unsupported output format"),
        (status = 422, description = "Undecodable image"),
    ),
    tag = "Upload"
)]
pub async fn upload_multiple(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let fields = collect_fields(multipart).await?;

    if fields.files.is_empty() {
        return Err(ApiError::EmptyUpload);
    }
    let order_raw = fields.order.ok_or(ApiError::MissingField("order"))?;
    let order = parse_order(&order_raw, fields.files.len())?;

    // Only the leading file of the reordered list is processed.
    let upload = &fields.files[order[0]];
    let format = OutputFormat::from_filename(&upload.filename)?;

    tracing::info!(
        files = fields.files.len(),
        order = %order_raw,
        selected = %upload.filename,
        "Multi upload received"
    );

    let encoded = state.pipeline.grayscale(&upload.bytes, format)?;
    Ok(image_response(encoded))
}

async fn collect_fields(mut multipart: Multipart) -> Result<UploadFields, ApiError> {
    let mut fields = UploadFields::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let bytes = field.bytes().await?;
                fields.files.push(Upload { filename, bytes });
            }
            "op" => fields.op = Some(field.text().await?),
            "mag" => fields.mag = Some(field.text().await?),
            "order" => fields.order = Some(field.text().await?),
            _ => {}
        }
    }

    Ok(fields)
}

fn image_response(encoded: EncodedImage) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, encoded.format.content_type())],
        encoded.bytes,
    )
        .into_response()
}
