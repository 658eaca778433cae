use crate::converter::{append_file_footer, ConversionOptions};
use crate::startup::AppState;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use service_core::error::AppError;
use std::time::Instant;

/// Filename suffix that selects the attachment to convert. The match is
/// case-sensitive, so `Report.RTF` is not picked up.
pub const RTF_SUFFIX: &str = ".rtf";

pub async fn convert_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let started = Instant::now();

    // Scan parts in order and take the first one named like an RTF file;
    // everything else in the body is ignored.
    let mut attachment: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        if !filename.ends_with(RTF_SUFFIX) {
            continue;
        }
        let data = field.bytes().await.map_err(multipart_error)?.to_vec();
        attachment = Some((filename, data));
        break;
    }

    let (filename, data) = attachment
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("RTF file not found in request")))?;

    let max_bytes = state.config.upload.max_attachment_bytes;
    if data.len() > max_bytes {
        metrics::counter!("conversions_rejected_total", "reason" => "too_large").increment(1);
        return Err(AppError::PayloadTooLarge(anyhow::anyhow!(
            "File too large (max {} bytes)",
            max_bytes
        )));
    }

    tracing::info!(
        filename = %filename,
        size = data.len(),
        "Conversion started"
    );

    let options = ConversionOptions {
        meta_description: Some(format!("Conversion of '{}'", filename)),
        ..ConversionOptions::default()
    };

    let mut document = state.converter.convert(&data, &options)?;
    append_file_footer(&mut document, &filename, data.len());
    let html = document.render();

    metrics::counter!("conversions_total").increment(1);
    metrics::histogram!("conversion_duration_seconds").record(started.elapsed().as_secs_f64());

    tracing::info!(
        filename = %filename,
        html_bytes = html.len(),
        "Conversion completed"
    );

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "text/html; charset=utf-8".to_string(),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                state.config.upload.allowed_origin.clone(),
            ),
        ],
        html,
    ))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(anyhow::anyhow!("Request body too large"))
    } else {
        AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", err))
    }
}
