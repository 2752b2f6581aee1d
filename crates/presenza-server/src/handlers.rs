//! Request handlers for the upload surface.

use axum::extract::{Multipart, State};
use axum::response::Html;
use presenza_core::error::{PresenzaError, Result};
use presenza_data::analysis::{analyze_chat, AnalysisResult};
use tracing::{info, warn};

use crate::html;
use crate::routes::AppState;
use crate::upload;

/// `GET /` – the upload form.
pub async fn index() -> Html<String> {
    Html(html::index_page(None))
}

/// `POST /upload` – validate, store and process an uploaded chat export.
///
/// Any validation failure renders the form again with the failure message
/// inline; the parser is never invoked for a rejected upload.
pub async fn upload_file(State(state): State<AppState>, multipart: Multipart) -> Html<String> {
    match process_upload(&state, multipart).await {
        Ok(result) => Html(html::report_page(&result)),
        Err(err) => {
            warn!("Upload rejected: {}", err);
            Html(html::index_page(Some(&err.to_string())))
        }
    }
}

/// The upload pipeline: read the multipart body, run the validation ladder,
/// store the file, then parse and aggregate it.
async fn process_upload(state: &AppState, mut multipart: Multipart) -> Result<AnalysisResult> {
    let mut file_part: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| PresenzaError::Multipart(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| PresenzaError::Multipart(e.to_string()))?;
        file_part = Some((filename, data.to_vec()));
        break;
    }

    let (filename, data) = file_part.ok_or(PresenzaError::MissingFilePart)?;
    if filename.is_empty() {
        return Err(PresenzaError::EmptyFilename);
    }
    if !upload::allowed_file(&filename, &state.config) {
        return Err(PresenzaError::DisallowedExtension(filename));
    }

    let stored = upload::store_upload(&state.config, &filename, &data)?;
    info!("Processing uploaded chat export {}", stored.display());

    analyze_chat(&stored)
}
