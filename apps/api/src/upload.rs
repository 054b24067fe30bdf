use axum::extract::Multipart;
use tracing::debug;

use crate::errors::AppError;
use crate::models::resume::UploadedFile;

pub const NO_UPLOADS_MESSAGE: &str = "Upload one or more resumes to start parsing.";

/// Reads every multipart field that carries a file name, in request order.
/// Fields without a file name (plain form values, empty file inputs) are skipped.
pub async fn read_uploads(mut multipart: Multipart) -> Result<Vec<UploadedFile>, AppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let Some(name) = field
            .file_name()
            .filter(|n| !n.is_empty())
            .map(str::to_string) else {
            continue;
        };
        let content = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload '{name}': {e}")))?;
        debug!(file_name = %name, bytes = content.len(), "Received upload");
        files.push(UploadedFile::new(name, content));
    }

    if files.is_empty() {
        return Err(AppError::Validation(NO_UPLOADS_MESSAGE.to_string()));
    }
    Ok(files)
}
