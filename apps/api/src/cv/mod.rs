//! Résumé handling — upload validation, PDF text extraction, and the
//! LLM-backed CV analysis.

pub mod prompts;

use std::path::{Path, PathBuf};

use anyhow::Context;
use bytes::Bytes;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{CompletionClient, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

/// Extensions accepted at the upload boundary.
const ALLOWED_EXTENSIONS: &[&str] = &["pdf"];

/// True when the filename carries an allowed extension.
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Enforces the upload allowlist and size cap before anything touches disk.
pub fn validate_upload(filename: &str, size: usize, max_bytes: usize) -> Result<(), AppError> {
    if !allowed_file(filename) {
        return Err(AppError::Validation(
            "Only PDF files are accepted".to_string(),
        ));
    }
    if size > max_bytes {
        return Err(AppError::Validation(format!(
            "File exceeds the {max_bytes} byte upload limit"
        )));
    }
    Ok(())
}

/// Writes uploaded bytes under `upload_dir` with a UUID-prefixed filename to
/// avoid collisions between users. Returns the stored filename and full path.
pub async fn save_upload(
    upload_dir: &str,
    original_filename: &str,
    data: Bytes,
) -> Result<(String, PathBuf), AppError> {
    tokio::fs::create_dir_all(upload_dir)
        .await
        .context("Failed to create upload directory")?;

    let stored_name = format!("{}_{}", Uuid::new_v4(), sanitize_filename(original_filename));
    let path = Path::new(upload_dir).join(&stored_name);

    tokio::fs::write(&path, &data)
        .await
        .with_context(|| format!("Failed to write upload to {}", path.display()))?;

    Ok((stored_name, path))
}

/// Keeps only a safe basename: path separators and parent references are
/// dropped so an upload cannot escape the upload directory.
fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .replace("..", "");
    if base.is_empty() {
        "upload.pdf".to_string()
    } else {
        base
    }
}

/// Extracts the concatenated page text from a PDF on disk.
/// pdf-extract is synchronous, so the call is moved off the async runtime.
pub async fn extract_text_from_pdf(path: &Path) -> Result<String, AppError> {
    let path = path.to_path_buf();
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&path))
        .await
        .context("PDF extraction task panicked")?
        .map_err(|e| {
            warn!("PDF extraction failed: {e}");
            AppError::Validation("Could not extract text from PDF".to_string())
        })?;

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(AppError::Validation(
            "Could not extract text from PDF".to_string(),
        ));
    }
    Ok(text)
}

/// Runs the fixed CV-analysis prompt over extracted résumé text and returns
/// the free-text analysis.
pub async fn analyze_cv(llm: &dyn CompletionClient, cv_text: &str) -> Result<String, AppError> {
    let prompt = prompts::CV_ANALYSIS_PROMPT_TEMPLATE.replace("{cv_text}", cv_text);
    llm.complete(&prompt, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE)
        .await
        .map_err(|e| AppError::Llm(format!("CV analysis failed: {e}")))
}
