//! Text extraction for uploaded resumes, dispatched on file extension.
//!
//! - pdf:  page by page; pages that yield nothing contribute nothing
//! - docx: body paragraphs, each followed by a newline
//! - txt:  UTF-8, falling back to Latin-1
//! - anything else: empty string

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::resume::UploadedFile;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unreadable PDF: {0}")]
    Pdf(String),

    #[error("unreadable DOCX: {0}")]
    Docx(String),
}

/// Returns the full text of `file`, or an empty string for unsupported types.
pub fn extract_text(file: &UploadedFile) -> Result<String, ExtractError> {
    let ext = file.extension();
    let text = match ext.as_str() {
        "pdf" => extract_pdf(&file.content)?,
        "docx" => extract_docx(&file.content)?,
        "txt" => decode_plain_text(&file.content),
        _ => {
            debug!(file_name = %file.name, extension = %ext, "Unsupported extension, no text");
            String::new()
        }
    };

    debug!(file_name = %file.name, text_len = text.len(), "Extracted text");
    Ok(text)
}

/// UTF-8 first; on failure every byte maps to the code point of the same value.
pub fn decode_plain_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    match lopdf::Document::load_mem(bytes) {
        Ok(doc) => {
            let mut text = String::new();
            for (page_num, _page_id) in doc.get_pages() {
                match doc.extract_text(&[page_num]) {
                    Ok(page_text) => text.push_str(&page_text),
                    Err(e) => debug!(page = page_num, error = %e, "PDF page yielded no text"),
                }
            }
            Ok(text)
        }
        Err(e) => {
            // Some files lopdf refuses still open through pdf-extract's own loader.
            warn!(error = %e, "Page-level PDF parse failed, trying whole-document extraction");
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
        }
    }
}

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractError::Docx(e.to_string()))?;

    let mut text = String::new();
    for child in &docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(para) = child {
            text.push_str(&paragraph_text(para));
            text.push('\n');
        }
    }
    Ok(text)
}

fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut text = String::new();

    for child in &para.children {
        match child {
            docx_rs::ParagraphChild::Run(run) => push_run_text(&mut text, run),
            docx_rs::ParagraphChild::Hyperlink(link) => {
                for child in &link.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        push_run_text(&mut text, run);
                    }
                }
            }
            _ => {}
        }
    }

    text
}

fn push_run_text(text: &mut String, run: &docx_rs::Run) {
    for child in &run.children {
        if let docx_rs::RunChild::Text(t) = child {
            text.push_str(&t.text);
        }
    }
}
