use std::collections::BTreeSet;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// One uploaded document. Lives only for the request that carried it.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied file name; its extension selects the text extractor.
    pub name: String,
    pub content: Bytes,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Lowercased text after the last `.`. A name without a dot yields the whole
    /// name, which never matches a supported type.
    pub fn extension(&self) -> String {
        self.name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }
}

/// Fields pulled out of one resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFields {
    /// Last email-shaped token, or empty.
    pub email: String,
    /// Last 10-digit token, or empty.
    pub phone: String,
    /// Deduplicated short noun chunks. Sorted only for stable output.
    pub skills: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub file_name: String,
    #[serde(flatten)]
    pub fields: ExtractedFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub file_name: String,
    /// At most 30 words or terms, in strategy order.
    pub summary: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_lowercased_last_segment() {
        assert_eq!(UploadedFile::new("Jane.Doe.PDF", "").extension(), "pdf");
        assert_eq!(UploadedFile::new("cv.docx", "").extension(), "docx");
    }

    #[test]
    fn test_extension_without_dot_is_whole_name() {
        assert_eq!(UploadedFile::new("README", "").extension(), "readme");
    }

    #[test]
    fn test_extraction_result_serializes_flat() {
        let result = ExtractionResult {
            file_name: "a.txt".to_string(),
            fields: ExtractedFields {
                email: "a@b.io".to_string(),
                phone: String::new(),
                skills: ["Rust".to_string()].into_iter().collect(),
            },
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["file_name"], "a.txt");
        assert_eq!(json["email"], "a@b.io");
        assert_eq!(json["skills"][0], "Rust");
    }
}
