//! Batch aggregation: runs extraction over every upload, in order, one at a time.
//!
//! Any per-file failure aborts the batch. Clustering failure does not: the rows
//! come back unlabeled with the reason attached.

pub mod export;

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::resume::{ExtractionResult, SummaryResult, UploadedFile};
use crate::nlp::{LanguagePipeline, NlpError};
use crate::parsing::clustering::{cluster_sizes, cluster_skill_sets};
use crate::parsing::fields::extract_fields;
use crate::parsing::text::{extract_text, ExtractError};
use crate::summary::{summarize, SummaryStrategy};

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to read '{file_name}': {source}")]
    Extract {
        file_name: String,
        #[source]
        source: ExtractError,
    },

    #[error("language analysis failed for '{file_name}': {source}")]
    Nlp {
        file_name: String,
        #[source]
        source: NlpError,
    },
}

/// Files done so far out of the batch total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub processed: usize,
    pub total: usize,
}

impl Progress {
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.processed as f32 / self.total as f32
        }
    }
}

/// One row of the parse table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedRow {
    pub file_name: String,
    pub email: String,
    pub phone: String,
    pub skills: BTreeSet<String>,
    pub skill_cluster: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParseReport {
    pub rows: Vec<ParsedRow>,
    /// Label → number of files carrying it. Empty when clustering did not run.
    pub cluster_sizes: BTreeMap<usize, usize>,
    pub cluster_error: Option<String>,
}

impl ParseReport {
    pub fn is_clustered(&self) -> bool {
        !self.rows.is_empty() && self.rows.iter().all(|r| r.skill_cluster.is_some())
    }
}

/// Extracts fields from every file, then clusters the batch by skills.
pub async fn parse_batch(
    files: &[UploadedFile],
    pipeline: &dyn LanguagePipeline,
    mut on_progress: impl FnMut(Progress),
) -> Result<ParseReport, BatchError> {
    let total = files.len();
    let mut results: Vec<ExtractionResult> = Vec::with_capacity(total);

    for (idx, file) in files.iter().enumerate() {
        let text = extract_text(file).map_err(|source| BatchError::Extract {
            file_name: file.name.clone(),
            source,
        })?;
        let fields = extract_fields(&text, pipeline)
            .await
            .map_err(|source| BatchError::Nlp {
                file_name: file.name.clone(),
                source,
            })?;
        debug!(
            file_name = %file.name,
            skills = fields.skills.len(),
            has_email = !fields.email.is_empty(),
            has_phone = !fields.phone.is_empty(),
            "Parsed resume"
        );
        results.push(ExtractionResult {
            file_name: file.name.clone(),
            fields,
        });
        on_progress(Progress {
            processed: idx + 1,
            total,
        });
    }

    let skill_sets: Vec<Vec<String>> = results
        .iter()
        .map(|r| r.fields.skills.iter().cloned().collect())
        .collect();

    let (labels, cluster_error) = match cluster_skill_sets(&skill_sets) {
        Ok(labels) => (Some(labels), None),
        Err(e) => {
            warn!(error = %e, "Skill clustering failed; returning unclustered rows");
            (None, Some(e.to_string()))
        }
    };

    let sizes = labels.as_deref().map(cluster_sizes).unwrap_or_default();

    let rows = results
        .into_iter()
        .enumerate()
        .map(|(idx, r)| ParsedRow {
            file_name: r.file_name,
            email: r.fields.email,
            phone: r.fields.phone,
            skills: r.fields.skills,
            skill_cluster: labels.as_ref().and_then(|l| l.get(idx).copied()),
        })
        .collect();

    Ok(ParseReport {
        rows,
        cluster_sizes: sizes,
        cluster_error,
    })
}

/// Summarizes every file with `strategy`.
pub fn summarize_batch(
    files: &[UploadedFile],
    strategy: SummaryStrategy,
    mut on_progress: impl FnMut(Progress),
) -> Result<Vec<SummaryResult>, BatchError> {
    let total = files.len();
    let mut summaries = Vec::with_capacity(total);

    for (idx, file) in files.iter().enumerate() {
        let text = extract_text(file).map_err(|source| BatchError::Extract {
            file_name: file.name.clone(),
            source,
        })?;
        summaries.push(SummaryResult {
            file_name: file.name.clone(),
            summary: summarize(&text, strategy),
        });
        on_progress(Progress {
            processed: idx + 1,
            total,
        });
    }

    Ok(summaries)
}
