use axum::{
    extract::{Multipart, Query},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span};
use uuid::Uuid;

use crate::batch::export::{summaries_to_csv, SUMMARY_CSV_FILE_NAME};
use crate::batch::summarize_batch;
use crate::errors::AppError;
use crate::models::resume::SummaryResult;
use crate::parsing::handlers::{csv_attachment, OutputFormat};
use crate::summary::SummaryStrategy;
use crate::upload::read_uploads;

#[derive(Debug, Default, Deserialize)]
pub struct SummarizeQuery {
    #[serde(default)]
    pub strategy: SummaryStrategy,
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub batch_id: Uuid,
    pub strategy: SummaryStrategy,
    pub processed: usize,
    pub summaries: Vec<SummaryResult>,
}

/// POST /api/v1/resumes/summarize
pub async fn handle_summarize(
    Query(query): Query<SummarizeQuery>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    // The tfidf variant renders per-file blocks only; there is no table to export.
    if query.format == OutputFormat::Csv && query.strategy == SummaryStrategy::Tfidf {
        return Err(AppError::Validation(
            "CSV export is only available for keyword summaries".to_string(),
        ));
    }

    let files = read_uploads(multipart).await?;
    let batch_id = Uuid::new_v4();
    let summaries = {
        let _guard =
            info_span!("summarize_batch", %batch_id, strategy = query.strategy.as_str()).entered();
        summarize_batch(&files, query.strategy, |p| {
            info!(
                processed = p.processed,
                total = p.total,
                progress = p.fraction(),
                "Summary progress"
            );
        })?
    };

    info!(%batch_id, processed = summaries.len(), "Summarized {} files.", summaries.len());

    match query.format {
        OutputFormat::Csv => {
            let csv = summaries_to_csv(&summaries)?;
            Ok(csv_attachment(csv, SUMMARY_CSV_FILE_NAME))
        }
        OutputFormat::Json => Ok(Json(SummarizeResponse {
            batch_id,
            strategy: query.strategy,
            processed: summaries.len(),
            summaries,
        })
        .into_response()),
    }
}
