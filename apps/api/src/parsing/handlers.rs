use axum::{
    extract::{Multipart, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::batch::export::{parse_report_to_csv, PARSE_CSV_FILE_NAME};
use crate::batch::{parse_batch, ParsedRow};
use crate::errors::AppError;
use crate::state::AppState;
use crate::upload::read_uploads;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Default, Deserialize)]
pub struct ParseQuery {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub batch_id: Uuid,
    pub processed: usize,
    pub rows: Vec<ParsedRow>,
    pub cluster_sizes: BTreeMap<usize, usize>,
    pub cluster_error: Option<String>,
    pub processed_at: DateTime<Utc>,
}

/// Wraps a CSV body as a download.
pub fn csv_attachment(body: String, file_name: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response()
}

/// POST /api/v1/resumes/parse
pub async fn handle_parse(
    State(state): State<AppState>,
    Query(query): Query<ParseQuery>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let files = read_uploads(multipart).await?;
    let batch_id = Uuid::new_v4();
    let span = info_span!("parse_batch", %batch_id, files = files.len(), nlp = state.pipeline.name());

    let report = parse_batch(&files, state.pipeline.as_ref(), |p| {
        info!(
            processed = p.processed,
            total = p.total,
            progress = p.fraction(),
            "Parse progress"
        );
    })
    .instrument(span)
    .await?;

    info!(%batch_id, processed = report.rows.len(), "Processed {} files.", report.rows.len());

    match query.format {
        OutputFormat::Csv => {
            let csv = parse_report_to_csv(&report)?;
            Ok(csv_attachment(csv, PARSE_CSV_FILE_NAME))
        }
        OutputFormat::Json => Ok(Json(ParseResponse {
            batch_id,
            processed: report.rows.len(),
            rows: report.rows,
            cluster_sizes: report.cluster_sizes,
            cluster_error: report.cluster_error,
            processed_at: Utc::now(),
        })
        .into_response()),
    }
}
