//! CSV rendering of batch results.

use anyhow::{Context, Result};

use super::ParseReport;
use crate::models::resume::SummaryResult;

pub const PARSE_CSV_FILE_NAME: &str = "resume_results.csv";
pub const SUMMARY_CSV_FILE_NAME: &str = "resume_summaries.csv";

/// Columns: file_name, email, phone, skills, plus "Skill Cluster" when every row is labeled.
pub fn parse_report_to_csv(report: &ParseReport) -> Result<String> {
    let clustered = report.is_clustered();
    let mut wtr = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["file_name", "email", "phone", "skills"];
    if clustered {
        header.push("Skill Cluster");
    }
    wtr.write_record(&header)?;

    for row in &report.rows {
        let skills = row
            .skills
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let mut record = vec![
            row.file_name.clone(),
            row.email.clone(),
            row.phone.clone(),
            skills,
        ];
        if clustered {
            record.push(row.skill_cluster.map(|c| c.to_string()).unwrap_or_default());
        }
        wtr.write_record(&record)?;
    }

    finish(wtr)
}

/// Columns: File, Summary (words joined by a single space).
pub fn summaries_to_csv(summaries: &[SummaryResult]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["File", "Summary"])?;
    for s in summaries {
        wtr.write_record([s.file_name.as_str(), s.summary.join(" ").as_str()])?;
    }
    finish(wtr)
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output was not UTF-8")
}
