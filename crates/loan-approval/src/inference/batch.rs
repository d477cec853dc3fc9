use super::decision::LoanDecision;
use super::features::ApplicantRecord;
use super::pipeline::{LoanApprovalPipeline, PredictionError};
use serde::Serialize;
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

const RESULT_COLUMNS: [&str; 3] = ["decision", "confidence", "probability"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub scored: usize,
    pub approved: usize,
    pub rejected: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("failed to access applicant file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid applicant CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {source}")]
    Prediction {
        row: usize,
        #[source]
        source: PredictionError,
    },
}

/// Scores a CSV of applicants whose header row names the form fields.
///
/// Every input column is copied through and the decision columns are appended.
pub struct BatchScorer<'a> {
    pipeline: &'a LoanApprovalPipeline,
}

impl<'a> BatchScorer<'a> {
    pub fn new(pipeline: &'a LoanApprovalPipeline) -> Self {
        Self { pipeline }
    }

    pub fn score_path<P: AsRef<Path>, W: Write>(
        &self,
        path: P,
        output: W,
    ) -> Result<BatchSummary, BatchError> {
        let file = std::fs::File::open(path)?;
        self.score_reader(file, output)
    }

    pub fn score_reader<R: Read, W: Write>(
        &self,
        input: R,
        output: W,
    ) -> Result<BatchSummary, BatchError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(input);
        let headers = reader.headers()?.clone();

        let mut scored = Vec::new();
        let mut summary = BatchSummary::default();
        for (index, row) in reader.records().enumerate() {
            let row = row?;
            let record: ApplicantRecord = headers
                .iter()
                .zip(row.iter())
                .filter(|(_, value)| !value.is_empty())
                .collect();

            let verdict = self
                .pipeline
                .score(&record)
                .map_err(|source| BatchError::Prediction {
                    row: index + 1,
                    source,
                })?;

            match verdict.decision {
                LoanDecision::Approved => summary.approved += 1,
                LoanDecision::Rejected => summary.rejected += 1,
            }
            summary.scored += 1;
            scored.push((row, verdict));
        }

        // Nothing reaches the output until every row has been decided.
        let mut writer = csv::Writer::from_writer(output);
        writer.write_record(headers.iter().chain(RESULT_COLUMNS))?;
        for (row, verdict) in &scored {
            let probability = format!("{:.6}", verdict.probability);
            writer.write_record(row.iter().chain([
                verdict.decision.label(),
                verdict.confidence.as_str(),
                probability.as_str(),
            ]))?;
        }

        writer.flush()?;
        info!(
            scored = summary.scored,
            approved = summary.approved,
            rejected = summary.rejected,
            "batch scoring complete"
        );
        Ok(summary)
    }
}
