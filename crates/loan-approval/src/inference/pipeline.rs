use super::artifact::{ArtifactError, ModelArtifact};
use super::classifier::Prediction;
use super::decision::{format_decision, DecisionPolarity, LoanDecision};
use super::features::{ApplicantRecord, Feature, FeatureEncoder};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

/// Stateless encoder -> scaler -> classifier -> formatter chain over a shared artifact.
#[derive(Debug, Clone)]
pub struct LoanApprovalPipeline {
    artifact: Arc<ModelArtifact>,
    polarity: DecisionPolarity,
}

impl LoanApprovalPipeline {
    pub fn new(
        artifact: Arc<ModelArtifact>,
        polarity: DecisionPolarity,
    ) -> Result<Self, ArtifactError> {
        if let Some(artifact_class) = artifact.approved_class() {
            if artifact_class != polarity.approved_class() {
                return Err(ArtifactError::PolarityMismatch {
                    configured: polarity,
                    artifact_class,
                });
            }
        }

        Ok(Self { artifact, polarity })
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    pub fn polarity(&self) -> DecisionPolarity {
        self.polarity
    }

    /// Runs the model and returns the raw class and probability.
    pub fn predict(
        &self,
        record: &ApplicantRecord,
    ) -> Result<(Prediction, Vec<Feature>), PredictionError> {
        let encoded = FeatureEncoder::encode(record);
        let scaled = self
            .artifact
            .scaler()
            .transform(encoded.features.as_slice())?;
        let prediction = self.artifact.classifier().predict(&scaled)?;

        debug!(
            class = %prediction.class,
            probability = prediction.probability,
            defaulted = encoded.defaulted.len(),
            "applicant scored"
        );
        Ok((prediction, encoded.defaulted))
    }

    pub fn score(&self, record: &ApplicantRecord) -> Result<LoanVerdict, PredictionError> {
        let (prediction, defaulted_features) = self.predict(record).inspect_err(|err| {
            error!(error = %err, "prediction aborted");
        })?;
        let (decision, confidence) = format_decision(&prediction, self.polarity);

        Ok(LoanVerdict {
            decision,
            confidence: confidence.to_string(),
            confidence_percent: confidence.percent(),
            predicted_class: prediction.class.index(),
            probability: prediction.probability,
            defaulted_features,
        })
    }

    /// Scores the record and hands it back for display alongside the verdict.
    pub fn assess(&self, record: ApplicantRecord) -> Result<LoanAssessment, PredictionError> {
        let verdict = self.score(&record)?;
        Ok(LoanAssessment {
            verdict,
            applicant_data: record,
        })
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            features: Feature::ORDERED.iter().map(|feature| feature.label()).collect(),
            scaler: self.artifact.scaler().kind(),
            bias: self.artifact.classifier().bias(),
            polarity: self.polarity,
            approved_class: self.polarity.approved_class().index(),
            loaded_at: self.artifact.loaded_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanVerdict {
    pub decision: LoanDecision,
    pub confidence: String,
    pub confidence_percent: f64,
    pub predicted_class: u8,
    pub probability: f64,
    pub defaulted_features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanAssessment {
    #[serde(flatten)]
    pub verdict: LoanVerdict,
    pub applicant_data: ApplicantRecord,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub features: Vec<&'static str>,
    pub scaler: &'static str,
    pub bias: f64,
    pub polarity: DecisionPolarity,
    pub approved_class: u8,
    pub loaded_at: DateTime<Utc>,
}

/// Pipeline stage that rejected a vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Scaler,
    Classifier,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Scaler => f.write_str("scaler"),
            Stage::Classifier => f.write_str("classifier"),
        }
    }
}

/// Per-request failures caused by deployment skew rather than user input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error("{stage} expects {expected} features but received {actual}")]
    DimensionMismatch {
        stage: Stage,
        expected: usize,
        actual: usize,
    },
    #[error("classifier produced a non-finite score")]
    NonFiniteScore,
}
