//! Loan approval inference: applicant encoding, feature scaling, logistic scoring and
//! decision formatting over a model artifact loaded once at startup.

pub mod artifact;
pub mod batch;
pub mod classifier;
pub mod decision;
pub mod features;
pub mod pipeline;
pub mod router;
pub mod scaler;

#[cfg(test)]
mod tests;

pub use artifact::{ArtifactError, ModelArtifact};
pub use batch::{BatchError, BatchScorer, BatchSummary};
pub use classifier::{
    classify, sigmoid, LinearClassifier, PredictedClass, Prediction, DECISION_THRESHOLD,
    LOGIT_LIMIT,
};
pub use decision::{format_decision, Confidence, DecisionPolarity, LoanDecision};
pub use features::{
    ApplicantRecord, EncodedApplicant, Feature, FeatureEncoder, FeatureVector, FEATURE_COUNT,
};
pub use pipeline::{
    LoanApprovalPipeline, LoanAssessment, LoanVerdict, ModelInfo, PredictionError, Stage,
};
pub use router::prediction_router;
pub use scaler::FeatureScaler;
