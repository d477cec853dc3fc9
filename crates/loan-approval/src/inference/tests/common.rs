use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::inference::{
    ApplicantRecord, DecisionPolarity, FeatureScaler, LinearClassifier, LoanApprovalPipeline,
    ModelArtifact, FEATURE_COUNT,
};

pub(super) const SAMPLE_ARTIFACT: &str = include_str!("../../../../../models/model.json");

/// Applicant from the documented end-to-end scenario.
pub(super) fn graduate_applicant() -> ApplicantRecord {
    [
        ("Education", "Graduate"),
        ("Self_Employed", "No"),
        ("Dependants_namber", "3+"),
        ("Annual_Income", "50000"),
        ("Loan_Amount", "20000"),
        ("Loan_Period_Months", "360"),
        ("Credit_Score", "720"),
        ("Residential_Assets", "10000"),
        ("Commercial_Assets", "0"),
        ("Luxury_Assets", "5000"),
        ("Bank_Assets", "15000"),
    ]
    .into_iter()
    .collect()
}

pub(super) fn poor_credit_applicant() -> ApplicantRecord {
    let mut record = graduate_applicant();
    record.insert("Credit_Score", "400");
    record
}

pub(super) fn sample_artifact() -> Arc<ModelArtifact> {
    let artifact =
        ModelArtifact::from_slice(SAMPLE_ARTIFACT.as_bytes()).expect("sample artifact loads");
    Arc::new(artifact)
}

pub(super) fn sample_pipeline() -> LoanApprovalPipeline {
    LoanApprovalPipeline::new(sample_artifact(), DecisionPolarity::ClassZeroApproved)
        .expect("polarity matches sample artifact")
}

pub(super) fn identity_artifact(weights: Vec<f64>, bias: f64) -> ModelArtifact {
    ModelArtifact::new(
        LinearClassifier::new(weights, bias),
        FeatureScaler::identity(FEATURE_COUNT),
    )
    .expect("identity artifact is valid")
}

pub(super) fn zero_weight_pipeline(polarity: DecisionPolarity) -> LoanApprovalPipeline {
    let artifact = identity_artifact(vec![0.0; FEATURE_COUNT], 0.0);
    LoanApprovalPipeline::new(Arc::new(artifact), polarity).expect("artifact has no labeling")
}

/// Scales by 10 so two 1e308 inputs overflow and cancel into a NaN logit.
pub(super) fn overflowing_pipeline() -> LoanApprovalPipeline {
    let mut weights = vec![0.0; FEATURE_COUNT];
    weights[3] = 1.0;
    weights[4] = -1.0;
    let artifact = ModelArtifact::new(
        LinearClassifier::new(weights, 0.0),
        FeatureScaler::MinMax {
            min: vec![0.0; FEATURE_COUNT],
            scale: vec![10.0; FEATURE_COUNT],
        },
    )
    .expect("min/max artifact is valid");
    LoanApprovalPipeline::new(Arc::new(artifact), DecisionPolarity::ClassZeroApproved)
        .expect("artifact has no labeling")
}

pub(super) fn overflowing_applicant() -> ApplicantRecord {
    [("Annual_Income", "1e308"), ("Loan_Amount", "1e308")]
        .into_iter()
        .collect()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}
