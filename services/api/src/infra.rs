use loan_approval::config::ModelConfig;
use loan_approval::error::AppError;
use loan_approval::inference::{LoanApprovalPipeline, ModelArtifact};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads and validates the artifact; any failure here must stop the process.
pub(crate) fn load_pipeline(model: &ModelConfig) -> Result<LoanApprovalPipeline, AppError> {
    let artifact = ModelArtifact::from_path(&model.artifact_path)?;
    let pipeline = LoanApprovalPipeline::new(Arc::new(artifact), model.polarity)?;
    Ok(pipeline)
}

pub(crate) fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
