use super::artifact::ArtifactError;
use super::pipeline::{PredictionError, Stage};
use serde::{Deserialize, Serialize};

/// Normalization fitted during training and replayed feature-by-feature at inference.
///
/// `Standard` computes `(x - mean) / scale`; `MinMax` computes `x * scale + min`, which is
/// how a fitted min/max transform stores its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureScaler {
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

impl FeatureScaler {
    /// Standard scaler that leaves every value untouched.
    pub fn identity(len: usize) -> Self {
        FeatureScaler::Standard {
            mean: vec![0.0; len],
            scale: vec![1.0; len],
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FeatureScaler::Standard { .. } => "standard",
            FeatureScaler::MinMax { .. } => "min_max",
        }
    }

    /// Number of features the scaler was fitted on.
    pub fn len(&self) -> usize {
        self.offsets().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>, PredictionError> {
        let (offsets, scales) = (self.offsets(), self.scales());
        for expected in [offsets.len(), scales.len()] {
            if features.len() != expected {
                return Err(PredictionError::DimensionMismatch {
                    stage: Stage::Scaler,
                    expected,
                    actual: features.len(),
                });
            }
        }

        let scaled = features
            .iter()
            .zip(offsets.iter().zip(scales))
            .map(|(value, (offset, scale))| match self {
                FeatureScaler::Standard { .. } => (value - offset) / scale,
                FeatureScaler::MinMax { .. } => value * scale + offset,
            })
            .collect();

        Ok(scaled)
    }

    pub(crate) fn validate(&self) -> Result<(), ArtifactError> {
        let (offset_name, offsets) = match self {
            FeatureScaler::Standard { mean, .. } => ("scaler.mean", mean.as_slice()),
            FeatureScaler::MinMax { min, .. } => ("scaler.min", min.as_slice()),
        };
        let scales = self.scales();

        if scales.len() != offsets.len() {
            return Err(ArtifactError::DimensionMismatch {
                component: "scaler.scale",
                expected: offsets.len(),
                actual: scales.len(),
            });
        }

        if let Some(index) = offsets.iter().position(|value| !value.is_finite()) {
            return Err(ArtifactError::NonFinite {
                component: offset_name,
                index,
            });
        }
        if let Some(index) = scales.iter().position(|value| !value.is_finite()) {
            return Err(ArtifactError::NonFinite {
                component: "scaler.scale",
                index,
            });
        }

        // min/max scale may legitimately be zero; a standard scale divides.
        if let FeatureScaler::Standard { scale, .. } = self {
            if let Some(index) = scale.iter().position(|value| *value == 0.0) {
                return Err(ArtifactError::ZeroScale { index });
            }
        }

        Ok(())
    }

    fn offsets(&self) -> &[f64] {
        match self {
            FeatureScaler::Standard { mean, .. } => mean,
            FeatureScaler::MinMax { min, .. } => min,
        }
    }

    fn scales(&self) -> &[f64] {
        match self {
            FeatureScaler::Standard { scale, .. } | FeatureScaler::MinMax { scale, .. } => scale,
        }
    }
}
