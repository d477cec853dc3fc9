use super::classifier::{LinearClassifier, PredictedClass};
use super::decision::DecisionPolarity;
use super::features::{Feature, FEATURE_COUNT};
use super::scaler::FeatureScaler;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// Trained weights, bias and scaler, validated against the encoder layout.
///
/// Built once at startup and shared read-only afterwards; nothing mutates it.
#[derive(Debug, Clone)]
pub struct ModelArtifact {
    classifier: LinearClassifier,
    scaler: FeatureScaler,
    approved_class: Option<PredictedClass>,
    loaded_at: DateTime<Utc>,
}

/// On-disk JSON layout. `W` and `b` are accepted for artifacts exported with the
/// training notebook's variable names.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ArtifactDocument {
    #[serde(alias = "W")]
    weights: Vec<f64>,
    #[serde(alias = "b")]
    bias: f64,
    scaler: FeatureScaler,
    #[serde(default)]
    feature_names: Option<Vec<String>>,
    #[serde(default)]
    approved_class: Option<PredictedClass>,
}

impl ModelArtifact {
    pub fn new(classifier: LinearClassifier, scaler: FeatureScaler) -> Result<Self, ArtifactError> {
        if classifier.weights().len() != FEATURE_COUNT {
            return Err(ArtifactError::DimensionMismatch {
                component: "weights",
                expected: FEATURE_COUNT,
                actual: classifier.weights().len(),
            });
        }
        if let Some(index) = classifier
            .weights()
            .iter()
            .position(|weight| !weight.is_finite())
        {
            return Err(ArtifactError::NonFinite {
                component: "weights",
                index,
            });
        }
        if !classifier.bias().is_finite() {
            return Err(ArtifactError::NonFinite {
                component: "bias",
                index: 0,
            });
        }

        scaler.validate()?;
        if scaler.len() != FEATURE_COUNT {
            return Err(ArtifactError::DimensionMismatch {
                component: "scaler",
                expected: FEATURE_COUNT,
                actual: scaler.len(),
            });
        }

        Ok(Self {
            classifier,
            scaler,
            approved_class: None,
            loaded_at: Utc::now(),
        })
    }

    pub fn with_approved_class(mut self, class: PredictedClass) -> Self {
        self.approved_class = Some(class);
        self
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact = Self::from_reader(file)?;

        info!(
            path = %path.display(),
            scaler = artifact.scaler.kind(),
            approved_class = ?artifact.approved_class,
            "model artifact loaded"
        );
        Ok(artifact)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ArtifactError> {
        let document: ArtifactDocument = serde_json::from_reader(reader)?;
        Self::from_document(document)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, ArtifactError> {
        let document: ArtifactDocument = serde_json::from_slice(bytes)?;
        Self::from_document(document)
    }

    fn from_document(document: ArtifactDocument) -> Result<Self, ArtifactError> {
        if let Some(names) = &document.feature_names {
            check_feature_order(names)?;
        }

        let artifact = Self::new(
            LinearClassifier::new(document.weights, document.bias),
            document.scaler,
        )?;

        Ok(match document.approved_class {
            Some(class) => artifact.with_approved_class(class),
            None => artifact,
        })
    }

    pub fn classifier(&self) -> &LinearClassifier {
        &self.classifier
    }

    pub fn scaler(&self) -> &FeatureScaler {
        &self.scaler
    }

    pub fn approved_class(&self) -> Option<PredictedClass> {
        self.approved_class
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

fn check_feature_order(names: &[String]) -> Result<(), ArtifactError> {
    if names.len() != FEATURE_COUNT {
        return Err(ArtifactError::DimensionMismatch {
            component: "feature_names",
            expected: FEATURE_COUNT,
            actual: names.len(),
        });
    }

    for (index, (name, feature)) in names.iter().zip(Feature::ORDERED).enumerate() {
        if name != feature.column_name() && name != feature.label() {
            return Err(ArtifactError::FeatureOrder {
                index,
                expected: feature.column_name(),
                found: name.clone(),
            });
        }
    }

    Ok(())
}

/// Startup failures; a process holding one of these must not serve predictions.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read model artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed model artifact: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("model artifact {component} has {actual} entries, expected {expected}")]
    DimensionMismatch {
        component: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("model artifact {component} contains a non-finite value at index {index}")]
    NonFinite { component: &'static str, index: usize },
    #[error("model artifact scaler has zero scale at index {index}")]
    ZeroScale { index: usize },
    #[error("model artifact feature {index} is '{found}', expected '{expected}'")]
    FeatureOrder {
        index: usize,
        expected: &'static str,
        found: String,
    },
    #[error(
        "decision polarity {configured} disagrees with artifact labeling (approved class {artifact_class})"
    )]
    PolarityMismatch {
        configured: DecisionPolarity,
        artifact_class: PredictedClass,
    },
}
