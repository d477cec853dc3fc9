use super::pipeline::{PredictionError, Stage};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Probability at or above which the positive class is predicted.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Logits are clamped to this magnitude before exponentiation.
pub const LOGIT_LIMIT: f64 = 500.0;

pub fn sigmoid(z: f64) -> f64 {
    let z = z.clamp(-LOGIT_LIMIT, LOGIT_LIMIT);
    1.0 / (1.0 + (-z).exp())
}

/// Applies the fixed threshold; a probability of exactly 0.5 is class 1.
pub fn classify(probability: f64) -> PredictedClass {
    if probability >= DECISION_THRESHOLD {
        PredictedClass::One
    } else {
        PredictedClass::Zero
    }
}

/// Raw class index emitted by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum PredictedClass {
    Zero,
    One,
}

impl PredictedClass {
    pub fn index(self) -> u8 {
        match self {
            PredictedClass::Zero => 0,
            PredictedClass::One => 1,
        }
    }
}

impl From<PredictedClass> for u8 {
    fn from(value: PredictedClass) -> Self {
        value.index()
    }
}

impl TryFrom<u8> for PredictedClass {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PredictedClass::Zero),
            1 => Ok(PredictedClass::One),
            other => Err(format!("class index must be 0 or 1, got {other}")),
        }
    }
}

impl fmt::Display for PredictedClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Model output for a single applicant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub class: PredictedClass,
    pub probability: f64,
    pub logit: f64,
}

/// Logistic regression over scaled features.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearClassifier {
    weights: Vec<f64>,
    bias: f64,
}

impl LinearClassifier {
    pub fn new(weights: Vec<f64>, bias: f64) -> Self {
        Self { weights, bias }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn logit(&self, scaled: &[f64]) -> Result<f64, PredictionError> {
        if scaled.len() != self.weights.len() {
            return Err(PredictionError::DimensionMismatch {
                stage: Stage::Classifier,
                expected: self.weights.len(),
                actual: scaled.len(),
            });
        }

        let dot: f64 = scaled
            .iter()
            .zip(&self.weights)
            .map(|(value, weight)| value * weight)
            .sum();

        Ok(dot + self.bias)
    }

    pub fn predict(&self, scaled: &[f64]) -> Result<Prediction, PredictionError> {
        let logit = self.logit(scaled)?;
        if logit.is_nan() {
            return Err(PredictionError::NonFiniteScore);
        }

        let probability = sigmoid(logit);
        Ok(Prediction {
            class: classify(probability),
            probability,
            logit,
        })
    }
}
