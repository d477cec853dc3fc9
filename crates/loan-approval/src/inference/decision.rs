use super::classifier::{PredictedClass, Prediction};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which raw class index the trained labels call "Approved".
///
/// Deployments have disagreed on this, so it is configured explicitly and checked against
/// the artifact's own `approved_class` whenever the artifact declares one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DecisionPolarity {
    #[default]
    #[serde(rename = "class0-approved")]
    ClassZeroApproved,
    #[serde(rename = "class1-approved")]
    ClassOneApproved,
}

impl DecisionPolarity {
    pub fn approved_class(self) -> PredictedClass {
        match self {
            DecisionPolarity::ClassZeroApproved => PredictedClass::Zero,
            DecisionPolarity::ClassOneApproved => PredictedClass::One,
        }
    }

    pub fn decision_for(self, class: PredictedClass) -> LoanDecision {
        if class == self.approved_class() {
            LoanDecision::Approved
        } else {
            LoanDecision::Rejected
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DecisionPolarity::ClassZeroApproved => "class0-approved",
            DecisionPolarity::ClassOneApproved => "class1-approved",
        }
    }
}

impl fmt::Display for DecisionPolarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DecisionPolarity {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "class0-approved" | "0" => Ok(DecisionPolarity::ClassZeroApproved),
            "class1-approved" | "1" => Ok(DecisionPolarity::ClassOneApproved),
            other => Err(format!(
                "unknown decision polarity '{other}' (expected class0-approved or class1-approved)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanDecision {
    Approved,
    Rejected,
}

impl LoanDecision {
    pub fn label(self) -> &'static str {
        match self {
            LoanDecision::Approved => "Approved",
            LoanDecision::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for LoanDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Probability mass of the predicted class, as a percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Confidence(f64);

impl Confidence {
    pub fn of(prediction: &Prediction) -> Self {
        let mass = match prediction.class {
            PredictedClass::One => prediction.probability,
            PredictedClass::Zero => 1.0 - prediction.probability,
        };
        Self((mass * 100.0).clamp(0.0, 100.0))
    }

    pub fn percent(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

pub fn format_decision(
    prediction: &Prediction,
    polarity: DecisionPolarity,
) -> (LoanDecision, Confidence) {
    (
        polarity.decision_for(prediction.class),
        Confidence::of(prediction),
    )
}
