use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Number of model inputs produced by the encoder.
pub const FEATURE_COUNT: usize = 11;

/// Model inputs in the exact column order the scaler and weights were fitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    DependentsCount,
    EducationEncoded,
    SelfEmployedEncoded,
    AnnualIncome,
    LoanAmount,
    LoanPeriodMonths,
    CreditScore,
    ResidentialAssets,
    CommercialAssets,
    LuxuryAssets,
    BankAssets,
}

impl Feature {
    pub const ORDERED: [Feature; FEATURE_COUNT] = [
        Feature::DependentsCount,
        Feature::EducationEncoded,
        Feature::SelfEmployedEncoded,
        Feature::AnnualIncome,
        Feature::LoanAmount,
        Feature::LoanPeriodMonths,
        Feature::CreditScore,
        Feature::ResidentialAssets,
        Feature::CommercialAssets,
        Feature::LuxuryAssets,
        Feature::BankAssets,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Feature::DependentsCount => "dependents_count",
            Feature::EducationEncoded => "education_encoded",
            Feature::SelfEmployedEncoded => "self_employed_encoded",
            Feature::AnnualIncome => "annual_income",
            Feature::LoanAmount => "loan_amount",
            Feature::LoanPeriodMonths => "loan_period_months",
            Feature::CreditScore => "credit_score",
            Feature::ResidentialAssets => "residential_assets",
            Feature::CommercialAssets => "commercial_assets",
            Feature::LuxuryAssets => "luxury_assets",
            Feature::BankAssets => "bank_assets",
        }
    }

    /// Form keys read for this feature. The first entry is the training column name;
    /// the rest are spellings accepted from older intake forms.
    pub fn field_names(self) -> &'static [&'static str] {
        match self {
            Feature::DependentsCount => &["Dependants_namber", "Dependents"],
            Feature::EducationEncoded => &["Education"],
            Feature::SelfEmployedEncoded => &["Self_Employed"],
            Feature::AnnualIncome => &["Annual_Income", "Annula_Income"],
            Feature::LoanAmount => &["Loan_Amount"],
            Feature::LoanPeriodMonths => &["Loan_Period_Months", "Loan_Period"],
            Feature::CreditScore => &["Credit_Score"],
            Feature::ResidentialAssets => &["Residential_Assets"],
            Feature::CommercialAssets => &["Commercial_Assets"],
            Feature::LuxuryAssets => &["Luxury_Assets"],
            Feature::BankAssets => &["Bank_Assets"],
        }
    }

    pub fn column_name(self) -> &'static str {
        self.field_names()[0]
    }
}

/// Raw applicant attributes exactly as the caller submitted them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantRecord(BTreeMap<String, String>);

impl ApplicantRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn lookup(&self, feature: Feature) -> Option<&str> {
        feature
            .field_names()
            .iter()
            .find_map(|field| self.get(field))
    }
}

impl<K, V> FromIterator<(K, V)> for ApplicantRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, String>> for ApplicantRecord {
    fn from(value: BTreeMap<String, String>) -> Self {
        Self(value)
    }
}

/// Unscaled model inputs ordered per [`Feature::ORDERED`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.0[feature.index()]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(value: [f64; FEATURE_COUNT]) -> Self {
        Self(value)
    }
}

/// Encoder output together with the features that fell back to their default.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedApplicant {
    pub features: FeatureVector,
    pub defaulted: Vec<Feature>,
}

/// Turns applicant records into model inputs.
///
/// Categorical codes are business rules rather than learned values: education is 1 only
/// for `"Graduate"`, self-employment is 1 only for `"Yes"`, and `"3+"` dependents counts
/// as 3. Missing or malformed numbers become 0.0 instead of failing the request.
pub struct FeatureEncoder;

impl FeatureEncoder {
    pub fn encode(record: &ApplicantRecord) -> EncodedApplicant {
        let mut values = [0.0; FEATURE_COUNT];
        let mut defaulted = Vec::new();

        for feature in Feature::ORDERED {
            let raw = record.lookup(feature);
            let encoded = match feature {
                Feature::EducationEncoded => Some(flag(raw, "Graduate")),
                Feature::SelfEmployedEncoded => Some(flag(raw, "Yes")),
                Feature::DependentsCount => raw.and_then(parse_dependents),
                _ => raw.and_then(parse_amount),
            };

            values[feature.index()] = match encoded {
                Some(value) => value,
                None => {
                    debug!(feature = feature.label(), raw = ?raw, "defaulting feature to 0.0");
                    defaulted.push(feature);
                    0.0
                }
            };
        }

        EncodedApplicant {
            features: FeatureVector(values),
            defaulted,
        }
    }
}

fn flag(raw: Option<&str>, truthy: &str) -> f64 {
    if raw == Some(truthy) {
        1.0
    } else {
        0.0
    }
}

pub(crate) fn parse_dependents(raw: &str) -> Option<f64> {
    match raw.trim() {
        "3+" => Some(3.0),
        value => value.parse::<i64>().ok().map(|count| count as f64),
    }
}

pub(crate) fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
