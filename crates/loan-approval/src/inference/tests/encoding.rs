use super::common::*;
use crate::inference::{ApplicantRecord, Feature, FeatureEncoder, FEATURE_COUNT};

#[test]
fn encodes_documented_applicant_in_model_order() {
    let encoded = FeatureEncoder::encode(&graduate_applicant());

    assert_eq!(
        encoded.features.as_slice(),
        &[3.0, 1.0, 0.0, 50000.0, 20000.0, 360.0, 720.0, 10000.0, 0.0, 5000.0, 15000.0]
    );
    assert!(encoded.defaulted.is_empty());
}

#[test]
fn empty_record_defaults_every_feature_to_zero() {
    let encoded = FeatureEncoder::encode(&ApplicantRecord::new());

    assert_eq!(encoded.features.len(), FEATURE_COUNT);
    assert!(encoded.features.as_slice().iter().all(|value| *value == 0.0));
    // Categorical flags encode absence as 0 rather than defaulting.
    assert_eq!(encoded.defaulted.len(), FEATURE_COUNT - 2);
    assert!(!encoded.defaulted.contains(&Feature::EducationEncoded));
    assert!(!encoded.defaulted.contains(&Feature::SelfEmployedEncoded));
}

#[test]
fn encoding_is_repeatable() {
    let record = graduate_applicant();
    assert_eq!(
        FeatureEncoder::encode(&record),
        FeatureEncoder::encode(&record)
    );
}

#[test]
fn categorical_flags_match_exact_tokens_only() {
    let cases = [
        ("Graduate", "Yes", 1.0, 1.0),
        ("Not Graduate", "No", 0.0, 0.0),
        ("graduate", "yes", 0.0, 0.0),
        (" Graduate", "YES", 0.0, 0.0),
    ];

    for (education, self_employed, expected_education, expected_self_employed) in cases {
        let record: ApplicantRecord = [("Education", education), ("Self_Employed", self_employed)]
            .into_iter()
            .collect();
        let features = FeatureEncoder::encode(&record).features;
        assert_eq!(
            features.get(Feature::EducationEncoded),
            expected_education,
            "education {education:?}"
        );
        assert_eq!(
            features.get(Feature::SelfEmployedEncoded),
            expected_self_employed,
            "self employed {self_employed:?}"
        );
    }
}

#[test]
fn dependents_accept_integers_and_three_plus() {
    let cases = [
        ("3+", 3.0, false),
        ("2", 2.0, false),
        (" 1 ", 1.0, false),
        ("0", 0.0, false),
        ("two", 0.0, true),
        ("2.5", 0.0, true),
        ("", 0.0, true),
    ];

    for (raw, expected, defaulted) in cases {
        let record: ApplicantRecord = [("Dependants_namber", raw)].into_iter().collect();
        let encoded = FeatureEncoder::encode(&record);
        assert_eq!(
            encoded.features.get(Feature::DependentsCount),
            expected,
            "dependents {raw:?}"
        );
        assert_eq!(
            encoded.defaulted.contains(&Feature::DependentsCount),
            defaulted,
            "dependents {raw:?}"
        );
    }
}

#[test]
fn malformed_numbers_default_per_field() {
    let record: ApplicantRecord = [
        ("Annual_Income", "fifty thousand"),
        ("Loan_Amount", "NaN"),
        ("Loan_Period_Months", "inf"),
        ("Credit_Score", " 700 "),
        ("Bank_Assets", "1e3"),
    ]
    .into_iter()
    .collect();

    let encoded = FeatureEncoder::encode(&record);

    assert_eq!(encoded.features.get(Feature::AnnualIncome), 0.0);
    assert_eq!(encoded.features.get(Feature::LoanAmount), 0.0);
    assert_eq!(encoded.features.get(Feature::LoanPeriodMonths), 0.0);
    assert_eq!(encoded.features.get(Feature::CreditScore), 700.0);
    assert_eq!(encoded.features.get(Feature::BankAssets), 1000.0);
    for feature in [
        Feature::AnnualIncome,
        Feature::LoanAmount,
        Feature::LoanPeriodMonths,
    ] {
        assert!(encoded.defaulted.contains(&feature), "{feature:?}");
    }
    assert!(!encoded.defaulted.contains(&Feature::CreditScore));
    assert!(!encoded.defaulted.contains(&Feature::BankAssets));
}

#[test]
fn legacy_form_spellings_are_accepted() {
    let record: ApplicantRecord = [
        ("Dependents", "2"),
        ("Annula_Income", "42000"),
        ("Loan_Period", "120"),
    ]
    .into_iter()
    .collect();

    let features = FeatureEncoder::encode(&record).features;

    assert_eq!(features.get(Feature::DependentsCount), 2.0);
    assert_eq!(features.get(Feature::AnnualIncome), 42000.0);
    assert_eq!(features.get(Feature::LoanPeriodMonths), 120.0);
}

#[test]
fn primary_spelling_wins_over_alias() {
    let record: ApplicantRecord = [("Annual_Income", "50000"), ("Annula_Income", "1")]
        .into_iter()
        .collect();

    let features = FeatureEncoder::encode(&record).features;

    assert_eq!(features.get(Feature::AnnualIncome), 50000.0);
}

#[test]
fn display_only_fields_are_ignored() {
    let mut record = graduate_applicant();
    record.insert("Applicant_Name", "Jordan Reyes");
    record.insert("Notes", "prefers phone contact");

    let with_extras = FeatureEncoder::encode(&record);
    let without_extras = FeatureEncoder::encode(&graduate_applicant());

    assert_eq!(with_extras.features.len(), FEATURE_COUNT);
    assert_eq!(with_extras, without_extras);
}

#[test]
fn feature_order_matches_indices() {
    for (position, feature) in Feature::ORDERED.iter().enumerate() {
        assert_eq!(feature.index(), position);
    }
    assert_eq!(Feature::ORDERED[0].column_name(), "Dependants_namber");
    assert_eq!(Feature::ORDERED[10].label(), "bank_assets");
}
