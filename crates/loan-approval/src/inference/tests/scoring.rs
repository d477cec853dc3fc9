use crate::inference::{
    classify, sigmoid, FeatureScaler, LinearClassifier, PredictedClass, PredictionError, Stage,
    FEATURE_COUNT, LOGIT_LIMIT,
};

#[test]
fn identity_scaler_returns_input_unchanged() {
    let scaler = FeatureScaler::identity(FEATURE_COUNT);
    let vectors = [
        [0.0; FEATURE_COUNT],
        [3.0, 1.0, 0.0, 50000.0, 20000.0, 360.0, 720.0, 10000.0, 0.0, 5000.0, 15000.0],
        [-1.5, 0.25, 1.0, 1e9, -1e-9, 7.0, 300.0, 0.1, 0.2, 0.3, 0.4],
    ];

    for vector in vectors {
        assert_eq!(scaler.transform(&vector).expect("same length"), vector.to_vec());
    }
}

#[test]
fn standard_scaler_centers_and_divides_each_feature() {
    let scaler = FeatureScaler::Standard {
        mean: vec![1.0, 10.0, -2.0],
        scale: vec![2.0, 5.0, 0.5],
    };

    let scaled = scaler.transform(&[3.0, 0.0, -1.0]).expect("same length");

    assert_eq!(scaled, vec![1.0, -2.0, 2.0]);
}

#[test]
fn min_max_scaler_applies_fitted_scale_and_offset() {
    let scaler = FeatureScaler::MinMax {
        min: vec![-0.5, 0.0],
        scale: vec![0.25, 2.0],
    };

    let scaled = scaler.transform(&[4.0, 0.25]).expect("same length");

    assert_eq!(scaled, vec![0.5, 0.5]);
}

#[test]
fn scaler_rejects_vectors_of_the_wrong_length() {
    let scaler = FeatureScaler::identity(FEATURE_COUNT);

    let err = scaler.transform(&[1.0, 2.0, 3.0]).expect_err("length mismatch");

    assert_eq!(
        err,
        PredictionError::DimensionMismatch {
            stage: Stage::Scaler,
            expected: FEATURE_COUNT,
            actual: 3,
        }
    );
}

#[test]
fn sigmoid_is_one_half_at_zero() {
    assert_eq!(sigmoid(0.0), 0.5);
}

#[test]
fn sigmoid_increases_with_the_logit() {
    let mut previous = sigmoid(-40.0);
    let mut z = -40.0;
    while z < 40.0 {
        z += 0.25;
        let current = sigmoid(z);
        assert!(current >= previous, "sigmoid({z}) = {current} < {previous}");
        previous = current;
    }
    assert!(sigmoid(1.0) > sigmoid(-1.0));
}

#[test]
fn sigmoid_stays_finite_at_and_beyond_the_clamp() {
    for z in [
        -LOGIT_LIMIT,
        LOGIT_LIMIT,
        -1e6,
        1e6,
        f64::NEG_INFINITY,
        f64::INFINITY,
    ] {
        let p = sigmoid(z);
        assert!(p.is_finite(), "sigmoid({z}) = {p}");
        assert!((0.0..=1.0).contains(&p), "sigmoid({z}) = {p}");
    }
    assert_eq!(sigmoid(1e6), sigmoid(LOGIT_LIMIT));
    assert_eq!(sigmoid(-1e6), sigmoid(-LOGIT_LIMIT));
}

#[test]
fn threshold_tie_goes_to_class_one() {
    assert_eq!(classify(0.5), PredictedClass::One);
    assert_eq!(classify(0.500_000_1), PredictedClass::One);
    assert_eq!(classify(0.499_999_9), PredictedClass::Zero);
    assert_eq!(classify(0.0), PredictedClass::Zero);
    assert_eq!(classify(1.0), PredictedClass::One);
}

#[test]
fn class_is_one_exactly_when_probability_reaches_threshold() {
    for step in 0..=100 {
        let p = f64::from(step) / 100.0;
        assert_eq!(classify(p) == PredictedClass::One, p >= 0.5, "p = {p}");
    }
}

#[test]
fn classifier_adds_bias_to_weighted_sum() {
    let classifier = LinearClassifier::new(vec![0.5, -2.0, 1.0], 0.25);

    let logit = classifier.logit(&[2.0, 1.0, 3.0]).expect("same length");

    assert_eq!(logit, 1.0 - 2.0 + 3.0 + 0.25);
    let prediction = classifier.predict(&[2.0, 1.0, 3.0]).expect("same length");
    assert_eq!(prediction.class, PredictedClass::One);
    assert_eq!(prediction.probability, sigmoid(2.25));
}

#[test]
fn classifier_rejects_vectors_of_the_wrong_length() {
    let classifier = LinearClassifier::new(vec![1.0; FEATURE_COUNT], 0.0);

    let err = classifier.predict(&[1.0; 4]).expect_err("length mismatch");

    assert!(matches!(
        err,
        PredictionError::DimensionMismatch {
            stage: Stage::Classifier,
            expected: FEATURE_COUNT,
            actual: 4,
        }
    ));
}

#[test]
fn classifier_refuses_to_decide_on_nan_scores() {
    let classifier = LinearClassifier::new(vec![1.0, 1.0], 0.0);

    let err = classifier
        .predict(&[f64::INFINITY, f64::NEG_INFINITY])
        .expect_err("nan logit");

    assert_eq!(err, PredictionError::NonFiniteScore);
}
