//! Loan approval scoring: a pre-trained logistic regression served behind a thin HTTP/CLI layer.

pub mod config;
pub mod error;
pub mod inference;
pub mod telemetry;
