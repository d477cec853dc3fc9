use crate::cli::ModelArgs;
use crate::infra::{load_pipeline, parse_field};
use clap::Args;
use loan_approval::config::AppConfig;
use loan_approval::error::AppError;
use loan_approval::inference::{ApplicantRecord, BatchScorer, LoanAssessment};
use loan_approval::telemetry;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    #[command(flatten)]
    pub(crate) model: ModelArgs,
    /// Applicant form field as KEY=VALUE (repeatable), e.g. --field Credit_Score=720
    #[arg(long = "field", value_parser = parse_field)]
    pub(crate) fields: Vec<(String, String)>,
    /// Print the full assessment as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    #[command(flatten)]
    pub(crate) model: ModelArgs,
    /// CSV of applicants; the header row names the form fields
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Where to write the scored CSV (defaults to stdout)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let PredictArgs {
        model,
        fields,
        json,
    } = args;

    let mut config = AppConfig::load()?;
    model.apply(&mut config.model);
    telemetry::init(&config.telemetry)?;

    let pipeline = load_pipeline(&config.model)?;
    let record: ApplicantRecord = fields.into_iter().collect();
    let assessment = pipeline.assess(record)?;

    if json {
        let rendered = serde_json::to_string_pretty(&assessment).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        print!("{}", render_assessment(&assessment));
    }

    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let BatchArgs {
        model,
        input,
        output,
    } = args;

    let mut config = AppConfig::load()?;
    model.apply(&mut config.model);
    telemetry::init(&config.telemetry)?;

    let pipeline = load_pipeline(&config.model)?;
    let scorer = BatchScorer::new(&pipeline);

    let mut scored = Vec::new();
    let summary = scorer.score_path(&input, &mut scored)?;

    match output {
        Some(path) => std::fs::write(&path, &scored)?,
        None => std::io::stdout().lock().write_all(&scored)?,
    }

    let mut stderr = std::io::stderr().lock();
    writeln!(
        stderr,
        "Scored {} applicants: {} approved, {} rejected",
        summary.scored, summary.approved, summary.rejected
    )?;

    Ok(())
}

fn render_assessment(assessment: &LoanAssessment) -> String {
    let verdict = &assessment.verdict;
    let defaulted = if verdict.defaulted_features.is_empty() {
        "none".to_string()
    } else {
        verdict
            .defaulted_features
            .iter()
            .map(|feature| feature.label())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut out = format!(
        "Loan decision: {}\nConfidence: {}\nPredicted class: {} (p = {:.4})\nDefaulted fields: {}\n\nApplicant data\n",
        verdict.decision,
        verdict.confidence,
        verdict.predicted_class,
        verdict.probability,
        defaulted
    );
    for (field, value) in assessment.applicant_data.fields() {
        out.push_str(&format!("- {field}: {value}\n"));
    }

    out
}
