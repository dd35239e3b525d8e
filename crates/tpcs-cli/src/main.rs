use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tpcs_intake::Submission;
use tpcs_notify::NotifyConfig;
use tpcs_scoring::{AnswerSet, Scorer, ScorerConfig};

mod cli;
mod report;
use cli::{Args, ScorerArgs};
use report::{render, RejectReport, ScoreReport, ValidReport};

/// Exit status when an answer fails validation.
const EXIT_INVALID_ANSWERS: u8 = 2;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("TPCS_LOG").unwrap_or_else(|_| "tpcs=info".into()))
        // stdout carries the JSON report only
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "tpcs starting");

    match args.command {
        cli::Command::Score {
            payload,
            scorer,
            notify,
            pretty,
        } => score(&payload, &scorer, notify, pretty).await,
        cli::Command::Validate { payload } => validate(&payload),
        cli::Command::Config { scorer } => print_config(&scorer),
    }
}

fn build_scorer(args: &ScorerArgs) -> Result<Scorer> {
    let config = match &args.config {
        Some(path) => ScorerConfig::load(path)
            .with_context(|| format!("loading scorer config {}", path.display()))?,
        None => ScorerConfig::preset(args.preset.into()),
    };
    Ok(Scorer::new(config)?)
}

fn read_submission(path: &Path) -> Result<Submission> {
    let mut body = Vec::new();
    if path == Path::new("-") {
        std::io::stdin().read_to_end(&mut body)?;
    } else {
        body = std::fs::read(path).with_context(|| format!("reading payload {}", path.display()))?;
    }
    tracing::debug!(bytes = body.len(), "payload read");
    Ok(Submission::from_slice(&body)?)
}

async fn score(payload: &Path, args: &ScorerArgs, notify: bool, pretty: bool) -> Result<ExitCode> {
    let scorer = build_scorer(args)?;
    let submission = read_submission(payload)?;

    let result = match scorer.score_raw(&submission.answers) {
        Ok(result) => result,
        Err(error) => {
            tracing::warn!(
                respondent_id = %submission.respondent_id,
                item = error.item,
                reason = %error.reason,
                "invalid answer"
            );
            println!("{}", render(&RejectReport::new(&submission, &error), pretty)?);
            return Ok(ExitCode::from(EXIT_INVALID_ANSWERS));
        }
    };

    tracing::info!(
        respondent_id = %submission.respondent_id,
        code = %result.code,
        family = %result.family,
        "submission scored"
    );

    let mut delivery = None;
    let mut delivery_error = None;
    if notify {
        let notifier = NotifyConfig::from_env().build()?;
        let message = tpcs_notify::compose(&result);
        match notifier.send(&submission.email, &message).await {
            Ok(outcome) => delivery = Some(outcome),
            Err(error) => {
                tracing::error!(
                    respondent_id = %submission.respondent_id,
                    notifier = notifier.name(),
                    error = %error,
                    "email delivery failed"
                );
                delivery_error = Some(error.to_string());
            }
        }
    }

    let failed = delivery_error.is_some();
    let report = ScoreReport {
        ok: !failed,
        respondent_id: &submission.respondent_id,
        email: &submission.email,
        result: &result,
        delivery,
        delivery_error,
    };
    println!("{}", render(&report, pretty)?);

    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn validate(payload: &Path) -> Result<ExitCode> {
    let submission = read_submission(payload)?;

    match AnswerSet::from_raw(&submission.answers) {
        Ok(_) => {
            let report = ValidReport {
                ok: true,
                respondent_id: &submission.respondent_id,
                dialect: submission.dialect,
            };
            println!("{}", render(&report, false)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            println!("{}", render(&RejectReport::new(&submission, &error), false)?);
            Ok(ExitCode::from(EXIT_INVALID_ANSWERS))
        }
    }
}

fn print_config(args: &ScorerArgs) -> Result<ExitCode> {
    let scorer = build_scorer(args)?;
    print!("{}", scorer.config().to_toml_string()?);
    Ok(ExitCode::SUCCESS)
}
