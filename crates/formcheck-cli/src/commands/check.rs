//! `formcheck check`: validate the forms of a fixture.

use serde::Serialize;

use crate::{
    cli::CheckArgs,
    commands::{
        report,
        session::{FormSummary, Session, SubmitSummary},
    },
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[derive(Serialize)]
struct CheckOutput<'a> {
    forms: &'a [FormSummary],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    submits: Vec<SubmitSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<String>,
}

/// Replay input, optionally validate everything and submit, then report.
pub fn execute(args: CheckArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let mut session = Session::open(&args.document, &config)?;
    session.replay(&args.document.assignments)?;

    if args.all {
        session.touch_all()?;
    }
    let submits = if args.submit {
        session.submit_all()?
    } else {
        Vec::new()
    };

    let forms = session.summaries()?;
    let html = if args.document.html {
        Some(session.html()?)
    } else {
        None
    };

    if output.is_json() {
        output.json(&CheckOutput {
            forms: &forms,
            submits,
            html,
        })?;
    } else {
        report::render(&output, &forms, &submits)?;
        if let Some(html) = html {
            output.print(html.trim_end())?;
        }
    }

    let invalid = forms.iter().filter(|f| !f.report.is_valid()).count();
    if args.fail_on_invalid && invalid > 0 {
        return Err(CliError::InvalidForms {
            invalid,
            total: forms.len(),
        });
    }

    Ok(())
}
