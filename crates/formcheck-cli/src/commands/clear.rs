//! `formcheck clear`: reset every form after replaying input.

use serde::Serialize;

use crate::{
    cli::ClearArgs,
    commands::{
        report,
        session::{FormSummary, Session},
    },
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[derive(Serialize)]
struct ClearOutput<'a> {
    forms: &'a [FormSummary],
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<String>,
}

pub fn execute(args: ClearArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let mut session = Session::open(&args.document, &config)?;
    session.replay(&args.document.assignments)?;
    session.clear_all()?;

    let forms = session.summaries()?;
    let html = if args.document.html {
        Some(session.html()?)
    } else {
        None
    };

    if output.is_json() {
        output.json(&ClearOutput {
            forms: &forms,
            html,
        })?;
        return Ok(());
    }

    report::render(&output, &forms, &[])?;
    if let Some(html) = html {
        output.print(html.trim_end())?;
    }
    output.success(&format!("Cleared {} form(s)", forms.len()))?;
    Ok(())
}
