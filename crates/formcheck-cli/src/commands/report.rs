//! Human-readable rendering of form reports.

use formcheck_core::{application::InputReport, domain::FailureReason};

use crate::{
    commands::session::{FormSummary, SubmitSummary},
    error::CliResult,
    output::OutputManager,
};

pub fn render(
    output: &OutputManager,
    forms: &[FormSummary],
    submits: &[SubmitSummary],
) -> CliResult<()> {
    if forms.is_empty() {
        output.warning("No forms matched the form selector")?;
        return Ok(());
    }

    for form in forms {
        let report = &form.report;
        output.header(&format!(
            "Form {}: {} of {} input(s) invalid, submit {}",
            form.label,
            report.invalid_count(),
            report.inputs.len(),
            match report.submit_disabled {
                Some(true) => "disabled",
                Some(false) => "enabled",
                None => "missing",
            }
        ))?;

        for input in &report.inputs {
            let line = format!("{} = {:?}", input_label(input), input.value);
            if input.valid {
                output.success(&line)?;
            } else {
                output.error(&line)?;
            }
            if let Some(detail) = detail(input) {
                output.detail(&detail)?;
            }
        }
    }

    for submit in submits {
        if submit.default_prevented {
            output.info(&format!("Submit of form {} prevented", submit.label))?;
        } else {
            output.warning(&format!("Submit of form {} not intercepted", submit.label))?;
        }
    }

    Ok(())
}

fn input_label(input: &InputReport) -> String {
    if input.id.is_empty() {
        format!("[{}]", input.node)
    } else {
        input.id.clone()
    }
}

fn detail(input: &InputReport) -> Option<String> {
    if input.error_visible {
        return Some(format!("shows: {}", input.error_text));
    }
    match &input.reason {
        None => None,
        Some(FailureReason::Missing) => Some("value missing".into()),
        Some(FailureReason::NameRule { violation }) => Some(violation.to_string()),
        Some(FailureReason::Native) => Some("fails a native constraint".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcheck_core::domain::{NameRuleViolation, NodeId};

    fn input(id: &str, valid: bool) -> InputReport {
        InputReport {
            node: NodeId::new(3),
            id: id.into(),
            value: "A".into(),
            valid,
            reason: (!valid).then_some(FailureReason::NameRule {
                violation: NameRuleViolation::TooShort { length: 1, min: 2 },
            }),
            error_text: String::new(),
            error_visible: false,
        }
    }

    #[test]
    fn label_falls_back_to_handle() {
        assert_eq!(input_label(&input("name", true)), "name");
        assert_eq!(input_label(&input("", true)), "[#3]");
    }

    #[test]
    fn detail_prefers_rendered_text() {
        let mut shown = input("name", false);
        shown.error_visible = true;
        shown.error_text = "Invalid name".into();
        assert_eq!(detail(&shown).as_deref(), Some("shows: Invalid name"));

        assert!(detail(&input("name", true)).is_none());
        assert!(detail(&input("name", false)).is_some());
    }
}
