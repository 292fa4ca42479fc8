//! A loaded fixture with a validator wired to every form.

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use formcheck_adapters::{FixtureLoader, MemoryDocument, SettingsLoader};
use formcheck_core::prelude::*;

use crate::{
    cli::{Assignment, DocumentArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
};

/// One form's report, labelled for display.
#[derive(Debug, Serialize)]
pub struct FormSummary {
    pub label: String,
    #[serde(flatten)]
    pub report: FormReport,
}

/// Outcome of a submit event fired on one form.
#[derive(Debug, Serialize)]
pub struct SubmitSummary {
    pub label: String,
    pub default_prevented: bool,
}

pub struct Session {
    pub document: MemoryDocument,
    validator: FormValidator,
}

impl Session {
    /// Load the fixture, resolve settings and enable validation.
    ///
    /// `--settings` wins over the `[validation]` section of the config.
    #[instrument(skip_all, fields(fixture = %args.fixture.display()))]
    pub fn open(args: &DocumentArgs, config: &AppConfig) -> CliResult<Self> {
        if !args.fixture.exists() {
            return Err(CliError::FixtureNotFound {
                path: args.fixture.clone(),
            });
        }

        let settings = match &args.settings {
            Some(path) => SettingsLoader::new().load(path)?,
            None => config.validation.clone(),
        };
        let rule = config
            .name_rule()
            .with_cli_context(|| "Invalid name rule")?;

        let document = FixtureLoader::new().load_document(&args.fixture)?;
        let mut validator =
            FormValidator::new(Box::new(document.clone()), settings)?.with_name_rule(rule);

        let forms = validator.enable_validation()?;
        if forms == 0 {
            warn!(
                selector = %validator.settings().form_selector,
                "No form matches the form selector"
            );
        }
        info!(forms, "Fixture loaded");

        Ok(Self {
            document,
            validator,
        })
    }

    /// Type each value into its input and fire the input event.
    pub fn replay(&mut self, assignments: &[Assignment]) -> CliResult<()> {
        for assignment in assignments {
            let node = self
                .document
                .element_by_id(self.document.root(), &assignment.id)?
                .ok_or_else(|| CliError::UnknownElement {
                    id: assignment.id.clone(),
                })?;

            self.document.type_text(node, &assignment.value)?;
            let outcome = self.validator.dispatch(&Event::input(node))?;
            if !outcome.handled {
                warn!(id = %assignment.id, "Element is not a validated input");
            }
            debug!(id = %assignment.id, value = %assignment.value, "Input replayed");
        }
        Ok(())
    }

    /// Fire an input event on every validated input.
    pub fn touch_all(&mut self) -> CliResult<()> {
        for form in self.validator.forms()? {
            for input in self.validator.inputs(form)? {
                self.validator.dispatch(&Event::input(input))?;
            }
        }
        Ok(())
    }

    /// Fire a submit event on every form.
    pub fn submit_all(&mut self) -> CliResult<Vec<SubmitSummary>> {
        let mut out = Vec::new();
        for (index, form) in self.validator.forms()?.into_iter().enumerate() {
            let outcome = self.validator.dispatch(&Event::submit(form))?;
            out.push(SubmitSummary {
                label: self.label(index, form)?,
                default_prevented: outcome.default_prevented,
            });
        }
        Ok(out)
    }

    /// Hide every error and disable every submit button.
    pub fn clear_all(&mut self) -> CliResult<()> {
        for form in self.validator.forms()? {
            self.validator.clear_validation(form)?;
        }
        Ok(())
    }

    pub fn summaries(&self) -> CliResult<Vec<FormSummary>> {
        let mut out = Vec::new();
        for (index, form) in self.validator.forms()?.into_iter().enumerate() {
            out.push(FormSummary {
                label: self.label(index, form)?,
                report: self.validator.report(form)?,
            });
        }
        Ok(out)
    }

    /// Markup of the whole document.
    pub fn html(&self) -> CliResult<String> {
        Ok(self.document.to_html(self.document.root())?)
    }

    fn label(&self, index: usize, form: NodeId) -> CliResult<String> {
        let id = self.document.id(form)?;
        Ok(if id.is_empty() {
            format!("form {}", index + 1)
        } else {
            format!("#{id}")
        })
    }
}
