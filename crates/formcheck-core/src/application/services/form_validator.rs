//! Form Validator - main application orchestrator.
//!
//! This service coordinates one validation pass:
//! 1. Read an input snapshot through the document port
//! 2. Assess it with the domain rules
//! 3. Render the result (error element, classes, submit button)
//!
//! It also owns the listener registry built by `set_event_listeners` and
//! routes host events through `dispatch`.

use std::collections::HashMap;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        events::{Event, EventKind, EventOutcome, Listener},
        ports::Document,
        services::report::{FormReport, InputReport},
    },
    domain::{
        Assessment, ERROR_ELEMENT_CLASS, ERROR_ELEMENT_TAG, NameRule, NodeId, Settings, assess,
        error_element_id,
    },
    error::{FormError, FormResult},
};

/// Validator for every form of one document.
///
/// Holds the injected document, the immutable settings, the pairing of
/// inputs with their error elements, and the registered listeners.
pub struct FormValidator {
    document: Box<dyn Document>,
    settings: Settings,
    rule: NameRule,
    error_elements: HashMap<NodeId, NodeId>,
    listeners: HashMap<(NodeId, EventKind), Listener>,
}

impl FormValidator {
    /// Create a validator over `document`.
    ///
    /// Fails when a setting is missing or empty.
    pub fn new(document: Box<dyn Document>, settings: Settings) -> FormResult<Self> {
        settings.validate().map_err(FormError::Domain)?;

        Ok(Self {
            document,
            settings,
            rule: NameRule::default(),
            error_elements: HashMap::new(),
            listeners: HashMap::new(),
        })
    }

    /// Replace the default 2..=30 name rule.
    pub fn with_name_rule(mut self, rule: NameRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn name_rule(&self) -> &NameRule {
        &self.rule
    }

    pub fn document(&self) -> &dyn Document {
        self.document.as_ref()
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Every form matching the form selector.
    pub fn forms(&self) -> FormResult<Vec<NodeId>> {
        self.document.query_all(None, &self.settings.form_selector)
    }

    /// Every input of `form` matching the input selector.
    pub fn inputs(&self, form: NodeId) -> FormResult<Vec<NodeId>> {
        self.document
            .query_all(Some(form), &self.settings.input_selector)
    }

    /// The submit button of `form`, if any.
    pub fn submit_button(&self, form: NodeId) -> FormResult<Option<NodeId>> {
        self.document
            .query(Some(form), &self.settings.submit_button_selector)
    }

    /// The error element paired with `input`, if one was found or created.
    pub fn error_element(&self, input: NodeId) -> Option<NodeId> {
        self.error_elements.get(&input).copied()
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Assess `input` without touching the document.
    pub fn assess_input(&self, input: NodeId) -> FormResult<Assessment> {
        let state = self.document.input_state(input)?;
        Ok(assess(&state, &self.rule))
    }

    /// Pure validity predicate.
    pub fn is_input_valid(&self, input: NodeId) -> FormResult<bool> {
        Ok(self.assess_input(input)?.is_valid())
    }

    /// Show `message` for `input`, creating its error element on first use.
    #[instrument(skip_all, fields(form = %form, input = %input))]
    pub fn show_input_error(
        &mut self,
        form: NodeId,
        input: NodeId,
        message: &str,
    ) -> FormResult<()> {
        let error = match self.find_error_element(form, input)? {
            Some(error) => error,
            None => self.create_error_element(form, input)?,
        };

        self.document.set_text(error, message)?;
        self.document
            .add_class(input, &self.settings.input_error_class)?;
        self.document.add_class(error, &self.settings.error_class)?;

        debug!(error = %error, "Input error shown");
        Ok(())
    }

    /// Clear the error of `input`; a no-op when it never had one.
    #[instrument(skip_all, fields(form = %form, input = %input))]
    pub fn hide_input_error(&mut self, form: NodeId, input: NodeId) -> FormResult<()> {
        let Some(error) = self.find_error_element(form, input)? else {
            return Ok(());
        };

        self.document.set_text(error, "")?;
        self.document
            .remove_class(input, &self.settings.input_error_class)?;
        self.document
            .remove_class(error, &self.settings.error_class)?;

        debug!(error = %error, "Input error hidden");
        Ok(())
    }

    /// Validate `input` and render the result. Returns validity.
    #[instrument(skip_all, fields(form = %form, input = %input))]
    pub fn check_input_validity(&mut self, form: NodeId, input: NodeId) -> FormResult<bool> {
        match self.assess_input(input)? {
            Assessment::Valid => {
                self.hide_input_error(form, input)?;
                Ok(true)
            }
            Assessment::Invalid { message, reason } => {
                debug!(?reason, "Input invalid");
                self.show_input_error(form, input, &message)?;
                Ok(false)
            }
        }
    }

    /// `true` if any input of `form` is invalid.
    pub fn has_invalid_input(&self, form: NodeId) -> FormResult<bool> {
        for input in self.inputs(form)? {
            if !self.is_input_valid(input)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    // -------------------------------------------------------------------------
    // Submit button
    // -------------------------------------------------------------------------

    pub fn disable_submit_button(&self, button: NodeId) -> FormResult<()> {
        self.document
            .add_class(button, &self.settings.inactive_button_class)?;
        self.document.set_disabled(button, true)
    }

    pub fn enable_submit_button(&self, button: NodeId) -> FormResult<()> {
        self.document
            .remove_class(button, &self.settings.inactive_button_class)?;
        self.document.set_disabled(button, false)
    }

    /// Disable `button` iff `form` has an invalid input.
    pub fn toggle_button_state(&self, form: NodeId, button: NodeId) -> FormResult<()> {
        if self.has_invalid_input(form)? {
            self.disable_submit_button(button)
        } else {
            self.enable_submit_button(button)
        }
    }

    // -------------------------------------------------------------------------
    // Wiring
    // -------------------------------------------------------------------------

    /// Initialise the button of `form` and register its listeners.
    ///
    /// Inputs are captured now; inputs added to the form later are not
    /// listened to.
    #[instrument(skip_all, fields(form = %form))]
    pub fn set_event_listeners(&mut self, form: NodeId) -> FormResult<()> {
        let inputs = self.inputs(form)?;
        let button = self.submit_button(form)?;

        match button {
            Some(button) => self.toggle_button_state(form, button)?,
            None => warn!(
                selector = %self.settings.submit_button_selector,
                "Form has no submit button"
            ),
        }

        for input in &inputs {
            self.listeners
                .insert((*input, EventKind::Input), Listener::Revalidate { form, button });
        }
        self.listeners
            .insert((form, EventKind::Submit), Listener::PreventSubmit);

        debug!(inputs = inputs.len(), "Listeners registered");
        Ok(())
    }

    /// Hide every input error of `form` and disable its button.
    #[instrument(skip_all, fields(form = %form))]
    pub fn clear_validation(&mut self, form: NodeId) -> FormResult<()> {
        for input in self.inputs(form)? {
            self.hide_input_error(form, input)?;
        }

        match self.submit_button(form)? {
            Some(button) => self.disable_submit_button(button)?,
            None => warn!("Form has no submit button to disable"),
        }

        Ok(())
    }

    /// Wire every form matching the form selector. Returns the form count.
    #[instrument(skip_all, fields(selector = %self.settings.form_selector))]
    pub fn enable_validation(&mut self) -> FormResult<usize> {
        let forms = self.forms()?;

        for form in &forms {
            self.set_event_listeners(*form)?;
        }

        info!(forms = forms.len(), "Validation enabled");
        Ok(forms.len())
    }

    /// Route a host event to its registered listener.
    pub fn dispatch(&mut self, event: &Event) -> FormResult<EventOutcome> {
        let Some(listener) = self.listeners.get(&(event.target, event.kind)).copied() else {
            return Ok(EventOutcome::ignored());
        };

        debug!(kind = %event.kind, target = %event.target, "Dispatching event");

        match listener {
            Listener::Revalidate { form, button } => {
                self.check_input_validity(form, event.target)?;
                if let Some(button) = button {
                    self.toggle_button_state(form, button)?;
                }
                Ok(EventOutcome {
                    handled: true,
                    default_prevented: false,
                })
            }
            Listener::PreventSubmit => Ok(EventOutcome {
                handled: true,
                default_prevented: true,
            }),
        }
    }

    /// `true` if a listener is registered for `kind` on `node`.
    pub fn is_listening(&self, node: NodeId, kind: EventKind) -> bool {
        self.listeners.contains_key(&(node, kind))
    }

    // -------------------------------------------------------------------------
    // Reports
    // -------------------------------------------------------------------------

    /// Snapshot the rendered state of `form` without mutating it.
    pub fn report(&self, form: NodeId) -> FormResult<FormReport> {
        let mut inputs = Vec::new();

        for input in self.inputs(form)? {
            let state = self.document.input_state(input)?;
            let assessment = assess(&state, &self.rule);

            let (error_text, error_visible) = match self.lookup_error_element(form, input)? {
                Some(error) => (
                    self.document.text(error)?,
                    self.document.has_class(error, &self.settings.error_class)?,
                ),
                None => (String::new(), false),
            };

            inputs.push(InputReport {
                node: input,
                id: state.id,
                value: state.value,
                valid: assessment.is_valid(),
                reason: match assessment {
                    Assessment::Valid => None,
                    Assessment::Invalid { reason, .. } => Some(reason),
                },
                error_text,
                error_visible,
            });
        }

        let submit_disabled = match self.submit_button(form)? {
            Some(button) => Some(self.document.is_disabled(button)?),
            None => None,
        };

        Ok(FormReport {
            node: form,
            inputs,
            submit_disabled,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Paired error element: the typed map first, then a document lookup of
    /// the derived id inside `form` (markup may ship its own error spans).
    fn lookup_error_element(&self, form: NodeId, input: NodeId) -> FormResult<Option<NodeId>> {
        if let Some(error) = self.error_elements.get(&input) {
            return Ok(Some(*error));
        }

        match error_element_id(&self.document.id(input)?) {
            Some(id) => self.document.element_by_id(form, &id),
            None => Ok(None),
        }
    }

    /// [`Self::lookup_error_element`], remembering what the document lookup found.
    fn find_error_element(&mut self, form: NodeId, input: NodeId) -> FormResult<Option<NodeId>> {
        let found = self.lookup_error_element(form, input)?;
        if let Some(error) = found {
            self.error_elements.insert(input, error);
        }
        Ok(found)
    }

    fn create_error_element(&mut self, form: NodeId, input: NodeId) -> FormResult<NodeId> {
        let error = self.document.create_element(ERROR_ELEMENT_TAG)?;

        if let Some(id) = error_element_id(&self.document.id(input)?) {
            self.document.set_id(error, &id)?;
        }
        self.document.add_class(error, ERROR_ELEMENT_CLASS)?;

        let target = self.document.parent(input)?.unwrap_or(form);
        self.document.append_child(target, error)?;

        self.error_elements.insert(input, error);
        debug!(error = %error, parent = %target, "Error element created");
        Ok(error)
    }
}

/// Build a validator over `document` and wire every matching form.
///
/// The sole initialization entry point for a host page.
pub fn enable_validation(
    document: Box<dyn Document>,
    settings: Settings,
) -> FormResult<FormValidator> {
    let mut validator = FormValidator::new(document, settings)?;
    validator.enable_validation()?;
    Ok(validator)
}
