//! Native constraint validation for form controls of the memory document.
//!
//! Mirrors what a browser computes from markup attributes: `required`,
//! `minlength`/`maxlength`, `pattern`, the `email`/`url` types and the
//! `number` type with `min`/`max`. Checkboxes and radios are missing while
//! unchecked; a `select` is missing while no option value is chosen.
//!
//! Length constraints only apply once the user edited the value (the
//! element is dirty), the way browsers treat `minlength` and `maxlength`.

use std::{
    collections::HashMap,
    sync::{OnceLock, RwLock},
};

use regex::Regex;

use formcheck_core::domain::ValidityState;

/// Attribute view of one form control.
pub(crate) struct ControlView<'a> {
    pub tag: &'a str,
    pub input_type: &'a str,
    pub value: &'a str,
    pub dirty: bool,
    pub disabled: bool,
    pub attribute: &'a dyn Fn(&str) -> Option<&'a str>,
}

impl ControlView<'_> {
    fn attr(&self, name: &str) -> Option<&str> {
        (self.attribute)(name)
    }

    fn attr_usize(&self, name: &str) -> Option<usize> {
        self.attr(name)?.trim().parse().ok()
    }

    fn attr_f64(&self, name: &str) -> Option<f64> {
        self.attr(name)?
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }
}

/// Tags whose value takes part in constraint validation.
pub(crate) fn is_form_control(tag: &str) -> bool {
    matches!(tag, "input" | "textarea" | "select")
}

/// The control type a browser reports for `tag` with the given `type`
/// attribute.
pub(crate) fn control_type(tag: &str, type_attr: Option<&str>, multiple: bool) -> String {
    match tag {
        "textarea" => "textarea".into(),
        "select" if multiple => "select-multiple".into(),
        "select" => "select-one".into(),
        _ => type_attr
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map_or_else(|| "text".into(), str::to_ascii_lowercase),
    }
}

/// Checkboxes and radios without a value submit `on`.
pub(crate) fn effective_value<'a>(input_type: &str, value: &'a str) -> &'a str {
    if is_checkable(input_type) && value.is_empty() {
        "on"
    } else {
        value
    }
}

fn is_checkable(input_type: &str) -> bool {
    matches!(input_type, "checkbox" | "radio")
}

type PatternCache = RwLock<HashMap<String, Option<Regex>>>;

fn pattern_cache() -> &'static PatternCache {
    static PATTERNS: OnceLock<PatternCache> = OnceLock::new();
    PATTERNS.get_or_init(Default::default)
}

/// Anchored regex for a `pattern` attribute, compiled once per pattern.
///
/// `None` when the pattern does not compile.
fn compiled_pattern(pattern: &str) -> Option<Regex> {
    let cache = pattern_cache();
    let hit = cache
        .read()
        .ok()
        .and_then(|patterns| patterns.get(pattern).cloned());
    if let Some(compiled) = hit {
        return compiled;
    }

    let compiled = Regex::new(&format!("^(?:{pattern})$")).ok();
    if let Ok(mut patterns) = cache.write() {
        patterns.insert(pattern.to_string(), compiled.clone());
    }
    compiled
}

fn participates(view: &ControlView<'_>) -> bool {
    !view.disabled && !matches!(view.input_type, "button" | "submit" | "reset" | "hidden")
}

fn is_text_like(view: &ControlView<'_>) -> bool {
    view.tag == "textarea"
        || matches!(
            view.input_type,
            "text" | "search" | "url" | "tel" | "email" | "password"
        )
}

fn is_simple_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
        && !domain.contains('@')
}

fn is_url_like(value: &str) -> bool {
    let Some((scheme, rest)) = value.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        && !rest.is_empty()
}

/// Compute validity flags and the browser-style validation message.
pub(crate) fn evaluate(view: &ControlView<'_>) -> (ValidityState, String) {
    let mut validity = ValidityState::default();

    if !participates(view) {
        return (validity, String::new());
    }

    let required = view.attr("required").is_some();
    validity.value_missing = if is_checkable(view.input_type) {
        required && view.attr("checked").is_none()
    } else {
        required && view.value.is_empty()
    };

    let length = view.value.chars().count();

    if !view.value.is_empty() {
        match view.input_type {
            "email" => validity.type_mismatch = !is_simple_email(view.value),
            "url" => validity.type_mismatch = !is_url_like(view.value),
            _ => {}
        }

        if is_text_like(view) {
            if view.dirty {
                if let Some(min) = view.attr_usize("minlength") {
                    validity.too_short = length < min;
                }
                if let Some(max) = view.attr_usize("maxlength") {
                    validity.too_long = length > max;
                }
            }

            if let Some(pattern) = view.attr("pattern").filter(|p| !p.is_empty()) {
                // Browsers ignore patterns that fail to compile.
                if let Some(regex) = compiled_pattern(pattern) {
                    validity.pattern_mismatch = !regex.is_match(view.value);
                }
            }
        }

        if matches!(view.input_type, "number" | "range") && view.tag == "input" {
            match view.value.trim().parse::<f64>() {
                Ok(number) if number.is_finite() => {
                    if let Some(min) = view.attr_f64("min") {
                        validity.range_underflow = number < min;
                    }
                    if let Some(max) = view.attr_f64("max") {
                        validity.range_overflow = number > max;
                    }
                }
                _ => validity.bad_input = true,
            }
        }
    }

    let message = message_for(view, &validity, length);
    (validity, message)
}

fn message_for(view: &ControlView<'_>, validity: &ValidityState, length: usize) -> String {
    if validity.value_missing {
        return match view.input_type {
            "checkbox" => "Please check this box if you want to proceed.".into(),
            "radio" => "Please select one of these options.".into(),
            "select-one" | "select-multiple" => "Please select an item in the list.".into(),
            _ => "Please fill out this field.".into(),
        };
    }
    if validity.type_mismatch {
        return match view.input_type {
            "email" => format!(
                "Please include an '@' and a domain in the email address. '{}' is incomplete.",
                view.value
            ),
            _ => "Please enter a URL.".into(),
        };
    }
    if validity.bad_input {
        return "Please enter a number.".into();
    }
    if validity.too_short {
        return format!(
            "Please lengthen this text to {} characters or more (you are currently using {} characters).",
            view.attr("minlength").unwrap_or_default().trim(),
            length
        );
    }
    if validity.too_long {
        return format!(
            "Please shorten this text to {} characters or less (you are currently using {} characters).",
            view.attr("maxlength").unwrap_or_default().trim(),
            length
        );
    }
    if validity.range_underflow {
        return format!(
            "Value must be greater than or equal to {}.",
            view.attr("min").unwrap_or_default().trim()
        );
    }
    if validity.range_overflow {
        return format!(
            "Value must be less than or equal to {}.",
            view.attr("max").unwrap_or_default().trim()
        );
    }
    if validity.pattern_mismatch {
        return match view.attr("title").filter(|t| !t.is_empty()) {
            Some(title) => format!("Please match the requested format.\n{title}"),
            None => "Please match the requested format.".into(),
        };
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn eval(
        input_type: &str,
        value: &str,
        dirty: bool,
        attrs: &[(&str, &str)],
    ) -> (ValidityState, String) {
        let attrs: HashMap<String, String> = attrs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let lookup = |name: &str| attrs.get(name).map(String::as_str);
        let view = ControlView {
            tag: "input",
            input_type,
            value,
            dirty,
            disabled: false,
            attribute: &lookup,
        };
        evaluate(&view)
    }

    #[test]
    fn required_empty_is_missing() {
        let (validity, message) = eval("text", "", false, &[("required", "")]);
        assert!(validity.value_missing);
        assert_eq!(message, "Please fill out this field.");
    }

    #[test]
    fn minlength_applies_only_to_dirty_values() {
        let (pristine, _) = eval("text", "A", false, &[("minlength", "2")]);
        assert!(pristine.valid());

        let (edited, message) = eval("text", "A", true, &[("minlength", "2")]);
        assert!(edited.too_short);
        assert!(message.starts_with("Please lengthen this text to 2 characters"));
    }

    #[test]
    fn maxlength_counts_characters() {
        let (validity, _) = eval("text", "жжж", true, &[("maxlength", "3")]);
        assert!(validity.valid());
    }

    #[test]
    fn email_and_url_types() {
        assert!(eval("email", "anna@example.com", false, &[]).0.valid());
        assert!(eval("email", "anna", false, &[]).0.type_mismatch);
        assert!(eval("url", "https://example.com/a.png", false, &[]).0.valid());
        assert!(eval("url", "example.com", false, &[]).0.type_mismatch);
    }

    #[test]
    fn pattern_is_anchored() {
        let (validity, _) = eval("text", "abc1", false, &[("pattern", "[a-z]+")]);
        assert!(validity.pattern_mismatch);
        assert!(eval("text", "abc", false, &[("pattern", "[a-z]+")]).0.valid());
    }

    #[test]
    fn invalid_pattern_is_ignored() {
        assert!(eval("text", "abc", false, &[("pattern", "[a-")]).0.valid());
    }

    #[test]
    fn number_ranges() {
        let attrs = [("min", "1"), ("max", "10")];
        assert!(eval("number", "0", false, &attrs).0.range_underflow);
        assert!(eval("number", "11", false, &attrs).0.range_overflow);
        assert!(eval("number", "x", false, &attrs).0.bad_input);
        assert!(eval("number", "5", false, &attrs).0.valid());
    }

    #[test]
    fn patterns_compile_once() {
        assert!(eval("text", "abc", false, &[("pattern", "[a-c]{3}")]).0.valid());
        assert!(eval("text", "abd", false, &[("pattern", "[a-c]{3}")]).0.pattern_mismatch);

        let cache = pattern_cache().read().unwrap();
        assert!(cache.get("[a-c]{3}").is_some_and(Option::is_some));
    }

    #[test]
    fn uncompilable_pattern_is_remembered() {
        assert!(compiled_pattern("(unclosed").is_none());
        let cache = pattern_cache().read().unwrap();
        assert!(cache.get("(unclosed").is_some_and(Option::is_none));
    }

    #[test]
    fn checkbox_is_missing_until_checked() {
        let (unchecked, message) = eval("checkbox", "on", false, &[("required", "")]);
        assert!(unchecked.value_missing);
        assert_eq!(message, "Please check this box if you want to proceed.");

        let checked = [("required", ""), ("checked", "")];
        assert!(eval("checkbox", "on", false, &checked).0.valid());
        assert!(eval("checkbox", "on", false, &[]).0.valid());
    }

    #[test]
    fn control_types_follow_the_tag() {
        assert_eq!(control_type("input", None, false), "text");
        assert_eq!(control_type("input", Some(" EMAIL "), false), "email");
        assert_eq!(control_type("textarea", Some("email"), false), "textarea");
        assert_eq!(control_type("select", None, false), "select-one");
        assert_eq!(control_type("select", None, true), "select-multiple");
    }

    #[test]
    fn select_without_choice_is_missing() {
        let lookup = |name: &str| (name == "required").then_some("");
        let empty = ControlView {
            tag: "select",
            input_type: "select-one",
            value: "",
            dirty: false,
            disabled: false,
            attribute: &lookup,
        };
        let (validity, message) = evaluate(&empty);
        assert!(validity.value_missing);
        assert_eq!(message, "Please select an item in the list.");

        let chosen = ControlView {
            value: "Paris",
            ..empty
        };
        assert!(evaluate(&chosen).0.valid());
    }

    #[test]
    fn checkable_inputs_default_to_on() {
        assert_eq!(effective_value("checkbox", ""), "on");
        assert_eq!(effective_value("radio", "blue"), "blue");
        assert_eq!(effective_value("text", ""), "");
    }

    #[test]
    fn submit_inputs_do_not_participate() {
        assert!(eval("submit", "", false, &[("required", "")]).0.valid());
    }
}
