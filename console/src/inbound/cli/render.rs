//! Plain-text rendering of screen state.

use crate::domain::{
    AssociatePicker, FieldFeedback, ManagerRegistrationForm, NavigationRequest, PickerView,
    RegistrationField,
};

/// Render the picker as the operator would see it.
///
/// A load that stopped early is reported under the list. When not a single
/// record could be read, the report becomes a load error.
pub fn render_picker(picker: &AssociatePicker) -> String {
    let mut out = String::new();
    match picker.view() {
        PickerView::Loading => out.push_str("Loading associates...\n"),
        PickerView::Empty => out.push_str("No associates found\n"),
        PickerView::List(records) => {
            out.push_str(&format!(
                "Associates ({} of {})\n",
                records.len(),
                picker.associates().len()
            ));
            if records.is_empty() {
                out.push_str(&format!("  no associates match \"{}\"\n", picker.search()));
            }
            for associate in records {
                out.push_str(&format!(
                    "  {:>6}  {}\n",
                    associate.id().to_string(),
                    associate.name()
                ));
            }
        }
        PickerView::Selected(associate) => {
            out.push_str(&format!(
                "Selected: {} ({})\n",
                associate.name(),
                associate.id()
            ));
        }
    }
    match picker.truncation() {
        Some(truncation) if picker.associates().is_empty() => {
            out.push_str(&format!("error: associates could not be loaded, {truncation}\n"));
        }
        Some(truncation) => {
            out.push_str(&format!("warning: list may be incomplete, {truncation}\n"));
        }
        None => {}
    }
    out
}

/// Render a navigation request as its path and attached state.
pub fn render_navigation(request: &NavigationRequest) -> String {
    let mut out = format!("Navigate to {}\n", request.route());
    if let Some(state) = request.state() {
        let rendered = serde_json::to_string(state).unwrap_or_else(|err| err.to_string());
        out.push_str(&format!("  state: {rendered}\n"));
    }
    out
}

/// Render the registration form with per-field feedback and alerts.
///
/// Password values are never echoed.
pub fn render_registration(form: &ManagerRegistrationForm) -> String {
    let mut lines: Vec<String> = RegistrationField::ALL
        .into_iter()
        .map(|field| {
            let shown = match field {
                RegistrationField::Password | RegistrationField::PasswordConfirm => {
                    "*".repeat(form.field(field).chars().count())
                }
                RegistrationField::Name | RegistrationField::Email => form.field(field).to_owned(),
            };
            let marker = match form.feedback(field) {
                FieldFeedback::Untouched => String::new(),
                FieldFeedback::Valid => "  [ok]".to_owned(),
                FieldFeedback::Invalid(hint) => format!("  [invalid] {hint}"),
            };
            format!("{:<17} {shown}{marker}", format!("{}:", field.label()))
        })
        .collect();
    if form.is_loading() {
        lines.push("Submitting...".to_owned());
    }
    if let Some(message) = form.error_message() {
        lines.push(format!("error: {message}"));
    }
    if let Some(message) = form.success_message() {
        lines.push(message.to_owned());
    }
    lines.into_iter().map(|line| line + "\n").collect()
}
