//! Command runners driving screen state from operator input.

use thiserror::Error;
use tracing::info;

use super::render::{render_navigation, render_picker, render_registration};
use crate::config::SettingsError;
use crate::domain::{
    AssociateDirectory, AssociatePicker, FieldFeedback, ManagerRegistrar,
    ManagerRegistrationForm, PickerDestination, PickerError, RegistrationField,
};

/// Errors reported by command runners.
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings could not be loaded or interpreted.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// A picker action was rejected.
    #[error(transparent)]
    Picker(#[from] PickerError),
    /// The form has invalid fields; the rendered form explains which.
    #[error("registration form is incomplete:\n{rendered}")]
    InvalidForm {
        /// Form rendered with per-field feedback.
        rendered: String,
    },
    /// The server did not accept the registration.
    #[error("{message}")]
    Submission {
        /// Alert shown on the form.
        message: String,
    },
}

/// Input for the `associates` command.
#[derive(Debug, Clone, Default)]
pub struct AssociatesCommand {
    /// Search text applied after loading.
    pub search: Option<String>,
    /// Identifier of the associate to select.
    pub select: Option<String>,
    /// Where to go once the selection is confirmed.
    pub destination: Option<PickerDestination>,
}

/// Load the associate list, apply search and selection, and render the
/// result.
///
/// # Errors
///
/// Returns [`CliError::Picker`] when the requested associate is not visible
/// or a destination is given without a selection.
pub async fn run_associates(
    directory: &AssociateDirectory,
    command: &AssociatesCommand,
) -> Result<String, CliError> {
    let mut picker = AssociatePicker::new();
    picker.load(directory).await;
    if let Some(search) = &command.search {
        picker.set_search(search.as_str());
    }

    let mut out = String::new();
    if let Some(raw) = &command.select {
        let id = picker
            .find_visible(raw)
            .map(|associate| associate.id().clone())
            .ok_or_else(|| PickerError::UnknownAssociate {
                id: raw.trim().to_owned(),
            })?;
        let interim = picker.select(&id)?;
        if command.destination.is_none() {
            out.push_str(&render_navigation(&interim));
        }
    }
    out.insert_str(0, &render_picker(&picker));

    if let Some(destination) = command.destination {
        let request = picker.proceed(destination)?;
        info!(route = %request.route(), "associate confirmed");
        out.push_str(&render_navigation(&request));
    }
    picker.teardown();
    Ok(out)
}

/// Input for the `register-manager` command.
#[derive(Clone, Default)]
pub struct RegisterManagerCommand {
    /// Manager display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Password repeated.
    pub password_confirm: String,
}

/// Fill the registration form, submit it and render the outcome.
///
/// # Errors
///
/// Returns [`CliError::InvalidForm`] when the submit control would be
/// disabled and [`CliError::Submission`] when the server rejected the request
/// or could not be reached.
pub async fn run_register_manager(
    registrar: &ManagerRegistrar,
    command: RegisterManagerCommand,
) -> Result<String, CliError> {
    let mut form = ManagerRegistrationForm::new();
    form.set_field(RegistrationField::Name, command.name);
    form.set_field(RegistrationField::Email, command.email);
    form.set_field(RegistrationField::Password, command.password);
    form.set_field(RegistrationField::PasswordConfirm, command.password_confirm);

    if form.submit(registrar).await.is_none() {
        let rendered = RegistrationField::ALL
            .into_iter()
            .filter(|field| !matches!(form.feedback(*field), FieldFeedback::Valid))
            .fold(render_registration(&form), |mut out, field| {
                if form.feedback(field) == FieldFeedback::Untouched {
                    out.push_str(&format!("{} is required\n", field.label()));
                }
                out
            });
        return Err(CliError::InvalidForm { rendered });
    }
    if let Some(message) = form.error_message() {
        return Err(CliError::Submission {
            message: message.to_owned(),
        });
    }
    Ok(render_registration(&form))
}

#[cfg(test)]
mod tests {
    //! Command flows against a scripted API.

    use std::sync::Arc;

    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::ports::ApiClientError;
    use crate::domain::{Associate, PickerAction, Section};
    use crate::test_support::ScriptedApiClient;

    fn directory() -> AssociateDirectory {
        let client = ScriptedApiClient::new().with_associate_pages(
            "/associates/",
            &[
                vec![Associate::new(1, "Ada Lovelace")],
                vec![Associate::new(2, "Grace Hopper")],
            ],
        );
        AssociateDirectory::new(Arc::new(client))
    }

    fn jane() -> RegisterManagerCommand {
        RegisterManagerCommand {
            name: "Jane Doe".to_owned(),
            email: "jane@x.io".to_owned(),
            password: "Secret#123".to_owned(),
            password_confirm: "Secret#123".to_owned(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn lists_every_loaded_associate() {
        let out = run_associates(&directory(), &AssociatesCommand::default())
            .await
            .expect("listing succeeds");
        assert!(out.starts_with("Associates (2 of 2)\n"));
        assert!(out.contains("Ada Lovelace"));
        assert!(out.contains("Grace Hopper"));
    }

    #[rstest]
    #[tokio::test]
    async fn selection_with_destination_renders_state() {
        let command = AssociatesCommand {
            search: Some("hop".to_owned()),
            select: Some("2".to_owned()),
            destination: Some(PickerDestination::new(Section::Reports, PickerAction::View)),
        };
        let out = run_associates(&directory(), &command)
            .await
            .expect("selection succeeds");
        assert!(out.contains("Selected: Grace Hopper (2)"));
        assert!(out.contains("Navigate to /reports/view/Grace%20Hopper"));
        assert!(out.contains(r#""associateId":2"#));
        assert!(out.contains(r#""associateName":"Grace Hopper""#));
    }

    #[rstest]
    #[tokio::test]
    async fn destination_without_selection_fails() {
        let command = AssociatesCommand {
            destination: Some(PickerDestination::infer_from_path("/feedbacks")),
            ..AssociatesCommand::default()
        };
        let error = run_associates(&directory(), &command)
            .await
            .expect_err("nothing selected");
        assert!(matches!(error, CliError::Picker(PickerError::NoSelection)));
    }

    #[rstest]
    #[tokio::test]
    async fn filtered_out_associate_cannot_be_selected() {
        let command = AssociatesCommand {
            search: Some("ada".to_owned()),
            select: Some("2".to_owned()),
            ..AssociatesCommand::default()
        };
        let error = run_associates(&directory(), &command)
            .await
            .expect_err("hidden record");
        assert!(matches!(
            error,
            CliError::Picker(PickerError::UnknownAssociate { ref id }) if id == "2"
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn registers_manager() {
        let client = ScriptedApiClient::new().with_post_response(Ok(json!({ "name": "Jane Doe" })));
        let registrar = ManagerRegistrar::new(Arc::new(client));
        let out = run_register_manager(&registrar, jane())
            .await
            .expect("registration succeeds");
        assert!(out.ends_with("Jane Doe has been successfully registered as a new manager.\n"));
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_form_is_not_submitted() {
        let client = Arc::new(ScriptedApiClient::new());
        let registrar = ManagerRegistrar::new(client.clone());
        let command = RegisterManagerCommand {
            email: String::new(),
            ..jane()
        };
        let error = run_register_manager(&registrar, command)
            .await
            .expect_err("form incomplete");
        assert!(matches!(error, CliError::InvalidForm { ref rendered } if rendered.contains("Email is required")));
        assert!(client.calls().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn offline_submission_reports_connectivity() {
        let client = ScriptedApiClient::new()
            .with_post_response(Err(ApiClientError::no_response("connection refused")));
        let registrar = ManagerRegistrar::new(Arc::new(client));
        let error = run_register_manager(&registrar, jane())
            .await
            .expect_err("offline");
        assert_eq!(
            error.to_string(),
            "No Server Response. Are you connected to internet?"
        );
    }
}
