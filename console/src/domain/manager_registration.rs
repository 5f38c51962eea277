//! Manager registration form state and the service that submits it.
//!
//! Every edit recomputes the validity of all four fields and clears the error
//! alert. Submission follows the same split as the picker: [`ManagerRegistrationForm::begin_submit`]
//! snapshots the request, the caller awaits [`ManagerRegistrar::register`],
//! and [`ManagerRegistrationForm::finish_submit`] applies the outcome unless
//! the form was torn down meanwhile.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use super::liveness::{Applied, Liveness, LivenessToken, admit};
use super::ports::{ApiClient, ApiClientError, QueryParam};
use super::validation::{is_confirmed_password, is_valid_email, is_valid_name, is_valid_password};

/// Default user creation endpoint.
pub const USERS_PATH: &str = "/auth/users/";

/// Alert shown when the request never reached the server.
pub const NO_RESPONSE_MESSAGE: &str = "No Server Response. Are you connected to internet?";

/// Alert shown when the server rejected the request.
pub const SUBMIT_FAILED_MESSAGE: &str = "An error occurred while adding manager";

const NAME_HINT: &str = "Name must be at least 3 characters long. (Only alphabets are allowed)";
const EMAIL_HINT: &str = "Please enter a valid email.";
const PASSWORD_HINT: &str = "8 to 24 characters. Must include uppercase and lowercase letters, \
a number and a special character. Allowed special characters: !,@,#,$,%";
const CONFIRM_HINT: &str = "Passwords do not match!";

/// Input fields of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationField {
    /// Display name.
    Name,
    /// Login email.
    Email,
    /// Password.
    Password,
    /// Password repeated.
    PasswordConfirm,
}

impl RegistrationField {
    /// All fields in display order.
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Password, Self::PasswordConfirm];

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::PasswordConfirm => "Confirm password",
        }
    }
}

/// Inline feedback for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFeedback {
    /// Nothing to report yet.
    Untouched,
    /// The value is acceptable.
    Valid,
    /// The value is rejected; the hint explains the rule.
    Invalid(&'static str),
}

/// Body of a manager creation request.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct ManagerRegistration {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Initial password.
    pub password: String,
}

impl fmt::Debug for ManagerRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagerRegistration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The part of the server's answer the form reports back.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisteredManager {
    /// Name as stored by the server.
    pub name: String,
}

/// Domain service posting manager registrations through the [`ApiClient`] port.
#[derive(Clone)]
pub struct ManagerRegistrar {
    client: Arc<dyn ApiClient>,
    path: String,
}

impl ManagerRegistrar {
    /// Registrar posting to [`USERS_PATH`].
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self {
            client,
            path: USERS_PATH.to_owned(),
        }
    }

    /// Override the creation endpoint.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Create a manager account.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiClientError`] from the port. A success body without a
    /// `name` is reported as [`ApiClientError::Decode`].
    pub async fn register(
        &self,
        request: &ManagerRegistration,
    ) -> Result<RegisteredManager, ApiClientError> {
        let body = serde_json::to_value(request)
            .map_err(|err| ApiClientError::decode(err.to_string()))?;
        let params = [QueryParam::new("type", "manager")];
        let response = self.client.post(&self.path, &body, &params).await?;
        serde_json::from_value(response).map_err(|err| ApiClientError::decode(err.to_string()))
    }
}

/// Handle for one in-flight submission.
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    token: LivenessToken,
    request: ManagerRegistration,
}

impl SubmitTicket {
    /// Request snapshotted when the submission began.
    pub fn request(&self) -> &ManagerRegistration {
        &self.request
    }

    /// Whether the form that issued this ticket is still mounted.
    pub fn is_alive(&self) -> bool {
        self.token.is_alive()
    }
}

/// Manager registration screen state.
#[derive(Debug, Default)]
pub struct ManagerRegistrationForm {
    liveness: Liveness,
    name: String,
    email: String,
    password: String,
    password_confirm: String,
    name_valid: bool,
    email_valid: bool,
    password_valid: bool,
    confirm_valid: bool,
    error_message: Option<String>,
    success_message: Option<String>,
    loading: bool,
}

impl ManagerRegistrationForm {
    /// Empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the value of `field`.
    pub fn set_field(&mut self, field: RegistrationField, value: impl Into<String>) {
        let value = value.into();
        match field {
            RegistrationField::Name => self.name = value,
            RegistrationField::Email => self.email = value,
            RegistrationField::Password => self.password = value,
            RegistrationField::PasswordConfirm => self.password_confirm = value,
        }
        self.revalidate();
        self.error_message = None;
    }

    /// Current value of `field`.
    pub fn field(&self, field: RegistrationField) -> &str {
        match field {
            RegistrationField::Name => &self.name,
            RegistrationField::Email => &self.email,
            RegistrationField::Password => &self.password,
            RegistrationField::PasswordConfirm => &self.password_confirm,
        }
    }

    /// Derived validity of `field`.
    pub fn is_valid(&self, field: RegistrationField) -> bool {
        match field {
            RegistrationField::Name => self.name_valid,
            RegistrationField::Email => self.email_valid,
            RegistrationField::Password => self.password_valid,
            RegistrationField::PasswordConfirm => self.confirm_valid,
        }
    }

    /// Inline feedback for `field`.
    ///
    /// Empty fields stay [`FieldFeedback::Untouched`]. The confirmation
    /// field is only flagged once both password fields hold text that
    /// differs.
    pub fn feedback(&self, field: RegistrationField) -> FieldFeedback {
        if field == RegistrationField::PasswordConfirm {
            return if self.confirm_valid {
                FieldFeedback::Valid
            } else if !self.password.is_empty()
                && !self.password_confirm.is_empty()
                && self.password != self.password_confirm
            {
                FieldFeedback::Invalid(CONFIRM_HINT)
            } else {
                FieldFeedback::Untouched
            };
        }

        let hint = match field {
            RegistrationField::Name => NAME_HINT,
            RegistrationField::Email => EMAIL_HINT,
            _ => PASSWORD_HINT,
        };
        if self.is_valid(field) {
            FieldFeedback::Valid
        } else if self.field(field).is_empty() {
            FieldFeedback::Untouched
        } else {
            FieldFeedback::Invalid(hint)
        }
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.loading
            && self.name_valid
            && self.email_valid
            && self.password_valid
            && self.confirm_valid
    }

    /// Whether a submission is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Error alert, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Success alert, if any.
    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    /// Start a submission.
    ///
    /// Returns `None` without touching state when the submit control is
    /// disabled. Otherwise clears the success alert, enters the loading state
    /// and snapshots the request body.
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        if !self.can_submit() {
            return None;
        }
        self.success_message = None;
        self.loading = true;
        Some(SubmitTicket {
            token: self.liveness.token(),
            request: ManagerRegistration {
                name: self.name.clone(),
                email: self.email.clone(),
                password: self.password.clone(),
            },
        })
    }

    /// Apply the outcome of a submission.
    ///
    /// Success resets every field and reports the server's name for the new
    /// manager. Failures keep the fields so the operator can retry.
    pub fn finish_submit(
        &mut self,
        ticket: &SubmitTicket,
        outcome: Result<RegisteredManager, ApiClientError>,
    ) -> Applied {
        if let Err(reason) = admit(&self.liveness, &ticket.token) {
            return Applied::Discarded(reason);
        }
        self.loading = false;
        match outcome {
            Ok(manager) => {
                info!(name = %manager.name, "manager registered");
                self.success_message = Some(format!(
                    "{} has been successfully registered as a new manager.",
                    manager.name
                ));
                self.name.clear();
                self.email.clear();
                self.password.clear();
                self.password_confirm.clear();
                self.revalidate();
            }
            Err(err) if !err.has_response() => {
                warn!(error = %err, "manager registration got no response");
                self.error_message = Some(NO_RESPONSE_MESSAGE.to_owned());
            }
            Err(err) => {
                error!(error = %err, status = ?err.status(), "manager registration failed");
                self.error_message = Some(SUBMIT_FAILED_MESSAGE.to_owned());
            }
        }
        Applied::Updated
    }

    /// Validate, submit through `registrar` and apply the outcome.
    ///
    /// Returns `None` when the submit control is disabled.
    pub async fn submit(&mut self, registrar: &ManagerRegistrar) -> Option<Applied> {
        let ticket = self.begin_submit()?;
        let outcome = registrar.register(ticket.request()).await;
        Some(self.finish_submit(&ticket, outcome))
    }

    /// Hide the error alert.
    pub fn dismiss_error(&mut self) {
        self.error_message = None;
    }

    /// Hide the success alert.
    pub fn dismiss_success(&mut self) {
        self.success_message = None;
    }

    /// Unmount the form. Submissions still in flight will be discarded.
    pub fn teardown(&mut self) {
        self.liveness.teardown();
        self.loading = false;
    }

    fn revalidate(&mut self) {
        self.name_valid = is_valid_name(&self.name);
        self.email_valid = is_valid_email(&self.email);
        self.password_valid = is_valid_password(&self.password);
        self.confirm_valid = is_confirmed_password(&self.password, &self.password_confirm);
    }
}

#[cfg(test)]
mod tests;
