//! Unit tests for the registration form and registrar.

use std::sync::Arc;

use mockall::predicate::{always, eq};
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::DiscardReason;
use crate::domain::ports::MockApiClient;
use crate::test_support::{RecordedCall, ScriptedApiClient};

const PASSWORD: &str = "Secret#123";

#[fixture]
fn jane() -> ManagerRegistrationForm {
    let mut form = ManagerRegistrationForm::new();
    form.set_field(RegistrationField::Name, "Jane Doe");
    form.set_field(RegistrationField::Email, "jane@x.io");
    form.set_field(RegistrationField::Password, PASSWORD);
    form.set_field(RegistrationField::PasswordConfirm, PASSWORD);
    form
}

fn registrar(client: ScriptedApiClient) -> ManagerRegistrar {
    ManagerRegistrar::new(Arc::new(client))
}

#[rstest]
fn empty_form_cannot_submit() {
    let mut form = ManagerRegistrationForm::new();
    assert!(!form.can_submit());
    assert!(form.begin_submit().is_none());
    assert!(!form.is_loading());
    for field in RegistrationField::ALL {
        assert_eq!(form.feedback(field), FieldFeedback::Untouched);
    }
}

#[rstest]
fn complete_form_can_submit(jane: ManagerRegistrationForm) {
    assert!(jane.can_submit());
    for field in RegistrationField::ALL {
        assert!(jane.is_valid(field), "{} should be valid", field.label());
        assert_eq!(jane.feedback(field), FieldFeedback::Valid);
    }
}

#[rstest]
#[case(RegistrationField::Name, "Jo")]
#[case(RegistrationField::Email, "jane@x")]
#[case(RegistrationField::Password, "secret#123")]
#[case(RegistrationField::PasswordConfirm, "Secret#124")]
fn any_invalid_field_disables_submit(
    mut jane: ManagerRegistrationForm,
    #[case] field: RegistrationField,
    #[case] value: &str,
) {
    jane.set_field(field, value);
    assert!(!jane.can_submit());
    assert!(matches!(jane.feedback(field), FieldFeedback::Invalid(_)));
}

#[rstest]
fn editing_password_revalidates_confirmation(mut jane: ManagerRegistrationForm) {
    jane.set_field(RegistrationField::Password, "Secret#999");
    assert!(!jane.is_valid(RegistrationField::PasswordConfirm));
    assert_eq!(
        jane.feedback(RegistrationField::PasswordConfirm),
        FieldFeedback::Invalid("Passwords do not match!")
    );
}

#[rstest]
fn matching_but_weak_password_is_not_flagged_on_confirmation() {
    let mut form = ManagerRegistrationForm::new();
    form.set_field(RegistrationField::Password, "weak");
    form.set_field(RegistrationField::PasswordConfirm, "weak");

    assert!(!form.is_valid(RegistrationField::PasswordConfirm));
    assert_eq!(
        form.feedback(RegistrationField::PasswordConfirm),
        FieldFeedback::Untouched
    );
}

#[rstest]
fn confirmation_alone_is_not_flagged() {
    let mut form = ManagerRegistrationForm::new();
    form.set_field(RegistrationField::PasswordConfirm, PASSWORD);
    assert_eq!(
        form.feedback(RegistrationField::PasswordConfirm),
        FieldFeedback::Untouched
    );
}

#[rstest]
fn begin_submit_enters_loading_and_snapshots_request(mut jane: ManagerRegistrationForm) {
    let ticket = jane.begin_submit().expect("form is submittable");

    assert!(jane.is_loading());
    assert!(!jane.can_submit());
    assert!(jane.begin_submit().is_none());
    assert_eq!(
        ticket.request(),
        &ManagerRegistration {
            name: "Jane Doe".to_owned(),
            email: "jane@x.io".to_owned(),
            password: PASSWORD.to_owned(),
        }
    );
}

#[rstest]
#[tokio::test]
async fn successful_submission_resets_form(mut jane: ManagerRegistrationForm) {
    let client = ScriptedApiClient::new().with_post_response(Ok(json!({
        "id": 17,
        "name": "Jane Doe",
        "email": "jane@x.io"
    })));
    let registrar = registrar(client);

    assert_eq!(jane.submit(&registrar).await, Some(Applied::Updated));

    assert_eq!(
        jane.success_message(),
        Some("Jane Doe has been successfully registered as a new manager.")
    );
    assert!(jane.error_message().is_none());
    assert!(!jane.is_loading());
    for field in RegistrationField::ALL {
        assert_eq!(jane.field(field), "");
        assert!(!jane.is_valid(field));
    }
}

#[rstest]
#[tokio::test]
async fn success_message_uses_server_name(mut jane: ManagerRegistrationForm) {
    let registrar = registrar(
        ScriptedApiClient::new().with_post_response(Ok(json!({ "name": "Jane Q. Doe" }))),
    );
    jane.submit(&registrar).await;
    assert_eq!(
        jane.success_message(),
        Some("Jane Q. Doe has been successfully registered as a new manager.")
    );
}

#[rstest]
#[tokio::test]
async fn missing_response_reports_connectivity(mut jane: ManagerRegistrationForm) {
    let registrar = registrar(
        ScriptedApiClient::new()
            .with_post_response(Err(ApiClientError::no_response("connection refused"))),
    );

    jane.submit(&registrar).await;

    assert_eq!(jane.error_message(), Some(NO_RESPONSE_MESSAGE));
    assert!(jane.success_message().is_none());
    assert!(!jane.is_loading());
    assert_eq!(jane.field(RegistrationField::Name), "Jane Doe");
    assert!(jane.can_submit());
}

#[rstest]
#[case(ApiClientError::error_response(400_u16, "email already taken"))]
#[case(ApiClientError::decode("missing field `name`"))]
#[tokio::test]
async fn rejected_submission_reports_generic_error(
    mut jane: ManagerRegistrationForm,
    #[case] failure: ApiClientError,
) {
    let registrar = registrar(ScriptedApiClient::new().with_post_response(Err(failure)));

    jane.submit(&registrar).await;

    assert_eq!(jane.error_message(), Some(SUBMIT_FAILED_MESSAGE));
    assert_eq!(jane.field(RegistrationField::Email), "jane@x.io");
}

#[rstest]
#[tokio::test]
async fn editing_clears_error_alert(mut jane: ManagerRegistrationForm) {
    let registrar = registrar(
        ScriptedApiClient::new().with_post_response(Err(ApiClientError::no_response("timeout"))),
    );
    jane.submit(&registrar).await;
    assert!(jane.error_message().is_some());

    jane.set_field(RegistrationField::Email, "jane@y.io");
    assert!(jane.error_message().is_none());
}

#[rstest]
#[tokio::test]
async fn new_submission_clears_previous_success(mut jane: ManagerRegistrationForm) {
    let registrar = registrar(
        ScriptedApiClient::new().with_post_response(Ok(json!({ "name": "Jane Doe" }))),
    );
    jane.submit(&registrar).await;
    assert!(jane.success_message().is_some());

    jane.set_field(RegistrationField::Name, "John Roe");
    jane.set_field(RegistrationField::Email, "john@x.io");
    jane.set_field(RegistrationField::Password, PASSWORD);
    jane.set_field(RegistrationField::PasswordConfirm, PASSWORD);
    let _ticket = jane.begin_submit().expect("form is submittable");
    assert!(jane.success_message().is_none());
}

#[rstest]
fn alerts_can_be_dismissed(mut jane: ManagerRegistrationForm) {
    let ticket = jane.begin_submit().expect("form is submittable");
    jane.finish_submit(&ticket, Err(ApiClientError::no_response("offline")));
    jane.dismiss_error();
    assert!(jane.error_message().is_none());

    jane.set_field(RegistrationField::Name, "Jane Doe");
    let ticket = jane.begin_submit().expect("form is submittable");
    jane.finish_submit(
        &ticket,
        Ok(RegisteredManager {
            name: "Jane Doe".to_owned(),
        }),
    );
    jane.dismiss_success();
    assert!(jane.success_message().is_none());
}

#[rstest]
fn outcome_after_teardown_is_discarded(mut jane: ManagerRegistrationForm) {
    let ticket = jane.begin_submit().expect("form is submittable");
    jane.teardown();

    let applied = jane.finish_submit(
        &ticket,
        Ok(RegisteredManager {
            name: "Jane Doe".to_owned(),
        }),
    );

    assert_eq!(applied, Applied::Discarded(DiscardReason::TornDown));
    assert!(jane.success_message().is_none());
    assert_eq!(jane.field(RegistrationField::Name), "Jane Doe");
}

#[rstest]
fn ticket_from_another_form_is_rejected(mut jane: ManagerRegistrationForm) {
    let ticket = jane.begin_submit().expect("form is submittable");
    let mut other = ManagerRegistrationForm::new();
    let applied = other.finish_submit(&ticket, Err(ApiClientError::no_response("offline")));
    assert_eq!(applied, Applied::Discarded(DiscardReason::ForeignScreen));
    assert!(other.error_message().is_none());
}

#[rstest]
fn registration_debug_hides_password() {
    let request = ManagerRegistration {
        name: "Jane Doe".to_owned(),
        email: "jane@x.io".to_owned(),
        password: PASSWORD.to_owned(),
    };
    let rendered = format!("{request:?}");
    assert!(!rendered.contains(PASSWORD));
    assert!(rendered.contains("Jane Doe"));
}

#[rstest]
#[tokio::test]
async fn registrar_posts_body_with_manager_type() {
    let client = Arc::new(
        ScriptedApiClient::new().with_post_response(Ok(json!({ "name": "Jane Doe" }))),
    );
    let registrar = ManagerRegistrar::new(client.clone());
    let request = ManagerRegistration {
        name: "Jane Doe".to_owned(),
        email: "jane@x.io".to_owned(),
        password: PASSWORD.to_owned(),
    };

    let manager = registrar.register(&request).await.expect("registered");

    assert_eq!(manager.name, "Jane Doe");
    assert_eq!(
        client.calls(),
        vec![RecordedCall::Post {
            path: USERS_PATH.to_owned(),
            body: json!({ "name": "Jane Doe", "email": "jane@x.io", "password": PASSWORD }),
            params: vec![QueryParam::new("type", "manager")],
        }]
    );
}

#[rstest]
#[tokio::test]
async fn registrar_honours_custom_path() {
    let mut client = MockApiClient::new();
    client
        .expect_post()
        .with(eq("/v2/users/"), always(), always())
        .times(1)
        .returning(|_, _, _| Ok(json!({ "name": "Jane Doe" })));
    let registrar = ManagerRegistrar::new(Arc::new(client)).with_path("/v2/users/");
    let request = ManagerRegistration {
        name: "Jane Doe".to_owned(),
        email: "jane@x.io".to_owned(),
        password: PASSWORD.to_owned(),
    };

    let manager = registrar.register(&request).await.expect("registered");
    assert_eq!(manager.name, "Jane Doe");
}
