//! Domain records, screen state machines and ports.
//!
//! Purpose: model the associate picker and the manager registration form as
//! plain state objects driven by events, so the async calls they trigger can
//! run outside the state and be applied (or discarded) afterwards.
//!
//! Public surface:
//! - Associate, AssociateId: directory records with an opaque identifier.
//! - AssociateDirectory: reads every associate page through the API port.
//! - AssociatePicker, PickerView: picker screen state and its view.
//! - ManagerRegistrationForm, ManagerRegistrar: registration form state and
//!   the service that submits it.
//! - Route, NavigationRequest: where a screen asks to go next.
//! - Liveness, Applied: discard outcomes that outlive their screen.

pub mod associate;
pub mod associate_directory;
pub mod associate_picker;
pub mod liveness;
pub mod manager_registration;
pub mod navigation;
pub mod ports;
pub mod validation;

pub use self::associate::{Associate, AssociateId, filter_associates};
pub use self::associate_directory::{ASSOCIATES_PATH, AssociateDirectory};
pub use self::associate_picker::{AssociatePicker, LoadTicket, PickerError, PickerView};
pub use self::liveness::{Applied, DiscardReason, Liveness, LivenessToken};
pub use self::manager_registration::{
    FieldFeedback, ManagerRegistrar, ManagerRegistration, ManagerRegistrationForm,
    NO_RESPONSE_MESSAGE, RegisteredManager, RegistrationField, SUBMIT_FAILED_MESSAGE,
    SubmitTicket, USERS_PATH,
};
pub use self::navigation::{
    AssociateNavigationState, NavigationRequest, PickerAction, PickerDestination, Route, Section,
};
