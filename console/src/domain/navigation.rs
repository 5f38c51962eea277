//! Typed navigation requests produced by the picker.
//!
//! Routes render to URL paths with each dynamic segment percent-encoded; the
//! raw associate identity travels separately in [`AssociateNavigationState`].

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use url::Url;

use super::associate::{Associate, AssociateId};

/// Top-level console section the picker forwards into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Associate reports.
    Reports,
    /// Associate feedback.
    Feedbacks,
}

impl Section {
    fn segment(self) -> &'static str {
        match self {
            Self::Reports => "reports",
            Self::Feedbacks => "feedbacks",
        }
    }
}

/// What the destination screen does with the selected associate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickerAction {
    /// Create a new entry for the associate.
    Add,
    /// Browse existing entries for the associate.
    View,
}

impl PickerAction {
    fn segment(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::View => "view",
        }
    }
}

/// Where the picker forwards once an associate is confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerDestination {
    /// Target section.
    pub section: Section,
    /// Target action.
    pub action: PickerAction,
}

impl PickerDestination {
    /// Explicit destination.
    pub const fn new(section: Section, action: PickerAction) -> Self {
        Self { section, action }
    }

    /// Derive the destination from the path the picker is mounted under.
    ///
    /// Paths starting with `/reports` target reports, anything else targets
    /// feedbacks; a path containing `/add` selects the add action, anything
    /// else selects view.
    ///
    /// ```
    /// use console::domain::{PickerAction, PickerDestination, Section};
    ///
    /// let destination = PickerDestination::infer_from_path("/reports/add");
    /// assert_eq!(destination, PickerDestination::new(Section::Reports, PickerAction::Add));
    /// ```
    pub fn infer_from_path(path: &str) -> Self {
        let section = if path.starts_with("/reports") {
            Section::Reports
        } else {
            Section::Feedbacks
        };
        let action = if path.contains("/add") {
            PickerAction::Add
        } else {
            PickerAction::View
        };
        Self::new(section, action)
    }
}

/// Identity of the chosen associate handed to the destination screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociateNavigationState {
    /// Identifier of the chosen associate.
    pub associate_id: AssociateId,
    /// Display name of the chosen associate.
    pub associate_name: String,
}

impl From<&Associate> for AssociateNavigationState {
    fn from(associate: &Associate) -> Self {
        Self {
            associate_id: associate.id().clone(),
            associate_name: associate.name().to_owned(),
        }
    }
}

/// Console routes reachable from the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Interim route shown while an associate is selected: `/reports/{name}`.
    SelectedAssociate {
        /// Associate display name.
        name: String,
    },
    /// Destination route: `/{section}/{action}/{name}`.
    AssociateDestination {
        /// Section and action.
        destination: PickerDestination,
        /// Associate display name.
        name: String,
    },
}

impl Route {
    /// Render the route as a URL path.
    ///
    /// ```
    /// use console::domain::Route;
    ///
    /// let route = Route::SelectedAssociate { name: "Ada Lovelace".to_owned() };
    /// assert_eq!(route.path(), "/reports/Ada%20Lovelace");
    /// ```
    pub fn path(&self) -> String {
        match self {
            Self::SelectedAssociate { name } => encode_path(&[Section::Reports.segment(), name]),
            Self::AssociateDestination { destination, name } => encode_path(&[
                destination.section.segment(),
                destination.action.segment(),
                name,
            ]),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// A route change with optional attached state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    route: Route,
    state: Option<AssociateNavigationState>,
}

impl NavigationRequest {
    /// Navigate without attached state.
    pub fn to(route: Route) -> Self {
        Self { route, state: None }
    }

    /// Navigate with the associate identity attached.
    pub fn with_state(route: Route, state: AssociateNavigationState) -> Self {
        Self {
            route,
            state: Some(state),
        }
    }

    /// Target route.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Attached state, if any.
    pub fn state(&self) -> Option<&AssociateNavigationState> {
        self.state.as_ref()
    }
}

static ROUTE_BASE: OnceLock<Url> = OnceLock::new();

fn route_base() -> &'static Url {
    ROUTE_BASE.get_or_init(|| {
        Url::parse("console://routes/")
            .unwrap_or_else(|error| panic!("route base URL failed to parse: {error}"))
    })
}

fn encode_path(segments: &[&str]) -> String {
    segments.iter().fold(String::new(), |mut path, segment| {
        path.push('/');
        path.push_str(&encode_segment(segment));
        path
    })
}

fn encode_segment(segment: &str) -> String {
    // `.` and `..` are dropped by `PathSegmentsMut`, so dot-only names are
    // escaped here to keep the segment.
    if !segment.is_empty() && segment.chars().all(|c| c == '.') {
        return "%2E".repeat(segment.len());
    }
    let mut url = route_base().clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.clear().push(segment);
    }
    url.path().trim_start_matches('/').to_owned()
}

#[cfg(test)]
mod tests {
    //! Route rendering and destination inference.

    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case("/reports", Section::Reports, PickerAction::View)]
    #[case("/reports/add", Section::Reports, PickerAction::Add)]
    #[case("/reports-archive", Section::Reports, PickerAction::View)]
    #[case("/feedbacks/add", Section::Feedbacks, PickerAction::Add)]
    #[case("/feedbacks", Section::Feedbacks, PickerAction::View)]
    #[case("/", Section::Feedbacks, PickerAction::View)]
    #[case("/admin/reports/add", Section::Feedbacks, PickerAction::Add)]
    #[case("/reports/address-book", Section::Reports, PickerAction::Add)]
    fn infers_destination_from_mount_path(
        #[case] path: &str,
        #[case] section: Section,
        #[case] action: PickerAction,
    ) {
        assert_eq!(
            PickerDestination::infer_from_path(path),
            PickerDestination::new(section, action)
        );
    }

    #[rstest]
    #[case(Section::Reports, PickerAction::Add, "/reports/add/Ada")]
    #[case(Section::Reports, PickerAction::View, "/reports/view/Ada")]
    #[case(Section::Feedbacks, PickerAction::Add, "/feedbacks/add/Ada")]
    #[case(Section::Feedbacks, PickerAction::View, "/feedbacks/view/Ada")]
    fn renders_destination_routes(
        #[case] section: Section,
        #[case] action: PickerAction,
        #[case] expected: &str,
    ) {
        let route = Route::AssociateDestination {
            destination: PickerDestination::new(section, action),
            name: "Ada".to_owned(),
        };
        assert_eq!(route.path(), expected);
    }

    #[rstest]
    fn encodes_reserved_characters_in_names() {
        let route = Route::SelectedAssociate {
            name: "O'Neil / Ops?".to_owned(),
        };
        assert_eq!(route.path(), "/reports/O'Neil%20%2F%20Ops%3F");
    }

    #[rstest]
    #[case(".", "/reports/view/%2E")]
    #[case("..", "/reports/view/%2E%2E")]
    #[case("a.b", "/reports/view/a.b")]
    #[case("...x", "/reports/view/...x")]
    fn dot_names_keep_their_segment(#[case] name: &str, #[case] expected: &str) {
        let route = Route::AssociateDestination {
            destination: PickerDestination::new(Section::Reports, PickerAction::View),
            name: name.to_owned(),
        };
        assert_eq!(route.path(), expected);
    }

    #[rstest]
    fn navigation_state_serialises_with_camel_case_keys() {
        let state = AssociateNavigationState::from(&Associate::new(9, "Ada"));
        let value = serde_json::to_value(&state).expect("serialise state");
        assert_eq!(value, json!({"associateId": 9, "associateName": "Ada"}));
    }
}
