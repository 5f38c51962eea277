//! Associate picker screen state.
//!
//! The picker loads the whole associate collection once, narrows it with a
//! case-insensitive search, and lets the operator confirm one record before
//! forwarding to a report or feedback screen with the record's identity
//! attached.
//!
//! Loading is split into [`AssociatePicker::begin_load`] and
//! [`AssociatePicker::finish_load`] so the async fetch can run without
//! borrowing the screen. Outcomes arriving after [`AssociatePicker::teardown`]
//! or after a newer load started are discarded.

use pagination::{Collected, Truncation};
use thiserror::Error;

use super::associate::{Associate, AssociateId, filter_associates};
use super::associate_directory::AssociateDirectory;
use super::liveness::{Applied, DiscardReason, Liveness, LivenessToken, admit};
use super::navigation::{AssociateNavigationState, NavigationRequest, PickerDestination, Route};

/// Errors raised by picker actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickerError {
    /// Proceed was requested with nothing selected.
    #[error("Please select an associate.")]
    NoSelection,
    /// The requested associate is not among the visible records.
    #[error("associate {id} is not in the current list")]
    UnknownAssociate {
        /// Identifier as requested.
        id: String,
    },
}

/// Handle for one in-flight load.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: u64,
    token: LivenessToken,
}

impl LoadTicket {
    /// Whether the picker that issued this ticket is still mounted.
    pub fn is_alive(&self) -> bool {
        self.token.is_alive()
    }
}

/// What the picker currently shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickerView<'a> {
    /// A load is in flight.
    Loading,
    /// Nothing has been loaded, or the collection is empty.
    Empty,
    /// Records matching the current search, in fetch order.
    List(&'a [Associate]),
    /// One record awaiting confirmation.
    Selected(&'a Associate),
}

/// Associate picker screen state.
#[derive(Debug, Default)]
pub struct AssociatePicker {
    liveness: Liveness,
    generation: u64,
    loading: bool,
    associates: Vec<Associate>,
    truncation: Option<Truncation>,
    search: String,
    filtered: Vec<Associate>,
    selected: Option<Associate>,
}

impl AssociatePicker {
    /// Freshly mounted picker with nothing loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load: show the loading indicator and issue a ticket for the
    /// outcome.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation = self.generation.wrapping_add(1);
        self.loading = true;
        LoadTicket {
            generation: self.generation,
            token: self.liveness.token(),
        }
    }

    /// Apply a finished load.
    ///
    /// The selection survives a reload only if the selected record is still
    /// part of the collection.
    pub fn finish_load(&mut self, ticket: &LoadTicket, collected: Collected<Associate>) -> Applied {
        if let Err(reason) = admit(&self.liveness, &ticket.token) {
            return Applied::Discarded(reason);
        }
        if ticket.generation != self.generation {
            return Applied::Discarded(DiscardReason::Superseded);
        }

        let (associates, truncation) = collected.into_parts();
        self.loading = false;
        self.associates = associates;
        self.truncation = truncation;
        if let Some(selected) = &self.selected {
            if !self.associates.iter().any(|a| a.id() == selected.id()) {
                self.selected = None;
            }
        }
        self.refresh_filter();
        Applied::Updated
    }

    /// Load the collection through `directory`.
    pub async fn load(&mut self, directory: &AssociateDirectory) -> Applied {
        let ticket = self.begin_load();
        let collected = directory.fetch_all().await;
        self.finish_load(&ticket, collected)
    }

    /// Replace the search text and recompute the visible records.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.refresh_filter();
    }

    /// Current search text.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Records matching the current search.
    pub fn filtered(&self) -> &[Associate] {
        &self.filtered
    }

    /// Every loaded record.
    pub fn associates(&self) -> &[Associate] {
        &self.associates
    }

    /// Whether a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Truncation marker from the last load, when it stopped early.
    pub fn truncation(&self) -> Option<&Truncation> {
        self.truncation.as_ref()
    }

    /// Visible record whose identifier renders as `raw`.
    pub fn find_visible(&self, raw: &str) -> Option<&Associate> {
        self.filtered.iter().find(|associate| associate.id().matches(raw))
    }

    /// Select a visible record and return the interim route for it.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::UnknownAssociate`] when no visible record has
    /// the identifier.
    pub fn select(&mut self, id: &AssociateId) -> Result<NavigationRequest, PickerError> {
        let associate = self
            .filtered
            .iter()
            .find(|associate| associate.id() == id)
            .cloned()
            .ok_or_else(|| PickerError::UnknownAssociate { id: id.to_string() })?;

        let route = Route::SelectedAssociate {
            name: associate.name().to_owned(),
        };
        self.selected = Some(associate);
        Ok(NavigationRequest::to(route))
    }

    /// Drop the current selection and return to the list.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Currently selected record.
    pub fn selected(&self) -> Option<&Associate> {
        self.selected.as_ref()
    }

    /// Confirm the selection and build the navigation request for
    /// `destination`, carrying the associate's identifier and name.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::NoSelection`] when nothing is selected.
    pub fn proceed(&self, destination: PickerDestination) -> Result<NavigationRequest, PickerError> {
        let selected = self.selected.as_ref().ok_or(PickerError::NoSelection)?;
        let route = Route::AssociateDestination {
            destination,
            name: selected.name().to_owned(),
        };
        Ok(NavigationRequest::with_state(
            route,
            AssociateNavigationState::from(selected),
        ))
    }

    /// What the screen shows right now.
    pub fn view(&self) -> PickerView<'_> {
        if self.loading {
            return PickerView::Loading;
        }
        if self.associates.is_empty() {
            return PickerView::Empty;
        }
        match &self.selected {
            Some(selected) => PickerView::Selected(selected),
            None => PickerView::List(&self.filtered),
        }
    }

    /// Unmount the screen. Loads still in flight will be discarded.
    pub fn teardown(&mut self) {
        self.liveness.teardown();
        self.loading = false;
        self.selected = None;
    }

    fn refresh_filter(&mut self) {
        self.filtered = filter_associates(&self.associates, &self.search)
            .into_iter()
            .cloned()
            .collect();
    }
}
