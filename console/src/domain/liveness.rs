//! Screen liveness tracking.
//!
//! A screen hands a [`LivenessToken`] to every async operation it starts. When
//! the screen is torn down the shared flag flips, and outcomes delivered
//! afterwards are discarded instead of mutating destroyed state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Owner side of a screen's liveness flag.
#[derive(Debug)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    /// A live flag.
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// Token observed by in-flight operations.
    pub fn token(&self) -> LivenessToken {
        LivenessToken(Arc::clone(&self.0))
    }

    /// Whether the owning screen is still mounted.
    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Mark the owning screen as torn down.
    pub fn teardown(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer side of a screen's liveness flag.
#[derive(Debug, Clone)]
pub struct LivenessToken(Arc<AtomicBool>);

impl LivenessToken {
    /// Whether the screen that issued this token is still mounted.
    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn belongs_to(&self, owner: &Liveness) -> bool {
        Arc::ptr_eq(&self.0, &owner.0)
    }
}

/// Result of applying an async outcome to screen state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// State was updated.
    Updated,
    /// The outcome was dropped without touching state.
    Discarded(DiscardReason),
}

/// Why an outcome was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// The screen was torn down before the outcome arrived.
    TornDown,
    /// A newer operation superseded the one that produced the outcome.
    Superseded,
    /// The outcome was issued by a different screen instance.
    ForeignScreen,
}

/// Decide whether an outcome carrying `token` may be applied to `owner`.
pub(crate) fn admit(owner: &Liveness, token: &LivenessToken) -> Result<(), DiscardReason> {
    if !token.belongs_to(owner) {
        return Err(DiscardReason::ForeignScreen);
    }
    if !owner.is_alive() {
        return Err(DiscardReason::TornDown);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Token admission rules.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn live_owner_admits_its_own_token() {
        let owner = Liveness::new();
        assert_eq!(admit(&owner, &owner.token()), Ok(()));
    }

    #[rstest]
    fn teardown_is_visible_through_tokens() {
        let owner = Liveness::new();
        let token = owner.token();
        owner.teardown();
        assert!(!token.is_alive());
        assert_eq!(admit(&owner, &token), Err(DiscardReason::TornDown));
    }

    #[rstest]
    fn tokens_from_other_screens_are_rejected() {
        let owner = Liveness::new();
        let stranger = Liveness::new();
        assert_eq!(
            admit(&owner, &stranger.token()),
            Err(DiscardReason::ForeignScreen)
        );
    }
}
