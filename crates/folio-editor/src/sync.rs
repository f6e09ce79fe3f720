//! Suppression of change notifications during external content sync.

use std::cell::Cell;
use std::rc::Rc;

/// Whether the session is replacing its content on behalf of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    #[default]
    Idle,
    /// Notifications are not dispatched in this state.
    ApplyingExternalContent,
}

/// Shared handle to a session's sync state.
#[derive(Debug, Clone, Default)]
pub(crate) struct SyncCell(Rc<Cell<SyncState>>);

impl SyncCell {
    pub fn get(&self) -> SyncState {
        self.0.get()
    }

    /// Enter `ApplyingExternalContent` until the guard drops.
    pub fn enter_external(&self) -> SyncGuard {
        self.0.set(SyncState::ApplyingExternalContent);
        SyncGuard(Rc::clone(&self.0))
    }
}

/// Restores [`SyncState::Idle`] when dropped, on every exit path.
#[must_use = "the sync state resets as soon as the guard is dropped"]
pub(crate) struct SyncGuard(Rc<Cell<SyncState>>);

impl Drop for SyncGuard {
    fn drop(&mut self) {
        self.0.set(SyncState::Idle);
    }
}
