//! Users state store.
//!
//! `UsersState` owns the fetched records, the derived filtered list, the
//! fetch status, the filter criteria and the copy-on-click flag. Every
//! mutation goes through a method here so the filtered list can never drift
//! from `apply_filters(users, criteria)`.
//!
//! ## Fetch status
//!
//! ```text
//! Idle ──begin_fetch──▶ Loading ──fetch_succeeded──▶ Ready
//!                          │                           │
//!                          └──fetch_failed──▶ Failed   │
//!                                               │      │
//!                     Loading ◀──begin_fetch────┴──────┘
//! ```
//!
//! The store does not guard against overlapping fetches: whichever result
//! is delivered last wins.

use tracing::debug;

use crate::filter::{FilterCriteria, apply_filters};
use crate::users::{Field, User};

/// Lifecycle of the users fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Ready,
    /// The last fetch failed with this message.
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct UsersState {
    users: Vec<User>,
    filtered_users: Vec<User>,
    status: FetchStatus,
    criteria: FilterCriteria,
    copy_enabled: bool,
}

impl UsersState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a fetch as started. Clears a previous failure.
    pub fn begin_fetch(&mut self) {
        self.status = FetchStatus::Loading;
    }

    /// Replaces the records and re-applies the current criteria.
    pub fn fetch_succeeded(&mut self, users: Vec<User>) {
        debug!(count = users.len(), "users loaded");
        self.users = users;
        self.status = FetchStatus::Ready;
        self.refilter();
    }

    /// Records a failed fetch. Previously loaded records are kept.
    pub fn fetch_failed(&mut self, message: impl Into<String>) {
        self.status = FetchStatus::Failed(message.into());
    }

    /// Sets one filter field and recomputes the filtered list.
    pub fn update_filter(&mut self, field: Field, value: impl Into<String>) {
        self.criteria.set(field, value);
        self.refilter();
        debug!(
            field = field.title(),
            value = self.criteria.get(field),
            matches = self.filtered_users.len(),
            "filter updated"
        );
    }

    pub fn set_copy_enabled(&mut self, enabled: bool) {
        self.copy_enabled = enabled;
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn filtered_users(&self) -> &[User] {
        &self.filtered_users
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn copy_enabled(&self) -> bool {
        self.copy_enabled
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, FetchStatus::Loading)
    }

    /// Returns the failure message, if the last fetch failed.
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    fn refilter(&mut self) {
        self.filtered_users = apply_filters(&self.users, &self.criteria);
    }
}
