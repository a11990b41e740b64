//! Core library for roster.
//!
//! Holds everything below the presentation layer: the user record model,
//! the filter engine, the state store, the users endpoint adapter, and the
//! config/logging plumbing shared by the CLI and the TUI.

pub mod api;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod store;
pub mod users;

pub use error::FetchError;
pub use filter::{FilterCriteria, apply_filters};
pub use store::{FetchStatus, UsersState};
pub use users::{Field, User};
