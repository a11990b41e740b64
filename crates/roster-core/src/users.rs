//! User records and the columns they can be filtered by.

use serde::{Deserialize, Serialize};

/// A single user record as returned by the users endpoint.
///
/// The endpoint returns more fields (address, company, website); only the
/// ones displayed in the table are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
}

impl User {
    /// Returns the value of a filterable field.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Username => &self.username,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
        }
    }
}

/// A filterable text column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Username,
    Email,
    Phone,
}

impl Field {
    /// All fields in display order.
    pub const ALL: [Field; 4] = [Field::Name, Field::Username, Field::Email, Field::Phone];

    /// Column header text.
    pub fn title(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Username => "Username",
            Field::Email => "Email",
            Field::Phone => "Phone",
        }
    }

    /// Placeholder shown in an empty filter input.
    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Name => "Search by name",
            Field::Username => "Search by username",
            Field::Email => "Search by email",
            Field::Phone => "Search by phone",
        }
    }

    /// Phone numbers are matched exactly as typed; text fields ignore case.
    pub fn is_case_sensitive(self) -> bool {
        matches!(self, Field::Phone)
    }

    /// Position of this field in `ALL`.
    pub fn index(self) -> usize {
        match self {
            Field::Name => 0,
            Field::Username => 1,
            Field::Email => 2,
            Field::Phone => 3,
        }
    }

    /// Next field, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous field, wrapping around.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}
