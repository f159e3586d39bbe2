//! Read-only projection of a single user for the detail view.

use super::User;

/// What the detail view shows for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetail {
    /// `first_name + " " + last_name`.
    pub full_name: String,
    /// Contact email.
    pub email: String,
    /// Department name.
    pub department: String,
}

impl From<&User> for UserDetail {
    fn from(user: &User) -> Self {
        Self {
            full_name: format!("{} {}", user.first_name(), user.last_name()),
            email: user.email().to_owned(),
            department: user.department().to_owned(),
        }
    }
}
