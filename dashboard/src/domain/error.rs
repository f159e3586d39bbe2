//! Dashboard error taxonomy.
//!
//! Fetch and mutation failures are transport agnostic: the HTTP adapter maps
//! its failures into [`StoreFailure`] and the controllers hand the typed
//! errors back to the caller, which decides how to present them. Validation
//! failures never appear here; they stay inside the form as
//! [`FieldErrors`](super::FieldErrors).

use std::fmt;

use thiserror::Error;

use super::ports::define_port_error;
use super::{UserDraft, UserId};

define_port_error! {
    /// Why a call to the user API failed.
    pub enum StoreFailure {
        /// The request never produced a response.
        Transport {
            /// Transport error description.
            message: String,
        } => "transport failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout {
            /// Timeout error description.
            message: String,
        } => "request timed out: {message}",
        /// The API answered with a status the operation does not accept.
        UnexpectedStatus {
            /// HTTP status code.
            status: u16,
            /// Compacted preview of the response body.
            body: String,
        } => "unexpected status {status}: {body}",
        /// The response body could not be decoded.
        Decode {
            /// Decoder error description.
            message: String,
        } => "response decode failed: {message}",
    }
}

impl StoreFailure {
    /// HTTP status carried by the failure, when the API answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Loading the user list failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to fetch users: {cause}")]
pub struct FetchError {
    cause: StoreFailure,
}

impl FetchError {
    /// Wrap a store failure.
    #[must_use]
    pub const fn new(cause: StoreFailure) -> Self {
        Self { cause }
    }

    /// Underlying failure.
    pub fn cause(&self) -> &StoreFailure {
        &self.cause
    }
}

impl From<StoreFailure> for FetchError {
    fn from(cause: StoreFailure) -> Self {
        Self::new(cause)
    }
}

/// Mutating operations offered by the user API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// `POST /users`
    Create,
    /// `PUT /users/{id}`
    Update,
    /// `DELETE /users/{id}`
    Delete,
}

impl MutationKind {
    /// Lower-case verb used in logs and messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A create, update, or delete call failed.
///
/// Carries what was attempted so the caller can report or retry it: the
/// target id for update and delete, and the submitted payload for create and
/// update.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to {operation} user{}: {cause}", target_suffix(.target.as_ref()))]
pub struct MutationError {
    operation: MutationKind,
    target: Option<UserId>,
    payload: Option<UserDraft>,
    cause: StoreFailure,
}

fn target_suffix(target: Option<&UserId>) -> String {
    target.map(|id| format!(" {id}")).unwrap_or_default()
}

impl MutationError {
    /// A failed `create` of `payload`.
    pub fn create(payload: UserDraft, cause: StoreFailure) -> Self {
        Self {
            operation: MutationKind::Create,
            target: None,
            payload: Some(payload),
            cause,
        }
    }

    /// A failed `update` of `target` with `payload`.
    pub fn update(target: UserId, payload: UserDraft, cause: StoreFailure) -> Self {
        Self {
            operation: MutationKind::Update,
            target: Some(target),
            payload: Some(payload),
            cause,
        }
    }

    /// A failed `delete` of `target`.
    pub fn delete(target: UserId, cause: StoreFailure) -> Self {
        Self {
            operation: MutationKind::Delete,
            target: Some(target),
            payload: None,
            cause,
        }
    }

    /// Which operation failed.
    pub fn operation(&self) -> MutationKind {
        self.operation
    }

    /// Record the operation targeted, if it had one.
    pub fn target(&self) -> Option<&UserId> {
        self.target.as_ref()
    }

    /// Payload that was submitted, if any.
    pub fn payload(&self) -> Option<&UserDraft> {
        self.payload.as_ref()
    }

    /// Underlying failure.
    pub fn cause(&self) -> &StoreFailure {
        &self.cause
    }
}

/// Any failure a dashboard operation reports to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// Loading the list failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// A mutation failed.
    #[error(transparent)]
    Mutation(#[from] MutationError),
}

impl DashboardError {
    /// Short message suitable for a user-facing notification.
    ///
    /// A delete the API answered with a rejecting status reads differently
    /// from one that never got an answer.
    ///
    /// # Examples
    /// ```
    /// use dashboard::domain::{DashboardError, FetchError, StoreFailure};
    ///
    /// let err = DashboardError::from(FetchError::new(StoreFailure::transport("offline")));
    /// assert_eq!(err.user_message(), "Failed to fetch user data. Please try again later.");
    /// ```
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "Failed to fetch user data. Please try again later.",
            Self::Mutation(err) => match (err.operation(), err.cause()) {
                (MutationKind::Create, _) => "Failed to create new user.",
                (MutationKind::Update, _) => "Failed to update user details.",
                (MutationKind::Delete, StoreFailure::UnexpectedStatus { .. }) => {
                    "Error deleting user."
                }
                (MutationKind::Delete, _) => "Failed to delete user.",
            },
        }
    }
}
