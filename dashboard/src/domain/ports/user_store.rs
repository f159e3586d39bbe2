//! Driven port for the remote user API.
//!
//! The domain owns the contract: which calls exist, which outcomes count as
//! success, and the error each failure maps to. Adapters own transport.

use async_trait::async_trait;

use crate::domain::{FetchError, MutationError, User, UserDraft, UserId};

/// Port for reading and mutating user records held by the remote API.
///
/// Every call is attempted exactly once; implementations must not retry or
/// cache.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch every user record.
    async fn list(&self) -> Result<Vec<User>, FetchError>;

    /// Create a record from `draft`; the server assigns the id.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use dashboard::domain::{UserDraft, ports::UserStore};
    ///
    /// let created = store.create(&draft).await?;
    /// assert_eq!(created.email(), draft.email);
    /// # Ok::<(), dashboard::domain::MutationError>(())
    /// ```
    async fn create(&self, draft: &UserDraft) -> Result<User, MutationError>;

    /// Replace the editable fields of record `id`.
    async fn update(&self, id: &UserId, draft: &UserDraft) -> Result<User, MutationError>;

    /// Delete record `id`.
    async fn delete(&self, id: &UserId) -> Result<(), MutationError>;
}
