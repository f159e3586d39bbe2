//! Domain primitives, controllers and ports.
//!
//! Purpose: Define the user record model, draft validation, and the form and
//! list controllers that drive the dashboard. Nothing here performs I/O
//! directly; the remote API is reached through [`ports::UserStore`].
//!
//! Public surface:
//! - User, UserId: server-held records.
//! - UserDraft, DraftField, FieldErrors, validate_draft: form input.
//! - FormController, ListController: UI state machines.
//! - UserDetail: read-only detail projection.
//! - FetchError, MutationError, DashboardError: failure taxonomy.

pub mod detail;
pub mod draft;
pub mod error;
pub mod form;
pub mod list;
pub mod notice;
pub mod ports;
pub mod user;

pub use self::detail::UserDetail;
pub use self::draft::{
    DEPARTMENT_REQUIRED, DraftField, EMAIL_INVALID, EMAIL_REQUIRED, FIRST_NAME_REQUIRED,
    FieldErrors, LAST_NAME_REQUIRED, UserDraft, is_valid_email, validate_draft,
};
pub use self::error::{DashboardError, FetchError, MutationError, MutationKind, StoreFailure};
pub use self::form::{FormController, FormMode, SubmitOutcome};
pub use self::list::{EditorSubmission, ListController, ListView};
pub use self::notice::{MutationReport, Notice};
pub use self::user::{User, UserId, UserValidationError};
