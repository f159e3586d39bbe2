//! Create/edit form controller.
//!
//! Owns one draft at a time. The mode is an explicit variant so an edit form
//! can never exist without the record it edits.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use super::ports::UserStore;
use super::{DraftField, FieldErrors, MutationError, User, UserDraft, UserId, validate_draft};

/// Which kind of submission an open form performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    /// Submit creates a new record.
    Create,
    /// Submit updates the carried record.
    Edit(User),
}

impl FormMode {
    /// Heading shown above the form.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Create => "Create New User",
            Self::Edit(_) => "Edit User Data",
        }
    }

    /// Read-only id of the record being edited.
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::Create => None,
            Self::Edit(user) => Some(user.id()),
        }
    }
}

/// Result of a submit attempt that did not fail at the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No form is open; nothing was sent.
    Closed,
    /// A previous submission is still pending; nothing was sent.
    InFlight,
    /// Validation failed; the messages are also kept on the form.
    Invalid(FieldErrors),
    /// The API created this record.
    Created(User),
    /// The API updated this record.
    Updated(User),
}

#[derive(Debug, Default)]
struct FormState {
    mode: Option<FormMode>,
    draft: UserDraft,
    errors: FieldErrors,
    submitting: bool,
}

/// Controller for the create/edit form.
///
/// Methods take `&self` so the hosting view can keep handling events while a
/// submission is pending. State is only locked between suspension points.
pub struct FormController<S> {
    store: Arc<S>,
    state: Mutex<FormState>,
}

impl<S> FormController<S> {
    /// Create a closed form that submits through `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            state: Mutex::new(FormState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open the form, replacing whatever draft it held.
    ///
    /// Create mode starts from an empty draft; edit mode copies the record's
    /// fields. Errors are cleared in both cases.
    pub fn open(&self, mode: FormMode) {
        let mut state = self.state();
        state.draft = match &mode {
            FormMode::Create => UserDraft::default(),
            FormMode::Edit(user) => user.to_draft(),
        };
        state.errors = FieldErrors::default();
        state.mode = Some(mode);
    }

    /// Close the form, discarding the draft and its errors.
    pub fn close(&self) {
        let mut state = self.state();
        state.mode = None;
        state.draft = UserDraft::default();
        state.errors = FieldErrors::default();
    }

    /// Whether the form is open.
    pub fn is_open(&self) -> bool {
        self.state().mode.is_some()
    }

    /// Current mode, if open.
    pub fn mode(&self) -> Option<FormMode> {
        self.state().mode.clone()
    }

    /// Current draft, if open.
    pub fn draft(&self) -> Option<UserDraft> {
        let state = self.state();
        state.mode.as_ref().map(|_| state.draft.clone())
    }

    /// Errors from the last rejected submit attempt.
    pub fn errors(&self) -> FieldErrors {
        self.state().errors.clone()
    }

    /// Whether a submission is awaiting the API.
    pub fn is_submitting(&self) -> bool {
        self.state().submitting
    }

    /// Update one draft field. Existing errors are left as they are until
    /// the next submit attempt.
    ///
    /// Returns `false` when the form is closed and the edit was dropped.
    pub fn set_field(&self, field: DraftField, value: impl Into<String>) -> bool {
        let mut state = self.state();
        if state.mode.is_none() {
            debug!(field = field.as_str(), "ignoring edit on closed form");
            return false;
        }
        state.draft.set(field, value);
        true
    }
}

impl<S> FormController<S>
where
    S: UserStore,
{
    /// Validate and submit the draft.
    ///
    /// The submitting flag covers exactly the interval between dispatching
    /// the call and its result settling; a submit issued inside that interval
    /// returns [`SubmitOutcome::InFlight`] without touching the API. On
    /// failure the draft is kept so the user can retry.
    pub async fn submit(&self) -> Result<SubmitOutcome, MutationError> {
        let (mode, draft) = {
            let mut state = self.state();
            if state.submitting {
                debug!("submit ignored while a submission is pending");
                return Ok(SubmitOutcome::InFlight);
            }
            let Some(mode) = state.mode.clone() else {
                return Ok(SubmitOutcome::Closed);
            };

            let errors = validate_draft(&state.draft);
            if !errors.is_empty() {
                debug!(fields = errors.len(), "draft failed validation");
                state.errors = errors.clone();
                return Ok(SubmitOutcome::Invalid(errors));
            }

            state.errors = FieldErrors::default();
            state.submitting = true;
            (mode, state.draft.clone())
        };

        let result = match &mode {
            FormMode::Create => self
                .store
                .create(&draft)
                .await
                .map(SubmitOutcome::Created),
            FormMode::Edit(user) => self
                .store
                .update(user.id(), &draft)
                .await
                .map(SubmitOutcome::Updated),
        };

        self.state().submitting = false;
        result
    }
}
