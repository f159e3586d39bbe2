//! List controller: owns the record collection and routes UI actions.
//!
//! The collection is only ever replaced by a fresh `list()` result; no
//! mutation is applied locally. Each reload takes a ticket when it is issued
//! and a settled reload is applied only if no later-issued reload has been
//! applied already, so a slow response cannot overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info};

use super::form::{FormController, FormMode, SubmitOutcome};
use super::ports::UserStore;
use super::{
    FetchError, FieldErrors, MutationError, MutationReport, Notice, User, UserDetail, UserId,
};

/// What the list area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// No list has been fetched successfully yet.
    Loading,
    /// The last fetched records, in API order.
    Table(Vec<User>),
}

/// Result of submitting the editor through the list controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorSubmission {
    /// The editor was not open.
    Closed,
    /// A submission was already pending.
    InFlight,
    /// Validation failed; the editor stays open.
    Invalid(FieldErrors),
    /// The API accepted the change; the editor is closed.
    Saved(MutationReport),
}

#[derive(Debug, Default)]
struct ListState {
    records: Option<Vec<User>>,
    viewing: Option<User>,
    applied_refresh: u64,
}

/// Controller behind the user table.
pub struct ListController<S> {
    store: Arc<S>,
    editor: FormController<S>,
    state: Mutex<ListState>,
    issued_refresh: AtomicU64,
}

impl<S> ListController<S> {
    /// Create a controller with no records loaded.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            editor: FormController::new(Arc::clone(&store)),
            store,
            state: Mutex::new(ListState::default()),
            issued_refresh: AtomicU64::new(0),
        }
    }

    fn state(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The create/edit form.
    pub fn editor(&self) -> &FormController<S> {
        &self.editor
    }

    /// Records from the last applied fetch, if any.
    pub fn records(&self) -> Option<Vec<User>> {
        self.state().records.clone()
    }

    /// What the list area should render.
    pub fn list_view(&self) -> ListView {
        match &self.state().records {
            Some(records) => ListView::Table(records.clone()),
            None => ListView::Loading,
        }
    }

    /// Look up a loaded record by id.
    pub fn find(&self, id: &UserId) -> Option<User> {
        self.state()
            .records
            .as_ref()
            .and_then(|records| records.iter().find(|user| user.id() == id).cloned())
    }

    /// Open the editor in create mode.
    pub fn request_create(&self) {
        self.editor.open(FormMode::Create);
    }

    /// Open the editor on `user`.
    pub fn request_edit(&self, user: User) {
        self.editor.open(FormMode::Edit(user));
    }

    /// Close the editor without touching the collection.
    pub fn close_editor(&self) {
        self.editor.close();
    }

    /// Show `user` in the detail view. Independent of the editor.
    pub fn request_view(&self, user: User) {
        self.state().viewing = Some(user);
    }

    /// The detail view contents, if open.
    pub fn viewing(&self) -> Option<UserDetail> {
        self.state().viewing.as_ref().map(UserDetail::from)
    }

    /// Close the detail view.
    pub fn close_view(&self) {
        self.state().viewing = None;
    }
}

impl<S> ListController<S>
where
    S: UserStore,
{
    /// Fetch the list and replace the held records.
    ///
    /// On failure the held records are left as they were; before the first
    /// success that means the list keeps showing [`ListView::Loading`].
    pub async fn load(&self) -> Result<(), FetchError> {
        self.refresh().await
    }

    async fn refresh(&self) -> Result<(), FetchError> {
        let ticket = self.issued_refresh.fetch_add(1, Ordering::Relaxed) + 1;
        let records = self.store.list().await.map_err(|err| {
            error!(ticket, error = %err, "user list fetch failed");
            err
        })?;

        let mut state = self.state();
        if ticket > state.applied_refresh {
            debug!(ticket, count = records.len(), "applying user list");
            state.applied_refresh = ticket;
            state.records = Some(records);
        } else {
            debug!(
                ticket,
                applied = state.applied_refresh,
                "discarding stale user list"
            );
        }
        Ok(())
    }

    /// Submit the editor; on success close it and reload the list once.
    pub async fn submit_editor(&self) -> Result<EditorSubmission, MutationError> {
        let outcome = self.editor.submit().await.map_err(|err| {
            error!(
                operation = err.operation().as_str(),
                error = %err,
                "user mutation failed"
            );
            err
        })?;

        let (notice, user) = match outcome {
            SubmitOutcome::Closed => return Ok(EditorSubmission::Closed),
            SubmitOutcome::InFlight => return Ok(EditorSubmission::InFlight),
            SubmitOutcome::Invalid(errors) => return Ok(EditorSubmission::Invalid(errors)),
            SubmitOutcome::Created(user) => (Notice::UserCreated, user),
            SubmitOutcome::Updated(user) => (Notice::UserUpdated, user),
        };

        self.editor.close();
        info!(user_id = %user.id(), notice = notice.message(), "user saved");
        let refresh = self.refresh().await;
        Ok(EditorSubmission::Saved(MutationReport {
            notice,
            user: Some(user),
            refresh,
        }))
    }

    /// Delete record `id` and reload the list.
    ///
    /// The id is sent as given, whether or not it appears in the held
    /// records. On failure the held records are left untouched.
    pub async fn delete(&self, id: &UserId) -> Result<MutationReport, MutationError> {
        self.store.delete(id).await.map_err(|err| {
            error!(user_id = %id, error = %err, "user delete failed");
            err
        })?;

        info!(user_id = %id, "user deleted");
        let refresh = self.refresh().await;
        Ok(MutationReport {
            notice: Notice::UserDeleted,
            user: None,
            refresh,
        })
    }
}
