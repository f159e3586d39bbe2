//! Test utilities for the dashboard crate.
//!
//! This module provides user store doubles and a log capture shared by unit
//! tests (in `src/`) and integration tests (in `tests/`). It is only compiled
//! for tests or with the `test-support` feature.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::{Semaphore, oneshot};
use tracing::Level;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

use crate::domain::ports::UserStore;
use crate::domain::{FetchError, MutationError, StoreFailure, User, UserDraft, UserId};

/// Number of calls a double has received, per operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    /// `list` calls.
    pub list: usize,
    /// `create` calls.
    pub create: usize,
    /// `update` calls.
    pub update: usize,
    /// `delete` calls.
    pub delete: usize,
}

#[derive(Debug, Default)]
struct InMemoryState {
    users: Vec<User>,
    next_id: u64,
    calls: CallCounts,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Plain-text log lines emitted on the current thread while installed.
///
/// Install with [`CapturedLogs::install`] and keep the guard alive for the
/// span of code under observation. Only `#[tokio::test]` (current-thread)
/// runtimes keep every event on the capturing thread.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Route `DEBUG` and above on this thread into a fresh capture.
    pub fn install() -> (Self, DefaultGuard) {
        let logs = Self::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(Level::DEBUG)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (logs, guard)
    }

    /// Captured lines.
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&lock(&self.0))
            .lines()
            .map(str::to_owned)
            .collect()
    }

    /// Captured lines logged at `WARN` or `ERROR`.
    pub fn problems(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.contains(" WARN ") || line.contains(" ERROR "))
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        lock(&self.0).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// In-memory user API that behaves like the remote service.
///
/// Assigns sequential numeric ids on create and answers 404 for unknown ids
/// on update and delete.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    state: Mutex<InMemoryState>,
}

impl InMemoryUserStore {
    /// Start with the given records.
    pub fn with_users(users: Vec<User>) -> Self {
        let next_id = users
            .iter()
            .filter_map(|user| user.id().as_ref().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            state: Mutex::new(InMemoryState {
                users,
                next_id,
                calls: CallCounts::default(),
            }),
        }
    }

    /// Calls received so far.
    pub fn calls(&self) -> CallCounts {
        lock(&self.state).calls
    }

    /// Records currently held.
    pub fn users(&self) -> Vec<User> {
        lock(&self.state).users.clone()
    }

    fn not_found(id: &UserId) -> StoreFailure {
        StoreFailure::unexpected_status(404_u16, format!("\"{id} not found\""))
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list(&self) -> Result<Vec<User>, FetchError> {
        let mut state = lock(&self.state);
        state.calls.list += 1;
        Ok(state.users.clone())
    }

    async fn create(&self, draft: &UserDraft) -> Result<User, MutationError> {
        let mut state = lock(&self.state);
        state.calls.create += 1;
        state.next_id += 1;
        let id = UserId::new(state.next_id.to_string()).map_err(|err| {
            MutationError::create(draft.clone(), StoreFailure::decode(err.to_string()))
        })?;
        let user = User::new(id, draft.clone());
        state.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: &UserId, draft: &UserDraft) -> Result<User, MutationError> {
        let mut state = lock(&self.state);
        state.calls.update += 1;
        let Some(slot) = state.users.iter_mut().find(|user| user.id() == id) else {
            return Err(MutationError::update(
                id.clone(),
                draft.clone(),
                Self::not_found(id),
            ));
        };
        *slot = User::new(id.clone(), draft.clone());
        Ok(slot.clone())
    }

    async fn delete(&self, id: &UserId) -> Result<(), MutationError> {
        let mut state = lock(&self.state);
        state.calls.delete += 1;
        let before = state.users.len();
        state.users.retain(|user| user.id() != id);
        if state.users.len() == before {
            return Err(MutationError::delete(id.clone(), Self::not_found(id)));
        }
        Ok(())
    }
}

/// Wraps [`InMemoryUserStore`] so tests control when calls settle.
///
/// Mutations wait for a permit granted through [`GatedUserStore::release`].
/// List calls answer from scripted replies in the order they were scripted,
/// falling back to the inner store once the script is exhausted.
#[derive(Debug)]
pub struct GatedUserStore {
    inner: InMemoryUserStore,
    gate: Semaphore,
    scripted_lists: Mutex<VecDeque<oneshot::Receiver<Vec<User>>>>,
}

impl GatedUserStore {
    /// Gate `inner` with no permits granted.
    pub fn new(inner: InMemoryUserStore) -> Self {
        Self {
            inner,
            gate: Semaphore::new(0),
            scripted_lists: Mutex::new(VecDeque::new()),
        }
    }

    /// Let `calls` pending or future mutations proceed.
    pub fn release(&self, calls: usize) {
        self.gate.add_permits(calls);
    }

    /// Queue a list reply; the matching `list` call settles when the returned
    /// sender fires.
    pub fn script_list(&self) -> oneshot::Sender<Vec<User>> {
        let (reply, pending) = oneshot::channel();
        lock(&self.scripted_lists).push_back(pending);
        reply
    }

    /// Calls received so far.
    pub fn calls(&self) -> CallCounts {
        self.inner.calls()
    }

    async fn wait_for_release(&self) {
        if let Ok(permit) = self.gate.acquire().await {
            permit.forget();
        }
    }
}

#[async_trait]
impl UserStore for GatedUserStore {
    async fn list(&self) -> Result<Vec<User>, FetchError> {
        let scripted = lock(&self.scripted_lists).pop_front();
        let Some(pending) = scripted else {
            return self.inner.list().await;
        };
        lock(&self.inner.state).calls.list += 1;
        pending
            .await
            .map_err(|_| FetchError::new(StoreFailure::transport("scripted reply dropped")))
    }

    async fn create(&self, draft: &UserDraft) -> Result<User, MutationError> {
        self.wait_for_release().await;
        self.inner.create(draft).await
    }

    async fn update(&self, id: &UserId, draft: &UserDraft) -> Result<User, MutationError> {
        self.wait_for_release().await;
        self.inner.update(id, draft).await
    }

    async fn delete(&self, id: &UserId) -> Result<(), MutationError> {
        self.wait_for_release().await;
        self.inner.delete(id).await
    }
}
