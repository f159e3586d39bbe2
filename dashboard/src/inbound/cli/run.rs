//! Drive one command through the list controller and render the result.

use std::io::{self, Write};

use thiserror::Error;
use tracing::info;

use super::{Command, FieldArgs, render};
use crate::domain::ports::UserStore;
use crate::domain::{DashboardError, EditorSubmission, ListController, User, UserId};

/// How a command finished when no error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The action completed and its result was rendered.
    Completed,
    /// The editor rejected the input; field errors were rendered.
    Rejected,
}

/// Failures that abort a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The user API call failed.
    #[error(transparent)]
    Dashboard(#[from] DashboardError),
    /// The requested record is not in the loaded list.
    #[error("user {0} not found")]
    NotFound(UserId),
    /// Rendering output failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Short message for the person at the terminal.
    pub fn user_message(&self) -> String {
        match self {
            Self::Dashboard(err) => err.user_message().to_owned(),
            other => other.to_string(),
        }
    }
}

/// Run `command` against `controller`, writing views to `out`.
///
/// # Errors
///
/// Returns [`CliError::Dashboard`] when a fetch or mutation fails,
/// [`CliError::NotFound`] when `view` or `edit` names an id missing from the
/// list, and [`CliError::Io`] when `out` cannot be written.
pub async fn execute<S>(
    controller: &ListController<S>,
    command: Command,
    out: &mut impl Write,
) -> Result<RunOutcome, CliError>
where
    S: UserStore,
{
    match command {
        Command::List => {
            let loaded = controller.load().await;
            render::list(out, &controller.list_view())?;
            loaded.map_err(DashboardError::from)?;
        }
        Command::View { id } => {
            let user = load_and_find(controller, id).await?;
            controller.request_view(user);
            if let Some(detail) = controller.viewing() {
                render::detail(out, &detail)?;
            }
            controller.close_view();
        }
        Command::Create(fields) => {
            controller.request_create();
            return submit(controller, &fields, out).await;
        }
        Command::Edit { id, fields } => {
            let user = load_and_find(controller, id).await?;
            controller.request_edit(user);
            return submit(controller, &fields, out).await;
        }
        Command::Delete { id } => {
            let report = controller.delete(&id).await.map_err(DashboardError::from)?;
            render::report(out, &report)?;
            render::list(out, &controller.list_view())?;
        }
    }
    Ok(RunOutcome::Completed)
}

async fn load_and_find<S>(controller: &ListController<S>, id: UserId) -> Result<User, CliError>
where
    S: UserStore,
{
    controller.load().await.map_err(DashboardError::from)?;
    controller.find(&id).ok_or(CliError::NotFound(id))
}

async fn submit<S>(
    controller: &ListController<S>,
    fields: &FieldArgs,
    out: &mut impl Write,
) -> Result<RunOutcome, CliError>
where
    S: UserStore,
{
    if let Some(mode) = controller.editor().mode() {
        render::editor_title(out, &mode)?;
    }
    for (field, value) in fields.edits() {
        controller.editor().set_field(field, value);
    }

    let submission = controller
        .submit_editor()
        .await
        .map_err(DashboardError::from)?;
    match submission {
        EditorSubmission::Saved(report) => {
            render::report(out, &report)?;
            render::list(out, &controller.list_view())?;
            Ok(RunOutcome::Completed)
        }
        EditorSubmission::Invalid(errors) => {
            info!(failures = errors.len(), "editor input rejected");
            render::field_errors(out, &errors)?;
            controller.close_editor();
            Ok(RunOutcome::Rejected)
        }
        EditorSubmission::Closed | EditorSubmission::InFlight => Ok(RunOutcome::Rejected),
    }
}
