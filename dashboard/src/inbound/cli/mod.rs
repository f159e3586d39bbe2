//! Command-line front end.
//!
//! Each sub-command stands in for one page interaction: it loads the list,
//! routes a single action through the [`ListController`](crate::domain::ListController),
//! and renders the outcome as text.

use clap::{Args, Parser, Subcommand};

use crate::domain::{DraftField, UserId};

pub mod render;
mod run;

pub use run::{CliError, RunOutcome, execute};

/// `dashboard` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dashboard",
    about = "Browse and manage user records held by a remote REST API",
    version
)]
pub struct CliArgs {
    /// API root; `/users` is appended. Overrides `DASHBOARD_API_BASE_URL`.
    #[arg(long = "api-base-url", value_name = "url")]
    pub api_base_url: Option<String>,
    /// Request timeout in seconds. Overrides `DASHBOARD_TIMEOUT_SECS`.
    #[arg(long = "timeout-secs", value_name = "seconds")]
    pub timeout_secs: Option<u64>,
    /// Action to perform.
    #[command(subcommand)]
    pub command: Command,
}

/// Dashboard actions.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show every record as a table.
    List,
    /// Show one record in the detail view.
    View {
        /// Record id.
        #[arg(value_parser = parse_user_id)]
        id: UserId,
    },
    /// Submit the editor in create mode.
    Create(FieldArgs),
    /// Submit the editor on an existing record.
    Edit {
        /// Record id.
        #[arg(value_parser = parse_user_id)]
        id: UserId,
        /// Field values to change.
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a record by id.
    Delete {
        /// Record id.
        #[arg(value_parser = parse_user_id)]
        id: UserId,
    },
}

/// Editor field values. Omitted flags leave the field as the editor opened it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct FieldArgs {
    /// First name.
    #[arg(long = "first-name")]
    pub first_name: Option<String>,
    /// Last name.
    #[arg(long = "last-name")]
    pub last_name: Option<String>,
    /// Email address.
    #[arg(long)]
    pub email: Option<String>,
    /// Department name.
    #[arg(long)]
    pub department: Option<String>,
}

impl FieldArgs {
    /// Field edits in form order.
    pub fn edits(&self) -> impl Iterator<Item = (DraftField, &str)> {
        [
            (DraftField::FirstName, &self.first_name),
            (DraftField::LastName, &self.last_name),
            (DraftField::Email, &self.email),
            (DraftField::Department, &self.department),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|value| (field, value)))
    }
}

fn parse_user_id(raw: &str) -> Result<UserId, String> {
    UserId::new(raw).map_err(|err| err.to_string())
}
