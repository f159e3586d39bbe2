//! Plain-text rendering of dashboard views.
//!
//! Every function writes to a caller-supplied sink so the binary can target
//! stdout while tests capture into a `Vec<u8>`.

use std::io::{self, Write};

use crate::domain::{
    DashboardError, FieldErrors, FormMode, ListView, MutationReport, User, UserDetail,
};

/// Shown while no list has been fetched.
pub const LOADING: &str = "Loading...";

const COLUMNS: [&str; 5] = ["ID", "First Name", "Last Name", "Email", "Department"];

fn cells(user: &User) -> [&str; 5] {
    [
        user.id().as_ref(),
        user.first_name(),
        user.last_name(),
        user.email(),
        user.department(),
    ]
}

/// Render the list area: a placeholder before the first fetch, otherwise a
/// table with one row per record in API order.
pub fn list(out: &mut impl Write, view: &ListView) -> io::Result<()> {
    let ListView::Table(users) = view else {
        return writeln!(out, "{LOADING}");
    };

    let mut widths = COLUMNS.map(str::len);
    for user in users {
        for (width, cell) in widths.iter_mut().zip(cells(user)) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(out, COLUMNS, widths)?;
    let rule = widths.map(|width| "-".repeat(width));
    write_row(out, rule.each_ref().map(String::as_str), widths)?;
    for user in users {
        write_row(out, cells(user), widths)?;
    }
    Ok(())
}

fn write_row(out: &mut impl Write, row: [&str; 5], widths: [usize; 5]) -> io::Result<()> {
    let line = row
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    writeln!(out, "{}", line.trim_end())
}

/// Render the detail view.
pub fn detail(out: &mut impl Write, detail: &UserDetail) -> io::Result<()> {
    writeln!(out, "Full Name: {}", detail.full_name)?;
    writeln!(out, "Email: {}", detail.email)?;
    writeln!(out, "Department: {}", detail.department)
}

/// Render the heading of the open editor.
pub fn editor_title(out: &mut impl Write, mode: &FormMode) -> io::Result<()> {
    writeln!(out, "{}", mode.title())
}

/// Render one line per failing field, in form order.
pub fn field_errors(out: &mut impl Write, errors: &FieldErrors) -> io::Result<()> {
    for (field, message) in errors.iter() {
        writeln!(out, "{}: {message}", field.label())?;
    }
    Ok(())
}

/// Render the notice for a confirmed mutation and any refresh failure.
pub fn report(out: &mut impl Write, report: &MutationReport) -> io::Result<()> {
    writeln!(out, "{}", report.notice)?;
    if let Err(err) = &report.refresh {
        writeln!(out, "{}", DashboardError::from(err.clone()).user_message())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Rendering snapshots for each view.

    use super::*;
    use crate::domain::{
        FetchError, Notice, StoreFailure, UserDraft, UserId, validate_draft,
    };
    use rstest::rstest;

    fn ann() -> User {
        User::new(
            UserId::new("5").expect("id"),
            UserDraft {
                first_name: "Ann".to_owned(),
                last_name: "Lee".to_owned(),
                email: "a@b.com".to_owned(),
                department: "Eng".to_owned(),
            },
        )
    }

    fn rendered(render: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        render(&mut out).expect("writing to a Vec cannot fail");
        String::from_utf8(out).expect("rendered text is UTF-8")
    }

    #[rstest]
    fn loading_view_renders_placeholder_only() {
        let text = rendered(|out| list(out, &ListView::Loading));

        assert_eq!(text, "Loading...\n");
    }

    #[rstest]
    fn empty_table_renders_header_without_rows() {
        let text = rendered(|out| list(out, &ListView::Table(Vec::new())));

        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("ID | First Name"));
        assert!(!text.contains(LOADING));
    }

    #[rstest]
    fn table_row_lists_every_field() {
        let text = rendered(|out| list(out, &ListView::Table(vec![ann()])));

        let row = text.lines().nth(2).expect("one data row");
        let cells = row.split('|').map(str::trim).collect::<Vec<_>>();
        assert_eq!(cells, ["5", "Ann", "Lee", "a@b.com", "Eng"]);
    }

    #[rstest]
    fn detail_view_shows_full_name() {
        let text = rendered(|out| detail(out, &UserDetail::from(&ann())));

        assert_eq!(
            text,
            "Full Name: Ann Lee\nEmail: a@b.com\nDepartment: Eng\n"
        );
    }

    #[rstest]
    fn field_errors_follow_form_order() {
        let errors = validate_draft(&UserDraft {
            first_name: "Ann".to_owned(),
            email: "nope".to_owned(),
            ..UserDraft::default()
        });

        let text = rendered(|out| field_errors(out, &errors));

        assert_eq!(
            text,
            "Last Name: Last Name is required\n\
             Email: Invalid email format\n\
             Department Name: Department is required\n"
        );
    }

    #[rstest]
    #[case::create(FormMode::Create, "Create New User\n")]
    #[case::edit(FormMode::Edit(ann()), "Edit User Data\n")]
    fn editor_title_names_the_mode(#[case] mode: FormMode, #[case] expected: &str) {
        assert_eq!(rendered(|out| editor_title(out, &mode)), expected);
    }

    #[rstest]
    #[case::refreshed(Ok(()), "User deleted successfully!\n")]
    #[case::stale(
        Err(FetchError::new(StoreFailure::timeout("slow"))),
        "User deleted successfully!\nFailed to fetch user data. Please try again later.\n"
    )]
    fn report_mentions_failed_refresh(
        #[case] refresh: Result<(), FetchError>,
        #[case] expected: &str,
    ) {
        let report_value = MutationReport {
            notice: Notice::UserDeleted,
            user: None,
            refresh,
        };

        assert_eq!(rendered(|out| report(out, &report_value)), expected);
    }
}
