//! Behavioural tests for the dashboard flows.
//!
//! Each scenario drives one CLI command through the list controller against
//! the in-memory user API and inspects the rendered text.
#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for concise failure messages"
)]

use std::sync::{Arc, Mutex};

use dashboard::domain::{ListController, User, UserDraft, UserId};
use dashboard::inbound::cli::render::LOADING;
use dashboard::inbound::cli::{CliError, Command, FieldArgs, RunOutcome, execute};
use dashboard::test_support::InMemoryUserStore;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;

struct TestContext {
    runtime: Runtime,
    store: Arc<InMemoryUserStore>,
    controller: ListController<InMemoryUserStore>,
    list_calls_before: usize,
    output: String,
    outcome: Option<Result<RunOutcome, CliError>>,
}

type SharedContext = Arc<Mutex<TestContext>>;

fn ann_lee() -> User {
    User::new(
        UserId::new("5").expect("valid id"),
        UserDraft {
            first_name: "Ann".to_owned(),
            last_name: "Lee".to_owned(),
            email: "ann@example.com".to_owned(),
            department: "Engineering".to_owned(),
        },
    )
}

fn context_with(users: Vec<User>) -> TestContext {
    let store = Arc::new(InMemoryUserStore::with_users(users));
    TestContext {
        runtime: Runtime::new().expect("tokio runtime should initialize"),
        controller: ListController::new(Arc::clone(&store)),
        store,
        list_calls_before: 0,
        output: String::new(),
        outcome: None,
    }
}

fn run(world: &SharedContext, command: Command) {
    let mut ctx = world.lock().expect("context lock");
    ctx.list_calls_before = ctx.store.calls().list;
    let mut out = Vec::new();
    let outcome = ctx
        .runtime
        .block_on(execute(&ctx.controller, command, &mut out));
    ctx.output = String::from_utf8(out).expect("rendered text is UTF-8");
    ctx.outcome = Some(outcome);
}

/// Cells of every rendered table row below the header rule.
fn table_rows(output: &str) -> Vec<Vec<String>> {
    output
        .lines()
        .skip_while(|line| !line.starts_with('-'))
        .skip(1)
        .map(|line| line.split('|').map(|cell| cell.trim().to_owned()).collect())
        .collect()
}

fn completed(ctx: &TestContext) {
    let outcome = ctx.outcome.as_ref().expect("a command should have run");
    assert!(
        matches!(outcome, Ok(RunOutcome::Completed)),
        "expected completed command, got {outcome:?}"
    );
}

#[fixture]
fn world() -> SharedContext {
    Arc::new(Mutex::new(context_with(Vec::new())))
}

#[given("the API holds no users")]
fn the_api_holds_no_users(world: SharedContext) {
    *world.lock().expect("context lock") = context_with(Vec::new());
}

#[given("the API holds the user Ann Lee")]
fn the_api_holds_the_user_ann_lee(world: SharedContext) {
    *world.lock().expect("context lock") = context_with(vec![ann_lee()]);
}

#[when("the dashboard lists users")]
fn the_dashboard_lists_users(world: SharedContext) {
    run(&world, Command::List);
}

#[when("a new user is submitted without an email")]
fn a_new_user_is_submitted_without_an_email(world: SharedContext) {
    run(
        &world,
        Command::Create(FieldArgs {
            first_name: Some("Cy".to_owned()),
            last_name: Some("Dale".to_owned()),
            email: None,
            department: Some("Support".to_owned()),
        }),
    );
}

#[when("a complete new user is submitted")]
fn a_complete_new_user_is_submitted(world: SharedContext) {
    run(
        &world,
        Command::Create(FieldArgs {
            first_name: Some("Cy".to_owned()),
            last_name: Some("Dale".to_owned()),
            email: Some("cy@example.com".to_owned()),
            department: Some("Support".to_owned()),
        }),
    );
}

#[when("the user Ann Lee is deleted")]
fn the_user_ann_lee_is_deleted(world: SharedContext) {
    run(
        &world,
        Command::Delete {
            id: ann_lee().id().clone(),
        },
    );
}

#[then("the table shows {count} rows")]
fn the_table_shows_rows(world: SharedContext, count: usize) {
    let ctx = world.lock().expect("context lock");
    completed(&ctx);
    assert_eq!(table_rows(&ctx.output).len(), count, "output:\n{}", ctx.output);
}

#[then("the loading placeholder is not shown")]
fn the_loading_placeholder_is_not_shown(world: SharedContext) {
    let ctx = world.lock().expect("context lock");
    assert!(!ctx.output.contains(LOADING));
}

#[then("the row for Ann Lee shows every field")]
fn the_row_for_ann_lee_shows_every_field(world: SharedContext) {
    let ctx = world.lock().expect("context lock");
    let rows = table_rows(&ctx.output);
    let row = rows.first().expect("one row should render");
    assert_eq!(
        row,
        &["5", "Ann", "Lee", "ann@example.com", "Engineering"].map(str::to_owned)
    );
}

#[then("the editor reports {message}")]
fn the_editor_reports(world: SharedContext, message: String) {
    let expected = message.trim_matches('"');
    let ctx = world.lock().expect("context lock");
    let outcome = ctx.outcome.as_ref().expect("a command should have run");
    assert!(
        matches!(outcome, Ok(RunOutcome::Rejected)),
        "expected rejected input, got {outcome:?}"
    );
    assert!(
        ctx.output.lines().any(|line| line.ends_with(expected)),
        "missing {expected:?} in:\n{}",
        ctx.output
    );
}

#[then("no create request reaches the API")]
fn no_create_request_reaches_the_api(world: SharedContext) {
    let ctx = world.lock().expect("context lock");
    assert_eq!(ctx.store.calls().create, 0);
    assert!(ctx.store.users().is_empty());
}

#[then("the notice reads {notice}")]
fn the_notice_reads(world: SharedContext, notice: String) {
    let expected = notice.trim_matches('"');
    let ctx = world.lock().expect("context lock");
    completed(&ctx);
    assert!(
        ctx.output.lines().any(|line| line == expected),
        "missing notice {expected:?} in:\n{}",
        ctx.output
    );
}

#[then("the output opens with the heading {heading}")]
fn the_output_opens_with_the_heading(world: SharedContext, heading: String) {
    let expected = heading.trim_matches('"');
    let ctx = world.lock().expect("context lock");
    assert_eq!(ctx.output.lines().next(), Some(expected));
}

#[then("the API received {count} list requests after the change")]
fn the_api_received_list_requests(world: SharedContext, count: usize) {
    let ctx = world.lock().expect("context lock");
    assert_eq!(ctx.store.calls().list - ctx.list_calls_before, count);
}

#[scenario(
    path = "tests/features/user_dashboard.feature",
    name = "Empty list renders a table without rows"
)]
fn empty_list_renders_a_table_without_rows(world: SharedContext) {
    drop(world);
}

#[scenario(
    path = "tests/features/user_dashboard.feature",
    name = "A single record renders one matching row"
)]
fn a_single_record_renders_one_matching_row(world: SharedContext) {
    drop(world);
}

#[scenario(
    path = "tests/features/user_dashboard.feature",
    name = "Creating a user without an email is rejected"
)]
fn creating_a_user_without_an_email_is_rejected(world: SharedContext) {
    drop(world);
}

#[scenario(
    path = "tests/features/user_dashboard.feature",
    name = "Creating a user reloads the list once"
)]
fn creating_a_user_reloads_the_list_once(world: SharedContext) {
    drop(world);
}

#[scenario(
    path = "tests/features/user_dashboard.feature",
    name = "Deleting a user removes its row"
)]
fn deleting_a_user_removes_its_row(world: SharedContext) {
    drop(world);
}
