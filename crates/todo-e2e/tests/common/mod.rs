//! Shared setup for the feature suites.
//!
//! Suites drive the demo in Chromium unless `TODO_E2E_BACKEND` says
//! otherwise (`mock` only exists with the `mock` feature). When Chromium
//! cannot be launched, tests return early instead of failing.

#![allow(dead_code)]

use todo_e2e::prelude::*;

/// Launch the configured fixture, `None` when chromium is unavailable
pub async fn launch() -> Option<TodoFixture> {
    match TodoFixture::from_env().await {
        Ok(fixture) => Some(fixture),
        Err(TodoError::BrowserLaunchError { message }) => {
            eprintln!("Skipping: chromium not available ({message})");
            None
        }
        Err(e) => panic!("fixture could not start: {e}"),
    }
}

/// Fresh page object with the three default items already created
pub async fn page_with_default_todos(fixture: &TodoFixture) -> TodoResult<TodoPage> {
    let page = fixture.setup().await?;
    page.create_default_todos(&DEFAULT_TODOS).await?;
    page.check_number_of_todos_in_local_storage(DEFAULT_TODOS.len())
        .await?;
    Ok(page)
}

/// Launch the fixture or end the test early
macro_rules! require_fixture {
    () => {
        match common::launch().await {
            Some(fixture) => fixture,
            None => return Ok(()),
        }
    };
}
