//! Clear completed button
//!
//! Run with: cargo test -p todo-e2e --test clear_completed

#[macro_use]
mod common;

use todo_e2e::prelude::*;

#[tokio::test]
async fn should_display_the_correct_text() -> TodoResult<()> {
    let fixture = require_fixture!();
    let page = common::page_with_default_todos(&fixture).await?;

    page.toggle_todo_item(0).await?;
    page.verify_clear_completed_visible().await?;
    page.verify_clear_completed_text("Clear completed").await
}

#[tokio::test]
async fn should_remove_completed_items_when_clicked() -> TodoResult<()> {
    let fixture = require_fixture!();
    let page = common::page_with_default_todos(&fixture).await?;

    page.toggle_todo_item(1).await?;
    page.clear_completed().await?;
    page.check_saved_todo_items(&[DEFAULT_TODOS[0], DEFAULT_TODOS[2]])
        .await?;
    page.check_number_of_todos_in_local_storage(2).await
}

#[tokio::test]
async fn should_be_hidden_when_there_are_no_items_that_are_completed() -> TodoResult<()> {
    let fixture = require_fixture!();
    let page = common::page_with_default_todos(&fixture).await?;

    page.verify_clear_completed_hidden().await?;
    page.toggle_todo_item(0).await?;
    page.verify_clear_completed_visible().await?;
    page.clear_completed().await?;
    page.verify_clear_completed_hidden().await
}
