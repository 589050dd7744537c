//! Editing
//!
//! Run with: cargo test -p todo-e2e --test editing

#[macro_use]
mod common;

use todo_e2e::prelude::*;

#[tokio::test]
async fn should_hide_other_controls_when_editing() -> TodoResult<()> {
    let fixture = require_fixture!();
    let page = common::page_with_default_todos(&fixture).await?;

    page.start_editing(1).await?;
    page.verify_edit_mode(1).await?;
    page.verify_todo_item_not_completed(0).await?;
    page.check_number_of_todos_in_local_storage(3).await
}

#[tokio::test]
async fn should_save_edits_on_blur() -> TodoResult<()> {
    let fixture = require_fixture!();
    let page = common::page_with_default_todos(&fixture).await?;

    page.edit_todo_item_and_blur(1, "buy some sausages").await?;
    page.check_saved_todo_items(&[DEFAULT_TODOS[0], "buy some sausages", DEFAULT_TODOS[2]])
        .await?;
    page.check_todos_in_local_storage("buy some sausages").await
}

#[tokio::test]
async fn should_trim_entered_text() -> TodoResult<()> {
    let fixture = require_fixture!();
    let page = common::page_with_default_todos(&fixture).await?;

    page.edit_todo_item(1, "    buy some sausages    ").await?;
    page.check_saved_todo_items(&[DEFAULT_TODOS[0], "buy some sausages", DEFAULT_TODOS[2]])
        .await?;
    page.check_todos_in_local_storage("buy some sausages").await?;

    let saved = page.saved_todos().await?;
    assert_eq!(saved[1].title, "buy some sausages");
    Ok(())
}

#[tokio::test]
async fn should_remove_the_item_if_an_empty_text_string_was_entered() -> TodoResult<()> {
    let fixture = require_fixture!();
    let page = common::page_with_default_todos(&fixture).await?;

    page.edit_todo_item(1, "").await?;
    page.check_saved_todo_items(&[DEFAULT_TODOS[0], DEFAULT_TODOS[2]])
        .await?;
    page.check_number_of_todos_in_local_storage(2).await
}

#[tokio::test]
async fn should_remove_the_item_if_only_whitespace_was_entered_on_blur() -> TodoResult<()> {
    let fixture = require_fixture!();
    let page = common::page_with_default_todos(&fixture).await?;

    page.edit_todo_item_and_blur(0, "     ").await?;
    page.check_saved_todo_items(&DEFAULT_TODOS[1..]).await
}

#[tokio::test]
async fn should_cancel_edits_on_escape() -> TodoResult<()> {
    let fixture = require_fixture!();
    let page = common::page_with_default_todos(&fixture).await?;

    page.cancel_edit(1, "buy some sausages").await?;
    page.check_saved_todo_items(&DEFAULT_TODOS).await?;
    page.check_number_of_todos_in_local_storage(3).await
}
