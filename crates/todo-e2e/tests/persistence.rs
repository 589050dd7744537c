//! Persistence
//!
//! Run with: cargo test -p todo-e2e --test persistence

#[macro_use]
mod common;

use todo_e2e::prelude::*;

#[tokio::test]
async fn should_persist_its_data() -> TodoResult<()> {
    let fixture = require_fixture!();
    let page = fixture.setup().await?;
    let items = &DEFAULT_TODOS[..2];

    page.create_default_todos(items).await?;
    page.toggle_todo_item(0).await?;
    page.check_saved_todo_items(items).await?;
    page.verify_todo_item_completed(0).await?;
    page.verify_todo_item_not_completed(1).await?;
    page.check_number_of_completed_todos_in_local_storage(1)
        .await?;

    let second = fixture.open_page_in_same_context(&page).await?;
    second.check_saved_todo_items(items).await?;
    second.verify_todo_item_completed(0).await?;
    second.verify_todo_item_not_completed(1).await?;
    second.verify_todo_count(1).await
}

#[tokio::test]
async fn second_page_sees_items_created_by_the_first() -> TodoResult<()> {
    let fixture = require_fixture!();
    let page = fixture.setup().await?;
    let items = ["water the plants", "call mum"];

    page.create_default_todos(&items).await?;

    let second = fixture.open_page_in_same_context(&page).await?;
    second.check_saved_todo_items(&items).await?;
    assert_eq!(second.saved_todos().await?, page.saved_todos().await?);
    Ok(())
}

#[tokio::test]
async fn a_new_test_page_starts_empty() -> TodoResult<()> {
    let fixture = require_fixture!();
    let first = common::page_with_default_todos(&fixture).await?;
    first.check_number_of_todos_in_local_storage(3).await?;

    let fresh = fixture.setup().await?;
    fresh.check_number_of_todos_in_local_storage(0).await?;
    fresh.verify_main_and_footer_hidden().await
}
