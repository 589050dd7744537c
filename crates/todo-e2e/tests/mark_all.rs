//! Mark all as completed
//!
//! Run with: cargo test -p todo-e2e --test mark_all

#[macro_use]
mod common;

use todo_e2e::prelude::*;

#[tokio::test]
async fn should_allow_me_to_mark_all_items_as_completed() -> TodoResult<()> {
    let fixture = require_fixture!();
    let page = common::page_with_default_todos(&fixture).await?;

    page.mark_all_as_complete().await?;
    page.verify_all_todos_completed().await?;
    page.check_number_of_completed_todos_in_local_storage(3).await
}

#[tokio::test]
async fn should_allow_me_to_clear_the_complete_state_of_all_items() -> TodoResult<()> {
    let fixture = require_fixture!();
    let page = common::page_with_default_todos(&fixture).await?;

    page.mark_all_as_complete().await?;
    page.un_mark_all_as_complete().await?;
    page.verify_no_todos_completed().await?;
    page.check_number_of_completed_todos_in_local_storage(0).await
}

#[tokio::test]
async fn complete_all_checkbox_should_update_state_when_items_are_completed_or_cleared(
) -> TodoResult<()> {
    let fixture = require_fixture!();
    let page = common::page_with_default_todos(&fixture).await?;

    page.mark_all_as_complete().await?;
    page.verify_toggle_all_checked().await?;
    page.check_number_of_completed_todos_in_local_storage(3)
        .await?;

    page.un_toggle_todo_item(0).await?;
    page.verify_toggle_all_not_checked().await?;

    page.toggle_todo_item(0).await?;
    page.check_number_of_completed_todos_in_local_storage(3)
        .await?;
    page.verify_toggle_all_checked().await
}
