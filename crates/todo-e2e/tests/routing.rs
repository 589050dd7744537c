//! Routing
//!
//! Run with: cargo test -p todo-e2e --test routing

#[macro_use]
mod common;

use todo_e2e::prelude::*;

async fn routed_page(fixture: &TodoFixture) -> TodoResult<TodoPage> {
    let page = common::page_with_default_todos(fixture).await?;
    page.check_todos_in_local_storage(DEFAULT_TODOS[0]).await?;
    page.toggle_todo_item(1).await?;
    page.check_number_of_completed_todos_in_local_storage(1)
        .await?;
    Ok(page)
}

#[tokio::test]
async fn should_allow_me_to_display_active_items() -> TodoResult<()> {
    let fixture = require_fixture!();
    let page = routed_page(&fixture).await?;

    page.filter_active().await?;
    page.verify_route(Filter::Active).await?;
    page.check_saved_todo_items(&[DEFAULT_TODOS[0], DEFAULT_TODOS[2]])
        .await
}

#[tokio::test]
async fn should_respect_the_back_button() -> TodoResult<()> {
    let fixture = require_fixture!();
    let page = routed_page(&fixture).await?;

    page.step("Showing all items", async {
        page.filter_all().await?;
        page.check_saved_todo_items(&DEFAULT_TODOS).await
    })
    .await?;

    page.step("Showing active items", async {
        page.filter_active().await?;
        page.check_saved_todo_items(&[DEFAULT_TODOS[0], DEFAULT_TODOS[2]])
            .await
    })
    .await?;

    page.step("Showing completed items", async {
        page.filter_completed().await?;
        page.check_saved_todo_items(&[DEFAULT_TODOS[1]]).await
    })
    .await?;

    page.go_back().await?;
    page.verify_route(Filter::Active).await?;
    page.check_saved_todo_items(&[DEFAULT_TODOS[0], DEFAULT_TODOS[2]])
        .await?;

    page.go_back().await?;
    page.verify_route(Filter::All).await?;
    page.check_saved_todo_items(&DEFAULT_TODOS).await
}

#[tokio::test]
async fn should_allow_me_to_display_completed_items() -> TodoResult<()> {
    let fixture = require_fixture!();
    let page = routed_page(&fixture).await?;

    page.filter_completed().await?;
    page.check_saved_todo_items(&[DEFAULT_TODOS[1]]).await
}

#[tokio::test]
async fn should_allow_me_to_display_all_items() -> TodoResult<()> {
    let fixture = require_fixture!();
    let page = routed_page(&fixture).await?;

    page.filter_active().await?;
    page.filter_completed().await?;
    page.filter_all().await?;
    page.check_saved_todo_items(&DEFAULT_TODOS).await
}

#[tokio::test]
async fn should_highlight_the_currently_applied_filter() -> TodoResult<()> {
    let fixture = require_fixture!();
    let page = routed_page(&fixture).await?;

    page.verify_filter_selected(Filter::All).await?;

    page.filter_active().await?;
    page.verify_filter_selected(Filter::Active).await?;
    page.verify_filter_not_selected(Filter::All).await?;

    page.filter_completed().await?;
    page.verify_filter_selected(Filter::Completed).await?;
    page.verify_filter_not_selected(Filter::Active).await
}

#[tokio::test]
async fn toggling_under_a_filter_moves_the_item_out_of_view() -> TodoResult<()> {
    let fixture = require_fixture!();
    let page = routed_page(&fixture).await?;

    page.filter_active().await?;
    page.toggle_todo_item(0).await?;
    page.check_saved_todo_items(&[DEFAULT_TODOS[2]]).await?;

    page.filter_completed().await?;
    page.check_saved_todo_items(&[DEFAULT_TODOS[0], DEFAULT_TODOS[1]])
        .await?;
    page.un_toggle_todo_item(1).await?;
    page.check_saved_todo_items(&[DEFAULT_TODOS[0]]).await
}
