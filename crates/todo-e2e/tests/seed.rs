//! Fixture smoke test
//!
//! Run with: cargo test -p todo-e2e --test seed

#[macro_use]
mod common;

use todo_e2e::prelude::*;

#[tokio::test]
async fn seed() -> TodoResult<()> {
    let fixture = require_fixture!();
    let page = fixture.setup().await?;

    assert!(page.is_at(&page.driver().current_url().await?));
    page.verify_todo_input_empty().await?;
    page.verify_todo_input_focused().await?;
    page.verify_main_and_footer_hidden().await?;
    page.check_number_of_todos_in_local_storage(0).await?;

    fixture.close().await
}
