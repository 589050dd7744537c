//! DOM surface of the TodoMVC application.

use crate::locator::{Locator, Selector};
use crate::model::Filter;

/// Input for new item text
pub const NEW_TODO: &str = ".new-todo";
/// Placeholder of the new item input
pub const NEW_TODO_PLACEHOLDER: &str = "What needs to be done?";
/// `data-testid` of each list item
pub const TODO_ITEM: &str = "todo-item";
/// `data-testid` of each item's label
pub const TODO_TITLE: &str = "todo-title";
/// `data-testid` of the remaining-items counter
pub const TODO_COUNT: &str = "todo-count";
/// Per-item completion checkbox
pub const TOGGLE: &str = ".toggle";
/// Per-item edit box, present only while editing
pub const EDIT: &str = ".edit";
/// Per-item delete button, shown on hover
pub const DESTROY: &str = ".destroy";
/// Mark-all checkbox
pub const TOGGLE_ALL: &str = ".toggle-all";
/// Clickable caption of the mark-all checkbox
pub const TOGGLE_ALL_LABEL: &str = "label[for=\"toggle-all\"]";
/// Clear-completed button
pub const CLEAR_COMPLETED: &str = ".clear-completed";
/// Section holding the list
pub const MAIN: &str = ".main";
/// Footer holding counter, filters and clear button
pub const FOOTER: &str = ".footer";

/// CSS of a filter link
#[must_use]
pub fn filter_link_css(filter: Filter) -> String {
    format!(".filters a[href=\"{}\"]", filter.route())
}

/// Filter whose link matches the CSS, if any
#[must_use]
pub fn filter_for_css(css: &str) -> Option<Filter> {
    Filter::ALL.into_iter().find(|f| filter_link_css(*f) == css)
}

/// New item input
#[must_use]
pub fn new_todo() -> Locator {
    Locator::new(NEW_TODO)
}

/// Every visible item
#[must_use]
pub fn todo_items() -> Locator {
    Locator::test_id(TODO_ITEM)
}

/// Visible item at `index`
#[must_use]
pub fn todo_item(index: usize) -> Locator {
    todo_items().nth(index)
}

/// Label of every visible item
#[must_use]
pub fn todo_titles() -> Locator {
    Locator::test_id(TODO_TITLE)
}

/// Label of the item at `index`
#[must_use]
pub fn item_title(index: usize) -> Locator {
    todo_item(index).locate(Selector::test_id(TODO_TITLE))
}

/// Checkbox of the item at `index`
#[must_use]
pub fn item_toggle(index: usize) -> Locator {
    todo_item(index).locate(Selector::css(TOGGLE))
}

/// Edit box of the item at `index`
#[must_use]
pub fn item_edit(index: usize) -> Locator {
    todo_item(index).locate(Selector::css(EDIT))
}

/// Delete button of the item at `index`
#[must_use]
pub fn item_destroy(index: usize) -> Locator {
    todo_item(index).locate(Selector::css(DESTROY))
}

/// Every item checkbox
#[must_use]
pub fn toggles() -> Locator {
    Locator::new(TOGGLE)
}

/// Mark-all checkbox
#[must_use]
pub fn toggle_all() -> Locator {
    Locator::new(TOGGLE_ALL)
}

/// Mark-all caption
#[must_use]
pub fn toggle_all_label() -> Locator {
    Locator::new(TOGGLE_ALL_LABEL)
}

/// Remaining-items counter
#[must_use]
pub fn todo_count() -> Locator {
    Locator::test_id(TODO_COUNT)
}

/// Clear-completed button
#[must_use]
pub fn clear_completed() -> Locator {
    Locator::new(CLEAR_COMPLETED)
}

/// List section
#[must_use]
pub fn main_section() -> Locator {
    Locator::new(MAIN)
}

/// Footer
#[must_use]
pub fn footer() -> Locator {
    Locator::new(FOOTER)
}

/// Link selecting `filter`
#[must_use]
pub fn filter_link(filter: Filter) -> Locator {
    Locator::new(filter_link_css(filter))
}
