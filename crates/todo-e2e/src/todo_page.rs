//! The TodoMVC page object.
//!
//! [`TodoPage`] turns feature-level intent into browser interactions on one
//! page and verification intent into polling checks against the DOM and the
//! application's client-side storage.
//!
//! Commands wait for their target before acting, so a command fails only
//! when the target never becomes usable within the expectation timeout.
//! Verifications re-check until they hold or time runs out; none of them
//! is a single-shot check.
//!
//! Items are addressed by their position in the visible list. Multi-step
//! commands resolve the position to the stored record first and key their
//! follow-up check on the record's id, so a command that makes the item
//! move or disappear is still checked against the right item.

use crate::assertion::{poll_action, poll_until, AssertionCheckResult, RetryConfig};
use crate::config::E2eConfig;
use crate::driver::SharedDriver;
use crate::locator::{ElementState, Key, Locator};
use crate::model::{counter_text, normalize_title, Filter, StoredTodo};
use crate::page_object::{PageObject, UrlMatcher};
use crate::result::{TodoError, TodoResult};
use crate::selectors;
use crate::step::{self, FailureArtifacts};
use crate::storage;
use std::future::Future;
use tracing::{debug, info};

fn not_found(locator: &Locator) -> TodoError {
    TodoError::ElementNotFound {
        locator: locator.to_string(),
    }
}

fn titles(todos: &[StoredTodo]) -> Vec<&str> {
    todos.iter().map(|t| t.title.as_str()).collect()
}

/// Page object for the TodoMVC application
#[derive(Debug)]
pub struct TodoPage {
    driver: SharedDriver,
    base_url: String,
    url_pattern: String,
    storage_key: String,
    retry: RetryConfig,
    artifacts: FailureArtifacts,
}

impl PageObject for TodoPage {
    fn url_pattern(&self) -> &str {
        &self.url_pattern
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn page_name(&self) -> &str {
        "TodoPage"
    }
}

impl TodoPage {
    /// Bind a page object to a browser page
    #[must_use]
    pub fn new(driver: SharedDriver, config: &E2eConfig) -> Self {
        let path = UrlMatcher::path_of(&config.base_url).trim_end_matches('/');
        Self {
            driver,
            base_url: config.base_url.clone(),
            url_pattern: format!("{path}*"),
            storage_key: config.storage_key.clone(),
            retry: RetryConfig::from_config(config),
            artifacts: FailureArtifacts::from_config(config),
        }
    }

    /// Replace the polling policy used by commands and verifications
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Polling policy in effect
    #[must_use]
    pub const fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Underlying browser page
    #[must_use]
    pub fn driver(&self) -> &SharedDriver {
        &self.driver
    }

    /// New page object on a fresh page sharing this page's browser context
    pub(crate) async fn open_sibling(&self) -> TodoResult<Self> {
        Ok(Self {
            driver: self.driver.open_sibling().await?,
            base_url: self.base_url.clone(),
            url_pattern: self.url_pattern.clone(),
            storage_key: self.storage_key.clone(),
            retry: self.retry,
            artifacts: self.artifacts.clone(),
        })
    }

    /// Run `body` as a named step of the current test
    ///
    /// # Errors
    ///
    /// Returns the body's failure wrapped in `StepFailed`
    pub async fn step<T, F>(&self, name: &str, body: F) -> TodoResult<T>
    where
        F: Future<Output = TodoResult<T>>,
    {
        step::step(name, self.driver.as_ref(), &self.artifacts, body).await
    }

    /// Item records the application has persisted, read fresh on every call
    ///
    /// # Errors
    ///
    /// Returns error if storage cannot be read or decoded
    pub async fn saved_todos(&self) -> TodoResult<Vec<StoredTodo>> {
        storage::read_todos(self.driver.as_ref(), &self.storage_key).await
    }

    // ------------------------------------------------------------------
    // Polling plumbing
    // ------------------------------------------------------------------

    async fn act<T, F, Fut>(&self, action: F) -> TodoResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = TodoResult<T>>,
    {
        poll_action(&self.retry, action).await
    }

    async fn expect<F, Fut>(&self, description: &str, check: F) -> TodoResult<()>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = TodoResult<AssertionCheckResult>>,
    {
        let result = poll_until(&self.retry, description, check).await?;
        debug!(description, attempts = result.attempts, "verified");
        Ok(())
    }

    /// Poll the first element matched by `locator` until `predicate` holds
    async fn expect_state<P>(
        &self,
        description: &str,
        locator: &Locator,
        expected: &str,
        otherwise: &str,
        predicate: P,
    ) -> TodoResult<()>
    where
        P: Fn(&ElementState) -> bool,
    {
        let driver = self.driver.as_ref();
        let predicate = &predicate;
        self.expect(description, move || async move {
            let state = driver
                .element_state(locator)
                .await?
                .ok_or_else(|| not_found(locator))?;
            Ok(AssertionCheckResult::holds(
                predicate(&state),
                expected,
                otherwise,
            ))
        })
        .await
    }

    /// Poll for `locator` matching nothing or only hidden elements
    async fn expect_hidden(&self, description: &str, locator: &Locator) -> TodoResult<()> {
        let driver = self.driver.as_ref();
        self.expect(description, move || async move {
            let visible = driver
                .element_state(locator)
                .await?
                .is_some_and(|s| s.visible);
            Ok(AssertionCheckResult::holds(!visible, "hidden", "visible"))
        })
        .await
    }

    /// Poll the persisted item list until `check` passes
    async fn expect_storage<P>(&self, description: &str, check: P) -> TodoResult<()>
    where
        P: Fn(&[StoredTodo]) -> AssertionCheckResult,
    {
        let driver = self.driver.as_ref();
        let key = self.storage_key.as_str();
        let check = &check;
        self.expect(description, move || async move {
            let todos = storage::read_todos(driver, key).await?;
            Ok(check(&todos))
        })
        .await
    }

    /// Poll the persisted record with `id` (or its absence)
    async fn expect_record<P>(&self, description: &str, id: &str, check: P) -> TodoResult<()>
    where
        P: Fn(Option<&StoredTodo>) -> AssertionCheckResult,
    {
        self.expect_storage(description, |todos| {
            check(todos.iter().find(|t| t.id == id))
        })
        .await
    }

    /// Stored record behind the visible item at `index`
    async fn visible_record(&self, index: usize) -> TodoResult<StoredTodo> {
        let driver = self.driver.as_ref();
        let key = self.storage_key.as_str();
        self.act(move || async move {
            let item = selectors::todo_item(index);
            if driver.count(&item).await? == 0 {
                return Err(not_found(&item));
            }
            let filter = Filter::from_url(&driver.current_url().await?);
            let todos = storage::read_todos(driver, key).await?;
            let record = storage::visible(&todos, filter)
                .get(index)
                .map(|t| (*t).clone());
            record.ok_or_else(|| not_found(&item))
        })
        .await
    }

    async fn click(&self, locator: &Locator) -> TodoResult<()> {
        let driver = self.driver.as_ref();
        self.act(move || driver.click(locator)).await
    }

    async fn fill(&self, locator: &Locator, text: &str) -> TodoResult<()> {
        let driver = self.driver.as_ref();
        self.act(move || driver.fill(locator, text)).await
    }

    async fn press(&self, locator: &Locator, key: Key) -> TodoResult<()> {
        let driver = self.driver.as_ref();
        self.act(move || driver.press(locator, key)).await
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Load the application and wait until it is ready for input.
    ///
    /// # Errors
    ///
    /// `NavigationError` if the page does not load; `ElementNotFound` if
    /// the application never renders its input
    pub async fn navigate(&self) -> TodoResult<()> {
        self.step("Navigate to the application", async {
            info!(url = %self.base_url, "opening application");
            self.driver.goto(&self.base_url).await?;
            let driver = self.driver.as_ref();
            let input = selectors::new_todo();
            let input = &input;
            self.expect("application rendered", move || async move {
                if driver.count(input).await? == 0 {
                    return Err(not_found(input));
                }
                let url = driver.current_url().await?;
                Ok(AssertionCheckResult::holds(
                    self.is_at(&url),
                    self.url_pattern(),
                    &url,
                ))
            })
            .await
        })
        .await
    }

    /// Type `text` into the new-todo input and submit it with Enter
    ///
    /// # Errors
    ///
    /// Returns error if the input never becomes usable
    pub async fn create_a_todo_item(&self, text: &str) -> TodoResult<()> {
        self.step("Create a todo item", async {
            debug!(text, "creating todo");
            let input = selectors::new_todo();
            self.fill(&input, text).await?;
            self.press(&input, Key::Enter).await
        })
        .await
    }

    /// Create each item in order
    ///
    /// # Errors
    ///
    /// Returns the first creation failure
    pub async fn create_default_todos<S: AsRef<str>>(&self, items: &[S]) -> TodoResult<()> {
        self.step("Create default todos", async {
            for item in items {
                self.create_a_todo_item(item.as_ref()).await?;
            }
            Ok(())
        })
        .await
    }

    /// Click the checkbox of the item at `index` and wait for its stored
    /// flag to become the negation of the flag read before the click
    async fn flip_item(&self, index: usize) -> TodoResult<()> {
        let record = self.visible_record(index).await?;
        let target = !record.completed;
        debug!(index, title = %record.title, target, "flipping completion");
        self.click(&selectors::item_toggle(index)).await?;
        let state = |completed: bool| if completed { "completed" } else { "active" };
        self.expect_record("item completion", &record.id, |found| match found {
            Some(todo) => AssertionCheckResult::holds(
                todo.completed == target,
                state(target),
                state(todo.completed),
            ),
            None => AssertionCheckResult::fail(state(target), "removed"),
        })
        .await
    }

    /// Flip the completion state of the visible item at `index`
    ///
    /// # Errors
    ///
    /// `ElementNotFound` if there is no item at `index`
    pub async fn toggle_todo_item(&self, index: usize) -> TodoResult<()> {
        self.step("Toggle todo item", self.flip_item(index)).await
    }

    /// Flip the completion state of the visible item at `index` back.
    ///
    /// Same click as [`Self::toggle_todo_item`]; the separate name keeps
    /// scenarios readable when undoing a toggle.
    ///
    /// # Errors
    ///
    /// `ElementNotFound` if there is no item at `index`
    pub async fn un_toggle_todo_item(&self, index: usize) -> TodoResult<()> {
        self.step("Un-toggle todo item", self.flip_item(index)).await
    }

    async fn enter_edit(&self, index: usize, text: &str) -> TodoResult<StoredTodo> {
        let record = self.visible_record(index).await?;
        let driver = self.driver.as_ref();
        let title = selectors::item_title(index);
        let title = &title;
        self.act(move || driver.double_click(title)).await?;
        self.fill(&selectors::item_edit(index), text).await?;
        Ok(record)
    }

    async fn expect_edit_committed(&self, record: &StoredTodo, text: &str) -> TodoResult<()> {
        let wanted = normalize_title(text);
        if wanted.is_empty() {
            return self
                .expect_record("empty edit removes item", &record.id, |found| {
                    AssertionCheckResult::holds(found.is_none(), "removed", "still saved")
                })
                .await;
        }
        self.expect_record("edited title", &record.id, |found| match found {
            Some(todo) => AssertionCheckResult::equals(wanted, todo.title.as_str()),
            None => AssertionCheckResult::fail(wanted, "removed"),
        })
        .await
    }

    /// Double-click the item at `index` and leave it in edit mode
    ///
    /// # Errors
    ///
    /// `ElementNotFound` if there is no item at `index`
    pub async fn start_editing(&self, index: usize) -> TodoResult<()> {
        self.step("Start editing", async {
            let driver = self.driver.as_ref();
            let title = selectors::item_title(index);
            let title = &title;
            self.act(move || driver.double_click(title)).await?;
            self.verify_edit_mode(index).await
        })
        .await
    }

    /// Replace the text of the item at `index`, committing with Enter.
    ///
    /// Text that is empty after trimming removes the item.
    ///
    /// # Errors
    ///
    /// `ElementNotFound` if there is no item at `index`
    pub async fn edit_todo_item(&self, index: usize, text: &str) -> TodoResult<()> {
        self.step("Edit todo item", async {
            let record = self.enter_edit(index, text).await?;
            self.press(&selectors::item_edit(index), Key::Enter).await?;
            self.expect_edit_committed(&record, text).await
        })
        .await
    }

    /// Replace the text of the item at `index`, committing by moving focus away
    ///
    /// # Errors
    ///
    /// `ElementNotFound` if there is no item at `index`
    pub async fn edit_todo_item_and_blur(&self, index: usize, text: &str) -> TodoResult<()> {
        self.step("Edit todo item and blur", async {
            let record = self.enter_edit(index, text).await?;
            let driver = self.driver.as_ref();
            let edit = selectors::item_edit(index);
            let edit = &edit;
            self.act(move || driver.blur(edit)).await?;
            self.expect_edit_committed(&record, text).await
        })
        .await
    }

    /// Start editing the item at `index`, type `text`, then press Escape
    ///
    /// # Errors
    ///
    /// `ElementNotFound` if there is no item at `index`; `AssertionFailed`
    /// if the original title did not survive
    pub async fn cancel_edit(&self, index: usize, text: &str) -> TodoResult<()> {
        self.step("Cancel edit", async {
            let record = self.enter_edit(index, text).await?;
            self.press(&selectors::item_edit(index), Key::Escape).await?;
            let original = record.title.as_str();
            self.expect_record("title unchanged", &record.id, |found| match found {
                Some(todo) => AssertionCheckResult::equals(original, todo.title.as_str()),
                None => AssertionCheckResult::fail(original, "removed"),
            })
            .await
        })
        .await
    }

    /// Delete the item at `index` with its destroy button
    ///
    /// # Errors
    ///
    /// `ElementNotFound` if there is no item at `index`
    pub async fn delete_todo_item(&self, index: usize) -> TodoResult<()> {
        self.step("Delete todo item", async {
            let record = self.visible_record(index).await?;
            let driver = self.driver.as_ref();
            let item = selectors::todo_item(index);
            let destroy = selectors::item_destroy(index);
            let (item, destroy) = (&item, &destroy);
            self.act(move || async move {
                driver.hover(item).await?;
                driver.click(destroy).await
            })
            .await?;
            self.expect_record("item deleted", &record.id, |found| {
                AssertionCheckResult::holds(found.is_none(), "removed", "still saved")
            })
            .await
        })
        .await
    }

    async fn set_all_completed(&self, completed: bool) -> TodoResult<()> {
        let driver = self.driver.as_ref();
        let toggle = selectors::toggle_all();
        let toggle = &toggle;
        let current = self
            .act(move || async move {
                driver
                    .element_state(toggle)
                    .await?
                    .ok_or_else(|| not_found(toggle))
            })
            .await?;
        if current.checked != completed {
            self.click(&selectors::toggle_all_label()).await?;
        }
        let (expected, otherwise) = if completed {
            ("checked", "unchecked")
        } else {
            ("unchecked", "checked")
        };
        self.expect_state("mark-all checkbox", toggle, expected, otherwise, |s| {
            s.checked == completed
        })
        .await?;
        self.expect_storage("every item's completion", |todos| {
            let mismatched = todos.iter().filter(|t| t.completed != completed).count();
            AssertionCheckResult::equals(&0, &mismatched)
        })
        .await
    }

    /// Mark every item completed with the mark-all control
    ///
    /// # Errors
    ///
    /// `ElementNotFound` if the list is empty (the control is not rendered)
    pub async fn mark_all_as_complete(&self) -> TodoResult<()> {
        self.step("Mark all as complete", self.set_all_completed(true))
            .await
    }

    /// Mark every item active with the mark-all control
    ///
    /// # Errors
    ///
    /// `ElementNotFound` if the list is empty (the control is not rendered)
    pub async fn un_mark_all_as_complete(&self) -> TodoResult<()> {
        self.step("Un-mark all as complete", self.set_all_completed(false))
            .await
    }

    async fn select_filter(&self, filter: Filter) -> TodoResult<()> {
        debug!(%filter, "selecting filter");
        self.click(&selectors::filter_link(filter)).await?;
        self.verify_filter_selected(filter).await
    }

    /// Show every item
    ///
    /// # Errors
    ///
    /// Returns error if the link is missing or never becomes selected
    pub async fn filter_all(&self) -> TodoResult<()> {
        self.step("Filter all", self.select_filter(Filter::All)).await
    }

    /// Show active items only
    ///
    /// # Errors
    ///
    /// Returns error if the link is missing or never becomes selected
    pub async fn filter_active(&self) -> TodoResult<()> {
        self.step("Filter active", self.select_filter(Filter::Active))
            .await
    }

    /// Show completed items only
    ///
    /// # Errors
    ///
    /// Returns error if the link is missing or never becomes selected
    pub async fn filter_completed(&self) -> TodoResult<()> {
        self.step("Filter completed", self.select_filter(Filter::Completed))
            .await
    }

    /// Browser back button
    ///
    /// # Errors
    ///
    /// Returns error if the browser rejects the navigation
    pub async fn go_back(&self) -> TodoResult<()> {
        self.step("Go back", self.driver.go_back()).await
    }

    /// Remove completed items with the clear-completed button
    ///
    /// # Errors
    ///
    /// `ElementNotFound` if no item is completed (the button is not rendered)
    pub async fn clear_completed(&self) -> TodoResult<()> {
        self.step("Clear completed", async {
            self.click(&selectors::clear_completed()).await?;
            self.expect_storage("completed items cleared", |todos| {
                AssertionCheckResult::equals(&0, &storage::completed_count(todos))
            })
            .await
        })
        .await
    }

    // ------------------------------------------------------------------
    // Verifications
    // ------------------------------------------------------------------

    /// Visible item titles equal `items`, in order
    ///
    /// # Errors
    ///
    /// `AssertionFailed` with both lists when they never match
    pub async fn check_saved_todo_items<S: AsRef<str>>(&self, items: &[S]) -> TodoResult<()> {
        let expected: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
        let expected = &expected;
        let driver = self.driver.as_ref();
        let titles = selectors::todo_titles();
        let titles = &titles;
        self.expect("visible items", move || async move {
            let actual = driver.texts(titles).await?;
            let actual: Vec<&str> = actual.iter().map(String::as_str).collect();
            Ok(AssertionCheckResult::equals(expected, &actual))
        })
        .await
    }

    /// Storage holds exactly `count` items
    ///
    /// # Errors
    ///
    /// `AssertionFailed` when the count never matches
    pub async fn check_number_of_todos_in_local_storage(&self, count: usize) -> TodoResult<()> {
        self.expect_storage("items in storage", |todos| {
            AssertionCheckResult::equals(&count, &todos.len())
        })
        .await
    }

    /// Storage holds exactly `count` completed items
    ///
    /// # Errors
    ///
    /// `AssertionFailed` when the count never matches
    pub async fn check_number_of_completed_todos_in_local_storage(
        &self,
        count: usize,
    ) -> TodoResult<()> {
        self.expect_storage("completed items in storage", |todos| {
            AssertionCheckResult::equals(&count, &storage::completed_count(todos))
        })
        .await
    }

    /// Storage holds an item titled `title`
    ///
    /// # Errors
    ///
    /// `AssertionFailed` when no such item ever appears
    pub async fn check_todos_in_local_storage(&self, title: &str) -> TodoResult<()> {
        self.expect_storage("item in storage", |todos| {
            AssertionCheckResult::holds(
                todos.iter().any(|t| t.title == title),
                &format!("an item titled {title:?}"),
                &format!("{:?}", titles(todos)),
            )
        })
        .await
    }

    /// Counter reads `"{count} item(s) left"`
    ///
    /// # Errors
    ///
    /// `ElementNotFound` if the counter is not rendered
    pub async fn verify_todo_count(&self, count: usize) -> TodoResult<()> {
        let expected = counter_text(count);
        let expected = expected.as_str();
        let driver = self.driver.as_ref();
        let counter = selectors::todo_count();
        let counter = &counter;
        self.expect("remaining-items counter", move || async move {
            let texts = driver.texts(counter).await?;
            let actual = texts.first().ok_or_else(|| not_found(counter))?;
            Ok(AssertionCheckResult::equals(expected, actual.as_str()))
        })
        .await
    }

    async fn expect_every_item(&self, description: &str, completed: bool) -> TodoResult<()> {
        let driver = self.driver.as_ref();
        self.expect(description, move || async move {
            let count = driver.count(&selectors::todo_items()).await?;
            let mut flags = Vec::with_capacity(count);
            for i in 0..count {
                let item = selectors::todo_item(i);
                let state = driver
                    .element_state(&item)
                    .await?
                    .ok_or_else(|| not_found(&item))?;
                flags.push(state.has_class("completed"));
            }
            let matches = flags.iter().all(|&f| f == completed) && (count > 0 || !completed);
            let expected = if completed {
                "every item completed"
            } else {
                "no item completed"
            };
            Ok(AssertionCheckResult::holds(
                matches,
                expected,
                &format!("completed flags {flags:?}"),
            ))
        })
        .await
    }

    /// Every visible item is rendered completed (and there is at least one)
    ///
    /// # Errors
    ///
    /// `AssertionFailed` when some item stays active
    pub async fn verify_all_todos_completed(&self) -> TodoResult<()> {
        self.expect_every_item("all items completed", true).await
    }

    /// No visible item is rendered completed
    ///
    /// # Errors
    ///
    /// `AssertionFailed` when some item stays completed
    pub async fn verify_no_todos_completed(&self) -> TodoResult<()> {
        self.expect_every_item("no items completed", false).await
    }

    /// Mark-all checkbox is checked
    ///
    /// # Errors
    ///
    /// `ElementNotFound` if it is not rendered
    pub async fn verify_toggle_all_checked(&self) -> TodoResult<()> {
        self.expect_state(
            "mark-all checkbox",
            &selectors::toggle_all(),
            "checked",
            "unchecked",
            |s| s.checked,
        )
        .await
    }

    /// Mark-all checkbox is not checked
    ///
    /// # Errors
    ///
    /// `ElementNotFound` if it is not rendered
    pub async fn verify_toggle_all_not_checked(&self) -> TodoResult<()> {
        self.expect_state(
            "mark-all checkbox",
            &selectors::toggle_all(),
            "unchecked",
            "checked",
            |s| !s.checked,
        )
        .await
    }

    /// Item at `index` is rendered completed
    ///
    /// # Errors
    ///
    /// `ElementNotFound` if there is no item at `index`
    pub async fn verify_todo_item_completed(&self, index: usize) -> TodoResult<()> {
        self.expect_state(
            "item completed",
            &selectors::todo_item(index),
            "completed",
            "active",
            |s| s.has_class("completed"),
        )
        .await
    }

    /// Item at `index` is rendered active
    ///
    /// # Errors
    ///
    /// `ElementNotFound` if there is no item at `index`
    pub async fn verify_todo_item_not_completed(&self, index: usize) -> TodoResult<()> {
        self.expect_state(
            "item not completed",
            &selectors::todo_item(index),
            "active",
            "completed",
            |s| !s.has_class("completed"),
        )
        .await
    }

    /// Item at `index` is being edited: edit box shown, checkbox and label hidden
    ///
    /// # Errors
    ///
    /// Returns error when the item never enters edit mode
    pub async fn verify_edit_mode(&self, index: usize) -> TodoResult<()> {
        self.expect_state(
            "item in edit mode",
            &selectors::todo_item(index),
            "editing",
            "not editing",
            |s| s.has_class("editing"),
        )
        .await?;
        self.expect_state(
            "edit box",
            &selectors::item_edit(index),
            "visible",
            "hidden",
            |s| s.visible,
        )
        .await?;
        self.expect_hidden("item checkbox while editing", &selectors::item_toggle(index))
            .await?;
        self.expect_hidden("item label while editing", &selectors::item_title(index))
            .await
    }

    /// Clear-completed button is shown
    ///
    /// # Errors
    ///
    /// `ElementNotFound` if it is never rendered
    pub async fn verify_clear_completed_visible(&self) -> TodoResult<()> {
        self.expect_state(
            "clear-completed button",
            &selectors::clear_completed(),
            "visible",
            "hidden",
            |s| s.visible,
        )
        .await
    }

    /// Clear-completed button is absent or hidden
    ///
    /// # Errors
    ///
    /// `AssertionFailed` if it stays visible
    pub async fn verify_clear_completed_hidden(&self) -> TodoResult<()> {
        self.expect_hidden("clear-completed button", &selectors::clear_completed())
            .await
    }

    /// Clear-completed button reads `text`
    ///
    /// # Errors
    ///
    /// `ElementNotFound` if it is never rendered
    pub async fn verify_clear_completed_text(&self, text: &str) -> TodoResult<()> {
        self.expect_state(
            "clear-completed caption",
            &selectors::clear_completed(),
            text,
            "a different caption",
            |s| s.text == text,
        )
        .await
    }

    /// Filter link for `filter` is highlighted
    ///
    /// # Errors
    ///
    /// `ElementNotFound` if the filters are not rendered
    pub async fn verify_filter_selected(&self, filter: Filter) -> TodoResult<()> {
        self.expect_state(
            &format!("{filter} filter"),
            &selectors::filter_link(filter),
            "selected",
            "not selected",
            |s| s.has_class("selected"),
        )
        .await
    }

    /// Filter link for `filter` is not highlighted
    ///
    /// # Errors
    ///
    /// `ElementNotFound` if the filters are not rendered
    pub async fn verify_filter_not_selected(&self, filter: Filter) -> TodoResult<()> {
        self.expect_state(
            &format!("{filter} filter"),
            &selectors::filter_link(filter),
            "not selected",
            "selected",
            |s| !s.has_class("selected"),
        )
        .await
    }

    /// URL routes to `filter`
    ///
    /// # Errors
    ///
    /// `AssertionFailed` when the route never matches
    pub async fn verify_route(&self, filter: Filter) -> TodoResult<()> {
        let driver = self.driver.as_ref();
        self.expect("route", move || async move {
            let url = driver.current_url().await?;
            Ok(AssertionCheckResult::holds(
                Filter::from_url(&url) == filter,
                filter.route(),
                &url,
            ))
        })
        .await
    }

    /// New-todo input is empty
    ///
    /// # Errors
    ///
    /// `ElementNotFound` if the input is not rendered
    pub async fn verify_todo_input_empty(&self) -> TodoResult<()> {
        let driver = self.driver.as_ref();
        let input = selectors::new_todo();
        let input = &input;
        self.expect("new-todo input", move || async move {
            let state = driver
                .element_state(input)
                .await?
                .ok_or_else(|| not_found(input))?;
            let value = state.value.unwrap_or_default();
            Ok(AssertionCheckResult::equals("", value.as_str()))
        })
        .await
    }

    /// New-todo input has keyboard focus
    ///
    /// # Errors
    ///
    /// `ElementNotFound` if the input is not rendered
    pub async fn verify_todo_input_focused(&self) -> TodoResult<()> {
        self.expect_state(
            "new-todo input",
            &selectors::new_todo(),
            "focused",
            "not focused",
            |s| s.focused,
        )
        .await
    }

    /// List section and footer are not shown (empty list)
    ///
    /// # Errors
    ///
    /// `AssertionFailed` if either stays visible
    pub async fn verify_main_and_footer_hidden(&self) -> TodoResult<()> {
        self.expect_hidden("list section", &selectors::main_section())
            .await?;
        self.expect_hidden("footer", &selectors::footer()).await
    }
}
