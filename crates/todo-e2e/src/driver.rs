//! Page driver abstraction.
//!
//! The page object talks to a browser page only through [`PageDriver`].
//!
//! # Implementations
//!
//! - `CdpPage` - real Chromium page over the DevTools protocol
//! - `MockTodoPage` - in-memory page double (`mock` feature)

use crate::locator::{ElementState, Key, Locator};
use crate::result::TodoResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Shared handle to a page driver
pub type SharedDriver = Arc<dyn PageDriver>;

/// Operations a page object needs from one browser page.
///
/// Query methods are single-shot: they report the current DOM and never
/// wait. Waiting is the caller's job (see `assertion::retry`). Action
/// methods fail with `ElementNotFound` when the target is absent right now.
#[async_trait]
pub trait PageDriver: Send + Sync + std::fmt::Debug {
    /// Navigate to URL and wait for the load to finish
    async fn goto(&self, url: &str) -> TodoResult<()>;

    /// Go back in history
    async fn go_back(&self) -> TodoResult<()>;

    /// Get current URL
    async fn current_url(&self) -> TodoResult<String>;

    /// Number of elements matched by the locator
    async fn count(&self, locator: &Locator) -> TodoResult<usize>;

    /// Trimmed text of every matched element, in document order
    async fn texts(&self, locator: &Locator) -> TodoResult<Vec<String>>;

    /// State of the first matched element, `None` when nothing matches
    async fn element_state(&self, locator: &Locator) -> TodoResult<Option<ElementState>>;

    /// Click element
    async fn click(&self, locator: &Locator) -> TodoResult<()>;

    /// Double-click element
    async fn double_click(&self, locator: &Locator) -> TodoResult<()>;

    /// Replace the value of a text control with `text`
    async fn fill(&self, locator: &Locator, text: &str) -> TodoResult<()>;

    /// Press a key with the element focused
    async fn press(&self, locator: &Locator, key: Key) -> TodoResult<()>;

    /// Move focus away from the element
    async fn blur(&self, locator: &Locator) -> TodoResult<()>;

    /// Move the pointer over the element
    async fn hover(&self, locator: &Locator) -> TodoResult<()>;

    /// Raw value stored under `key` in the page's client-side storage
    async fn local_storage(&self, key: &str) -> TodoResult<Option<String>>;

    /// PNG screenshot of the viewport
    async fn screenshot(&self) -> TodoResult<Vec<u8>>;

    /// Open a new blank page in the same browser context
    async fn open_sibling(&self) -> TodoResult<SharedDriver>;
}
