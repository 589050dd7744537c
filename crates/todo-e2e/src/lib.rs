//! todo-e2e: end-to-end browser tests for the TodoMVC demo
//!
//! A page object over the TodoMVC DOM and its client-side storage, a
//! fixture that hands every test case a freshly navigated page object, and
//! feature suites under `tests/` written against the page object alone.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌─────────────────────────┐
//! │ tests/*.rs   │    │ TodoFixture  │    │ PageDriver              │
//! │ (scenarios)  │───►│  └ TodoPage  │───►│  ├ CdpPage (chromium)   │
//! │              │    │   (commands, │    │  └ MockTodoPage (memory)│
//! └──────────────┘    │  verifiers)  │    └─────────────────────────┘
//!                     └──────────────┘
//! ```
//!
//! Every verification polls until it holds or the expectation timeout
//! elapses; see [`assertion::retry`].
//!
//! The suites drive the real application in Chromium. `MockTodoPage`,
//! behind the `mock` feature, is a test double for the page object's own
//! plumbing (waiting, steps, index resolution) and says nothing about how
//! the application behaves.
//!
//! # Example
//!
//! ```no_run
//! use todo_e2e::prelude::*;
//!
//! # async fn demo() -> TodoResult<()> {
//! let fixture = TodoFixture::from_env().await?;
//! fixture
//!     .run(|page| async move {
//!         page.create_a_todo_item("feed the cat").await?;
//!         page.check_saved_todo_items(&["feed the cat"]).await
//!     })
//!     .await
//! # }
//! ```

#![warn(missing_docs)]

pub mod assertion;
pub mod browser;
pub mod config;
pub mod driver;
pub mod fixture;
pub mod locator;
pub mod logging;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;
pub mod page_object;
pub mod result;
pub mod selectors;
pub mod step;
pub mod storage;
pub mod todo_page;

pub use assertion::{AssertionCheckResult, RetryConfig, RetryResult};
pub use browser::{BrowserSession, CdpPage};
pub use config::{Backend, E2eConfig};
pub use driver::{PageDriver, SharedDriver};
pub use fixture::{Fixture, TodoFixture};
pub use locator::{ElementState, Key, Locator, Selector};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockBrowser, MockTodoPage};
pub use model::{Filter, StoredTodo, DEFAULT_TODOS};
pub use page_object::{PageObject, UrlMatcher};
pub use result::{TodoError, TodoResult};
pub use todo_page::TodoPage;

/// Prelude for convenient imports
pub mod prelude {
    pub use super::assertion::RetryConfig;
    pub use super::config::{Backend, E2eConfig};
    pub use super::driver::PageDriver;
    pub use super::fixture::{Fixture, TodoFixture};
    pub use super::model::{Filter, StoredTodo, DEFAULT_TODOS};
    pub use super::page_object::PageObject;
    pub use super::result::{TodoError, TodoResult};
    pub use super::todo_page::TodoPage;
}
