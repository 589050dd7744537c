//! Fixture management.
//!
//! A fixture hands each test case a ready-to-use resource without the test
//! body doing any wiring. [`TodoFixture`] owns the browser for a test and
//! produces a navigated [`TodoPage`] on a fresh page in its own browser
//! context, so nothing persisted by one page object is visible to the next.
//! No teardown is registered: pages live as long as their context, and the
//! context as long as the browser.

use crate::browser::BrowserSession;
use crate::config::{Backend, E2eConfig};
use crate::driver::SharedDriver;
use crate::logging;
#[cfg(any(test, feature = "mock"))]
use crate::mock::MockBrowser;
use crate::result::{TodoError, TodoResult};
use crate::todo_page::TodoPage;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info};

/// Trait for fixtures that produce a resource per test case.
#[async_trait]
pub trait Fixture: Send + Sync {
    /// What the test body receives
    type Resource: Send;

    /// Build a fresh resource for one test case.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be prepared.
    async fn setup(&self) -> TodoResult<Self::Resource>;

    /// Get the fixture name for logging/debugging.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

#[derive(Debug)]
enum BrowserHandle {
    Chromium(BrowserSession),
    #[cfg(any(test, feature = "mock"))]
    Mock(MockBrowser),
}

/// Supplies each test with a navigated [`TodoPage`]
#[derive(Debug)]
pub struct TodoFixture {
    config: E2eConfig,
    browser: BrowserHandle,
}

impl TodoFixture {
    /// Start the backend named by `config`
    ///
    /// # Errors
    ///
    /// `ConfigError` for an invalid configuration, `BrowserLaunchError` if
    /// Chromium cannot be started
    pub async fn launch(config: E2eConfig) -> TodoResult<Self> {
        logging::init();
        config.validate()?;
        info!(backend = %config.backend, url = %config.base_url, "starting fixture");
        let browser = match config.backend {
            Backend::Chromium => BrowserHandle::Chromium(BrowserSession::launch(&config).await?),
            #[cfg(any(test, feature = "mock"))]
            Backend::Mock => BrowserHandle::Mock(MockBrowser::new(config.storage_key.clone())),
        };
        Ok(Self { config, browser })
    }

    /// Start the backend configured by file and environment
    ///
    /// # Errors
    ///
    /// Returns error if the configuration cannot be loaded or the backend
    /// cannot be started
    pub async fn from_env() -> TodoResult<Self> {
        Self::launch(E2eConfig::load()?).await
    }

    /// Configuration in effect
    #[must_use]
    pub const fn config(&self) -> &E2eConfig {
        &self.config
    }

    /// Backend serving the pages
    #[must_use]
    pub const fn backend(&self) -> Backend {
        match self.browser {
            BrowserHandle::Chromium(_) => Backend::Chromium,
            #[cfg(any(test, feature = "mock"))]
            BrowserHandle::Mock(_) => Backend::Mock,
        }
    }

    /// Page object on a blank page in a new browser context, not navigated
    ///
    /// # Errors
    ///
    /// `FixtureError` if the page cannot be opened
    pub async fn new_page(&self) -> TodoResult<TodoPage> {
        let driver: SharedDriver = match &self.browser {
            BrowserHandle::Chromium(session) => Arc::new(
                session
                    .new_isolated_page()
                    .await
                    .map_err(|e| TodoError::FixtureError {
                        message: format!("could not open page: {e}"),
                    })?,
            ),
            #[cfg(any(test, feature = "mock"))]
            BrowserHandle::Mock(browser) => Arc::new(browser.new_isolated_page()),
        };
        Ok(TodoPage::new(driver, &self.config))
    }

    /// Set up a page object and hand it to `body`.
    ///
    /// The page object is moved into the body, so it cannot outlive the
    /// test case it was made for.
    ///
    /// # Errors
    ///
    /// Returns the setup failure or the body's failure
    pub async fn run<T, F, Fut>(&self, body: F) -> TodoResult<T>
    where
        F: FnOnce(TodoPage) -> Fut,
        Fut: Future<Output = TodoResult<T>>,
    {
        let page = self.setup().await?;
        body(page).await
    }

    /// Open and navigate a second page sharing storage with `page`
    ///
    /// # Errors
    ///
    /// `FixtureError` if the page cannot be opened, or the navigation failure
    pub async fn open_page_in_same_context(&self, page: &TodoPage) -> TodoResult<TodoPage> {
        let sibling = page
            .open_sibling()
            .await
            .map_err(|e| TodoError::FixtureError {
                message: format!("could not open second page: {e}"),
            })?;
        debug!("opened second page in the same context");
        sibling.navigate().await?;
        Ok(sibling)
    }

    /// Shut the browser down
    ///
    /// # Errors
    ///
    /// Returns error if Chromium does not close
    pub async fn close(self) -> TodoResult<()> {
        match self.browser {
            BrowserHandle::Chromium(session) => session.close().await,
            #[cfg(any(test, feature = "mock"))]
            BrowserHandle::Mock(_) => Ok(()),
        }
    }
}

#[async_trait]
impl Fixture for TodoFixture {
    type Resource = TodoPage;

    async fn setup(&self) -> TodoResult<TodoPage> {
        let page = self.new_page().await?;
        page.navigate().await?;
        debug!(fixture = self.name(), "page ready");
        Ok(page)
    }

    fn name(&self) -> &str {
        "todo-page"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_STORAGE_KEY;
    use crate::driver::PageDriver;

    fn config() -> E2eConfig {
        E2eConfig::default()
            .with_backend(Backend::Mock)
            .with_base_url("https://todo.test/")
            .with_expect_timeout(200)
            .with_poll_interval(5)
            .with_screenshot_on_failure(false)
    }

    mod lifecycle_tests {
        use super::*;

        #[tokio::test]
        async fn test_chromium_is_the_default_backend() {
            assert_eq!(E2eConfig::default().backend, Backend::Chromium);
            let fixture = TodoFixture::launch(config()).await.unwrap();
            assert_eq!(fixture.backend(), Backend::Mock);
            assert_eq!(fixture.name(), "todo-page");
            fixture.close().await.unwrap();
        }

        #[tokio::test]
        async fn test_invalid_config_is_rejected() {
            let err = TodoFixture::launch(config().with_base_url(""))
                .await
                .unwrap_err();
            assert!(matches!(err, TodoError::ConfigError { .. }));
        }

        #[tokio::test]
        async fn test_setup_navigates() {
            let fixture = TodoFixture::launch(config()).await.unwrap();
            let page = fixture.setup().await.unwrap();
            assert_eq!(
                page.driver().current_url().await.unwrap(),
                "https://todo.test/"
            );
            page.verify_todo_input_focused().await.unwrap();
        }

        #[tokio::test]
        async fn test_unloadable_url_fails_setup() {
            let fixture = TodoFixture::launch(config().with_base_url("file:///nope"))
                .await
                .unwrap();
            let err = fixture.setup().await.unwrap_err();
            assert!(matches!(err.root(), TodoError::NavigationError { .. }));
        }
    }

    mod isolation_tests {
        use super::*;

        #[tokio::test]
        async fn test_each_setup_gets_fresh_storage() {
            let fixture = TodoFixture::launch(config()).await.unwrap();
            let first = fixture.setup().await.unwrap();
            first.create_a_todo_item("left behind").await.unwrap();

            let second = fixture.setup().await.unwrap();
            second.check_number_of_todos_in_local_storage(0).await.unwrap();
            assert_eq!(
                second
                    .driver()
                    .local_storage(DEFAULT_STORAGE_KEY)
                    .await
                    .unwrap(),
                None
            );
        }

        #[tokio::test]
        async fn test_run_hands_over_a_ready_page() {
            let fixture = TodoFixture::launch(config()).await.unwrap();
            let titles = fixture
                .run(|page| async move {
                    page.create_a_todo_item("feed the cat").await?;
                    page.saved_todos().await
                })
                .await
                .unwrap();
            assert_eq!(titles.len(), 1);
            assert_eq!(titles[0].title, "feed the cat");
        }
    }
}
