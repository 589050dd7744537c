//! Browser control for headless testing.
//!
//! Real browser control via the Chrome `DevTools` Protocol, using
//! chromiumoxide. [`BrowserSession`] owns one Chromium process; every page
//! handed out lives in its own browser context unless it is opened as a
//! sibling of an existing page.

use crate::config::E2eConfig;
use crate::driver::{PageDriver, SharedDriver};
use crate::locator::{ElementState, Key, Locator};
use crate::result::{TodoError, TodoResult};
use async_trait::async_trait;
use base64::Engine;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchMouseEventParams, DispatchMouseEventType, MouseButton,
};
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams,
};
use chromiumoxide::cdp::browser_protocol::browser::BrowserContextId;
use chromiumoxide::cdp::browser_protocol::target::{CreateBrowserContextParams, CreateTargetParams};
use chromiumoxide::element::Element;
use chromiumoxide::layout::Point;
use chromiumoxide::page::Page as RawPage;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Browser instance with real CDP connection
#[derive(Debug)]
pub struct BrowserSession {
    inner: Arc<Mutex<CdpBrowser>>,
    handle: tokio::task::JoinHandle<()>,
    navigation_timeout: Duration,
}

impl BrowserSession {
    /// Launch a new browser instance
    ///
    /// # Errors
    ///
    /// Returns error if browser cannot be launched
    pub async fn launch(config: &E2eConfig) -> TodoResult<Self> {
        info!(
            headless = config.headless,
            width = config.viewport_width,
            height = config.viewport_height,
            "launching chromium"
        );

        let mut builder = CdpConfig::builder()
            .window_size(config.viewport_width, config.viewport_height)
            .request_timeout(config.navigation_timeout());

        if !config.headless {
            builder = builder.with_head();
        }

        if !config.sandbox {
            builder = builder.no_sandbox();
        }

        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder
            .build()
            .map_err(|message| TodoError::BrowserLaunchError { message })?;

        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| TodoError::BrowserLaunchError {
                    message: e.to_string(),
                })?;

        // Spawn handler task
        let handle = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            inner: Arc::new(Mutex::new(browser)),
            handle,
            navigation_timeout: config.navigation_timeout(),
        })
    }

    /// Create a blank page inside a fresh browser context.
    ///
    /// A fresh context has its own storage, so nothing persisted by an
    /// earlier page leaks into this one.
    ///
    /// # Errors
    ///
    /// Returns error if the context or page cannot be created
    pub async fn new_isolated_page(&self) -> TodoResult<CdpPage> {
        let context = {
            let mut browser = self.inner.lock().await;
            browser
                .create_browser_context(CreateBrowserContextParams::default())
                .await
                .map_err(TodoError::page)?
        };
        debug!(?context, "created browser context");
        CdpPage::open(Arc::clone(&self.inner), context, self.navigation_timeout).await
    }

    /// Close the browser
    pub async fn close(self) -> TodoResult<()> {
        let mut browser = self.inner.lock().await;
        browser.close().await.map_err(|e| TodoError::BrowserLaunchError {
            message: e.to_string(),
        })?;
        if let Err(e) = browser.wait().await {
            warn!(error = %e, "chromium did not exit cleanly");
        }
        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A browser page with real CDP connection
#[derive(Debug, Clone)]
pub struct CdpPage {
    page: RawPage,
    browser: Arc<Mutex<CdpBrowser>>,
    context: BrowserContextId,
    navigation_timeout: Duration,
}

impl CdpPage {
    async fn open(
        browser: Arc<Mutex<CdpBrowser>>,
        context: BrowserContextId,
        navigation_timeout: Duration,
    ) -> TodoResult<Self> {
        let params = CreateTargetParams::builder()
            .url("about:blank")
            .browser_context_id(context.clone())
            .build()
            .map_err(TodoError::page)?;
        let page = {
            let guard = browser.lock().await;
            guard.new_page(params).await.map_err(TodoError::page)?
        };
        Ok(Self {
            page,
            browser,
            context,
            navigation_timeout,
        })
    }

    /// Evaluate a script whose value is a JSON string and decode it.
    ///
    /// Scripts always return `JSON.stringify(...)` so that `null` results
    /// survive the trip back from the page.
    async fn evaluate_json<T: DeserializeOwned>(&self, script: &str) -> TodoResult<T> {
        let raw: String = self
            .page
            .evaluate(script)
            .await
            .map_err(TodoError::page)?
            .into_value()
            .map_err(TodoError::page)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Resolve a locator to a live element handle
    async fn resolve(&self, locator: &Locator) -> TodoResult<Element> {
        let not_found = || TodoError::ElementNotFound {
            locator: locator.to_string(),
        };
        let css = locator.selector().to_css();
        let mut matches = self
            .page
            .find_elements(css.as_str())
            .await
            .map_err(|_| not_found())?;
        let index = locator.index().unwrap_or(0);
        if index >= matches.len() {
            return Err(not_found());
        }
        let element = matches.swap_remove(index);
        match locator.child() {
            Some(child) => element
                .find_element(child.to_css())
                .await
                .map_err(|_| not_found()),
            None => Ok(element),
        }
    }

    async fn pointer_target(&self, locator: &Locator) -> TodoResult<Point> {
        let element = self.resolve(locator).await?;
        element.scroll_into_view().await.map_err(TodoError::input)?;
        element.clickable_point().await.map_err(TodoError::input)
    }

    async fn mouse(
        &self,
        kind: DispatchMouseEventType,
        point: Point,
        button: MouseButton,
        click_count: i64,
    ) -> TodoResult<()> {
        let params = DispatchMouseEventParams::builder()
            .r#type(kind)
            .x(point.x)
            .y(point.y)
            .button(button)
            .click_count(click_count)
            .build()
            .map_err(TodoError::input)?;
        self.page.execute(params).await.map_err(TodoError::input)?;
        Ok(())
    }
}

#[async_trait]
impl PageDriver for CdpPage {
    async fn goto(&self, url: &str) -> TodoResult<()> {
        debug!(url, "navigating");
        let navigation = self.page.goto(url);
        match tokio::time::timeout(self.navigation_timeout, navigation).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(TodoError::NavigationError {
                url: url.to_string(),
                message: e.to_string(),
            }),
            Err(_) => Err(TodoError::NavigationError {
                url: url.to_string(),
                message: format!(
                    "timed out after {}ms",
                    self.navigation_timeout.as_millis()
                ),
            }),
        }
    }

    async fn go_back(&self) -> TodoResult<()> {
        self.page
            .evaluate("window.history.back()")
            .await
            .map_err(TodoError::page)?;
        Ok(())
    }

    async fn current_url(&self) -> TodoResult<String> {
        self.evaluate_json("JSON.stringify(window.location.href)")
            .await
    }

    async fn count(&self, locator: &Locator) -> TodoResult<usize> {
        self.evaluate_json(&format!("JSON.stringify({})", locator.to_count_query()))
            .await
    }

    async fn texts(&self, locator: &Locator) -> TodoResult<Vec<String>> {
        self.evaluate_json(&locator.texts_script()).await
    }

    async fn element_state(&self, locator: &Locator) -> TodoResult<Option<ElementState>> {
        self.evaluate_json(&locator.state_script()).await
    }

    async fn click(&self, locator: &Locator) -> TodoResult<()> {
        let element = self.resolve(locator).await?;
        element.click().await.map_err(TodoError::input)?;
        Ok(())
    }

    async fn double_click(&self, locator: &Locator) -> TodoResult<()> {
        let point = self.pointer_target(locator).await?;
        self.mouse(DispatchMouseEventType::MouseMoved, point, MouseButton::None, 0)
            .await?;
        for count in 1..=2 {
            self.mouse(
                DispatchMouseEventType::MousePressed,
                point,
                MouseButton::Left,
                count,
            )
            .await?;
            self.mouse(
                DispatchMouseEventType::MouseReleased,
                point,
                MouseButton::Left,
                count,
            )
            .await?;
        }
        Ok(())
    }

    async fn fill(&self, locator: &Locator, text: &str) -> TodoResult<()> {
        let element = self.resolve(locator).await?;
        element.focus().await.map_err(TodoError::input)?;
        element
            .call_js_fn("function() { this.select(); }", false)
            .await
            .map_err(TodoError::input)?;
        element
            .press_key(Key::Backspace.as_str())
            .await
            .map_err(TodoError::input)?;
        if !text.is_empty() {
            element.type_str(text).await.map_err(TodoError::input)?;
        }
        Ok(())
    }

    async fn press(&self, locator: &Locator, key: Key) -> TodoResult<()> {
        let element = self.resolve(locator).await?;
        element.focus().await.map_err(TodoError::input)?;
        element
            .press_key(key.as_str())
            .await
            .map_err(TodoError::input)?;
        Ok(())
    }

    async fn blur(&self, locator: &Locator) -> TodoResult<()> {
        let element = self.resolve(locator).await?;
        element
            .call_js_fn("function() { this.blur(); }", false)
            .await
            .map_err(TodoError::input)?;
        Ok(())
    }

    async fn hover(&self, locator: &Locator) -> TodoResult<()> {
        let point = self.pointer_target(locator).await?;
        self.mouse(DispatchMouseEventType::MouseMoved, point, MouseButton::None, 0)
            .await
    }

    async fn local_storage(&self, key: &str) -> TodoResult<Option<String>> {
        self.evaluate_json(&format!(
            "JSON.stringify(window.localStorage.getItem({}))",
            crate::locator::js_string(key)
        ))
        .await
        .map_err(|e| TodoError::StorageError {
            message: e.to_string(),
        })
    }

    async fn screenshot(&self) -> TodoResult<Vec<u8>> {
        let params = CaptureScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();

        let screenshot =
            self.page
                .execute(params)
                .await
                .map_err(|e| TodoError::ScreenshotError {
                    message: e.to_string(),
                })?;

        base64::engine::general_purpose::STANDARD
            .decode(&screenshot.data)
            .map_err(|e| TodoError::ScreenshotError {
                message: e.to_string(),
            })
    }

    async fn open_sibling(&self) -> TodoResult<SharedDriver> {
        let page = Self::open(
            Arc::clone(&self.browser),
            self.context.clone(),
            self.navigation_timeout,
        )
        .await?;
        Ok(Arc::new(page))
    }
}
