//! Suite configuration
//!
//! Layered the same way every run: built-in defaults, then an optional YAML
//! file named by `TODO_E2E_CONFIG`, then individual environment overrides.

use crate::result::{TodoError, TodoResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Public TodoMVC demo the suite targets by default
pub const DEFAULT_BASE_URL: &str = "https://demo.playwright.dev/todomvc";

/// Client-side storage key the demo persists its items under
pub const DEFAULT_STORAGE_KEY: &str = "react-todos";

/// Default timeout for verification polling (5 seconds)
pub const DEFAULT_EXPECT_TIMEOUT_MS: u64 = 5_000;

/// Default polling interval (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Default navigation timeout (30 seconds)
pub const DEFAULT_NAVIGATION_TIMEOUT_MS: u64 = 30_000;

/// Environment variable naming a YAML config file
pub const CONFIG_FILE_ENV: &str = "TODO_E2E_CONFIG";

/// Which page implementation backs the page object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Real Chromium over the DevTools protocol
    #[default]
    Chromium,
    /// In-memory test double for exercising the page object itself
    #[cfg(any(test, feature = "mock"))]
    Mock,
}

impl Backend {
    /// Parse a backend name (case-insensitive)
    pub fn parse(value: &str) -> TodoResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "chromium" | "chrome" | "cdp" => Ok(Self::Chromium),
            #[cfg(any(test, feature = "mock"))]
            "mock" => Ok(Self::Mock),
            #[cfg(not(any(test, feature = "mock")))]
            "mock" => Err(TodoError::ConfigError {
                message: "the mock backend needs the `mock` feature".to_string(),
            }),
            other => Err(TodoError::ConfigError {
                message: format!("unknown backend '{other}' (expected 'chromium' or 'mock')"),
            }),
        }
    }

    /// Name used in logs and config files
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chromium => "chromium",
            #[cfg(any(test, feature = "mock"))]
            Self::Mock => "mock",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a suite run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct E2eConfig {
    /// Page backend
    pub backend: Backend,
    /// Application URL loaded by `navigate()`
    pub base_url: String,
    /// Storage key holding the persisted items
    pub storage_key: String,
    /// Run Chromium headless
    pub headless: bool,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<PathBuf>,
    /// Chromium sandbox (disable for containers)
    pub sandbox: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Verification timeout in milliseconds
    pub expect_timeout_ms: u64,
    /// Verification polling interval in milliseconds
    pub poll_interval_ms: u64,
    /// Navigation timeout in milliseconds
    pub navigation_timeout_ms: u64,
    /// Directory for failure artifacts
    pub artifacts_dir: PathBuf,
    /// Capture a screenshot when a step fails
    pub screenshot_on_failure: bool,
}

impl Default for E2eConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Chromium,
            base_url: DEFAULT_BASE_URL.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            headless: true,
            chromium_path: None,
            sandbox: true,
            viewport_width: 1280,
            viewport_height: 720,
            expect_timeout_ms: DEFAULT_EXPECT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            navigation_timeout_ms: DEFAULT_NAVIGATION_TIMEOUT_MS,
            artifacts_dir: PathBuf::from("target/todo-e2e"),
            screenshot_on_failure: true,
        }
    }
}

impl E2eConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load defaults, the optional YAML file and environment overrides
    pub fn load() -> TodoResult<Self> {
        let lookup = |key: &str| std::env::var(key).ok();
        let config = match lookup(CONFIG_FILE_ENV) {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.with_env(lookup)
    }

    /// Read a YAML config file; missing fields keep their defaults
    pub fn from_yaml_file(path: impl AsRef<Path>) -> TodoResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| TodoError::ConfigError {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        Self::from_yaml_str(&text)
    }

    /// Parse YAML config text
    pub fn from_yaml_str(text: &str) -> TodoResult<Self> {
        let config: Self = serde_yaml_ng::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides through `lookup`
    pub fn with_env<F>(mut self, lookup: F) -> TodoResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("TODO_E2E_BACKEND") {
            self.backend = Backend::parse(&v)?;
        }
        if let Some(v) = lookup("TODO_E2E_BASE_URL") {
            self.base_url = v;
        }
        if let Some(v) = lookup("TODO_E2E_HEADLESS") {
            self.headless = parse_bool("TODO_E2E_HEADLESS", &v)?;
        }
        if let Some(v) = lookup("CHROMIUM_PATH") {
            self.chromium_path = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("TODO_E2E_NO_SANDBOX") {
            self.sandbox = !parse_bool("TODO_E2E_NO_SANDBOX", &v)?;
        }
        if let Some(v) = lookup("TODO_E2E_EXPECT_TIMEOUT_MS") {
            self.expect_timeout_ms = parse_ms("TODO_E2E_EXPECT_TIMEOUT_MS", &v)?;
        }
        if let Some(v) = lookup("TODO_E2E_POLL_INTERVAL_MS") {
            self.poll_interval_ms = parse_ms("TODO_E2E_POLL_INTERVAL_MS", &v)?;
        }
        if let Some(v) = lookup("TODO_E2E_ARTIFACTS_DIR") {
            self.artifacts_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("TODO_E2E_SCREENSHOT_ON_FAILURE") {
            self.screenshot_on_failure = parse_bool("TODO_E2E_SCREENSHOT_ON_FAILURE", &v)?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject values that would make every wait meaningless
    pub fn validate(&self) -> TodoResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(TodoError::ConfigError {
                message: "base_url must not be empty".to_string(),
            });
        }
        if self.poll_interval_ms == 0 {
            return Err(TodoError::ConfigError {
                message: "poll_interval_ms must be greater than zero".to_string(),
            });
        }
        if self.poll_interval_ms > self.expect_timeout_ms {
            return Err(TodoError::ConfigError {
                message: format!(
                    "poll_interval_ms ({}) exceeds expect_timeout_ms ({})",
                    self.poll_interval_ms, self.expect_timeout_ms
                ),
            });
        }
        Ok(())
    }

    /// Set backend
    #[must_use]
    pub const fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set verification timeout
    #[must_use]
    pub const fn with_expect_timeout(mut self, timeout_ms: u64) -> Self {
        self.expect_timeout_ms = timeout_ms;
        self
    }

    /// Set verification polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval_ms: u64) -> Self {
        self.poll_interval_ms = interval_ms;
        self
    }

    /// Set artifacts directory
    #[must_use]
    pub fn with_artifacts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifacts_dir = dir.into();
        self
    }

    /// Enable or disable screenshots on failure
    #[must_use]
    pub const fn with_screenshot_on_failure(mut self, enabled: bool) -> Self {
        self.screenshot_on_failure = enabled;
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Verification timeout as Duration
    #[must_use]
    pub const fn expect_timeout(&self) -> Duration {
        Duration::from_millis(self.expect_timeout_ms)
    }

    /// Poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Navigation timeout as Duration
    #[must_use]
    pub const fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }
}

fn parse_bool(key: &str, value: &str) -> TodoResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(TodoError::ConfigError {
            message: format!("{key}: '{other}' is not a boolean"),
        }),
    }
}

fn parse_ms(key: &str, value: &str) -> TodoResult<u64> {
    value.trim().parse().map_err(|_| TodoError::ConfigError {
        message: format!("{key}: '{value}' is not a millisecond count"),
    })
}
