//! Named steps.
//!
//! A step labels a stretch of a test. It runs inside an `info` span so log
//! lines carry the label, tags a failure with the label, and on failure
//! saves a screenshot of the page into the artifacts directory.

use crate::config::E2eConfig;
use crate::driver::PageDriver;
use crate::result::{TodoError, TodoResult};
use regex::Regex;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

/// Where failure screenshots go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureArtifacts {
    dir: PathBuf,
    enabled: bool,
}

impl FailureArtifacts {
    /// Artifact settings of a suite configuration
    #[must_use]
    pub fn from_config(config: &E2eConfig) -> Self {
        Self {
            dir: config.artifacts_dir.clone(),
            enabled: config.screenshot_on_failure,
        }
    }

    /// Never capture anything
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            dir: PathBuf::new(),
            enabled: false,
        }
    }

    /// Target directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save a screenshot for a failed step, returning its path
    ///
    /// # Errors
    ///
    /// Returns error if the screenshot cannot be taken or written
    pub async fn capture(&self, driver: &dyn PageDriver, step: &str) -> TodoResult<Option<PathBuf>> {
        if !self.enabled {
            return Ok(None);
        }
        let png = driver.screenshot().await?;
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self
            .dir
            .join(format!("{}-{}.png", slug(step)?, Uuid::new_v4().simple()));
        tokio::fs::write(&path, png).await?;
        Ok(Some(path))
    }
}

static SEPARATORS: OnceLock<Regex> = OnceLock::new();

fn separators() -> TodoResult<&'static Regex> {
    if let Some(regex) = SEPARATORS.get() {
        return Ok(regex);
    }
    let regex = Regex::new("[^a-z0-9]+").map_err(|e| TodoError::ScreenshotError {
        message: e.to_string(),
    })?;
    Ok(SEPARATORS.get_or_init(|| regex))
}

/// File-name-safe form of a step label
///
/// # Errors
///
/// Returns error if the slug pattern fails to compile
pub fn slug(step: &str) -> TodoResult<String> {
    let separators = separators()?;
    let lowered = step.to_lowercase();
    let slug = separators.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');
    Ok(if slug.is_empty() {
        "step".to_string()
    } else {
        slug.to_string()
    })
}

/// Run `body` as the step `name`.
///
/// Failures come back as `StepFailed`. Only the innermost failing step
/// takes a screenshot; enclosing steps just add their label.
///
/// # Errors
///
/// Returns the body's failure wrapped in `StepFailed`
pub async fn step<T, F>(
    name: &str,
    driver: &dyn PageDriver,
    artifacts: &FailureArtifacts,
    body: F,
) -> TodoResult<T>
where
    F: Future<Output = TodoResult<T>>,
{
    let span = info_span!("step", step = name);
    let outcome = body.instrument(span).await;
    let source = match outcome {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    if !matches!(source, TodoError::StepFailed { .. }) {
        match artifacts.capture(driver, name).await {
            Ok(Some(path)) => info!(step = name, path = %path.display(), "saved failure screenshot"),
            Ok(None) => {}
            Err(e) => warn!(step = name, error = %e, "could not save failure screenshot"),
        }
    }

    Err(TodoError::StepFailed {
        step: name.to_string(),
        source: Box::new(source),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mock::{MockBrowser, PNG_SIGNATURE};

    mod slug_tests {
        use super::*;

        #[test]
        fn test_slug() {
            assert_eq!(slug("Mark all as complete").unwrap(), "mark-all-as-complete");
            assert_eq!(slug("  edit #2: trim!  ").unwrap(), "edit-2-trim");
            assert_eq!(slug("***").unwrap(), "step");
        }

        #[test]
        fn test_separator_pattern_compiled_once() {
            let first = separators().unwrap();
            let _ = slug("Filter active").unwrap();
            assert!(std::ptr::eq(first, separators().unwrap()));
        }
    }

    mod step_tests {
        use super::*;

        #[tokio::test]
        async fn test_success_passes_value_through() {
            let page = MockBrowser::new("k").new_isolated_page();
            let value = step("ok", &page, &FailureArtifacts::disabled(), async { Ok(7) })
                .await
                .unwrap();
            assert_eq!(value, 7);
        }

        #[tokio::test]
        async fn test_failure_is_labelled_and_captured() {
            let dir = tempfile::tempdir().unwrap();
            let config = E2eConfig::default().with_artifacts_dir(dir.path());
            let artifacts = FailureArtifacts::from_config(&config);
            let page = MockBrowser::new("k").new_isolated_page();

            let err = step("Create todo", &page, &artifacts, async {
                Err::<(), _>(TodoError::ElementNotFound {
                    locator: ".new-todo".to_string(),
                })
            })
            .await
            .unwrap_err();

            match &err {
                TodoError::StepFailed { step, source } => {
                    assert_eq!(step, "Create todo");
                    assert!(matches!(**source, TodoError::ElementNotFound { .. }));
                }
                other => panic!("unexpected error: {other}"),
            }

            let shots: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
            assert_eq!(shots.len(), 1);
            let path = shots[0].as_ref().unwrap().path();
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            assert!(name.starts_with("create-todo-"));
            assert!(std::fs::read(&path).unwrap().starts_with(&PNG_SIGNATURE));
        }

        #[tokio::test]
        async fn test_nested_steps_capture_once() {
            let dir = tempfile::tempdir().unwrap();
            let config = E2eConfig::default().with_artifacts_dir(dir.path());
            let artifacts = FailureArtifacts::from_config(&config);
            let page = MockBrowser::new("k").new_isolated_page();

            let err = step("outer", &page, &artifacts, async {
                step("inner", &page, &artifacts, async {
                    Err::<(), _>(TodoError::InputError {
                        message: "hidden".to_string(),
                    })
                })
                .await
            })
            .await
            .unwrap_err();

            assert!(matches!(err.root(), TodoError::InputError { .. }));
            assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
        }
    }
}
