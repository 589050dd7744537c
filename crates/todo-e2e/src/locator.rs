//! Locator abstraction for element selection.
//!
//! A [`Locator`] names a set of DOM elements: a base selector, optionally
//! narrowed to the n-th match and then to a descendant of it. The real
//! browser backend turns a locator into query scripts; the in-memory
//! backend interprets it directly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// CSS selector (e.g., ".new-todo")
    Css(String),
    /// Test ID selector (data-testid attribute)
    TestId(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a test ID selector
    #[must_use]
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::TestId(id.into())
    }

    /// Equivalent CSS selector text
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Css(s) => s.clone(),
            Self::TestId(id) => format!("[data-testid=\"{id}\"]"),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "{s}"),
            Self::TestId(id) => write!(f, "testid={id}"),
        }
    }
}

/// Keys the suite presses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Commit input
    Enter,
    /// Cancel editing
    Escape,
    /// Delete the selection
    Backspace,
}

impl Key {
    /// Key name as understood by the DevTools input domain
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Enter => "Enter",
            Self::Escape => "Escape",
            Self::Backspace => "Backspace",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of one element, as returned by [`Locator::state_script`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementState {
    /// Rendered and not `visibility: hidden`
    pub visible: bool,
    /// `checked` property (false for non-checkboxes)
    pub checked: bool,
    /// `value` property for form controls
    pub value: Option<String>,
    /// Class list
    pub classes: Vec<String>,
    /// Element has focus
    pub focused: bool,
    /// Trimmed text content
    pub text: String,
}

impl ElementState {
    /// Check for a class name
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// A locator for one or more elements
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    selector: Selector,
    nth: Option<usize>,
    child: Option<Selector>,
}

impl Locator {
    /// Create a locator from CSS text
    #[must_use]
    pub fn new(css: impl Into<String>) -> Self {
        Self::from_selector(Selector::css(css))
    }

    /// Create a locator from a selector
    #[must_use]
    pub const fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            nth: None,
            child: None,
        }
    }

    /// Create a test-id locator
    #[must_use]
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::from_selector(Selector::test_id(id))
    }

    /// Narrow to the n-th (zero-based) match
    #[must_use]
    pub const fn nth(mut self, index: usize) -> Self {
        self.nth = Some(index);
        self
    }

    /// Narrow to a descendant of each match
    #[must_use]
    pub fn locate(mut self, child: Selector) -> Self {
        self.child = Some(child);
        self
    }

    /// Base selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Index filter, if any
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.nth
    }

    /// Descendant selector, if any
    #[must_use]
    pub const fn child(&self) -> Option<&Selector> {
        self.child.as_ref()
    }

    /// JS expression evaluating to the array of matched elements
    #[must_use]
    pub fn to_all_query(&self) -> String {
        let mut query = format!(
            "Array.from(document.querySelectorAll({}))",
            js_string(&self.selector.to_css())
        );
        if let Some(n) = self.nth {
            query.push_str(&format!(".slice({n}, {})", n + 1));
        }
        if let Some(child) = &self.child {
            query.push_str(&format!(
                ".map(el => el.querySelector({})).filter(Boolean)",
                js_string(&child.to_css())
            ));
        }
        query
    }

    /// JS expression evaluating to the first matched element or null
    #[must_use]
    pub fn to_query(&self) -> String {
        format!("({}[0] ?? null)", self.to_all_query())
    }

    /// JS expression evaluating to the number of matches
    #[must_use]
    pub fn to_count_query(&self) -> String {
        format!("{}.length", self.to_all_query())
    }

    /// Script returning a JSON string array of trimmed text contents
    #[must_use]
    pub fn texts_script(&self) -> String {
        format!(
            "JSON.stringify({}.map(el => (el.textContent || '').trim()))",
            self.to_all_query()
        )
    }

    /// Script returning a JSON-encoded [`ElementState`] or `null`
    #[must_use]
    pub fn state_script(&self) -> String {
        format!(
            r"JSON.stringify((() => {{
  const el = {};
  if (!el) return null;
  const style = window.getComputedStyle(el);
  return {{
    visible: el.getClientRects().length > 0 && style.visibility !== 'hidden',
    checked: !!el.checked,
    value: typeof el.value === 'string' ? el.value : null,
    classes: Array.from(el.classList),
    focused: document.activeElement === el,
    text: (el.textContent || '').trim(),
  }};
}})())",
            self.to_query()
        )
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.selector)?;
        if let Some(n) = self.nth {
            write!(f, " >> nth={n}")?;
        }
        if let Some(child) = &self.child {
            write!(f, " >> {child}")?;
        }
        Ok(())
    }
}

/// Quote text as a JS string literal
#[must_use]
pub fn js_string(text: &str) -> String {
    // JSON string literals are valid JS string literals
    serde_json::Value::String(text.to_string()).to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod selector_tests {
        use super::*;

        #[test]
        fn test_css_selector() {
            let selector = Selector::css(".new-todo");
            assert_eq!(selector.to_css(), ".new-todo");
            assert_eq!(selector.to_string(), ".new-todo");
        }

        #[test]
        fn test_test_id_selector() {
            let selector = Selector::test_id("todo-title");
            assert_eq!(selector.to_css(), "[data-testid=\"todo-title\"]");
            assert_eq!(selector.to_string(), "testid=todo-title");
        }
    }

    mod locator_tests {
        use super::*;

        #[test]
        fn test_plain_query() {
            let locator = Locator::new(".toggle-all");
            assert_eq!(
                locator.to_all_query(),
                "Array.from(document.querySelectorAll(\".toggle-all\"))"
            );
            assert!(locator.to_count_query().ends_with(".length"));
            assert!(locator.to_query().contains("[0] ?? null"));
        }

        #[test]
        fn test_nth_and_child() {
            let locator = Locator::test_id("todo-item")
                .nth(2)
                .locate(Selector::css(".toggle"));
            let query = locator.to_all_query();
            assert!(query.contains("[data-testid=\\\"todo-item\\\"]"));
            assert!(query.contains(".slice(2, 3)"));
            assert!(query.contains("el.querySelector(\".toggle\")"));
            assert_eq!(locator.index(), Some(2));
            assert_eq!(locator.child(), Some(&Selector::css(".toggle")));
        }

        #[test]
        fn test_display() {
            let locator = Locator::test_id("todo-item")
                .nth(1)
                .locate(Selector::css(".edit"));
            assert_eq!(locator.to_string(), "testid=todo-item >> nth=1 >> .edit");
        }

        #[test]
        fn test_scripts_wrap_in_json_stringify() {
            let locator = Locator::new(".new-todo");
            assert!(locator.texts_script().starts_with("JSON.stringify("));
            let state = locator.state_script();
            assert!(state.starts_with("JSON.stringify("));
            assert!(state.contains("document.activeElement === el"));
            assert!(state.contains("classList"));
        }
    }

    mod element_state_tests {
        use super::*;

        #[test]
        fn test_deserialize_state() {
            let state: ElementState = serde_json::from_str(
                r#"{"visible":true,"checked":false,"value":null,"classes":["completed"],"focused":false,"text":"feed the cat"}"#,
            )
            .unwrap();
            assert!(state.visible);
            assert!(state.has_class("completed"));
            assert!(!state.has_class("editing"));
            assert_eq!(state.text, "feed the cat");
        }
    }

    #[test]
    fn test_js_string_escapes_quotes_and_newlines() {
        assert_eq!(js_string(r#"a"b"#), r#""a\"b""#);
        assert_eq!(js_string("line\nbreak"), r#""line\nbreak""#);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::Enter.as_str(), "Enter");
        assert_eq!(Key::Escape.to_string(), "Escape");
        assert_eq!(Key::Backspace.as_str(), "Backspace");
    }
}
