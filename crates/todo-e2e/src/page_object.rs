//! Page Object Model support.
//!
//! A page object exposes one page as semantic operations and hides its
//! selectors from test bodies. [`UrlMatcher`] decides whether the browser
//! is currently on the page.

/// Trait for page objects representing a page of the application.
pub trait PageObject {
    /// URL pattern that matches this page (e.g. `"/todomvc/*"`)
    fn url_pattern(&self) -> &str;

    /// Absolute URL the page is loaded from
    fn base_url(&self) -> &str;

    /// Get the page name for logging/debugging
    fn page_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Whether `url` belongs to this page
    fn is_at(&self, url: &str) -> bool {
        UrlMatcher::new(self.url_pattern()).matches(url)
    }
}

/// Matches URL paths against a pattern.
///
/// `*` matches any run of characters and a trailing `*` anything after it.
/// Scheme, host and fragment of the URL are ignored, so every hash route
/// of a single-page app matches the same pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMatcher {
    pattern: String,
}

impl UrlMatcher {
    /// Create a new URL matcher
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
        }
    }

    /// Path part of a URL, without query or fragment
    #[must_use]
    pub fn path_of(url: &str) -> &str {
        let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
        let path = rest.find('/').map_or("/", |i| &rest[i..]);
        path.split(['?', '#']).next().unwrap_or(path)
    }

    /// Check if a URL matches the pattern
    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        wildcard(self.pattern.as_bytes(), Self::path_of(url).as_bytes())
    }

    /// Get the pattern
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

fn wildcard(pattern: &[u8], text: &[u8]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some((b'*', rest)) => (0..=text.len()).any(|i| wildcard(rest, &text[i..])),
        Some((c, rest)) => text.first() == Some(c) && wildcard(rest, &text[1..]),
    }
}
