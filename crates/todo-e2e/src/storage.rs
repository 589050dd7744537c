//! Read-only view of the application's persisted item list.
//!
//! Storage belongs to the application. The suite only reads it, through
//! the page it is testing, and never caches a read.

use crate::driver::PageDriver;
use crate::model::{Filter, StoredTodo};
use crate::result::{TodoError, TodoResult};

/// Decode the raw storage value; a missing key is an empty list
///
/// # Errors
///
/// Returns `StorageError` when the value is not a list of item records
pub fn parse_todos(raw: Option<&str>) -> TodoResult<Vec<StoredTodo>> {
    match raw {
        None => Ok(Vec::new()),
        Some(text) => serde_json::from_str(text).map_err(|e| TodoError::StorageError {
            message: format!("unreadable item list: {e}"),
        }),
    }
}

/// Current item list persisted by the page under `key`
///
/// # Errors
///
/// Returns error if storage cannot be read or decoded
pub async fn read_todos(driver: &dyn PageDriver, key: &str) -> TodoResult<Vec<StoredTodo>> {
    let raw = driver.local_storage(key).await?;
    parse_todos(raw.as_deref())
}

/// Records the given filter lists, in display order
#[must_use]
pub fn visible(todos: &[StoredTodo], filter: Filter) -> Vec<&StoredTodo> {
    todos.iter().filter(|t| filter.shows(t.completed)).collect()
}

/// Number of completed records
#[must_use]
pub fn completed_count(todos: &[StoredTodo]) -> usize {
    todos.iter().filter(|t| t.completed).count()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Vec<StoredTodo> {
        vec![
            StoredTodo::new("1", "buy some cheese", false),
            StoredTodo::new("2", "feed the cat", true),
            StoredTodo::new("3", "book a doctors appointment", false),
        ]
    }

    #[test]
    fn test_missing_key_is_empty() {
        assert!(parse_todos(None).unwrap().is_empty());
    }

    #[test]
    fn test_parse_records() {
        let raw = r#"[{"id":"a","title":"feed the cat","completed":false}]"#;
        assert_eq!(
            parse_todos(Some(raw)).unwrap(),
            vec![StoredTodo::new("a", "feed the cat", false)]
        );
    }

    #[test]
    fn test_garbage_is_storage_error() {
        let err = parse_todos(Some("{not json")).unwrap_err();
        assert!(matches!(err, TodoError::StorageError { .. }));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_visible_follows_filter() {
        let todos = sample();
        let titles = |f| {
            visible(&todos, f)
                .into_iter()
                .map(|t| t.title.as_str())
                .collect::<Vec<_>>()
        };
        assert_eq!(titles(Filter::All).len(), 3);
        assert_eq!(
            titles(Filter::Active),
            vec!["buy some cheese", "book a doctors appointment"]
        );
        assert_eq!(titles(Filter::Completed), vec!["feed the cat"]);
        assert_eq!(completed_count(&todos), 1);
    }
}
