//! In-memory page double.
//!
//! [`MockTodoPage`] answers the same locators as the real DOM so the page
//! object's plumbing (auto-waiting, step tagging, index to record
//! resolution, storage reads, context sharing) can be tested without a
//! browser. It is not a reference for the application: the feature suites
//! assert against the real demo in Chromium, and nothing here is evidence
//! of how the demo behaves.
//!
//! Only compiled for unit tests and with the `mock` feature. Pages opened
//! as siblings share one storage map, like pages of one browser context.

use crate::driver::{PageDriver, SharedDriver};
use crate::locator::{ElementState, Key, Locator, Selector};
use crate::model::{counter_text, normalize_title, Filter, StoredTodo};
use crate::result::{TodoError, TodoResult};
use crate::selectors;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// PNG file signature, returned as the mock screenshot
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

type Storage = Arc<Mutex<HashMap<String, String>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock browser handing out pages with fresh storage
#[derive(Debug, Clone)]
pub struct MockBrowser {
    storage_key: String,
}

impl MockBrowser {
    /// Create a mock browser whose pages persist under `storage_key`
    #[must_use]
    pub fn new(storage_key: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
        }
    }

    /// Blank page in a new context with empty storage
    #[must_use]
    pub fn new_isolated_page(&self) -> MockTodoPage {
        MockTodoPage::with_storage(self.storage_key.clone(), Storage::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    NewTodo,
    ToggleAll,
    ToggleAllLabel,
    Counter,
    ClearCompleted,
    Main,
    Footer,
    FilterLink(Filter),
    Item(usize),
    Toggle(usize),
    Title(usize),
    Edit(usize),
    Destroy(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    None,
    NewTodo,
    Edit,
}

#[derive(Debug)]
struct AppState {
    url: String,
    history: Vec<String>,
    loaded: bool,
    todos: Vec<StoredTodo>,
    filter: Filter,
    draft: String,
    editing: Option<usize>,
    edit_draft: String,
    focus: Focus,
    hovered: Option<usize>,
}

impl AppState {
    fn blank() -> Self {
        Self {
            url: "about:blank".to_string(),
            history: Vec::new(),
            loaded: false,
            todos: Vec::new(),
            filter: Filter::All,
            draft: String::new(),
            editing: None,
            edit_draft: String::new(),
            focus: Focus::None,
            hovered: None,
        }
    }

    fn visible(&self) -> Vec<usize> {
        self.todos
            .iter()
            .enumerate()
            .filter(|(_, t)| self.filter.shows(t.completed))
            .map(|(i, _)| i)
            .collect()
    }

    fn has_items(&self) -> bool {
        !self.todos.is_empty()
    }

    fn all_completed(&self) -> bool {
        self.has_items() && self.todos.iter().all(|t| t.completed)
    }

    fn active_count(&self) -> usize {
        self.todos.iter().filter(|t| !t.completed).count()
    }

    fn base_nodes(&self, selector: &Selector) -> Vec<Node> {
        if !self.loaded {
            return Vec::new();
        }
        let when_items = |node: Node| if self.has_items() { vec![node] } else { vec![] };
        match selector {
            Selector::TestId(id) if id == selectors::TODO_ITEM => {
                self.visible().into_iter().map(Node::Item).collect()
            }
            Selector::TestId(id) if id == selectors::TODO_TITLE => {
                self.visible().into_iter().map(Node::Title).collect()
            }
            Selector::TestId(id) if id == selectors::TODO_COUNT => when_items(Node::Counter),
            Selector::TestId(_) => Vec::new(),
            Selector::Css(css) => match css.as_str() {
                selectors::NEW_TODO => vec![Node::NewTodo],
                selectors::TOGGLE_ALL => when_items(Node::ToggleAll),
                selectors::TOGGLE_ALL_LABEL => when_items(Node::ToggleAllLabel),
                selectors::MAIN => when_items(Node::Main),
                selectors::FOOTER => when_items(Node::Footer),
                selectors::CLEAR_COMPLETED => {
                    if self.todos.iter().any(|t| t.completed) {
                        vec![Node::ClearCompleted]
                    } else {
                        vec![]
                    }
                }
                selectors::TOGGLE => self.visible().into_iter().map(Node::Toggle).collect(),
                selectors::DESTROY => self.visible().into_iter().map(Node::Destroy).collect(),
                selectors::EDIT => self.editing.map(Node::Edit).into_iter().collect(),
                other => selectors::filter_for_css(other)
                    .map(|f| when_items(Node::FilterLink(f)))
                    .unwrap_or_default(),
            },
        }
    }

    fn child_node(&self, parent: Node, child: &Selector) -> Option<Node> {
        let Node::Item(i) = parent else {
            return None;
        };
        match child {
            Selector::TestId(id) if id == selectors::TODO_TITLE => Some(Node::Title(i)),
            Selector::Css(css) if css == "label" => Some(Node::Title(i)),
            Selector::Css(css) if css == selectors::TOGGLE => Some(Node::Toggle(i)),
            Selector::Css(css) if css == selectors::DESTROY => Some(Node::Destroy(i)),
            Selector::Css(css) if css == selectors::EDIT => {
                (self.editing == Some(i)).then_some(Node::Edit(i))
            }
            _ => None,
        }
    }

    fn resolve(&self, locator: &Locator) -> Vec<Node> {
        let mut nodes = self.base_nodes(locator.selector());
        if let Some(n) = locator.index() {
            nodes = nodes.into_iter().nth(n).into_iter().collect();
        }
        if let Some(child) = locator.child() {
            nodes = nodes
                .into_iter()
                .filter_map(|node| self.child_node(node, child))
                .collect();
        }
        nodes
    }

    fn first(&self, locator: &Locator) -> TodoResult<Node> {
        self.resolve(locator)
            .into_iter()
            .next()
            .ok_or_else(|| TodoError::ElementNotFound {
                locator: locator.to_string(),
            })
    }

    fn state(&self, node: Node) -> ElementState {
        let mut state = ElementState {
            visible: true,
            ..ElementState::default()
        };
        match node {
            Node::NewTodo => {
                state.value = Some(self.draft.clone());
                state.focused = self.focus == Focus::NewTodo;
                state.classes = vec!["new-todo".to_string()];
            }
            Node::ToggleAll => {
                state.checked = self.all_completed();
                state.value = Some("on".to_string());
                state.classes = vec!["toggle-all".to_string()];
            }
            Node::ToggleAllLabel => state.text = "Mark all as complete".to_string(),
            Node::Counter => state.text = counter_text(self.active_count()),
            Node::ClearCompleted => {
                state.text = "Clear completed".to_string();
                state.classes = vec!["clear-completed".to_string()];
            }
            Node::Main => state.classes = vec!["main".to_string()],
            Node::Footer => state.classes = vec!["footer".to_string()],
            Node::FilterLink(filter) => {
                state.text = filter.label().to_string();
                if filter == self.filter {
                    state.classes = vec!["selected".to_string()];
                }
            }
            Node::Item(i) => {
                let todo = &self.todos[i];
                state.text = todo.title.clone();
                if todo.completed {
                    state.classes.push("completed".to_string());
                }
                if self.editing == Some(i) {
                    state.classes.push("editing".to_string());
                }
            }
            Node::Toggle(i) => {
                state.visible = self.editing != Some(i);
                state.checked = self.todos[i].completed;
                state.value = Some("on".to_string());
                state.classes = vec!["toggle".to_string()];
            }
            Node::Title(i) => {
                state.visible = self.editing != Some(i);
                state.text = self.todos[i].title.clone();
            }
            Node::Edit(_) => {
                state.value = Some(self.edit_draft.clone());
                state.focused = self.focus == Focus::Edit;
                state.classes = vec!["edit".to_string()];
            }
            Node::Destroy(i) => {
                state.visible = self.hovered == Some(i) && self.editing != Some(i);
                state.classes = vec!["destroy".to_string()];
            }
        }
        state
    }

    fn require_visible(&self, node: Node, locator: &Locator) -> TodoResult<()> {
        if self.state(node).visible {
            Ok(())
        } else {
            Err(TodoError::InputError {
                message: format!("{locator} is not visible"),
            })
        }
    }

    fn set_all(&mut self, completed: bool) {
        for todo in &mut self.todos {
            todo.completed = completed;
        }
    }

    fn commit_edit(&mut self) {
        if let Some(i) = self.editing.take() {
            let title = normalize_title(&self.edit_draft).to_string();
            if title.is_empty() {
                let _ = self.todos.remove(i);
            } else {
                self.todos[i].title = title;
            }
        }
        self.edit_draft.clear();
        self.focus = Focus::None;
    }

    fn cancel_edit(&mut self) {
        self.editing = None;
        self.edit_draft.clear();
        self.focus = Focus::None;
    }
}

/// Page of the in-memory TodoMVC application
#[derive(Debug, Clone)]
pub struct MockTodoPage {
    storage_key: String,
    storage: Storage,
    state: Arc<Mutex<AppState>>,
}

impl MockTodoPage {
    fn with_storage(storage_key: String, storage: Storage) -> Self {
        Self {
            storage_key,
            storage,
            state: Arc::new(Mutex::new(AppState::blank())),
        }
    }

    fn load(&self) -> TodoResult<Vec<StoredTodo>> {
        match lock(&self.storage).get(&self.storage_key) {
            Some(raw) => serde_json::from_str(raw).map_err(|e| TodoError::StorageError {
                message: e.to_string(),
            }),
            None => Ok(Vec::new()),
        }
    }

    fn persist(&self, todos: &[StoredTodo]) -> TodoResult<()> {
        let raw = serde_json::to_string(todos)?;
        let _ = lock(&self.storage).insert(self.storage_key.clone(), raw);
        Ok(())
    }

    /// Run a mutation against the app state and persist the item list
    fn mutate<T>(&self, f: impl FnOnce(&mut AppState) -> TodoResult<T>) -> TodoResult<T> {
        let (out, todos) = {
            let mut state = lock(&self.state);
            let out = f(&mut state)?;
            (out, state.todos.clone())
        };
        self.persist(&todos)?;
        Ok(out)
    }

    fn read<T>(&self, f: impl FnOnce(&AppState) -> T) -> T {
        f(&lock(&self.state))
    }
}

#[async_trait]
impl PageDriver for MockTodoPage {
    async fn goto(&self, url: &str) -> TodoResult<()> {
        if !(url.starts_with("http://") || url.starts_with("https://") || url == "about:blank") {
            return Err(TodoError::NavigationError {
                url: url.to_string(),
                message: "unsupported scheme".to_string(),
            });
        }
        let todos = self.load()?;
        let mut state = lock(&self.state);
        let previous = std::mem::replace(&mut state.url, url.to_string());
        state.history.push(previous);
        state.loaded = url != "about:blank";
        state.todos = todos;
        state.filter = Filter::from_url(url);
        state.draft.clear();
        state.editing = None;
        state.edit_draft.clear();
        state.hovered = None;
        state.focus = if state.loaded {
            Focus::NewTodo
        } else {
            Focus::None
        };
        Ok(())
    }

    async fn go_back(&self) -> TodoResult<()> {
        let mut state = lock(&self.state);
        if let Some(url) = state.history.pop() {
            state.filter = Filter::from_url(&url);
            state.url = url;
        }
        Ok(())
    }

    async fn current_url(&self) -> TodoResult<String> {
        Ok(self.read(|s| s.url.clone()))
    }

    async fn count(&self, locator: &Locator) -> TodoResult<usize> {
        Ok(self.read(|s| s.resolve(locator).len()))
    }

    async fn texts(&self, locator: &Locator) -> TodoResult<Vec<String>> {
        Ok(self.read(|s| {
            s.resolve(locator)
                .into_iter()
                .map(|node| s.state(node).text)
                .collect()
        }))
    }

    async fn element_state(&self, locator: &Locator) -> TodoResult<Option<ElementState>> {
        Ok(self.read(|s| s.resolve(locator).first().map(|node| s.state(*node))))
    }

    async fn click(&self, locator: &Locator) -> TodoResult<()> {
        self.mutate(|s| {
            let node = s.first(locator)?;
            s.require_visible(node, locator)?;
            if s.focus == Focus::Edit && !matches!(node, Node::Edit(_)) {
                s.commit_edit();
            }
            match s.first(locator)? {
                Node::NewTodo => s.focus = Focus::NewTodo,
                Node::Toggle(i) => s.todos[i].completed = !s.todos[i].completed,
                Node::ToggleAll | Node::ToggleAllLabel => {
                    let target = !s.all_completed();
                    s.set_all(target);
                }
                Node::ClearCompleted => s.todos.retain(|t| !t.completed),
                Node::Destroy(i) => {
                    let _ = s.todos.remove(i);
                    s.hovered = None;
                }
                Node::FilterLink(filter) => {
                    let base = s.url.split('#').next().unwrap_or_default().to_string();
                    let next = format!("{base}{}", filter.route());
                    // same-document link to the current URL adds no entry
                    if next != s.url {
                        let previous = std::mem::replace(&mut s.url, next);
                        s.history.push(previous);
                    }
                    s.filter = filter;
                }
                Node::Counter | Node::Main | Node::Footer | Node::Item(_) | Node::Title(_) => {}
                Node::Edit(_) => s.focus = Focus::Edit,
            }
            Ok(())
        })
    }

    async fn double_click(&self, locator: &Locator) -> TodoResult<()> {
        self.mutate(|s| {
            let node = s.first(locator)?;
            s.require_visible(node, locator)?;
            if let Node::Item(i) | Node::Title(i) = node {
                s.editing = Some(i);
                s.edit_draft = s.todos[i].title.clone();
                s.focus = Focus::Edit;
            }
            Ok(())
        })
    }

    async fn fill(&self, locator: &Locator, text: &str) -> TodoResult<()> {
        self.mutate(|s| match s.first(locator)? {
            Node::NewTodo => {
                s.draft = text.to_string();
                s.focus = Focus::NewTodo;
                Ok(())
            }
            Node::Edit(_) => {
                s.edit_draft = text.to_string();
                s.focus = Focus::Edit;
                Ok(())
            }
            _ => Err(TodoError::InputError {
                message: format!("{locator} is not a text control"),
            }),
        })
    }

    async fn press(&self, locator: &Locator, key: Key) -> TodoResult<()> {
        self.mutate(|s| {
            match (s.first(locator)?, key) {
                (Node::NewTodo, Key::Enter) => {
                    let title = normalize_title(&s.draft).to_string();
                    if !title.is_empty() {
                        s.todos
                            .push(StoredTodo::new(Uuid::new_v4().to_string(), title, false));
                    }
                    s.draft.clear();
                }
                (Node::NewTodo, Key::Backspace) => {
                    let _ = s.draft.pop();
                }
                (Node::Edit(_), Key::Enter) => s.commit_edit(),
                (Node::Edit(_), Key::Escape) => s.cancel_edit(),
                (Node::Edit(_), Key::Backspace) => {
                    let _ = s.edit_draft.pop();
                }
                _ => {}
            }
            Ok(())
        })
    }

    async fn blur(&self, locator: &Locator) -> TodoResult<()> {
        self.mutate(|s| {
            match s.first(locator)? {
                Node::Edit(_) => s.commit_edit(),
                _ => s.focus = Focus::None,
            }
            Ok(())
        })
    }

    async fn hover(&self, locator: &Locator) -> TodoResult<()> {
        let mut state = lock(&self.state);
        state.hovered = match state.first(locator)? {
            Node::Item(i) | Node::Title(i) | Node::Toggle(i) | Node::Destroy(i) => Some(i),
            _ => None,
        };
        Ok(())
    }

    async fn local_storage(&self, key: &str) -> TodoResult<Option<String>> {
        Ok(lock(&self.storage).get(key).cloned())
    }

    async fn screenshot(&self) -> TodoResult<Vec<u8>> {
        Ok(PNG_SIGNATURE.to_vec())
    }

    async fn open_sibling(&self) -> TodoResult<SharedDriver> {
        Ok(Arc::new(Self::with_storage(
            self.storage_key.clone(),
            Arc::clone(&self.storage),
        )))
    }
}
