//! Variable suggestion menu for the template editor
//!
//! While the author types after `{{`, the text typed so far is the query.
//! Dots separate levels: `tenant.add` means "inside `tenant`, options
//! starting with `add`". Invalid paths fall back to searching the root.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::variables::VariableOption;

lazy_static! {
    /// An open `{{` immediately before the cursor, followed by path characters
    static ref TRIGGER_PATTERN: Regex = Regex::new(r"\{\{\s*([\w.]*)$").unwrap();
}

/// Query typed after an unclosed `{{` at the end of `text_before_cursor`
pub fn active_query(text_before_cursor: &str) -> Option<&str> {
    TRIGGER_PATTERN
        .captures(text_before_cursor)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Where a query points inside the variable tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState<'a> {
    /// Parents descended into, outermost first
    pub nav_path: Vec<&'a VariableOption>,
    /// Options at the level being browsed
    pub current_level_nodes: &'a [VariableOption],
    /// Text used to filter `current_level_nodes`
    pub search_term: String,
}

impl<'a> NavigationState<'a> {
    /// Options at the current level whose label starts with the search term
    /// (case-insensitive)
    pub fn visible(&self) -> Vec<&'a VariableOption> {
        let needle = self.search_term.to_lowercase();
        self.current_level_nodes
            .iter()
            .filter(|node| node.label.to_lowercase().starts_with(&needle))
            .collect()
    }

    /// Dotted labels of the parents descended into
    pub fn breadcrumb(&self) -> String {
        self.nav_path
            .iter()
            .map(|node| node.label.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Resolve `query` against `tree`.
///
/// Every segment before the last must name a group at the current level.
/// If one does not, navigation resets to the root and the whole query
/// becomes the search term.
pub fn derive_state_from_query<'a>(tree: &'a [VariableOption], query: &str) -> NavigationState<'a> {
    let segments: Vec<&str> = query.split('.').collect();
    let Some((search_term, parents)) = segments.split_last() else {
        return root_state(tree, query);
    };

    let mut level = tree;
    let mut nav_path = Vec::with_capacity(parents.len());

    for segment in parents {
        match level
            .iter()
            .find(|node| node.label == *segment && node.has_children())
        {
            Some(node) => {
                nav_path.push(node);
                level = &node.children;
            }
            None => {
                debug!(query, segment, "Suggestion path not found, searching root");
                return root_state(tree, query);
            }
        }
    }

    NavigationState {
        nav_path,
        current_level_nodes: level,
        search_term: search_term.to_string(),
    }
}

fn root_state<'a>(tree: &'a [VariableOption], query: &str) -> NavigationState<'a> {
    NavigationState {
        nav_path: Vec::new(),
        current_level_nodes: tree,
        search_term: query.to_string(),
    }
}

/// Keys the menu reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    Up,
    Down,
    Enter,
    Escape,
    Backspace,
}

/// A variable chosen for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    /// Fully qualified path of the chosen variable
    pub path: String,
}

impl Insertion {
    /// Placeholder text to put in the document
    pub fn token(&self) -> String {
        format!("{{{{{}}}}}", self.path)
    }
}

/// What the editor should do after the menu handled an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    /// The menu consumed the event and stays open
    Handled,
    /// The menu did not use the event; the editor applies its default
    Ignored,
    /// The menu closed and the editor replaces the trigger with the token
    Inserted(Insertion),
    /// The menu closed without choosing anything
    Dismissed,
}

/// Interactive suggestion menu state
#[derive(Debug, Clone)]
pub struct SuggestionMenu {
    tree: Vec<VariableOption>,
    query: String,
    highlighted: usize,
    open: bool,
}

impl SuggestionMenu {
    pub fn new(tree: Vec<VariableOption>) -> Self {
        Self {
            tree,
            query: String::new(),
            highlighted: 0,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    /// Open (or keep open) the menu with the text typed after the trigger
    pub fn update_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.highlighted = 0;
        self.open = true;
    }

    pub fn state(&self) -> NavigationState<'_> {
        derive_state_from_query(&self.tree, &self.query)
    }

    pub fn candidates(&self) -> Vec<&VariableOption> {
        self.state().visible()
    }

    pub fn highlighted(&self) -> Option<&VariableOption> {
        self.candidates().get(self.highlighted).copied()
    }

    /// Choose the candidate at `index`.
    ///
    /// A leaf closes the menu and yields its path. A group rewrites the query
    /// to `<group path>.` and keeps the menu open one level deeper.
    pub fn select(&mut self, index: usize) -> MenuOutcome {
        let Some((id, descend)) = self
            .candidates()
            .get(index)
            .map(|node| (node.id.clone(), node.has_children()))
        else {
            return MenuOutcome::Ignored;
        };

        if descend {
            self.update_query(format!("{id}."));
            MenuOutcome::Handled
        } else {
            self.close();
            MenuOutcome::Inserted(Insertion { path: id })
        }
    }

    pub fn handle_key(&mut self, key: MenuKey) -> MenuOutcome {
        if !self.open {
            return MenuOutcome::Ignored;
        }

        match key {
            MenuKey::Up | MenuKey::Down => {
                let len = self.candidates().len();
                if len > 0 {
                    self.highlighted = match key {
                        MenuKey::Up => (self.highlighted + len - 1) % len,
                        _ => (self.highlighted + 1) % len,
                    };
                }
                MenuOutcome::Handled
            }
            MenuKey::Enter => self.select(self.highlighted),
            MenuKey::Escape => {
                self.close();
                MenuOutcome::Dismissed
            }
            MenuKey::Backspace => self.navigate_back(),
        }
    }

    /// Backspace on an empty search term pops one level instead of deleting
    /// the trigger
    fn navigate_back(&mut self) -> MenuOutcome {
        let parent_query = {
            let state = self.state();
            if !state.search_term.is_empty() || state.nav_path.is_empty() {
                return MenuOutcome::Ignored;
            }
            let depth = state.nav_path.len();
            match depth {
                1 => String::new(),
                _ => format!("{}.", state.nav_path[depth - 2].id),
            }
        };

        self.update_query(parent_query);
        MenuOutcome::Handled
    }

    fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.highlighted = 0;
    }
}
