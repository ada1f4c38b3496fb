//! Contract template engine
//!
//! This crate provides the two pieces of logic the contract editor runs
//! locally:
//! - Placeholder interpolation: `{{path.to.value}}` tokens in template HTML
//!   are replaced with values from nested template data, leaving unresolved
//!   tokens untouched
//! - Variable suggestions: a navigable, filterable menu over the template
//!   data tree, driven by what the author types after `{{`

pub mod populate;
pub mod scanner;
pub mod suggest;
pub mod variables;

pub use populate::{populate_template, resolve_path, unresolved_placeholders};
pub use scanner::{scan_placeholders, Placeholder};
pub use suggest::{
    active_query, derive_state_from_query, Insertion, MenuKey, MenuOutcome, NavigationState,
    SuggestionMenu,
};
pub use variables::VariableOption;
