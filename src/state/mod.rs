//! Application state management module.
//!
//! This module contains the single mutable state record for a page session:
//! - Main `State` struct (theme, menu, submission flag, scroll position)
//! - Theme types
//! - Navigation types (header treatment)
//! - Contact form types (fields, validation errors)

mod form;
mod navigation;
mod theme;

pub use form::{Field, ValidationError};
pub use navigation::{HeaderTreatment, MOBILE_BREAKPOINT};
pub use theme::Theme;

// State struct, methods and Default impl are in state_impl.rs
#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::State;
