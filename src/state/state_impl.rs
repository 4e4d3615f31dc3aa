use std::collections::BTreeSet;

use super::theme::Theme;

/// Houses data representative of application state.
///
/// Booleans here are the source of truth; the page only ever receives a
/// projection of them.
#[derive(Debug, Default)]
pub struct State {
    current_theme: Theme,
    menu_open: bool,
    form_submitting: bool,
    scroll_y: f64,
    revealed_blocks: BTreeSet<usize>, // Indices of blocks whose entrance already played
}

impl State {
    /// Return the active theme.
    ///
    pub fn current_theme(&self) -> Theme {
        self.current_theme
    }

    /// Set the active theme.
    ///
    pub fn set_current_theme(&mut self, theme: Theme) -> &mut Self {
        self.current_theme = theme;
        self
    }

    /// Return whether the mobile menu is expanded.
    ///
    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Set whether the mobile menu is expanded.
    ///
    pub fn set_menu_open(&mut self, open: bool) -> &mut Self {
        self.menu_open = open;
        self
    }

    /// Return whether a contact form submission is in flight.
    ///
    pub fn is_form_submitting(&self) -> bool {
        self.form_submitting
    }

    /// Set the in-flight submission flag.
    ///
    pub fn set_form_submitting(&mut self, submitting: bool) -> &mut Self {
        self.form_submitting = submitting;
        self
    }

    /// Return the last observed vertical scroll offset.
    ///
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Record the vertical scroll offset.
    ///
    pub fn set_scroll_y(&mut self, scroll_y: f64) -> &mut Self {
        self.scroll_y = scroll_y;
        self
    }

    /// Return whether the block already played its entrance animation.
    ///
    pub fn is_block_revealed(&self, index: usize) -> bool {
        self.revealed_blocks.contains(&index)
    }

    /// Mark a block as revealed. Returns false when it already was.
    ///
    pub fn reveal_block(&mut self, index: usize) -> bool {
        self.revealed_blocks.insert(index)
    }

    /// Return the number of revealed blocks.
    ///
    pub fn revealed_count(&self) -> usize {
        self.revealed_blocks.len()
    }
}
