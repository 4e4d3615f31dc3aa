//! Light/dark theme handling.

use crate::config::THEME_KEY;
use crate::page::Page;
use crate::session::{DeferredAction, Session};
use crate::state::Theme;
use log::*;
use std::time::Duration;

/// Inline transition applied to the body while the theme switches.
///
pub const THEME_TRANSITION: &str = "background-color 0.3s ease, color 0.3s ease";

/// How long the transition override stays on the body.
///
pub const THEME_TRANSITION_WINDOW: Duration = Duration::from_millis(300);

pub struct ThemeController;

impl ThemeController {
    /// Resolve the initial theme (explicit preference, then the OS signal)
    /// and apply it.
    ///
    pub fn initialize<P: Page>(session: &mut Session<P>, prefers_dark: bool) -> Theme {
        let theme = match Self::explicit_preference(session) {
            Some(theme) => {
                debug!("Using persisted theme preference '{}'", theme);
                theme
            }
            None => Theme::from_system(prefers_dark),
        };
        info!("Initializing theme '{}'...", theme);
        Self::apply(session, theme);
        theme
    }

    /// Flip the theme, apply it and persist the explicit choice.
    ///
    pub fn toggle<P: Page>(session: &mut Session<P>) -> Theme {
        let theme = session.state.current_theme().toggled();
        debug!("Toggling theme to '{}'...", theme);
        Self::apply(session, theme);
        if let Err(e) = session.preferences.set(THEME_KEY, theme.as_str()) {
            error!("Failed to persist theme preference: {}", e);
        }
        theme
    }

    /// Follow an OS preference change unless the visitor chose a theme
    /// explicitly. Returns whether the change was applied.
    ///
    pub fn on_system_change<P: Page>(session: &mut Session<P>, prefers_dark: bool) -> bool {
        if Self::explicit_preference(session).is_some() {
            debug!("Ignoring system theme change, explicit preference set");
            return false;
        }
        Self::apply(session, Theme::from_system(prefers_dark));
        true
    }

    /// Make `theme` current and project it onto the document.
    ///
    pub fn apply<P: Page>(session: &mut Session<P>, theme: Theme) {
        session.state.set_current_theme(theme);
        session.page.set_theme_attribute(theme);
        session.page.set_theme_icon(theme.toggle_icon());
        session.page.set_body_transition(Some(THEME_TRANSITION));
        session.defer(THEME_TRANSITION_WINDOW, DeferredAction::ClearThemeTransition);
    }

    /// Drop the body transition override.
    ///
    pub fn clear_transition<P: Page>(session: &mut Session<P>) {
        session.page.set_body_transition(None);
    }

    fn explicit_preference<P: Page>(session: &Session<P>) -> Option<Theme> {
        let value = session.preferences.get(THEME_KEY)?;
        let theme = Theme::from_preference(&value);
        if theme.is_none() {
            warn!("Ignoring unknown persisted theme '{}'", value);
        }
        theme
    }
}
