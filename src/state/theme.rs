//! Theme types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual mode applied to the whole page.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Return the other theme.
    ///
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Return the value written to the document attribute and to the
    /// preference store.
    ///
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a persisted preference value.
    ///
    pub fn from_preference(value: &str) -> Option<Theme> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// Map the operating-system "prefers dark" signal to a theme.
    ///
    pub fn from_system(prefers_dark: bool) -> Theme {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Glyph for the toggle icon. It depicts the theme the next toggle
    /// switches to, not the active one.
    ///
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }

    /// Base RGB of the header background.
    ///
    pub fn header_rgb(self) -> (u8, u8, u8) {
        match self {
            Theme::Light => (255, 255, 255),
            Theme::Dark => (26, 26, 26),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
