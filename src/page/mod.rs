//! Page surface module.
//!
//! The controllers never touch markup directly. They read geometry from and
//! write visual attributes to a [`Page`]. The attribute values are produced by
//! the pure projection types in this module so that a boolean in `State` is
//! the only source of truth for each visual toggle.

mod memory;

pub use memory::{MemoryPage, PageLayout};

#[cfg(test)]
pub(crate) use memory::sample_layout;

use crate::state::{Field, HeaderTreatment, Theme, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Document-relative box of a `section[id]` element.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionBox {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// Document-relative box of a content block animated on entrance.
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockBox {
    pub top: f64,
    pub height: f64,
}

/// Specifying how a programmatic scroll moves the viewport.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Smooth,
}

/// Entrance animation state of a content block.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reveal {
    /// Eligible for fade-in, not yet seen.
    Pending,
    Visible,
}

/// Specifying the two form banners.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    Success,
    Error,
}

/// Inline styles of the fixed header.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderStyle {
    pub background: String,
    pub backdrop_filter: String,
    pub box_shadow: String,
}

impl HeaderStyle {
    /// Project a scroll offset and the active theme onto header styles.
    ///
    pub fn for_scroll(scroll_y: f64, theme: Theme) -> HeaderStyle {
        let (r, g, b) = theme.header_rgb();
        match HeaderTreatment::for_scroll(scroll_y) {
            HeaderTreatment::Emphasized => HeaderStyle {
                background: format!("rgba({}, {}, {}, 0.98)", r, g, b),
                backdrop_filter: "blur(15px)".to_string(),
                box_shadow: "0 2px 20px rgba(0,0,0,0.1)".to_string(),
            },
            HeaderTreatment::Resting => HeaderStyle {
                background: format!("rgba({}, {}, {}, 0.95)", r, g, b),
                backdrop_filter: "blur(10px)".to_string(),
                box_shadow: "none".to_string(),
            },
        }
    }
}

/// Error marker and inline message of a validated field.
///
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldFeedback {
    pub invalid: bool,
    pub message: Option<String>,
}

impl FieldFeedback {
    pub fn from_result(result: &Result<(), ValidationError>) -> FieldFeedback {
        match result {
            Ok(()) => FieldFeedback::default(),
            Err(e) => FieldFeedback {
                invalid: true,
                message: Some(e.to_string()),
            },
        }
    }
}

/// Visual state of the submit control.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitButtonView {
    pub disabled: bool,
    pub opacity: f64,
    pub label_visible: bool,
    pub loading_visible: bool,
}

impl SubmitButtonView {
    pub fn for_state(submitting: bool) -> SubmitButtonView {
        if submitting {
            SubmitButtonView {
                disabled: true,
                opacity: 0.7,
                label_visible: false,
                loading_visible: true,
            }
        } else {
            SubmitButtonView {
                disabled: false,
                opacity: 1.0,
                label_visible: true,
                loading_visible: false,
            }
        }
    }
}

/// Visual state of a form banner.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BannerView {
    pub displayed: bool,
    pub opacity: f64,
    pub offset_y: f64,
    pub scale: f64,
    pub message: Option<String>,
}

impl BannerView {
    /// Collapsed banner, shifted up so the fade-in slides down.
    ///
    pub fn hidden() -> BannerView {
        BannerView {
            displayed: false,
            opacity: 0.0,
            offset_y: -10.0,
            scale: 1.0,
            message: None,
        }
    }

    /// Banner laid out with its message but not yet faded in.
    ///
    pub fn shown(message: &str) -> BannerView {
        BannerView {
            displayed: true,
            message: Some(message.to_string()),
            ..BannerView::hidden()
        }
    }

    pub fn faded_in(self) -> BannerView {
        BannerView {
            opacity: 1.0,
            offset_y: 0.0,
            ..self
        }
    }

    pub fn scaled(self, scale: f64) -> BannerView {
        BannerView { scale, ..self }
    }
}

impl Default for BannerView {
    fn default() -> Self {
        BannerView::hidden()
    }
}

/// CSS transform made of a vertical translation and an optional scale.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate_y: f64,
    pub scale: Option<f64>,
}

impl Transform {
    pub fn lift(translate_y: f64) -> Transform {
        Transform {
            translate_y,
            scale: None,
        }
    }

    pub fn lift_scaled(translate_y: f64, scale: f64) -> Transform {
        Transform {
            translate_y,
            scale: Some(scale),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.translate_y == 0.0 {
            write!(f, "translateY(0)")?;
        } else {
            write!(f, "translateY({}px)", self.translate_y)?;
        }
        if let Some(scale) = self.scale {
            write!(f, " scale({})", scale)?;
        }
        Ok(())
    }
}

/// The document surface the controllers bind to.
///
/// Lookups that may miss return `Option`; a missing element is never an
/// error.
pub trait Page: Send {
    fn set_theme_attribute(&mut self, theme: Theme);
    fn set_theme_icon(&mut self, glyph: &str);
    fn set_body_transition(&mut self, transition: Option<&str>);

    fn set_menu_expanded(&mut self, expanded: bool);
    fn set_scroll_locked(&mut self, locked: bool);
    fn header_height(&self) -> f64;
    fn section(&self, id: &str) -> Option<SectionBox>;
    fn sections(&self) -> Vec<SectionBox>;
    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);
    /// Record where the visitor has scrolled to.
    fn set_scroll_position(&mut self, y: f64);

    fn viewport_height(&self) -> f64;
    fn set_header_style(&mut self, style: &HeaderStyle);
    fn nav_links(&self) -> Vec<String>;
    fn set_nav_link_active(&mut self, href: &str, active: bool);
    fn reveal_blocks(&self) -> Vec<BlockBox>;
    fn set_block_reveal(&mut self, index: usize, reveal: Reveal);

    fn has_contact_form(&self) -> bool;
    fn field_value(&self, field: Field) -> String;
    fn set_input_value(&mut self, name: &str, value: &str);
    fn set_field_feedback(&mut self, field: Field, feedback: &FieldFeedback);
    fn form_action(&self) -> Option<String>;
    fn form_data(&self) -> Vec<(String, String)>;
    fn reset_form(&mut self);
    fn set_submit_button(&mut self, view: &SubmitButtonView);
    fn banner(&self, kind: BannerKind) -> BannerView;
    fn set_banner(&mut self, kind: BannerKind, view: &BannerView);

    fn service_card_count(&self) -> usize;
    fn set_card_animation_delay(&mut self, index: usize, delay: Duration);
    fn set_card_transform(&mut self, index: usize, transform: &Transform);
    fn set_button_transform(&mut self, index: usize, transform: &Transform);
    fn decorative_shape_count(&self) -> usize;
    fn set_shape_offset(&mut self, index: usize, offset: f64);
}
