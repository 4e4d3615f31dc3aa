//! In-memory page used by the scenario runner and the tests.

use super::{
    BannerKind, BannerView, BlockBox, FieldFeedback, HeaderStyle, Page, Reveal, ScrollBehavior,
    SectionBox, SubmitButtonView, Transform,
};
use crate::state::{Field, Theme};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

/// Static structure of the page: geometry and the elements present.
///
#[derive(Debug, Clone, Deserialize)]
pub struct PageLayout {
    #[serde(default = "default_header_height")]
    pub header_height: f64,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
    #[serde(default)]
    pub sections: Vec<SectionBox>,
    #[serde(default)]
    pub nav_links: Vec<String>,
    #[serde(default)]
    pub reveal_blocks: Vec<BlockBox>,
    #[serde(default)]
    pub service_cards: usize,
    #[serde(default)]
    pub buttons: usize,
    #[serde(default)]
    pub decorative_shapes: usize,
    #[serde(default)]
    pub form: Option<FormLayout>,
}

/// Contact form structure. `action` is the submission URL; when absent the
/// configured endpoint is used.
///
#[derive(Debug, Clone, Deserialize)]
pub struct FormLayout {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default = "default_inputs")]
    pub inputs: Vec<String>,
}

fn default_header_height() -> f64 {
    70.0
}

fn default_viewport_height() -> f64 {
    800.0
}

fn default_inputs() -> Vec<String> {
    vec!["name".to_string(), "email".to_string(), "message".to_string()]
}

/// Page whose elements are plain fields. Serializing it yields the snapshot
/// printed at the end of a scenario.
///
#[derive(Debug, Clone, Serialize)]
pub struct MemoryPage {
    #[serde(skip)]
    layout: PageLayout,
    pub theme_attribute: Option<Theme>,
    pub theme_icon: String,
    pub body_transition: Option<String>,
    pub menu_expanded: bool,
    pub scroll_locked: bool,
    pub scroll_y: f64,
    pub last_scroll_behavior: Option<ScrollBehavior>,
    pub header_style: Option<HeaderStyle>,
    pub active_links: BTreeSet<String>,
    pub block_reveals: Vec<Option<Reveal>>,
    pub form_action: Option<String>,
    pub field_values: BTreeMap<String, String>,
    pub field_feedback: BTreeMap<String, FieldFeedback>,
    pub submit_button: SubmitButtonView,
    pub success_banner: BannerView,
    pub error_banner: BannerView,
    pub card_delays_ms: Vec<u64>,
    pub card_transforms: Vec<Option<String>>,
    pub button_transforms: Vec<Option<String>>,
    pub shape_offsets: Vec<f64>,
}

impl MemoryPage {
    /// Build a page from its layout. `default_action` fills in a form action
    /// the layout leaves unset.
    ///
    pub fn new(layout: PageLayout, default_action: Option<&str>) -> Self {
        let (form_action, field_values) = match &layout.form {
            Some(form) => (
                form.action
                    .clone()
                    .or_else(|| default_action.map(str::to_string)),
                form.inputs
                    .iter()
                    .map(|name| (name.clone(), String::new()))
                    .collect(),
            ),
            None => (None, BTreeMap::new()),
        };
        MemoryPage {
            theme_attribute: None,
            theme_icon: String::new(),
            body_transition: None,
            menu_expanded: false,
            scroll_locked: false,
            scroll_y: 0.0,
            last_scroll_behavior: None,
            header_style: None,
            active_links: BTreeSet::new(),
            block_reveals: vec![None; layout.reveal_blocks.len()],
            form_action,
            field_values,
            field_feedback: BTreeMap::new(),
            submit_button: SubmitButtonView::for_state(false),
            success_banner: BannerView::hidden(),
            error_banner: BannerView::hidden(),
            card_delays_ms: vec![0; layout.service_cards],
            card_transforms: vec![None; layout.service_cards],
            button_transforms: vec![None; layout.buttons],
            shape_offsets: vec![0.0; layout.decorative_shapes],
            layout,
        }
    }

    /// Feedback currently shown for a field.
    ///
    pub fn feedback(&self, field: Field) -> FieldFeedback {
        self.field_feedback
            .get(field.name())
            .cloned()
            .unwrap_or_default()
    }
}

impl Page for MemoryPage {
    fn set_theme_attribute(&mut self, theme: Theme) {
        self.theme_attribute = Some(theme);
    }

    fn set_theme_icon(&mut self, glyph: &str) {
        self.theme_icon = glyph.to_string();
    }

    fn set_body_transition(&mut self, transition: Option<&str>) {
        self.body_transition = transition.map(str::to_string);
    }

    fn set_menu_expanded(&mut self, expanded: bool) {
        self.menu_expanded = expanded;
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn header_height(&self) -> f64 {
        self.layout.header_height
    }

    fn section(&self, id: &str) -> Option<SectionBox> {
        self.layout.sections.iter().find(|s| s.id == id).cloned()
    }

    fn sections(&self) -> Vec<SectionBox> {
        self.layout.sections.clone()
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        // Browsers clamp programmatic scrolls at the document top
        self.scroll_y = top.max(0.0);
        self.last_scroll_behavior = Some(behavior);
    }

    fn set_scroll_position(&mut self, y: f64) {
        self.scroll_y = y;
    }

    fn viewport_height(&self) -> f64 {
        self.layout.viewport_height
    }

    fn set_header_style(&mut self, style: &HeaderStyle) {
        self.header_style = Some(style.clone());
    }

    fn nav_links(&self) -> Vec<String> {
        self.layout.nav_links.clone()
    }

    fn set_nav_link_active(&mut self, href: &str, active: bool) {
        if !self.layout.nav_links.iter().any(|link| link == href) {
            return;
        }
        if active {
            self.active_links.insert(href.to_string());
        } else {
            self.active_links.remove(href);
        }
    }

    fn reveal_blocks(&self) -> Vec<BlockBox> {
        self.layout.reveal_blocks.clone()
    }

    fn set_block_reveal(&mut self, index: usize, reveal: Reveal) {
        if let Some(slot) = self.block_reveals.get_mut(index) {
            *slot = Some(reveal);
        }
    }

    fn has_contact_form(&self) -> bool {
        self.layout.form.is_some()
    }

    fn field_value(&self, field: Field) -> String {
        self.field_values
            .get(field.name())
            .cloned()
            .unwrap_or_default()
    }

    fn set_input_value(&mut self, name: &str, value: &str) {
        if let Some(slot) = self.field_values.get_mut(name) {
            *slot = value.to_string();
        }
    }

    fn set_field_feedback(&mut self, field: Field, feedback: &FieldFeedback) {
        self.field_feedback
            .insert(field.name().to_string(), feedback.clone());
    }

    fn form_action(&self) -> Option<String> {
        self.form_action.clone()
    }

    fn form_data(&self) -> Vec<(String, String)> {
        self.field_values
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    fn reset_form(&mut self) {
        for value in self.field_values.values_mut() {
            value.clear();
        }
    }

    fn set_submit_button(&mut self, view: &SubmitButtonView) {
        self.submit_button = view.clone();
    }

    fn banner(&self, kind: BannerKind) -> BannerView {
        match kind {
            BannerKind::Success => self.success_banner.clone(),
            BannerKind::Error => self.error_banner.clone(),
        }
    }

    fn set_banner(&mut self, kind: BannerKind, view: &BannerView) {
        match kind {
            BannerKind::Success => self.success_banner = view.clone(),
            BannerKind::Error => self.error_banner = view.clone(),
        }
    }

    fn service_card_count(&self) -> usize {
        self.card_transforms.len()
    }

    fn set_card_animation_delay(&mut self, index: usize, delay: Duration) {
        if let Some(slot) = self.card_delays_ms.get_mut(index) {
            *slot = delay.as_millis() as u64;
        }
    }

    fn set_card_transform(&mut self, index: usize, transform: &Transform) {
        if let Some(slot) = self.card_transforms.get_mut(index) {
            *slot = Some(transform.to_string());
        }
    }

    fn set_button_transform(&mut self, index: usize, transform: &Transform) {
        if let Some(slot) = self.button_transforms.get_mut(index) {
            *slot = Some(transform.to_string());
        }
    }

    fn decorative_shape_count(&self) -> usize {
        self.shape_offsets.len()
    }

    fn set_shape_offset(&mut self, index: usize, offset: f64) {
        if let Some(slot) = self.shape_offsets.get_mut(index) {
            *slot = offset;
        }
    }
}

/// Layout shared by the unit tests: header of 80px, three sections, three
/// reveal blocks and a contact form posting to `action`.
///
#[cfg(test)]
pub(crate) fn sample_layout(action: Option<&str>) -> PageLayout {
    let section = |id: &str, top: f64, height: f64| SectionBox {
        id: id.to_string(),
        top,
        height,
    };
    PageLayout {
        header_height: 80.0,
        viewport_height: 800.0,
        sections: vec![
            section("home", 0.0, 600.0),
            section("services", 600.0, 900.0),
            section("contact", 1500.0, 700.0),
        ],
        nav_links: vec![
            "#home".to_string(),
            "#services".to_string(),
            "#contact".to_string(),
        ],
        reveal_blocks: vec![
            BlockBox { top: 300.0, height: 200.0 },
            BlockBox { top: 900.0, height: 300.0 },
            BlockBox { top: 1600.0, height: 400.0 },
        ],
        service_cards: 3,
        buttons: 2,
        decorative_shapes: 3,
        form: Some(FormLayout {
            action: action.map(str::to_string),
            inputs: default_inputs(),
        }),
    }
}
