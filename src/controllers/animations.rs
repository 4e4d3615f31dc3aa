//! Decorative motion: staggered card entrances, hover lifts and parallax.

use crate::page::{Page, Transform};
use crate::session::Session;
use log::*;
use serde::Deserialize;
use std::time::Duration;

/// Minimum spacing of parallax updates.
///
pub const PARALLAX_THROTTLE: Duration = Duration::from_millis(16);

/// Parallax speed of the first decorative shape; shape `i` moves `i + 1`
/// times as fast.
///
pub const PARALLAX_FACTOR: f64 = -0.5;

/// Specifying the elements that react to the pointer.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "index")]
pub enum HoverTarget {
    ServiceCard(usize),
    Button(usize),
}

pub struct AnimationController;

impl AnimationController {
    /// Stagger the entrance of the service cards by the configured delay.
    ///
    pub fn initialize<P: Page>(session: &mut Session<P>) {
        let step = session.config.animation_delay;
        for index in 0..session.page.service_card_count() {
            session
                .page
                .set_card_animation_delay(index, step * index as u32);
        }
    }

    pub fn on_pointer_enter<P: Page>(session: &mut Session<P>, target: HoverTarget) {
        match target {
            HoverTarget::ServiceCard(index) => session
                .page
                .set_card_transform(index, &Transform::lift_scaled(-8.0, 1.02)),
            HoverTarget::Button(index) => session
                .page
                .set_button_transform(index, &Transform::lift(-2.0)),
        }
    }

    pub fn on_pointer_leave<P: Page>(session: &mut Session<P>, target: HoverTarget) {
        match target {
            // Cards settle slightly raised, matching their resting style
            HoverTarget::ServiceCard(index) => session
                .page
                .set_card_transform(index, &Transform::lift_scaled(-5.0, 1.0)),
            HoverTarget::Button(index) => session
                .page
                .set_button_transform(index, &Transform::lift(0.0)),
        }
    }

    /// Offset each decorative shape proportionally to the scroll position.
    ///
    pub fn on_scroll_parallax<P: Page>(session: &mut Session<P>, scroll_y: f64) {
        let shapes = session.page.decorative_shape_count();
        trace!("Parallax for {} shapes at {}", shapes, scroll_y);
        for index in 0..shapes {
            let offset = scroll_y * PARALLAX_FACTOR * (index + 1) as f64;
            session.page.set_shape_offset(index, offset);
        }
    }
}
