//! Scroll-driven effects: entrance reveals, header treatment and the active
//! navigation link.

use crate::page::{BlockBox, HeaderStyle, Page, Reveal, SectionBox};
use crate::session::Session;
use log::*;
use std::time::Duration;

/// Bottom margin shrinking the viewport before intersection is measured.
///
pub const REVEAL_ROOT_MARGIN_BOTTOM: f64 = 50.0;

/// Visible fraction of a block at which its entrance plays.
///
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Minimum spacing of scroll handling, one animation frame.
///
pub const SCROLL_THROTTLE: Duration = Duration::from_millis(16);

/// Quiet period after the last resize before recalculating.
///
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);

/// Fraction of `block` lying between `root_top` and `root_bottom`. A block
/// without height counts as fully visible when its top is inside the root.
///
pub fn intersection_ratio(block: &BlockBox, root_top: f64, root_bottom: f64) -> f64 {
    if block.height <= 0.0 {
        return if block.top >= root_top && block.top <= root_bottom {
            1.0
        } else {
            0.0
        };
    }
    let overlap = (block.top + block.height).min(root_bottom) - block.top.max(root_top);
    (overlap / block.height).max(0.0)
}

/// Id of the section whose span `[top - offset, top - offset + height)`
/// contains `scroll_y`. When spans overlap the later section wins.
///
pub fn active_section(sections: &[SectionBox], scroll_y: f64, offset: f64) -> Option<&str> {
    sections
        .iter()
        .filter(|section| {
            let top = section.top - offset;
            scroll_y >= top && scroll_y < top + section.height
        })
        .last()
        .map(|section| section.id.as_str())
}

pub struct ScrollEffectsController;

impl ScrollEffectsController {
    /// Mark every content block as eligible for its entrance animation and
    /// reveal the ones already in view.
    ///
    pub fn initialize<P: Page>(session: &mut Session<P>) {
        let blocks = session.page.reveal_blocks();
        debug!("Observing {} content blocks for entrance", blocks.len());
        for index in 0..blocks.len() {
            if !session.state.is_block_revealed(index) {
                session.page.set_block_reveal(index, Reveal::Pending);
            }
        }
        let scroll_y = session.state.scroll_y();
        Self::observe(session, scroll_y);
    }

    /// Reveal blocks that entered the observation root at `scroll_y`.
    /// Returns the indices revealed by this call.
    ///
    pub fn observe<P: Page>(session: &mut Session<P>, scroll_y: f64) -> Vec<usize> {
        let root_top = scroll_y;
        let root_bottom = scroll_y + session.page.viewport_height() - REVEAL_ROOT_MARGIN_BOTTOM;
        let mut revealed = vec![];
        for (index, block) in session.page.reveal_blocks().iter().enumerate() {
            if session.state.is_block_revealed(index) {
                continue;
            }
            if intersection_ratio(block, root_top, root_bottom) >= REVEAL_THRESHOLD
                && session.state.reveal_block(index)
            {
                session.page.set_block_reveal(index, Reveal::Visible);
                revealed.push(index);
            }
        }
        if !revealed.is_empty() {
            debug!(
                "Revealed content blocks {:?}, {} shown so far",
                revealed,
                session.state.revealed_count()
            );
        }
        revealed
    }

    /// Record the scroll position and refresh header and active link.
    ///
    pub fn on_scroll<P: Page>(session: &mut Session<P>, scroll_y: f64) {
        session.state.set_scroll_y(scroll_y);
        Self::update_header(session);
        Self::update_active_link(session);
    }

    /// Project scroll position and theme onto the header styles.
    ///
    pub fn update_header<P: Page>(session: &mut Session<P>) {
        let style = HeaderStyle::for_scroll(session.state.scroll_y(), session.state.current_theme());
        session.page.set_header_style(&style);
    }

    /// Mark the link of the section under the scroll position as the only
    /// active one.
    ///
    pub fn update_active_link<P: Page>(session: &mut Session<P>) {
        let sections = session.page.sections();
        let current = active_section(&sections, session.state.scroll_y(), session.config.scroll_offset)
            .map(|id| format!("#{}", id));
        for href in session.page.nav_links() {
            let active = current.as_deref() == Some(href.as_str());
            session.page.set_nav_link_active(&href, active);
        }
    }
}
