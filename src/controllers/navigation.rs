//! Responsive menu and in-page navigation.

use crate::page::{Page, ScrollBehavior};
use crate::session::Session;
use crate::state::MOBILE_BREAKPOINT;
use log::*;

pub struct NavigationController;

impl NavigationController {
    /// Flip the mobile menu.
    ///
    pub fn toggle_mobile_menu<P: Page>(session: &mut Session<P>) {
        let open = !session.state.is_menu_open();
        debug!("Mobile menu {}", if open { "opened" } else { "closed" });
        session.state.set_menu_open(open);
        Self::render(session);
    }

    /// Close the mobile menu if it is open.
    ///
    pub fn close_mobile_menu<P: Page>(session: &mut Session<P>) {
        if !session.state.is_menu_open() {
            return;
        }
        debug!("Mobile menu closed");
        session.state.set_menu_open(false);
        Self::render(session);
    }

    /// Smoothly scroll so the section sits right under the fixed header.
    /// Returns the target offset, or None when the page has no such section.
    ///
    pub fn scroll_to_section<P: Page>(session: &mut Session<P>, id: &str) -> Option<f64> {
        let section = session.page.section(id)?;
        let target = section.top - session.page.header_height();
        session.page.scroll_to(target, ScrollBehavior::Smooth);
        Some(target)
    }

    /// Handle a click on a navigation link whose `href` is `#<section id>`.
    /// Returns the scroll target when the section exists.
    ///
    pub fn on_link_click<P: Page>(session: &mut Session<P>, href: &str) -> Option<f64> {
        let id = href.strip_prefix('#').unwrap_or(href);
        let target = Self::scroll_to_section(session, id);
        if target.is_none() {
            debug!("No section '{}' on this page", id);
        }
        Self::close_mobile_menu(session);
        target
    }

    /// Handle a click anywhere in the document.
    ///
    pub fn on_document_click<P: Page>(session: &mut Session<P>, inside_navbar: bool) {
        if !inside_navbar {
            Self::close_mobile_menu(session);
        }
    }

    /// Handle a settled viewport resize.
    ///
    pub fn on_resize<P: Page>(session: &mut Session<P>, viewport_width: f64) {
        if viewport_width > MOBILE_BREAKPOINT {
            Self::close_mobile_menu(session);
        }
    }

    /// Project the menu flag onto the menu, the hamburger and the body
    /// scroll lock.
    ///
    fn render<P: Page>(session: &mut Session<P>) {
        let open = session.state.is_menu_open();
        session.page.set_menu_expanded(open);
        session.page.set_scroll_locked(open);
    }
}
