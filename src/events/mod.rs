//! Event handling module.
//!
//! Page events (clicks, scrolls, resizes, form input, pointer hovers) are
//! dispatched to the controllers by [`page::Handler`]. Scroll handling is
//! throttled and resize handling debounced here, at the event boundary.

pub mod page;
