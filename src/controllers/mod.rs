//! Page controllers.
//!
//! Each controller is a set of operations over a [`Session`](crate::session::Session):
//! - Theme: light/dark resolution, toggle, persistence
//! - Navigation: mobile menu and smooth section scrolling
//! - Scroll effects: entrance reveals, header treatment, active link
//! - Contact form: validation and asynchronous submission
//! - Animations: hover lifts and parallax

mod animations;
mod contact;
mod navigation;
mod scroll;
mod theme;

pub use animations::{AnimationController, HoverTarget, PARALLAX_THROTTLE};
pub use contact::{ContactFormController, SubmitOutcome};
pub use navigation::NavigationController;
pub use scroll::{ScrollEffectsController, RESIZE_DEBOUNCE, SCROLL_THROTTLE};
pub use theme::ThemeController;
