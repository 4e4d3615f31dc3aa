use crate::controllers::{
    AnimationController, ContactFormController, HoverTarget, NavigationController,
    ScrollEffectsController, SubmitOutcome, ThemeController, PARALLAX_THROTTLE, RESIZE_DEBOUNCE,
    SCROLL_THROTTLE,
};
use crate::endpoint::Client;
use crate::error::{AppError, AppResult};
use crate::page::Page;
use crate::session::{flush_deferred, lock, SharedSession};
use crate::state::Field;
use crate::utils::timing::{debounce, throttle, Debounced, Throttled};
use log::*;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Specify different page event types.
///
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    ThemeToggleClick,
    ColorSchemeChange {
        prefers_dark: bool,
    },
    HamburgerClick,
    NavLinkClick {
        href: String,
    },
    DocumentClick {
        #[serde(default)]
        inside_navbar: bool,
    },
    Scroll {
        y: f64,
    },
    Resize {
        width: f64,
    },
    FieldInput {
        name: String,
        value: String,
    },
    FieldBlur {
        field: Field,
    },
    Submit,
    PointerEnter {
        target: HoverTarget,
    },
    PointerLeave {
        target: HoverTarget,
    },
    /// Let timers run for `ms` milliseconds.
    Wait {
        ms: u64,
    },
}

/// A submit event, either already decided or waiting on the endpoint.
///
enum Submission {
    Settled(SubmitOutcome),
    InFlight(JoinHandle<SubmitOutcome>),
}

type ScrollHandler = Box<dyn FnMut(f64) + Send>;
type ResizeHandler = Box<dyn Fn(f64) + Send + Sync>;

/// Specify struct for dispatching page events to the controllers.
///
pub struct Handler<P: Page + 'static> {
    session: SharedSession<P>,
    client: Client,
    scroll: Throttled<ScrollHandler>,
    parallax: Throttled<ScrollHandler>,
    resize: Debounced<ResizeHandler>,
    submissions: Vec<Submission>,
}

impl<P: Page + 'static> Handler<P> {
    /// Return new instance bound to the session, with the scroll handlers
    /// throttled and the resize handler debounced.
    ///
    pub fn new(session: SharedSession<P>, client: Client) -> Self {
        let scroll_session = Arc::clone(&session);
        let scroll: ScrollHandler = Box::new(move |y| {
            ScrollEffectsController::on_scroll(&mut *lock(&scroll_session), y);
        });

        let parallax_session = Arc::clone(&session);
        let parallax: ScrollHandler = Box::new(move |y| {
            AnimationController::on_scroll_parallax(&mut *lock(&parallax_session), y);
        });

        let resize_session = Arc::clone(&session);
        let resize: ResizeHandler = Box::new(move |width| {
            {
                let mut guard = lock(&resize_session);
                NavigationController::on_resize(&mut *guard, width);
                ScrollEffectsController::update_active_link(&mut *guard);
            }
            flush_deferred(&resize_session);
        });

        Handler {
            session,
            client,
            scroll: throttle(scroll, SCROLL_THROTTLE),
            parallax: throttle(parallax, PARALLAX_THROTTLE),
            resize: debounce(resize, RESIZE_DEBOUNCE),
            submissions: vec![],
        }
    }

    pub fn session(&self) -> &SharedSession<P> {
        &self.session
    }

    /// Handle page events by type.
    ///
    pub async fn handle(&mut self, event: Event) {
        debug!("Processing page event '{:?}'...", event);
        match event {
            Event::ThemeToggleClick => {
                ThemeController::toggle(&mut *lock(&self.session));
            }
            Event::ColorSchemeChange { prefers_dark } => {
                ThemeController::on_system_change(&mut *lock(&self.session), prefers_dark);
            }
            Event::HamburgerClick => {
                NavigationController::toggle_mobile_menu(&mut *lock(&self.session));
            }
            Event::NavLinkClick { href } => {
                let target = NavigationController::on_link_click(&mut *lock(&self.session), &href);
                // The smooth scroll reports its destination like any scroll
                if let Some(y) = target {
                    self.scroll(y.max(0.0));
                }
            }
            Event::DocumentClick { inside_navbar } => {
                NavigationController::on_document_click(&mut *lock(&self.session), inside_navbar);
            }
            Event::Scroll { y } => self.scroll(y),
            Event::Resize { width } => self.resize.call(width),
            Event::FieldInput { name, value } => {
                lock(&self.session).page.set_input_value(&name, &value);
            }
            Event::FieldBlur { field } => {
                let mut guard = lock(&self.session);
                if guard.page.has_contact_form() {
                    ContactFormController::validate_field(&mut *guard, field);
                }
            }
            Event::Submit => match ContactFormController::begin(&self.session) {
                Ok(submission) => {
                    let session = Arc::clone(&self.session);
                    let client = self.client.clone();
                    self.submissions.push(Submission::InFlight(tokio::spawn(async move {
                        ContactFormController::deliver(&session, &client, submission).await
                    })));
                }
                Err(outcome) => self.submissions.push(Submission::Settled(outcome)),
            },
            Event::PointerEnter { target } => {
                AnimationController::on_pointer_enter(&mut *lock(&self.session), target);
            }
            Event::PointerLeave { target } => {
                AnimationController::on_pointer_leave(&mut *lock(&self.session), target);
            }
            Event::Wait { ms } => tokio::time::sleep(Duration::from_millis(ms)).await,
        }
        flush_deferred(&self.session);
    }

    /// Wait for every in-flight submission and return their outcomes in the
    /// order they were started.
    ///
    pub async fn finish(&mut self) -> AppResult<Vec<SubmitOutcome>> {
        if self.resize.is_pending() {
            debug!("Resize recalculation still pending");
        }
        let mut outcomes = vec![];
        for submission in self.submissions.drain(..) {
            let outcome = match submission {
                Submission::Settled(outcome) => outcome,
                Submission::InFlight(task) => task
                    .await
                    .map_err(|e| AppError::Other(format!("Submission task failed: {}", e)))?,
            };
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    /// Entrance observation runs on every scroll; the header, active link
    /// and parallax updates are throttled.
    ///
    fn scroll(&mut self, y: f64) {
        {
            let mut guard = lock(&self.session);
            guard.page.set_scroll_position(y);
            ScrollEffectsController::observe(&mut *guard, y);
        }
        self.scroll.call(y);
        self.parallax.call(y);
    }
}
