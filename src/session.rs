//! Page session: the single owner of application state.
//!
//! A `Session` bundles the mutable `State` with the page it projects onto,
//! the preference store and the configuration. Controllers receive it by
//! reference. Effects that must happen later (clearing a transition, hiding a
//! banner) are queued as [`Deferred`] actions and scheduled on the runtime by
//! [`flush_deferred`].

use crate::config::{Config, PreferenceStore};
use crate::controllers::{ContactFormController, ThemeController};
use crate::page::{BannerKind, Page};
use crate::state::State;
use log::*;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Session shared between the event handler and spawned tasks. The lock is
/// never held across an `.await`.
///
pub type SharedSession<P> = Arc<Mutex<Session<P>>>;

/// Specifying effects that run after a delay.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    ClearThemeTransition,
    FadeInBanner(BannerKind),
    RestoreBannerScale(BannerKind),
    HideBanners,
}

/// A queued effect and the delay after which it runs.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deferred {
    pub delay: Duration,
    pub action: DeferredAction,
}

pub struct Session<P: Page> {
    pub state: State,
    pub page: P,
    pub preferences: Box<dyn PreferenceStore>,
    pub config: Config,
    deferred: Vec<Deferred>,
}

impl<P: Page> Session<P> {
    pub fn new(config: Config, page: P, preferences: Box<dyn PreferenceStore>) -> Self {
        Session {
            state: State::default(),
            page,
            preferences,
            config,
            deferred: vec![],
        }
    }

    /// Queue an effect to run after `delay`.
    ///
    pub fn defer(&mut self, delay: Duration, action: DeferredAction) -> &mut Self {
        self.deferred.push(Deferred { delay, action });
        self
    }

    /// Drain the queued effects.
    ///
    pub fn take_deferred(&mut self) -> Vec<Deferred> {
        std::mem::take(&mut self.deferred)
    }

    /// Run a deferred effect now.
    ///
    pub fn run_deferred(&mut self, action: DeferredAction) {
        debug!("Running deferred action '{:?}'...", action);
        match action {
            DeferredAction::ClearThemeTransition => ThemeController::clear_transition(self),
            DeferredAction::FadeInBanner(kind) => ContactFormController::fade_in_banner(self, kind),
            DeferredAction::RestoreBannerScale(kind) => {
                ContactFormController::restore_banner_scale(self, kind)
            }
            DeferredAction::HideBanners => ContactFormController::hide_banners(self),
        }
    }

    pub fn into_shared(self) -> SharedSession<P> {
        Arc::new(Mutex::new(self))
    }
}

/// Lock the shared session. A handler that panicked while holding the lock
/// leaves the state usable, so poisoning is ignored.
///
pub fn lock<P: Page>(session: &SharedSession<P>) -> MutexGuard<'_, Session<P>> {
    session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Schedule every queued effect on the current tokio runtime.
///
pub fn flush_deferred<P: Page + 'static>(session: &SharedSession<P>) {
    let deferred = lock(session).take_deferred();
    for Deferred { delay, action } in deferred {
        let session = Arc::clone(session);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            lock(&session).run_deferred(action);
            flush_deferred(&session);
        });
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::MemoryPreferenceStore;
    use crate::page::{sample_layout, BannerView, MemoryPage};

    /// Session over the sample layout with an empty preference store.
    ///
    pub(crate) fn session() -> Session<MemoryPage> {
        session_with(MemoryPreferenceStore::new(), None)
    }

    pub(crate) fn session_with(
        preferences: MemoryPreferenceStore,
        action: Option<&str>,
    ) -> Session<MemoryPage> {
        let config = Config::new();
        let page = MemoryPage::new(sample_layout(action), Some(&config.submit_endpoint));
        Session::new(config, page, Box::new(preferences))
    }

    #[test]
    fn defer_and_take() {
        let mut session = session();
        session
            .defer(Duration::from_millis(300), DeferredAction::ClearThemeTransition)
            .defer(Duration::from_secs(5), DeferredAction::HideBanners);
        let taken = session.take_deferred();
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[0].action, DeferredAction::ClearThemeTransition);
        assert_eq!(taken[1].delay, Duration::from_secs(5));
        assert!(session.take_deferred().is_empty());
    }

    #[test]
    fn run_deferred_hides_banners() {
        let mut session = session();
        session
            .page
            .set_banner(BannerKind::Error, &BannerView::shown("Oops").faded_in());
        session.run_deferred(DeferredAction::HideBanners);
        assert!(!session.page.error_banner.displayed);
    }

    #[tokio::test(start_paused = true)]
    async fn flush_runs_after_delay() {
        let mut session = session();
        session.page.set_body_transition(Some("color 0.3s ease"));
        session.defer(Duration::from_millis(300), DeferredAction::ClearThemeTransition);
        let shared = session.into_shared();

        flush_deferred(&shared);
        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(lock(&shared).page.body_transition.is_some());
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(lock(&shared).page.body_transition.is_none());
    }
}
