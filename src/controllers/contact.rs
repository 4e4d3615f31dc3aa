//! Contact form validation and submission.
//!
//! Submission moves through Idle → Submitting → Settled(success | failure)
//! and always returns to Idle. The Submitting phase is held by a
//! [`SubmittingGuard`], so the flag and the submit control are restored on
//! every exit path.

use crate::endpoint::{Client, SubmitError};
use crate::page::{BannerKind, BannerView, FieldFeedback, Page, SubmitButtonView};
use crate::session::{flush_deferred, lock, DeferredAction, Session, SharedSession};
use crate::state::Field;
use crate::utils::validation;
use log::*;
use std::sync::Arc;
use std::time::Duration;

pub const INVALID_FORM_MESSAGE: &str = "Please correct the errors in the form";
pub const SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent.";
pub const FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Delay between laying out a banner and fading it in.
///
pub const BANNER_FADE_DELAY: Duration = Duration::from_millis(10);

/// Length of the success banner pulse.
///
pub const SUCCESS_PULSE: Duration = Duration::from_millis(150);
pub const SUCCESS_PULSE_SCALE: f64 = 0.95;

/// How long the success banner stays before hiding itself.
///
pub const SUCCESS_AUTO_HIDE: Duration = Duration::from_secs(5);

/// Specifying how a submit attempt ended.
///
#[derive(Debug)]
pub enum SubmitOutcome {
    /// A submission was already in flight.
    Ignored,
    /// A field failed validation; nothing was sent.
    Invalid,
    Delivered,
    Failed(SubmitError),
}

/// Holds the Submitting phase. Dropping it returns the form to Idle.
///
struct SubmittingGuard<P: Page> {
    session: SharedSession<P>,
}

impl<P: Page> SubmittingGuard<P> {
    /// Enter the Submitting phase on an already locked session.
    ///
    fn acquire(session: &mut Session<P>, shared: &SharedSession<P>) -> Self {
        session.state.set_form_submitting(true);
        session.page.set_submit_button(&SubmitButtonView::for_state(true));
        ContactFormController::hide_banners(session);
        SubmittingGuard {
            session: Arc::clone(shared),
        }
    }
}

/// A submission that has entered the Submitting phase, with the action URL
/// and form data captured at that moment.
///
pub struct Submission<P: Page> {
    guard: SubmittingGuard<P>,
    action: Option<String>,
    fields: Vec<(String, String)>,
}

impl<P: Page> Drop for SubmittingGuard<P> {
    fn drop(&mut self) {
        let mut session = lock(&self.session);
        session.state.set_form_submitting(false);
        session.page.set_submit_button(&SubmitButtonView::for_state(false));
        debug!("Contact form back to idle");
    }
}

pub struct ContactFormController;

impl ContactFormController {
    /// Check the page for a contact form. Returns whether one is bound.
    ///
    pub fn initialize<P: Page>(session: &mut Session<P>) -> bool {
        if !session.page.has_contact_form() {
            warn!("No contact form on this page, form handling disabled");
            return false;
        }
        session
            .page
            .set_submit_button(&SubmitButtonView::for_state(false));
        Self::hide_banners(session);
        true
    }

    /// Validate a field and project the result onto its error marker and
    /// inline message. Returns whether the field is valid.
    ///
    pub fn validate_field<P: Page>(session: &mut Session<P>, field: Field) -> bool {
        let value = session.page.field_value(field);
        let result = validation::validate(field, &value);
        session
            .page
            .set_field_feedback(field, &FieldFeedback::from_result(&result));
        result.is_ok()
    }

    /// Submit the form. Rejected while another submission is in flight;
    /// otherwise validates, posts to the form's action URL and settles.
    ///
    pub async fn submit<P: Page + 'static>(
        shared: &SharedSession<P>,
        client: &Client,
    ) -> SubmitOutcome {
        match Self::begin(shared) {
            Ok(submission) => Self::deliver(shared, client, submission).await,
            Err(outcome) => outcome,
        }
    }

    /// Validate and enter the Submitting phase without waiting on anything.
    /// The action URL and field values are captured here, so later input
    /// does not change what is sent. Returns the outcome directly when the
    /// attempt ends before reaching the network.
    ///
    pub fn begin<P: Page + 'static>(
        shared: &SharedSession<P>,
    ) -> Result<Submission<P>, SubmitOutcome> {
        let mut locked = lock(shared);
        let session = &mut *locked;
        if !session.page.has_contact_form() {
            return Err(SubmitOutcome::Ignored);
        }
        if session.state.is_form_submitting() {
            debug!("Submission already in flight, ignoring submit");
            return Err(SubmitOutcome::Ignored);
        }
        let email_valid = Self::validate_field(session, Field::Email);
        let message_valid = Self::validate_field(session, Field::Message);
        if !(email_valid && message_valid) {
            Self::show_banner(session, BannerKind::Error, INVALID_FORM_MESSAGE);
            drop(locked);
            flush_deferred(shared);
            return Err(SubmitOutcome::Invalid);
        }
        let guard = SubmittingGuard::acquire(session, shared);
        Ok(Submission {
            guard,
            action: session.page.form_action(),
            fields: session.page.form_data(),
        })
    }

    /// Post a begun submission and settle the page with the result.
    ///
    pub async fn deliver<P: Page + 'static>(
        shared: &SharedSession<P>,
        client: &Client,
        submission: Submission<P>,
    ) -> SubmitOutcome {
        let Submission {
            guard,
            action,
            fields,
        } = submission;

        info!("Submitting contact form...");
        let result = match action {
            Some(url) => client.submit(&url, &fields).await,
            None => Err(SubmitError::MissingAction),
        };

        Self::settle(&mut *lock(shared), &result);
        drop(guard);
        flush_deferred(shared);

        match result {
            Ok(()) => SubmitOutcome::Delivered,
            Err(e) => SubmitOutcome::Failed(e),
        }
    }

    /// Present the result of a submission. The cause of a failure is logged
    /// and never shown.
    ///
    pub fn settle<P: Page>(session: &mut Session<P>, result: &Result<(), SubmitError>) {
        match result {
            Ok(()) => {
                info!("Contact form delivered");
                Self::show_banner(session, BannerKind::Success, SUCCESS_MESSAGE);
                session.page.reset_form();
                let pulsed = session
                    .page
                    .banner(BannerKind::Success)
                    .scaled(SUCCESS_PULSE_SCALE);
                session.page.set_banner(BannerKind::Success, &pulsed);
                session
                    .defer(SUCCESS_PULSE, DeferredAction::RestoreBannerScale(BannerKind::Success))
                    .defer(SUCCESS_AUTO_HIDE, DeferredAction::HideBanners);
            }
            Err(e) => {
                error!("Contact form submission failed: {}", e);
                Self::show_banner(session, BannerKind::Error, FAILURE_MESSAGE);
            }
        }
    }

    /// Replace any banner with `kind` carrying `message`; it fades in shortly
    /// after.
    ///
    pub fn show_banner<P: Page>(session: &mut Session<P>, kind: BannerKind, message: &str) {
        Self::hide_banners(session);
        session.page.set_banner(kind, &BannerView::shown(message));
        session.defer(BANNER_FADE_DELAY, DeferredAction::FadeInBanner(kind));
    }

    pub fn hide_banners<P: Page>(session: &mut Session<P>) {
        session.page.set_banner(BannerKind::Success, &BannerView::hidden());
        session.page.set_banner(BannerKind::Error, &BannerView::hidden());
    }

    pub fn fade_in_banner<P: Page>(session: &mut Session<P>, kind: BannerKind) {
        let view = session.page.banner(kind);
        if view.displayed {
            session.page.set_banner(kind, &view.faded_in());
        }
    }

    pub fn restore_banner_scale<P: Page>(session: &mut Session<P>, kind: BannerKind) {
        let view = session.page.banner(kind).scaled(1.0);
        session.page.set_banner(kind, &view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, MemoryPreferenceStore};
    use crate::logger::tests::{capture_logs, logged};
    use crate::page::{sample_layout, MemoryPage, PageLayout};
    use crate::session::tests::{session, session_with};
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;
    use httpmock::MockServer;
    use serde_json::json;

    fn filled(action: Option<&str>) -> SharedSession<MemoryPage> {
        let mut session = session_with(MemoryPreferenceStore::new(), action);
        let email: String = SafeEmail().fake();
        let message: String = Sentence(6..10).fake();
        session.page.set_input_value("name", "Ada");
        session.page.set_input_value("email", &email);
        session.page.set_input_value("message", &message);
        session.into_shared()
    }

    #[test]
    fn blur_validation_projects_feedback() {
        let mut session = session();
        session.page.set_input_value("email", "not-an-email");
        assert!(!ContactFormController::validate_field(&mut session, Field::Email));
        let feedback = session.page.feedback(Field::Email);
        assert!(feedback.invalid);
        assert_eq!(
            feedback.message.as_deref(),
            Some("Please enter a valid email address")
        );

        session.page.set_input_value("email", "a@b.co");
        assert!(ContactFormController::validate_field(&mut session, Field::Email));
        assert_eq!(session.page.feedback(Field::Email), FieldFeedback::default());

        session.page.set_input_value("message", "too short");
        assert!(!ContactFormController::validate_field(&mut session, Field::Message));
        session.page.set_input_value("message", "");
        ContactFormController::validate_field(&mut session, Field::Message);
        assert_eq!(
            session.page.feedback(Field::Message).message.as_deref(),
            Some("This field is required")
        );
    }

    #[test]
    fn initialize_reports_missing_form() {
        let mut session = session();
        assert!(ContactFormController::initialize(&mut session));

        let layout = PageLayout {
            form: None,
            ..sample_layout(None)
        };
        let page = MemoryPage::new(layout, None);
        let mut bare = Session::new(Config::new(), page, Box::new(MemoryPreferenceStore::new()));
        assert!(!ContactFormController::initialize(&mut bare));
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_network() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST");
                then.status(200);
            })
            .await;
        let action = server.url("/f/contact");
        let shared = session_with(MemoryPreferenceStore::new(), Some(&action)).into_shared();
        lock(&shared).page.set_input_value("email", "a@b.co");

        let outcome = ContactFormController::submit(&shared, &Client::new()).await;
        assert!(matches!(outcome, SubmitOutcome::Invalid));
        assert_eq!(mock.hits_async().await, 0);

        let session = lock(&shared);
        assert_eq!(
            session.page.error_banner.message.as_deref(),
            Some(INVALID_FORM_MESSAGE)
        );
        assert!(session.page.feedback(Field::Message).invalid);
        assert!(!session.state.is_form_submitting());
    }

    #[tokio::test]
    async fn successful_submission_resets_form() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/f/contact")
                    .header("Accept", "application/json")
                    .body_contains("name=Ada");
                then.status(200).json_body(json!({ "ok": true }));
            })
            .await;
        let shared = filled(Some(&server.url("/f/contact")));

        let outcome = ContactFormController::submit(&shared, &Client::new()).await;
        assert!(matches!(outcome, SubmitOutcome::Delivered));
        mock.assert_async().await;

        let session = lock(&shared);
        assert!(!session.state.is_form_submitting());
        assert_eq!(session.page.submit_button, SubmitButtonView::for_state(false));
        assert!(session.page.success_banner.displayed);
        assert_eq!(
            session.page.success_banner.message.as_deref(),
            Some(SUCCESS_MESSAGE)
        );
        assert_eq!(session.page.success_banner.scale, SUCCESS_PULSE_SCALE);
        assert!(!session.page.error_banner.displayed);
        assert_eq!(session.page.field_value(Field::Email), "");
        assert_eq!(session.page.field_value(Field::Message), "");
    }

    #[tokio::test]
    async fn concurrent_submit_is_rejected() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/f/contact");
                then.status(200).json_body(json!({}));
            })
            .await;
        let shared = filled(Some(&server.url("/f/contact")));
        let client = Client::new();

        let (first, second) = tokio::join!(
            ContactFormController::submit(&shared, &client),
            ContactFormController::submit(&shared, &client)
        );
        assert!(matches!(first, SubmitOutcome::Delivered));
        assert!(matches!(second, SubmitOutcome::Ignored));
        mock.assert_hits_async(1).await;
        assert!(!lock(&shared).state.is_form_submitting());
    }

    #[tokio::test]
    async fn rejection_shows_generic_banner() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/f/contact");
                then.status(422).json_body(json!({ "error": "bad input" }));
            })
            .await;
        let shared = filled(Some(&server.url("/f/contact")));
        let email = lock(&shared).page.field_value(Field::Email);

        let outcome = ContactFormController::submit(&shared, &Client::new()).await;
        match outcome {
            SubmitOutcome::Failed(SubmitError::Rejected { status, message }) => {
                assert_eq!(status, 422);
                assert_eq!(message, "bad input");
            }
            other => panic!("expected rejection, got {:?}", other),
        }

        let session = lock(&shared);
        let banner = session.page.error_banner.message.clone().unwrap();
        assert_eq!(banner, FAILURE_MESSAGE);
        assert!(!banner.contains("bad input"));
        assert!(!session.page.success_banner.displayed);
        assert!(!session.state.is_form_submitting());
        assert_eq!(session.page.submit_button, SubmitButtonView::for_state(false));
        // Fields are kept for another attempt
        assert_eq!(session.page.field_value(Field::Email), email);
    }

    #[tokio::test]
    async fn rejection_cause_is_logged() {
        let lines = capture_logs();
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("POST").path("/f/contact");
                then.status(422).json_body(json!({ "error": "bad input" }));
            })
            .await;
        let shared = filled(Some(&server.url("/f/contact")));

        let outcome = ContactFormController::submit(&shared, &Client::new()).await;
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert!(logged(
            &lines,
            "ERROR Contact form submission failed: Endpoint rejected submission (status 422): bad input"
        ));
        assert_eq!(
            lock(&shared).page.error_banner.message.as_deref(),
            Some(FAILURE_MESSAGE)
        );
    }

    #[tokio::test]
    async fn missing_action_fails_and_recovers() {
        let config = Config::new();
        let page = MemoryPage::new(sample_layout(None), None);
        let mut session = Session::new(config, page, Box::new(MemoryPreferenceStore::new()));
        session.page.set_input_value("email", "a@b.co");
        session.page.set_input_value("message", "Long enough message");
        let shared = session.into_shared();

        let outcome = ContactFormController::submit(&shared, &Client::new()).await;
        assert!(matches!(
            outcome,
            SubmitOutcome::Failed(SubmitError::MissingAction)
        ));
        let session = lock(&shared);
        assert!(!session.state.is_form_submitting());
        assert_eq!(
            session.page.error_banner.message.as_deref(),
            Some(FAILURE_MESSAGE)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn success_banner_pulses_then_hides() {
        let mut session = session();
        ContactFormController::settle(&mut session, &Ok(()));
        let shared = session.into_shared();
        flush_deferred(&shared);

        tokio::time::sleep(Duration::from_millis(11)).await;
        {
            let session = lock(&shared);
            assert_eq!(session.page.success_banner.opacity, 1.0);
            assert_eq!(session.page.success_banner.scale, SUCCESS_PULSE_SCALE);
        }

        tokio::time::sleep(Duration::from_millis(140)).await;
        assert_eq!(lock(&shared).page.success_banner.scale, 1.0);

        // 4999ms after settlement the banner is still up
        tokio::time::sleep(Duration::from_millis(4848)).await;
        assert!(lock(&shared).page.success_banner.displayed);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!lock(&shared).page.success_banner.displayed);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_banner_does_not_auto_hide() {
        let mut session = session();
        ContactFormController::settle(&mut session, &Err(SubmitError::MissingAction));
        let shared = session.into_shared();
        flush_deferred(&shared);

        tokio::time::sleep(Duration::from_secs(10)).await;
        let session = lock(&shared);
        assert!(session.page.error_banner.displayed);
        assert_eq!(session.page.error_banner.opacity, 1.0);
    }
}
