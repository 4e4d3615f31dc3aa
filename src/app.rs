use crate::config::{Config, FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
use crate::controllers::{
    AnimationController, ContactFormController, ScrollEffectsController, SubmitOutcome,
    ThemeController,
};
use crate::endpoint::Client;
use crate::error::{AppError, AppResult};
use crate::events::page::{Event as PageEvent, Handler as PageEventHandler};
use crate::logger;
use crate::page::{MemoryPage, PageLayout};
use crate::session::{flush_deferred, lock, Session};
use crate::state::Theme;
use anyhow::Result;
use log::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Recorded page events replayed against a page layout.
///
#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub page: PageLayout,
    /// Overrides the detected OS color scheme.
    #[serde(default)]
    pub prefers_dark: Option<bool>,
    #[serde(default)]
    pub events: Vec<PageEvent>,
}

impl Scenario {
    pub fn load(path: &Path) -> AppResult<Scenario> {
        let contents = fs::read_to_string(path).map_err(|e| {
            AppError::Scenario(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Scenario::parse(&contents)
            .map_err(|e| AppError::Scenario(format!("'{}': {}", path.display(), e)))
    }

    pub fn parse(contents: &str) -> AppResult<Scenario> {
        serde_yaml::from_str(contents).map_err(|e| AppError::Scenario(e.to_string()))
    }
}

/// State of the page after a scenario has been replayed.
///
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub theme: Theme,
    pub menu_open: bool,
    pub form_submitting: bool,
    pub scroll_y: f64,
    pub submissions: Vec<String>,
    pub page: MemoryPage,
}

/// Oversees controller setup, event replay and snapshot output.
///
pub struct App;

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config, scenario_path: &Path, verbose: bool) -> Result<()> {
        logger::init(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })?;

        info!("Starting application...");
        let preferences = load_preferences(&config);
        let scenario = Scenario::load(scenario_path)?;
        let prefers_dark = scenario.prefers_dark.unwrap_or_else(system_prefers_dark);

        let snapshot = App::run(config, preferences, scenario, prefers_dark).await?;
        print!("{}", serde_yaml::to_string(&snapshot).map_err(|e| AppError::Other(e.to_string()))?);

        info!("Exiting application...");
        Ok(())
    }

    /// Bind the controllers to a fresh page, replay the scenario's events and
    /// wait for in-flight submissions.
    ///
    pub async fn run(
        config: Config,
        preferences: Box<dyn PreferenceStore>,
        scenario: Scenario,
        prefers_dark: bool,
    ) -> AppResult<Snapshot> {
        let page = MemoryPage::new(scenario.page, Some(&config.submit_endpoint));
        let mut session = Session::new(config, page, preferences);
        App::initialize(&mut session, prefers_dark);

        let shared = session.into_shared();
        flush_deferred(&shared);

        let mut handler = PageEventHandler::new(shared, Client::new());
        debug!("Replaying {} page events...", scenario.events.len());
        for event in scenario.events {
            handler.handle(event).await;
        }
        let outcomes = handler.finish().await?;

        let session = lock(handler.session());
        Ok(Snapshot {
            theme: session.state.current_theme(),
            menu_open: session.state.is_menu_open(),
            form_submitting: session.state.is_form_submitting(),
            scroll_y: session.state.scroll_y(),
            submissions: outcomes.iter().map(describe).collect(),
            page: session.page.clone(),
        })
    }

    /// Initialize every controller against the loaded page.
    ///
    fn initialize(session: &mut Session<MemoryPage>, prefers_dark: bool) {
        ThemeController::initialize(session, prefers_dark);
        ScrollEffectsController::initialize(session);
        ScrollEffectsController::update_header(session);
        ScrollEffectsController::update_active_link(session);
        ContactFormController::initialize(session);
        AnimationController::initialize(session);
        info!("Page initialized");
    }
}

/// Open the preference file, falling back to a store that forgets the
/// visitor's choice on exit.
///
fn load_preferences(config: &Config) -> Box<dyn PreferenceStore> {
    match config
        .preferences_path()
        .and_then(FilePreferenceStore::load)
    {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!("Theme choice will not persist: {}", e);
            Box::new(MemoryPreferenceStore::new())
        }
    }
}

fn system_prefers_dark() -> bool {
    match dark_light::detect() {
        Ok(dark_light::Mode::Dark) => true,
        Ok(dark_light::Mode::Light | dark_light::Mode::Unspecified) | Err(_) => false,
    }
}

fn describe(outcome: &SubmitOutcome) -> String {
    match outcome {
        SubmitOutcome::Ignored => "ignored".to_string(),
        SubmitOutcome::Invalid => "invalid".to_string(),
        SubmitOutcome::Delivered => "delivered".to_string(),
        SubmitOutcome::Failed(e) => format!("failed: {}", e),
    }
}
