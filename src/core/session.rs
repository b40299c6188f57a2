//! Selection session
//!
//! One controller per page load: owns the tracker, the presenter, the
//! selection source and the settings store, and keeps the presenter's
//! translator in sync with the stored API key.

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::TranslatorConfig;
use crate::core::selection::{PageEvent, SelectionSource, SelectionTracker, TrackerIntent};
use crate::core::tooltip::TooltipPresenter;
use crate::core::translator::{DeepSeekTranslator, Translator};
use crate::shared::emit::EventBus;
use crate::shared::events::AppEvent;
use crate::shared::settings::SettingsStore;
use crate::shared::types::SelectionSnapshot;

#[derive(Clone)]
pub struct SelectionSession {
    presenter: TooltipPresenter,
    tracker: Arc<Mutex<SelectionTracker>>,
    source: Arc<dyn SelectionSource>,
    store: Arc<dyn SettingsStore>,
    translator_config: TranslatorConfig,
}

impl SelectionSession {
    pub fn new(
        presenter: TooltipPresenter,
        source: Arc<dyn SelectionSource>,
        store: Arc<dyn SettingsStore>,
        target_lang: &str,
    ) -> Self {
        presenter.set_target_lang(target_lang);
        let tracker = SelectionTracker::new(presenter.config().selection_settle_delay);
        Self {
            presenter,
            tracker: Arc::new(Mutex::new(tracker)),
            source,
            store,
            translator_config: TranslatorConfig::default(),
        }
    }

    pub fn with_translator_config(mut self, config: TranslatorConfig) -> Self {
        self.translator_config = config;
        self
    }

    pub fn presenter(&self) -> &TooltipPresenter {
        &self.presenter
    }

    /// Build the translator from the stored key, or clear it.
    ///
    /// A missing key is a configuration state, not a failure.
    pub async fn init_translator(&self) {
        let translator: Option<Arc<dyn Translator>> = match self.store.get_api_key().await {
            Ok(Some(key)) if !key.trim().is_empty() => {
                match DeepSeekTranslator::with_config(&key, self.translator_config.clone()) {
                    Ok(translator) => {
                        info!("translation service initialised");
                        Some(Arc::new(translator))
                    }
                    Err(e) => {
                        warn!(error = %e, "could not build translator");
                        None
                    }
                }
            }
            Ok(_) => {
                info!("no API key set, translation disabled");
                None
            }
            Err(e) => {
                error!(error = %e, "failed to read API key");
                None
            }
        };
        self.presenter.set_translator(translator);
    }

    /// Route one page event. Pointer-up defers the selection read by the
    /// settle delay so the host can finalise the selection first.
    pub fn handle_event(&self, event: &PageEvent) {
        let intent = {
            let mut tracker = match self.tracker.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            tracker.handle(event)
        };

        match intent {
            None => {}
            Some(TrackerIntent::Hide) => self.presenter.hide(),
            Some(TrackerIntent::ReadSelection { after, cursor }) => {
                let presenter = self.presenter.clone();
                let source = Arc::clone(&self.source);
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    let raw = source.current_selection();
                    match SelectionSnapshot::capture(&raw, cursor) {
                        Some(snapshot) => {
                            debug!(chars = snapshot.text.chars().count(), "selection captured");
                            presenter.show(&snapshot.text, snapshot.cursor);
                        }
                        None => presenter.hide(),
                    }
                });
            }
        }
    }

    /// Re-initialise the translator whenever the API key changes.
    pub fn spawn_settings_listener(&self, bus: &EventBus) -> JoinHandle<()> {
        let mut rx = bus.subscribe();
        let session = self.clone();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(AppEvent::ApiKeyUpdated) => {
                        info!("API key updated, re-initialising translation service");
                        session.init_translator().await;
                    }
                    Err(RecvError::Lagged(missed)) => {
                        warn!(missed, "settings listener lagged");
                        session.init_translator().await;
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}
