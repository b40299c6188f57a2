//! Tooltip presenter
//!
//! Owns the single floating element and its lifecycle:
//! - `Hidden`: nothing attached
//! - `Visible`: attached with the `show` flag on
//! - `Dismissing`: `show` flag off, removal scheduled after the animation
//!
//! Every `show` and every `hide` advances a generation counter. Timers and
//! translation completions carry the generation they were issued under and
//! are dropped when it no longer matches.

pub mod content;
pub mod placement;
pub mod surface;

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::TooltipConfig;
use crate::core::translator::{TranslateResult, Translator};
use crate::shared::types::CursorPosition;
use content::{TooltipContent, TranslationLine};
use placement::compute_placement;
pub use surface::{LogSurface, TooltipId, TooltipSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipState {
    Hidden,
    Visible(TooltipId),
    Dismissing(TooltipId),
}

struct PresenterInner {
    surface: Box<dyn TooltipSurface>,
    state: TooltipState,
    generation: u64,
    next_id: u64,
    hide_timer: Option<JoinHandle<()>>,
    translation_task: Option<JoinHandle<()>>,
    translator: Option<Arc<dyn Translator>>,
    target_lang: String,
}

impl PresenterInner {
    fn cancel_pending(&mut self) {
        if let Some(timer) = self.hide_timer.take() {
            timer.abort();
        }
        if let Some(task) = self.translation_task.take() {
            task.abort();
        }
    }
}

/// Cheap to clone; all clones drive the same element.
///
/// `show` and `hide` spawn timers and must be called from within a Tokio
/// runtime.
#[derive(Clone)]
pub struct TooltipPresenter {
    inner: Arc<Mutex<PresenterInner>>,
    config: Arc<TooltipConfig>,
}

impl TooltipPresenter {
    pub fn new(surface: impl TooltipSurface + 'static, config: TooltipConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(PresenterInner {
                surface: Box::new(surface),
                state: TooltipState::Hidden,
                generation: 0,
                next_id: 1,
                hide_timer: None,
                translation_task: None,
                translator: None,
                target_lang: "zh".to_string(),
            })),
            config: Arc::new(config),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PresenterInner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("presenter mutex poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    pub fn state(&self) -> TooltipState {
        self.lock().state
    }

    /// Install or clear the translator used by subsequent `show` calls.
    pub fn set_translator(&self, translator: Option<Arc<dyn Translator>>) {
        self.lock().translator = translator;
    }

    pub fn has_translator(&self) -> bool {
        self.lock().translator.is_some()
    }

    pub fn set_target_lang(&self, lang: impl Into<String>) {
        self.lock().target_lang = lang.into();
    }

    /// Show `text` near `cursor`, replacing any existing tooltip at once.
    ///
    /// Blank text hides instead and returns `None`.
    pub fn show(&self, text: &str, cursor: CursorPosition) -> Option<TooltipId> {
        let clean = text.trim();
        if clean.is_empty() {
            self.hide();
            return None;
        }

        let mut inner = self.lock();
        inner.cancel_pending();
        inner.generation += 1;
        let generation = inner.generation;

        let previous = inner.state;
        match previous {
            TooltipState::Visible(old) | TooltipState::Dismissing(old) => inner.surface.remove(old),
            TooltipState::Hidden => {}
        }

        let id = TooltipId(inner.next_id);
        inner.next_id += 1;

        let translator = if self.config.translation_enabled {
            inner.translator.clone()
        } else {
            None
        };

        let base = TooltipContent::new(clean, self.config.max_text_length);
        let content = match (self.config.translation_enabled, translator.is_some()) {
            (false, _) => base.clone(),
            (true, true) => base.clone().with_translation(TranslationLine::Loading),
            (true, false) => base.clone().with_translation(TranslationLine::Disabled),
        };

        let viewport = inner.surface.viewport();
        let placement = compute_placement(cursor, viewport, content.text_len(), &self.config);
        inner.surface.attach(id, &content.render(), placement);
        inner.surface.set_visible(id, true);
        inner.state = TooltipState::Visible(id);
        debug!(%id, generation, chars = base.char_count, "tooltip shown");

        let presenter = self.clone();
        let delay = self.config.hide_delay;
        inner.hide_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            presenter.expire(generation);
        }));

        if let Some(translator) = translator {
            let presenter = self.clone();
            let text = clean.to_string();
            let lang = inner.target_lang.clone();
            inner.translation_task = Some(tokio::spawn(async move {
                let result = translator.translate(&text, &lang).await;
                presenter.apply_translation(generation, id, base, result);
            }));
        }

        Some(id)
    }

    /// Start the fade-out. No-op when hidden or already dismissing.
    pub fn hide(&self) {
        let mut inner = self.lock();
        inner.cancel_pending();
        self.begin_dismiss(&mut inner);
    }

    fn begin_dismiss(&self, inner: &mut PresenterInner) {
        let id = match inner.state {
            TooltipState::Visible(id) => id,
            TooltipState::Hidden | TooltipState::Dismissing(_) => return,
        };

        inner.generation += 1;
        inner.surface.set_visible(id, false);
        inner.state = TooltipState::Dismissing(id);
        debug!(%id, "tooltip dismissing");

        let presenter = self.clone();
        let delay = self.config.animation_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            presenter.finish_dismiss(id);
        });
    }

    fn finish_dismiss(&self, id: TooltipId) {
        let mut inner = self.lock();
        // A newer show may have replaced the element while we waited.
        if inner.state != TooltipState::Dismissing(id) {
            debug!(%id, "removal skipped, tooltip superseded");
            return;
        }
        inner.surface.remove(id);
        inner.state = TooltipState::Hidden;
        debug!(%id, "tooltip removed");
    }

    fn expire(&self, generation: u64) {
        let mut inner = self.lock();
        if inner.generation != generation {
            return;
        }
        // Detach rather than abort: this runs on the timer task itself.
        inner.hide_timer = None;
        if let Some(task) = inner.translation_task.take() {
            task.abort();
        }
        self.begin_dismiss(&mut inner);
    }

    fn apply_translation(
        &self,
        generation: u64,
        id: TooltipId,
        base: TooltipContent,
        result: TranslateResult<String>,
    ) {
        let mut inner = self.lock();
        if inner.generation != generation || inner.state != TooltipState::Visible(id) {
            debug!(%id, "discarding stale translation");
            return;
        }
        inner.translation_task = None;

        let line = match result {
            Ok(translated) => TranslationLine::Translated(translated),
            Err(e) => {
                warn!(%id, error = %e, "translation failed");
                TranslationLine::Failed(e.to_string())
            }
        };
        inner.surface.set_content(id, &base.with_translation(line).render());
    }
}
