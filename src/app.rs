use std::sync::mpsc::Sender;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};
use rust_i18n::t;
use tracing::{debug, info, warn};

use crate::config::{Config, Locale};
use crate::event::AppEvent;
use crate::keyboard::highlight::KeyHighlights;
use crate::keyboard::model::{KeyId, KeyboardModel};
use crate::session::host::{InfoSnapshot, KeyHighlighter, Renderer, ResultReporter, Timer};
use crate::session::input::Key;
use crate::session::readiness::{Module, ModuleBarrier};
use crate::session::result::SessionResult;
use crate::session::sequence::{ErrorRecord, SequenceStore};
use crate::session::timer::Typometer;
use crate::session::typing::{SessionState, TypingSession};
use crate::source::{LoadRequest, LoadedText, TextPipeline, spawn_loader};
use crate::store::json_store::JsonStore;
use crate::ui::display::LineDisplay;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Practice,
    Result,
}

/// Keeps the last result for the result screen and appends every result to
/// the persisted history.
pub struct ResultBoard {
    pub last: Option<SessionResult>,
    pub best_velocity: Option<f64>,
    locale: Locale,
    store: Option<JsonStore>,
}

impl ResultBoard {
    pub fn new(locale: Locale, store: Option<JsonStore>) -> Self {
        let best_velocity = store
            .as_ref()
            .and_then(|store| store.load_history().best_velocity());
        Self {
            last: None,
            best_velocity,
            locale,
            store,
        }
    }
}

impl ResultReporter for ResultBoard {
    fn report(&mut self, result: SessionResult) {
        let result = result.with_locale(self.locale);
        info!(
            velocity = result.velocity,
            errors = result.errors,
            ratio = result.error_ratio_percent,
            "run finished"
        );
        if let Some(store) = &self.store {
            if let Err(err) = store.append_result(result.clone()) {
                warn!(error = %err, "could not save result history");
            }
        }
        self.best_velocity = Some(
            self.best_velocity
                .map_or(result.velocity, |best| best.max(result.velocity)),
        );
        self.last = Some(result);
    }
}

/// The concrete collaborators the session drives.
pub struct Frontend {
    pub display: LineDisplay,
    pub keys: KeyHighlights,
    pub timer: Typometer,
    pub results: ResultBoard,
}

impl Renderer for Frontend {
    fn set_normal_text(&mut self, text: &str) {
        self.display.set_normal_text(text);
    }
    fn set_green_text(&mut self, text: &str) {
        self.display.set_green_text(text);
    }
    fn set_red_text(&mut self, text: &str) {
        self.display.set_red_text(text);
    }
    fn line_slide_in(&mut self) {
        self.display.line_slide_in();
    }
    fn update_info(&mut self, info: InfoSnapshot) {
        self.display.update_info(info);
    }
    fn update_progress(&mut self, index: usize, total: usize) {
        self.display.update_progress(index, total);
    }
}

impl KeyHighlighter for Frontend {
    fn highlight_key(&mut self, id: KeyId) {
        self.keys.highlight_key(id);
    }
    fn unhighlight_key(&mut self, id: KeyId) {
        self.keys.unhighlight_key(id);
    }
    fn unhighlight_all_keys(&mut self) {
        self.keys.unhighlight_all_keys();
    }
    fn key_id_for(&self, key: &Key) -> Option<KeyId> {
        self.keys.key_id_for(key)
    }
    fn last_highlighted(&self) -> Option<KeyId> {
        self.keys.last_highlighted()
    }
}

impl Timer for Frontend {
    fn start(&mut self) {
        self.timer.start();
    }
    fn stop(&mut self) {
        self.timer.stop();
    }
    fn record_keystroke(&mut self) {
        self.timer.record_keystroke();
    }
    fn keystrokes(&self) -> u32 {
        self.timer.keystrokes()
    }
    fn velocity(&self) -> f64 {
        self.timer.velocity()
    }
}

impl ResultReporter for Frontend {
    fn report(&mut self, result: SessionResult) {
        self.results.report(result);
    }
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: Theme,
    pub session: TypingSession,
    pub frontend: Frontend,
    pub title: Option<String>,
    pub loading: bool,
    pub should_quit: bool,
    barrier: ModuleBarrier,
    request: LoadRequest,
    loader_tx: Option<Sender<AppEvent>>,
    load_generation: u64,
}

impl App {
    pub fn new(config: Config, store: Option<JsonStore>, request: LoadRequest) -> Self {
        let theme = Theme::load_or_default(&config.theme);
        let model = KeyboardModel::from_name(config.layout_name());
        let frontend = Frontend {
            display: LineDisplay::new(),
            keys: KeyHighlights::new(model),
            timer: Typometer::new(),
            results: ResultBoard::new(config.locale, store),
        };
        let session = TypingSession::new(t!("app.start"), config.show_assignment);

        let mut app = Self {
            screen: AppScreen::Practice,
            config,
            theme,
            session,
            frontend,
            title: None,
            loading: true,
            should_quit: false,
            barrier: ModuleBarrier::new(Module::ALL),
            request,
            loader_tx: None,
            load_generation: 0,
        };
        for module in [
            Module::Keyboard,
            Module::Display,
            Module::Typometer,
            Module::Misc,
            Module::InfoBar,
            Module::ProgressBar,
        ] {
            app.report_ready(module);
        }
        app
    }

    /// Record a module as ready; the report that opens the barrier moves the
    /// session from `Loading` to `Idle`.
    pub fn report_ready(&mut self, module: Module) {
        match self.barrier.report(module) {
            Ok(true) => {
                info!("all modules ready");
                self.session.enter_idle(&mut self.frontend);
            }
            Ok(false) => debug!(?module, pending = self.barrier.pending(), "module ready"),
            Err(err) => warn!(error = %err, "rejected readiness report"),
        }
    }

    /// Start fetching the configured text on a worker thread.
    pub fn attach_loader(&mut self, tx: Sender<AppEvent>) {
        spawn_loader(
            self.request.clone(),
            self.config.clone(),
            self.load_generation,
            tx.clone(),
        );
        self.loader_tx = Some(tx);
    }

    /// Generation of the newest text request. Loader results stamped with
    /// anything else are stale.
    pub fn load_generation(&self) -> u64 {
        self.load_generation
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key_event(key),
            AppEvent::Paste(text) => self.on_paste(&text),
            AppEvent::SequenceLoaded { generation, text } => {
                self.on_sequence_loaded(generation, text)
            }
            AppEvent::Tick => self.frontend.display.tick(Instant::now()),
            AppEvent::Resize(_, _) => {}
        }
    }

    /// Install a loader result unless a newer request or a paste has
    /// superseded it.
    pub fn on_sequence_loaded(&mut self, generation: u64, loaded: LoadedText) {
        if generation != self.load_generation {
            debug!(
                generation,
                current = self.load_generation,
                "dropping superseded text"
            );
            return;
        }
        self.install_text(loaded);
    }

    fn install_text(&mut self, loaded: LoadedText) {
        info!(
            lines = loaded.lines.len(),
            placeholder = loaded.placeholder,
            "text loaded"
        );
        self.loading = false;
        self.title = loaded.title;
        let sequence = SequenceStore::prepare(loaded.lines);
        if self.session.state() == SessionState::Loading {
            self.session.set_sequence(sequence);
            self.report_ready(Module::Sequence);
        } else {
            self.session.replace_sequence(sequence, &mut self.frontend);
            self.screen = AppScreen::Practice;
        }
    }

    pub fn on_paste(&mut self, text: &str) {
        let pipeline = TextPipeline::from_config(&self.config);
        let loaded = pipeline.user_text(text, self.config.user_text_policy);
        // any fetch still in flight must not overwrite the pasted text
        self.load_generation += 1;
        self.install_text(loaded);
    }

    /// Fetch a fresh Wikipedia text. Without a loader attached nothing happens.
    pub fn request_new_text(&mut self) {
        let Some(tx) = self.loader_tx.clone() else {
            debug!("no loader attached, ignoring new text request");
            return;
        };
        let generation = self.begin_load();
        self.request = LoadRequest::Wikipedia;
        spawn_loader(self.request.clone(), self.config.clone(), generation, tx);
    }

    /// Mark a new request as pending; only its result will be installed.
    fn begin_load(&mut self) -> u64 {
        self.load_generation += 1;
        self.loading = true;
        self.load_generation
    }

    pub fn restart(&mut self) {
        self.session.restart(&mut self.frontend);
        self.screen = AppScreen::Practice;
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        if ctrl && !alt {
            match key.code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('r') => self.restart(),
                KeyCode::Char('n') => self.request_new_text(),
                _ => {}
            }
            return;
        }
        if key.code == KeyCode::Esc {
            match self.screen {
                AppScreen::Practice => self.should_quit = true,
                AppScreen::Result => self.restart(),
            }
            return;
        }
        // the line is hidden behind the loading status until new text lands
        if self.screen == AppScreen::Result || self.loading {
            return;
        }
        if let Some(key) = key_from_event(&key) {
            self.type_key(key);
        }
    }

    /// Feed one logical key to the session and log a new error against the
    /// position where it happened.
    pub fn type_key(&mut self, key: Key) {
        let key_id = self.frontend.key_id_for(&key);
        let errors_before = self.session.error_count();
        let (line, column) = self.session.cursor();
        let expected = self.session.expected();

        self.session.handle_key(key, key_id, &mut self.frontend);

        if self.session.error_count() > errors_before {
            if let Some(expected) = expected {
                self.session.record_error(ErrorRecord {
                    line,
                    column,
                    expected,
                });
            }
        }
        if self.session.state() == SessionState::Finished {
            self.screen = AppScreen::Result;
        }
    }

    pub fn progress_label(&self) -> String {
        let (index, total) = self.frontend.display.progress;
        t!(
            "progress.label",
            index = (index + 1).min(total.max(1)),
            total = total
        )
        .to_string()
    }

    pub fn hints(&self) -> Vec<String> {
        match self.screen {
            AppScreen::Practice => vec![
                t!("hints.quit").to_string(),
                t!("hints.restart").to_string(),
                t!("hints.new_text").to_string(),
                t!("hints.paste").to_string(),
            ],
            AppScreen::Result => vec![
                t!("hints.back").to_string(),
                t!("hints.restart").to_string(),
                t!("hints.new_text").to_string(),
            ],
        }
    }

    pub fn status_text(&self) -> Option<String> {
        self.loading.then(|| t!("app.loading").to_string())
    }
}

/// Map a terminal key event to a logical key. Chords with Ctrl or Alt alone
/// are commands, not input; Ctrl+Alt is how some terminals report AltGr.
pub fn key_from_event(event: &KeyEvent) -> Option<Key> {
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = event.modifiers.contains(KeyModifiers::ALT);
    match event.code {
        KeyCode::Char(ch) if ctrl == alt => Some(Key::Char(ch)),
        KeyCode::Char(_) => None,
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Modifier(modifier) => match modifier {
            ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => Some(Key::Shift),
            ModifierKeyCode::IsoLevel3Shift => Some(Key::AltGraph),
            ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => Some(Key::Alt),
            ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => Some(Key::Control),
            _ => None,
        },
        _ => None,
    }
}
