//! App — component-based event loop.
//!
//! - `App` owns all components, `AppState` and the audio controller.
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background
//!   tasks (terminal input, audio session results).
//! - The event loop draws a frame, then awaits the next message.
//! - Components return `Vec<Action>`; App dispatches each Action.

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use slang_core::audio::{AudioBackend, AudioBase, AudioController, AudioEvent};
use slang_core::dictionary::Dictionary;
use slang_core::submission::{self, SubmissionError};

use crate::{
    action::{Action, AudioControl, Page},
    app_state::AppState,
    component::Component,
    components::{
        entry_of_day::EntryOfDay, header::Header, help_overlay::HelpOverlay,
        slang_list::SlangList, submit_form::SubmitForm,
    },
    widgets::{
        status_bar::{self, InputMode},
        toast::ToastManager,
    },
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    Audio(AudioEvent),
}

/// Upper bound on actions processed per dispatch, follow-ups included.
const MAX_CHAINED_ACTIONS: usize = 16;

/// How long the input reader waits before re-checking for shutdown.
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Forward terminal events until `shutdown` is set, the receiver goes away
/// or reading fails.  `next` returns `Ok(None)` when nothing arrived within
/// the timeout.
fn pump_events(
    mut next: impl FnMut(Duration) -> io::Result<Option<Event>>,
    tx: mpsc::Sender<AppMessage>,
    shutdown: &AtomicBool,
) {
    while !shutdown.load(Ordering::Relaxed) {
        match next(INPUT_POLL) {
            Ok(Some(ev)) => {
                if tx.blocking_send(AppMessage::Event(ev)).is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!("terminal event read failed: {}", e);
                break;
            }
        }
    }
    debug!("input reader stopped");
}

fn next_terminal_event(timeout: Duration) -> io::Result<Option<Event>> {
    if event::poll(timeout)? {
        event::read().map(Some)
    } else {
        Ok(None)
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    // ── Shared state (passed read-only to components) ─────────────────────────
    pub state: AppState,

    // ── Components ────────────────────────────────────────────────────────────
    header: Header,
    entry_of_day: EntryOfDay,
    slang_list: SlangList,
    submit_form: SubmitForm,
    help_overlay: HelpOverlay,

    // ── Audio ─────────────────────────────────────────────────────────────────
    audio: AudioController<AudioControl>,
    audio_rx: Option<mpsc::Receiver<AudioEvent>>,

    toast: ToastManager,
    should_quit: bool,
}

impl App {
    pub fn new(
        mut dictionary: Dictionary,
        backend: Arc<dyn AudioBackend>,
        audio_base: AudioBase,
        audio_available: bool,
        start_page: Page,
    ) -> Self {
        let (audio_tx, audio_rx) = mpsc::channel::<AudioEvent>(64);
        let audio = AudioController::new(backend, audio_base, audio_tx);

        dictionary.pick_entry_of_the_day(&mut rand::thread_rng());
        let mut state = AppState::new(dictionary, audio_available);
        state.page = start_page;

        let mut toast = ToastManager::new();
        if state.offline() {
            toast.info("Using offline sample data");
        }
        if !audio_available {
            toast.warning("mpv not found: audio playback unavailable");
        }

        Self {
            state,
            header: Header::new(),
            entry_of_day: EntryOfDay::new(),
            slang_list: SlangList::new(),
            submit_form: SubmitForm::new(),
            help_overlay: HelpOverlay::new(),
            audio,
            audio_rx: Some(audio_rx),
            toast,
            should_quit: false,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(1024);

        // ── Background task: keyboard events ──────────────────────────────────
        let event_tx = tx.clone();
        let input_shutdown = Arc::new(AtomicBool::new(false));
        let reader_shutdown = input_shutdown.clone();
        tokio::task::spawn_blocking(move || {
            pump_events(next_terminal_event, event_tx, &reader_shutdown)
        });

        // ── Background task: audio session results → AppMessage ──────────────
        if let Some(mut audio_rx) = self.audio_rx.take() {
            let audio_tx = tx.clone();
            tokio::spawn(async move {
                while let Some(ev) = audio_rx.recv().await {
                    if audio_tx.send(AppMessage::Audio(ev)).await.is_err() {
                        break;
                    }
                }
            });
        }

        let mut toast_tick = tokio::time::interval(Duration::from_millis(250));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        info!("zedslangs ui started on {:?}", self.state.page);
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    self.handle_message(msg);
                    needs_redraw = true;
                }
                _ = toast_tick.tick() => {
                    needs_redraw = self.toast.tick();
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        input_shutdown.store(true, Ordering::Relaxed);
        self.audio.stop();
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        info!("zedslangs exiting");

        Ok(())
    }

    fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                if key.kind == KeyEventKind::Release {
                    return;
                }
                for a in self.handle_key(key) {
                    self.dispatch(a);
                }
            }
            AppMessage::Event(Event::Resize(w, h)) => self.dispatch(Action::Resize(w, h)),
            AppMessage::Event(_) => {}
            AppMessage::Audio(ev) => {
                if let Some(err) = self.audio.on_event(ev) {
                    self.toast.error(err.to_string());
                }
                self.sync_audio();
            }
        }
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return vec![Action::Quit];
        }

        // Help overlay captures all keys when visible
        if self.state.show_help {
            return self.help_overlay.handle_key(key, &self.state);
        }

        // Text entry owns the keyboard
        if self.state.input_mode != InputMode::Normal {
            return self.page_key(key);
        }

        match key.code {
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Char('?') => return vec![Action::ToggleHelp],
            KeyCode::Char('1') => return vec![Action::GoTo(Page::Home)],
            KeyCode::Char('2') => return vec![Action::GoTo(Page::Dictionary)],
            KeyCode::Char('3') => return vec![Action::GoTo(Page::Submit)],
            KeyCode::Tab => return vec![Action::NextPage],
            KeyCode::BackTab => return vec![Action::PrevPage],
            KeyCode::Char('s') => return vec![Action::StopAudio],
            _ => {}
        }

        self.page_key(key)
    }

    fn page_key(&mut self, key: KeyEvent) -> Vec<Action> {
        match self.state.page {
            Page::Home => self.entry_of_day.handle_key(key, &self.state),
            Page::Dictionary => self.slang_list.handle_key(key, &self.state),
            Page::Submit => self.submit_form.handle_key(key, &self.state),
        }
    }

    // ── Dispatch ──────────────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        let mut queue = VecDeque::from([action]);
        let mut processed = 0usize;
        while let Some(action) = queue.pop_front() {
            if processed == MAX_CHAINED_ACTIONS {
                warn!("dispatch: dropping {} chained actions", queue.len() + 1);
                break;
            }
            processed += 1;

            // Components see the action first, against the pre-action state
            let secondary: Vec<Action> = {
                let s = &self.state;
                let mut out = Vec::new();
                out.extend(self.header.on_action(&action, s));
                out.extend(self.entry_of_day.on_action(&action, s));
                out.extend(self.slang_list.on_action(&action, s));
                out.extend(self.submit_form.on_action(&action, s));
                out.extend(self.help_overlay.on_action(&action, s));
                out
            };

            queue.extend(self.apply_action(action));
            queue.extend(secondary);
        }
    }

    /// Apply an action to app state.  Returns follow-up actions.
    fn apply_action(&mut self, action: Action) -> Vec<Action> {
        debug!("apply_action: {:?}", action);
        let dict = &mut self.state.dictionary;
        match action {
            // ── Navigation ────────────────────────────────────────────────────
            Action::GoTo(page) => self.state.page = page,
            Action::NextPage => self.state.page = self.state.page.next(),
            Action::PrevPage => self.state.page = self.state.page.prev(),
            Action::SelectUp(_) | Action::SelectDown(_) | Action::SelectFirst | Action::SelectLast => {}

            // ── Search / filters ──────────────────────────────────────────────
            Action::OpenSearch => self.state.input_mode = InputMode::Search,
            Action::CloseSearch => self.state.input_mode = InputMode::Normal,
            Action::SearchChanged(text) => dict.set_search(&text),
            Action::CycleLanguage => {
                let language = dict.cycle_language().map(str::to_string);
                debug!("language filter -> {:?}", language);
            }
            Action::CycleCategory => {
                let category = dict.cycle_category().map(str::to_string);
                debug!("category filter -> {:?}", category);
            }
            Action::ToggleScope => {
                let scope = dict.criteria().scope.toggle();
                dict.set_scope(scope);
            }
            Action::ClearFilters => dict.clear_filters(),
            Action::ToggleViewAll => {
                dict.toggle_view_all();
            }

            // ── Entries ───────────────────────────────────────────────────────
            Action::ToggleFavorite(id) => match dict.toggle_favorite(&id) {
                Ok(Some(now)) => debug!("favorite {} -> {}", id, now),
                Ok(None) => {}
                Err(e) => {
                    warn!("failed to save favorites: {}", e);
                    self.toast.error(format!("could not save favorites: {}", e));
                }
            },
            Action::PlayAudio(index, control) => {
                let Some(entry) = dict.store().get(index).cloned() else {
                    return vec![];
                };
                match self.audio.play(&entry, Some(control)) {
                    Ok(()) => self.toast.info(format!("{} playing", entry.word)),
                    Err(e) => {
                        warn!("Audio play error for {}: {:?}", entry.word, e);
                        self.toast.error(e.to_string());
                    }
                }
                self.sync_audio();
            }
            Action::StopAudio => {
                self.audio.stop();
                self.sync_audio();
            }
            Action::RerollEntryOfDay => {
                if self.audio.is_active(&AudioControl::EntryOfDay) {
                    self.audio.stop();
                    self.sync_audio();
                }
                let dict = &mut self.state.dictionary;
                if let Some(entry) = dict.pick_entry_of_the_day(&mut rand::thread_rng()) {
                    debug!("slang of the day -> {}", entry.word);
                }
            }
            Action::CopyToClipboard(text) => {
                match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
                    Ok(()) => {
                        let display = if text.chars().count() > 40 {
                            format!("{}…", text.chars().take(40).collect::<String>())
                        } else {
                            text
                        };
                        self.toast.success(format!("copied: {}", display));
                    }
                    Err(e) => {
                        warn!("clipboard error: {}", e);
                        self.toast.error(format!("clipboard error: {}", e));
                    }
                }
            }

            // ── Submit form ───────────────────────────────────────────────────
            Action::BeginEdit => self.state.input_mode = InputMode::Form,
            Action::EndEdit | Action::SubmissionAccepted => {
                self.state.input_mode = InputMode::Normal
            }
            Action::Submit(draft) => {
                return match draft.validate() {
                    Ok(sub) => {
                        self.toast.success(submission::record(&sub));
                        vec![Action::SubmissionAccepted]
                    }
                    Err(err @ SubmissionError::Missing(field)) => {
                        self.toast.error(err.to_string());
                        vec![Action::SubmissionRejected(field)]
                    }
                };
            }
            Action::SubmissionRejected(_) => self.state.input_mode = InputMode::Form,

            // ── System ────────────────────────────────────────────────────────
            Action::ToggleHelp => self.state.show_help = !self.state.show_help,
            Action::Quit => self.should_quit = true,
            Action::Resize(_, _) => {}
        }
        vec![]
    }

    fn sync_audio(&mut self) {
        self.state.playing = self.audio.active_control().copied();
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        use crate::theme::C_BG;
        use ratatui::widgets::Block;
        let area = frame.area();

        frame.render_widget(
            Block::default().style(ratatui::style::Style::default().bg(C_BG)),
            area,
        );

        // ── Outer layout: header | separator | body | keys bar ────────────────
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.header.draw(frame, outer[0], false, &self.state);
        status_bar::draw_separator(frame, outer[1]);
        self.draw_page(frame, outer[2]);
        status_bar::draw_keys_bar(frame, outer[3], self.state.input_mode, self.state.page);

        // ── Help overlay (on top of everything) ──────────────────────────────
        if self.state.show_help {
            self.help_overlay.draw(frame, area, true, &self.state);
        }

        // ── Toast notifications (topmost layer) ──────────────────────────────
        self.toast.draw(frame, area);
    }

    fn draw_page(&mut self, frame: &mut ratatui::Frame, area: Rect) {
        let focused = !self.state.show_help;
        match self.state.page {
            Page::Home => self.entry_of_day.draw(frame, area, focused, &self.state),
            Page::Dictionary => self.slang_list.draw(frame, area, focused, &self.state),
            Page::Submit => self.submit_form.draw(frame, area, focused, &self.state),
        }
    }
}
