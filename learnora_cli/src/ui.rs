/// Top-level TUI event loop, input handler and event router
use crate::components::{LoadingScreen, Modal, ModalWidget};
use crate::keymap::KeyMap;
use crate::screens::{
    AssessmentState, ChatState, Dashboard, DashboardState, Effect, Focus, PathsState,
};
use crate::theme::Theme;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use learnora_core::{ApiEvent, ApiRequest, ClientConfig, Dispatcher, HttpApi};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;

pub const LOADING_MESSAGE: &str = "Loading your dashboard...";

pub struct AppState {
    pub store: DashboardState,
    pub assessment: AssessmentState,
    pub paths: PathsState,
    pub chat: ChatState,
    pub focus: Focus,
    pub theme: Theme,
    pub show_help: bool,
    pub should_quit: bool,
    modal_stack: Vec<Modal>,
    tick: usize,
}

impl AppState {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            store: DashboardState::new(config.display_name.clone()),
            assessment: AssessmentState::new(),
            paths: PathsState::new(),
            chat: ChatState::new(),
            focus: Focus::default(),
            theme: Theme::default(),
            show_help: false,
            should_quit: false,
            modal_stack: Vec::new(),
            tick: 0,
        }
    }

    /// Requests issued once, before the first frame.
    pub fn startup_requests(&self) -> Vec<ApiRequest> {
        vec![ApiRequest::LoadDashboard]
    }

    pub fn push_modal(&mut self, modal: Modal) {
        self.modal_stack.push(modal);
    }

    pub fn pop_modal(&mut self) {
        self.modal_stack.pop();
    }

    pub fn current_modal(&self) -> Option<&Modal> {
        self.modal_stack.last()
    }

    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    fn apply_effect(&mut self, effect: Effect, requests: &mut Vec<ApiRequest>) {
        match effect {
            Effect::None => {}
            Effect::Request(request) => requests.push(request),
            Effect::Alert(message) => {
                self.store.set_last_action(message.clone());
                self.push_modal(Modal::new("Error", message));
            }
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Vec<ApiRequest> {
        let mut requests = Vec::new();

        if KeyMap::is_force_quit(code, modifiers) {
            self.should_quit = true;
            return requests;
        }

        // Nothing is on screen but the spinner until the first load settles
        if self.store.loading {
            if KeyMap::is_quit(code, modifiers) {
                self.should_quit = true;
            }
            return requests;
        }

        // A blocking alert swallows everything but its own dismissal
        if self.current_modal().is_some() {
            if KeyMap::is_dismiss(code) {
                self.pop_modal();
            }
            return requests;
        }

        if self.show_help {
            // Any key closes help
            self.show_help = false;
            return requests;
        }

        if KeyMap::is_focus_next(code) {
            self.focus = self.focus.next();
            return requests;
        }
        if KeyMap::is_focus_prev(code) {
            self.focus = self.focus.prev();
            return requests;
        }

        if self.focus == Focus::Chat {
            self.handle_chat_key(code, modifiers, &mut requests);
            return requests;
        }

        if KeyMap::is_quit(code, modifiers) {
            self.should_quit = true;
            return requests;
        }

        if KeyMap::is_help(code) {
            self.show_help = true;
            return requests;
        }

        if KeyMap::is_refresh(code) {
            let effect = self.store.refresh();
            self.apply_effect(effect, &mut requests);
            return requests;
        }

        if KeyMap::is_toggle_theme(code) {
            self.theme = Theme::new(!self.theme.high_contrast);
            return requests;
        }

        let effect = match self.focus {
            Focus::Assessment => self.handle_assessment_key(code),
            Focus::Paths => self.handle_paths_key(code),
            Focus::Chat => Effect::None,
        };
        self.apply_effect(effect, &mut requests);

        requests
    }

    fn handle_assessment_key(&mut self, code: KeyCode) -> Effect {
        if KeyMap::is_start_assessment(code) {
            let effect = self.assessment.start();
            if effect != Effect::None {
                self.store.set_last_action("Running assessment...");
            }
            return effect;
        }
        Effect::None
    }

    fn handle_paths_key(&mut self, code: KeyCode) -> Effect {
        let paths = &self.store.learning_paths;

        if KeyMap::is_down(code) {
            self.paths.move_down(paths.len());
        } else if KeyMap::is_up(code) {
            self.paths.move_up();
        } else if KeyMap::is_toggle(code) {
            return self.paths.toggle_selected(paths);
        } else if let Some(step) = KeyMap::slider_step(code) {
            return self.paths.adjust_progress(step);
        }

        Effect::None
    }

    fn handle_chat_key(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        requests: &mut Vec<ApiRequest>,
    ) {
        match code {
            KeyCode::Esc => self.focus = Focus::Assessment,
            KeyCode::Enter => {
                if KeyMap::is_submit(code, modifiers) {
                    let effect = self.chat.send();
                    self.apply_effect(effect, requests);
                }
            }
            KeyCode::Backspace => self.chat.backspace(),
            KeyCode::PageUp => self.chat.scroll_up(),
            KeyCode::PageDown => self.chat.scroll_down(),
            KeyCode::Char(c)
                if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.chat.insert_char(c)
            }
            _ => {}
        }
    }

    /// Route a finished request back to the panel that owns it.
    pub fn handle_event(&mut self, event: ApiEvent) -> Vec<ApiRequest> {
        let mut requests = Vec::new();

        let effect = match event {
            ApiEvent::DashboardLoaded(result) => {
                let first = self.store.apply(result);
                self.paths.sync(&self.store.learning_paths);
                if first {
                    requests.push(ApiRequest::LoadChatHistory);
                }
                Effect::None
            }
            ApiEvent::AssessmentFinished(result) => {
                if result.is_ok() {
                    self.store.set_last_action("Assessment complete");
                }
                self.assessment.finish(result)
            }
            ApiEvent::PathDetailsLoaded { path_id, result } => {
                self.paths.details_loaded(path_id, result)
            }
            ApiEvent::ProgressUpdated { path_id, result } => {
                if result.is_ok() {
                    self.store.set_last_action("Progress saved");
                }
                self.paths.progress_updated(path_id, result)
            }
            ApiEvent::ChatHistoryLoaded(result) => self.chat.history_loaded(result),
            ApiEvent::ChatReplied(result) => self.chat.reply(result),
        };
        self.apply_effect(effect, &mut requests);

        requests
    }
}

/// Draw one frame of the whole application.
pub fn draw(f: &mut Frame, app: &AppState) {
    let size = f.area();

    if app.store.loading {
        f.render_widget(LoadingScreen::new(LOADING_MESSAGE, app.tick, app.theme), size);
    } else {
        let dashboard = Dashboard::new(&app.store, &app.assessment, &app.paths, &app.chat)
            .focus(app.focus)
            .theme(app.theme);
        f.render_widget(dashboard, size);
    }

    if app.show_help {
        render_help(f, size, app.theme);
    }

    if let Some(modal) = app.current_modal() {
        f.render_widget(ModalWidget::new(modal, app.theme), size);
    }
}

fn render_help(f: &mut Frame, area: Rect, theme: Theme) {
    let area = crate::components::centered_rect(area, 60, 80);
    f.render_widget(Clear, area);

    let block = theme.panel(" Help - Keybindings ", true);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled("Learnora Dashboard", theme.heading())),
        Line::from(""),
    ];

    for (key, desc) in KeyMap::help_text() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:12}", key), theme.heading()),
            Span::raw(desc),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        theme.dim(),
    )));

    let paragraph = Paragraph::new(lines).alignment(Alignment::Left);
    f.render_widget(paragraph, inner);
}

pub fn run_tui(config: &ClientConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let api = Arc::new(HttpApi::new(&config.api_base_url)?);
    let (dispatcher, events) = Dispatcher::channel(api, runtime.handle().clone());

    log::info!("[UI] Starting dashboard against {}", config.api_base_url);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = AppState::new(config);
    let result = event_loop(&mut terminal, &mut app, &dispatcher, &events);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // In-flight requests are abandoned
    runtime.shutdown_background();
    log::info!("[UI] Dashboard closed");

    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    dispatcher: &Dispatcher,
    events: &crossbeam_channel::Receiver<ApiEvent>,
) -> Result<()> {
    for request in app.startup_requests() {
        dispatcher.dispatch(request);
    }

    while !app.should_quit {
        terminal.draw(|f| draw(f, app))?;

        while let Ok(event) = events.try_recv() {
            for request in app.handle_event(event) {
                dispatcher.dispatch(request);
            }
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    for request in app.handle_key(key.code, key.modifiers) {
                        dispatcher.dispatch(request);
                    }
                }
            }
        }

        app.tick();
    }

    Ok(())
}
