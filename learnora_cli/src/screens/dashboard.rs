/// Dashboard screen - the shared data store plus the three-panel layout
use super::{
    AssessmentPanel, AssessmentState, ChatPanel, ChatState, Effect, Focus, PathsPanel, PathsState,
};
use crate::theme::Theme;
use learnora_core::types::{Assessment, LearningPath};
use learnora_core::{ApiError, ApiRequest, DashboardSnapshot};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Assessment history and learning paths, always replaced together.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub assessments: Vec<Assessment>,
    pub learning_paths: Vec<LearningPath>,
    /// True until the first load settles, success or not.
    pub loading: bool,
    pub refreshing: bool,
    pub display_name: Option<String>,
    pub last_action: String,
}

impl DashboardState {
    pub fn new(display_name: Option<String>) -> Self {
        Self {
            assessments: Vec::new(),
            learning_paths: Vec::new(),
            loading: true,
            refreshing: false,
            display_name,
            last_action: "Loading".to_string(),
        }
    }

    pub fn refresh(&mut self) -> Effect {
        self.refreshing = true;
        self.last_action = "Refreshing...".to_string();
        Effect::Request(ApiRequest::LoadDashboard)
    }

    /// Apply a dashboard load. Returns true when this was the first load.
    ///
    /// A failed load keeps whatever was shown before.
    pub fn apply(&mut self, result: Result<DashboardSnapshot, ApiError>) -> bool {
        let first = self.loading;
        self.loading = false;
        self.refreshing = false;

        match result {
            Ok(snapshot) => {
                log::info!(
                    "[DASHBOARD] Loaded {} assessments, {} learning paths",
                    snapshot.assessments.len(),
                    snapshot.learning_paths.len()
                );
                self.assessments = snapshot.assessments;
                self.learning_paths = snapshot.learning_paths;
                self.last_action = "Dashboard up to date".to_string();
            }
            Err(e) => {
                log::error!("[DASHBOARD] Error loading dashboard: {}", e);
                self.last_action = "Could not reach the server".to_string();
            }
        }

        first
    }

    pub fn set_last_action(&mut self, action: impl Into<String>) {
        self.last_action = action.into();
    }
}

pub struct Dashboard<'a> {
    store: &'a DashboardState,
    assessment: &'a AssessmentState,
    paths: &'a PathsState,
    chat: &'a ChatState,
    focus: Focus,
    theme: Theme,
}

impl<'a> Dashboard<'a> {
    pub fn new(
        store: &'a DashboardState,
        assessment: &'a AssessmentState,
        paths: &'a PathsState,
        chat: &'a ChatState,
    ) -> Self {
        Self {
            store,
            assessment,
            paths,
            chat,
            focus: Focus::default(),
            theme: Theme::default(),
        }
    }

    pub fn focus(mut self, focus: Focus) -> Self {
        self.focus = focus;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

impl<'a> Widget for Dashboard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);

        self.render_header(rows[0], buf);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Percentage(30),
            ])
            .split(rows[1]);

        AssessmentPanel::new(self.assessment, &self.store.assessments)
            .theme(self.theme)
            .focused(self.focus == Focus::Assessment)
            .render(columns[0], buf);
        PathsPanel::new(self.paths, &self.store.learning_paths)
            .theme(self.theme)
            .focused(self.focus == Focus::Paths)
            .render(columns[1], buf);
        ChatPanel::new(self.chat)
            .theme(self.theme)
            .focused(self.focus == Focus::Chat)
            .render(columns[2], buf);

        self.render_status_bar(rows[2], buf);
    }
}

impl<'a> Dashboard<'a> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border(false));
        let inner = block.inner(area);
        Widget::render(block, area, buf);

        let mut header = vec![Span::styled("🎓 Learnora", self.theme.heading())];
        if let Some(name) = &self.store.display_name {
            header.push(Span::raw("   "));
            header.push(Span::raw(format!("Welcome, {}!", name)));
        }
        let header = Line::from(header);
        Widget::render(Paragraph::new(header), inner, buf);
    }

    fn render_status_bar(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border(false));
        let inner = block.inner(area);
        Widget::render(block, area, buf);

        let keys = match self.focus {
            Focus::Assessment => "[Enter] Start",
            Focus::Paths => "[Enter] Expand  [h/l] Progress",
            Focus::Chat => "[Enter] Send  [Esc] Leave",
        };

        let status_text = Line::from(vec![
            Span::styled("Status: ", self.theme.dim()),
            Span::styled(
                self.store.last_action.as_str(),
                Style::default().fg(self.theme.accent()),
            ),
            Span::raw("  "),
            Span::styled(keys, self.theme.dim()),
            Span::raw("  "),
            Span::styled("[Tab] Panel  [?] Help  [q] Quit", self.theme.dim()),
        ]);

        Widget::render(Paragraph::new(status_text), inner, buf);
    }
}
