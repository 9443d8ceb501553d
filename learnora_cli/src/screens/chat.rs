/// Chat panel - local transcript, single-flight send, inline error fallback
use super::Effect;
use crate::components::{tail_to_width, wrap_text};
use crate::theme::Theme;
use learnora_core::types::{ChatExchange, ChatMessage, Sender};
use learnora_core::{ApiError, ApiRequest};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub const CHAT_ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";
pub const CHAT_GREETING: &str =
    "👋 Hi! I'm your AI learning assistant. Ask me anything about your learning journey!";
pub const TYPING: &str = "Typing...";

/// Lines moved per PageUp/PageDown.
const SCROLL_PAGE: u16 = 5;

#[derive(Debug, Clone, Default)]
pub struct ChatState {
    pub transcript: Vec<ChatMessage>,
    pub input: String,
    pub pending: bool,
    /// Lines scrolled back from the newest entry; 0 follows the tail.
    pub scroll_back: u16,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_char(&mut self, c: char) {
        if self.pending {
            return;
        }
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        if self.pending {
            return;
        }
        self.input.pop();
    }

    pub fn can_send(&self) -> bool {
        !self.pending && !self.input.trim().is_empty()
    }

    /// The user entry is appended before the request goes out.
    pub fn send(&mut self) -> Effect {
        if !self.can_send() {
            return Effect::None;
        }

        let message = self.input.trim().to_string();
        self.input.clear();
        self.push(ChatMessage::user(message.clone()));
        self.pending = true;

        Effect::Request(ApiRequest::SendChat { message })
    }

    pub fn reply(&mut self, result: Result<String, ApiError>) -> Effect {
        self.pending = false;
        match result {
            Ok(text) => self.push(ChatMessage::assistant(text)),
            Err(e) => {
                log::error!("[CHAT] Error sending message: {}", e);
                self.push(ChatMessage::assistant(CHAT_ERROR_REPLY));
            }
        }
        Effect::None
    }

    /// Stored exchanges go in front of anything sent locally since startup.
    pub fn history_loaded(&mut self, result: Result<Vec<ChatExchange>, ApiError>) -> Effect {
        match result {
            Ok(exchanges) => {
                log::debug!("[CHAT] Loaded {} exchanges", exchanges.len());
                let mut transcript: Vec<ChatMessage> = exchanges
                    .into_iter()
                    .flat_map(ChatExchange::into_transcript)
                    .collect();
                transcript.append(&mut self.transcript);
                self.transcript = transcript;
                self.scroll_back = 0;
            }
            Err(e) => log::error!("[CHAT] Error loading chat history: {}", e),
        }
        Effect::None
    }

    pub fn scroll_up(&mut self) {
        self.scroll_back = self.scroll_back.saturating_add(SCROLL_PAGE);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_back = self.scroll_back.saturating_sub(SCROLL_PAGE);
    }

    fn push(&mut self, message: ChatMessage) {
        self.transcript.push(message);
        self.scroll_back = 0;
    }
}

/// Transcript pre-wrapped to `width`, plus the greeting or typing rows.
pub fn transcript_lines(state: &ChatState, theme: Theme, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if state.transcript.is_empty() {
        for row in wrap_text(CHAT_GREETING, width) {
            lines.push(Line::from(Span::styled(row, theme.dim())));
        }
    }

    for message in &state.transcript {
        let (label, style) = match message.sender {
            Sender::User => ("You:", theme.user_message()),
            Sender::Assistant => ("Assistant:", theme.assistant_message()),
        };
        lines.push(Line::from(Span::styled(label, style)));
        for row in wrap_text(&message.text, width.saturating_sub(2)) {
            lines.push(Line::from(Span::styled(format!("  {}", row), style)));
        }
        lines.push(Line::from(""));
    }

    if state.pending {
        lines.push(Line::from(Span::styled(TYPING, theme.dim())));
    }

    lines
}

pub struct ChatPanel<'a> {
    state: &'a ChatState,
    theme: Theme,
    focused: bool,
}

impl<'a> ChatPanel<'a> {
    pub fn new(state: &'a ChatState) -> Self {
        Self {
            state,
            theme: Theme::default(),
            focused: false,
        }
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn render_input(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        Widget::render(block, area, buf);

        let hint_style = if self.state.can_send() {
            self.theme.heading()
        } else {
            self.theme.dim()
        };

        let mut spans = Vec::new();
        if self.state.input.is_empty() {
            spans.push(Span::styled("Ask me anything...", self.theme.dim()));
        } else {
            // Keep the tail of long input visible.
            let room = (inner.width as usize).saturating_sub(10);
            spans.push(Span::raw(tail_to_width(&self.state.input, room)));
        }
        if self.focused && !self.state.pending {
            spans.push(Span::styled("▏", Style::default().fg(self.theme.accent())));
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(8)])
            .split(inner);

        Widget::render(Paragraph::new(Line::from(spans)), columns[0], buf);
        Widget::render(
            Paragraph::new(Span::styled("[Send]", hint_style)),
            columns[1],
            buf,
        );
    }
}

impl<'a> Widget for ChatPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.theme.panel(" 💬 AI Learning Assistant ", self.focused);
        let inner = block.inner(area);
        Widget::render(block, area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(inner);

        let transcript_area = rows[0];
        let lines = transcript_lines(self.state, self.theme, transcript_area.width as usize);

        // Scroll is measured from the bottom so new entries stay in view.
        let max_offset = lines.len().saturating_sub(transcript_area.height as usize);
        let offset = max_offset.saturating_sub(self.state.scroll_back as usize);

        let paragraph = Paragraph::new(lines).scroll((offset.min(u16::MAX as usize) as u16, 0));
        Widget::render(paragraph, transcript_area, buf);

        self.render_input(rows[1], buf);
    }
}
