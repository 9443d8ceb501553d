/// Centered blocking modal used for alerts
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

const DISMISS_HINT: &str = "[Enter/Esc] Dismiss";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub title: String,
    pub message: String,
}

impl Modal {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

pub struct ModalWidget<'a> {
    modal: &'a Modal,
    theme: Theme,
}

impl<'a> ModalWidget<'a> {
    pub fn new(modal: &'a Modal, theme: Theme) -> Self {
        Self { modal, theme }
    }
}

/// Rectangle centered in `area`, sized by percentages.
pub fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

impl<'a> Widget for ModalWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = centered_rect(area, 60, 40);

        Widget::render(Clear, modal_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()))
            .title(Span::styled(
                format!(" {} ", self.modal.title),
                self.theme.heading(),
            ))
            .style(Style::default().bg(Color::Black));

        let inner = block.inner(modal_area);
        Widget::render(block, modal_area, buf);

        let text = vec![
            Line::from(self.modal.message.as_str()),
            Line::from(""),
            Line::from(Span::styled(DISMISS_HINT, self.theme.dim())),
        ];

        let paragraph = Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Left);
        Widget::render(paragraph, inner, buf);
    }
}
