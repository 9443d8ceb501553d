/// Full-screen loading indicator shown until the first dashboard load lands
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_frame(tick: usize) -> &'static str {
    FRAMES[tick % FRAMES.len()]
}

pub struct LoadingScreen<'a> {
    message: &'a str,
    tick: usize,
    theme: Theme,
}

impl<'a> LoadingScreen<'a> {
    pub fn new(message: &'a str, tick: usize, theme: Theme) -> Self {
        Self {
            message,
            tick,
            theme,
        }
    }
}

impl<'a> Widget for LoadingScreen<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(45),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);

        let text = vec![
            Line::from(Span::styled(spinner_frame(self.tick), self.theme.heading())),
            Line::from(""),
            Line::from(self.message),
        ];

        let paragraph = Paragraph::new(text).alignment(Alignment::Center);
        Widget::render(paragraph, rows[1], buf);
    }
}
