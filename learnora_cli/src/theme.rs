/// Colors and shared styles for every Learnora widget
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
};

const TEAL: Color = Color::Rgb(45, 212, 191);
const INDIGO: Color = Color::Rgb(102, 126, 234);
const ROSE: Color = Color::Rgb(248, 113, 113);
const AMBER: Color = Color::Rgb(251, 191, 36);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Theme {
    pub high_contrast: bool,
}

impl Theme {
    pub fn new(high_contrast: bool) -> Self {
        Self { high_contrast }
    }

    pub fn accent(&self) -> Color {
        if self.high_contrast {
            Color::White
        } else {
            TEAL
        }
    }

    /// Secondary color for links and the user side of the chat
    pub fn link(&self) -> Color {
        if self.high_contrast {
            Color::White
        } else {
            INDIGO
        }
    }

    pub fn border(&self, focused: bool) -> Style {
        match (self.high_contrast, focused) {
            (true, true) => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            (true, false) => Style::default().fg(Color::Gray),
            (false, true) => Style::default().fg(TEAL),
            (false, false) => Style::default().fg(Color::DarkGray),
        }
    }

    pub fn heading(&self) -> Style {
        Style::default().fg(self.accent()).add_modifier(Modifier::BOLD)
    }

    pub fn dim(&self) -> Style {
        Style::default().add_modifier(Modifier::DIM)
    }

    pub fn gap(&self, high_priority: bool) -> Style {
        match (self.high_contrast, high_priority) {
            (true, true) => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            (true, false) => Style::default().fg(Color::White),
            (false, true) => Style::default().fg(ROSE),
            (false, false) => Style::default().fg(AMBER),
        }
    }

    pub fn user_message(&self) -> Style {
        Style::default().fg(self.link()).add_modifier(Modifier::BOLD)
    }

    pub fn assistant_message(&self) -> Style {
        if self.high_contrast {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        }
    }

    pub fn gauge(&self) -> Style {
        Style::default().fg(self.accent()).bg(Color::Black)
    }

    /// Bordered panel with the title styled as a heading.
    pub fn panel<'a>(&self, title: &'a str, focused: bool) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(self.border(focused))
            .title(Span::styled(title, self.heading()))
    }
}
