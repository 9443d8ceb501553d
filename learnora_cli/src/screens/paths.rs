/// Learning paths panel - path list, lazy content details, progress slider
use super::Effect;
use crate::theme::Theme;
use learnora_core::types::{ContentItem, LearningPath};
use learnora_core::{ApiError, ApiRequest};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

/// Tags shown per content item.
const MAX_TAGS: usize = 4;
const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub enum ContentState {
    Loading,
    Loaded(Vec<ContentItem>),
}

/// The single expanded path. Its content lives only as long as the
/// expansion does.
#[derive(Debug, Clone, PartialEq)]
pub struct Expansion {
    pub path_id: i64,
    pub content: ContentState,
    /// Slider position; starts at the server's progress for the path.
    pub slider: u8,
}

#[derive(Debug, Clone, Default)]
pub struct PathsState {
    /// Cursor into the parent's path list.
    pub selected: usize,
    pub expanded: Option<Expansion>,
}

impl PathsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_down(&mut self, count: usize) {
        if count > 0 && self.selected < count - 1 {
            self.selected += 1;
        }
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn is_expanded(&self, path_id: i64) -> bool {
        self.expanded.as_ref().is_some_and(|e| e.path_id == path_id)
    }

    pub fn content_details(&self) -> &[ContentItem] {
        match &self.expanded {
            Some(Expansion {
                content: ContentState::Loaded(items),
                ..
            }) => items.as_slice(),
            _ => &[],
        }
    }

    pub fn toggle_selected(&mut self, paths: &[LearningPath]) -> Effect {
        match paths.get(self.selected) {
            Some(path) => self.toggle(path),
            None => Effect::None,
        }
    }

    /// Selecting the expanded path collapses it; selecting any other path
    /// replaces the expansion and fetches its content afresh.
    pub fn toggle(&mut self, path: &LearningPath) -> Effect {
        if self.is_expanded(path.id) {
            self.expanded = None;
            return Effect::None;
        }

        self.expanded = Some(Expansion {
            path_id: path.id,
            content: ContentState::Loading,
            slider: path.progress.min(100),
        });
        Effect::Request(ApiRequest::LoadPathDetails { path_id: path.id })
    }

    /// Results for a path that is no longer expanded (or already loaded)
    /// are dropped.
    pub fn details_loaded(
        &mut self,
        path_id: i64,
        result: Result<Vec<ContentItem>, ApiError>,
    ) -> Effect {
        let Some(expansion) = self.expanded.as_mut() else {
            log::debug!("[PATHS] Dropping details for {}, nothing expanded", path_id);
            return Effect::None;
        };
        if expansion.path_id != path_id || expansion.content != ContentState::Loading {
            log::debug!("[PATHS] Dropping stale details for {}", path_id);
            return Effect::None;
        }

        let items = match result {
            Ok(items) => items,
            Err(e) => {
                log::error!("[PATHS] Error loading path details for {}: {}", path_id, e);
                Vec::new()
            }
        };
        expansion.content = ContentState::Loaded(items);
        Effect::None
    }

    /// Move the slider of the loaded expansion by `delta` and submit the new
    /// value straight away. Every move is its own request.
    pub fn adjust_progress(&mut self, delta: i16) -> Effect {
        let Some(expansion) = self.expanded.as_mut() else {
            return Effect::None;
        };
        if !matches!(expansion.content, ContentState::Loaded(_)) {
            return Effect::None;
        }

        let value = (expansion.slider as i16 + delta).clamp(0, 100) as u8;
        if value == expansion.slider {
            return Effect::None;
        }
        expansion.slider = value;

        Effect::Request(ApiRequest::UpdateProgress {
            path_id: expansion.path_id,
            progress: value,
        })
    }

    pub fn progress_updated(&mut self, path_id: i64, result: Result<(), ApiError>) -> Effect {
        match result {
            Ok(()) => Effect::Request(ApiRequest::LoadDashboard),
            Err(e) => {
                log::error!("[PATHS] Error updating progress for {}: {}", path_id, e);
                Effect::None
            }
        }
    }

    /// Re-align with a freshly loaded path list.
    pub fn sync(&mut self, paths: &[LearningPath]) {
        if paths.is_empty() {
            self.selected = 0;
        } else if self.selected >= paths.len() {
            self.selected = paths.len() - 1;
        }

        let server_progress = self
            .expanded
            .as_ref()
            .and_then(|e| paths.iter().find(|p| p.id == e.path_id))
            .map(|p| p.progress.min(100));

        match server_progress {
            Some(progress) => {
                if let Some(expansion) = self.expanded.as_mut() {
                    expansion.slider = progress;
                }
            }
            None => self.expanded = None,
        }
    }
}

/// Text gauge such as `████████░░░░░░░░░░░░`.
pub fn progress_bar(progress: u8, width: usize) -> String {
    let filled = (progress.min(100) as usize * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn paths_lines(
    state: &PathsState,
    paths: &[LearningPath],
    theme: Theme,
    focused: bool,
) -> Vec<Line<'static>> {
    if paths.is_empty() {
        return vec![
            Line::from(""),
            Line::from(Span::styled("📝 No learning paths yet.", theme.dim())),
            Line::from(Span::styled(
                "Take an assessment to get personalized recommendations!",
                theme.dim(),
            )),
        ];
    }

    let mut lines = Vec::new();

    for (idx, path) in paths.iter().enumerate() {
        let cursor = idx == state.selected && focused;
        let marker = match (state.is_expanded(path.id), cursor) {
            (true, true) => "▼ ",
            (true, false) => "▽ ",
            (false, true) => "▶ ",
            (false, false) => "▷ ",
        };

        let mut title_style = theme.heading();
        if cursor {
            title_style = title_style.add_modifier(Modifier::REVERSED);
        }

        let mut title = vec![Span::styled(format!("{}{}", marker, path.title), title_style)];
        if path.is_completed() {
            title.push(Span::styled("  ✓ Completed", theme.heading()));
        }
        lines.push(Line::from(title));

        if let Some(desc) = path.description.as_deref().filter(|d| !d.is_empty()) {
            lines.push(Line::from(format!("  {}", desc)));
        }

        let minutes = path
            .estimated_time
            .map(|m| m.to_string())
            .unwrap_or_else(|| "?".to_string());
        lines.push(Line::from(vec![
            Span::styled(format!("  ⏱️ {} min   ", minutes), theme.dim()),
            Span::raw(format!("{}% Complete", path.progress)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", progress_bar(path.progress, BAR_WIDTH)),
            theme.gauge(),
        )));

        if let Some(expansion) = state.expanded.as_ref().filter(|e| e.path_id == path.id) {
            lines.extend(expansion_lines(expansion, theme));
        }

        lines.push(Line::from(""));
    }

    lines
}

fn expansion_lines(expansion: &Expansion, theme: Theme) -> Vec<Line<'static>> {
    let items = match &expansion.content {
        ContentState::Loading => {
            return vec![Line::from(Span::styled("    Loading...", theme.dim()))];
        }
        ContentState::Loaded(items) => items,
    };

    let mut lines = Vec::new();

    for (idx, content) in items.iter().enumerate() {
        lines.push(Line::from(Span::styled(
            format!("    {}. {}", idx + 1, content.title),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        if let Some(desc) = content.description.as_deref().filter(|d| !d.is_empty()) {
            lines.push(Line::from(format!("    {}", desc)));
        }
        lines.push(Line::from(Span::styled(
            format!(
                "    📊 {}   ⏱️ {} min   📄 {}",
                content.difficulty, content.duration_minutes, content.content_type
            ),
            theme.dim(),
        )));
        if !content.tags.is_empty() {
            let tags: Vec<String> = content
                .tags
                .iter()
                .take(MAX_TAGS)
                .map(|t| format!("[{}]", t))
                .collect();
            lines.push(Line::from(format!("    {}", tags.join(" "))));
        }
        if !content.url.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("    View Resource → {}", content.url),
                Style::default().fg(theme.link()).add_modifier(Modifier::UNDERLINED),
            )));
        }
    }

    lines.push(Line::from(vec![
        Span::styled("    Update Progress: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("{}%", expansion.slider), theme.heading()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("    ◀ ", theme.dim()),
        Span::styled(progress_bar(expansion.slider, BAR_WIDTH), theme.gauge()),
        Span::styled(" ▶  [h/l] ±1  [H/L] ±10", theme.dim()),
    ]));

    lines
}

pub struct PathsPanel<'a> {
    state: &'a PathsState,
    paths: &'a [LearningPath],
    theme: Theme,
    focused: bool,
}

impl<'a> PathsPanel<'a> {
    pub fn new(state: &'a PathsState, paths: &'a [LearningPath]) -> Self {
        Self {
            state,
            paths,
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

    /// First line of the selected path, so the cursor stays on screen.
    fn cursor_line(&self) -> usize {
        if self.state.selected == 0 {
            return 0;
        }
        let above = &self.paths[..self.state.selected.min(self.paths.len())];
        paths_lines(self.state, above, self.theme, false).len()
    }
}

impl<'a> Widget for PathsPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.theme.panel(" 📚 Your Learning Paths ", self.focused);
        let inner = block.inner(area);
        Widget::render(block, area, buf);

        let lines = paths_lines(self.state, self.paths, self.theme, self.focused);
        let scroll = if self.paths.is_empty() {
            0
        } else {
            self.cursor_line().saturating_sub(inner.height as usize / 3)
        };

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll.min(u16::MAX as usize) as u16, 0));
        Widget::render(paragraph, inner, buf);
    }
}
