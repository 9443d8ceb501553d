/// Assessment panel - one-shot assessment trigger, latest result, mastery and gaps
use super::Effect;
use crate::theme::Theme;
use learnora_core::types::Assessment;
use learnora_core::{ApiError, ApiRequest};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

pub const ASSESSMENT_FAILED_ALERT: &str = "Assessment failed. Please try again.";

#[derive(Debug, Clone, Default)]
pub struct AssessmentState {
    pub pending: bool,
    /// Result of the assessment run from this panel, kept apart from history.
    pub result: Option<Assessment>,
}

impl AssessmentState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignored while a run is already in flight.
    pub fn start(&mut self) -> Effect {
        if self.pending {
            return Effect::None;
        }
        self.pending = true;
        Effect::Request(ApiRequest::StartAssessment)
    }

    /// On success the parent collections are stale, so ask for a refresh.
    /// On failure nothing but the pending flag changes.
    pub fn finish(&mut self, result: Result<Assessment, ApiError>) -> Effect {
        self.pending = false;
        match result {
            Ok(assessment) => {
                log::info!("[ASSESSMENT] Completed, theta={}", theta_label(assessment.theta));
                self.result = Some(assessment);
                Effect::Request(ApiRequest::LoadDashboard)
            }
            Err(e) => {
                log::error!("[ASSESSMENT] Start failed: {}", e);
                Effect::Alert(ASSESSMENT_FAILED_ALERT.to_string())
            }
        }
    }

    pub fn button_label(&self) -> &'static str {
        if self.pending {
            "⏳ Running Assessment..."
        } else {
            "🎯 Start New Assessment"
        }
    }
}

/// Mastery score in [0,1] as a whole percent.
pub fn percent(score: f64) -> i64 {
    (score * 100.0).round() as i64
}

pub fn format_percent(score: f64) -> String {
    format!("{}%", percent(score))
}

pub fn capitalize(skill: &str) -> String {
    let mut chars = skill.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn theta_label(theta: Option<f64>) -> String {
    match theta {
        Some(t) if t.is_finite() => format!("{:.2}", t),
        _ => "N/A".to_string(),
    }
}

/// Text of the panel body, top to bottom.
pub fn assessment_lines(
    state: &AssessmentState,
    history: &[Assessment],
    theme: Theme,
) -> Vec<Line<'static>> {
    let button_style = if state.pending {
        theme.dim()
    } else {
        theme.heading()
    };

    let mut lines = vec![
        Line::from(Span::styled(format!("[ {} ]", state.button_label()), button_style)),
        Line::from(""),
    ];

    if let Some(result) = &state.result {
        lines.push(Line::from(Span::styled(
            "✅ Assessment Complete!",
            theme.heading(),
        )));
        lines.push(Line::from(vec![
            Span::raw("Ability Score (θ): "),
            Span::styled(theta_label(result.theta), theme.heading()),
        ]));
        lines.push(Line::from(Span::styled(
            "📚 New learning path created! Check your Learning Paths panel.",
            theme.dim(),
        )));
        lines.push(Line::from(""));
    }

    if let Some(latest) = history.first() {
        let heading = match latest.timestamp {
            Some(ts) => format!("Latest Mastery Levels ({})", ts.format("%Y-%m-%d")),
            None => "Latest Mastery Levels".to_string(),
        };
        lines.push(Line::from(Span::styled(heading, theme.heading())));

        let name_width = latest
            .mastery_scores
            .keys()
            .map(|k| k.chars().count())
            .max()
            .unwrap_or(0);
        for (skill, score) in &latest.mastery_scores {
            lines.push(Line::from(vec![
                Span::raw(format!("  {:<width$}  ", capitalize(skill), width = name_width)),
                Span::styled(
                    format!("{:>4}", format_percent(*score)),
                    theme.heading().remove_modifier(Modifier::BOLD),
                ),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Learning Gaps", theme.heading())));

        if latest.learning_gaps.is_empty() {
            lines.push(Line::from(Span::styled(
                "No gaps identified. Great job!",
                theme.dim(),
            )));
        }

        for gap in &latest.learning_gaps {
            let style = theme.gap(gap.priority.is_high());
            lines.push(Line::from(Span::styled(
                format!("▌ {} - {}", gap.skill, gap.priority.label()),
                style.add_modifier(Modifier::BOLD),
            )));
            let mut detail = format!(
                "▌ Mastery: {} | Level: {}",
                format_percent(gap.mastery_level),
                gap.recommended_difficulty
            );
            if let Some(minutes) = gap.estimated_study_time {
                detail.push_str(&format!(" | ~{} min", minutes));
            }
            lines.push(Line::from(Span::styled(detail, style)));
        }
    }

    if history.is_empty() && state.result.is_none() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "📝 Take your first assessment to get started!",
            theme.dim(),
        )));
    }

    lines
}

pub struct AssessmentPanel<'a> {
    state: &'a AssessmentState,
    history: &'a [Assessment],
    theme: Theme,
    focused: bool,
}

impl<'a> AssessmentPanel<'a> {
    pub fn new(state: &'a AssessmentState, history: &'a [Assessment]) -> Self {
        Self {
            state,
            history,
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
}

impl<'a> Widget for AssessmentPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.theme.panel(" 📊 Knowledge Assessment ", self.focused);
        let inner = block.inner(area);
        Widget::render(block, area, buf);

        let lines = assessment_lines(self.state, self.history, self.theme);
        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        Widget::render(paragraph, inner, buf);
    }
}
