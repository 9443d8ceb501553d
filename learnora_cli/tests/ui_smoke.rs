/// Smoke tests for UI rendering using ratatui buffer snapshots

use learnora_cli::screens::{
    AssessmentPanel, AssessmentState, ChatPanel, ChatState, PathsPanel, PathsState,
};
use learnora_cli::theme::Theme;
use learnora_cli::ui::{self, AppState};
use learnora_core::types::{Assessment, ContentItem, LearningPath};
use learnora_core::{ApiEvent, ClientConfig, DashboardSnapshot};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

fn buffer_text(buffer: &Buffer) -> String {
    buffer.content().iter().map(|c| c.symbol()).collect::<String>()
}

fn render_app(app: &AppState, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| ui::draw(f, app)).unwrap();
    buffer_text(terminal.backend().buffer())
}

fn render_widget<W: ratatui::widgets::Widget>(widget: W, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|f| f.render_widget(widget, f.area()))
        .unwrap();
    buffer_text(terminal.backend().buffer())
}

fn sample_assessment() -> Assessment {
    serde_json::from_value(serde_json::json!({
        "id": 3,
        "theta": 0.4567,
        "mastery_scores": { "algebra": 0.855, "geometry": 0.3 },
        "learning_gaps": [
            {
                "skill": "geometry",
                "priority": "high",
                "mastery_level": 0.3,
                "recommended_difficulty": "easy"
            },
            {
                "skill": "statistics",
                "priority": "low",
                "mastery_level": 0.62,
                "recommended_difficulty": "medium"
            }
        ],
        "timestamp": "2024-03-05T10:15:00"
    }))
    .unwrap()
}

fn sample_path(id: i64, progress: u8) -> LearningPath {
    LearningPath {
        id,
        title: format!("Calculus Basics {}", id),
        description: Some("Limits and derivatives".to_string()),
        estimated_time: Some(90),
        progress,
        ..Default::default()
    }
}

#[test]
fn test_loading_screen_until_first_load() {
    let mut app = AppState::new(&ClientConfig::default());
    let text = render_app(&app, 120, 30);
    assert!(text.contains("Loading your dashboard..."));

    app.handle_event(ApiEvent::DashboardLoaded(Ok(DashboardSnapshot::default())));
    let text = render_app(&app, 200, 50);
    assert!(!text.contains("Loading your dashboard..."));
    assert!(text.contains("Learnora"));
}

#[test]
fn test_header_greets_configured_name() {
    let config = ClientConfig {
        display_name: Some("Ada".to_string()),
        ..Default::default()
    };
    let mut app = AppState::new(&config);
    app.handle_event(ApiEvent::DashboardLoaded(Ok(DashboardSnapshot::default())));

    let text = render_app(&app, 200, 50);
    assert!(text.contains("Welcome, Ada!"));
}

#[test]
fn test_empty_dashboard_shows_prompts() {
    let mut app = AppState::new(&ClientConfig::default());
    app.handle_event(ApiEvent::DashboardLoaded(Ok(DashboardSnapshot::default())));

    let text = render_app(&app, 200, 50);
    assert!(text.contains("Take your first assessment to get started!"));
    assert!(text.contains("No learning paths yet."));
    assert!(text.contains("Take an assessment to get personalized recommendations!"));
    assert!(text.contains("Hi! I'm your AI learning assistant."));
}

#[test]
fn test_zero_paths_renders_no_list() {
    let state = PathsState::new();
    let text = render_widget(PathsPanel::new(&state, &[]), 80, 20);
    assert!(text.contains("No learning paths yet."));
    assert!(!text.contains("% Complete"));
}

#[test]
fn test_assessment_panel_shows_mastery_and_gaps() {
    let state = AssessmentState::new();
    let history = vec![sample_assessment()];
    let text = render_widget(AssessmentPanel::new(&state, &history), 80, 30);

    assert!(text.contains("Latest Mastery Levels (2024-03-05)"));
    assert!(text.contains("Algebra"));
    assert!(text.contains("86%"));
    assert!(text.contains("Geometry"));
    assert!(text.contains("30%"));
    assert!(text.contains("geometry - HIGH"));
    assert!(text.contains("Mastery: 30% | Level: easy"));
    assert!(text.contains("statistics - LOW"));
    assert!(text.contains("Mastery: 62% | Level: medium"));
    assert!(!text.contains("Take your first assessment"));
}

#[test]
fn test_assessment_panel_inline_result() {
    let mut state = AssessmentState::new();
    state.result = Some(sample_assessment());
    let text = render_widget(AssessmentPanel::new(&state, &[]), 80, 30);

    assert!(text.contains("Assessment Complete!"));
    assert!(text.contains("0.46"));
    assert!(!text.contains("Take your first assessment"));
}

#[test]
fn test_no_gaps_message() {
    let state = AssessmentState::new();
    let mut assessment = sample_assessment();
    assessment.learning_gaps.clear();
    let history = vec![assessment];

    let text = render_widget(AssessmentPanel::new(&state, &history), 80, 30);
    assert!(text.contains("No gaps identified. Great job!"));
}

#[test]
fn test_running_assessment_label() {
    let mut state = AssessmentState::new();
    state.start();
    let text = render_widget(AssessmentPanel::new(&state, &[]), 80, 10);
    assert!(text.contains("Running Assessment..."));
}

#[test]
fn test_paths_panel_expansion() {
    let paths = vec![sample_path(1, 40), sample_path(2, 100)];
    let mut state = PathsState::new();

    let text = render_widget(PathsPanel::new(&state, &paths), 100, 40);
    assert!(text.contains("Calculus Basics 1"));
    assert!(text.contains("Limits and derivatives"));
    assert!(text.contains("90 min"));
    assert!(text.contains("40% Complete"));
    assert!(text.contains("100% Complete"));

    state.toggle(&paths[0]);
    let text = render_widget(PathsPanel::new(&state, &paths), 100, 40);
    assert!(text.contains("Loading..."));

    let content = ContentItem {
        id: "c1".to_string(),
        title: "Intro to Limits".to_string(),
        description: Some("Short video".to_string()),
        difficulty: "easy".to_string(),
        duration_minutes: 12,
        content_type: "video".to_string(),
        tags: ["calc", "limits", "intro", "video", "extra"]
            .iter()
            .map(|t| t.to_string())
            .collect(),
        url: "https://example.org/limits".to_string(),
    };
    state.details_loaded(1, Ok(vec![content]));

    let text = render_widget(PathsPanel::new(&state, &paths), 100, 40);
    assert!(!text.contains("Loading..."));
    assert!(text.contains("1. Intro to Limits"));
    assert!(text.contains("[calc] [limits] [intro] [video]"));
    assert!(!text.contains("[extra]"));
    assert!(text.contains("https://example.org/limits"));
    assert!(text.contains("Update Progress: 40%"));
}

#[test]
fn test_chat_panel_greeting_and_typing() {
    let mut state = ChatState::new();
    let text = render_widget(ChatPanel::new(&state), 100, 20);
    assert!(text.contains("Hi! I'm your AI learning assistant."));
    assert!(!text.contains("Typing..."));

    state.input = "What should I study next?".to_string();
    state.send();
    let text = render_widget(ChatPanel::new(&state), 100, 20);
    assert!(text.contains("You:"));
    assert!(text.contains("What should I study next?"));
    assert!(text.contains("Typing..."));
    assert!(!text.contains("AI learning assistant."));

    state.reply(Ok("Focus on geometry.".to_string()));
    let text = render_widget(ChatPanel::new(&state), 100, 20);
    assert!(text.contains("Assistant:"));
    assert!(text.contains("Focus on geometry."));
    assert!(!text.contains("Typing..."));
}

#[test]
fn test_chat_panel_follows_newest_entry() {
    let mut state = ChatState::new();
    for n in 0..20 {
        state.input = format!("message number {}", n);
        state.send();
        state.reply(Ok(format!("reply number {}", n)));
    }

    let text = render_widget(ChatPanel::new(&state), 60, 16);
    assert!(text.contains("reply number 19"));
    assert!(!text.contains("message number 0 "));

    state.scroll_up();
    state.scroll_up();
    state.scroll_up();
    let text = render_widget(ChatPanel::new(&state), 60, 16);
    assert!(!text.contains("reply number 19"));
}

#[test]
fn test_alert_and_help_overlays() {
    let mut app = AppState::new(&ClientConfig::default());
    app.handle_event(ApiEvent::DashboardLoaded(Ok(DashboardSnapshot::default())));
    app.handle_key(
        crossterm::event::KeyCode::Enter,
        crossterm::event::KeyModifiers::NONE,
    );
    app.handle_event(ApiEvent::AssessmentFinished(Err(
        learnora_core::ApiError::Api {
            status: 500,
            message: "boom".to_string(),
        },
    )));

    let text = render_app(&app, 200, 50);
    assert!(text.contains("Assessment failed. Please try again."));
    assert!(text.contains("[Enter/Esc] Dismiss"));

    app.handle_key(
        crossterm::event::KeyCode::Esc,
        crossterm::event::KeyModifiers::NONE,
    );
    app.handle_key(
        crossterm::event::KeyCode::Char('?'),
        crossterm::event::KeyModifiers::NONE,
    );
    let text = render_app(&app, 200, 50);
    assert!(text.contains("Help - Keybindings"));
    assert!(text.contains("Refresh dashboard"));
}

#[test]
fn test_high_contrast_renders() {
    let state = AssessmentState::new();
    let history = vec![sample_assessment()];
    let text = render_widget(
        AssessmentPanel::new(&state, &history).theme(Theme::new(true)),
        80,
        30,
    );
    assert!(text.contains("geometry - HIGH"));
}

#[test]
fn test_chat_panel_wraps_wide_glyphs() {
    let reply = "学".repeat(27);
    let mut state = ChatState::new();
    state.input = "你好".to_string();
    state.send();
    state.reply(Ok(reply));

    let text = render_widget(ChatPanel::new(&state), 24, 20);
    assert_eq!(text.matches('学').count(), 27);
    assert!(text.contains("你"));
}
