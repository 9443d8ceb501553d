/// Screen module exports
use learnora_core::ApiRequest;

pub mod assessment;
pub mod chat;
pub mod dashboard;
pub mod paths;

pub use assessment::{AssessmentPanel, AssessmentState};
pub use chat::{ChatPanel, ChatState};
pub use dashboard::{Dashboard, DashboardState};
pub use paths::{ContentState, Expansion, PathsPanel, PathsState};

/// Which panel receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Assessment,
    Paths,
    Chat,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Assessment => Focus::Paths,
            Focus::Paths => Focus::Chat,
            Focus::Chat => Focus::Assessment,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Assessment => Focus::Chat,
            Focus::Paths => Focus::Assessment,
            Focus::Chat => Focus::Paths,
        }
    }
}

/// What a panel asks of the controller after handling a key or an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Request(ApiRequest),
    /// Blocking alert the user has to dismiss.
    Alert(String),
}
