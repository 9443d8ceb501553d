/// Messages between the panels, the controller and the dispatcher.
///
/// Panels never touch the network: they hand back an [`ApiRequest`], the
/// dispatcher runs it, and the outcome comes back as exactly one
/// [`ApiEvent`].
use crate::error::ApiError;
use crate::types::{Assessment, ChatExchange, ContentItem, LearningPath};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    /// Re-fetch assessment history and learning paths together.
    LoadDashboard,
    StartAssessment,
    LoadPathDetails { path_id: i64 },
    UpdateProgress { path_id: i64, progress: u8 },
    LoadChatHistory,
    SendChat { message: String },
}

impl ApiRequest {
    pub fn name(&self) -> &'static str {
        match self {
            ApiRequest::LoadDashboard => "load_dashboard",
            ApiRequest::StartAssessment => "start_assessment",
            ApiRequest::LoadPathDetails { .. } => "load_path_details",
            ApiRequest::UpdateProgress { .. } => "update_progress",
            ApiRequest::LoadChatHistory => "load_chat_history",
            ApiRequest::SendChat { .. } => "send_chat",
        }
    }
}

/// Both dashboard collections, fetched together so they are always replaced
/// together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub assessments: Vec<Assessment>,
    pub learning_paths: Vec<LearningPath>,
}

#[derive(Debug)]
pub enum ApiEvent {
    DashboardLoaded(Result<DashboardSnapshot, ApiError>),
    AssessmentFinished(Result<Assessment, ApiError>),
    PathDetailsLoaded {
        path_id: i64,
        result: Result<Vec<ContentItem>, ApiError>,
    },
    ProgressUpdated {
        path_id: i64,
        result: Result<(), ApiError>,
    },
    ChatHistoryLoaded(Result<Vec<ChatExchange>, ApiError>),
    ChatReplied(Result<String, ApiError>),
}
