use crate::api::LearnoraApi;
use crate::error::ApiError;
use crate::events::{ApiEvent, ApiRequest, DashboardSnapshot};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;
use tokio::runtime::Handle;

/// Runs [`ApiRequest`]s on a tokio runtime and reports each outcome as one
/// [`ApiEvent`] on a crossbeam channel.
///
/// Requests are fire-and-forget: there is no cancellation and no timeout,
/// and requests from different panels complete in any order. The receiving
/// side is polled with `try_recv` from the UI loop.
pub struct Dispatcher {
    api: Arc<dyn LearnoraApi>,
    runtime: Handle,
    sender: Sender<ApiEvent>,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn LearnoraApi>, runtime: Handle, sender: Sender<ApiEvent>) -> Self {
        Self {
            api,
            runtime,
            sender,
        }
    }

    /// Build a dispatcher together with the receiver its events arrive on.
    pub fn channel(api: Arc<dyn LearnoraApi>, runtime: Handle) -> (Self, Receiver<ApiEvent>) {
        let (sender, receiver) = unbounded();
        (Self::new(api, runtime, sender), receiver)
    }

    pub fn dispatch(&self, request: ApiRequest) {
        log::debug!("[DISPATCH] Spawning {}", request.name());
        let api = Arc::clone(&self.api);
        let sender = self.sender.clone();

        self.runtime.spawn(async move {
            let event = execute(api.as_ref(), request).await;
            if sender.send(event).is_err() {
                // Receiver gone: the UI has shut down. Nothing left to notify.
                log::debug!("[DISPATCH] Dropping event, receiver closed");
            }
        });
    }
}

/// Fetch both dashboard collections concurrently; both must succeed.
pub async fn fetch_dashboard(api: &dyn LearnoraApi) -> Result<DashboardSnapshot, ApiError> {
    let (assessments, learning_paths) =
        tokio::try_join!(api.assessment_history(), api.learning_paths())?;
    Ok(DashboardSnapshot {
        assessments,
        learning_paths,
    })
}

/// Run one request to completion and wrap its outcome.
pub async fn execute(api: &dyn LearnoraApi, request: ApiRequest) -> ApiEvent {
    let event = match request {
        ApiRequest::LoadDashboard => ApiEvent::DashboardLoaded(fetch_dashboard(api).await),
        ApiRequest::StartAssessment => ApiEvent::AssessmentFinished(api.start_assessment().await),
        ApiRequest::LoadPathDetails { path_id } => ApiEvent::PathDetailsLoaded {
            path_id,
            result: api.path_details(path_id).await,
        },
        ApiRequest::UpdateProgress { path_id, progress } => ApiEvent::ProgressUpdated {
            path_id,
            result: api.update_progress(path_id, progress).await,
        },
        ApiRequest::LoadChatHistory => ApiEvent::ChatHistoryLoaded(api.chat_history().await),
        ApiRequest::SendChat { message } => ApiEvent::ChatReplied(api.send_chat(&message).await),
    };

    log_failure(&event);
    event
}

fn log_failure(event: &ApiEvent) {
    let failure = match event {
        ApiEvent::DashboardLoaded(Err(e)) => Some(("load_dashboard", e)),
        ApiEvent::AssessmentFinished(Err(e)) => Some(("start_assessment", e)),
        ApiEvent::PathDetailsLoaded { result: Err(e), .. } => Some(("load_path_details", e)),
        ApiEvent::ProgressUpdated { result: Err(e), .. } => Some(("update_progress", e)),
        ApiEvent::ChatHistoryLoaded(Err(e)) => Some(("load_chat_history", e)),
        ApiEvent::ChatReplied(Err(e)) => Some(("send_chat", e)),
        _ => None,
    };

    if let Some((name, e)) = failure {
        log::warn!("[DISPATCH] {} failed: {}", name, e);
    }
}
