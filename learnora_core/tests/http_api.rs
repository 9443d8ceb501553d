/// HttpApi against an in-process axum server standing in for the Learnora backend

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use learnora_core::{ApiError, HttpApi, LearnoraApi};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Recorded {
    progress: Arc<Mutex<Vec<(i64, Value)>>>,
    chats: Arc<Mutex<Vec<Value>>>,
}

async fn spawn_server(recorded: Recorded) -> String {
    let app = Router::new()
        .route(
            "/api/assessment/start",
            post(|| async {
                Json(json!({
                    "assessment": {
                        "theta": 0.37,
                        "mastery_scores": {"algebra": 0.62, "probability": 0.18},
                        "learning_gaps": [{
                            "skill": "probability",
                            "mastery_level": 0.18,
                            "priority": "high",
                            "recommended_difficulty": "beginner",
                            "estimated_study_time": 45
                        }],
                        "recommended_content": []
                    }
                }))
            }),
        )
        .route(
            "/api/assessment/history",
            get(|| async {
                Json(json!({
                    "assessments": [
                        {"id": 2, "theta": 0.4, "mastery_scores": {"algebra": 0.7}, "learning_gaps": [], "timestamp": "2024-05-02T09:00:00.000001"},
                        {"id": 1, "theta": null, "mastery_scores": {}, "learning_gaps": [], "timestamp": "2024-05-01T09:00:00"}
                    ]
                }))
            }),
        )
        .route(
            "/api/learning-paths",
            get(|| async {
                Json(json!({
                    "learning_paths": [{
                        "id": 11,
                        "title": "Learning Path - 2024-05-02",
                        "description": "Personalized path based on assessment",
                        "content_items": ["python-intro"],
                        "estimated_time": 110,
                        "progress": 25,
                        "created_at": "2024-05-02T09:00:00",
                        "completed_at": null
                    }]
                }))
            }),
        )
        .route(
            "/api/learning-paths/:id",
            get(|path_id: Path<i64>| async move {
                if path_id.0 != 11 {
                    return (
                        StatusCode::NOT_FOUND,
                        Json(json!({"error": "Learning path not found"})),
                    );
                }
                (
                    StatusCode::OK,
                    Json(json!({
                        "learning_path": {"id": 11, "title": "Learning Path - 2024-05-02", "progress": 25},
                        "content_details": [{
                            "id": "python-intro",
                            "title": "Introduction to Python Programming",
                            "content_type": "article",
                            "difficulty": "beginner",
                            "duration_minutes": 20,
                            "description": "Learn Python basics",
                            "url": "https://example.com/python-intro",
                            "tags": ["python", "programming", "beginner", "tutorial", "extra"]
                        }]
                    })),
                )
            }),
        )
        .route(
            "/api/learning-paths/:id/progress",
            put(
                |State(recorded): State<Recorded>,
                 Path(path_id): Path<i64>,
                 Json(body): Json<Value>| async move {
                    recorded.progress.lock().unwrap().push((path_id, body));
                    Json(json!({"learning_path": {"id": path_id, "title": "t", "progress": 50}}))
                },
            ),
        )
        .route(
            "/api/chat/history",
            get(|| async {
                Json(json!({
                    "messages": [
                        {"id": 1, "message": "hi", "response": "hello", "timestamp": "2024-05-02T09:00:00"}
                    ]
                }))
            }),
        )
        .route(
            "/api/chat",
            post(
                |State(recorded): State<Recorded>, Json(body): Json<Value>| async move {
                    let message = body["message"].as_str().unwrap_or_default().to_string();
                    recorded.chats.lock().unwrap().push(body);
                    Json(json!({"message": message, "response": format!("echo: {}", message)}))
                },
            ),
        )
        .with_state(recorded);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/", addr)
}

async fn spawn_failing_server() -> String {
    let app = Router::new()
        .route(
            "/api/assessment/start",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "pipeline exploded"})),
                )
            }),
        )
        .route(
            "/api/learning-paths",
            get(|| async { (StatusCode::OK, Json(json!({}))) }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_start_assessment_unwraps_envelope() {
    let base = spawn_server(Recorded::default()).await;
    let api = HttpApi::new(&base).unwrap();

    let assessment = api.start_assessment().await.unwrap();
    assert_eq!(assessment.theta, Some(0.37));
    let skills: Vec<_> = assessment.mastery_scores.keys().cloned().collect();
    assert_eq!(skills, vec!["algebra", "probability"]);
    assert_eq!(assessment.learning_gaps.len(), 1);
    assert_eq!(assessment.learning_gaps[0].estimated_study_time, Some(45));
}

#[tokio::test]
async fn test_history_newest_first() {
    let base = spawn_server(Recorded::default()).await;
    let api = HttpApi::new(&base).unwrap();

    let history = api.assessment_history().await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, Some(2));
    assert!(history[1].theta.is_none());
}

#[tokio::test]
async fn test_paths_and_details() {
    let base = spawn_server(Recorded::default()).await;
    let api = HttpApi::new(&base).unwrap();

    let paths = api.learning_paths().await.unwrap();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].progress, 25);

    let details = api.path_details(11).await.unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].id, "python-intro");
    assert_eq!(details[0].tags.len(), 5);
}

#[tokio::test]
async fn test_unknown_path_maps_server_error() {
    let base = spawn_server(Recorded::default()).await;
    let api = HttpApi::new(&base).unwrap();

    let err = api.path_details(999).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("Learning path not found"));
}

#[tokio::test]
async fn test_progress_update_sends_body() {
    let recorded = Recorded::default();
    let base = spawn_server(recorded.clone()).await;
    let api = HttpApi::new(&base).unwrap();

    api.update_progress(11, 50).await.unwrap();
    api.update_progress(11, 51).await.unwrap();

    let progress = recorded.progress.lock().unwrap().clone();
    assert_eq!(
        progress,
        vec![(11, json!({"progress": 50})), (11, json!({"progress": 51}))]
    );
}

#[tokio::test]
async fn test_chat_round_trip_and_history() {
    let recorded = Recorded::default();
    let base = spawn_server(recorded.clone()).await;
    let api = HttpApi::new(&base).unwrap();

    let reply = api.send_chat("how am I doing?").await.unwrap();
    assert_eq!(reply, "echo: how am I doing?");
    assert_eq!(
        recorded.chats.lock().unwrap()[0],
        json!({"message": "how am I doing?"})
    );

    let history = api.chat_history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].message, "hi");
    assert_eq!(history[0].response, "hello");
}

#[tokio::test]
async fn test_server_error_and_missing_fields() {
    let base = spawn_failing_server().await;
    let api = HttpApi::new(&base).unwrap();

    match api.start_assessment().await.unwrap_err() {
        ApiError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "pipeline exploded");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // A body without the list field decodes as empty.
    let paths = api.learning_paths().await.unwrap();
    assert!(paths.is_empty());

    // Route not mounted at all.
    let err = api.chat_history().await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}
