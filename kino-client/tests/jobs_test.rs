//! Client tests against an in-process fake job service

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use kino_client::{ClientError, JobServiceClient};
use kino_core::domain::input::VideoInput;
use kino_core::domain::job::{Job, JobKind, JobStatus};
use kino_core::dto::job::CreateJob;
use kino_core::dto::vet::{SafeAlternative, VetRequest, VetResult};
use serde_json::json;

const TOKEN: &str = "test-token";

type Jobs = Arc<Mutex<HashMap<String, Job>>>;

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

async fn create_job(
    State(jobs): State<Jobs>,
    headers: HeaderMap,
    Json(req): Json<CreateJob>,
) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "missing token").into_response();
    }

    let prompt = req
        .input_data
        .get("prompt")
        .and_then(|p| p.as_str())
        .unwrap_or_default();
    if prompt.contains("kill") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "message": "prompt violates content policy",
                "violations": ["violence"],
                "safe_alternatives": [{"prompt": "a peaceful garden", "notes": "violence removed"}]
            })),
        )
            .into_response();
    }
    if req.service_id <= 0 {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "unknown service" })),
        )
            .into_response();
    }

    let mut job = Job::new(uuid::Uuid::new_v4().simple().to_string(), req.kind);
    job.service_id = Some(req.service_id);
    job.input_data = req.input_data;
    jobs.lock().unwrap().insert(job.id.clone(), job.clone());

    (StatusCode::CREATED, Json(job)).into_response()
}

async fn list_jobs(State(jobs): State<Jobs>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "missing token").into_response();
    }
    let list: Vec<Job> = jobs.lock().unwrap().values().cloned().collect();
    Json(list).into_response()
}

async fn get_job(State(jobs): State<Jobs>, Path(id): Path<String>) -> Response {
    if id == "explode" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    match jobs.lock().unwrap().get(&id) {
        Some(job) => Json(job.clone().with_status(JobStatus::Processing)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": format!("job {id} not found") })),
        )
            .into_response(),
    }
}

async fn vet(Json(req): Json<VetRequest>) -> Json<VetResult> {
    if req.prompt.contains("kill") {
        Json(VetResult::rejected(
            vec!["violence".to_string()],
            vec![SafeAlternative {
                prompt: "a cat chasing a ball of yarn".to_string(),
                notes: "non-violent".to_string(),
            }],
        ))
    } else {
        Json(VetResult::allowed())
    }
}

async fn spawn_server() -> (JobServiceClient, Jobs) {
    let jobs: Jobs = Arc::new(Mutex::new(HashMap::new()));
    let app = Router::new()
        .route("/api/jobs", post(create_job).get(list_jobs))
        .route("/api/jobs/vet", post(vet))
        .route("/api/jobs/{id}", get(get_job))
        .with_state(jobs.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = JobServiceClient::new(format!("http://{addr}/api/")).with_token(TOKEN);
    (client, jobs)
}

fn video_request(prompt: &str, service_id: i64) -> CreateJob {
    CreateJob {
        kind: JobKind::Video,
        service_id,
        input_data: VideoInput::new(prompt)
            .resolution("720p")
            .into_input_data()
            .unwrap(),
    }
}

#[tokio::test]
async fn test_create_then_get_job() -> anyhow::Result<()> {
    let (client, jobs) = spawn_server().await;

    let created = client
        .create_job(video_request("A cat playing in a garden", 1))
        .await?;
    assert_eq!(created.status, JobStatus::Pending);
    assert_eq!(created.service_id, Some(1));
    assert_eq!(created.prompt(), Some("A cat playing in a garden"));
    assert_eq!(jobs.lock().unwrap().len(), 1);

    let fetched = client.get_job(&created.id).await?;
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.status, JobStatus::Processing);

    let listed = client.list_jobs().await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    Ok(())
}

#[tokio::test]
async fn test_validation_rejection_carries_server_message() {
    let (client, jobs) = spawn_server().await;

    let err = client
        .create_job(video_request("A cat playing in a garden", 0))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::ApiError { status: 422, .. }));
    assert_eq!(err.message(), "unknown service");
    assert!(jobs.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_policy_rejection_on_create() {
    let (client, _jobs) = spawn_server().await;

    let err = client
        .create_job(video_request("kill all the robots", 1))
        .await
        .unwrap_err();

    match err {
        ClientError::PolicyRejected {
            status,
            message,
            violations,
            safe_alternatives,
        } => {
            assert_eq!(status, 400);
            assert_eq!(message, "prompt violates content policy");
            assert_eq!(violations, vec!["violence".to_string()]);
            assert_eq!(safe_alternatives[0].prompt, "a peaceful garden");
        }
        other => panic!("expected policy rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_unknown_and_failing_jobs() {
    let (client, _jobs) = spawn_server().await;

    let err = client.get_job("missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.message(), "job missing not found");

    let err = client.get_job("explode").await.unwrap_err();
    assert!(err.is_server_error());
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_get_job_keeps_reserved_characters_in_id() -> anyhow::Result<()> {
    let (client, jobs) = spawn_server().await;
    for id in ["abc", "abc#frag", "abc?x=1", "a/b"] {
        jobs.lock()
            .unwrap()
            .insert(id.to_string(), Job::new(id, JobKind::Image));
    }

    for id in ["abc#frag", "abc?x=1", "a/b"] {
        let fetched = client.get_job(id).await?;
        assert_eq!(fetched.id, id);
    }
    Ok(())
}

#[tokio::test]
async fn test_vet_prompt() -> anyhow::Result<()> {
    let (client, _jobs) = spawn_server().await;

    let ok = client.vet_prompt("A cat playing in a garden").await?;
    assert!(ok.allowed);

    let rejected = client.vet_prompt("kill all the X").await?;
    assert!(!rejected.allowed);
    assert_eq!(rejected.violations, vec!["violence".to_string()]);
    assert_eq!(rejected.safe_alternatives.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_missing_token_is_client_error() {
    let (client, _jobs) = spawn_server().await;
    let anonymous = JobServiceClient::new(client.base_url());

    let err = anonymous.list_jobs().await.unwrap_err();
    assert!(matches!(err, ClientError::ApiError { status: 401, .. }));
    assert_eq!(err.message(), "missing token");
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    let client = JobServiceClient::new("http://127.0.0.1:1");

    let err = client.get_job("abc123").await.unwrap_err();
    assert!(matches!(err, ClientError::RequestFailed(_)));
    assert_eq!(err.status(), None);
}
