//! Shared fixtures for unit and router tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::analysis::service::{AnalysisFailed, ResumeAnalyzer};
use crate::models::analysis::{AnalysisRequest, AnalysisResult};

const BOUNDARY: &str = "resume-analysis-test-boundary";

/// One part of a multipart/form-data body.
pub struct Part<'a> {
    name: &'a str,
    file_name: Option<&'a str>,
    content: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            file_name: None,
            content: value.as_bytes(),
        }
    }

    pub fn file(name: &'a str, file_name: &'a str, content: &'a [u8]) -> Self {
        Self {
            name,
            file_name: Some(file_name),
            content,
        }
    }
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part.file_name {
            Some(file_name) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        part.name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
            }
            None => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                        part.name
                    )
                    .as_bytes(),
                );
            }
        }
        body.extend_from_slice(part.content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

/// Analyzer double that counts calls and returns a fixed outcome.
pub struct StubAnalyzer {
    outcome: Result<AnalysisResult, AnalysisFailed>,
    calls: AtomicUsize,
    last_request: std::sync::Mutex<Option<AnalysisRequest>>,
}

impl StubAnalyzer {
    pub fn succeeding(result: AnalysisResult) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(result),
            calls: AtomicUsize::new(0),
            last_request: std::sync::Mutex::new(None),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(AnalysisFailed),
            calls: AtomicUsize::new(0),
            last_request: std::sync::Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<AnalysisRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResumeAnalyzer for StubAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisFailed> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.outcome.clone()
    }
}

pub fn sample_result(match_score: f64) -> AnalysisResult {
    AnalysisResult {
        match_score: Some(match_score),
        formatting: Some(8.0),
        language_assessment: Some(7.0),
        readability: Some(9.0),
        grammar_check: Some(10.0),
        project_structure: Some(5.0),
        experience_structure: Some(3.0),
        missing_skills: vec!["Kubernetes".to_string()],
        keyword_alignment: vec!["Rust".to_string(), "Tokio".to_string()],
        recommendations: vec!["Quantify the impact of the caching project".to_string()],
    }
}

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

/// A local completions endpoint that answers every POST with a fixed status and body.
pub struct CompletionsStub {
    pub url: String,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl CompletionsStub {
    pub async fn captured(&self) -> Vec<CapturedRequest> {
        self.captured.lock().await.clone()
    }
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    response: Value,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

async fn stub_completions(
    State(stub): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    stub.captured
        .lock()
        .await
        .push(CapturedRequest { authorization, body });
    (stub.status, Json(stub.response))
}

pub async fn spawn_completions_stub(status: StatusCode, response: Value) -> CompletionsStub {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/api/v1/chat/completions", post(stub_completions))
        .with_state(StubState {
            status,
            response,
            captured: captured.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    CompletionsStub {
        url: format!("http://{addr}/api/v1/chat/completions"),
        captured,
    }
}

/// A URL on a port nothing listens on.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api/v1/chat/completions")
}
