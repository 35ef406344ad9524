use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::{AppError, MatchError};
use crate::matching::scorer::score_resume;
use crate::state::AppState;

pub const RESUMES_FIELD: &str = "resumes";
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";
pub const MISSING_INPUT_MESSAGE: &str = "Resume(s) and job description are required.";

/// One uploaded file, alive only for the request that carried it.
pub struct UploadedResume {
    pub filename: String,
    pub content: Bytes,
}

/// Per-file outcome. Serialized without a tag: either a score or an error.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum MatchResult {
    Scored { filename: String, match_score: f64 },
    Failed { filename: String, error: String },
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub results: Vec<MatchResult>,
}

/// POST /analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut resumes: Vec<UploadedResume> = Vec::new();
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        let filename = field.file_name().map(str::to_string);
        match (name.as_deref(), filename) {
            (Some(RESUMES_FIELD), Some(filename)) => {
                let content = field.bytes().await?;
                resumes.push(UploadedResume { filename, content });
            }
            // First value wins when the field repeats.
            (Some(JOB_DESCRIPTION_FIELD), _) if job_description.is_none() => {
                job_description = Some(field.text().await?);
            }
            _ => {
                // Drain parts we don't use so the stream keeps advancing.
                field.bytes().await?;
            }
        }
    }

    let job_description = job_description.as_deref().unwrap_or_default().trim();
    if resumes.is_empty() || job_description.is_empty() {
        return Err(AppError::Validation(MISSING_INPUT_MESSAGE.to_string()));
    }

    info!("Analyzing {} resume(s)", resumes.len());

    let job_description: Arc<str> = Arc::from(job_description);
    let mut results = Vec::with_capacity(resumes.len());
    for resume in resumes {
        results.push(analyze_one(&state, resume, Arc::clone(&job_description)).await);
    }

    Ok(Json(AnalyzeResponse { results }))
}

/// Scores one file on the blocking pool. Any failure, including a panic in the
/// PDF parser, becomes that file's error entry.
async fn analyze_one(
    state: &AppState,
    resume: UploadedResume,
    job_description: Arc<str>,
) -> MatchResult {
    let pipeline = Arc::clone(&state.pipeline);
    let UploadedResume { filename, content } = resume;

    let outcome = tokio::task::spawn_blocking(move || {
        score_resume(pipeline.as_ref(), &content, &job_description)
    })
    .await
    .unwrap_or_else(|e| Err(MatchError::Panicked(join_error_message(e))));

    match outcome {
        Ok(match_score) => MatchResult::Scored {
            filename,
            match_score,
        },
        Err(e) => {
            warn!(filename = %filename, "Resume scoring failed: {e}");
            MatchResult::Failed {
                filename,
                error: e.to_string(),
            }
        }
    }
}

fn join_error_message(err: tokio::task::JoinError) -> String {
    if err.is_panic() {
        panic_message(err.into_panic())
    } else {
        err.to_string()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected failure while processing file".to_string()
    }
}
