//! Axum route handlers for the Screening API.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::ingest::{extract_documents, UploadedFile};
use crate::screening::report::{render_csv, REPORT_FILE_NAME};
use crate::screening::scoring::{score, Document, ScoreRow};
use crate::screening::skills::SkillVocabulary;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScreenRequest {
    /// Falls back to the configured sample JD when absent or blank.
    #[serde(default)]
    pub jd_text: Option<String>,
    #[serde(default)]
    pub candidates: Vec<Document>,
    /// Per-request vocabulary override.
    #[serde(default)]
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ScreenResponse {
    pub results: Vec<ScoreRow>,
    pub top_match: Option<ScoreRow>,
    pub reference_skills: Vec<String>,
    /// Guidance for the caller when there is nothing to rank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub skills: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/skills
pub async fn handle_list_skills(State(state): State<AppState>) -> Json<SkillsResponse> {
    Json(SkillsResponse {
        skills: state.vocabulary.iter().map(str::to_string).collect(),
    })
}

/// POST /api/v1/screen
///
/// Ranks the supplied resume texts against the job description.
pub async fn handle_screen(
    State(state): State<AppState>,
    Json(request): Json<ScreenRequest>,
) -> Result<Json<ScreenResponse>, AppError> {
    let response = run_screen(&state, request)?;
    Ok(Json(response))
}

/// POST /api/v1/screen/report.csv
///
/// Same input as `/screen`; returns the ranking table as a CSV download.
pub async fn handle_screen_csv(
    State(state): State<AppState>,
    Json(request): Json<ScreenRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = run_screen(&state, request)?;
    let body = render_csv(&response.results)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILE_NAME}\""),
            ),
        ],
        body,
    ))
}

/// POST /api/v1/screen/upload
///
/// Multipart form: an optional `jd_text` field and one or more `resumes`
/// PDF files. Resume names are the uploaded file names.
pub async fn handle_screen_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScreenResponse>, AppError> {
    let mut jd_text = None;
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("jd_text") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable jd_text field: {e}")))?;
                jd_text = Some(text);
            }
            Some("resumes") => {
                let name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| {
                        AppError::Validation("Resume upload is missing a file name".to_string())
                    })?;
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Unreadable upload '{name}': {e}"))
                })?;
                uploads.push(UploadedFile {
                    name,
                    content_type,
                    data,
                });
            }
            other => tracing::debug!(field = ?other, "ignoring unknown multipart field"),
        }
    }

    if uploads.is_empty() {
        return Err(AppError::Validation(
            "Please upload at least one resume PDF".to_string(),
        ));
    }

    let candidates = extract_documents(uploads).await?;
    let response = run_screen(
        &state,
        ScreenRequest {
            jd_text,
            candidates,
            skills: None,
        },
    )?;
    Ok(Json(response))
}

// ────────────────────────────────────────────────────────────────────────────
// Shared pipeline
// ────────────────────────────────────────────────────────────────────────────

fn run_screen(state: &AppState, request: ScreenRequest) -> Result<ScreenResponse, AppError> {
    validate_candidates(&request.candidates)?;

    let vocabulary = match request.skills {
        Some(skills) => {
            let vocabulary = SkillVocabulary::new(skills);
            if vocabulary.is_empty() {
                return Err(AppError::Validation(
                    "skills override contains no entries".to_string(),
                ));
            }
            Arc::new(vocabulary)
        }
        None => Arc::clone(&state.vocabulary),
    };

    let reference = request
        .jd_text
        .filter(|t| !t.trim().is_empty())
        .or_else(|| state.sample_jd.as_deref().map(str::to_string))
        .unwrap_or_default();

    let ranked = score(&reference, &request.candidates, &vocabulary);
    let results = ranked.to_rows();

    let message = if reference.trim().is_empty() {
        Some("Provide a job description (jd_text) to score resumes against.".to_string())
    } else if ranked.is_empty() {
        Some("Provide at least one resume to score.".to_string())
    } else {
        None
    };

    info!(
        candidates = ranked.len(),
        top_match = ranked.top().map(|r| r.name.as_str()).unwrap_or("-"),
        "screened resumes"
    );

    Ok(ScreenResponse {
        top_match: results.first().cloned(),
        reference_skills: ranked.reference_skills().iter().cloned().collect(),
        results,
        message,
        generated_at: Utc::now(),
    })
}

fn validate_candidates(candidates: &[Document]) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for candidate in candidates {
        if candidate.name.trim().is_empty() {
            return Err(AppError::Validation(
                "candidate name cannot be empty".to_string(),
            ));
        }
        if !seen.insert(candidate.name.as_str()) {
            return Err(AppError::Validation(format!(
                "duplicate candidate name '{}'",
                candidate.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_state(sample_jd: Option<&str>) -> AppState {
        AppState {
            config: Config {
                port: 0,
                rust_log: "info".to_string(),
                skills_file: None,
                sample_jd_file: None,
                max_upload_bytes: 1024,
            },
            vocabulary: Arc::new(SkillVocabulary::default()),
            sample_jd: sample_jd.map(Arc::from),
        }
    }

    fn request(jd_text: Option<&str>, candidates: Vec<Document>) -> ScreenRequest {
        ScreenRequest {
            jd_text: jd_text.map(str::to_string),
            candidates,
            skills: None,
        }
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let candidates = vec![Document::new("a.pdf", "x"), Document::new("a.pdf", "y")];
        let err = run_screen(&test_state(None), request(Some("python"), candidates)).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("a.pdf")));
    }

    #[test]
    fn test_blank_name_rejected() {
        let candidates = vec![Document::new("  ", "x")];
        assert!(run_screen(&test_state(None), request(Some("python"), candidates)).is_err());
    }

    #[test]
    fn test_missing_jd_gives_guidance_not_error() {
        let candidates = vec![Document::new("a.pdf", "python")];
        let response = run_screen(&test_state(None), request(None, candidates)).unwrap();
        assert!(response.results.is_empty());
        assert!(response.top_match.is_none());
        assert!(response.message.unwrap().contains("job description"));
    }

    #[test]
    fn test_empty_candidates_gives_guidance() {
        let response = run_screen(&test_state(None), request(Some("python"), vec![])).unwrap();
        assert!(response.results.is_empty());
        assert!(response.message.unwrap().contains("resume"));
    }

    #[test]
    fn test_sample_jd_used_when_jd_missing_or_blank() {
        let state = test_state(Some("Python engineer with Docker"));
        for jd in [None, Some("   ")] {
            let candidates = vec![Document::new("a.pdf", "python docker")];
            let response = run_screen(&state, request(jd, candidates)).unwrap();
            assert_eq!(response.results.len(), 1);
            assert_eq!(response.reference_skills, vec!["docker", "python"]);
            assert!(response.message.is_none());
        }
    }

    #[test]
    fn test_skills_override() {
        let mut req = request(
            Some("Rust engineer, Tokio"),
            vec![Document::new("a.pdf", "tokio services in rust")],
        );
        req.skills = Some(vec!["Rust".to_string(), "tokio".to_string()]);
        let response = run_screen(&test_state(None), req).unwrap();
        assert_eq!(response.reference_skills, vec!["rust", "tokio"]);
        assert_eq!(response.results[0].skill_coverage, 100.0);
    }

    #[test]
    fn test_empty_skills_override_rejected() {
        let mut req = request(Some("python"), vec![Document::new("a.pdf", "python")]);
        req.skills = Some(vec!["   ".to_string()]);
        assert!(matches!(
            run_screen(&test_state(None), req),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_top_match_is_first_row() {
        let candidates = vec![
            Document::new("java.pdf", "Java developer"),
            Document::new("python.pdf", "Python developer with Docker"),
        ];
        let response = run_screen(
            &test_state(None),
            request(Some("Python developer, Docker"), candidates),
        )
        .unwrap();
        let top = response.top_match.unwrap();
        assert_eq!(top.name, "python.pdf");
        assert_eq!(top, response.results[0]);
    }
}
