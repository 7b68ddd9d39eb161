use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;

use crate::analysis::loader::RawDocument;
use crate::analysis::pipeline::{AnalysisResult, ResumeAnalyzer};
use crate::analysis::skills::SkillCategory;
use crate::errors::AppError;
use crate::state::AppState;

/// Analysis result plus the categorized view of the found skills.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResumeResponse {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub skill_categories: Vec<SkillCategory>,
}

impl ParseResumeResponse {
    pub fn new(analyzer: &ResumeAnalyzer, result: AnalysisResult) -> Self {
        let skill_categories = analyzer.categorize(&result.skills);
        Self {
            result,
            skill_categories,
        }
    }
}

/// POST /api/parse-resume
///
/// Multipart parts: `file` (or `resume`) with the document, optional `targetField` text.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParseResumeResponse>, AppError> {
    let mut upload: Option<(String, Bytes)> = None;
    let mut target_field: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" | "resume" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                upload = Some((filename, bytes));
            }
            "targetField" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid targetField: {e}")))?;
                target_field = Some(text);
            }
            _ => {}
        }
    }

    let (filename, bytes) =
        upload.ok_or_else(|| AppError::Validation("No file provided".to_string()))?;
    if filename.trim().is_empty() {
        return Err(AppError::Validation("Empty file provided".to_string()));
    }

    let result = state
        .analyzer
        .analyze(
            RawDocument::from_bytes(bytes, filename),
            target_field.as_deref(),
        )
        .await?;

    Ok(Json(ParseResumeResponse::new(&state.analyzer, result)))
}
