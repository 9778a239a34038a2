use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use super::{GenerateRequest, GenerateResponse, HealthResponse, ProseStylesResponse};
use crate::api::routes::AppState;
use crate::catalog::{self, DEFAULT_LANGUAGE, DEFAULT_PROSE_STYLE};
use crate::error::AppError;
use crate::story::{self, StoryRequest};

pub async fn list_languages() -> Json<Vec<&'static str>> {
    Json(catalog::supported_languages())
}

pub async fn list_prose_styles() -> Json<ProseStylesResponse> {
    Json(
        catalog::prose_styles()
            .iter()
            .map(|style| (style.name, style.summary))
            .collect(),
    )
}

pub async fn generate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(request) = payload?;

    // Validate input
    let plot = request
        .plot
        .filter(|plot| !plot.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Plot cannot be empty".into()))?;

    let request = StoryRequest::new(
        request.genre,
        plot,
        request.length,
        request.prose_style.unwrap_or_else(|| DEFAULT_PROSE_STYLE.to_string()),
        request.language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        request.mood,
    );

    tracing::info!(
        "Generating story (continuation: {}, style: {}, language: {})",
        request.is_continuation,
        request.prose_style,
        request.language
    );

    let prompt = story::build_prompt(&request);
    let story = state.story.generate(&prompt).await?;

    if !story::is_usable_story(&story) {
        return Err(AppError::EmptyGeneration);
    }

    let artifact = state.store.save_text(&story).await?;
    tracing::info!("Story saved: {}", artifact.text_path.display());

    // Audio is best-effort
    let audio = match state
        .speech
        .synthesize(&story, &artifact.audio_path, &request.language)
        .await
    {
        Ok(outcome) => {
            if outcome.fell_back {
                tracing::warn!("Audio for {} was rendered in English", request.language);
            }
            Some(outcome)
        }
        Err(e) => {
            tracing::warn!("Audio generation failed: {}", e);
            None
        }
    };

    Ok(Json(GenerateResponse {
        story,
        text_file: artifact.text_url(),
        prose_style: request.prose_style,
        language: request.language,
        audio_file: audio.as_ref().map(|_| artifact.audio_url()),
        audio_language_code: audio.map(|outcome| outcome.language_code),
    }))
}

pub async fn file_not_found() -> AppError {
    AppError::NotFound
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        groq_api_configured: state.story.is_configured(),
        model: state.story.model().to_string(),
        supported_languages: catalog::supported_languages().len(),
        prose_styles: catalog::prose_styles().len(),
    })
}
