pub mod handlers;
pub mod routes;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Body of `POST /generate`. Leaving out genre or length asks for a
/// continuation of `plot`.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    pub genre: Option<String>,
    pub plot: Option<String>,
    pub length: Option<String>,
    pub prose_style: Option<String>,
    pub language: Option<String>,
    pub mood: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub story: String,
    pub text_file: String,
    pub prose_style: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_language_code: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub groq_api_configured: bool,
    pub model: String,
    pub supported_languages: usize,
    pub prose_styles: usize,
}

/// Style name -> UI description, in catalog order.
pub type ProseStylesResponse = IndexMap<&'static str, &'static str>;
