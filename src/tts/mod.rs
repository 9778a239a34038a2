pub mod google;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::{self, DEFAULT_LANGUAGE, DEFAULT_LANGUAGE_CODE};

pub use google::GoogleTranslateTts;

#[derive(thiserror::Error, Debug)]
pub enum SynthesisError {
    #[error("No text to speak")]
    EmptyText,

    #[error("Speech service error: {status} - {body}")]
    Upstream { status: u16, body: String },

    #[error("Speech service returned no audio")]
    NoAudio,

    #[error("Error calling speech service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to write audio file: {0}")]
    Io(#[from] std::io::Error),
}

/// A text-to-speech backend producing MP3 bytes.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    async fn synthesize(&self, text: &str, language_code: &str) -> Result<Vec<u8>, SynthesisError>;

    fn name(&self) -> &str;
}

/// What a successful synthesis actually did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisOutcome {
    /// Code the audio was rendered with.
    pub language_code: &'static str,
    /// True when the requested language failed and English was used instead.
    pub fell_back: bool,
}

pub struct SpeechSynthesizer {
    engine: Arc<dyn SpeechEngine>,
}

impl SpeechSynthesizer {
    pub fn new(engine: Arc<dyn SpeechEngine>) -> Self {
        Self { engine }
    }

    /// Render `text` in `language` and write the audio to `output_path`.
    ///
    /// If the engine rejects a non-English request, it is retried once in
    /// English. The file is written only once the engine has returned the
    /// full audio.
    pub async fn synthesize(
        &self,
        text: &str,
        output_path: &Path,
        language: &str,
    ) -> Result<SynthesisOutcome, SynthesisError> {
        let code = catalog::resolve_language_code(language);

        tracing::info!(
            "Converting text to speech with {} (language: {}, code: {}, length: {} chars)",
            self.engine.name(),
            language,
            code,
            text.chars().count()
        );

        let (audio, language_code, fell_back) = match self.engine.synthesize(text, code).await {
            Ok(audio) => (audio, code, false),
            Err(e) if language != DEFAULT_LANGUAGE => {
                tracing::warn!("Text-to-speech failed for {}: {}. Retrying in English", language, e);
                let audio = self
                    .engine
                    .synthesize(text, DEFAULT_LANGUAGE_CODE)
                    .await
                    .inspect_err(|fallback| {
                        tracing::error!("English fallback synthesis also failed: {}", fallback);
                    })?;
                (audio, DEFAULT_LANGUAGE_CODE, true)
            }
            Err(e) => return Err(e),
        };

        tokio::fs::write(output_path, &audio).await?;

        tracing::info!(
            "Audio saved: {} ({} bytes, code: {})",
            output_path.display(),
            audio.len(),
            language_code
        );

        Ok(SynthesisOutcome {
            language_code,
            fell_back,
        })
    }
}
