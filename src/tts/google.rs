use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, REFERER, USER_AGENT};
use reqwest::Client;

use super::{SpeechEngine, SynthesisError};
use crate::config::SpeechConfig;

/// The endpoint refuses requests longer than this.
const MAX_CHUNK_CHARS: usize = 100;

lazy_static! {
    static ref CLAUSE_REGEX: Regex =
        Regex::new(r"[^.!?;:,\n。！？；：，、]+[.!?;:,\n。！？；：，、]*").unwrap();
}

/// Speech from the Google Translate `translate_tts` endpoint, normal speed.
pub struct GoogleTranslateTts {
    client: Client,
    url: String,
}

impl GoogleTranslateTts {
    pub fn new(config: &SpeechConfig) -> Result<Self, SynthesisError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
            ),
        );
        headers.insert(REFERER, HeaderValue::from_static("https://translate.google.com/"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        language_code: &str,
        idx: usize,
        total: usize,
    ) -> Result<Vec<u8>, SynthesisError> {
        let idx = idx.to_string();
        let total = total.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language_code),
                ("q", chunk),
                ("ttsspeed", "1"),
                ("idx", idx.as_str()),
                ("total", total.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl SpeechEngine for GoogleTranslateTts {
    async fn synthesize(&self, text: &str, language_code: &str) -> Result<Vec<u8>, SynthesisError> {
        let chunks = chunk_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        tracing::debug!(
            "Requesting {} speech chunks (code: {})",
            chunks.len(),
            language_code
        );

        // MP3 frames concatenate cleanly, so the chunks are appended as-is.
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let bytes = self.fetch_chunk(chunk, language_code, idx, chunks.len()).await?;
            audio.extend_from_slice(&bytes);
        }

        if audio.is_empty() {
            return Err(SynthesisError::NoAudio);
        }

        Ok(audio)
    }

    fn name(&self) -> &str {
        "google-translate-tts"
    }
}

/// Split text into pieces of at most `max_chars` characters, preferring
/// clause boundaries, then word boundaries, then raw character counts.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for clause in CLAUSE_REGEX.find_iter(text) {
        for word in clause.as_str().split_whitespace() {
            for part in split_chars(word, max_chars) {
                push_joined(&mut chunks, &mut current, part, max_chars);
            }
        }
        // Close the chunk at a clause boundary once it is reasonably full.
        if current.chars().count() * 2 >= max_chars {
            chunks.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

fn push_joined(chunks: &mut Vec<String>, current: &mut String, part: &str, max_chars: usize) {
    if current.is_empty() {
        current.push_str(part);
    } else if current.chars().count() + 1 + part.chars().count() <= max_chars {
        current.push(' ');
        current.push_str(part);
    } else {
        chunks.push(std::mem::take(current));
        current.push_str(part);
    }
}

fn split_chars(word: &str, max_chars: usize) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = word;

    while let Some((idx, _)) = rest.char_indices().nth(max_chars) {
        parts.push(&rest[..idx]);
        rest = &rest[idx..];
    }
    if !rest.is_empty() {
        parts.push(rest);
    }

    parts
}
