use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use secrecy::SecretString;

pub const DEFAULT_COMPLETION_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_TTS_URL: &str = "https://translate.google.com/translate_tts";

/// Settings for the chat-completion upstream.
#[derive(Debug)]
pub struct CompletionConfig {
    pub api_key: Option<SecretString>,
    pub api_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_COMPLETION_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Settings for the speech endpoint.
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    pub url: String,
    pub timeout: Duration,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_TTS_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Process configuration, resolved once at startup.
#[derive(Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub completion: CompletionConfig,
    pub speech: SpeechConfig,
    pub stories_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = var("HOST", "127.0.0.1");
        let port: u16 = var("PORT", "5000")
            .parse()
            .context("PORT must be a number")?;
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("Invalid address {}:{}", host, port))?;

        let api_key = lookup("GROQ_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .map(SecretString::from);

        Ok(Self {
            addr,
            completion: CompletionConfig {
                api_key,
                api_url: var("GROQ_API_URL", DEFAULT_COMPLETION_URL),
                model: var("GROQ_MODEL", DEFAULT_MODEL),
                ..CompletionConfig::default()
            },
            speech: SpeechConfig {
                url: var("TTS_URL", DEFAULT_TTS_URL),
                ..SpeechConfig::default()
            },
            stories_dir: var("STORIES_DIR", "static/stories").into(),
            static_dir: var("STATIC_DIR", "static").into(),
        })
    }
}
