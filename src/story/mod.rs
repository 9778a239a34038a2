pub mod client;
pub mod prompt;

pub use client::{StoryClient, StoryError};
pub use prompt::build_prompt;

/// Generated stories shorter than this (after trimming) count as failures.
pub const MIN_STORY_CHARS: usize = 50;

/// Everything the prompt builder needs for one generation.
#[derive(Debug, Clone)]
pub struct StoryRequest {
    pub genre: Option<String>,
    pub plot: String,
    pub length: Option<String>,
    pub prose_style: String,
    pub language: String,
    pub mood: Option<String>,
    pub is_continuation: bool,
}

impl StoryRequest {
    /// Empty strings are treated as absent, and continuation mode is derived
    /// from the genre and length fields.
    pub fn new(
        genre: Option<String>,
        plot: String,
        length: Option<String>,
        prose_style: String,
        language: String,
        mood: Option<String>,
    ) -> Self {
        let genre = genre.filter(|g| !g.is_empty());
        let length = length.filter(|l| !l.is_empty());
        let mood = mood.filter(|m| !m.is_empty());
        let is_continuation = is_continuation(genre.as_deref(), length.as_deref());

        Self {
            genre,
            plot,
            length,
            prose_style,
            language,
            mood,
            is_continuation,
        }
    }
}

/// A request continues existing text unless both genre and length are given.
pub fn is_continuation(genre: Option<&str>, length: Option<&str>) -> bool {
    let present = |field: Option<&str>| field.is_some_and(|value| !value.is_empty());
    !(present(genre) && present(length))
}

/// True when the model's output is long enough to keep.
pub fn is_usable_story(text: &str) -> bool {
    text.trim().chars().count() >= MIN_STORY_CHARS
}
