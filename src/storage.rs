use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::io::AsyncWriteExt;

/// URL prefix the stories directory is served under.
pub const STORIES_URL_PREFIX: &str = "/static/stories";

/// Flat directory of generated story text and audio.
pub struct ArtifactStore {
    dir: PathBuf,
    sequence: AtomicU64,
}

/// The files belonging to one generated story.
#[derive(Debug, Clone)]
pub struct StoryArtifact {
    pub stem: String,
    pub text_path: PathBuf,
    pub audio_path: PathBuf,
}

impl StoryArtifact {
    pub fn text_url(&self) -> String {
        format!("{}/{}.txt", STORIES_URL_PREFIX, self.stem)
    }

    pub fn audio_url(&self) -> String {
        format!("{}/{}.mp3", STORIES_URL_PREFIX, self.stem)
    }
}

impl ArtifactStore {
    /// Open the store, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            sequence: AtomicU64::new(0),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn next_stem(&self) -> String {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("story_{}_{}", timestamp, seq)
    }

    /// Write `story` to a fresh `story_<unix>_<seq>.txt` and return its paths.
    /// Existing files are never overwritten, and a failed write leaves no file behind.
    pub async fn save_text(&self, story: &str) -> std::io::Result<StoryArtifact> {
        loop {
            let stem = self.next_stem();
            let text_path = self.dir.join(format!("{}.txt", stem));

            let mut file = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&text_path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            };

            let written = match file.write_all(story.as_bytes()).await {
                Ok(()) => file.flush().await,
                Err(e) => Err(e),
            };
            drop(file);

            if let Err(e) = written {
                if let Err(cleanup) = tokio::fs::remove_file(&text_path).await {
                    tracing::warn!(
                        "Could not remove partial story {}: {}",
                        text_path.display(),
                        cleanup
                    );
                }
                return Err(e);
            }

            return Ok(StoryArtifact {
                audio_path: self.dir.join(format!("{}.mp3", stem)),
                stem,
                text_path,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("static").join("stories");

        let store = ArtifactStore::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.dir(), nested.as_path());
    }

    #[tokio::test]
    async fn saves_text_with_matching_audio_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::open(dir.path()).unwrap();

        let artifact = store.save_text("It was a dark and stormy night.").await.unwrap();

        assert!(artifact.stem.starts_with("story_"));
        assert_eq!(
            tokio::fs::read_to_string(&artifact.text_path).await.unwrap(),
            "It was a dark and stormy night."
        );
        assert_eq!(artifact.audio_path.extension().unwrap(), "mp3");
        assert_eq!(artifact.audio_path.file_stem(), artifact.text_path.file_stem());
        assert_eq!(artifact.text_url(), format!("/static/stories/{}.txt", artifact.stem));
        assert_eq!(artifact.audio_url(), format!("/static/stories/{}.mp3", artifact.stem));
    }

    #[tokio::test]
    async fn rapid_saves_never_collide() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::open(dir.path()).unwrap();

        let mut stems = std::collections::HashSet::new();
        for i in 0..20 {
            stems.insert(store.save_text(&format!("story {i}")).await.unwrap().stem);
        }

        assert_eq!(stems.len(), 20);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 20);
    }

    #[tokio::test]
    async fn concurrent_saves_never_collide() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(ArtifactStore::open(dir.path()).unwrap());

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let store = std::sync::Arc::clone(&store);
                tokio::spawn(async move { store.save_text(&format!("story {i}")).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 10);
    }

    #[tokio::test]
    async fn skips_names_already_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let first = ArtifactStore::open(dir.path()).unwrap().save_text("first").await.unwrap();

        // A restarted process starts its counter from zero again.
        let second = ArtifactStore::open(dir.path()).unwrap().save_text("second").await.unwrap();

        assert_ne!(first.stem, second.stem);
        assert_eq!(tokio::fs::read_to_string(&first.text_path).await.unwrap(), "first");
    }

    #[tokio::test]
    async fn missing_directory_is_an_error_and_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("stories");
        let store = ArtifactStore::open(&gone).unwrap();
        std::fs::remove_dir(&gone).unwrap();

        let err = store.save_text("lost").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(!gone.exists());
    }
}
