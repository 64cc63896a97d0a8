//! Transcript lookup with English fallbacks, and text cleanup.

use std::sync::LazyLock;

use regex::Regex;
use tracing::instrument;
use yt_transcript_rs::{
    api::YouTubeTranscriptApi, transcript::Transcript, transcript_list::TranscriptList,
};

use crate::error::{HarvestError, Result};

pub const TARGET_LANGUAGE: &str = "en";

static TIMECODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\d+:\d+:\d+\]").expect("timecode pattern is valid"));
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?\w+>").expect("tag pattern is valid"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Strips `[H:MM:SS]` timecodes and `<tag>`/`</tag>` markup, then collapses
/// whitespace runs to a single space.
pub fn clean_transcript(text: &str) -> String {
    let text = TIMECODE.replace_all(text, "");
    let text = TAG.replace_all(&text, "");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Which fallback tier produced a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptChoice<T> {
    /// Manually authored in the target language.
    Manual(T),
    /// Auto-generated in the target language.
    Generated(T),
    /// Another language, to be translated into the target language.
    Translated(T),
}

impl<T> TranscriptChoice<T> {
    pub fn kind(&self) -> &'static str {
        match self {
            TranscriptChoice::Manual(_) => "manual",
            TranscriptChoice::Generated(_) => "generated",
            TranscriptChoice::Translated(_) => "translated",
        }
    }

    pub fn into_track(self) -> T {
        match self {
            TranscriptChoice::Manual(t)
            | TranscriptChoice::Generated(t)
            | TranscriptChoice::Translated(t) => t,
        }
    }
}

/// The transcripts a video offers.
pub trait TranscriptCatalog {
    type Track;

    fn manual(&self, language: &str) -> Option<Self::Track>;
    fn generated(&self, language: &str) -> Option<Self::Track>;
    fn first_translatable(&self) -> Option<Self::Track>;
}

/// Manual English, then generated English, then the first translatable track.
pub fn choose_transcript<C: TranscriptCatalog>(catalog: &C) -> Option<TranscriptChoice<C::Track>> {
    catalog
        .manual(TARGET_LANGUAGE)
        .map(TranscriptChoice::Manual)
        .or_else(|| catalog.generated(TARGET_LANGUAGE).map(TranscriptChoice::Generated))
        .or_else(|| catalog.first_translatable().map(TranscriptChoice::Translated))
}

impl TranscriptCatalog for TranscriptList {
    type Track = Transcript;

    fn manual(&self, language: &str) -> Option<Transcript> {
        self.find_manually_created_transcript(&[language]).ok()
    }

    fn generated(&self, language: &str) -> Option<Transcript> {
        self.find_generated_transcript(&[language]).ok()
    }

    /// Manual tracks before generated ones, each group by language code.
    /// Tracks are stored in hash maps, so this order has to be imposed here.
    fn first_translatable(&self) -> Option<Transcript> {
        [&self.manually_created_transcripts, &self.generated_transcripts]
            .into_iter()
            .find_map(|tracks| {
                tracks
                    .values()
                    .filter(|t| t.is_translatable())
                    .min_by(|a, b| a.language_code.cmp(&b.language_code))
            })
            .cloned()
    }
}

/// Anything that can produce the raw English transcript text of a video.
pub trait TranscriptSource {
    async fn english_transcript(&self, video_id: &str) -> Result<String>;
}

/// [`TranscriptSource`] backed by YouTube's caption tracks.
pub struct YtTranscriptSource {
    api: YouTubeTranscriptApi,
    http: reqwest::Client,
}

impl YtTranscriptSource {
    pub fn new() -> Result<Self> {
        Self::with_http_client(reqwest::Client::new())
    }

    pub fn with_http_client(http: reqwest::Client) -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            HarvestError::TranscriptClient {
                reason: format!("{e:?}"),
            }
        })?;
        Ok(Self { api, http })
    }
}

impl TranscriptSource for YtTranscriptSource {
    async fn english_transcript(&self, video_id: &str) -> Result<String> {
        let unavailable = |reason: String| HarvestError::Transcript {
            video_id: video_id.to_string(),
            reason,
        };

        let catalog = self
            .api
            .list_transcripts(video_id)
            .await
            .map_err(|e| unavailable(format!("{e:?}")))?;

        let choice = choose_transcript(&catalog)
            .ok_or_else(|| unavailable("no translatable transcript available".to_string()))?;
        tracing::debug!(tier = choice.kind(), "transcript selected");

        let track = match choice {
            TranscriptChoice::Translated(track) => track
                .translate(TARGET_LANGUAGE)
                .map_err(|e| unavailable(format!("{e:?}")))?,
            other => other.into_track(),
        };

        let fetched = track
            .fetch(&self.http, false)
            .await
            .map_err(|e| unavailable(format!("{e:?}")))?;

        Ok(fetched
            .into_iter()
            .map(|snippet| snippet.text)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Fetches and cleans a transcript. Every failure, and an empty result,
/// comes back as `None`.
#[instrument(skip(source))]
pub async fn fetch_transcript<T: TranscriptSource>(source: &T, video_id: &str) -> Option<String> {
    match source.english_transcript(video_id).await {
        Ok(raw) => {
            let cleaned = clean_transcript(&raw);
            if cleaned.is_empty() {
                tracing::debug!("transcript is empty after cleanup");
                None
            } else {
                Some(cleaned)
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "transcript unavailable");
            None
        }
    }
}
