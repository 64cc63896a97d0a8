//! ytharvest core library
//!
//! Searches YouTube, collects recent comments and English transcripts for each
//! hit, and assembles them into table rows.

pub mod comments;
pub mod config;
pub mod error;
pub mod export;
pub mod paging;
pub mod pipeline;
pub mod search;
pub mod transcript;
pub mod types;
pub mod youtube;

#[cfg(test)]
mod testing;

pub use comments::{COMMENTS_DISABLED, CommentSource, collect_comments, fetch_comments};
pub use config::{ApiConfig, HarvestOptions};
pub use error::{HarvestError, Result};
pub use export::{default_export_dir, export_path, sanitize_filename, save_rows};
pub use pipeline::{HarvestEvent, HarvestOutcome, harvest};
pub use search::{VideoSearch, published_after, search_videos};
pub use transcript::{
    TranscriptSource, YtTranscriptSource, choose_transcript, clean_transcript, fetch_transcript,
};
pub use types::{TRANSCRIPT_UNAVAILABLE, VideoRow, VideoSummary};
pub use youtube::YouTubeClient;
