use jiff::Timestamp;
use tracing::instrument;

use crate::{
    comments::{CommentSource, fetch_comments},
    config::HarvestOptions,
    error::Result,
    search::{VideoSearch, published_after, search_videos},
    transcript::{TranscriptSource, fetch_transcript},
    types::{VideoRow, VideoSummary},
};

/// Progress notifications emitted while a harvest runs.
#[derive(Debug)]
pub enum HarvestEvent<'a> {
    Searching { query: &'a str, published_after: &'a str },
    SearchCompleted { count: usize },
    FetchingComments { serial: usize, total: usize, video: &'a VideoSummary },
    FetchingTranscript { serial: usize, total: usize, video: &'a VideoSummary },
    VideoFinished { serial: usize, total: usize, comment_count: usize, row: &'a VideoRow },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestOutcome {
    /// The search matched nothing; callers show a warning.
    NoVideos,
    Rows(Vec<VideoRow>),
}

/// Search, then comments and transcript for each hit, one video at a time.
///
/// Only the search step can fail the run. Comment and transcript failures are
/// folded into the row as placeholder text.
#[instrument(skip_all, fields(query = %options.query, years_back = options.years_back))]
pub async fn harvest<Y, T, F>(
    youtube: &Y,
    transcripts: &T,
    options: &HarvestOptions,
    now: Timestamp,
    mut on_event: F,
) -> Result<HarvestOutcome>
where
    Y: VideoSearch + CommentSource,
    T: TranscriptSource,
    F: FnMut(HarvestEvent<'_>),
{
    let published_after = published_after(now, options.years_back)?;
    on_event(HarvestEvent::Searching {
        query: &options.query,
        published_after: &published_after,
    });

    let videos = search_videos(
        youtube,
        &options.query,
        options.max_videos as usize,
        &published_after,
    )
    .await?;
    on_event(HarvestEvent::SearchCompleted {
        count: videos.len(),
    });

    if videos.is_empty() {
        tracing::info!("no videos found");
        return Ok(HarvestOutcome::NoVideos);
    }

    let total = videos.len();
    let mut rows = Vec::with_capacity(total);

    for (index, video) in videos.into_iter().enumerate() {
        let serial = index + 1;

        on_event(HarvestEvent::FetchingComments {
            serial,
            total,
            video: &video,
        });
        let comments = fetch_comments(youtube, &video.video_id, options.max_comments as usize).await;
        let comment_count = comments.len();

        on_event(HarvestEvent::FetchingTranscript {
            serial,
            total,
            video: &video,
        });
        let transcript = fetch_transcript(transcripts, &video.video_id).await;

        let row = VideoRow::new(serial, video, comments, transcript);
        on_event(HarvestEvent::VideoFinished {
            serial,
            total,
            comment_count,
            row: &row,
        });
        rows.push(row);
    }

    Ok(HarvestOutcome::Rows(rows))
}
