use jiff::{SignedDuration, Timestamp};
use tracing::instrument;

use crate::{
    error::{HarvestError, Result},
    paging::{Page, collect_paged},
    types::{SearchListResponse, VideoSummary},
};

/// `search.list` accepts at most 50 results per request.
pub const SEARCH_PAGE_CAP: usize = 50;

const DAYS_PER_YEAR: i64 = 365;

/// Anything that can answer one page of a video search.
pub trait VideoSearch {
    async fn search_page(
        &self,
        query: &str,
        published_after: &str,
        max_results: u32,
        page_token: Option<String>,
    ) -> Result<SearchListResponse>;
}

/// The `publishedAfter` filter for a lookback of `years_back` years of 365 days,
/// as an RFC 3339 UTC timestamp with second precision.
pub fn published_after(now: Timestamp, years_back: u32) -> Result<String> {
    if years_back == 0 {
        return Err(HarvestError::InvalidLookback { years: years_back });
    }

    let days = i64::from(years_back) * DAYS_PER_YEAR;
    let cutoff = now
        .checked_sub(SignedDuration::from_hours(days * 24))
        .map_err(|_| HarvestError::InvalidLookback { years: years_back })?;

    Ok(cutoff.strftime("%Y-%m-%dT%H:%M:%SZ").to_string())
}

/// Finds up to `max_videos` videos published after `published_after`.
#[instrument(skip(source))]
pub async fn search_videos<S: VideoSearch>(
    source: &S,
    query: &str,
    max_videos: usize,
    published_after: &str,
) -> Result<Vec<VideoSummary>> {
    let results = collect_paged(max_videos, SEARCH_PAGE_CAP, |max_results, page_token| async move {
        let response = source
            .search_page(query, published_after, max_results, page_token)
            .await?;
        Ok(Page {
            items: response.items,
            next_page_token: response.next_page_token,
        })
    })
    .await?;

    let videos: Vec<_> = results
        .into_iter()
        .filter_map(VideoSummary::from_search_result)
        .collect();

    tracing::info!(found = videos.len(), "search completed");
    Ok(videos)
}
