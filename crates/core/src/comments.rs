use tracing::instrument;

use crate::{
    error::Result,
    paging::{Page, collect_paged},
    types::{CommentThread, CommentThreadListResponse},
};

/// `commentThreads.list` accepts at most 100 results per request.
pub const COMMENT_PAGE_CAP: usize = 100;
pub const COMMENTS_DISABLED: &str = "Comments are disabled for this video.";

/// Anything that can answer one page of comment threads for a video,
/// newest first.
pub trait CommentSource {
    async fn comment_threads(
        &self,
        video_id: &str,
        max_results: u32,
        page_token: Option<String>,
    ) -> Result<CommentThreadListResponse>;
}

/// Collects up to `max_comments` top-level comments, numbered `"<n>. <text>"`
/// in retrieval order.
pub async fn collect_comments<S: CommentSource>(
    source: &S,
    video_id: &str,
    max_comments: usize,
) -> Result<Vec<String>> {
    let texts = collect_paged(max_comments, COMMENT_PAGE_CAP, |max_results, page_token| async move {
        let response = source
            .comment_threads(video_id, max_results, page_token)
            .await?;
        Ok(Page {
            items: response
                .items
                .into_iter()
                .map(CommentThread::into_text)
                .collect(),
            next_page_token: response.next_page_token,
        })
    })
    .await?;

    Ok(texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| format!("{}. {}", i + 1, text))
        .collect())
}

/// Like [`collect_comments`], but never fails: a 403 becomes
/// [`COMMENTS_DISABLED`] and any other error becomes a single
/// `"Error fetching comments: ..."` entry.
#[instrument(skip(source))]
pub async fn fetch_comments<S: CommentSource>(
    source: &S,
    video_id: &str,
    max_comments: usize,
) -> Vec<String> {
    match collect_comments(source, video_id, max_comments).await {
        Ok(comments) => {
            tracing::debug!(count = comments.len(), "comments fetched");
            comments
        }
        Err(e) if e.status() == Some(403) => {
            tracing::debug!("comments are disabled");
            vec![COMMENTS_DISABLED.to_string()]
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch comments");
            vec![format!("Error fetching comments: {e}")]
        }
    }
}
