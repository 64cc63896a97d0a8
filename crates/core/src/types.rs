//! Wire types for the YouTube Data API responses we consume, and the
//! request-scoped records built from them.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

pub const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";
pub const TRANSCRIPT_UNAVAILABLE: &str = "Transcript not available.";

/// Response structure for the `search.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/search/list>
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
    /// Token for the next page in the result set.
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// A single `search` resource.
///
/// See: <https://developers.google.com/youtube/v3/docs/search#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: SearchResultId,
    pub snippet: SearchSnippet,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResultId {
    /// Present when the result is a video, which is always the case with `type=video`.
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchSnippet {
    pub title: String,
    /// The creation date of the resource, in ISO 8601 format.
    #[serde(rename = "publishedAt")]
    pub published_at: Timestamp,
}

/// Response structure for the `commentThreads.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/commentThreads/list>
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CommentThreadListResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentThread {
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentThreadSnippet {
    #[serde(rename = "topLevelComment")]
    pub top_level_comment: Comment,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Comment {
    pub snippet: CommentSnippet,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentSnippet {
    /// The comment text, as plain text when requested with `textFormat=plainText`.
    #[serde(rename = "textDisplay")]
    pub text_display: String,
}

impl CommentThread {
    pub fn into_text(self) -> String {
        self.snippet.top_level_comment.snippet.text_display
    }
}

/// Google's standard error envelope.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub code: u16,
    pub message: String,
}

/// A video found by the search step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSummary {
    pub video_id: String,
    pub title: String,
    pub url: String,
    /// Publish date as `YYYY-MM-DD` (UTC).
    pub published: String,
}

impl VideoSummary {
    pub fn new(video_id: impl Into<String>, title: impl Into<String>, published_at: Timestamp) -> Self {
        let video_id = video_id.into();
        Self {
            url: format!("{WATCH_URL_PREFIX}{video_id}"),
            title: title.into(),
            published: published_at.strftime("%Y-%m-%d").to_string(),
            video_id,
        }
    }

    pub fn from_search_result(result: SearchResult) -> Option<Self> {
        let video_id = result.id.video_id?;
        Some(Self::new(
            video_id,
            result.snippet.title,
            result.snippet.published_at,
        ))
    }
}

/// One line of the result table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRow {
    pub serial_number: usize,
    pub video_name: String,
    pub video_link: String,
    pub date_posted: String,
    pub comments: String,
    pub transcript: String,
}

impl VideoRow {
    pub const HEADERS: [&'static str; 6] = [
        "Serial Number",
        "Video Name",
        "Video Link",
        "Date Posted",
        "Comments",
        "Transcript",
    ];

    pub fn new(
        serial_number: usize,
        video: VideoSummary,
        comments: Vec<String>,
        transcript: Option<String>,
    ) -> Self {
        Self {
            serial_number,
            video_name: video.title,
            video_link: video.url,
            date_posted: video.published,
            comments: comments.join("\n"),
            transcript: transcript.unwrap_or_else(|| TRANSCRIPT_UNAVAILABLE.to_string()),
        }
    }

    /// Cell values in `HEADERS` order.
    pub fn cells(&self) -> [String; 6] {
        [
            self.serial_number.to_string(),
            self.video_name.clone(),
            self.video_link.clone(),
            self.date_posted.clone(),
            self.comments.clone(),
            self.transcript.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_JSON: &str = r#"{
        "kind": "youtube#searchListResponse",
        "etag": "abc",
        "nextPageToken": "CAoQAA",
        "regionCode": "US",
        "pageInfo": { "totalResults": 1000000, "resultsPerPage": 2 },
        "items": [
            {
                "kind": "youtube#searchResult",
                "id": { "kind": "youtube#video", "videoId": "dQw4w9WgXcQ" },
                "snippet": {
                    "publishedAt": "2024-11-03T18:04:12Z",
                    "channelId": "UC1",
                    "title": "Rust in 100 seconds",
                    "description": "",
                    "channelTitle": "Someone"
                }
            },
            {
                "kind": "youtube#searchResult",
                "id": { "kind": "youtube#channel", "channelId": "UC2" },
                "snippet": {
                    "publishedAt": "2023-01-01T00:00:00Z",
                    "title": "A channel"
                }
            }
        ]
    }"#;

    const COMMENTS_JSON: &str = r#"{
        "kind": "youtube#commentThreadListResponse",
        "pageInfo": { "totalResults": 1, "resultsPerPage": 1 },
        "items": [
            {
                "kind": "youtube#commentThread",
                "id": "Ugx",
                "snippet": {
                    "videoId": "dQw4w9WgXcQ",
                    "topLevelComment": {
                        "kind": "youtube#comment",
                        "id": "Ugx",
                        "snippet": {
                            "textDisplay": "great video",
                            "textOriginal": "great video",
                            "likeCount": 3
                        }
                    },
                    "totalReplyCount": 0
                }
            }
        ]
    }"#;

    #[test]
    fn parses_search_response_and_skips_non_videos() {
        let response: SearchListResponse = serde_json::from_str(SEARCH_JSON).unwrap();
        assert_eq!(response.next_page_token.as_deref(), Some("CAoQAA"));

        let videos: Vec<_> = response
            .items
            .into_iter()
            .filter_map(VideoSummary::from_search_result)
            .collect();

        assert_eq!(
            videos,
            vec![VideoSummary {
                video_id: "dQw4w9WgXcQ".to_string(),
                title: "Rust in 100 seconds".to_string(),
                url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
                published: "2024-11-03".to_string(),
            }]
        );
    }

    #[test]
    fn parses_comment_threads_without_page_token() {
        let response: CommentThreadListResponse = serde_json::from_str(COMMENTS_JSON).unwrap();
        assert!(response.next_page_token.is_none());

        let texts: Vec<_> = response.items.into_iter().map(CommentThread::into_text).collect();
        assert_eq!(texts, vec!["great video".to_string()]);
    }

    #[test]
    fn parses_empty_list_without_items_field() {
        let response: CommentThreadListResponse = serde_json::from_str("{}").unwrap();
        assert!(response.items.is_empty());
    }

    #[test]
    fn parses_google_error_envelope() {
        let body = r#"{"error":{"code":403,"message":"The video has disabled comments.","errors":[]}}"#;
        let parsed: ApiErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.code, 403);
        assert_eq!(parsed.error.message, "The video has disabled comments.");
    }

    #[test]
    fn row_joins_comments_and_falls_back_for_missing_transcript() {
        let video = VideoSummary::new("abc", "Title", "2024-01-02T03:04:05Z".parse().unwrap());
        let row = VideoRow::new(
            1,
            video,
            vec!["1. first".to_string(), "2. second".to_string()],
            None,
        );

        assert_eq!(row.serial_number, 1);
        assert_eq!(row.video_link, "https://www.youtube.com/watch?v=abc");
        assert_eq!(row.date_posted, "2024-01-02");
        assert_eq!(row.comments, "1. first\n2. second");
        assert_eq!(row.transcript, TRANSCRIPT_UNAVAILABLE);
    }
}
