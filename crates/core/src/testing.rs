//! In-process fakes for the API seams.

use std::{collections::HashMap, sync::Mutex};

use crate::{
    comments::CommentSource,
    error::{HarvestError, Result},
    search::VideoSearch,
    transcript::TranscriptSource,
    types::{
        Comment, CommentSnippet, CommentThread, CommentThreadListResponse, CommentThreadSnippet,
        SearchListResponse, SearchResult, SearchResultId, SearchSnippet,
    },
};

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub published_after: String,
    pub max_results: u32,
    pub page_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CommentRequest {
    pub video_id: String,
    pub max_results: u32,
    pub page_token: Option<String>,
}

enum CommentScript {
    Count(usize),
    Status(u16),
}

/// Serves `video_count` search hits and per-video comment counts. Page
/// tokens are plain offsets, and pages are exactly as large as requested.
#[derive(Default)]
pub struct FakeYouTube {
    video_count: usize,
    comments: HashMap<String, CommentScript>,
    search_log: Mutex<Vec<SearchRequest>>,
    comment_log: Mutex<Vec<CommentRequest>>,
}

impl FakeYouTube {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_videos(mut self, count: usize) -> Self {
        self.video_count = count;
        self
    }

    pub fn with_comments(mut self, video_id: &str, count: usize) -> Self {
        self.comments
            .insert(video_id.to_string(), CommentScript::Count(count));
        self
    }

    pub fn with_comment_error(mut self, video_id: &str, status: u16) -> Self {
        self.comments
            .insert(video_id.to_string(), CommentScript::Status(status));
        self
    }

    pub fn search_requests(&self) -> Vec<SearchRequest> {
        self.search_log.lock().unwrap().clone()
    }

    pub fn comment_requests(&self) -> Vec<CommentRequest> {
        self.comment_log.lock().unwrap().clone()
    }
}

fn offset(page_token: Option<&str>) -> usize {
    page_token.map(|t| t.parse().unwrap()).unwrap_or(0)
}

impl VideoSearch for FakeYouTube {
    async fn search_page(
        &self,
        query: &str,
        published_after: &str,
        max_results: u32,
        page_token: Option<String>,
    ) -> Result<SearchListResponse> {
        self.search_log.lock().unwrap().push(SearchRequest {
            query: query.to_string(),
            published_after: published_after.to_string(),
            max_results,
            page_token: page_token.clone(),
        });

        let start = offset(page_token.as_deref());
        let end = (start + max_results as usize).min(self.video_count);
        let items = (start..end)
            .map(|i| SearchResult {
                id: SearchResultId {
                    video_id: Some(format!("vid{i}")),
                },
                snippet: SearchSnippet {
                    title: format!("Video {i}"),
                    published_at: "2024-05-01T12:00:00Z".parse().unwrap(),
                },
            })
            .collect();

        Ok(SearchListResponse {
            items,
            next_page_token: (end < self.video_count).then(|| end.to_string()),
        })
    }
}

impl CommentSource for FakeYouTube {
    async fn comment_threads(
        &self,
        video_id: &str,
        max_results: u32,
        page_token: Option<String>,
    ) -> Result<CommentThreadListResponse> {
        self.comment_log.lock().unwrap().push(CommentRequest {
            video_id: video_id.to_string(),
            max_results,
            page_token: page_token.clone(),
        });

        let total = match self.comments.get(video_id) {
            Some(CommentScript::Count(total)) => *total,
            Some(CommentScript::Status(status)) => {
                return Err(HarvestError::Api {
                    status: *status,
                    message: "scripted failure".to_string(),
                });
            }
            None => 0,
        };

        let start = offset(page_token.as_deref());
        let end = (start + max_results as usize).min(total);
        let items = (start..end)
            .map(|i| CommentThread {
                snippet: CommentThreadSnippet {
                    top_level_comment: Comment {
                        snippet: CommentSnippet {
                            text_display: format!("comment {i} on {video_id}"),
                        },
                    },
                },
            })
            .collect();

        Ok(CommentThreadListResponse {
            items,
            next_page_token: (end < total).then(|| end.to_string()),
        })
    }
}

/// Raw transcript text per video; unknown videos fail.
#[derive(Default)]
pub struct FakeTranscripts {
    texts: HashMap<String, String>,
}

impl FakeTranscripts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, video_id: &str, text: &str) -> Self {
        self.texts.insert(video_id.to_string(), text.to_string());
        self
    }
}

impl TranscriptSource for FakeTranscripts {
    async fn english_transcript(&self, video_id: &str) -> Result<String> {
        self.texts
            .get(video_id)
            .cloned()
            .ok_or_else(|| HarvestError::Transcript {
                video_id: video_id.to_string(),
                reason: "no transcripts".to_string(),
            })
    }
}
