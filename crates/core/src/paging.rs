//! Forward-only pagination over YouTube list endpoints.

use std::future::Future;

use crate::error::Result;

/// One page of a list response, reduced to what the pager needs.
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_page_token: Option<String>,
}

/// Requests pages until `limit` items are collected, the API stops handing
/// out page tokens, or a page comes back empty. Each request asks for at most `page_cap` items and never
/// more than are still missing. The result holds at most `limit` items.
pub async fn collect_paged<T, F, Fut>(limit: usize, page_cap: usize, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(u32, Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut items = Vec::with_capacity(limit.min(page_cap));
    let mut page_token = None;

    while items.len() < limit {
        let wanted = (limit - items.len()).min(page_cap);
        let page = fetch_page(wanted as u32, page_token.take()).await?;
        if page.items.is_empty() {
            break;
        }
        items.extend(page.items);

        match page.next_page_token {
            Some(token) if !token.is_empty() => page_token = Some(token),
            _ => break,
        }
    }

    items.truncate(limit);
    Ok(items)
}
