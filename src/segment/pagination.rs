//! Cursor pagination
//!
//! List endpoints take `pagination.cursor` / `pagination.count` and answer
//! with `pagination.next`. A missing `next` means the listing is exhausted.

use anyhow::Result;
use std::future::Future;

/// Cursor that addresses the first page of every listing
pub const INITIAL_CURSOR: &str = "MA==";

/// Largest page the API will serve
pub const MAX_PAGE_SIZE: u32 = 200;

/// Parameters for one page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub cursor: String,
    pub count: u32,
}

impl PageRequest {
    /// Request for the first page, with the count clamped to the API limit
    pub fn first(count: u32) -> Self {
        Self {
            cursor: INITIAL_CURSOR.to_string(),
            count: count.clamp(1, MAX_PAGE_SIZE),
        }
    }
}

/// One page of results
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next: Option<String>) -> Self {
        // Some endpoints send an empty string instead of omitting the cursor
        let next = next.filter(|cursor| !cursor.is_empty());
        Self { items, next }
    }
}

/// Fetch every page and return all items in page order.
///
/// Any failed page aborts the walk; items from earlier pages are discarded.
pub async fn collect_all<T, F, Fut>(page_size: u32, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut request = PageRequest::first(page_size);
    let mut all_items = Vec::new();
    let mut pages = 0usize;

    loop {
        let page = fetch(request.clone()).await?;
        pages += 1;
        all_items.extend(page.items);

        match page.next {
            Some(next) => request.cursor = next,
            None => break,
        }
    }

    tracing::debug!("Collected {} items across {} pages", all_items.len(), pages);
    Ok(all_items)
}

/// Walk pages until an item matches `predicate`.
///
/// Returns `Ok(None)` only when every page was fetched and nothing matched,
/// which callers treat as "confirmed absent". No page after the matching
/// one is requested.
pub async fn find_first<T, F, Fut, P>(
    page_size: u32,
    mut fetch: F,
    mut predicate: P,
) -> Result<Option<T>>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
    P: FnMut(&T) -> bool,
{
    let mut request = PageRequest::first(page_size);
    let mut pages = 0usize;

    loop {
        let page = fetch(request.clone()).await?;
        pages += 1;

        if let Some(found) = page.items.into_iter().find(|item| predicate(item)) {
            tracing::debug!("Match found on page {}", pages);
            return Ok(Some(found));
        }

        match page.next {
            Some(next) => request.cursor = next,
            None => break,
        }
    }

    tracing::debug!("No match after {} pages", pages);
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Serve `pages` in order, recording each requested cursor
    fn fake_listing(
        pages: Vec<Page<u32>>,
        seen: &RefCell<Vec<String>>,
    ) -> impl FnMut(PageRequest) -> std::future::Ready<Result<Page<u32>>> + '_ {
        let mut pages = pages.into_iter();
        move |request| {
            seen.borrow_mut().push(request.cursor);
            std::future::ready(
                pages
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("requested past the last page")),
            )
        }
    }

    fn three_pages() -> Vec<Page<u32>> {
        vec![
            Page::new(vec![1, 2], Some("Mg==".to_string())),
            Page::new(vec![3, 4], Some("NA==".to_string())),
            Page::new(vec![5], None),
        ]
    }

    #[test]
    fn test_first_page_request_uses_sentinel_and_clamps_count() {
        let request = PageRequest::first(1000);
        assert_eq!(request.cursor, INITIAL_CURSOR);
        assert_eq!(request.count, MAX_PAGE_SIZE);
        assert_eq!(PageRequest::first(0).count, 1);
    }

    #[test]
    fn test_empty_next_cursor_means_exhausted() {
        let page = Page::new(vec![1u32], Some(String::new()));
        assert!(page.next.is_none());
    }

    #[tokio::test]
    async fn test_collect_all_issues_one_request_per_page_in_order() {
        let seen = RefCell::new(Vec::new());
        let items = collect_all(MAX_PAGE_SIZE, fake_listing(three_pages(), &seen))
            .await
            .unwrap();

        assert_eq!(items, vec![1, 2, 3, 4, 5]);
        assert_eq!(*seen.borrow(), vec!["MA==", "Mg==", "NA=="]);
    }

    #[tokio::test]
    async fn test_find_first_stops_at_matching_page() {
        let seen = RefCell::new(Vec::new());
        let found = find_first(MAX_PAGE_SIZE, fake_listing(three_pages(), &seen), |n| *n == 3)
            .await
            .unwrap();

        assert_eq!(found, Some(3));
        assert_eq!(seen.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_find_first_reports_absent_after_exhausting_pages() {
        let seen = RefCell::new(Vec::new());
        let found = find_first(MAX_PAGE_SIZE, fake_listing(three_pages(), &seen), |n| *n == 42)
            .await
            .unwrap();

        assert_eq!(found, None);
        assert_eq!(seen.borrow().len(), 3);
    }

    #[tokio::test]
    async fn test_page_error_aborts_walk() {
        let seen = RefCell::new(Vec::new());
        let pages = vec![Page::new(vec![1u32], Some("Mg==".to_string()))];

        let result = collect_all(MAX_PAGE_SIZE, fake_listing(pages, &seen)).await;

        assert!(result.is_err());
        assert_eq!(seen.borrow().len(), 2);
    }
}
