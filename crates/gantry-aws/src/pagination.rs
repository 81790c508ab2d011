//! Cursor-driven pagination for the in-memory providers.

use std::future::Future;

use crate::{Error, Result};

/// A single page of results and the cursor to the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// Creates a new page.
    pub fn new(items: Vec<T>, next_token: Option<String>) -> Self {
        Self { items, next_token }
    }
}

/// Fetches pages until the cursor runs out and concatenates them in order.
///
/// An empty cursor counts as the last page. Any failing page aborts the
/// whole collection and nothing partial is returned.
pub async fn collect_pages<T, F, Fut>(mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = fetch(cursor.clone()).await?;
        items.extend(page.items);

        match page.next_token.filter(|token| !token.is_empty()) {
            Some(token) if cursor.as_deref() == Some(token.as_str()) => {
                return Err(Error::internal()
                    .with_message(format!("pagination cursor did not advance: {token}")));
            }
            Some(token) => cursor = Some(token),
            None => return Ok(items),
        }
    }
}
