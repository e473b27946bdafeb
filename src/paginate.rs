//! Cursor pagination over the clip listing endpoint.

use crate::error::{ClipError, Result};
use crate::helix::{ClipQuery, HelixApi};
use crate::models::ClipRecord;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared stop flag, checked before every page request.
#[derive(Clone, Debug, Default)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    pub fn new() -> Self { Self::default() }
    pub fn cancel(&self) { self.0.store(true, Ordering::SeqCst); }
    pub fn is_cancelled(&self) -> bool { self.0.load(Ordering::SeqCst) }
}

/// Fetch every clip of `query`, following cursors until the server stops handing them out.
pub fn paginate<A: HelixApi + ?Sized>(api: &A, query: &ClipQuery<'_>, cancel: &Cancellation) -> Result<Vec<ClipRecord>> {
    paginate_with(api, query, cancel, |_, _| {})
}

/// Like [`paginate`], calling `on_page(page_len, total_so_far)` after each page.
///
/// Stops when a page has no cursor (or an empty one) or when a page has no `data`
/// field; in the latter case whatever was collected so far is returned. Records are
/// appended in arrival order and never deduplicated.
pub fn paginate_with<A, F>(api: &A, query: &ClipQuery<'_>, cancel: &Cancellation, mut on_page: F) -> Result<Vec<ClipRecord>>
where
    A: HelixApi + ?Sized,
    F: FnMut(usize, usize),
{
    let mut clips: Vec<ClipRecord> = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;

    loop {
        if cancel.is_cancelled() {
            tracing::info!(pages, clips = clips.len(), "pagination cancelled");
            return Err(ClipError::Cancelled);
        }

        let page = api.clips(query, cursor.as_deref())?;
        pages += 1;

        let next = page.cursor().map(str::to_string);
        let Some(data) = page.data else {
            tracing::debug!(pages, "page without data; treating as end of results");
            break;
        };
        let n = data.len();
        clips.extend(data);
        on_page(n, clips.len());
        tracing::debug!(page = pages, received = n, total = clips.len(), "fetched clip page");

        match next {
            Some(c) => cursor = Some(c),
            None => break,
        }
    }

    tracing::info!(pages, clips = clips.len(), broadcaster=%query.broadcaster_id, "clip retrieval finished");
    Ok(clips)
}
