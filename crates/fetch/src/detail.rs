use crate::latest::LatestFetch;
use crate::{FetchError, FetchTicket, Result, Transport};
use holonet_model::{CollectionItem, DetailRecord};
use log::{info, warn};
use std::sync::Arc;

/// The overlay's content: the activated item together with its resolved record.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenDetail {
    pub item: CollectionItem,
    pub record: DetailRecord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailEvent {
    Opened { ticket: FetchTicket, url: String },
    Failed { ticket: FetchTicket, url: String, error: FetchError },
}

/// Resolves detail records on activation and owns the overlay's open state.
///
/// The open overlay and its record are one value, so the overlay can never be open without a
/// record or hold a record while closed.
pub struct DetailFetchController {
    transport: Arc<dyn Transport>,
    fetch: LatestFetch<DetailRecord>,
    pending: Option<CollectionItem>,
    open: Option<OpenDetail>,
}

impl DetailFetchController {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            fetch: LatestFetch::new("detail"),
            pending: None,
            open: None,
        }
    }

    /// Start fetching `item.url`. Supersedes any earlier activation that has not resolved yet.
    /// An overlay that is already open stays open until the new record arrives.
    pub fn activate(&mut self, item: CollectionItem) -> FetchTicket {
        let url = item.url.clone();
        let transport = Arc::clone(&self.transport);
        let ticket = self.fetch.issue(url.clone(), async move {
            fetch_detail(transport.as_ref(), &url).await
        });
        self.pending = Some(item);
        ticket
    }

    /// Open the overlay straight from the item's own fields.
    pub fn open_inline(&mut self, item: CollectionItem) {
        self.cancel_pending();
        let record = item.to_detail();
        self.open = Some(OpenDetail { item, record });
    }

    /// Wait for the pending activation and apply it. `None` when nothing is pending.
    pub async fn next_resolution(&mut self) -> Option<DetailEvent> {
        let completion = self.fetch.next().await?;
        let item = self.pending.take();
        let ticket = completion.ticket;
        let url = completion.key;
        Some(match (completion.outcome, item) {
            (Ok(record), Some(item)) => {
                info!("Opened detail for {url}");
                self.open = Some(OpenDetail { item, record });
                DetailEvent::Opened { ticket, url }
            }
            (Ok(_), None) => {
                // pending is set with every issue; a missing item means the state was reset.
                let error = FetchError::Cancelled { url: url.clone() };
                DetailEvent::Failed { ticket, url, error }
            }
            (Err(error), _) => {
                warn!("Failed to fetch detail {url}: {error}");
                DetailEvent::Failed { ticket, url, error }
            }
        })
    }

    /// Activate `item` and wait for the outcome.
    pub async fn resolve(&mut self, item: CollectionItem) -> Result<&OpenDetail> {
        let url = item.url.clone();
        let ticket = self.activate(item);
        while let Some(event) = self.next_resolution().await {
            match event {
                DetailEvent::Opened { ticket: t, .. } if t == ticket => {
                    return self
                        .open
                        .as_ref()
                        .ok_or(FetchError::Cancelled { url });
                }
                DetailEvent::Failed {
                    ticket: t, error, ..
                } if t == ticket => return Err(error),
                _ => {}
            }
        }
        Err(FetchError::Cancelled { url })
    }

    /// Close the overlay and discard its record. Idempotent; pending activations are kept,
    /// use [`reset`](Self::reset) to drop them too.
    pub fn dismiss(&mut self) -> bool {
        self.open.take().is_some()
    }

    /// Drop the pending activation so its result is never applied.
    pub fn cancel_pending(&mut self) -> bool {
        self.pending = None;
        self.fetch.cancel()
    }

    /// Cancel the pending activation and close the overlay. Returns `true` if either existed.
    pub fn reset(&mut self) -> bool {
        let cancelled = self.cancel_pending();
        let closed = self.dismiss();
        cancelled || closed
    }

    #[must_use]
    pub fn open(&self) -> Option<&OpenDetail> {
        self.open.as_ref()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    #[must_use]
    pub fn pending_item(&self) -> Option<&CollectionItem> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.fetch.is_pending()
    }

    #[must_use]
    pub fn queued_completions(&self) -> usize {
        self.fetch.queued()
    }
}

async fn fetch_detail(transport: &dyn Transport, url: &str) -> Result<DetailRecord> {
    let value = transport.get_json(url).await?;
    let record = DetailRecord::from_json(value)
        .ok_or_else(|| FetchError::decode(url, "expected a JSON object"))?;
    if record.is_empty() {
        return Err(FetchError::decode(url, "empty detail record"));
    }
    Ok(record)
}
