use crate::latest::LatestFetch;
use crate::{CollectionEndpoint, FetchError, FetchTicket, Result, Transport};
use holonet_model::{CollectionItem, CollectionPage};
use log::{info, warn};
use std::sync::Arc;

/// What happened when a collection fetch was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionEvent {
    Loaded {
        ticket: FetchTicket,
        query: String,
        count: usize,
    },
    Failed {
        ticket: FetchTicket,
        query: String,
        error: FetchError,
    },
}

impl CollectionEvent {
    #[must_use]
    pub const fn ticket(&self) -> FetchTicket {
        match self {
            Self::Loaded { ticket, .. } | Self::Failed { ticket, .. } => *ticket,
        }
    }
}

/// Owns the current collection for one endpoint and keeps it in step with the latest query.
pub struct CollectionFetchController {
    transport: Arc<dyn Transport>,
    endpoint: CollectionEndpoint,
    fetch: LatestFetch<Vec<CollectionItem>>,
    items: Vec<CollectionItem>,
    error: Option<FetchError>,
}

impl CollectionFetchController {
    pub fn new(transport: Arc<dyn Transport>, endpoint: CollectionEndpoint) -> Self {
        Self {
            transport,
            endpoint,
            fetch: LatestFetch::new("collection"),
            items: Vec::new(),
            error: None,
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &CollectionEndpoint {
        &self.endpoint
    }

    /// Start resolving `query`. The current collection is cleared immediately so results of an
    /// older query are never shown next to a newer one.
    pub fn issue(&mut self, query: &str) -> FetchTicket {
        self.items.clear();
        self.error = None;

        let url = self.endpoint.url_for(query);
        let transport = Arc::clone(&self.transport);
        self.fetch.issue(query.to_string(), async move {
            fetch_collection(transport.as_ref(), &url).await
        })
    }

    /// Wait for the in-flight fetch and apply it. `None` when nothing is in flight.
    pub async fn next_resolution(&mut self) -> Option<CollectionEvent> {
        let completion = self.fetch.next().await?;
        let ticket = completion.ticket;
        let query = completion.key;
        Some(match completion.outcome {
            Ok(items) => {
                info!(
                    "{} results for {:?} from {}",
                    items.len(),
                    query,
                    self.endpoint.root()
                );
                let count = items.len();
                self.items = items;
                self.error = None;
                CollectionEvent::Loaded {
                    ticket,
                    query,
                    count,
                }
            }
            Err(error) => {
                warn!("Failed to fetch {query:?} from {}: {error}", self.endpoint.root());
                self.items.clear();
                self.error = Some(error.clone());
                CollectionEvent::Failed {
                    ticket,
                    query,
                    error,
                }
            }
        })
    }

    /// Issue `query` and wait for its result.
    pub async fn resolve(&mut self, query: &str) -> Result<&[CollectionItem]> {
        let ticket = self.issue(query);
        while let Some(event) = self.next_resolution().await {
            if event.ticket() != ticket {
                continue;
            }
            return match event {
                CollectionEvent::Loaded { .. } => Ok(&self.items),
                CollectionEvent::Failed { error, .. } => Err(error),
            };
        }
        Err(FetchError::Cancelled {
            url: self.endpoint.url_for(query),
        })
    }

    /// Drop the in-flight fetch, if any.
    pub fn cancel(&mut self) -> bool {
        self.fetch.cancel()
    }

    #[must_use]
    pub fn items(&self) -> &[CollectionItem] {
        &self.items
    }

    #[must_use]
    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.fetch.is_pending()
    }

    #[must_use]
    pub fn pending_ticket(&self) -> Option<FetchTicket> {
        self.fetch.pending_ticket()
    }

    #[must_use]
    pub fn last_issued(&self) -> Option<FetchTicket> {
        self.fetch.last_issued()
    }

    #[must_use]
    pub fn queued_completions(&self) -> usize {
        self.fetch.queued()
    }
}

async fn fetch_collection(transport: &dyn Transport, url: &str) -> Result<Vec<CollectionItem>> {
    let value = transport.get_json(url).await?;
    let page: CollectionPage =
        serde_json::from_value(value).map_err(|e| FetchError::decode(url, e))?;
    Ok(page.results)
}
