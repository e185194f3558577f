use crate::{InteractionSource, OutsideDismissal, OutsideHit, Rect, Result, ViewError};
use holonet_fetch::{
    CollectionEndpoint, CollectionEvent, CollectionFetchController, DetailEvent,
    DetailFetchController, FetchTicket, Transport,
};
use holonet_model::{
    Activation, CollectionItem, DetailRecord, RenderedField, ResourceKind, ResourceProfile,
};
use log::{debug, info};
use serde::Serialize;
use std::sync::Arc;

/// Shared, immutable query text.
pub type Query = Arc<str>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayPhase {
    Closed,
    DetailLoading,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissCause {
    CloseAction,
    OutsidePointer,
    QueryChanged,
}

/// One applied state change, as reported by [`CollectionView::next_change`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewChange {
    Collection(CollectionEvent),
    Detail(DetailEvent),
    Dismissed(DismissCause),
}

/// Rendering-ready snapshot of one view.
#[derive(Debug, Clone, Serialize)]
pub struct ViewState {
    pub kind: ResourceKind,
    pub title: String,
    pub query: String,
    pub phase: ListPhase,
    pub items: Vec<CollectionItem>,
    pub selection: Option<CollectionItem>,
    pub detail: Option<DetailRecord>,
    /// Detail fields that survived unknown-value filtering, in display order
    pub detail_fields: Vec<RenderedField>,
    pub detail_image: Option<String>,
    pub overlay: OverlayPhase,
    pub overlay_open: bool,
    pub detail_pending: bool,
    /// Set whenever `items` is empty, whether the query matched nothing or the fetch failed
    pub not_found_message: bool,
    pub error: Option<String>,
}

impl ViewState {
    #[must_use]
    pub fn not_found_text(&self) -> Option<String> {
        self.not_found_message
            .then(|| format!("{} cannot be found.", self.query))
    }
}

/// The generic search-synchronized collection view.
///
/// Application state only changes inside `&mut self` methods; fetch tasks report back through
/// the controllers and are applied by [`next_change`](Self::next_change) or
/// [`settle`](Self::settle).
pub struct CollectionView {
    profile: ResourceProfile,
    query: Query,
    phase: ListPhase,
    collection: CollectionFetchController,
    detail: DetailFetchController,
    dismissal: OutsideDismissal,
    boundary: Option<Rect>,
}

impl CollectionView {
    pub fn new(
        profile: ResourceProfile,
        endpoint: CollectionEndpoint,
        transport: Arc<dyn Transport>,
        interactions: InteractionSource,
    ) -> Self {
        Self {
            profile,
            query: Query::from(""),
            phase: ListPhase::Idle,
            collection: CollectionFetchController::new(Arc::clone(&transport), endpoint),
            detail: DetailFetchController::new(transport),
            dismissal: OutsideDismissal::new(interactions),
            boundary: None,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        self.profile.kind
    }

    #[must_use]
    pub fn profile(&self) -> &ResourceProfile {
        &self.profile
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn phase(&self) -> ListPhase {
        self.phase
    }

    #[must_use]
    pub fn items(&self) -> &[CollectionItem] {
        self.collection.items()
    }

    /// Follow a new query: close the overlay, drop pending work, clear the list and fetch.
    /// Returns `None` when the query is unchanged and the view has already loaded once.
    pub fn set_query(&mut self, query: Query) -> Option<FetchTicket> {
        if self.phase != ListPhase::Idle && *self.query == *query {
            return None;
        }
        if self.detail.is_open() || self.detail.is_pending() {
            debug!("{} overlay closed by query change", self.profile.kind);
        }
        self.detail.reset();
        self.sync_dismissal();

        self.query = query;
        self.phase = ListPhase::Loading;
        Some(self.collection.issue(&self.query))
    }

    /// React to the user activating `item`. Returns the detail ticket when a fetch was issued.
    pub fn activate(&mut self, item: CollectionItem) -> Option<FetchTicket> {
        match self.profile.activation {
            Activation::Inline => {
                info!("{} opened {}", self.profile.kind, item.name);
                self.detail.open_inline(item);
                self.sync_dismissal();
                None
            }
            Activation::FetchDetail => Some(self.detail.activate(item)),
        }
    }

    /// Activate the item at `index` of the current list.
    pub fn activate_index(&mut self, index: usize) -> Result<Option<FetchTicket>> {
        let item = self
            .items()
            .get(index)
            .cloned()
            .ok_or(ViewError::ItemOutOfRange {
                index,
                len: self.items().len(),
            })?;
        Ok(self.activate(item))
    }

    /// Explicit close action: closes the overlay and drops any activation still loading.
    /// Idempotent.
    pub fn dismiss(&mut self) -> bool {
        self.close(DismissCause::CloseAction)
    }

    fn close(&mut self, cause: DismissCause) -> bool {
        let closed = self.detail.reset();
        self.sync_dismissal();
        if closed {
            debug!("{} overlay dismissed ({cause:?})", self.profile.kind);
        }
        closed
    }

    /// Region the rendered overlay occupies; pointer-downs outside it dismiss the overlay.
    pub fn attach_boundary(&mut self, rect: Rect) {
        self.boundary = Some(rect);
    }

    pub fn detach_boundary(&mut self) {
        self.boundary = None;
    }

    #[must_use]
    pub const fn boundary(&self) -> Option<Rect> {
        self.boundary
    }

    #[must_use]
    pub fn dismissal(&self) -> &OutsideDismissal {
        &self.dismissal
    }

    fn sync_dismissal(&mut self) {
        if self.detail.is_open() {
            self.dismissal.arm();
        } else {
            self.dismissal.disarm();
        }
    }

    /// Apply pointer-downs that were already dispatched. Returns `true` if one closed the
    /// overlay.
    pub fn process_pointer_events(&mut self) -> bool {
        match self.dismissal.poll_outside(self.boundary) {
            Some(event) => self.on_outside(event),
            None => false,
        }
    }

    fn on_outside(&mut self, hit: OutsideHit) -> bool {
        match hit {
            OutsideHit::Pointer(event) => debug!(
                "{} pointer-down outside overlay at ({}, {})",
                self.profile.kind, event.position.x, event.position.y
            ),
            OutsideHit::Missed(skipped) => debug!(
                "{} missed {skipped} pointer-downs; closing overlay",
                self.profile.kind
            ),
        }
        self.close(DismissCause::OutsidePointer)
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.collection.is_pending() || self.detail.is_pending()
    }

    /// Wait for the next state change: a fetch resolving or an outside pointer-down.
    /// Returns `None` when there is nothing left that could change the state.
    pub async fn next_change(&mut self) -> Option<ViewChange> {
        if self.process_pointer_events() {
            return Some(ViewChange::Dismissed(DismissCause::OutsidePointer));
        }
        let collection_pending = self.collection.is_pending();
        let detail_pending = self.detail.is_pending();
        if !collection_pending && !detail_pending && !self.dismissal.is_armed() {
            return None;
        }

        let boundary = self.boundary;
        tokio::select! {
            biased;
            event = self.dismissal.next_outside(boundary) => {
                self.on_outside(event);
                Some(ViewChange::Dismissed(DismissCause::OutsidePointer))
            }
            Some(event) = self.collection.next_resolution(), if collection_pending => {
                self.apply_collection(&event);
                Some(ViewChange::Collection(event))
            }
            Some(event) = self.detail.next_resolution(), if detail_pending => {
                self.sync_dismissal();
                Some(ViewChange::Detail(event))
            }
        }
    }

    fn apply_collection(&mut self, event: &CollectionEvent) {
        self.phase = match event {
            CollectionEvent::Loaded { .. } => ListPhase::Loaded,
            CollectionEvent::Failed { .. } => ListPhase::Failed,
        };
    }

    /// Apply every outstanding fetch and already-dispatched pointer-down, then return.
    pub async fn settle(&mut self) -> Vec<ViewChange> {
        let mut changes = Vec::new();
        loop {
            if self.process_pointer_events() {
                changes.push(ViewChange::Dismissed(DismissCause::OutsidePointer));
                continue;
            }
            if !self.is_busy() {
                return changes;
            }
            let collection_pending = self.collection.is_pending();
            let detail_pending = self.detail.is_pending();
            tokio::select! {
                Some(event) = self.collection.next_resolution(), if collection_pending => {
                    self.apply_collection(&event);
                    changes.push(ViewChange::Collection(event));
                }
                Some(event) = self.detail.next_resolution(), if detail_pending => {
                    self.sync_dismissal();
                    changes.push(ViewChange::Detail(event));
                }
                else => return changes,
            }
        }
    }

    #[must_use]
    pub fn overlay_phase(&self) -> OverlayPhase {
        if self.detail.is_open() {
            OverlayPhase::Open
        } else if self.detail.is_pending() {
            OverlayPhase::DetailLoading
        } else {
            OverlayPhase::Closed
        }
    }

    /// The item being activated, or else the item whose overlay is open
    #[must_use]
    pub fn selection(&self) -> Option<&CollectionItem> {
        self.detail
            .pending_item()
            .or_else(|| self.detail.open().map(|open| &open.item))
    }

    #[must_use]
    pub fn state(&self) -> ViewState {
        let open = self.detail.open();
        let items = self.collection.items().to_vec();
        ViewState {
            kind: self.profile.kind,
            title: self.profile.title.clone(),
            query: self.query.to_string(),
            phase: self.phase,
            not_found_message: items.is_empty(),
            items,
            selection: self.selection().cloned(),
            detail: open.map(|o| o.record.clone()),
            detail_fields: open
                .map(|o| o.record.render(&self.profile.fields))
                .unwrap_or_default(),
            detail_image: open.and_then(|o| self.profile.image_for(&o.item)),
            overlay: self.overlay_phase(),
            overlay_open: open.is_some(),
            detail_pending: self.detail.is_pending(),
            error: self.collection.error().map(ToString::to_string),
        }
    }
}
