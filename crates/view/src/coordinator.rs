use crate::{
    CollectionView, InteractionSource, Point, Query, Result, ViewChange, ViewError, ViewState,
};
use holonet_fetch::{CollectionEndpoint, Transport};
use holonet_model::{ResourceKind, ResourceProfile};
use log::info;
use std::sync::Arc;

/// Owns the shared query and fans it out to every mounted view.
pub struct SearchCoordinator {
    query: Query,
    started: bool,
    views: Vec<CollectionView>,
    interactions: InteractionSource,
}

impl SearchCoordinator {
    #[must_use]
    pub fn new(interactions: InteractionSource) -> Self {
        Self {
            query: Query::from(""),
            started: false,
            views: Vec::new(),
            interactions,
        }
    }

    /// People and vehicles side by side against `api_base`.
    pub fn standard(
        api_base: &str,
        image_base: Option<&str>,
        transport: Arc<dyn Transport>,
        interactions: InteractionSource,
    ) -> Self {
        let mut coordinator = Self::new(interactions);
        for kind in ResourceKind::ALL {
            let mut profile = ResourceProfile::for_kind(kind);
            if let (ResourceKind::People, Some(base)) = (kind, image_base) {
                profile = profile.with_image_base(base);
            }
            coordinator.mount(
                profile,
                CollectionEndpoint::for_kind(api_base, kind),
                Arc::clone(&transport),
            );
        }
        coordinator
    }

    /// Add a view for `profile`. A view mounted after `start` picks up the current query at once.
    pub fn mount(
        &mut self,
        profile: ResourceProfile,
        endpoint: CollectionEndpoint,
        transport: Arc<dyn Transport>,
    ) -> &mut CollectionView {
        let mut view = CollectionView::new(profile, endpoint, transport, self.interactions.clone());
        if self.started {
            view.set_query(Query::clone(&self.query));
        }
        self.views.push(view);
        let last = self.views.len() - 1;
        &mut self.views[last]
    }

    /// Issue the initial (current) query to every view.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        for view in &mut self.views {
            view.set_query(Query::clone(&self.query));
        }
    }

    /// Replace the shared query. Returns `false` when it did not change.
    pub fn set_query(&mut self, query: &str) -> bool {
        if *self.query == *query && self.started {
            return false;
        }
        info!("query changed to {query:?}");
        self.query = Query::from(query);
        self.started = true;
        for view in &mut self.views {
            view.set_query(Query::clone(&self.query));
        }
        true
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn interactions(&self) -> &InteractionSource {
        &self.interactions
    }

    /// Dispatch a pointer-down to every open overlay's observer.
    pub fn pointer_down(&self, position: Point) -> usize {
        self.interactions.pointer_down(position)
    }

    #[must_use]
    pub fn views(&self) -> &[CollectionView] {
        &self.views
    }

    #[must_use]
    pub fn view(&self, kind: ResourceKind) -> Option<&CollectionView> {
        self.views.iter().find(|v| v.kind() == kind)
    }

    pub fn view_mut(&mut self, kind: ResourceKind) -> Result<&mut CollectionView> {
        self.views
            .iter_mut()
            .find(|v| v.kind() == kind)
            .ok_or(ViewError::NoSuchView(kind))
    }

    /// Settle every view; see [`CollectionView::settle`].
    pub async fn settle(&mut self) -> Vec<(ResourceKind, ViewChange)> {
        let mut changes = Vec::new();
        for view in &mut self.views {
            let kind = view.kind();
            changes.extend(view.settle().await.into_iter().map(|c| (kind, c)));
        }
        changes
    }

    #[must_use]
    pub fn states(&self) -> Vec<ViewState> {
        self.views.iter().map(CollectionView::state).collect()
    }
}
