use holonet_fetch::testing::ScriptedTransport;
use holonet_fetch::CollectionEndpoint;
use holonet_model::{CollectionItem, ResourceProfile};
use holonet_view::{CollectionView, InteractionSource, OverlayPhase, Point, Rect};
use serde_json::json;
use std::sync::Arc;

const BASE: &str = "https://api.test";
const OVERLAY: Rect = Rect::new(10, 10, 30, 12);

struct Fixture {
    source: InteractionSource,
    view: CollectionView,
}

fn fixture(profile: ResourceProfile) -> Fixture {
    let transport = Arc::new(ScriptedTransport::new());
    transport.respond(
        &format!("{BASE}/vehicles/4/"),
        json!({"name": "Sand Crawler", "model": "Digger Crawler", "length": "36.8 "}),
    );
    let source = InteractionSource::new();
    let view = CollectionView::new(
        profile,
        CollectionEndpoint::new(BASE, "vehicles"),
        transport,
        source.clone(),
    );
    Fixture { source, view }
}

fn sand_crawler() -> CollectionItem {
    CollectionItem::new("Sand Crawler", format!("{BASE}/vehicles/4/"))
}

#[tokio::test]
async fn inside_click_keeps_overlay_outside_click_closes_it() {
    let Fixture { source, mut view } = fixture(ResourceProfile::vehicles());

    view.activate(sand_crawler());
    view.settle().await;
    view.attach_boundary(OVERLAY);
    assert!(view.state().overlay_open);

    source.pointer_down(Point::new(15, 15));
    view.settle().await;
    assert!(view.state().overlay_open, "click inside must not dismiss");

    source.pointer_down(Point::new(80, 2));
    view.settle().await;
    let state = view.state();
    assert!(!state.overlay_open);
    assert!(state.detail.is_none());
    assert!(state.detail_fields.is_empty());
    assert_eq!(source.observer_count(), 0);
}

#[tokio::test]
async fn detached_boundary_dismisses_without_fault() {
    let Fixture { source, mut view } = fixture(ResourceProfile::vehicles());

    view.activate(sand_crawler());
    view.settle().await;
    view.detach_boundary();

    source.pointer_down(Point::new(15, 15));
    assert!(view.process_pointer_events());
    assert_eq!(view.overlay_phase(), OverlayPhase::Closed);
}

#[tokio::test]
async fn observer_is_installed_once_per_open_and_never_stacks() {
    let Fixture { source, mut view } = fixture(ResourceProfile::vehicles());
    view.attach_boundary(OVERLAY);

    for cycle in 1..=5u64 {
        view.activate(sand_crawler());
        view.settle().await;
        // Re-activating while open does not add a second observer.
        view.activate(sand_crawler());
        view.settle().await;
        assert_eq!(source.observer_count(), 1, "cycle {cycle}");

        if cycle % 2 == 0 {
            view.dismiss();
        } else {
            source.pointer_down(Point::new(0, 0));
            view.settle().await;
        }
        assert_eq!(source.observer_count(), 0, "cycle {cycle}");
        assert_eq!(view.dismissal().install_count(), cycle);
    }
}

#[tokio::test]
async fn explicit_dismiss_is_idempotent() {
    let Fixture { source, mut view } = fixture(ResourceProfile::vehicles());

    view.activate(sand_crawler());
    view.settle().await;
    assert!(view.dismiss());
    assert!(!view.dismiss());
    assert_eq!(source.observer_count(), 0);
    assert!(view.state().detail.is_none());
}

#[tokio::test]
async fn clicks_while_closed_reach_no_observer() {
    let Fixture { source, mut view } = fixture(ResourceProfile::vehicles());
    assert_eq!(source.pointer_down(Point::new(1, 1)), 0);

    view.activate(sand_crawler());
    view.settle().await;
    assert_eq!(source.pointer_down(Point::new(11, 11)), 1);
}

#[tokio::test]
async fn dropping_the_view_releases_the_observer() {
    let Fixture { source, mut view } = fixture(ResourceProfile::people());

    view.activate(CollectionItem::new("Luke Skywalker", format!("{BASE}/people/1/")));
    assert_eq!(source.observer_count(), 1);
    drop(view);
    assert_eq!(source.observer_count(), 0);
}

#[tokio::test]
async fn two_views_observe_independently() {
    let source = InteractionSource::new();
    let transport = Arc::new(ScriptedTransport::new());
    let mut people = CollectionView::new(
        ResourceProfile::people(),
        CollectionEndpoint::new(BASE, "people"),
        transport.clone(),
        source.clone(),
    );
    let mut vehicles = CollectionView::new(
        ResourceProfile::vehicles(),
        CollectionEndpoint::new(BASE, "vehicles"),
        transport,
        source.clone(),
    );

    people.activate(CollectionItem::new("Luke Skywalker", format!("{BASE}/people/1/")));
    people.attach_boundary(Rect::new(0, 0, 10, 10));
    assert_eq!(source.observer_count(), 1);
    assert!(vehicles.state().detail.is_none());

    source.pointer_down(Point::new(5, 5));
    assert!(!people.process_pointer_events());
    assert!(!vehicles.process_pointer_events());
    assert!(people.state().overlay_open);
}
