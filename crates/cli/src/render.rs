use holonet_model::ResourceKind;
use holonet_view::{ListPhase, OverlayPhase, Rect, ViewState};
use std::fmt::Write as _;

const COLUMN_WIDTH: u32 = 48;
const COLUMN_GAP: u32 = 2;
const OVERLAY_TOP: i32 = 20;
const OVERLAY_HEIGHT: u32 = 14;

/// Fixed screen region each view draws its overlay into.
#[must_use]
pub fn overlay_region(kind: ResourceKind) -> Rect {
    let column = match kind {
        ResourceKind::People => 0,
        ResourceKind::Vehicles => 1,
    };
    let x = column * (COLUMN_WIDTH + COLUMN_GAP);
    Rect::new(
        i32::try_from(x).unwrap_or(i32::MAX),
        OVERLAY_TOP,
        COLUMN_WIDTH,
        OVERLAY_HEIGHT,
    )
}

/// Plain-text block for one view: heading, list (or the not-found line) and open overlay.
#[must_use]
pub fn render_view(state: &ViewState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", state.title);

    if state.phase == ListPhase::Loading {
        let _ = writeln!(out, "  loading...");
    } else if let Some(text) = state.not_found_text() {
        let _ = writeln!(out, "  {text}");
    } else {
        for (idx, item) in state.items.iter().enumerate() {
            let marker = match &state.selection {
                Some(selected) if selected.url == item.url => '>',
                _ => ' ',
            };
            let _ = writeln!(out, " {marker}{:>3}. {}", idx + 1, item.name);
        }
    }

    match state.overlay {
        OverlayPhase::Closed => {}
        OverlayPhase::DetailLoading => {
            let name = state.selection.as_ref().map_or("", |s| s.name.as_str());
            let _ = writeln!(out, "  [{name}: loading details]");
        }
        OverlayPhase::Open => render_overlay(&mut out, state),
    }
    out
}

fn render_overlay(out: &mut String, state: &ViewState) {
    let region = overlay_region(state.kind);
    let name = state
        .detail
        .as_ref()
        .and_then(|d| d.name())
        .or_else(|| state.selection.as_ref().map(|s| s.name.as_str()))
        .unwrap_or("");
    let _ = writeln!(
        out,
        "  +-- {name} -- at ({}, {}) {}x{}",
        region.x, region.y, region.width, region.height
    );
    if let Some(image) = &state.detail_image {
        let _ = writeln!(out, "  | image: {image}");
    }
    for field in &state.detail_fields {
        let _ = writeln!(out, "  | {}: {}", field.label, field.display);
    }
    let _ = writeln!(out, "  +-- close {} | click outside", state.kind);
}

/// Every view, separated by a blank line.
#[must_use]
pub fn render_all(states: &[ViewState]) -> String {
    states
        .iter()
        .map(render_view)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use holonet_model::{CollectionItem, DetailRecord, ResourceProfile};
    use holonet_view::Point;
    use pretty_assertions::assert_eq;

    fn state(kind: ResourceKind, items: Vec<CollectionItem>) -> ViewState {
        let profile = ResourceProfile::for_kind(kind);
        ViewState {
            kind,
            title: profile.title,
            query: "sky".to_string(),
            phase: ListPhase::Loaded,
            not_found_message: items.is_empty(),
            items,
            selection: None,
            detail: None,
            detail_fields: Vec::new(),
            detail_image: None,
            overlay: OverlayPhase::Closed,
            overlay_open: false,
            detail_pending: false,
            error: None,
        }
    }

    #[test]
    fn overlay_regions_do_not_overlap() {
        let people = overlay_region(ResourceKind::People);
        let vehicles = overlay_region(ResourceKind::Vehicles);
        assert!(people.contains(Point::new(0, OVERLAY_TOP)));
        assert!(!people.contains(Point::new(vehicles.x, vehicles.y)));
        assert!(!vehicles.contains(Point::new(people.x, people.y)));
    }

    #[test]
    fn empty_list_shows_not_found_line() {
        let out = render_view(&state(ResourceKind::People, Vec::new()));
        assert_eq!(out, "== People ==\n  sky cannot be found.\n");
    }

    #[test]
    fn open_overlay_lists_rendered_fields() {
        let luke = CollectionItem::new("Luke Skywalker", "https://api.test/people/1/")
            .with_field("height", "172")
            .with_field("mass", "unknown");
        let profile = ResourceProfile::people();
        let record: DetailRecord = luke.to_detail();

        let mut view = state(ResourceKind::People, vec![luke.clone()]);
        view.detail_fields = record.render(&profile.fields);
        view.detail = Some(record);
        view.selection = Some(luke);
        view.overlay = OverlayPhase::Open;
        view.overlay_open = true;

        let out = render_view(&view);
        assert!(out.contains(" >  1. Luke Skywalker"), "{out}");
        assert!(out.contains("| Height: 172cm"), "{out}");
        assert!(!out.contains("Mass"), "{out}");
        assert!(out.contains("at (0, 20) 48x14"), "{out}");
    }
}
