use log::trace;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

const EVENT_BUFFER: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned region; `contains` is inclusive of the top-left edge and exclusive of the
/// bottom-right one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        let dx = i64::from(point.x) - i64::from(self.x);
        let dy = i64::from(point.y) - i64::from(self.y);
        dx >= 0 && dy >= 0 && dx < i64::from(self.width) && dy < i64::from(self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerDown {
    pub position: Point,
}

/// Injected stand-in for the document-level event bus.
///
/// Observers subscribe for pointer-down events and stop receiving them as soon as their
/// receiver is dropped, so the observer count is always the number of live subscriptions.
#[derive(Debug, Clone)]
pub struct InteractionSource {
    tx: broadcast::Sender<PointerDown>,
}

impl InteractionSource {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_BUFFER);
        Self { tx }
    }

    /// Deliver a pointer-down to every live observer. Returns how many received it.
    pub fn pointer_down(&self, position: Point) -> usize {
        let delivered = self.tx.send(PointerDown { position }).unwrap_or(0);
        trace!("pointer-down at ({}, {}) -> {delivered} observers", position.x, position.y);
        delivered
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<PointerDown> {
        self.tx.subscribe()
    }
}

impl Default for InteractionSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let r = Rect::new(10, 5, 20, 4);
        assert!(r.contains(Point::new(10, 5)));
        assert!(r.contains(Point::new(29, 8)));
        assert!(!r.contains(Point::new(30, 8)));
        assert!(!r.contains(Point::new(29, 9)));
        assert!(!r.contains(Point::new(9, 5)));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        assert!(!Rect::new(0, 0, 0, 0).contains(Point::new(0, 0)));
    }

    #[test]
    fn delivery_counts_live_observers() {
        let source = InteractionSource::new();
        assert_eq!(source.pointer_down(Point::new(0, 0)), 0);

        let first = source.subscribe();
        let second = source.subscribe();
        assert_eq!(source.observer_count(), 2);
        assert_eq!(source.pointer_down(Point::new(1, 1)), 2);

        drop(first);
        drop(second);
        assert_eq!(source.observer_count(), 0);
    }
}
