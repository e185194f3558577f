use crate::{InteractionSource, PointerDown, Rect};
use log::debug;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};

/// An interaction the overlay must treat as landing outside its boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutsideHit {
    Pointer(PointerDown),
    /// The observer fell behind and this many events were dropped unseen
    Missed(u64),
}

/// Pointer-down observer that exists only while an overlay is open.
///
/// Arming subscribes to the interaction source once; arming again while armed is a no-op.
/// Disarming drops the subscription on the spot, so events dispatched after a close never
/// reach a closed overlay.
#[derive(Debug)]
pub struct OutsideDismissal {
    source: InteractionSource,
    observer: Option<broadcast::Receiver<PointerDown>>,
    installs: u64,
}

impl OutsideDismissal {
    #[must_use]
    pub fn new(source: InteractionSource) -> Self {
        Self {
            source,
            observer: None,
            installs: 0,
        }
    }

    /// Install the observer. Returns `true` only on the transition from disarmed to armed.
    pub fn arm(&mut self) -> bool {
        if self.observer.is_some() {
            return false;
        }
        self.observer = Some(self.source.subscribe());
        self.installs += 1;
        debug!("outside-dismissal observer installed (#{})", self.installs);
        true
    }

    /// Release the observer. Returns `true` if one was installed.
    pub fn disarm(&mut self) -> bool {
        if self.observer.take().is_some() {
            debug!("outside-dismissal observer released");
            return true;
        }
        false
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.observer.is_some()
    }

    /// Number of times an observer has been installed over this value's lifetime
    #[must_use]
    pub const fn install_count(&self) -> u64 {
        self.installs
    }

    /// Consume events already delivered and report whether any landed outside `boundary`.
    /// A missing boundary counts as outside, and so does a gap of dropped events.
    pub fn poll_outside(&mut self, boundary: Option<Rect>) -> Option<OutsideHit> {
        loop {
            let observer = self.observer.as_mut()?;
            match observer.try_recv() {
                Ok(event) if is_outside(boundary, event) => {
                    return Some(OutsideHit::Pointer(event));
                }
                Ok(_) => {}
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Lagged(skipped)) => {
                    debug!("outside-dismissal observer lagged by {skipped} events");
                    return Some(OutsideHit::Missed(skipped));
                }
                Err(TryRecvError::Closed) => {
                    self.observer = None;
                    return None;
                }
            }
        }
    }

    /// Wait for the next pointer-down outside `boundary`. Never resolves while disarmed.
    pub async fn next_outside(&mut self, boundary: Option<Rect>) -> OutsideHit {
        loop {
            let Some(observer) = self.observer.as_mut() else {
                return std::future::pending().await;
            };
            match observer.recv().await {
                Ok(event) if is_outside(boundary, event) => return OutsideHit::Pointer(event),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    debug!("outside-dismissal observer lagged by {skipped} events");
                    return OutsideHit::Missed(skipped);
                }
                Err(RecvError::Closed) => {
                    self.observer = None;
                }
            }
        }
    }
}

fn is_outside(boundary: Option<Rect>, event: PointerDown) -> bool {
    !boundary.is_some_and(|rect| rect.contains(event.position))
}
