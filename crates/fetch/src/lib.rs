//! # Holonet Fetch
//!
//! Remote collection and detail resolution with superseding semantics.
//!
//! ## Ordering
//!
//! ```text
//! issue(q1) ──> ticket #1 ──> task ──┐
//! issue(q2) ──> ticket #2 ──> task ──┤  (task #1 aborted)
//!                                    ▼
//!                          completion channel
//!                                    │
//!                 accept: ticket == latest issued ?
//!                        ├─ yes -> applied
//!                        └─ no  -> dropped (stale)
//! ```
//!
//! Fetch tasks never touch controller state; they only report completions. The owner of a
//! controller applies them by awaiting `next_resolution`, so results land in issue order no
//! matter which request finishes first.

mod collection;
mod detail;
mod endpoint;
mod error;
mod latest;
mod transport;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use collection::{CollectionEvent, CollectionFetchController};
pub use detail::{DetailEvent, DetailFetchController, OpenDetail};
pub use endpoint::CollectionEndpoint;
pub use error::{FetchError, Result};
pub use latest::FetchTicket;
pub use transport::{HttpTransport, Transport, TransportConfig};
