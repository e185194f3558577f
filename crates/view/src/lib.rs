//! # Holonet View
//!
//! One generic collection view, instantiated per resource and driven by a shared query.
//!
//! ## Lifecycle
//!
//! ```text
//! SearchCoordinator::set_query(q)
//!     │
//!     └──> CollectionView (people, vehicles, ...)
//!            ├─> list:    Idle -> Loading -> Loaded | Failed
//!            ├─> overlay: Closed -> DetailLoading -> Open | Closed
//!            └─> OutsideDismissal armed while Open
//!                   └─> pointer-down outside boundary -> dismiss()
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use holonet_fetch::{HttpTransport, TransportConfig};
//! use holonet_view::{InteractionSource, SearchCoordinator};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let transport = Arc::new(HttpTransport::new(&TransportConfig::default())?);
//!     let mut browser = SearchCoordinator::standard(
//!         "https://swapi.dev/api",
//!         None,
//!         transport,
//!         InteractionSource::new(),
//!     );
//!     browser.start();
//!     browser.set_query("sky");
//!     browser.settle().await;
//!
//!     for state in browser.states() {
//!         println!("{}: {} items", state.title, state.items.len());
//!     }
//!     Ok(())
//! }
//! ```

mod coordinator;
mod dismissal;
mod error;
mod interaction;
mod view;

pub use coordinator::SearchCoordinator;
pub use dismissal::{OutsideDismissal, OutsideHit};
pub use error::{Result, ViewError};
pub use interaction::{InteractionSource, Point, PointerDown, Rect};
pub use view::{
    CollectionView, DismissCause, ListPhase, OverlayPhase, Query, ViewChange, ViewState,
};
