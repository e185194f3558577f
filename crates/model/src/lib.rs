//! # Holonet Model
//!
//! Plain data shared by the fetch controllers and the collection views.
//!
//! ## Layout
//!
//! ```text
//! CollectionPage { results }
//!     │
//!     ├──> CollectionItem (name, url, inline fields)
//!     │      ├─> extract_id(url)      -> image address
//!     │      └─> DetailRecord          (inline activation)
//!     │
//!     └──> ResourceProfile (people | vehicles)
//!            └─> FieldRule[]           -> RenderedField[] (unknown values dropped)
//! ```
//!
//! ## Example
//!
//! ```
//! use holonet_model::{is_unknown_value, extract_id};
//!
//! assert!(is_unknown_value(Some("Unknown")));
//! assert!(!is_unknown_value(Some("0")));
//! assert_eq!(extract_id("https://swapi.dev/api/people/4/"), Some("4"));
//! ```

mod detail;
mod error;
mod ident;
mod item;
mod profile;
mod unknown;

pub use detail::{DetailRecord, RenderedField};
pub use error::{ModelError, Result};
pub use ident::{extract_id, image_address};
pub use item::{CollectionItem, CollectionPage};
pub use profile::{Activation, FieldRule, ResourceKind, ResourceProfile};
pub use unknown::{is_unknown_json, is_unknown_value, UNKNOWN_SENTINELS};
