//! Layout trees: the live form, the wire form and the codec between them
//!
//! A dock layout exists in two shapes. The **live** tree is what an engine
//! edits: tab areas owning widget instances, split areas dividing space by
//! relative weight. The **wire** tree is the JSON-safe description hosts
//! persist: widget configs (identity plus metadata, kinds as names), tab
//! areas with an active index, splits with sizes. The codec maps between
//! them; widget re-creation on the way in goes through host factories.
//!
//! # Module Structure
//!
//! - `live` - Engine-native tree and its structural operations
//! - `wire` - Serialized description (`{"main":null}` when empty)
//! - `codec` - `serialize_layout` / `deserialize_layout`
//! - `inspect` - Opt-in diagnosis of saved layouts
//!
//! # Example
//!
//! ```
//! use dockit_core::layout::{LiveLayout, SerializedLayout, serialize_layout};
//!
//! let layout = LiveLayout::default();
//! let saved = serialize_layout(&layout);
//! assert_eq!(saved, SerializedLayout::empty());
//! assert_eq!(saved.to_json().unwrap(), "{\n  \"main\": null\n}");
//! ```

pub(crate) mod codec;
pub(crate) mod inspect;
pub(crate) mod live;
pub(crate) mod wire;

pub use codec::{deserialize_layout, serialize_layout};
pub use inspect::{IssueKind, LayoutIssue, LayoutStats, inspect, stats};
pub use live::{LiveArea, LiveLayout, RemoveOutcome, SplitArea, TabArea};
pub use wire::{Orientation, SerializedLayout, SerializedNode, WidgetConfig};
