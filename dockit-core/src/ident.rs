//! Widget identity: string ids and collision-resistant generation
//!
//! Ids are plain strings so hosts can use meaningful names (`"file-1"`)
//! alongside generated ones. Generated ids mix a timestamp, random
//! entropy, a per-generator machine byte and a same-millisecond counter,
//! keeping collisions implausible without coordination even when several
//! processes contribute ids to the same saved layout.

use std::cell::Cell;
use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Namespace prefix carried by every generated id.
pub const ID_NAMESPACE: &str = "widget";

/// Group label used when widgets are created without an explicit id.
pub const DEFAULT_GROUP: &str = "main";

/// Unique identifier for a widget.
///
/// The id is the join key between live widgets, serialized configs and
/// tab registry entries, and is preserved verbatim through save/load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(String);

impl WidgetId {
    /// Creates an id from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the empty id, which engines use for tabs whose
    /// view cannot be identified. Empty ids are never registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for WidgetId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for WidgetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Generates collision-resistant widget identifiers.
///
/// Each id is built from the [`ID_NAMESPACE`] prefix, the generator's
/// group label, two blocks of random base-36 digits, and a hex section
/// packing the millisecond timestamp (12 digits), a machine byte fixed at
/// construction (2), a counter disambiguating ids minted within the same
/// millisecond (4, wraps at 2^16) and a random 16-bit tail (4).
///
/// Not cryptographically secure: this is an identity scheme, not a token
/// scheme.
///
/// # Example
///
/// ```
/// use dockit_core::ident::IdGenerator;
///
/// let ids = IdGenerator::new("code-editor");
/// let id = ids.generate();
/// assert!(id.as_str().starts_with("widget-code-editor-"));
/// ```
#[derive(Debug)]
pub struct IdGenerator {
    group: String,
    machine_id: u8,
    counter: Cell<u16>,
    last_stamp_ms: Cell<i64>,
}

impl IdGenerator {
    /// Creates a generator for the given group label. The machine byte is
    /// drawn once here and stays fixed for the generator's lifetime.
    #[must_use]
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            machine_id: Uuid::new_v4().as_bytes()[0],
            counter: Cell::new(0),
            last_stamp_ms: Cell::new(-1),
        }
    }

    /// Returns the group label baked into generated ids.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Generates the next identifier. Never fails; the counter advances
    /// within a millisecond and resets when the clock moves on.
    pub fn generate(&self) -> WidgetId {
        let now = Utc::now().timestamp_millis();
        let counter = if now == self.last_stamp_ms.get() {
            self.counter.get().wrapping_add(1)
        } else {
            0
        };
        self.counter.set(counter);
        self.last_stamp_ms.set(now);

        let entropy = Uuid::new_v4().as_u128();
        let block_a = to_base36((entropy >> 64) as u64);
        let block_b = to_base36(entropy as u64);
        let tail = (Uuid::new_v4().as_u128() & 0xffff) as u16;
        // 12 hex digits hold millisecond timestamps until the year 10889
        let stamp = (now.max(0) as u64) & 0xffff_ffff_ffff;

        WidgetId(format!(
            "{ID_NAMESPACE}-{}-{}{}-{stamp:012x}{:02x}{counter:04x}{tail:04x}",
            self.group, block_a, block_b, self.machine_id,
        ))
    }
}

thread_local! {
    static DEFAULT_IDS: IdGenerator = IdGenerator::new(DEFAULT_GROUP);
}

/// Generates an id from the shared default-group generator, used whenever
/// a widget is created without an explicit id.
#[must_use]
pub fn next_widget_id() -> WidgetId {
    DEFAULT_IDS.with(IdGenerator::generate)
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::with_capacity(13);
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
