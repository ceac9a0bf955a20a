//! JSON-safe layout description
//!
//! The wire format is what hosts persist and ship between processes.
//! Field names stay camelCase on the wire and node types are tagged
//! (`"tab-area"` / `"split-area"`), so saved layouts remain portable
//! across hosts regardless of who wrote them. Parsing is lenient: only
//! JSON shape is enforced here, structural validation is the opt-in
//! business of [`inspect`](crate::layout::inspect).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ident::WidgetId;
use crate::widget::WidgetOptions;

/// Serializable description of one widget.
///
/// Kind names are data, never code: resolution back into a live widget
/// happens through the host's registered factories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Widget identity, preserved verbatim through save/load.
    pub id: WidgetId,
    /// Factory kind name.
    pub kind: String,
    /// Tab label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Tab icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Whether the tab carries a close affordance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closable: Option<bool>,
}

impl WidgetConfig {
    /// Creates a minimal config (metadata unset).
    #[must_use]
    pub fn new(id: impl Into<WidgetId>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            label: None,
            icon: None,
            closable: None,
        }
    }

    /// Sets the tab label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the tab icon name.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the close affordance flag.
    #[must_use]
    pub fn with_closable(mut self, closable: bool) -> Self {
        self.closable = Some(closable);
        self
    }
}

impl From<&WidgetConfig> for WidgetOptions {
    /// Factory options for a saved config. The kind is deliberately not
    /// carried over: it is the registry lookup key, and the resolver
    /// stamps it after normalization.
    fn from(config: &WidgetConfig) -> Self {
        Self {
            id: Some(config.id.clone()),
            kind: None,
            label: config.label.clone(),
            icon: config.icon.clone(),
            closable: config.closable,
            render: None,
        }
    }
}

/// Split orientation, serialized lowercase.
///
/// `Horizontal` lays children out side by side; `Vertical` stacks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Children arranged left to right.
    Horizontal,
    /// Children arranged top to bottom.
    Vertical,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "horizontal"),
            Self::Vertical => write!(f, "vertical"),
        }
    }
}

/// One node of the serialized layout tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SerializedNode {
    /// A tab group: widgets sharing one tab strip.
    #[serde(rename_all = "camelCase")]
    TabArea {
        /// Member configs in physical left-to-right tab order.
        widgets: Vec<WidgetConfig>,
        /// Index of the active (foreground) widget.
        #[serde(default)]
        current_index: usize,
    },
    /// A split container dividing space among ordered children.
    #[serde(rename_all = "camelCase")]
    SplitArea {
        /// Split orientation.
        orientation: Orientation,
        /// Relative size weights, parallel to `children`. Weights need
        /// not sum to anything in particular.
        sizes: Vec<f64>,
        /// Child nodes in layout order.
        children: Vec<SerializedNode>,
    },
}

impl SerializedNode {
    /// Widget configs contained in this subtree, depth-first and left to
    /// right — the order tabs appear on screen.
    #[must_use]
    pub fn widget_configs(&self) -> Vec<&WidgetConfig> {
        let mut configs = Vec::new();
        self.collect_configs(&mut configs);
        configs
    }

    fn collect_configs<'a>(&'a self, out: &mut Vec<&'a WidgetConfig>) {
        match self {
            Self::TabArea { widgets, .. } => out.extend(widgets.iter()),
            Self::SplitArea { children, .. } => {
                for child in children {
                    child.collect_configs(out);
                }
            }
        }
    }

    /// Number of widget configs in this subtree.
    #[must_use]
    pub fn widget_count(&self) -> usize {
        match self {
            Self::TabArea { widgets, .. } => widgets.len(),
            Self::SplitArea { children, .. } => {
                children.iter().map(SerializedNode::widget_count).sum()
            }
        }
    }

    /// Nesting depth of this subtree (a lone tab area is 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::TabArea { .. } => 1,
            Self::SplitArea { children, .. } => {
                1 + children.iter().map(SerializedNode::depth).max().unwrap_or(0)
            }
        }
    }
}

/// A complete saved layout.
///
/// The empty dock serializes to exactly `{"main":null}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SerializedLayout {
    /// Root of the layout tree, or `None` for an empty dock.
    pub main: Option<SerializedNode>,
}

impl SerializedLayout {
    /// The canonical empty layout.
    #[must_use]
    pub const fn empty() -> Self {
        Self { main: None }
    }

    /// Returns true when no widgets are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.main.is_none()
    }

    /// Widget configs in depth-first, left-to-right order.
    #[must_use]
    pub fn widget_configs(&self) -> Vec<&WidgetConfig> {
        self.main
            .as_ref()
            .map(SerializedNode::widget_configs)
            .unwrap_or_default()
    }

    /// Total widget configs.
    #[must_use]
    pub fn widget_count(&self) -> usize {
        self.main.as_ref().map_or(0, SerializedNode::widget_count)
    }

    /// Nesting depth (0 when empty).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.main.as_ref().map_or(0, SerializedNode::depth)
    }

    /// Encodes the layout as 2-space-indented JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error; not expected for
    /// layouts built by this crate.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a layout from JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error for malformed input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
