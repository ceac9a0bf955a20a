//! Logical tab model and the per-dock tab registry
//!
//! Tabs are the UI-side identity of widgets: label, icon, dirty marker
//! and close affordance. They are shared as [`TabHandle`]s between the
//! engine, the registry and host callbacks (single-threaded `Rc` sharing).
//! The dirty flag lives here — not on the widget — so unsaved-changes
//! state stays out of widget values and serialized layouts.

pub(crate) mod closer;

pub use closer::{
    ClickFn, CloseAffordance, CloseHandler, CloseHandlers, CloseIcons, CloseRequest,
    CloserContext, CloserSetup, TabCloser,
};

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::ident::WidgetId;
use crate::widget::Widget;

/// Visual style of a close glyph. Data only; rendering belongs to the
/// host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconStyle {
    /// Glyph text.
    pub text: String,
    /// Font size, CSS units.
    pub font_size: String,
    /// Top margin nudge, CSS units.
    pub margin_top: String,
}

impl IconStyle {
    /// Creates a glyph style.
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        font_size: impl Into<String>,
        margin_top: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            font_size: font_size.into(),
            margin_top: margin_top.into(),
        }
    }
}

/// Logical state of one tab in a tab strip.
#[derive(Debug, Clone)]
pub struct Tab {
    /// Id of the widget the tab fronts.
    pub view_id: WidgetId,
    /// Tab label text.
    pub label: String,
    /// Tab icon name.
    pub icon: String,
    /// Whether the tab may carry a visible close affordance.
    pub closable: bool,
    /// Unsaved-changes marker.
    pub dirty: bool,
    /// Close affordance, present once the closer has processed the tab
    /// (hidden placeholder for non-closable tabs).
    pub close: Option<CloseAffordance>,
}

impl Tab {
    /// Builds the tab for a widget; no affordance installed yet.
    #[must_use]
    pub fn from_widget(widget: &Widget) -> Self {
        Self {
            view_id: widget.id().clone(),
            label: widget.label().to_string(),
            icon: widget.icon().to_string(),
            closable: widget.closable(),
            dirty: false,
            close: None,
        }
    }
}

/// Shared handle to a [`Tab`].
pub type TabHandle = Rc<RefCell<Tab>>;

/// Wraps a tab in a shared handle.
#[must_use]
pub fn tab_handle(tab: Tab) -> TabHandle {
    Rc::new(RefCell::new(tab))
}

/// Per-dock index from widget id to tab handle.
///
/// Each [`Docker`](crate::docker::Docker) owns its own registry, so
/// independent docks never observe each other's tabs; hosts driving a
/// [`TabCloser`] by hand own one too and pass it by reference.
#[derive(Debug, Default)]
pub struct TabRegistry {
    tabs: HashMap<WidgetId, TabHandle>,
}

impl TabRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tab under a widget id, replacing any previous entry.
    pub fn register(&mut self, id: WidgetId, tab: TabHandle) {
        self.tabs.insert(id, tab);
    }

    /// Removes an entry, returning its handle. Unknown ids are a no-op.
    pub fn unregister(&mut self, id: &WidgetId) -> Option<TabHandle> {
        self.tabs.remove(id)
    }

    /// Looks up a tab handle.
    #[must_use]
    pub fn get(&self, id: &WidgetId) -> Option<TabHandle> {
        self.tabs.get(id).cloned()
    }

    /// Whether an id is registered.
    #[must_use]
    pub fn contains(&self, id: &WidgetId) -> bool {
        self.tabs.contains_key(id)
    }

    /// Number of registered tabs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.tabs.clear();
    }

    /// Registered ids, sorted for deterministic iteration.
    #[must_use]
    pub fn ids(&self) -> Vec<WidgetId> {
        let mut ids: Vec<WidgetId> = self.tabs.keys().cloned().collect();
        ids.sort();
        ids
    }
}
