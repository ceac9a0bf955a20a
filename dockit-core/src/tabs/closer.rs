//! Tab close affordances, dirty markers and close routing
//!
//! The closer turns raw tab-added notifications into closable tabs: it
//! installs the affordance (or a hidden placeholder on non-closable
//! tabs), indexes the tab in a [`TabRegistry`], and later routes close
//! clicks through host-configurable handlers that may confirm or decline.
//! Dirty tabs swap to a distinct glyph and a separate handler, which is
//! how hosts wire "unsaved changes" prompts.

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use crate::engine::TabNode;
use crate::ident::WidgetId;

use super::{IconStyle, TabHandle, TabRegistry};

/// The close-affordance state installed on a tab.
///
/// Presence of the affordance — even the hidden placeholder — marks the
/// tab as processed; installation is idempotent on that basis.
#[derive(Clone)]
pub struct CloseAffordance {
    /// False for the placeholder on non-closable tabs (spacing stays
    /// uniform, nothing to click).
    pub visible: bool,
    /// Current glyph (clean or dirty variant).
    pub glyph: IconStyle,
    /// Custom click behavior, when a closer setup supplied one.
    pub on_click: Option<ClickFn>,
}

impl std::fmt::Debug for CloseAffordance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloseAffordance")
            .field("visible", &self.visible)
            .field("glyph", &self.glyph)
            .field("custom_click", &self.on_click.is_some())
            .finish()
    }
}

/// Close glyph pair: the clean and dirty variants of the affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseIcons {
    /// Shown while the tab is clean.
    pub close: IconStyle,
    /// Shown while the tab is dirty.
    pub dirty: IconStyle,
}

impl Default for CloseIcons {
    fn default() -> Self {
        Self {
            close: IconStyle::new("×", "26px", "0"),
            dirty: IconStyle::new("●", "32px", "-2px"),
        }
    }
}

/// A close click in flight.
///
/// Handlers receive the request and either call [`close`](Self::close)
/// to let the tab close, or return without it to keep the tab open (for
/// example while a confirmation prompt is pending).
#[derive(Debug)]
pub struct CloseRequest {
    widget_id: WidgetId,
    accepted: Cell<bool>,
}

impl CloseRequest {
    pub(crate) fn new(widget_id: WidgetId) -> Self {
        Self {
            widget_id,
            accepted: Cell::new(false),
        }
    }

    /// The widget whose tab was clicked.
    #[must_use]
    pub fn widget_id(&self) -> &WidgetId {
        &self.widget_id
    }

    /// Approves the close.
    pub fn close(&self) {
        self.accepted.set(true);
    }

    /// Whether [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.accepted.get()
    }
}

/// Handler for close clicks.
pub type CloseHandler = Box<dyn Fn(&CloseRequest)>;

/// Custom per-tab click behavior returned by a closer setup.
pub type ClickFn = Rc<dyn Fn(&CloseRequest)>;

/// Close-click handlers, dispatched by the tab's dirty flag. Both
/// defaults approve the close immediately.
pub struct CloseHandlers {
    /// Runs for clean tabs.
    pub on_close: CloseHandler,
    /// Runs for dirty tabs.
    pub on_dirty_close: CloseHandler,
}

impl Default for CloseHandlers {
    fn default() -> Self {
        Self {
            on_close: Box::new(|request| request.close()),
            on_dirty_close: Box::new(|request| request.close()),
        }
    }
}

impl CloseHandlers {
    /// Sets the clean-tab handler.
    #[must_use]
    pub fn on_close(mut self, handler: impl Fn(&CloseRequest) + 'static) -> Self {
        self.on_close = Box::new(handler);
        self
    }

    /// Sets the dirty-tab handler.
    #[must_use]
    pub fn on_dirty_close(mut self, handler: impl Fn(&CloseRequest) + 'static) -> Self {
        self.on_dirty_close = Box::new(handler);
        self
    }
}

/// What a closer setup sees while an affordance is being installed.
pub struct CloserContext<'a> {
    closer: &'a TabCloser,
    tab: &'a TabHandle,
}

impl CloserContext<'_> {
    /// The tab being processed.
    #[must_use]
    pub fn tab(&self) -> TabHandle {
        self.tab.clone()
    }

    /// Reads the tab's dirty flag.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.tab.borrow().dirty
    }

    /// Sets the dirty flag; the glyph follows.
    pub fn set_dirty(&self, dirty: bool) {
        self.closer.apply_dirty(self.tab, dirty);
    }
}

/// Hook observing affordance installation. May return custom click
/// behavior for the tab, which then takes precedence over the default
/// dirty-dispatch.
pub type CloserSetup = dyn Fn(&CloserContext<'_>) -> Option<ClickFn>;

/// Installs and drives tab close affordances.
///
/// One closer per dock. It owns the glyph pair and the close handlers
/// and operates on tabs through a [`TabRegistry`] passed in by the
/// owner, so independent docks stay fully isolated.
pub struct TabCloser {
    icons: CloseIcons,
    handlers: CloseHandlers,
}

impl Default for TabCloser {
    fn default() -> Self {
        Self::new()
    }
}

impl TabCloser {
    /// Creates a closer with the default glyphs and approve-immediately
    /// handlers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            icons: CloseIcons::default(),
            handlers: CloseHandlers::default(),
        }
    }

    /// Replaces the glyph pair.
    pub fn set_icons(&mut self, icons: CloseIcons) {
        self.icons = icons;
    }

    /// The current glyph pair.
    #[must_use]
    pub fn icons(&self) -> &CloseIcons {
        &self.icons
    }

    /// Replaces the close handlers.
    pub fn set_handlers(&mut self, handlers: CloseHandlers) {
        self.handlers = handlers;
    }

    /// Processes a newly added tab.
    ///
    /// Idempotent: a tab that already carries an affordance is left
    /// untouched. Non-closable tabs get a hidden placeholder and are not
    /// registered. Closable tabs are registered under the view id (empty
    /// ids are skipped) and get the clean glyph; `setup` runs last and
    /// may install custom click behavior.
    pub fn install(&self, registry: &mut TabRegistry, node: &TabNode, setup: Option<&CloserSetup>) {
        if node.tab.borrow().close.is_some() {
            return;
        }
        if !node.closable {
            node.tab.borrow_mut().close = Some(CloseAffordance {
                visible: false,
                glyph: self.icons.close.clone(),
                on_click: None,
            });
            return;
        }
        let id = node.view.id.clone();
        if !id.is_empty() {
            registry.register(id.clone(), node.tab.clone());
        }
        let custom = setup.and_then(|setup| {
            setup(&CloserContext {
                closer: self,
                tab: &node.tab,
            })
        });
        let dirty = node.tab.borrow().dirty;
        let glyph = if dirty {
            self.icons.dirty.clone()
        } else {
            self.icons.close.clone()
        };
        node.tab.borrow_mut().close = Some(CloseAffordance {
            visible: true,
            glyph,
            on_click: custom,
        });
        debug!(id = %id, "close affordance installed");
    }

    /// Routes a close click on a widget's tab.
    ///
    /// Custom click behavior takes precedence when a setup installed it;
    /// otherwise the dirty flag picks `on_dirty_close` or `on_close`.
    /// Returns true when the handler approved the close. Unknown ids,
    /// affordance-less tabs and hidden placeholders are a no-op
    /// returning false.
    #[must_use]
    pub fn click(&self, registry: &TabRegistry, id: &WidgetId) -> bool {
        let Some(tab) = registry.get(id) else {
            return false;
        };
        let (custom, dirty) = {
            let tab = tab.borrow();
            match &tab.close {
                Some(close) if close.visible => (close.on_click.clone(), tab.dirty),
                _ => return false,
            }
        };
        let request = CloseRequest::new(id.clone());
        if let Some(custom) = custom {
            custom(&request);
        } else if dirty {
            (self.handlers.on_dirty_close)(&request);
        } else {
            (self.handlers.on_close)(&request);
        }
        debug!(id = %id, accepted = request.is_accepted(), "close click routed");
        request.is_accepted()
    }

    /// Sets a tab's dirty flag, swapping the glyph to match. Unknown ids
    /// are a silent no-op.
    pub fn set_dirty(&self, registry: &TabRegistry, id: &WidgetId, dirty: bool) {
        if let Some(tab) = registry.get(id) {
            self.apply_dirty(&tab, dirty);
        }
    }

    /// Reads a tab's dirty flag; false for unknown ids.
    #[must_use]
    pub fn is_dirty(&self, registry: &TabRegistry, id: &WidgetId) -> bool {
        registry.get(id).is_some_and(|tab| tab.borrow().dirty)
    }

    /// Drops a widget's registry entry. Unknown ids are a no-op. The
    /// orchestrator calls this on every tab removal; hosts driving a
    /// registry by hand must call it when a widget is disposed.
    pub fn unregister(registry: &mut TabRegistry, id: &WidgetId) {
        registry.unregister(id);
    }

    fn apply_dirty(&self, tab: &TabHandle, dirty: bool) {
        let mut tab = tab.borrow_mut();
        tab.dirty = dirty;
        let glyph = if dirty {
            self.icons.dirty.clone()
        } else {
            self.icons.close.clone()
        };
        if let Some(close) = &mut tab.close {
            close.glyph = glyph;
        }
    }
}
