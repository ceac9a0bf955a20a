//! Dock engine abstraction
//!
//! A [`PanelEngine`] hosts the live widget tree and turns mutations into
//! tab events. The crate ships [`HeadlessEngine`], a pure in-memory
//! implementation for servers and tests; embedders wrap real toolkit
//! docks behind the same trait so the orchestrator in [`crate::docker`]
//! stays toolkit-agnostic.

pub(crate) mod headless;

pub use headless::HeadlessEngine;

use crate::ident::WidgetId;
use crate::layout::{LiveLayout, Orientation};
use crate::tabs::TabHandle;
use crate::widget::Widget;

/// Engine construction options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Whether tabs may be reordered after creation.
    pub tabs_movable: bool,
    /// Whether tab drags are constrained to the dock area.
    pub tabs_constrained: bool,
    /// Whether tab strips render an add button.
    pub add_button_enabled: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            tabs_movable: true,
            tabs_constrained: false,
            add_button_enabled: false,
        }
    }
}

/// Where a new widget lands relative to a reference widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InsertMode {
    /// Split the reference's tab area vertically, new widget above.
    SplitTop,
    /// Split horizontally, new widget to the left.
    SplitLeft,
    /// Split horizontally, new widget to the right.
    SplitRight,
    /// Split vertically, new widget below.
    SplitBottom,
    /// Insert as a sibling tab before the reference.
    TabBefore,
    /// Insert as a sibling tab after the reference.
    #[default]
    TabAfter,
}

impl InsertMode {
    /// The split orientation this mode produces, if it splits at all.
    #[must_use]
    pub const fn orientation(self) -> Option<Orientation> {
        match self {
            Self::SplitLeft | Self::SplitRight => Some(Orientation::Horizontal),
            Self::SplitTop | Self::SplitBottom => Some(Orientation::Vertical),
            Self::TabBefore | Self::TabAfter => None,
        }
    }

    /// True when the new widget lands after (right of, below) the
    /// reference.
    #[must_use]
    pub const fn is_after(self) -> bool {
        matches!(self, Self::SplitRight | Self::SplitBottom | Self::TabAfter)
    }
}

/// Placement for [`PanelEngine::add_widget`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddOptions {
    /// Placement mode.
    pub mode: InsertMode,
    /// Widget the placement is relative to. Without one, or when the
    /// reference is gone, the widget is appended to the last tab area.
    pub reference: Option<WidgetId>,
}

impl AddOptions {
    /// Placement with the given mode and no reference.
    #[must_use]
    pub fn new(mode: InsertMode) -> Self {
        Self {
            mode,
            reference: None,
        }
    }

    /// Sets the reference widget.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<WidgetId>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// Engine-side view identity of a tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabView {
    /// Id of the widget the tab fronts.
    pub id: WidgetId,
}

/// A tab surfaced by an engine event or a [`PanelEngine::tabs`] listing.
#[derive(Debug, Clone)]
pub struct TabNode {
    /// Shared mutable tab state: label, dirty flag, close affordance.
    pub tab: TabHandle,
    /// Whether the tab may be closed by the user.
    pub closable: bool,
    /// View identity.
    pub view: TabView,
    /// The widget id, when the engine still holds the widget. Removal
    /// events for already-surrendered widgets carry `None`.
    pub widget: Option<WidgetId>,
}

/// Tab lifecycle notification drained via [`PanelEngine::take_events`].
#[derive(Debug, Clone)]
pub enum TabEvent {
    /// A tab appeared: widget added or layout restored.
    Added(TabNode),
    /// A tab went away: widget removed or relocated.
    Removed(TabNode),
}

/// A dock engine hosting the live layout and reporting tab changes.
///
/// Engines are deliberately passive about persistence. They hold a
/// [`LiveLayout`] and mutate it; serialization and widget manufacture
/// live in [`crate::layout`] and [`crate::widget`], orchestrated by
/// [`crate::docker::Docker`].
pub trait PanelEngine {
    /// Builds an engine with the given options.
    fn create(options: EngineOptions) -> Self
    where
        Self: Sized;

    /// Inserts a widget. Without options it appends a tab to the last
    /// tab area.
    fn add_widget(&mut self, widget: Widget, options: Option<AddOptions>);

    /// Makes the widget's tab current in its tab area. Returns false for
    /// unknown widgets.
    fn activate_widget(&mut self, id: &WidgetId) -> bool;

    /// Processes pending engine work. Headless operation has none;
    /// toolkit engines flush geometry here.
    fn update(&mut self);

    /// Snapshot of the current live layout.
    fn save_layout(&self) -> LiveLayout;

    /// Replaces the live layout wholesale.
    fn restore_layout(&mut self, layout: LiveLayout);

    /// All widgets in layout (depth-first) order.
    fn widgets(&self) -> Vec<&Widget>;

    /// Looks up a widget by id.
    fn widget(&self, id: &WidgetId) -> Option<&Widget>;

    /// Removes a widget, returning it. Emptied areas collapse.
    fn remove_widget(&mut self, id: &WidgetId) -> Option<Widget>;

    /// Moves a widget to `target` within its tab area. Returns false
    /// when the widget is unknown or tabs are not movable.
    fn move_widget(&mut self, id: &WidgetId, target: usize) -> bool;

    /// Tab nodes for every widget, in layout order.
    fn tabs(&self) -> Vec<TabNode>;

    /// Drains queued tab events in emission order.
    fn take_events(&mut self) -> Vec<TabEvent>;

    /// Releases the engine. Idempotent; a disposed engine ignores
    /// further mutation.
    fn dispose(&mut self);

    /// Whether [`dispose`](Self::dispose) has run.
    fn is_disposed(&self) -> bool;
}
