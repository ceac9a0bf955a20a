//! In-memory dock engine
//!
//! [`HeadlessEngine`] implements [`PanelEngine`] with no toolkit behind
//! it: the layout tree is the whole truth. It backs every test in this
//! crate and is the engine of choice for server-side layout work
//! (validating persisted layouts, migrating them, computing stats).

use std::collections::HashMap;
use std::mem;

use tracing::{debug, warn};

use crate::ident::WidgetId;
use crate::layout::LiveLayout;
use crate::tabs::{Tab, TabHandle, tab_handle};
use crate::widget::Widget;

use super::{AddOptions, EngineOptions, PanelEngine, TabEvent, TabNode, TabView};

/// Dock engine with no rendering surface.
pub struct HeadlessEngine {
    options: EngineOptions,
    layout: LiveLayout,
    tabs: HashMap<WidgetId, TabHandle>,
    events: Vec<TabEvent>,
    disposed: bool,
}

impl Default for HeadlessEngine {
    fn default() -> Self {
        Self::create(EngineOptions::default())
    }
}

impl HeadlessEngine {
    /// The options this engine was created with.
    #[must_use]
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Removes `id` from the layout and queues the `Removed` event.
    /// Returns the surrendered widget.
    fn surrender(&mut self, id: &WidgetId) -> Option<Widget> {
        let widget = self.layout.remove_widget(id)?;
        let tab = self
            .tabs
            .remove(id)
            .unwrap_or_else(|| tab_handle(Tab::from_widget(&widget)));
        self.events.push(TabEvent::Removed(TabNode {
            tab,
            closable: widget.closable(),
            view: TabView { id: id.clone() },
            widget: None,
        }));
        Some(widget)
    }
}

impl PanelEngine for HeadlessEngine {
    fn create(options: EngineOptions) -> Self {
        Self {
            options,
            layout: LiveLayout::default(),
            tabs: HashMap::new(),
            events: Vec::new(),
            disposed: false,
        }
    }

    fn add_widget(&mut self, widget: Widget, options: Option<AddOptions>) {
        if self.disposed {
            warn!(id = %widget.id(), "widget added to a disposed engine; ignoring");
            return;
        }
        let id = widget.id().clone();
        if self.layout.contains(&id) {
            debug!(id = %id, "widget already present; relocating");
            drop(self.surrender(&id));
        }
        let tab = tab_handle(Tab::from_widget(&widget));
        let closable = widget.closable();
        let options = options.unwrap_or_default();
        let placed = match &options.reference {
            Some(reference) if self.layout.contains(reference) => {
                match options.mode.orientation() {
                    Some(orientation) => self.layout.split_around(
                        reference,
                        widget,
                        orientation,
                        options.mode.is_after(),
                    ),
                    None => self
                        .layout
                        .insert_relative(widget, reference, options.mode.is_after()),
                }
            }
            Some(reference) => {
                warn!(id = %id, %reference, "placement reference not in layout; appending");
                Err(widget)
            }
            None => Err(widget),
        };
        if let Err(widget) = placed {
            self.layout.append_tab(widget);
        }
        self.tabs.insert(id.clone(), tab.clone());
        self.events.push(TabEvent::Added(TabNode {
            tab,
            closable,
            view: TabView { id: id.clone() },
            widget: Some(id),
        }));
    }

    fn activate_widget(&mut self, id: &WidgetId) -> bool {
        self.layout.activate(id)
    }

    fn update(&mut self) {}

    fn save_layout(&self) -> LiveLayout {
        self.layout.clone()
    }

    fn restore_layout(&mut self, layout: LiveLayout) {
        if self.disposed {
            warn!("layout restored on a disposed engine; ignoring");
            return;
        }
        let layout = if layout.is_well_formed() {
            layout
        } else {
            warn!("restored layout violates structural invariants; normalizing");
            layout.normalized()
        };
        self.tabs.clear();
        self.events.clear();
        let added: Vec<(WidgetId, bool, Tab)> = layout
            .widgets()
            .into_iter()
            .map(|widget| {
                (
                    widget.id().clone(),
                    widget.closable(),
                    Tab::from_widget(widget),
                )
            })
            .collect();
        self.layout = layout;
        for (id, closable, tab) in added {
            let tab = tab_handle(tab);
            self.tabs.insert(id.clone(), tab.clone());
            self.events.push(TabEvent::Added(TabNode {
                tab,
                closable,
                view: TabView { id: id.clone() },
                widget: Some(id),
            }));
        }
        debug!(widgets = self.tabs.len(), "layout restored");
    }

    fn widgets(&self) -> Vec<&Widget> {
        self.layout.widgets()
    }

    fn widget(&self, id: &WidgetId) -> Option<&Widget> {
        self.layout.find_widget(id)
    }

    fn remove_widget(&mut self, id: &WidgetId) -> Option<Widget> {
        if self.disposed {
            return None;
        }
        let widget = self.surrender(id)?;
        debug!(id = %id, "widget removed");
        Some(widget)
    }

    fn move_widget(&mut self, id: &WidgetId, target: usize) -> bool {
        if self.disposed || !self.options.tabs_movable {
            return false;
        }
        self.layout.move_widget(id, target)
    }

    fn tabs(&self) -> Vec<TabNode> {
        self.layout
            .widgets()
            .into_iter()
            .filter_map(|widget| {
                let id = widget.id().clone();
                let tab = self.tabs.get(&id)?.clone();
                Some(TabNode {
                    tab,
                    closable: widget.closable(),
                    view: TabView { id: id.clone() },
                    widget: Some(id),
                })
            })
            .collect()
    }

    fn take_events(&mut self) -> Vec<TabEvent> {
        mem::take(&mut self.events)
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.layout = LiveLayout::default();
        self.tabs.clear();
        self.events.clear();
        debug!("engine disposed");
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}
