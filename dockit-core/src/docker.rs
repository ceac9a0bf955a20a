//! Dock orchestrator: factories, engine lifecycle and persistence
//!
//! [`Docker`] ties the crate together. It owns a [`FactoryRegistry`]
//! for widget manufacture, an optional engine for the live tree, the
//! per-instance [`TabRegistry`] and [`TabCloser`], and the host's tab
//! observers. Lifecycle runs `Unattached → Attached → Disposed`;
//! re-attaching after dispose starts over with a fresh engine, which is
//! how hosts tear a dock down and bring it back from a saved layout.
//!
//! ```
//! use dockit_core::docker::{Docker, DockerConfig};
//! use dockit_core::engine::HeadlessEngine;
//! use dockit_core::widget::{FactoryOutput, WidgetOptions};
//!
//! let config = DockerConfig::new()
//!     .with_widget("editor", |options| FactoryOutput::Options(options.clone()));
//! let mut dock = Docker::<HeadlessEngine>::new(config);
//! dock.attach();
//! let widget = dock.widget("editor", WidgetOptions::new().with_label("Notes"))?;
//! dock.add(widget, None)?;
//! assert_eq!(dock.save().widget_count(), 1);
//! # Ok::<(), dockit_core::error::DockError>(())
//! ```

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::engine::{AddOptions, EngineOptions, PanelEngine, TabEvent, TabNode};
use crate::error::{DockError, DockResult};
use crate::ident::WidgetId;
use crate::layout::{SerializedLayout, deserialize_layout, serialize_layout};
use crate::tabs::{
    ClickFn, CloseHandlers, CloseIcons, CloserContext, CloserSetup, TabCloser, TabRegistry,
};
use crate::widget::{FactoryOutput, FactoryRegistry, Widget, WidgetModel, WidgetOptions};

/// Lifecycle state of a [`Docker`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DockerState {
    /// Built but not attached; no engine exists yet.
    #[default]
    Unattached,
    /// Engine live; structural operations available.
    Attached,
    /// Torn down; a later [`Docker::attach`] starts over.
    Disposed,
}

/// Host observer for tab lifecycle notifications.
pub type TabObserver = Box<dyn Fn(&TabNode)>;

/// Build-time configuration for a [`Docker`].
pub struct DockerConfig {
    factories: FactoryRegistry,
    engine_options: EngineOptions,
    on_tab_added: Option<TabObserver>,
    on_tab_removed: Option<TabObserver>,
    closer_setup: Option<Box<CloserSetup>>,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DockerConfig {
    /// Empty configuration: no widget kinds, default engine options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: FactoryRegistry::new(),
            engine_options: EngineOptions::default(),
            on_tab_added: None,
            on_tab_removed: None,
            closer_setup: None,
        }
    }

    /// Registers a widget factory under a kind name.
    #[must_use]
    pub fn with_widget(
        mut self,
        kind: impl Into<String>,
        factory: impl Fn(&WidgetOptions) -> FactoryOutput + 'static,
    ) -> Self {
        self.factories.register(kind, factory);
        self
    }

    /// Registers lifecycle hooks for a kind.
    #[must_use]
    pub fn with_model(mut self, kind: impl Into<String>, model: WidgetModel) -> Self {
        self.factories.register_model(kind, model);
        self
    }

    /// Whether tabs may be reordered (default true).
    #[must_use]
    pub fn with_tabs_movable(mut self, movable: bool) -> Self {
        self.engine_options.tabs_movable = movable;
        self
    }

    /// Whether tab drags are constrained to the dock area (default false).
    #[must_use]
    pub fn with_tabs_constrained(mut self, constrained: bool) -> Self {
        self.engine_options.tabs_constrained = constrained;
        self
    }

    /// Whether tab strips render an add button (default false).
    #[must_use]
    pub fn with_add_button(mut self, enabled: bool) -> Self {
        self.engine_options.add_button_enabled = enabled;
        self
    }

    /// Observer for added tabs; runs after the close affordance is
    /// installed and the tab registered.
    #[must_use]
    pub fn with_on_tab_added(mut self, observer: impl Fn(&TabNode) + 'static) -> Self {
        self.on_tab_added = Some(Box::new(observer));
        self
    }

    /// Observer for removed tabs; runs before the registry entry drops.
    #[must_use]
    pub fn with_on_tab_removed(mut self, observer: impl Fn(&TabNode) + 'static) -> Self {
        self.on_tab_removed = Some(Box::new(observer));
        self
    }

    /// Hook run while each close affordance is installed; may supply
    /// custom click behavior (see [`TabCloser::install`]).
    #[must_use]
    pub fn with_closer_setup(
        mut self,
        setup: impl Fn(&CloserContext<'_>) -> Option<ClickFn> + 'static,
    ) -> Self {
        self.closer_setup = Some(Box::new(setup));
        self
    }
}

impl std::fmt::Debug for DockerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DockerConfig")
            .field("kinds", &self.factories.kinds())
            .field("engine_options", &self.engine_options)
            .finish_non_exhaustive()
    }
}

/// The dock orchestrator.
///
/// Generic over the engine so the same persistence and lifecycle logic
/// drives [`HeadlessEngine`](crate::engine::HeadlessEngine) in tests and
/// services, and toolkit adapters elsewhere.
pub struct Docker<E: PanelEngine> {
    factories: FactoryRegistry,
    engine_options: EngineOptions,
    engine: Option<E>,
    state: DockerState,
    registry: TabRegistry,
    closer: TabCloser,
    on_tab_added: Option<TabObserver>,
    on_tab_removed: Option<TabObserver>,
    closer_setup: Option<Box<CloserSetup>>,
}

impl<E: PanelEngine> Docker<E> {
    /// Builds an unattached docker from its configuration.
    #[must_use]
    pub fn new(config: DockerConfig) -> Self {
        Self {
            factories: config.factories,
            engine_options: config.engine_options,
            engine: None,
            state: DockerState::Unattached,
            registry: TabRegistry::new(),
            closer: TabCloser::new(),
            on_tab_added: config.on_tab_added,
            on_tab_removed: config.on_tab_removed,
            closer_setup: config.closer_setup,
        }
    }

    /// Creates the engine and enters `Attached`.
    ///
    /// Attaching an already attached (or disposed) docker replaces the
    /// engine and drops all tab state, starting over.
    pub fn attach(&mut self) -> &mut Self {
        self.engine = Some(E::create(self.engine_options));
        self.registry.clear();
        self.state = DockerState::Attached;
        debug!("docker attached");
        self
    }

    /// Manufactures a widget of a registered kind.
    ///
    /// Works in any lifecycle state; the widget is not added to the dock
    /// (see [`add`](Self::add)).
    ///
    /// # Errors
    ///
    /// [`DockError::UnknownKind`] when no factory is registered.
    pub fn widget(&self, kind: &str, options: WidgetOptions) -> DockResult<Widget> {
        self.factories.resolve(kind, options)
    }

    /// Adds a widget to the dock and delivers the resulting tab events.
    ///
    /// # Errors
    ///
    /// [`DockError::NotAttached`] when no engine is live.
    pub fn add(&mut self, widget: Widget, options: Option<AddOptions>) -> DockResult<()> {
        let Some(engine) = self.engine.as_mut() else {
            return Err(DockError::NotAttached);
        };
        engine.add_widget(widget, options);
        self.pump_events();
        Ok(())
    }

    /// Makes a widget's tab current. Tolerant: unknown ids and
    /// unattached states are a no-op.
    pub fn activate(&mut self, id: &WidgetId) -> &mut Self {
        if let Some(engine) = self.engine.as_mut() {
            if !engine.activate_widget(id) {
                debug!(id = %id, "activate ignored; widget not present");
            }
        }
        self
    }

    /// Lets the engine process pending work. No-op while unattached.
    pub fn update(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.update();
        }
    }

    /// Serializes the current layout; the canonical empty layout while
    /// no engine is live.
    #[must_use]
    pub fn save(&self) -> SerializedLayout {
        self.engine.as_ref().map_or_else(SerializedLayout::empty, |engine| {
            serialize_layout(&engine.save_layout())
        })
    }

    /// Serializes the current layout as 2-space-indented JSON.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` serialization failures.
    pub fn save_json(&self) -> DockResult<String> {
        Ok(self.save().to_json()?)
    }

    /// Rebuilds the dock from a serialized layout.
    ///
    /// Widgets are manufactured in depth-first order through the factory
    /// registry, the engine is (re)attached and restored, and one
    /// tab-added notification is delivered per widget. A failed load
    /// leaves the docker unchanged; widgets already manufactured are
    /// dropped (their `created` hooks have fired and are not
    /// compensated).
    ///
    /// # Errors
    ///
    /// [`DockError::UnknownKind`] for an unregistered kind in the
    /// layout.
    pub fn load(&mut self, layout: &SerializedLayout) -> DockResult<&mut Self> {
        let factories = &self.factories;
        let live = deserialize_layout(layout, |config| factories.resolve_config(config))?;
        self.attach();
        if let Some(engine) = self.engine.as_mut() {
            engine.restore_layout(live);
        }
        self.pump_events();
        debug!("layout loaded");
        Ok(self)
    }

    /// Parses serialized-layout JSON and loads it.
    ///
    /// # Errors
    ///
    /// Parse failures surface as [`DockError::Json`]; otherwise as
    /// [`load`](Self::load).
    pub fn load_json(&mut self, json: &str) -> DockResult<&mut Self> {
        let layout = SerializedLayout::from_json(json)?;
        self.load(&layout)
    }

    /// Saves the layout JSON to a file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Serialization and I/O failures.
    pub fn save_file(&self, path: impl AsRef<Path>) -> DockResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.save_json()?)?;
        debug!(path = %path.display(), "layout saved");
        Ok(())
    }

    /// Loads the layout from a JSON file.
    ///
    /// # Errors
    ///
    /// I/O, parse and unknown-kind failures.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> DockResult<&mut Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        debug!(path = %path.display(), "layout file read");
        self.load_json(&json)
    }

    /// Routes a close click on a widget's tab, removing the widget when
    /// the close handlers approve.
    ///
    /// Returns whether the widget was closed. Unknown ids, declined
    /// closes and non-attached states return false.
    pub fn close_tab(&mut self, id: &WidgetId) -> bool {
        if self.state != DockerState::Attached {
            return false;
        }
        if !self.closer.click(&self.registry, id) {
            return false;
        }
        if let Some(engine) = self.engine.as_mut() {
            engine.remove_widget(id);
        }
        self.pump_events();
        true
    }

    /// Sets a tab's dirty flag. Unknown ids are a silent no-op.
    pub fn set_dirty(&self, id: &WidgetId, dirty: bool) {
        self.closer.set_dirty(&self.registry, id, dirty);
    }

    /// Reads a tab's dirty flag; false for unknown ids.
    #[must_use]
    pub fn is_dirty(&self, id: &WidgetId) -> bool {
        self.closer.is_dirty(&self.registry, id)
    }

    /// Tears the dock down.
    ///
    /// Fires each remaining widget's `deleted` hook, releases the
    /// engine, clears the registry and enters `Disposed`. Idempotent.
    pub fn dispose(&mut self) -> &mut Self {
        if self.state == DockerState::Disposed {
            return self;
        }
        if let Some(engine) = self.engine.as_mut() {
            for widget in engine.widgets() {
                if let Some(deleted) = self
                    .factories
                    .model(widget.kind())
                    .and_then(|model| model.deleted.as_ref())
                {
                    deleted(widget);
                }
            }
            engine.dispose();
        }
        self.engine = None;
        self.registry.clear();
        self.state = DockerState::Disposed;
        debug!("docker disposed");
        self
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> DockerState {
        self.state
    }

    /// Whether the dock is unusable: no engine, or a disposed one.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.engine.as_ref().is_none_or(|engine| engine.is_disposed())
    }

    /// The live engine, when attached.
    #[must_use]
    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    /// Tab nodes for every widget in layout order; empty while
    /// unattached.
    #[must_use]
    pub fn nodes(&self) -> Vec<TabNode> {
        self.engine.as_ref().map_or_else(Vec::new, |engine| engine.tabs())
    }

    /// This dock's tab registry.
    #[must_use]
    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    /// Replaces the close glyph pair.
    pub fn set_close_icons(&mut self, icons: CloseIcons) {
        self.closer.set_icons(icons);
    }

    /// Replaces the close-click handlers.
    pub fn set_close_handlers(&mut self, handlers: CloseHandlers) {
        self.closer.set_handlers(handlers);
    }

    /// Drains engine events and delivers them through the observer
    /// chain. Added tabs: closer install (registration included), then
    /// the host observer. Removed tabs: host observer, then registry
    /// cleanup.
    fn pump_events(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        for event in engine.take_events() {
            match event {
                TabEvent::Added(node) => {
                    self.closer
                        .install(&mut self.registry, &node, self.closer_setup.as_deref());
                    if let Some(observer) = &self.on_tab_added {
                        observer(&node);
                    }
                }
                TabEvent::Removed(node) => {
                    if let Some(observer) = &self.on_tab_removed {
                        observer(&node);
                    }
                    self.registry.unregister(&node.view.id);
                }
            }
        }
    }
}

impl<E: PanelEngine> std::fmt::Debug for Docker<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Docker")
            .field("state", &self.state)
            .field("attached", &self.engine.is_some())
            .field("tabs", &self.registry.len())
            .finish_non_exhaustive()
    }
}
