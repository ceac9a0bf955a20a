//! Widget factories, lifecycle hooks and the kind registry
//!
//! Hosts declare widget **kinds**: a name mapped to a factory that builds
//! instances, plus optional lifecycle hooks. Resolution normalizes
//! whatever a factory returns into a [`Widget`], stamps its `kind` with
//! the registry key, and fires the kind's `created` hook — so downstream
//! code (serialization, disposal) can always trust `Widget::kind`.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{DockError, DockResult};
use crate::layout::wire::WidgetConfig;

use super::{Widget, WidgetOptions};

/// What a widget factory may return.
pub enum FactoryOutput {
    /// A finished widget, used as-is (apart from the kind stamp).
    Ready(Widget),
    /// Options for the registry to finish with the defaulting rules.
    Options(WidgetOptions),
}

/// Builds widget instances for one registered kind.
pub type WidgetFactory = Box<dyn Fn(&WidgetOptions) -> FactoryOutput>;

/// Lifecycle observer invoked with a widget reference.
pub type WidgetHook = Box<dyn Fn(&Widget)>;

/// Per-kind lifecycle hooks.
#[derive(Default)]
pub struct WidgetModel {
    /// Fires after each widget of the kind is resolved, kind already
    /// stamped.
    pub created: Option<WidgetHook>,
    /// Fires for each live widget of the kind when the hosting docker is
    /// disposed.
    pub deleted: Option<WidgetHook>,
}

impl WidgetModel {
    /// Creates a model with no hooks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the creation hook.
    #[must_use]
    pub fn on_created(mut self, hook: impl Fn(&Widget) + 'static) -> Self {
        self.created = Some(Box::new(hook));
        self
    }

    /// Sets the disposal hook.
    #[must_use]
    pub fn on_deleted(mut self, hook: impl Fn(&Widget) + 'static) -> Self {
        self.deleted = Some(Box::new(hook));
        self
    }
}

/// Registry of widget kinds: factories plus lifecycle hooks.
#[derive(Default)]
pub struct FactoryRegistry {
    factories: HashMap<String, WidgetFactory>,
    models: HashMap<String, WidgetModel>,
}

impl FactoryRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory under a kind name, replacing any previous one.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        factory: impl Fn(&WidgetOptions) -> FactoryOutput + 'static,
    ) {
        self.factories.insert(kind.into(), Box::new(factory));
    }

    /// Registers lifecycle hooks for a kind.
    pub fn register_model(&mut self, kind: impl Into<String>, model: WidgetModel) {
        self.models.insert(kind.into(), model);
    }

    /// Whether a factory is registered under `kind`.
    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    /// Registered kind names, sorted.
    #[must_use]
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// The lifecycle hooks registered for a kind, if any.
    #[must_use]
    pub fn model(&self, kind: &str) -> Option<&WidgetModel> {
        self.models.get(kind)
    }

    /// Resolves a kind into a widget.
    ///
    /// The factory receives the options as given; its output is
    /// normalized ([`FactoryOutput::Options`] goes through the
    /// [`Widget::new`] defaults), the widget's kind is stamped with the
    /// lookup key no matter what the factory claimed, and the kind's
    /// `created` hook fires before the widget is returned.
    ///
    /// # Errors
    ///
    /// [`DockError::UnknownKind`] when no factory is registered under
    /// `kind`.
    pub fn resolve(&self, kind: &str, options: WidgetOptions) -> DockResult<Widget> {
        let factory = self
            .factories
            .get(kind)
            .ok_or_else(|| DockError::UnknownKind(kind.to_string()))?;
        let mut widget = match factory(&options) {
            FactoryOutput::Ready(widget) => widget,
            FactoryOutput::Options(options) => Widget::new(options),
        };
        widget.stamp_kind(kind);
        if let Some(created) = self.models.get(kind).and_then(|m| m.created.as_ref()) {
            created(&widget);
        }
        debug!(kind, id = %widget.id(), "widget resolved");
        Ok(widget)
    }

    /// Deserialize-side entry: resolves a saved config.
    ///
    /// The config's kind is the lookup key and is not forwarded in the
    /// options; its id, label, icon and closable flag are, so echoing
    /// factories preserve identity through a round trip.
    ///
    /// # Errors
    ///
    /// Same as [`resolve`](Self::resolve).
    pub fn resolve_config(&self, config: &WidgetConfig) -> DockResult<Widget> {
        self.resolve(&config.kind, WidgetOptions::from(config))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn echo_registry() -> FactoryRegistry {
        let mut registry = FactoryRegistry::new();
        registry.register("editor", |options| FactoryOutput::Options(options.clone()));
        registry
    }

    #[test]
    fn resolve_unknown_kind_fails_loudly() {
        let registry = FactoryRegistry::new();
        let err = registry
            .resolve("mystery", WidgetOptions::new())
            .unwrap_err();
        assert!(matches!(err, DockError::UnknownKind(kind) if kind == "mystery"));
    }

    #[test]
    fn resolve_stamps_kind_over_factory_claim() {
        let mut registry = FactoryRegistry::new();
        registry.register("editor", |_| {
            FactoryOutput::Ready(Widget::new(WidgetOptions::new().with_kind("impostor")))
        });
        let widget = registry.resolve("editor", WidgetOptions::new()).unwrap();
        assert_eq!(widget.kind(), "editor");
    }

    #[test]
    fn resolve_options_applies_defaults() {
        let registry = echo_registry();
        let widget = registry.resolve("editor", WidgetOptions::new()).unwrap();
        assert_eq!(widget.kind(), "editor");
        assert!(widget.closable());
        assert!(widget.id().as_str().starts_with("widget-main-"));
    }

    #[test]
    fn created_hook_sees_stamped_kind() {
        let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let mut registry = echo_registry();
        registry.register_model(
            "editor",
            WidgetModel::new().on_created(move |widget| {
                log.borrow_mut().push(widget.kind().to_string());
            }),
        );
        registry.resolve("editor", WidgetOptions::new()).unwrap();
        assert_eq!(seen.borrow().as_slice(), ["editor"]);
    }

    #[test]
    fn resolve_config_preserves_identity() {
        let registry = echo_registry();
        let config = WidgetConfig::new("file-1", "editor")
            .with_label("main.rs")
            .with_closable(false);
        let widget = registry.resolve_config(&config).unwrap();
        assert_eq!(widget.id().as_str(), "file-1");
        assert_eq!(widget.label(), "main.rs");
        assert!(!widget.closable());
        assert_eq!(widget.kind(), "editor");
    }

    #[test]
    fn resolve_config_does_not_forward_kind_claim() {
        let claimed: Rc<RefCell<Option<Option<String>>>> = Rc::new(RefCell::new(None));
        let probe = claimed.clone();
        let mut registry = FactoryRegistry::new();
        registry.register("editor", move |options| {
            *probe.borrow_mut() = Some(options.kind.clone());
            FactoryOutput::Options(options.clone())
        });
        registry
            .resolve_config(&WidgetConfig::new("w", "editor"))
            .unwrap();
        assert_eq!(*claimed.borrow(), Some(None));
    }

    #[test]
    fn kinds_are_sorted() {
        let mut registry = echo_registry();
        registry.register("browser", |options| FactoryOutput::Options(options.clone()));
        assert_eq!(registry.kinds(), ["browser", "editor"]);
        assert!(registry.contains("browser"));
        assert!(!registry.contains("terminal"));
    }
}
