//! Widget values and creation options
//!
//! A widget is the unit of content hosted in the dock: a string identity,
//! display metadata for its tab, and a render callback producing content
//! markup. Widgets are normally created through a [`FactoryRegistry`],
//! which is the only place the `kind` field is stamped, so `kind` always
//! names the factory that produced the widget regardless of what the
//! factory itself claimed.

pub(crate) mod factory;

pub use factory::{FactoryOutput, FactoryRegistry, WidgetFactory, WidgetHook, WidgetModel};

use std::fmt;
use std::rc::Rc;

use crate::ident::{self, WidgetId};

/// Snapshot of a widget's metadata handed to its render callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    /// Widget identity.
    pub id: WidgetId,
    /// Tab label.
    pub label: String,
    /// Tab icon name.
    pub icon: String,
    /// Whether the widget's tab carries a close affordance.
    pub closable: bool,
    /// The kind the widget was created under.
    pub kind: String,
}

/// Render callback: produces the widget's content markup, or `None` when
/// the host renders the widget through other means.
pub type RenderFn = Rc<dyn Fn(&RenderContext) -> Option<String>>;

/// Placeholder content used when a widget supplies no renderer.
#[must_use]
pub fn default_render(ctx: &RenderContext) -> Option<String> {
    Some(format!(
        "<h2>{}</h2><button>Click me!</button><p>Status: <span class=\"status\">Idle</span></p>",
        ctx.label
    ))
}

/// Inputs for building a widget.
///
/// Every field is optional; [`Widget::new`] fills the gaps with the
/// documented defaults. The `kind` field is advisory only: the factory
/// layer overwrites it with the registry key it resolved.
#[derive(Clone, Default)]
pub struct WidgetOptions {
    /// Explicit id; generated from the default group when absent.
    pub id: Option<WidgetId>,
    /// Claimed kind; ignored whenever the factory layer is involved.
    pub kind: Option<String>,
    /// Tab label, defaults to empty.
    pub label: Option<String>,
    /// Tab icon name, defaults to empty.
    pub icon: Option<String>,
    /// Close affordance eligibility, defaults to true.
    pub closable: Option<bool>,
    /// Content renderer, defaults to [`default_render`].
    pub render: Option<RenderFn>,
}

impl WidgetOptions {
    /// Creates empty options (all defaults).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the widget id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<WidgetId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the claimed kind.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
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

    /// Sets whether the tab may carry a close affordance.
    #[must_use]
    pub fn with_closable(mut self, closable: bool) -> Self {
        self.closable = Some(closable);
        self
    }

    /// Sets the content renderer.
    #[must_use]
    pub fn with_render(
        mut self,
        render: impl Fn(&RenderContext) -> Option<String> + 'static,
    ) -> Self {
        self.render = Some(Rc::new(render));
        self
    }
}

impl fmt::Debug for WidgetOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetOptions")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("closable", &self.closable)
            .finish_non_exhaustive()
    }
}

/// A live widget instance hosted in the dock.
///
/// Equality and `Debug` cover the metadata only; render callbacks are not
/// compared.
#[derive(Clone)]
pub struct Widget {
    id: WidgetId,
    kind: String,
    label: String,
    icon: String,
    closable: bool,
    render: RenderFn,
}

impl Widget {
    /// Builds a widget from options.
    ///
    /// Defaults: a generated id (default group), empty label and icon,
    /// closable, placeholder renderer. The `kind` claim is carried as-is;
    /// widgets resolved through a [`FactoryRegistry`] have it overwritten
    /// with the actual registry key.
    #[must_use]
    pub fn new(options: WidgetOptions) -> Self {
        Self {
            id: options.id.unwrap_or_else(ident::next_widget_id),
            kind: options.kind.unwrap_or_default(),
            label: options.label.unwrap_or_default(),
            icon: options.icon.unwrap_or_default(),
            closable: options.closable.unwrap_or(true),
            render: options.render.unwrap_or_else(|| Rc::new(default_render)),
        }
    }

    /// The widget's identity.
    #[must_use]
    pub fn id(&self) -> &WidgetId {
        &self.id
    }

    /// The kind this widget was resolved under.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Tab label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Tab icon name.
    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Whether the widget's tab may carry a close affordance.
    #[must_use]
    pub fn closable(&self) -> bool {
        self.closable
    }

    /// Snapshot of the metadata as seen by render callbacks.
    #[must_use]
    pub fn render_context(&self) -> RenderContext {
        RenderContext {
            id: self.id.clone(),
            label: self.label.clone(),
            icon: self.icon.clone(),
            closable: self.closable,
            kind: self.kind.clone(),
        }
    }

    /// Runs the widget's renderer against its current metadata.
    #[must_use]
    pub fn render_content(&self) -> Option<String> {
        (self.render)(&self.render_context())
    }

    pub(crate) fn stamp_kind(&mut self, kind: &str) {
        self.kind = kind.to_string();
    }
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("closable", &self.closable)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Widget {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.kind == other.kind
            && self.label == other.label
            && self.icon == other.icon
            && self.closable == other.closable
    }
}

impl Eq for Widget {}
