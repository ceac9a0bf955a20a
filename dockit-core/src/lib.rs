//! `Dockit` Core Library
//!
//! This crate provides the persistence and lifecycle layer for tabbed,
//! splittable dock layouts: named widget kinds manufactured through
//! factories, a live layout tree with a JSON-safe serialized form,
//! collision-resistant widget ids, per-tab dirty state and close
//! affordances, and an orchestrator that ties a dock engine to all of
//! the above.
//!
//! # Crate Structure
//!
//! - [`ident`] - Widget identity and collision-resistant id generation
//! - [`widget`] - Widget values, options and the factory registry
//! - [`layout`] - Live layout tree, serialized form, codec and inspection
//! - [`tabs`] - Tab model, per-dock registry and close affordances
//! - [`engine`] - The dock engine trait and the headless implementation
//! - [`docker`] - The orchestrator: lifecycle, persistence, observers
//! - [`error`] - Shared error type
//! - [`trace`] - Tracing subscriber setup

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod docker;
pub mod engine;
pub mod error;
pub mod ident;
pub mod layout;
pub mod tabs;
pub mod trace;
pub mod widget;

// =============================================================================
// Convenience re-exports
//
// Flat re-exports for binaries and tests. New code should prefer the
// modular paths (e.g. `dockit_core::layout::SerializedLayout`) over the
// flat namespace (`dockit_core::SerializedLayout`).
// =============================================================================

pub use docker::{Docker, DockerConfig, DockerState, TabObserver};
pub use engine::{
    AddOptions, EngineOptions, HeadlessEngine, InsertMode, PanelEngine, TabEvent, TabNode, TabView,
};
pub use error::{DockError, DockResult};
pub use ident::{DEFAULT_GROUP, ID_NAMESPACE, IdGenerator, WidgetId, next_widget_id};
pub use layout::{
    IssueKind, LayoutIssue, LayoutStats, LiveArea, LiveLayout, Orientation, RemoveOutcome,
    SerializedLayout, SerializedNode, SplitArea, TabArea, WidgetConfig, deserialize_layout,
    inspect, serialize_layout, stats,
};
pub use tabs::{
    ClickFn, CloseAffordance, CloseHandler, CloseHandlers, CloseIcons, CloseRequest, CloserContext,
    CloserSetup, IconStyle, Tab, TabCloser, TabHandle, TabRegistry, tab_handle,
};
pub use trace::{TraceError, TraceLevel, TraceResult, init_tracing, is_tracing_initialized};
pub use widget::{
    FactoryOutput, FactoryRegistry, RenderContext, RenderFn, Widget, WidgetFactory, WidgetHook,
    WidgetModel, WidgetOptions, default_render,
};
