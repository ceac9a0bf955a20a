//! Conversion between live layout trees and their serialized form

use tracing::debug;

use crate::error::DockResult;
use crate::layout::live::{LiveArea, LiveLayout, SplitArea, TabArea};
use crate::layout::wire::{SerializedLayout, SerializedNode, WidgetConfig};
use crate::widget::Widget;

/// Serializes a live layout into its JSON-safe description.
///
/// Pure: no widgets are created or disposed. Leaf widgets become fully
/// populated configs in physical tab order, splits keep orientation,
/// relative sizes and child order, and an empty layout maps to the
/// canonical `{"main":null}` form.
#[must_use]
pub fn serialize_layout(layout: &LiveLayout) -> SerializedLayout {
    SerializedLayout {
        main: layout.main.as_ref().map(serialize_area),
    }
}

fn serialize_area(area: &LiveArea) -> SerializedNode {
    match area {
        LiveArea::Tabs(tabs) => SerializedNode::TabArea {
            widgets: tabs.widgets.iter().map(widget_config).collect(),
            current_index: tabs.current_index,
        },
        LiveArea::Split(split) => SerializedNode::SplitArea {
            orientation: split.orientation,
            sizes: split.sizes.clone(),
            children: split.children.iter().map(serialize_area).collect(),
        },
    }
}

fn widget_config(widget: &Widget) -> WidgetConfig {
    WidgetConfig {
        id: widget.id().clone(),
        kind: widget.kind().to_string(),
        label: Some(widget.label().to_string()),
        icon: Some(widget.icon().to_string()),
        closable: Some(widget.closable()),
    }
}

/// Rebuilds a live layout from its serialized description.
///
/// `make_widget` runs exactly once per widget config, in depth-first,
/// left-to-right order — the order tabs appear on screen — so lifecycle
/// side effects observe creation in visual order. The first error aborts
/// the walk; widgets created before it are dropped with the partial tree.
/// Creation side effects that already ran (for example `created` hooks)
/// are not compensated.
///
/// Structure is preserved verbatim, including anything a stricter reader
/// would reject; repairing is the engine's business on restore.
///
/// # Errors
///
/// Propagates the first error from `make_widget`, typically
/// [`DockError::UnknownKind`](crate::error::DockError::UnknownKind).
pub fn deserialize_layout<F>(
    layout: &SerializedLayout,
    mut make_widget: F,
) -> DockResult<LiveLayout>
where
    F: FnMut(&WidgetConfig) -> DockResult<Widget>,
{
    let main = match &layout.main {
        Some(node) => Some(deserialize_node(node, &mut make_widget)?),
        None => None,
    };
    let live = LiveLayout { main };
    debug!(widgets = live.widget_count(), "layout deserialized");
    Ok(live)
}

fn deserialize_node<F>(node: &SerializedNode, make_widget: &mut F) -> DockResult<LiveArea>
where
    F: FnMut(&WidgetConfig) -> DockResult<Widget>,
{
    match node {
        SerializedNode::TabArea {
            widgets,
            current_index,
        } => {
            let mut members = Vec::with_capacity(widgets.len());
            for config in widgets {
                members.push(make_widget(config)?);
            }
            Ok(LiveArea::Tabs(TabArea::new(members, *current_index)))
        }
        SerializedNode::SplitArea {
            orientation,
            sizes,
            children,
        } => {
            let mut live = Vec::with_capacity(children.len());
            for child in children {
                live.push(deserialize_node(child, make_widget)?);
            }
            Ok(LiveArea::Split(SplitArea {
                orientation: *orientation,
                sizes: sizes.clone(),
                children: live,
            }))
        }
    }
}
