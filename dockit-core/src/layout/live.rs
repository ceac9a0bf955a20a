//! Live layout tree
//!
//! The engine-native form of a layout: tab areas own their widgets, split
//! areas divide space among ordered children by relative weight. The
//! order of [`TabArea::widgets`] *is* the physical left-to-right tab
//! order. Structural edits maintain two invariants: an emptied tab area
//! never survives the edit that emptied it, and a split never keeps a
//! single child (it collapses into that child).

use crate::ident::WidgetId;
use crate::layout::wire::Orientation;
use crate::widget::Widget;

/// A tab group: widgets sharing one tab strip, one of them active.
#[derive(Debug, Clone, PartialEq)]
pub struct TabArea {
    /// Member widgets in physical tab order.
    pub widgets: Vec<Widget>,
    /// Index of the active widget. Every edit keeps it addressing a
    /// member while the area is non-empty.
    pub current_index: usize,
}

impl TabArea {
    /// Creates a tab area from members and an active index.
    #[must_use]
    pub fn new(widgets: Vec<Widget>, current_index: usize) -> Self {
        Self {
            widgets,
            current_index,
        }
    }

    /// Creates a tab area holding a single widget.
    #[must_use]
    pub fn single(widget: Widget) -> Self {
        Self {
            widgets: vec![widget],
            current_index: 0,
        }
    }

    /// Position of a widget in the tab order.
    #[must_use]
    pub fn position(&self, id: &WidgetId) -> Option<usize> {
        self.widgets.iter().position(|w| w.id() == id)
    }

    /// The active widget, if the area has members.
    #[must_use]
    pub fn active_widget(&self) -> Option<&Widget> {
        self.widgets.get(self.current_index)
    }

    /// Moves a member to a new tab position (clamped to the strip).
    /// The active *widget* is preserved: the index follows it. Returns
    /// false when `id` is not a member.
    pub fn move_widget(&mut self, id: &WidgetId, to_index: usize) -> bool {
        let Some(from) = self.position(id) else {
            return false;
        };
        let to = to_index.min(self.widgets.len().saturating_sub(1));
        if from != to {
            let active = self.widgets.get(self.current_index).map(|w| w.id().clone());
            let widget = self.widgets.remove(from);
            self.widgets.insert(to, widget);
            if let Some(active) = active {
                if let Some(position) = self.position(&active) {
                    self.current_index = position;
                }
            }
        }
        true
    }
}

/// A split container dividing space among ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitArea {
    /// Layout orientation of the children.
    pub orientation: Orientation,
    /// Relative size weights, parallel to `children`.
    pub sizes: Vec<f64>,
    /// Child areas.
    pub children: Vec<LiveArea>,
}

/// Result of removing a widget from a subtree.
#[derive(Debug)]
pub enum RemoveOutcome {
    /// The widget is not in this subtree.
    NotFound,
    /// Removed; the subtree remains valid.
    Removed(Widget),
    /// Removed and the subtree is now empty; the parent must drop it.
    Emptied(Widget),
}

/// One node of the live tree.
#[derive(Debug, Clone, PartialEq)]
pub enum LiveArea {
    /// Leaf: a tab group owning widgets.
    Tabs(TabArea),
    /// Interior: a split of child areas.
    Split(SplitArea),
}

impl LiveArea {
    /// Whether a widget lives in this subtree.
    #[must_use]
    pub fn contains(&self, id: &WidgetId) -> bool {
        self.find_widget(id).is_some()
    }

    /// Looks up a widget in this subtree.
    #[must_use]
    pub fn find_widget(&self, id: &WidgetId) -> Option<&Widget> {
        match self {
            Self::Tabs(tabs) => tabs.widgets.iter().find(|w| w.id() == id),
            Self::Split(split) => split.children.iter().find_map(|c| c.find_widget(id)),
        }
    }

    /// All widgets in depth-first, left-to-right order.
    #[must_use]
    pub fn widgets(&self) -> Vec<&Widget> {
        let mut out = Vec::new();
        self.collect_widgets(&mut out);
        out
    }

    fn collect_widgets<'a>(&'a self, out: &mut Vec<&'a Widget>) {
        match self {
            Self::Tabs(tabs) => out.extend(tabs.widgets.iter()),
            Self::Split(split) => {
                for child in &split.children {
                    child.collect_widgets(out);
                }
            }
        }
    }

    /// Number of widgets in this subtree.
    #[must_use]
    pub fn widget_count(&self) -> usize {
        match self {
            Self::Tabs(tabs) => tabs.widgets.len(),
            Self::Split(split) => split.children.iter().map(LiveArea::widget_count).sum(),
        }
    }

    /// Nesting depth (a lone tab area is 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Tabs(_) => 1,
            Self::Split(split) => {
                1 + split.children.iter().map(LiveArea::depth).max().unwrap_or(0)
            }
        }
    }

    /// Makes a widget the active tab of its area. Returns false when the
    /// id is not in this subtree.
    pub fn activate(&mut self, id: &WidgetId) -> bool {
        match self {
            Self::Tabs(tabs) => {
                if let Some(position) = tabs.position(id) {
                    tabs.current_index = position;
                    true
                } else {
                    false
                }
            }
            Self::Split(split) => split.children.iter_mut().any(|c| c.activate(id)),
        }
    }

    /// Moves a widget within its tab area. Returns false when the id is
    /// not in this subtree.
    pub fn move_widget(&mut self, id: &WidgetId, to_index: usize) -> bool {
        match self {
            Self::Tabs(tabs) => tabs.move_widget(id, to_index),
            Self::Split(split) => split
                .children
                .iter_mut()
                .any(|c| c.move_widget(id, to_index)),
        }
    }

    /// Inserts a widget into the tab area holding `reference`, directly
    /// before or after it. The reference's area keeps its active widget.
    ///
    /// # Errors
    ///
    /// Gives the widget back when `reference` is not in this subtree.
    pub fn insert_relative(
        &mut self,
        widget: Widget,
        reference: &WidgetId,
        after: bool,
    ) -> Result<(), Widget> {
        match self {
            Self::Tabs(tabs) => {
                let Some(position) = tabs.position(reference) else {
                    return Err(widget);
                };
                let at = if after { position + 1 } else { position };
                tabs.widgets.insert(at, widget);
                if at <= tabs.current_index {
                    tabs.current_index += 1;
                }
                Ok(())
            }
            Self::Split(split) => {
                let mut widget = widget;
                for child in &mut split.children {
                    match child.insert_relative(widget, reference, after) {
                        Ok(()) => return Ok(()),
                        Err(back) => widget = back,
                    }
                }
                Err(widget)
            }
        }
    }

    /// Splits the area holding `reference`, placing `widget` in a new
    /// sibling tab area along `orientation` (after or before the
    /// reference area). When the reference area's parent split already
    /// runs in `orientation`, the new area joins it as a sibling and the
    /// reference's size share is halved; otherwise the reference area is
    /// wrapped in a fresh 50/50 split.
    ///
    /// # Errors
    ///
    /// Gives the widget back when `reference` is not in this subtree.
    pub fn split_around(
        &mut self,
        reference: &WidgetId,
        widget: Widget,
        orientation: Orientation,
        after: bool,
    ) -> Result<(), Widget> {
        match self {
            Self::Tabs(tabs) => {
                if tabs.position(reference).is_none() {
                    return Err(widget);
                }
                let old = std::mem::replace(self, Self::Tabs(TabArea::new(Vec::new(), 0)));
                let fresh = Self::Tabs(TabArea::single(widget));
                let children = if after {
                    vec![old, fresh]
                } else {
                    vec![fresh, old]
                };
                *self = Self::Split(SplitArea {
                    orientation,
                    sizes: vec![0.5, 0.5],
                    children,
                });
                Ok(())
            }
            Self::Split(split) => {
                let Some(position) = split.children.iter().position(|c| c.contains(reference))
                else {
                    return Err(widget);
                };
                let leaf_child = matches!(split.children[position], Self::Tabs(_));
                if leaf_child && split.orientation == orientation {
                    let share = split.sizes.get(position).copied().unwrap_or(0.5) / 2.0;
                    if let Some(size) = split.sizes.get_mut(position) {
                        *size = share;
                    }
                    let at = if after { position + 1 } else { position };
                    split.sizes.insert(at.min(split.sizes.len()), share);
                    split
                        .children
                        .insert(at, Self::Tabs(TabArea::single(widget)));
                    Ok(())
                } else {
                    split.children[position].split_around(reference, widget, orientation, after)
                }
            }
        }
    }

    /// Removes a widget, pruning an emptied area and collapsing any split
    /// left with one child.
    pub fn remove_widget(&mut self, id: &WidgetId) -> RemoveOutcome {
        match self {
            Self::Tabs(tabs) => {
                let Some(position) = tabs.position(id) else {
                    return RemoveOutcome::NotFound;
                };
                let widget = tabs.widgets.remove(position);
                if tabs.widgets.is_empty() {
                    return RemoveOutcome::Emptied(widget);
                }
                if position < tabs.current_index {
                    tabs.current_index -= 1;
                } else if tabs.current_index >= tabs.widgets.len() {
                    tabs.current_index = tabs.widgets.len() - 1;
                }
                RemoveOutcome::Removed(widget)
            }
            Self::Split(split) => {
                for position in 0..split.children.len() {
                    match split.children[position].remove_widget(id) {
                        RemoveOutcome::NotFound => {}
                        RemoveOutcome::Removed(widget) => return RemoveOutcome::Removed(widget),
                        RemoveOutcome::Emptied(widget) => {
                            split.children.remove(position);
                            if position < split.sizes.len() {
                                split.sizes.remove(position);
                            }
                            return match split.children.len() {
                                0 => RemoveOutcome::Emptied(widget),
                                1 => {
                                    // collapse into the surviving child
                                    let survivor = split.children.remove(0);
                                    *self = survivor;
                                    RemoveOutcome::Removed(widget)
                                }
                                _ => RemoveOutcome::Removed(widget),
                            };
                        }
                    }
                }
                RemoveOutcome::NotFound
            }
        }
    }

    /// The last (rightmost, bottom-most) tab area of this subtree, where
    /// reference-less additions land.
    pub fn last_tabs_mut(&mut self) -> Option<&mut TabArea> {
        match self {
            Self::Tabs(tabs) => Some(tabs),
            Self::Split(split) => split
                .children
                .last_mut()
                .and_then(LiveArea::last_tabs_mut),
        }
    }

    /// Repairs a subtree: drops empty tab areas, clamps active indexes,
    /// collapses childless and single-child splits, and replaces broken
    /// size lists (wrong length, negative or non-finite weights) with
    /// equal shares. Returns `None` when the subtree holds no widgets.
    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        match self {
            Self::Tabs(tabs) if tabs.widgets.is_empty() => None,
            Self::Tabs(mut tabs) => {
                tabs.current_index = tabs.current_index.min(tabs.widgets.len() - 1);
                Some(Self::Tabs(tabs))
            }
            Self::Split(split) => {
                let orientation = split.orientation;
                let count = split.children.len();
                let usable = split.sizes.len() == count
                    && split.sizes.iter().all(|s| s.is_finite() && *s >= 0.0);
                let sizes = if usable {
                    split.sizes
                } else {
                    vec![1.0; count]
                };
                let mut kept_children = Vec::new();
                let mut kept_sizes = Vec::new();
                for (child, size) in split.children.into_iter().zip(sizes) {
                    if let Some(child) = child.normalized() {
                        kept_children.push(child);
                        kept_sizes.push(size);
                    }
                }
                match kept_children.len() {
                    0 => None,
                    1 => kept_children.pop(),
                    _ => Some(Self::Split(SplitArea {
                        orientation,
                        sizes: kept_sizes,
                        children: kept_children,
                    })),
                }
            }
        }
    }

    /// Whether the subtree satisfies the structural invariants without
    /// repair.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        match self {
            Self::Tabs(tabs) => {
                !tabs.widgets.is_empty() && tabs.current_index < tabs.widgets.len()
            }
            Self::Split(split) => {
                split.children.len() >= 2
                    && split.sizes.len() == split.children.len()
                    && split.sizes.iter().all(|s| s.is_finite() && *s >= 0.0)
                    && split.children.iter().all(LiveArea::is_well_formed)
            }
        }
    }
}

/// A complete live layout (`None` root = empty dock).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LiveLayout {
    /// Root area, or `None` when the dock is empty.
    pub main: Option<LiveArea>,
}

impl LiveLayout {
    /// Returns true when no widgets are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.main.is_none()
    }

    /// Whether a widget lives in the layout.
    #[must_use]
    pub fn contains(&self, id: &WidgetId) -> bool {
        self.main.as_ref().is_some_and(|root| root.contains(id))
    }

    /// Looks up a widget.
    #[must_use]
    pub fn find_widget(&self, id: &WidgetId) -> Option<&Widget> {
        self.main.as_ref().and_then(|root| root.find_widget(id))
    }

    /// All widgets in depth-first, left-to-right order.
    #[must_use]
    pub fn widgets(&self) -> Vec<&Widget> {
        self.main.as_ref().map(LiveArea::widgets).unwrap_or_default()
    }

    /// All widget ids in depth-first, left-to-right order.
    #[must_use]
    pub fn widget_ids(&self) -> Vec<WidgetId> {
        self.widgets().iter().map(|w| w.id().clone()).collect()
    }

    /// Number of widgets.
    #[must_use]
    pub fn widget_count(&self) -> usize {
        self.main.as_ref().map_or(0, LiveArea::widget_count)
    }

    /// Nesting depth (0 when empty).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.main.as_ref().map_or(0, LiveArea::depth)
    }

    /// Makes a widget the active tab of its area. Returns false for
    /// unknown ids.
    pub fn activate(&mut self, id: &WidgetId) -> bool {
        self.main.as_mut().is_some_and(|root| root.activate(id))
    }

    /// Moves a widget within its tab area. Returns false for unknown ids.
    pub fn move_widget(&mut self, id: &WidgetId, to_index: usize) -> bool {
        self.main
            .as_mut()
            .is_some_and(|root| root.move_widget(id, to_index))
    }

    /// Appends a widget to the last tab area, creating the root area for
    /// an empty layout.
    pub fn append_tab(&mut self, widget: Widget) {
        if let Some(tabs) = self.main.as_mut().and_then(LiveArea::last_tabs_mut) {
            tabs.widgets.push(widget);
            return;
        }
        self.main = Some(LiveArea::Tabs(TabArea::single(widget)));
    }

    /// Inserts a widget next to `reference` in its tab area.
    ///
    /// # Errors
    ///
    /// Gives the widget back when `reference` is unknown.
    pub fn insert_relative(
        &mut self,
        widget: Widget,
        reference: &WidgetId,
        after: bool,
    ) -> Result<(), Widget> {
        match self.main.as_mut() {
            Some(root) => root.insert_relative(widget, reference, after),
            None => Err(widget),
        }
    }

    /// Splits the area holding `reference` along `orientation`, placing
    /// `widget` in the new sibling area.
    ///
    /// # Errors
    ///
    /// Gives the widget back when `reference` is unknown.
    pub fn split_around(
        &mut self,
        reference: &WidgetId,
        widget: Widget,
        orientation: Orientation,
        after: bool,
    ) -> Result<(), Widget> {
        match self.main.as_mut() {
            Some(root) => root.split_around(reference, widget, orientation, after),
            None => Err(widget),
        }
    }

    /// Removes a widget, returning it. Emptied areas are pruned and
    /// single-child splits collapse; removing the last widget empties the
    /// layout.
    pub fn remove_widget(&mut self, id: &WidgetId) -> Option<Widget> {
        let root = self.main.as_mut()?;
        match root.remove_widget(id) {
            RemoveOutcome::NotFound => None,
            RemoveOutcome::Removed(widget) => Some(widget),
            RemoveOutcome::Emptied(widget) => {
                self.main = None;
                Some(widget)
            }
        }
    }

    /// Repairs the layout (see [`LiveArea::normalized`]).
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            main: self.main.and_then(LiveArea::normalized),
        }
    }

    /// Whether the layout satisfies the structural invariants without
    /// repair.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.main.as_ref().is_none_or(LiveArea::is_well_formed)
    }
}
