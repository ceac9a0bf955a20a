//! Property-based tests for the layout codec
//!
//! The central law: rebuilding a layout through an echoing factory and
//! serializing it again preserves every widget id in depth-first order,
//! and one serialize pass normalizes the wire form into a fixed point.

use std::cell::RefCell;

use dockit_core::ident::WidgetId;
use dockit_core::layout::{
    LiveLayout, Orientation, SerializedLayout, SerializedNode, WidgetConfig, deserialize_layout,
    serialize_layout,
};
use dockit_core::widget::{FactoryOutput, FactoryRegistry, WidgetOptions};
use proptest::prelude::*;

const KINDS: [&str; 3] = ["editor", "viewer", "console"];

// ============================================================================
// Test Strategies
// ============================================================================

fn kind_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just("editor"), Just("viewer"), Just("console")].prop_map(str::to_string)
}

fn config_strategy() -> impl Strategy<Value = WidgetConfig> {
    (
        kind_strategy(),
        proptest::option::of("[a-z ]{1,12}"),
        proptest::option::of("[a-z-]{1,16}"),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(kind, label, icon, closable)| {
            // Ids are assigned after the tree is generated so they stay unique
            let mut config = WidgetConfig::new("pending", kind);
            config.label = label;
            config.icon = icon;
            config.closable = closable;
            config
        })
}

fn tab_area_strategy() -> impl Strategy<Value = SerializedNode> {
    proptest::collection::vec(config_strategy(), 1..4)
        .prop_flat_map(|widgets| {
            let len = widgets.len();
            (Just(widgets), 0..len)
        })
        .prop_map(|(widgets, current_index)| SerializedNode::TabArea {
            widgets,
            current_index,
        })
}

fn node_strategy() -> impl Strategy<Value = SerializedNode> {
    tab_area_strategy().prop_recursive(3, 24, 4, |inner| {
        (
            proptest::collection::vec(inner, 2..4),
            prop_oneof![Just(Orientation::Horizontal), Just(Orientation::Vertical)],
            0.1f64..4.0,
        )
            .prop_map(|(children, orientation, base)| {
                let sizes = (0..children.len()).map(|n| base + n as f64).collect();
                SerializedNode::SplitArea {
                    orientation,
                    sizes,
                    children,
                }
            })
    })
}

fn assign_unique_ids(node: &mut SerializedNode, counter: &mut usize) {
    match node {
        SerializedNode::TabArea { widgets, .. } => {
            for config in widgets {
                config.id = WidgetId::new(format!("w{counter}"));
                *counter += 1;
            }
        }
        SerializedNode::SplitArea { children, .. } => {
            for child in children {
                assign_unique_ids(child, counter);
            }
        }
    }
}

fn layout_strategy() -> impl Strategy<Value = SerializedLayout> {
    prop_oneof![
        1 => Just(SerializedLayout::empty()),
        6 => node_strategy().prop_map(|mut node| {
            let mut counter = 0;
            assign_unique_ids(&mut node, &mut counter);
            SerializedLayout { main: Some(node) }
        }),
    ]
}

// ============================================================================
// Helpers
// ============================================================================

fn echoing_registry() -> FactoryRegistry {
    let mut registry = FactoryRegistry::new();
    for kind in KINDS {
        registry.register(kind, |options: &WidgetOptions| {
            FactoryOutput::Options(options.clone())
        });
    }
    registry
}

fn rebuild(layout: &SerializedLayout) -> LiveLayout {
    let registry = echoing_registry();
    deserialize_layout(layout, |config| registry.resolve_config(config))
        .expect("every generated kind is registered")
}

fn ids_of(layout: &SerializedLayout) -> Vec<WidgetId> {
    layout
        .widget_configs()
        .iter()
        .map(|config| config.id.clone())
        .collect()
}

// ============================================================================
// Round-Trip Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every widget id survives a save/load cycle in depth-first order
    #[test]
    fn prop_round_trip_preserves_ids(layout in layout_strategy()) {
        let saved = serialize_layout(&rebuild(&layout));
        prop_assert_eq!(ids_of(&saved), ids_of(&layout), "ids must round-trip in order");
    }

    /// A single serialize pass normalizes the wire form into a fixed point
    #[test]
    fn prop_serialized_form_reaches_fixed_point(layout in layout_strategy()) {
        let first = serialize_layout(&rebuild(&layout));
        let second = serialize_layout(&rebuild(&first));
        prop_assert_eq!(second, first, "serialized form must be stable after one pass");
    }

    /// Live trees rebuilt from their own serialization compare equal
    #[test]
    fn prop_live_round_trip_identity(layout in layout_strategy()) {
        let live = rebuild(&layout);
        let reloaded = rebuild(&serialize_layout(&live));
        prop_assert_eq!(reloaded, live);
    }

    /// Widget count, depth and emptiness survive the round trip
    #[test]
    fn prop_round_trip_preserves_shape(layout in layout_strategy()) {
        let saved = serialize_layout(&rebuild(&layout));
        prop_assert_eq!(saved.widget_count(), layout.widget_count());
        prop_assert_eq!(saved.depth(), layout.depth());
        prop_assert_eq!(saved.is_empty(), layout.is_empty());
    }

    /// Factories are invoked once per widget, in depth-first tab order
    #[test]
    fn prop_factories_run_in_tab_order(layout in layout_strategy()) {
        let registry = echoing_registry();
        let calls = RefCell::new(Vec::new());
        let live = deserialize_layout(&layout, |config| {
            calls.borrow_mut().push(config.id.clone());
            registry.resolve_config(config)
        })
        .expect("all kinds registered");
        prop_assert_eq!(calls.into_inner(), ids_of(&layout));
        prop_assert_eq!(live.widget_count(), layout.widget_count());
    }

    /// The JSON text form round-trips the serialized tree exactly
    #[test]
    fn prop_json_round_trip(layout in layout_strategy()) {
        let saved = serialize_layout(&rebuild(&layout));
        let json = saved.to_json().expect("layout serializes to JSON");
        let parsed = SerializedLayout::from_json(&json).expect("emitted JSON parses back");
        prop_assert_eq!(parsed, saved);
    }

    /// An unregistered kind anywhere in the tree aborts the whole load
    #[test]
    fn prop_unknown_kind_aborts_the_load(layout in layout_strategy()) {
        let mut registry = FactoryRegistry::new();
        for kind in ["editor", "viewer"] {
            registry.register(kind, |options: &WidgetOptions| {
                FactoryOutput::Options(options.clone())
            });
        }
        let has_console = layout
            .widget_configs()
            .iter()
            .any(|config| config.kind == "console");
        let result = deserialize_layout(&layout, |config| registry.resolve_config(config));
        prop_assert_eq!(result.is_err(), has_console);
    }
}
