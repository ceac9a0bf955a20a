//! Property-based tests for headless engine mutations
//!
//! Random operation sequences must keep the live tree well formed at
//! every step: no empty tab areas, no single-child splits, size vectors
//! parallel to children, active indexes in range, ids unique.

use std::collections::HashSet;

use dockit_core::engine::{AddOptions, HeadlessEngine, InsertMode, PanelEngine};
use dockit_core::ident::WidgetId;
use dockit_core::layout::{deserialize_layout, serialize_layout};
use dockit_core::widget::{FactoryOutput, FactoryRegistry, Widget, WidgetOptions};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

// ============================================================================
// Test Strategies
// ============================================================================

/// One mutation step against the engine. Index fields are reduced modulo
/// the number of widgets present when the step runs.
#[derive(Debug, Clone)]
enum DockOperation {
    Add { mode: InsertMode, reference: Option<usize> },
    Remove { index: usize },
    Activate { index: usize },
    Move { index: usize, target: usize },
}

fn insert_mode_strategy() -> impl Strategy<Value = InsertMode> {
    prop_oneof![
        Just(InsertMode::SplitTop),
        Just(InsertMode::SplitLeft),
        Just(InsertMode::SplitRight),
        Just(InsertMode::SplitBottom),
        Just(InsertMode::TabBefore),
        Just(InsertMode::TabAfter),
    ]
}

fn operation_strategy() -> impl Strategy<Value = DockOperation> {
    prop_oneof![
        3 => (insert_mode_strategy(), proptest::option::of(0usize..12))
            .prop_map(|(mode, reference)| DockOperation::Add { mode, reference }),
        1 => (0usize..12).prop_map(|index| DockOperation::Remove { index }),
        1 => (0usize..12).prop_map(|index| DockOperation::Activate { index }),
        1 => (0usize..12, 0usize..12)
            .prop_map(|(index, target)| DockOperation::Move { index, target }),
    ]
}

fn operations_strategy(max_ops: usize) -> impl Strategy<Value = Vec<DockOperation>> {
    proptest::collection::vec(operation_strategy(), 0..=max_ops)
}

// ============================================================================
// Helpers
// ============================================================================

fn editor(id: &str) -> Widget {
    Widget::new(
        WidgetOptions::new()
            .with_id(id)
            .with_kind("editor")
            .with_label(id.to_uppercase()),
    )
}

fn present_ids(engine: &HeadlessEngine) -> Vec<WidgetId> {
    engine
        .widgets()
        .into_iter()
        .map(|widget| widget.id().clone())
        .collect()
}

fn apply_operation(engine: &mut HeadlessEngine, op: &DockOperation, next_id: &mut usize) {
    let ids = present_ids(engine);
    match op {
        DockOperation::Add { mode, reference } => {
            let id = format!("w{next_id}");
            *next_id += 1;
            let reference = reference
                .filter(|_| !ids.is_empty())
                .map(|index| ids[index % ids.len()].clone());
            let options =
                reference.map(|reference| AddOptions::new(*mode).with_reference(reference));
            engine.add_widget(editor(&id), options);
        }
        DockOperation::Remove { index } => {
            if !ids.is_empty() {
                engine.remove_widget(&ids[index % ids.len()]);
            }
        }
        DockOperation::Activate { index } => {
            if !ids.is_empty() {
                engine.activate_widget(&ids[index % ids.len()]);
            }
        }
        DockOperation::Move { index, target } => {
            if !ids.is_empty() {
                engine.move_widget(&ids[index % ids.len()], *target);
            }
        }
    }
}

fn check_tree(engine: &HeadlessEngine, expected: &HashSet<String>) -> Result<(), TestCaseError> {
    let layout = engine.save_layout();
    prop_assert!(layout.is_well_formed(), "layout lost well-formedness");
    let ids = present_ids(engine);
    prop_assert_eq!(ids.len(), expected.len(), "widget count diverged from model");
    let unique: HashSet<&WidgetId> = ids.iter().collect();
    prop_assert_eq!(unique.len(), ids.len(), "duplicate widget ids in tree");
    for id in &ids {
        prop_assert!(expected.contains(id.as_str()), "unexpected widget {}", id);
    }
    Ok(())
}

// ============================================================================
// Engine Invariant Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every prefix of an operation sequence leaves a well-formed tree
    #[test]
    fn prop_operation_sequences_preserve_invariants(ops in operations_strategy(40)) {
        let mut engine = HeadlessEngine::default();
        let mut next_id = 0usize;
        let mut expected: HashSet<String> = HashSet::new();
        for op in &ops {
            let before = present_ids(&engine);
            match op {
                DockOperation::Add { .. } => {
                    expected.insert(format!("w{next_id}"));
                }
                DockOperation::Remove { index } => {
                    if !before.is_empty() {
                        expected.remove(before[index % before.len()].as_str());
                    }
                }
                DockOperation::Activate { .. } | DockOperation::Move { .. } => {}
            }
            apply_operation(&mut engine, op, &mut next_id);
            check_tree(&engine, &expected)?;
        }
    }

    /// Removing every widget collapses the layout back to empty
    #[test]
    fn prop_removing_everything_empties_the_layout(ops in operations_strategy(25)) {
        let mut engine = HeadlessEngine::default();
        let mut next_id = 0usize;
        for op in &ops {
            apply_operation(&mut engine, op, &mut next_id);
        }
        for id in present_ids(&engine) {
            prop_assert!(engine.remove_widget(&id).is_some(), "listed widget must remove");
        }
        prop_assert!(engine.save_layout().is_empty());
        prop_assert!(engine.tabs().is_empty());
    }

    /// Whatever the engine builds survives the wire codec unchanged
    #[test]
    fn prop_engine_layouts_round_trip_through_codec(ops in operations_strategy(30)) {
        let mut engine = HeadlessEngine::default();
        let mut next_id = 0usize;
        for op in &ops {
            apply_operation(&mut engine, op, &mut next_id);
        }
        let live = engine.save_layout();
        let mut registry = FactoryRegistry::new();
        registry.register("editor", |options: &WidgetOptions| {
            FactoryOutput::Options(options.clone())
        });
        let reloaded =
            deserialize_layout(&serialize_layout(&live), |config| registry.resolve_config(config))
                .expect("editor factory covers every widget");
        prop_assert_eq!(reloaded, live);
    }

    /// The tab listing always mirrors the widget traversal
    #[test]
    fn prop_tab_listing_tracks_the_tree(ops in operations_strategy(30)) {
        let mut engine = HeadlessEngine::default();
        let mut next_id = 0usize;
        for op in &ops {
            apply_operation(&mut engine, op, &mut next_id);
        }
        let tab_ids: Vec<WidgetId> =
            engine.tabs().into_iter().map(|node| node.view.id).collect();
        prop_assert_eq!(tab_ids, present_ids(&engine));
    }
}
