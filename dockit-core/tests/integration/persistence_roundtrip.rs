//! Save/load round trips through the full public API

use std::cell::RefCell;
use std::rc::Rc;

use dockit_core::docker::{Docker, DockerConfig, DockerState};
use dockit_core::engine::{AddOptions, HeadlessEngine, InsertMode, PanelEngine};
use dockit_core::ident::WidgetId;
use dockit_core::tabs::CloseHandlers;
use dockit_core::widget::{FactoryOutput, Widget, WidgetModel, WidgetOptions};
use tempfile::TempDir;

/// A dock with an editor kind that echoes its options and a terminal
/// kind whose widgets are never closable.
fn dock_config() -> DockerConfig {
    DockerConfig::new()
        .with_widget("editor", |options| FactoryOutput::Options(options.clone()))
        .with_widget("terminal", |options| {
            FactoryOutput::Options(options.clone().with_closable(false))
        })
}

fn editor(dock: &Docker<HeadlessEngine>, id: &str, label: &str) -> Widget {
    dock.widget("editor", WidgetOptions::new().with_id(id).with_label(label))
        .expect("editor kind is registered")
}

#[test]
fn layout_survives_a_disk_round_trip() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("workspaces").join("default.json");

    let mut dock: Docker<HeadlessEngine> = Docker::new(dock_config());
    dock.attach();
    for id in ["notes", "todo", "scratch"] {
        let widget = editor(&dock, id, id);
        dock.add(widget, None).expect("attached dock accepts widgets");
    }
    let shell = dock
        .widget(
            "terminal",
            WidgetOptions::new().with_id("shell").with_label("Shell"),
        )
        .expect("terminal kind is registered");
    dock.add(
        shell,
        Some(AddOptions::new(InsertMode::SplitBottom).with_reference("todo")),
    )
    .expect("reference widget is present");
    dock.activate(&WidgetId::new("todo"));
    dock.save_file(&path).expect("layout writes, creating parent dirs");

    let mut revived: Docker<HeadlessEngine> = Docker::new(dock_config());
    revived.load_file(&path).expect("saved layout loads back");

    assert_eq!(revived.state(), DockerState::Attached);
    assert_eq!(revived.save(), dock.save());
    let engine = revived.engine().expect("attached docker has an engine");
    let shell = engine
        .widget(&WidgetId::new("shell"))
        .expect("terminal widget restored");
    assert_eq!(shell.kind(), "terminal");
    assert_eq!(shell.label(), "Shell");
    assert!(!shell.closable());
}

#[test]
fn empty_dock_round_trips_the_canonical_form() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("empty.json");

    let mut dock: Docker<HeadlessEngine> = Docker::new(dock_config());
    dock.attach();
    dock.save_file(&path).expect("empty layout writes");
    let written = std::fs::read_to_string(&path).expect("file exists");
    assert_eq!(written, "{\n  \"main\": null\n}");

    let mut revived: Docker<HeadlessEngine> = Docker::new(dock_config());
    revived.load_file(&path).expect("empty layout loads");
    assert!(revived.save().is_empty());
    assert!(revived.nodes().is_empty());
}

#[test]
fn dispose_then_reload_restores_the_dock() {
    let created: Rc<RefCell<Vec<String>>> = Rc::default();
    let deleted: Rc<RefCell<Vec<String>>> = Rc::default();
    let created_log = Rc::clone(&created);
    let deleted_log = Rc::clone(&deleted);
    let config = dock_config().with_model(
        "editor",
        WidgetModel::new()
            .on_created(move |widget| created_log.borrow_mut().push(widget.id().to_string()))
            .on_deleted(move |widget| deleted_log.borrow_mut().push(widget.id().to_string())),
    );

    let mut dock: Docker<HeadlessEngine> = Docker::new(config);
    dock.attach();
    let widget = editor(&dock, "draft", "Draft");
    dock.add(widget, None).expect("attached dock accepts widgets");
    let saved = dock.save();

    dock.dispose();
    assert!(dock.is_disposed());
    assert_eq!(&*deleted.borrow(), &["draft".to_string()]);

    dock.load(&saved).expect("disposed docker re-attaches on load");
    assert_eq!(dock.state(), DockerState::Attached);
    assert_eq!(dock.save(), saved);
    // manufacture hook fired once at creation and once at reload
    assert_eq!(
        &*created.borrow(),
        &["draft".to_string(), "draft".to_string()]
    );
}

#[test]
fn saved_json_uses_portable_wire_names() {
    let mut dock: Docker<HeadlessEngine> = Docker::new(dock_config());
    dock.attach();
    let widget = editor(&dock, "ed", "Editor");
    dock.add(widget, None).expect("attached dock accepts widgets");
    let shell = dock
        .widget(
            "terminal",
            WidgetOptions::new().with_id("sh").with_label("Shell"),
        )
        .expect("terminal kind is registered");
    dock.add(
        shell,
        Some(AddOptions::new(InsertMode::SplitRight).with_reference("ed")),
    )
    .expect("reference widget is present");

    let json = dock.save_json().expect("layout serializes");
    let value: serde_json::Value = serde_json::from_str(&json).expect("output is valid JSON");
    let main = &value["main"];
    assert_eq!(main["type"], "split-area");
    assert_eq!(main["orientation"], "horizontal");
    assert_eq!(main["sizes"][0], 0.5);
    assert_eq!(main["children"][0]["type"], "tab-area");
    assert_eq!(main["children"][0]["currentIndex"], 0);
    assert_eq!(main["children"][0]["widgets"][0]["id"], "ed");
    assert_eq!(main["children"][0]["widgets"][0]["kind"], "editor");
    assert_eq!(main["children"][1]["widgets"][0]["id"], "sh");
    assert_eq!(main["children"][1]["widgets"][0]["closable"], false);
}

#[test]
fn close_flow_respects_dirty_state_after_reload() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("session.json");

    let mut dock: Docker<HeadlessEngine> = Docker::new(dock_config());
    dock.attach();
    for id in ["left", "right"] {
        let widget = editor(&dock, id, id);
        dock.add(widget, None).expect("attached dock accepts widgets");
    }
    dock.save_file(&path).expect("layout writes");

    let decline_dirty =
        CloseHandlers::default().on_dirty_close(|_request| { /* keep unsaved work */ });
    let mut revived: Docker<HeadlessEngine> = Docker::new(dock_config());
    revived.set_close_handlers(decline_dirty);
    revived.load_file(&path).expect("saved layout loads");

    let left = WidgetId::new("left");
    revived.set_dirty(&left, true);
    assert!(revived.is_dirty(&left));
    assert!(!revived.close_tab(&left), "dirty tab must survive the close");
    assert_eq!(revived.nodes().len(), 2);

    revived.set_dirty(&left, false);
    assert!(revived.close_tab(&left), "clean tab closes");
    assert_eq!(revived.nodes().len(), 1);
    assert_eq!(revived.nodes()[0].view.id, WidgetId::new("right"));
}
