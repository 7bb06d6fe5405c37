//! Edit column lifecycle and accessor tests
//!
//! Covers adding columns with each editor type, keys, removal, handler
//! replacement and the synchronized editor properties.

use std::rc::Rc;

use gridpro::column::{EditColumnConfigurator, EditHandler, EditorConfig, EditorType};
use gridpro::commands::SurfaceCmd;
use gridpro::config::{EditorDefaults, GridConfig};
use gridpro::error::{ConfigError, GridError};
use gridpro::model::GridPro;
use gridpro::EditColumn;
use serde_json::json;

struct TextGrid {
    grid: GridPro<String>,
    text: EditColumn,
    checkbox: EditColumn,
    select: EditColumn,
}

fn noop(_: &String, _: &str) {}

fn text_grid() -> TextGrid {
    let mut grid = GridPro::new();
    let text = grid
        .add_edit_column(|s: &String| s.clone(), EditColumnConfigurator::text(noop))
        .unwrap();
    let checkbox = grid
        .add_edit_column(|s: &String| s.clone(), EditColumnConfigurator::checkbox(noop))
        .unwrap();
    let select = grid
        .add_edit_column(
            |s: &String| s.clone(),
            EditColumnConfigurator::select(noop, ["foo", "bar", "baz"]).unwrap(),
        )
        .unwrap();
    grid.take_commands();
    TextGrid {
        grid,
        text,
        checkbox,
        select,
    }
}

// ========================================================================
// Adding columns
// ========================================================================

#[test]
fn test_add_edit_column_returns_distinct_handles() {
    let t = text_grid();

    assert_ne!(t.text, t.checkbox);
    assert_ne!(t.checkbox, t.select);
    assert_eq!(t.grid.column_count(), 3);
    assert_eq!(t.text.internal_id(), "col0");
    assert_eq!(t.select.internal_id(), "col2");
}

#[test]
fn test_generated_column_path_is_internal_id() {
    let t = text_grid();
    let view = t.grid.column(&t.checkbox).unwrap();
    assert_eq!(view.path(), "col1");
    assert_eq!(t.grid.column_by_path("col1"), Some(t.checkbox));
}

#[test]
fn test_initial_editor_properties() {
    let t = text_grid();

    let text = t.grid.column(&t.text).unwrap();
    assert_eq!(text.editor_type(), EditorType::Text);
    assert!(text.options().is_empty());

    let checkbox = t.grid.column(&t.checkbox).unwrap();
    assert_eq!(checkbox.editor_type().type_name(), "checkbox");

    let select = t.grid.column(&t.select).unwrap();
    assert_eq!(select.editor_type(), EditorType::Select);
    assert_eq!(select.options(), vec!["foo", "bar", "baz"]);
    assert!(!select.allow_enter_row_change());
    assert!(!select.preserve_edit_mode());
}

#[test]
fn test_value_provider_reads_item() {
    let t = text_grid();
    let view = t.grid.column(&t.text).unwrap();
    assert_eq!(view.value(&"Ann".to_string()).as_deref(), Some("Ann"));
}

#[test]
fn test_select_requires_options() {
    let result = EditColumnConfigurator::<String>::select(noop, Vec::<String>::new());
    assert_eq!(result.unwrap_err(), ConfigError::EmptySelectOptions);
}

#[test]
fn test_options_dropped_for_non_select_editor() {
    let editor = EditorConfig::new(EditorType::Text, vec!["a".to_string()]).unwrap();
    assert!(editor.options().is_empty());

    let mut grid = GridPro::<String>::new();
    let column = grid
        .add_edit_column(
            |s: &String| s.clone(),
            EditColumnConfigurator::new(noop, editor),
        )
        .unwrap();
    assert!(grid.column(&column).unwrap().options().is_empty());
}

#[test]
fn test_registration_queues_one_batch() {
    let mut grid = GridPro::<String>::new();
    let column = grid
        .add_edit_column(|s: &String| s.clone(), EditColumnConfigurator::checkbox(noop))
        .unwrap();

    let cmds = grid.take_commands();
    assert_eq!(cmds.len(), 1);
    let flat = cmds[0].clone().flatten();
    assert_eq!(
        flat,
        vec![
            SurfaceCmd::AttachColumn {
                column: column.internal_id(),
                path: column.internal_id(),
            },
            SurfaceCmd::SetProperty {
                column: column.internal_id(),
                property: "editorType".into(),
                value: json!("checkbox"),
            },
            SurfaceCmd::SetProperty {
                column: column.internal_id(),
                property: "editorOptions".into(),
                value: json!([]),
            },
        ]
    );
}

#[test]
fn test_registration_sends_explicit_flags() {
    let mut grid = GridPro::<String>::new();
    grid.add_edit_column(
        |s: &String| s.clone(),
        EditColumnConfigurator::text(noop)
            .with_allow_enter_row_change(true)
            .with_preserve_edit_mode(false),
    )
    .unwrap();

    let properties: Vec<String> = grid
        .take_commands()
        .into_iter()
        .flat_map(SurfaceCmd::flatten)
        .filter_map(|cmd| match cmd {
            SurfaceCmd::SetProperty { property, .. } => Some(property),
            _ => None,
        })
        .collect();
    assert_eq!(
        properties,
        vec![
            "editorType",
            "editorOptions",
            "allowEnterRowChange",
            "preserveEditMode"
        ]
    );
}

#[test]
fn test_config_fallbacks_fill_unset_flags() {
    let config = GridConfig {
        editor: EditorDefaults {
            allow_enter_row_change: Some(true),
            preserve_edit_mode: None,
        },
        ..GridConfig::default()
    };
    let mut grid = GridPro::<String>::with_config(config).unwrap();

    let inherits = grid
        .add_edit_column(|s: &String| s.clone(), EditColumnConfigurator::text(noop))
        .unwrap();
    let overrides = grid
        .add_edit_column(
            |s: &String| s.clone(),
            EditColumnConfigurator::text(noop).with_allow_enter_row_change(false),
        )
        .unwrap();

    assert!(grid.column(&inherits).unwrap().allow_enter_row_change());
    assert!(!grid.column(&inherits).unwrap().preserve_edit_mode());
    assert!(!grid.column(&overrides).unwrap().allow_enter_row_change());
}

#[test]
fn test_ids_never_reused_after_removal() {
    let mut t = text_grid();
    t.grid.remove_column(&t.select).unwrap();
    let next = t
        .grid
        .add_edit_column(|s: &String| s.clone(), EditColumnConfigurator::text(noop))
        .unwrap();
    assert_eq!(next.internal_id(), "col3");
    assert_ne!(next, t.select);
}

// ========================================================================
// Keys and removal
// ========================================================================

#[test]
fn test_set_key_get_by_key() {
    let mut t = text_grid();
    t.grid.column_mut(&t.text).unwrap().set_key("foo").unwrap();
    t.grid.column_mut(&t.checkbox).unwrap().set_key("bar").unwrap();

    assert_eq!(t.grid.column_by_key("foo"), Some(t.text));
    assert_eq!(t.grid.column_by_key("bar"), Some(t.checkbox));
    assert_eq!(t.grid.column(&t.text).unwrap().key(), Some("foo"));
}

#[test]
fn test_duplicate_key_rejected() {
    let mut t = text_grid();
    t.grid.column_mut(&t.text).unwrap().set_key("foo").unwrap();

    let err = t
        .grid
        .column_mut(&t.checkbox)
        .unwrap()
        .set_key("foo")
        .err();
    assert_eq!(err, Some(GridError::DuplicateKey { key: "foo".into() }));
    assert_eq!(t.grid.column_by_key("foo"), Some(t.text));
}

#[test]
fn test_remove_column_by_key() {
    let mut t = text_grid();
    t.grid.column_mut(&t.text).unwrap().set_key("first").unwrap();

    t.grid.remove_column_by_key("first").unwrap();
    assert_eq!(t.grid.column_by_key("first"), None);
    assert_eq!(
        t.grid.remove_column_by_key("first"),
        Err(GridError::UnknownKey {
            key: "first".into()
        })
    );
}

#[test]
fn test_remove_column() {
    let mut t = text_grid();
    t.grid.column_mut(&t.text).unwrap().set_key("first").unwrap();

    t.grid.remove_column(&t.text).unwrap();
    assert_eq!(t.grid.column_by_key("first"), None);
    assert!(t.grid.column(&t.text).is_none());
    assert!(t.grid.column_mut(&t.text).is_none());
    assert_eq!(t.grid.column_count(), 2);
    assert_eq!(
        t.grid.take_commands(),
        vec![SurfaceCmd::DetachColumn {
            column: "col0".into()
        }]
    );
}

#[test]
fn test_remove_column_twice_fails() {
    let mut t = text_grid();
    t.grid.remove_column(&t.checkbox).unwrap();
    assert_eq!(
        t.grid.remove_column(&t.checkbox),
        Err(GridError::ColumnRemoved(t.checkbox.id()))
    );
}

#[test]
fn test_duplicate_property_column_rejected() {
    let mut grid = GridPro::<String>::new();
    grid.add_edit_column_for_property(
        "name",
        |s: &String| s.clone(),
        EditColumnConfigurator::text(noop),
    )
    .unwrap();

    let err = grid
        .add_edit_column_for_property(
            "name",
            |s: &String| s.clone(),
            EditColumnConfigurator::text(noop),
        )
        .unwrap_err();
    assert_eq!(err, GridError::DuplicateKey { key: "name".into() });
    assert_eq!(grid.column_count(), 1);
}

#[test]
fn test_generated_id_shaped_property_rejected() {
    let mut grid = GridPro::<String>::new();

    let err = grid
        .add_edit_column_for_property(
            "col1",
            |s: &String| s.clone(),
            EditColumnConfigurator::text(noop),
        )
        .unwrap_err();
    assert_eq!(err, GridError::ReservedPath { path: "col1".into() });
    assert_eq!(grid.column_by_key("col1"), None);

    for _ in 0..3 {
        grid.add_edit_column(|s: &String| s.clone(), EditColumnConfigurator::text(noop))
            .unwrap();
    }
    assert_eq!(grid.column_count(), 3);
}

#[test]
fn test_property_not_shaped_like_id_coexists_with_generated() {
    let mut grid = GridPro::<String>::new();
    let property = grid
        .add_edit_column_for_property(
            "col01",
            |s: &String| s.clone(),
            EditColumnConfigurator::text(noop),
        )
        .unwrap();
    let generated = grid
        .add_edit_column(|s: &String| s.clone(), EditColumnConfigurator::text(noop))
        .unwrap();

    assert_eq!(grid.column_by_path("col01"), Some(property));
    assert_eq!(grid.column_by_path("col1"), Some(generated));
}

// ========================================================================
// Handler and synchronized properties
// ========================================================================

#[test]
fn test_set_handler_get_handler() {
    let mut t = text_grid();
    let handler: EditHandler<String> = Rc::new(|_: &String, _: &str| {});

    t.grid
        .column_mut(&t.checkbox)
        .unwrap()
        .set_shared_handler(Rc::clone(&handler));

    let view = t.grid.column(&t.checkbox).unwrap();
    assert!(Rc::ptr_eq(view.handler(), &handler));
    // Handler changes never reach the surface
    assert!(t.grid.take_commands().is_empty());
}

#[test]
fn test_set_editor_type_get_editor_type() {
    let mut t = text_grid();
    t.grid
        .column_mut(&t.text)
        .unwrap()
        .set_editor_type(EditorType::Checkbox);

    let view = t.grid.column(&t.text).unwrap();
    assert_eq!(view.editor_type().type_name(), "checkbox");
    assert_eq!(view.editor_config().editor_type(), &EditorType::Checkbox);
}

#[test]
fn test_change_editor_type_sequence() {
    let mut t = text_grid();
    let handler = Rc::clone(t.grid.column(&t.text).unwrap().handler());
    let id = t.text.id();

    let sequence = [
        EditorType::Select,
        EditorType::Text,
        EditorType::Checkbox,
        EditorType::Text,
    ];
    for editor_type in sequence {
        t.grid
            .column_mut(&t.text)
            .unwrap()
            .set_editor_type(editor_type.clone());

        let view = t.grid.column(&t.text).unwrap();
        assert_eq!(view.editor_type(), editor_type);
        assert_eq!(view.id(), id);
        assert!(Rc::ptr_eq(view.handler(), &handler));
    }
    assert_eq!(t.grid.column_by_path("col0"), Some(t.text));
}

#[test]
fn test_set_editor_type_none_means_text() {
    let mut t = text_grid();
    t.grid.column_mut(&t.select).unwrap().set_editor_type(None);

    assert_eq!(
        t.grid.column(&t.select).unwrap().editor_type(),
        EditorType::Text
    );
    assert_eq!(
        t.grid.take_commands(),
        vec![SurfaceCmd::SetProperty {
            column: "col2".into(),
            property: "editorType".into(),
            value: json!("text"),
        }]
    );
}

#[test]
fn test_set_options_get_options() {
    let mut t = text_grid();
    t.grid
        .column_mut(&t.select)
        .unwrap()
        .set_options(["one", "two"]);

    assert_eq!(t.grid.column(&t.select).unwrap().options(), vec!["one", "two"]);
}

#[test]
fn test_options_stable_between_reads() {
    let t = text_grid();
    let view = t.grid.column(&t.select).unwrap();

    let first = view.options();
    let second = view.options();
    assert_eq!(first, second);
    assert_eq!(first, vec!["foo", "bar", "baz"]);
}

#[test]
fn test_set_allow_enter_row_change() {
    let mut t = text_grid();
    t.grid
        .column_mut(&t.text)
        .unwrap()
        .set_allow_enter_row_change(true);

    assert!(t.grid.column(&t.text).unwrap().allow_enter_row_change());
    assert!(!t.grid.column(&t.select).unwrap().allow_enter_row_change());
}

#[test]
fn test_set_preserve_edit_mode() {
    let mut t = text_grid();
    t.grid
        .column_mut(&t.text)
        .unwrap()
        .set_preserve_edit_mode(true);

    assert!(t.grid.column(&t.text).unwrap().preserve_edit_mode());
}

#[test]
fn test_each_setter_queues_one_command() {
    let mut t = text_grid();
    {
        let mut column = t.grid.column_mut(&t.select).unwrap();
        column
            .set_editor_type(EditorType::Select)
            .set_options(["x"])
            .set_allow_enter_row_change(true)
            .set_preserve_edit_mode(true);
    }

    let cmds = t.grid.take_commands();
    assert_eq!(cmds.len(), 4);
    assert!(cmds.iter().all(|cmd| cmd.column() == Some("col2")));
}

#[test]
fn test_chained_setters_visible_through_view() {
    let mut t = text_grid();
    let mut column = t.grid.column_mut(&t.checkbox).unwrap();
    column.set_preserve_edit_mode(true);

    let view = column.view();
    assert!(view.preserve_edit_mode());
    assert_eq!(view.column(), t.checkbox);
}
