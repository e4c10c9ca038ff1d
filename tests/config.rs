//! Configuration system tests
//!
//! Tests for grid config files and keymap overrides.

mod common;

use common::{active, key, key_with, SALES};
use gridblock::grid::{GridDocument, GridMode};
use gridblock::keymap::{
    default_bindings, load_keymap_file, merge_bindings, parse_keymap_yaml, BindingConfig, Command,
    Condition, KeyCode, KeyContext, Keybinding, Keymap, KeymapError, Keystroke, Modifiers,
};
use gridblock::{update, GridConfig, GridModel};
use tempfile::TempDir;

fn model_with(config: GridConfig) -> GridModel {
    let mut model = GridModel::new(GridDocument::new(SALES), config);
    model.state.activate_at(gridblock::grid::CellPosition::new(0, 0));
    model
}

fn binding(key: &str, command: &str, when: Option<&[&str]>) -> BindingConfig {
    BindingConfig {
        key: key.to_string(),
        command: command.to_string(),
        platform: None,
        when: when.map(|w| w.iter().map(|c| c.to_string()).collect()),
    }
}

// ========================================================================
// Grid Config Tests
// ========================================================================

#[test]
fn test_config_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("grid.yaml");

    let mut config = GridConfig::default();
    config.min_column_width = 5.0;
    config.new_column_fill = String::new();
    config.locale.currency_symbol = "€".to_string();
    config.keymap = vec![binding("ctrl+j", "move_down", None)];
    config.save(&path).unwrap();

    assert!(path.exists());
    assert_eq!(GridConfig::load(&path), config);
}

#[test]
fn test_invalid_config_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("grid.yaml");
    std::fs::write(&path, "locale: [not, a, map").unwrap();

    assert!(GridConfig::load_file(&path).is_err());
    assert_eq!(GridConfig::load(&path), GridConfig::default());
}

#[test]
fn test_missing_config_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = GridConfig::load(&dir.path().join("absent.yaml"));
    assert_eq!(config, GridConfig::default());
}

#[test]
fn test_config_drives_new_columns() {
    let config = GridConfig::from_yaml("new_column_title: Mes\nnew_column_fill: \"\"\n").unwrap();
    let mut model = model_with(config);

    update(&mut model, gridblock::GridMsg::InsertColumnRight);
    assert_eq!(common::cell(&model, -1, 1), "Mes 4");
    assert_eq!(common::cell(&model, 0, 1), "");
}

#[test]
fn test_config_min_width_applies_to_resize() {
    let config = GridConfig::from_yaml("min_column_width: 10").unwrap();
    let mut model = model_with(config);

    update(
        &mut model,
        gridblock::GridMsg::BeginResize {
            col: 0,
            pointer_x: 0.0,
            container_width: 100.0,
        },
    );
    update(&mut model, gridblock::GridMsg::PointerMove { x: -90.0 });
    common::assert_approx(model.column_widths()[0], 10.0);
}

#[test]
fn test_locale_config_drives_display() {
    let config = GridConfig::from_yaml(
        "locale:\n  decimal_separator: '.'\n  group_separator: ','\n",
    )
    .unwrap();
    let mut model = model_with(config);
    update(
        &mut model,
        gridblock::GridMsg::Apply(gridblock::GridEdit::SetColumnPrecision { col: 1, precision: 2 }),
    );

    let pos = gridblock::grid::CellPosition::new(0, 1);
    assert_eq!(model.display_text(pos), "120.00");
}

// ========================================================================
// Keymap Override Tests
// ========================================================================

#[test]
fn test_configured_binding_is_live() {
    let mut config = GridConfig::default();
    config.keymap = vec![binding("ctrl+j", "MoveDown", Some(&["navigating"]))];
    let mut model = model_with(config);

    update(&mut model, key_with(KeyCode::Char('j'), Modifiers::CTRL));
    assert_eq!(active(&model), Some((1, 0)));
}

#[test]
fn test_override_replaces_both_modes() {
    let mut config = GridConfig::default();
    config.keymap = vec![binding("enter", "next_cell", None)];
    let mut model = model_with(config);

    update(&mut model, key(KeyCode::Enter));
    assert_eq!(active(&model), Some((0, 1)));
    assert_eq!(model.state.mode(), GridMode::Navigating);
}

#[test]
fn test_unbound_override_removes_default() {
    let mut config = GridConfig::default();
    config.keymap = vec![binding("f2", "unbound", None)];
    let mut model = model_with(config);

    assert_eq!(update(&mut model, key(KeyCode::F(2))), None);
    assert_eq!(model.state.mode(), GridMode::Navigating);
}

#[test]
fn test_invalid_override_keeps_defaults() {
    let mut config = GridConfig::default();
    config.keymap = vec![binding("ctrl+j", "fly_away", None)];
    let mut model = model_with(config);

    update(&mut model, key(KeyCode::Enter));
    assert_eq!(model.state.mode(), GridMode::Editing);
}

#[test]
fn test_keymap_file_round_trip_through_yaml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keymap.yaml");
    std::fs::write(
        &path,
        "bindings:\n  - key: \"alt+down\"\n    command: JumpDown\n    when: [navigating]\n",
    )
    .unwrap();

    let bindings = load_keymap_file(&path).unwrap();
    assert_eq!(bindings.len(), 1);
    assert_eq!(
        bindings[0].keystroke,
        Keystroke::new(KeyCode::Down, Modifiers::ALT)
    );
    assert_eq!(bindings[0].when, Some(vec![Condition::Navigating]));
}

#[test]
fn test_keymap_errors_name_the_problem() {
    let missing = load_keymap_file(std::path::Path::new("/nonexistent/keymap.yaml"));
    assert!(matches!(missing, Err(KeymapError::IoError(_))));

    let bad_key = parse_keymap_yaml("bindings:\n  - key: \"ctrl+nope\"\n    command: MoveUp\n");
    assert!(matches!(bad_key, Err(KeymapError::InvalidKey(_))));

    let bad_when = parse_keymap_yaml(
        "bindings:\n  - key: \"up\"\n    command: MoveUp\n    when: [sideways]\n",
    );
    assert_eq!(bad_when, Err(KeymapError::InvalidCondition("sideways".into())));
}

#[test]
fn test_platform_specific_entries_are_filtered() {
    let yaml = "bindings:\n  - key: \"ctrl+k\"\n    command: Copy\n    platform: plan9\n";
    assert!(parse_keymap_yaml(yaml).unwrap().is_empty());
}

#[test]
fn test_merge_keeps_unrelated_defaults() {
    let user = vec![Keybinding::new(Keystroke::key(KeyCode::Tab), Command::MoveDown)];
    let keymap = Keymap::with_bindings(merge_bindings(default_bindings(), user));

    let tab = Keystroke::key(KeyCode::Tab);
    assert_eq!(
        keymap.lookup(&tab, &KeyContext::editing()),
        Some(Command::MoveDown)
    );
    assert_eq!(
        keymap.lookup(&Keystroke::key(KeyCode::Escape), &KeyContext::editing()),
        Some(Command::CancelEdit)
    );
}
