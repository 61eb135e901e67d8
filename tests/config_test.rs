//! Integration tests for Settings loading from a local `.famtree.toml`.
//!
//! These tests assume no global config and no FAMTREE_* variables are set.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use famtree::config::{local_config_path, RenderStyle, Settings, DEFAULT_DATA_FILE};

#[test]
fn given_no_local_config_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings, Settings::default());
    assert_eq!(settings.data_file, PathBuf::from(DEFAULT_DATA_FILE));
    assert_eq!(settings.root, 0);
    assert_eq!(settings.style, RenderStyle::Ascii);
}

#[test]
fn given_partial_local_config_when_load_then_only_named_keys_change() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "root = 10\nstyle = \"unicode\"\n",
    )
    .unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.root, 10);
    assert_eq!(settings.style, RenderStyle::Unicode);
    assert_eq!(settings.data_file, PathBuf::from(DEFAULT_DATA_FILE));
}

#[test]
fn given_local_data_file_when_load_then_used() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "data_file = \"royals/windsor.dat\"\n",
    )
    .unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.data_file, PathBuf::from("royals/windsor.dat"));
}

#[test]
fn given_invalid_toml_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "root = [not toml").unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(err.to_string().starts_with("config error:"), "{err}");
    assert!(err.to_string().contains(".famtree.toml"), "{err}");
}

#[test]
fn given_unknown_style_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "style = \"fancy\"\n").unwrap();

    assert!(Settings::load(Some(dir.path())).is_err());
}

#[test]
fn given_template_when_written_as_local_config_then_loads_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), Settings::template()).unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_settings_when_to_toml_then_round_trips() {
    let settings = Settings {
        data_file: PathBuf::from("tree.dat"),
        root: 4,
        style: RenderStyle::Unicode,
    };

    let text = settings.to_toml().unwrap();
    let parsed: Settings = toml::from_str(&text).unwrap();

    assert_eq!(parsed, settings);
    assert!(text.contains("style = \"unicode\""));
}
