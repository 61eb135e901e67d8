//! Tests for the one-shot CLI command handlers
//!
//! Each test points a ServiceContainer at a data file in a TempDir and
//! checks what ends up on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rstest::rstest;
use tempfile::TempDir;

use famtree::application::services::TreeStore;
use famtree::application::ApplicationError;
use famtree::cli::commands::{
    cmd_add, cmd_edit, cmd_generations, cmd_get, cmd_link, cmd_reset, cmd_roots, cmd_show,
    fallback_warning,
};
use famtree::config::{RenderStyle, Settings};
use famtree::domain::{DomainError, FamilyTree};
use famtree::exitcode;
use famtree::infrastructure::di::ServiceContainer;
use famtree::infrastructure::traits::RealFileSystem;
use famtree::util::testing;

const GARBAGE: &str = "garbage\n";

fn init() {
    testing::init_test_setup();
}

fn container_for(path: &Path) -> ServiceContainer {
    let settings = Settings {
        data_file: path.to_path_buf(),
        root: 0,
        style: RenderStyle::Ascii,
    };
    ServiceContainer::with_deps(settings, Arc::new(RealFileSystem))
}

fn reload(path: &Path) -> FamilyTree {
    TreeStore::new(Arc::new(RealFileSystem), path.to_path_buf())
        .load()
        .unwrap()
}

/// Data file in a fresh TempDir; the dir must outlive the test body.
fn data_file() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("family_tree.dat");
    (temp, path)
}

fn corrupt_data_file() -> (TempDir, PathBuf) {
    let (temp, path) = data_file();
    std::fs::write(&path, GARBAGE).unwrap();
    (temp, path)
}

// ============================================================
// add
// ============================================================

#[test]
fn given_no_data_file_when_adding_then_seed_plus_person_saved() {
    init();
    let (_temp, path) = data_file();

    cmd_add(&container_for(&path), "Prince William", 1982, None, &[13]).unwrap();

    let tree = reload(&path);
    assert_eq!(tree.size(), 20);
    assert_eq!(tree.get_person(13).unwrap().children(), &[14, 15, 19]);
}

#[test]
fn given_died_minus_one_when_adding_then_person_living_after_reload() {
    init();
    let (_temp, path) = data_file();

    cmd_add(&container_for(&path), "Foo", 2000, Some(-1), &[]).unwrap();

    let person = reload(&path).get_person(19).unwrap().clone();
    assert!(person.is_living());
    assert_eq!(person.to_string(), "Foo (b. 2000)");
}

#[test]
fn given_several_parents_when_adding_then_linked_under_each() {
    init();
    let (_temp, path) = data_file();

    cmd_add(&container_for(&path), "Prince George", 2013, None, &[13, 15]).unwrap();

    let tree = reload(&path);
    assert_eq!(tree.get_person(13).unwrap().children(), &[14, 15, 19]);
    assert_eq!(tree.get_person(15).unwrap().children(), &[19]);
}

#[test]
fn given_bad_parent_when_adding_then_usage_error_and_nothing_written() {
    init();
    let (_temp, path) = data_file();

    let err = cmd_add(&container_for(&path), "Nobody", 2000, None, &[0, 99]).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::USAGE);
    assert!(!path.exists());
}

// ============================================================
// Unreadable data file
// ============================================================

#[rstest]
#[case::add("add")]
#[case::link("link")]
#[case::edit("edit")]
fn given_unreadable_data_file_when_mutating_then_fails_and_file_kept(#[case] command: &str) {
    init();
    let (_temp, path) = corrupt_data_file();
    let container = container_for(&path);

    let result = match command {
        "add" => cmd_add(&container, "Foo", 2000, None, &[]),
        "link" => cmd_link(&container, 0, 2),
        "edit" => cmd_edit(&container, 0, Some("Victoria"), None, None, false),
        other => panic!("unknown command {other}"),
    };

    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), exitcode::DATAERR, "{err}");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), GARBAGE);
}

#[test]
fn given_unreadable_data_file_when_reading_then_falls_back_without_writing() {
    init();
    let (_temp, path) = corrupt_data_file();
    let container = container_for(&path);

    cmd_show(&container, 0, RenderStyle::Unicode).unwrap();
    cmd_roots(&container).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), GARBAGE);
}

#[test]
fn given_unreadable_data_file_when_resetting_then_replaced_by_seed() {
    init();
    let (_temp, path) = corrupt_data_file();

    cmd_reset(&container_for(&path)).unwrap();

    assert_eq!(reload(&path), FamilyTree::with_default_seed());
}

#[test]
fn given_load_error_when_formatting_fallback_warning_then_path_named_once() {
    let path = PathBuf::from("/data/mine.dat");
    let reason = ApplicationError::Load {
        path: path.clone(),
        source: DomainError::UnexpectedEof {
            expected: "person count".to_string(),
        },
    }
    .to_string();

    let warning = fallback_warning(&reason);

    assert_eq!(warning.matches("/data/mine.dat").count(), 1, "{warning}");
    assert!(warning.ends_with("using default data"));
}

// ============================================================
// link / edit
// ============================================================

#[test]
fn given_valid_ids_when_linking_then_saved() {
    init();
    let (_temp, path) = data_file();

    cmd_link(&container_for(&path), 11, 12).unwrap();

    assert_eq!(reload(&path).get_person(11).unwrap().children(), &[13, 16, 17, 18, 12]);
}

#[test]
fn given_out_of_range_child_when_linking_then_usage_error() {
    init();
    let (_temp, path) = data_file();

    let err = cmd_link(&container_for(&path), 0, 19).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::USAGE);
    assert!(!path.exists());
}

#[test]
fn given_new_values_when_editing_then_saved() {
    init();
    let (_temp, path) = data_file();
    let container = container_for(&path);

    cmd_edit(&container, 13, Some("Charles III"), Some(1948), Some(2099), false).unwrap();
    assert_eq!(
        reload(&path).get_person(13).unwrap().to_string(),
        "Charles III (b. 1948, d. 2099)"
    );

    cmd_edit(&container, 13, None, None, None, true).unwrap();
    assert!(reload(&path).get_person(13).unwrap().is_living());
}

#[test]
fn given_died_minus_one_when_editing_then_person_living_after_reload() {
    init();
    let (_temp, path) = data_file();

    cmd_edit(&container_for(&path), 0, None, None, Some(-1), false).unwrap();

    let tree = reload(&path);
    assert!(tree.get_person(0).unwrap().is_living());
    assert_eq!(tree.get_person(0).unwrap().to_string(), "Queen Victoria (b. 1819)");
}

#[test]
fn given_nothing_to_change_when_editing_then_usage_error() {
    init();
    let (_temp, path) = data_file();

    let err = cmd_edit(&container_for(&path), 0, None, None, None, false).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::USAGE);
    assert!(!path.exists());
}

// ============================================================
// read-only commands
// ============================================================

#[test]
fn given_seed_when_running_read_commands_then_ok() {
    init();
    let (_temp, path) = data_file();
    let container = container_for(&path);

    cmd_show(&container, 0, RenderStyle::Ascii).unwrap();
    cmd_generations(&container, 10).unwrap();
    cmd_get(&container, 13).unwrap();
    cmd_roots(&container).unwrap();

    assert!(!path.exists());
}

#[test]
fn given_bad_ids_when_running_read_commands_then_usage_errors() {
    init();
    let (_temp, path) = data_file();
    let container = container_for(&path);

    assert_eq!(cmd_get(&container, 19).unwrap_err().exit_code(), exitcode::USAGE);
    assert_eq!(
        cmd_generations(&container, 19).unwrap_err().exit_code(),
        exitcode::USAGE
    );
    assert_eq!(
        cmd_show(&container, 19, RenderStyle::Ascii).unwrap_err().exit_code(),
        exitcode::USAGE
    );
}
