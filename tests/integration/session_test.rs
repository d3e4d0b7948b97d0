//! Scripted end-to-end REPL sessions.
//!
//! Each test drives `App::run` with a scripted prompter standing in for
//! the terminal and asserts the resulting on-disk state.

use modman::app::App;
use modman::console::{Output, ScriptedInput, ScriptedPrompter};
use modman::persistence::ProfileStore;
use modman::profile::Profile;
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

struct Fixture {
    _dir: tempfile::TempDir,
    store_root: PathBuf,
    active: PathBuf,
    inactive: PathBuf,
}

fn setup(profile_name: &str, active_names: &[&str], inactive_names: &[&str]) -> Fixture {
    let dir = tempdir().unwrap();
    let active = dir.path().join("mods");
    let inactive = dir.path().join("unused");
    std::fs::create_dir(&active).unwrap();
    std::fs::create_dir(&inactive).unwrap();
    for name in active_names {
        std::fs::write(active.join(name), b"x").unwrap();
    }
    for name in inactive_names {
        std::fs::write(inactive.join(name), b"x").unwrap();
    }

    let store_root = dir.path().join("store");
    let store = ProfileStore::open(store_root.clone()).unwrap();
    store
        .save_all(&[Profile::new(
            profile_name.to_string(),
            active.clone(),
            inactive.clone(),
            None,
            0,
        )])
        .unwrap();

    Fixture {
        _dir: dir,
        store_root,
        active,
        inactive,
    }
}

fn run_session(fx: &Fixture, inputs: Vec<ScriptedInput>) {
    let store = ProfileStore::open(fx.store_root.clone()).unwrap();
    let profiles = store.load_all();
    let mut app = App::new(
        store,
        profiles,
        Output::new(false),
        Box::new(ScriptedPrompter::new(inputs)),
    );
    assert_eq!(app.profiles().len(), 1);
    app.run(None).unwrap();
}

fn names_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_session_toggles_ranges_and_filtered_all() {
    let fx = setup("test", &["alpha", "beta", "gamma"], &[]);

    run_session(
        &fx,
        vec![
            ScriptedInput::line("load 0"),
            // Disable alpha and beta.
            ScriptedInput::line("toggle 0-1"),
            // Re-enable only what matches the filter.
            ScriptedInput::line("filter beta"),
            ScriptedInput::line("toggle all"),
            ScriptedInput::line("filter"),
            ScriptedInput::line("exit"),
            ScriptedInput::line("exit"),
        ],
    );

    assert_eq!(names_in(&fx.active), vec!["beta", "gamma"]);
    assert_eq!(names_in(&fx.inactive), vec!["alpha"]);
}

#[test]
fn test_session_numeric_selection_and_rename() {
    let fx = setup("test", &["m0.esp", "m1.esp"], &[]);

    run_session(
        &fx,
        vec![
            // Bare integer enters profile 0.
            ScriptedInput::line("0"),
            // Bare integer toggles item 1.
            ScriptedInput::line("1"),
            // Rename prompts for the missing name; extension is preserved.
            ScriptedInput::line("rename 0"),
            ScriptedInput::line("renamed"),
            ScriptedInput::line("exit"),
            ScriptedInput::line("exit"),
        ],
    );

    assert_eq!(names_in(&fx.active), vec!["renamed.esp"]);
    assert_eq!(names_in(&fx.inactive), vec!["m1.esp"]);
}

#[test]
fn test_session_duplicate_delete_resolution() {
    let fx = setup("test", &["dup.esp", "other.esp"], &["dup.esp"]);

    run_session(
        &fx,
        vec![
            ScriptedInput::line("load 0"),
            // Rename? No. Delete forever? Yes.
            ScriptedInput::No,
            ScriptedInput::Yes,
            ScriptedInput::line("exit"),
            ScriptedInput::line("exit"),
        ],
    );

    assert_eq!(names_in(&fx.active), vec!["dup.esp", "other.esp"]);
    assert!(names_in(&fx.inactive).is_empty());
}

#[test]
fn test_session_duplicate_declined_blocks_load() {
    let fx = setup("test", &["dup.esp"], &["dup.esp"]);

    run_session(
        &fx,
        vec![
            ScriptedInput::line("load 0"),
            // Decline both options: the load fails and the session falls
            // back to the profile menu.
            ScriptedInput::No,
            ScriptedInput::No,
            ScriptedInput::line("exit"),
        ],
    );

    // Nothing was touched.
    assert_eq!(names_in(&fx.active), vec!["dup.esp"]);
    assert_eq!(names_in(&fx.inactive), vec!["dup.esp"]);
}

#[test]
fn test_session_prefix_fallbacks() {
    let fx = setup("skyrim", &["morrowind_retex", "ui_overhaul"], &[]);

    run_session(
        &fx,
        vec![
            // Unknown command token resolves to the profile by prefix.
            ScriptedInput::line("sky"),
            // Unknown token in the item menu toggles the matching mod.
            ScriptedInput::line("morrow"),
            ScriptedInput::line("exit"),
            ScriptedInput::line("exit"),
        ],
    );

    assert_eq!(names_in(&fx.active), vec!["ui_overhaul"]);
    assert_eq!(names_in(&fx.inactive), vec!["morrowind_retex"]);
}

#[test]
fn test_session_cancelled_command_returns_to_repl() {
    let fx = setup("test", &["keep.esp"], &[]);

    run_session(
        &fx,
        vec![
            ScriptedInput::line("load 0"),
            ScriptedInput::line("delete 0"),
            // Escape aborts just this command; the session keeps running.
            ScriptedInput::Escape,
            ScriptedInput::line("toggle 0"),
            ScriptedInput::line("exit"),
            ScriptedInput::line("exit"),
        ],
    );

    assert!(names_in(&fx.active).is_empty());
    assert_eq!(names_in(&fx.inactive), vec!["keep.esp"]);
}
