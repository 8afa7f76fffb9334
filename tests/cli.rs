use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn folio(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.env("FOLIO_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn seed(home: &Path) {
    folio(home).args(["add-folder", "Inbox"]).assert().success();
    for title in ["Groceries", "Buy milk", "Call plumber"] {
        folio(home)
            .args(["create", "Inbox", "--no-editor", title])
            .assert()
            .success();
    }
}

#[test]
fn test_duplicate_folder_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    folio(temp_dir.path())
        .args(["add-folder", "Work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Work"));

    folio(temp_dir.path())
        .args(["add-folder", "Work"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    folio(temp_dir.path())
        .args(["add-folder", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be empty"));
}

#[test]
fn test_create_and_list_notes() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed(temp_dir.path());

    folio(temp_dir.path())
        .args(["list", "Inbox"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Groceries"))
        .stdout(predicate::str::contains("2. Buy milk"))
        .stdout(predicate::str::contains("3. Call plumber"));

    let stored = fs::read_to_string(temp_dir.path().join("notes.json")).unwrap();
    assert!(stored.contains("\"Inbox\""));
    assert!(stored.contains("Call plumber"));
}

#[test]
fn test_create_in_missing_folder_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    folio(temp_dir.path())
        .args(["create", "Nowhere", "--no-editor", "Lost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Folder not found"));
}

#[test]
fn test_filter_search_keeps_original_indexes() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed(temp_dir.path());

    folio(temp_dir.path())
        .args(["list", "Inbox", "-s", "MILK", "--filter"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2. Buy milk"))
        .stdout(predicate::str::contains("Groceries").not());
}

#[test]
fn test_highlight_search_shows_every_note() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed(temp_dir.path());
    folio(temp_dir.path())
        .args(["tag", "Inbox", "3", "urgent, home"])
        .assert()
        .success();

    folio(temp_dir.path())
        .args(["list", "Inbox", "-s", "urgent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Groceries"))
        .stdout(predicate::str::contains("› 3. Call plumber"))
        .stdout(predicate::str::contains("urgent, home"));
}

#[test]
fn test_delete_range_reindexes() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed(temp_dir.path());

    folio(temp_dir.path())
        .args(["delete", "Inbox", "1-2", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note deleted (1): Groceries"));

    folio(temp_dir.path())
        .args(["list", "Inbox"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Call plumber"))
        .stdout(predicate::str::contains("Buy milk").not());
}

#[test]
fn test_delete_out_of_range_changes_nothing() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed(temp_dir.path());
    let before = fs::read_to_string(temp_dir.path().join("notes.json")).unwrap();

    folio(temp_dir.path())
        .args(["delete", "Inbox", "2", "9", "-y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));

    let after = fs::read_to_string(temp_dir.path().join("notes.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_declined_confirmation_keeps_folder() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed(temp_dir.path());

    folio(temp_dir.path())
        .args(["delete-folder", "Inbox"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted."));

    folio(temp_dir.path())
        .arg("folders")
        .assert()
        .success()
        .stdout(predicate::str::contains("Inbox"));
}

#[test]
fn test_confirm_deletes_can_be_disabled() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed(temp_dir.path());
    folio(temp_dir.path())
        .args(["config", "confirm-deletes", "false"])
        .assert()
        .success();

    folio(temp_dir.path())
        .args(["delete-folder", "Inbox"])
        .assert()
        .success();

    folio(temp_dir.path())
        .arg("folders")
        .assert()
        .success()
        .stdout(predicate::str::contains("No folders found."));
}

#[test]
fn test_rename_folder_keeps_notes() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed(temp_dir.path());
    folio(temp_dir.path()).args(["add-folder", "Work"]).assert().success();

    folio(temp_dir.path())
        .args(["rename-folder", "Inbox", "Work"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    folio(temp_dir.path())
        .args(["rename-folder", "Inbox", "Home"])
        .assert()
        .success();

    folio(temp_dir.path())
        .args(["list", "Home"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2. Buy milk"));

    folio(temp_dir.path())
        .args(["folders", "-s", "OM"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Home"))
        .stdout(predicate::str::contains("Work").not());
}

#[test]
fn test_corrupted_document_starts_empty_and_is_preserved() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("notes.json"), "{ definitely not json").unwrap();

    folio(temp_dir.path())
        .arg("folders")
        .assert()
        .success()
        .stdout(predicate::str::contains("No folders found."))
        .stderr(predicate::str::contains("empty library"));

    folio(temp_dir.path())
        .args(["add-folder", "Fresh"])
        .assert()
        .success();

    let preserved = fs::read_dir(temp_dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .any(|e| e.file_name().to_string_lossy().starts_with("notes.json.corrupt-"));
    assert!(preserved, "corrupted document was not set aside");
}

#[test]
fn test_legacy_document_loads() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(
        temp_dir.path().join("notes.json"),
        r#"{"Old": [{"title": "From before", "content": "plain body"}]}"#,
    )
    .unwrap();

    folio(temp_dir.path())
        .args(["view", "Old", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("From before"))
        .stdout(predicate::str::contains("plain body"));
}

#[test]
fn test_attach_link_and_view() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed(temp_dir.path());
    let image = temp_dir.path().join("receipt.png");
    fs::write(&image, b"\x89PNG").unwrap();

    folio(temp_dir.path())
        .args(["attach", "Inbox", "1", image.to_str().unwrap()])
        .assert()
        .success();
    folio(temp_dir.path())
        .args(["link", "Inbox", "1", "https://shop.example"])
        .assert()
        .success();

    folio(temp_dir.path())
        .args(["view", "Inbox", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[image: "))
        .stdout(predicate::str::contains("https://shop.example"));

    fs::remove_file(&image).unwrap();
    folio(temp_dir.path())
        .args(["view", "Inbox", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cannot load image"))
        .stdout(predicate::str::contains("https://shop.example"));
}

#[test]
fn test_attach_missing_file_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed(temp_dir.path());
    folio(temp_dir.path())
        .args(["attach", "Inbox", "1", "does-not-exist.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot load image"));
}

#[test]
fn test_open_link_without_links_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed(temp_dir.path());
    folio(temp_dir.path())
        .args(["open-link", "Inbox", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no links"));
}

#[test]
fn test_config_roundtrip() {
    let temp_dir = tempfile::tempdir().unwrap();
    folio(temp_dir.path())
        .args(["config", "search-mode", "filter"])
        .assert()
        .success();

    folio(temp_dir.path())
        .args(["config", "search-mode"])
        .assert()
        .success()
        .stdout(predicate::str::contains("search-mode = filter"));

    folio(temp_dir.path())
        .args(["config", "search-mode", "sideways"])
        .assert()
        .failure();
}

#[test]
fn test_configured_filter_mode_applies_to_search() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed(temp_dir.path());
    folio(temp_dir.path())
        .args(["config", "search-mode", "filter"])
        .assert()
        .success();

    folio(temp_dir.path())
        .args(["list", "Inbox", "-s", "plumber"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3. Call plumber"))
        .stdout(predicate::str::contains("Groceries").not());
}

#[test]
fn test_grouped_help() {
    let temp_dir = tempfile::tempdir().unwrap();
    folio(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Folder Commands:"))
        .stdout(predicate::str::contains("Note Commands:"));

    folio(temp_dir.path())
        .args(["help", "attach"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Append an image"));
}

#[test]
fn test_unchanged_edit_keeps_image_paths_with_parens() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed(temp_dir.path());
    let image = temp_dir.path().join("photo (1).png");
    fs::write(&image, b"\x89PNG").unwrap();
    folio(temp_dir.path())
        .args(["attach", "Inbox", "1", image.to_str().unwrap()])
        .assert()
        .success();
    let before = fs::read_to_string(temp_dir.path().join("notes.json")).unwrap();

    folio(temp_dir.path())
        .env("EDITOR", "true")
        .args(["edit", "Inbox", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes."));

    let after = fs::read_to_string(temp_dir.path().join("notes.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_huge_range_is_an_error_not_a_crash() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed(temp_dir.path());

    folio(temp_dir.path())
        .args(["delete", "Inbox", "1-18446744073709551615", "-y"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("out of range"));

    folio(temp_dir.path())
        .args(["view", "Inbox", "2-99999999999"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_search_titles_with_mixed_width_case_folding() {
    let temp_dir = tempfile::tempdir().unwrap();
    folio(temp_dir.path()).args(["add-folder", "Odd"]).assert().success();
    folio(temp_dir.path())
        .args(["create", "Odd", "--no-editor", "\u{23A}\u{23A}\u{212A}"])
        .assert()
        .success();

    folio(temp_dir.path())
        .args(["list", "Odd", "-s", "k"])
        .assert()
        .success()
        .stdout(predicate::str::contains("› 1. \u{23A}\u{23A}\u{212A}"));
}
