use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const PLAYER_GD: &str = "\
extends CharacterBody2D

func attack():
\tprint(\"Player \", name, \" melee attacking\")
    print(\"Player attacking enemy\")
\tmove_player()
\tprint(\"=== MELEE DAMAGE ===\")
\tprint(\"Final damage: \", dmg)
\tprint(\"Player healed 5\")
\treturn dmg
";

const PLAYER_GD_CLEAN: &str = "\
extends CharacterBody2D

func attack():
    print(\"Player attacking enemy\")
\tmove_player()
\treturn dmg
";

fn setup_test_directory() -> tempfile::TempDir {
    let dir = tempdir().unwrap();

    fs::write(dir.path().join("player.gd"), PLAYER_GD).unwrap();
    fs::write(
        dir.path().join("arrow.gd"),
        "func _ready():\r\n\tprint(\"Player 1 firing arrow\")\r\n\tspeed = 400\r\n",
    )
    .unwrap();

    dir
}

fn bin() -> Command {
    Command::cargo_bin("debug-scrub").unwrap()
}

#[test]
fn test_no_targets_present() {
    let dir = tempdir().unwrap();

    bin()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(
            "Skipping player.gd (not found)\n\
             Skipping enemy.gd (not found)\n\
             Skipping network_handler.gd (not found)\n\
             Skipping arrow.gd (not found)\n\
             Cleanup complete!\n",
        );

    // Nothing gets created
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_cleans_present_targets() {
    let dir = setup_test_directory();

    bin()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(
            "Cleaned player.gd: removed 4 debug prints\n\
             Skipping enemy.gd (not found)\n\
             Skipping network_handler.gd (not found)\n\
             Cleaned arrow.gd: removed 1 debug prints\n\
             Cleanup complete!\n",
        );

    assert_eq!(
        fs::read_to_string(dir.path().join("player.gd")).unwrap(),
        PLAYER_GD_CLEAN
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("arrow.gd")).unwrap(),
        "func _ready():\r\n\tspeed = 400\r\n"
    );
}

#[test]
fn test_indented_print_is_removed() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("enemy.gd"),
        "    print(\"Player melee attacking enemy\")\nchase()\n",
    )
    .unwrap();

    bin()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Cleaned enemy.gd: removed 1 debug prints",
        ));

    assert_eq!(
        fs::read_to_string(dir.path().join("enemy.gd")).unwrap(),
        "chase()\n"
    );
}

#[test]
fn test_second_run_removes_nothing() {
    let dir = setup_test_directory();

    bin().current_dir(dir.path()).assert().success();
    let after_first = fs::read_to_string(dir.path().join("player.gd")).unwrap();

    bin()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Cleaned player.gd: removed 0 debug prints",
        ))
        .stdout(predicate::str::contains(
            "Cleaned arrow.gd: removed 0 debug prints",
        ));

    assert_eq!(
        fs::read_to_string(dir.path().join("player.gd")).unwrap(),
        after_first
    );
}

#[test]
fn test_directory_flag() {
    let dir = setup_test_directory();

    bin()
        .arg("-C")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Cleaned player.gd: removed 4 debug prints",
        ));

    assert_eq!(
        fs::read_to_string(dir.path().join("player.gd")).unwrap(),
        PLAYER_GD_CLEAN
    );
}

#[test]
fn test_dry_run_leaves_files() {
    let dir = setup_test_directory();

    bin()
        .current_dir(dir.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Would clean player.gd: remove 4 debug prints",
        ))
        .stdout(predicate::str::contains("Dry run mode: No files were modified."))
        .stdout(predicate::str::ends_with("Cleanup complete!\n"));

    assert_eq!(
        fs::read_to_string(dir.path().join("player.gd")).unwrap(),
        PLAYER_GD
    );
}

#[test]
fn test_verbose_logs_removed_lines() {
    let dir = setup_test_directory();

    bin()
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .arg("--verbose")
        .assert()
        .success()
        .stderr(predicate::str::contains("Removing"))
        .stderr(predicate::str::contains("Final damage"));
}

#[test]
fn test_unreadable_target_fails() {
    let dir = tempdir().unwrap();
    // A directory where a file is expected is neither readable nor "not found"
    fs::create_dir(dir.path().join("player.gd")).unwrap();

    bin()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_read_only_target_fails() {
    let dir = setup_test_directory();
    let path = dir.path().join("player.gd");
    let mut permissions = fs::metadata(&path).unwrap().permissions();
    permissions.set_readonly(true);
    fs::set_permissions(&path, permissions).unwrap();

    bin()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to replace"));

    assert_eq!(fs::read_to_string(&path).unwrap(), PLAYER_GD);
}
