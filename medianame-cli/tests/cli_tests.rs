use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Working directory with a `media` folder holding the given files
fn workspace(files: &[&str]) -> TempDir {
    let temp = TempDir::new().unwrap();
    let media = temp.child("media");
    media.create_dir_all().unwrap();
    for name in files {
        media
            .child(name)
            .write_str(&format!("content of {}", name))
            .unwrap();
    }
    temp
}

fn medianame(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("medianame").unwrap();
    cmd.current_dir(temp.path())
        .env("NO_COLOR", "1")
        .env_remove("MEDIANAME_YES")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("medianame").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Safe batch renaming"));
}

#[test]
fn test_version_subcommand() {
    let temp = TempDir::new().unwrap();
    medianame(&temp)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("medianame 0.1.0"));
    temp.child(".medianame").assert(predicate::path::missing());
}

#[test]
fn test_version_subcommand_json() {
    let temp = TempDir::new().unwrap();
    medianame(&temp)
        .args(["version", "--output", "json"])
        .assert()
        .success()
        .stdout(
            predicate::str::is_match(r#"\{"name":"medianame","version":"0\.1\.0"\}"#).unwrap(),
        );
}

#[test]
fn test_remove_then_undo_round_trip() {
    let temp = workspace(&["lessonPart1.mp4", "notes.txt"]);

    medianame(&temp)
        .args(["remove", "lesson", "--folder", "media", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed: lessonPart1.mp4 -> Part1.mp4"));

    temp.child("media/Part1.mp4").assert("content of lessonPart1.mp4");
    temp.child("media/lessonPart1.mp4").assert(predicate::path::missing());
    temp.child("media/notes.txt").assert(predicate::path::exists());
    temp.child(".medianame/undo.json").assert(predicate::path::exists());

    medianame(&temp)
        .arg("undo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Undid: Part1.mp4 -> lessonPart1.mp4"));

    temp.child("media/lessonPart1.mp4").assert("content of lessonPart1.mp4");
    temp.child("media/Part1.mp4").assert(predicate::path::missing());

    medianame(&temp)
        .arg("undo")
        .assert()
        .success()
        .stdout(predicate::str::contains("No actions to undo."));
}

#[test]
fn test_replace_dry_run_changes_nothing() {
    let temp = workspace(&["part3 intro.mkv"]);

    medianame(&temp)
        .args(["replace", r"part(\d+)", "--with", "Episode $1 -", "--dry-run"])
        .args(["--folder", "media"])
        .assert()
        .success()
        .stdout(predicate::str::contains("part3 intro.mkv"))
        .stdout(predicate::str::contains("Episode 3 - intro.mkv"));

    temp.child("media/part3 intro.mkv").assert(predicate::path::exists());
    temp.child(".medianame/undo.json").assert(predicate::path::missing());
}

#[test]
fn test_declining_the_prompt_cancels() {
    let temp = workspace(&["lessonPart1.mp4"]);

    medianame(&temp)
        .args(["remove", "lesson", "--folder", "media"])
        .write_stdin("n\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Apply these changes? [y/N]"))
        .stderr(predicate::str::contains("Operation cancelled."));

    temp.child("media/lessonPart1.mp4").assert(predicate::path::exists());
    temp.child("media/Part1.mp4").assert(predicate::path::missing());
}

#[test]
fn test_accepting_the_prompt_applies() {
    let temp = workspace(&["lessonPart1.mp4"]);

    medianame(&temp)
        .args(["remove", "lesson", "--folder", "media"])
        .write_stdin("y\n")
        .assert()
        .success();

    temp.child("media/Part1.mp4").assert(predicate::path::exists());
}

#[test]
fn test_duplicates_prompt_comes_first() {
    let temp = workspace(&["talk.mp4", "talk.pdf", "lessonPart1.mp4"]);

    medianame(&temp)
        .args(["remove", "lesson", "--folder", "media"])
        .write_stdin("n\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Duplicate filenames detected:"))
        .stderr(predicate::str::contains("- talk"))
        .stderr(predicate::str::contains("Continue anyway?"));

    temp.child("media/lessonPart1.mp4").assert(predicate::path::exists());
}

#[test]
fn test_existing_target_is_not_overwritten() {
    let temp = workspace(&["target.mp4", "targetX.mp4"]);

    medianame(&temp)
        .args(["remove", "x", "--folder", "media", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("skip (target exists)"));

    temp.child("media/target.mp4").assert("content of target.mp4");
    temp.child("media/targetX.mp4").assert("content of targetX.mp4");
}

#[test]
fn test_env_flags_accept_one() {
    let temp = workspace(&["lessonPart1.mp4"]);

    Command::cargo_bin("medianame")
        .unwrap()
        .current_dir(temp.path())
        .env("NO_COLOR", "1")
        .env("MEDIANAME_YES", "1")
        .env_remove("RUST_LOG")
        .args(["remove", "lesson", "--folder", "media"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[y/N]").not());

    temp.child("media/Part1.mp4").assert(predicate::path::exists());
}

#[test]
fn test_quiet_still_reports_skips() {
    let temp = workspace(&["target.mp4", "targetX.mp4", "clipX.mp4"]);

    medianame(&temp)
        .args(["remove", "x", "--folder", "media", "--yes", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed:").not())
        .stderr(predicate::str::contains("[SKIP] targetX.mp4 -> target.mp4"));

    temp.child("media/clip.mp4").assert("content of clipX.mp4");
    temp.child("media/target.mp4").assert("content of target.mp4");
}

#[test]
fn test_json_output_keeps_skips_on_stderr() {
    let temp = workspace(&["target.mp4", "targetX.mp4"]);

    let output = medianame(&temp)
        .args(["remove", "x", "--folder", "media", "--yes", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["operation"], "preview");
    assert_eq!(value["summary"]["skipped"], 1);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[SKIP] targetX.mp4 -> target.mp4"));
}

#[test]
fn test_replace_help_explains_literal_dollar() {
    let mut cmd = Command::cargo_bin("medianame").unwrap();
    cmd.args(["replace", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$$"));
}

#[test]
fn test_invalid_pattern_exits_with_code_2() {
    let temp = workspace(&["lessonPart1.mp4"]);

    medianame(&temp)
        .args(["remove", "[", "--folder", "media", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid regex patterns: ["));
}

#[test]
fn test_missing_folder_exits_with_code_2() {
    let temp = TempDir::new().unwrap();

    medianame(&temp)
        .arg("titles")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No folder selected"));

    medianame(&temp)
        .args(["titles", "--folder", "nowhere"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Not a directory"));
}

#[test]
fn test_folder_is_remembered() {
    let temp = workspace(&["intro.mp4", "intro.pdf", "outro.mov"]);

    medianame(&temp)
        .args(["titles", "--folder", "media"])
        .assert()
        .success();
    temp.child(".medianame/config.json")
        .assert(predicate::str::contains("last_folder"));

    medianame(&temp)
        .arg("titles")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unique file titles:"))
        .stdout(predicate::str::contains("- intro"))
        .stdout(predicate::str::contains("- outro"));
}

#[test]
fn test_json_output_for_dry_run() {
    let temp = workspace(&["lessonPart1.mp4", "lessonPart2.pdf"]);

    let output = medianame(&temp)
        .args(["remove", "lesson", "--dry-run", "--output", "json", "--folder", "media"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["operation"], "preview");
    assert_eq!(value["summary"]["renames"], 2);
    assert_eq!(value["entries"][0]["source_name"], "lessonPart1.mp4");
    assert_eq!(value["entries"][0]["target_name"], "Part1.mp4");
}

#[test]
fn test_organize_and_undo() {
    let temp = workspace(&["clip.mkv", "readme.txt"]);
    let date = medianame_core::date_folder_name(temp.child("media/clip.mkv").path()).unwrap();

    medianame(&temp)
        .args(["organize", "--folder", "media", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files organized by creation date."));

    temp.child(format!("media/{date}/clip.mkv"))
        .assert(predicate::path::exists());
    temp.child("media/readme.txt").assert(predicate::path::exists());

    medianame(&temp).arg("undo").assert().success();

    temp.child("media/clip.mkv").assert("content of clip.mkv");
    temp.child(format!("media/{date}")).assert(predicate::path::missing());
}

#[test]
fn test_backup_command() {
    let temp = workspace(&["clip.mkv"]);

    let output = medianame(&temp)
        .args(["backup", "--folder", "media", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let backup_dir = std::path::PathBuf::from(value["backup_dir"].as_str().unwrap());
    assert!(backup_dir
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("backup_"));
    assert_eq!(
        std::fs::read_to_string(backup_dir.join("clip.mkv")).unwrap(),
        "content of clip.mkv"
    );
}

#[test]
fn test_status_reports_pending_undo() {
    let temp = workspace(&["lessonPart1.mp4"]);

    medianame(&temp)
        .args(["remove", "lesson", "--folder", "media", "--yes"])
        .assert()
        .success();

    medianame(&temp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Undo available: 1 changes"));
}

#[test]
fn test_log_file_is_written() {
    let temp = workspace(&["lessonPart1.mp4"]);

    medianame(&temp)
        .args(["remove", "lesson", "--folder", "media", "--yes"])
        .assert()
        .success();

    temp.child(".medianame/medianame.log")
        .assert(predicate::str::contains("renamed"));
}
