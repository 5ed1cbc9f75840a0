use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn ffc(vault: &Path, now: &str) -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("ffc")?;
    cmd.arg("--vault")
        .arg(vault)
        .env("FFC_NOW", now)
        .env("FFC_LANG", "en")
        .env_remove("FFC_BACKEND")
        .env_remove("FFC_DATA_JSON")
        .env_remove("FFC_DATA_DB");
    Ok(cmd)
}

fn snapshot(vault: &Path) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(vault.join(".forgetting-curve").join("data.json"))?;
    Ok(serde_json::from_str(&raw)?)
}

#[test]
fn duplicate_label_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    ffc(dir.path(), "2024-05-01 10:00:00")?
        .args(["label", "add", "Work"])
        .assert()
        .success()
        .stdout(contains("Created label Work"));
    ffc(dir.path(), "2024-05-01 10:00:00")?
        .args(["label", "add", "Work"])
        .assert()
        .failure()
        .stderr(contains("Already exists label: Work"));

    let snap = snapshot(dir.path())?;
    assert_eq!(snap["labels"].as_array().map(Vec::len), Some(1));
    Ok(())
}

#[test]
fn reminder_becomes_due() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("a.md"), "# a")?;
    ffc(dir.path(), "2024-05-01 10:00:00")?
        .args(["label", "add", "Work"])
        .assert()
        .success();
    ffc(dir.path(), "2024-05-01 10:00:00")?
        .args(["remind", "add", "a.md", "--label", "Work", "--note", "reread"])
        .assert()
        .success()
        .stdout(contains("Remind a.md at 2024-05-01 11:00:00"));

    let snap = snapshot(dir.path())?;
    assert_eq!(snap["files"][0]["file"], "a.md");
    assert_eq!(snap["files"][0]["level"], 60);
    assert_eq!(snap["files"][0]["date"], "2024-05-01 10:00:00");

    ffc(dir.path(), "2024-05-01 10:30:00")?
        .arg("notice")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    ffc(dir.path(), "2024-05-01 10:30:00")?
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Waiting for a reminder\n  a.md  30 minutes"));

    ffc(dir.path(), "2024-05-01 12:00:00")?
        .arg("notice")
        .assert()
        .success()
        .stdout(contains("File Expired!\na.md\n").and(contains("reread")));
    ffc(dir.path(), "2024-05-01 12:00:00")?
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Expired\n  a.md\n    reread\n"));
    Ok(())
}

#[test]
fn edit_moves_to_next_level() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("a.md"), "# a")?;
    ffc(dir.path(), "2024-05-01 10:00:00")?
        .args(["label", "add", "Work"])
        .assert()
        .success();
    ffc(dir.path(), "2024-05-01 10:00:00")?
        .args(["remind", "add", "a.md", "--label", "Work"])
        .assert()
        .success();
    ffc(dir.path(), "2024-05-01 12:00:00")?
        .args(["remind", "levels", "a.md"])
        .assert()
        .success()
        .stdout(contains("480\t2024-05-01 20:00:00 - 8 hours - Normal - Recommend"));
    ffc(dir.path(), "2024-05-01 12:00:00")?
        .args(["remind", "edit", "a.md", "--name", "Alpha"])
        .assert()
        .success()
        .stdout(contains("Remind a.md at 2024-05-01 20:00:00"));

    let snap = snapshot(dir.path())?;
    assert_eq!(snap["files"].as_array().map(Vec::len), Some(1));
    assert_eq!(snap["files"][0]["level"], 480);
    assert_eq!(snap["files"][0]["name"], "Alpha");
    assert_eq!(snap["files"][0]["date"], "2024-05-01 10:00:00");
    Ok(())
}

#[test]
fn unknown_level_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("a.md"), "# a")?;
    ffc(dir.path(), "2024-05-01 10:00:00")?
        .args(["label", "add", "Work"])
        .assert()
        .success();
    ffc(dir.path(), "2024-05-01 10:00:00")?
        .args(["remind", "add", "a.md", "--label", "Work", "--level", "61"])
        .assert()
        .failure()
        .stderr(contains("Unknown level: 61"));
    let snap = snapshot(dir.path())?;
    assert_eq!(snap["files"].as_array().map(Vec::len), Some(0));
    Ok(())
}

#[test]
fn missing_files_are_dropped_on_list() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("a.md"), "# a")?;
    fs::write(dir.path().join("b.md"), "# b")?;
    ffc(dir.path(), "2024-05-01 10:00:00")?
        .args(["label", "add", "Work"])
        .assert()
        .success();
    for file in ["a.md", "b.md"] {
        ffc(dir.path(), "2024-05-01 10:00:00")?
            .args(["remind", "add", file, "--label", "Work"])
            .assert()
            .success();
    }
    fs::remove_file(dir.path().join("b.md"))?;

    ffc(dir.path(), "2024-05-01 10:00:00")?
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout(contains("a.md").and(contains("b.md").not()));
    let snap = snapshot(dir.path())?;
    assert_eq!(snap["files"].as_array().map(Vec::len), Some(1));
    assert_eq!(snap["files"][0]["file"], "a.md");
    Ok(())
}

#[test]
fn remind_requires_existing_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    ffc(dir.path(), "2024-05-01 10:00:00")?
        .args(["label", "add", "Work"])
        .assert()
        .success();
    ffc(dir.path(), "2024-05-01 10:00:00")?
        .args(["remind", "add", "nope.md", "--label", "Work"])
        .assert()
        .failure()
        .stderr(contains("File not found: nope.md"));
    Ok(())
}

#[test]
fn panel_prints_selected_label() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("a.md"), "# a")?;
    ffc(dir.path(), "2024-05-01 10:00:00")?
        .args(["label", "add", "Work"])
        .assert()
        .success();
    ffc(dir.path(), "2024-05-01 10:00:00")?
        .args(["remind", "add", "a.md", "--label", "Work", "--level", "20"])
        .assert()
        .success();
    ffc(dir.path(), "2024-05-01 11:00:00")?
        .args(["panel", "--width", "40", "--height", "5"])
        .assert()
        .success()
        .stdout(contains("File Forgetting Curve [Work]\nExpired\n- a.md\n"));
    Ok(())
}

#[test]
fn panel_with_unknown_label_is_empty() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("a.md"), "# a")?;
    ffc(dir.path(), "2024-05-01 10:00:00")?
        .args(["label", "add", "Work"])
        .assert()
        .success();
    ffc(dir.path(), "2024-05-01 10:00:00")?
        .args(["remind", "add", "a.md", "--label", "Work", "--level", "20"])
        .assert()
        .success();
    ffc(dir.path(), "2024-05-01 11:00:00")?
        .args(["panel", "--label", "Nope", "--width", "40", "--height", "5"])
        .assert()
        .success()
        .stdout(contains(
            "File Forgetting Curve [Nope]\nExpired\n-\nWaiting for a reminder\n-\n",
        ));
    Ok(())
}

#[test]
fn paths_resolve_from_a_vault_subdirectory() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub)?;
    fs::write(sub.join("a.md"), "# a")?;
    ffc(dir.path(), "2024-05-01 10:00:00")?
        .args(["label", "add", "Work"])
        .assert()
        .success();
    ffc(dir.path(), "2024-05-01 10:00:00")?
        .current_dir(&sub)
        .args(["remind", "add", "a.md", "--label", "Work"])
        .assert()
        .success()
        .stdout(contains("Remind sub/a.md at"));

    fs::remove_file(sub.join("a.md"))?;
    ffc(dir.path(), "2024-05-01 10:00:00")?
        .current_dir(&sub)
        .args(["remind", "rm", "a.md"])
        .assert()
        .success()
        .stdout(contains("Removed reminder for sub/a.md"));
    let snap = snapshot(dir.path())?;
    assert_eq!(snap["files"].as_array().map(Vec::len), Some(0));
    Ok(())
}
