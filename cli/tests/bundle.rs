use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SEPARATOR: &str = "-------------------------------------------";

fn fib(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fib").expect("binary exists");
    cmd.current_dir(dir).env_remove("PROJECT_ROOT");
    cmd
}

/// `a.js` (10 lines, 2 blank), `b.html`, `Dockerfile`, `config.json`.
fn sample_project() -> TempDir {
    let temp = tempfile::tempdir().expect("temp dir");
    let root = temp.path();
    let a_js = [
        "const a = 1;",
        "",
        "function f() {",
        "  return a;",
        "}",
        "",
        "f();",
        "console.log(a);",
        "export { f };",
        "// end",
    ]
    .join("\n");
    fs::write(root.join("a.js"), a_js).unwrap();
    fs::write(root.join("b.html"), "<html></html>").unwrap();
    fs::write(root.join("Dockerfile"), "FROM scratch").unwrap();
    fs::write(root.join("config.json"), "{}").unwrap();
    temp
}

fn content_lines(bundle: &str, name: &str) -> usize {
    let marker = format!("File Name: {name}\nFile Content:\n");
    let start = bundle.find(&marker).expect("file block") + marker.len();
    let end = start + bundle[start..].find(SEPARATOR).expect("separator");
    bundle[start..end].lines().count()
}

#[test]
fn help_displays_usage() {
    Command::cargo_bin("fib")
        .expect("binary exists")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[cfg(unix)]
#[test]
fn bundles_selected_languages_by_name() {
    let project = sample_project();
    fib(project.path())
        .args(["bundle", "-o", "bundle.md", "-l", "js html", "-s", "name"])
        .assert()
        .success()
        .stdout(predicate::str::contains("File was created"));

    let bundle = fs::read_to_string(project.path().join("bundle.md")).unwrap();
    assert_eq!(bundle.matches("File Name: ").count(), 2);
    let a = bundle.find("File Name: a.js").unwrap();
    let b = bundle.find("File Name: b.html").unwrap();
    assert!(a < b);
    assert!(!bundle.contains("Dockerfile"));
    assert!(!bundle.contains("config.json"));
    assert!(!bundle.contains("author:"));
    assert_eq!(content_lines(&bundle, "a.js"), 10);
}

#[cfg(unix)]
#[test]
fn remove_empty_lines_and_note() {
    let project = sample_project();
    fib(project.path())
        .args([
            "bundle", "-o", "bundle.md", "-l", "js html", "-r", "-n", "-a", "Ada",
        ])
        .assert()
        .success();

    let bundle = fs::read_to_string(project.path().join("bundle.md")).unwrap();
    let mut lines = bundle.lines();
    assert!(lines.next().unwrap().starts_with("output: '"));
    assert_eq!(lines.next(), Some("author: Ada"));
    assert_eq!(lines.next(), Some(SEPARATOR));
    // eight content lines plus the note
    assert_eq!(content_lines(&bundle, "a.js"), 9);
    assert!(bundle.contains("#Source: a.js (Relative Path: a.js)#"));
    assert!(bundle.contains("#Source: b.html (Relative Path: b.html)#"));
}

#[test]
fn invalid_sort_is_rejected_without_output() {
    let project = sample_project();
    fib(project.path())
        .args(["bundle", "-o", "bundle.md", "-l", "all", "--sort", "foo"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("invalid sort option 'foo'"));
    assert!(!project.path().join("bundle.md").exists());
}

#[test]
fn missing_required_options_are_reported() {
    let project = sample_project();
    fib(project.path())
        .args(["bundle", "-l", "all"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("output option is required!"));

    fib(project.path())
        .args(["bundle", "-o", "bundle.md"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("languages option is required!"));
    assert!(!project.path().join("bundle.md").exists());
}

#[test]
fn missing_output_directory_is_a_path_error() {
    let project = sample_project();
    fib(project.path())
        .args(["bundle", "-o", "nowhere/bundle.md", "-l", "all"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("File path is invalid"));
    assert!(!project.path().join("nowhere").exists());
}

#[cfg(unix)]
#[test]
fn unreadable_source_fails_the_run() {
    let project = sample_project();
    std::os::unix::fs::symlink(
        project.path().join("gone.js"),
        project.path().join("broken.js"),
    )
    .unwrap();

    fib(project.path())
        .args(["bundle", "-o", "bundle.md", "-l", "js"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("File Read Error"))
        .stdout(predicate::str::contains("File was created").not());
}

#[test]
fn workspace_config_replaces_exclusions() {
    let project = sample_project();
    let config_dir = project.path().join(".fib");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("fib.toml"),
        "[exclude]\nextensions = [\".js\", \".toml\"]\n",
    )
    .unwrap();

    fib(project.path())
        .args(["bundle", "-o", "bundle.md", "-l", "all"])
        .assert()
        .success();

    let bundle = fs::read_to_string(project.path().join("bundle.md")).unwrap();
    assert!(!bundle.contains("File Name: a.js"));
    assert!(bundle.contains("File Name: b.html"));
    assert!(bundle.contains("File Name: config.json"));
    assert!(!bundle.contains("File Name: Dockerfile"));
}

#[test]
fn explicit_project_root_is_bundled() {
    let project = sample_project();
    let elsewhere = tempfile::tempdir().unwrap();
    let output = elsewhere.path().join("bundle.md");

    fib(elsewhere.path())
        .arg("bundle")
        .arg("--project-root")
        .arg(project.path())
        .arg("-o")
        .arg(&output)
        .args(["-l", "html"])
        .assert()
        .success();

    let bundle = fs::read_to_string(output).unwrap();
    assert_eq!(bundle.matches("File Name: ").count(), 1);
    assert!(bundle.contains("File Name: b.html"));
}

#[test]
fn missing_project_root_is_a_path_error() {
    let project = sample_project();
    fib(project.path())
        .args(["bundle", "--project-root", "absent", "-o", "bundle.md", "-l", "all"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Project root"));
    assert!(!project.path().join("bundle.md").exists());
}

#[test]
fn config_command_prints_defaults() {
    let project = sample_project();
    fib(project.path())
        .args(["config", "--disable-config-file"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[exclude]"))
        .stdout(predicate::str::contains("Dockerfile"))
        .stdout(predicate::str::contains("folder_match = \"substring\""));
}
