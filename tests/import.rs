//! Import tests against real files in a temporary project directory

use std::fs;

use lpl::{ErrorKind, Interpreter};
use tempfile::TempDir;

fn interpreter(root: &std::path::Path) -> Interpreter<lpl::BufferConsole> {
    Interpreter::buffered(Vec::<String>::new()).with_root(root)
}

#[test]
fn test_import_shares_state() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::write(
        root.join("lib.lpl"),
        "const GREETING, \"hello\"\nproc greet\necho GREETING\nend\n",
    )
    .unwrap();

    let mut lpl = interpreter(root);
    lpl.run_source("echo \"start\"\nimport \"lib.lpl\"\nrun greet\necho GREETING")
        .unwrap();
    assert_eq!(lpl.console().output(), "start\nhello\nhello\n");
}

#[test]
fn test_import_runs_before_following_lines() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("side.lpl"), "echo \"side\"\n+ 1, 2\n").unwrap();

    let mut lpl = interpreter(root);
    lpl.run_source("import \"side.lpl\"\necho ^").unwrap();
    assert_eq!(lpl.console().output(), "side\n3.0\n");
}

#[test]
fn test_missing_import_is_fatal() {
    let temp = TempDir::new().unwrap();

    let mut lpl = interpreter(temp.path());
    let err = lpl.run_source("import \"nope.lpl\"").unwrap_err();
    assert_eq!(err.kind, ErrorKind::ImportNotFound("nope.lpl".into()));
    assert_eq!(err.line, Some(1));
}

#[test]
fn test_import_found_only_in_subdirectory_fails_to_open() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir(root.join("lib")).unwrap();
    fs::write(root.join("lib").join("deep.lpl"), "echo 1\n").unwrap();

    let mut lpl = interpreter(root);
    let err = lpl.run_source("import \"deep.lpl\"").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ImportFailed { ref name, .. } if name == "deep.lpl"));
}

#[test]
fn test_errors_inside_import_are_fatal() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("bad.lpl"), "echo 1\nvar x, undefined_name\n").unwrap();

    let mut lpl = interpreter(root);
    let err = lpl.run_source("import \"bad.lpl\"\necho 2").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UndefinedName("undefined_name".into()));
    // The line counter keeps counting through imported lines
    assert_eq!(err.line, Some(3));
    assert_eq!(lpl.console().output(), "1\n");
}

#[test]
fn test_circular_import_overflows() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("a.lpl"), "import \"b.lpl\"\n").unwrap();
    fs::write(root.join("b.lpl"), "import \"a.lpl\"\n").unwrap();

    let mut lpl = interpreter(root);
    let err = lpl.run_source("import \"a.lpl\"").unwrap_err();
    assert_eq!(err.kind, ErrorKind::StackOverflow);
}

#[test]
fn test_run_file() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let script = root.join("main.lpl");
    fs::write(&script, "var n, 4\n* n, n\necho \"n^2=\", ^\n").unwrap();

    let mut lpl = interpreter(root);
    lpl.run_file(&script).unwrap();
    assert_eq!(lpl.console().output(), "n^2=16.0\n");
}
