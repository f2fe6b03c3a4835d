use std::io::Write;
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/test.html");

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_html2data"))
        .args(args)
        .stdin(Stdio::null())
        .env_remove("HTML2DATA_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_plain_text() {
    let output = run(&[FIXTURE, "h1"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Head1\nHead2");
}

#[test]
fn test_plain_text_nested() {
    let output = run(&["--find-in", "div.article", FIXTURE, "h1"]);
    assert_eq!(stdout(&output), "0:\nHead1\nHead2");
}

#[test]
fn test_named_selectors_nested() {
    let output = run(&[
        "--find-in",
        "div.article",
        FIXTURE,
        ":heads",
        "h1:get(1)",
        ":links",
        "a:attr(href)",
    ]);
    assert_eq!(stdout(&output), "0:\nheads:\tHead1\nlinks:\turl");
}

#[test]
fn test_json() {
    let output = run(&["--json", FIXTURE, "h1"]);
    assert_eq!(stdout(&output), r#"{"one":["Head1","Head2"]}"#);

    let output = run(&["--json", "--find-in", "div.article", FIXTURE, "h1"]);
    assert_eq!(stdout(&output), r#"[{"one":["Head1","Head2"]}]"#);
}

#[test]
fn test_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_html2data"))
        .args(["-", "b"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"<p><b> bold </b></p>")
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert_eq!(stdout(&output), "bold");
}

#[test]
fn test_empty_target_prints_usage() {
    let output = run(&["", "div"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage:"));
}

#[test]
fn test_errors_exit_non_zero() {
    let missing = run(&["/dont exists file", "div"]);
    assert_eq!(missing.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&missing.stderr).contains("parse document error"));

    let bad_name = run(&[FIXTURE, ":name1", "div1", "name2", "div2"]);
    assert_eq!(bad_name.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&bad_name.stderr).contains("must begin from ':'"));

    let bad_selector = run(&[FIXTURE, "div<<<"]);
    assert_eq!(bad_selector.status.code(), Some(1));
    assert!(stdout(&bad_selector).is_empty());
}
