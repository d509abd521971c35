use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

const PIPELINE: &str = "\
service:
  flush: 1
pipeline:
  inputs:
    - name: dummy
      tag: dummy.data
  outputs:
    - name: stdout
      match: '*'
multiline_parsers:
  - name: ml
    type: regex
    rules:
      - state: start_state
        regex: /a/
        next_state: cont
";

fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write test file");
}

#[test]
fn converts_file_to_stdout() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("fluent-bit.yaml");
    write_file(&input, PIPELINE);

    cargo_bin_cmd!("fluentbit-classic")
        .arg(&input)
        .assert()
        .success()
        .stdout(concat!(
            "[SERVICE]\n",
            "    flush 1\n",
            "[INPUT]\n",
            "    name dummy\n",
            "    tag  dummy.data\n",
            "[MULTILINE_PARSER]\n",
            "    name ml\n",
            "    type regex\n",
            "    rule \"start_state\" \"/a/\" \"cont\"\n",
            "[OUTPUT]\n",
            "    name  stdout\n",
            "    match *\n",
        ));
}

#[test]
fn reads_stdin() {
    cargo_bin_cmd!("fluentbit-classic")
        .write_stdin("env:\n  level: info\n")
        .assert()
        .success()
        .stdout("@SET level=info\n");
}

#[test]
fn multiline_after_outputs() {
    let output = cargo_bin_cmd!("fluentbit-classic")
        .args(["-", "--multiline-placement", "after-outputs"])
        .write_stdin(PIPELINE)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).expect("utf-8 output");
    let headers: Vec<&str> = text.lines().filter(|l| l.starts_with('[')).collect();
    assert_eq!(headers, ["[SERVICE]", "[INPUT]", "[OUTPUT]", "[MULTILINE_PARSER]"]);
}

#[test]
fn custom_indent() {
    cargo_bin_cmd!("fluentbit-classic")
        .args(["--indent", "2"])
        .write_stdin("pipeline:\n  outputs:\n    - name: stdout\n")
        .assert()
        .success()
        .stdout("[OUTPUT]\n  name stdout\n");
}

#[test]
fn writes_output_file() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("in.yaml");
    let output = dir.path().join("out.conf");
    write_file(&input, "includes:\n  - inputs.conf\n");

    cargo_bin_cmd!("fluentbit-classic")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout("")
        .stderr(contains("Converted"));

    assert_eq!(
        fs::read_to_string(&output).expect("read output"),
        "@INCLUDE inputs.conf\n"
    );
}

#[test]
fn unknown_field_fails() {
    cargo_bin_cmd!("fluentbit-classic")
        .write_stdin("pipelines:\n  inputs: []\n")
        .assert()
        .code(1)
        .stdout("")
        .stderr(contains("ERROR  ").and(contains("pipelines")));
}

#[test]
fn empty_input_fails() {
    cargo_bin_cmd!("fluentbit-classic")
        .write_stdin("# nothing here\n")
        .assert()
        .code(1)
        .stderr(contains("ERROR  input document is empty"));
}

#[test]
fn lua_code_must_be_string() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("bad.yaml");
    let output = dir.path().join("out.conf");
    write_file(
        &input,
        "pipeline:\n  filters:\n    - name: lua\n      match: '*'\n      code: 12\n",
    );

    cargo_bin_cmd!("fluentbit-classic")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .code(1)
        .stderr(contains("code field for custom lua filter is invalid"));

    assert!(!output.exists());
}

#[test]
fn missing_input_file_fails() {
    cargo_bin_cmd!("fluentbit-classic")
        .arg("does-not-exist.yaml")
        .assert()
        .code(1)
        .stderr(contains("ERROR  failed to read does-not-exist.yaml"));
}

#[test]
fn beautifies_lua() {
    cargo_bin_cmd!("fluentbit-classic")
        .arg("--beautify-lua")
        .write_stdin("function cb(t,ts,r)return 1,ts,r end")
        .assert()
        .success()
        .stdout("function cb(t, ts, r)\n  return 1, ts, r\nend\n");
}

#[test]
fn rejects_unknown_placement() {
    cargo_bin_cmd!("fluentbit-classic")
        .args(["--multiline-placement", "nowhere"])
        .write_stdin("env:\n  a: b\n")
        .assert()
        .failure();
}
