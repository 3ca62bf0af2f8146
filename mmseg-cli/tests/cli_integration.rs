//! Integration tests for the mmseg CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write a data directory with `chars.dic` and `words.dic`
fn write_dictionaries(dir: &Path) {
    fs::write(dir.join("chars.dic"), "的 9.5\n和 6.3\n服 3.1\n务 2.2\n").unwrap();
    fs::write(
        dir.join("words.dic"),
        "研究\n研究生\n生命\n起源\n和服\n服务\n中国\n人民\n",
    )
    .unwrap();
}

fn mmseg() -> Command {
    Command::cargo_bin("mmseg").unwrap()
}

#[test]
fn test_segment_text_output() {
    let temp_dir = TempDir::new().unwrap();
    write_dictionaries(temp_dir.path());
    let input = temp_dir.path().join("input.txt");
    fs::write(&input, "研究生命起源\n中国人民").unwrap();

    mmseg()
        .arg("segment")
        .arg("-i")
        .arg(&input)
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("-q")
        .assert()
        .success()
        .stdout("研究 生命 起源\n中国 人民\n");
}

#[test]
fn test_segment_from_stdin_with_delimiter() {
    let temp_dir = TempDir::new().unwrap();
    write_dictionaries(temp_dir.path());

    mmseg()
        .args(["segment", "-i", "-", "-q", "--delimiter", "/"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .write_stdin("和服务")
        .assert()
        .success()
        .stdout("和/服务\n");
}

#[test]
fn test_simple_mode() {
    let temp_dir = TempDir::new().unwrap();
    write_dictionaries(temp_dir.path());

    mmseg()
        .args(["segment", "-i", "-", "-q", "-m", "simple"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .write_stdin("研究生命")
        .assert()
        .success()
        .stdout("研究生 命\n");
}

#[test]
fn test_json_output() {
    let temp_dir = TempDir::new().unwrap();
    write_dictionaries(temp_dir.path());

    let output = mmseg()
        .args(["segment", "-i", "-", "-q", "-f", "json"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .write_stdin("中国 2024")
        .output()
        .unwrap();
    assert!(output.status.success());

    let docs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let tokens = docs[0]["tokens"].as_array().unwrap();
    assert_eq!(docs[0]["source"], "-");
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0]["text"], "中国");
    assert_eq!(tokens[2]["text"], "2024");
    assert_eq!(tokens[2]["offset"], 7);
    assert_eq!(tokens[2]["kind"], "digit");
}

#[test]
fn test_json_length_of_malformed_byte() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("bad.txt");
    fs::write(&input, [0xFF, b'a']).unwrap();

    let output = mmseg()
        .arg("segment")
        .arg("-i")
        .arg(&input)
        .args(["-q", "-f", "json"])
        .env_remove("MMSEG_DATA_DIR")
        .output()
        .unwrap();
    assert!(output.status.success());

    let docs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let tokens = docs[0]["tokens"].as_array().unwrap();
    assert_eq!(tokens[0]["kind"], "undecoded");
    assert_eq!(tokens[0]["offset"], 0);
    assert_eq!(tokens[0]["length"], 1);
    assert_eq!(tokens[1]["offset"], 1);
    assert_eq!(tokens[1]["length"], 1);
}

#[test]
fn test_tokens_output_to_file() {
    let temp_dir = TempDir::new().unwrap();
    write_dictionaries(temp_dir.path());
    let input = temp_dir.path().join("in.txt");
    let output = temp_dir.path().join("out.txt");
    fs::write(&input, "人民，").unwrap();

    mmseg()
        .arg("segment")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["-f", "tokens", "-q"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout("");

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("0\t6\tword\t人民"));
    assert!(content.contains("6\t3\tpunctuation\t，"));
}

#[test]
fn test_glob_input_in_parallel() {
    let temp_dir = TempDir::new().unwrap();
    write_dictionaries(temp_dir.path());
    fs::write(temp_dir.path().join("a.txt"), "中国").unwrap();
    fs::write(temp_dir.path().join("b.txt"), "人民").unwrap();
    let pattern = temp_dir.path().join("*.txt");

    mmseg()
        .arg("segment")
        .arg("-i")
        .arg(pattern.to_str().unwrap())
        .args(["-p", "-q"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout("中国\n人民\n");
}

#[test]
fn test_config_file() {
    let temp_dir = TempDir::new().unwrap();
    write_dictionaries(temp_dir.path());
    let config = temp_dir.path().join("mmseg.toml");
    fs::write(
        &config,
        "[dictionary]\ndata_dir = \".\"\n\n[output]\ndelimiter = \" | \"\n",
    )
    .unwrap();

    mmseg()
        .args(["segment", "-i", "-", "-q", "-c"])
        .arg(&config)
        .write_stdin("研究生命")
        .assert()
        .success()
        .stdout("研究 | 生命\n");
}

#[test]
fn test_no_dictionary_splits_characters() {
    mmseg()
        .args(["segment", "-i", "-", "-q"])
        .env_remove("MMSEG_DATA_DIR")
        .write_stdin("中国 abc")
        .assert()
        .success()
        .stdout("中 国 abc\n");
}

#[test]
fn test_missing_dictionary_fails() {
    mmseg()
        .args(["segment", "-i", "-", "-q", "--words", "/nonexistent/words.dic"])
        .write_stdin("中国")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load dictionary"));
}

#[test]
fn test_nonexistent_input() {
    mmseg()
        .args(["segment", "-i", "/nonexistent/*.txt", "-q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_list_formats() {
    mmseg()
        .args(["list", "formats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("text"))
        .stdout(predicate::str::contains("json"))
        .stdout(predicate::str::contains("tokens"));
}

#[test]
fn test_list_modes() {
    mmseg()
        .args(["list", "modes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complex"))
        .stdout(predicate::str::contains("simple"));
}

#[test]
fn test_help_output() {
    mmseg()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("segment"))
        .stdout(predicate::str::contains("list"));
}
