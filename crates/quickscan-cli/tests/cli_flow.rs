use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

use image::{Rgb, RgbImage};

use quickscan_core::crypto::ENCRYPTED_PREFIX;
use quickscan_core::qr;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_quickscan"))
}

fn temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("{}_{}_{}", prefix, std::process::id(), nanos));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

/// Point config and data lookups at the temp dir so user config never leaks in.
fn cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(bin());
    cmd.env("XDG_CONFIG_HOME", dir.join("config"))
        .env("XDG_DATA_HOME", dir.join("data"))
        .env_remove("QUICKSCAN_PASSWORD")
        .env_remove("QUICKSCAN_HISTORY");
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_generate_and_scan_plain() {
    let dir = temp_dir("qs_plain");
    let png = dir.join("qr.png");
    let history = dir.join("history.txt");

    let output = cmd(&dir)
        .args(["generate", "hello world", "--out"])
        .arg(&png)
        .arg("--history")
        .arg(&history)
        .arg("--no-input")
        .output()
        .expect("run generate");
    assert!(output.status.success(), "generate failed: {:?}", output);
    assert!(png.exists());

    let output = cmd(&dir)
        .args(["scan"])
        .arg(&png)
        .arg("--history")
        .arg(&history)
        .arg("--no-input")
        .output()
        .expect("run scan");
    assert!(output.status.success(), "scan failed: {:?}", output);
    assert_eq!(stdout(&output).trim_end(), "hello world");

    let log = std::fs::read_to_string(&history).expect("read history");
    assert!(log.starts_with("QUICKSCAN QR HISTORY"));
    assert!(log.contains("[Generated] Type: Text | Content: hello world"));
    assert!(log.contains("[Scanned] Type: Text | Content: hello world"));
}

#[test]
fn test_generate_url_normalizes_scheme() {
    let dir = temp_dir("qs_url");
    let png = dir.join("qr.png");

    let output = cmd(&dir)
        .args(["generate", "example.com", "--url", "--no-history", "--out"])
        .arg(&png)
        .arg("--no-input")
        .output()
        .expect("run generate");
    assert!(output.status.success(), "generate failed: {:?}", output);

    let scanned = qr::decode(&image::open(&png).expect("open png"))
        .expect("decode")
        .expect("symbol expected");
    assert_eq!(scanned, "http://example.com");
}

#[test]
fn test_generate_encrypted_and_scan() {
    let dir = temp_dir("qs_enc");
    let png = dir.join("qr.png");
    let history = dir.join("history.txt");

    let output = cmd(&dir)
        .args(["generate", "secret note", "--encrypt", "--out"])
        .arg(&png)
        .arg("--history")
        .arg(&history)
        .arg("--no-input")
        .env("QUICKSCAN_PASSWORD", "secret123")
        .output()
        .expect("run generate");
    assert!(output.status.success(), "generate failed: {:?}", output);

    // The symbol must carry the marker and payload, not the plaintext
    let embedded = qr::decode(&image::open(&png).expect("open png"))
        .expect("decode")
        .expect("symbol expected");
    assert!(embedded.starts_with(ENCRYPTED_PREFIX));
    assert!(!embedded.contains("secret note"));

    let output = cmd(&dir)
        .args(["scan"])
        .arg(&png)
        .arg("--history")
        .arg(&history)
        .arg("--no-input")
        .env("QUICKSCAN_PASSWORD", "secret123")
        .output()
        .expect("run scan");
    assert!(output.status.success(), "scan failed: {:?}", output);
    assert_eq!(stdout(&output).trim_end(), "secret note");

    let log = std::fs::read_to_string(&history).expect("read history");
    assert!(log.contains("[Generated] (Encrypted)"));
    assert!(log.contains("[Scanned (Decrypted)] (Encrypted)"));
}

#[test]
fn test_scan_encrypted_wrong_password_fails_with_auth_code() {
    let dir = temp_dir("qs_wrong");
    let png = dir.join("qr.png");

    let output = cmd(&dir)
        .args(["generate", "secret note", "--encrypt", "--no-history", "--out"])
        .arg(&png)
        .arg("--no-input")
        .env("QUICKSCAN_PASSWORD", "secret123")
        .output()
        .expect("run generate");
    assert!(output.status.success());

    let output = cmd(&dir)
        .args(["scan"])
        .arg(&png)
        .args(["--no-history", "--no-input"])
        .env("QUICKSCAN_PASSWORD", "not-the-password")
        .output()
        .expect("run scan");
    assert_eq!(output.status.code(), Some(5));
    assert!(stdout(&output).is_empty(), "no content on failed decryption");
}

#[test]
fn test_scan_malformed_encrypted_falls_back_to_plain() {
    let dir = temp_dir("qs_malformed");
    let png = dir.join("qr.png");

    // Content that carries the marker but is not a valid payload
    let content = format!("{}not-a-valid-payload", ENCRYPTED_PREFIX);
    let output = cmd(&dir)
        .arg("generate")
        .arg(&content)
        .args(["--no-history", "--out"])
        .arg(&png)
        .arg("--no-input")
        .output()
        .expect("run generate");
    assert!(output.status.success());

    let output = cmd(&dir)
        .args(["scan"])
        .arg(&png)
        .args(["--no-history", "--no-input"])
        .env("QUICKSCAN_PASSWORD", "whatever")
        .output()
        .expect("run scan");
    assert!(output.status.success(), "scan failed: {:?}", output);
    assert_eq!(stdout(&output).trim_end(), content);
}

#[test]
fn test_scan_blank_image_exits_not_found() {
    let dir = temp_dir("qs_blank");
    let png = dir.join("blank.png");
    RgbImage::from_pixel(200, 200, Rgb([255, 255, 255]))
        .save(&png)
        .expect("save blank image");

    let output = cmd(&dir)
        .args(["scan"])
        .arg(&png)
        .args(["--no-history", "--no-input"])
        .output()
        .expect("run scan");
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_scan_json_output() {
    let dir = temp_dir("qs_json");
    let png = dir.join("qr.png");

    let output = cmd(&dir)
        .args(["generate", "https://example.com", "--no-history", "--out"])
        .arg(&png)
        .arg("--no-input")
        .output()
        .expect("run generate");
    assert!(output.status.success());

    let output = cmd(&dir)
        .args(["scan"])
        .arg(&png)
        .args(["--no-history", "--no-input", "--format", "json"])
        .output()
        .expect("run scan");
    assert!(output.status.success(), "scan failed: {:?}", output);

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid json");
    assert_eq!(value["content"], "https://example.com");
    assert_eq!(value["content_type"], "URL");
    assert_eq!(value["encrypted"], false);
}
