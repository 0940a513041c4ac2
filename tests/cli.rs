use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir() -> PathBuf {
    let mut path = std::env::temp_dir();
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    path.push(format!("mdroff-test-{}-{}", std::process::id(), stamp));
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

fn mdroff_bin() -> PathBuf {
    if let Some(path) = option_env!("CARGO_BIN_EXE_mdroff") {
        return PathBuf::from(path);
    }
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("target");
    path.push("debug");
    if cfg!(windows) {
        path.push("mdroff.exe");
    } else {
        path.push("mdroff");
    }
    path
}

const SOURCE: &str = "# mdroff 1 \"January 2026\" mdroff\n\n## SYNOPSIS\n\nExample paragraph.\n";

#[test]
fn cli_writes_output_file() {
    let dir = temp_dir();
    let input = dir.join("mdroff.1.md");
    let output = dir.join("mdroff.1");

    fs::write(&input, SOURCE).expect("write input");

    let status = Command::new(mdroff_bin())
        .args([input.to_str().unwrap(), "-o", output.to_str().unwrap()])
        .status()
        .expect("run mdroff");

    assert!(status.success());
    let roff = fs::read_to_string(output).expect("read output");
    assert!(roff.starts_with(".\\\" Generated by mdroff"));
    assert!(roff.contains(".TH mdroff 1 \"January 2026\" mdroff"));
    assert!(roff.contains(".SH SYNOPSIS"));
}

#[test]
fn cli_prints_to_stdout_when_piped() {
    let dir = temp_dir();
    let input = dir.join("mdroff.1.md");

    fs::write(&input, SOURCE).expect("write input");

    let output = Command::new(mdroff_bin())
        .arg(input.to_str().unwrap())
        .output()
        .expect("run mdroff");

    assert!(output.status.success());
    let roff = String::from_utf8(output.stdout).expect("utf8 output");
    assert!(roff.starts_with(".\\\" Generated by mdroff"));
    assert!(roff.contains(".PP\nExample paragraph\\."));
}

#[test]
fn cli_reports_missing_input_file() {
    let dir = temp_dir();
    let input = dir.join("no-such-file.md");

    let output = Command::new(mdroff_bin())
        .arg(input.to_str().unwrap())
        .output()
        .expect("run mdroff");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("utf8 stderr");
    assert!(stderr.starts_with("mdroff:"));
}
