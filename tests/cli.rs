//! Runs the `scan` binary end to end.

use std::io::Write;
use std::net::TcpListener;
use std::process::Command;
use std::thread;

fn scan_command() -> Command {
    let config_home = std::env::temp_dir().join("portsweep-cli-test-config");
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scan"));
    cmd.env_remove("PORTSWEEP_CONFIG")
        .env("XDG_CONFIG_HOME", config_home)
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_two_arguments_prints_usage_and_fails() {
    let output = scan_command().args(["127.0.0.1", "1"]).output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Starting scan"));
}

#[test]
fn test_non_integer_port_fails_cleanly() {
    let output = scan_command()
        .args(["127.0.0.1", "one", "10"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("START_PORT"));
}

#[test]
fn test_missing_config_file_fails() {
    let output = scan_command()
        .args(["--config", "/nonexistent/portsweep.json", "127.0.0.1", "1", "1"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

#[test]
fn test_scan_single_open_port() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for mut stream in listener.incoming().flatten() {
            let _ = stream.write_all(b"hi\n");
        }
    });

    let port_arg = port.to_string();
    let output = scan_command()
        .args(["--quiet", "--no-color", "127.0.0.1", &port_arg, &port_arg])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(&format!("Starting scan on 127.0.0.1 (ports {} to {})", port, port)));
    assert!(stdout.contains("PORT    STATUS    SERVICE        BANNER"));
    assert!(stdout.contains("OPEN"));
    assert!(stdout.contains("hi"));
    assert!(!stdout.contains('\u{1b}'));
}
