//! CLI integration tests for civicctl
//!
//! Drives the built binary with an explicit config file so the host's
//! ~/.config/civic and /etc/civic never leak in.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

fn civicctl_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_civicctl"))
}

/// Writes citizen records and a config pointing at them
fn fixture(dir: &Path) -> PathBuf {
    let citizens = dir.join("citizen.csv");
    fs::write(&citizens, "citizen_id,name\n1001,Priya Nair\n1002,Rahul Verma\n").unwrap();

    let config = dir.join("config.toml");
    fs::write(
        &config,
        format!(
            "[data]\ncitizens = \"{}\"\n\n[output]\ncolor = \"never\"\n",
            citizens.display()
        ),
    )
    .unwrap();
    config
}

fn run(config: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(civicctl_bin())
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("CIVIC_CITIZENS")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to run civicctl");

    // The binary may exit before reading stdin (e.g. on a rejected ID),
    // so a broken pipe here is not a test failure.
    if let Err(err) = child.stdin.take().unwrap().write_all(stdin.as_bytes()) {
        assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe, "{err}");
    }
    child.wait_with_output().unwrap()
}

#[test]
fn test_ask_direct_answer() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture(dir.path());

    let output = run(&config, &["ask", "--id", "1001", "is", "there", "wifi?"], "");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Bot: Hello Priya Nair, Free Wi-Fi is available in select public parks and metro stations.\n"
    );
}

#[test]
fn test_ask_bad_id_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture(dir.path());

    let output = run(&config, &["ask", "--id", "abc", "water"], "");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid input. Enter a number."));

    let output = run(&config, &["ask", "--id", "7", "water"], "");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid ID. Try again."));
}

#[test]
fn test_chat_session() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture(dir.path());

    let output = run(&config, &["chat"], "x\n1002\nelectrcity\nyes\nexit\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Welcome to the City Chatbot"));
    assert!(stdout.contains("Invalid input. Enter a number."));
    assert!(stdout.contains("Hello Rahul Verma, ask your question below:"));
    assert!(stdout.contains("Bot: Did you mean 'electricity'? (yes/no)"));
    assert!(stdout.contains("Bot: Electricity is available 24/7."));
    assert!(stdout.contains("Bot: Thank you, Rahul Verma, for using the chatbot."));
}

#[test]
fn test_chat_with_id_skips_login_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture(dir.path());

    let output = run(&config, &["chat", "--id", "1002"], "watr\nyes\nexit\n");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Welcome to the City Chatbot"));
    assert!(stdout.contains("Hello Rahul Verma, ask your question below:"));
    assert!(stdout.contains("Bot: Did you mean 'water'? (yes/no)"));
    assert!(stdout.contains("Bot: Water supply is available daily."));
    assert!(stdout.contains("Bot: Thank you, Rahul Verma, for using the chatbot."));
}

#[test]
fn test_chat_with_unknown_id_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture(dir.path());

    let output = run(&config, &["chat", "--id", "9999"], "water\nexit\n");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid ID. Try again."));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Bot:"));

    let output = run(&config, &["chat", "--id", "-3"], "");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid ID. Try again."));
}

#[test]
fn test_ask_json_suggestion_keeps_pending_topic() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture(dir.path());

    let output = run(&config, &["ask", "--id", "1001", "--json", "watr"], "");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["pending_topic"], "water");
    assert_eq!(value["reply"]["kind"], "suggestion");
    assert_eq!(value["reply"]["keyword"], "water");
    assert_eq!(value["citizen"]["id"], 1001);
    assert_eq!(value["question"], "watr");
}

#[test]
fn test_missing_citizen_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[data]\ncitizens = \"/nonexistent/citizen.csv\"\n").unwrap();

    let output = run(&config, &["ask", "--id", "1", "water"], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load citizen records"));
}

#[test]
fn test_topics_with_custom_faq() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture(dir.path());
    let faq = dir.path().join("faq.toml");
    fs::write(&faq, "[[topic]]\nkeyword = \"Taxes\"\nanswer = \"Due in March.\"\n").unwrap();

    let output = run(&config, &["topics", "--faq", faq.to_str().unwrap()], "");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "taxes  Due in March.\n");
}

#[test]
fn test_config_prints_toml() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture(dir.path());

    let output = run(&config, &["config"], "");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("cutoff = 0.5"));
    assert!(stdout.contains("color = \"never\""));
}
