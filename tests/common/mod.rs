//! Common test utilities shared by the integration tests

#![allow(dead_code)]

use assert_cmd::Command;

pub const SENTENCE: &str = "Addition of first number inherited from Base 1 (10) and second \
                            number inherited from Base 2 (20) is 30!!!";
pub const FAREWELL: &str = "Thank you for using this program!!!";
pub const INVALID: &str = "Invalid choice!!!";

/// Get a command for the diamond-practice binary with a clean environment
pub fn practice_cmd() -> Command {
    let mut cmd = Command::cargo_bin("diamond-practice").unwrap();
    cmd.env_remove("PRACTICE_CONFIG")
        .env_remove("PRACTICE_CLEAR_SCREEN")
        .env_remove("PRACTICE_LOG_LEVEL")
        .env_remove("PRACTICE_LOG_FILE")
        .env_remove("PRACTICE_LOG_JSON")
        .env_remove("RUST_LOG");
    cmd
}

/// Feed `lines` (each terminated with a newline) to a session and capture stdout
pub fn run_session(lines: &[&str]) -> (i32, String) {
    let input: String = lines.iter().map(|l| format!("{}\n", l)).collect();
    let output = practice_cmd().write_stdin(input).output().unwrap();
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8(output.stdout).unwrap(),
    )
}
