//! Command-line behavior that needs no network access.

use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("slovlex-retriever").unwrap();
    // Unroutable endpoints: any request reaching the network fails fast.
    cmd.env("SLOVLEX_API_BASE", "http://127.0.0.1:9")
        .env("SLOVLEX_STATIC_BASE", "http://127.0.0.1:9/static")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("text"))
        .stdout(predicate::str::contains("section"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("info"));
}

#[test]
fn test_invalid_law_reference_fails() {
    cli()
        .args(["text", "zakon o dani", "--no-browser"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error: Cannot parse law reference"));
}

#[test]
fn test_invalid_date_fails() {
    cli()
        .args(["section", "595/2003", "3", "--date", "31.12.2023", "--no-browser"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid date format"));
}

#[test]
fn test_invalid_timeout_setting_fails() {
    cli()
        .env("SLOVLEX_HTTP_TIMEOUT_SECS", "soon")
        .args(["info", "595", "2003"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SLOVLEX_HTTP_TIMEOUT_SECS"));
}

#[test]
fn test_unknown_search_mode_is_rejected() {
    cli()
        .args(["search", "daň", "--mode", "semantic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
