use assert_cmd::Command;
use predicates::prelude::*;

fn stylescout() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("stylescout").unwrap()
}

#[test]
fn version_flag() {
    stylescout()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn help_flag() {
    stylescout()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("purchasable product leads"));
}

#[test]
fn no_subcommand_shows_help() {
    stylescout()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn analyze_help_lists_image_flag() {
    stylescout()
        .args(["analyze", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--image"));
}

#[test]
fn fallback_prints_encoded_retailer_links() {
    stylescout()
        .args(["fallback", "--terms", "blue denim jacket", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("blue%20denim%20jacket"))
        .stdout(predicate::str::contains("Check Price"))
        .stdout(predicate::str::contains("amazon.com"));
}

#[test]
fn fallback_text_format_lists_all_four_stores() {
    let assert = stylescout()
        .args(["fallback", "--terms", "wool coat", "--format", "text"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.lines().count(), 4);
    assert!(stdout.contains("Nordstrom"));
    assert!(stdout.contains("Zara"));
}

#[test]
fn analyze_without_api_key_fails_before_network() {
    stylescout()
        .args(["analyze", "--image", "does-not-exist.png"])
        .env_remove("GEMINI_API_KEY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn analyze_rejects_non_image_input() {
    stylescout()
        .args(["analyze", "--image", "notes.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported image mime type"));
}
