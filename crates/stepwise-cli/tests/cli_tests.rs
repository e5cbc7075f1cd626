use assert_cmd::Command;
use predicates::prelude::*;

/// Helper function to create a Command with --no-color flag for testing
fn stepwise_cmd() -> Command {
    let mut cmd = Command::cargo_bin("stepwise").expect("Failed to find stepwise binary");
    cmd.arg("--no-color");
    cmd
}

#[test]
fn test_cli_lists_steps_by_default() {
    stepwise_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("# Proposal workflow"))
        .stdout(predicate::str::contains("1. Register account (`register-account`)"))
        .stdout(predicate::str::contains("3. Submit proposal (`submit-proposal`)"));
}

#[test]
fn test_cli_steps_alias() {
    stepwise_cmd()
        .arg("s")
        .assert()
        .success()
        .stdout(predicate::str::contains("2. Create election"));
}

#[test]
fn test_cli_run_success() {
    stepwise_cmd()
        .args(["run", "--delay-ms", "0", "--title", "Grants round"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Attempt 1"))
        .stdout(predicate::str::contains("- ✓ Register account"))
        .stdout(predicate::str::contains("- ✓ Submit proposal"))
        .stdout(predicate::str::contains("[Done]"))
        .stdout(predicate::str::contains("published proposal `election-1/proposal`"))
        .stdout(predicate::str::contains("## Attempt 2").not());
}

#[test]
fn test_cli_run_retries_failed_step() {
    stepwise_cmd()
        .args([
            "run",
            "--delay-ms",
            "0",
            "--fail-at",
            "create-election",
            "--failures",
            "1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("- ✗ Create election"))
        .stdout(predicate::str::contains(
            "*Failed: Backend error: simulated failure in create-election*",
        ))
        .stdout(predicate::str::contains("[Try again]"))
        .stdout(predicate::str::contains("## Attempt 2"))
        .stdout(predicate::str::contains("published proposal `election-1/proposal`"));
}

#[test]
fn test_cli_run_gives_up_after_attempts() {
    stepwise_cmd()
        .args([
            "run",
            "--delay-ms",
            "0",
            "--fail-at",
            "submit-proposal",
            "--failures",
            "5",
            "--attempts",
            "2",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("## Attempt 2"))
        .stdout(predicate::str::contains("## Attempt 3").not())
        .stderr(predicate::str::contains("Publishing failed after 2 attempts"))
        .stderr(predicate::str::contains("simulated failure in submit-proposal"));
}

#[test]
fn test_cli_run_skips_registration_for_existing_account() {
    stepwise_cmd()
        .args([
            "run",
            "--delay-ms",
            "0",
            "--has-account",
            "--fail-at",
            "register-account",
            "--failures",
            "3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("- ✓ Register account"));
}

#[test]
fn test_cli_run_timeout() {
    stepwise_cmd()
        .args([
            "run",
            "--delay-ms",
            "200",
            "--timeout-ms",
            "10",
            "--attempts",
            "1",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("timed out after 10ms"))
        .stderr(predicate::str::contains("Publishing failed after 1 attempts"));
}

#[test]
fn test_cli_run_rejects_zero_attempts() {
    stepwise_cmd()
        .args(["run", "--attempts", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--attempts must be at least 1"));
}

#[test]
fn test_cli_run_rejects_unknown_step() {
    stepwise_cmd()
        .args(["run", "--fail-at", "cast-vote"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
