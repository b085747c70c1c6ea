use predicates::prelude::*;

#[test]
fn test_cli_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = assert_cmd::Command::cargo_bin("costcast")?;
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
    Ok(())
}

#[test]
fn help_lists_every_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = assert_cmd::Command::cargo_bin("costcast")?;
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("project"))
        .stdout(predicate::str::contains("scenarios"))
        .stdout(predicate::str::contains("rollout"))
        .stdout(predicate::str::contains("completions"));
    Ok(())
}
