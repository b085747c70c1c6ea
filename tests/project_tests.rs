use assert_fs::prelude::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn project_writes_report_and_chart() {
    let params_yaml = "\
user_count: 1300
complexity_ratio: 80/20
simple_credits_per_user: 75
complex_credits_per_user: 600
year1_monthly_growth_percent: 15
adoption_ceiling_percent: 80
steady_state_adoption_percent: 60
";

    let input_file = assert_fs::NamedTempFile::new("params.yaml").unwrap();
    input_file.write_str(params_yaml).unwrap();
    let output_file = assert_fs::NamedTempFile::new("projection.yaml").unwrap();

    let input_arg = input_file.path().to_str().unwrap().to_string();
    let output_arg = output_file.path().to_str().unwrap().to_string();
    let chart_path = format!("{output_arg}.png");

    let mut cmd = assert_cmd::Command::cargo_bin("costcast").unwrap();
    cmd.args(["project", "-i", &input_arg, "-o", &output_arg]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Adoption Cost Projection"))
        .stdout(predicate::str::contains(
            "Projection report written to",
        ));

    let output = fs::read_to_string(output_file.path()).unwrap();
    assert!(output.contains("data_source: params.yaml"));
    assert!(output.contains("user_count: 1300"));
    assert!(output.contains("breakeven_credits_per_user: 3000"));
    // month 1 of the base scenario
    assert!(output.contains("active_users: 130"));
    assert!(output.contains("payg_cost: 234"));
    assert!(output.contains("flat_seat_cost: 39000"));

    let metadata = fs::metadata(&chart_path).unwrap();
    assert!(metadata.len() > 0);
    fs::remove_file(&chart_path).unwrap();
}

#[test]
fn project_writes_json_when_the_output_ends_in_json() {
    let params_yaml = "\
user_count: 100
complexity_ratio: 50/50
simple_credits_per_user: 75
complex_credits_per_user: 600
year1_monthly_growth_percent: 10
adoption_ceiling_percent: 70
steady_state_adoption_percent: 60
";

    let input_file = assert_fs::NamedTempFile::new("params.yaml").unwrap();
    input_file.write_str(params_yaml).unwrap();
    let output_file = assert_fs::NamedTempFile::new("projection.json").unwrap();

    let input_arg = input_file.path().to_str().unwrap().to_string();
    let output_arg = output_file.path().to_str().unwrap().to_string();
    let chart_path = format!("{output_arg}.png");

    let mut cmd = assert_cmd::Command::cargo_bin("costcast").unwrap();
    cmd.args(["project", "-i", &input_arg, "-o", &output_arg]);

    cmd.assert().success();

    let output = fs::read_to_string(output_file.path()).unwrap();
    assert!(output.trim_start().starts_with('{'));
    assert!(output.contains("\"user_count\": 100"));
    fs::remove_file(&chart_path).unwrap();
}

#[test]
fn project_fails_cleanly_on_a_malformed_ratio() {
    let params_yaml = "\
user_count: 100
complexity_ratio: most of it
simple_credits_per_user: 75
complex_credits_per_user: 600
year1_monthly_growth_percent: 10
adoption_ceiling_percent: 70
steady_state_adoption_percent: 60
";

    let input_file = assert_fs::NamedTempFile::new("params.yaml").unwrap();
    input_file.write_str(params_yaml).unwrap();
    let output_file = assert_fs::NamedTempFile::new("projection.yaml").unwrap();

    let input_arg = input_file.path().to_str().unwrap().to_string();
    let output_arg = output_file.path().to_str().unwrap().to_string();

    let mut cmd = assert_cmd::Command::cargo_bin("costcast").unwrap();
    cmd.args(["project", "-i", &input_arg, "-o", &output_arg]);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Failed to project monthly costs"));

    // nothing should have been written
    output_file.assert(predicate::path::missing());
}

#[test]
fn project_reports_a_missing_input_file() {
    let output_file = assert_fs::NamedTempFile::new("projection.yaml").unwrap();
    let output_arg = output_file.path().to_str().unwrap().to_string();

    let mut cmd = assert_cmd::Command::cargo_bin("costcast").unwrap();
    cmd.args(["project", "-i", "does-not-exist.yaml", "-o", &output_arg]);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Failed to load projection params"));
}
