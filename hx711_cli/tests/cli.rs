use assert_cmd::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

// Argument problems exit 1 before any pin is touched; --help exits 0.
#[rstest]
#[case("hx711-discover", &[], 1, "Usage:", "stderr")]
#[case("hx711-discover", &["abc", "6", "5"], 1, "invalid value", "stderr")]
#[case("hx711-discover", &["5", "6", "0"], 1, "invalid value", "stderr")]
#[case("hx711-discover", &["--help"], 0, "Usage:", "stdout")]
#[case("hx711-watch", &["5", "6"], 1, "Usage:", "stderr")]
#[case("hx711-watch", &["5", "6", "abc"], 1, "invalid value", "stderr")]
#[case("hx711-watch", &["--help"], 0, "Usage:", "stdout")]
fn cli_table_cases(
    #[case] bin: &str,
    #[case] args: &[&str],
    #[case] exit_code: i32,
    #[case] needle: &str,
    #[case] stream: &str,
) {
    let mut cmd = Command::cargo_bin(bin).unwrap();
    for a in args {
        cmd.arg(a);
    }

    let assert = cmd.assert().code(exit_code);

    match stream {
        "stdout" => {
            assert.stdout(predicate::str::contains(needle));
        }
        "stderr" => {
            assert.stderr(predicate::str::contains(needle));
        }
        other => panic!("unknown stream: {other}"),
    }
}

#[rstest]
fn discover_emits_the_reference_report_shape() {
    let mut cmd = Command::cargo_bin("hx711-discover").unwrap();
    cmd.args(["5", "6", "5", "--no-rt", "--log-level", "error"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 25, "stdout was: {text}");
    assert_eq!(lines[0], "Wait Times");
    assert_eq!(lines[6], "Conversion Times");
    assert_eq!(lines[12], "Total Times");
    assert_eq!(lines[18], "");
    assert_eq!(lines[19], "Total,Wait,Conversion,Value");
    for row in &lines[20..] {
        let fields: Vec<&str> = row.trim_end_matches(['*', '#']).split(',').collect();
        assert_eq!(fields.len(), 4, "row was: {row}");
        fields[0].parse::<f64>().unwrap();
        fields[3].parse::<i64>().unwrap();
    }
}

#[rstest]
fn discover_json_report_parses() {
    let mut cmd = Command::cargo_bin("hx711-discover").unwrap();
    cmd.args(["5", "6", "4", "--no-rt", "--json", "--log-level", "error"]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(v["samples"], 4);
    assert_eq!(v["band_sigmas"], 3.0);
    assert_eq!(v["rows"].as_array().unwrap().len(), 4);
    for key in ["wait_us", "conversion_us", "total_us"] {
        for stat in ["min", "max", "median", "std_dev"] {
            assert!(v[key][stat].is_f64(), "{key}.{stat} missing");
        }
    }
}

#[rstest]
fn watch_prints_a_bounded_run_of_readings() {
    let mut cmd = Command::cargo_bin("hx711-watch").unwrap();
    cmd.args([
        "5",
        "6",
        "100",
        "--count",
        "3",
        "--samples",
        "1",
        "--interval-ms",
        "1",
        "--log-level",
        "error",
    ]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3, "stdout was: {text}");
    for line in lines {
        assert!(line.ends_with(" g"), "line was: {line}");
        let value: f64 = line.trim_end_matches(" g").parse().unwrap();
        // The sim idles near 200k raw counts; at 100 counts/g that is ~2 kg.
        assert!((1900.0..2100.0).contains(&value), "value was: {value}");
    }
}

#[rstest]
fn watch_tare_centers_readings_on_zero() {
    let mut cmd = Command::cargo_bin("hx711-watch").unwrap();
    cmd.args([
        "5",
        "6",
        "1000000",
        "--tare",
        "--count",
        "1",
        "--samples",
        "1",
        "--interval-ms",
        "1",
        "--log-level",
        "error",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0.00 g"));
}

#[rstest]
fn watch_respects_the_unit_flag() {
    let mut cmd = Command::cargo_bin("hx711-watch").unwrap();
    cmd.args([
        "5",
        "6",
        "100",
        "--unit",
        "kg",
        "--count",
        "1",
        "--samples",
        "1",
        "--interval-ms",
        "1",
        "--log-level",
        "error",
    ]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let text = String::from_utf8(out).unwrap();
    assert!(text.trim_end().ends_with(" kg"), "stdout was: {text}");
}

#[rstest]
fn log_file_receives_json_lines() {
    let dir = tempdir().unwrap();
    let log_path = dir.path().join("run.jsonl");

    let mut cmd = Command::cargo_bin("hx711-watch").unwrap();
    cmd.args([
        "5",
        "6",
        "100",
        "--count",
        "1",
        "--samples",
        "1",
        "--interval-ms",
        "1",
    ])
    .arg("--log-file")
    .arg(&log_path);
    cmd.assert().success();

    let content = fs::read_to_string(&log_path).unwrap();
    let first = content
        .lines()
        .next()
        .expect("log file has at least one line");
    let v: serde_json::Value = serde_json::from_str(first).expect("valid JSON log line");
    assert!(v.get("timestamp").is_some());
    assert!(v.get("level").is_some());
}

#[rstest]
fn unwritable_log_file_exits_two() {
    let mut cmd = Command::cargo_bin("hx711-discover").unwrap();
    cmd.args([
        "5",
        "6",
        "1",
        "--no-rt",
        "--log-file",
        "/nonexistent-dir/run.jsonl",
    ]);
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("cannot open log file"));
}
