//! Command-line runs against CSV fixtures.

mod common;

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn daily_signals(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_daily-signals"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch daily-signals")
}

fn run_args<'a>(data_dir: &'a str, end: &'a str) -> Vec<&'a str> {
    vec!["run", "--data-dir", data_dir, "--end", end]
}

#[test]
fn run_writes_one_row_per_ticker() {
    let data = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    common::write_market(data.path());
    let config = common::write_config(
        data.path(),
        out.path(),
        &["600519.SH", "510300.SH", "000858.SZ"],
    );
    let data_dir = data.path().to_str().unwrap();
    let end = common::last_day().to_string();

    let output = daily_signals(&config, &run_args(data_dir, &end));
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let csv = fs::read_to_string(out.path().join("today_signals.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("600519.SH,pe_ttm,"));
    assert!(lines[2].starts_with("510300.SH,pe_ttm,"));
    assert!(lines[3].starts_with("000858.SZ,pb,"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("DAILY SIGNALS"));
}

#[test]
fn rerun_is_idempotent() {
    let data = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    common::write_market(data.path());
    let config = common::write_config(data.path(), out.path(), &["600519.SH", "510300.SH"]);
    let data_dir = data.path().to_str().unwrap();
    let end = common::last_day().to_string();
    let path = out.path().join("today_signals.csv");

    assert!(daily_signals(&config, &run_args(data_dir, &end)).status.success());
    let first = fs::read(&path).unwrap();
    assert!(daily_signals(&config, &run_args(data_dir, &end)).status.success());
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn missing_ticker_fails_without_output() {
    let data = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    common::write_market(data.path());
    let config = common::write_config(data.path(), out.path(), &["600519.SH", "601318.SH"]);
    let data_dir = data.path().to_str().unwrap();
    let end = common::last_day().to_string();

    let output = daily_signals(&config, &run_args(data_dir, &end));

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("601318.SH"));
    assert!(!out.path().join("today_signals.csv").exists());
}

#[test]
fn lenient_run_emits_degraded_row() {
    let data = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    common::write_market(data.path());
    let config = common::write_config(data.path(), out.path(), &["600519.SH", "601318.SH"]);
    let data_dir = data.path().to_str().unwrap();
    let end = common::last_day().to_string();

    let mut args = run_args(data_dir, &end);
    args.push("--lenient");
    let output = daily_signals(&config, &args);
    assert!(output.status.success());

    let csv = fs::read_to_string(out.path().join("today_signals.csv")).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains("601318.SH,na,,,,,below,false,Hold – no trade,"));
}

#[test]
fn missing_token_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::write_config(dir.path(), dir.path(), &["600519.SH"]);

    let output = Command::new(env!("CARGO_BIN_EXE_daily-signals"))
        .arg("--config")
        .arg(&config)
        .arg("run")
        .env_remove("TUSHARE_TOKEN")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("TUSHARE_TOKEN"));
}

#[test]
fn tickers_lists_universe() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::write_config(dir.path(), dir.path(), &["600519.SH", "510300.SH"]);

    let output = daily_signals(&config, &["tickers"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("600519.SH"));
    assert!(stdout.contains("valued on 000300.SH"));
}

#[test]
fn validate_config_rejects_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::write_config(dir.path(), dir.path(), &["600519.SH", "600519.SH"]);

    let output = daily_signals(&config, &["validate-config"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("duplicate"));
}
