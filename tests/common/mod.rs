//! Fixture market data written as CSV files.
#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

pub const DAYS: u64 = 260;

pub fn first_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
}

pub fn last_day() -> NaiveDate {
    first_day() + Days::new(DAYS - 1)
}

fn day(i: u64) -> String {
    (first_day() + Days::new(i)).format("%Y%m%d").to_string()
}

pub fn write_prices(dir: &Path, code: &str, close: impl Fn(u64) -> f64, volume: impl Fn(u64) -> f64) {
    let mut body = String::from("trade_date,close,vol\n");
    for i in 0..DAYS {
        writeln!(body, "{},{},{}", day(i), close(i), volume(i)).unwrap();
    }
    fs::write(dir.join(format!("{}_daily.csv", code)), body).unwrap();
}

pub fn write_valuations(
    dir: &Path,
    code: &str,
    pe: impl Fn(u64) -> Option<f64>,
    pb: impl Fn(u64) -> Option<f64>,
) {
    let cell = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
    let mut body = String::from("trade_date,pe_ttm,pb\n");
    for i in 0..DAYS {
        writeln!(body, "{},{},{}", day(i), cell(pe(i)), cell(pb(i))).unwrap();
    }
    fs::write(dir.join(format!("{}_valuation.csv", code)), body).unwrap();
}

/// Three tickers: a cheap uptrending stock, an expensive downtrending
/// fund, and a mid-range stock with only price/book.
pub fn write_market(dir: &Path) {
    write_prices(dir, "600519.SH", |i| 100.0 + i as f64 * 0.5, |i| {
        if i == DAYS - 1 {
            5000.0
        } else {
            1000.0
        }
    });
    write_valuations(dir, "600519.SH", |i| Some(40.0 - i as f64 * 0.1), |_| Some(8.0));

    write_prices(dir, "510300.SH", |i| 5.0 - i as f64 * 0.01, |_| 1000.0);
    write_valuations(dir, "000300.SH", |i| Some(10.0 + i as f64 * 0.02), |_| None);

    write_prices(dir, "000858.SZ", |i| 150.0 + (i % 7) as f64, |_| 800.0);
    write_valuations(dir, "000858.SZ", |_| None, |i| Some(3.0 + ((i * 37) % 100) as f64 / 100.0));
}

pub fn write_config(dir: &Path, output_dir: &Path, tickers: &[&str]) -> std::path::PathBuf {
    let list = tickers
        .iter()
        .map(|t| format!("\"{}\"", t))
        .collect::<Vec<_>>()
        .join(", ");
    // Only map the fund when it is part of the universe
    let funds = if tickers.contains(&"510300.SH") {
        "\n[[universe.funds]]\ncode = \"510300.SH\"\nindex = \"000300.SH\"\n"
    } else {
        ""
    };
    let config = format!(
        r#"[app]
name = "daily-signals"
environment = "test"

[logging]
level = "warn"

[universe]
tickers = [{list}]
{funds}
[data]
start_date = "2015-01-01"

[output]
dir = "{out}"
"#,
        list = list,
        funds = funds,
        out = output_dir.display().to_string().replace('\\', "/"),
    );
    let path = dir.join("signals.toml");
    fs::write(&path, config).unwrap();
    path
}
