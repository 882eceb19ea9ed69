// tests/export_e2e.rs
mod common;

use std::fs;

use gc_scrape::config::options::{AppOptions, DetailFormat, ExportFormat};
use gc_scrape::csv::{parse_rows, SEP};
use gc_scrape::error::{Error, ExportError, FetchError};
use gc_scrape::file::{merge_step_details, write_csv};
use gc_scrape::runner::{run, run_with};
use gc_scrape::{DayFetcher, DayMarkup};

use common::{date, day_page, write_snapshot};

fn options(snapshots: &std::path::Path, out: &std::path::Path, format: ExportFormat) -> AppOptions {
    let mut opts = AppOptions::default();
    opts.scrape.snapshots = snapshots.to_path_buf();
    opts.scrape.start = date(2017, 3, 29);
    opts.scrape.end = date(2017, 3, 30);
    opts.export.format = format;
    opts.export.set_path(out.to_str().unwrap());
    opts
}

#[test]
fn two_days_give_three_csv_lines() {
    let caps = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_snapshot(caps.path(), date(2017, 3, 30), &day_page("9.000", "100"));
    write_snapshot(caps.path(), date(2017, 3, 29), &day_page("12.408", "100"));

    let opts = options(caps.path(), &out.path().join("march.csv"), ExportFormat::Csv);
    let summary = run(&opts, None).unwrap();
    assert_eq!(summary.days, 2);

    let text = fs::read_to_string(out.path().join("march.csv")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("date,SUMMARY:likes,SUMMARY:comment,SUMMARY:kcal_count,STEPS:total"));
    assert!(lines[1].starts_with("2017-03-29,"));
    assert!(lines[2].starts_with("2017-03-30,"));

    let rows = parse_rows(&text, SEP);
    let header = &rows[0];
    let col = |name: &str| header.iter().position(|h| h == name).unwrap();
    assert_eq!(rows[1][col("STEPS:total")], "12408");
    assert_eq!(rows[2][col("STEPS:total")], "9000");
    assert_eq!(rows[1][col("SUMMARY:comment")], "Easy day, \"rest\"");
    assert_eq!(rows[1][col("ACTIVITIES:kcal")], "350");
    assert_eq!(rows[1][col("ACTIVITIES:duration")], "00:15:00");
    assert_eq!(rows[1][col("SLEEP:total_sleep_time")], "07:30:00");
    assert_eq!(rows[1][col("BREAKDOWN:sleeping")], "35");
    assert!(header.iter().all(|h| !h.starts_with("STEPS DETAILS")));
}

#[test]
fn json_is_keyed_by_date() {
    let caps = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_snapshot(caps.path(), date(2017, 3, 29), &day_page("12.408", "100"));
    write_snapshot(caps.path(), date(2017, 3, 30), &day_page("9.000", "100"));

    let opts = options(caps.path(), &out.path().join("march.json"), ExportFormat::Json);
    run(&opts, None).unwrap();

    let v: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.path().join("march.json")).unwrap()).unwrap();
    let days: Vec<&String> = v.as_object().unwrap().keys().collect();
    assert_eq!(days, vec!["2017-03-29", "2017-03-30"]);

    let day = &v["2017-03-29"];
    assert_eq!(day["steps"]["total"], "12408");
    assert_eq!(day["sleep"]["bed_time"], "23:00:00");
    assert_eq!(day["activities"][1]["name"], "Walk");
    assert_eq!(
        day["activities"][0]["gpx"],
        "https://connect.garmin.com/modern/proxy/download-service/export/gpx/activity/111"
    );
    assert!(day.get("steps details").is_none());
}

#[test]
fn side_files_and_merge() {
    let caps = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_snapshot(caps.path(), date(2017, 3, 29), &day_page("12.408", "100"));
    write_snapshot(caps.path(), date(2017, 3, 30), &day_page("9.000", "100"));

    let mut opts = options(caps.path(), &out.path().join("march.csv"), ExportFormat::Csv);
    opts.export.step_details = Some(DetailFormat::Csv);
    opts.export.activities_detail = true;
    let summary = run(&opts, None).unwrap();
    // main + 2 side files + activities
    assert_eq!(summary.files_written.len(), 4);

    let first = out.path().join("steps_details_2017-03-29.csv");
    let second = out.path().join("steps_details_2017-03-30.csv");
    let text = fs::read_to_string(&first).unwrap();
    assert_eq!(
        text,
        "time,steps\n2017-03-28 23:45:00,12\n2017-03-29 00:00:00,0\n2017-03-29 00:15:00,1204\n"
    );

    let merged = out.path().join("all_bins.csv");
    // the 30th's leading bin (29th, 23:45) is not in the 29th's file
    assert_eq!(merge_step_details(&[first.clone(), second], &merged).unwrap(), 6);
    assert_eq!(merge_step_details(&[first.clone(), first], &merged).unwrap(), 3);

    let activities = fs::read_to_string(out.path().join("activities.csv")).unwrap();
    let rows = parse_rows(&activities, SEP);
    assert_eq!(rows[0][0], "date");
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[1][0], "2017-03-29");
    assert_eq!(rows[1][6], "Morning Run");
}

#[test]
fn merge_flag_writes_csv_bins_and_one_merged_file() {
    let caps = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_snapshot(caps.path(), date(2017, 3, 29), &day_page("12.408", "100"));
    write_snapshot(caps.path(), date(2017, 3, 30), &day_page("9.000", "100"));

    let merged = out.path().join("bins").join("march_bins.csv");
    let mut opts = options(caps.path(), &out.path().join("march.json"), ExportFormat::Json);
    opts.export.merge_step_details = Some(merged.clone());
    let summary = run(&opts, None).unwrap();

    // main + 2 CSV side files + merged
    assert_eq!(summary.files_written.len(), 4);
    assert_eq!(summary.files_written.last(), Some(&merged));
    assert!(out.path().join("steps_details_2017-03-29.csv").exists());

    let rows = parse_rows(&fs::read_to_string(&merged).unwrap(), SEP);
    assert_eq!(rows[0], vec!["time", "steps"]);
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[1][0], "2017-03-28 23:45:00");
}

#[test]
fn json_side_files() {
    let caps = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_snapshot(caps.path(), date(2017, 3, 29), &day_page("12.408", "100"));

    let mut opts = options(caps.path(), &out.path().join("d.json"), ExportFormat::Json);
    opts.scrape.end = date(2017, 3, 29);
    opts.export.step_details = Some(DetailFormat::Json);
    run(&opts, None).unwrap();

    let bins: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(out.path().join("steps_details_2017-03-29.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(bins[2]["time"], "2017-03-29 00:15:00");
    assert_eq!(bins[2]["steps"], 1204);
}

#[test]
fn missing_day_fails_the_run() {
    let caps = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_snapshot(caps.path(), date(2017, 3, 29), &day_page("12.408", "100"));

    let opts = options(caps.path(), &out.path().join("d.csv"), ExportFormat::Csv);
    let err = run(&opts, None).unwrap_err();
    assert!(matches!(err, Error::Fetch(FetchError::DayNotFound { .. })));
    assert!(!out.path().join("d.csv").exists());
}

#[test]
fn csv_of_nothing_is_an_error() {
    let out = tempfile::tempdir().unwrap();
    let err = write_csv(&[], &out.path().join("x.csv")).unwrap_err();
    assert!(matches!(err, ExportError::EmptyResultSet));
}

struct Blank;

impl DayFetcher for Blank {
    fn fetch_day(&self, _date: chrono::NaiveDate) -> Result<DayMarkup, FetchError> {
        Ok(DayMarkup::default())
    }
}

#[test]
fn blank_days_still_share_the_header() {
    let out = tempfile::tempdir().unwrap();
    let mut opts = options(out.path(), &out.path().join("blank.csv"), ExportFormat::Csv);
    opts.scrape.workers = 2;
    run_with(&Blank, &opts, None).unwrap();

    let rows = parse_rows(&fs::read_to_string(out.path().join("blank.csv")).unwrap(), SEP);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.len() == rows[0].len()));

    let col = |name: &str| rows[0].iter().position(|h| h == name).unwrap();
    assert_eq!(rows[1][col("ACTIVITIES:kcal")], "0");
    assert_eq!(rows[1][col("ACTIVITIES:distance")], "0");
    assert_eq!(rows[1][col("ACTIVITIES:duration")], "00:00:00");
}
