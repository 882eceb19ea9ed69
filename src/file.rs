// src/file.rs

use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::config::consts::{DATE_FORMAT, STEP_DETAILS_PREFIX};
use crate::config::options::DetailFormat;
use crate::csv::{parse_rows, write_flat_rows, write_row, SEP};
use crate::day::DayRecord;
use crate::error::ExportError;
use crate::specs::{Activity, StepBin};

const STEP_DETAILS_HEADER: [&str; 2] = ["time", "steps"];

/// One JSON object keyed by date, pretty-printed. Keys come out sorted.
pub fn write_json(records: &[DayRecord], path: &Path) -> Result<PathBuf, ExportError> {
    let mut merged = Map::new();
    for r in records {
        if let Value::Object(day) = r.to_json() {
            merged.extend(day);
        }
    }

    prepare_parent(path)?;
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, &Value::Object(merged))?;
    writeln!(out)?;
    out.flush()?;
    logf!("Wrote {}", path.display());
    Ok(path.to_path_buf())
}

/// Header from the first record, one row per day in the given order.
pub fn write_csv(records: &[DayRecord], path: &Path) -> Result<PathBuf, ExportError> {
    if records.is_empty() {
        return Err(ExportError::EmptyResultSet);
    }
    let rows: Vec<_> = records.iter().map(DayRecord::to_flat_row).collect();

    prepare_parent(path)?;
    let mut out = BufWriter::new(File::create(path)?);
    write_flat_rows(&mut out, &rows, SEP)?;
    out.flush()?;
    logf!("Wrote {}", path.display());
    Ok(path.to_path_buf())
}

/// `<dir>/steps_details_YYYY-MM-DD.<ext>`
pub fn step_details_path(dir: &Path, date: NaiveDate, format: DetailFormat) -> PathBuf {
    dir.join(format!("{STEP_DETAILS_PREFIX}{}.{}", date.format(DATE_FORMAT), format.ext()))
}

/// One side file per day, written even when the day has no bins.
pub fn write_step_details(
    records: &[DayRecord],
    dir: &Path,
    format: DetailFormat,
) -> Result<Vec<PathBuf>, ExportError> {
    ensure_directory(dir)?;
    let mut written = Vec::with_capacity(records.len());

    for r in records {
        let path = step_details_path(dir, r.date(), format);
        let bins = r.steps_details().bins();
        let mut out = BufWriter::new(File::create(&path)?);
        match format {
            DetailFormat::Json => {
                serde_json::to_writer_pretty(&mut out, bins)?;
                writeln!(out)?;
            }
            DetailFormat::Csv => write_bins_csv(&mut out, bins)?,
        }
        out.flush()?;
        logd!("Wrote {} ({} bins)", path.display(), bins.len());
        written.push(path);
    }
    Ok(written)
}

fn write_bins_csv<W: Write>(mut w: W, bins: &[StepBin]) -> std::io::Result<()> {
    write_row(&mut w, &STEP_DETAILS_HEADER, SEP)?;
    for b in bins {
        let steps = b.steps.to_string();
        write_row(&mut w, &[b.time.as_str(), steps.as_str()], SEP)?;
    }
    Ok(())
}

/// Read CSV side files back, drop duplicate timestamps (neighbouring days
/// overlap around midnight), sort by time, write one CSV. Returns the bin count.
pub fn merge_step_details(files: &[PathBuf], out_path: &Path) -> Result<usize, ExportError> {
    let mut bins: BTreeMap<String, u64> = BTreeMap::new();

    for f in files {
        let text = fs::read_to_string(f)?;
        for row in parse_rows(&text, SEP) {
            let [time, steps] = row.as_slice() else {
                logd!("{}: skipping row of {} cells", f.display(), row.len());
                continue;
            };
            let Ok(steps) = steps.trim().parse::<u64>() else {
                // header, or junk
                continue;
            };
            bins.entry(time.clone()).or_insert(steps);
        }
    }

    let merged: Vec<StepBin> = bins
        .into_iter()
        .map(|(time, steps)| StepBin { time, steps })
        .collect();

    prepare_parent(out_path)?;
    let mut out = BufWriter::new(File::create(out_path)?);
    write_bins_csv(&mut out, &merged)?;
    out.flush()?;
    logf!("Merged {} files into {} ({} bins)", files.len(), out_path.display(), merged.len());
    Ok(merged.len())
}

/// One row per activity: `date` then every activity field, GPX link included.
pub fn write_activities_detail(records: &[DayRecord], path: &Path) -> Result<PathBuf, ExportError> {
    prepare_parent(path)?;
    let mut out = BufWriter::new(File::create(path)?);

    let mut header = vec!["date"];
    header.extend(Activity::FIELDS);
    write_row(&mut out, &header, SEP)?;

    for r in records {
        let date = r.date_key();
        for a in r.activities().entries() {
            let mut cells = vec![date.clone()];
            cells.extend(
                a.to_dict()
                    .iter()
                    .map(|(_, v)| v.as_scalar().map(ToString::to_string).unwrap_or_default()),
            );
            write_row(&mut out, &cells, SEP)?;
        }
    }
    out.flush()?;
    logf!("Wrote {}", path.display());
    Ok(path.to_path_buf())
}

fn prepare_parent(path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ExportError::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_file_name() {
        let d = NaiveDate::from_ymd_opt(2017, 3, 9).unwrap();
        let p = step_details_path(Path::new("out"), d, DetailFormat::Csv);
        assert_eq!(p, Path::new("out").join("steps_details_2017-03-09.csv"));
    }

    #[test]
    fn dir_hints() {
        assert!(looks_like_dir_hint(Path::new("out/")));
        assert!(looks_like_dir_hint(Path::new("out\\")));
        assert!(!looks_like_dir_hint(Path::new("out/days.csv")));
    }

    #[test]
    fn ensure_directory_rejects_files() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("taken");
        fs::write(&file, "x").unwrap();
        assert!(matches!(ensure_directory(&file), Err(ExportError::NotADirectory(_))));
        let nested = tmp.path().join("a").join("b");
        ensure_directory(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn merge_dedups_and_sorts() {
        let tmp = tempfile::tempdir().unwrap();
        let a = tmp.path().join("a.csv");
        let b = tmp.path().join("b.csv");
        fs::write(&a, "time,steps\n2017-03-29 23:45:00,12\n2017-03-30 00:00:00,3\n").unwrap();
        fs::write(&b, "time,steps\n2017-03-30 00:00:00,3\n2017-03-29 23:30:00,40\n").unwrap();

        let out = tmp.path().join("merged.csv");
        let n = merge_step_details(&[a, b], &out).unwrap();
        assert_eq!(n, 3);
        let text = fs::read_to_string(&out).unwrap();
        assert_eq!(
            text,
            "time,steps\n2017-03-29 23:30:00,40\n2017-03-29 23:45:00,12\n2017-03-30 00:00:00,3\n"
        );
    }
}
