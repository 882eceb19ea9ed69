// src/runner.rs
use std::path::PathBuf;

use crate::{
    config::consts::ACTIVITIES_DETAIL_FILE,
    config::options::{AppOptions, DetailFormat, ExportFormat},
    day::DayRecord,
    error::Error,
    fetch::{DayFetcher, SnapshotFetcher},
    file::{merge_step_details, write_activities_detail, write_csv, write_json, write_step_details},
    progress::Progress,
    scrape::{collect, collect_parallel, parse_all},
};

/// Summary of what was produced.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    pub days: usize,
    pub files_written: Vec<PathBuf>,
}

/// Read snapshots from `opts.scrape.snapshots` and export.
pub fn run(opts: &AppOptions, progress: Option<&mut dyn Progress>) -> Result<RunSummary, Error> {
    let fetcher = SnapshotFetcher::new(&opts.scrape.snapshots);
    run_with(&fetcher, opts, progress)
}

/// Collect → parse → write, with any fetcher.
pub fn run_with<F: DayFetcher + Sync + ?Sized>(
    fetcher: &F,
    opts: &AppOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, Error> {
    let scrape = &opts.scrape;
    let export = &opts.export;

    let collected = if scrape.workers > 1 {
        collect_parallel(fetcher, scrape.start, scrape.end, scrape.workers, reborrow(&mut progress))?
    } else {
        collect(fetcher, scrape.start, scrape.end, reborrow(&mut progress))?
    };

    let mut records: Vec<DayRecord> = collected
        .into_iter()
        .map(|r| r.with_base_url(&scrape.base_url))
        .collect();
    parse_all(&mut records, reborrow(&mut progress));

    let out = export.out_path();
    let mut written = vec![match export.format {
        ExportFormat::Json => write_json(&records, &out)?,
        ExportFormat::Csv => write_csv(&records, &out)?,
    }];

    let mut bin_files = Vec::new();
    if let Some(fmt) = export.step_details {
        let files = write_step_details(&records, export.out_dir(), fmt)?;
        if fmt == DetailFormat::Csv {
            bin_files = files.clone();
        }
        written.extend(files);
    }

    if let Some(merged) = &export.merge_step_details {
        // the merge reads CSV side files back
        if bin_files.is_empty() {
            bin_files = write_step_details(&records, export.out_dir(), DetailFormat::Csv)?;
            written.extend(bin_files.iter().cloned());
        }
        let n = merge_step_details(&bin_files, merged)?;
        logf!("Merged {n} step bins into {}", merged.display());
        written.push(merged.clone());
    }

    if export.activities_detail {
        let path = export.out_dir().join(format!("{ACTIVITIES_DETAIL_FILE}.csv"));
        written.push(write_activities_detail(&records, &path)?);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Exported {} days to {}", records.len(), out.display()));
    }

    Ok(RunSummary { days: records.len(), files_written: written })
}

/// Hand the sink to one callee without giving it away.
fn reborrow<'a>(progress: &'a mut Option<&mut dyn Progress>) -> Option<&'a mut dyn Progress> {
    progress.as_mut().map(|p| &mut **p as &mut dyn Progress)
}
