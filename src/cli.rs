// src/cli.rs
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Parser, ValueEnum};

use crate::config::consts::{GARMIN_CONNECT_URL, WORKERS};
use crate::config::options::{AppOptions, DetailFormat, ExportFormat, ExportOptions, ScrapeOptions};
use crate::error::Error;
use crate::progress::Progress;
use crate::runner::{self, RunSummary};

#[derive(Parser, Debug)]
#[command(name = "gc_scrape")]
#[command(about = "Export Garmin Connect daily summaries (captured as HTML) to JSON or CSV")]
#[command(long_about = "Export Garmin Connect daily summaries to JSON or CSV.

Reads captured markup from <SNAPSHOTS>/<YYYY-MM-DD>/, either a full day.html
or one file per section, plus an optional steps_details.json.

EXAMPLES:
    gc_scrape --snapshots captures -d 2017-03-29 2017-04-02 -f csv -o out/
    gc_scrape --snapshots captures -d 2017-03-29 --step-details csv
    gc_scrape --snapshots captures -d 2017-03-01 2017-03-31 --merge-step-details out/march_bins.csv")]
#[command(version)]
pub struct Cli {
    /// Directory holding one sub-directory per captured day
    #[arg(long, value_name = "DIR")]
    pub snapshots: PathBuf,

    /// First day, and optionally the last (inclusive)
    #[arg(short = 'd', long, num_args = 1..=2, required = true, value_name = "YYYY-MM-DD")]
    pub days: Vec<NaiveDate>,

    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    pub format: Format,

    /// Output file, or a directory (trailing separator) for the default name
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<String>,

    /// Also write one step-bin file per day next to the output
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub step_details: Option<Format>,

    /// Merge every day's step bins into one CSV (implies CSV side files)
    #[arg(long, value_name = "PATH")]
    pub merge_step_details: Option<PathBuf>,

    /// Also write a per-activity CSV next to the output
    #[arg(long)]
    pub activities_detail: bool,

    /// Fetch days on this many threads (1 = sequential)
    #[arg(long, default_value_t = 1, value_name = "N")]
    pub workers: usize,

    /// Site root for activity links
    #[arg(long, default_value = GARMIN_CONNECT_URL)]
    pub url: String,

    /// -v info, -vv debug, -vvv trace
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Csv,
}

impl Cli {
    pub fn to_options(&self) -> AppOptions {
        let start = self.days[0];
        let end = self.days.get(1).copied().unwrap_or(start);

        let mut export = ExportOptions::default();
        export.format = match self.format {
            Format::Json => ExportFormat::Json,
            Format::Csv => ExportFormat::Csv,
        };
        export.step_details = self.step_details.map(|f| match f {
            Format::Json => DetailFormat::Json,
            Format::Csv => DetailFormat::Csv,
        });
        export.merge_step_details = self.merge_step_details.clone();
        export.activities_detail = self.activities_detail;
        if let Some(out) = &self.out {
            export.set_path(out);
        }

        AppOptions {
            scrape: ScrapeOptions {
                snapshots: self.snapshots.clone(),
                start,
                end,
                workers: self.workers.clamp(1, WORKERS * 4),
                base_url: self.url.clone(),
            },
            export,
        }
    }
}

/// Logs per-day progress at info level.
#[derive(Default)]
struct CliProgress {
    total: usize,
    done: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn log(&mut self, msg: &str) {
        logf!("{msg}");
    }

    fn day_done(&mut self, date: NaiveDate) {
        self.done += 1;
        logf!("{date} ({}/{})", self.done, self.total);
    }
}

pub fn run(cli: &Cli) -> Result<RunSummary, Error> {
    let opts = cli.to_options();
    let mut progress = CliProgress::default();
    runner::run(&opts, Some(&mut progress))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn single_day_is_start_and_end() {
        let cli = Cli::parse_from(["gc_scrape", "--snapshots", "caps", "-d", "2017-03-29"]);
        let o = cli.to_options();
        assert_eq!(o.scrape.start, o.scrape.end);
        assert_eq!(o.export.format, ExportFormat::Json);
        assert_eq!(o.export.step_details, None);
        assert_eq!(o.scrape.workers, 1);
        assert_eq!(o.export.merge_step_details, None);
    }

    #[test]
    fn merge_target_is_passed_through() {
        let cli = Cli::parse_from([
            "gc_scrape", "--snapshots", "caps", "-d", "2017-03-01", "2017-03-31",
            "--merge-step-details", "out/march_bins.csv",
        ]);
        let o = cli.to_options();
        assert_eq!(o.export.merge_step_details, Some(PathBuf::from("out/march_bins.csv")));
        assert_eq!(o.export.step_details, None);
    }

    #[test]
    fn full_flag_set() {
        let cli = Cli::parse_from([
            "gc_scrape", "--snapshots", "caps",
            "-d", "2017-03-29", "2017-04-02",
            "-f", "csv", "-o", "reports/march",
            "--step-details", "json", "--activities-detail",
            "--workers", "3", "-vv",
        ]);
        let o = cli.to_options();
        assert_eq!(o.scrape.end, NaiveDate::from_ymd_opt(2017, 4, 2).unwrap());
        assert_eq!(o.export.out_path(), Path::new("reports").join("march.csv"));
        assert_eq!(o.export.step_details, Some(DetailFormat::Json));
        assert!(o.export.activities_detail);
        assert_eq!(o.scrape.workers, 3);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn bad_date_is_rejected() {
        assert!(Cli::try_parse_from(["gc_scrape", "--snapshots", "c", "-d", "29/03/2017"]).is_err());
    }
}
