// src/config/options.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use super::consts::*;
use crate::file::looks_like_dir_hint;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// Root of the per-day snapshot directories.
    pub snapshots: PathBuf,
    pub start: NaiveDate,
    /// Inclusive.
    pub end: NaiveDate,
    /// 1 = sequential.
    pub workers: usize,
    pub base_url: String,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        let today = Local::now().date_naive();
        Self {
            snapshots: PathBuf::from("."),
            start: today,
            end: today,
            workers: 1,
            base_url: s!(GARMIN_CONNECT_URL),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Json => "json", ExportFormat::Csv => "csv" }
    }
}

/// Format of the per-day step-bin side files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DetailFormat {
    Json,
    #[default]
    Csv,
}

impl DetailFormat {
    pub fn ext(&self) -> &'static str {
        match self { DetailFormat::Json => "json", DetailFormat::Csv => "csv" }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    out_path: OutputPath,
    pub step_details: Option<DetailFormat>,
    /// Also fold every day's step bins into one CSV at this path.
    pub merge_step_details: Option<PathBuf>,
    pub activities_detail: bool,
}

impl ExportOptions {
    /// `<dir>/<stem>.<ext>`; the format decides the extension.
    pub fn out_path(&self) -> PathBuf {
        let stem = self.out_path.file_stem.to_string_lossy();
        self.out_path.dir.join(format!("{stem}.{}", self.format.ext()))
    }

    /// Where side files (step bins, activity detail) go.
    pub fn out_dir(&self) -> &Path {
        &self.out_path.dir
    }

    /// Parse user text into dir + stem. A directory hint keeps the default stem;
    /// a pasted extension is ignored.
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        if s.is_empty() {
            self.out_path = OutputPath::default();
            return;
        }

        let p = Path::new(s);
        if looks_like_dir_hint(p) || p.is_dir() {
            self.out_path.dir = p.to_path_buf();
            self.out_path.file_stem = OsString::from(DEFAULT_FILE);
            return;
        }

        self.out_path.dir = p.parent().map(Path::to_path_buf).unwrap_or_default();
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem = stem.to_os_string();
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_FILE),
        }
    }
}
