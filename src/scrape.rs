// src/scrape.rs
use std::{
    sync::{atomic::{AtomicUsize, Ordering}, mpsc},
    thread,
};

use chrono::NaiveDate;

use crate::{
    day::DayRecord,
    error::FetchError,
    fetch::DayFetcher,
    progress::Progress,
};

/// Every date from `start` to `end`, both included.
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, FetchError> {
    if start > end {
        return Err(FetchError::InvalidRange { start, end });
    }
    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}

/// One unparsed record per day, ascending. Stops at the first fetch error.
pub fn collect<F: DayFetcher + ?Sized>(
    fetcher: &F,
    start: NaiveDate,
    end: NaiveDate,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<DayRecord>, FetchError> {
    let days = days_in_range(start, end)?;

    if let Some(p) = progress.as_deref_mut() {
        p.begin(days.len());
        p.log("Fetching days…");
    }

    let mut records = Vec::with_capacity(days.len());
    for date in days {
        logf!("Getting day {date}");
        let markup = match fetcher.fetch_day(date) {
            Ok(m) => m,
            Err(e) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.finish();
                }
                return Err(e);
            }
        };
        records.push(DayRecord::new(date, markup));
        if let Some(p) = progress.as_deref_mut() {
            p.day_done(date);
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(records)
}

/// Same as `collect`, with `workers` threads pulling dates off a shared index.
/// Completion order is arbitrary; the result is sorted by date. On failure the
/// pool drains first, then the error of the earliest failing date is returned.
pub fn collect_parallel<F: DayFetcher + Sync + ?Sized>(
    fetcher: &F,
    start: NaiveDate,
    end: NaiveDate,
    workers: usize,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<DayRecord>, FetchError> {
    let days = days_in_range(start, end)?;

    if let Some(p) = progress.as_deref_mut() {
        p.begin(days.len());
        p.log("Fetching days…");
    }

    let workers = workers.min(days.len()).max(1);
    let counter = AtomicUsize::new(0);
    let (res_tx, res_rx) = mpsc::channel::<(NaiveDate, Result<DayRecord, FetchError>)>();

    let mut records: Vec<DayRecord> = Vec::with_capacity(days.len());
    let mut failures: Vec<(NaiveDate, FetchError)> = Vec::new();

    thread::scope(|scope| {
        for _ in 0..workers {
            let days = &days;
            let idx = &counter;
            let tx = res_tx.clone();
            scope.spawn(move || loop {
                let i = idx.fetch_add(1, Ordering::Relaxed);
                if i >= days.len() {
                    break;
                }
                let date = days[i];
                let result = fetcher.fetch_day(date).map(|m| DayRecord::new(date, m));
                if tx.send((date, result)).is_err() {
                    break;
                }
            });
        }
        drop(res_tx); // receiver side ends once every worker has exited

        for (date, result) in res_rx.iter() {
            match result {
                Ok(record) => {
                    records.push(record);
                    if let Some(p) = progress.as_deref_mut() {
                        p.day_done(date);
                    }
                }
                Err(e) => {
                    loge!("Day {date}: {e}");
                    if let Some(p) = progress.as_deref_mut() {
                        p.log(&format!("Day {date}: {e}"));
                    }
                    failures.push((date, e));
                }
            }
        }
    });

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    if let Some((_, e)) = failures.into_iter().min_by_key(|(d, _)| *d) {
        return Err(e);
    }
    records.sort_by_key(DayRecord::date);
    Ok(records)
}

/// Parse every record in order.
pub fn parse_all(records: &mut [DayRecord], mut progress: Option<&mut dyn Progress>) {
    for r in records.iter_mut() {
        logf!("Parsing day {}", r.date());
        r.parse();
        if let Some(p) = progress.as_deref_mut() {
            p.day_done(r.date());
        }
    }
}
