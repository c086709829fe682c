//! Snapshot directory loader.
//!
//! Snapshot files sit directly in the data directory and are named
//! `p-raw_data-<DD>-<MM>-<YY>.json`. Any other file is ignored. A bad date or
//! a bad body aborts the whole load.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Instant;

use chrono::NaiveDate;
use walkdir::WalkDir;

use super::{Dataset, Entry, Snapshot};
use crate::error::{Error, Result};

pub const FILE_PREFIX: &str = "p-raw_data-";
pub const FILE_SUFFIX: &str = ".json";

pub fn is_snapshot_file(file_name: &str) -> bool {
    file_name.starts_with(FILE_PREFIX) && file_name.ends_with(FILE_SUFFIX)
}

/// Two-digit years 69-99 are 19xx, 00-68 are 20xx.
pub fn expand_year(yy: u32) -> i32 {
    let yy = yy as i32;
    if yy >= 69 {
        1900 + yy
    } else {
        2000 + yy
    }
}

/// A run of ASCII digits whose length falls in `digits`.
fn number(token: &str, digits: RangeInclusive<usize>) -> Option<u32> {
    if !digits.contains(&token.len()) || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Parse the date out of the last three `-`-separated tokens of a filename.
///
/// Day and month take one or two digits, the year exactly two.
pub fn parse_file_date(file_name: &str) -> Result<NaiveDate> {
    let stem = file_name.strip_suffix(FILE_SUFFIX).unwrap_or(file_name);
    let tokens: Vec<&str> = stem.split('-').collect();
    let tail = &tokens[tokens.len().saturating_sub(3)..];
    let date_str = tail.join("-");

    let bad = |reason: &str| Error::FilenameDate {
        file: file_name.to_string(),
        reason: format!("{date_str:?}: {reason}"),
    };

    let [day, month, year] = tail else {
        return Err(bad("expected day-month-year"));
    };
    let day = number(day, 1..=2).ok_or_else(|| bad("day is not a one or two digit number"))?;
    let month = number(month, 1..=2).ok_or_else(|| bad("month is not a one or two digit number"))?;
    let yy = number(year, 2..=2).ok_or_else(|| bad("year is not a two digit number"))?;

    NaiveDate::from_ymd_opt(expand_year(yy), month, day).ok_or_else(|| bad("no such calendar day"))
}

fn read_snapshot(path: &Path, date: NaiveDate) -> Result<Snapshot> {
    let body = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let entries: BTreeMap<String, Entry> =
        serde_json::from_str(&body).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(Snapshot {
        date,
        source: path.to_path_buf(),
        entries,
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load every snapshot file in `dir` into memory.
pub fn load_dir(dir: &Path) -> Result<Dataset> {
    let start = Instant::now();

    let metadata = fs::metadata(dir).map_err(|source| Error::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(Error::Config(format!("{} is not a directory", dir.display())));
    }

    let mut dataset = Dataset::default();
    let mut skipped = 0;

    // sorted so duplicate-date errors name the files in a stable order. links
    // are not followed, only entries with a snapshot name get resolved.
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            Error::Io {
                path,
                source: io::Error::from(e),
            }
        })?;

        let Some(file_name) = entry.file_name().to_str() else {
            log::debug!("skipping non utf-8 file name {:?}", entry.file_name());
            skipped += 1;
            continue;
        };

        if !is_snapshot_file(file_name) {
            log::debug!("skipping {file_name}: not a snapshot file");
            skipped += 1;
            continue;
        }

        let target = fs::metadata(entry.path()).map_err(|source| Error::Io {
            path: entry.path().to_path_buf(),
            source,
        })?;
        if !target.is_file() {
            log::debug!("skipping {file_name}: not a regular file");
            skipped += 1;
            continue;
        }

        let date = parse_file_date(file_name)?;
        let snapshot = read_snapshot(entry.path(), date)?;
        log::debug!("{file_name}: {} entries for {date}", snapshot.len());

        if let Some(previous) = dataset.insert(snapshot) {
            return Err(Error::DuplicateDate {
                date,
                first: file_label(&previous.source),
                second: file_name.to_string(),
            });
        }
    }

    dataset.stats.duration_ms = start.elapsed().as_millis();
    dataset.stats.files_skipped = skipped;
    dataset.stats.resident_bytes = memory_stats::memory_stats().map(|m| m.physical_mem);

    log::info!(
        "loaded {} snapshots from {} in {}ms",
        dataset.len(),
        dir.display(),
        dataset.stats.duration_ms
    );

    Ok(dataset)
}
