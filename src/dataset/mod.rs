//! In-memory snapshot dataset.
//!
//! One snapshot per calendar day, each holding the job-listing entries
//! captured that day keyed by entry id. Populated once by [`load::load_dir`]
//! and read-only afterwards.

pub mod load;

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use load::{load_dir, parse_file_date};

/// One job listing. Only `terms` is interpreted, everything else is kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<Vec<String>>,

    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl Entry {
    /// Keyword terms tagged on this listing, empty when the field is absent or null.
    pub fn terms(&self) -> &[String] {
        self.terms.as_deref().unwrap_or(&[])
    }

    pub fn has_term(&self, term: &str) -> bool {
        self.terms().iter().any(|t| t == term)
    }
}

/// All entries captured on one day.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub date: NaiveDate,
    pub source: PathBuf,
    pub entries: BTreeMap<String, Entry>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Canonical `YYYY-MM-DD` key for this snapshot.
    pub fn key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Timing and memory figures recorded while loading.
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    pub duration_ms: u128,
    pub files_skipped: usize,
    pub resident_bytes: Option<usize>,
}

/// Snapshots keyed by date, always iterated in ascending date order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    snapshots: BTreeMap<NaiveDate, Snapshot>,
    pub stats: LoadStats,
}

impl Dataset {
    pub fn from_snapshots(snapshots: impl IntoIterator<Item = Snapshot>) -> Self {
        Dataset {
            snapshots: snapshots.into_iter().map(|s| (s.date, s)).collect(),
            stats: LoadStats::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&Snapshot> {
        self.snapshots.get(&date)
    }

    pub fn snapshots(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.values()
    }

    pub fn dates(&self) -> impl DoubleEndedIterator<Item = NaiveDate> + '_ {
        self.snapshots.keys().copied()
    }

    /// Earliest and latest snapshot dates, `None` for an empty dataset.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.dates().next()?;
        let last = self.dates().next_back()?;
        Some((first, last))
    }

    /// Number of entries per day, ascending by date.
    pub fn day_totals(&self) -> Vec<(NaiveDate, usize)> {
        self.snapshots
            .iter()
            .map(|(date, snapshot)| (*date, snapshot.len()))
            .collect()
    }

    pub(crate) fn insert(&mut self, snapshot: Snapshot) -> Option<Snapshot> {
        self.snapshots.insert(snapshot.date, snapshot)
    }
}
