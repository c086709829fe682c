//! Per-day keyword counts over a date range.
//!
//! Pure function over an already loaded [`Dataset`]. Nothing is cached, every
//! call walks the in-range snapshots again.

use chrono::NaiveDate;
use serde::Serialize;

use crate::dataset::{Dataset, Snapshot};
use crate::error::{Error, Result};

/// Inclusive on both ends. A start after the end selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// Fill unset ends from the dataset bounds. `None` if an end is unset
    /// and the dataset has no snapshots to take it from.
    pub fn resolve(
        dataset: &Dataset,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Option<Self> {
        let bounds = dataset.bounds();
        let start = start.or(bounds.map(|(first, _)| first))?;
        let end = end.or(bounds.map(|(_, last)| last))?;
        Some(DateRange::new(start, end))
    }

    /// Like [`DateRange::resolve`], but an unfillable end is an error.
    pub fn select(
        dataset: &Dataset,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self> {
        Self::resolve(dataset, start, end).ok_or(Error::NoSnapshots)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermSeries {
    pub term: String,
    /// aligned with [`Aggregate::dates`]
    pub counts: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aggregate {
    pub range: DateRange,
    pub dates: Vec<NaiveDate>,
    pub series: Vec<TermSeries>,
}

impl Aggregate {
    /// (date, count) pairs for the first series named `term`.
    pub fn points(&self, term: &str) -> Option<Vec<(NaiveDate, usize)>> {
        let series = self.series.iter().find(|s| s.term == term)?;
        Some(
            self.dates
                .iter()
                .copied()
                .zip(series.counts.iter().copied())
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Number of entries in `snapshot` tagged with exactly `term`.
pub fn count_term(snapshot: &Snapshot, term: &str) -> usize {
    snapshot
        .entries
        .values()
        .filter(|entry| entry.has_term(term))
        .count()
}

/// Count every requested term on every in-range day.
///
/// Series come back in the order the terms were given, one per term.
pub fn aggregate(dataset: &Dataset, range: &DateRange, terms: &[String]) -> Aggregate {
    let in_range: Vec<&Snapshot> = dataset
        .snapshots()
        .filter(|snapshot| range.contains(snapshot.date))
        .collect();

    let series = terms
        .iter()
        .map(|term| TermSeries {
            term: term.clone(),
            counts: in_range
                .iter()
                .map(|snapshot| count_term(snapshot, term))
                .collect(),
        })
        .collect();

    Aggregate {
        range: *range,
        dates: in_range.iter().map(|snapshot| snapshot.date).collect(),
        series,
    }
}
