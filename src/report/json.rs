//! JSON output for scripting and for feeding a plotting front end.
//!
//! The series document carries the requested axis range alongside the data so
//! a chart can be drawn over the full selection even when some days are missing.

use chrono::NaiveDate;
use serde::Serialize;

use super::SERIES_TITLE;
use crate::aggregate::{Aggregate, DateRange};
use crate::error::Result;
use crate::util::title_case;

#[derive(Serialize)]
struct DayTotal {
    date: NaiveDate,
    jobs: usize,
}

#[derive(Serialize)]
struct Trace<'a> {
    term: &'a str,
    label: String,
    counts: &'a [usize],
}

#[derive(Serialize)]
struct SeriesDocument<'a> {
    title: &'static str,
    range: &'a DateRange,
    dates: &'a [NaiveDate],
    series: Vec<Trace<'a>>,
}

pub fn render_days(totals: &[(NaiveDate, usize)]) -> Result<String> {
    let days: Vec<DayTotal> = totals
        .iter()
        .map(|&(date, jobs)| DayTotal { date, jobs })
        .collect();
    Ok(serde_json::to_string_pretty(&days)?)
}

pub fn render_series(result: &Aggregate) -> Result<String> {
    let document = SeriesDocument {
        title: SERIES_TITLE,
        range: &result.range,
        dates: &result.dates,
        series: result
            .series
            .iter()
            .map(|s| Trace {
                term: &s.term,
                label: title_case(&s.term),
                counts: &s.counts,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}
