//! Terminal tables for day totals and keyword series.
//!
//! Series tables put one day per row and one keyword per column, with a
//! trailing total row.

use chrono::NaiveDate;

use super::SERIES_TITLE;
use crate::aggregate::Aggregate;
use crate::util::{title_case, truncate};

const DATE_WIDTH: usize = 12;
const COLUMN_WIDTH: usize = 12;

pub fn render_days(totals: &[(NaiveDate, usize)]) -> String {
    if totals.is_empty() {
        return String::from("No snapshots found.\n");
    }

    let mut output = String::new();
    output.push_str(&format!("{:<DATE_WIDTH$} {:>10}\n", "Date", "Jobs"));
    output.push_str(&"-".repeat(DATE_WIDTH + 11));
    output.push('\n');

    let mut grand_total = 0;
    for (date, jobs) in totals {
        grand_total += jobs;
        output.push_str(&format!("{:<DATE_WIDTH$} {jobs:>10}\n", date.to_string()));
    }

    output.push_str(&format!("{:<DATE_WIDTH$} {grand_total:>10}\n", "total"));
    output
}

pub fn render_series(result: &Aggregate) -> String {
    let range = &result.range;
    let mut output = format!("{SERIES_TITLE} ({} to {})\n", range.start, range.end);

    if result.is_empty() {
        output.push_str("No snapshots in range.\n");
        return output;
    }

    output.push_str(&format!("{:<DATE_WIDTH$}", "Date"));
    for series in &result.series {
        let label = truncate(&title_case(&series.term), COLUMN_WIDTH);
        output.push_str(&format!(" {label:>COLUMN_WIDTH$}"));
    }
    output.push('\n');
    output.push_str(&"-".repeat(DATE_WIDTH + result.series.len() * (COLUMN_WIDTH + 1)));
    output.push('\n');

    for (row, date) in result.dates.iter().enumerate() {
        output.push_str(&format!("{:<DATE_WIDTH$}", date.to_string()));
        for series in &result.series {
            output.push_str(&format!(" {:>COLUMN_WIDTH$}", series.counts[row]));
        }
        output.push('\n');
    }

    output.push_str(&format!("{:<DATE_WIDTH$}", "total"));
    for series in &result.series {
        let total: usize = series.counts.iter().sum();
        output.push_str(&format!(" {total:>COLUMN_WIDTH$}"));
    }
    output.push('\n');

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{DateRange, TermSeries};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_days() {
        assert_eq!(render_days(&[]), "No snapshots found.\n");
    }

    #[test]
    fn days_with_total() {
        let out = render_days(&[(date(2023, 10, 30), 3), (date(2023, 11, 1), 4)]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[2].starts_with("2023-10-30"));
        assert!(lines[2].ends_with(" 3"));
        assert!(lines[4].starts_with("total"));
        assert!(lines[4].ends_with(" 7"));
    }

    #[test]
    fn series_rows_and_columns() {
        let result = Aggregate {
            range: DateRange::new(date(2023, 10, 29), date(2023, 11, 1)),
            dates: vec![date(2023, 10, 30), date(2023, 11, 1)],
            series: vec![
                TermSeries { term: "python".to_string(), counts: vec![2, 5] },
                TermSeries { term: "rust".to_string(), counts: vec![0, 1] },
            ],
        };

        let out = render_series(&result);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Job Counts by Day (2023-10-29 to 2023-11-01)");
        assert!(lines[1].contains("Python"));
        assert!(lines[1].contains("Rust"));
        assert_eq!(
            lines[3].split_whitespace().collect::<Vec<_>>(),
            vec!["2023-10-30", "2", "0"]
        );
        assert_eq!(
            lines[5].split_whitespace().collect::<Vec<_>>(),
            vec!["total", "7", "1"]
        );
    }

    #[test]
    fn series_outside_data() {
        let result = Aggregate {
            range: DateRange::new(date(2024, 1, 1), date(2024, 1, 31)),
            dates: vec![],
            series: vec![TermSeries { term: "python".to_string(), counts: vec![] }],
        };
        assert!(render_series(&result).ends_with("No snapshots in range.\n"));
    }
}
