pub mod table;
pub mod json;

use crate::aggregate::Aggregate;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::util::title_case;

pub const SERIES_TITLE: &str = "Job Counts by Day";

pub fn print_days(dataset: &Dataset, json_output: bool) -> Result<()> {
    let totals = dataset.day_totals();
    if json_output {
        println!("{}", json::render_days(&totals)?);
    } else {
        print!("{}", table::render_days(&totals));
    }
    Ok(())
}

pub fn print_series(result: &Aggregate, json_output: bool) -> Result<()> {
    if json_output {
        println!("{}", json::render_series(result)?);
    } else {
        print!("{}", table::render_series(result));
    }
    Ok(())
}

pub fn print_terms(keywords: &[String]) {
    if keywords.is_empty() {
        println!("No keywords configured.");
        return;
    }

    for keyword in keywords {
        println!("{:20} {}", title_case(keyword), keyword);
    }
}

/// Load figures go to stderr so they never mix with --json output.
pub fn print_load_info(dataset: &Dataset, verbose: bool) {
    if !verbose {
        return;
    }

    let stats = &dataset.stats;
    let duration_sec = stats.duration_ms as f64 / 1000.0;
    eprintln!("loaded {} snapshots in {duration_sec:.2}s", dataset.len());

    if stats.files_skipped > 0 {
        eprintln!("skipped {} non-snapshot files", stats.files_skipped);
    }

    if let Some(bytes) = stats.resident_bytes {
        eprintln!("resident memory: {:.1} MB", bytes as f64 / 1_024_f64 / 1_024_f64);
    }
}
