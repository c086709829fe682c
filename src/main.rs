use clap::Parser;
use jobtrend::aggregate::{self, DateRange};
use jobtrend::cli::{Cli, Command};
use jobtrend::config::Config;
use jobtrend::dataset::{self, Dataset};
use jobtrend::report;

fn load(config: &Config) -> jobtrend::Result<Dataset> {
    let dataset = dataset::load_dir(&config.data_dir)?;
    report::print_load_info(&dataset, config.verbose);
    Ok(dataset)
}

fn run(cli: Cli) -> jobtrend::Result<()> {
    let config = Config::load(&cli)?;

    match cli.command {
        Command::Days(args) => {
            let dataset = load(&config)?;
            if dataset.is_empty() && !args.json {
                println!("No snapshots found in {}.", config.data_dir.display());
                return Ok(());
            }
            report::print_days(&dataset, args.json)
        }
        Command::Series(args) => {
            let dataset = load(&config)?;

            let range = DateRange::select(&dataset, args.from, args.to)?;

            let terms = args.terms.unwrap_or_else(|| config.keywords.clone());
            log::debug!("aggregating {} terms over {} to {}", terms.len(), range.start, range.end);

            let result = aggregate::aggregate(&dataset, &range, &terms);
            report::print_series(&result, args.json)
        }
        Command::Terms => {
            report::print_terms(&config.keywords);
            Ok(())
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
