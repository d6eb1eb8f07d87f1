use clap::Parser;
use log::{debug, LevelFilter};
use snafu::ErrorCompat;

mod args;
mod wwci;

use crate::wwci::{run_assessment, RunOverrides};

fn main() {
    let args = args::Args::parse();

    if args.verbose {
        env_logger::builder().filter_level(LevelFilter::Debug).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }
    debug!("args: {:?}", args);

    let overrides = RunOverrides {
        input: args.input.clone(),
        survey_id: args.survey_id.clone(),
        out: args.out.clone(),
        summary_csv: args.summary_csv.clone(),
        weights: args.weights.clone(),
    };

    let res = run_assessment(args.config.clone(), args.reference.clone(), &overrides);

    if let Err(e) = res {
        eprintln!("An error occured: {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("{}", bt);
        }
        std::process::exit(1);
    }
}
