use clap::Parser;

/// This program scores the answers to the Best Companies for Working with Cancer
/// Index survey and writes a benchmarking report for each respondent.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON run configuration: answer sources, element weights and scoring rules.
    /// For more information about the file format, read the manual of the cancer_index crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference summary in JSON format. If provided, wwci will
    /// check that the calculated summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (directory path or 'stdout') If specified, the reports and the summary will be written to the given
    /// location. Setting this option overrides the output directory that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file or directory path) If specified, the answer records are read from this JSON export. Setting this
    /// option overrides the sources that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (survey id) If specified, only this respondent is scored.
    #[clap(short, long, value_parser)]
    pub survey_id: Option<String>,

    /// (file path) If specified, one row of scores per respondent is written in CSV format to the given location.
    #[clap(long, value_parser)]
    pub summary_csv: Option<String>,

    /// (file path, .json or .csv) The calibrated weights of the elements. Elements not listed keep an equal share
    /// of their dimension.
    #[clap(short, long, value_parser)]
    pub weights: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
