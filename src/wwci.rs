use log::{debug, info, warn};

use cancer_index::answers::AnswerRecord;
use cancer_index::catalog::Catalog;
use cancer_index::report::ReportOptions;
use cancer_index::*;
use snafu::{prelude::*, ErrorCompat, Snafu};

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::wwci::config_reader::*;
use crate::wwci::io_common::{report_file_name, resolve_path, simplify_file_name};

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_json;

#[derive(Debug, Snafu)]
pub enum WwciError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the summary"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error opening the CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading a CSV line"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Line {lineno} is too short"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display("Line {lineno}: {value:?} is not a number"))]
    CsvNumber { lineno: usize, value: String },
    #[snafu(display("Error writing the CSV file {path}"))]
    CsvWrite { source: csv::Error, path: String },
    #[snafu(display("Error writing {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Invalid assessment {survey_id}"))]
    Assessment {
        source: AssessmentErrors,
        survey_id: String,
    },
    #[snafu(display("Invalid element weights in {path}"))]
    InvalidWeights {
        source: AssessmentErrors,
        path: String,
    },
    #[snafu(display("Invalid rules"))]
    InvalidRules { source: AssessmentErrors },
    #[snafu(display("No assessment with survey id {survey_id}"))]
    AssessmentNotFound { survey_id: String },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    ReferenceMismatch {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type WwciResult<T> = Result<T, WwciError>;

/// Where the answer records come from.
pub trait AssessmentStore {
    fn get_assessment(&self, survey_id: &str) -> WwciResult<&AnswerRecord>;

    fn assessments(&self) -> &[AnswerRecord];
}

/// Records loaded from JSON files or directories of JSON files.
pub struct JsonStore {
    records: Vec<AnswerRecord>,
}

impl JsonStore {
    pub fn from_sources(sources: &[(String, FileSource)], catalog: &Catalog) -> WwciResult<JsonStore> {
        let mut records: Vec<AnswerRecord> = Vec::new();
        for (path, cfs) in sources.iter() {
            info!("Attempting to read assessments {:?}", path);
            let mut file_records = match cfs.provider.as_str() {
                "json" => io_json::read_answer_source(path, catalog)?,
                x => whatever!("Provider not implemented {:?}", x),
            };
            if let Some(id) = cfs.survey_id.as_ref() {
                file_records.retain(|r| &r.survey_id == id);
                if file_records.is_empty() {
                    return AssessmentNotFoundSnafu {
                        survey_id: id.clone(),
                    }
                    .fail();
                }
            }
            records.append(&mut file_records);
        }
        let mut seen: HashSet<&str> = HashSet::new();
        for r in records.iter() {
            if !seen.insert(r.survey_id.as_str()) {
                warn!("JsonStore: duplicate survey id {}", r.survey_id);
            }
        }
        Ok(JsonStore { records })
    }
}

impl AssessmentStore for JsonStore {
    fn get_assessment(&self, survey_id: &str) -> WwciResult<&AnswerRecord> {
        self.records
            .iter()
            .find(|r| r.survey_id == survey_id)
            .context(AssessmentNotFoundSnafu { survey_id })
    }

    fn assessments(&self) -> &[AnswerRecord] {
        &self.records
    }
}

/// Receives the finished artifacts of a run.
pub trait ArtifactSink {
    fn emit(&self, file_name: &str, contents: &str) -> WwciResult<()>;
}

pub struct DirectorySink {
    pub directory: PathBuf,
}

impl ArtifactSink for DirectorySink {
    fn emit(&self, file_name: &str, contents: &str) -> WwciResult<()> {
        let dir = self.directory.display().to_string();
        fs::create_dir_all(&self.directory).context(WritingOutputSnafu { path: dir })?;
        let p = self.directory.join(file_name);
        let path = p.display().to_string();
        info!("Writing {:?}", path);
        fs::write(&p, contents).context(WritingOutputSnafu { path })
    }
}

pub struct StdoutSink {}

impl ArtifactSink for StdoutSink {
    fn emit(&self, file_name: &str, contents: &str) -> WwciResult<()> {
        println!("==> {} <==", file_name);
        println!("{}", contents);
        Ok(())
    }
}

/// Command line values that take precedence over the configuration file.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RunOverrides {
    pub input: Option<String>,
    pub survey_id: Option<String>,
    pub out: Option<String>,
    pub summary_csv: Option<String>,
    pub weights: Option<String>,
}

/// The scores of one respondent, as they appear in the summaries.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RespondentResult {
    pub survey_id: String,
    pub company_name: Option<String>,
    pub scores: ScoreResult,
    pub issues: Vec<String>,
}

#[derive(Serialize)]
struct DimensionScoreJs {
    dimension: u32,
    weight: u32,
    score: Option<u32>,
    #[serde(rename = "gridScore")]
    grid_score: Option<u32>,
    #[serde(rename = "followUpScore")]
    follow_up_score: Option<u32>,
    answered: usize,
    offering: usize,
    unsure: usize,
    #[serde(rename = "insufficientData")]
    insufficient_data: bool,
}

#[derive(Serialize)]
struct ScoresJs {
    #[serde(rename = "dimensionScores")]
    dimension_scores: BTreeMap<String, Option<u32>>,
    #[serde(rename = "weightedDimScore")]
    weighted_dim_score: Option<u32>,
    #[serde(rename = "compositeScore")]
    composite_score: Option<u32>,
    tier: Option<String>,
    #[serde(rename = "maturityScore")]
    maturity_score: u32,
    #[serde(rename = "breadthScore")]
    breadth_score: u32,
    #[serde(rename = "completedDimensions")]
    completed_dimensions: usize,
    #[serde(rename = "isProvisional")]
    is_provisional: bool,
    dimensions: Vec<DimensionScoreJs>,
}

#[derive(Serialize)]
struct RespondentJs {
    #[serde(rename = "surveyId")]
    survey_id: String,
    #[serde(rename = "companyName")]
    company_name: Option<String>,
    scores: ScoresJs,
    issues: Vec<String>,
}

#[derive(Serialize)]
struct SummaryJs {
    config: OutputConfig,
    results: Vec<RespondentJs>,
}

fn scores_to_js(sr: &ScoreResult) -> ScoresJs {
    ScoresJs {
        dimension_scores: sr
            .dimension_scores()
            .into_iter()
            .map(|(d, s)| (d.to_string(), s))
            .collect(),
        weighted_dim_score: sr.weighted_dim_score,
        composite_score: sr.composite_score,
        tier: sr.tier.map(|t| t.label().to_string()),
        maturity_score: sr.maturity_score,
        breadth_score: sr.breadth_score,
        completed_dimensions: sr.completed_dimensions,
        is_provisional: sr.is_provisional,
        dimensions: sr
            .dimensions
            .iter()
            .map(|ds| DimensionScoreJs {
                dimension: ds.dimension,
                weight: ds.weight,
                score: ds.score,
                grid_score: ds.grid_score,
                follow_up_score: ds.follow_up_score,
                answered: ds.answered,
                offering: ds.offering,
                unsure: ds.unsure,
                insufficient_data: ds.insufficient_data,
            })
            .collect(),
    }
}

/// The summary of a run. Keys come out sorted, so that two summaries can be
/// compared line by line.
fn build_summary_js(config: &WwciConfig, results: &[RespondentResult]) -> WwciResult<JSValue> {
    let summary = SummaryJs {
        config: OutputConfig {
            report_name: config.output_settings.report_name.clone(),
            generated_on: config.output_settings.generated_on.clone(),
        },
        results: results
            .iter()
            .map(|rr| RespondentJs {
                survey_id: rr.survey_id.clone(),
                company_name: rr.company_name.clone(),
                scores: scores_to_js(&rr.scores),
                issues: rr.issues.clone(),
            })
            .collect(),
    };
    serde_json::to_value(&summary).context(SerializingJsonSnafu {})
}

fn default_config(input: &str) -> WwciConfig {
    WwciConfig {
        output_settings: OutputSettings {
            report_name: simplify_file_name(input),
            output_directory: None,
            generated_on: None,
            include_reports: None,
        },
        assessment_sources: vec![],
        element_weights: None,
        rules: None,
    }
}

fn read_element_weights(path: &str, cfs: &FileSource) -> WwciResult<Catalog> {
    let weights = match cfs.provider.as_str() {
        "json" => io_json::read_element_weights_json(path)?,
        "csv" => io_csv::read_element_weights_csv(path)?,
        x => whatever!("Provider not implemented for element weights {:?}", x),
    };
    Catalog::builtin()
        .with_element_weights(&weights)
        .context(InvalidWeightsSnafu { path })
}

fn weights_source(path: &str) -> FileSource {
    let provider = if path.ends_with(".csv") { "csv" } else { "json" };
    FileSource {
        provider: provider.to_string(),
        file_path: path.to_string(),
        survey_id: None,
    }
}

pub fn run_assessment(
    config_path: Option<String>,
    check_summary_path: Option<String>,
    overrides: &RunOverrides,
) -> WwciResult<()> {
    let (config, root_p): (WwciConfig, Option<PathBuf>) = match (config_path, &overrides.input) {
        (Some(p), _) => {
            let config = read_config(&p)?;
            let root = Path::new(p.as_str())
                .parent()
                .context(MissingParentDirSnafu {})?
                .to_path_buf();
            (config, Some(root))
        }
        (None, Some(input)) => (default_config(input), None),
        (None, None) => whatever!("Either a configuration file or an input file must be given"),
    };
    info!("config: {:?}", config);
    let root = root_p.as_deref();

    // Validate the rules:
    let rules = validate_rules(&config.rules.clone().unwrap_or_default())?;

    let catalog: Catalog = match (&overrides.weights, &config.element_weights) {
        (Some(p), _) => read_element_weights(p, &weights_source(p))?,
        (None, Some(cfs)) => read_element_weights(&resolve_path(root, &cfs.file_path), cfs)?,
        (None, None) => Catalog::builtin().clone(),
    };

    let sources: Vec<(String, FileSource)> = match &overrides.input {
        Some(input) => vec![(
            input.clone(),
            FileSource {
                provider: "json".to_string(),
                file_path: input.clone(),
                survey_id: None,
            },
        )],
        None => config
            .assessment_sources
            .iter()
            .map(|cfs| (resolve_path(root, &cfs.file_path), cfs.clone()))
            .collect(),
    };
    if sources.is_empty() {
        whatever!("No assessment sources in the configuration");
    }
    let store = JsonStore::from_sources(&sources, &catalog)?;

    let selected: Vec<&AnswerRecord> = match &overrides.survey_id {
        Some(id) => vec![store.get_assessment(id)?],
        None => store.assessments().iter().collect(),
    };

    let sink: Option<Box<dyn ArtifactSink>> = match (&overrides.out, &config.output_settings.output_directory) {
        (Some(o), _) if o == "stdout" => Some(Box::new(StdoutSink {})),
        (Some(o), _) => Some(Box::new(DirectorySink {
            directory: PathBuf::from(o),
        })),
        (None, Some(d)) => Some(Box::new(DirectorySink {
            directory: PathBuf::from(resolve_path(root, d)),
        })),
        (None, None) => None,
    };
    let include_reports = config.output_settings.include_reports.unwrap_or(true);

    let options = ReportOptions {
        generated_on: Some(
            config
                .output_settings
                .generated_on
                .clone()
                .unwrap_or_else(|| chrono::Local::now().format("%B %-d, %Y").to_string()),
        ),
    };

    let mut results: Vec<RespondentResult> = Vec::new();
    for record in selected {
        let res = assess(record, &catalog, &rules, &options).context(AssessmentSnafu {
            survey_id: record.survey_id.clone(),
        })?;
        info!(
            "{} {}: composite {} ({}), {} dimensions scored",
            record.survey_id,
            record.display_company().unwrap_or("?"),
            res.scores
                .composite_score
                .map_or("-".to_string(), |s| s.to_string()),
            res.scores.tier.map_or("no tier", |t| t.label()),
            res.scores.completed_dimensions
        );
        if include_reports {
            if let Some(s) = sink.as_ref() {
                s.emit(&report_file_name(&record.survey_id), &res.report)?;
            }
        }
        results.push(RespondentResult {
            survey_id: record.survey_id.clone(),
            company_name: record.display_company().map(|s| s.to_string()),
            scores: res.scores,
            issues: record.issues.iter().map(|i| i.to_string()).collect(),
        });
    }

    // Assemble the final json
    let result_js = build_summary_js(&config, &results)?;
    let pretty_js_stats =
        serde_json::to_string_pretty(&result_js).context(SerializingJsonSnafu {})?;
    match sink.as_ref() {
        Some(s) => s.emit("summary.json", &pretty_js_stats)?,
        None => println!("summary:{}", pretty_js_stats),
    }

    if let Some(csv_p) = overrides.summary_csv.as_ref() {
        io_csv::write_summary_csv(csv_p, &results)?;
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = check_summary_path {
        let summary_ref = read_summary(&summary_p)?;
        debug!("summary: {:?}", summary_ref);
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(SerializingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            return ReferenceMismatchSnafu {}.fail();
        }
    }

    Ok(())
}

fn run_assessment_test(test_name: &str, config_lpath: &str, summary_lpath: &str) -> WwciResult<()> {
    let test_dir =
        option_env!("WWCI_TEST_DIR").unwrap_or(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata"));
    info!("Running test {}", test_name);
    let res = run_assessment(
        Some(format!("{}/{}/{}", test_dir, test_name, config_lpath)),
        Some(format!("{}/{}/{}", test_dir, test_name, summary_lpath)),
        &RunOverrides::default(),
    );
    if let Err(e) = &res {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(e) {
            eprintln!("trace: {}", bt);
        }
    }
    res
}

pub fn test_wrapper(test_name: &str) {
    let res = run_assessment_test(
        test_name,
        format!("{}_config.json", test_name).as_str(),
        format!("{}_expected_summary.json", test_name).as_str(),
    );
    assert!(res.is_ok(), "{}: {:?}", test_name, res);
}
