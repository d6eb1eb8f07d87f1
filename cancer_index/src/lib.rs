/*!
Scoring and benchmarking reports for the Best Companies for Working with
Cancer Index survey.

A respondent answers a questionnaire covering 13 weighted dimensions of
workplace support. This crate turns one respondent's answers into:
- a score from 0 to 100 for each dimension,
- a weighted composite score and a performance tier,
- a narrative report that groups the answers by status.

All the functions are deterministic and never modify their inputs.

```
use cancer_index::catalog::Catalog;
use cancer_index::answers::AnswerRecord;
use cancer_index::report::ReportOptions;
use cancer_index::*;

let raw = serde_json::json!({
    "survey_id": "CAC-1",
    "company_name": "Acme",
    "dimension4_data": {"d4a": {"Nutrition coaching": "Currently offer"}}
});
let catalog = Catalog::builtin();
let record = AnswerRecord::from_json(&raw, "unknown", catalog)?;
let res = assess(&record, catalog, &ScoringRules::DEFAULT_RULES, &ReportOptions::default())?;
assert_eq!(res.scores.dimension_score(4), Some(10));
assert!(res.report.contains("## DIMENSION 4: Navigation & Expert Resources"));
# Ok::<(), AssessmentErrors>(())
```

See the [manual] for the scoring rules and the [quick_start] for the command
line program.
*/

mod config;

pub mod answers;
pub mod builder;
pub mod catalog;
pub mod manual;
pub mod quick_start;
pub mod report;
pub mod scoring;

use log::info;

pub use crate::config::*;

use crate::answers::AnswerRecord;
use crate::catalog::Catalog;
use crate::report::ReportOptions;

/// The scores and the report of one respondent.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Assessment {
    pub scores: ScoreResult,
    pub report: String,
}

/// Scores a record and renders its report.
pub fn assess(
    record: &AnswerRecord,
    catalog: &Catalog,
    rules: &ScoringRules,
    options: &ReportOptions,
) -> Result<Assessment, AssessmentErrors> {
    info!(
        "assess: {}: {} dimensions answered, {} issues",
        record.survey_id,
        record.dimensions.len(),
        record.issues.len()
    );
    let scores = scoring::score_assessment(record, catalog, rules)?;
    let report = report::generate_report(record, catalog, options);
    Ok(Assessment { scores, report })
}
