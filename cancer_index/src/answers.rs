/*!
The answer model of a respondent, and its validation from raw JSON.

A raw answer record is the JSON object exported from the survey store. It
is converted once at this boundary into an [AnswerRecord]. Scoring and
reporting only work with the validated form.
*/

use std::collections::BTreeMap;

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::catalog::{Catalog, Dimension, GeographicReach};
use crate::config::*;

/// The statuses of the elements of a dimension, keyed by catalog index.
///
/// Iteration follows the catalog order.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct StatusGrid {
    entries: BTreeMap<usize, Status>,
}

impl StatusGrid {
    pub fn new() -> StatusGrid {
        StatusGrid::default()
    }

    pub fn insert(&mut self, element_index: usize, status: Status) {
        self.entries.insert(element_index, status);
    }

    pub fn get(&self, element_index: usize) -> Option<Status> {
        self.entries.get(&element_index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Status)> + '_ {
        self.entries.iter().map(|(idx, s)| (*idx, *s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, status: Status) -> usize {
        self.entries.values().filter(|s| **s == status).count()
    }
}

/// A free-form section of the questionnaire: question id to answer.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Section {
    pub fields: BTreeMap<String, Answer>,
}

impl Section {
    pub fn get(&self, key: &str) -> Option<&Answer> {
        self.fields.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|a| a.text())
    }

    pub fn list(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(|a| a.list())
    }

    pub fn ratings(&self, key: &str) -> Option<&BTreeMap<String, String>> {
        match self.get(key) {
            Some(Answer::Ratings(m)) if !m.is_empty() => Some(m),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.values().all(|a| a.is_blank())
    }
}

/// The answers to one dimension.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct DimensionAnswers {
    /// None when the respondent never reached the grid.
    pub grid: Option<StatusGrid>,
    /// Every other question of the dimension.
    pub fields: Section,
}

impl DimensionAnswers {
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.text(key)
    }

    pub fn list(&self, key: &str) -> Option<&[String]> {
        self.fields.list(key)
    }

    pub fn geography(&self, dimension: &Dimension) -> Option<GeographicReach> {
        self.text(&dimension.geography_key())
            .and_then(GeographicReach::classify)
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_none() && self.fields.is_empty()
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct AnswerRecord {
    pub survey_id: String,
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub created_at: Option<String>,
    pub firmographics: Section,
    pub general_benefits: Section,
    pub current_support: Section,
    /// Only the dimensions present in the source, keyed by dimension number.
    pub dimensions: BTreeMap<u32, DimensionAnswers>,
    pub cross_dimensional: Section,
    pub employee_impact: Section,
    pub issues: Vec<AnswerIssue>,
}

impl AnswerRecord {
    pub fn dimension(&self, number: u32) -> Option<&DimensionAnswers> {
        self.dimensions.get(&number)
    }

    /// The company name, falling back to the firmographics answer.
    pub fn display_company(&self) -> Option<&str> {
        self.company_name
            .as_deref()
            .or_else(|| self.firmographics.text("companyName"))
    }

    pub fn has_dimension_data(&self) -> bool {
        self.dimensions.values().any(|d| !d.is_empty())
    }

    /// Parses a raw answer record.
    ///
    /// The survey id is read from the record itself. The fallback is used
    /// when the record carries none.
    pub fn from_json(
        value: &Value,
        fallback_id: &str,
        catalog: &Catalog,
    ) -> Result<AnswerRecord, AssessmentErrors> {
        let obj = value
            .as_object()
            .ok_or_else(|| malformed("", "", "an answer record must be a JSON object"))?;

        let survey_id = first_scalar(obj, &["survey_id", "app_id", "surveyId"])
            .unwrap_or_else(|| fallback_id.to_string());
        let mut record = AnswerRecord {
            survey_id,
            company_name: first_scalar(obj, &["company_name", "companyName"]),
            email: first_scalar(obj, &["email"]),
            created_at: first_scalar(obj, &["created_at", "createdAt"]),
            ..Default::default()
        };

        record.firmographics = section_from_json(obj, &["firmographics_data"])?;
        record.general_benefits = section_from_json(obj, &["general_benefits_data"])?;
        record.current_support = section_from_json(obj, &["current_support_data"])?;
        record.cross_dimensional = section_from_json(obj, &["cross_dimensional_data"])?;
        record.employee_impact = section_from_json(
            obj,
            &["employee_impact_data", "employee-impact-assessment_data"],
        )?;

        for dim in catalog.dimensions() {
            let key = dim.section_key();
            match obj.get(&key) {
                None | Some(Value::Null) => {}
                Some(Value::Object(m)) => {
                    let answers = dimension_from_json(dim, m, &mut record.issues)?;
                    record.dimensions.insert(dim.number, answers);
                }
                Some(_) => return Err(malformed(&key, "", "expected a map of answers")),
            }
        }
        debug!(
            "from_json: record {}: {} dimensions, {} issues",
            record.survey_id,
            record.dimensions.len(),
            record.issues.len()
        );
        Ok(record)
    }
}

/// A status as found in a grid, before validation.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum GridValue {
    Label(String),
    Code(i64),
}

/// Adds one grid entry, or records why it was dropped.
pub(crate) fn resolve_grid_entry(
    dim: &Dimension,
    element: &str,
    value: &GridValue,
    grid: &mut StatusGrid,
    issues: &mut Vec<AnswerIssue>,
) {
    let idx = match dim.element_index(element) {
        Some(idx) => idx,
        None => {
            warn!(
                "dimension {}: dropping unknown element {:?}",
                dim.number, element
            );
            issues.push(AnswerIssue::UnknownElement {
                dimension: dim.number,
                element: element.to_string(),
            });
            return;
        }
    };
    let (status, raw) = match value {
        GridValue::Label(l) if l.trim().is_empty() => return,
        GridValue::Label(l) => (dim.parse_status(l), l.clone()),
        GridValue::Code(c) => (dim.accept_code(*c), c.to_string()),
    };
    match status {
        // The first spelling of an element in key order wins.
        Some(_) if grid.get(idx).is_some() => {
            warn!(
                "dimension {}: dropping duplicate element {:?}",
                dim.number, element
            );
            issues.push(AnswerIssue::DuplicateElement {
                dimension: dim.number,
                element: element.to_string(),
            });
        }
        Some(s) => grid.insert(idx, s),
        None => {
            warn!(
                "dimension {}: dropping unknown status {:?} for {:?}",
                dim.number, raw, element
            );
            issues.push(AnswerIssue::UnknownStatusValue {
                dimension: dim.number,
                element: element.to_string(),
                value: raw,
            });
        }
    }
}

// Older exports used these spellings for the follow-up questions.
const KEY_ALIASES: [(&str, &str); 6] = [
    ("d31", "d3_1"),
    ("d31a", "d3_1a"),
    ("d41a", "d4_1a"),
    ("d41b", "d4_1b"),
    ("d41a_other", "d4_1a_other"),
    ("d41b_other", "d4_1b_other"),
];

fn canonical_key(key: &str) -> &str {
    KEY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(key)
}

fn is_free_text_key(key: &str) -> bool {
    let dimension_other = key.starts_with('d')
        && key.ends_with('b')
        && key.len() > 2
        && key[1..key.len() - 1].chars().all(|c| c.is_ascii_digit());
    dimension_other
        || matches!(key, "or2b" | "ei4" | "ei5" | "d12_2")
        || key.ends_with("_other")
}

fn malformed(section: &str, key: &str, reason: &str) -> AssessmentErrors {
    AssessmentErrors::MalformedAnswerMap {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn first_scalar(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .filter_map(scalar_text)
        .find(|s| !s.trim().is_empty())
}

fn answer_from_json(section: &str, key: &str, v: &Value) -> Result<Option<Answer>, AssessmentErrors> {
    let answer = match v {
        Value::Null => None,
        Value::String(s) if is_free_text_key(key) => Some(Answer::FreeText(s.clone())),
        Value::Array(items) => {
            let mut res: Vec<String> = Vec::new();
            for item in items {
                match item {
                    Value::Null => {}
                    Value::Array(_) | Value::Object(_) => {
                        return Err(malformed(section, key, "nested values in a list"))
                    }
                    scalar => res.extend(scalar_text(scalar)),
                }
            }
            Some(Answer::MultiSelect(res))
        }
        Value::Object(m) => {
            let mut ratings: BTreeMap<String, String> = BTreeMap::new();
            for (k, item) in m {
                match item {
                    Value::Null => {}
                    Value::Array(_) | Value::Object(_) => {
                        return Err(malformed(section, key, "nested values in a rating map"))
                    }
                    scalar => {
                        if let Some(s) = scalar_text(scalar) {
                            ratings.insert(k.clone(), s);
                        }
                    }
                }
            }
            Some(Answer::Ratings(ratings))
        }
        scalar => scalar_text(scalar).map(Answer::SingleSelect),
    };
    Ok(answer)
}

fn section_from_json(obj: &Map<String, Value>, keys: &[&str]) -> Result<Section, AssessmentErrors> {
    let mut section = Section::default();
    for key in keys {
        match obj.get(*key) {
            None | Some(Value::Null) => {}
            Some(Value::Object(m)) => {
                for (k, v) in m {
                    if section.fields.contains_key(k) {
                        continue;
                    }
                    if let Some(a) = answer_from_json(key, k, v)? {
                        section.fields.insert(k.clone(), a);
                    }
                }
            }
            Some(_) => return Err(malformed(key, "", "expected a map of answers")),
        }
    }
    Ok(section)
}

fn dimension_from_json(
    dim: &Dimension,
    m: &Map<String, Value>,
    issues: &mut Vec<AnswerIssue>,
) -> Result<DimensionAnswers, AssessmentErrors> {
    let section_key = dim.section_key();
    let grid_key = dim.grid_key();
    let mut res = DimensionAnswers::default();
    for (k, v) in m {
        if *k == grid_key {
            res.grid = match v {
                Value::Null => None,
                Value::Object(entries) => Some(grid_from_json(dim, entries, issues)?),
                _ => {
                    return Err(malformed(
                        &section_key,
                        k,
                        "expected a map of element to status",
                    ))
                }
            };
            continue;
        }
        let key = canonical_key(k);
        // The canonical spelling wins over an alias.
        if key != k && m.contains_key(key) {
            continue;
        }
        if let Some(a) = answer_from_json(&section_key, key, v)? {
            res.fields.fields.insert(key.to_string(), a);
        }
    }
    Ok(res)
}

fn grid_from_json(
    dim: &Dimension,
    entries: &Map<String, Value>,
    issues: &mut Vec<AnswerIssue>,
) -> Result<StatusGrid, AssessmentErrors> {
    let mut grid = StatusGrid::new();
    for (element, v) in entries {
        let value = match v {
            Value::Null => continue,
            Value::String(s) => GridValue::Label(s.clone()),
            Value::Number(n) => match n.as_i64() {
                Some(c) => GridValue::Code(c),
                None => GridValue::Label(n.to_string()),
            },
            _ => {
                return Err(malformed(
                    &dim.section_key(),
                    &dim.grid_key(),
                    &format!("the status of {:?} is not a string", element),
                ))
            }
        };
        resolve_grid_entry(dim, element, &value, &mut grid, issues);
    }
    Ok(grid)
}
