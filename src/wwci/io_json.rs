// Readers for the JSON exports of the survey store and for element weights.

use std::collections::BTreeMap;
use std::path::Path;

use cancer_index::answers::AnswerRecord;
use cancer_index::catalog::{Catalog, ElementWeight};
use serde::{Deserialize, Serialize};

use crate::wwci::{io_common::make_default_id, *};

/// Reads a batch export, or all the `.json` files of a directory in name order.
pub fn read_answer_source(path: &str, catalog: &Catalog) -> WwciResult<Vec<AnswerRecord>> {
    if !Path::new(path).is_dir() {
        return read_answer_records(path, catalog);
    }
    let mut files: Vec<String> = Vec::new();
    for entry in fs::read_dir(path).context(OpeningJsonSnafu { path })? {
        let p = entry.context(OpeningJsonSnafu { path })?.path();
        if p.extension().map_or(false, |e| e == "json") {
            files.push(p.display().to_string());
        }
    }
    files.sort();
    debug!("read_answer_source: {:?}: {:?}", path, files);
    let mut res: Vec<AnswerRecord> = Vec::new();
    for f in files.iter() {
        res.append(&mut read_answer_records(f, catalog)?);
    }
    Ok(res)
}

/// Reads an export: a single record or an array of records.
pub fn read_answer_records(path: &str, catalog: &Catalog) -> WwciResult<Vec<AnswerRecord>> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    let default_id = make_default_id(path);
    let raw_records: Vec<&JSValue> = match &js {
        JSValue::Array(l) => l.iter().collect(),
        x => vec![x],
    };
    let mut res: Vec<AnswerRecord> = Vec::new();
    for (idx, raw) in raw_records.iter().enumerate() {
        let fallback_id = default_id(idx + 1);
        let record = AnswerRecord::from_json(raw, &fallback_id, catalog).context(AssessmentSnafu {
            survey_id: fallback_id.clone(),
        })?;
        for issue in record.issues.iter() {
            warn!("read_answer_records: {}: {}", record.survey_id, issue);
        }
        res.push(record);
    }
    info!("read_answer_records: {} records from {:?}", res.len(), path);
    Ok(res)
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
struct WeightEntryJs {
    #[serde(rename = "e")]
    element: String,
    #[serde(rename = "w")]
    weight: f64,
    #[serde(rename = "s")]
    standard_setter: Option<f64>,
}

/// Reads element weights in the format `{"4": [{"e": name, "w": weight, "s": share}]}`.
pub fn read_element_weights_json(path: &str) -> WwciResult<Vec<ElementWeight>> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: BTreeMap<String, Vec<WeightEntryJs>> =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    let mut res: Vec<ElementWeight> = Vec::new();
    for (dim, entries) in js.iter() {
        let dimension = match dim.trim_start_matches('d').parse::<u32>() {
            Ok(d) => d,
            Err(_) => whatever!("{}: {:?} is not a dimension number", path, dim),
        };
        for entry in entries {
            res.push(ElementWeight {
                dimension,
                element: entry.element.clone(),
                weight: entry.weight,
                standard_setter: entry.standard_setter,
            });
        }
    }
    debug!("read_element_weights_json: {} weights", res.len());
    Ok(res)
}
