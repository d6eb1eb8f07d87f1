// Primitives for reading and writing CSV files.

use cancer_index::catalog::{ElementWeight, NUM_DIMENSIONS};

use crate::wwci::*;

/// Reads element weights with the header `dimension,element,weight,standard_setter`.
///
/// The standard setter column is optional and may be left empty.
pub fn read_element_weights_csv(path: &str) -> WwciResult<Vec<ElementWeight>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let mut res: Vec<ElementWeight> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu {})?;
        debug!("read_element_weights_csv: {:?} {:?}", lineno, line);
        let dim_s = line.get(0).context(CsvLineTooShortSnafu { lineno })?.trim();
        // The header is optional.
        if lineno == 1 && dim_s == "dimension" {
            continue;
        }
        let dimension = parse_number::<u32>(dim_s, lineno)?;
        let element = line
            .get(1)
            .context(CsvLineTooShortSnafu { lineno })?
            .to_string();
        let weight_s = line.get(2).context(CsvLineTooShortSnafu { lineno })?.trim();
        let weight = parse_number::<f64>(weight_s, lineno)?;
        let standard_setter = match line.get(3).map(|s| s.trim()) {
            None | Some("") => None,
            Some(s) => Some(parse_number::<f64>(s, lineno)?),
        };
        res.push(ElementWeight {
            dimension,
            element,
            weight,
            standard_setter,
        });
    }
    Ok(res)
}

fn parse_number<T: std::str::FromStr>(s: &str, lineno: usize) -> WwciResult<T> {
    s.parse::<T>().ok().context(CsvNumberSnafu { lineno, value: s })
}

fn opt_cell(x: Option<u32>) -> String {
    x.map(|v| v.to_string()).unwrap_or_default()
}

/// One row per respondent. Scores that do not exist are empty cells.
pub fn write_summary_csv(path: &str, results: &[RespondentResult]) -> WwciResult<()> {
    let mut wtr = csv::Writer::from_path(path).context(CsvWriteSnafu { path })?;
    let mut header: Vec<String> = vec!["survey_id".to_string(), "company_name".to_string()];
    for d in 1..=NUM_DIMENSIONS {
        header.push(format!("d{}", d));
    }
    for h in [
        "weighted_dim_score",
        "composite_score",
        "tier",
        "maturity_score",
        "breadth_score",
        "provisional",
    ] {
        header.push(h.to_string());
    }
    wtr.write_record(&header).context(CsvWriteSnafu { path })?;

    for rr in results.iter() {
        let sr = &rr.scores;
        let mut row: Vec<String> = vec![
            rr.survey_id.clone(),
            rr.company_name.clone().unwrap_or_default(),
        ];
        for d in 1..=NUM_DIMENSIONS {
            row.push(opt_cell(sr.dimension_score(d)));
        }
        row.push(opt_cell(sr.weighted_dim_score));
        row.push(opt_cell(sr.composite_score));
        row.push(sr.tier.map(|t| t.label().to_string()).unwrap_or_default());
        row.push(sr.maturity_score.to_string());
        row.push(sr.breadth_score.to_string());
        row.push(sr.is_provisional.to_string());
        wtr.write_record(&row).context(CsvWriteSnafu { path })?;
    }
    wtr.flush().context(WritingOutputSnafu { path })?;
    info!("write_summary_csv: {} rows in {:?}", results.len(), path);
    Ok(())
}
