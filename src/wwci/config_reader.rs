use crate::wwci::*;

use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "reportName")]
    pub report_name: String,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "generatedOn")]
    pub generated_on: Option<String>,
    /// Write one report per respondent. Defaults to true.
    #[serde(rename = "includeReports")]
    pub include_reports: Option<bool>,
}

/// The header of the summary.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(rename = "reportName")]
    pub report_name: String,
    #[serde(rename = "generatedOn", skip_serializing_if = "Option::is_none")]
    pub generated_on: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    /// Only keep this respondent from the file.
    #[serde(rename = "surveyId")]
    pub survey_id: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CompositeWeightsJs {
    #[serde(rename = "weightedDim")]
    pub weighted_dim: u32,
    pub maturity: u32,
    pub breadth: u32,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct WwciRules {
    #[serde(rename = "statusCredit")]
    pub status_credit: Option<String>,
    #[serde(rename = "geoAdjustment")]
    pub geo_adjustment: Option<bool>,
    #[serde(rename = "followUpBlend")]
    pub follow_up_blend: Option<bool>,
    #[serde(rename = "compositeWeights")]
    pub composite_weights: Option<CompositeWeightsJs>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct WwciConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    #[serde(rename = "assessmentSources")]
    pub assessment_sources: Vec<FileSource>,
    #[serde(rename = "elementWeights")]
    pub element_weights: Option<FileSource>,
    pub rules: Option<WwciRules>,
}

pub fn read_config(path: &str) -> WwciResult<WwciConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: WwciConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> WwciResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    debug!("read_summary: {:?}", js);
    Ok(js)
}

pub fn validate_rules(rules: &WwciRules) -> WwciResult<ScoringRules> {
    let defaults = ScoringRules::DEFAULT_RULES;
    let res = ScoringRules {
        status_credit: match rules.status_credit.as_deref() {
            None | Some("offerOnly") => StatusCredit::OfferOnly,
            Some("ordinal") => StatusCredit::Ordinal,
            Some("legacyFlat") => StatusCredit::LegacyFlat,
            Some(x) => {
                whatever!(
                    "Cannot use status credit {:?}: expected offerOnly, ordinal or legacyFlat",
                    x
                )
            }
        },
        geo_adjustment: rules.geo_adjustment.unwrap_or(defaults.geo_adjustment),
        follow_up_blend: match rules.follow_up_blend {
            Some(true) => Some(BlendWeights::DEFAULT),
            _ => None,
        },
        composite: match rules.composite_weights.as_ref() {
            Some(cw) => CompositeWeights {
                weighted_dim: cw.weighted_dim,
                maturity: cw.maturity,
                breadth: cw.breadth,
            },
            None => defaults.composite,
        },
        ..defaults
    };
    res.validate().context(InvalidRulesSnafu {})?;
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rules() {
        let rules: WwciRules = serde_json::from_str(
            r#"{"statusCredit": "ordinal", "followUpBlend": true,
                "compositeWeights": {"weightedDim": 80, "maturity": 10, "breadth": 10}}"#,
        )
        .unwrap();
        let res = validate_rules(&rules).unwrap();
        assert_eq!(res.status_credit, StatusCredit::Ordinal);
        assert_eq!(res.follow_up_blend, Some(BlendWeights::DEFAULT));
        assert!(!res.geo_adjustment);
        assert_eq!(res.composite.weighted_dim, 80);

        assert_eq!(
            validate_rules(&WwciRules::default()).unwrap(),
            ScoringRules::DEFAULT_RULES
        );
    }

    #[test]
    fn reject_bad_rules() {
        let rules = WwciRules {
            status_credit: Some("generous".to_string()),
            ..Default::default()
        };
        assert!(validate_rules(&rules).is_err());
        let rules = WwciRules {
            composite_weights: Some(CompositeWeightsJs {
                weighted_dim: 90,
                maturity: 10,
                breadth: 10,
            }),
            ..Default::default()
        };
        assert!(matches!(
            validate_rules(&rules),
            Err(WwciError::InvalidRules { .. })
        ));
        // Wraps around to 100 in 32 bits.
        let rules = WwciRules {
            composite_weights: Some(CompositeWeightsJs {
                weighted_dim: 4294967295,
                maturity: 1,
                breadth: 100,
            }),
            ..Default::default()
        };
        assert!(matches!(
            validate_rules(&rules),
            Err(WwciError::InvalidRules { .. })
        ));
    }
}
