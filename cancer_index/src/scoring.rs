use log::{debug, info};

use crate::answers::{AnswerRecord, DimensionAnswers, Section};
use crate::catalog::{Catalog, Dimension, GeographicReach};
use crate::config::*;

/// Scores a respondent.
///
/// Dimensions without usable grid answers have no score and are left out of
/// the weighted score. When no dimension has a score, the weighted and
/// composite scores are None as well.
pub fn score_assessment(
    record: &AnswerRecord,
    catalog: &Catalog,
    rules: &ScoringRules,
) -> Result<ScoreResult, AssessmentErrors> {
    rules.validate()?;
    let dimensions: Vec<DimensionScore> = catalog
        .dimensions()
        .iter()
        .map(|dim| score_dimension(dim, record.dimension(dim.number), rules))
        .collect();

    let weighted_dim_score = weighted_score(&dimensions);
    let maturity_score = maturity_score(record);
    let breadth_score = breadth_score(record);
    let composite_score = weighted_dim_score.map(|wd| {
        let c = &rules.composite;
        let sum = c.weighted_dim as u64 * wd as u64
            + c.maturity as u64 * maturity_score as u64
            + c.breadth as u64 * breadth_score as u64;
        div_round(sum, 100) as u32
    });
    let insufficient = dimensions.iter().filter(|ds| ds.insufficient_data).count();
    let completed_dimensions = dimensions.iter().filter(|ds| ds.score.is_some()).count();

    let res = ScoreResult {
        weighted_dim_score,
        composite_score,
        tier: composite_score.map(Tier::from_score),
        maturity_score,
        breadth_score,
        completed_dimensions,
        is_provisional: insufficient >= rules.provisional_dimension_count,
        dimensions,
    };
    info!(
        "score_assessment: {}: composite {:?} ({} dimensions scored, provisional: {})",
        record.survey_id, res.composite_score, res.completed_dimensions, res.is_provisional
    );
    Ok(res)
}

pub fn score_dimension(
    dim: &Dimension,
    answers: Option<&DimensionAnswers>,
    rules: &ScoringRules,
) -> DimensionScore {
    // Report-only elements do not count in any of the statistics.
    let scored: Vec<(usize, Status)> = answers
        .and_then(|a| a.grid.as_ref())
        .map(|g| {
            g.iter()
                .filter(|(idx, _)| !dim.elements[*idx].excluded_from_scoring)
                .collect()
        })
        .unwrap_or_default();
    let answered = scored.len();
    let offering = scored.iter().filter(|(_, s)| *s == Status::Offering).count();
    let unsure = scored.iter().filter(|(_, s)| *s == Status::Unsure).count();
    let follow_up_score = answers.and_then(|a| follow_up_score(dim.number, a));

    let grid_score = if scored.is_empty() {
        None
    } else {
        let total = dim.total_element_weight();
        let earned: f64 = scored
            .iter()
            .map(|(idx, s)| rules.status_credit.credit(*s) * dim.elements[*idx].empirical_weight)
            .sum();
        Some(if total > 0.0 {
            round_percent(100.0 * earned / total)
        } else {
            0
        })
    };

    let score = grid_score.map(|gs| {
        let mut s = gs;
        if rules.geo_adjustment {
            let multiplier = match answers.and_then(|a| a.geography(dim)) {
                Some(GeographicReach::Select) => 75,
                Some(GeographicReach::Vary) => 90,
                _ => 100,
            };
            s = div_round((s * multiplier) as u64, 100) as u32;
        }
        if let (Some(bw), Some(fu)) = (rules.follow_up_blend, follow_up_score) {
            s = div_round(bw.grid as u64 * s as u64 + bw.follow_up as u64 * fu as u64, 100) as u32;
        }
        s
    });

    let insufficient_data =
        answered > 0 && unsure * 100 >= rules.insufficient_unsure_percent as usize * answered;
    debug!(
        "score_dimension: {}: grid {:?} follow-up {:?} final {:?} ({} answered)",
        dim.number, grid_score, follow_up_score, score, answered
    );
    DimensionScore {
        dimension: dim.number,
        weight: dim.weight,
        score,
        grid_score,
        follow_up_score,
        answered,
        offering,
        unsure,
        insufficient_data,
    }
}

/// The weighted average of the dimensions that have a score.
pub fn weighted_score(dimensions: &[DimensionScore]) -> Option<u32> {
    let (num, den) = dimensions
        .iter()
        .filter_map(|ds| ds.score.map(|s| (s as u64 * ds.weight as u64, ds.weight as u64)))
        .fold((0u64, 0u64), |(n, d), (sn, sd)| (n + sn, d + sd));
    if den == 0 {
        None
    } else {
        Some(div_round(num, den) as u32)
    }
}

// ******** Follow-up questions ********

type KeywordTable = &'static [(&'static [&'static str], u32)];

fn keyword_score(value: &str, table: KeywordTable) -> u32 {
    let v = value.to_lowercase();
    table
        .iter()
        .find(|(keys, _)| keys.iter().any(|k| v.contains(k)))
        .map_or(0, |(_, score)| *score)
}

const PAID_LEAVE: KeywordTable = &[
    (&["13 or more", "13+ weeks", "13 weeks or more"], 100),
    (&["9 to", "9-12"], 80),
    (&["5 to", "5-8"], 60),
    (&["3 to", "3-4"], 40),
    (&["1 to", "1-2"], 20),
];

const PART_TIME: KeywordTable = &[
    (&["as long as", "medically necessary", "healthcare provider"], 100),
    (&["26 weeks", "26+", "6 months"], 80),
    (&["13 to", "12 to", "13-25", "12-25"], 60),
    (&["5 to", "5-12"], 40),
    (&["up to 4", "1-4"], 20),
    (&["case-by-case"], 50),
];

const MANAGER_TRAINING: KeywordTable = &[
    (&["mandatory for all"], 100),
    (&["mandatory for new"], 60),
    (&["voluntary"], 30),
    (&["varies"], 40),
];

const CASE_REVIEW: KeywordTable = &[
    (&["systematic"], 100),
    (&["ad hoc"], 50),
    (&["aggregate"], 20),
];

const POLICY_CHANGES: KeywordTable = &[
    (&["significant", "major"], 100),
    (&["some", "minor", "adjustments"], 60),
    (&["no change", "not yet", "none"], 20),
];

const COMMUNICATION: KeywordTable = &[
    (&["monthly"], 100),
    (&["quarterly"], 70),
    (&["twice"], 40),
    (&["annually", "world cancer day"], 20),
];

fn average(scores: &[u32]) -> Option<u32> {
    if scores.is_empty() {
        None
    } else {
        let sum: u64 = scores.iter().map(|s| *s as u64).sum();
        Some(div_round(sum, scores.len() as u64) as u32)
    }
}

/// Score of the follow-up questions of dimensions 1, 3, 12 and 13.
///
/// None for the other dimensions, or when no follow-up was answered.
pub fn follow_up_score(dimension: u32, answers: &DimensionAnswers) -> Option<u32> {
    let scored = |key: &str, table: KeywordTable| answers.text(key).map(|v| keyword_score(v, table));
    match dimension {
        1 => {
            let scores: Vec<u32> = [
                scored("d1_1_usa", PAID_LEAVE),
                scored("d1_1_non_usa", PAID_LEAVE),
                scored("d1_4b", PART_TIME),
            ]
            .into_iter()
            .flatten()
            .collect();
            average(&scores)
        }
        3 => scored("d3_1", MANAGER_TRAINING),
        12 => {
            let scores: Vec<u32> = [
                scored("d12_1", CASE_REVIEW),
                scored("d12_2", POLICY_CHANGES),
            ]
            .into_iter()
            .flatten()
            .collect();
            average(&scores)
        }
        13 => scored("d13_1", COMMUNICATION),
        _ => None,
    }
}

// ******** Maturity and breadth ********

const MATURITY: KeywordTable = &[
    (&["leading-edge", "leading edge", "comprehensive"], 100),
    (&["enhanced", "strong"], 80),
    (&["moderate"], 50),
    (&["basic", "developing"], 20),
];

/// Maturity of the support approach (`or1`), from 0 to 100.
pub fn maturity_score(record: &AnswerRecord) -> u32 {
    match record.current_support.text("or1").map(str::trim) {
        None => 0,
        Some("6") => 100,
        Some("5") => 80,
        Some("4") => 50,
        Some("3") => 20,
        Some("2") | Some("1") => 0,
        Some(v) => keyword_score(v, MATURITY),
    }
}

fn support_text<'a>(primary: &'a Section, fallback: &'a Section, key: &str) -> Option<&'a str> {
    primary.text(key).or_else(|| fallback.text(key))
}

fn support_list<'a>(primary: &'a Section, fallback: &'a Section, key: &str) -> Option<&'a [String]> {
    primary.list(key).or_else(|| fallback.list(key))
}

/// Breadth of the support beyond legal requirements (`cb3a`, `cb3b`,
/// `cb3c`), from 0 to 100.
pub fn breadth_score(record: &AnswerRecord) -> u32 {
    let (cs, gb) = (&record.current_support, &record.general_benefits);
    let beyond_legal = match support_text(cs, gb, "cb3a").map(str::trim) {
        Some("3") => 100,
        Some("2") => 50,
        Some(v) => {
            let v = v.to_lowercase();
            if v.contains("yes") && v.contains("additional support") {
                100
            } else if v.contains("developing") {
                50
            } else {
                0
            }
        }
        None => 0,
    };
    let share = |key: &str, total: u64| {
        support_list(cs, gb, key).map_or(0, |l| div_round(l.len() as u64 * 100, total).min(100))
    };
    let programs = share("cb3b", 6);
    let resources = share("cb3c", 13);
    div_round(beyond_legal + programs + resources, 3) as u32
}

// ******** Rounding ********

/// Integer division, rounding half up.
fn div_round(num: u64, den: u64) -> u64 {
    (2 * num + den) / (2 * den)
}

// Ratios of sums of element weights are not exact in floating point.
const ROUNDING_TOLERANCE: f64 = 1e-9;

fn round_percent(x: f64) -> u32 {
    (x + 0.5 + ROUNDING_TOLERANCE).floor().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::GridValue;
    use crate::builder::{Builder, SectionKey};

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn label(s: &str) -> GridValue {
        GridValue::Label(s.to_string())
    }

    fn d4_half(builder: &mut Builder) {
        let d4 = Catalog::builtin().get_dimension(4).unwrap();
        let entries: Vec<(&str, GridValue)> = d4
            .elements
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let s = if i < 5 {
                    "Currently offer"
                } else {
                    "Not able to offer in foreseeable future"
                };
                (e.name.as_str(), label(s))
            })
            .collect();
        builder.add_status_grid(4, &entries).unwrap();
    }

    fn score(record: &AnswerRecord) -> ScoreResult {
        score_assessment(record, Catalog::builtin(), &ScoringRules::DEFAULT_RULES).unwrap()
    }

    #[test]
    fn half_offered_dimension() {
        init();
        let mut b = Builder::new(Catalog::builtin(), "s1");
        d4_half(&mut b);
        let res = score(&b.build());
        assert_eq!(res.dimension_score(4), Some(50));
        assert_eq!(res.dimensions[3].offering, 5);
        assert_eq!(res.dimensions[3].answered, 10);
    }

    #[test]
    fn single_dimension_composite() {
        init();
        let mut b = Builder::new(Catalog::builtin(), "s2");
        d4_half(&mut b);
        let res = score(&b.build());
        assert_eq!(res.weighted_dim_score, Some(50));
        assert_eq!(res.completed_dimensions, 1);
        assert_eq!(res.composite_score, Some(45));
        assert_eq!(res.tier, Some(Tier::Emerging));
        for n in (1..=13).filter(|n| *n != 4) {
            assert_eq!(res.dimension_score(n), None);
        }
    }

    #[test]
    fn unknown_element_is_not_counted() {
        init();
        let mut b = Builder::new(Catalog::builtin(), "s3");
        b.add_status_grid(
            4,
            &[
                ("Nutrition coaching", label("Currently offer")),
                ("Free lunch", label("Currently offer")),
            ],
        )
        .unwrap();
        let r = b.build();
        assert_eq!(r.issues.len(), 1);
        // 1 element out of 10.
        assert_eq!(score(&r).dimension_score(4), Some(10));
    }

    #[test]
    fn no_data_versus_zero() {
        init();
        let mut b = Builder::new(Catalog::builtin(), "nd");
        b.add_status_grid(
            12,
            &[("External benchmarking", label("Not able to measure / track in foreseeable future"))],
        )
        .unwrap();
        b.add_status_grid(5, &[("Free lunch", label("Currently offer"))])
            .unwrap();
        let res = score(&b.build());
        assert_eq!(res.dimension_score(12), Some(0));
        // Present but empty after validation.
        assert_eq!(res.dimension_score(5), None);
        assert_eq!(res.weighted_dim_score, Some(0));
        assert_eq!(res.completed_dimensions, 1);
    }

    #[test]
    fn empty_record() {
        init();
        let res = score(&Builder::new(Catalog::builtin(), "empty").build());
        assert_eq!(res.weighted_dim_score, None);
        assert_eq!(res.composite_score, None);
        assert_eq!(res.tier, None);
        assert!(res.dimension_scores().values().all(|s| s.is_none()));
        assert!(!res.is_provisional);
    }

    #[test]
    fn weighted_average() {
        let ds = |dimension: u32, weight: u32, score: Option<u32>| DimensionScore {
            dimension,
            weight,
            score,
            grid_score: score,
            follow_up_score: None,
            answered: 1,
            offering: 0,
            unsure: 0,
            insufficient_data: false,
        };
        // (100 * 14 + 0 * 13 + 55 * 3) / 30 = 52.17
        assert_eq!(
            weighted_score(&[ds(4, 14, Some(100)), ds(8, 13, Some(0)), ds(12, 3, Some(55)), ds(1, 7, None)]),
            Some(52)
        );
        // 50 * 7 + 51 * 7 = 707 / 14 = 50.5
        assert_eq!(weighted_score(&[ds(1, 7, Some(50)), ds(5, 7, Some(51))]), Some(51));
        assert_eq!(weighted_score(&[ds(1, 7, None)]), None);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(Tier::from_score(100), Tier::Exemplary);
        assert_eq!(Tier::from_score(90), Tier::Exemplary);
        assert_eq!(Tier::from_score(89), Tier::Leading);
        assert_eq!(Tier::from_score(75), Tier::Leading);
        assert_eq!(Tier::from_score(74), Tier::Progressing);
        assert_eq!(Tier::from_score(60), Tier::Progressing);
        assert_eq!(Tier::from_score(59), Tier::Emerging);
        assert_eq!(Tier::from_score(40), Tier::Emerging);
        assert_eq!(Tier::from_score(39), Tier::Developing);
        assert_eq!(Tier::from_score(0), Tier::Developing);
    }

    #[test]
    fn partial_credit_and_geography() {
        init();
        let mut b = Builder::new(Catalog::builtin(), "pc");
        b.add_status_grid(
            8,
            &[
                ("Phased return-to-work plans", label("Currently offer")),
                ("Flexibility for medical setbacks", label("In active planning / development")),
                ("Long-term success tracking", label("Assessing feasibility")),
            ],
        )
        .unwrap();
        b.add_dimension_field(8, "d8aa", Answer::SingleSelect("Only available in select locations".to_string()))
            .unwrap();
        let r = b.build();
        // 1 / 12 elements.
        assert_eq!(score(&r).dimension_score(8), Some(8));

        let ordinal = ScoringRules {
            status_credit: StatusCredit::Ordinal,
            ..ScoringRules::DEFAULT_RULES
        };
        // (1 + 0.6 + 0.4) / 12 = 16.67, not (5 + 3 + 2) / 15 over the answered ones
        let res = score_assessment(&r, Catalog::builtin(), &ordinal).unwrap();
        assert_eq!(res.dimension_score(8), Some(17));

        let flat = ScoringRules {
            status_credit: StatusCredit::LegacyFlat,
            geo_adjustment: true,
            ..ScoringRules::DEFAULT_RULES
        };
        // (1 + 0.5 + 0.25) / 12 = 14.58 -> 15, then 15 * 0.75 = 11.25
        let res = score_assessment(&r, Catalog::builtin(), &flat).unwrap();
        assert_eq!(res.dimensions[7].grid_score, Some(15));
        assert_eq!(res.dimension_score(8), Some(11));
    }

    #[test]
    fn follow_up_blend() {
        init();
        let mut b = Builder::new(Catalog::builtin(), "fu");
        b.add_status_grid(13, &[("New hire orientation coverage", label("Currently use"))])
            .unwrap();
        b.add_dimension_field(13, "d13_1", Answer::SingleSelect("Monthly".to_string()))
            .unwrap();
        b.add_dimension_field(1, "d1_1_usa", Answer::SingleSelect("13 or more weeks".to_string()))
            .unwrap();
        b.add_dimension_field(1, "d1_4b", Answer::SingleSelect("Case-by-case basis".to_string()))
            .unwrap();
        let r = b.build();

        let res = score(&r);
        assert_eq!(res.dimension_score(13), Some(10));
        assert_eq!(res.dimensions[12].follow_up_score, Some(100));
        // Dimension 1 has follow-ups but no grid.
        assert_eq!(res.dimensions[0].follow_up_score, Some(75));
        assert_eq!(res.dimension_score(1), None);

        let blended = ScoringRules {
            follow_up_blend: Some(BlendWeights::DEFAULT),
            ..ScoringRules::DEFAULT_RULES
        };
        let res = score_assessment(&r, Catalog::builtin(), &blended).unwrap();
        // 0.85 * 10 + 0.15 * 100 = 23.5
        assert_eq!(res.dimension_score(13), Some(24));
        assert_eq!(res.dimension_score(1), None);
    }

    #[test]
    fn follow_up_keywords() {
        let mut a = DimensionAnswers::default();
        a.fields.fields.insert(
            "d12_1".to_string(),
            Answer::SingleSelect("Ad hoc reviews as needed".to_string()),
        );
        a.fields.fields.insert(
            "d12_2".to_string(),
            Answer::FreeText("Some adjustments to leave policy".to_string()),
        );
        assert_eq!(follow_up_score(12, &a), Some(55));
        assert_eq!(follow_up_score(5, &a), None);

        let mut a = DimensionAnswers::default();
        a.fields.fields.insert(
            "d13_1".to_string(),
            Answer::SingleSelect("Semi-annually".to_string()),
        );
        assert_eq!(follow_up_score(13, &a), Some(20));
        a.fields.fields.insert(
            "d13_1".to_string(),
            Answer::SingleSelect("Only when asked".to_string()),
        );
        assert_eq!(follow_up_score(13, &a), Some(0));
    }

    #[test]
    fn maturity_and_breadth() {
        init();
        let mut b = Builder::new(Catalog::builtin(), "mb");
        d4_half(&mut b);
        b.add_field(SectionKey::CurrentSupport, "or1", Answer::SingleSelect("5".to_string()));
        b.add_field(
            SectionKey::GeneralBenefits,
            "cb3a",
            Answer::SingleSelect("Yes, we offer additional support beyond legal requirements".to_string()),
        );
        b.add_field(
            SectionKey::CurrentSupport,
            "cb3b",
            Answer::MultiSelect(vec!["a".to_string(), "b".to_string(), "c".to_string()]),
        );
        b.add_field(
            SectionKey::GeneralBenefits,
            "cb3c",
            Answer::MultiSelect((0..20).map(|i| i.to_string()).collect()),
        );
        let res = score(&b.build());
        assert_eq!(res.maturity_score, 80);
        // (100 + 50 + 100) / 3 = 83.33
        assert_eq!(res.breadth_score, 83);
        // 0.9 * 50 + 0.05 * 80 + 0.05 * 83 = 53.15
        assert_eq!(res.composite_score, Some(53));
        assert_eq!(res.tier, Some(Tier::Emerging));

        let mut b = Builder::new(Catalog::builtin(), "mb2");
        b.add_field(
            SectionKey::CurrentSupport,
            "or1",
            Answer::SingleSelect("Moderate support beyond legal requirements".to_string()),
        );
        assert_eq!(maturity_score(&b.build()), 50);
    }

    #[test]
    fn provisional_results() {
        init();
        let mut b = Builder::new(Catalog::builtin(), "prov");
        for dim in [1, 2, 9, 10] {
            let d = Catalog::builtin().get_dimension(dim).unwrap();
            let entries: Vec<(&str, GridValue)> = d
                .elements
                .iter()
                .take(5)
                .enumerate()
                .map(|(i, e)| {
                    let s = if i < 2 { "Unsure" } else { "Currently offer" };
                    (e.name.as_str(), label(s))
                })
                .collect();
            b.add_status_grid(dim, &entries).unwrap();
        }
        let res = score(&b.build());
        // 2 unsure out of 5 answered is 40%.
        assert!(res.dimensions[0].insufficient_data);
        assert_eq!(res.dimensions[0].unsure, 2);
        assert!(res.is_provisional);
        assert_eq!(res.completed_dimensions, 4);
    }

    #[test]
    fn invalid_rules() {
        let rules = ScoringRules {
            composite: CompositeWeights {
                weighted_dim: 90,
                maturity: 5,
                breadth: 10,
            },
            ..ScoringRules::DEFAULT_RULES
        };
        let r = Builder::new(Catalog::builtin(), "x").build();
        assert!(matches!(
            score_assessment(&r, Catalog::builtin(), &rules),
            Err(AssessmentErrors::InvalidRules(_))
        ));
    }

    #[test]
    fn oversized_composite_weight() {
        let rules = ScoringRules {
            composite: CompositeWeights {
                weighted_dim: u32::MAX,
                maturity: 1,
                breadth: 100,
            },
            ..ScoringRules::DEFAULT_RULES
        };
        let r = Builder::new(Catalog::builtin(), "x").build();
        assert!(matches!(
            score_assessment(&r, Catalog::builtin(), &rules),
            Err(AssessmentErrors::InvalidRules(_))
        ));
    }

    #[test]
    fn report_only_elements_are_not_scored() {
        init();
        let d10 = Catalog::builtin().get_dimension(10).unwrap();
        let entries: Vec<(&str, GridValue)> = d10
            .elements
            .iter()
            .map(|e| {
                let code = if e.excluded_from_scoring { 1 } else { 4 };
                (e.name.as_str(), GridValue::Code(code))
            })
            .collect();
        let mut b = Builder::new(Catalog::builtin(), "d10");
        b.add_status_grid(10, &entries).unwrap();
        let res = score(&b.build());
        let ds = &res.dimensions[9];
        assert_eq!(ds.score, Some(100));
        assert_eq!(ds.answered, 19);
        assert_eq!(ds.offering, 19);

        let concierge: Vec<(&str, GridValue)> = d10
            .elements
            .iter()
            .filter(|e| e.excluded_from_scoring)
            .map(|e| (e.name.as_str(), GridValue::Code(4)))
            .collect();
        let mut b = Builder::new(Catalog::builtin(), "concierge");
        b.add_status_grid(10, &concierge).unwrap();
        let res = score(&b.build());
        assert_eq!(res.dimensions[9].score, None);
        assert_eq!(res.dimensions[9].answered, 0);
    }

    #[test]
    fn scores_are_bounded_and_deterministic() {
        init();
        let mut b = Builder::new(Catalog::builtin(), "all");
        for d in Catalog::builtin().dimensions() {
            let entries: Vec<(&str, GridValue)> = d
                .elements
                .iter()
                .map(|e| (e.name.as_str(), GridValue::Code(4)))
                .collect();
            b.add_status_grid(d.number, &entries).unwrap();
        }
        b.add_field(SectionKey::CurrentSupport, "or1", Answer::SingleSelect("6".to_string()));
        let r = b.build();
        let res = score(&r);
        assert!(res.dimensions.iter().all(|ds| ds.score == Some(100)));
        assert_eq!(res.composite_score, Some(95));
        assert_eq!(res.tier, Some(Tier::Exemplary));
        assert_eq!(res, score(&r));
    }
}
