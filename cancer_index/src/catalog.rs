/*!
The dimension catalog: the static description of the 13 dimensions of the survey.

Each dimension has a weight in the composite score, an ordered list of
elements and the status vocabulary used by its grid. The element order is
the order used everywhere in reports.

```
use cancer_index::catalog::Catalog;
use cancer_index::Status;

let catalog = Catalog::builtin();
let d12 = catalog.get_dimension(12)?;
assert_eq!(d12.weight, 3);
assert_eq!(d12.offer_status(), "Currently measure / track");
assert_eq!(d12.parse_status("Currently measure/track"), Some(Status::Offering));
# Ok::<(), cancer_index::AssessmentErrors>(())
```
*/

use std::sync::OnceLock;

use log::debug;

use crate::config::*;

pub const NUM_DIMENSIONS: u32 = 13;

#[derive(PartialEq, Debug, Clone)]
pub struct Element {
    pub name: String,
    /// Relative importance of this element within its dimension.
    pub empirical_weight: f64,
    /// Share of the benchmark organizations that offer this element.
    pub standard_setter_score: f64,
    /// Shown in the report but left out of the dimension score, in both the
    /// earned and the total weight.
    pub excluded_from_scoring: bool,
}

/// The status labels of a dimension, in priority order.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Vocabulary {
    labels: Vec<(Status, &'static str)>,
}

impl Vocabulary {
    fn offer(with_unsure: bool) -> Vocabulary {
        Vocabulary::build(
            "Currently offer",
            "Not able to offer in foreseeable future",
            with_unsure,
        )
    }

    fn build(offering: &'static str, not_able: &'static str, with_unsure: bool) -> Vocabulary {
        let mut labels = vec![
            (Status::Offering, offering),
            (Status::Planning, "In active planning / development"),
            (Status::Assessing, "Assessing feasibility"),
            (Status::NotAble, not_able),
        ];
        if with_unsure {
            labels.push((Status::Unsure, "Unsure"));
        }
        Vocabulary { labels }
    }

    pub fn label(&self, status: Status) -> Option<&'static str> {
        self.labels
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, l)| *l)
    }

    pub fn statuses(&self) -> impl Iterator<Item = Status> + '_ {
        self.labels.iter().map(|(s, _)| *s)
    }
}

/// How widely a dimension's programs are deployed, as answered in `d{n}aa`.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum GeographicReach {
    Consistent,
    Select,
    Vary,
}

impl GeographicReach {
    /// Recognizes all the wordings used across dimensions, including
    /// "Only measured/tracked in select locations", and the numeric codes of
    /// imported data.
    pub fn classify(answer: &str) -> Option<GeographicReach> {
        let a = answer.trim().to_lowercase();
        if a == "1" || a.contains("select location") {
            Some(GeographicReach::Select)
        } else if a == "2" || a.contains("vary") || a.contains("varies") {
            Some(GeographicReach::Vary)
        } else if a == "3" || a.contains("consistent") {
            Some(GeographicReach::Consistent)
        } else {
            None
        }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct Dimension {
    pub number: u32,
    pub name: &'static str,
    pub prompt: &'static str,
    pub weight: u32,
    pub elements: Vec<Element>,
    pub vocabulary: Vocabulary,
}

impl Dimension {
    /// The key of the status grid in the answer map, e.g. `d4a`.
    pub fn grid_key(&self) -> String {
        format!("d{}a", self.number)
    }

    pub fn geography_key(&self) -> String {
        format!("d{}aa", self.number)
    }

    pub fn additional_key(&self) -> String {
        format!("d{}b", self.number)
    }

    pub fn section_key(&self) -> String {
        format!("dimension{}_data", self.number)
    }

    pub fn element_index(&self, name: &str) -> Option<usize> {
        let target = normalize_element_text(name);
        self.elements
            .iter()
            .position(|e| normalize_element_text(&e.name) == target)
    }

    /// Resolves a status string against the vocabulary of this dimension.
    ///
    /// Spacing around slashes and case are ignored. Numeric codes from
    /// imported data are accepted too.
    pub fn parse_status(&self, value: &str) -> Option<Status> {
        if let Ok(code) = value.trim().parse::<i64>() {
            return self.accept_code(code);
        }
        let target = compact_label(value);
        self.vocabulary
            .labels
            .iter()
            .find(|(_, l)| compact_label(l) == target)
            .map(|(s, _)| *s)
    }

    pub fn accept_code(&self, code: i64) -> Option<Status> {
        Status::from_code(code).filter(|s| self.vocabulary.label(*s).is_some())
    }

    pub fn status_label(&self, status: Status) -> Option<&'static str> {
        self.vocabulary.label(status)
    }

    /// The vocabulary, in priority order.
    pub fn status_options(&self) -> Vec<&'static str> {
        self.vocabulary.labels.iter().map(|(_, l)| *l).collect()
    }

    pub fn offer_status(&self) -> &'static str {
        // Every vocabulary is built with an offering label.
        self.vocabulary.labels[0].1
    }

    /// The weight of the scored elements.
    pub fn total_element_weight(&self) -> f64 {
        self.elements
            .iter()
            .filter(|e| !e.excluded_from_scoring)
            .map(|e| e.empirical_weight)
            .sum()
    }
}

/// One override for the weight of an element.
#[derive(PartialEq, Debug, Clone)]
pub struct ElementWeight {
    pub dimension: u32,
    pub element: String,
    pub weight: f64,
    pub standard_setter: Option<f64>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct Catalog {
    dimensions: Vec<Dimension>,
}

static BUILTIN: OnceLock<Catalog> = OnceLock::new();

impl Catalog {
    /// The catalog of the current survey wave, with equal element weights.
    pub fn builtin() -> &'static Catalog {
        BUILTIN.get_or_init(build_builtin)
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn get_dimension(&self, number: u32) -> Result<&Dimension, AssessmentErrors> {
        if number == 0 || number > NUM_DIMENSIONS {
            return Err(AssessmentErrors::InvalidDimension(number));
        }
        self.dimensions
            .get((number - 1) as usize)
            .ok_or(AssessmentErrors::InvalidDimension(number))
    }

    /// Returns a copy of this catalog with the given element weights.
    ///
    /// Elements not mentioned keep their current weight.
    pub fn with_element_weights(
        &self,
        overrides: &[ElementWeight],
    ) -> Result<Catalog, AssessmentErrors> {
        let mut res = self.clone();
        for ew in overrides {
            let dim_idx = self.get_dimension(ew.dimension)?.number - 1;
            let dim = &mut res.dimensions[dim_idx as usize];
            let idx = dim
                .element_index(&ew.element)
                .ok_or_else(|| AssessmentErrors::UnknownElement {
                    dimension: ew.dimension,
                    element: ew.element.clone(),
                })?;
            let invalid_ss = ew.standard_setter.map_or(false, |s| !s.is_finite());
            if !ew.weight.is_finite() || ew.weight <= 0.0 || invalid_ss {
                return Err(AssessmentErrors::InvalidWeight {
                    dimension: ew.dimension,
                    element: ew.element.clone(),
                });
            }
            let elem = &mut dim.elements[idx];
            elem.empirical_weight = ew.weight;
            if let Some(s) = ew.standard_setter {
                elem.standard_setter_score = s;
            }
        }
        debug!(
            "with_element_weights: applied {} element weight overrides",
            overrides.len()
        );
        Ok(res)
    }
}

/// Canonical form of an element name, used for matching names coming from
/// different exports.
pub fn normalize_element_text(s: &str) -> String {
    let replaced: String = s
        .chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            c => c,
        })
        .collect();
    replaced
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
        .to_lowercase()
}

fn compact_label(s: &str) -> String {
    normalize_element_text(s).replace(' ', "")
}

// ******** Builtin data **********

struct DimensionSpec {
    name: &'static str,
    prompt: &'static str,
    weight: u32,
    vocabulary: fn() -> Vocabulary,
    elements: &'static [&'static str],
    /// Elements asked in the survey but not scored.
    report_only: &'static [&'static str],
}

fn build_builtin() -> Catalog {
    let dimensions = DIMENSIONS
        .iter()
        .enumerate()
        .map(|(idx, spec)| {
            let n = (spec.elements.len() - spec.report_only.len()) as f64;
            Dimension {
                number: idx as u32 + 1,
                name: spec.name,
                prompt: spec.prompt,
                weight: spec.weight,
                elements: spec
                    .elements
                    .iter()
                    .map(|name| {
                        let excluded = spec.report_only.contains(name);
                        Element {
                            name: name.to_string(),
                            empirical_weight: if excluded { 0.0 } else { 1.0 / n },
                            standard_setter_score: 0.0,
                            excluded_from_scoring: excluded,
                        }
                    })
                    .collect(),
                vocabulary: (spec.vocabulary)(),
            }
        })
        .collect();
    Catalog { dimensions }
}

fn offer_vocabulary() -> Vocabulary {
    Vocabulary::offer(false)
}

fn offer_unsure_vocabulary() -> Vocabulary {
    Vocabulary::offer(true)
}

fn manager_vocabulary() -> Vocabulary {
    Vocabulary::build(
        "Currently provide to managers",
        "Not able to provide in foreseeable future",
        false,
    )
}

fn measure_vocabulary() -> Vocabulary {
    Vocabulary::build(
        "Currently measure / track",
        "Not able to measure / track in foreseeable future",
        false,
    )
}

fn communication_vocabulary() -> Vocabulary {
    Vocabulary::build(
        "Currently use",
        "Not able to utilize in foreseeable future",
        true,
    )
}

const D10_CONCIERGE: &str =
    "Concierge services to coordinate caregiving logistics (e.g., scheduling, transportation, home care)";

const DIMENSIONS: [DimensionSpec; NUM_DIMENSIONS as usize] = [
    DimensionSpec {
        name: "Medical Leave & Flexibility",
        prompt: "Time off policies and schedule adaptations that enable employees to receive treatment without sacrificing job security or income.",
        weight: 7,
        vocabulary: offer_unsure_vocabulary,
        elements: &[
            "Paid medical leave beyond local / legal requirements",
            "Intermittent leave beyond local / legal requirements",
            "Flexible work hours during treatment (e.g., varying start/end times, compressed schedules)",
            "Remote work options for on-site employees",
            "Reduced schedule/part-time with full benefits",
            "Job protection beyond local / legal requirements",
            "Emergency leave within 24 hours",
            "Leave donation bank (employees can donate PTO to colleagues)",
            "Disability pay top-up (employer adds to disability insurance)",
            "PTO accrual during leave",
            "Paid micro-breaks for medical-related side effects",
            "Full salary (100%) continuation during cancer-related short-term disability leave",
        ],
        report_only: &[],
    },
    DimensionSpec {
        name: "Insurance & Financial Protection",
        prompt: "Financial protections that prevent economic hardship during treatment, including comprehensive coverage and expense assistance.",
        weight: 11,
        vocabulary: offer_unsure_vocabulary,
        elements: &[
            "Coverage for clinical trials and experimental treatments not covered by standard health insurance",
            "Coverage for advanced therapies (CAR-T, proton therapy, immunotherapy) not covered by standard health insurance",
            "Paid time off for clinical trial participation",
            "Set out-of-pocket maximums (for in-network single coverage)",
            "Travel/lodging reimbursement for specialized care beyond insurance coverage",
            "Financial counseling services",
            "Voluntary supplemental illness insurance (with employer contribution)",
            "Real-time cost estimator tools",
            "Insurance advocacy/pre-authorization support",
            "$0 copay for specialty drugs",
            "Hardship grants program funded by employer",
            "Tax/estate planning assistance",
            "Short-term disability covering 60%+ of salary",
            "Long-term disability covering 60%+ of salary",
            "Employer-paid disability insurance supplements",
            "Guaranteed job protection",
            "Accelerated life insurance benefits (partial payout for terminal / critical illness)",
        ],
        report_only: &[],
    },
    DimensionSpec {
        name: "Manager Preparedness & Capability",
        prompt: "Training and resources that equip managers to support employees managing cancer or other serious health conditions.",
        weight: 12,
        vocabulary: manager_vocabulary,
        elements: &[
            "Manager training on supporting employees managing cancer or other serious health conditions/illnesses and their teams",
            "Clear escalation protocol for manager response",
            "Dedicated manager resource hub",
            "Empathy/communication skills training",
            "Legal compliance training",
            "Senior leader coaching on supporting impacted employees",
            "Manager evaluations include how well they support impacted employees",
            "Manager peer support / community building",
            "AI-powered guidance tools",
            "Privacy protection and confidentiality management",
        ],
        report_only: &[],
    },
    DimensionSpec {
        name: "Navigation & Expert Resources",
        prompt: "Resources that help employees understand benefits, access treatment, and receive expert support.",
        weight: 14,
        vocabulary: offer_vocabulary,
        elements: &[
            "Dedicated navigation support to help employees understand benefits and access medical care",
            "Benefits optimization assistance (maximizing coverage, minimizing costs)",
            "Insurance advocacy/appeals support",
            "Clinical trial matching service",
            "Care coordination concierge",
            "Online tools, apps, or portals for health/benefits support",
            "Survivorship planning assistance",
            "Nutrition coaching",
            "Physical rehabilitation support",
            "Occupational therapy/vocational rehabilitation",
        ],
        report_only: &[],
    },
    DimensionSpec {
        name: "Workplace Accommodations & Modifications",
        prompt: "Workplace changes that enable continued productivity during and after treatment.",
        weight: 7,
        vocabulary: offer_vocabulary,
        elements: &[
            "Physical workspace modifications",
            "Cognitive/fatigue support tools",
            "Ergonomic equipment funding",
            "Flexible scheduling options",
            "Remote work capability",
            "Rest areas/quiet spaces",
            "Priority parking",
            "Temporary role redesigns",
            "Assistive technology catalog",
            "Transportation reimbursement",
            "Policy accommodations (e.g., dress code flexibility, headphone use)",
        ],
        report_only: &[],
    },
    DimensionSpec {
        name: "Culture & Psychological Safety",
        prompt: "The environment for employees to feel safe discussing medical conditions, protected from discrimination, and supported without judgment.",
        weight: 8,
        vocabulary: offer_vocabulary,
        elements: &[
            "Strong anti-discrimination policies specific to health conditions",
            "Clear process for confidential health disclosures",
            "Manager training on handling sensitive health information",
            "Written anti-retaliation policies for health disclosures",
            "Employee peer support groups (internal employees with shared experience)",
            "Professional-led support groups (external facilitator / counselor)",
            "Stigma-reduction initiatives",
            "Specialized emotional counseling",
            "Optional open health dialogue forums",
            "Inclusive communication guidelines",
            "Confidential HR channel for health benefits, policies and insurance-related questions",
            "Anonymous benefits navigation tool or website (no login required)",
        ],
        report_only: &[],
    },
    DimensionSpec {
        name: "Career Continuity & Advancement",
        prompt: "Protections for career advancement opportunities and professional development during and after treatment.",
        weight: 4,
        vocabulary: offer_vocabulary,
        elements: &[
            "Continued access to training/development",
            "Structured reintegration programs",
            "Peer mentorship program (employees who had similar condition mentoring current employees)",
            "Professional coach/mentor for employees managing cancer or other serious health conditions",
            "Adjusted performance goals/deliverables during treatment and recovery",
            "Career coaching for employees managing cancer or other serious health conditions",
            "Succession planning protections",
            "Project continuity protocols",
            "Optional stay-connected program",
        ],
        report_only: &[],
    },
    DimensionSpec {
        name: "Work Continuation & Resumption",
        prompt: "Structured processes that help employees keep working during treatment, resume work after medical leave and manage the physical and cognitive impacts of treatment.",
        weight: 13,
        vocabulary: offer_vocabulary,
        elements: &[
            "Flexible work arrangements during treatment",
            "Phased return-to-work plans",
            "Workload adjustments during treatment",
            "Flexibility for medical setbacks",
            "Buddy/mentor pairing for support",
            "Structured progress reviews",
            "Contingency planning for treatment schedules",
            "Long-term success tracking",
            "Access to occupational therapy/vocational rehabilitation",
            "Online peer support forums",
            "Access to specialized work resumption professionals",
            "Manager training on supporting team members during treatment/return",
        ],
        report_only: &[],
    },
    DimensionSpec {
        name: "Executive Commitment & Resources",
        prompt: "Visible executive engagement and resource allocation for employee workplace support programs.",
        weight: 4,
        vocabulary: offer_unsure_vocabulary,
        elements: &[
            "Executive accountability metrics",
            "Public success story celebrations",
            "Compensation tied to support outcomes",
            "ESG/CSR reporting inclusion",
            "Year-over-year budget growth",
            "Executive sponsors communicate regularly about workplace support programs",
            "Dedicated budget allocation for serious illness support programs",
            "C-suite executive serves as program champion/sponsor",
            "Support programs included in investor/stakeholder communications",
            "Cross-functional executive steering committee for workplace support programs",
            "Support metrics included in annual report/sustainability reporting",
            "Executive-led town halls focused on health benefits and employee support",
        ],
        report_only: &[],
    },
    DimensionSpec {
        name: "Caregiver & Family Support",
        prompt: "Support for employees who are caregivers for family members managing cancer or other serious health conditions through flexible arrangements and dedicated resources.",
        weight: 4,
        vocabulary: offer_unsure_vocabulary,
        elements: &[
            "Paid caregiver leave with expanded eligibility (beyond local legal requirements)",
            "Flexible work arrangements for caregivers",
            "Dependent care subsidies",
            "Emergency caregiver funds",
            "Dependent care account matching/contributions",
            "Family navigation support",
            "Caregiver peer support groups",
            "Mental health support specifically for caregivers",
            "Manager training for supervising caregivers",
            "Practical support for managing caregiving and work",
            "Emergency dependent care when regular arrangements unavailable",
            "Respite care funding/reimbursement",
            "Caregiver resource navigator/concierge",
            "Legal/financial planning assistance for caregivers",
            "Modified job duties during peak caregiving periods",
            "Unpaid leave job protection beyond local / legal requirements",
            "Eldercare consultation and referral services",
            "Paid time off for care coordination appointments",
            "Expanded caregiver leave eligibility beyond legal definitions (e.g., siblings, in-laws, chosen family)",
            "Concierge services to coordinate caregiving logistics (e.g., scheduling, transportation, home care)",
        ],
        report_only: &[D10_CONCIERGE],
    },
    DimensionSpec {
        name: "Prevention, Wellness & Legal Compliance",
        prompt: "Proactive health programs, legal protections beyond minimums, and workplace safety measures.",
        weight: 3,
        vocabulary: offer_vocabulary,
        elements: &[
            "At least 70% coverage for regionally / locally recommended screenings",
            "Full or partial coverage for annual health screenings/checkups",
            "Targeted risk-reduction programs",
            "Paid time off for preventive care appointments",
            "Legal protections beyond requirements",
            "Workplace safety assessments to minimize health risks",
            "Regular health education sessions",
            "Individual health assessments (online or in-person)",
            "Genetic screening/counseling",
            "On-site vaccinations",
            "Lifestyle coaching programs",
            "Risk factor tracking/reporting",
            "Policies to support immuno-compromised colleagues (e.g., mask protocols, ventilation)",
        ],
        report_only: &[],
    },
    DimensionSpec {
        name: "Continuous Improvement & Outcomes",
        prompt: "Systematic measurement, feedback integration, and program evolution based on outcomes.",
        weight: 3,
        vocabulary: measure_vocabulary,
        elements: &[
            "Return-to-work success metrics",
            "Employee satisfaction tracking",
            "Business impact/ROI assessment",
            "Regular program enhancements",
            "External benchmarking",
            "Innovation pilots",
            "Employee confidence in employer support",
            "Program utilization analytics",
        ],
        report_only: &[],
    },
    DimensionSpec {
        name: "Communication & Awareness",
        prompt: "How organizations inform, educate, and engage employees about available workplace support programs for those managing cancer or other serious health conditions.",
        weight: 10,
        vocabulary: communication_vocabulary,
        elements: &[
            "Proactive communication at point of diagnosis disclosure",
            "Dedicated program website or portal",
            "Regular company-wide awareness campaigns (at least quarterly)",
            "New hire orientation coverage",
            "Manager toolkit for cascade communications",
            "Employee testimonials/success stories",
            "Multi-channel communication strategy",
            "Family/caregiver communication inclusion",
            "Anonymous information access options",
            "Cancer awareness month campaigns with resources and survivor stories",
        ],
        report_only: &[],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn weights_add_up_to_100() {
        init();
        let total: u32 = Catalog::builtin().dimensions().iter().map(|d| d.weight).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn dimension_range() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.get_dimension(4).map(|d| d.weight), Ok(14));
        assert_eq!(
            catalog.get_dimension(0).err(),
            Some(AssessmentErrors::InvalidDimension(0))
        );
        assert_eq!(
            catalog.get_dimension(14).err(),
            Some(AssessmentErrors::InvalidDimension(14))
        );
    }

    #[test]
    fn equal_builtin_weights() {
        let d4 = Catalog::builtin().get_dimension(4).unwrap();
        assert_eq!(d4.elements.len(), 10);
        assert!(d4
            .elements
            .iter()
            .all(|e| (e.empirical_weight - 0.1).abs() < 1e-12));
        assert!((d4.total_element_weight() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn concierge_is_report_only() {
        let d10 = Catalog::builtin().get_dimension(10).unwrap();
        assert_eq!(d10.elements.len(), 20);
        let idx = d10.element_index(D10_CONCIERGE).unwrap();
        assert!(d10.elements[idx].excluded_from_scoring);
        assert_eq!(d10.elements[idx].empirical_weight, 0.0);
        assert_eq!(
            d10.elements
                .iter()
                .filter(|e| e.excluded_from_scoring)
                .count(),
            1
        );
        assert!((d10.total_element_weight() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn vocabularies() {
        let catalog = Catalog::builtin();
        let d3 = catalog.get_dimension(3).unwrap();
        assert_eq!(d3.offer_status(), "Currently provide to managers");
        assert_eq!(d3.parse_status("Unsure"), None);
        assert_eq!(d3.parse_status("Currently offer"), None);
        let d13 = catalog.get_dimension(13).unwrap();
        assert_eq!(
            d13.status_options(),
            vec![
                "Currently use",
                "In active planning / development",
                "Assessing feasibility",
                "Not able to utilize in foreseeable future",
                "Unsure"
            ]
        );
        assert_eq!(d13.parse_status("unsure"), Some(Status::Unsure));
        assert_eq!(d13.parse_status("5"), Some(Status::Unsure));
        let d4 = catalog.get_dimension(4).unwrap();
        assert_eq!(d4.parse_status("4"), Some(Status::Offering));
        assert_eq!(d4.parse_status("5"), None);
        assert_eq!(d4.parse_status("Maybe later"), None);
    }

    #[test]
    fn element_matching_is_normalized() {
        let d6 = Catalog::builtin().get_dimension(6).unwrap();
        assert_eq!(
            d6.element_index("professional-led  support groups (External facilitator / counselor)"),
            Some(5)
        );
        assert_eq!(d6.element_index("Free lunch"), None);
        assert_eq!(
            normalize_element_text("  Employer\u{2019}s  plan \u{2013} ok "),
            "employer's plan - ok"
        );
    }

    #[test]
    fn geographic_reach() {
        assert_eq!(
            GeographicReach::classify("Only measured/tracked in select locations"),
            Some(GeographicReach::Select)
        );
        assert_eq!(
            GeographicReach::classify("Vary across locations"),
            Some(GeographicReach::Vary)
        );
        assert_eq!(
            GeographicReach::classify("Varies by location"),
            Some(GeographicReach::Vary)
        );
        assert_eq!(
            GeographicReach::classify("Generally consistent across all locations"),
            Some(GeographicReach::Consistent)
        );
        assert_eq!(GeographicReach::classify("Not sure"), None);
    }

    #[test]
    fn weight_overrides() {
        init();
        let catalog = Catalog::builtin()
            .with_element_weights(&[ElementWeight {
                dimension: 4,
                element: "Nutrition Coaching".to_string(),
                weight: 0.5,
                standard_setter: Some(0.3),
            }])
            .unwrap();
        let d4 = catalog.get_dimension(4).unwrap();
        assert_eq!(d4.elements[7].empirical_weight, 0.5);
        assert_eq!(d4.elements[7].standard_setter_score, 0.3);
        // The builtin catalog is untouched.
        let builtin = Catalog::builtin().get_dimension(4).unwrap();
        assert!((builtin.elements[7].empirical_weight - 0.1).abs() < 1e-12);

        let unknown = Catalog::builtin().with_element_weights(&[ElementWeight {
            dimension: 4,
            element: "Free lunch".to_string(),
            weight: 0.5,
            standard_setter: None,
        }]);
        assert_eq!(
            unknown.err(),
            Some(AssessmentErrors::UnknownElement {
                dimension: 4,
                element: "Free lunch".to_string()
            })
        );

        let negative = Catalog::builtin().with_element_weights(&[ElementWeight {
            dimension: 4,
            element: "Nutrition coaching".to_string(),
            weight: -1.0,
            standard_setter: None,
        }]);
        assert!(matches!(
            negative,
            Err(AssessmentErrors::InvalidWeight { dimension: 4, .. })
        ));
    }
}
