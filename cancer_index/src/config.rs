// ********* Input data structures ***********

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::Display;

/// The status categories a respondent can pick for an element of a status grid.
///
/// Every dimension phrases these differently ("Currently offer", "Currently
/// measure / track", ...), see [crate::catalog::Dimension::status_label] for the
/// wording. The declaration order is the report priority order.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Status {
    /// Currently offering / measuring / using / providing.
    Offering,
    /// In active planning / development.
    Planning,
    /// Assessing feasibility.
    Assessing,
    /// Not able to offer (or measure, utilize, provide) in the foreseeable future.
    NotAble,
    /// Only part of the vocabulary of some dimensions.
    Unsure,
}

impl Status {
    pub const ORDERED: [Status; 5] = [
        Status::Offering,
        Status::Planning,
        Status::Assessing,
        Status::NotAble,
        Status::Unsure,
    ];

    pub fn icon(&self) -> &'static str {
        match self {
            Status::Offering => "✅",
            Status::Planning => "🔄",
            Status::Assessing => "🤔",
            Status::NotAble => "❌",
            Status::Unsure => "❓",
        }
    }

    /// Numeric codes found in spreadsheet imports of older survey waves.
    pub fn from_code(code: i64) -> Option<Status> {
        match code {
            4 => Some(Status::Offering),
            3 => Some(Status::Planning),
            2 => Some(Status::Assessing),
            1 => Some(Status::NotAble),
            5 => Some(Status::Unsure),
            _ => None,
        }
    }
}

/// A single answer, after validation at the boundary.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Answer {
    SingleSelect(String),
    MultiSelect(Vec<String>),
    FreeText(String),
    /// A nested question such as `ei1` (outcome -> rating). Status grids are
    /// not stored as ratings, see [crate::answers::StatusGrid].
    Ratings(BTreeMap<String, String>),
}

impl Answer {
    /// The text of a single select or free text answer, if not blank.
    pub fn text(&self) -> Option<&str> {
        match self {
            Answer::SingleSelect(s) | Answer::FreeText(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        }
    }

    /// The selected options of a multi select answer, if any.
    pub fn list(&self) -> Option<&[String]> {
        match self {
            Answer::MultiSelect(l) if !l.is_empty() => Some(l.as_slice()),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Answer::SingleSelect(s) | Answer::FreeText(s) => s.trim().is_empty(),
            Answer::MultiSelect(l) => l.is_empty(),
            Answer::Ratings(m) => m.is_empty(),
        }
    }
}

/// Problems found in a record that do not prevent scoring.
///
/// The offending grid entries are dropped and the rest of the record is kept.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum AnswerIssue {
    UnknownStatusValue {
        dimension: u32,
        element: String,
        value: String,
    },
    UnknownElement {
        dimension: u32,
        element: String,
    },
    /// Another key of the grid already names the same element.
    DuplicateElement {
        dimension: u32,
        element: String,
    },
}

impl Display for AnswerIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerIssue::UnknownStatusValue {
                dimension,
                element,
                value,
            } => write!(
                f,
                "dimension {}: unknown status {:?} for element {:?}",
                dimension, value, element
            ),
            AnswerIssue::UnknownElement { dimension, element } => {
                write!(f, "dimension {}: unknown element {:?}", dimension, element)
            }
            AnswerIssue::DuplicateElement { dimension, element } => {
                write!(f, "dimension {}: duplicate element {:?}", dimension, element)
            }
        }
    }
}

// ******** Output data structures *********

/// Performance tier assigned from the composite score.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Tier {
    Exemplary,
    Leading,
    Progressing,
    Emerging,
    Developing,
}

impl Tier {
    /// Lower bounds are inclusive, evaluated from the top.
    pub fn from_score(score: u32) -> Tier {
        match score {
            s if s >= 90 => Tier::Exemplary,
            s if s >= 75 => Tier::Leading,
            s if s >= 60 => Tier::Progressing,
            s if s >= 40 => Tier::Emerging,
            _ => Tier::Developing,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Exemplary => "Exemplary",
            Tier::Leading => "Leading",
            Tier::Progressing => "Progressing",
            Tier::Emerging => "Emerging",
            Tier::Developing => "Developing",
        }
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Score of one dimension.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DimensionScore {
    pub dimension: u32,
    pub weight: u32,
    /// None when the dimension has no usable grid answer. A dimension where
    /// every element is "not able" scores Some(0).
    pub score: Option<u32>,
    /// The grid score before geographic adjustment and follow-up blending.
    pub grid_score: Option<u32>,
    pub follow_up_score: Option<u32>,
    pub answered: usize,
    pub offering: usize,
    pub unsure: usize,
    pub insufficient_data: bool,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ScoreResult {
    /// One entry per dimension, in dimension order.
    pub dimensions: Vec<DimensionScore>,
    pub weighted_dim_score: Option<u32>,
    pub composite_score: Option<u32>,
    pub tier: Option<Tier>,
    pub maturity_score: u32,
    pub breadth_score: u32,
    pub completed_dimensions: usize,
    pub is_provisional: bool,
}

impl ScoreResult {
    pub fn dimension_score(&self, dimension: u32) -> Option<u32> {
        self.dimensions
            .iter()
            .find(|ds| ds.dimension == dimension)
            .and_then(|ds| ds.score)
    }

    pub fn dimension_scores(&self) -> BTreeMap<u32, Option<u32>> {
        self.dimensions
            .iter()
            .map(|ds| (ds.dimension, ds.score))
            .collect()
    }
}

/// Errors that prevent scoring or report generation from completing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum AssessmentErrors {
    InvalidDimension(u32),
    MalformedAnswerMap {
        section: String,
        key: String,
        reason: String,
    },
    /// Only raised for element weight overrides. Unknown elements in answers
    /// are reported as [AnswerIssue::UnknownElement].
    UnknownElement {
        dimension: u32,
        element: String,
    },
    InvalidWeight {
        dimension: u32,
        element: String,
    },
    InvalidRules(String),
}

impl Error for AssessmentErrors {}

impl Display for AssessmentErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssessmentErrors::InvalidDimension(n) => {
                write!(f, "invalid dimension {} (expected 1 to 13)", n)
            }
            AssessmentErrors::MalformedAnswerMap {
                section,
                key,
                reason,
            } => write!(f, "malformed answer map {}.{}: {}", section, key, reason),
            AssessmentErrors::UnknownElement { dimension, element } => write!(
                f,
                "dimension {} has no element named {:?}",
                dimension, element
            ),
            AssessmentErrors::InvalidWeight { dimension, element } => write!(
                f,
                "dimension {}: element {:?} must have a positive weight",
                dimension, element
            ),
            AssessmentErrors::InvalidRules(msg) => write!(f, "invalid scoring rules: {}", msg),
        }
    }
}

// ********* Configuration **********

/// How much an element counts towards its dimension, depending on its status.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum StatusCredit {
    /// Only the offering status counts, with full credit.
    OfferOnly,
    /// The 5 / 3 / 2 / 0 points scale, as a fraction of 5.
    ///
    /// The points are weighted by the empirical element weights and divided
    /// by the total weight of the dimension's scored elements. Elements left
    /// unanswered therefore count as 0, unlike the older `answered × 5`
    /// denominator that only covered the answered elements.
    Ordinal,
    /// The flat 100 / 50 / 25 / 0 scheme of the legacy PDF export.
    LegacyFlat,
}

impl StatusCredit {
    pub fn credit(&self, status: Status) -> f64 {
        match (self, status) {
            (_, Status::Offering) => 1.0,
            (StatusCredit::Ordinal, Status::Planning) => 0.6,
            (StatusCredit::Ordinal, Status::Assessing) => 0.4,
            (StatusCredit::LegacyFlat, Status::Planning) => 0.5,
            (StatusCredit::LegacyFlat, Status::Assessing) => 0.25,
            _ => 0.0,
        }
    }
}

/// Share (in percent) of the grid score and follow-up score in a blended
/// dimension score.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct BlendWeights {
    pub grid: u32,
    pub follow_up: u32,
}

impl BlendWeights {
    pub const DEFAULT: BlendWeights = BlendWeights {
        grid: 85,
        follow_up: 15,
    };
}

/// Percentages of the composite score. They must add up to 100.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct CompositeWeights {
    pub weighted_dim: u32,
    pub maturity: u32,
    pub breadth: u32,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ScoringRules {
    pub status_credit: StatusCredit,
    /// Discount dimensions that are only available in some locations.
    pub geo_adjustment: bool,
    /// Blend follow-up answers into dimensions 1, 3, 12 and 13.
    pub follow_up_blend: Option<BlendWeights>,
    pub composite: CompositeWeights,
    /// A dimension has insufficient data when at least this share (percent)
    /// of its answers is "Unsure".
    pub insufficient_unsure_percent: u32,
    /// The result is provisional when at least this many dimensions have
    /// insufficient data.
    pub provisional_dimension_count: usize,
}

impl ScoringRules {
    pub const DEFAULT_RULES: ScoringRules = ScoringRules {
        status_credit: StatusCredit::OfferOnly,
        geo_adjustment: false,
        follow_up_blend: None,
        composite: CompositeWeights {
            weighted_dim: 90,
            maturity: 5,
            breadth: 5,
        },
        insufficient_unsure_percent: 40,
        provisional_dimension_count: 4,
    };

    pub fn validate(&self) -> Result<(), AssessmentErrors> {
        let c = &self.composite;
        if [c.weighted_dim, c.maturity, c.breadth].iter().any(|w| *w > 100)
            || c.weighted_dim + c.maturity + c.breadth != 100
        {
            return Err(AssessmentErrors::InvalidRules(format!(
                "composite weights must add up to 100, got {}/{}/{}",
                c.weighted_dim, c.maturity, c.breadth
            )));
        }
        if let Some(bw) = self.follow_up_blend {
            if bw.grid > 100 || bw.follow_up > 100 || bw.grid + bw.follow_up != 100 {
                return Err(AssessmentErrors::InvalidRules(format!(
                    "blend weights must add up to 100, got {}/{}",
                    bw.grid, bw.follow_up
                )));
            }
        }
        if self.insufficient_unsure_percent > 100 {
            return Err(AssessmentErrors::InvalidRules(format!(
                "insufficient data threshold is a percentage, got {}",
                self.insufficient_unsure_percent
            )));
        }
        Ok(())
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        ScoringRules::DEFAULT_RULES
    }
}
