/*!
The narrative benchmarking report.

The report is built in two steps. [build_report] groups the answers of a
record into an [AssessmentReport], then [AssessmentReport::render] writes
the markdown text. The executive summary is computed from the grouped
sections, so its counts always agree with the body of the report.
*/

use std::fmt::Write;

use log::debug;

use crate::answers::{AnswerRecord, DimensionAnswers, Section};
use crate::catalog::{Catalog, Dimension, GeographicReach, NUM_DIMENSIONS};
use crate::config::*;

#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ReportOptions {
    /// Printed in the header when present. The engine never reads the clock.
    pub generated_on: Option<String>,
}

/// A piece of content in a section of the report.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ReportBlock {
    /// `**label:** value`
    Inline { label: String, value: String },
    /// Several short `**label:** value` lines.
    Facts(Vec<(String, String)>),
    /// The value on its own line below the label.
    Paragraph { label: String, text: String },
    Bullets {
        label: String,
        items: Vec<String>,
        note: Option<String>,
    },
    Numbered { label: String, items: Vec<String> },
    /// A list under its own sub heading.
    Listing { heading: String, items: Vec<String> },
    Quote { label: String, text: String },
    Ratings {
        label: String,
        items: Vec<(String, String)>,
    },
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TextSection {
    pub title: &'static str,
    pub blocks: Vec<ReportBlock>,
}

/// The elements of a dimension that share a status.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct StatusBucket {
    pub status: Status,
    pub label: &'static str,
    pub items: Vec<String>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DimensionSection {
    pub number: u32,
    pub name: &'static str,
    pub prompt: &'static str,
    /// None when the respondent did not answer the grid. Buckets are in
    /// priority order and are never empty.
    pub buckets: Option<Vec<StatusBucket>>,
    pub geography: Option<GeographicReach>,
    pub follow_ups: Vec<ReportBlock>,
}

impl DimensionSection {
    pub fn count(&self, status: Status) -> usize {
        self.buckets
            .iter()
            .flatten()
            .filter(|b| b.status == status)
            .map(|b| b.items.len())
            .sum()
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ExecutiveSummary {
    pub offering: usize,
    pub planning: usize,
    pub assessing: usize,
    pub consistent: usize,
    pub select: usize,
    pub vary: usize,
}

impl ExecutiveSummary {
    pub fn from_sections(sections: &[DimensionSection]) -> ExecutiveSummary {
        let geo = |reach: GeographicReach| {
            sections
                .iter()
                .filter(|s| s.geography == Some(reach))
                .count()
        };
        ExecutiveSummary {
            offering: sections.iter().map(|s| s.count(Status::Offering)).sum(),
            planning: sections.iter().map(|s| s.count(Status::Planning)).sum(),
            assessing: sections.iter().map(|s| s.count(Status::Assessing)).sum(),
            consistent: geo(GeographicReach::Consistent),
            select: geo(GeographicReach::Select),
            vary: geo(GeographicReach::Vary),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AssessmentReport {
    pub company: String,
    pub survey_id: String,
    pub profile: Vec<TextSection>,
    pub dimensions: Vec<DimensionSection>,
    pub closing: Vec<TextSection>,
    pub summary: ExecutiveSummary,
}

pub fn build_report(record: &AnswerRecord, catalog: &Catalog) -> AssessmentReport {
    let dimensions: Vec<DimensionSection> = catalog
        .dimensions()
        .iter()
        .filter_map(|dim| {
            record
                .dimension(dim.number)
                .filter(|a| !a.is_empty())
                .map(|a| dimension_section(dim, a))
        })
        .collect();
    let profile: Vec<TextSection> = [
        firmographics_section(&record.firmographics),
        general_benefits_section(&record.general_benefits),
        current_support_section(&record.current_support),
    ]
    .into_iter()
    .flatten()
    .collect();
    let closing: Vec<TextSection> = [
        cross_dimensional_section(&record.cross_dimensional),
        employee_impact_section(&record.employee_impact),
    ]
    .into_iter()
    .flatten()
    .collect();
    debug!(
        "build_report: {}: {} dimension sections",
        record.survey_id,
        dimensions.len()
    );
    AssessmentReport {
        company: record
            .display_company()
            .unwrap_or("Unknown Company")
            .to_string(),
        survey_id: record.survey_id.clone(),
        summary: ExecutiveSummary::from_sections(&dimensions),
        profile,
        dimensions,
        closing,
    }
}

/// Builds and renders the report of a record.
pub fn generate_report(record: &AnswerRecord, catalog: &Catalog, options: &ReportOptions) -> String {
    build_report(record, catalog).render(options)
}

impl AssessmentReport {
    pub fn render(&self, options: &ReportOptions) -> String {
        let mut out = String::new();
        self.render_header(&mut out, options);
        if self.dimensions.is_empty() {
            out.push_str("\n*No dimension data submitted.*\n");
            return out;
        }
        for section in self.profile.iter() {
            render_text_section(&mut out, section);
        }
        for section in self.dimensions.iter() {
            render_dimension(&mut out, section);
        }
        for section in self.closing.iter() {
            render_text_section(&mut out, section);
        }
        self.render_summary(&mut out);
        out.push_str("*Confidential - For benchmarking and internal use only*\n");
        out
    }

    fn render_header(&self, out: &mut String, options: &ReportOptions) {
        out.push_str("# COMPREHENSIVE ASSESSMENT REPORT\n");
        let _ = writeln!(out, "## {}", self.company);
        let _ = writeln!(out, "**Survey ID:** {}", self.survey_id);
        if let Some(date) = options.generated_on.as_ref() {
            let _ = writeln!(out, "**Generated:** {}", date);
        }
        out.push_str("\nThis report includes all survey sections with detailed responses.\n\n---\n");
    }

    fn render_summary(&self, out: &mut String) {
        let s = &self.summary;
        out.push_str("\n## EXECUTIVE SUMMARY\n\n### Program Offerings Overview\n");
        let _ = writeln!(
            out,
            "- **Currently Offering:** {} programs across all dimensions",
            s.offering
        );
        let _ = writeln!(out, "- **In Development:** {} programs", s.planning);
        let _ = writeln!(out, "- **Under Assessment:** {} programs", s.assessing);
        out.push_str("\n### Geographic Implementation\n");
        for (label, n) in [
            ("Globally Consistent", s.consistent),
            ("Select Locations", s.select),
            ("Varies by Location", s.vary),
        ] {
            let _ = writeln!(out, "- **{}:** {} of {} dimensions", label, n, NUM_DIMENSIONS);
        }
        out.push_str("\n---\n");
    }
}

fn render_text_section(out: &mut String, section: &TextSection) {
    let _ = write!(out, "\n## {}\n\n", section.title);
    for block in section.blocks.iter() {
        render_block(out, block);
    }
    out.push_str("---\n");
}

fn render_dimension(out: &mut String, section: &DimensionSection) {
    let _ = write!(
        out,
        "\n## DIMENSION {}: {}\n\n*{}*\n\n",
        section.number, section.name, section.prompt
    );
    if let Some(buckets) = section.buckets.as_ref() {
        out.push_str("### Primary Programs Offered\n");
        for bucket in buckets.iter() {
            let n = bucket.items.len();
            let _ = writeln!(
                out,
                "**{} {}** ({} item{})",
                bucket.status.icon(),
                bucket.label,
                n,
                if n > 1 { "s" } else { "" }
            );
            for item in bucket.items.iter() {
                let _ = writeln!(out, "  • {}", item);
            }
            out.push('\n');
        }
        if buckets.is_empty() {
            out.push_str("*No responses recorded*\n\n");
        }
        out.push_str("---\n\n");
    }
    if !section.follow_ups.is_empty() {
        out.push_str("### Follow-Up Details\n\n");
        for block in section.follow_ups.iter() {
            render_block(out, block);
        }
    }
    out.push_str("---\n");
}

fn render_block(out: &mut String, block: &ReportBlock) {
    match block {
        ReportBlock::Inline { label, value } => {
            let _ = write!(out, "**{}:** {}\n\n", label, value);
        }
        ReportBlock::Facts(lines) => {
            for (label, value) in lines.iter() {
                let _ = writeln!(out, "**{}:** {}", label, value);
            }
            out.push('\n');
        }
        ReportBlock::Paragraph { label, text } => {
            let _ = write!(out, "**{}:**\n{}\n\n", label, text);
        }
        ReportBlock::Bullets { label, items, note } => {
            let _ = writeln!(out, "**{}:**", label);
            for item in items.iter() {
                let _ = writeln!(out, "• {}", item);
            }
            if let Some(note) = note {
                let _ = writeln!(out, "  *({})*", note);
            }
            out.push('\n');
        }
        ReportBlock::Numbered { label, items } => {
            let _ = writeln!(out, "**{}:**", label);
            for (idx, item) in items.iter().enumerate() {
                let _ = writeln!(out, "{}. {}", idx + 1, item);
            }
            out.push('\n');
        }
        ReportBlock::Listing { heading, items } => {
            let _ = writeln!(out, "### {}", heading);
            for item in items.iter() {
                let _ = writeln!(out, "• {}", item);
            }
            out.push('\n');
        }
        ReportBlock::Quote { label, text } => {
            let _ = write!(out, "**{}:**\n> \"{}\"\n\n", label, text);
        }
        ReportBlock::Ratings { label, items } => {
            let _ = writeln!(out, "**{}:**", label);
            for (k, v) in items.iter() {
                let _ = writeln!(out, "• {}: **{}**", k, v);
            }
            out.push('\n');
        }
    }
}

// ******** Grouping ********

fn dimension_section(dim: &Dimension, answers: &DimensionAnswers) -> DimensionSection {
    let buckets = answers.grid.as_ref().map(|grid| {
        dim.vocabulary
            .statuses()
            .filter_map(|status| {
                let items: Vec<String> = grid
                    .iter()
                    .filter(|(_, s)| *s == status)
                    .map(|(idx, _)| dim.elements[idx].name.clone())
                    .collect();
                let label = dim.status_label(status)?;
                if items.is_empty() {
                    None
                } else {
                    Some(StatusBucket {
                        status,
                        label,
                        items,
                    })
                }
            })
            .collect::<Vec<StatusBucket>>()
    });
    let mut follow_ups: Vec<ReportBlock> = Vec::new();
    if let Some(geo) = answers.text(&dim.geography_key()) {
        follow_ups.push(inline("Geographic Implementation", geo));
    }
    match dim.number {
        1 => medical_leave_follow_ups(answers, &mut follow_ups),
        3 => {
            let facts: Vec<(String, String)> = [
                ("Training Approach", "d3_1a"),
                ("Training Completion", "d3_1"),
            ]
            .iter()
            .filter_map(|(label, key)| answers.text(key).map(|v| (label.to_string(), v.to_string())))
            .collect();
            if !facts.is_empty() {
                follow_ups.push(ReportBlock::Facts(facts));
            }
        }
        4 => {
            follow_ups.extend(bullets_with_note(
                &answers.fields,
                "Navigation Providers",
                "d4_1a",
            ));
            follow_ups.extend(bullets_with_note(
                &answers.fields,
                "Available Services",
                "d4_1b",
            ));
        }
        12 => {
            if let Some(v) = answers.text("d12_1") {
                follow_ups.push(inline("Case Review Approach", v));
            }
            if let Some(v) = answers.text("d12_2") {
                follow_ups.push(quote("Changes Based on Employee Experiences", v));
            }
        }
        13 => {
            if let Some(v) = answers.text("d13_1") {
                follow_ups.push(inline("Communication Frequency", v));
            }
        }
        _ => {}
    }
    if let Some(v) = answers.text(&dim.additional_key()) {
        follow_ups.push(quote("Additional Context", v));
    }
    DimensionSection {
        number: dim.number,
        name: dim.name,
        prompt: dim.prompt,
        buckets,
        geography: answers.geography(dim),
        follow_ups,
    }
}

fn medical_leave_follow_ups(answers: &DimensionAnswers, out: &mut Vec<ReportBlock>) {
    let regional = |label: &str, usa_label: &str, prefix: &str| {
        let items: Vec<String> = [
            (usa_label, format!("{}_usa", prefix)),
            ("Outside USA", format!("{}_non_usa", prefix)),
        ]
        .iter()
        .filter_map(|(l, key)| answers.text(key).map(|v| format!("{}: {}", l, v)))
        .collect();
        if items.is_empty() {
            None
        } else {
            Some(bullets(label, items))
        }
    };
    out.extend(regional("Additional Paid Medical Leave", "USA (beyond FMLA)", "d1_1"));
    out.extend(regional("Additional Intermittent Leave", "USA", "d1_2"));
    if let Some(kind) = answers.text("d1_4a_type") {
        out.push(inline("Remote Work Options", &remote_work(kind, answers)));
    }
    if let Some(v) = answers.text("d1_4b") {
        out.push(inline("Reduced Schedule Duration", v));
    }
    out.extend(regional("Job Protection Guarantee", "USA", "d1_5"));
    if let Some(items) = answers.list("d1_6") {
        out.push(bullets("Disability Pay Enhancements", items.to_vec()));
    }
}

fn remote_work(kind: &str, answers: &DimensionAnswers) -> String {
    match (kind, answers.text("d1_4a_weeks"), answers.text("d1_4a_months")) {
        ("weeks", Some(w), _) => format!("Up to {} weeks", w),
        ("months", _, Some(m)) => format!("Up to {} months", m),
        ("provider_requested", _, _) => "As long as requested by healthcare provider".to_string(),
        ("medically_necessary", _, _) => "As long as medically necessary".to_string(),
        ("unlimited", _, _) => "Unlimited with medical certification".to_string(),
        ("case_by_case", _, _) => "Case-by-case basis".to_string(),
        ("no_additional", _, _) => {
            "No additional remote work beyond legal requirements".to_string()
        }
        _ => "Not specified".to_string(),
    }
}

fn inline(label: &str, value: &str) -> ReportBlock {
    ReportBlock::Inline {
        label: label.to_string(),
        value: value.to_string(),
    }
}

fn quote(label: &str, text: &str) -> ReportBlock {
    ReportBlock::Quote {
        label: label.to_string(),
        text: text.to_string(),
    }
}

fn bullets(label: &str, items: Vec<String>) -> ReportBlock {
    ReportBlock::Bullets {
        label: label.to_string(),
        items,
        note: None,
    }
}

fn bullets_with_note(section: &Section, label: &str, key: &str) -> Option<ReportBlock> {
    section.list(key).map(|items| ReportBlock::Bullets {
        label: label.to_string(),
        items: items.to_vec(),
        note: section
            .text(&format!("{}_other", key))
            .map(|s| s.to_string()),
    })
}

fn text_section(title: &'static str, blocks: Vec<ReportBlock>) -> Option<TextSection> {
    if blocks.is_empty() {
        None
    } else {
        Some(TextSection { title, blocks })
    }
}

fn firmographics_section(s: &Section) -> Option<TextSection> {
    let mut blocks: Vec<ReportBlock> = Vec::new();
    let mut facts: Vec<(String, String)> = Vec::new();
    if let Some(v) = s.text("companyName") {
        facts.push(("Company Name".to_string(), v.to_string()));
    }
    if let (Some(first), Some(last)) = (s.text("firstName"), s.text("lastName")) {
        facts.push(("Contact".to_string(), format!("{} {}", first, last)));
    }
    if let Some(v) = s.text("title") {
        facts.push(("Title".to_string(), v.to_string()));
    }
    if let Some(v) = s.text("au1") {
        facts.push(("Authorized to Complete Survey".to_string(), v.to_string()));
    }
    if !facts.is_empty() {
        blocks.push(ReportBlock::Facts(facts));
    }
    if let Some(items) = s.list("au2") {
        blocks.push(bullets("Authorization Details", items.to_vec()));
    }
    text_section("SECTION 1: COMPANY FIRMOGRAPHICS", blocks)
}

fn general_benefits_section(s: &Section) -> Option<TextSection> {
    let blocks: Vec<ReportBlock> = [
        ("Current Benefits Offered", "cb1"),
        ("Benefits Planned for Next 2 Years", "cb2b"),
    ]
    .iter()
    .filter_map(|(heading, key)| {
        s.list(key).map(|items| ReportBlock::Listing {
            heading: heading.to_string(),
            items: items.to_vec(),
        })
    })
    .collect();
    text_section("SECTION 2: GENERAL BENEFITS LANDSCAPE", blocks)
}

fn current_support_section(s: &Section) -> Option<TextSection> {
    let mut blocks: Vec<ReportBlock> = Vec::new();
    if let Some(v) = s.text("or1") {
        blocks.push(ReportBlock::Paragraph {
            label: "Organization's Current Approach".to_string(),
            text: v.to_string(),
        });
    }
    if let Some(items) = s.list("or2a") {
        blocks.push(bullets("What Triggered Enhanced Support", items.to_vec()));
    }
    if let Some(v) = s.text("or2b") {
        blocks.push(quote("Most Impactful Change", v));
    }
    for (label, key) in [
        ("Barriers to More Comprehensive Support", "or3"),
        ("Caregiver Support Provided", "or5a"),
        ("How Effectiveness is Monitored", "or6"),
    ] {
        if let Some(items) = s.list(key) {
            blocks.push(bullets(label, items.to_vec()));
        }
    }
    text_section("SECTION 3: CURRENT SUPPORT PROGRAMS", blocks)
}

fn cross_dimensional_section(s: &Section) -> Option<TextSection> {
    let mut blocks: Vec<ReportBlock> = Vec::new();
    if let Some(items) = s.list("cd1a") {
        blocks.push(ReportBlock::Numbered {
            label: "Top 3 Dimensions for Enhancement (Best Outcomes)".to_string(),
            items: items.to_vec(),
        });
    }
    if let Some(items) = s.list("cd1b") {
        blocks.push(bullets("Lowest Priority Dimensions", items.to_vec()));
    }
    if let Some(items) = s.list("cd2") {
        blocks.push(bullets("Biggest Challenges", items.to_vec()));
    }
    text_section("SECTION 17: CROSS-DIMENSIONAL ASSESSMENT", blocks)
}

fn employee_impact_section(s: &Section) -> Option<TextSection> {
    let mut blocks: Vec<ReportBlock> = Vec::new();
    if let Some(m) = s.ratings("ei1") {
        blocks.push(ReportBlock::Ratings {
            label: "Positive Outcomes Observed".to_string(),
            items: m.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        });
    }
    if let Some(v) = s.text("ei2") {
        blocks.push(inline("ROI Measurement Status", v));
    }
    if let Some(v) = s.text("ei3") {
        blocks.push(inline("Approximate ROI", v));
    }
    if let Some(v) = s.text("ei4") {
        blocks.push(quote("Advice for Other HR Leaders", v));
    }
    if let Some(v) = s.text("ei5") {
        blocks.push(quote("Important Aspects Not Addressed in Survey", v));
    }
    text_section("SECTION 18: EMPLOYEE IMPACT ASSESSMENT", blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn record(v: serde_json::Value) -> AnswerRecord {
        AnswerRecord::from_json(&v, "T-1", Catalog::builtin()).unwrap()
    }

    #[test]
    fn empty_report() {
        init();
        let r = record(json!({"company_name": "Acme", "firmographics_data": {"title": "HR"}}));
        let text = generate_report(&r, Catalog::builtin(), &ReportOptions::default());
        assert_eq!(
            text,
            "# COMPREHENSIVE ASSESSMENT REPORT\n## Acme\n**Survey ID:** T-1\n\n\
             This report includes all survey sections with detailed responses.\n\n---\n\n\
             *No dimension data submitted.*\n"
        );
    }

    #[test]
    fn grid_grouping_in_catalog_order() {
        init();
        let r = record(json!({
            "company_name": "Acme",
            "dimension12_data": {
                "d12a": {
                    "Program utilization analytics": "Currently measure / track",
                    "Return-to-work success metrics": "Currently measure/track",
                    "Innovation pilots": "Assessing feasibility",
                    "External benchmarking": "Not able to measure / track in foreseeable future",
                    "Employee satisfaction tracking": "Bogus"
                },
                "d12aa": "Only measured/tracked in select locations",
                "d12_2": "Extended leave"
            }
        }));
        let report = build_report(&r, Catalog::builtin());
        assert_eq!(report.summary.offering, 2);
        assert_eq!(report.summary.assessing, 1);
        assert_eq!(report.summary.select, 1);
        let text = report.render(&ReportOptions {
            generated_on: Some("January 5, 2026".to_string()),
        });
        let expected = "\n## DIMENSION 12: Continuous Improvement & Outcomes\n\n\
            *Systematic measurement, feedback integration, and program evolution based on outcomes.*\n\n\
            ### Primary Programs Offered\n\
            **✅ Currently measure / track** (2 items)\n\
            \x20 • Return-to-work success metrics\n\
            \x20 • Program utilization analytics\n\n\
            **🤔 Assessing feasibility** (1 item)\n\
            \x20 • Innovation pilots\n\n\
            **❌ Not able to measure / track in foreseeable future** (1 item)\n\
            \x20 • External benchmarking\n\n\
            ---\n\n\
            ### Follow-Up Details\n\n\
            **Geographic Implementation:** Only measured/tracked in select locations\n\n\
            **Changes Based on Employee Experiences:**\n> \"Extended leave\"\n\n\
            ---\n";
        assert!(text.contains(expected), "{}", text);
        assert!(text.contains("**Generated:** January 5, 2026\n"));
        assert!(!text.contains("Employee satisfaction tracking"));
        assert!(text.contains(
            "- **Currently Offering:** 2 programs across all dimensions\n\
             - **In Development:** 0 programs\n\
             - **Under Assessment:** 1 programs\n"
        ));
        assert!(text.ends_with(
            "- **Globally Consistent:** 0 of 13 dimensions\n\
             - **Select Locations:** 1 of 13 dimensions\n\
             - **Varies by Location:** 0 of 13 dimensions\n\n\
             ---\n*Confidential - For benchmarking and internal use only*\n"
        ));
    }

    #[test]
    fn grouping_count_matches_valid_entries() {
        init();
        let r = record(json!({
            "dimension2_data": {"d2a": {
                "Financial counseling services": "Currently offer",
                "Guaranteed job protection": "Unsure",
                "Hardship grants program funded by employer": "In active planning / development",
                "Tax/estate planning assistance": "Currently offer",
                "Unknown thing": "Currently offer"
            }},
            "dimension13_data": {"d13a": {
                "New hire orientation coverage": "Unsure",
                "Dedicated program website or portal": "Currently use"
            }}
        }));
        let report = build_report(&r, Catalog::builtin());
        for section in report.dimensions.iter() {
            let grid = r.dimension(section.number).unwrap().grid.as_ref().unwrap();
            let grouped: usize = section.buckets.iter().flatten().map(|b| b.items.len()).sum();
            assert_eq!(grouped, grid.len());
            let statuses: Vec<Status> = section.buckets.iter().flatten().map(|b| b.status).collect();
            let mut sorted = statuses.clone();
            sorted.sort();
            assert_eq!(statuses, sorted);
        }
        assert_eq!(report.summary.offering, 3);
        assert_eq!(report.summary.planning, 1);
    }

    #[test]
    fn geographic_tally_single_dimension() {
        init();
        let r = record(json!({
            "dimension9_data": {
                "d9a": {"Executive accountability metrics": "Currently offer"},
                "d9aa": "Generally consistent across all locations"
            }
        }));
        let summary = build_report(&r, Catalog::builtin()).summary;
        assert_eq!(
            (summary.consistent, summary.select, summary.vary),
            (1, 0, 0)
        );
    }

    #[test]
    fn follow_up_details() {
        init();
        let r = record(json!({
            "dimension1_data": {
                "d1_1_usa": "13 or more weeks",
                "d1_1_non_usa": "5 to less than 9 weeks",
                "d1_4a_type": "weeks",
                "d1_4a_weeks": "12",
                "d1_6": ["Top-up to 100% of salary"],
                "d1b": "  "
            },
            "dimension3_data": {"d31a": "Live workshops", "d3_1": "Mandatory for all managers"},
            "dimension4_data": {
                "d4a": {},
                "d41a": ["Internal HR", "Other"],
                "d41a_other": "Union navigator"
            },
            "dimension5_data": {"d5a": {"Priority parking": "Currently offer"}}
        }));
        let text = generate_report(&r, Catalog::builtin(), &ReportOptions::default());
        assert!(text.contains(
            "### Follow-Up Details\n\n\
             **Additional Paid Medical Leave:**\n\
             • USA (beyond FMLA): 13 or more weeks\n\
             • Outside USA: 5 to less than 9 weeks\n\n\
             **Remote Work Options:** Up to 12 weeks\n\n\
             **Disability Pay Enhancements:**\n\
             • Top-up to 100% of salary\n\n---\n"
        ));
        assert!(text.contains(
            "**Training Approach:** Live workshops\n**Training Completion:** Mandatory for all managers\n\n"
        ));
        assert!(text.contains(
            "### Primary Programs Offered\n*No responses recorded*\n\n---\n\n\
             ### Follow-Up Details\n\n\
             **Navigation Providers:**\n• Internal HR\n• Other\n  *(Union navigator)*\n\n---\n"
        ));
        // Nothing recognized in dimension 5 beyond the grid.
        assert!(text.contains("  • Priority parking\n\n---\n\n---\n"));
        assert!(!text.contains("Additional Context"));
    }

    #[test]
    fn profile_and_closing_sections() {
        init();
        let r = record(json!({
            "dimension6_data": {"d6a": {"Stigma-reduction initiatives": "Currently offer"}},
            "firmographics_data": {"companyName": "Acme", "firstName": "Sam", "lastName": "Lee", "au2": ["Owner"]},
            "general_benefits_data": {"cb1": ["Dental"]},
            "current_support_data": {"or1": "Moderate", "or2b": "Paid leave"},
            "cross_dimensional_data": {"cd1a": ["Navigation", "Culture"]},
            "employee_impact_data": {"ei1": {"Retention": "Significant"}, "ei2": "Not measured"}
        }));
        let text = generate_report(&r, Catalog::builtin(), &ReportOptions::default());
        assert!(text.contains(
            "\n## SECTION 1: COMPANY FIRMOGRAPHICS\n\n\
             **Company Name:** Acme\n**Contact:** Sam Lee\n\n\
             **Authorization Details:**\n• Owner\n\n---\n"
        ));
        assert!(text.contains(
            "\n## SECTION 2: GENERAL BENEFITS LANDSCAPE\n\n### Current Benefits Offered\n• Dental\n\n---\n"
        ));
        assert!(text.contains(
            "**Organization's Current Approach:**\nModerate\n\n**Most Impactful Change:**\n> \"Paid leave\"\n\n---\n"
        ));
        assert!(text.contains("**Top 3 Dimensions for Enhancement (Best Outcomes):**\n1. Navigation\n2. Culture\n\n"));
        assert!(text.contains(
            "**Positive Outcomes Observed:**\n• Retention: **Significant**\n\n**ROI Measurement Status:** Not measured\n\n---\n"
        ));
        let s1 = text.find("SECTION 1").unwrap();
        let d6 = text.find("DIMENSION 6").unwrap();
        let s18 = text.find("SECTION 18").unwrap();
        let summary = text.find("EXECUTIVE SUMMARY").unwrap();
        assert!(s1 < d6 && d6 < s18 && s18 < summary);
    }

    #[test]
    fn deterministic_output() {
        let v = json!({
            "dimension10_data": {"d10a": {
                "Dependent care subsidies": "Currently offer",
                "Emergency caregiver funds": "Unsure"
            }, "d10b": "Backup care"}
        });
        let options = ReportOptions::default();
        let a = generate_report(&record(v.clone()), Catalog::builtin(), &options);
        let b = generate_report(&record(v), Catalog::builtin(), &options);
        assert_eq!(a, b);
        assert!(a.contains("**❓ Unsure** (1 item)\n  • Emergency caregiver funds\n"));
        assert!(a.contains("**Additional Context:**\n> \"Backup care\"\n\n"));
    }
}
