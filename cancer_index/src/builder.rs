use crate::answers::{resolve_grid_entry, AnswerRecord, DimensionAnswers, GridValue, StatusGrid};
use crate::catalog::Catalog;
pub use crate::config::*;

/// The free-form sections of a record, for [Builder::add_field].
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum SectionKey {
    Firmographics,
    GeneralBenefits,
    CurrentSupport,
    CrossDimensional,
    EmployeeImpact,
}

/// A builder for answer records that do not come from a JSON export.
///
/// Grid entries go through the same validation as JSON records: unknown
/// elements and statuses are dropped and reported as issues.
///
/// ```
/// use cancer_index::builder::{Builder, SectionKey};
/// use cancer_index::catalog::Catalog;
/// use cancer_index::answers::GridValue;
/// # use cancer_index::{Answer, AssessmentErrors};
///
/// let mut builder = Builder::new(Catalog::builtin(), "CAC-42").company_name("Acme");
/// builder.add_status_grid(
///     4,
///     &[("Nutrition coaching", GridValue::Label("Currently offer".to_string()))],
/// )?;
/// builder.add_field(SectionKey::CurrentSupport, "or1", Answer::SingleSelect("5".to_string()));
/// let record = builder.build();
/// assert_eq!(record.dimension(4).map(|d| d.grid.is_some()), Some(true));
///
/// # Ok::<(), AssessmentErrors>(())
/// ```
pub struct Builder<'a> {
    _catalog: &'a Catalog,
    _record: AnswerRecord,
}

impl<'a> Builder<'a> {
    pub fn new(catalog: &'a Catalog, survey_id: &str) -> Builder<'a> {
        Builder {
            _catalog: catalog,
            _record: AnswerRecord {
                survey_id: survey_id.to_string(),
                ..Default::default()
            },
        }
    }

    pub fn company_name(self, name: &str) -> Builder<'a> {
        Builder {
            _catalog: self._catalog,
            _record: AnswerRecord {
                company_name: Some(name.to_string()),
                ..self._record
            },
        }
    }

    /// Adds grid entries to a dimension, creating the grid if needed.
    pub fn add_status_grid(
        &mut self,
        dimension: u32,
        entries: &[(&str, GridValue)],
    ) -> Result<(), AssessmentErrors> {
        let catalog = self._catalog;
        let dim = catalog.get_dimension(dimension)?;
        let answers = self._record.dimensions.entry(dimension).or_default();
        let grid = answers.grid.get_or_insert_with(StatusGrid::new);
        for (element, value) in entries {
            resolve_grid_entry(dim, element, value, grid, &mut self._record.issues);
        }
        Ok(())
    }

    /// Adds a follow-up answer to a dimension (`d1_4b`, `d4aa`, ...).
    pub fn add_dimension_field(
        &mut self,
        dimension: u32,
        key: &str,
        answer: Answer,
    ) -> Result<(), AssessmentErrors> {
        self._catalog.get_dimension(dimension)?;
        let answers: &mut DimensionAnswers = self._record.dimensions.entry(dimension).or_default();
        answers.fields.fields.insert(key.to_string(), answer);
        Ok(())
    }

    pub fn add_field(&mut self, section: SectionKey, key: &str, answer: Answer) {
        let r = &mut self._record;
        let s = match section {
            SectionKey::Firmographics => &mut r.firmographics,
            SectionKey::GeneralBenefits => &mut r.general_benefits,
            SectionKey::CurrentSupport => &mut r.current_support,
            SectionKey::CrossDimensional => &mut r.cross_dimensional,
            SectionKey::EmployeeImpact => &mut r.employee_impact,
        };
        s.fields.insert(key.to_string(), answer);
    }

    pub fn build(self) -> AnswerRecord {
        self._record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_validates_grid() {
        let mut b = Builder::new(Catalog::builtin(), "x");
        b.add_status_grid(
            13,
            &[
                ("New hire orientation coverage", GridValue::Code(4)),
                ("Dedicated program website or portal", GridValue::Label("Unsure".to_string())),
                ("Billboards", GridValue::Label("Currently use".to_string())),
            ],
        )
        .unwrap();
        assert_eq!(
            b.add_status_grid(14, &[]),
            Err(AssessmentErrors::InvalidDimension(14))
        );
        let r = b.build();
        let grid = r.dimension(13).unwrap().grid.as_ref().unwrap();
        assert_eq!(grid.get(3), Some(Status::Offering));
        assert_eq!(grid.get(1), Some(Status::Unsure));
        assert_eq!(r.issues.len(), 1);
    }
}
