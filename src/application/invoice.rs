use super::layout::RenderOptions;
use super::layout::compose::{LayoutInput, combined_invoice, project_invoice};
use crate::domain::activity::ActivityRecord;
use crate::domain::adjustment::Adjustments;
use crate::domain::aggregate::{ProjectTotals, aggregate};
use crate::domain::document::InvoiceDocument;
use crate::domain::month::InvoiceMonth;
use crate::domain::party::{ClientInfo, PayeeInfo};
use crate::domain::ports::DocumentEncoder;
use crate::domain::rates::RateTable;
use crate::domain::summary::{ProjectsSummary, TeamSummary};
use crate::error::{InvoiceError, Result};
use std::collections::HashSet;
use tracing::info;

/// Everything one invoice generation needs, captured up front.
///
/// Totals are recomputed from `records` and `rates` on every call, so a
/// request can be edited and rendered again without stale figures.
#[derive(Debug, Clone)]
pub struct InvoiceRequest {
    pub records: Vec<ActivityRecord>,
    pub rates: RateTable,
    pub adjustments: Adjustments,
    /// Projects to invoice, in output order. Empty means every project.
    pub selected: Vec<String>,
    pub month: InvoiceMonth,
    pub client: ClientInfo,
    pub payee: PayeeInfo,
    pub options: RenderOptions,
}

/// An encoded invoice and the file name it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl InvoiceRequest {
    pub fn new(records: Vec<ActivityRecord>, rates: RateTable, month: InvoiceMonth) -> Self {
        Self {
            records,
            rates,
            adjustments: Adjustments::new(),
            selected: Vec::new(),
            month,
            client: ClientInfo::default(),
            payee: PayeeInfo::default(),
            options: RenderOptions::default(),
        }
    }

    pub fn totals(&self) -> ProjectTotals {
        aggregate(&self.records, &self.rates)
    }

    /// The validated selection: the explicit list, or every project in
    /// name order when none was given.
    pub fn selection(&self, totals: &ProjectTotals) -> Result<Vec<String>> {
        if self.selected.is_empty() {
            return Ok(totals.keys().cloned().collect());
        }
        if let Some(missing) = self.selected.iter().find(|p| !totals.contains_key(*p)) {
            return Err(InvoiceError::UnknownProject(missing.clone()));
        }
        Ok(self.selected.clone())
    }

    pub fn projects_summary(&self) -> Result<ProjectsSummary> {
        let totals = self.totals();
        let selected = self.selection(&totals)?;
        Ok(ProjectsSummary::build(&selected, &totals, &self.adjustments))
    }

    pub fn team_summary(&self) -> Result<TeamSummary> {
        let totals = self.totals();
        let selected = self.selection(&totals)?;
        Ok(TeamSummary::build(
            &selected,
            &totals,
            &self.rates,
            &self.adjustments,
        ))
    }

    /// Lays out one document per selected project, or a single combined
    /// document, paired with its output file stem.
    pub fn layout(&self, combined: bool) -> Result<Vec<(String, InvoiceDocument)>> {
        let totals = self.totals();
        let selected = self.selection(&totals)?;
        if selected.is_empty() {
            return Err(InvoiceError::NoProjects);
        }
        let input = LayoutInput {
            month: self.month,
            client: &self.client,
            payee: &self.payee,
            selected: &selected,
            totals: &totals,
            rates: &self.rates,
            adjustments: &self.adjustments,
            options: self.options,
        };

        if combined {
            let document = combined_invoice(&input)?;
            return Ok(vec![(combined_stem(&self.month), document)]);
        }

        let mut taken = HashSet::new();
        selected
            .iter()
            .map(|project| {
                let document = project_invoice(&input, project)?;
                let base = project_stem(project, &self.month);
                let mut stem = base.clone();
                let mut n = 2;
                while !taken.insert(stem.clone()) {
                    stem = format!("{base}-{n}");
                    n += 1;
                }
                Ok((stem, document))
            })
            .collect()
    }

    /// Lays out and encodes. Nothing is returned unless every document
    /// encoded successfully.
    pub fn generate(
        &self,
        combined: bool,
        encoder: &dyn DocumentEncoder,
    ) -> Result<Vec<InvoiceArtifact>> {
        let artifacts = self
            .layout(combined)?
            .into_iter()
            .map(|(stem, document)| {
                let bytes = encoder.encode(&document)?;
                Ok(InvoiceArtifact {
                    file_name: format!("{stem}.{}", encoder.extension()),
                    bytes,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        info!(
            month = %self.month,
            documents = artifacts.len(),
            combined,
            "Generated invoices"
        );
        Ok(artifacts)
    }
}

/// Lower-case project name with whitespace runs collapsed to `-`.
pub fn project_slug(project: &str) -> String {
    project
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

pub fn project_stem(project: &str, month: &InvoiceMonth) -> String {
    format!("{}-{}", project_slug(project), month.label())
}

pub fn combined_stem(month: &InvoiceMonth) -> String {
    format!("combined-invoice-{}", month.label())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::{Hours, Money};
    use rust_decimal_macros::dec;

    struct TagEncoder;

    impl DocumentEncoder for TagEncoder {
        fn encode(&self, document: &InvoiceDocument) -> Result<Vec<u8>> {
            Ok(format!("{}:{}", document.title, document.page_count()).into_bytes())
        }

        fn extension(&self) -> &'static str {
            "txt"
        }
    }

    fn request() -> InvoiceRequest {
        let records = vec![
            ActivityRecord::new("Website Redesign", "Alice", "Coding", Hours::new(dec!(2.5))),
            ActivityRecord::new("Website Redesign", "Bob", "Review", Hours::new(dec!(1.0))),
            ActivityRecord::new("Mobile App", "Alice", "Design", Hours::new(dec!(4))),
        ];
        let rates: RateTable = [
            ("Alice".to_string(), Money::new(dec!(100))),
            ("Bob".to_string(), Money::new(dec!(50))),
        ]
        .into_iter()
        .collect();
        InvoiceRequest::new(records, rates, "2025-01".parse().unwrap())
    }

    #[test]
    fn test_slug() {
        assert_eq!(project_slug("Website  Redesign"), "website-redesign");
        assert_eq!(project_slug(" Acme\tCorp "), "acme-corp");
        assert_eq!(project_slug("P1"), "p1");
    }

    #[test]
    fn test_default_selection_is_every_project() {
        let request = request();
        let totals = request.totals();
        assert_eq!(
            request.selection(&totals).unwrap(),
            vec!["Mobile App".to_string(), "Website Redesign".to_string()]
        );
    }

    #[test]
    fn test_unknown_selection() {
        let mut request = request();
        request.selected = vec!["Website Redesign".into(), "Ghost".into()];
        assert!(matches!(
            request.generate(false, &TagEncoder),
            Err(InvoiceError::UnknownProject(name)) if name == "Ghost"
        ));
    }

    #[test]
    fn test_empty_data() {
        let request = InvoiceRequest::new(Vec::new(), RateTable::new(), "2025-01".parse().unwrap());
        assert!(matches!(
            request.generate(true, &TagEncoder),
            Err(InvoiceError::NoProjects)
        ));
        assert!(request.projects_summary().unwrap().rows.is_empty());
        assert!(request.team_summary().unwrap().rows.is_empty());
    }

    #[test]
    fn test_file_names() {
        let mut request = request();
        request.selected = vec!["Website Redesign".into()];

        let artifacts = request.generate(false, &TagEncoder).unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].file_name, "website-redesign-2025-01.txt");

        let artifacts = request.generate(true, &TagEncoder).unwrap();
        assert_eq!(artifacts[0].file_name, "combined-invoice-2025-01.txt");
    }

    #[test]
    fn test_file_names_stay_distinct_when_slugs_collide() {
        let records = vec![
            ActivityRecord::new("Web App", "Alice", "Coding", Hours::new(dec!(1))),
            ActivityRecord::new("web  app", "Alice", "Coding", Hours::new(dec!(2))),
        ];
        let request = InvoiceRequest::new(records, RateTable::new(), "2025-01".parse().unwrap());

        let artifacts = request.generate(false, &TagEncoder).unwrap();
        let names: Vec<_> = artifacts.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(names, vec!["web-app-2025-01.txt", "web-app-2025-01-2.txt"]);
    }

    #[test]
    fn test_totals_follow_rate_edits() {
        let mut request = request();
        request.selected = vec!["Website Redesign".into()];
        let before = request.projects_summary().unwrap();
        assert_eq!(before.total_payable(), Money::new(dec!(300)));

        request.rates.set("Bob", Money::new(dec!(70)));
        request.adjustments.set_deduction("Website Redesign", Money::new(dec!(20)));
        let after = request.projects_summary().unwrap();
        assert_eq!(after.total_payable(), Money::new(dec!(300)));
        assert_eq!(after.rows[0].amount, Money::new(dec!(320)));
    }

    #[test]
    fn test_team_summary_uses_selection() {
        let mut request = request();
        request.selected = vec!["Mobile App".into()];
        let team = request.team_summary().unwrap();
        assert_eq!(team.rows.len(), 1);
        assert_eq!(team.rows[0].worker, "Alice");
        assert_eq!(team.working_hours(), Hours::new(dec!(4)));
    }
}
