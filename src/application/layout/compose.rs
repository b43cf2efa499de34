use super::RenderOptions;
use super::builder::{DocumentBuilder, TOP};
use super::sections::{header_page, project_detail, projects_summary, team_summary};
use crate::domain::adjustment::Adjustments;
use crate::domain::aggregate::ProjectTotals;
use crate::domain::document::InvoiceDocument;
use crate::domain::month::InvoiceMonth;
use crate::domain::party::{ClientInfo, PayeeInfo};
use crate::domain::rates::RateTable;
use crate::domain::summary::{ProjectsSummary, TeamSummary};
use crate::error::{InvoiceError, Result};
use tracing::debug;

/// Everything a layout reads. Borrowed from the request for one generation.
#[derive(Debug, Clone, Copy)]
pub struct LayoutInput<'a> {
    pub month: InvoiceMonth,
    pub client: &'a ClientInfo,
    pub payee: &'a PayeeInfo,
    /// Validated selection. Hours overrides apply across all of it.
    pub selected: &'a [String],
    pub totals: &'a ProjectTotals,
    pub rates: &'a RateTable,
    pub adjustments: &'a Adjustments,
    pub options: RenderOptions,
}

/// Header page with the project's detail section after it, then the team
/// summary over the whole selection when enabled.
pub fn project_invoice(input: &LayoutInput<'_>, project: &str) -> Result<InvoiceDocument> {
    let aggregate = input
        .totals
        .get(project)
        .ok_or_else(|| InvoiceError::UnknownProject(project.to_string()))?;

    let mut doc = DocumentBuilder::new(format!("Invoice {project} {}", input.month));
    let y = header_page(&mut doc, &input.month, input.client, input.payee);
    let y = project_detail(
        &mut doc,
        project,
        aggregate,
        input.adjustments.deduction_for(project),
        &input.options,
        y,
    );

    if input.options.show_team_summary {
        let team = TeamSummary::build(
            input.selected,
            input.totals,
            input.rates,
            input.adjustments,
        );
        team_summary(&mut doc, &team, &input.options, y);
    }

    let document = doc.finish();
    debug!(project, pages = document.page_count(), "Laid out project invoice");
    Ok(document)
}

/// Header page, a page with the projects summary and the team summary, then
/// one page per selected project with its detail section. The detail pages
/// are left out when activities are hidden.
pub fn combined_invoice(input: &LayoutInput<'_>) -> Result<InvoiceDocument> {
    let selected = input.selected;
    if let Some(missing) = selected.iter().find(|p| !input.totals.contains_key(*p)) {
        return Err(InvoiceError::UnknownProject(missing.clone()));
    }

    let mut doc = DocumentBuilder::new(format!("Combined invoice {}", input.month));
    header_page(&mut doc, &input.month, input.client, input.payee);

    doc.add_page();
    let summary = ProjectsSummary::build(selected, input.totals, input.adjustments);
    let y = projects_summary(&mut doc, &summary, &input.options, TOP);

    if input.options.show_team_summary {
        let team = TeamSummary::build(selected, input.totals, input.rates, input.adjustments);
        team_summary(&mut doc, &team, &input.options, y);
    }

    if input.options.show_activities {
        for name in selected {
            if let Some(aggregate) = input.totals.get(name) {
                doc.add_page();
                project_detail(
                    &mut doc,
                    name,
                    aggregate,
                    input.adjustments.deduction_for(name),
                    &input.options,
                    TOP,
                );
            }
        }
    }

    let document = doc.finish();
    debug!(
        projects = selected.len(),
        pages = document.page_count(),
        "Laid out combined invoice"
    );
    Ok(document)
}
