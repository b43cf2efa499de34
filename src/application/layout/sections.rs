use super::RenderOptions;
use super::builder::{Align, DocumentBuilder, TextStyle};
use super::metrics::{truncate_to_width, wrap_text};
use crate::domain::aggregate::ProjectAggregate;
use crate::domain::document::{MARGIN, PAGE_HEIGHT, PAGE_WIDTH, Rgb};
use crate::domain::money::Money;
use crate::domain::month::InvoiceMonth;
use crate::domain::party::{ClientInfo, PayeeInfo};
use crate::domain::summary::{ProjectsSummary, TeamSummary};

const TABLE_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const ROW_HEIGHT: f32 = 8.0;
const CELL_PAD: f32 = 2.0;
const ACTIVITY_SIZE: f32 = 8.0;
const ACTIVITY_LINE: f32 = 3.5;

/// A table column: header text, width in mm, and whether values are
/// right-aligned figures.
#[derive(Debug, Clone, Copy)]
struct Column {
    title: &'static str,
    width: f32,
    numeric: bool,
}

impl Column {
    const fn text(title: &'static str, width: f32) -> Self {
        Self {
            title,
            width,
            numeric: false,
        }
    }

    const fn figure(title: &'static str, width: f32) -> Self {
        Self {
            title,
            width,
            numeric: true,
        }
    }
}

/// Left edges of each column starting at the margin.
fn column_edges(columns: &[Column]) -> Vec<f32> {
    columns
        .iter()
        .scan(MARGIN, |x, column| {
            let left = *x;
            *x += column.width;
            Some(left)
        })
        .collect()
}

/// Writes one row of cells; figures are right-aligned inside their column.
fn draw_cells(doc: &mut DocumentBuilder, columns: &[Column], y: f32, cells: &[(String, TextStyle)]) {
    let edges = column_edges(columns);
    for ((column, left), (value, style)) in columns.iter().zip(edges).zip(cells) {
        if column.numeric {
            doc.text_aligned(left + column.width - CELL_PAD, y, value, *style, Align::Right);
        } else {
            doc.text(left + CELL_PAD, y, value, *style);
        }
    }
}

fn draw_header_row(doc: &mut DocumentBuilder, columns: &[Column], y: f32, size: f32) {
    doc.fill_rect(MARGIN, y, TABLE_WIDTH, ROW_HEIGHT, Rgb::HEADER);
    let style = TextStyle::new(size).color(Rgb::WHITE);
    let cells: Vec<(String, TextStyle)> = columns
        .iter()
        .map(|c| (c.title.to_string(), style))
        .collect();
    draw_cells(doc, columns, y + 5.0, &cells);
}

/// Header block: invoice id, month, client and payee.
///
/// Draws on the current page and returns the y below the address blocks.
pub fn header_page(
    doc: &mut DocumentBuilder,
    month: &InvoiceMonth,
    client: &ClientInfo,
    payee: &PayeeInfo,
) -> f32 {
    let center_x = PAGE_WIDTH / 2.0;
    let center_y = PAGE_HEIGHT / 4.0;
    let title = TextStyle::new(16.0);

    doc.text_aligned(
        center_x,
        center_y,
        &format!("Invoice ID: #{}", month.invoice_id()),
        title,
        Align::Center,
    );
    doc.text_aligned(center_x, center_y + 10.0, &month.label(), title, Align::Center);
    doc.text_aligned(
        center_x,
        center_y + 20.0,
        &format!("Month of {}", month.month_name()),
        title.color(Rgb::GREEN),
        Align::Center,
    );

    let spacing = 8.0;
    let y = center_y + 40.0;
    let body = TextStyle::new(10.0);
    let right = PAGE_WIDTH / 2.0 + MARGIN;

    let left_block = [
        "Invoice for".to_string(),
        format!("Name: {}", client.name),
        format!("Company: {}", client.company),
        format!("Location: {}", client.location),
    ];
    let right_block = [
        "Payable to".to_string(),
        format!("Name: {}", payee.name),
        format!("Agency: {}", payee.agency),
        format!("Location: {}", payee.location),
    ];
    for (i, (left_line, right_line)) in left_block.iter().zip(&right_block).enumerate() {
        let line_y = y + spacing * i as f32;
        doc.text(MARGIN, line_y, left_line, body);
        doc.text(right, line_y, right_line, body);
    }

    y + spacing * 3.0 + 16.0
}

fn detail_columns(options: &RenderOptions) -> Vec<Column> {
    if options.show_amounts {
        vec![
            Column::text("Activity", TABLE_WIDTH - 100.0),
            Column::figure("Hours", 30.0),
            Column::figure("Rate", 30.0),
            Column::figure("Amount", 40.0),
        ]
    } else {
        vec![
            Column::text("Activity", TABLE_WIDTH - 40.0),
            Column::figure("Hours", 40.0),
        ]
    }
}

/// Itemised table for one project followed by its subtotal and, when a
/// deduction is set, the adjustment and grand total lines.
///
/// Breaks onto new pages as rows run out of room. Returns the y below the
/// section.
pub fn project_detail(
    doc: &mut DocumentBuilder,
    name: &str,
    project: &ProjectAggregate,
    deduction: Money,
    options: &RenderOptions,
    start_y: f32,
) -> f32 {
    let mut y = doc.ensure_space(start_y, 8.0 + 10.0 + ROW_HEIGHT);
    doc.text(MARGIN, y, &format!("Project: {name}"), TextStyle::new(12.0));
    y += 8.0;

    let columns = detail_columns(options);
    let right_edge = PAGE_WIDTH - MARGIN - CELL_PAD;

    if options.show_activities {
        draw_header_row(doc, &columns, y, 9.0);
        y += 10.0;

        let cell = TextStyle::new(ACTIVITY_SIZE);
        for (index, activity) in project.activities.iter().enumerate() {
            let lines = wrap_text(&activity.activity, columns[0].width - 2.0 * CELL_PAD, ACTIVITY_SIZE);
            let height = ROW_HEIGHT.max(ACTIVITY_LINE * lines.len() as f32 + 4.5);

            let next = doc.ensure_space(y, height);
            if next != y {
                y = next;
                if options.repeat_table_header {
                    draw_header_row(doc, &columns, y, 9.0);
                    y += 10.0;
                }
            }

            if index % 2 == 0 {
                doc.fill_rect(MARGIN, y, TABLE_WIDTH, height, Rgb::STRIPE);
            }
            for (i, line) in lines.iter().enumerate() {
                doc.text(MARGIN + CELL_PAD, y + 5.0 + ACTIVITY_LINE * i as f32, line, cell);
            }

            let mut figures = vec![(String::new(), cell), (activity.hours.to_string(), cell)];
            if options.show_amounts {
                figures.push((activity.rate.currency(), cell));
                figures.push((activity.amount.currency(), cell));
            }
            draw_cells(doc, &columns, y + 5.0, &figures);

            y += height;
        }
    }

    y += 5.0;
    let has_deduction = options.show_amounts && deduction.is_positive();
    let trailer = if has_deduction { 30.0 } else { 10.0 };
    y = doc.ensure_space(y, trailer);

    let body = TextStyle::new(10.0);
    doc.text(MARGIN, y + 5.0, "Subtotal:", body);
    let hours_anchor = if options.show_amounts {
        MARGIN + columns[0].width + columns[1].width - CELL_PAD
    } else {
        right_edge
    };
    doc.text_aligned(
        hours_anchor,
        y + 5.0,
        &format!("{} hours", project.total_hours),
        body,
        Align::Right,
    );

    if options.show_amounts {
        doc.text_aligned(right_edge, y + 5.0, &project.total_amount.currency(), body, Align::Right);

        if has_deduction {
            y += 10.0;
            let red = body.color(Rgb::RED);
            doc.text(MARGIN, y + 6.0, "Adjustment / Discount:", red);
            doc.text_aligned(
                right_edge,
                y + 6.0,
                &format!("-{}", deduction.currency()),
                red,
                Align::Right,
            );

            y += 10.0;
            let bold = body.bold();
            doc.text(MARGIN, y + 6.0, "Grand Total:", bold);
            doc.text_aligned(
                right_edge,
                y + 6.0,
                &(project.total_amount - deduction).currency(),
                bold,
                Align::Right,
            );
        }
    }

    y + 15.0
}

fn team_columns(options: &RenderOptions) -> Vec<Column> {
    if options.show_amounts {
        vec![
            Column::text("Employee Name", TABLE_WIDTH * 0.28),
            Column::figure("Working Hours", TABLE_WIDTH * 0.18),
            Column::figure("Adjusted Hours", TABLE_WIDTH * 0.18),
            Column::figure("Adjusted Amount", TABLE_WIDTH * 0.18),
            Column::figure("Difference", TABLE_WIDTH * 0.18),
        ]
    } else {
        vec![
            Column::text("Employee Name", TABLE_WIDTH * 0.4),
            Column::figure("Working Hours", TABLE_WIDTH * 0.3),
            Column::figure("Adjusted Hours", TABLE_WIDTH * 0.3),
        ]
    }
}

fn signed_color(value: Money) -> Rgb {
    if value.is_negative() { Rgb::RED } else { Rgb::GREEN }
}

/// Worker table with working and adjusted hours, plus adjusted amounts and
/// differences when amounts are shown. Returns the y below the table.
pub fn team_summary(
    doc: &mut DocumentBuilder,
    team: &TeamSummary,
    options: &RenderOptions,
    start_y: f32,
) -> f32 {
    let columns = team_columns(options);
    let header_size = if options.show_amounts { 8.0 } else { 10.0 };
    let name_width = columns[0].width - 2.0 * CELL_PAD;

    let mut y = doc.ensure_space(start_y, 10.0 + 2.0 * ROW_HEIGHT);
    doc.text_aligned(
        PAGE_WIDTH / 2.0,
        y,
        "Team Members Summary",
        TextStyle::new(14.0),
        Align::Center,
    );
    y += 8.0;
    draw_header_row(doc, &columns, y, header_size);
    y += ROW_HEIGHT;

    let body = TextStyle::new(10.0);
    for (index, row) in team.rows.iter().enumerate() {
        let next = doc.ensure_space(y, ROW_HEIGHT);
        if next != y {
            y = next;
            if options.repeat_table_header {
                draw_header_row(doc, &columns, y, header_size);
                y += ROW_HEIGHT;
            }
        }

        let fill = if index % 2 == 0 { Rgb::STRIPE } else { Rgb::WHITE };
        doc.fill_rect(MARGIN, y, TABLE_WIDTH, ROW_HEIGHT, fill);

        let mut cells = vec![
            (truncate_to_width(&row.worker, name_width, 10.0), body),
            (row.working_hours.to_string(), body),
            (row.adjusted_hours.to_string(), body),
        ];
        if options.show_amounts {
            let difference = row.difference();
            cells.push((row.adjusted_amount.currency(), body));
            cells.push((difference.currency(), body.color(signed_color(difference))));
        }
        draw_cells(doc, &columns, y + 5.0, &cells);
        y += ROW_HEIGHT;
    }

    y = doc.ensure_space(y + 2.0, ROW_HEIGHT);
    doc.fill_rect(MARGIN, y, TABLE_WIDTH, ROW_HEIGHT, Rgb::TOTALS);
    let mut totals = vec![
        ("Total Hours".to_string(), body),
        (team.working_hours().to_string(), body.color(Rgb::RED)),
        (team.adjusted_hours().to_string(), body.color(Rgb::GREEN)),
    ];
    if options.show_amounts {
        let difference = team.difference();
        totals.push((team.adjusted_amount().currency(), body));
        totals.push((difference.currency(), body.color(signed_color(difference))));
    }
    draw_cells(doc, &columns, y + 5.0, &totals);

    y + 20.0
}

/// Side-by-side hours and payable-amount tables for the selected projects.
/// The amount table is left out when amounts are hidden. Returns the y below
/// the tables.
pub fn projects_summary(
    doc: &mut DocumentBuilder,
    summary: &ProjectsSummary,
    options: &RenderOptions,
    start_y: f32,
) -> f32 {
    const GAP: f32 = 10.0;
    const PAD: f32 = 8.0;

    let mut y = doc.ensure_space(start_y, 15.0 + 2.0 * ROW_HEIGHT);
    doc.text_aligned(
        PAGE_WIDTH / 2.0,
        y + 5.0,
        "Projects Summary",
        TextStyle::new(14.0).color(Rgb::HEADER),
        Align::Center,
    );
    y += 15.0;

    let table_width = if options.show_amounts {
        (TABLE_WIDTH - GAP) / 2.0
    } else {
        TABLE_WIDTH
    };
    let amount_left = MARGIN + table_width + GAP;
    let hours_anchor = MARGIN + table_width - PAD;
    let amount_anchor = PAGE_WIDTH - MARGIN - PAD;
    let name_width = table_width - 2.0 * PAD - 25.0;

    let draw_header = |doc: &mut DocumentBuilder, y: f32| {
        let white = TextStyle::new(10.0).color(Rgb::WHITE);
        doc.fill_rect(MARGIN, y, table_width, ROW_HEIGHT, Rgb::HEADER);
        doc.text(MARGIN + PAD, y + 5.0, "Project Name", white);
        doc.text_aligned(hours_anchor, y + 5.0, "Hours", white, Align::Right);
        if options.show_amounts {
            doc.fill_rect(amount_left, y, table_width, ROW_HEIGHT, Rgb::HEADER);
            doc.text(amount_left + PAD, y + 5.0, "Project Name", white);
            doc.text_aligned(amount_anchor, y + 5.0, "Amount", white, Align::Right);
        }
    };

    draw_header(doc, y);
    y += ROW_HEIGHT;

    let body = TextStyle::new(10.0);
    for (index, row) in summary.rows.iter().enumerate() {
        let next = doc.ensure_space(y, ROW_HEIGHT);
        if next != y {
            y = next;
            if options.repeat_table_header {
                draw_header(doc, y);
                y += ROW_HEIGHT;
            }
        }

        let fill = if index % 2 == 0 { Rgb::STRIPE } else { Rgb::WHITE };
        let name = truncate_to_width(&row.project, name_width, 10.0);

        doc.fill_rect(MARGIN, y, table_width, ROW_HEIGHT, fill);
        doc.line(MARGIN, y, MARGIN + table_width, y, Rgb::RULE);
        doc.text(MARGIN + PAD, y + 5.0, &name, body);
        doc.text_aligned(hours_anchor, y + 5.0, &row.hours.to_string(), body, Align::Right);

        if options.show_amounts {
            doc.fill_rect(amount_left, y, table_width, ROW_HEIGHT, fill);
            doc.line(amount_left, y, PAGE_WIDTH - MARGIN, y, Rgb::RULE);
            doc.text(amount_left + PAD, y + 5.0, &name, body);
            doc.text_aligned(amount_anchor, y + 5.0, &row.payable().currency(), body, Align::Right);
        }
        y += ROW_HEIGHT;
    }

    y = doc.ensure_space(y, ROW_HEIGHT);
    doc.fill_rect(MARGIN, y, table_width, ROW_HEIGHT, Rgb::TOTALS);
    doc.text(MARGIN + PAD, y + 5.0, "Total Hours", body);
    doc.text_aligned(
        hours_anchor,
        y + 5.0,
        &summary.total_hours().to_string(),
        body,
        Align::Right,
    );
    if options.show_amounts {
        doc.fill_rect(amount_left, y, table_width, ROW_HEIGHT, Rgb::TOTALS);
        doc.text(amount_left + PAD, y + 5.0, "Total Payable", body.color(Rgb::BLACK));
        doc.text_aligned(
            amount_anchor,
            y + 5.0,
            &summary.total_payable().currency(),
            body.color(Rgb::GREEN),
            Align::Right,
        );
    }

    y + ROW_HEIGHT + 20.0
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::activity::ActivityRecord;
    use crate::domain::aggregate::aggregate;
    use crate::domain::money::Hours;
    use crate::domain::rates::RateTable;
    use rust_decimal_macros::dec;

    fn project_with(rows: usize) -> ProjectAggregate {
        let records: Vec<ActivityRecord> = (0..rows)
            .map(|i| ActivityRecord::new("P1", "Alice", format!("Task {i}"), Hours::new(dec!(1))))
            .collect();
        let rates: RateTable = [("Alice".to_string(), Money::new(dec!(10)))]
            .into_iter()
            .collect();
        aggregate(&records, &rates).remove("P1").unwrap()
    }

    #[test]
    fn test_subtotal_without_deduction() {
        let mut doc = DocumentBuilder::new("t");
        let project = project_with(2);
        project_detail(&mut doc, "P1", &project, Money::ZERO, &RenderOptions::default(), 20.0);
        let page = &doc.finish().pages[0];

        assert!(page.contains_text("Project: P1"));
        assert!(page.contains_text("Subtotal:"));
        assert!(page.contains_text("2.00 hours"));
        assert!(page.contains_text("$20.00"));
        assert!(!page.contains_text("Adjustment / Discount:"));
        assert!(!page.contains_text("Grand Total:"));
    }

    #[test]
    fn test_deduction_lines() {
        let mut doc = DocumentBuilder::new("t");
        let project = project_with(2);
        project_detail(
            &mut doc,
            "P1",
            &project,
            Money::new(dec!(5)),
            &RenderOptions::default(),
            20.0,
        );
        let page = &doc.finish().pages[0];

        assert!(page.contains_text("Adjustment / Discount:"));
        assert!(page.contains_text("-$5.00"));
        assert!(page.contains_text("Grand Total:"));
        assert!(page.contains_text("$15.00"));
    }

    #[test]
    fn test_hidden_amounts_and_activities() {
        let project = project_with(1);

        let mut doc = DocumentBuilder::new("t");
        let options = RenderOptions {
            show_amounts: false,
            ..RenderOptions::default()
        };
        project_detail(&mut doc, "P1", &project, Money::new(dec!(5)), &options, 20.0);
        let page = &doc.finish().pages[0];
        assert!(page.contains_text("Task 0"));
        assert!(!page.contains_text("Rate"));
        assert!(!page.contains_text("$"));

        let mut doc = DocumentBuilder::new("t");
        let options = RenderOptions {
            show_activities: false,
            ..RenderOptions::default()
        };
        project_detail(&mut doc, "P1", &project, Money::ZERO, &options, 20.0);
        let page = &doc.finish().pages[0];
        assert!(!page.contains_text("Task 0"));
        assert!(!page.contains_text("Activity"));
        assert!(page.contains_text("Subtotal:"));
    }

    #[test]
    fn test_long_tables_paginate() {
        let project = project_with(60);

        let mut doc = DocumentBuilder::new("t");
        project_detail(&mut doc, "P1", &project, Money::ZERO, &RenderOptions::default(), 20.0);
        let document = doc.finish();

        assert!(document.page_count() > 1);
        let headers = document
            .pages
            .iter()
            .filter(|p| p.texts().any(|t| t == "Activity"))
            .count();
        assert_eq!(headers, 1);
        assert!(!document.pages[0].contains_text("Task 59"));
        assert!(document.pages.iter().any(|p| p.contains_text("Task 59")));

        let mut doc = DocumentBuilder::new("t");
        let options = RenderOptions {
            repeat_table_header: true,
            ..RenderOptions::default()
        };
        project_detail(&mut doc, "P1", &project, Money::ZERO, &options, 20.0);
        let document = doc.finish();
        assert!(document.pages.iter().all(|p| p.texts().any(|t| t == "Activity")));
    }

    #[test]
    fn test_wrapped_activity_grows_row() {
        let mut project = project_with(1);
        project.activities[0].activity =
            "Investigated intermittent failures in the nightly export job and wrote up the findings for the team"
                .to_string();

        let full = project.activities[0].activity.clone();
        let mut doc = DocumentBuilder::new("t");
        let end = project_detail(&mut doc, "P1", &project, Money::ZERO, &RenderOptions::default(), 20.0);
        let document = doc.finish();
        let page = &document.pages[0];
        assert!(page.texts().any(|t| t.starts_with("Investigated")));
        assert!(page.texts().all(|t| t != full));
        assert!(page.contains_text("findings"));

        let mut doc = DocumentBuilder::new("t");
        let short = project_detail(&mut doc, "P1", &project_with(1), Money::ZERO, &RenderOptions::default(), 20.0);
        assert!(end > short);
    }

    #[test]
    fn test_team_summary_difference_colors() {
        let records = vec![
            ActivityRecord::new("P1", "Alice", "Coding", Hours::new(dec!(2))),
            ActivityRecord::new("P1", "Bob", "Review", Hours::new(dec!(4))),
        ];
        let rates: RateTable = [
            ("Alice".to_string(), Money::new(dec!(10))),
            ("Bob".to_string(), Money::new(dec!(10))),
        ]
        .into_iter()
        .collect();
        let mut adjustments = crate::domain::adjustment::Adjustments::new();
        adjustments.set_hours_override("Alice", Hours::new(dec!(3)));
        adjustments.set_hours_override("Bob", Hours::new(dec!(1)));
        let totals = aggregate(&records, &rates);
        let team = TeamSummary::build(&["P1"], &totals, &rates, &adjustments);

        let mut doc = DocumentBuilder::new("t");
        team_summary(&mut doc, &team, &RenderOptions::default(), 20.0);
        let document = doc.finish();

        let color_of = |needle: &str| {
            document.pages[0].ops.iter().find_map(|op| match op {
                crate::domain::document::DrawOp::Text { text, color, .. } if text == needle => {
                    Some(*color)
                }
                _ => None,
            })
        };
        assert_eq!(color_of("$10.00"), Some(Rgb::GREEN));
        assert_eq!(color_of("-$30.00"), Some(Rgb::RED));
        assert_eq!(color_of("Employee Name"), Some(Rgb::WHITE));
    }

    #[test]
    fn test_projects_summary_payable() {
        let project = project_with(3);
        let mut totals = crate::domain::aggregate::ProjectTotals::new();
        totals.insert("Website Redesign".to_string(), project);
        let mut adjustments = crate::domain::adjustment::Adjustments::new();
        adjustments.set_deduction("Website Redesign", Money::new(dec!(5)));
        let summary = ProjectsSummary::build(&["Website Redesign"], &totals, &adjustments);

        let mut doc = DocumentBuilder::new("t");
        projects_summary(&mut doc, &summary, &RenderOptions::default(), 20.0);
        let page = &doc.finish().pages[0];
        assert!(page.contains_text("Projects Summary"));
        assert!(page.contains_text("Total Payable"));
        assert!(page.contains_text("$25.00"));
        assert!(page.contains_text("3.00"));

        let mut doc = DocumentBuilder::new("t");
        let options = RenderOptions {
            show_amounts: false,
            ..RenderOptions::default()
        };
        projects_summary(&mut doc, &summary, &options, 20.0);
        let page = &doc.finish().pages[0];
        assert!(!page.contains_text("Total Payable"));
        assert!(page.contains_text("Total Hours"));
    }
}
