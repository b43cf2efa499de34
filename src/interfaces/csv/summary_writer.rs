use crate::domain::summary::{ProjectsSummary, TeamSummary};
use crate::error::Result;
use std::io::Write;

/// Writes invoice totals as CSV, one table after the other.
pub struct SummaryWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> SummaryWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .flexible(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(sink);
        Self { writer }
    }

    /// `project,hours,amount,deduction,payable` per selected project.
    pub fn write_projects(&mut self, summary: &ProjectsSummary) -> Result<()> {
        self.writer
            .write_record(["project", "hours", "amount", "deduction", "payable"])?;
        for row in &summary.rows {
            self.writer.write_record([
                row.project.clone(),
                row.hours.to_string(),
                row.amount.to_string(),
                row.deduction.to_string(),
                row.payable().to_string(),
            ])?;
        }
        self.writer.write_record([
            "total".to_string(),
            summary.total_hours().to_string(),
            String::new(),
            String::new(),
            summary.total_payable().to_string(),
        ])?;
        self.writer.flush()?;
        Ok(())
    }

    /// `worker,hours,adjusted_hours,amount,adjusted_amount,difference`.
    pub fn write_team(&mut self, team: &TeamSummary) -> Result<()> {
        self.writer.write_record([
            "worker",
            "hours",
            "adjusted_hours",
            "amount",
            "adjusted_amount",
            "difference",
        ])?;
        for row in &team.rows {
            self.writer.write_record([
                row.worker.clone(),
                row.working_hours.to_string(),
                row.adjusted_hours.to_string(),
                row.amount.to_string(),
                row.adjusted_amount.to_string(),
                row.difference().to_string(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
