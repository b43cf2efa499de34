#![allow(dead_code)]

use rand::Rng;
use rand::seq::SliceRandom;
use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const HEADER: [&str; 5] = ["project", "workers", "activity", "duration", "upwork_hours"];

pub const PROJECTS: [&str; 3] = ["Website Redesign", "Mobile App", "Data Platform"];
pub const WORKERS: [&str; 4] = ["Alice", "Bob", "Carol", "Dave"];

/// Writes the header and the given rows, unquoted.
pub fn write_activity_csv(path: &Path, rows: &[[&str; 5]]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(file);

    wtr.write_record(HEADER)?;
    for row in rows {
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// `rows` random activities of half an hour each, spread over
/// [`PROJECTS`] and [`WORKERS`].
pub fn generate_activity_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    let mut rng = rand::thread_rng();

    wtr.write_record(HEADER)?;

    for i in 1..=rows {
        let project = PROJECTS.choose(&mut rng).copied().unwrap_or(PROJECTS[0]);
        let worker = WORKERS.choose(&mut rng).copied().unwrap_or(WORKERS[0]);
        let minutes: u32 = rng.gen_range(1..600);
        let activity = format!("Task {i}");
        let duration = format!("{minutes}m");
        wtr.write_record([project, worker, activity.as_str(), duration.as_str(), "0.5"])?;
    }

    wtr.flush()?;
    Ok(())
}

/// A TopTracker style export with a recognisable header.
pub fn write_toptal_csv(path: &Path, rows: &[[&str; 4]]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(file);

    wtr.write_record(["Project", "Worker", "Activity", "Duration"])?;
    for row in rows {
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    Ok(())
}
