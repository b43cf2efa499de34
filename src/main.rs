use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use timesheet_invoicer::application::converter::{DEFAULT_SOURCE, convert};
use timesheet_invoicer::application::invoice::InvoiceRequest;
use timesheet_invoicer::application::loader::{load_activities, read_all};
use timesheet_invoicer::application::settings::{InvoiceSettings, Overrides, parse_assignment};
use timesheet_invoicer::domain::month::InvoiceMonth;
use timesheet_invoicer::domain::ports::CsvSourceRef;
use timesheet_invoicer::infrastructure::OutputFormat;
use timesheet_invoicer::infrastructure::archive::zip_bundle;
use timesheet_invoicer::infrastructure::file_source::FileSource;
use timesheet_invoicer::interfaces::csv::summary_writer::SummaryWriter;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render PDF invoices from time-tracking CSV exports
    Invoice(InvoiceArgs),
    /// Print project and team totals as CSV
    Summary(DataArgs),
    /// Print the rate table seeded from the data as JSON
    Rates(DataArgs),
    /// Convert a TopTracker export into a zip of per-worker CSV files
    Convert(ConvertArgs),
}

#[derive(Args)]
struct DataArgs {
    /// Input CSV files (project, worker, activity, <unused>, hours)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// JSON settings file with client, payee, rates and adjustments
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Billing month, yyyy-MM
    #[arg(long)]
    month: Option<InvoiceMonth>,

    /// Project to include; repeat for several. Defaults to every project
    #[arg(long = "project")]
    projects: Vec<String>,

    /// Hourly rate, NAME=RATE
    #[arg(long = "rate", value_parser = parse_assignment)]
    rates: Vec<(String, String)>,

    /// Flat project deduction, PROJECT=AMOUNT
    #[arg(long = "deduct", value_parser = parse_assignment)]
    deductions: Vec<(String, String)>,

    /// Hours override for a worker across the selected projects, WORKER=HOURS
    #[arg(long = "hours", value_parser = parse_assignment)]
    hours: Vec<(String, String)>,
}

impl DataArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            month: self.month,
            rates: self.rates.clone(),
            deductions: self.deductions.clone(),
            hours: self.hours.clone(),
            projects: self.projects.clone(),
        }
    }

    fn settings(&self) -> Result<InvoiceSettings> {
        match &self.settings {
            Some(path) => InvoiceSettings::load(path).into_diagnostic(),
            None => Ok(InvoiceSettings::default()),
        }
    }

    fn sources(&self) -> Vec<CsvSourceRef> {
        self.inputs
            .iter()
            .map(|path| Arc::new(FileSource::new(path)) as CsvSourceRef)
            .collect()
    }

    async fn request(&self) -> Result<InvoiceRequest> {
        let settings = self.settings()?;
        let parsed = load_activities(&self.sources()).await?;
        Ok(settings.into_request(parsed, &self.overrides())?)
    }
}

#[derive(Args)]
struct InvoiceArgs {
    #[command(flatten)]
    data: DataArgs,

    /// One invoice covering every selected project
    #[arg(long)]
    combined: bool,

    #[arg(long)]
    hide_activities: bool,

    #[arg(long)]
    hide_amounts: bool,

    #[arg(long)]
    hide_team_summary: bool,

    /// Repeat table headers on continuation pages
    #[arg(long)]
    repeat_header: bool,

    #[arg(long, value_enum, default_value = "pdf")]
    format: OutputFormat,

    /// Directory the invoices are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Args)]
struct ConvertArgs {
    /// TopTracker CSV export
    input: PathBuf,

    /// Billing period appended to project names, e.g. "January 2025"
    #[arg(long)]
    period: String,

    /// Name of the tracking tool, used in the archive label
    #[arg(long, default_value = DEFAULT_SOURCE)]
    source: String,

    /// Directory the archive is written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(io::stderr)
        .init();
}

fn write_output(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<()> {
    std::fs::create_dir_all(dir).into_diagnostic()?;
    let path = dir.join(file_name);
    std::fs::write(&path, bytes).into_diagnostic()?;
    info!(path = %path.display(), "Wrote file");
    Ok(())
}

async fn run_invoice(args: InvoiceArgs) -> Result<()> {
    let mut request = args.data.request().await?;
    let options = &mut request.options;
    options.show_activities &= !args.hide_activities;
    options.show_amounts &= !args.hide_amounts;
    options.show_team_summary &= !args.hide_team_summary;
    options.repeat_table_header |= args.repeat_header;

    let encoder = args.format.encoder();
    let artifacts = request.generate(args.combined, encoder.as_ref())?;
    for artifact in &artifacts {
        write_output(&args.out_dir, &artifact.file_name, &artifact.bytes)?;
    }
    Ok(())
}

async fn run_summary(args: DataArgs) -> Result<()> {
    let request = args.request().await?;
    let projects = request.projects_summary()?;
    let team = request.team_summary()?;

    let stdout = io::stdout();
    let mut writer = SummaryWriter::new(stdout.lock());
    writer.write_projects(&projects)?;
    writer.write_team(&team)?;
    Ok(())
}

async fn run_rates(args: DataArgs) -> Result<()> {
    let request = args.request().await?;
    let json = serde_json::to_string_pretty(&request.rates).into_diagnostic()?;
    println!("{json}");
    Ok(())
}

async fn run_convert(args: ConvertArgs) -> Result<()> {
    let source: CsvSourceRef = Arc::new(FileSource::new(&args.input));
    let texts = read_all(&[source]).await?;
    let text = texts.into_iter().map(|(_, text)| text).collect::<String>();

    let bundle = convert(&text, &args.source, &args.period)?;
    let archive = zip_bundle(&bundle)?;
    write_output(&args.out_dir, &bundle.archive_name(), &archive)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Invoice(args) => run_invoice(args).await,
        Command::Summary(args) => run_summary(args).await,
        Command::Rates(args) => run_rates(args).await,
        Command::Convert(args) => run_convert(args).await,
    }
}
