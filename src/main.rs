// Entry point and CLI flow.
//
// One invocation is one pass through the pipeline: load the CSV (or the
// bundled demo data), apply the filter selection, compute metrics, then
// emit a console summary, an HTML dashboard or a CSV re-export.
mod charts;
mod filter;
mod loader;
mod metrics;
mod output;
mod report;
mod types;
mod util;

use anyhow::{bail, Context, Result};
use charts::Period;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use filter::FilterContext;
use metrics::MetricsSnapshot;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use types::{CompanyRow, PeriodRow, RecordRow, StatusRow, Table};
use util::format_int;

const SAMPLE_DATA: &str = include_str!("../data/sample_data.csv");

#[derive(Parser)]
#[command(name = "basvuru")]
#[command(about = "Job-application CSV analytics: metrics, charts and an HTML dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a console overview of the current view
    Summary {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        filters: FilterArgs,
        /// Granularity of the activity table
        #[arg(long, value_enum, default_value_t = Period::Weekly)]
        period: Period,
        /// Rows shown in the record excerpt
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Also write the metrics snapshot as JSON to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Write the standalone HTML dashboard
    Report {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        filters: FilterArgs,
        /// Output path (default: basvuru_dashboard_<YYYYMMDD_HHMMSS>.html)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Re-export the current view as CSV
    Export {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        filters: FilterArgs,
        /// Output path (default: basvuru_analiz_<YYYYMMDD>.csv)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct InputArgs {
    /// CSV file to analyze
    #[arg(long, conflicts_with = "demo")]
    input: Option<PathBuf>,

    /// Use the bundled sample dataset instead of a file
    #[arg(long)]
    demo: bool,
}

#[derive(Args)]
struct FilterArgs {
    /// Keep records on or after this date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Keep records on or before this date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Keep only these status labels (repeatable)
    #[arg(long)]
    status: Vec<String>,

    /// Keep only this company
    #[arg(long)]
    company: Option<String>,
}

impl FilterArgs {
    fn to_context(&self) -> FilterContext {
        FilterContext {
            from: self.from,
            to: self.to,
            statuses: self.status.clone(),
            company: self.company.clone(),
        }
    }
}

fn load(input: &InputArgs) -> Result<Table> {
    let (table, report) = if input.demo {
        println!("Using the bundled demo dataset.");
        loader::load_from_reader(SAMPLE_DATA.as_bytes()).context("failed to load demo data")?
    } else {
        let Some(path) = &input.input else {
            bail!("provide --input <FILE> or --demo");
        };
        loader::load_from_path(path)
            .with_context(|| format!("failed to load {}", path.display()))?
    };

    println!(
        "Processing dataset... ({} rows read, {} loaded)",
        format_int(report.total_rows as i64),
        format_int(report.loaded_rows as i64)
    );
    if report.dropped_dates > 0 {
        println!(
            "Note: {} rows dropped due to unparseable dates.",
            format_int(report.dropped_dates as i64)
        );
    }
    println!();
    Ok(table)
}

fn run_summary(
    input: &InputArgs,
    filters: &FilterArgs,
    period: Period,
    limit: usize,
    json: Option<&PathBuf>,
) -> Result<()> {
    let table = load(input)?;
    let view = filters.to_context().apply(&table);
    let metrics = MetricsSnapshot::compute(&view);

    println!("Overview");
    println!("  Total applications:  {}", format_int(metrics.total as i64));
    println!(
        "  Distinct companies:  {}",
        format_int(metrics.unique_companies as i64)
    );
    println!("  Applied:             {}", format_int(metrics.applied as i64));
    println!("  Under review:        {}", format_int(metrics.under_review as i64));
    println!("  Interview invites:   {}", format_int(metrics.interview as i64));
    println!("  Rejected:            {}", format_int(metrics.rejected as i64));
    println!();
    println!("Rates");
    println!("  Rejection rate:  {:.1}%", metrics.rejection_rate);
    println!("  Response rate:   {:.1}%", metrics.response_rate);
    println!("  Interview rate:  {:.1}%", metrics.interview_rate);
    println!();

    if view.columns.company {
        let rows: Vec<CompanyRow> =
            charts::frequency_ranking(view.records.iter().filter_map(|r| r.company.as_deref()))
                .into_iter()
                .enumerate()
                .map(|(i, (company, applications))| CompanyRow {
                    rank: i + 1,
                    company,
                    applications,
                })
                .collect();
        println!("Top Companies");
        output::preview_table(&rows, 10);
    }

    if view.columns.status && !view.is_empty() {
        let total = view.len() as f64;
        let rows: Vec<StatusRow> = charts::frequency_ranking(
            view.records
                .iter()
                .filter_map(|r| r.status.as_ref().map(|s| s.label())),
        )
        .into_iter()
        .map(|(status, count)| StatusRow {
            status,
            count,
            share: format!("{:.1}%", count as f64 / total * 100.0),
        })
        .collect();
        println!("Status Distribution");
        output::preview_table(&rows, rows.len());
    }

    if view.columns.date {
        let rows: Vec<PeriodRow> = charts::period_counts(&view, period)
            .into_iter()
            .map(|(period, applications)| PeriodRow {
                period,
                applications,
            })
            .collect();
        println!("Application Activity");
        output::preview_table(&rows, rows.len());
    }

    let rows: Vec<RecordRow> = view
        .records
        .iter()
        .map(|r| RecordRow {
            date: r
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            company: r.company.clone().unwrap_or_default(),
            position: r.position.clone().unwrap_or_default(),
            status: r.status.as_ref().map(|s| s.label().to_string()).unwrap_or_default(),
        })
        .collect();
    println!("Latest Applications");
    output::preview_table(&rows, limit);

    if let Some(path) = json {
        output::write_metrics_json(path, &metrics)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Metrics written to {}", path.display());
        info!(path = %path.display(), "metrics snapshot written");
    }
    Ok(())
}

fn run_report(input: &InputArgs, filters: &FilterArgs, output: Option<&PathBuf>) -> Result<()> {
    let table = load(input)?;
    let view = filters.to_context().apply(&table);
    let metrics = MetricsSnapshot::compute(&view);

    let now = Local::now();
    let path = output
        .cloned()
        .unwrap_or_else(|| PathBuf::from(output::dashboard_file_name(now)));
    let html = report::render_dashboard(&view, &metrics, now);
    std::fs::write(&path, html).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Dashboard written to {}", path.display());
    info!(path = %path.display(), records = view.len(), "dashboard written");
    Ok(())
}

fn run_export(input: &InputArgs, filters: &FilterArgs, output: Option<&PathBuf>) -> Result<()> {
    let table = load(input)?;
    let view = filters.to_context().apply(&table);

    let path = output
        .cloned()
        .unwrap_or_else(|| PathBuf::from(output::export_file_name(Local::now())));
    output::export_csv(&path, &view)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!(
        "Exported {} records to {}",
        format_int(view.len() as i64),
        path.display()
    );
    info!(path = %path.display(), records = view.len(), "view exported");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Summary {
            input,
            filters,
            period,
            limit,
            json,
        } => run_summary(input, filters, *period, *limit, json.as_ref()),
        Commands::Report {
            input,
            filters,
            output,
        } => run_report(input, filters, output.as_ref()),
        Commands::Export {
            input,
            filters,
            output,
        } => run_export(input, filters, output.as_ref()),
    }
}
