use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use legend_rs::legend::{Legend, LegendEntry, Trigger};
use legend_rs::models::{LegendName, Series};
use legend_rs::viz::{self, ChartView, LegendPosition};
use legend_rs::{LegendOptions, MemoryChart, storage};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "legend",
    version,
    about = "Build chart legends, toggle series, and render the result"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print legend entries and the projected series as JSON.
    Inspect(LegendArgs),
    /// Render the projected chart with its legend to SVG.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct LegendArgs {
    /// Chart document (JSON with kind, labels, series).
    chart: PathBuf,
    /// Legend options file (JSON).
    #[arg(long)]
    options: Option<PathBuf>,
    /// Legend names separated by comma or semicolon; overrides the derived names.
    #[arg(long)]
    legend_names: Option<String>,
    /// Allow every entry to be switched off.
    #[arg(long, default_value_t = false)]
    remove_all: bool,
    /// Toggle the legend entry at this index (repeatable, applied in order).
    #[arg(short, long = "toggle")]
    toggles: Vec<usize>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    legend: LegendArgs,
    /// Output path (.svg).
    #[arg(long)]
    out: PathBuf,
    /// Legend placement: top, bottom, right or inside.
    #[arg(long)]
    position: Option<LegendPosition>,
    /// Width of the chart (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of the chart (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Locale for tick labels (en, de, fr, es, it, pt, nl).
    #[arg(long, default_value = "en")]
    locale: String,
    /// Chart title; defaults to the document's title.
    #[arg(long)]
    title: Option<String>,
}

#[derive(Serialize)]
struct Report<'a> {
    /// Container class of the legend.
    #[serde(skip_serializing_if = "Option::is_none")]
    class_name: Option<&'a str>,
    entries: &'a [LegendEntry],
    series: Vec<Series>,
    #[serde(skip_serializing_if = "Option::is_none")]
    labels: Option<Vec<String>>,
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Render(args) => cmd_render(args),
    }
}

/// Load chart + options, attach a legend and replay the requested toggles.
fn open_legend(args: &LegendArgs) -> Result<(Legend<MemoryChart>, Option<String>)> {
    let doc = storage::load_chart(&args.chart)?;
    let mut options = match &args.options {
        Some(path) => LegendOptions::from_path(path)?,
        None => LegendOptions::default(),
    };
    if let Some(names) = &args.legend_names {
        options.legend_names = Some(
            parse_list(names)
                .iter()
                .map(|n| LegendName::from(n.as_str()))
                .collect(),
        );
    }
    if args.remove_all {
        options.remove_all = true;
    }
    options
        .validate(doc.data.series.len())
        .with_context(|| format!("options do not fit {}", args.chart.display()))?;

    let title = doc.title.clone();
    let mut legend = Legend::attach(MemoryChart::from(doc), options);
    for &index in &args.toggles {
        let outcome = legend.toggle(index, Trigger::Programmatic)?;
        log::debug!("--toggle {index}: {outcome:?}");
    }
    Ok((legend, title))
}

fn cmd_inspect(args: LegendArgs) -> Result<()> {
    let (legend, _) = open_legend(&args)?;
    let projection = legend.projection();
    let report = Report {
        class_name: Some(legend.options().class_name.as_str()).filter(|c| !c.is_empty()),
        entries: legend.entries(),
        series: projection.series,
        labels: projection.labels,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let (legend, doc_title) = open_legend(&args.legend)?;
    let title = args.title.or(doc_title).unwrap_or_default();
    let position = args
        .position
        .unwrap_or_else(|| legend.options().position_for(legend.kind()));
    let view = ChartView::from_legend(&legend, &title);
    viz::plot_chart(&view, &args.out, args.width, args.height, &args.locale, position)?;
    eprintln!(
        "Wrote chart with {} of {} series to {}",
        view.series.len(),
        legend.metadata().len(),
        args.out.display()
    );
    Ok(())
}
