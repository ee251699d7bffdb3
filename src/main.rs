use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use prodreport::api::{endpoints, ApiClient};
use prodreport::config::{config_dir, load_config, resolve_output_dir, Config, CONFIG_TEMPLATE};
use prodreport::error::{ReportError, Result};
use prodreport::metrics::MetricsBundle;
use prodreport::report::{
    artifact_name, build_report, csv, render_preview, Category, FilterSelection, RangeSpec,
    ReportDocument, ReportKind, StatusFilter,
};
use prodreport::views::{
    load_dashboard, load_production_status, load_sales, render_dashboard,
    render_production_status, render_sales,
};

#[derive(Parser)]
#[command(name = "prodreport")]
#[command(
    version,
    about = "Production dashboards and report exports for furniture production",
    long_about = None
)]
struct Cli {
    /// Path to config directory (default: XDG config dir)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config.toml
    Init,

    /// Show the active configuration
    Status,

    /// Build a production report and export it as CSV, JSON or a preview
    Report {
        /// Report type: performance, workprogress or comprehensive
        #[arg(short = 't', long = "type", default_value = "performance")]
        kind: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// Read the metrics bundle from a JSON file instead of the API
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Output file or directory (default: configured output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Download the server-rendered PDF report
    Pdf {
        /// Report type: performance, workprogress or comprehensive
        #[arg(short = 't', long = "type", default_value = "performance")]
        kind: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// Output file or directory (default: configured output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show production KPIs, stage breakdown and orders due soon
    Dashboard,

    /// Show sales analytics
    Sales,

    /// Show the production status of one order
    Track {
        /// Order ID
        order_id: i64,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// Report period start (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,

    /// Report period end (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,

    /// Report period ending today, e.g. 30d, 4w, 6m
    #[arg(long, conflicts_with_all = ["from", "to"])]
    last: Option<String>,

    /// Product line: all, alkansya or made_to_order
    #[arg(long, default_value = "all")]
    category: String,

    /// Made-to-order status: all, in_progress, completed or pending
    #[arg(long, default_value = "all")]
    status: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
    Preview,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Status => cmd_status(&cfg_dir),
        Commands::Report {
            kind,
            filters,
            input,
            format,
            output,
        } => cmd_report(&cfg_dir, &kind, &filters, input, format, output),
        Commands::Pdf {
            kind,
            filters,
            output,
        } => cmd_pdf(&cfg_dir, &kind, &filters, output),
        Commands::Dashboard => cmd_dashboard(&cfg_dir),
        Commands::Sales => cmd_sales(&cfg_dir),
        Commands::Track { order_id } => cmd_track(&cfg_dir, order_id),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    if cfg_dir.exists() {
        return Err(ReportError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    println!("Initialized prodreport config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Point it at your backend:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Set an API token in config.toml or export PRODREPORT_TOKEN");
    println!();
    println!("Then generate your first report:");
    println!("  prodreport report --type performance --last 30d");

    Ok(())
}

/// Show the active configuration
fn cmd_status(cfg_dir: &Path) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let output_dir = resolve_output_dir(&config.report.output_dir, cfg_dir);

    println!("prodreport status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    println!("API base URL:     {}", config.api.base_url);
    println!(
        "API token:        {}",
        if config.api.token.trim().is_empty() {
            "not set"
        } else {
            "set"
        }
    );
    println!("Timeout:          {}s", config.api.timeout_secs);
    println!("Output directory: {}", output_dir.display());
    println!(
        "Default range:    last {} {:?}",
        config.report.default_range_count, config.report.default_range_unit
    );
    println!("Deadline:         {} days after acceptance", config.rules.deadline_days);
    println!(
        "Missing acceptance status counts as pending: {}",
        config.rules.missing_acceptance_is_pending
    );

    Ok(())
}

fn parse_date_arg(flag: &'static str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    value
        .map(|s| {
            NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
                ReportError::InvalidArgument {
                    flag,
                    value: s.to_string(),
                    reason: "expected YYYY-MM-DD".to_string(),
                }
            })
        })
        .transpose()
}

fn parse_kind(value: &str) -> Result<ReportKind> {
    ReportKind::parse(value).ok_or_else(|| ReportError::InvalidArgument {
        flag: "--type",
        value: value.to_string(),
        reason: "use performance, workprogress or comprehensive".to_string(),
    })
}

/// Turn CLI filter flags into a resolved selection.
fn build_filters(args: &FilterArgs, config: &Config) -> Result<FilterSelection> {
    let category = Category::parse(&args.category).ok_or_else(|| ReportError::InvalidArgument {
        flag: "--category",
        value: args.category.clone(),
        reason: "use all, alkansya or made_to_order".to_string(),
    })?;
    let status = StatusFilter::parse(&args.status).ok_or_else(|| ReportError::InvalidArgument {
        flag: "--status",
        value: args.status.clone(),
        reason: "use all, in_progress, completed or pending".to_string(),
    })?;

    let spec = match args.last.as_deref() {
        Some(last) => RangeSpec::parse_last(last).ok_or_else(|| ReportError::InvalidArgument {
            flag: "--last",
            value: last.to_string(),
            reason: "expected a count and unit, e.g. 30d, 4w or 6m".to_string(),
        })?,
        None => {
            let start = parse_date_arg("--from", args.from.as_deref())?;
            let end = parse_date_arg("--to", args.to.as_deref())?;
            if start.is_some() != end.is_some() {
                tracing::warn!("custom range needs both --from and --to, using the default range");
            }
            RangeSpec::Custom { start, end }
        }
    };

    let today = Local::now().date_naive();
    let date_range = spec.resolve(
        today,
        (
            config.report.default_range_count,
            config.report.default_range_unit,
        ),
    );
    if date_range.start > date_range.end {
        return Err(ReportError::InvalidArgument {
            flag: "--from",
            value: date_range.start.to_string(),
            reason: format!("start is after end ({})", date_range.end),
        });
    }

    Ok(FilterSelection {
        date_range,
        category,
        status,
    })
}

/// Where to write an artifact: `--output` (a file, or a directory to put
/// `file_name` in) or the configured output directory.
fn artifact_path(
    output: Option<PathBuf>,
    config: &Config,
    cfg_dir: &Path,
    file_name: &str,
) -> Result<PathBuf> {
    match output {
        Some(path) if path.is_dir() => Ok(path.join(file_name)),
        Some(path) => Ok(path),
        None => {
            let dir = resolve_output_dir(&config.report.output_dir, cfg_dir);
            fs::create_dir_all(&dir)?;
            Ok(dir.join(file_name))
        }
    }
}

fn load_bundle(
    input: Option<PathBuf>,
    config: &Config,
    filters: &FilterSelection,
) -> Result<MetricsBundle> {
    if let Some(path) = input {
        return MetricsBundle::load(&path);
    }

    let client = ApiClient::new(&config.api);
    let (bundle, degraded) = client.fetch_metrics_bundle(filters);
    if !degraded.is_empty() {
        eprintln!(
            "Warning: no data from {}; those sections show zeros.",
            degraded.join(", ")
        );
    }
    Ok(bundle)
}

/// Build a report and write it out
fn cmd_report(
    cfg_dir: &Path,
    kind: &str,
    filter_args: &FilterArgs,
    input: Option<PathBuf>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let kind = parse_kind(kind)?;
    let filters = build_filters(filter_args, &config)?;
    let bundle = load_bundle(input, &config, &filters)?;

    let doc = build_report(&bundle, &filters, kind, &config.rules);

    match format {
        OutputFormat::Preview => {
            print!("{}", render_preview(&doc));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&doc)?;
            if output.is_some() {
                let file_name = doc.file_name(&filters.date_range, "json");
                let path = artifact_path(output, &config, cfg_dir, &file_name)?;
                fs::write(&path, json)?;
                print_summary(&doc, &path);
            } else {
                println!("{json}");
            }
        }
        OutputFormat::Csv => {
            let content = csv::to_csv_with_timestamp(&doc, Local::now().naive_local())?;
            let file_name = doc.file_name(&filters.date_range, "csv");
            let path = artifact_path(output, &config, cfg_dir, &file_name)?;
            fs::write(&path, content)?;
            print_summary(&doc, &path);
        }
    }

    Ok(())
}

fn print_summary(doc: &ReportDocument, path: &Path) {
    println!("Generated {}", doc.title);
    println!("  Sections: {}", doc.sections.len());
    println!("  Saved:    {}", path.display());
}

/// Download the backend-rendered PDF
fn cmd_pdf(
    cfg_dir: &Path,
    kind: &str,
    filter_args: &FilterArgs,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let kind = parse_kind(kind)?;
    let filters = build_filters(filter_args, &config)?;

    let mut params = vec![("report_type", kind.as_param().to_string())];
    params.extend(filters.query_params());

    let client = ApiClient::new(&config.api);
    let bytes = client.download(endpoints::PRODUCTION_REPORT_PDF, &params)?;
    if !bytes.starts_with(b"%PDF") {
        return Err(ReportError::Download {
            endpoint: endpoints::PRODUCTION_REPORT_PDF.to_string(),
            reason: "response is not a PDF document".to_string(),
        });
    }

    let file_name = artifact_name(kind.title(), &filters.date_range, "pdf");
    let path = artifact_path(output, &config, cfg_dir, &file_name)?;

    // Never leave a half-written PDF behind
    let partial = path.with_extension("pdf.part");
    if let Err(e) = fs::write(&partial, &bytes).and_then(|_| fs::rename(&partial, &path)) {
        let _ = fs::remove_file(&partial);
        return Err(e.into());
    }

    println!("Downloaded {}", kind.title());
    println!("  Size:  {} bytes", bytes.len());
    println!("  Saved: {}", path.display());
    Ok(())
}

fn cmd_dashboard(cfg_dir: &Path) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let client = ApiClient::new(&config.api);
    let dashboard = load_dashboard(&client, &config.rules, Local::now().date_naive())?;
    print!("{}", render_dashboard(&dashboard));
    Ok(())
}

fn cmd_sales(cfg_dir: &Path) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let client = ApiClient::new(&config.api);
    let sales = load_sales(&client)?;
    print!("{}", render_sales(&sales, &config.report.currency_symbol));
    Ok(())
}

fn cmd_track(cfg_dir: &Path, order_id: i64) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let client = ApiClient::new(&config.api);
    let status = load_production_status(&client, order_id)?;
    print!("{}", render_production_status(&status));
    Ok(())
}
