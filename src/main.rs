use clap::Parser;
use std::path::PathBuf;

use gridcheck::config::{self, Config, OutputFormat};
use gridcheck::pipeline::ValidationPipeline;
use gridcheck::{logging, report, rules};

/// gridcheck - Validate OpenBB Workspace widgets.json and apps.json
#[derive(Parser)]
#[command(name = "gridcheck")]
#[command(version)]
#[command(about = "gridcheck: checks OpenBB Workspace widget and dashboard documents")]
#[command(long_about = "\
------------------------------------------------------------
    Validates the widgets.json and apps.json of an OpenBB
    Workspace backend: widget fields, column formatters,
    grid geometry, layout overlaps and parameter groups.

    Exits 0 when no issues are found, 1 otherwise.
------------------------------------------------------------")]
struct Cli {
    /// App directory containing widgets.json and apps.json
    #[arg(default_value = ".")]
    app_dir: PathBuf,

    /// Path to widgets.json (overrides the app directory)
    #[arg(short, long)]
    widgets: Option<PathBuf>,

    /// Path to apps.json (overrides the app directory)
    #[arg(short, long)]
    apps: Option<PathBuf>,

    /// Fail when apps.json is missing
    #[arg(long)]
    require_apps: bool,

    /// Report format (text, json)
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// List the recognised widget types, column functions and group rules
    #[arg(short = 'L', long)]
    list_rules: bool,
}

fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging with specified level
    logging::init_logging(&cli.log_level);

    // Handle list rules command
    if cli.list_rules {
        print_rules();
        return;
    }

    // Load configuration, if one was given
    let config = match &cli.config {
        Some(path) => match config::load_config(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::error!("Failed to load config from '{}': {e:#}", path.display());
                std::process::exit(2);
            }
        },
        None => Config::default(),
    };

    // Validate configuration
    if let Err(e) = config::validate_config(&config) {
        tracing::error!("Configuration error: {e}");
        std::process::exit(2);
    }

    // A file argument means "the app that contains this file"
    let app_dir = if cli.app_dir.is_file() {
        cli.app_dir
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    } else {
        cli.app_dir.clone()
    };

    let defaults = ValidationPipeline::for_app_dir(&app_dir, &config.documents);
    let pipeline = ValidationPipeline::new(
        cli.widgets
            .unwrap_or_else(|| defaults.widgets_path().to_path_buf()),
        cli.apps.unwrap_or_else(|| defaults.apps_path().to_path_buf()),
    )
    .require_apps(cli.require_apps || config.documents.require_apps);

    let report = pipeline.run();

    let format = cli.format.unwrap_or(config.output.format);
    let rendered = match format {
        OutputFormat::Text => Ok(report::render_text(&report)),
        OutputFormat::Json => report::render_json(&report),
    };

    match rendered {
        Ok(out) => print!("{out}"),
        Err(e) => {
            tracing::error!("Failed to render report: {e}");
            std::process::exit(2);
        }
    }

    std::process::exit(report.exit_code());
}

fn print_rules() {
    println!("Widget types:      {}", rules::describe(rules::WIDGET_TYPES));
    println!("Parameter types:   {}", rules::describe(rules::PARAM_TYPES));
    println!("Cell data types:   {}", rules::describe(rules::CELL_DATA_TYPES));
    println!("Chart data types:  {}", rules::describe(rules::CHART_DATA_TYPES));
    println!("Sparkline types:   {}", rules::describe(rules::SPARKLINE_TYPES));
    println!("Formatter fns:     {}", rules::describe(rules::FORMATTER_FNS));
    println!("Render fns:        {}", rules::describe(rules::RENDER_FNS));
    println!("Group types:       {}", rules::describe(rules::GROUP_TYPES));
    println!("Group name:        {}", rules::GROUP_NAME_PATTERN);
    println!(
        "Widget size:       w {}..={}, h {}..={}",
        rules::WIDGET_WIDTH_RANGE.0,
        rules::WIDGET_WIDTH_RANGE.1,
        rules::WIDGET_HEIGHT_RANGE.0,
        rules::WIDGET_HEIGHT_RANGE.1
    );
    println!("Grid columns:      {}", rules::GRID_COLUMNS);
}
