use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use trendgrid::data::load::pick_default_sheet;
use trendgrid::{
    ExclusionPattern, LogProgress, Palette, ReportConfig, Rgb8, RoleHints, load_dataset,
    preview_tiles, sheet_names,
};

#[derive(Parser, Debug)]
#[command(name = "trendgrid", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every entity into a paginated PDF.
    Report(ReportArgs),
    /// Render the first few tiles as PNGs.
    Preview(PreviewArgs),
    /// List the sheets of an input file.
    Sheets(SheetsArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input CSV, TSV or workbook.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Workbook sheet; defaults to the first sheet named like a table or `Sheet1`.
    #[arg(long)]
    sheet: Option<String>,

    /// JSON report config; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Entity (compound) column header.
    #[arg(long)]
    entity: Option<String>,

    /// Time column header.
    #[arg(long)]
    time: Option<String>,

    /// Value column header.
    #[arg(long)]
    value: Option<String>,

    /// Group column header.
    #[arg(long)]
    group: Option<String>,
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// Tiles per row (1-4).
    #[arg(long)]
    per_row: Option<usize>,

    /// Named color palette.
    #[arg(long)]
    palette: Option<Palette>,

    /// Explicit series color (`#RRGGBB`), repeatable; overrides the palette.
    #[arg(long = "color", value_parser = parse_color)]
    colors: Vec<Rgb8>,

    /// Line width in points (1.0-4.0).
    #[arg(long)]
    line_width: Option<f32>,

    /// Hide the chart legend.
    #[arg(long, default_value_t = false)]
    no_legend: bool,

    /// Font file for chart text.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Directory searched for the default CJK font files, repeatable.
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct ReportArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    style: StyleArgs,

    /// Substring marking entities to leave out, repeatable; replaces the default set.
    #[arg(long)]
    exclude: Vec<String>,

    /// Keep every entity, including totals.
    #[arg(long, default_value_t = false, conflicts_with = "exclude")]
    no_exclude: bool,

    /// First-page heading.
    #[arg(long)]
    title: Option<String>,

    /// Output PDF path.
    #[arg(long, default_value = "Trend_Report.pdf")]
    out: PathBuf,

    /// Also write the run summary as JSON.
    #[arg(long)]
    summary: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    style: StyleArgs,

    /// Number of tiles; defaults to the per-row count.
    #[arg(long)]
    count: Option<usize>,

    /// Directory for the PNGs.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct SheetsArgs {
    /// Input CSV, TSV or workbook.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Report(args) => cmd_report(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Sheets(args) => cmd_sheets(args),
    }
}

fn parse_color(s: &str) -> Result<Rgb8, String> {
    Rgb8::parse_hex(s).map_err(|e| e.to_string())
}

/// Config file (if any) overlaid with the command-line flags.
fn layered_config(input: &InputArgs, style: &StyleArgs) -> anyhow::Result<ReportConfig> {
    let base = match &input.config {
        Some(path) => ReportConfig::from_path(path)?,
        None => ReportConfig::default(),
    };
    let flags = ReportConfig {
        sheet: input.sheet.clone(),
        columns: RoleHints {
            entity: input.entity.clone(),
            time: input.time.clone(),
            value: input.value.clone(),
            group: input.group.clone(),
        },
        per_row: style.per_row,
        palette: style.palette,
        colors: (!style.colors.is_empty()).then(|| style.colors.clone()),
        line_width: style.line_width,
        show_legend: style.no_legend.then_some(false),
        font: style.font.clone(),
        font_dirs: style.font_dirs.clone(),
        ..ReportConfig::default()
    };
    Ok(base.merged(flags))
}

fn cmd_report(args: ReportArgs) -> anyhow::Result<()> {
    let mut cfg = layered_config(&args.input, &args.style)?;
    if args.no_exclude {
        cfg.exclude = Some(ExclusionPattern::none());
    } else if !args.exclude.is_empty() {
        cfg.exclude = Some(ExclusionPattern::new(args.exclude.iter()));
    }
    if let Some(title) = args.title {
        cfg.title = Some(title);
    }

    let style = cfg.style()?;
    let (dataset, _roles) =
        load_dataset(&args.input.in_path, cfg.sheet.as_deref(), &cfg.columns)?;
    let output = cfg.job().run(&dataset, &style, &mut LogProgress)?;

    ensure_parent(&args.out)?;
    std::fs::write(&args.out, &output.bytes)
        .with_context(|| format!("write pdf '{}'", args.out.display()))?;
    if let Some(path) = &args.summary {
        ensure_parent(path)?;
        let json = serde_json::to_vec_pretty(&output.summary).context("encode summary JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("write summary '{}'", path.display()))?;
    }

    eprintln!(
        "wrote {} ({} pages, {} tiles)",
        args.out.display(),
        output.summary.pages,
        output.summary.tiles.len()
    );
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let cfg = layered_config(&args.input, &args.style)?;
    let style = cfg.style()?;
    let count = args.count.unwrap_or_else(|| cfg.job().per_row);
    let (dataset, _roles) =
        load_dataset(&args.input.in_path, cfg.sheet.as_deref(), &cfg.columns)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    let tiles = preview_tiles(&dataset, count, &style, &args.out_dir)?;
    for tile in &tiles {
        eprintln!("wrote {} ({})", tile.path.display(), tile.entity);
    }
    Ok(())
}

fn cmd_sheets(args: SheetsArgs) -> anyhow::Result<()> {
    let names = sheet_names(&args.in_path)?;
    let default = pick_default_sheet(&names).map(str::to_string);
    for name in &names {
        let marker = if default.as_deref() == Some(name.as_str()) {
            " (default)"
        } else {
            ""
        };
        println!("{name}{marker}");
    }
    Ok(())
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
