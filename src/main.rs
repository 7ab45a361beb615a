//! report-pdf CLI - render inspection reports and invoices from JSON data

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use report_pdf::layout::{LayoutOptions, Margins, PageGeometry, A4, LETTER};
use report_pdf::reports::{Inspection, Invoice, LabelSet};
use report_pdf::{render_report, Mm, RenderOptions, Report};

#[derive(Parser)]
#[command(name = "report-pdf")]
#[command(version)]
#[command(about = "Render inspection reports and invoices to PDF", long_about = None)]
struct Cli {
    /// What kind of document the input describes
    #[arg(value_enum)]
    kind: Kind,

    /// JSON file with the report data
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Directory to write the PDF into
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// TrueType / OpenType font to set the report in, instead of Helvetica
    #[arg(long, value_name = "TTF")]
    font: Option<PathBuf>,

    /// Bold companion to --font
    #[arg(long, value_name = "TTF", requires = "font")]
    bold_font: Option<PathBuf>,

    /// Show Arabic labels alongside the English headings
    #[arg(long)]
    bilingual: bool,

    #[arg(long, value_enum, default_value = "a4")]
    page_size: PaperSize,

    /// Author recorded in the document metadata
    #[arg(long, value_name = "NAME")]
    author: Option<String>,

    /// More logging (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, ValueEnum)]
enum Kind {
    Inspection,
    Invoice,
}

#[derive(Copy, Clone, ValueEnum)]
enum PaperSize {
    A4,
    Letter,
}

fn read_font(path: Option<&Path>) -> Result<Option<Vec<u8>>> {
    path.map(|path| fs::read(path).with_context(|| format!("failed to read font {}", path.display())))
        .transpose()
}

fn build_report(kind: Kind, input: &Path, labels: &LabelSet) -> Result<Report> {
    let data = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let report = match kind {
        Kind::Inspection => {
            let mut inspection: Inspection = serde_json::from_str(&data)
                .with_context(|| format!("{} is not valid inspection data", input.display()))?;
            if let Some(base) = input.parent() {
                inspection.resolve_photos(base);
            }
            inspection.to_report(labels)
        }
        Kind::Invoice => {
            let invoice: Invoice = serde_json::from_str(&data)
                .with_context(|| format!("{} is not valid invoice data", input.display()))?;
            invoice.to_report(labels)
        }
    };
    Ok(report)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let labels = if cli.bilingual {
        if cli.font.is_none() {
            log::warn!("bilingual labels need --font with Arabic coverage, Helvetica will show '?'");
        }
        LabelSet::bilingual()
    } else {
        LabelSet::english()
    };

    let report = build_report(cli.kind, &cli.input, &labels)?;

    let size = match cli.page_size {
        PaperSize::A4 => A4,
        PaperSize::Letter => LETTER,
    };
    let layout = LayoutOptions::default().with_geometry(PageGeometry::new(size, Margins::all(Mm(20.0))));
    let mut options = RenderOptions::default().with_layout(layout);
    if let Some(font) = read_font(cli.font.as_deref())? {
        options = options.with_font(font, read_font(cli.bold_font.as_deref())?);
    }
    if let Some(author) = cli.author {
        options = options.with_author(author);
    }

    let rendered = render_report(&report, &options).context("failed to render report")?;

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    let path = cli.output.join(&rendered.filename);
    fs::write(&path, &rendered.bytes).with_context(|| format!("failed to write {}", path.display()))?;

    println!("{} ({} pages)", path.display(), rendered.page_count);
    Ok(())
}
