use crate::document::Document;
use crate::font::Font;
use crate::format::report_filename;
use crate::info::Info;
use crate::layout::{compose, LayoutOptions, Typography};
use crate::model::Report;
use crate::ReportError;
use chrono::{DateTime, Local};
use std::time::Instant;

/// Everything about a render that isn't the report itself
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub layout: LayoutOptions,
    /// Raw TrueType / OpenType data to set the report in instead of Helvetica
    pub font: Option<Vec<u8>>,
    /// Bold companion to `font`
    pub bold_font: Option<Vec<u8>>,
    pub author: Option<String>,
    /// Pin the document creation date, mostly for reproducible output
    pub created: Option<DateTime<Local>>,
}

impl RenderOptions {
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_font(mut self, regular: Vec<u8>, bold: Option<Vec<u8>>) -> Self {
        self.font = Some(regular);
        self.bold_font = bold;
        self
    }

    pub fn with_author<S: ToString>(mut self, author: S) -> Self {
        self.author = Some(author.to_string());
        self
    }

    pub fn with_created(mut self, created: DateTime<Local>) -> Self {
        self.created = Some(created);
        self
    }
}

/// A finished PDF and the name it should be saved under
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedReport {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Lay out and serialize a report in one go. Any failure (an unreadable photo,
/// a broken font) fails the whole render.
pub fn render_report(report: &Report, options: &RenderOptions) -> Result<RenderedReport, ReportError> {
    let start = Instant::now();
    let mut document = Document::default();

    let typography = match &options.font {
        Some(regular) => {
            let regular = Font::load(regular.clone())?;
            let bold = options
                .bold_font
                .as_ref()
                .map(|bold| Font::load(bold.clone()))
                .transpose()?;
            Typography::embedded(&mut document, regular, bold)
        }
        None => Typography::standard(&mut document),
    };

    let page_count = compose(report, &mut document, &typography, &options.layout)?;

    let mut info = Info::new()
        .title(&report.title)
        .keywords(report.kind.filename_prefix().replace('_', " "));
    if let Some(client) = &report.client_name {
        info = info.subject(client);
    }
    if let Some(author) = &options.author {
        info = info.author(author);
    }
    if let Some(created) = options.created {
        info = info.created(created);
    }
    document.set_info(info);

    let bytes = document.to_bytes()?;
    let filename = report_filename(
        report.kind,
        report.client_name.as_deref(),
        report.date.as_deref(),
    );

    log::info!(
        "rendered {} ({} pages, {} bytes) in {:.1?}",
        filename,
        page_count,
        bytes.len(),
        start.elapsed()
    );

    Ok(RenderedReport {
        filename,
        bytes,
        page_count,
    })
}
