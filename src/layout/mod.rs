//! The paginated layout engine.
//!
//! Layout turns a [`Report`] into finished [`Page`](crate::Page)s in three steps:
//!
//! 1. Photos are decoded and registered with the [`Document`] up front, so that a
//!    broken asset fails the whole render before any page exists.
//! 2. A [`Composer`] walks the sections and blocks in order. Every block is
//!    measured into a [`Measured`] (its height plus its drawing instructions),
//!    the composer decides whether it fits below the cursor or needs a new page,
//!    then draws it and moves the cursor past it. Tables are split into header
//!    band and rows so that they can continue across pages.
//! 3. Once the page count is known, every footer is stamped with "Page i of N".
//!
//! All vertical positions in this module are distances from the top of the page
//! ("cursor space"); they are only flipped into PDF space when drawn.
//!
//! # Example
//!
//! ```
//! use report_pdf::layout::{compose, LayoutOptions, Typography};
//! use report_pdf::{Document, Report, ReportKind, Section};
//!
//! let report = Report::new(ReportKind::Inspection, "Inspection Report")
//!     .section(Section::titled("Summary").block(report_pdf::Block::Paragraph(
//!         "The property is in good condition.".to_string(),
//!     )));
//!
//! let mut document = Document::default();
//! let typography = Typography::standard(&mut document);
//! let pages = compose(&report, &mut document, &typography, &LayoutOptions::default())
//!     .expect("can lay out report");
//! assert_eq!(pages, 1);
//! ```

mod compose;
mod context;
mod geometry;
mod measure;
mod options;
mod table;
mod text;

pub use compose::*;
pub use context::*;
pub use geometry::*;
pub use measure::{Fragment, Measured};
pub use options::*;
pub use table::{resolve_column_widths, TableLayout};
pub use text::*;

use crate::document::Document;
use crate::image::Image;
use crate::model::{Block, PhotoSource, Report};
use crate::ReportError;

/// Lay out a report and append its pages (and section bookmarks) to the document.
/// Returns the number of pages produced.
pub fn compose(
    report: &Report,
    document: &mut Document,
    typography: &Typography,
    options: &LayoutOptions,
) -> Result<usize, ReportError> {
    let photos = load_photos(report, document)?;

    let composition = {
        let mut composer =
            Composer::new(document, typography, options, Decorations::for_report(report))?
                .with_photos(photos);
        composer.compose_report(report);
        composer.finish()
    };

    let first_page = document.pages.len();
    let count = composition.pages.len();
    for page in composition.pages {
        document.add_page(page);
    }
    for bookmark in composition.bookmarks {
        document
            .outline
            .add_bookmark(bookmark.title, first_page + bookmark.page_index, bookmark.top);
    }

    log::debug!("laid out {} sections on {} pages", report.sections.len(), count);
    Ok(count)
}

/// Decode every photo of the report into the document
fn load_photos(report: &Report, document: &mut Document) -> Result<PhotoAssets, ReportError> {
    let mut assets = PhotoAssets::default();
    for (section_index, section) in report.sections.iter().enumerate() {
        for (block_index, block) in section.blocks.iter().enumerate() {
            let Block::Photos(photos) = block else {
                continue;
            };
            for (photo_index, photo) in photos.iter().enumerate() {
                let image = match &photo.source {
                    PhotoSource::Bytes(bytes) => Image::from_bytes(bytes)?,
                    PhotoSource::Path(path) => Image::from_path(path)?,
                };
                let id = document.add_image(image);
                assets.insert((section_index, block_index, photo_index), id);
            }
        }
    }
    Ok(assets)
}
