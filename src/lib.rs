//! Paginated PDF layout for property inspection reports and invoices.
//!
//! Build a [`Report`] (by hand or through the [`reports`] builders), then render it:
//!
//! ```
//! use report_pdf::reports::{Invoice, LabelSet};
//! use report_pdf::{render_report, RenderOptions};
//!
//! let invoice: Invoice = serde_json::from_str(r#"{
//!     "number": "INV-7",
//!     "issue_date": "2024-01-15",
//!     "client": { "name": "Acme Trading" },
//!     "items": [{ "description": "Inspection", "quantity": 1, "unit_price": 1200 }]
//! }"#).expect("valid invoice");
//!
//! let rendered = render_report(&invoice.to_report(&LabelSet::english()), &RenderOptions::default())
//!     .expect("can render");
//! assert_eq!(rendered.filename, "Invoice_AcmeTrading_2024-01-15.pdf");
//! assert!(rendered.bytes.starts_with(b"%PDF"));
//! ```

mod colour;
pub use colour::*;

mod content;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod format;
pub use format::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// The paginated layout engine
pub mod layout;

mod model;
pub use model::*;

mod outline;
pub use outline::*;

mod page;
pub use page::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod render;
pub use render::*;

/// Inspection and invoice data, and how they become reports
pub mod reports;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
