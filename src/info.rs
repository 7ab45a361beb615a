use crate::refs::{ObjectReferences, RefType};
use chrono::{DateTime, Datelike, Local, Offset, Timelike};
use pdf_writer::{Date as PDate, Pdf, TextStr};

/// General document metadata such as title, author, etc
#[derive(Default, Debug, Clone)]
pub struct Info {
    /// The title of the document.
    pub title: Option<String>,
    /// The author(s) of the document, usually the inspector or the issuing company.
    pub author: Option<String>,
    /// The subject of the document, e.g. the client or property it concerns.
    pub subject: Option<String>,
    /// Keywords for the document, as a comma separated list
    pub keywords: Option<String>,
    /// When the document was created. Defaults to the moment it is written.
    pub created: Option<DateTime<Local>>,
}

impl Info {
    /// Create a new info block, with all metadata set to [None]
    pub fn new() -> Info {
        Info::default()
    }

    /// Set the title of the info block
    pub fn title<S: ToString>(mut self, title: S) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Set the author of the info block
    pub fn author<S: ToString>(mut self, author: S) -> Self {
        self.author = Some(author.to_string());
        self
    }

    /// Set the subject of the info block
    pub fn subject<S: ToString>(mut self, subject: S) -> Self {
        self.subject = Some(subject.to_string());
        self
    }

    /// Set the keywords of the info block
    pub fn keywords<S: ToString>(mut self, keywords: S) -> Self {
        self.keywords = Some(keywords.to_string());
        self
    }

    /// Pin the creation date, mostly so that output is reproducible
    pub fn created(mut self, created: DateTime<Local>) -> Self {
        self.created = Some(created);
        self
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.gen(RefType::Info);
        let mut info = writer.document_info(id);

        if let Some(title) = &self.title {
            info.title(TextStr(title.as_str()));
        }
        if let Some(author) = &self.author {
            info.author(TextStr(author.as_str()));
        }
        if let Some(subject) = &self.subject {
            info.subject(TextStr(subject.as_str()));
        }
        if let Some(keywords) = &self.keywords {
            info.keywords(TextStr(keywords.as_str()));
        }
        info.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));

        let created = self.created.unwrap_or_else(Local::now);
        let offset_seconds = created.offset().fix().local_minus_utc();
        let offset_hours = offset_seconds / 3600;
        let offset_minutes = ((offset_seconds % 3600) / 60).unsigned_abs();
        let date = PDate::new(created.year() as u16)
            .month(created.month() as u8)
            .day(created.day() as u8)
            .hour(created.hour() as u8)
            .minute(created.minute() as u8)
            .second(created.second() as u8)
            .utc_offset_hour(offset_hours as i8)
            .utc_offset_minute(offset_minutes as u8);
        info.creation_date(date);
    }
}
