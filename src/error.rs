use thiserror::Error;

/// All errors that rendering a report can generate. Any of these aborts the
/// whole invocation; partially rendered output is never returned.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    /// An I/O error occurred while reading an asset
    Io(#[from] std::io::Error),

    #[error("failed to parse font: {0}")]
    /// [owned_ttf_parser] failed to parse the font
    FontParse(#[from] owned_ttf_parser::FaceParsingError),

    #[error("embedded font is missing required table `{0}`")]
    /// The font parsed but lacks data needed for embedding
    FontIncomplete(&'static str),

    #[error(transparent)]
    /// [image] failed to decode a photo
    Image(#[from] image::ImageError),

    #[error("font {0} is referenced but was never added to the document")]
    /// A span refers to a font that is not registered with the document
    FontMissing(usize),
}
