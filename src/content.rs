//! Serialization of laid out page contents into a PDF content stream.

use crate::colour::Colour;
use crate::font::Font;
use crate::page::{PageContents, SpanFont, SpanLayout};
use crate::ReportError;
use id_arena::Arena;
use std::io::Write;

/// Renders page contents to the operators of a PDF content stream.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, ReportError> {
    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => {
                render_text_spans(&mut content, spans, fonts)?;
            }
            PageContents::Image(image) => {
                write!(&mut content, "q\n")?;
                write!(
                    &mut content,
                    "{} 0 0 {} {} {} cm\n",
                    image.position.width(),
                    image.position.height(),
                    image.position.x1,
                    image.position.y1
                )?;
                write!(&mut content, "/I{} Do\n", image.image_id.index())?;
                write!(&mut content, "Q\n")?;
            }
            PageContents::Fill(fill) => {
                write!(&mut content, "q\n")?;
                write_colour(&mut content, fill.colour, false)?;
                write!(
                    &mut content,
                    "{} {} {} {} re f\n",
                    fill.rect.x1,
                    fill.rect.y1,
                    fill.rect.width(),
                    fill.rect.height()
                )?;
                write!(&mut content, "Q\n")?;
            }
            PageContents::Line(line) => {
                write!(&mut content, "q\n")?;
                write_colour(&mut content, line.colour, true)?;
                write!(&mut content, "{} w\n", line.width)?;
                write!(&mut content, "{} {} m\n", line.from.0, line.from.1)?;
                write!(&mut content, "{} {} l S\n", line.to.0, line.to.1)?;
                write!(&mut content, "Q\n")?;
            }
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(
    content: &mut Vec<u8>,
    spans: &[SpanLayout],
    fonts: &Arena<Font>,
) -> Result<(), ReportError> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font: SpanFont = first.font;
    let mut current_colour: Colour = first.colour;
    write!(
        content,
        "/F{} {} Tf\n",
        current_font.id.index(),
        current_font.size
    )?;
    write_colour(content, current_colour, false)?;

    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            write!(
                content,
                "/F{} {} Tf\n",
                current_font.id.index(),
                current_font.size
            )?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            write_colour(content, current_colour, false)?;
        }

        let font = fonts
            .get(current_font.id)
            .ok_or(ReportError::FontMissing(current_font.id.index()))?;

        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", span.coords.0, span.coords.1)?;
        write!(content, "<")?;
        for byte in font.encode(&span.text) {
            write!(content, "{byte:02x}")?;
        }
        write!(content, "> Tj\n")?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn write_colour(content: &mut Vec<u8>, colour: Colour, stroke: bool) -> std::io::Result<()> {
    match (colour, stroke) {
        (Colour::RGB { r, g, b }, false) => write!(content, "{r} {g} {b} rg\n"),
        (Colour::RGB { r, g, b }, true) => write!(content, "{r} {g} {b} RG\n"),
        (Colour::Grey { g }, false) => write!(content, "{g} g\n"),
        (Colour::Grey { g }, true) => write!(content, "{g} G\n"),
    }
}
