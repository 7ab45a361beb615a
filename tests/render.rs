use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use pretty_assertions::assert_eq;
use report_pdf::reports::{Inspection, Invoice, LabelSet};
use report_pdf::*;
use std::io::Cursor;

fn invoice() -> Invoice {
    serde_json::from_str(
        r#"{
            "number": "INV-2024-001",
            "issue_date": "2024-01-15",
            "due_date": "2024-02-15",
            "client": { "name": "Khalid Al-Rawahi", "email": "khalid@example.com" },
            "issuer": { "name": "Muscat Property Inspections" },
            "items": [
                { "description": "Full villa inspection", "quantity": 1, "unit_price": 1200 },
                { "description": "Thermal imaging", "quantity": 3, "unit_price": 12.9153 }
            ],
            "tax_rate": 5,
            "payment_terms": "Due within 30 days"
        }"#,
    )
    .expect("valid invoice")
}

fn inspection(areas: usize) -> Inspection {
    let mut inspection: Inspection = serde_json::from_str(
        r#"{
            "client_name": "Fatima Al Balushi",
            "property_address": "Way 3021, Al Khuwair, Muscat",
            "property_type": "Villa",
            "inspector_name": "S. Rahman",
            "inspection_date": "2024-01-15",
            "reference": "INS-88",
            "summary": "Overall the property is well maintained.",
            "recommendations": ["Service the air conditioning", "Seal the roof"]
        }"#,
    )
    .expect("valid inspection");
    for i in 0..areas {
        inspection.areas.push(
            serde_json::from_str(&format!(
                r#"{{
                    "name": "Area {i}",
                    "items": [
                        {{ "name": "Walls", "condition": "Good" }},
                        {{ "name": "Windows", "condition": "Fair", "comments": "{}" }},
                        {{ "name": "Floor", "condition": "Poor", "comments": "Cracked tiles" }}
                    ],
                    "notes": "{}"
                }}"#,
                lipsum::lipsum(20),
                lipsum::lipsum(40)
            ))
            .expect("valid area"),
        );
    }
    inspection
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([30, 120, 200]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .expect("can encode png");
    bytes
}

#[test]
fn invoice_renders_to_a_single_page_pdf() {
    let report = invoice().to_report(&LabelSet::english());
    let rendered = render_report(&report, &RenderOptions::default()).expect("can render");

    assert!(rendered.bytes.starts_with(b"%PDF"));
    assert_eq!(rendered.page_count, 1);
    assert_eq!(rendered.filename, "Invoice_KhalidAlRawahi_2024-01-15.pdf");
    let pdf = String::from_utf8_lossy(&rendered.bytes);
    assert!(pdf.contains("/Count 1"));
}

#[test]
fn invoice_totals_are_formatted() {
    let invoice = invoice();
    let totals = invoice.totals();
    assert_eq!(format_currency(totals.subtotal, "OMR"), "OMR 1238.75");
    assert_eq!(format_currency(totals.tax, "OMR"), "OMR 61.94");
    assert_eq!(format_currency(totals.total, "OMR"), "OMR 1300.68");
}

#[test]
fn currency_examples() {
    assert_eq!(format_currency(1200.0, "OMR"), "OMR 1200.00");
    assert_eq!(format_currency(38.746, "OMR"), "OMR 38.75");
}

#[test]
fn long_inspections_span_several_pages() {
    let report = inspection(6).to_report(&LabelSet::english());
    let rendered = render_report(&report, &RenderOptions::default()).expect("can render");

    assert!(rendered.page_count > 1);
    assert_eq!(
        rendered.filename,
        "Inspection_Report_FatimaAlBalushi_2024-01-15.pdf"
    );
    let pdf = String::from_utf8_lossy(&rendered.bytes);
    assert!(pdf.contains(&format!("/Count {}", rendered.page_count)));
    assert!(pdf.contains("/Outlines"));
}

#[test]
fn missing_client_falls_back() {
    let mut inspection = inspection(1);
    inspection.client_name = None;
    let report = inspection.to_report(&LabelSet::english());
    let rendered = render_report(&report, &RenderOptions::default()).expect("can render");
    assert_eq!(
        rendered.filename,
        "Inspection_Report_NotSpecified_2024-01-15.pdf"
    );
}

#[test]
fn photos_are_embedded() {
    let report = Report::new(ReportKind::Inspection, "Photos")
        .client_name("Acme")
        .date("2024-01-15")
        .section(Section::titled("Kitchen").block(Block::Photos(vec![
            Photo::from_bytes(png(40, 30)).caption("Sink"),
            Photo::from_bytes(png(30, 40)),
            Photo::from_bytes(png(10, 10)).caption("Hood"),
        ])));

    let mut document = Document::default();
    let typography = layout::Typography::standard(&mut document);
    layout::compose(&report, &mut document, &typography, &layout::LayoutOptions::default())
        .expect("can lay out");

    assert_eq!(document.images.len(), 3);
    let page = &document.pages[0];
    let images = page
        .contents
        .iter()
        .filter(|c| matches!(c, PageContents::Image(_)))
        .count();
    assert_eq!(images, 3);
    assert_eq!(page.placements_of(PlacementKind::Photos(0)).count(), 1);
    assert_eq!(page.placements_of(PlacementKind::Photos(1)).count(), 1);
    let texts: Vec<&str> = page.texts().collect();
    assert!(texts.contains(&"Sink"));
    assert!(texts.contains(&"Hood"));

    let bytes = document.to_bytes().expect("can write");
    assert!(String::from_utf8_lossy(&bytes).contains("/Subtype /Image"));
}

#[test]
fn broken_photos_fail_the_render() {
    let report = Report::new(ReportKind::Inspection, "Photos").section(
        Section::new().block(Block::Photos(vec![Photo::from_bytes(b"not a photo".to_vec())])),
    );
    assert!(matches!(
        render_report(&report, &RenderOptions::default()),
        Err(ReportError::Image(_))
    ));

    let report = Report::new(ReportKind::Inspection, "Photos").section(
        Section::new().block(Block::Photos(vec![Photo::from_path("/nowhere/photo.jpg")])),
    );
    assert!(matches!(
        render_report(&report, &RenderOptions::default()),
        Err(ReportError::Io(_))
    ));
}

#[test]
fn broken_fonts_fail_the_render() {
    let report = invoice().to_report(&LabelSet::bilingual());
    let options = RenderOptions::default().with_font(b"definitely not a font".to_vec(), None);
    assert!(matches!(
        render_report(&report, &options),
        Err(ReportError::FontParse(_))
    ));
}

#[test]
fn metadata_is_written() {
    let report = invoice().to_report(&LabelSet::english());
    let options = RenderOptions::default().with_author("S. Rahman");
    let rendered = render_report(&report, &options).expect("can render");
    let pdf = String::from_utf8_lossy(&rendered.bytes);
    assert!(pdf.contains("/Author (S. Rahman)"));
    assert!(pdf.contains("/Title (Invoice)"));
}
