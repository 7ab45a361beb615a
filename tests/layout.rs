use pretty_assertions::assert_eq;
use report_pdf::layout::{
    compose, wrap_text, Composer, Decorations, LayoutOptions, Margins, PageGeometry, Typography,
};
use report_pdf::*;

fn layout(report: &Report, options: &LayoutOptions) -> Document {
    let mut document = Document::default();
    let typography = Typography::standard(&mut document);
    compose(report, &mut document, &typography, options).expect("can lay out report");
    document
}

fn row_indices(page: &Page) -> Vec<usize> {
    page.placements
        .iter()
        .filter_map(|p| match p.kind {
            PlacementKind::TableRow(i) => Some(i),
            _ => None,
        })
        .collect()
}

fn table_report(rows: usize) -> Report {
    let mut table = Table::new(vec![Column::relative(0.25), Column::relative(0.75)])
        .header(Row::new(["#", "Item"]));
    for i in 0..rows {
        table.push(Row::new([format!("{}", i + 1), format!("Row {}", i + 1)]));
    }
    Report::new(ReportKind::Inspection, "Table").section(Section::new().block(table))
}

/// 150pt of content height; a 20pt header band and six 20pt rows fit on the first page
fn small_pages() -> LayoutOptions {
    LayoutOptions::default()
        .with_geometry(PageGeometry::new((Pt(400.0), Pt(230.0)), Margins::all(Pt(40.0))))
        .with_cell_padding(Pt(4.0))
        .with_min_row_height(Pt(20.0))
}

#[test]
fn empty_report_is_one_decorated_page() {
    let report = Report::new(ReportKind::Invoice, "Invoice");
    let document = layout(&report, &LayoutOptions::default());

    assert_eq!(document.pages.len(), 1);
    let kinds: Vec<PlacementKind> = document.pages[0].placements.iter().map(|p| p.kind).collect();
    assert_eq!(
        kinds,
        vec![
            PlacementKind::Header,
            PlacementKind::Footer,
            PlacementKind::PageNumber
        ]
    );
    let texts: Vec<&str> = document.pages[0].texts().collect();
    assert_eq!(texts, vec!["Invoice", "Page 1 of 1"]);
}

#[test]
fn long_table_continues_under_a_repeated_header() {
    let document = layout(&table_report(10), &small_pages());

    assert_eq!(document.pages.len(), 2);
    assert_eq!(row_indices(&document.pages[0]), vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(row_indices(&document.pages[1]), vec![6, 7, 8, 9]);
    for page in document.pages.iter() {
        let headers: Vec<&Placement> = page.placements_of(PlacementKind::TableHeader).collect();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].top, Pt(40.0));
        let first_row = page
            .placements
            .iter()
            .find(|p| matches!(p.kind, PlacementKind::TableRow(_)))
            .expect("rows on every page");
        assert_eq!(first_row.top, headers[0].bottom);
    }
}

#[test]
fn table_moves_whole_when_header_and_first_row_dont_fit() {
    let report = Report::new(ReportKind::Inspection, "Table").section(
        Section::new()
            .block(Block::Spacer(Pt(100.0)))
            .block(table_report(1).sections[0].blocks[0].clone()),
    );
    let document = layout(&report, &small_pages().with_block_spacing(Pt(0.0)));

    // 50pt left, the header band and first row take 40pt
    assert_eq!(document.pages.len(), 1);
    assert_eq!(row_indices(&document.pages[0]), vec![0]);

    let report = Report::new(ReportKind::Inspection, "Table").section(
        Section::new()
            .block(Block::Spacer(Pt(120.0)))
            .block(table_report(2).sections[0].blocks[0].clone()),
    );
    let document = layout(&report, &small_pages().with_block_spacing(Pt(0.0)));

    // 30pt left
    assert_eq!(document.pages.len(), 2);
    assert_eq!(document.pages[0].placements_of(PlacementKind::TableHeader).count(), 0);
    assert_eq!(row_indices(&document.pages[1]), vec![0, 1]);
}

#[test]
fn page_break_boundary() {
    let mut document = Document::default();
    let typography = Typography::standard(&mut document);
    let options = LayoutOptions::default()
        .with_geometry(PageGeometry::new((Pt(600.0), Pt(800.0)), Margins::all(Pt(50.0))));
    let required = Pt(100.0);

    // H - M - r - 1 = 649
    let mut composer = Composer::new(&document, &typography, &options, Decorations::default())
        .expect("fonts are registered");
    composer.advance(Pt(599.0));
    assert!(!composer.check_page_break(required));
    assert_eq!(composer.context().cursor, Pt(649.0));
    assert_eq!(composer.context().page_index, 0);

    // H - M - r + 1 = 651
    let mut composer = Composer::new(&document, &typography, &options, Decorations::default())
        .expect("fonts are registered");
    composer.advance(Pt(601.0));
    assert!(composer.check_page_break(required));
    assert_eq!(composer.context().cursor, Pt(50.0));
    assert_eq!(composer.context().page_index, 1);
    assert_eq!(composer.finish().pages.len(), 2);
}

#[test]
fn oversize_blocks_overflow_instead_of_leaving_blank_pages() {
    let report = Report::new(ReportKind::Inspection, "Tall").section(
        Section::new()
            .block(Block::Spacer(Pt(2000.0)))
            .block(Block::Paragraph("after".to_string())),
    );
    let document = layout(&report, &small_pages());
    assert_eq!(document.pages.len(), 2);
    assert_eq!(document.pages[0].placements_of(PlacementKind::Spacer).count(), 1);
    assert_eq!(document.pages[1].placements_of(PlacementKind::Paragraph).count(), 1);
}

fn long_report() -> Report {
    let mut report = Report::new(ReportKind::Inspection, "Inspection Report")
        .subtitle("Acme | January 15, 2024")
        .footer("Ref: 42");
    for area in 0..4 {
        let mut table = Table::new(vec![
            Column::relative(0.35),
            Column::relative(0.2).align(Align::Center),
            Column::relative(0.45),
        ])
        .header(Row::new(["Item", "Condition", "Comments"]));
        for item in 0..8 {
            table.push(Row::new([
                format!("Item {item}"),
                "Fair".to_string(),
                lipsum::lipsum(4 + item * 3),
            ]));
        }
        report = report.section(
            Section::titled(format!("Area {area}"))
                .block(Block::Paragraph(lipsum::lipsum(60)))
                .block(KeyValue::new("Notes", Some("Check again in spring")))
                .block(table)
                .block(Block::Rule),
        );
    }
    report
}

#[test]
fn layout_is_repeatable() {
    let report = long_report();
    let first = layout(&report, &LayoutOptions::default());
    let second = layout(&report, &LayoutOptions::default());

    assert!(first.pages.len() > 1);
    assert_eq!(first.pages.len(), second.pages.len());
    for (a, b) in first.pages.iter().zip(second.pages.iter()) {
        let a: Vec<&str> = a.texts().collect();
        let b: Vec<&str> = b.texts().collect();
        assert_eq!(a, b);
    }
}

#[test]
fn every_page_is_decorated_and_numbered() {
    let document = layout(&long_report(), &LayoutOptions::default());
    let count = document.pages.len();
    for (i, page) in document.pages.iter().enumerate() {
        assert_eq!(page.placements_of(PlacementKind::Header).count(), 1);
        assert_eq!(page.placements_of(PlacementKind::Footer).count(), 1);
        let texts: Vec<&str> = page.texts().collect();
        assert!(texts.contains(&"Inspection Report"));
        assert!(texts.contains(&"Ref: 42"));
        let number = format!("Page {} of {}", i + 1, count);
        assert!(texts.contains(&number.as_str()), "{number} missing");
    }
}

#[test]
fn content_stays_in_order_and_inside_the_margins() {
    let options = LayoutOptions::default();
    let geometry = options.geometry;
    let document = layout(&long_report(), &options);

    let mut last = (0, 0);
    for page in document.pages.iter() {
        let mut cursor = geometry.top();
        for placement in page.placements.iter().filter(|p| p.section.is_some()) {
            assert!(placement.top >= cursor, "{placement:?} is above {cursor}");
            assert!(placement.bottom <= geometry.break_limit(), "{placement:?} overflows");
            cursor = placement.bottom;

            let position = (placement.section.unwrap_or(0), placement.block.unwrap_or(0));
            assert!(position >= last, "{position:?} placed after {last:?}");
            last = position;
        }
    }
}

#[test]
fn titled_sections_are_bookmarked() {
    let document = layout(&long_report(), &LayoutOptions::default());
    let titles: Vec<&str> = document
        .outline
        .entries
        .iter()
        .map(|e| e.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Area 0", "Area 1", "Area 2", "Area 3"]);
    for entry in document.outline.entries.iter() {
        let page = &document.pages[entry.page_index];
        assert!(page.placements_of(PlacementKind::Heading).count() >= 1);
    }

    // titles carry no block index, the first block of the section is block 0
    let placements = &document.pages[0].placements;
    let title = placements
        .iter()
        .position(|p| p.kind == PlacementKind::Heading && p.section == Some(0))
        .expect("first section title on the first page");
    assert_eq!(placements[title].block, None);
    assert_eq!(placements[title + 1].kind, PlacementKind::Paragraph);
    assert_eq!(placements[title + 1].section, Some(0));
    assert_eq!(placements[title + 1].block, Some(0));
}

#[test]
fn long_paragraphs_flow_across_pages_line_by_line() {
    let text = lipsum::lipsum(2500);
    let report = Report::new(ReportKind::Inspection, "Report").section(
        Section::titled("Summary")
            .block(Block::Paragraph(text.clone()))
            .block(KeyValue::new("Notes", Some(lipsum::lipsum(40)))),
    );
    let options = LayoutOptions::default();
    let geometry = options.geometry;
    let document = layout(&report, &options);
    let count = document.pages.len();
    assert!(count >= 3, "only {count} pages");

    for (i, page) in document.pages.iter().enumerate() {
        for placement in page.placements.iter().filter(|p| p.section.is_some()) {
            assert!(
                placement.bottom <= geometry.break_limit(),
                "{placement:?} on page {} overflows",
                i + 1
            );
        }
        for (n, title) in page
            .placements
            .iter()
            .enumerate()
            .filter(|(_, p)| p.kind == PlacementKind::Heading && p.block.is_none())
        {
            assert!(
                page.placements[n + 1..]
                    .iter()
                    .any(|p| p.section == title.section && p.block.is_some()),
                "title left alone on page {}",
                i + 1
            );
        }
    }

    let drawn: Vec<String> = document
        .pages
        .iter()
        .enumerate()
        .flat_map(|(i, page)| {
            let number = format!("Page {} of {}", i + 1, count);
            page.texts()
                .filter(move |t| *t != "Report" && *t != "Summary" && *t != number)
                .map(str::to_string)
                .collect::<Vec<String>>()
        })
        .take_while(|t| t != "Notes")
        .collect();
    let helvetica = Font::helvetica();
    let body_size = Typography::standard(&mut Document::default()).body_size;
    let expected: Vec<String> =
        wrap_text(&text, &helvetica, body_size, geometry.content_width()).collect();
    assert_eq!(drawn, expected);
}
