use super::{or_fallback, LabelSet};
use crate::colour::{colours, Colour};
use crate::format::format_date;
use crate::model::{
    Align, Block, Cell, Column, KeyValue, Photo, Report, ReportKind, Row, Section, Table,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The state an inspected item was found in. Anything unrecognised reads as N/A.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
pub enum Condition {
    #[serde(alias = "good", alias = "GOOD")]
    Good,
    #[serde(alias = "fair", alias = "FAIR")]
    Fair,
    #[serde(alias = "poor", alias = "POOR")]
    Poor,
    #[default]
    #[serde(rename = "N/A", alias = "n/a", alias = "na", alias = "NA", other)]
    NotApplicable,
}

impl Condition {
    pub fn colour(&self) -> Colour {
        match self {
            Condition::Good => colours::GOOD,
            Condition::Fair => colours::FAIR,
            Condition::Poor => colours::POOR,
            Condition::NotApplicable => colours::MUTED,
        }
    }

    pub fn label(&self, labels: &LabelSet) -> &'static str {
        match self {
            Condition::Good => labels.primary.good,
            Condition::Fair => labels.primary.fair,
            Condition::Poor => labels.primary.poor,
            Condition::NotApplicable => labels.primary.not_applicable,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InspectionItem {
    pub name: String,
    pub condition: Condition,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhotoRef {
    pub path: PathBuf,
    pub caption: Option<String>,
}

/// One inspected part of the property, e.g. a room or the roof
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Area {
    pub name: String,
    pub items: Vec<InspectionItem>,
    pub notes: Option<String>,
    pub photos: Vec<PhotoRef>,
}

/// The data of a property inspection, as entered by the inspector
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Inspection {
    pub client_name: Option<String>,
    pub property_address: Option<String>,
    pub property_type: Option<String>,
    pub inspector_name: Option<String>,
    /// ISO date
    pub inspection_date: Option<String>,
    pub reference: Option<String>,
    pub areas: Vec<Area>,
    pub summary: Option<String>,
    pub recommendations: Vec<String>,
}

impl Inspection {
    /// Make relative photo paths relative to `base` instead of the working directory
    pub fn resolve_photos(&mut self, base: &Path) {
        for photo in self.areas.iter_mut().flat_map(|a| a.photos.iter_mut()) {
            if photo.path.is_relative() {
                photo.path = base.join(&photo.path);
            }
        }
    }

    pub fn to_report(&self, labels: &LabelSet) -> Report {
        let l = &labels.primary;
        let client = or_fallback(self.client_name.as_deref(), l.not_specified);
        let date = self
            .inspection_date
            .as_deref()
            .map(format_date)
            .unwrap_or_else(|| l.not_applicable.to_string());

        let mut report = Report::new(ReportKind::Inspection, l.inspection_report)
            .subtitle(format!("{client} | {date}"));
        if let Some(reference) = self.reference.as_deref().filter(|r| !r.trim().is_empty()) {
            report = report.footer(format!("{}: {}", l.reference, reference));
        }
        if let Some(name) = &self.client_name {
            report = report.client_name(name);
        }
        if let Some(date) = &self.inspection_date {
            report = report.date(date);
        }

        let information = Section::titled(labels.heading(|l| l.property_information))
            .block(KeyValue::new(l.client, Some(&client)))
            .block(KeyValue::new(l.property_address, self.property_address.as_ref()))
            .block(KeyValue::new(l.property_type, self.property_type.as_ref()))
            .block(KeyValue::new(l.inspector, self.inspector_name.as_ref()))
            .block(KeyValue::new(l.inspection_date, Some(&date)))
            .block(KeyValue::new(l.reference, self.reference.as_ref()));
        report = report.section(information);

        for area in self.areas.iter() {
            report = report.section(self.area_section(area, labels));
        }

        let summary = Section::titled(labels.heading(|l| l.summary)).block(Block::Paragraph(
            or_fallback(self.summary.as_deref(), l.not_applicable),
        ));
        report = report.section(summary);

        if !self.recommendations.is_empty() {
            let mut section = Section::titled(labels.heading(|l| l.recommendations));
            for (i, recommendation) in self.recommendations.iter().enumerate() {
                section.push(Block::Paragraph(format!("{}. {}", i + 1, recommendation.trim())));
            }
            report = report.section(section);
        }

        report
    }

    fn area_section(&self, area: &Area, labels: &LabelSet) -> Section {
        let l = &labels.primary;
        let mut section = Section::titled(or_fallback(Some(area.name.as_str()), l.not_specified));

        if !area.items.is_empty() {
            let mut table = Table::new(vec![
                Column::relative(0.35),
                Column::relative(0.2).align(Align::Center),
                Column::relative(0.45),
            ])
            .header(Row::new([l.item, l.condition, l.comments]));
            for item in area.items.iter() {
                table.push(Row {
                    cells: vec![
                        Cell::new(or_fallback(Some(item.name.as_str()), l.not_specified)),
                        Cell::new(item.condition.label(labels))
                            .bold()
                            .colour(item.condition.colour()),
                        Cell::new(item.comments.as_deref().unwrap_or("")),
                    ],
                });
            }
            section.push(table);
        }

        if let Some(notes) = area.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            section.push(KeyValue::new(l.notes, Some(notes)));
        }

        if !area.photos.is_empty() {
            let photos = area
                .photos
                .iter()
                .map(|p| {
                    let photo = Photo::from_path(&p.path);
                    match &p.caption {
                        Some(caption) => photo.caption(caption),
                        None => photo,
                    }
                })
                .collect();
            section.push(Block::Heading(labels.heading(|l| l.photos)));
            section.push(Block::Photos(photos));
        }

        section
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Heading;
    use pretty_assertions::assert_eq;

    fn sample() -> Inspection {
        serde_json::from_str(
            r#"{
                "client_name": "Fatima Al Balushi",
                "property_address": "Way 3021, Muscat",
                "inspection_date": "2024-01-15",
                "areas": [
                    {
                        "name": "Kitchen",
                        "items": [
                            { "name": "Sink", "condition": "Good" },
                            { "name": "Cabinets", "condition": "poor", "comments": "Water damage" },
                            { "name": "Hood" }
                        ],
                        "notes": "Replace cabinet doors"
                    }
                ],
                "recommendations": ["Fix leak", "Repaint"]
            }"#,
        )
        .expect("valid inspection")
    }

    #[test]
    fn conditions_parse_loosely() {
        let inspection = sample();
        let conditions: Vec<Condition> = inspection.areas[0]
            .items
            .iter()
            .map(|i| i.condition)
            .collect();
        assert_eq!(
            conditions,
            vec![Condition::Good, Condition::Poor, Condition::NotApplicable]
        );
    }

    #[test]
    fn unknown_conditions_read_as_not_applicable() {
        let item: InspectionItem =
            serde_json::from_str(r#"{ "name": "Roof", "condition": "Excellent" }"#)
                .expect("unknown conditions still parse");
        assert_eq!(item.condition, Condition::NotApplicable);
        assert_eq!(item.condition.label(&LabelSet::english()), "N/A");
    }

    #[test]
    fn photos_get_a_labelled_grid() {
        let mut inspection = sample();
        inspection.areas[0].photos.push(PhotoRef {
            path: PathBuf::from("sink.jpg"),
            caption: Some("Sink".to_string()),
        });
        let report = inspection.to_report(&LabelSet::bilingual());
        let blocks = &report.sections[1].blocks;
        assert_eq!(
            blocks[blocks.len() - 2],
            Block::Heading(Heading::new("Photos").secondary("الصور"))
        );
        let Block::Photos(photos) = &blocks[blocks.len() - 1] else {
            panic!("expected the photo grid last");
        };
        assert_eq!(photos[0].caption.as_deref(), Some("Sink"));
    }

    #[test]
    fn builds_sections_in_order() {
        let report = sample().to_report(&LabelSet::english());
        let titles: Vec<Option<Heading>> = report.sections.iter().map(|s| s.title.clone()).collect();
        assert_eq!(
            titles,
            vec![
                Some(Heading::new("Property Information")),
                Some(Heading::new("Kitchen")),
                Some(Heading::new("Summary")),
                Some(Heading::new("Recommendations")),
            ]
        );
        assert_eq!(report.subtitle.as_deref(), Some("Fatima Al Balushi | January 15, 2024"));
        assert_eq!(report.sections[3].blocks[1], Block::Paragraph("2. Repaint".to_string()));
    }

    #[test]
    fn missing_values_fall_back() {
        let report = Inspection::default().to_report(&LabelSet::english());
        assert_eq!(report.client_name, None);
        assert_eq!(
            report.sections[0].blocks[0],
            Block::KeyValue(KeyValue::new("Client", Some("Not Specified")))
        );
        assert_eq!(
            report.sections[1].blocks[0],
            Block::Paragraph("N/A".to_string())
        );
    }

    #[test]
    fn condition_cells_are_coloured() {
        let report = sample().to_report(&LabelSet::english());
        let Block::Table(table) = &report.sections[1].blocks[0] else {
            panic!("expected the condition table first");
        };
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[1].cells[1].text, "Poor");
        assert_eq!(table.rows[1].cells[1].style.colour, Some(colours::POOR));
    }
}
