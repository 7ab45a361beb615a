use super::measure::{Fragment, Measured, Measurer};
use crate::colour::colours;
use crate::model::{Align, Cell, Column, ColumnWidth, Row, Table};
use crate::units::Pt;

/// A table split into independently placeable bands
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableLayout {
    /// Drawn above the first row and again at the top of each continuation page
    pub header: Option<Measured>,
    /// Body rows in input order. A row is never split across pages.
    pub rows: Vec<Measured>,
}

impl TableLayout {
    /// Height the table needs before it may start on the current page: its
    /// header band plus its first row
    pub fn leading_height(&self) -> Pt {
        let header = self.header_height();
        let first_row = self.rows.first().map(|r| r.height).unwrap_or(Pt::ZERO);
        header + first_row
    }

    pub fn header_height(&self) -> Pt {
        self.header.as_ref().map(|h| h.height).unwrap_or(Pt::ZERO)
    }
}

/// Resolve column width hints against the content width. Widths are used as
/// given, without balancing; a table with no columns gets `arity` equal ones.
pub fn resolve_column_widths(columns: &[Column], arity: usize, content_width: Pt) -> Vec<Pt> {
    if columns.is_empty() {
        let count = arity.max(1);
        return vec![content_width / count as f32; arity];
    }

    let widths: Vec<Pt> = columns
        .iter()
        .map(|column| match column.width {
            ColumnWidth::Fixed(width) => width,
            ColumnWidth::Relative(fraction) => content_width * fraction,
        })
        .collect();

    let total: Pt = widths.iter().copied().sum();
    if total > content_width + Pt(0.5) {
        log::warn!(
            "table columns are {} wide but only {} is available, the table will overflow",
            total,
            content_width
        );
    }
    widths
}

impl Measurer<'_> {
    pub fn table(&self, table: &Table) -> TableLayout {
        let arity = table
            .header
            .as_ref()
            .map(|h| h.cells.len())
            .or_else(|| table.rows.first().map(|r| r.cells.len()))
            .unwrap_or(0);
        let columns = if table.columns.is_empty() {
            vec![
                Column {
                    width: ColumnWidth::Relative(1.0),
                    align: Align::Left,
                };
                arity
            ]
        } else {
            table.columns.clone()
        };
        let widths = resolve_column_widths(&table.columns, arity, self.geometry().content_width());

        for (i, row) in table.header.iter().chain(table.rows.iter()).enumerate() {
            if row.cells.len() != columns.len() {
                log::warn!(
                    "table row {} has {} cells for {} columns",
                    i,
                    row.cells.len(),
                    columns.len()
                );
            }
        }

        TableLayout {
            header: table
                .header
                .as_ref()
                .map(|header| self.table_row(header, &columns, &widths, true)),
            rows: table
                .rows
                .iter()
                .map(|row| self.table_row(row, &columns, &widths, false))
                .collect(),
        }
    }

    /// Measure one band of a table. Row height is the tallest cell (its wrapped
    /// lines plus padding above and below) but never less than the minimum row height.
    fn table_row(&self, row: &Row, columns: &[Column], widths: &[Pt], header: bool) -> Measured {
        let geometry = self.geometry();
        let size = self.typography.body_size;
        let padding = self.options.cell_padding;
        let blank = Cell::default();

        let mut backgrounds = Vec::default();
        let mut texts = Vec::default();
        let mut height = self.options.min_row_height;
        let mut left = geometry.left();

        for (i, (column, width)) in columns.iter().zip(widths.iter().copied()).enumerate() {
            let cell = row.cells.get(i).unwrap_or(&blank);
            let face = if header || cell.style.bold {
                self.bold
            } else {
                self.regular
            };
            let colour = match (cell.style.colour, header) {
                (Some(colour), _) => colour,
                (None, true) => colours::WHITE,
                (None, false) => colours::TEXT,
            };
            if let Some(background) = cell.style.background {
                backgrounds.push((left, width, background));
            }

            let lines = self.text_lines(
                &mut texts,
                &cell.text,
                face,
                size,
                colour,
                left + padding,
                (width - padding * 2.0).max(Pt(1.0)),
                column.align,
                padding,
            );
            let cell_height = face.font.line_height(size) * lines as f32 + padding * 2.0;
            height = height.max(cell_height);
            left += width;
        }

        let mut fragments = Vec::default();
        if header {
            fragments.push(Fragment::Fill {
                x: geometry.left(),
                y: Pt::ZERO,
                width: left - geometry.left(),
                height,
                colour: colours::ACCENT,
            });
        }
        for (x, width, colour) in backgrounds {
            fragments.push(Fragment::Fill {
                x,
                y: Pt::ZERO,
                width,
                height,
                colour,
            });
        }
        fragments.append(&mut texts);
        if !header {
            fragments.push(Fragment::Line {
                from: (geometry.left(), height),
                to: (left, height),
                width: Pt(0.5),
                colour: colours::RULE,
            });
        }

        Measured::new(height, fragments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::layout::{LayoutOptions, Margins, PageGeometry, Typography};
    use pretty_assertions::assert_eq;

    #[test]
    fn resolves_fixed_and_relative_widths() {
        let columns = [Column::fixed(Pt(100.0)), Column::relative(0.25)];
        assert_eq!(
            resolve_column_widths(&columns, 2, Pt(400.0)),
            vec![Pt(100.0), Pt(100.0)]
        );
    }

    #[test]
    fn missing_columns_are_split_evenly() {
        assert_eq!(
            resolve_column_widths(&[], 4, Pt(400.0)),
            vec![Pt(100.0); 4]
        );
    }

    fn measure(table: &Table) -> TableLayout {
        let mut document = Document::default();
        let typography = Typography::standard(&mut document);
        let options = LayoutOptions::default()
            .with_geometry(PageGeometry::new((Pt(400.0), Pt(600.0)), Margins::all(Pt(50.0))))
            .with_cell_padding(Pt(4.0))
            .with_min_row_height(Pt(20.0));
        let measurer = Measurer::new(&document.fonts, &document.images, &typography, &options)
            .expect("fonts are registered");
        measurer.table(table)
    }

    #[test]
    fn short_rows_use_the_minimum_height() {
        let table = Table::new(vec![Column::relative(0.5), Column::relative(0.5)])
            .header(Row::new(["Item", "Condition"]))
            .row(Row::new(["Roof", "Good"]));
        let layout = measure(&table);
        assert_eq!(layout.header_height(), Pt(20.0));
        assert_eq!(layout.leading_height(), Pt(40.0));
    }

    #[test]
    fn tallest_cell_sets_the_row_height() {
        let table = Table::new(vec![Column::fixed(Pt(60.0)), Column::fixed(Pt(240.0))])
            .row(Row::new(["a\nb\nc\nd", "one line"]));
        let layout = measure(&table);
        // four 11.5pt lines at 10pt plus 4pt padding top and bottom
        assert!((layout.rows[0].height.0 - 54.0).abs() < 1e-3);
    }

    #[test]
    fn extra_cells_are_dropped_and_missing_ones_blank() {
        let table = Table::new(vec![Column::relative(0.5), Column::relative(0.5)])
            .row(Row::new(["one", "two", "three"]))
            .row(Row::new(["only"]));
        let layout = measure(&table);
        let texts: Vec<Vec<&str>> = layout
            .rows
            .iter()
            .map(|row| {
                row.fragments
                    .iter()
                    .filter_map(|f| match f {
                        Fragment::Text { text, .. } => Some(text.as_str()),
                        _ => None,
                    })
                    .collect()
            })
            .collect();
        assert_eq!(texts, vec![vec!["one", "two"], vec!["only"]]);
    }
}
