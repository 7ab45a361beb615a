use super::{or_fallback, LabelSet};
use crate::format::{format_currency, format_date};
use crate::model::{
    Align, Block, Column, Heading, KeyValue, Report, ReportKind, Row, Section, Table,
};
use serde::Deserialize;

fn default_currency() -> String {
    "OMR".to_string()
}

/// A person or company on either end of an invoice
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Party {
    pub name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
}

impl LineItem {
    pub fn total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// The computed amounts of an invoice
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub discount: f64,
    /// subtotal less discount, never negative
    pub taxable: f64,
    pub tax: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Invoice {
    pub number: Option<String>,
    /// ISO date
    pub issue_date: Option<String>,
    /// ISO date
    pub due_date: Option<String>,
    pub currency: String,
    pub client: Party,
    pub issuer: Party,
    pub items: Vec<LineItem>,
    /// Flat amount taken off the subtotal before tax
    pub discount: f64,
    /// Percent, e.g. `5.0` for 5% VAT
    pub tax_rate: f64,
    pub notes: Option<String>,
    pub payment_terms: Option<String>,
}

impl Default for Invoice {
    fn default() -> Self {
        Invoice {
            number: None,
            issue_date: None,
            due_date: None,
            currency: default_currency(),
            client: Party::default(),
            issuer: Party::default(),
            items: Vec::default(),
            discount: 0.0,
            tax_rate: 0.0,
            notes: None,
            payment_terms: None,
        }
    }
}

impl Invoice {
    pub fn totals(&self) -> InvoiceTotals {
        let subtotal: f64 = self.items.iter().map(LineItem::total).sum();
        let taxable = (subtotal - self.discount).max(0.0);
        let tax = taxable * self.tax_rate / 100.0;
        InvoiceTotals {
            subtotal,
            discount: self.discount,
            taxable,
            tax,
            total: taxable + tax,
        }
    }

    fn money(&self, amount: f64) -> String {
        format_currency(amount, &self.currency)
    }

    pub fn to_report(&self, labels: &LabelSet) -> Report {
        let l = &labels.primary;
        let number = or_fallback(self.number.as_deref(), l.not_applicable);
        let issue_date = or_fallback(self.issue_date.as_deref().map(format_date).as_deref(), l.not_applicable);
        let client = or_fallback(self.client.name.as_deref(), l.not_specified);

        let mut report = Report::new(ReportKind::Invoice, l.invoice)
            .subtitle(format!("{} #{} | {}", l.invoice, number, client));
        if let Some(name) = &self.client.name {
            report = report.client_name(name);
        }
        if let Some(date) = &self.issue_date {
            report = report.date(date);
        }
        if let Some(issuer) = self.issuer.name.as_deref().filter(|n| !n.trim().is_empty()) {
            report = report.footer(issuer);
        }

        let details = Section::titled(labels.heading(|l| l.invoice_details))
            .block(KeyValue::new(l.invoice_number, Some(&number)))
            .block(KeyValue::new(l.issue_date, Some(&issue_date)))
            .block(KeyValue::new(l.due_date, self.due_date.as_deref().map(format_date)));
        report = report.section(details);

        report = report.section(party_section(labels.heading(|l| l.bill_to), &self.client, labels));
        report = report.section(party_section(labels.heading(|l| l.from), &self.issuer, labels));

        let mut table = Table::new(vec![
            Column::relative(0.46),
            Column::relative(0.12).align(Align::Right),
            Column::relative(0.21).align(Align::Right),
            Column::relative(0.21).align(Align::Right),
        ])
        .header(Row::new([l.description, l.quantity, l.unit_price, l.amount]));
        for item in self.items.iter() {
            table.push(Row::new([
                or_fallback(Some(item.description.as_str()), l.not_specified),
                format_quantity(item.quantity),
                self.money(item.unit_price),
                self.money(item.total()),
            ]));
        }
        report = report.section(Section::titled(labels.heading(|l| l.items)).block(table));

        let totals = self.totals();
        let mut section = Section::titled(labels.heading(|l| l.totals))
            .block(KeyValue::new(l.subtotal, Some(self.money(totals.subtotal))));
        if totals.discount != 0.0 {
            section.push(KeyValue::new(l.discount, Some(self.money(-totals.discount))));
        }
        section.push(KeyValue::new(
            format!("{} ({}%)", l.tax, self.tax_rate),
            Some(self.money(totals.tax)),
        ));
        section.push(KeyValue::new(l.total, Some(self.money(totals.total))).emphasised());
        report = report.section(section);

        let notes = [
            (labels.heading(|l| l.notes), self.notes.as_deref()),
            (labels.heading(|l| l.payment_terms), self.payment_terms.as_deref()),
        ];
        for (heading, text) in notes {
            if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
                report = report.section(Section::titled(heading).block(Block::Paragraph(text.to_string())));
            }
        }

        report
    }
}

fn party_section(heading: Heading, party: &Party, labels: &LabelSet) -> Section {
    let l = &labels.primary;
    Section::titled(heading)
        .block(KeyValue::new(l.name, Some(or_fallback(party.name.as_deref(), l.not_specified))))
        .block(KeyValue::new(l.address, party.address.as_ref()))
        .block(KeyValue::new(l.email, party.email.as_ref()))
        .block(KeyValue::new(l.phone, party.phone.as_ref()))
}

/// Whole quantities without decimals, fractional ones with up to two
fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{quantity:.0}")
    } else {
        let formatted = format!("{quantity:.2}");
        formatted.trim_end_matches('0').to_string()
    }
}
