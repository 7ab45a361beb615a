use crate::model::Heading;

/// The fixed wording of reports in one language
#[derive(Debug, Clone, PartialEq)]
pub struct Labels {
    pub inspection_report: &'static str,
    pub property_information: &'static str,
    pub client: &'static str,
    pub property_address: &'static str,
    pub property_type: &'static str,
    pub inspector: &'static str,
    pub inspection_date: &'static str,
    pub reference: &'static str,
    pub item: &'static str,
    pub condition: &'static str,
    pub comments: &'static str,
    pub notes: &'static str,
    pub photos: &'static str,
    pub summary: &'static str,
    pub recommendations: &'static str,
    pub good: &'static str,
    pub fair: &'static str,
    pub poor: &'static str,
    pub not_applicable: &'static str,
    pub invoice: &'static str,
    pub invoice_details: &'static str,
    pub invoice_number: &'static str,
    pub issue_date: &'static str,
    pub due_date: &'static str,
    pub bill_to: &'static str,
    pub from: &'static str,
    pub name: &'static str,
    pub address: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub items: &'static str,
    pub description: &'static str,
    pub quantity: &'static str,
    pub unit_price: &'static str,
    pub amount: &'static str,
    pub totals: &'static str,
    pub subtotal: &'static str,
    pub discount: &'static str,
    pub tax: &'static str,
    pub total: &'static str,
    pub payment_terms: &'static str,
    pub not_specified: &'static str,
}

impl Labels {
    pub fn english() -> Labels {
        Labels {
            inspection_report: "Property Inspection Report",
            property_information: "Property Information",
            client: "Client",
            property_address: "Property Address",
            property_type: "Property Type",
            inspector: "Inspector",
            inspection_date: "Inspection Date",
            reference: "Reference",
            item: "Item",
            condition: "Condition",
            comments: "Comments",
            notes: "Notes",
            photos: "Photos",
            summary: "Summary",
            recommendations: "Recommendations",
            good: "Good",
            fair: "Fair",
            poor: "Poor",
            not_applicable: "N/A",
            invoice: "Invoice",
            invoice_details: "Invoice Details",
            invoice_number: "Invoice Number",
            issue_date: "Issue Date",
            due_date: "Due Date",
            bill_to: "Bill To",
            from: "From",
            name: "Name",
            address: "Address",
            email: "Email",
            phone: "Phone",
            items: "Items",
            description: "Description",
            quantity: "Qty",
            unit_price: "Unit Price",
            amount: "Amount",
            totals: "Totals",
            subtotal: "Subtotal",
            discount: "Discount",
            tax: "Tax",
            total: "Total",
            payment_terms: "Payment Terms",
            not_specified: "Not Specified",
        }
    }

    /// Arabic labels. Drawing them needs an embedded font with Arabic coverage;
    /// glyphs are drawn in logical order without shaping.
    pub fn arabic() -> Labels {
        Labels {
            inspection_report: "تقرير فحص العقار",
            property_information: "معلومات العقار",
            client: "العميل",
            property_address: "عنوان العقار",
            property_type: "نوع العقار",
            inspector: "المفتش",
            inspection_date: "تاريخ الفحص",
            reference: "المرجع",
            item: "البند",
            condition: "الحالة",
            comments: "الملاحظات",
            notes: "ملاحظات",
            photos: "الصور",
            summary: "الملخص",
            recommendations: "التوصيات",
            good: "جيد",
            fair: "مقبول",
            poor: "سيئ",
            not_applicable: "غير متوفر",
            invoice: "فاتورة",
            invoice_details: "تفاصيل الفاتورة",
            invoice_number: "رقم الفاتورة",
            issue_date: "تاريخ الإصدار",
            due_date: "تاريخ الاستحقاق",
            bill_to: "فاتورة إلى",
            from: "من",
            name: "الاسم",
            address: "العنوان",
            email: "البريد الإلكتروني",
            phone: "الهاتف",
            items: "البنود",
            description: "الوصف",
            quantity: "الكمية",
            unit_price: "سعر الوحدة",
            amount: "المبلغ",
            totals: "الإجماليات",
            subtotal: "المجموع الفرعي",
            discount: "الخصم",
            tax: "الضريبة",
            total: "الإجمالي",
            payment_terms: "شروط الدفع",
            not_specified: "غير محدد",
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Labels::english()
    }
}

/// The labels a report is written with: always a primary language, and for
/// bilingual reports a secondary one shown alongside headings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelSet {
    pub primary: Labels,
    pub secondary: Option<Labels>,
}

impl LabelSet {
    pub fn english() -> LabelSet {
        LabelSet::default()
    }

    /// English with Arabic alongside
    pub fn bilingual() -> LabelSet {
        LabelSet {
            primary: Labels::english(),
            secondary: Some(Labels::arabic()),
        }
    }

    /// A heading from one label, in both languages when bilingual
    pub fn heading(&self, label: fn(&Labels) -> &'static str) -> Heading {
        let heading = Heading::new(label(&self.primary));
        match &self.secondary {
            Some(secondary) => heading.secondary(label(secondary)),
            None => heading,
        }
    }
}
