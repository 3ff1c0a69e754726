use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::core::config::PdfConfig;
use crate::core::error::Result;
use crate::features::quotations::model::{Quotation, QuotationItem};
use crate::features::quotations::summary::{format_rupiah, FinancialSummary};
use crate::modules::pdf::document::PdfDocument;
use crate::modules::pdf::layout::{resume_at_max, wrap_text, Cursor, FontStyle, PageGeometry};
use crate::modules::pdf::rich_text::{self, RenderInstruction};
use crate::shared::validation::sanitize_file_component;

const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 9.0;
const SMALL_SIZE: f32 = 8.0;
const LINE_HEIGHT: f32 = 12.0;
const ROW_PADDING: f32 = 4.0;
const TABLE_HEADER_HEIGHT: f32 = 18.0;
const SECTION_GAP: f32 = 16.0;
const COLUMN_GAP: f32 = 16.0;
const LIST_INDENT: f32 = 14.0;
const SIGNATURE_HEIGHT: f32 = 96.0;

// Items table column widths; description takes the remainder
const COL_NO: f32 = 26.0;
const COL_QTY: f32 = 56.0;
const COL_PRICE: f32 = 96.0;
const COL_TOTAL: f32 = 100.0;

/// Issuer block printed in the header band of every page
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyProfile {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl From<&PdfConfig> for CompanyProfile {
    fn from(config: &PdfConfig) -> Self {
        Self {
            name: config.company_name.clone(),
            address: config.company_address.clone(),
            phone: config.company_phone.clone(),
        }
    }
}

/// `Quotation_<no>_<timestamp>.pdf`, with the number made file-name safe
pub fn quotation_file_name(quotation_no: &str, generated_at: NaiveDateTime) -> String {
    format!(
        "Quotation_{}_{}.pdf",
        sanitize_file_component(quotation_no),
        generated_at.format("%Y%m%d%H%M%S")
    )
}

/// Render `quotation` and write it into `output_dir`, returning the file path
pub async fn save_quotation_pdf(
    quotation: &Quotation,
    company: &CompanyProfile,
    output_dir: &Path,
) -> Result<PathBuf> {
    let bytes = QuotationRenderer::new(quotation, company).render()?;

    tokio::fs::create_dir_all(output_dir).await?;
    let file_name =
        quotation_file_name(&quotation.quotation_no, chrono::Local::now().naive_local());
    let path = output_dir.join(file_name);
    tokio::fs::write(&path, &bytes).await?;

    tracing::info!(
        "Quotation {} saved to {} ({} bytes)",
        quotation.quotation_no,
        path.display(),
        bytes.len()
    );
    Ok(path)
}

pub struct QuotationRenderer<'a> {
    quotation: &'a Quotation,
    company: &'a CompanyProfile,
    geometry: PageGeometry,
    doc: PdfDocument,
}

impl<'a> QuotationRenderer<'a> {
    pub fn new(quotation: &'a Quotation, company: &'a CompanyProfile) -> Self {
        let geometry = PageGeometry::a4();
        Self {
            quotation,
            company,
            geometry,
            doc: PdfDocument::new(geometry),
        }
    }

    pub fn render(self) -> Result<Vec<u8>> {
        self.layout().finish()
    }

    fn layout(mut self) -> PdfDocument {
        let mut cursor = self.geometry.top_of(0);
        cursor = self.draw_title(cursor);
        cursor = self.draw_items(cursor.advance(SECTION_GAP));

        let (terms_end, financial_end) = self.draw_columns(cursor.advance(SECTION_GAP));
        let resume = resume_at_max(terms_end, financial_end);
        self.draw_signature(resume.advance(SECTION_GAP));

        self.draw_page_bands();
        self.doc
    }

    /// Move to the next page when `height` does not fit below `cursor`
    fn reserve(&mut self, cursor: Cursor, height: f32) -> (Cursor, bool) {
        let (cursor, broke) = self.geometry.ensure_space(cursor, height);
        self.doc.ensure_page(cursor.page);
        (cursor, broke)
    }

    /// Draw pre-wrapped lines one by one, breaking pages as needed
    fn write_lines(
        &mut self,
        mut cursor: Cursor,
        x: f32,
        lines: &[String],
        style: FontStyle,
    ) -> Cursor {
        for line in lines {
            cursor = self.reserve(cursor, LINE_HEIGHT).0;
            self.doc.text(cursor.page, x, cursor.y, BODY_SIZE, style, line);
            cursor = cursor.advance(LINE_HEIGHT);
        }
        cursor
    }

    fn draw_title(&mut self, cursor: Cursor) -> Cursor {
        let q = self.quotation;
        let g = self.geometry;
        let half = g.content_width() / 2.0;

        self.doc
            .text_centered(cursor.page, cursor.y, TITLE_SIZE, FontStyle::Bold, "QUOTATION");
        let top = cursor.advance(TITLE_SIZE + 12.0);

        let mut left = self.write_lines(top, g.margin_left, &["To:".to_string()], FontStyle::Bold);
        let customer = wrap_text(&q.customer_name, BODY_SIZE, FontStyle::Bold, half - COLUMN_GAP);
        left = self.write_lines(left, g.margin_left, &customer, FontStyle::Bold);
        if let Some(address) = q.customer_address.as_deref() {
            let lines = wrap_text(address, BODY_SIZE, FontStyle::Regular, half - COLUMN_GAP);
            left = self.write_lines(left, g.margin_left, &lines, FontStyle::Regular);
        }
        if let Some(phone) = q.customer_phone.as_deref() {
            let line = [format!("Phone: {}", phone)];
            left = self.write_lines(left, g.margin_left, &line, FontStyle::Regular);
        }
        if let Some(attention) = q.attention.as_deref() {
            let line = [format!("Attn: {}", attention)];
            left = self.write_lines(left, g.margin_left, &line, FontStyle::Regular);
        }

        let mut details = vec![format!("No: {}", q.quotation_no)];
        if let Some(date) = q.quotation_date.as_deref() {
            details.push(format!("Date: {}", date));
        }
        if let Some(valid_until) = q.valid_until.as_deref() {
            details.push(format!("Valid Until: {}", valid_until));
        }
        let right = self.write_lines(top, g.margin_left + half, &details, FontStyle::Regular);

        let mut cursor = resume_at_max(left, right);
        if let Some(subject) = q.subject.as_deref() {
            let subject = format!("Subject: {}", subject);
            let lines = wrap_text(&subject, BODY_SIZE, FontStyle::Bold, g.content_width());
            let start = cursor.advance(LINE_HEIGHT / 2.0);
            cursor = self.write_lines(start, g.margin_left, &lines, FontStyle::Bold);
        }
        cursor
    }

    fn description_x(&self) -> f32 {
        self.geometry.margin_left + COL_NO
    }

    fn description_width(&self) -> f32 {
        self.geometry.content_width() - COL_NO - COL_QTY - COL_PRICE - COL_TOTAL
    }

    fn draw_table_header(&mut self, cursor: Cursor) -> Cursor {
        let g = self.geometry;
        let right = g.right_edge();
        let text_y = cursor.y + (TABLE_HEADER_HEIGHT - BODY_SIZE) / 2.0;
        let description_x = self.description_x();

        self.doc.fill_rect(
            cursor.page,
            g.margin_left,
            cursor.y,
            g.content_width(),
            TABLE_HEADER_HEIGHT,
            0.88,
        );
        self.doc.text(cursor.page, g.margin_left + 4.0, text_y, BODY_SIZE, FontStyle::Bold, "No");
        self.doc
            .text(cursor.page, description_x, text_y, BODY_SIZE, FontStyle::Bold, "Description");
        self.doc.text_right(
            cursor.page,
            right - COL_TOTAL - COL_PRICE - 4.0,
            text_y,
            BODY_SIZE,
            FontStyle::Bold,
            "Qty",
        );
        self.doc.text_right(
            cursor.page,
            right - COL_TOTAL - 4.0,
            text_y,
            BODY_SIZE,
            FontStyle::Bold,
            "Unit Price",
        );
        self.doc
            .text_right(cursor.page, right - 4.0, text_y, BODY_SIZE, FontStyle::Bold, "Total");

        cursor.advance(TABLE_HEADER_HEIGHT)
    }

    /// One description-column line inside the table; repeats the column
    /// header when it lands on a fresh page
    fn table_line(&mut self, cursor: Cursor, indent: f32, text: &str, style: FontStyle) -> Cursor {
        let (mut cursor, broke) = self.reserve(cursor, LINE_HEIGHT);
        if broke {
            cursor = self.draw_table_header(cursor);
        }
        let x = self.description_x() + indent;
        self.doc.text(cursor.page, x, cursor.y, BODY_SIZE, style, text);
        cursor.advance(LINE_HEIGHT)
    }

    fn draw_items(&mut self, cursor: Cursor) -> Cursor {
        let (cursor, _) = self.reserve(cursor, TABLE_HEADER_HEIGHT + LINE_HEIGHT * 2.0);
        let mut cursor = self.draw_table_header(cursor);

        let quotation = self.quotation;
        for (index, item) in quotation.items.iter().enumerate() {
            cursor = self.draw_item(cursor, index + 1, item);
        }
        cursor
    }

    fn draw_item(&mut self, cursor: Cursor, number: usize, item: &QuotationItem) -> Cursor {
        let g = self.geometry;
        let right = g.right_edge();
        let description_x = self.description_x();
        let width = self.description_width() - 4.0;

        let title = match item.brand_name.as_deref() {
            Some(brand) if !brand.trim().is_empty() => format!("{} - {}", item.product_name, brand),
            _ => item.product_name.clone(),
        };
        let title_lines = wrap_text(&title, BODY_SIZE, FontStyle::Bold, width);
        let row_height = title_lines.len().max(1) as f32 * LINE_HEIGHT + ROW_PADDING * 2.0;

        let (mut cursor, broke) = self.reserve(cursor, row_height);
        if broke {
            cursor = self.draw_table_header(cursor);
        }

        let text_y = cursor.y + ROW_PADDING;
        let quantity = match item.unit.as_deref() {
            Some(unit) => format!("{} {}", item.quantity.normalize(), unit),
            None => item.quantity.normalize().to_string(),
        };
        self.doc.text(
            cursor.page,
            g.margin_left + 4.0,
            text_y,
            BODY_SIZE,
            FontStyle::Regular,
            &number.to_string(),
        );
        for (i, line) in title_lines.iter().enumerate() {
            self.doc.text(
                cursor.page,
                description_x,
                text_y + i as f32 * LINE_HEIGHT,
                BODY_SIZE,
                FontStyle::Bold,
                line,
            );
        }
        self.doc.text_right(
            cursor.page,
            right - COL_TOTAL - COL_PRICE - 4.0,
            text_y,
            BODY_SIZE,
            FontStyle::Regular,
            &quantity,
        );
        self.doc.text_right(
            cursor.page,
            right - COL_TOTAL - 4.0,
            text_y,
            BODY_SIZE,
            FontStyle::Regular,
            &format_rupiah(item.price),
        );
        self.doc.text_right(
            cursor.page,
            right - 4.0,
            text_y,
            BODY_SIZE,
            FontStyle::Regular,
            &format_rupiah(item.line_total()),
        );
        cursor = cursor.advance(row_height);

        if let Some(description) = item.description.as_deref() {
            for line in wrap_text(description, BODY_SIZE, FontStyle::Italic, width) {
                cursor = self.table_line(cursor, 0.0, &line, FontStyle::Italic);
            }
        }

        if !item.specifications.is_empty() {
            cursor = self.table_line(cursor, 0.0, "Specifications:", FontStyle::Bold);
            for spec in &item.specifications {
                let text = if spec.value.trim().is_empty() {
                    format!("• {}", spec.name)
                } else {
                    format!("• {}: {}", spec.name, spec.value)
                };
                for line in wrap_text(&text, BODY_SIZE, FontStyle::Regular, width - LIST_INDENT) {
                    cursor = self.table_line(cursor, LIST_INDENT, &line, FontStyle::Regular);
                }
            }
        }

        if !item.accessories.is_empty() {
            cursor = self.table_line(cursor, 0.0, "Accessories:", FontStyle::Bold);
            for accessory in &item.accessories {
                let text = match (accessory.quantity, accessory.unit.as_deref()) {
                    (Some(qty), Some(unit)) => {
                        format!("• {} ({} {})", accessory.name, qty.normalize(), unit)
                    }
                    (Some(qty), None) => format!("• {} ({})", accessory.name, qty.normalize()),
                    _ => format!("• {}", accessory.name),
                };
                for line in wrap_text(&text, BODY_SIZE, FontStyle::Regular, width - LIST_INDENT) {
                    cursor = self.table_line(cursor, LIST_INDENT, &line, FontStyle::Regular);
                }
            }
        }

        self.doc
            .line(cursor.page, g.margin_left, cursor.y + 2.0, right, cursor.y + 2.0, 0.4);
        cursor.advance(ROW_PADDING)
    }

    /// Terms on the left, financial summary on the right. Each column keeps
    /// its own cursor and may run onto a different page than the other.
    fn draw_columns(&mut self, cursor: Cursor) -> (Cursor, Cursor) {
        let g = self.geometry;
        let terms_width = g.content_width() * 0.55;
        let financial_x = g.margin_left + terms_width + COLUMN_GAP;

        let (start, _) = self.reserve(cursor, LINE_HEIGHT * 4.0);
        let terms_end = self.draw_terms(start, g.margin_left, terms_width);
        let financial_end = self.draw_financial(start, financial_x, g.right_edge());
        (terms_end, financial_end)
    }

    fn draw_terms(&mut self, start: Cursor, x: f32, width: f32) -> Cursor {
        let instructions = self
            .quotation
            .term_content
            .as_deref()
            .map(rich_text::parse)
            .unwrap_or_default();
        if instructions.is_empty() {
            return start;
        }

        let title = ["Terms & Conditions".to_string()];
        let mut cursor = self.write_lines(start, x, &title, FontStyle::Bold);
        for instruction in &instructions {
            cursor = self.draw_instruction(cursor, x, width, instruction);
        }
        cursor
    }

    fn draw_instruction(
        &mut self,
        cursor: Cursor,
        x: f32,
        width: f32,
        instruction: &RenderInstruction,
    ) -> Cursor {
        match instruction {
            RenderInstruction::Heading(text) => {
                let lines = wrap_text(text, BODY_SIZE, FontStyle::Bold, width);
                self.write_lines(cursor.advance(LINE_HEIGHT / 3.0), x, &lines, FontStyle::Bold)
            }
            RenderInstruction::Paragraph(text) => {
                let lines = wrap_text(text, BODY_SIZE, FontStyle::Regular, width);
                self.write_lines(cursor, x, &lines, FontStyle::Regular)
            }
            RenderInstruction::NumberedItem { number, text } => {
                self.draw_list_item(cursor, x, width, &format!("{}.", number), text)
            }
            RenderInstruction::BulletItem(text) => {
                self.draw_list_item(cursor, x, width, "•", text)
            }
        }
    }

    fn draw_list_item(
        &mut self,
        cursor: Cursor,
        x: f32,
        width: f32,
        marker: &str,
        text: &str,
    ) -> Cursor {
        let lines = wrap_text(text, BODY_SIZE, FontStyle::Regular, width - LIST_INDENT);
        let (cursor, _) = self.reserve(cursor, LINE_HEIGHT);
        self.doc
            .text(cursor.page, x, cursor.y, BODY_SIZE, FontStyle::Regular, marker);
        self.write_lines(cursor, x + LIST_INDENT, &lines, FontStyle::Regular)
    }

    fn draw_financial(&mut self, start: Cursor, x: f32, right: f32) -> Cursor {
        let summary = FinancialSummary::from_quotation(self.quotation);
        let mut cursor = start;

        for (label, amount) in summary.rows() {
            let is_total = label == "Grand Total";
            let style = if is_total { FontStyle::Bold } else { FontStyle::Regular };

            cursor = self.reserve(cursor, LINE_HEIGHT + 2.0).0;
            if is_total {
                self.doc.line(cursor.page, x, cursor.y, right, cursor.y, 0.6);
                cursor = cursor.advance(2.0);
            }
            self.doc.text(cursor.page, x, cursor.y, BODY_SIZE, style, &label);
            self.doc
                .text_right(cursor.page, right, cursor.y, BODY_SIZE, style, &format_rupiah(amount));
            cursor = cursor.advance(LINE_HEIGHT);
        }
        cursor
    }

    fn draw_signature(&mut self, cursor: Cursor) {
        let g = self.geometry;
        let (cursor, _) = self.reserve(cursor, SIGNATURE_HEIGHT);
        let x = g.margin_left;
        let signer = self
            .quotation
            .sales_name
            .clone()
            .unwrap_or_else(|| "Authorized Signature".to_string());

        self.doc
            .text(cursor.page, x, cursor.y, BODY_SIZE, FontStyle::Regular, "Sincerely,");
        self.doc.text(
            cursor.page,
            x,
            cursor.y + LINE_HEIGHT,
            BODY_SIZE,
            FontStyle::Bold,
            &self.company.name,
        );
        let line_y = cursor.y + SIGNATURE_HEIGHT - LINE_HEIGHT * 2.0;
        self.doc.line(cursor.page, x, line_y, x + 160.0, line_y, 0.5);
        self.doc
            .text(cursor.page, x, line_y + 4.0, BODY_SIZE, FontStyle::Regular, &signer);
    }

    /// Header and footer bands, drawn last so the footer knows the page total
    fn draw_page_bands(&mut self) {
        let g = self.geometry;
        let total = self.doc.page_count();
        let right = g.right_edge();

        for page in 0..total {
            self.doc
                .text(page, g.margin_left, 22.0, 14.0, FontStyle::Bold, &self.company.name);
            let mut y = 40.0;
            for line in [self.company.address.as_deref(), self.company.phone.as_deref()]
                .into_iter()
                .flatten()
            {
                self.doc.text(page, g.margin_left, y, SMALL_SIZE, FontStyle::Regular, line);
                y += 10.0;
            }
            self.doc
                .line(page, g.margin_left, g.content_top - 16.0, right, g.content_top - 16.0, 1.0);

            let footer_y = g.content_bottom + 12.0;
            self.doc.line(page, g.margin_left, footer_y, right, footer_y, 0.5);
            self.doc.text(
                page,
                g.margin_left,
                footer_y + 6.0,
                SMALL_SIZE,
                FontStyle::Italic,
                &format!("Quotation {}", self.quotation.quotation_no),
            );
            self.doc.text_right(
                page,
                right,
                footer_y + 6.0,
                SMALL_SIZE,
                FontStyle::Regular,
                &format!("Page {} of {}", page + 1, total),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn company() -> CompanyProfile {
        CompanyProfile {
            name: "PT Mitra Tambang Nusantara".to_string(),
            address: Some("Jl. Sudirman 1, Jakarta".to_string()),
            phone: None,
        }
    }

    fn quotation(item_count: usize, term_content: Option<&str>) -> Quotation {
        let items: Vec<serde_json::Value> = (0..item_count)
            .map(|i| {
                serde_json::json!({
                    "product_name": format!("Excavator {}", i + 1),
                    "quantity": "1",
                    "unit": "unit",
                    "price": "1500000000",
                    "specifications": [
                        {"name": "Engine", "value": "Komatsu SAA6D107E-3"},
                        {"name": "Bucket", "value": "0.8 m3"}
                    ],
                    "accessories": [{"name": "Tool kit", "quantity": "1", "unit": "set"}]
                })
            })
            .collect();

        serde_json::from_value(serde_json::json!({
            "quotation_id": "q-1",
            "quotation_no": "QT/2024/001",
            "quotation_date": "2024-05-01",
            "customer_name": "PT Bara Kalimantan",
            "ppn_percentage": "11",
            "payment_percentage": "30",
            "term_content": term_content,
            "sales_name": "Rina",
            "items": items
        }))
        .unwrap()
    }

    #[test]
    fn test_short_quotation_fits_one_page() {
        let company = company();
        let q = quotation(1, Some("<ol><li>Prices exclude VAT</li></ol>"));
        let doc = QuotationRenderer::new(&q, &company).layout();

        assert_eq!(doc.page_count(), 1);
        let texts = doc.texts_on(0);
        assert!(texts.iter().any(|t| t == "Page 1 of 1"));
        assert!(texts.iter().any(|t| t == "Terms & Conditions"));
        assert!(texts.iter().any(|t| t == "Prices exclude VAT"));
        assert!(texts.iter().any(|t| t == "Grand Total"));
        assert!(texts.iter().any(|t| t == "Rina"));
    }

    #[test]
    fn test_long_item_table_paginates_with_header_and_footer_on_every_page() {
        let company = company();
        let q = quotation(25, None);
        let doc = QuotationRenderer::new(&q, &company).layout();

        let pages = doc.page_count();
        assert!(pages > 1);
        for page in 0..pages {
            let texts = doc.texts_on(page);
            assert!(texts.iter().any(|t| t == "PT Mitra Tambang Nusantara"));
            assert!(texts.iter().any(|t| *t == format!("Page {} of {}", page + 1, pages)));
        }
        // Column header repeats on each page the table spans
        assert!(doc.texts_on(1).iter().any(|t| t == "Description"));
    }

    #[test]
    fn test_long_terms_push_signature_past_financial_column() {
        let company = company();
        let terms: String = (1..=80)
            .map(|i| format!("<p>Clause {} applies to every unit delivered here.</p>", i))
            .collect();
        let q = quotation(1, Some(&terms));
        let doc = QuotationRenderer::new(&q, &company).layout();

        let last = doc.page_count() - 1;
        assert!(last >= 1);
        // Financial summary stays on the first page, signature follows the terms
        assert!(doc.texts_on(0).iter().any(|t| t == "Grand Total"));
        assert!(doc.texts_on(last).iter().any(|t| t == "Sincerely,"));
        assert!(!doc.texts_on(0).iter().any(|t| t == "Sincerely,"));
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let company = company();
        let q = quotation(3, Some("<p><b>Payment</b></p><p>Net 30</p>"));
        let bytes = QuotationRenderer::new(&q, &company).render().unwrap();

        let loaded = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(loaded.get_pages().len(), 1);
    }

    #[test]
    fn test_quotation_file_name() {
        let at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(13, 45, 9)
            .unwrap();
        assert_eq!(
            quotation_file_name("QT/2024/001", at),
            "Quotation_QT-2024-001_20240501134509.pdf"
        );
    }

    #[tokio::test]
    async fn test_save_quotation_pdf_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let company = company();
        let mut q = quotation(1, None);
        q.grand_total = Some(Decimal::new(1_665_000_000, 0));

        let path = save_quotation_pdf(&q, &company, dir.path()).await.unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("Quotation_QT-2024-001_"));
        assert!(name.ends_with(".pdf"));
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
