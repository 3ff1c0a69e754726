use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::core::error::Result;
use crate::modules::pdf::layout::{text_width, FontStyle, PageGeometry};

const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";
const FONT_ITALIC: &str = "F3";

/// Page-addressed drawing surface that serialises to a PDF with the three
/// standard Helvetica faces.
pub struct PdfDocument {
    geometry: PageGeometry,
    pages: Vec<Vec<Operation>>,
    #[cfg(test)]
    texts: Vec<Vec<String>>,
}

impl PdfDocument {
    pub fn new(geometry: PageGeometry) -> Self {
        let mut doc = Self {
            geometry,
            pages: Vec::new(),
            #[cfg(test)]
            texts: Vec::new(),
        };
        doc.ensure_page(0);
        doc
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Grow the page list so that `page` exists
    pub fn ensure_page(&mut self, page: usize) {
        while self.pages.len() <= page {
            self.pages.push(Vec::new());
            #[cfg(test)]
            self.texts.push(Vec::new());
        }
    }

    pub fn text(&mut self, page: usize, x: f32, y: f32, size: f32, style: FontStyle, text: &str) {
        if text.is_empty() {
            return;
        }
        self.ensure_page(page);

        let font = match style {
            FontStyle::Regular => FONT_REGULAR,
            FontStyle::Bold => FONT_BOLD,
            FontStyle::Italic => FONT_ITALIC,
        };
        // y is the top of the line; PDF places text on its baseline
        let baseline = self.geometry.height - y - size;

        self.pages[page].extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(font.as_bytes().to_vec()), Object::Real(size)]),
            Operation::new("Td", vec![Object::Real(x), Object::Real(baseline)]),
            Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(text))]),
            Operation::new("ET", vec![]),
        ]);

        #[cfg(test)]
        self.texts[page].push(text.to_string());
    }

    pub fn text_right(
        &mut self,
        page: usize,
        right: f32,
        y: f32,
        size: f32,
        style: FontStyle,
        text: &str,
    ) {
        let x = right - text_width(text, size, style);
        self.text(page, x, y, size, style, text);
    }

    pub fn text_centered(&mut self, page: usize, y: f32, size: f32, style: FontStyle, text: &str) {
        let x = (self.geometry.width - text_width(text, size, style)) / 2.0;
        self.text(page, x, y, size, style, text);
    }

    pub fn line(&mut self, page: usize, x1: f32, y1: f32, x2: f32, y2: f32, width: f32) {
        self.ensure_page(page);
        let h = self.geometry.height;
        self.pages[page].extend([
            Operation::new("w", vec![Object::Real(width)]),
            Operation::new("m", vec![Object::Real(x1), Object::Real(h - y1)]),
            Operation::new("l", vec![Object::Real(x2), Object::Real(h - y2)]),
            Operation::new("S", vec![]),
        ]);
    }

    /// Filled rectangle in a gray level (0 black, 1 white)
    pub fn fill_rect(&mut self, page: usize, x: f32, y: f32, width: f32, height: f32, gray: f32) {
        self.ensure_page(page);
        let h = self.geometry.height;
        self.pages[page].extend([
            Operation::new("q", vec![]),
            Operation::new("g", vec![Object::Real(gray)]),
            Operation::new(
                "re",
                vec![
                    Object::Real(x),
                    Object::Real(h - y - height),
                    Object::Real(width),
                    Object::Real(height),
                ],
            ),
            Operation::new("f", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    #[cfg(test)]
    pub fn texts_on(&self, page: usize) -> &[String] {
        self.texts.get(page).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Serialise every page into a PDF byte buffer
    pub fn finish(self) -> Result<Vec<u8>> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font = |name: &str| {
            dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => Object::Name(name.as_bytes().to_vec()),
                "Encoding" => "WinAnsiEncoding",
            }
        };
        let regular_id = doc.add_object(font("Helvetica"));
        let bold_id = doc.add_object(font("Helvetica-Bold"));
        let italic_id = doc.add_object(font("Helvetica-Oblique"));

        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                FONT_REGULAR => regular_id,
                FONT_BOLD => bold_id,
                FONT_ITALIC => italic_id,
            },
        });

        let mut kids = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.geometry.width),
                Object::Real(self.geometry.height),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

/// Map text onto WinAnsiEncoding bytes; unmapped characters print as '?'
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}
