use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};

use crate::application::ports::{DocumentRenderer, RenderError};
use crate::domain::{DocumentFormat, LineKind, MinutesVariant, classify_line, strip_inline_markers};

use super::text_layout::{helvetica_char_width, helvetica_text_width, wrap_text};

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN_LEFT: i64 = 56;
const MARGIN_TOP: i64 = 64;
const MARGIN_BOTTOM: i64 = 72;
const BODY_SIZE: i64 = 11;
const TITLE_SIZE: i64 = 16;
const FOOTER_SIZE: i64 = 9;
const LEADING: i64 = 15;
const TEXT_WIDTH: i64 = PAGE_WIDTH - 2 * MARGIN_LEFT;
const BULLET_INDENT: i64 = 14;

const WATERMARK_TEXT: &str = "AtaPro.pt";
const WATERMARK_SIZE: i64 = 54;
const WATERMARK_ORIGINS: [(i64, i64); 3] = [(150, 110), (150, 370), (150, 630)];

const REGULAR_FONT: &[u8] = b"F1";
const BOLD_FONT: &[u8] = b"F2";

#[derive(Debug, Clone, PartialEq)]
struct LayoutLine {
    text: String,
    bold: bool,
    indent: i64,
}

impl LayoutLine {
    fn blank() -> Self {
        Self {
            text: String::new(),
            bold: false,
            indent: 0,
        }
    }
}

/// A4 pages of flat Helvetica text over a diagonal watermark.
pub struct PdfRenderer;

impl PdfRenderer {
    fn layout(text: &str) -> Vec<LayoutLine> {
        let mut lines = Vec::new();
        for raw in text.lines() {
            match classify_line(raw) {
                LineKind::Blank => lines.push(LayoutLine::blank()),
                LineKind::Heading(heading) => {
                    for wrapped in wrap_body(&strip_inline_markers(heading), true, TEXT_WIDTH) {
                        lines.push(LayoutLine {
                            text: wrapped,
                            bold: true,
                            indent: 0,
                        });
                    }
                }
                LineKind::Bullet(item) => {
                    let wrapped =
                        wrap_body(&strip_inline_markers(item), false, TEXT_WIDTH - BULLET_INDENT);
                    for (i, part) in wrapped.into_iter().enumerate() {
                        let text = if i == 0 {
                            format!("\u{2022} {}", part)
                        } else {
                            part
                        };
                        lines.push(LayoutLine {
                            text,
                            bold: false,
                            indent: if i == 0 { 0 } else { BULLET_INDENT },
                        });
                    }
                }
                LineKind::Body(body) => {
                    for wrapped in wrap_body(&strip_inline_markers(body), false, TEXT_WIDTH) {
                        lines.push(LayoutLine {
                            text: wrapped,
                            bold: false,
                            indent: 0,
                        });
                    }
                }
            }
        }
        lines
    }

    fn paginate(lines: Vec<LayoutLine>) -> Vec<Vec<LayoutLine>> {
        let usable = (PAGE_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM) / LEADING;
        let first_page = (usable - 2).max(1) as usize;
        let other_pages = usable.max(1) as usize;

        let mut pages = Vec::new();
        let mut remaining = lines.into_iter().peekable();
        let mut capacity = first_page;
        loop {
            let page: Vec<LayoutLine> = remaining.by_ref().take(capacity).collect();
            pages.push(page);
            if remaining.peek().is_none() {
                break;
            }
            capacity = other_pages;
        }
        pages
    }

    fn page_content(
        title: Option<&str>,
        lines: &[LayoutLine],
        page_number: usize,
        page_count: usize,
    ) -> Vec<Operation> {
        let mut ops = Vec::new();

        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "rg",
            vec![Object::Real(0.9), Object::Real(0.9), Object::Real(0.9)],
        ));
        for (x, y) in WATERMARK_ORIGINS {
            ops.push(Operation::new("BT", vec![]));
            ops.push(font_op(BOLD_FONT, WATERMARK_SIZE));
            ops.push(Operation::new(
                "Tm",
                vec![
                    Object::Real(0.7071),
                    Object::Real(0.7071),
                    Object::Real(-0.7071),
                    Object::Real(0.7071),
                    Object::Integer(x),
                    Object::Integer(y),
                ],
            ));
            ops.push(show_text(WATERMARK_TEXT));
            ops.push(Operation::new("ET", vec![]));
        }
        ops.push(Operation::new("Q", vec![]));

        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("g", vec![Object::Integer(0)]));

        let mut y = PAGE_HEIGHT - MARGIN_TOP;
        if let Some(title) = title {
            let width = text_width(title, TITLE_SIZE, true);
            ops.push(font_op(BOLD_FONT, TITLE_SIZE));
            ops.push(move_to(((PAGE_WIDTH - width) / 2).max(MARGIN_LEFT), y));
            ops.push(show_text(title));
            y -= LEADING * 2;
        }

        for line in lines {
            if !line.text.is_empty() {
                let font = if line.bold { BOLD_FONT } else { REGULAR_FONT };
                ops.push(font_op(font, BODY_SIZE));
                ops.push(move_to(MARGIN_LEFT + line.indent, y));
                ops.push(show_text(&line.text));
            }
            y -= LEADING;
        }

        let footer = format!("Página {} de {}", page_number, page_count);
        ops.push(font_op(REGULAR_FONT, FOOTER_SIZE));
        ops.push(move_to(
            (PAGE_WIDTH - text_width(&footer, FOOTER_SIZE, false)) / 2,
            MARGIN_BOTTOM / 2,
        ));
        ops.push(show_text(&footer));
        ops.push(Operation::new("ET", vec![]));

        ops
    }
}

impl DocumentRenderer for PdfRenderer {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn render(&self, text: &str, variant: MinutesVariant) -> Result<Vec<u8>, RenderError> {
        let pages = Self::paginate(Self::layout(text));
        let page_count = pages.len();

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular_id,
                "F2" => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(page_count);
        for (index, lines) in pages.iter().enumerate() {
            let title = (index == 0).then(|| variant.title());
            let content = Content {
                operations: Self::page_content(title, lines, index + 1, page_count),
            };
            let encoded = content
                .encode()
                .map_err(|e| RenderError::Pdf(e.to_string()))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(page_count as i64),
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(PAGE_WIDTH),
                Object::Integer(PAGE_HEIGHT),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::String(encode_win_ansi(variant.title()), StringFormat::Literal),
            "Producer" => Object::string_literal("AtaPro.pt"),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        Ok(bytes)
    }
}

fn font_op(font: &[u8], size: i64) -> Operation {
    Operation::new(
        "Tf",
        vec![Object::Name(font.to_vec()), Object::Integer(size)],
    )
}

fn move_to(x: i64, y: i64) -> Operation {
    Operation::new(
        "Tm",
        vec![
            Object::Integer(1),
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(1),
            Object::Integer(x),
            Object::Integer(y),
        ],
    )
}

fn show_text(text: &str) -> Operation {
    Operation::new(
        "Tj",
        vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
    )
}

/// Wraps body-size text so each line fits within `width` points.
fn wrap_body(text: &str, bold: bool, width: i64) -> Vec<String> {
    let budget = (width * 1000 / BODY_SIZE) as u32;
    wrap_text(text, budget, |c| helvetica_char_width(c, bold))
}

fn text_width(text: &str, size: i64, bold: bool) -> i64 {
    (i64::from(helvetica_text_width(text, bold)) * size + 999) / 1000
}

/// Windows-1252 bytes for the standard fonts; anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\t' => b' ',
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            c if (' '..='~').contains(&c) => c as u8,
            c if ('\u{A0}'..='\u{FF}').contains(&c) => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}
