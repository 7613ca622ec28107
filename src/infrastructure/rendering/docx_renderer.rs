use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::application::ports::{DocumentRenderer, RenderError};
use crate::domain::{DocumentFormat, InlineRun, LineKind, MinutesVariant, classify_line, tokenize_inline};

const SIGNATURE_LINE: &str = "______________________________";
const SIGNATURE_LABELS: [&str; 2] = ["O Presidente da Mesa", "O Secretário"];

pub const LEGAL_DISCLAIMER: &str = "Documento elaborado com apoio de inteligência artificial (AtaPro.pt) a partir das gravações fornecidas. O seu conteúdo deve ser revisto e validado pelos responsáveis antes da assinatura e não dispensa a verificação do cumprimento dos requisitos legais aplicáveis.";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/><w:sz w:val="22"/><w:lang w:val="pt-PT"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="120" w:line="276" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults></w:styles>"#;

const DOCUMENT_OPEN: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;

const SECTION_PROPERTIES: &str = r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr>"#;

const DOCUMENT_CLOSE: &str = "</w:body></w:document>";

/// Word document: centred title, justified body with bold runs, signature
/// table and a closing disclaimer.
pub struct DocxRenderer;

#[derive(Clone, Copy, Default)]
struct RunStyle {
    bold: bool,
    italic: bool,
    half_points: Option<u32>,
}

impl DocxRenderer {
    fn document_xml(text: &str, variant: MinutesVariant) -> String {
        let mut body = String::from(DOCUMENT_OPEN);

        body.push_str(&paragraph(
            r#"<w:jc w:val="center"/><w:spacing w:after="360"/>"#,
            &run(
                variant.title(),
                RunStyle {
                    bold: true,
                    half_points: Some(32),
                    ..RunStyle::default()
                },
            ),
        ));

        for line in text.lines() {
            body.push_str(&Self::line_xml(line));
        }

        body.push_str(&Self::signature_table());
        body.push_str(&paragraph(
            r#"<w:jc w:val="both"/><w:spacing w:before="480"/>"#,
            &run(
                LEGAL_DISCLAIMER,
                RunStyle {
                    italic: true,
                    half_points: Some(16),
                    ..RunStyle::default()
                },
            ),
        ));

        body.push_str(SECTION_PROPERTIES);
        body.push_str(DOCUMENT_CLOSE);
        body
    }

    fn line_xml(line: &str) -> String {
        match classify_line(line) {
            LineKind::Blank => "<w:p/>".to_string(),
            LineKind::Heading(heading) => {
                let runs: String = tokenize_inline(heading)
                    .iter()
                    .map(|r| {
                        run(
                            r.text(),
                            RunStyle {
                                bold: true,
                                half_points: Some(24),
                                ..RunStyle::default()
                            },
                        )
                    })
                    .collect();
                paragraph(r#"<w:spacing w:before="240"/>"#, &runs)
            }
            LineKind::Bullet(item) => {
                let runs = format!(
                    "{}{}",
                    run("\u{2022}\t", RunStyle::default()),
                    inline_runs(item)
                );
                paragraph(
                    r#"<w:jc w:val="both"/><w:ind w:left="720" w:hanging="360"/>"#,
                    &runs,
                )
            }
            LineKind::Body(body) => paragraph(r#"<w:jc w:val="both"/>"#, &inline_runs(body)),
        }
    }

    fn signature_table() -> String {
        let mut xml = String::from(
            r#"<w:p/><w:tbl><w:tblPr><w:tblW w:w="5000" w:type="pct"/><w:jc w:val="center"/></w:tblPr><w:tblGrid><w:gridCol w:w="4513"/><w:gridCol w:w="4513"/></w:tblGrid><w:tr>"#,
        );
        for label in SIGNATURE_LABELS {
            xml.push_str(r#"<w:tc><w:tcPr><w:tcW w:w="2500" w:type="pct"/></w:tcPr>"#);
            xml.push_str(&paragraph(
                r#"<w:jc w:val="center"/><w:spacing w:before="720"/>"#,
                &run(SIGNATURE_LINE, RunStyle::default()),
            ));
            xml.push_str(&paragraph(
                r#"<w:jc w:val="center"/>"#,
                &run(label, RunStyle::default()),
            ));
            xml.push_str("</w:tc>");
        }
        xml.push_str("</w:tr></w:tbl>");
        xml
    }
}

impl DocumentRenderer for DocxRenderer {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    fn render(&self, text: &str, variant: MinutesVariant) -> Result<Vec<u8>, RenderError> {
        let document = Self::document_xml(text, variant);
        let parts: [(&str, &str); 5] = [
            ("[Content_Types].xml", CONTENT_TYPES_XML),
            ("_rels/.rels", PACKAGE_RELS_XML),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML),
            ("word/styles.xml", STYLES_XML),
            ("word/document.xml", &document),
        ];

        let mut buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
            let options = FileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .last_modified_time(DateTime::default())
                .unix_permissions(0o644);

            for (name, content) in parts {
                zip.start_file(name, options)
                    .map_err(|e| RenderError::Docx(e.to_string()))?;
                zip.write_all(content.as_bytes())?;
            }
            zip.finish().map_err(|e| RenderError::Docx(e.to_string()))?;
        }

        Ok(buffer)
    }
}

fn paragraph(properties: &str, runs: &str) -> String {
    format!("<w:p><w:pPr>{}</w:pPr>{}</w:p>", properties, runs)
}

fn run(text: &str, style: RunStyle) -> String {
    let mut properties = String::new();
    if style.bold {
        properties.push_str("<w:b/>");
    }
    if style.italic {
        properties.push_str("<w:i/>");
    }
    if let Some(size) = style.half_points {
        properties.push_str(&format!(r#"<w:sz w:val="{}"/>"#, size));
    }

    let text_xml = if text.contains('\t') {
        text.split('\t')
            .map(|segment| format!(r#"<w:t xml:space="preserve">{}</w:t>"#, escape_xml(segment)))
            .collect::<Vec<_>>()
            .join("<w:tab/>")
    } else {
        format!(r#"<w:t xml:space="preserve">{}</w:t>"#, escape_xml(text))
    };

    if properties.is_empty() {
        format!("<w:r>{}</w:r>", text_xml)
    } else {
        format!("<w:r><w:rPr>{}</w:rPr>{}</w:r>", properties, text_xml)
    }
}

fn inline_runs(text: &str) -> String {
    tokenize_inline(text)
        .iter()
        .map(|r| match r {
            InlineRun::Bold(t) => run(
                t,
                RunStyle {
                    bold: true,
                    ..RunStyle::default()
                },
            ),
            InlineRun::Plain(t) => run(t, RunStyle::default()),
        })
        .collect()
}

pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c if c.is_control() && c != '\t' => {}
            c => escaped.push(c),
        }
    }
    escaped
}
