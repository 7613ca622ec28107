use std::sync::Arc;

use crate::application::ports::DocumentRenderer;
use crate::domain::DocumentFormat;

use super::docx_renderer::DocxRenderer;
use super::pdf_renderer::PdfRenderer;
use super::plain_text_renderer::PlainTextRenderer;

pub struct DocumentRendererFactory;

impl DocumentRendererFactory {
    pub fn create(format: DocumentFormat) -> Arc<dyn DocumentRenderer> {
        match format {
            DocumentFormat::PlainText => Arc::new(PlainTextRenderer),
            DocumentFormat::Pdf => Arc::new(PdfRenderer),
            DocumentFormat::Docx => Arc::new(DocxRenderer),
        }
    }

    pub fn all() -> Vec<Arc<dyn DocumentRenderer>> {
        [
            DocumentFormat::PlainText,
            DocumentFormat::Pdf,
            DocumentFormat::Docx,
        ]
        .into_iter()
        .map(Self::create)
        .collect()
    }
}
