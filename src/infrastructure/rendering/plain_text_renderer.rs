use crate::application::ports::{DocumentRenderer, RenderError};
use crate::domain::{DocumentFormat, MinutesVariant};

pub struct PlainTextRenderer;

impl DocumentRenderer for PlainTextRenderer {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::PlainText
    }

    fn render(&self, text: &str, _variant: MinutesVariant) -> Result<Vec<u8>, RenderError> {
        Ok(text.as_bytes().to_vec())
    }
}
