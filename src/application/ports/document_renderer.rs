use crate::domain::{DocumentFormat, MinutesVariant};

/// Pure text-to-document conversion. Same input, same bytes.
pub trait DocumentRenderer: Send + Sync {
    fn format(&self) -> DocumentFormat;

    fn render(&self, text: &str, variant: MinutesVariant) -> Result<Vec<u8>, RenderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("pdf rendering failed: {0}")]
    Pdf(String),
    #[error("docx packaging failed: {0}")]
    Docx(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
