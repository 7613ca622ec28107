mod docx_renderer;
mod pdf_renderer;
mod plain_text_renderer;
mod renderer_factory;
mod text_layout;

pub use docx_renderer::{DocxRenderer, LEGAL_DISCLAIMER, escape_xml};
pub use pdf_renderer::{PdfRenderer, encode_win_ansi};
pub use plain_text_renderer::PlainTextRenderer;
pub use renderer_factory::DocumentRendererFactory;
pub use text_layout::{helvetica_char_width, helvetica_text_width, wrap_text};
