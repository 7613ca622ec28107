use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    PlainText,
    Pdf,
    Docx,
}

impl DocumentFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::PlainText => "txt",
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            DocumentFormat::PlainText => "text/plain; charset=utf-8",
            DocumentFormat::Pdf => "application/pdf",
            DocumentFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" | "text" => Ok(DocumentFormat::PlainText),
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" | "word" => Ok(DocumentFormat::Docx),
            other => Err(format!(
                "Unsupported document format: {}. Expected: txt, pdf, or docx",
                other
            )),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}
