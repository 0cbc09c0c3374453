//! Page extractors

mod markdown;
mod pdf;
mod plain_text;

pub use markdown::MarkdownExtractor;
pub use pdf::PdfExtractor;
pub use plain_text::{PlainTextExtractor, FORM_FEED};

#[cfg(test)]
pub(crate) use pdf::fixture::pdf as pdf_fixture;
