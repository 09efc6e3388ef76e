pub mod annotations;
pub mod document;
pub mod outline;
pub mod utils;

#[cfg(test)]
pub(crate) mod fixtures;

pub use document::PdfDocument;
