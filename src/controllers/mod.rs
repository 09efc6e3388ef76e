pub mod document_controller;

pub use document_controller::{CommandReport, DocumentController, ReportKind};
