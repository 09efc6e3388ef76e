pub mod config;
pub mod controllers;
pub mod entity;
pub mod error;
pub mod outline;
pub mod pdf;
pub mod text;

pub use config::Settings;
pub use controllers::{CommandReport, DocumentController, ReportKind};
pub use entity::{Action, DestRect, Destination, FitType, OutlineItem};
pub use error::{Error, Result};
pub use outline::{AnnotationHost, MemoryOutline, NodeId, OutlineHost, WalkMode};
pub use pdf::PdfDocument;
pub use text::{normalize, TitleCaser, TocMatcher};
