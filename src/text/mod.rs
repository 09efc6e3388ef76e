pub mod title_case;
pub mod toc;

pub use title_case::{normalize, ExceptionRule, TitleCaseRules, TitleCaser};
pub use toc::{TocMatcher, DEFAULT_TOC_KEYWORDS};
