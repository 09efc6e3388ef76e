use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Result;

/// 默认目录关键字（英文、德文）
pub const DEFAULT_TOC_KEYWORDS: [&str; 2] = ["CONTENTS", "Inhalt"];

lazy_static! {
    static ref DEFAULT_TOC_PATTERN: Option<Regex> =
        build_pattern(&DEFAULT_TOC_KEYWORDS).expect("default TOC keywords are valid");
}

fn build_pattern<S: AsRef<str>>(keywords: &[S]) -> std::result::Result<Option<Regex>, regex::Error> {
    let alternatives: Vec<String> = keywords
        .iter()
        .map(|k| k.as_ref().trim())
        .filter(|k| !k.is_empty())
        .map(regex::escape)
        .collect();
    if alternatives.is_empty() {
        return Ok(None);
    }
    Regex::new(&format!("(?i)(?:{})", alternatives.join("|"))).map(Some)
}

/// 目录条目识别：标题中包含任一关键字（不区分大小写）
#[derive(Debug, Clone)]
pub struct TocMatcher {
    /// None：没有关键字，永不匹配
    pattern: Option<Regex>,
}

impl TocMatcher {
    pub fn from_keywords<S: AsRef<str>>(keywords: &[S]) -> Result<Self> {
        Ok(Self {
            pattern: build_pattern(keywords)?,
        })
    }

    pub fn is_match(&self, title: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.is_match(title))
    }
}

impl Default for TocMatcher {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_TOC_PATTERN.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keywords_case_insensitive() {
        let toc = TocMatcher::default();
        assert!(toc.is_match("Table of Contents"));
        assert!(toc.is_match("CONTENTS"));
        assert!(toc.is_match("Inhaltsverzeichnis"));
        assert!(!toc.is_match("Chapter 1"));
    }

    #[test]
    fn test_keywords_are_literal() {
        let toc = TocMatcher::from_keywords(&["a.b", "(x)"]).unwrap();
        assert!(toc.is_match("see A.B here"));
        assert!(!toc.is_match("aXb"));
        assert!(toc.is_match("(x)"));
    }

    #[test]
    fn test_empty_keywords_never_match() {
        let toc = TocMatcher::from_keywords::<&str>(&[]).unwrap();
        assert!(!toc.is_match("Contents"));
        assert!(!toc.is_match(""));
    }
}
