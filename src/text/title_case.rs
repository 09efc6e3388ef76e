//! Title-case normalization for bookmark titles.
//!
//! Two passes over the title: every ASCII letter is lowered, then a single
//! left-to-right scan re-capitalizes the first letter of each word. Small words
//! ("of", "the", ...) stay lowercase unless they open the title or a sentence;
//! roman numerals and configured abbreviations are uppercased for the whole word.

use serde::{Deserialize, Serialize};

/// 句末标点，之后的第一个词不做小词处理
const SENTENCE_END: [char; 4] = [':', '.', '!', '?'];

const SMALL_WORDS: [&str; 10] = ["over", "and", "for", "the", "in", "on", "of", "at", "an", "a"];

const STRONG_PREFIXES: [(&str, bool); 3] = [("ii", false), ("iv", false), ("gch", true)];

/// 前缀匹配规则，`trailing_space` 为 true 时前缀后必须紧跟空格
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionRule {
    pub prefix: String,
    #[serde(default)]
    pub trailing_space: bool,
}

impl ExceptionRule {
    pub fn new(prefix: impl Into<String>, trailing_space: bool) -> Self {
        Self {
            prefix: prefix.into().to_ascii_lowercase(),
            trailing_space,
        }
    }

    /// Look-ahead never reads past the end: a window that does not fit is no match.
    fn matches_at(&self, chars: &[char], start: usize) -> bool {
        let mut idx = start;
        for expected in self.prefix.chars() {
            match chars.get(idx) {
                Some(c) if c.to_ascii_lowercase() == expected => idx += 1,
                _ => return false,
            }
        }
        !self.trailing_space || chars.get(idx) == Some(&' ')
    }
}

/// 大小写例外表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleCaseRules {
    /// 不大写的小词
    pub small_words: Vec<ExceptionRule>,
    /// 触发整词大写的前缀（罗马数字、缩写）
    pub strong_prefixes: Vec<ExceptionRule>,
}

impl Default for TitleCaseRules {
    fn default() -> Self {
        Self {
            small_words: SMALL_WORDS
                .iter()
                .map(|word| ExceptionRule::new(*word, true))
                .collect(),
            strong_prefixes: STRONG_PREFIXES
                .iter()
                .map(|(prefix, space)| ExceptionRule::new(*prefix, *space))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// 词首，下一个字母可大写
    WordStart,
    /// 词中，不再大写
    InWord,
    /// 强制大写直到下一个空格
    Strong,
}

#[derive(Debug, Clone, Default)]
pub struct TitleCaser {
    rules: TitleCaseRules,
}

impl TitleCaser {
    pub fn new(rules: TitleCaseRules) -> Self {
        // 配置文件里的前缀可能带大写；空前缀在任意位置都匹配，丢弃
        let lower = |rules: Vec<ExceptionRule>| {
            rules
                .into_iter()
                .filter(|rule| !rule.prefix.is_empty())
                .map(|rule| ExceptionRule::new(rule.prefix, rule.trailing_space))
                .collect()
        };
        Self {
            rules: TitleCaseRules {
                small_words: lower(rules.small_words),
                strong_prefixes: lower(rules.strong_prefixes),
            },
        }
    }

    pub fn normalize(&self, text: &str) -> String {
        let mut chars: Vec<char> = text.chars().map(|c| c.to_ascii_lowercase()).collect();

        let mut state = ScanState::WordStart;
        let mut sentence_start = true;

        for i in 0..chars.len() {
            let c = chars[i];
            if c == ' ' {
                state = ScanState::WordStart;
                continue;
            }
            if SENTENCE_END.contains(&c) {
                sentence_start = true;
                continue;
            }
            // 数字和其它符号不影响词首状态
            if !c.is_alphabetic() {
                continue;
            }

            if state != ScanState::InWord {
                let suppressed = state == ScanState::WordStart
                    && !sentence_start
                    && self.is_small_word(&chars, i);
                if !suppressed {
                    chars[i] = c.to_ascii_uppercase();
                    if self.is_strong(&chars, i) {
                        state = ScanState::Strong;
                    }
                }
            }
            if state == ScanState::WordStart {
                state = ScanState::InWord;
            }
            sentence_start = false;
        }

        chars.into_iter().collect()
    }

    fn is_small_word(&self, chars: &[char], i: usize) -> bool {
        self.rules.small_words.iter().any(|rule| rule.matches_at(chars, i))
    }

    fn is_strong(&self, chars: &[char], i: usize) -> bool {
        self.rules.strong_prefixes.iter().any(|rule| rule.matches_at(chars, i))
    }
}

/// Normalize with the built-in exception tables.
pub fn normalize(text: &str) -> String {
    TitleCaser::default().normalize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_words_after_first_word() {
        assert_eq!(normalize("THE LORD OF THE RINGS"), "The Lord of the Rings");
        assert_eq!(normalize("war and peace"), "War and Peace");
    }

    #[test]
    fn test_roman_numeral_and_sentence_start() {
        assert_eq!(normalize("chapter iv: the return"), "Chapter IV: The Return");
    }

    #[test]
    fn test_roman_numeral_whole_word() {
        assert_eq!(normalize("part iii"), "Part III");
        assert_eq!(normalize("appendix ii. tables"), "Appendix II. Tables");
    }

    #[test]
    fn test_strong_ends_at_space() {
        assert_eq!(normalize("book ii of the saga"), "Book II of the Saga");
    }

    #[test]
    fn test_abbreviation_needs_trailing_space() {
        assert_eq!(normalize("the gch rules"), "The GCH Rules");
        // 标题末尾没有空格，不算缩写
        assert_eq!(normalize("about gch"), "About Gch");
    }

    #[test]
    fn test_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "   ");
    }

    #[test]
    fn test_lookahead_clamped_at_end() {
        // "the"/"a" 在末尾缺少空格，不匹配小词
        assert_eq!(normalize("gone with the"), "Gone With The");
        assert_eq!(normalize("life of a"), "Life of A");
        assert_eq!(normalize("i"), "I");
        assert_eq!(normalize("x i"), "X I");
    }

    #[test]
    fn test_only_first_letter_of_word() {
        assert_eq!(normalize("McDONALD's FARM"), "Mcdonald's Farm");
    }

    #[test]
    fn test_digits_keep_word_start() {
        assert_eq!(normalize("2nd edition"), "2Nd Edition");
        assert_eq!(normalize("3d modeling"), "3D Modeling");
        assert_eq!(normalize("chapter 1 the end"), "Chapter 1 the End");
        assert_eq!(normalize("1984"), "1984");
    }

    #[test]
    fn test_small_word_inside_word_not_matched() {
        // "in" 只在词首匹配
        assert_eq!(normalize("the main index"), "The Main Index");
    }

    #[test]
    fn test_punctuation_before_word() {
        assert_eq!(normalize("notes (the draft)"), "Notes (the Draft)");
        assert_eq!(normalize("\"war\" and peace"), "\"War\" and Peace");
    }

    #[test]
    fn test_non_ascii_left_alone() {
        assert_eq!(normalize("école normale"), "école Normale");
        assert_eq!(normalize("ÜBER ALLES"), "Über Alles");
    }

    #[test]
    fn test_input_not_mutated() {
        let title = String::from("A TALE OF TWO CITIES");
        let out = normalize(&title);
        assert_eq!(title, "A TALE OF TWO CITIES");
        assert_eq!(out, "A Tale of Two Cities");
    }

    #[test]
    fn test_custom_rules() {
        let rules = TitleCaseRules {
            small_words: vec![ExceptionRule::new("VON", true)],
            strong_prefixes: vec![ExceptionRule::new("usa", false)],
        };
        let caser = TitleCaser::new(rules);
        assert_eq!(caser.normalize("ludwig von beethoven"), "Ludwig von Beethoven");
        assert_eq!(caser.normalize("made in usa"), "Made In USA");
    }

    #[test]
    fn test_empty_prefixes_ignored() {
        let rules = TitleCaseRules {
            small_words: vec![ExceptionRule::new("", false), ExceptionRule::new("of", true)],
            strong_prefixes: vec![ExceptionRule::new("", true)],
        };
        let caser = TitleCaser::new(rules);
        assert_eq!(caser.normalize("lord of the rings"), "Lord of The Rings");
    }

    #[test]
    fn test_idempotent() {
        for title in ["THE LORD OF THE RINGS", "chapter iv: the return", "a b c", "Part II and III"] {
            let once = normalize(title);
            assert_eq!(normalize(&once), once);
        }
    }
}
