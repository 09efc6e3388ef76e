//! 配置：目录关键字与大小写例外表
//!
//! 查找顺序：命令行 `--config`，环境变量 `RBOOKMARK_CONFIG`（可写在 `.env` 中），
//! 用户配置目录下的 `rbookmark/config.json`，都没有时用默认值。

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dotenvy::dotenv;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::text::{ExceptionRule, TitleCaseRules, TitleCaser, TocMatcher, DEFAULT_TOC_KEYWORDS};

/// 指定配置文件路径的环境变量
pub const CONFIG_ENV: &str = "RBOOKMARK_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 目录条目关键字，不区分大小写
    pub toc_keywords: Vec<String>,
    /// fix 时是否把目录条目设为粗体
    pub bold_toc: bool,
    pub small_words: Vec<ExceptionRule>,
    pub strong_prefixes: Vec<ExceptionRule>,
}

impl Default for Settings {
    fn default() -> Self {
        let rules = TitleCaseRules::default();
        Self {
            toc_keywords: DEFAULT_TOC_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            bold_toc: true,
            small_words: rules.small_words,
            strong_prefixes: rules.strong_prefixes,
        }
    }
}

impl Settings {
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        dotenv().ok();
        let from_env = env::var(CONFIG_ENV).ok();
        match resolve_path(explicit, from_env, Self::default_path()) {
            Some(path) => Self::from_file(&path),
            None => {
                debug!("[Settings] no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let settings = Self::from_json(&text)?;
        info!("[Settings] loaded {:?}", path);
        Ok(settings)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// `<config_dir>/rbookmark/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rbookmark").join("config.json"))
    }

    pub fn title_caser(&self) -> TitleCaser {
        TitleCaser::new(TitleCaseRules {
            small_words: self.small_words.clone(),
            strong_prefixes: self.strong_prefixes.clone(),
        })
    }

    pub fn toc_matcher(&self) -> Result<TocMatcher> {
        TocMatcher::from_keywords(&self.toc_keywords)
    }
}

/// 显式路径和环境变量必须存在，默认路径只在文件存在时使用
fn resolve_path(explicit: Option<&Path>, from_env: Option<String>, default: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = from_env.filter(|p| !p.trim().is_empty()) {
        return Some(PathBuf::from(path));
    }
    default.filter(|p| p.is_file())
}
