use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::config::Settings;
use crate::entity::OutlineItem;
use crate::error::Error;
use crate::outline::{self, WalkMode};
use crate::pdf::PdfDocument;
use crate::text::{TitleCaser, TocMatcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Bookmarks,
    Annotations,
}

/// 命令结果，由调用方决定如何展示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandReport {
    pub kind: ReportKind,
    pub changed: usize,
}

impl CommandReport {
    pub fn bookmarks(changed: usize) -> Self {
        Self { kind: ReportKind::Bookmarks, changed }
    }

    pub fn annotations(changed: usize) -> Self {
        Self { kind: ReportKind::Annotations, changed }
    }
}

impl fmt::Display for CommandReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = match self.kind {
            ReportKind::Bookmarks => "bookmarks",
            ReportKind::Annotations => "annotations",
        };
        write!(f, "Changed {} {}.", self.changed, noun)
    }
}

/// 持有当前文档并分发命令。
///
/// 没有打开的文档时命令处于禁用状态，返回 None，不会进入遍历。
pub struct DocumentController {
    document: Option<PdfDocument>,
    path: Option<PathBuf>,
    settings: Settings,
    caser: TitleCaser,
    toc: TocMatcher,
}

impl DocumentController {
    pub fn new(settings: Settings) -> Result<Self> {
        let toc = settings
            .toc_matcher()
            .with_context(|| format!("Invalid TOC keywords: {:?}", settings.toc_keywords))?;
        let caser = settings.title_caser();
        Ok(Self {
            document: None,
            path: None,
            settings,
            caser,
            toc,
        })
    }

    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let document = PdfDocument::open(path)
            .with_context(|| format!("Failed to open PDF file: {}", path.display()))?;
        if document.outline_root().is_none() {
            warn!("[DocumentController] {} has no outline", path.display());
        }
        self.document = Some(document);
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// 直接接管已加载的文档，没有文件路径
    pub fn open_document(&mut self, document: PdfDocument) {
        self.document = Some(document);
        self.path = None;
    }

    pub fn close(&mut self) {
        if let Some(path) = self.path.take() {
            info!("[DocumentController] closing {}", path.display());
        }
        self.document = None;
    }

    pub fn is_enabled(&self) -> bool {
        self.document.is_some()
    }

    pub fn document(&self) -> Option<&PdfDocument> {
        self.document.as_ref()
    }

    pub fn collapse_all(&mut self) -> Option<CommandReport> {
        self.run_outline(WalkMode::Collapse)
    }

    pub fn fix_destinations(&mut self) -> Option<CommandReport> {
        self.run_outline(WalkMode::FixDestinations)
    }

    pub fn capitalize_all(&mut self) -> Option<CommandReport> {
        self.run_outline(WalkMode::Capitalize)
    }

    pub fn fix_annotations(&mut self) -> Option<CommandReport> {
        let document = self.document.as_mut()?;
        let changed = outline::fix_annotations(document, &self.toc);
        info!("[DocumentController] fix-annotations changed {}", changed);
        Some(CommandReport::annotations(changed))
    }

    pub fn outline_items(&mut self) -> Option<Vec<OutlineItem>> {
        let document = self.document.as_mut()?;
        Some(match document.outline_root() {
            Some(root) => outline::outline_items(document, root),
            None => Vec::new(),
        })
    }

    fn run_outline(&mut self, mode: WalkMode) -> Option<CommandReport> {
        let document = self.document.as_mut()?;
        let Some(root) = document.outline_root() else {
            info!("[DocumentController] {:?}: document has no outline", mode);
            return Some(CommandReport::bookmarks(0));
        };
        let toc = self.settings.bold_toc.then_some(&self.toc);
        let changed = outline::run(document, root, mode, &self.caser, toc);
        info!("[DocumentController] {:?} changed {}", mode, changed);
        Some(CommandReport::bookmarks(changed))
    }

    /// 保存到 `target`，为空时覆盖打开的文件
    pub fn save(&mut self, target: Option<&Path>) -> Result<PathBuf> {
        let path = target
            .map(Path::to_path_buf)
            .or_else(|| self.path.clone())
            .context("No output path for document")?;
        let document = self.document.as_mut().ok_or(Error::NoActiveDocument)?;
        document
            .save(&path)
            .with_context(|| format!("Failed to save PDF file: {}", path.display()))?;
        Ok(path)
    }
}
