use super::FitType;

/// 大纲条目快照，用于 list 命令输出
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineItem {
    pub title: String,
    pub page: Option<usize>,
    pub level: usize,
    pub open: bool,
    pub fit: Option<FitType>,
    pub flags: u32,
}

impl OutlineItem {
    pub fn new(title: String, page: Option<usize>, level: usize) -> OutlineItem {
        OutlineItem {
            title,
            page,
            level,
            open: false,
            fit: None,
            flags: 0,
        }
    }

    pub fn is_bold(&self) -> bool {
        self.flags & super::FLAG_BOLD != 0
    }

    pub fn is_italic(&self) -> bool {
        self.flags & super::FLAG_ITALIC != 0
    }
}
