use super::Destination;

/// 大纲条目的导航动作
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// 跳转到文档内目标
    GoTo(Destination),
    /// 其它动作（URI、Launch、命名动作、无法解析的命名目标等），只记录类型名
    Other(String),
}

impl Action {
    pub fn destination(&self) -> Option<&Destination> {
        match self {
            Action::GoTo(dest) => Some(dest),
            Action::Other(_) => None,
        }
    }

    /// 需要修正的目标：非 XYZ 或缩放已指定
    pub fn needs_fix(&self) -> bool {
        self.destination().is_some_and(|dest| !dest.is_canonical())
    }
}
