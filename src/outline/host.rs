use std::fmt::Debug;
use std::hash::Hash;

use crate::entity::Action;
use crate::error::Result;

/// 大纲树宿主接口
///
/// 节点由宿主持有，核心代码只通过句柄读取和修改。
/// 与底层 PDF 库解耦，测试时用内存实现替代。
pub trait OutlineHost {
    /// 节点句柄
    type Node: Copy + Eq + Hash + Debug;

    /// 句柄是否仍然有效
    fn is_valid(&self, node: Self::Node) -> bool;

    fn is_open(&self, node: Self::Node) -> bool;

    fn set_open(&mut self, node: Self::Node, open: bool) -> Result<()>;

    fn has_children(&self, node: Self::Node) -> bool {
        self.first_child(node).is_some()
    }

    fn first_child(&self, node: Self::Node) -> Option<Self::Node>;

    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// 标题，没有标题时返回空字符串
    fn title(&self, node: Self::Node) -> String;

    /// 替换标题，旧标题由宿主释放
    fn set_title(&mut self, node: Self::Node, title: &str) -> Result<()>;

    fn action(&self, node: Self::Node) -> Option<Action>;

    /// 用新动作替换旧动作。
    ///
    /// 要么完全成功，要么节点保持原状：构造失败时宿主必须释放已创建的对象。
    fn set_action(&mut self, node: Self::Node, action: Action) -> Result<()>;

    fn flags(&self, node: Self::Node) -> u32;

    fn set_flags(&mut self, node: Self::Node, flags: u32) -> Result<()>;
}

/// 文档级文本注释接口（扁平集合，非树）
pub trait AnnotationHost {
    type Annotation: Copy + Eq + Debug;

    fn text_annotations(&self) -> Vec<Self::Annotation>;

    fn annotation_contents(&self, annot: Self::Annotation) -> String;

    fn is_annotation_bold(&self, annot: Self::Annotation) -> bool;

    fn set_annotation_bold(&mut self, annot: Self::Annotation, bold: bool) -> Result<()>;
}
